//! ZIP expansion: turns uploaded archives into the resumes they contain.

use std::io::{Cursor, Read};

use tracing::{debug, warn};
use zip::ZipArchive;

use crate::errors::ExtractError;
use crate::ingestion::{DocumentKind, UploadedItem};

/// Result of expanding every archive in a batch.
#[derive(Debug, Default)]
pub struct ExpandedBatch {
    /// Items in discovery order; archive entries sit where their archive was.
    pub items: Vec<UploadedItem>,
    /// One message per archive that could not be opened or read.
    pub errors: Vec<String>,
}

/// Replaces each `.zip` upload with its resume entries. Every other upload
/// passes through untouched, including unsupported ones.
pub fn expand_uploads(uploads: Vec<UploadedItem>) -> ExpandedBatch {
    let mut batch = ExpandedBatch::default();

    for upload in uploads {
        if DocumentKind::from_identifier(&upload.identifier) != DocumentKind::Archive {
            batch.items.push(upload);
            continue;
        }

        match expand_archive_into(&upload.content, &mut batch.items) {
            Ok(count) => debug!("Expanded {} into {count} resume(s)", upload.identifier),
            Err(e) => {
                let message = format!("Failed to extract {}: {e}", upload.identifier);
                warn!("{message}");
                batch.errors.push(message);
            }
        }
    }

    batch
}

/// Appends the archive's resume entries to `out`, named by their path inside
/// the archive. Entries read before a failure are kept.
fn expand_archive_into(bytes: &[u8], out: &mut Vec<UploadedItem>) -> Result<usize, ExtractError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut count = 0;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        if entry.is_dir() {
            continue;
        }

        let name = entry.name().to_string();
        if !DocumentKind::from_identifier(&name).is_resume() {
            continue;
        }

        let mut content = Vec::new();
        entry.read_to_end(&mut content)?;
        out.push(UploadedItem::new(name, content));
        count += 1;
    }

    Ok(count)
}
