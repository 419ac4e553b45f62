//! Ingestion pipeline: normalizes a batch of uploads into plain text.
//!
//! Flow: expand_uploads (ZIP -> entries) -> classify by suffix -> extract:
//! - PDF: embedded text layer, page OCR when it is under 50 characters
//! - JPG/JPEG/PNG: OCR
//! - DOCX: paragraph text
//! - anything else: empty text
//!
//! Nothing here aborts a batch. Archive failures become batch errors and
//! per-item failures become empty text plus an `extraction_error`.

pub mod archive;
pub mod docx;
pub mod kind;
pub mod ocr;
pub mod pdf;

#[cfg(test)]
pub(crate) mod fixtures;

use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::errors::ExtractError;

pub use archive::{expand_uploads, ExpandedBatch};
pub use kind::DocumentKind;
pub use ocr::{OcrEngine, PageRasterizer, PdftoppmRasterizer, TesseractOcr};
pub use pdf::{PdfExtractTextLayer, PdfTextLayer};

/// One uploaded file, or one entry expanded out of an uploaded archive.
#[derive(Debug, Clone)]
pub struct UploadedItem {
    /// Original file name, or the entry's path inside its archive.
    pub identifier: String,
    pub content: Bytes,
}

impl UploadedItem {
    pub fn new(identifier: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            identifier: identifier.into(),
            content: content.into(),
        }
    }
}

/// Text obtained from one item. `text` is empty when extraction failed or
/// the kind is unsupported.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedResume {
    pub identifier: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extraction_error: Option<String>,
}

/// Everything produced from one batch.
#[derive(Debug, Default)]
pub struct IngestionReport {
    pub resumes: Vec<ExtractedResume>,
    /// Archives that could not be opened or read.
    pub batch_errors: Vec<String>,
}

impl IngestionReport {
    /// Batch errors followed by per-item extraction warnings, in order.
    pub fn warnings(&self) -> Vec<String> {
        self.batch_errors
            .iter()
            .cloned()
            .chain(
                self.resumes
                    .iter()
                    .filter_map(|r| r.extraction_error.clone()),
            )
            .collect()
    }
}

/// Extraction strategies wired to their backends.
#[derive(Clone)]
pub struct Ingestor {
    pdf_text: Arc<dyn PdfTextLayer>,
    rasterizer: Arc<dyn PageRasterizer>,
    ocr: Arc<dyn OcrEngine>,
}

impl Ingestor {
    pub fn new(
        pdf_text: Arc<dyn PdfTextLayer>,
        rasterizer: Arc<dyn PageRasterizer>,
        ocr: Arc<dyn OcrEngine>,
    ) -> Self {
        Self {
            pdf_text,
            rasterizer,
            ocr,
        }
    }

    /// Expands and extracts a whole batch.
    pub async fn ingest(&self, uploads: Vec<UploadedItem>) -> IngestionReport {
        self.ingest_expanded(expand_uploads(uploads)).await
    }

    /// Extracts an already expanded batch, one item at a time.
    pub async fn ingest_expanded(&self, batch: ExpandedBatch) -> IngestionReport {
        let ExpandedBatch { items, errors } = batch;
        info!("Total resumes loaded: {}", items.len());

        let mut resumes = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            debug!("Extracting {} ({}/{})", item.identifier, i + 1, items.len());
            resumes.push(self.extract(item).await);
        }

        IngestionReport {
            resumes,
            batch_errors: errors,
        }
    }

    /// Extracts one item. Failures are logged and folded into the result.
    pub async fn extract(&self, item: &UploadedItem) -> ExtractedResume {
        match self.extract_text(item).await {
            Ok(text) => ExtractedResume {
                identifier: item.identifier.clone(),
                text,
                extraction_error: None,
            },
            Err(e) => {
                let message = format!("Could not read {}: {e}", item.identifier);
                warn!("{message}");
                ExtractedResume {
                    identifier: item.identifier.clone(),
                    text: String::new(),
                    extraction_error: Some(message),
                }
            }
        }
    }

    async fn extract_text(&self, item: &UploadedItem) -> Result<String, ExtractError> {
        match DocumentKind::from_identifier(&item.identifier) {
            DocumentKind::Pdf => self.extract_pdf(&item.content).await,
            DocumentKind::Image => self.ocr.recognize(&item.content).await,
            DocumentKind::Docx => {
                let content = item.content.clone();
                run_blocking(move || docx::extract_docx_text(&content)).await
            }
            DocumentKind::Archive | DocumentKind::Unsupported => {
                debug!("No extractor for {}; using empty text", item.identifier);
                Ok(String::new())
            }
        }
    }

    async fn extract_pdf(&self, content: &Bytes) -> Result<String, ExtractError> {
        let layer = Arc::clone(&self.pdf_text);
        let pdf = content.clone();
        let direct = run_blocking(move || layer.extract_text(&pdf)).await?;

        if !pdf::needs_ocr(&direct) {
            return Ok(direct);
        }

        debug!(
            "PDF text layer has {} characters; falling back to OCR",
            direct.chars().count()
        );
        let pages = self.rasterizer.rasterize(content).await?;
        let mut text = String::new();
        for page in &pages {
            text.push_str(&self.ocr.recognize(page).await?);
        }
        Ok(text)
    }
}

/// CPU-bound parsing runs off the async executor. A panic inside the parser
/// surfaces as an error for that item only.
async fn run_blocking<F>(work: F) -> Result<String, ExtractError>
where
    F: FnOnce() -> Result<String, ExtractError> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ExtractError::Worker(e.to_string()))?
}
