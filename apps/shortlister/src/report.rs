//! Presentation adapter: terminal cards and the two-column verdict export.

use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

use crate::shortlist::ShortlistRecord;

pub const DEFAULT_EXPORT_FILE: &str = "ai_shortlist_verdicts.csv";
pub const EXPORT_HEADER: [&str; 2] = ["Filename", "Verdict"];

/// Extracted text longer than this is cut in the card preview.
pub const PREVIEW_CHARS: usize = 2500;

/// Writes one `Filename,Verdict` row per record, in record order.
pub fn write_export<W: Write>(records: &[ShortlistRecord], writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(EXPORT_HEADER)?;
    for record in records {
        csv_writer.write_record([record.filename.as_str(), record.verdict.as_str()])?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn export_to_path(records: &[ShortlistRecord], path: &Path) -> Result<(), csv::Error> {
    let file = std::fs::File::create(path)?;
    write_export(records, file)
}

/// First `limit` characters of `text`, with `...` appended when cut.
pub fn preview(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Renders one card per record; the extracted text is included on request.
pub fn render_cards(records: &[ShortlistRecord], show_text: bool) -> String {
    let mut out = String::new();
    for record in records {
        let _ = writeln!(out, "{}", "=".repeat(72));
        let _ = writeln!(out, "{}", record.filename);
        let _ = writeln!(out, "{}", "-".repeat(72));
        let _ = writeln!(out, "{}", record.verdict.trim_end());
        if show_text {
            let _ = writeln!(out, "\n--- Extracted Resume Text ---");
            let _ = writeln!(out, "{}", preview(&record.resume_text, PREVIEW_CHARS));
        }
        out.push('\n');
    }
    let _ = writeln!(
        out,
        "Shortlisting complete! {} candidates analyzed.",
        records.len()
    );
    out
}
