//! Test builders and backend doubles shared by the ingestion tests.

use std::io::{Cursor, Write};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use zip::write::FileOptions;
use zip::ZipWriter;

use crate::errors::ExtractError;
use crate::ingestion::ocr::{OcrEngine, PageRasterizer};
use crate::ingestion::pdf::PdfTextLayer;

pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default();
    for &(path, content) in entries {
        zip.start_file(path, options).expect("start_file");
        zip.write_all(content).expect("write_all");
    }
    zip.finish().expect("finish").into_inner()
}

/// A minimal DOCX package whose body holds the given paragraph XML.
pub fn docx_bytes(body_xml: &str) -> Vec<u8> {
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body_xml}<w:sectPr/></w:body></w:document>"#
    );
    zip_bytes(&[
        ("[Content_Types].xml", b"<Types/>".as_slice()),
        ("word/document.xml", document.as_bytes()),
    ])
}

/// A one-page PDF with a Helvetica text layer, one line per entry.
pub fn pdf_bytes(lines: &[&str]) -> Vec<u8> {
    let mut content = String::from("BT /F1 12 Tf 72 720 Td 16 TL");
    for line in lines {
        content.push_str(&format!(" ({line}) Tj T*"));
    }
    content.push_str(" ET");

    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
         /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>"
            .to_string(),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
        format!("<< /Length {} >>\nstream\n{content}\nendstream", content.len()),
    ];

    let mut pdf = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.push_str(&format!("{} 0 obj\n{body}\nendobj\n", i + 1));
    }

    let xref_at = pdf.len();
    pdf.push_str(&format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1));
    for offset in offsets {
        pdf.push_str(&format!("{offset:010} 00000 n \n"));
    }
    pdf.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
        objects.len() + 1
    ));
    pdf.into_bytes()
}

/// Text layer that answers every PDF with the same text, or fails.
pub struct FixedTextLayer {
    pub text: Option<String>,
    pub calls: AtomicUsize,
}

impl FixedTextLayer {
    pub fn returning(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            text: None,
            calls: AtomicUsize::new(0),
        }
    }
}

impl PdfTextLayer for FixedTextLayer {
    fn extract_text(&self, _pdf: &[u8]) -> Result<String, ExtractError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.text
            .clone()
            .ok_or_else(|| ExtractError::Pdf("Invalid file trailer".to_string()))
    }
}

/// Rasterizer that renders every PDF to `pages` fake page images.
pub struct CountingRasterizer {
    pub pages: usize,
    pub calls: AtomicUsize,
}

impl CountingRasterizer {
    pub fn with_pages(pages: usize) -> Self {
        Self {
            pages,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageRasterizer for CountingRasterizer {
    async fn rasterize(&self, _pdf: &[u8]) -> Result<Vec<Vec<u8>>, ExtractError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok((1..=self.pages)
            .map(|n| format!("page-{n}").into_bytes())
            .collect())
    }
}

/// OCR engine that "reads" an image back as `<prefix>[<image bytes as text>]`.
pub struct EchoOcr {
    pub prefix: String,
    pub calls: AtomicUsize,
}

impl EchoOcr {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OcrEngine for EchoOcr {
    async fn recognize(&self, image: &[u8]) -> Result<String, ExtractError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("{}[{}]", self.prefix, String::from_utf8_lossy(image)))
    }
}
