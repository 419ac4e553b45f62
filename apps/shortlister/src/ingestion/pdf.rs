//! PDF text: the embedded text layer first, page OCR when that is too thin.

use crate::errors::ExtractError;

/// Direct extraction shorter than this (in characters) is treated as a
/// scanned document and re-read through OCR.
pub const MIN_DIRECT_TEXT_CHARS: usize = 50;

/// Reads the embedded text layer of a PDF, pages concatenated in order.
///
/// Synchronous and CPU-bound; callers run it on a blocking worker.
pub trait PdfTextLayer: Send + Sync {
    fn extract_text(&self, pdf: &[u8]) -> Result<String, ExtractError>;
}

/// `pdf-extract` backed text layer.
pub struct PdfExtractTextLayer;

impl PdfTextLayer for PdfExtractTextLayer {
    fn extract_text(&self, pdf: &[u8]) -> Result<String, ExtractError> {
        pdf_extract::extract_text_from_mem(pdf).map_err(|e| ExtractError::Pdf(e.to_string()))
    }
}

/// True when the text layer is too thin to be the real document.
pub fn needs_ocr(direct_text: &str) -> bool {
    direct_text.chars().count() < MIN_DIRECT_TEXT_CHARS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingestion::fixtures::pdf_bytes;

    #[test]
    fn test_empty_and_short_text_need_ocr() {
        assert!(needs_ocr(""));
        assert!(needs_ocr("Page 1"));
        assert!(needs_ocr(&"x".repeat(49)));
        assert!(!needs_ocr(&"x".repeat(50)));
    }

    #[test]
    fn test_threshold_counts_characters_not_bytes() {
        // 25 two-byte characters: 50 bytes but still under the threshold.
        let accented = "é".repeat(25);
        assert_eq!(accented.len(), 50);
        assert!(needs_ocr(&accented));
    }

    #[test]
    fn test_garbage_bytes_are_pdf_error() {
        let err = PdfExtractTextLayer
            .extract_text(b"this is not a pdf at all")
            .unwrap_err();
        assert!(matches!(err, ExtractError::Pdf(_)), "{err}");
    }

    #[test]
    fn test_text_pdf_yields_its_text_layer() {
        let pdf = pdf_bytes(&[
            "Jane Doe",
            "Senior Rust Engineer with ten years of storage systems work",
        ]);
        let text = PdfExtractTextLayer.extract_text(&pdf).unwrap();
        assert!(text.contains("Jane Doe"), "{text}");
        assert!(text.contains("Senior Rust Engineer"), "{text}");
        assert!(!needs_ocr(&text));
    }
}
