use thiserror::Error;

/// Failure while turning one uploaded item into text.
///
/// Never aborts a batch: the pipeline records it against the item and moves on.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("PDF text extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX parse failed: {0}")]
    Docx(String),

    #[error("{0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("OCR failed: {0}")]
    Ocr(String),

    #[error("page rasterization failed: {0}")]
    Rasterize(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("extraction worker failed: {0}")]
    Worker(String),
}

/// Batch-level precondition failures, checked before any resume is processed.
#[derive(Debug, Error)]
pub enum ShortlistError {
    /// `warnings` holds archive failures found while looking for resumes.
    #[error("Please upload resumes and paste the job description.")]
    MissingInput { warnings: Vec<String> },
}
