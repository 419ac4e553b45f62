use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use crate::ingestion::{
    Ingestor, PdfExtractTextLayer, PdftoppmRasterizer, TesseractOcr, UploadedItem,
};
use crate::report::DEFAULT_EXPORT_FILE;
use crate::verdict_client::{HttpVerdictClient, DEFAULT_VERDICT_URL};

/// Shortlist a batch of resumes against one job description.
#[derive(Debug, Parser)]
#[command(name = "shortlister", version, about)]
pub struct Cli {
    /// Resume files: PDF, DOCX, JPG/JPEG/PNG, or ZIP archives of those.
    pub uploads: Vec<PathBuf>,

    /// Job description text.
    #[arg(short = 'j', long, conflicts_with = "job_description_file")]
    pub job_description: Option<String>,

    /// Read the job description from a file.
    #[arg(short = 'f', long)]
    pub job_description_file: Option<PathBuf>,

    /// Where to write the Filename/Verdict export.
    #[arg(short, long, default_value = DEFAULT_EXPORT_FILE)]
    pub output: PathBuf,

    /// Verdict endpoint of the shortlisting service.
    #[arg(long, env = "VERDICT_API_URL", default_value = DEFAULT_VERDICT_URL)]
    pub api_url: String,

    /// Per-resume verdict request timeout.
    #[arg(long, default_value_t = 180)]
    pub timeout_secs: u64,

    #[arg(long, env = "TESSERACT_BIN", default_value = "tesseract")]
    pub tesseract_bin: String,

    #[arg(long, env = "OCR_LANG", default_value = "eng")]
    pub ocr_lang: String,

    #[arg(long, env = "PDFTOPPM_BIN", default_value = "pdftoppm")]
    pub pdftoppm_bin: String,

    /// Rasterization resolution for scanned PDF pages.
    #[arg(long, default_value_t = 200)]
    pub ocr_dpi: u32,

    /// Include the extracted resume text in each card.
    #[arg(long)]
    pub show_text: bool,

    /// Only run ingestion and print the extracted text as JSON lines.
    #[arg(long)]
    pub extract_only: bool,

    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// Job description from the flag or the file; empty when neither is given.
    pub fn job_description(&self) -> Result<String> {
        if let Some(text) = &self.job_description {
            return Ok(text.clone());
        }
        match &self.job_description_file {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read job description {}", path.display())),
            None => Ok(String::new()),
        }
    }

    /// Reads every upload, identified by its file name.
    pub fn load_uploads(&self) -> Result<Vec<UploadedItem>> {
        self.uploads.iter().map(|path| load_upload(path)).collect()
    }

    pub fn ingestor(&self) -> Ingestor {
        Ingestor::new(
            Arc::new(PdfExtractTextLayer),
            Arc::new(PdftoppmRasterizer::new(&self.pdftoppm_bin, self.ocr_dpi)),
            Arc::new(TesseractOcr::new(&self.tesseract_bin, &self.ocr_lang)),
        )
    }

    pub fn verdict_client(&self) -> HttpVerdictClient {
        HttpVerdictClient::new(&self.api_url, Duration::from_secs(self.timeout_secs))
    }
}

fn load_upload(path: &Path) -> Result<UploadedItem> {
    let content =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let identifier = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(UploadedItem::new(identifier, content))
}
