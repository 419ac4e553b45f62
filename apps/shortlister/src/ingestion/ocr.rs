//! OCR backends: page rasterization for scanned PDFs and text recognition
//! for images. The defaults drive the poppler and Tesseract command-line tools.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::errors::ExtractError;

/// Recognizes the text in one encoded raster image (PNG/JPEG).
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize(&self, image: &[u8]) -> Result<String, ExtractError>;
}

/// Renders every page of a PDF to an encoded image, in page order.
#[async_trait]
pub trait PageRasterizer: Send + Sync {
    async fn rasterize(&self, pdf: &[u8]) -> Result<Vec<Vec<u8>>, ExtractError>;
}

/// Runs `tesseract stdin stdout -l <language>`.
#[derive(Debug, Clone)]
pub struct TesseractOcr {
    binary: String,
    language: String,
}

impl TesseractOcr {
    pub fn new(binary: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            language: language.into(),
        }
    }
}

#[async_trait]
impl OcrEngine for TesseractOcr {
    async fn recognize(&self, image: &[u8]) -> Result<String, ExtractError> {
        let mut child = Command::new(&self.binary)
            .args(["stdin", "stdout", "-l", self.language.as_str()])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ExtractError::Ocr(format!("failed to launch {}: {e}", self.binary)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| ExtractError::Ocr("tesseract stdin unavailable".to_string()))?;
        let input = image.to_vec();
        // Feed stdin concurrently so a chatty stderr cannot deadlock the pipe.
        let feeder = tokio::spawn(async move {
            let written = stdin.write_all(&input).await;
            drop(stdin);
            written
        });

        let output = child.wait_with_output().await?;
        let fed = feeder
            .await
            .map_err(|e| ExtractError::Worker(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractError::Ocr(format!(
                "{} exited with {}: {}",
                self.binary,
                output.status,
                stderr.trim()
            )));
        }

        fed?;

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!("OCR recognized {} characters", text.chars().count());
        Ok(text)
    }
}

/// Runs `pdftoppm -png -r <dpi>` in a scratch directory.
#[derive(Debug, Clone)]
pub struct PdftoppmRasterizer {
    binary: String,
    dpi: u32,
}

impl PdftoppmRasterizer {
    pub fn new(binary: impl Into<String>, dpi: u32) -> Self {
        Self {
            binary: binary.into(),
            dpi,
        }
    }
}

#[async_trait]
impl PageRasterizer for PdftoppmRasterizer {
    async fn rasterize(&self, pdf: &[u8]) -> Result<Vec<Vec<u8>>, ExtractError> {
        let scratch = tempfile::tempdir()?;
        let input = scratch.path().join("input.pdf");
        tokio::fs::write(&input, pdf).await?;

        let output = Command::new(&self.binary)
            .arg("-png")
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg(&input)
            .arg(scratch.path().join("page"))
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                ExtractError::Rasterize(format!("failed to launch {}: {e}", self.binary))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractError::Rasterize(format!(
                "{} exited with {}: {}",
                self.binary,
                output.status,
                stderr.trim()
            )));
        }

        let pages = collect_pages(scratch.path()).await?;
        debug!("Rasterized PDF into {} page image(s)", pages.len());
        Ok(pages)
    }
}

/// Reads `page-N.png` files (N possibly zero-padded) sorted by page number.
async fn collect_pages(dir: &Path) -> Result<Vec<Vec<u8>>, ExtractError> {
    let mut numbered = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name();
        if let Some(number) = name.to_str().and_then(page_number) {
            numbered.push((number, entry.path()));
        }
    }
    numbered.sort_by_key(|(number, _)| *number);

    let mut pages = Vec::with_capacity(numbered.len());
    for (_, path) in numbered {
        pages.push(tokio::fs::read(path).await?);
    }
    Ok(pages)
}

fn page_number(file_name: &str) -> Option<u32> {
    file_name
        .strip_prefix("page-")?
        .strip_suffix(".png")?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_number_parses_padded_names() {
        assert_eq!(page_number("page-1.png"), Some(1));
        assert_eq!(page_number("page-07.png"), Some(7));
        assert_eq!(page_number("page-112.png"), Some(112));
        assert_eq!(page_number("input.pdf"), None);
        assert_eq!(page_number("page-x.png"), None);
    }

    #[tokio::test]
    async fn test_collect_pages_orders_numerically() {
        let dir = tempfile::tempdir().unwrap();
        for (name, body) in [
            ("page-10.png", "ten"),
            ("page-02.png", "two"),
            ("input.pdf", "pdf"),
            ("page-01.png", "one"),
        ] {
            std::fs::write(dir.path().join(name), body).unwrap();
        }

        let pages = collect_pages(dir.path()).await.unwrap();
        assert_eq!(pages, vec![b"one".to_vec(), b"two".to_vec(), b"ten".to_vec()]);
    }

    #[tokio::test]
    async fn test_missing_tesseract_binary_is_ocr_error() {
        let ocr = TesseractOcr::new("definitely-not-a-real-tesseract-binary", "eng");
        let err = ocr.recognize(b"\x89PNG").await.unwrap_err();
        assert!(matches!(err, ExtractError::Ocr(_)), "{err}");
    }

    #[tokio::test]
    async fn test_missing_pdftoppm_binary_is_rasterize_error() {
        let rasterizer = PdftoppmRasterizer::new("definitely-not-a-real-pdftoppm-binary", 200);
        let err = rasterizer.rasterize(b"%PDF-1.4").await.unwrap_err();
        assert!(matches!(err, ExtractError::Rasterize(_)), "{err}");
    }
}
