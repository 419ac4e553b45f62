//! Shortlisting: one batch in, one verdict per resume out, in upload order.
//!
//! Flow: expand archives -> precondition check -> extract every item ->
//! one verdict call per resume. Everything runs strictly one item at a time.

use serde::Serialize;
use tracing::info;

use crate::errors::ShortlistError;
use crate::ingestion::{expand_uploads, Ingestor, UploadedItem};
use crate::verdict_client::VerdictApi;

/// Final per-candidate record, shown as a card and exported as a row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortlistRecord {
    pub filename: String,
    pub resume_text: String,
    pub verdict: String,
}

#[derive(Debug, Default)]
pub struct ShortlistOutcome {
    pub records: Vec<ShortlistRecord>,
    /// Archive failures first, then unreadable files, in discovery order.
    pub warnings: Vec<String>,
}

/// Runs the whole batch.
///
/// Fails only when there is nothing to shortlist or no job description;
/// every other problem is carried in the outcome's warnings or verdicts.
/// Items whose extraction failed are still sent with empty text.
pub async fn run_shortlist(
    ingestor: &Ingestor,
    verdicts: &dyn VerdictApi,
    uploads: Vec<UploadedItem>,
    job_description: &str,
) -> Result<ShortlistOutcome, ShortlistError> {
    let batch = expand_uploads(uploads);
    if batch.items.is_empty() || job_description.trim().is_empty() {
        return Err(ShortlistError::MissingInput {
            warnings: batch.errors,
        });
    }

    let report = ingestor.ingest_expanded(batch).await;
    let warnings = report.warnings();

    let total = report.resumes.len();
    let mut records = Vec::with_capacity(total);
    for (i, resume) in report.resumes.into_iter().enumerate() {
        info!("Analyzing {}... ({}/{total})", resume.identifier, i + 1);
        let verdict = verdicts.verdict(job_description, &resume.text).await;
        records.push(ShortlistRecord {
            filename: resume.identifier,
            resume_text: resume.text,
            verdict,
        });
    }

    info!("Shortlisting complete! {} candidates analyzed.", records.len());
    Ok(ShortlistOutcome { records, warnings })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingestion::fixtures::{zip_bytes, CountingRasterizer, EchoOcr, FixedTextLayer};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// Records the resume text of every call and answers `verdict #n`.
    #[derive(Default)]
    struct RecordingVerdicts {
        seen: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl VerdictApi for RecordingVerdicts {
        async fn verdict(&self, job_description: &str, resume_text: &str) -> String {
            let mut seen = self.seen.lock().unwrap();
            seen.push((job_description.to_string(), resume_text.to_string()));
            format!("verdict #{}", seen.len())
        }
    }

    fn ingestor() -> Ingestor {
        Ingestor::new(
            Arc::new(FixedTextLayer::returning(
                "A long enough text layer for a native PDF resume document.",
            )),
            Arc::new(CountingRasterizer::with_pages(1)),
            Arc::new(EchoOcr::new("ocr")),
        )
    }

    #[tokio::test]
    async fn test_no_uploads_is_missing_input() {
        let verdicts = RecordingVerdicts::default();
        let err = run_shortlist(&ingestor(), &verdicts, vec![], "Rust engineer")
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please upload resumes and paste the job description."
        );
        assert!(verdicts.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_job_description_is_missing_input() {
        let verdicts = RecordingVerdicts::default();
        let result = run_shortlist(
            &ingestor(),
            &verdicts,
            vec![UploadedItem::new("a.png", b"x".to_vec())],
            "   \n",
        )
        .await;
        assert!(matches!(result, Err(ShortlistError::MissingInput { .. })));
        assert!(verdicts.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_archive_without_resumes_is_missing_input() {
        let archive = zip_bytes(&[("notes.txt", b"hello".as_slice())]);
        let verdicts = RecordingVerdicts::default();
        let result = run_shortlist(
            &ingestor(),
            &verdicts,
            vec![UploadedItem::new("batch.zip", archive)],
            "Rust engineer",
        )
        .await;
        assert!(matches!(result, Err(ShortlistError::MissingInput { .. })));
    }

    #[tokio::test]
    async fn test_only_corrupt_archives_keeps_their_warnings() {
        let verdicts = RecordingVerdicts::default();
        let err = run_shortlist(
            &ingestor(),
            &verdicts,
            vec![
                UploadedItem::new("first.zip", b"garbage".to_vec()),
                UploadedItem::new("second.zip", b"more garbage".to_vec()),
            ],
            "Rust engineer",
        )
        .await
        .unwrap_err();

        let ShortlistError::MissingInput { warnings } = err;
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].starts_with("Failed to extract first.zip: "));
        assert!(warnings[1].starts_with("Failed to extract second.zip: "));
        assert!(verdicts.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_extraction_still_gets_a_verdict() {
        let verdicts = RecordingVerdicts::default();
        let outcome = run_shortlist(
            &ingestor(),
            &verdicts,
            vec![
                UploadedItem::new("broken.docx", b"not a zip".to_vec()),
                UploadedItem::new("photo.png", b"pixels".to_vec()),
            ],
            "Rust engineer",
        )
        .await
        .unwrap();

        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.records[0].resume_text, "");
        assert_eq!(outcome.records[0].verdict, "verdict #1");
        assert_eq!(outcome.records[1].resume_text, "ocr[pixels]");
        assert_eq!(outcome.records[1].verdict, "verdict #2");

        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].starts_with("Could not read broken.docx: "));

        let seen = verdicts.seen.lock().unwrap();
        assert_eq!(seen[0], ("Rust engineer".to_string(), String::new()));
    }

    #[tokio::test]
    async fn test_corrupt_archive_warns_and_siblings_are_shortlisted() {
        let verdicts = RecordingVerdicts::default();
        let outcome = run_shortlist(
            &ingestor(),
            &verdicts,
            vec![
                UploadedItem::new("bad.zip", b"garbage".to_vec()),
                UploadedItem::new("cv.pdf", b"%PDF".to_vec()),
            ],
            "Rust engineer",
        )
        .await
        .unwrap();

        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].starts_with("Failed to extract bad.zip"));
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].filename, "cv.pdf");
    }

    #[tokio::test]
    async fn test_unsupported_upload_is_sent_with_empty_text() {
        let verdicts = RecordingVerdicts::default();
        let outcome = run_shortlist(
            &ingestor(),
            &verdicts,
            vec![UploadedItem::new("resume.rtf", b"{\\rtf1 Jane}".to_vec())],
            "Rust engineer",
        )
        .await
        .unwrap();

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].resume_text, "");
        assert!(outcome.warnings.is_empty());
    }
}
