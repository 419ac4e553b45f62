//! Client for the Verdict Service's `POST /gpt_verdict` endpoint.
//!
//! A verdict is always a string. Transport failures, timeouts and bad
//! responses become the verdict text itself; nothing is retried.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

pub const DEFAULT_VERDICT_URL: &str = "http://localhost:8080/gpt_verdict";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(180);

/// Verdict text used when the service answers with a non-success status.
pub const BACKEND_ERROR: &str = "Backend error";

/// Anything that can produce a verdict for one resume.
#[async_trait]
pub trait VerdictApi: Send + Sync {
    async fn verdict(&self, job_description: &str, resume_text: &str) -> String;
}

#[derive(Debug, Serialize)]
struct VerdictRequest<'a> {
    job_description: &'a str,
    resume_text: &'a str,
}

#[derive(Clone)]
pub struct HttpVerdictClient {
    client: Client,
    url: String,
}

impl HttpVerdictClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            url: url.into(),
        }
    }

    async fn request(&self, job_description: &str, resume_text: &str) -> reqwest::Result<String> {
        let response = self
            .client
            .post(&self.url)
            .json(&VerdictRequest {
                job_description,
                resume_text,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            warn!("Verdict service returned {}", response.status());
            return Ok(BACKEND_ERROR.to_string());
        }

        let body: Value = response.json().await?;
        Ok(body
            .get("result")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string())
    }
}

#[async_trait]
impl VerdictApi for HttpVerdictClient {
    async fn verdict(&self, job_description: &str, resume_text: &str) -> String {
        match self.request(job_description, resume_text).await {
            Ok(verdict) => verdict,
            Err(e) => {
                warn!("Verdict request failed: {e}");
                e.to_string()
            }
        }
    }
}
