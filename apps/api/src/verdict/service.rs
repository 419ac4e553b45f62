//! Verdict Service: compares one job description against one resume.
//!
//! Both operations are stateless and never fail: a missing credential or any
//! provider failure is folded into the normal response shape as a placeholder.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::{info, warn};

use crate::llm_client::{parse_json_completion, CompletionProvider, CompletionRequest};
use crate::verdict::prompts::{
    build_score_prompt, build_verdict_prompt, SCORE_MAX_TOKENS, SCORE_TEMPERATURE,
    VERDICT_MAX_TOKENS, VERDICT_TEMPERATURE,
};

/// Placeholder returned when no provider credential is configured.
pub const KEY_NOT_SET: &str = "key not set";

/// Request body shared by `/score` and `/gpt_verdict`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerdictRequest {
    pub job_description: String,
    pub resume_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerdictResponse {
    pub result: String,
}

#[derive(Clone)]
pub struct VerdictService {
    /// `None` when the provider credential is absent.
    provider: Option<Arc<dyn CompletionProvider>>,
}

impl VerdictService {
    pub fn new(provider: Option<Arc<dyn CompletionProvider>>) -> Self {
        Self { provider }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Rates the resume on a 0-10 scale. Returns the provider's JSON object
    /// verbatim, or `{score: 0, summary}` on any failure.
    pub async fn score(&self, request: &VerdictRequest) -> Value {
        let Some(provider) = &self.provider else {
            return score_placeholder(KEY_NOT_SET.to_string());
        };

        let completion = CompletionRequest {
            prompt: build_score_prompt(&request.job_description, &request.resume_text),
            temperature: SCORE_TEMPERATURE,
            max_tokens: SCORE_MAX_TOKENS,
        };

        let parsed = match provider.complete(&completion).await {
            Ok(text) => parse_json_completion::<Map<String, Value>>(&text),
            Err(e) => Err(e),
        };

        match parsed {
            Ok(object) => {
                let score = object.get("score").cloned().unwrap_or_default();
                info!(
                    resume_chars = request.resume_text.len(),
                    score = %score,
                    "Score computed"
                );
                Value::Object(object)
            }
            Err(e) => {
                warn!("Score request failed: {e}");
                score_placeholder(format!("Error: {e}"))
            }
        }
    }

    /// Produces the markdown assessment. Returns the provider's text verbatim,
    /// or a placeholder string on any failure.
    pub async fn verdict(&self, request: &VerdictRequest) -> VerdictResponse {
        let Some(provider) = &self.provider else {
            return VerdictResponse {
                result: KEY_NOT_SET.to_string(),
            };
        };

        let completion = CompletionRequest {
            prompt: build_verdict_prompt(&request.job_description, &request.resume_text),
            temperature: VERDICT_TEMPERATURE,
            max_tokens: VERDICT_MAX_TOKENS,
        };

        let result = match provider.complete(&completion).await {
            Ok(text) => {
                info!(
                    resume_chars = request.resume_text.len(),
                    verdict_chars = text.len(),
                    "Verdict produced"
                );
                text
            }
            Err(e) => {
                warn!("Verdict request failed: {e}");
                format!("Error: {e}")
            }
        };

        VerdictResponse { result }
    }
}

fn score_placeholder(summary: String) -> Value {
    json!({ "score": 0, "summary": summary })
}
