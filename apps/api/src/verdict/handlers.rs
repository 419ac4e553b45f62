//! Axum route handlers for the Verdict API.
//!
//! Provider failures never change the status code: they are embedded in the
//! response body. Only an unreadable request body is rejected.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;

use crate::errors::AppError;
use crate::state::AppState;
use crate::verdict::{VerdictRequest, VerdictResponse};

/// POST /score
///
/// Returns `{score, summary}` as produced by the provider.
pub async fn handle_score(
    State(state): State<AppState>,
    payload: Result<Json<VerdictRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    Ok(Json(state.verdicts.score(&request).await))
}

/// POST /gpt_verdict
///
/// Returns `{result}` holding the provider's markdown assessment.
pub async fn handle_verdict(
    State(state): State<AppState>,
    payload: Result<Json<VerdictRequest>, JsonRejection>,
) -> Result<Json<VerdictResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    Ok(Json(state.verdicts.verdict(&request).await))
}
