use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /
/// Root probe kept for clients that only check the service banner.
pub async fn root_handler() -> Json<Value> {
    Json(json!({ "message": "Resume Shortlisting API is running." }))
}

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "shortlist-api",
        "provider_configured": state.verdicts.is_configured()
    }))
}
