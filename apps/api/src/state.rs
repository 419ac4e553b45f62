use crate::verdict::VerdictService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Holds the completion provider, or nothing when the credential is absent.
    pub verdicts: VerdictService,
}
