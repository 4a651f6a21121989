use std::sync::Arc;

use crate::config::Config;
use crate::evaluation::ResumeEvaluator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Remote evaluator behind a trait object so tests can swap in a mock.
    pub evaluator: Arc<dyn ResumeEvaluator>,
    pub config: Config,
}
