use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::qna::classifier::IntentClassifier;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Pluggable intent classifier for the Q&A endpoint. Default: KeywordIntentClassifier.
    pub classifier: Arc<dyn IntentClassifier>,
}
