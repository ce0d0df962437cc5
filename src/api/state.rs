use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::error::AppResult;
use crate::services::providers::{HttpRecommender, RecommendationProvider};
use crate::services::SubmissionHandler;
use crate::session::SessionStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub submissions: Arc<SubmissionHandler>,
    pub sessions: Arc<SessionStore>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates state around an arbitrary recommendation provider
    pub fn new(provider: Arc<dyn RecommendationProvider>, config: Config) -> Self {
        let submissions = Arc::new(SubmissionHandler::new(provider, &config));
        let sessions = Arc::new(SessionStore::new(config.max_sessions));
        Self {
            submissions,
            sessions,
            config: Arc::new(config),
        }
    }

    /// Creates state that talks to the configured recommendation server over HTTP
    pub fn from_config(config: Config) -> AppResult<Self> {
        let provider = HttpRecommender::new(
            config.recommender_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )?;
        Ok(Self::new(Arc::new(provider), config))
    }
}
