/// Recommendation source abstraction
///
/// The ranking engine lives on a separate server. The submission handler only
/// depends on this trait, so tests can stand in a mock or an in-process fake.
use crate::{
    error::AppResult,
    models::{RecommendRequest, RecommendResponse},
};

pub mod http;

pub use http::HttpRecommender;

/// Trait for anything that answers a summary request with recommendation records
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationProvider: Send + Sync {
    /// Sends one request and returns the decoded response body.
    ///
    /// Transport, status and body-parsing failures all come back as
    /// [`crate::error::AppError::RequestFailed`].
    async fn recommend(&self, request: &RecommendRequest) -> AppResult<RecommendResponse>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
