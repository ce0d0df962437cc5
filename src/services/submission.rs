use std::sync::Arc;

use tracing::instrument;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{DisplayMode, FormInput, RecommendRequest, Recommendations},
    panel::{RequestToken, ResultsPanel},
    services::providers::RecommendationProvider,
    view::{render_error, render_recommendations, Node},
};

/// What happened to one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Recommendations were rendered and shown
    Rendered { token: RequestToken, count: usize },
    /// The request failed and the error message is shown
    Failed { token: RequestToken, error: String },
    /// A newer submission was issued meanwhile, so this result was dropped
    Stale { token: RequestToken },
}

/// Form submission handler.
///
/// Normalizes a posted form into a summary request, calls the recommendation
/// provider, renders the outcome and commits it to the submitting session's
/// results panel.
pub struct SubmissionHandler {
    provider: Arc<dyn RecommendationProvider>,
    default_top_k: u32,
    default_language: String,
}

impl SubmissionHandler {
    pub fn new(provider: Arc<dyn RecommendationProvider>, config: &Config) -> Self {
        Self {
            provider,
            default_top_k: config.default_top_k,
            default_language: config.default_language.clone(),
        }
    }

    /// Builds the request body for a form
    pub fn build_request(&self, form: &FormInput) -> RecommendRequest {
        RecommendRequest {
            summary: form.summary(),
            top_k: form.top_k(self.default_top_k),
            language: form.language(&self.default_language),
        }
    }

    #[instrument(skip(self, panel, form), fields(provider = self.provider.name()))]
    pub async fn submit(&self, panel: &ResultsPanel, form: &FormInput) -> SubmissionOutcome {
        let request = self.build_request(form);
        let token = panel.issue();

        tracing::info!(
            generation = token.0,
            empty_summary = request.summary.is_empty(),
            top_k = request.top_k,
            language = %request.language,
            "Submitting recommendation request"
        );

        let result = self.fetch(&request).await;

        let (content, outcome) = match result {
            Ok(recs) => {
                let count = recs.len();
                (
                    render_recommendations(Some(&recs), &request.language),
                    SubmissionOutcome::Rendered { token, count },
                )
            }
            Err(e) => {
                let error = e.into_request_failure().to_string();
                tracing::warn!(generation = token.0, error = %error, "Recommendation request failed");
                (render_error(&error), SubmissionOutcome::Failed { token, error })
            }
        };

        Self::commit(panel, token, content, &request.language, outcome).await
    }

    async fn fetch(&self, request: &RecommendRequest) -> AppResult<Recommendations> {
        let response = self.provider.recommend(request).await?;

        if let Some(message) = &response.message {
            tracing::info!(message = %message, "Recommendation server message");
        }

        Recommendations::decode(DisplayMode::Beauty, response.into_records())
            .map_err(AppError::into_request_failure)
    }

    async fn commit(
        panel: &ResultsPanel,
        token: RequestToken,
        content: Vec<Node>,
        language: &str,
        outcome: SubmissionOutcome,
    ) -> SubmissionOutcome {
        if panel.commit(token, content, language).await {
            if let SubmissionOutcome::Rendered { count, .. } = &outcome {
                tracing::info!(generation = token.0, count, "Recommendations rendered");
            }
            outcome
        } else {
            tracing::debug!(generation = token.0, "Discarding stale recommendation response");
            SubmissionOutcome::Stale { token }
        }
    }
}
