/// HTTP recommendation provider
///
/// Posts the summary request as JSON to `{base_url}/recommend` on the
/// recommendation server and parses the JSON reply.
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    models::{RecommendRequest, RecommendResponse},
    services::providers::RecommendationProvider,
};

#[derive(Clone)]
pub struct HttpRecommender {
    http_client: HttpClient,
    base_url: String,
}

impl HttpRecommender {
    /// Creates a provider with a per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url: base_url.into(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/recommend", self.base_url.trim_end_matches('/'))
    }
}

/// Pulls a readable message out of an error body (`{"detail": ...}` or `{"error": ...}`)
fn error_detail(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("detail")
                .or_else(|| value.get("error"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

#[async_trait::async_trait]
impl RecommendationProvider for HttpRecommender {
    async fn recommend(&self, request: &RecommendRequest) -> AppResult<RecommendResponse> {
        let url = self.endpoint();

        let response = self
            .http_client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::RequestFailed(format!("Request to {} failed: {}", url, e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::RequestFailed(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            return Err(AppError::RequestFailed(format!(
                "Recommendation server returned status {}: {}",
                status,
                error_detail(&body)
            )));
        }

        let parsed: RecommendResponse = serde_json::from_str(&body)?;

        tracing::debug!(
            provider = self.name(),
            count = parsed.recommendations.as_ref().map_or(0, Vec::len),
            "Recommendation response received"
        );

        Ok(parsed)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Summary;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::json;

    /// Serves `router` on an ephemeral local port and returns its base URL
    async fn spawn_upstream(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn request() -> RecommendRequest {
        RecommendRequest {
            summary: Summary {
                skin_type: Some("oily".to_string()),
                ..Default::default()
            },
            top_k: 2,
            language: "en".to_string(),
        }
    }

    #[tokio::test]
    async fn test_posts_request_and_parses_response() {
        let router = Router::new().route(
            "/recommend",
            post(|Json(body): Json<Value>| async move {
                // Echo the request back inside the record so the test can inspect it
                Json(json!({
                    "recommendations": [
                        { "name": "Cream", "score": 0.8, "description": body.to_string() }
                    ],
                    "count": 1,
                    "language": "en"
                }))
            }),
        );
        let base_url = spawn_upstream(router).await;

        let provider = HttpRecommender::new(format!("{}/", base_url), Duration::from_secs(5)).unwrap();
        let response = provider.recommend(&request()).await.unwrap();
        assert_eq!(response.count, Some(1));

        let records = response.into_records();
        assert_eq!(records.len(), 1);

        let sent: Value = serde_json::from_str(records[0]["description"].as_str().unwrap()).unwrap();
        assert_eq!(
            sent,
            json!({ "summary": { "skin_type": "oily" }, "top_k": 2, "language": "en" })
        );
    }

    #[tokio::test]
    async fn test_non_json_body_is_request_failure() {
        let router = Router::new().route("/recommend", post(|| async { "<html>oops</html>" }));
        let base_url = spawn_upstream(router).await;

        let provider = HttpRecommender::new(base_url, Duration::from_secs(5)).unwrap();
        let err = provider.recommend(&request()).await.unwrap_err();
        assert!(matches!(err, AppError::RequestFailed(_)));
        assert!(err.to_string().starts_with("Invalid response body"));
    }

    #[tokio::test]
    async fn test_error_status_is_request_failure_with_detail() {
        let router = Router::new().route(
            "/recommend",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "detail": "Summary object is required" })),
                )
            }),
        );
        let base_url = spawn_upstream(router).await;

        let provider = HttpRecommender::new(base_url, Duration::from_secs(5)).unwrap();
        let err = provider.recommend(&request()).await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("400"));
        assert!(message.contains("Summary object is required"));
    }

    #[tokio::test]
    async fn test_error_status_with_recommendation_body_is_still_a_failure() {
        let router = Router::new().route(
            "/recommend",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "recommendations": [], "error": "model not loaded" })),
                )
            }),
        );
        let base_url = spawn_upstream(router).await;

        let provider = HttpRecommender::new(base_url, Duration::from_secs(5)).unwrap();
        let err = provider.recommend(&request()).await.unwrap_err();
        assert!(matches!(err, AppError::RequestFailed(_)));
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("model not loaded"));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_request_failure() {
        // Bind and drop to get a port nothing listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let provider =
            HttpRecommender::new(format!("http://{}", addr), Duration::from_secs(2)).unwrap();
        let err = provider.recommend(&request()).await.unwrap_err();
        assert!(matches!(err, AppError::RequestFailed(_)));
        assert!(err.to_string().contains("/recommend"));
    }

    #[test]
    fn test_error_detail_falls_back_to_body() {
        assert_eq!(error_detail(r#"{"detail":"boom"}"#), "boom");
        assert_eq!(error_detail(r#"{"error":"bad"}"#), "bad");
        assert_eq!(error_detail(" Bad Gateway \n"), "Bad Gateway");
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let provider = HttpRecommender::new("http://reco:4708/", Duration::from_secs(1)).unwrap();
        assert_eq!(provider.endpoint(), "http://reco:4708/recommend");
    }
}
