//! Recommendation scoring service client
//!
//! The scoring model runs as a separate HTTP service; this client forwards
//! a student's profile and returns the scored course list. All calls carry
//! a bounded timeout so an unresponsive service degrades into an upstream
//! error instead of a hung request.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use tassel_common::api::types::{
    MlHealthResponse, PopularResponse, Recommendation, RecommendRequest, RecommendResponse,
};

/// Default scoring service location, overridable via settings / ML_API_URL
pub const DEFAULT_ML_API_URL: &str = "http://localhost:5000";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Scoring service client errors
#[derive(Debug, Error)]
pub enum MlError {
    #[error("Recommendation service unreachable: {0}")]
    Network(String),

    #[error("Recommendation service timed out")]
    Timeout,

    /// Non-success response; carries the service's own message when present
    #[error("{0}")]
    Upstream(String),

    #[error("Malformed response from recommendation service: {0}")]
    Parse(String),
}

/// Recommendation scoring service client
pub struct MlClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl MlClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, MlError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MlError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
        })
    }

    /// POST /recommend - score courses for a student profile
    pub async fn recommend(
        &self,
        request: &RecommendRequest,
    ) -> Result<Vec<Recommendation>, MlError> {
        let url = format!("{}/recommend", self.base_url);

        tracing::debug!(user_id = %request.user_id, top_n = request.top_n, "Requesting recommendations");

        let response = self
            .http_client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(upstream_error(status, response).await);
        }

        let body: RecommendResponse = response
            .json()
            .await
            .map_err(|e| MlError::Parse(e.to_string()))?;

        tracing::info!(
            user_id = %request.user_id,
            count = body.recommendations.len(),
            "Received recommendations"
        );

        Ok(body.recommendations)
    }

    /// GET /items/popular - globally popular courses
    pub async fn popular(&self, top_n: i64) -> Result<PopularResponse, MlError> {
        let url = format!("{}/items/popular?top_n={}", self.base_url, top_n);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(upstream_error(status, response).await);
        }

        response.json().await.map_err(|e| MlError::Parse(e.to_string()))
    }

    /// GET /health - true when the service is up with its model loaded
    pub async fn health(&self) -> bool {
        let url = format!("{}/health", self.base_url);

        match self.http_client.get(&url).send().await {
            Ok(response) => match response.json::<MlHealthResponse>().await {
                Ok(body) => body.status == "healthy" && body.model_loaded,
                Err(_) => false,
            },
            Err(_) => false,
        }
    }
}

fn map_transport_error(error: reqwest::Error) -> MlError {
    if error.is_timeout() {
        MlError::Timeout
    } else {
        MlError::Network(error.to_string())
    }
}

/// Extract the service's `error` message from a failure response body,
/// falling back to the HTTP status
async fn upstream_error(status: reqwest::StatusCode, response: reqwest::Response) -> MlError {
    let message = response
        .json::<Value>()
        .await
        .ok()
        .and_then(|body| {
            body.get("error")
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
        })
        .unwrap_or_else(|| format!("Recommendation service error: {}", status));

    MlError::Upstream(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = MlClient::new(DEFAULT_ML_API_URL, Duration::from_millis(DEFAULT_TIMEOUT_MS));
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_service_is_network_error() {
        // Reserved TEST-NET-1 address; nothing listens there
        let client = MlClient::new("http://192.0.2.1:1", Duration::from_millis(200)).unwrap();

        let request = RecommendRequest {
            user_id: "U1".to_string(),
            major: "CS".to_string(),
            interests: String::new(),
            year: 2,
            gpa: 3.0,
            top_n: 5,
        };

        let err = client.recommend(&request).await.unwrap_err();
        assert!(matches!(err, MlError::Network(_) | MlError::Timeout));
    }
}
