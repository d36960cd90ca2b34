//! HTTP adapter for the council server's model health endpoint

use super::error::{Result, normalize_base_url};
use super::http_client::USER_AGENT;
use async_trait::async_trait;
use council_application::{StatusError, StatusSource};
use council_domain::StatusBoard;
use std::time::Duration;
use tracing::debug;

/// Health checks probe every model, so they get their own short bound
/// independent of the stage timeout.
const STATUS_TIMEOUT: Duration = Duration::from_secs(15);

/// [`StatusSource`] backed by `GET <base_url>/api/health`
pub struct HttpStatusClient {
    client: reqwest::Client,
    url: String,
}

impl HttpStatusClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(STATUS_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            url: format!("{}/api/health", base_url),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl StatusSource for HttpStatusClient {
    async fn fetch_status(&self) -> std::result::Result<StatusBoard, StatusError> {
        debug!(url = %self.url, "GET model status");
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| StatusError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StatusError::HttpStatus(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| StatusError::RequestFailed(e.to_string()))?;
        decode_status_board(&body)
    }
}

/// Decode the health payload: an object keyed by model identifier
pub fn decode_status_board(body: &[u8]) -> std::result::Result<StatusBoard, StatusError> {
    serde_json::from_slice(body).map_err(|e| StatusError::InvalidPayload(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::council::test_server::serve_once;
    use council_domain::HealthState;

    const HEALTH_BODY: &str = r##"{
        "llama3.2": {
            "name": "Alpha", "status": "available", "color": "#ff6b6b",
            "available": true, "last_check": "2024-05-01T12:00:00",
            "metrics": {"avg_latency": 1.25, "total_requests": 4, "tokens_generated": 812, "errors": 0}
        },
        "mistral": {"name": "Beta", "status": "not_found", "available": false}
    }"##;

    #[test]
    fn test_decode_status_board() {
        let board = decode_status_board(HEALTH_BODY.as_bytes()).unwrap();
        assert_eq!(board.len(), 2);

        let alpha = &board["llama3.2"];
        assert_eq!(alpha.name, "Alpha");
        assert!(alpha.status.is_healthy());
        assert_eq!(alpha.metrics.tokens_generated, 812);

        let beta = &board["mistral"];
        assert_eq!(beta.status, HealthState::NotFound);
        assert_eq!(beta.metrics.total_requests, 0);
    }

    #[test]
    fn test_decode_rejects_non_object() {
        let err = decode_status_board(b"[1, 2]").unwrap_err();
        assert!(matches!(err, StatusError::InvalidPayload(_)));
    }

    #[tokio::test]
    async fn test_fetch_status_over_http() {
        let (base_url, server) = serve_once("200 OK", HEALTH_BODY.to_string()).await;
        let client = HttpStatusClient::new(&base_url).unwrap();

        let board = client.fetch_status().await.unwrap();
        let request = server.await.unwrap();

        assert!(request.starts_with("GET /api/health HTTP/1.1"));
        assert_eq!(board.keys().collect::<Vec<_>>(), vec!["llama3.2", "mistral"]);
    }

    #[tokio::test]
    async fn test_fetch_status_http_error() {
        let (base_url, server) = serve_once("503 Service Unavailable", "{}".to_string()).await;
        let client = HttpStatusClient::new(&base_url).unwrap();

        let err = client.fetch_status().await.unwrap_err();
        server.await.unwrap();
        assert_eq!(err, StatusError::HttpStatus(503));
    }
}
