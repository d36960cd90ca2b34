//! HTTP adapter for the council server's stage endpoints

use super::envelope::{StageRequest, decode_stage_response};
use super::error::{Result, normalize_base_url};
use async_trait::async_trait;
use council_application::{StageClient, StageError, StagePayload};
use council_domain::{Query, Stage};
use std::time::Duration;
use tracing::{debug, warn};

pub(crate) const USER_AGENT: &str = concat!("llm-council/", env!("CARGO_PKG_VERSION"));

/// [`StageClient`] that POSTs `{ "query": ... }` to
/// `<base_url>/api/council/stage{N}`
pub struct HttpStageClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStageClient {
    /// Create a client for the server at `base_url`.
    ///
    /// `timeout` bounds each whole stage request; `None` waits as long as
    /// the server takes.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Endpoint URL for a stage
    pub fn endpoint(&self, stage: Stage) -> String {
        format!("{}/api/council/stage{}", self.base_url, stage.number())
    }
}

#[async_trait]
impl StageClient for HttpStageClient {
    async fn run_stage(&self, stage: Stage, query: &Query) -> std::result::Result<StagePayload, StageError> {
        let url = self.endpoint(stage);
        debug!(%url, "POST stage request");

        let response = self
            .client
            .post(&url)
            .json(&StageRequest {
                query: query.content(),
            })
            .send()
            .await
            .map_err(|e| {
                let message = if e.is_timeout() {
                    format!("Request to {} timed out", url)
                } else {
                    format!("Failed to reach {}: {}", url, e)
                };
                warn!(stage = stage.number(), "{}", message);
                StageError::connection(stage, message)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(stage = stage.number(), status = status.as_u16(), "Stage request rejected");
            return Err(StageError::http_status(stage, status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| {
            StageError::connection(stage, format!("Failed to read response body: {}", e))
        })?;
        debug!(stage = stage.number(), bytes = body.len(), "Stage response received");

        decode_stage_response(stage, status.as_u16(), &body)
    }
}
