//! Status ports
//!
//! The model health dashboard is polled independently of deliberations.
//! The pipeline's only touchpoint is [`StatusRefresher::refresh`], called
//! once stage 3 completes.

use async_trait::async_trait;
use council_domain::StatusBoard;
use thiserror::Error;

/// Errors that can occur while fetching model status
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatusError {
    #[error("Status request failed: {0}")]
    RequestFailed(String),

    #[error("Status endpoint returned HTTP {0}")]
    HttpStatus(u16),

    #[error("Invalid status payload: {0}")]
    InvalidPayload(String),
}

/// Source of the per-model status board
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch_status(&self) -> Result<StatusBoard, StatusError>;
}

/// Something that refreshes the ambient status display
///
/// Implementations swallow and log their own failures; a status problem
/// never turns into a deliberation error.
#[async_trait]
pub trait StatusRefresher: Send + Sync {
    async fn refresh(&self);
}

/// No-op refresher for when no status display is attached
pub struct NoStatusRefresh;

#[async_trait]
impl StatusRefresher for NoStatusRefresh {
    async fn refresh(&self) {}
}
