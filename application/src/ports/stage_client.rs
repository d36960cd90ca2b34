//! Stage client port
//!
//! Defines the interface for running one deliberation stage against the
//! council server.

use async_trait::async_trait;
use council_domain::{OpinionRecord, Query, ReviewRecord, Stage, SynthesisRecord};
use thiserror::Error;

/// Decoded result of one stage request
#[derive(Debug, Clone, PartialEq)]
pub enum StagePayload {
    Opinions(Vec<OpinionRecord>),
    Reviews(Vec<ReviewRecord>),
    Synthesis(SynthesisRecord),
}

impl StagePayload {
    /// The stage this payload belongs to
    pub fn stage(&self) -> Stage {
        match self {
            StagePayload::Opinions(_) => Stage::Opinions,
            StagePayload::Reviews(_) => Stage::Review,
            StagePayload::Synthesis(_) => Stage::Synthesis,
        }
    }

    /// Number of records carried
    pub fn len(&self) -> usize {
        match self {
            StagePayload::Opinions(v) => v.len(),
            StagePayload::Reviews(v) => v.len(),
            StagePayload::Synthesis(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Errors that can occur while running a stage
///
/// All variants abort the pipeline the same way; they stay distinct for
/// diagnostics.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StageError {
    /// Non-success HTTP status, connection failure or timeout
    #[error("{message}")]
    Transport {
        stage: Stage,
        status: Option<u16>,
        message: String,
    },

    /// Body could not be decoded into the stage's expected shape
    #[error("Malformed response from stage {}: {message}", .stage.number())]
    MalformedResponse { stage: Stage, message: String },

    /// Well-formed response carrying `success: false`
    #[error("{message}")]
    Application { stage: Stage, message: String },
}

impl StageError {
    /// Error for a non-success HTTP status; the body is never inspected
    pub fn http_status(stage: Stage, status: u16) -> Self {
        StageError::Transport {
            stage,
            status: Some(status),
            message: format!("HTTP Error: {}", status),
        }
    }

    /// Error for a request that never produced a response
    pub fn connection(stage: Stage, message: impl Into<String>) -> Self {
        StageError::Transport {
            stage,
            status: None,
            message: message.into(),
        }
    }

    pub fn malformed(stage: Stage, message: impl Into<String>) -> Self {
        StageError::MalformedResponse {
            stage,
            message: message.into(),
        }
    }

    /// Error for `success: false`; a missing message becomes "Unknown error"
    pub fn application(stage: Stage, message: Option<String>) -> Self {
        StageError::Application {
            stage,
            message: message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| "Unknown error".to_string()),
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            StageError::Transport { stage, .. }
            | StageError::MalformedResponse { stage, .. }
            | StageError::Application { stage, .. } => *stage,
        }
    }

    /// Diagnostic discriminant
    pub fn kind(&self) -> &'static str {
        match self {
            StageError::Transport { .. } => "transport",
            StageError::MalformedResponse { .. } => "malformed_response",
            StageError::Application { .. } => "application",
        }
    }
}

/// Client for the council server's stage endpoints
///
/// Implementations (adapters) live in the infrastructure layer. A request
/// that stalls blocks the pipeline; implementations that need bounded
/// latency must apply their own timeout.
#[async_trait]
pub trait StageClient: Send + Sync {
    /// Run `stage` for `query` and decode its records
    async fn run_stage(&self, stage: Stage, query: &Query) -> Result<StagePayload, StageError>;
}
