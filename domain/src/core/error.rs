//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Query cannot be empty")]
    EmptyQuery,

    #[error("Participant identity cannot be empty")]
    EmptyParticipant,

    #[error("Invalid view mode: {0}")]
    InvalidViewMode(String),

    #[error("Invalid chairman policy: {0}")]
    InvalidChairmanPolicy(String),

    #[error("Stage {stage} cannot be committed: {reason}")]
    StageOutOfOrder { stage: u8, reason: String },
}

impl DomainError {
    /// Check if this error was caused by empty user input
    pub fn is_empty_query(&self) -> bool {
        matches!(self, DomainError::EmptyQuery)
    }
}
