//! Domain layer for llm-council
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Deliberation
//!
//! A council answers a [`Query`] in three dependent stages:
//!
//! 1. **Opinions**: every member answers independently ([`OpinionRecord`])
//! 2. **Review**: members critique the anonymized answers ([`ReviewRecord`])
//! 3. **Synthesis**: the chairman writes the final answer ([`SynthesisRecord`])
//!
//! Results accumulate in a [`DeliberationState`] and can be re-keyed by
//! participant with [`ParticipantGroups`].

pub mod config;
pub mod core;
pub mod deliberation;
pub mod status;

// Re-export commonly used types
pub use config::{
    OutputFormat, ViewMode,
    validation::{ConfigIssue, ConfigIssueCode, Severity, has_errors},
};
pub use core::{error::DomainError, participant::ParticipantId, query::Query};
pub use deliberation::{
    grouping::{ChairmanPolicy, ParticipantGroups},
    records::{OpinionRecord, RecordMeta, ReviewRecord, StageRecord, SynthesisRecord},
    stage::Stage,
    state::{DeliberationState, DeliberationTotals},
};
pub use status::{HealthState, ModelMetrics, ModelStatus, StatusBoard};
