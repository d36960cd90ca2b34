//! Application layer for llm-council
//!
//! This crate contains the pipeline controller use case and the port
//! definitions it is wired through. It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    observer::PipelineObserver,
    stage_client::{StageClient, StageError, StagePayload},
    status::{NoStatusRefresh, StatusError, StatusRefresher, StatusSource},
};
pub use use_cases::run_deliberation::{DeliberationError, PipelineController, PipelineState};
