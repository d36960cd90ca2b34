//! Infrastructure layer for llm-council
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod council;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileOutputConfig, FileReplConfig, FileServerConfig, FileViewConfig,
};
pub use council::{CouncilHttpError, HttpStageClient, HttpStatusClient};
