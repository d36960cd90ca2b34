//! Presentation layer for llm-council
//!
//! This crate contains the view model (projection of deliberation state
//! into view modes), console output, progress reporting, the status
//! dashboard, the interactive REPL and CLI definitions.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;
pub mod progress;
pub mod status;
pub mod view;

// Re-export commonly used types
pub use chat::CouncilRepl;
pub use cli::commands::{Cli, OutputFormat};
pub use config::{OutputConfig, ReplConfig};
pub use output::console::ConsoleRenderer;
pub use progress::reporter::DeliberationPresenter;
pub use status::StatusDashboard;
pub use view::{Projection, ViewController, ViewProjector};
