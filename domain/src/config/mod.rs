//! Configuration value objects for the domain layer
//!
//! These are domain concepts related to configuration that are
//! used across multiple layers.

mod output_format;
pub mod validation;
mod view_mode;

pub use output_format::OutputFormat;
pub use view_mode::ViewMode;
