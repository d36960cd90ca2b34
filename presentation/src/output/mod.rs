//! Output formatting for deliberation results

pub mod console;

pub use console::{ConsoleRenderer, DeliberationReport, ErrorReport};
