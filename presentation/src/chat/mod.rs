//! Interactive mode

pub mod command;
pub mod repl;

pub use command::{ReplCommand, help_text};
pub use repl::CouncilRepl;
