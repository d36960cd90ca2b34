//! Slash commands understood by the REPL

use crate::view::{ViewError, parse_section};
use council_domain::{Stage, ViewMode};

/// A parsed REPL line that is not a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Show the current view mode and the options
    ViewInfo,
    View(ViewMode),
    Tab(String),
    Collapse(Stage),
    /// Re-render the active view
    Show,
    Status,
    Help,
    Quit,
}

impl ReplCommand {
    /// Parse a line starting with `/`.
    ///
    /// Returns `None` for lines that are queries, `Some(Err(message))` for
    /// malformed commands.
    pub fn parse(line: &str) -> Option<Result<Self, String>> {
        let line = line.trim();
        let rest = line.strip_prefix('/')?;
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        let command = match name {
            "quit" | "exit" | "q" => Ok(ReplCommand::Quit),
            "help" | "h" | "?" => Ok(ReplCommand::Help),
            "status" => Ok(ReplCommand::Status),
            "show" => Ok(ReplCommand::Show),
            "view" | "v" if arg.is_empty() => Ok(ReplCommand::ViewInfo),
            "view" | "v" => arg
                .parse::<ViewMode>()
                .map(ReplCommand::View)
                .map_err(|e| e.to_string()),
            "tab" | "t" if arg.is_empty() => Err("Usage: /tab <participant>".to_string()),
            "tab" | "t" => Ok(ReplCommand::Tab(arg.to_string())),
            "collapse" | "c" => parse_section(arg)
                .map(ReplCommand::Collapse)
                .map_err(|e: ViewError| e.to_string()),
            other => Err(format!(
                "Unknown command: /{}\nType /help for available commands",
                other
            )),
        };
        Some(command)
    }
}

/// Help text listing every command
pub fn help_text() -> String {
    [
        "Commands:",
        "  /view [sequential|comparison|tabbed]  - Show or switch the view",
        "  /tab <participant>                    - Activate a participant tab",
        "  /collapse <opinions|reviews|synthesis> - Collapse or expand a section",
        "  /show                                 - Re-render the current view",
        "  /status                               - Show council model status",
        "  /help, /h, /?                         - Show this help",
        "  /quit, /exit, /q                      - Exit",
        "",
        "Enter or Ctrl+S submits a question; Alt+Enter inserts a newline.",
    ]
    .join("\n")
}
