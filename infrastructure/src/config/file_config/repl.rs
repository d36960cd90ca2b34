//! REPL configuration from TOML (`[repl]` section)

use council_domain::{ConfigIssue, ConfigIssueCode, Severity};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw REPL configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Show a spinner while a stage is in flight
    pub show_progress: bool,
    /// Path to the query history file (`~/` is expanded)
    pub history_file: Option<String>,
}

impl Default for FileReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
        }
    }
}

impl FileReplConfig {
    /// Resolve the history file path.
    ///
    /// Falls back to `<data_dir>/llm-council/history.txt`; an empty
    /// configured value disables history with a warning.
    pub fn resolve_history_file(&self) -> (Option<PathBuf>, Vec<ConfigIssue>) {
        match self.history_file.as_deref().map(str::trim) {
            Some("") => {
                let issue = ConfigIssue {
                    severity: Severity::Warning,
                    code: ConfigIssueCode::EmptyValue {
                        field: "repl.history_file".to_string(),
                    },
                    message: "repl.history_file: empty path, history will not be saved"
                        .to_string(),
                };
                (None, vec![issue])
            }
            Some(path) => (Some(expand_home(path)), vec![]),
            None => (
                dirs::data_dir().map(|d| d.join("llm-council").join("history.txt")),
                vec![],
            ),
        }
    }
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_history_file() {
        let config = FileReplConfig {
            history_file: Some("/tmp/council-history.txt".to_string()),
            ..Default::default()
        };
        let (path, issues) = config.resolve_history_file();
        assert_eq!(path, Some(PathBuf::from("/tmp/council-history.txt")));
        assert!(issues.is_empty());
    }

    #[test]
    fn test_empty_history_file_disables_history() {
        let config = FileReplConfig {
            history_file: Some(" ".to_string()),
            ..Default::default()
        };
        let (path, issues) = config.resolve_history_file();
        assert!(path.is_none());
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error());
    }

    #[test]
    fn test_tilde_expansion() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(expand_home("~/h.txt"), home.join("h.txt"));
        assert_eq!(expand_home("rel/h.txt"), PathBuf::from("rel/h.txt"));
    }
}
