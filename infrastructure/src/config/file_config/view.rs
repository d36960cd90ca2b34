//! View configuration from TOML (`[view]` section)

use council_domain::{ChairmanPolicy, ConfigIssue, ConfigIssueCode, Severity, ViewMode};
use serde::{Deserialize, Serialize};

/// Raw view configuration from TOML
///
/// # Example
///
/// ```toml
/// [view]
/// mode = "sequential"       # "sequential", "comparison", "tabbed"
/// chairman = "replace"      # "replace" or "append"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileViewConfig {
    /// Initial view mode
    pub mode: String,
    /// How the chairman's synthesis joins its participant group
    pub chairman: String,
}

impl Default for FileViewConfig {
    fn default() -> Self {
        Self {
            mode: ViewMode::default().as_str().to_string(),
            chairman: "replace".to_string(),
        }
    }
}

impl FileViewConfig {
    /// Parse mode string into ViewMode, falling back to sequential
    pub fn parse_mode(&self) -> (ViewMode, Vec<ConfigIssue>) {
        match self.mode.parse::<ViewMode>() {
            Ok(mode) => (mode, vec![]),
            Err(_) => {
                let issue = ConfigIssue {
                    severity: Severity::Warning,
                    code: ConfigIssueCode::InvalidEnumValue {
                        field: "view.mode".to_string(),
                        value: self.mode.clone(),
                        valid_values: ViewMode::ALL
                            .iter()
                            .map(|m| m.as_str().to_string())
                            .collect(),
                    },
                    message: format!(
                        "view.mode: unknown value '{}', falling back to 'sequential'",
                        self.mode
                    ),
                };
                (ViewMode::default(), vec![issue])
            }
        }
    }

    /// Parse chairman string into ChairmanPolicy, falling back to replace
    pub fn parse_chairman(&self) -> (ChairmanPolicy, Vec<ConfigIssue>) {
        match self.chairman.parse::<ChairmanPolicy>() {
            Ok(policy) => (policy, vec![]),
            Err(_) => {
                let issue = ConfigIssue {
                    severity: Severity::Warning,
                    code: ConfigIssueCode::InvalidEnumValue {
                        field: "view.chairman".to_string(),
                        value: self.chairman.clone(),
                        valid_values: vec!["replace".to_string(), "append".to_string()],
                    },
                    message: format!(
                        "view.chairman: unknown value '{}', falling back to 'replace'",
                        self.chairman
                    ),
                };
                (ChairmanPolicy::default(), vec![issue])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_defaults_parse_cleanly() {
        let config = FileViewConfig::default();
        let (mode, issues) = config.parse_mode();
        assert_eq!(mode, ViewMode::Sequential);
        assert!(issues.is_empty());
        assert_eq!(config.parse_chairman().0, ChairmanPolicy::Replace);
        assert!(config.parse_chairman().1.is_empty());
    }

    #[test]
    fn test_unknown_mode_falls_back_with_warning() {
        let config = FileViewConfig {
            mode: "grid".to_string(),
            ..Default::default()
        };
        let (mode, issues) = config.parse_mode();
        assert_eq!(mode, ViewMode::Sequential);
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error());
        let ConfigIssueCode::InvalidEnumValue { valid_values, .. } = &issues[0].code else {
            panic!("expected InvalidEnumValue");
        };
        assert_eq!(valid_values, &["sequential", "comparison", "tabbed"]);
    }

    #[test]
    fn test_append_policy() {
        let config = FileViewConfig {
            chairman: "Append".to_string(),
            ..Default::default()
        };
        assert_eq!(config.parse_chairman().0, ChairmanPolicy::Append);
    }
}
