//! Server configuration from TOML (`[server]` section)

use crate::council::normalize_base_url;
use council_domain::{ConfigIssue, ConfigIssueCode, Severity};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default council server address
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Local models can take minutes per stage.
pub const DEFAULT_TIMEOUT_SECS: u64 = 600;

/// Raw server configuration from TOML
///
/// # Example
///
/// ```toml
/// [server]
/// base_url = "http://127.0.0.1:5000"
/// timeout_secs = 600        # 0 disables the timeout
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl FileServerConfig {
    /// Per-request timeout, `None` when disabled
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    /// Validate the base URL. Both failures are fatal: no request can be made.
    pub fn validate_base_url(&self) -> Vec<ConfigIssue> {
        if self.base_url.trim().is_empty() {
            return vec![ConfigIssue {
                severity: Severity::Error,
                code: ConfigIssueCode::EmptyValue {
                    field: "server.base_url".to_string(),
                },
                message: "server.base_url: must not be empty".to_string(),
            }];
        }
        match normalize_base_url(&self.base_url) {
            Ok(_) => vec![],
            Err(_) => vec![ConfigIssue {
                severity: Severity::Error,
                code: ConfigIssueCode::InvalidUrl {
                    field: "server.base_url".to_string(),
                    value: self.base_url.clone(),
                },
                message: format!(
                    "server.base_url: '{}' must start with http:// or https://",
                    self.base_url
                ),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_defaults() {
        let config = FileServerConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.timeout(), Some(Duration::from_secs(600)));
        assert!(config.validate_base_url().is_empty());
    }

    #[test]
    fn test_zero_timeout_disables() {
        let config = FileServerConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_invalid_base_url_is_error() {
        let config = FileServerConfig {
            base_url: "localhost:5000".to_string(),
            ..Default::default()
        };
        let issues = config.validate_base_url();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
        assert!(matches!(issues[0].code, ConfigIssueCode::InvalidUrl { .. }));

        let config = FileServerConfig {
            base_url: "  ".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate_base_url()[0].code,
            ConfigIssueCode::EmptyValue { .. }
        ));
    }
}
