//! Raw TOML configuration data types
//!
//! These structs mirror the config file one-to-one. Enum-like fields stay
//! strings here and are parsed by `parse_*` helpers that report a
//! [`ConfigIssue`] and fall back to the default instead of failing.

mod output;
mod repl;
mod server;
mod view;

pub use output::FileOutputConfig;
pub use repl::FileReplConfig;
pub use server::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, FileServerConfig};
pub use view::FileViewConfig;

use council_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Council server connection
    pub server: FileServerConfig,
    /// Initial view mode and grouping policy
    pub view: FileViewConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        issues.extend(self.server.validate_base_url());
        issues.extend(self.view.parse_mode().1);
        issues.extend(self.view.parse_chairman().1);
        issues.extend(self.repl.resolve_history_file().1);

        issues
    }
}
