//! Runtime settings: file configuration with CLI flags applied on top

use council_domain::{ChairmanPolicy, ConfigIssue, ViewMode};
use council_infrastructure::FileConfig;
use council_presentation::{Cli, OutputConfig, ReplConfig};
use std::time::Duration;

/// Fully resolved settings the binary wires layers with
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub view: ViewMode,
    pub chairman: ChairmanPolicy,
    pub output: OutputConfig,
    pub repl: ReplConfig,
}

/// CLI flags take precedence over every configuration source
pub fn apply_cli_overrides(mut config: FileConfig, cli: &Cli) -> FileConfig {
    if let Some(server) = &cli.server {
        config.server.base_url = server.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.server.timeout_secs = timeout;
    }
    if let Some(view) = cli.view {
        config.view.mode = view.as_str().to_string();
    }
    if let Some(chairman) = cli.chairman {
        config.view.chairman = chairman.as_str().to_string();
    }
    if let Some(output) = cli.output {
        config.output.format = Some(output.into());
    }
    if cli.no_color {
        config.output.color = false;
    }
    if cli.quiet {
        config.repl.show_progress = false;
    }
    config
}

impl Settings {
    /// Resolve typed settings, collecting fallback warnings
    pub fn resolve(config: &FileConfig) -> (Self, Vec<ConfigIssue>) {
        let mut issues = Vec::new();

        let (view, view_issues) = config.view.parse_mode();
        issues.extend(view_issues);
        let (chairman, chairman_issues) = config.view.parse_chairman();
        issues.extend(chairman_issues);
        let (history_file, history_issues) = config.repl.resolve_history_file();
        issues.extend(history_issues);

        let settings = Self {
            base_url: config.server.base_url.trim().to_string(),
            timeout: config.server.timeout(),
            view,
            chairman,
            output: OutputConfig {
                format: config.output.format.unwrap_or_default(),
                color: config.output.color,
                show_progress: config.repl.show_progress,
            },
            repl: ReplConfig { history_file },
        };
        (settings, issues)
    }
}
