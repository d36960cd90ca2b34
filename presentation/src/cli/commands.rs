//! CLI command definitions

use clap::{Parser, ValueEnum};
use council_domain::{ChairmanPolicy, ViewMode};
use std::path::PathBuf;

/// Output format for deliberation results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored cards, rendered as each stage completes
    Text,
    /// One JSON report once the deliberation ends
    Json,
}

impl From<OutputFormat> for council_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => council_domain::OutputFormat::Text,
            OutputFormat::Json => council_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for llm-council
#[derive(Parser, Debug)]
#[command(name = "llm-council")]
#[command(author, version, about = "LLM Council - ask a council of models, review, synthesize")]
#[command(long_about = r#"
LLM Council sends your question to a council server and shows the deliberation.

The process has three stages, run strictly in order:
1. Initial Opinions: every council member answers independently
2. Peer Review: members review and critique the answers
3. Final Synthesis: the chairman writes the final answer

Results can be shown in three views:
  sequential   stage by stage (default)
  comparison   stage 1 answers side by side
  tabbed       one tab per participant

Configuration files are loaded from (in priority order):
1. LLM_COUNCIL_* environment variables (e.g. LLM_COUNCIL_SERVER__BASE_URL)
2. --config <path>     Explicit config file
3. ./council.toml      Project-level config
4. ~/.config/llm-council/config.toml   Global config

Example:
  llm-council "What is the capital of France?"
  llm-council --view tabbed --server http://10.0.0.5:5000 "Compare Rust and Go"
  llm-council --chat
"#)]
pub struct Cli {
    /// The question to ask the council (not required in chat mode)
    pub question: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// View mode: sequential, comparison or tabbed
    #[arg(long, value_name = "MODE")]
    pub view: Option<ViewMode>,

    /// How the chairman joins the participant tabs: replace or append
    #[arg(long, value_name = "POLICY")]
    pub chairman: Option<ChairmanPolicy>,

    /// Council server base URL
    #[arg(short, long, value_name = "URL")]
    pub server: Option<String>,

    /// Per-stage request timeout in seconds (0 disables)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Show council model status and exit
    #[arg(long)]
    pub status: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from([
            "llm-council",
            "--view",
            "tabbed",
            "--chairman",
            "append",
            "-o",
            "json",
            "-vv",
            "What is 2+2?",
        ]);
        assert_eq!(cli.question.as_deref(), Some("What is 2+2?"));
        assert_eq!(cli.view, Some(ViewMode::Tabbed));
        assert_eq!(cli.chairman, Some(ChairmanPolicy::Append));
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(cli.verbose, 2);
        assert!(!cli.chat);
    }

    #[test]
    fn test_rejects_unknown_view() {
        assert!(Cli::try_parse_from(["llm-council", "--view", "grid", "q"]).is_err());
    }
}
