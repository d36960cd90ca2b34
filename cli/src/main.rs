//! CLI entrypoint for LLM Council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod settings;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use council_application::PipelineController;
use council_domain::{OutputFormat, has_errors};
use council_infrastructure::{ConfigLoader, HttpStageClient, HttpStatusClient};
use council_presentation::{
    Cli, CouncilRepl, DeliberationPresenter, StatusDashboard, ViewController,
};
use settings::{Settings, apply_cli_overrides};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting LLM Council");

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    // === Configuration ===
    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    let file_config = apply_cli_overrides(file_config, &cli);

    let mut issues = file_config.validate();
    let (settings, _) = Settings::resolve(&file_config);
    for issue in &issues {
        if issue.is_error() {
            error!("{}", issue.message);
        } else {
            warn!("{}", issue.message);
        }
    }
    if has_errors(&issues) {
        let messages: Vec<String> = issues
            .drain(..)
            .filter(|i| i.is_error())
            .map(|i| i.message)
            .collect();
        bail!("Invalid configuration:\n  {}", messages.join("\n  "));
    }

    settings.output.apply_color();

    // === Dependency Injection ===
    let client = Arc::new(
        HttpStageClient::new(&settings.base_url, settings.timeout)
            .context("Failed to create council client")?,
    );
    let dashboard = Arc::new(StatusDashboard::new(Arc::new(
        HttpStatusClient::new(&settings.base_url).context("Failed to create status client")?,
    )));
    info!(server = %settings.base_url, view = %settings.view, "Council client ready");

    if cli.status {
        dashboard
            .show()
            .await
            .context("Failed to fetch council status")?;
        return Ok(());
    }

    let mut controller = PipelineController::new(client);
    // The dashboard prints cards, which would corrupt JSON output
    if settings.output.format == OutputFormat::Text {
        controller = controller.with_status_refresher(dashboard.clone());
    }

    let presenter = DeliberationPresenter::new(
        ViewController::new(settings.view, settings.chairman),
        settings.output.format,
    )
    .with_progress(settings.output.show_progress);

    // Chat mode
    if cli.chat {
        let mut repl = CouncilRepl::new(controller, presenter)
            .with_dashboard(dashboard)
            .with_history_file(settings.repl.history_file.clone())
            .with_server(settings.base_url.clone());
        repl.run().await?;
        return Ok(());
    }

    // Single question mode - question is required
    let Some(question) = cli.question else {
        bail!("Question is required. Use --chat for interactive mode.");
    };

    // The presenter has already shown the error; only the exit code is left
    if controller.submit(&question, &presenter).await.is_err() {
        drop(_log_guard);
        std::process::exit(1);
    }

    Ok(())
}

/// Initialize logging based on verbosity level. `RUST_LOG` wins when set.
///
/// The returned guard flushes the log file on drop.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let file_name = path
        .file_name()
        .with_context(|| format!("--log-file must name a file: {}", path.display()))?;
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}
