//! Progress reporting and incremental rendering for deliberations
//!
//! Text output is rendered as results arrive: the sequential view prints
//! each stage's section when it is committed, the comparison grid prints
//! once stage 1 lands, and the tabbed view (which regroups everything)
//! prints when the pipeline completes or fails. JSON output prints a
//! single report at the end.

use crate::output::{ConsoleRenderer, DeliberationReport, ErrorReport};
use crate::view::{ErrorBanner, Projection, ViewController, ViewError, ViewProjector};
use council_application::{DeliberationError, PipelineObserver};
use council_domain::{DeliberationState, OutputFormat, Query, Stage, ViewMode};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::debug;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Shows a running deliberation in the terminal
pub struct DeliberationPresenter {
    view: Mutex<ViewController>,
    banner: Mutex<ErrorBanner>,
    spinner: Mutex<Option<ProgressBar>>,
    out: Mutex<Box<dyn Write + Send>>,
    format: OutputFormat,
    show_progress: bool,
}

impl DeliberationPresenter {
    pub fn new(view: ViewController, format: OutputFormat) -> Self {
        Self {
            view: Mutex::new(view),
            banner: Mutex::new(ErrorBanner::new()),
            spinner: Mutex::new(None),
            out: Mutex::new(Box::new(std::io::stdout())),
            format,
            show_progress: true,
        }
    }

    /// Set whether to show the stage spinner
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Write rendered output somewhere other than stdout
    pub fn with_writer(mut self, out: Box<dyn Write + Send>) -> Self {
        self.out = Mutex::new(out);
        self
    }

    pub fn mode(&self) -> ViewMode {
        lock(&self.view).mode()
    }

    /// Snapshot of the current view selections
    pub fn view(&self) -> ViewController {
        lock(&self.view).clone()
    }

    pub fn banner_message(&self) -> Option<String> {
        lock(&self.banner).current().map(str::to_string)
    }

    // ==================== Viewer actions ====================

    /// Switch view mode and re-project `state`. Never fetches.
    pub fn switch_mode(&self, mode: ViewMode, state: &DeliberationState) {
        lock(&self.view).switch_mode(mode);
        debug!(mode = %mode, "View mode switched");
        self.show(state);
    }

    pub fn select_tab(&self, label: &str, state: &DeliberationState) -> Result<(), ViewError> {
        lock(&self.view).select_tab(label, state)?;
        self.show(state);
        Ok(())
    }

    /// Toggle a result section, returning whether it is now collapsed
    pub fn toggle_collapse(&self, section: Stage, state: &DeliberationState) -> bool {
        let collapsed = lock(&self.view).toggle_collapse(section);
        self.show(state);
        collapsed
    }

    /// Render the whole active view for `state`, with the error banner if
    /// it is still up
    pub fn show(&self, state: &DeliberationState) {
        let view = self.view();
        let projection = view.render(state);
        if self.format == OutputFormat::Json {
            let report = self.report(&projection, state, None);
            self.emit(&ConsoleRenderer::format_json(&report));
            return;
        }

        let mut output = String::new();
        if let Some(message) = self.banner_message() {
            output.push_str(&ConsoleRenderer::banner(&message));
            output.push('\n');
        }
        output.push_str(&ConsoleRenderer::render(&projection, view.collapsed()));
        if !state.is_empty() {
            output.push_str(&ConsoleRenderer::summary(&state.totals()));
        }
        self.emit(&output);
    }

    // ==================== Internals ====================

    fn emit(&self, text: &str) {
        let write = || {
            let mut out = lock(&self.out);
            if let Err(e) = writeln!(out, "{}", text).and_then(|()| out.flush()) {
                debug!("Failed to write output: {}", e);
            }
        };
        match lock(&self.spinner).as_ref() {
            Some(pb) => pb.suspend(write),
            None => write(),
        }
    }

    fn start_spinner(&self, message: &str) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg} {elapsed:.dim}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        if let Some(previous) = lock(&self.spinner).replace(pb) {
            previous.finish_and_clear();
        }
    }

    fn stop_spinner(&self) {
        if let Some(pb) = lock(&self.spinner).take() {
            pb.finish_and_clear();
        }
    }

    fn report<'a>(
        &self,
        projection: &'a Projection,
        state: &'a DeliberationState,
        error: Option<&DeliberationError>,
    ) -> DeliberationReport<'a> {
        DeliberationReport {
            query: state.query().map(Query::content),
            view: projection,
            totals: state.totals(),
            error: error.map(|e| ErrorReport {
                kind: e.kind(),
                message: e.user_message(),
            }),
        }
    }
}

impl PipelineObserver for DeliberationPresenter {
    fn on_submit(&self, query: &Query) {
        lock(&self.view).reset_selection();
        lock(&self.banner).dismiss();
        if self.format == OutputFormat::Text {
            self.emit(&ConsoleRenderer::query_header(query.content()));
        }
    }

    fn on_stage_start(&self, stage: Stage) {
        if self.show_progress {
            self.start_spinner(stage.loading_message());
        }
    }

    fn on_results_visible(&self, _state: &DeliberationState) {
        if self.format == OutputFormat::Text {
            self.emit(&ConsoleRenderer::results_header());
        }
    }

    fn on_stage_committed(&self, stage: Stage, state: &DeliberationState) {
        self.stop_spinner();
        lock(&self.banner).dismiss();
        if self.format != OutputFormat::Text {
            return;
        }

        let view = self.view();
        match view.mode() {
            ViewMode::Sequential => {
                let sequential = ViewProjector::sequential(state);
                self.emit(&ConsoleRenderer::sequential_section(
                    &sequential,
                    stage,
                    view.is_collapsed(stage),
                ));
            }
            ViewMode::Comparison if stage == Stage::Opinions => {
                self.emit(&ConsoleRenderer::comparison(&ViewProjector::comparison(state)));
            }
            ViewMode::Comparison | ViewMode::Tabbed => {}
        }
    }

    fn on_complete(&self, state: &DeliberationState) {
        self.stop_spinner();
        let view = self.view();
        match self.format {
            OutputFormat::Json => {
                let projection = view.render(state);
                self.emit(&ConsoleRenderer::format_json(&self.report(&projection, state, None)));
            }
            OutputFormat::Text => {
                let mut output = String::new();
                if view.mode() == ViewMode::Tabbed {
                    output.push_str(&ConsoleRenderer::render(&view.render(state), view.collapsed()));
                }
                output.push_str(&ConsoleRenderer::summary(&state.totals()));
                self.emit(&output);
            }
        }
    }

    fn on_error(&self, error: &DeliberationError, state: &DeliberationState) {
        self.stop_spinner();
        let message = error.user_message();
        lock(&self.banner).show(message.clone());

        let view = self.view();
        match self.format {
            OutputFormat::Json => {
                let projection = view.render(state);
                let report = self.report(&projection, state, Some(error));
                self.emit(&ConsoleRenderer::format_json(&report));
            }
            OutputFormat::Text => {
                let mut output = String::new();
                if view.mode() == ViewMode::Tabbed && !state.is_empty() {
                    output.push_str(&ConsoleRenderer::render(&view.render(state), view.collapsed()));
                }
                output.push('\n');
                output.push_str(&ConsoleRenderer::banner(&message));
                self.emit(&output);
            }
        }
    }
}
