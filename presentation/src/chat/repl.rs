//! REPL (Read-Eval-Print Loop) for interactive deliberations

use super::command::{ReplCommand, help_text};
use crate::progress::DeliberationPresenter;
use crate::status::StatusDashboard;
use crate::view::{ViewError, ViewProjector};
use colored::Colorize;
use council_application::{PipelineController, StageClient};
use reedline::{
    DefaultPrompt, DefaultPromptSegment, Emacs, FileBackedHistory, KeyCode, KeyModifiers,
    Reedline, ReedlineEvent, Signal, default_emacs_keybindings,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

const HISTORY_CAPACITY: usize = 1000;

/// Interactive council REPL
///
/// Input is not read while a deliberation runs, so a second submission
/// can never race the first.
pub struct CouncilRepl<C: StageClient + 'static> {
    controller: PipelineController<C>,
    presenter: DeliberationPresenter,
    dashboard: Option<Arc<StatusDashboard>>,
    history_file: Option<PathBuf>,
    server: String,
}

impl<C: StageClient + 'static> CouncilRepl<C> {
    pub fn new(controller: PipelineController<C>, presenter: DeliberationPresenter) -> Self {
        Self {
            controller,
            presenter,
            dashboard: None,
            history_file: None,
            server: String::new(),
        }
    }

    /// Dashboard used by `/status`
    pub fn with_dashboard(mut self, dashboard: Arc<StatusDashboard>) -> Self {
        self.dashboard = Some(dashboard);
        self
    }

    /// Persist entered lines to this file
    pub fn with_history_file(mut self, path: Option<PathBuf>) -> Self {
        self.history_file = path;
        self
    }

    /// Server address shown in the welcome banner
    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = server.into();
        self
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> std::io::Result<()> {
        let mut editor = self.line_editor();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("council".to_string()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();

        loop {
            match editor.read_line(&prompt)? {
                Signal::Success(line) => {
                    if let Some(command) = ReplCommand::parse(&line) {
                        match command {
                            Ok(command) => {
                                if self.handle_command(command).await {
                                    break;
                                }
                            }
                            Err(message) => println!("{}", message),
                        }
                        continue;
                    }

                    // Errors are already shown by the presenter
                    if let Err(e) = self.controller.submit(&line, &self.presenter).await {
                        debug!(kind = e.kind(), "Submission ended with error");
                    }
                    println!();
                }
                Signal::CtrlC => {
                    println!("^C");
                }
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
            }
        }

        Ok(())
    }

    fn line_editor(&self) -> Reedline {
        let mut keybindings = default_emacs_keybindings();
        keybindings.add_binding(
            KeyModifiers::CONTROL,
            KeyCode::Char('s'),
            ReedlineEvent::Submit,
        );
        let mut editor = Reedline::create().with_edit_mode(Box::new(Emacs::new(keybindings)));

        if let Some(path) = &self.history_file {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            match FileBackedHistory::with_file(HISTORY_CAPACITY, path.clone()) {
                Ok(history) => editor = editor.with_history(Box::new(history)),
                Err(e) => warn!("Could not open history file {}: {}", path.display(), e),
            }
        }
        editor
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│        LLM Council - Interactive Mode       │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        if !self.server.is_empty() {
            println!("Server: {}", self.server);
        }
        println!("View:   {}", self.presenter.mode());
        println!();
        println!("{}", help_text());
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    async fn handle_command(&self, command: ReplCommand) -> bool {
        let state = self.controller.deliberation();
        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ReplCommand::Help => {
                println!();
                println!("{}", help_text());
                println!();
            }
            ReplCommand::ViewInfo => {
                println!(
                    "Current view: {} (options: sequential, comparison, tabbed)",
                    self.presenter.mode().to_string().bold()
                );
            }
            ReplCommand::View(mode) => self.presenter.switch_mode(mode, state),
            ReplCommand::Tab(label) => {
                if let Err(e) = self.presenter.select_tab(&label, state) {
                    println!("{}", e);
                    if let ViewError::UnknownTab(_) = e {
                        let tabs = ViewProjector::tabbed(state, self.presenter.view().policy());
                        let labels: Vec<&str> = tabs.labels().collect();
                        if !labels.is_empty() {
                            println!("Available: {}", labels.join(", "));
                        }
                    }
                }
            }
            ReplCommand::Collapse(section) => {
                let collapsed = self.presenter.toggle_collapse(section, state);
                let action = if collapsed { "collapsed" } else { "expanded" };
                println!("{} {}", section.display_name(), action);
            }
            ReplCommand::Show => self.presenter.show(state),
            ReplCommand::Status => match &self.dashboard {
                Some(dashboard) => {
                    if let Err(e) = dashboard.show().await {
                        println!("{} {}", "Status unavailable:".red(), e);
                    }
                }
                None => println!("Status dashboard is not configured"),
            },
        }
        false
    }
}
