//! Run Deliberation use case
//!
//! Drives the three council stages strictly in order and owns the
//! [`DeliberationState`] they fill.
//!
//! ```text
//! Idle ──submit──▶ Running(Opinions) ──▶ Running(Review) ──▶ Running(Synthesis) ──▶ Complete
//!                        │                     │                    │
//!                        └─────────────────────┴────────────────────┴──▶ Failed
//! ```
//!
//! A failure stops the pipeline but keeps whatever was already committed
//! and shown. `Complete` and `Failed` both accept a new submission, which
//! replaces the state wholesale.

use crate::ports::observer::PipelineObserver;
use crate::ports::stage_client::{StageClient, StageError, StagePayload};
use crate::ports::status::{NoStatusRefresh, StatusRefresher};
use council_domain::{DeliberationState, Query, Stage};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors surfaced by the pipeline
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeliberationError {
    #[error("Query is empty")]
    EmptyQuery,

    #[error("A deliberation is already running")]
    AlreadyRunning,

    #[error(transparent)]
    Stage(#[from] StageError),

    #[error("Invalid pipeline transition: {0}")]
    InvalidTransition(String),
}

impl DeliberationError {
    /// Diagnostic discriminant
    pub fn kind(&self) -> &'static str {
        match self {
            DeliberationError::EmptyQuery => "empty_query",
            DeliberationError::AlreadyRunning => "already_running",
            DeliberationError::Stage(e) => e.kind(),
            DeliberationError::InvalidTransition(_) => "invalid_transition",
        }
    }

    /// The single human-readable message shown to the viewer
    pub fn user_message(&self) -> String {
        match self {
            DeliberationError::EmptyQuery => "Please enter a question".to_string(),
            DeliberationError::AlreadyRunning => {
                "A deliberation is already running, wait for it to finish".to_string()
            }
            other => format!("Error during deliberation: {}", other),
        }
    }

    /// The stage that failed, if the error came from a stage
    pub fn stage(&self) -> Option<Stage> {
        match self {
            DeliberationError::Stage(e) => Some(e.stage()),
            _ => None,
        }
    }
}

/// Pipeline state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Running(Stage),
    Complete,
    /// The stage whose request failed
    Failed(Stage),
}

impl std::fmt::Display for PipelineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineState::Idle => write!(f, "idle"),
            PipelineState::Running(stage) => write!(f, "stage {} running", stage.number()),
            PipelineState::Complete => write!(f, "complete"),
            PipelineState::Failed(stage) => write!(f, "failed at stage {}", stage.number()),
        }
    }
}

/// Runs deliberations against an injected [`StageClient`]
///
/// The controller is the only writer of its [`DeliberationState`]; views
/// read it through [`deliberation()`](Self::deliberation).
pub struct PipelineController<C: StageClient + 'static> {
    client: Arc<C>,
    refresher: Arc<dyn StatusRefresher>,
    state: PipelineState,
    deliberation: DeliberationState,
    results_visible: bool,
    last_error: Option<DeliberationError>,
}

impl<C: StageClient + 'static> PipelineController<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            refresher: Arc::new(NoStatusRefresh),
            state: PipelineState::Idle,
            deliberation: DeliberationState::default(),
            results_visible: false,
            last_error: None,
        }
    }

    /// Refresh this after every completed deliberation
    pub fn with_status_refresher(mut self, refresher: Arc<dyn StatusRefresher>) -> Self {
        self.refresher = refresher;
        self
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn deliberation(&self) -> &DeliberationState {
        &self.deliberation
    }

    /// Whether any results have been shown for the current submission
    pub fn results_visible(&self) -> bool {
        self.results_visible
    }

    pub fn last_error(&self) -> Option<&DeliberationError> {
        self.last_error.as_ref()
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, PipelineState::Running(_))
    }

    // ==================== Transitions ====================

    /// Accept a submission: validate, reset state, enter stage 1.
    ///
    /// Rejections (`EmptyQuery`, `AlreadyRunning`) leave everything as it
    /// was, including results from an earlier query.
    pub fn begin(&mut self, raw_query: &str) -> Result<Query, DeliberationError> {
        if self.is_running() {
            warn!(state = %self.state, "Rejecting submission while a deliberation is running");
            return Err(DeliberationError::AlreadyRunning);
        }
        let query = Query::parse(raw_query).map_err(|_| DeliberationError::EmptyQuery)?;

        self.deliberation = DeliberationState::for_query(query.clone());
        self.results_visible = false;
        self.last_error = None;
        self.state = PipelineState::Running(Stage::Opinions);

        info!("Starting deliberation");
        Ok(query)
    }

    /// Commit the running stage's payload and advance.
    ///
    /// Returns the next stage to run, or `None` once the pipeline is complete.
    pub fn apply_success(&mut self, payload: StagePayload) -> Result<Option<Stage>, DeliberationError> {
        let PipelineState::Running(stage) = self.state else {
            return Err(DeliberationError::InvalidTransition(format!(
                "received stage {} results while {}",
                payload.stage().number(),
                self.state
            )));
        };
        if payload.stage() != stage {
            return Err(DeliberationError::InvalidTransition(format!(
                "expected stage {} results, got stage {}",
                stage.number(),
                payload.stage().number()
            )));
        }

        let records = payload.len();
        let committed = match payload {
            StagePayload::Opinions(opinions) => self.deliberation.commit_opinions(opinions),
            StagePayload::Reviews(reviews) => self.deliberation.commit_reviews(reviews),
            StagePayload::Synthesis(synthesis) => self.deliberation.commit_synthesis(synthesis),
        };
        committed.map_err(|e| DeliberationError::InvalidTransition(e.to_string()))?;

        if stage == Stage::Opinions {
            self.results_visible = true;
        }

        let next = stage.next();
        self.state = match next {
            Some(next) => PipelineState::Running(next),
            None => PipelineState::Complete,
        };
        info!(stage = stage.number(), records, "Stage committed");
        Ok(next)
    }

    /// Stop the pipeline. Committed results and visibility are kept.
    pub fn apply_failure(&mut self, error: impl Into<DeliberationError>) -> DeliberationError {
        let error = error.into();
        if let PipelineState::Running(stage) = self.state {
            self.state = PipelineState::Failed(stage);
        }
        warn!(kind = error.kind(), state = %self.state, "Deliberation failed: {}", error);
        self.last_error = Some(error.clone());
        error
    }

    // ==================== Driver ====================

    /// Run a full deliberation for `raw_query`.
    ///
    /// Stage N+1 is requested only after stage N's results are committed
    /// and every observer callback for it has returned.
    pub async fn submit(
        &mut self,
        raw_query: &str,
        observer: &dyn PipelineObserver,
    ) -> Result<(), DeliberationError> {
        let query = match self.begin(raw_query) {
            Ok(query) => query,
            Err(e) => {
                observer.on_error(&e, &self.deliberation);
                return Err(e);
            }
        };
        observer.on_submit(&query);

        let mut stage = Stage::Opinions;
        loop {
            observer.on_stage_start(stage);
            debug!(stage = stage.number(), "Requesting {}", stage.display_name());

            let result = self.client.run_stage(stage, &query).await;
            let payload = match result {
                Ok(payload) => payload,
                Err(e) => return Err(self.fail(e, observer)),
            };

            let was_visible = self.results_visible;
            let next = match self.apply_success(payload) {
                Ok(next) => next,
                Err(e) => return Err(self.fail(e, observer)),
            };

            if !was_visible && self.results_visible {
                observer.on_results_visible(&self.deliberation);
            }
            observer.on_stage_committed(stage, &self.deliberation);

            match next {
                Some(next) => stage = next,
                None => break,
            }
        }

        info!("Deliberation complete");
        self.refresher.refresh().await;
        observer.on_complete(&self.deliberation);
        Ok(())
    }

    fn fail(
        &mut self,
        error: impl Into<DeliberationError>,
        observer: &dyn PipelineObserver,
    ) -> DeliberationError {
        let error = self.apply_failure(error);
        observer.on_error(&error, &self.deliberation);
        error
    }
}
