//! Pipeline observer port
//!
//! Defines the interface through which the pipeline tells the viewer what
//! to show while a deliberation runs.

use crate::use_cases::run_deliberation::DeliberationError;
use council_domain::{DeliberationState, Query, Stage};

/// Callback for pipeline events
///
/// Implementations live in the presentation layer. Every callback runs to
/// completion before the pipeline issues its next request, so a render done
/// in `on_stage_committed` is never interleaved with the next stage.
pub trait PipelineObserver: Send + Sync {
    /// A query was accepted; previous results and errors should be cleared
    fn on_submit(&self, query: &Query);

    /// A stage request is about to be issued
    fn on_stage_start(&self, stage: Stage);

    /// A stage's results were written into the state
    fn on_stage_committed(&self, stage: Stage, state: &DeliberationState);

    /// Results became visible for the first time (after stage 1)
    fn on_results_visible(&self, _state: &DeliberationState) {}

    /// All three stages finished; the active view should be re-rendered
    fn on_complete(&self, state: &DeliberationState);

    /// The submission was rejected or a stage failed. Already committed
    /// results in `state` stay visible.
    fn on_error(&self, error: &DeliberationError, state: &DeliberationState);
}
