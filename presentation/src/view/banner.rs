//! Error banner with auto-dismiss

use std::time::{Duration, Instant};

/// How long an error stays on screen
pub const BANNER_TIMEOUT: Duration = Duration::from_secs(5);

/// The single error message shown to the viewer.
///
/// Dismissed after [`BANNER_TIMEOUT`], on the next successful stage, or on
/// a new submission, whichever comes first.
#[derive(Debug, Clone)]
pub struct ErrorBanner {
    message: Option<String>,
    shown_at: Option<Instant>,
    timeout: Duration,
}

impl ErrorBanner {
    pub fn new() -> Self {
        Self::with_timeout(BANNER_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            message: None,
            shown_at: None,
            timeout,
        }
    }

    pub fn show(&mut self, message: impl Into<String>) {
        self.show_at(message, Instant::now());
    }

    pub fn show_at(&mut self, message: impl Into<String>, now: Instant) {
        self.message = Some(message.into());
        self.shown_at = Some(now);
    }

    pub fn dismiss(&mut self) {
        self.message = None;
        self.shown_at = None;
    }

    /// The message, if still within its display window
    pub fn current(&self) -> Option<&str> {
        self.current_at(Instant::now())
    }

    pub fn current_at(&self, now: Instant) -> Option<&str> {
        let shown_at = self.shown_at?;
        if now.saturating_duration_since(shown_at) >= self.timeout {
            return None;
        }
        self.message.as_deref()
    }

    pub fn is_visible(&self) -> bool {
        self.current().is_some()
    }
}

impl Default for ErrorBanner {
    fn default() -> Self {
        Self::new()
    }
}
