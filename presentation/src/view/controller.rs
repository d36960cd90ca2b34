//! Active view selection: mode, tab and collapsed sections

use super::projection::{Projection, ViewProjector};
use council_domain::{ChairmanPolicy, DeliberationState, Stage, ViewMode};
use std::collections::BTreeSet;
use thiserror::Error;

/// Rejected view selections
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    #[error("Tabs are only available in the tabbed view (current view: {0})")]
    NotTabbed(ViewMode),

    #[error("No participant tab named '{0}'")]
    UnknownTab(String),

    #[error("Unknown section '{0}' (expected opinions, reviews or synthesis)")]
    UnknownSection(String),
}

/// Parse a result section name into its stage
pub fn parse_section(name: &str) -> Result<Stage, ViewError> {
    match name.trim().to_lowercase().as_str() {
        "opinions" | "opinion" | "stage1" | "1" => Ok(Stage::Opinions),
        "reviews" | "review" | "stage2" | "2" => Ok(Stage::Review),
        "synthesis" | "final" | "stage3" | "3" => Ok(Stage::Synthesis),
        _ => Err(ViewError::UnknownSection(name.to_string())),
    }
}

/// Owns what the viewer has selected. Rendering is a pure re-projection
/// of the current state with these selections applied.
#[derive(Debug, Clone)]
pub struct ViewController {
    mode: ViewMode,
    policy: ChairmanPolicy,
    /// `None` means the first tab
    selected_tab: Option<String>,
    collapsed: BTreeSet<Stage>,
}

impl ViewController {
    pub fn new(mode: ViewMode, policy: ChairmanPolicy) -> Self {
        Self {
            mode,
            policy,
            selected_tab: None,
            collapsed: BTreeSet::new(),
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn policy(&self) -> ChairmanPolicy {
        self.policy
    }

    pub fn selected_tab(&self) -> Option<&str> {
        self.selected_tab.as_deref()
    }

    /// Switch the active view. Tab selection goes back to the default.
    pub fn switch_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
        self.selected_tab = None;
    }

    /// Activate the participant tab labelled `label`
    pub fn select_tab(&mut self, label: &str, state: &DeliberationState) -> Result<(), ViewError> {
        if self.mode != ViewMode::Tabbed {
            return Err(ViewError::NotTabbed(self.mode));
        }
        let tabs = ViewProjector::tabbed(state, self.policy);
        if !tabs.has_tab(label) {
            return Err(ViewError::UnknownTab(label.to_string()));
        }
        self.selected_tab = Some(label.to_string());
        Ok(())
    }

    /// Flip a section's collapsed flag, returning the new value
    pub fn toggle_collapse(&mut self, section: Stage) -> bool {
        if !self.collapsed.remove(&section) {
            self.collapsed.insert(section);
            return true;
        }
        false
    }

    pub fn is_collapsed(&self, section: Stage) -> bool {
        self.collapsed.contains(&section)
    }

    pub fn collapsed(&self) -> &BTreeSet<Stage> {
        &self.collapsed
    }

    /// Forget per-deliberation selections when a new query starts
    pub fn reset_selection(&mut self) {
        self.selected_tab = None;
    }

    /// Project `state` into the active view
    pub fn render(&self, state: &DeliberationState) -> Projection {
        let mut projection = ViewProjector::project(state, self.mode, self.policy);
        if let Projection::Tabbed(tabs) = &mut projection
            && let Some(label) = &self.selected_tab
            && tabs.has_tab(label)
        {
            tabs.activate(label);
        }
        projection
    }
}

impl Default for ViewController {
    fn default() -> Self {
        Self::new(ViewMode::default(), ChairmanPolicy::default())
    }
}
