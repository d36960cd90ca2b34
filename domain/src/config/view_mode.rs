//! View mode value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// How accumulated deliberation results are laid out
///
/// Exactly one mode is active at a time; switching never re-fetches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Stage by stage: opinions, reviews, synthesis (default)
    #[default]
    Sequential,
    /// Stage 1 opinions side by side
    Comparison,
    /// One tab per participant
    Tabbed,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Sequential, ViewMode::Comparison, ViewMode::Tabbed];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Sequential => "sequential",
            ViewMode::Comparison => "comparison",
            ViewMode::Tabbed => "tabbed",
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ViewMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sequential" | "seq" => Ok(ViewMode::Sequential),
            "comparison" | "compare" | "cmp" => Ok(ViewMode::Comparison),
            "tabbed" | "tabs" | "tab" => Ok(ViewMode::Tabbed),
            other => Err(DomainError::InvalidViewMode(other.to_string())),
        }
    }
}
