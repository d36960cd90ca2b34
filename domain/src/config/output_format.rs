//! Output format value object

use serde::{Deserialize, Serialize};

/// Output format for rendered projections
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Colored terminal cards (default)
    #[default]
    Text,
    /// The projection as pretty-printed JSON
    Json,
}
