//! Model health status reported by the council server's status endpoint.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Health of one backing model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthState {
    Available,
    NotFound,
    Unavailable,
    Error,
    Running,
    Idle,
    #[default]
    #[serde(other)]
    Unknown,
}

impl HealthState {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthState::Available => "available",
            HealthState::NotFound => "not_found",
            HealthState::Unavailable => "unavailable",
            HealthState::Error => "error",
            HealthState::Running => "running",
            HealthState::Idle => "idle",
            HealthState::Unknown => "unknown",
        }
    }

    pub fn is_healthy(&self) -> bool {
        matches!(
            self,
            HealthState::Available | HealthState::Running | HealthState::Idle
        )
    }
}

impl std::fmt::Display for HealthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Cumulative request metrics for one model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelMetrics {
    pub avg_latency: f64,
    pub total_requests: u64,
    pub tokens_generated: u64,
    pub errors: u64,
}

/// Status entry for one model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelStatus {
    /// Participant display name backed by this model
    pub name: String,
    pub status: HealthState,
    pub color: String,
    pub available: bool,
    pub last_check: Option<String>,
    pub metrics: ModelMetrics,
}

/// Status of every model keyed by model identifier
pub type StatusBoard = BTreeMap<String, ModelStatus>;
