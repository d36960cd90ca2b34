//! Model status dashboard

use crate::output::console::paint;
use async_trait::async_trait;
use colored::Colorize;
use council_application::{StatusError, StatusRefresher, StatusSource};
use council_domain::{HealthState, ModelStatus, StatusBoard};
use std::sync::Arc;
use tracing::warn;

/// Prints one card per council model from a [`StatusSource`]
pub struct StatusDashboard {
    source: Arc<dyn StatusSource>,
}

impl StatusDashboard {
    pub fn new(source: Arc<dyn StatusSource>) -> Self {
        Self { source }
    }

    /// Fetch and print the board
    pub async fn show(&self) -> Result<StatusBoard, StatusError> {
        let board = self.source.fetch_status().await?;
        println!("{}", Self::format_board(&board));
        Ok(board)
    }

    pub fn format_board(board: &StatusBoard) -> String {
        let mut output = format!("\n{}\n{}\n", "Council Models".cyan().bold(), "-".repeat(40));
        if board.is_empty() {
            output.push_str(&format!("  {}\n", "(no models reported)".dimmed()));
        }
        for (key, status) in board {
            output.push_str(&Self::model_card(key, status));
        }
        output
    }

    /// One model: name, status badge and request metrics
    pub fn model_card(key: &str, status: &ModelStatus) -> String {
        let name = if status.name.is_empty() {
            key
        } else {
            status.name.as_str()
        };
        let color = if status.color.is_empty() {
            "#00e5ff"
        } else {
            status.color.as_str()
        };
        let badge = match &status.status {
            s if s.is_healthy() => s.as_str().green(),
            HealthState::Unknown => "unknown".dimmed(),
            s => s.as_str().red(),
        };

        let metrics = &status.metrics;
        let latency = if metrics.avg_latency > 0.0 {
            format!("{:.2}s", metrics.avg_latency)
        } else {
            "N/A".to_string()
        };

        format!(
            "  {} {} [{}]\n    Avg Latency {} · Requests {} · Tokens {} · Errors {}\n",
            paint("●", color),
            paint(name, color).bold(),
            badge,
            latency,
            metrics.total_requests,
            metrics.tokens_generated,
            metrics.errors
        )
    }
}

#[async_trait]
impl StatusRefresher for StatusDashboard {
    async fn refresh(&self) {
        if let Err(e) = self.show().await {
            warn!("Status refresh failed: {}", e);
        }
    }
}
