//! Console output for deliberation projections

use crate::view::{Card, CardKind, ComparisonView, Projection, SequentialView, TabbedView};
use colored::{ColoredString, Colorize};
use council_domain::{DeliberationTotals, Stage};
use serde::Serialize;
use std::collections::BTreeSet;

/// Machine-readable result, printed with `--output json`
#[derive(Debug, Serialize)]
pub struct DeliberationReport<'a> {
    pub query: Option<&'a str>,
    pub view: &'a Projection,
    pub totals: DeliberationTotals,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorReport>,
}

/// Error part of a [`DeliberationReport`]
#[derive(Debug, Serialize)]
pub struct ErrorReport {
    pub kind: &'static str,
    pub message: String,
}

/// Formats projections for terminal display
pub struct ConsoleRenderer;

impl ConsoleRenderer {
    /// Render a whole projection
    pub fn render(projection: &Projection, collapsed: &BTreeSet<Stage>) -> String {
        match projection {
            Projection::Sequential(view) => Stage::ALL
                .iter()
                .map(|stage| Self::sequential_section(view, *stage, collapsed.contains(stage)))
                .collect(),
            Projection::Comparison(view) => Self::comparison(view),
            Projection::Tabbed(view) => Self::tabbed(view),
        }
    }

    /// One stage section of the sequential view
    pub fn sequential_section(view: &SequentialView, stage: Stage, collapsed: bool) -> String {
        let cards = view.section(stage);
        let mut output = Self::section_header(&format!("{} ({})", stage, cards.len()));

        if collapsed {
            output.push_str(&format!("  {}\n", "(collapsed)".dimmed()));
            return output;
        }
        if cards.is_empty() {
            output.push_str(&format!("  {}\n", "(no results)".dimmed()));
            return output;
        }
        for card in cards {
            output.push_str(&Self::card(card));
        }
        output
    }

    pub fn comparison(view: &ComparisonView) -> String {
        let mut output = Self::section_header(&format!(
            "Comparison: {} ({})",
            Stage::Opinions.display_name(),
            view.grid.len()
        ));
        if view.grid.is_empty() {
            output.push_str(&format!("  {}\n", "(no opinions yet)".dimmed()));
        }
        for card in &view.grid {
            output.push_str(&Self::card(card));
        }
        output
    }

    pub fn tabbed(view: &TabbedView) -> String {
        let mut output = Self::section_header("Participants");
        if view.tabs.is_empty() {
            output.push_str(&format!("  {}\n", "(no participants yet)".dimmed()));
            return output;
        }

        let bar: Vec<String> = view
            .tabs
            .iter()
            .map(|tab| {
                if tab.active {
                    format!("[{}]", paint(&tab.label, &tab.color).bold().underline())
                } else {
                    format!(" {} ", tab.label.dimmed())
                }
            })
            .collect();
        output.push_str(&format!("  {}\n", bar.join("|")));

        if let Some(panel) = view.active_panel() {
            for card in &panel.cards {
                output.push_str(&Self::card(card));
            }
        }
        output
    }

    /// One record card: avatar, name, metadata badges, then the body
    pub fn card(card: &Card) -> String {
        let avatar = paint(&format!("({})", card.initial), &card.color).bold();
        let name = match card.kind {
            CardKind::Synthesis => format!("Final Answer by {}", card.participant),
            CardKind::Review => format!("{} (review)", card.participant),
            CardKind::Opinion => card.participant.clone(),
        };
        let name = paint(&name, &card.color).bold();

        let mut badges = vec![
            format!("{:.2}s", card.latency),
            format!("{} tokens", card.tokens),
        ];
        if !card.time.is_empty() {
            badges.push(card.time.clone());
        }
        let mut header = format!("\n{} {}  {}", avatar, name, badges.join(" · ").dimmed());
        if !card.success {
            header.push_str(&format!(" {}", "[failed]".red().bold()));
        }

        format!("{}\n{}\n", header, Self::indent(&card.body, "    "))
    }

    pub fn query_header(query: &str) -> String {
        format!("\n{} {}\n", "Question:".cyan().bold(), query)
    }

    pub fn results_header() -> String {
        let line = "=".repeat(60);
        format!(
            "{}\n{:^60}\n{}",
            line.cyan(),
            "LLM Council Results".bold(),
            line.cyan()
        )
    }

    pub fn banner(message: &str) -> String {
        format!("{} {}", "x".red().bold(), message.red())
    }

    pub fn summary(totals: &DeliberationTotals) -> String {
        let mut parts = vec![
            format!("{} records", totals.records),
            format!("{} tokens", totals.tokens),
            format!("{:.2}s model time", totals.latency),
        ];
        if totals.failed_members > 0 {
            parts.push(format!("{} failed", totals.failed_members));
        }
        format!("\n{}\n{}\n", parts.join(" · ").dimmed(), "=".repeat(60).cyan())
    }

    /// Format as JSON
    pub fn format_json(report: &DeliberationReport<'_>) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Color text with a `#rrggbb` display tag, cyan when the tag is unusable
pub(crate) fn paint(text: &str, hex: &str) -> ColoredString {
    match parse_hex(hex) {
        Some((r, g, b)) => text.truecolor(r, g, b),
        None => text.cyan(),
    }
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.trim().strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
