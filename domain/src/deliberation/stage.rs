//! Deliberation stages

use serde::{Deserialize, Serialize};

/// One of the three ordered phases of a deliberation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Stage 1 - every council member answers independently
    Opinions,
    /// Stage 2 - members review the anonymized answers
    Review,
    /// Stage 3 - the chairman synthesizes a final answer
    Synthesis,
}

impl Stage {
    /// All stages in execution order
    pub const ALL: [Stage; 3] = [Stage::Opinions, Stage::Review, Stage::Synthesis];

    /// 1-based stage number, as used in endpoint paths
    pub fn number(&self) -> u8 {
        match self {
            Stage::Opinions => 1,
            Stage::Review => 2,
            Stage::Synthesis => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Opinions => "opinions",
            Stage::Review => "review",
            Stage::Synthesis => "synthesis",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Stage::Opinions => "Initial Opinions",
            Stage::Review => "Peer Review",
            Stage::Synthesis => "Final Synthesis",
        }
    }

    /// Message shown while the stage request is in flight
    pub fn loading_message(&self) -> &'static str {
        match self {
            Stage::Opinions => "Stage 1: Collecting initial opinions...",
            Stage::Review => "Stage 2: Reviewing and critiquing...",
            Stage::Synthesis => "Stage 3: Final synthesis...",
        }
    }

    /// The stage that runs after this one, if any
    pub fn next(&self) -> Option<Stage> {
        match self {
            Stage::Opinions => Some(Stage::Review),
            Stage::Review => Some(Stage::Synthesis),
            Stage::Synthesis => None,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Stage {}: {}", self.number(), self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_and_numbers() {
        let numbers: Vec<u8> = Stage::ALL.iter().map(|s| s.number()).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert!(Stage::Opinions < Stage::Review);
        assert!(Stage::Review < Stage::Synthesis);
    }

    #[test]
    fn test_next_chain_ends_at_synthesis() {
        assert_eq!(Stage::Opinions.next(), Some(Stage::Review));
        assert_eq!(Stage::Review.next(), Some(Stage::Synthesis));
        assert_eq!(Stage::Synthesis.next(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Stage::Review.to_string(), "Stage 2: Peer Review");
    }
}
