//! Participant identity value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// Identity of a council participant: an opinion author, a reviewer or
/// the chairman (Value Object)
///
/// The identity is the display label the server assigns (e.g.
/// `"Agent_Llama3"`). It is compared verbatim; only emptiness is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Create a participant identity, rejecting blank names
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::EmptyParticipant);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Uppercased first character, used as the avatar glyph on cards
    pub fn initial(&self) -> char {
        self.0
            .chars()
            .next()
            .and_then(|c| c.to_uppercase().next())
            .unwrap_or('?')
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ParticipantId {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        ParticipantId::new(s)
    }
}

impl From<ParticipantId> for String {
    fn from(p: ParticipantId) -> Self {
        p.0
    }
}

impl AsRef<str> for ParticipantId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_rejected() {
        assert_eq!(ParticipantId::new(""), Err(DomainError::EmptyParticipant));
        assert_eq!(ParticipantId::new("  "), Err(DomainError::EmptyParticipant));
    }

    #[test]
    fn test_identity_kept_verbatim() {
        let p = ParticipantId::new("Agent_Qwen2.5:7b").unwrap();
        assert_eq!(p.as_str(), "Agent_Qwen2.5:7b");
        assert_eq!(p.to_string(), "Agent_Qwen2.5:7b");
    }

    #[test]
    fn test_initial() {
        assert_eq!(ParticipantId::new("alpha").unwrap().initial(), 'A');
        assert_eq!(ParticipantId::new("Chairman_Phi3").unwrap().initial(), 'C');
    }

    #[test]
    fn test_deserialize_rejects_empty() {
        assert!(serde_json::from_str::<ParticipantId>("\"\"").is_err());
        let p: ParticipantId = serde_json::from_str("\"Beta\"").unwrap();
        assert_eq!(p.as_str(), "Beta");
    }
}
