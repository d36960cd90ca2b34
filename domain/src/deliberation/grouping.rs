//! Participant grouping - re-keys the stage-ordered state by participant.
//!
//! Feeds the tabbed view: one tab per participant, holding everything that
//! participant contributed across the three stages.
//!
//! # Ordering
//!
//! Stage 1 records are visited first, then stage 2, each in stored order. A
//! participant's first appearance fixes its position; later contributions
//! are appended to the existing entry. The chairman is handled last, see
//! [`ChairmanPolicy`].

use super::records::StageRecord;
use super::state::DeliberationState;
use crate::core::error::DomainError;
use crate::core::participant::ParticipantId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// How the synthesis record joins the grouping when the chairman's
/// identity is already present
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChairmanPolicy {
    /// The chairman's entry becomes exactly `[synthesis]`; any stage 1/2
    /// contributions under the same identity are dropped from the grouping.
    /// The entry keeps the position of its first appearance.
    #[default]
    Replace,
    /// The synthesis is appended after the identity's other contributions.
    Append,
}

impl ChairmanPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChairmanPolicy::Replace => "replace",
            ChairmanPolicy::Append => "append",
        }
    }
}

impl std::str::FromStr for ChairmanPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "replace" => Ok(ChairmanPolicy::Replace),
            "append" | "merge" => Ok(ChairmanPolicy::Append),
            other => Err(DomainError::InvalidChairmanPolicy(other.to_string())),
        }
    }
}

/// Insertion-ordered mapping from participant to contributions
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ParticipantGroups {
    entries: IndexMap<ParticipantId, Vec<StageRecord>>,
}

impl ParticipantGroups {
    /// Build the grouping from the current state
    pub fn group(state: &DeliberationState, policy: ChairmanPolicy) -> Self {
        let mut entries: IndexMap<ParticipantId, Vec<StageRecord>> = IndexMap::new();

        for opinion in state.stage1() {
            entries
                .entry(opinion.author.clone())
                .or_default()
                .push(StageRecord::Opinion(opinion.clone()));
        }
        for review in state.stage2() {
            entries
                .entry(review.reviewer.clone())
                .or_default()
                .push(StageRecord::Review(review.clone()));
        }

        if let Some(synthesis) = state.stage3() {
            let record = StageRecord::Synthesis(synthesis.clone());
            match policy {
                // IndexMap::insert on an existing key keeps its slot.
                ChairmanPolicy::Replace => {
                    entries.insert(synthesis.chairman.clone(), vec![record]);
                }
                ChairmanPolicy::Append => {
                    entries
                        .entry(synthesis.chairman.clone())
                        .or_default()
                        .push(record);
                }
            }
        }

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Participants in tab order
    pub fn participants(&self) -> impl Iterator<Item = &ParticipantId> {
        self.entries.keys()
    }

    /// The participant whose tab is active by default
    pub fn first(&self) -> Option<&ParticipantId> {
        self.entries.keys().next()
    }

    pub fn get(&self, participant: &str) -> Option<&[StageRecord]> {
        self.entries
            .iter()
            .find(|(id, _)| id.as_str() == participant)
            .map(|(_, records)| records.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ParticipantId, &[StageRecord])> {
        self.entries.iter().map(|(id, records)| (id, records.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query::Query;
    use crate::deliberation::records::{OpinionRecord, ReviewRecord, SynthesisRecord};
    use crate::deliberation::stage::Stage;

    fn pid(s: &str) -> ParticipantId {
        ParticipantId::new(s).unwrap()
    }

    fn state(
        opinions: &[(&str, &str)],
        reviews: &[(&str, &str)],
        synthesis: Option<(&str, &str)>,
    ) -> DeliberationState {
        let mut state = DeliberationState::for_query(Query::parse("q").unwrap());
        state
            .commit_opinions(
                opinions
                    .iter()
                    .map(|(a, c)| OpinionRecord::new(pid(a), *c))
                    .collect(),
            )
            .unwrap();
        state
            .commit_reviews(
                reviews
                    .iter()
                    .map(|(r, c)| ReviewRecord::new(pid(r), *c))
                    .collect(),
            )
            .unwrap();
        if let Some((chair, answer)) = synthesis {
            state
                .commit_synthesis(SynthesisRecord::new(pid(chair), answer))
                .unwrap();
        }
        state
    }

    fn keys(groups: &ParticipantGroups) -> Vec<&str> {
        groups.participants().map(|p| p.as_str()).collect()
    }

    fn stages(groups: &ParticipantGroups, who: &str) -> Vec<Stage> {
        groups
            .get(who)
            .unwrap()
            .iter()
            .map(|r| r.stage())
            .collect()
    }

    #[test]
    fn test_first_appearance_fixes_order() {
        let s = state(&[("A", "a1"), ("B", "b1")], &[("B", "b2"), ("C", "c2")], None);
        let groups = ParticipantGroups::group(&s, ChairmanPolicy::Replace);

        assert_eq!(keys(&groups), vec!["A", "B", "C"]);
        assert_eq!(stages(&groups, "B"), vec![Stage::Opinions, Stage::Review]);
        assert_eq!(groups.first().unwrap().as_str(), "A");
    }

    #[test]
    fn test_chairman_with_fresh_identity_is_appended_last() {
        let s = state(&[("Alpha", "4")], &[("Beta", "Correct")], Some(("Chair", "4.")));
        let groups = ParticipantGroups::group(&s, ChairmanPolicy::Replace);
        assert_eq!(keys(&groups), vec!["Alpha", "Beta", "Chair"]);
        assert_eq!(stages(&groups, "Chair"), vec![Stage::Synthesis]);
    }

    #[test]
    fn test_chairman_collision_evicts_prior_contributions() {
        let s = state(&[("X", "a")], &[], Some(("X", "z")));
        let groups = ParticipantGroups::group(&s, ChairmanPolicy::Replace);

        let records = groups.get("X").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].body(), "z");
        assert_eq!(records[0].stage(), Stage::Synthesis);
    }

    #[test]
    fn test_chairman_collision_keeps_original_position() {
        let s = state(&[("X", "a"), ("Y", "b")], &[("Y", "r")], Some(("X", "z")));
        let groups = ParticipantGroups::group(&s, ChairmanPolicy::Replace);
        assert_eq!(keys(&groups), vec!["X", "Y"]);
    }

    #[test]
    fn test_append_policy_keeps_prior_contributions() {
        let s = state(&[("X", "a")], &[("X", "r")], Some(("X", "z")));
        let groups = ParticipantGroups::group(&s, ChairmanPolicy::Append);
        assert_eq!(
            stages(&groups, "X"),
            vec![Stage::Opinions, Stage::Review, Stage::Synthesis]
        );
    }

    #[test]
    fn test_empty_state_groups_to_nothing() {
        let groups = ParticipantGroups::group(&DeliberationState::default(), ChairmanPolicy::Replace);
        assert!(groups.is_empty());
        assert!(groups.first().is_none());
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("Replace".parse::<ChairmanPolicy>().unwrap(), ChairmanPolicy::Replace);
        assert_eq!("merge".parse::<ChairmanPolicy>().unwrap(), ChairmanPolicy::Append);
        assert!("evict".parse::<ChairmanPolicy>().is_err());
    }
}
