//! Deliberation state - the per-query accumulator of stage results.

use super::records::{OpinionRecord, ReviewRecord, StageRecord, SynthesisRecord};
use super::stage::Stage;
use crate::core::error::DomainError;
use crate::core::query::Query;
use serde::Serialize;

/// Results of stages 1-3 for the current query (Entity)
///
/// Created empty when a query is submitted, committed to once per
/// successful stage in stage order, and replaced wholesale by the next
/// submission. Nothing here outlives the session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeliberationState {
    query: Option<Query>,
    stage1: Vec<OpinionRecord>,
    stage2: Vec<ReviewRecord>,
    stage3: Option<SynthesisRecord>,
    #[serde(skip)]
    last_committed: Option<Stage>,
}

/// Aggregate figures over every committed record
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DeliberationTotals {
    pub records: usize,
    pub tokens: u64,
    pub latency: f64,
    pub failed_members: usize,
}

impl DeliberationState {
    /// Fresh, empty state for a newly submitted query
    pub fn for_query(query: Query) -> Self {
        Self {
            query: Some(query),
            ..Default::default()
        }
    }

    pub fn query(&self) -> Option<&Query> {
        self.query.as_ref()
    }

    pub fn stage1(&self) -> &[OpinionRecord] {
        &self.stage1
    }

    pub fn stage2(&self) -> &[ReviewRecord] {
        &self.stage2
    }

    pub fn stage3(&self) -> Option<&SynthesisRecord> {
        self.stage3.as_ref()
    }

    /// The most recent stage whose results were committed
    pub fn last_committed(&self) -> Option<Stage> {
        self.last_committed
    }

    pub fn is_committed(&self, stage: Stage) -> bool {
        self.last_committed.is_some_and(|last| last >= stage)
    }

    /// True before stage 1 has been committed
    pub fn is_empty(&self) -> bool {
        self.last_committed.is_none()
    }

    /// Store stage 1 results. Only valid on a fresh state.
    pub fn commit_opinions(&mut self, opinions: Vec<OpinionRecord>) -> Result<(), DomainError> {
        self.expect_next(Stage::Opinions)?;
        self.stage1 = opinions;
        self.last_committed = Some(Stage::Opinions);
        Ok(())
    }

    /// Store stage 2 results. Only valid right after stage 1.
    pub fn commit_reviews(&mut self, reviews: Vec<ReviewRecord>) -> Result<(), DomainError> {
        self.expect_next(Stage::Review)?;
        self.stage2 = reviews;
        self.last_committed = Some(Stage::Review);
        Ok(())
    }

    /// Store the stage 3 synthesis. Only valid right after stage 2.
    pub fn commit_synthesis(&mut self, synthesis: SynthesisRecord) -> Result<(), DomainError> {
        self.expect_next(Stage::Synthesis)?;
        self.stage3 = Some(synthesis);
        self.last_committed = Some(Stage::Synthesis);
        Ok(())
    }

    fn expect_next(&self, stage: Stage) -> Result<(), DomainError> {
        let expected = match self.last_committed {
            None => Some(Stage::Opinions),
            Some(last) => last.next(),
        };
        if expected == Some(stage) {
            return Ok(());
        }
        let reason = match self.last_committed {
            None => "no stage has been committed yet".to_string(),
            Some(last) => format!("last committed stage is {}", last.number()),
        };
        Err(DomainError::StageOutOfOrder {
            stage: stage.number(),
            reason,
        })
    }

    /// Every committed record in stage order, stage 1 first
    pub fn records(&self) -> impl Iterator<Item = StageRecord> + '_ {
        self.stage1
            .iter()
            .cloned()
            .map(StageRecord::from)
            .chain(self.stage2.iter().cloned().map(StageRecord::from))
            .chain(self.stage3.iter().cloned().map(StageRecord::from))
    }

    pub fn totals(&self) -> DeliberationTotals {
        self.records().fold(DeliberationTotals::default(), |mut acc, r| {
            let meta = r.meta();
            acc.records += 1;
            acc.tokens += meta.tokens;
            acc.latency += meta.latency;
            if !meta.success {
                acc.failed_members += 1;
            }
            acc
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::participant::ParticipantId;
    use crate::deliberation::records::RecordMeta;

    fn pid(s: &str) -> ParticipantId {
        ParticipantId::new(s).unwrap()
    }

    fn fresh() -> DeliberationState {
        DeliberationState::for_query(Query::parse("What is 2+2?").unwrap())
    }

    #[test]
    fn test_fresh_state_is_empty() {
        let state = fresh();
        assert!(state.is_empty());
        assert!(state.stage1().is_empty());
        assert!(state.stage2().is_empty());
        assert!(state.stage3().is_none());
        assert_eq!(state.query().unwrap().content(), "What is 2+2?");
    }

    #[test]
    fn test_commits_in_order() {
        let mut state = fresh();
        state
            .commit_opinions(vec![OpinionRecord::new(pid("Alpha"), "4")])
            .unwrap();
        assert!(state.is_committed(Stage::Opinions));
        assert!(!state.is_committed(Stage::Review));

        state
            .commit_reviews(vec![ReviewRecord::new(pid("Beta"), "Correct")])
            .unwrap();
        state
            .commit_synthesis(SynthesisRecord::new(pid("Chair"), "The answer is 4."))
            .unwrap();

        assert_eq!(state.last_committed(), Some(Stage::Synthesis));
        assert_eq!(state.records().count(), 3);
    }

    #[test]
    fn test_empty_stage1_still_counts_as_committed() {
        let mut state = fresh();
        state.commit_opinions(vec![]).unwrap();
        assert!(!state.is_empty());
        assert!(state.commit_reviews(vec![]).is_ok());
    }

    #[test]
    fn test_out_of_order_commit_rejected() {
        let mut state = fresh();
        let err = state.commit_reviews(vec![]).unwrap_err();
        assert!(matches!(err, DomainError::StageOutOfOrder { stage: 2, .. }));

        state.commit_opinions(vec![]).unwrap();
        assert!(state.commit_opinions(vec![]).is_err());
        assert!(
            state
                .commit_synthesis(SynthesisRecord::new(pid("Chair"), "x"))
                .is_err()
        );
    }

    #[test]
    fn test_totals() {
        let mut state = fresh();
        state
            .commit_opinions(vec![
                OpinionRecord::new(pid("Alpha"), "4")
                    .with_meta(RecordMeta::default().with_tokens(3).with_latency(0.5)),
                OpinionRecord::new(pid("Gamma"), "Technical Error: timeout")
                    .with_meta(RecordMeta::default().failed()),
            ])
            .unwrap();
        state
            .commit_reviews(vec![
                ReviewRecord::new(pid("Beta"), "Correct")
                    .with_meta(RecordMeta::default().with_tokens(2).with_latency(0.25)),
            ])
            .unwrap();

        let totals = state.totals();
        assert_eq!(totals.records, 3);
        assert_eq!(totals.tokens, 5);
        assert!((totals.latency - 0.75).abs() < f64::EPSILON);
        assert_eq!(totals.failed_members, 1);
    }
}
