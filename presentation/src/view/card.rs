//! Card render instructions
//!
//! A [`Card`] is everything needed to draw one record, independent of the
//! output medium. The kind is taken from the [`StageRecord`] variant.

use chrono::NaiveDateTime;
use council_domain::{
    OpinionRecord, ParticipantId, RecordMeta, ReviewRecord, Stage, StageRecord, SynthesisRecord,
};
use serde::Serialize;

/// Which record shape a card presents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    Opinion,
    Review,
    Synthesis,
}

impl CardKind {
    pub fn stage(&self) -> Stage {
        match self {
            CardKind::Opinion => Stage::Opinions,
            CardKind::Review => Stage::Review,
            CardKind::Synthesis => Stage::Synthesis,
        }
    }
}

/// One rendered record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub kind: CardKind,
    /// Position within the list the card was rendered into
    pub index: usize,
    pub participant: String,
    /// Avatar letter
    pub initial: char,
    pub color: String,
    pub latency: f64,
    pub tokens: u64,
    /// `hh:mm:ss AM/PM`, empty when the record carries no timestamp
    pub time: String,
    pub body: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl Card {
    pub fn opinion(record: &OpinionRecord, index: usize) -> Self {
        Self::build(CardKind::Opinion, &record.author, &record.content, &record.meta, index)
    }

    pub fn review(record: &ReviewRecord, index: usize) -> Self {
        Self::build(CardKind::Review, &record.reviewer, &record.review, &record.meta, index)
    }

    pub fn synthesis(record: &SynthesisRecord) -> Self {
        Self::build(
            CardKind::Synthesis,
            &record.chairman,
            &record.final_answer,
            &record.meta,
            0,
        )
    }

    /// Card for a record of any stage, dispatched on the variant
    pub fn from_record(record: &StageRecord, index: usize) -> Self {
        match record {
            StageRecord::Opinion(r) => Self::opinion(r, index),
            StageRecord::Review(r) => Self::review(r, index),
            StageRecord::Synthesis(r) => Self::synthesis(r),
        }
    }

    fn build(
        kind: CardKind,
        participant: &ParticipantId,
        body: &str,
        meta: &RecordMeta,
        index: usize,
    ) -> Self {
        Self {
            kind,
            index,
            participant: participant.as_str().to_string(),
            initial: participant.initial(),
            color: meta.color.clone(),
            latency: meta.latency,
            tokens: meta.tokens,
            time: format_time(meta.timestamp),
            body: body.to_string(),
            success: meta.success,
            model: meta.model.clone(),
        }
    }
}

/// Format a record timestamp as a 12-hour clock time
pub fn format_time(timestamp: Option<NaiveDateTime>) -> String {
    timestamp
        .map(|t| t.format("%I:%M:%S %p").to_string())
        .unwrap_or_default()
}
