//! Stage records - the typed outputs of each deliberation stage.
//!
//! - [`OpinionRecord`] - one council member's answer (stage 1)
//! - [`ReviewRecord`] - one member's critique of the answers (stage 2)
//! - [`SynthesisRecord`] - the chairman's final answer (stage 3)
//! - [`StageRecord`] - tagged union over the three, used wherever records
//!   from different stages are mixed (grouping, tabbed rendering)

use super::stage::Stage;
use crate::core::participant::ParticipantId;
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// Attributes every record carries regardless of stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMeta {
    /// Display tag assigned by the server (e.g. `"#ff6b6b"`); opaque here
    #[serde(default)]
    pub color: String,
    /// Wall-clock seconds the backing model took to answer
    #[serde(default)]
    pub latency: f64,
    /// Estimated tokens in the generated text
    #[serde(default)]
    pub tokens: u64,
    /// Local time the record was produced on the server
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub timestamp: Option<NaiveDateTime>,
    /// Backing model name, when the server reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// `false` when the member's model call failed and `content` holds the error text
    #[serde(default = "default_success")]
    pub success: bool,
}

fn default_success() -> bool {
    true
}

impl Default for RecordMeta {
    fn default() -> Self {
        Self {
            color: String::new(),
            latency: 0.0,
            tokens: 0,
            timestamp: None,
            model: None,
            success: true,
        }
    }
}

impl RecordMeta {
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_latency(mut self, latency: f64) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_tokens(mut self, tokens: u64) -> Self {
        self.tokens = tokens;
        self
    }

    pub fn with_timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn failed(mut self) -> Self {
        self.success = false;
        self
    }
}

/// Accepts naive ISO-8601 (`2024-05-01T12:00:00.123456`) as well as
/// offset-qualified RFC 3339 timestamps; anything else becomes `None`.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| parse_timestamp(&s)))
}

/// Parse a server timestamp, tolerating an optional UTC offset.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<NaiveDateTime>()
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_local()))
}

/// Stage 1 output: one participant's independent answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpinionRecord {
    pub author: ParticipantId,
    pub content: String,
    #[serde(flatten)]
    pub meta: RecordMeta,
}

impl OpinionRecord {
    pub fn new(author: ParticipantId, content: impl Into<String>) -> Self {
        Self {
            author,
            content: content.into(),
            meta: RecordMeta::default(),
        }
    }

    pub fn with_meta(mut self, meta: RecordMeta) -> Self {
        self.meta = meta;
        self
    }
}

/// Stage 2 output: one participant's review of the stage 1 answers
///
/// The reviewer need not be one of the opinion authors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub reviewer: ParticipantId,
    pub review: String,
    #[serde(flatten)]
    pub meta: RecordMeta,
}

impl ReviewRecord {
    pub fn new(reviewer: ParticipantId, review: impl Into<String>) -> Self {
        Self {
            reviewer,
            review: review.into(),
            meta: RecordMeta::default(),
        }
    }

    pub fn with_meta(mut self, meta: RecordMeta) -> Self {
        self.meta = meta;
        self
    }
}

/// Stage 3 output: the chairman's synthesized answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisRecord {
    pub chairman: ParticipantId,
    pub final_answer: String,
    #[serde(flatten)]
    pub meta: RecordMeta,
}

impl SynthesisRecord {
    pub fn new(chairman: ParticipantId, final_answer: impl Into<String>) -> Self {
        Self {
            chairman,
            final_answer: final_answer.into(),
            meta: RecordMeta::default(),
        }
    }

    pub fn with_meta(mut self, meta: RecordMeta) -> Self {
        self.meta = meta;
        self
    }
}

/// A record from any stage, with an explicit discriminant
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StageRecord {
    Opinion(OpinionRecord),
    Review(ReviewRecord),
    Synthesis(SynthesisRecord),
}

impl StageRecord {
    /// The participant this record is attributed to
    pub fn participant(&self) -> &ParticipantId {
        match self {
            StageRecord::Opinion(r) => &r.author,
            StageRecord::Review(r) => &r.reviewer,
            StageRecord::Synthesis(r) => &r.chairman,
        }
    }

    /// The record's main text
    pub fn body(&self) -> &str {
        match self {
            StageRecord::Opinion(r) => &r.content,
            StageRecord::Review(r) => &r.review,
            StageRecord::Synthesis(r) => &r.final_answer,
        }
    }

    pub fn meta(&self) -> &RecordMeta {
        match self {
            StageRecord::Opinion(r) => &r.meta,
            StageRecord::Review(r) => &r.meta,
            StageRecord::Synthesis(r) => &r.meta,
        }
    }

    /// The stage that produced this record
    pub fn stage(&self) -> Stage {
        match self {
            StageRecord::Opinion(_) => Stage::Opinions,
            StageRecord::Review(_) => Stage::Review,
            StageRecord::Synthesis(_) => Stage::Synthesis,
        }
    }
}

impl From<OpinionRecord> for StageRecord {
    fn from(r: OpinionRecord) -> Self {
        StageRecord::Opinion(r)
    }
}

impl From<ReviewRecord> for StageRecord {
    fn from(r: ReviewRecord) -> Self {
        StageRecord::Review(r)
    }
}

impl From<SynthesisRecord> for StageRecord {
    fn from(r: SynthesisRecord) -> Self {
        StageRecord::Synthesis(r)
    }
}
