//! Deliberation domain
//!
//! The three-stage council workflow: stage identities, the records each
//! stage produces, the per-query accumulator and the per-participant
//! re-grouping used by the tabbed view.

pub mod grouping;
pub mod records;
pub mod stage;
pub mod state;
