//! Core domain concepts shared across all subdomains.
//!
//! - [`query::Query`] - a validated question to pose to the council
//! - [`participant::ParticipantId`] - identity of an author, reviewer or chairman
//! - [`error::DomainError`] - domain-level errors

pub mod error;
pub mod participant;
pub mod query;
pub mod string;
