//! Declarative form state and validation for sprint-tracking entities.
//!
//! A [`form::Form`] owns a record of field values, runs per-field validation
//! on every change, converts between input strings and typed values, and
//! reports submission as a tagged [`form::SubmitOutcome`]. The
//! [`entities`] module declares the project, membership, sprint, and log
//! forms on top of it.

pub mod app;
pub mod entities;
pub mod error;
pub mod form;
pub mod logger;
pub mod session;
