//! Domain model for the monthly notes engine.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep one record shape per persisted concern plus the derived view
//!   produced by resolution.
//!
//! # Invariants
//! - Every persisted note is identified by a stable `NoteId`.
//! - Month keys are validated `YYYY-MM` strings ordered lexically.

pub mod month;
pub mod note;
