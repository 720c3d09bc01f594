//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for notes and checkbox
//!   state.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`InvalidData`) in addition to
//!   DB transport errors.
//! - All multi-statement writes run inside a single transaction.

pub mod checkbox_repo;
pub mod note_repo;
