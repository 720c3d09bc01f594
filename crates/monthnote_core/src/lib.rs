//! Core domain logic for the monthly notes inheritance engine.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod markdown;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use markdown::{count_checkboxes, derive_preview, scan_checkbox_states};
pub use model::month::{InvalidMonthKey, MonthKey};
pub use model::note::{
    ArchivedNote, CategoryKind, CategoryRef, EffectiveNote, EntityKey, GeneralMonthNote, Note,
    NoteId, NoteVersion, StateKey,
};
pub use repo::checkbox_repo::{CheckboxStateRepository, SqliteCheckboxStateRepository};
pub use repo::note_repo::{NoteRepository, RepoError, RepoResult, SqliteNoteRepository};
pub use service::editor::{EditorArbitrator, SaveFn};
pub use service::history::RevisionHistoryProvider;
pub use service::impact::{ImpactAnalyzer, InheritanceImpact};
pub use service::note_service::{NoteService, SaveOutcome};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
