//! Revision history assembly.
//!
//! # Responsibility
//! - Present an entity's full note timeline, ascending by month, for
//!   past/current/future display.
//!
//! # Invariants
//! - Read-only view over note storage; deleted notes are gone from storage
//!   and therefore never appear.
//! - No partitioning relative to a viewing month; consumers bucket the
//!   list themselves.

use crate::markdown::derive_preview;
use crate::model::note::{EntityKey, NoteVersion};
use crate::repo::note_repo::{NoteRepository, RepoResult};

/// Read-only provider over note storage.
pub struct RevisionHistoryProvider<'a, R: NoteRepository> {
    repo: &'a R,
}

impl<'a, R: NoteRepository> RevisionHistoryProvider<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    /// Returns every saved version for `entity`, ascending by month.
    pub fn history(&self, entity: &EntityKey) -> RepoResult<Vec<NoteVersion>> {
        let versions = self
            .repo
            .list_notes(entity)?
            .into_iter()
            .map(|note| NoteVersion {
                content_preview: derive_preview(&note.content),
                month: note.month,
                content: note.content,
                created_at: note.created_at,
            })
            .collect();
        Ok(versions)
    }

    /// Returns every saved general note version, ascending by month.
    pub fn general_history(&self) -> RepoResult<Vec<NoteVersion>> {
        let versions = self
            .repo
            .list_general_notes()?
            .into_iter()
            .map(|note| NoteVersion {
                content_preview: derive_preview(&note.content),
                month: note.month,
                content: note.content,
                created_at: note.created_at,
            })
            .collect();
        Ok(versions)
    }
}
