//! Note save/delete lifecycle and resolution entry points.
//!
//! # Responsibility
//! - Apply the save semantics: first non-empty save creates, later saves
//!   update in place, empty saves delete (or no-op when nothing exists).
//! - Expose effective-note resolution over repository state.
//! - Move an entity's notes to the archive when the entity is deleted
//!   upstream.
//!
//! # Invariants
//! - Whitespace-only content counts as empty.
//! - Saving never creates a second note for an existing `(entity, month)`
//!   key.

use crate::model::month::MonthKey;
use crate::model::note::{
    ArchivedNote, CategoryRef, EffectiveNote, EntityKey, GeneralMonthNote, Note,
};
use crate::repo::note_repo::{NoteRepository, RepoResult};
use crate::service::resolver::resolve_effective;
use log::debug;

/// What a save request ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome<T> {
    /// Content was persisted (created or updated in place).
    Saved(T),
    /// Empty content removed the existing note for this key.
    Deleted,
    /// Empty content and no existing note; nothing happened.
    Noop,
}

/// Use-case service over note storage.
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Saves a category/group note for one month.
    ///
    /// Empty or whitespace-only content deletes the existing note, or is a
    /// no-op when none exists.
    pub fn save_note(
        &self,
        category_ref: &CategoryRef,
        month: &MonthKey,
        content: &str,
    ) -> RepoResult<SaveOutcome<Note>> {
        if content.trim().is_empty() {
            let removed = self.repo.delete_note(&category_ref.entity_key(), month)?;
            debug!(
                "event=note_save module=service status=ok outcome={} month={}",
                if removed { "deleted" } else { "noop" },
                month
            );
            return Ok(if removed {
                SaveOutcome::Deleted
            } else {
                SaveOutcome::Noop
            });
        }

        let note = self.repo.upsert_note(category_ref, month, content)?;
        debug!(
            "event=note_save module=service status=ok outcome=saved month={}",
            month
        );
        Ok(SaveOutcome::Saved(note))
    }

    /// Saves the general month note, with the same empty-content semantics
    /// as [`NoteService::save_note`].
    pub fn save_general_note(
        &self,
        month: &MonthKey,
        content: &str,
    ) -> RepoResult<SaveOutcome<GeneralMonthNote>> {
        if content.trim().is_empty() {
            let removed = self.repo.delete_general_note(month)?;
            return Ok(if removed {
                SaveOutcome::Deleted
            } else {
                SaveOutcome::Noop
            });
        }

        Ok(SaveOutcome::Saved(
            self.repo.upsert_general_note(month, content)?,
        ))
    }

    /// Removes the month's override explicitly. Returns whether one existed.
    pub fn delete_note(&self, entity: &EntityKey, month: &MonthKey) -> RepoResult<bool> {
        self.repo.delete_note(entity, month)
    }

    /// Removes the month's general note explicitly.
    pub fn delete_general_note(&self, month: &MonthKey) -> RepoResult<bool> {
        self.repo.delete_general_note(month)
    }

    /// Gets the explicit note at exactly `(entity, month)`, ignoring
    /// inheritance.
    pub fn explicit_note(&self, entity: &EntityKey, month: &MonthKey) -> RepoResult<Option<Note>> {
        self.repo.get_note(entity, month)
    }

    /// Resolves the note `target` actually displays for `entity`.
    pub fn effective_note(
        &self,
        entity: &EntityKey,
        target: &MonthKey,
    ) -> RepoResult<EffectiveNote<Note>> {
        let notes = self.repo.list_notes(entity)?;
        Ok(resolve_effective(&notes, target))
    }

    /// Resolves the general note `target` actually displays.
    pub fn effective_general_note(
        &self,
        target: &MonthKey,
    ) -> RepoResult<EffectiveNote<GeneralMonthNote>> {
        let notes = self.repo.list_general_notes()?;
        Ok(resolve_effective(&notes, target))
    }

    /// Archives all of an entity's notes after its category/group was
    /// deleted upstream. Returns the archived count.
    pub fn archive_entity(
        &self,
        entity: &EntityKey,
        original_category_name: &str,
        original_group_name: Option<&str>,
    ) -> RepoResult<usize> {
        let moved =
            self.repo
                .archive_entity(entity, original_category_name, original_group_name)?;
        debug!(
            "event=entity_archive module=service status=ok kind={:?} moved={}",
            entity.kind, moved
        );
        Ok(moved)
    }

    /// Lists archived notes for historical display/export.
    pub fn list_archived(&self) -> RepoResult<Vec<ArchivedNote>> {
        self.repo.list_archived()
    }
}
