//! Note domain model.
//!
//! # Responsibility
//! - Define the records persisted by the note store: category/group notes,
//!   general month notes and archived snapshots.
//! - Define the derived effective-note view produced by resolution.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - At most one `Note` exists per `(kind, id, month)`; at most one
//!   `GeneralMonthNote` per month.
//! - Entity identity is `(kind, id)` only; `name`/`group_name` are
//!   denormalized display fields that may drift without affecting resolution.

use crate::model::month::MonthKey;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for every persisted note record.
pub type NoteId = Uuid;

/// What a note is attached to: a single budget category or a category group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    /// One budget category.
    Category,
    /// A category group.
    Group,
}

/// Reference to the budget entity a note decorates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    /// Category vs. group discriminator; part of entity identity.
    pub kind: CategoryKind,
    /// Upstream entity id; part of entity identity.
    pub id: String,
    /// Display name at save time. May drift from upstream.
    pub name: String,
    /// Owning group id when `kind == Category`. Display-only.
    pub group_id: Option<String>,
    /// Owning group name when `kind == Category`. Display-only.
    pub group_name: Option<String>,
}

impl CategoryRef {
    /// Builds a reference to a standalone category group.
    pub fn group(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: CategoryKind::Group,
            id: id.into(),
            name: name.into(),
            group_id: None,
            group_name: None,
        }
    }

    /// Builds a reference to a category inside a group.
    pub fn category(
        id: impl Into<String>,
        name: impl Into<String>,
        group_id: impl Into<String>,
        group_name: impl Into<String>,
    ) -> Self {
        Self {
            kind: CategoryKind::Category,
            id: id.into(),
            name: name.into(),
            group_id: Some(group_id.into()),
            group_name: Some(group_name.into()),
        }
    }

    /// Projects the identity part of this reference.
    pub fn entity_key(&self) -> EntityKey {
        EntityKey {
            kind: self.kind,
            id: self.id.clone(),
        }
    }

    /// Two references denote the same entity iff `kind` and `id` match.
    pub fn same_entity(&self, other: &CategoryRef) -> bool {
        self.kind == other.kind && self.id == other.id
    }
}

/// Identity key of the entity a note chain belongs to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityKey {
    pub kind: CategoryKind,
    pub id: String,
}

/// Markdown note attached to a category or group for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Stable id, used as the checkbox-state key while this note is a source.
    pub id: NoteId,
    /// Entity the note decorates.
    pub category_ref: CategoryRef,
    /// Month the note was explicitly saved for.
    pub month: MonthKey,
    /// Raw markdown. Opaque to the engine except for checkbox tokens.
    pub content: String,
    /// Creation timestamp in epoch milliseconds.
    pub created_at: i64,
    /// Last update timestamp in epoch milliseconds.
    pub updated_at: i64,
}

/// Month-as-a-whole note with no category reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralMonthNote {
    pub id: NoteId,
    pub month: MonthKey,
    pub content: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Snapshot of a note whose category/group was deleted upstream.
///
/// Archived notes are excluded from resolution and exist only for
/// historical display and export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivedNote {
    pub note: Note,
    /// Archival timestamp in epoch milliseconds.
    pub archived_at: i64,
    /// Category/group name captured at archival time.
    pub original_category_name: String,
    /// Owning group name captured at archival time, for category notes.
    pub original_group_name: Option<String>,
}

/// Derived, non-persisted resolution result for one viewed month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveNote<T> {
    /// The applicable note, or `None` when nothing resolves.
    pub note: Option<T>,
    /// Month whose explicit note is being displayed.
    pub source_month: Option<MonthKey>,
    /// True iff `source_month` differs from the requested month.
    pub is_inherited: bool,
}

impl<T> EffectiveNote<T> {
    /// The empty resolution: no note applies at or before the target month.
    pub fn none() -> Self {
        Self {
            note: None,
            source_month: None,
            is_inherited: false,
        }
    }
}

/// One entry in an entity's revision timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteVersion {
    pub month: MonthKey,
    pub content: String,
    /// Markdown-stripped summary for list display.
    pub content_preview: Option<String>,
    pub created_at: i64,
}

/// Addressing key for sidecar checkbox state.
///
/// Category/group notes are keyed by the resolved source note's id, so every
/// month inheriting the same note shares one checklist. General notes have no
/// stable id surfaced to the UI, so they are keyed by source month instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateKey {
    Note(NoteId),
    General(MonthKey),
}

impl StateKey {
    /// Renders the stable text form used as the storage key.
    pub fn storage_key(&self) -> String {
        match self {
            Self::Note(id) => format!("note:{id}"),
            Self::General(month) => format!("general:{month}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CategoryRef, StateKey};
    use crate::model::month::MonthKey;
    use uuid::Uuid;

    #[test]
    fn same_entity_ignores_display_fields() {
        let a = CategoryRef::category("c1", "Groceries", "g1", "Food");
        let mut b = a.clone();
        b.name = "Renamed".to_string();
        b.group_name = Some("Renamed Group".to_string());
        assert!(a.same_entity(&b));
        assert_eq!(a.entity_key(), b.entity_key());
    }

    #[test]
    fn group_and_category_with_same_id_are_distinct_entities() {
        let group = CategoryRef::group("x", "Bills");
        let category = CategoryRef::category("x", "Bills", "g", "Fixed");
        assert!(!group.same_entity(&category));
    }

    #[test]
    fn state_keys_render_distinct_namespaces() {
        let id = Uuid::new_v4();
        let note_key = StateKey::Note(id).storage_key();
        let general_key = StateKey::General(MonthKey::parse("2025-03").unwrap()).storage_key();
        assert_eq!(note_key, format!("note:{id}"));
        assert_eq!(general_key, "general:2025-03");
    }
}
