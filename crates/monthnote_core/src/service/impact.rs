//! Inheritance-break impact analysis.
//!
//! # Responsibility
//! - Before a save, report which later months currently inherit from the
//!   note being changed and how much checked state they would lose.
//!
//! # Invariants
//! - Analysis is purely advisory: it never mutates anything. The actual
//!   reset happens implicitly through checkbox-state keying once a new
//!   override exists.
//! - Affected months stop at the next explicit override; months at or after
//!   it resolve elsewhere and are unaffected.

use crate::model::month::MonthKey;
use crate::model::note::{EntityKey, StateKey};
use crate::repo::checkbox_repo::CheckboxStateRepository;
use crate::repo::note_repo::{NoteRepository, RepoResult};
use crate::service::resolver::{next_override, resolve_source, MonthStamped};
use std::collections::BTreeMap;

/// Advisory result of an inheritance-break analysis.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InheritanceImpact {
    /// Months strictly after the edit month that currently resolve to the
    /// note being changed, ascending.
    pub affected_months: Vec<MonthKey>,
    /// Checked-entry counts per affected month; months with zero checked
    /// entries are omitted.
    pub checked_by_month: BTreeMap<MonthKey, usize>,
}

impl InheritanceImpact {
    /// The empty impact: nothing inherits from the edited note.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Total checked entries that would become unreachable.
    pub fn total_checked(&self) -> usize {
        self.checked_by_month.values().sum()
    }

    /// Whether the UI should warn at all. Zero checked entries means no
    /// impact to report, even when months are affected.
    pub fn has_impact(&self) -> bool {
        self.total_checked() > 0
    }
}

/// Read-only analyzer over note and checkbox storage.
pub struct ImpactAnalyzer<'a, N, C> {
    notes: &'a N,
    checkboxes: &'a C,
}

impl<'a, N: NoteRepository, C: CheckboxStateRepository> ImpactAnalyzer<'a, N, C> {
    pub fn new(notes: &'a N, checkboxes: &'a C) -> Self {
        Self { notes, checkboxes }
    }

    /// Analyzes a prospective edit at `edit_month` for a category/group
    /// entity.
    ///
    /// Covers both break shapes: a new override at a month that currently
    /// inherits, and an in-place edit of a note that is itself a source for
    /// later months. In both cases the affected months are those strictly
    /// after `edit_month` that resolve to the note `edit_month` resolves to.
    ///
    /// The month domain is open-ended, so enumeration is clamped to
    /// `horizon` (the last month the caller displays) when no later
    /// override bounds it first.
    pub fn analyze_break(
        &self,
        entity: &EntityKey,
        edit_month: &MonthKey,
        horizon: &MonthKey,
    ) -> RepoResult<InheritanceImpact> {
        let notes = self.notes.list_notes(entity)?;
        let source = match resolve_source(&notes, edit_month) {
            Some(source) => source,
            None => return Ok(InheritanceImpact::empty()),
        };

        let state_key = StateKey::Note(source.id);
        self.analyze(&notes, edit_month, horizon, &state_key)
    }

    /// Analyzes a prospective edit of the general note at `edit_month`.
    pub fn analyze_general_break(
        &self,
        edit_month: &MonthKey,
        horizon: &MonthKey,
    ) -> RepoResult<InheritanceImpact> {
        let notes = self.notes.list_general_notes()?;
        let source = match resolve_source(&notes, edit_month) {
            Some(source) => source,
            None => return Ok(InheritanceImpact::empty()),
        };

        let state_key = StateKey::General(source.month.clone());
        self.analyze(&notes, edit_month, horizon, &state_key)
    }

    fn analyze<T: MonthStamped>(
        &self,
        notes: &[T],
        edit_month: &MonthKey,
        horizon: &MonthKey,
        state_key: &StateKey,
    ) -> RepoResult<InheritanceImpact> {
        // The next override month itself resolves elsewhere; stop just
        // short of it even when the horizon reaches further.
        let bound = next_override(notes, edit_month).map(|note| note.month().clone());

        let affected_months: Vec<MonthKey> = match edit_month.next() {
            Some(first) => first
                .through(horizon)
                .into_iter()
                .take_while(|month| bound.as_ref().map_or(true, |b| month < b))
                .collect(),
            None => Vec::new(),
        };
        if affected_months.is_empty() {
            return Ok(InheritanceImpact::empty());
        }

        let checked = self
            .checkboxes
            .get(state_key)?
            .iter()
            .filter(|state| **state)
            .count();

        // Every affected month shares the source note's checklist, so the
        // per-month count is uniform.
        let checked_by_month = if checked > 0 {
            affected_months
                .iter()
                .map(|month| (month.clone(), checked))
                .collect()
        } else {
            BTreeMap::new()
        };

        Ok(InheritanceImpact {
            affected_months,
            checked_by_month,
        })
    }
}
