//! Effective note resolution.
//!
//! # Responsibility
//! - Implement the backward month walk that gives every month its effective
//!   note: the nearest explicit note at or before the target month.
//!
//! # Invariants
//! - Resolution is a pure function of the note set; no caching, no side
//!   effects.
//! - An explicit note at the target month always wins with
//!   `is_inherited = false`; inheritance never merges content.

use crate::model::month::MonthKey;
use crate::model::note::{EffectiveNote, GeneralMonthNote, Note};

/// Anything addressable by an explicit month, resolvable by the backward
/// walk.
pub trait MonthStamped {
    fn month(&self) -> &MonthKey;
}

impl MonthStamped for Note {
    fn month(&self) -> &MonthKey {
        &self.month
    }
}

impl MonthStamped for GeneralMonthNote {
    fn month(&self) -> &MonthKey {
        &self.month
    }
}

/// Returns the source note for `target`: the latest entry of
/// `notes_ascending` whose month is `<= target`.
///
/// `notes_ascending` must be sorted ascending by month, which is how the
/// repository lists them.
pub fn resolve_source<'a, T: MonthStamped>(
    notes_ascending: &'a [T],
    target: &MonthKey,
) -> Option<&'a T> {
    notes_ascending.iter().rev().find(|note| note.month() <= target)
}

/// Returns the first explicit note strictly after `month`, bounding the
/// stretch of months that inherit from the note at `month`.
pub fn next_override<'a, T: MonthStamped>(
    notes_ascending: &'a [T],
    month: &MonthKey,
) -> Option<&'a T> {
    notes_ascending.iter().find(|note| note.month() > month)
}

/// Builds the derived effective-note view for `target`.
pub fn resolve_effective<T: MonthStamped + Clone>(
    notes_ascending: &[T],
    target: &MonthKey,
) -> EffectiveNote<T> {
    match resolve_source(notes_ascending, target) {
        Some(source) => EffectiveNote {
            is_inherited: source.month() != target,
            source_month: Some(source.month().clone()),
            note: Some(source.clone()),
        },
        None => EffectiveNote::none(),
    }
}

#[cfg(test)]
mod tests {
    use super::{next_override, resolve_effective, resolve_source, MonthStamped};
    use crate::model::month::MonthKey;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Stamp(MonthKey);

    impl MonthStamped for Stamp {
        fn month(&self) -> &MonthKey {
            &self.0
        }
    }

    fn stamps(months: &[&str]) -> Vec<Stamp> {
        months
            .iter()
            .map(|m| Stamp(MonthKey::parse(m).expect("valid month")))
            .collect()
    }

    fn month(value: &str) -> MonthKey {
        MonthKey::parse(value).expect("valid month")
    }

    #[test]
    fn resolves_to_largest_month_at_or_before_target() {
        let notes = stamps(&["2024-11", "2025-01", "2025-06"]);
        assert_eq!(
            resolve_source(&notes, &month("2025-03")).map(|s| s.0.as_str()),
            Some("2025-01")
        );
        assert_eq!(
            resolve_source(&notes, &month("2025-06")).map(|s| s.0.as_str()),
            Some("2025-06")
        );
        assert_eq!(
            resolve_source(&notes, &month("2026-01")).map(|s| s.0.as_str()),
            Some("2025-06")
        );
    }

    #[test]
    fn months_before_first_note_resolve_to_none() {
        let notes = stamps(&["2025-01"]);
        assert!(resolve_source(&notes, &month("2024-12")).is_none());
        assert!(resolve_source::<Stamp>(&[], &month("2025-01")).is_none());
    }

    #[test]
    fn explicit_month_is_not_inherited() {
        let notes = stamps(&["2025-01", "2025-04"]);
        let exact = resolve_effective(&notes, &month("2025-04"));
        assert!(!exact.is_inherited);
        assert_eq!(exact.source_month, Some(month("2025-04")));

        let inherited = resolve_effective(&notes, &month("2025-03"));
        assert!(inherited.is_inherited);
        assert_eq!(inherited.source_month, Some(month("2025-01")));
    }

    #[test]
    fn empty_resolution_has_no_source_and_no_inheritance_flag() {
        let effective = resolve_effective::<Stamp>(&[], &month("2025-01"));
        assert!(effective.note.is_none());
        assert!(effective.source_month.is_none());
        assert!(!effective.is_inherited);
    }

    #[test]
    fn next_override_is_strictly_after() {
        let notes = stamps(&["2025-01", "2025-04"]);
        assert_eq!(
            next_override(&notes, &month("2025-01")).map(|s| s.0.as_str()),
            Some("2025-04")
        );
        assert!(next_override(&notes, &month("2025-04")).is_none());
    }
}
