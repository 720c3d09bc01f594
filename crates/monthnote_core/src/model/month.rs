//! Month key domain type.
//!
//! # Responsibility
//! - Define the canonical `YYYY-MM` month key used by every note record.
//! - Provide month arithmetic for impact-range enumeration.
//!
//! # Invariants
//! - The string form is always zero-padded, so lexical ordering equals
//!   chronological ordering.
//! - Month component stays within `01..=12`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Validated `YYYY-MM` month key.
///
/// Ordering is derived from the inner string; the zero-padding invariant
/// makes that equal to chronological ordering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey(String);

/// Error for malformed month key input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidMonthKey(pub String);

impl Display for InvalidMonthKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid month key `{}`; expected zero-padded YYYY-MM", self.0)
    }
}

impl Error for InvalidMonthKey {}

impl MonthKey {
    /// Parses a `YYYY-MM` string, rejecting anything that would break
    /// lexical ordering.
    pub fn parse(value: &str) -> Result<Self, InvalidMonthKey> {
        let bytes = value.as_bytes();
        if bytes.len() != 7 || bytes[4] != b'-' {
            return Err(InvalidMonthKey(value.to_string()));
        }
        if !bytes[..4].iter().all(u8::is_ascii_digit)
            || !bytes[5..].iter().all(u8::is_ascii_digit)
        {
            return Err(InvalidMonthKey(value.to_string()));
        }
        let month = (bytes[5] - b'0') * 10 + (bytes[6] - b'0');
        if month == 0 || month > 12 {
            return Err(InvalidMonthKey(value.to_string()));
        }
        Ok(Self(value.to_string()))
    }

    /// Builds a month key from numeric components.
    pub fn from_parts(year: u16, month: u8) -> Result<Self, InvalidMonthKey> {
        Self::parse(&format!("{year:04}-{month:02}"))
    }

    /// Returns the key's string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the year component.
    pub fn year(&self) -> u16 {
        self.0[..4].parse().unwrap_or(0)
    }

    /// Returns the month component (1..=12).
    pub fn month(&self) -> u8 {
        self.0[5..].parse().unwrap_or(0)
    }

    /// Returns the immediately following month, carrying into the next year.
    ///
    /// Returns `None` at `9999-12`: a five-digit year would break the
    /// zero-padded form and with it the lexical ordering invariant.
    pub fn next(&self) -> Option<Self> {
        let (year, month) = if self.month() == 12 {
            (self.year().checked_add(1)?, 1)
        } else {
            (self.year(), self.month() + 1)
        };
        if year > 9999 {
            return None;
        }
        Some(Self(format!("{year:04}-{month:02}")))
    }

    /// Enumerates months from `self` to `last` inclusive, in ascending order.
    ///
    /// Returns an empty vector when `last < self`. Enumeration stops at the
    /// end of the key space.
    pub fn through(&self, last: &MonthKey) -> Vec<MonthKey> {
        let mut months = Vec::new();
        let mut cursor = self.clone();
        while cursor <= *last {
            months.push(cursor.clone());
            match cursor.next() {
                Some(following) => cursor = following,
                None => break,
            }
        }
        months
    }
}

impl Display for MonthKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for MonthKey {
    type Err = InvalidMonthKey;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = InvalidMonthKey;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<MonthKey> for String {
    fn from(value: MonthKey) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::MonthKey;

    fn month(value: &str) -> MonthKey {
        MonthKey::parse(value).expect("valid month key")
    }

    #[test]
    fn parse_accepts_zero_padded_months() {
        assert_eq!(month("2025-01").as_str(), "2025-01");
        assert_eq!(month("2025-12").month(), 12);
    }

    #[test]
    fn parse_rejects_malformed_input() {
        for value in ["2025-1", "2025/01", "25-01", "2025-00", "2025-13", "2025-ab", ""] {
            assert!(MonthKey::parse(value).is_err(), "should reject `{value}`");
        }
    }

    #[test]
    fn lexical_order_matches_chronological_order() {
        assert!(month("2024-12") < month("2025-01"));
        assert!(month("2025-02") < month("2025-10"));
        assert!(month("2025-09") < month("2025-10"));
    }

    #[test]
    fn next_carries_across_year_boundary() {
        assert_eq!(month("2025-11").next(), Some(month("2025-12")));
        assert_eq!(month("2025-12").next(), Some(month("2026-01")));
    }

    #[test]
    fn next_stops_at_the_end_of_the_key_space() {
        assert_eq!(month("9999-11").next(), Some(month("9999-12")));
        assert_eq!(month("9999-12").next(), None);
    }

    #[test]
    fn through_enumerates_inclusive_ascending_range() {
        let months = month("2025-11").through(&month("2026-02"));
        let rendered: Vec<_> = months.iter().map(|m| m.as_str().to_string()).collect();
        assert_eq!(rendered, vec!["2025-11", "2025-12", "2026-01", "2026-02"]);
        assert!(month("2025-03").through(&month("2025-02")).is_empty());
    }

    #[test]
    fn through_terminates_at_the_end_of_the_key_space() {
        let months = month("9999-10").through(&month("9999-12"));
        let rendered: Vec<_> = months.iter().map(|m| m.as_str().to_string()).collect();
        assert_eq!(rendered, vec!["9999-10", "9999-11", "9999-12"]);
    }
}
