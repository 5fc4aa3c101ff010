//! Core business logic - framework-agnostic operations on consumables, food entries,
//! goals, and the leaderboard. Nothing in here knows about HTTP.

/// Consumable (reusable food definition) operations
pub mod consumable;
/// Food entry logging, listing, and deletion
pub mod food_entry;
/// Daily goal lookup, carry-forward, and upsert
pub mod goal;
/// Completion percentages and household ranking
pub mod leaderboard;
/// Macro arithmetic and aggregation of food entries
pub mod nutrition;
/// Per-user daily progress against the effective goal
pub mod summary;
/// Users, houses, and seeding
pub mod user;

use crate::errors::{Error, Result};
use serde::Deserialize;

/// A number that may arrive as a JSON number or as text, as HTML form fields do.
///
/// Text must be a whole number after trimming, optionally followed by one of the units
/// in [`UNIT_SUFFIXES`]: `"1e3"` reads as 1000, `"12.5 g"` as 12.5, and `"12abc"` or
/// `"1.2.3"` as nothing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LenientNumber {
    /// A JSON number
    Number(f64),
    /// A string holding a number
    Text(String),
}

/// Units accepted after a number in text form. Longest first.
pub const UNIT_SUFFIXES: [&str; 3] = ["kcal", "cal", "g"];

impl LenientNumber {
    /// The numeric value, or None if the text is not a number.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(text) => {
                let text = text.trim();
                let lower = text.to_ascii_lowercase();
                let number = UNIT_SUFFIXES
                    .iter()
                    .find_map(|unit| lower.strip_suffix(unit))
                    .map_or(text, |rest| &text[..rest.len()])
                    .trim_end();
                number.parse().ok()
            }
        }
    }
}

/// Returns the trimmed `value`, rejecting empty or whitespace-only input.
pub(crate) fn require_name(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(field, "cannot be empty"));
    }
    Ok(trimmed.to_string())
}

/// Rejects NaN, infinities, and negative numbers.
pub(crate) fn require_non_negative(field: &str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(Error::validation(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(Error::validation(field, "cannot be negative"));
    }
    Ok(value)
}

/// Rejects NaN, infinities, zero, and negative numbers.
pub(crate) fn require_positive(field: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::validation(field, "must be a positive number"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_number() {
        assert_eq!(LenientNumber::Number(12.5).value(), Some(12.5));
        assert_eq!(LenientNumber::Text(" 42 ".to_string()).value(), Some(42.0));
        assert_eq!(LenientNumber::Text("12.5g".to_string()).value(), Some(12.5));
        assert_eq!(LenientNumber::Text("270 kcal".to_string()).value(), Some(270.0));
        assert_eq!(LenientNumber::Text("90 Cal".to_string()).value(), Some(90.0));
        assert_eq!(LenientNumber::Text("-3".to_string()).value(), Some(-3.0));
        assert_eq!(LenientNumber::Text("1e3".to_string()).value(), Some(1000.0));
        assert_eq!(LenientNumber::Text("2.5E-1".to_string()).value(), Some(0.25));
    }

    #[test]
    fn test_lenient_number_rejects_partial_numbers() {
        assert_eq!(LenientNumber::Text("abc".to_string()).value(), None);
        assert_eq!(LenientNumber::Text(String::new()).value(), None);
        assert_eq!(LenientNumber::Text("g".to_string()).value(), None);
        assert_eq!(LenientNumber::Text("1-2".to_string()).value(), None);
        assert_eq!(LenientNumber::Text("1.2.3".to_string()).value(), None);
        assert_eq!(LenientNumber::Text("12abc".to_string()).value(), None);
    }

    #[test]
    fn test_lenient_number_from_json() {
        let number: LenientNumber = serde_json::from_str("7").unwrap_or(LenientNumber::Number(0.0));
        assert_eq!(number.value(), Some(7.0));
        let text: LenientNumber =
            serde_json::from_str("\"7.5\"").unwrap_or(LenientNumber::Number(0.0));
        assert_eq!(text.value(), Some(7.5));
    }

    #[test]
    fn test_require_name_trims() {
        assert!(matches!(require_name("name", "  Oats "), Ok(name) if name == "Oats"));
        assert!(matches!(
            require_name("name", "   "),
            Err(Error::Validation { field, .. }) if field == "name"
        ));
    }

    #[test]
    fn test_require_non_negative() {
        assert!(require_non_negative("fat", 0.0).is_ok());
        assert!(require_non_negative("fat", -1.0).is_err());
        assert!(require_non_negative("fat", f64::NAN).is_err());
        assert!(require_non_negative("fat", f64::INFINITY).is_err());
    }

    #[test]
    fn test_require_positive() {
        assert!(require_positive("serving_size", 30.0).is_ok());
        assert!(require_positive("serving_size", 0.0).is_err());
        assert!(require_positive("serving_size", f64::NAN).is_err());
    }
}
