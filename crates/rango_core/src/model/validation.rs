//! Input normalization and validation shared by model constructors.
//!
//! # Invariants
//! - Names are trimmed and inner whitespace runs collapse to one space.
//! - Event dates use the `YYYY-MM-DD` form produced by date pickers.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));
static EVENT_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$").expect("valid date regex")
});

/// Upper bound for a single item's quantity.
///
/// The draw engine materializes one unit per quantity, so this also bounds the
/// memory a draw can use.
pub const MAX_ITEM_QUANTITY: u32 = 1_000;

/// Validation failures for user-provided model input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Event title is blank after normalization.
    EmptyTitle,
    /// Item or family name is blank after normalization.
    EmptyName,
    /// Item quantity must be at least one.
    ZeroQuantity,
    /// Item quantity is above [`MAX_ITEM_QUANTITY`].
    QuantityTooLarge(u32),
    /// Event date is not a `YYYY-MM-DD` calendar date.
    InvalidDate(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "event title cannot be empty"),
            Self::EmptyName => write!(f, "name cannot be empty"),
            Self::ZeroQuantity => write!(f, "quantity must be at least 1"),
            Self::QuantityTooLarge(value) => write!(
                f,
                "quantity {value} exceeds the maximum of {MAX_ITEM_QUANTITY}"
            ),
            Self::InvalidDate(value) => {
                write!(f, "invalid event date `{value}`; expected YYYY-MM-DD")
            }
        }
    }
}

impl Error for ValidationError {}

/// Trims and collapses whitespace. Returns `None` when nothing is left.
pub fn normalize_name(value: &str) -> Option<String> {
    let collapsed = WHITESPACE_RE.replace_all(value.trim(), " ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed.into_owned())
    }
}

/// Normalizes an optional contact string; blank input becomes `None`.
pub fn normalize_contact(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_string)
}

/// Validates and returns the trimmed event date.
pub fn normalize_event_date(value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if EVENT_DATE_RE.is_match(trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err(ValidationError::InvalidDate(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_contact, normalize_event_date, normalize_name, ValidationError};

    #[test]
    fn normalize_name_collapses_whitespace() {
        assert_eq!(
            normalize_name("  Família \t Silva \n").as_deref(),
            Some("Família Silva")
        );
        assert_eq!(normalize_name(" \t\n "), None);
    }

    #[test]
    fn normalize_contact_drops_blank_values() {
        assert_eq!(normalize_contact(Some("   ")), None);
        assert_eq!(normalize_contact(None), None);
        assert_eq!(
            normalize_contact(Some(" 555-0101 ")).as_deref(),
            Some("555-0101")
        );
    }

    #[test]
    fn normalize_event_date_accepts_picker_format() {
        assert_eq!(normalize_event_date(" 2026-12-24 ").unwrap(), "2026-12-24");
    }

    #[test]
    fn normalize_event_date_rejects_malformed_values() {
        for bad in ["", "24/12/2026", "2026-13-01", "2026-12-32", "2026-1-05"] {
            let err = normalize_event_date(bad).unwrap_err();
            assert_eq!(err, ValidationError::InvalidDate(bad.to_string()));
        }
    }
}
