//! Error type for the opt-in fallible operations of the crate.
//!
//! Conversions and comparisons never fail; out-of-range input is reported
//! in-band (a zero serial day number, a `(0, 0, 0)` triple or a text-only
//! date). `DateError` covers decoding codes and names, persisted records,
//! and the explicit sanity check.

use crate::types::{CalendarKind, Modifier, SingleDate};

/// Error type for decoding and validating dates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    /// Numeric modifier code outside `0..=6`.
    #[error("Invalid modifier code: {0}")]
    InvalidModifierCode(u8),

    /// Numeric quality code outside `0..=2`.
    #[error("Invalid quality code: {0}")]
    InvalidQualityCode(u8),

    /// Numeric calendar code outside `0..=5`.
    #[error("Invalid calendar code: {0}")]
    InvalidCalendarCode(u8),

    /// Name that matches no modifier, quality or calendar.
    #[error("Unknown {kind} name: '{name}'")]
    UnknownName { kind: &'static str, name: String },

    /// Persisted value tuple whose length does not fit the modifier.
    #[error("Invalid value for {modifier} date: expected {expected} components, found {found}")]
    ValueShape {
        modifier: Modifier,
        expected: usize,
        found:    usize,
    },

    /// Stop endpoint edited on a date that has none.
    #[error("Operation allowed for compound dates only (modifier is {0})")]
    NotCompound(Modifier),

    /// Endpoint that does not survive a round trip through its calendar.
    #[error("Invalid {calendar} date value {value}")]
    InvalidValue {
        calendar: CalendarKind,
        value:    SingleDate,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DateError::InvalidCalendarCode(9);
        assert_eq!(err.to_string(), "Invalid calendar code: 9");

        let err = DateError::UnknownName {
            kind: "calendar",
            name: "mayan".to_owned(),
        };
        assert_eq!(err.to_string(), "Unknown calendar name: 'mayan'");

        let err = DateError::ValueShape {
            modifier: Modifier::Range,
            expected: 8,
            found:    4,
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for range date: expected 8 components, found 4"
        );

        let err = DateError::NotCompound(Modifier::Before);
        assert!(err.to_string().contains("compound dates only"));
    }

    #[test]
    fn test_error_is_std_error_and_send() {
        fn assert_impl<T: std::error::Error + Send + Sync>() {}
        assert_impl::<DateError>();
    }

    #[test]
    fn test_invalid_value_display() {
        let err = DateError::InvalidValue {
            calendar: CalendarKind::Hebrew,
            value:    SingleDate::new(5784, 2, 31),
        };
        assert_eq!(err.to_string(), "Invalid Hebrew date value 5784-02-31");
    }
}
