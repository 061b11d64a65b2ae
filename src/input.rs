//! Values handed over by an external date parser.
//!
//! A parser either decomposes its input into numeric fields
//! ([`DateInput::Parsed`]) or gives up and passes the raw text through
//! ([`DateInput::Unparsed`]). Both are consumed by
//! [`Date::set_input`](crate::Date::set_input); the second becomes a
//! text-only date instead of an error.

use crate::types::{CalendarKind, Modifier, Quality, SingleDate};
use serde::{Deserialize, Serialize};

/// The numeric value of a date: one endpoint, or two for ranges and spans.
///
/// Serialized flat, as `(day, month, year, slash)` or
/// `(day, month, year, slash, day2, month2, year2, slash2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawValue", into = "RawValue")]
pub enum DateValue {
    Single(SingleDate),
    Compound(SingleDate, SingleDate),
}

impl DateValue {
    pub const fn start(&self) -> SingleDate {
        match *self {
            Self::Single(start) | Self::Compound(start, _) => start,
        }
    }

    pub const fn stop(&self) -> Option<SingleDate> {
        match *self {
            Self::Single(_) => None,
            Self::Compound(_, stop) => Some(stop),
        }
    }

    /// Number of persisted components: 4 or 8
    pub const fn component_count(&self) -> usize {
        match self {
            Self::Single(_) => 4,
            Self::Compound(..) => 8,
        }
    }

    pub const fn is_compound(&self) -> bool {
        matches!(self, Self::Compound(..))
    }
}

impl Default for DateValue {
    fn default() -> Self {
        Self::Single(SingleDate::EMPTY)
    }
}

impl From<SingleDate> for DateValue {
    fn from(start: SingleDate) -> Self {
        Self::Single(start)
    }
}

impl From<(SingleDate, SingleDate)> for DateValue {
    fn from((start, stop): (SingleDate, SingleDate)) -> Self {
        Self::Compound(start, stop)
    }
}

/// `(day, month, year, slash)`
impl From<(i32, i32, i32, bool)> for DateValue {
    fn from(value: (i32, i32, i32, bool)) -> Self {
        Self::Single(value.into())
    }
}

/// `(day, month, year, slash, day2, month2, year2, slash2)`
impl From<(i32, i32, i32, bool, i32, i32, i32, bool)> for DateValue {
    fn from((d1, m1, y1, s1, d2, m2, y2, s2): (i32, i32, i32, bool, i32, i32, i32, bool)) -> Self {
        Self::Compound((d1, m1, y1, s1).into(), (d2, m2, y2, s2).into())
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawValue {
    Single(i32, i32, i32, bool),
    Compound(i32, i32, i32, bool, i32, i32, i32, bool),
}

impl From<RawValue> for DateValue {
    fn from(raw: RawValue) -> Self {
        match raw {
            RawValue::Single(d, m, y, s) => (d, m, y, s).into(),
            RawValue::Compound(d1, m1, y1, s1, d2, m2, y2, s2) => {
                (d1, m1, y1, s1, d2, m2, y2, s2).into()
            },
        }
    }
}

impl From<DateValue> for RawValue {
    fn from(value: DateValue) -> Self {
        match value {
            DateValue::Single(start) => {
                let (d, m, y, s) = start.to_tuple();
                Self::Single(d, m, y, s)
            },
            DateValue::Compound(start, stop) => {
                let (d1, m1, y1, s1) = start.to_tuple();
                let (d2, m2, y2, s2) = stop.to_tuple();
                Self::Compound(d1, m1, y1, s1, d2, m2, y2, s2)
            },
        }
    }
}

/// Decomposed fields produced by a successful parse.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DateFields {
    pub quality:  Quality,
    pub modifier: Modifier,
    pub calendar: CalendarKind,
    pub value:    DateValue,
    /// Verbatim input or a comment; `None` keeps the existing text
    pub text:     Option<String>,
}

/// What a parser hands to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    Parsed(DateFields),
    /// Input that could not be decomposed, kept verbatim
    Unparsed(String),
}

impl From<DateFields> for DateInput {
    fn from(fields: DateFields) -> Self {
        Self::Parsed(fields)
    }
}
