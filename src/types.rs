use crate::calendar::CalendarSystem;
use crate::consts::{MIN_COMPONENT, Sdn, UNKNOWN};
use crate::error::DateError;
use crate::prelude::*;
use crate::registry;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::str::FromStr;

/// One point in time as `(year, month, day)` plus the dual-dating flag.
///
/// Any component may be [`UNKNOWN`] (zero). The calendar the numbers are
/// expressed in is tracked by the owning [`Date`](crate::Date).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[display(fmt = "{:04}-{:02}-{:02}", "year", "month", "day")]
#[serde(from = "(i32, i32, i32, bool)", into = "(i32, i32, i32, bool)")]
pub struct SingleDate {
    year:  i32,
    month: i32,
    day:   i32,
    slash: bool,
}

impl SingleDate {
    /// All components unknown.
    pub const EMPTY: Self = Self {
        year:  UNKNOWN,
        month: UNKNOWN,
        day:   UNKNOWN,
        slash: false,
    };

    /// Creates a date without the dual-dating flag
    pub const fn new(year: i32, month: i32, day: i32) -> Self {
        Self {
            year,
            month,
            day,
            slash: false,
        }
    }

    /// Returns a copy with the dual-dating (old style / new style) flag set
    #[must_use]
    pub const fn with_slash(self, slash: bool) -> Self {
        Self { slash, ..self }
    }

    #[inline]
    pub const fn year(&self) -> i32 {
        self.year
    }

    #[inline]
    pub const fn month(&self) -> i32 {
        self.month
    }

    #[inline]
    pub const fn day(&self) -> i32 {
        self.day
    }

    /// True for a dual-dated year such as 1530/1
    #[inline]
    pub const fn slash(&self) -> bool {
        self.slash
    }

    /// Returns `(year, month, day)`
    pub const fn ymd(&self) -> (i32, i32, i32) {
        (self.year, self.month, self.day)
    }

    /// Persistence order: `(day, month, year, slash)`
    pub const fn to_tuple(&self) -> (i32, i32, i32, bool) {
        (self.day, self.month, self.year, self.slash)
    }

    /// True when no component is known and the flag is clear
    pub const fn is_empty(&self) -> bool {
        self.year == UNKNOWN && self.month == UNKNOWN && self.day == UNKNOWN && !self.slash
    }

    /// True when year, month and day are all known
    pub const fn is_full(&self) -> bool {
        self.year != UNKNOWN && self.month != UNKNOWN && self.day != UNKNOWN
    }

    /// Components with unknown values replaced by 1, as used for sorting.
    /// Negative (BC) years are kept.
    pub const fn sort_ymd(&self) -> (i32, i32, i32) {
        let year = if self.year == UNKNOWN {
            MIN_COMPONENT
        } else {
            self.year
        };
        let month = if self.month < MIN_COMPONENT {
            MIN_COMPONENT
        } else {
            self.month
        };
        let day = if self.day < MIN_COMPONENT {
            MIN_COMPONENT
        } else {
            self.day
        };
        (year, month, day)
    }

    /// Serial day number of [`sort_ymd`](Self::sort_ymd) in `calendar`
    pub fn to_sdn(&self, calendar: CalendarKind) -> Sdn {
        let (year, month, day) = self.sort_ymd();
        calendar.system().to_sdn(year, month, day)
    }

    /// Builds a date from a serial day number; pre-epoch numbers give [`EMPTY`](Self::EMPTY)
    pub fn from_sdn(sdn: Sdn, calendar: CalendarKind) -> Self {
        let (year, month, day) = calendar.system().from_sdn(sdn);
        Self::new(year, month, day)
    }

    /// A fully known date that names a real day of `calendar`.
    pub fn is_valid(&self, calendar: CalendarKind) -> bool {
        self.is_full() && calendar.system().is_valid(self.year, self.month, self.day)
    }

    /// Like [`is_valid`](Self::is_valid) but unknown components are accepted
    /// as long as the date with those components set to 1 exists.
    pub fn is_representable(&self, calendar: CalendarKind) -> bool {
        if self.is_empty() {
            return true;
        }
        let (year, month, day) = self.sort_ymd();
        calendar.system().is_valid(year, month, day)
    }

    pub(crate) const fn compare_key(&self) -> (i32, i32, i32, bool) {
        (self.year, self.month, self.day, self.slash)
    }
}

impl From<(i32, i32, i32, bool)> for SingleDate {
    fn from((day, month, year, slash): (i32, i32, i32, bool)) -> Self {
        Self::new(year, month, day).with_slash(slash)
    }
}

impl From<SingleDate> for (i32, i32, i32, bool) {
    fn from(date: SingleDate) -> Self {
        date.to_tuple()
    }
}

/// How the value of a [`Date`](crate::Date) is to be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Display, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Modifier {
    #[default]
    #[display(fmt = "none")]
    None,
    #[display(fmt = "before")]
    Before,
    #[display(fmt = "after")]
    After,
    #[display(fmt = "about")]
    About,
    /// Both endpoints bound an unknown exact date
    #[display(fmt = "range")]
    Range,
    /// Both endpoints are real, from one to the other
    #[display(fmt = "span")]
    Span,
    /// Only the free-form text is meaningful
    #[display(fmt = "textonly")]
    TextOnly,
}

impl Modifier {
    pub const ALL: [Self; 7] = [
        Self::None,
        Self::Before,
        Self::After,
        Self::About,
        Self::Range,
        Self::Span,
        Self::TextOnly,
    ];

    /// Stable numeric code used by the persisted form
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Range and span dates carry a stop endpoint
    pub const fn is_compound(self) -> bool {
        matches!(self, Self::Range | Self::Span)
    }
}

impl TryFrom<u8> for Modifier {
    type Error = DateError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(DateError::InvalidModifierCode(value))
    }
}

impl From<Modifier> for u8 {
    fn from(modifier: Modifier) -> Self {
        modifier.code()
    }
}

impl FromStr for Modifier {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup_name(&Self::ALL, s, "modifier")
    }
}

/// Provenance of the precision of a [`Date`](crate::Date).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Display, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Quality {
    #[default]
    #[display(fmt = "none")]
    None,
    #[display(fmt = "estimated")]
    Estimated,
    #[display(fmt = "calculated")]
    Calculated,
}

impl Quality {
    pub const ALL: [Self; 3] = [Self::None, Self::Estimated, Self::Calculated];

    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Quality {
    type Error = DateError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(DateError::InvalidQualityCode(value))
    }
}

impl From<Quality> for u8 {
    fn from(quality: Quality) -> Self {
        quality.code()
    }
}

impl FromStr for Quality {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup_name(&Self::ALL, s, "quality")
    }
}

/// Calendar system a date is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Display, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CalendarKind {
    #[default]
    #[display(fmt = "Gregorian")]
    Gregorian,
    #[display(fmt = "Julian")]
    Julian,
    #[display(fmt = "Hebrew")]
    Hebrew,
    #[display(fmt = "French Republican")]
    FrenchRepublican,
    #[display(fmt = "Persian")]
    Persian,
    #[display(fmt = "Islamic")]
    Islamic,
}

impl CalendarKind {
    pub const ALL: [Self; 6] = [
        Self::Gregorian,
        Self::Julian,
        Self::Hebrew,
        Self::FrenchRepublican,
        Self::Persian,
        Self::Islamic,
    ];

    pub const fn code(self) -> u8 {
        self as u8
    }

    /// The conversion engine registered for this calendar
    pub fn system(self) -> &'static dyn CalendarSystem {
        registry::get(self)
    }
}

impl TryFrom<u8> for CalendarKind {
    type Error = DateError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(DateError::InvalidCalendarCode(value))
    }
}

impl From<CalendarKind> for u8 {
    fn from(calendar: CalendarKind) -> Self {
        calendar.code()
    }
}

impl FromStr for CalendarKind {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        registry::registry()
            .lookup_name(s)
            .ok_or_else(|| DateError::UnknownName {
                kind: "calendar",
                name: s.trim().to_owned(),
            })
    }
}

/// Case-insensitive match of `name` against the display names of `values`
pub(crate) fn lookup_name<T>(values: &[T], name: &str, kind: &'static str) -> Result<T, DateError>
where
    T: Copy + std::fmt::Display,
{
    let wanted = name.trim();
    values
        .iter()
        .copied()
        .find(|value| value.to_string().eq_ignore_ascii_case(wanted))
        .ok_or_else(|| DateError::UnknownName {
            kind,
            name: wanted.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_date_tuple_order() {
        let date = SingleDate::from((15, 3, 1990, true));
        assert_eq!(date.year(), 1990);
        assert_eq!(date.month(), 3);
        assert_eq!(date.day(), 15);
        assert!(date.slash());
        assert_eq!(date.to_tuple(), (15, 3, 1990, true));
    }

    #[test]
    fn test_single_date_display() {
        assert_eq!(SingleDate::new(1990, 3, 15).to_string(), "1990-03-15");
        assert_eq!(SingleDate::new(1990, 0, 0).to_string(), "1990-00-00");
    }

    #[test]
    fn test_empty_and_full() {
        assert!(SingleDate::EMPTY.is_empty());
        assert!(!SingleDate::EMPTY.with_slash(true).is_empty());
        assert!(SingleDate::new(1990, 3, 15).is_full());
        assert!(!SingleDate::new(1990, 0, 15).is_full());
        assert_eq!(SingleDate::default(), SingleDate::EMPTY);
    }

    #[test]
    fn test_sort_ymd_cases() {
        struct TestCase {
            date:        SingleDate,
            expected:    (i32, i32, i32),
            description: &'static str,
        }

        let cases = [
            TestCase {
                date:        SingleDate::new(1990, 3, 15),
                expected:    (1990, 3, 15),
                description: "fully known",
            },
            TestCase {
                date:        SingleDate::new(1990, 0, 0),
                expected:    (1990, 1, 1),
                description: "year only",
            },
            TestCase {
                date:        SingleDate::EMPTY,
                expected:    (1, 1, 1),
                description: "nothing known",
            },
            TestCase {
                date:        SingleDate::new(-44, 3, 15),
                expected:    (-44, 3, 15),
                description: "BC year kept",
            },
        ];

        for case in &cases {
            assert_eq!(case.date.sort_ymd(), case.expected, "{}", case.description);
        }
    }

    #[test]
    fn test_validity_predicate() {
        assert!(SingleDate::new(2024, 2, 29).is_valid(CalendarKind::Gregorian));
        assert!(!SingleDate::new(2023, 2, 29).is_valid(CalendarKind::Gregorian));
        assert!(SingleDate::new(1900, 2, 29).is_valid(CalendarKind::Julian));
        assert!(!SingleDate::new(1900, 2, 0).is_valid(CalendarKind::Julian));

        assert!(SingleDate::new(1900, 2, 0).is_representable(CalendarKind::Julian));
        assert!(SingleDate::EMPTY.is_representable(CalendarKind::Hebrew));
        assert!(!SingleDate::new(1900, 13, 0).is_representable(CalendarKind::Gregorian));
    }

    #[test]
    fn test_sdn_helpers() {
        let date = SingleDate::new(2000, 1, 1);
        assert_eq!(date.to_sdn(CalendarKind::Gregorian), 2_451_545);
        assert_eq!(SingleDate::from_sdn(2_451_545, CalendarKind::Gregorian), date);
        assert_eq!(SingleDate::from_sdn(0, CalendarKind::Gregorian), SingleDate::EMPTY);
    }

    #[test]
    fn test_single_date_serde() {
        let date = SingleDate::new(1990, 3, 15);
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "[15,3,1990,false]");

        let parsed: SingleDate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, date);
    }

    #[test]
    fn test_modifier_codes() {
        for (code, modifier) in Modifier::ALL.iter().enumerate() {
            let code = u8::try_from(code).unwrap();
            assert_eq!(modifier.code(), code);
            assert_eq!(Modifier::try_from(code).unwrap(), *modifier);
        }
        assert!(matches!(Modifier::try_from(7u8), Err(DateError::InvalidModifierCode(7))));
    }

    #[test]
    fn test_modifier_compound() {
        assert!(Modifier::Range.is_compound());
        assert!(Modifier::Span.is_compound());
        assert!(!Modifier::About.is_compound());
        assert!(!Modifier::TextOnly.is_compound());
    }

    #[test]
    fn test_modifier_lookup_by_name() {
        assert_eq!("before".parse::<Modifier>().unwrap(), Modifier::Before);
        assert_eq!(" SPAN ".parse::<Modifier>().unwrap(), Modifier::Span);
        assert_eq!("TextOnly".parse::<Modifier>().unwrap(), Modifier::TextOnly);
        assert!(matches!(
            "sometime".parse::<Modifier>(),
            Err(DateError::UnknownName { kind: "modifier", .. })
        ));
    }

    #[test]
    fn test_quality_codes_and_names() {
        assert_eq!(Quality::try_from(2u8).unwrap(), Quality::Calculated);
        assert!(Quality::try_from(3u8).is_err());
        assert_eq!("Estimated".parse::<Quality>().unwrap(), Quality::Estimated);
        assert_eq!(Quality::Calculated.to_string(), "calculated");
    }

    #[test]
    fn test_calendar_codes_and_names() {
        assert_eq!(CalendarKind::try_from(2u8).unwrap(), CalendarKind::Hebrew);
        assert!(matches!(CalendarKind::try_from(6u8), Err(DateError::InvalidCalendarCode(6))));
        assert_eq!(
            "french republican".parse::<CalendarKind>().unwrap(),
            CalendarKind::FrenchRepublican
        );
        assert_eq!("ISLAMIC".parse::<CalendarKind>().unwrap(), CalendarKind::Islamic);
        assert!("swedish".parse::<CalendarKind>().is_err());
    }

    #[test]
    fn test_enum_serde_as_codes() {
        assert_eq!(serde_json::to_string(&CalendarKind::Persian).unwrap(), "4");
        assert_eq!(serde_json::to_string(&Modifier::Span).unwrap(), "5");
        assert_eq!(serde_json::to_string(&Quality::Estimated).unwrap(), "1");

        let parsed: CalendarKind = serde_json::from_str("1").unwrap();
        assert_eq!(parsed, CalendarKind::Julian);

        let result: Result<Modifier, _> = serde_json::from_str("42");
        assert!(result.is_err());
    }
}
