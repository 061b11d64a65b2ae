mod arith;
pub mod calendar;
mod compare;
mod consts;
mod error;
pub mod hebrew;
mod input;
mod matching;
mod prelude;
pub mod registry;
mod types;

pub use calendar::CalendarSystem;
pub use compare::{compare, sort_dates};
pub use consts::*;
pub use error::DateError;
pub use input::{DateFields, DateInput, DateValue};
pub use matching::{Comparison, MatchConfig, Ymd};
pub use types::{CalendarKind, Modifier, Quality, SingleDate};

use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use tracing::{debug, trace};

/// A historical date that may be partially known, expressed in one of the
/// supported calendars.
///
/// The value is one [`SingleDate`], or two for ranges and spans. A derived
/// sort value (the serial day number of the start, with unknown components
/// taken as 1) is kept in step with every edit. Text-only dates carry only
/// their text and sort as 0.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DateRecord", into = "DateRecord")]
pub struct Date {
    calendar:   CalendarKind,
    modifier:   Modifier,
    quality:    Quality,
    start:      SingleDate,
    stop:       Option<SingleDate>,
    text:       String,
    sort_value: Sdn,
}

impl Default for Date {
    fn default() -> Self {
        Self::new()
    }
}

impl Date {
    /// An empty, text-only date with no text
    pub fn new() -> Self {
        Self {
            calendar:   CalendarKind::Gregorian,
            modifier:   Modifier::TextOnly,
            quality:    Quality::None,
            start:      SingleDate::EMPTY,
            stop:       None,
            text:       String::new(),
            sort_value: 0,
        }
    }

    /// Replaces the whole date and recomputes the sort value.
    ///
    /// A compound modifier given a single value gets an empty stop endpoint;
    /// a stop endpoint given with any other modifier is dropped. `text`
    /// replaces the stored text only when present.
    pub fn set(
        &mut self,
        quality: Quality,
        modifier: Modifier,
        calendar: CalendarKind,
        value: impl Into<DateValue>,
        text: Option<&str>,
    ) {
        let value = value.into();
        self.quality = quality;
        self.modifier = modifier;
        self.calendar = calendar;
        self.start = value.start();
        self.stop = if modifier.is_compound() {
            Some(value.stop().unwrap_or_else(|| {
                debug!(%modifier, "compound date set without a stop endpoint");
                SingleDate::EMPTY
            }))
        } else {
            None
        };
        if let Some(text) = text {
            text.clone_into(&mut self.text);
        }
        self.recalc_sort_value();
    }

    /// Applies what a parser produced; unparsed input becomes a text-only date.
    pub fn set_input(&mut self, input: DateInput) {
        match input {
            DateInput::Parsed(fields) => self.set(
                fields.quality,
                fields.modifier,
                fields.calendar,
                fields.value,
                fields.text.as_deref(),
            ),
            DateInput::Unparsed(text) => {
                debug!(text = %text, "unparsed date kept as text");
                self.set_as_text(&text);
            },
        }
    }

    /// Recomputes and returns the sort value
    pub fn recalc_sort_value(&mut self) -> Sdn {
        self.sort_value = if self.is_text_only() {
            0
        } else {
            self.start.to_sdn(self.calendar)
        };
        self.sort_value
    }

    /// Re-expresses the date in `calendar`, keeping the same day(s).
    ///
    /// The start comes from the sort value and the stop from its own serial
    /// day number in the old calendar. Text-only dates only change their tag.
    /// A date with a day that `calendar` cannot express is left unconverted.
    pub fn convert_calendar(&mut self, calendar: CalendarKind) {
        if calendar == self.calendar {
            return;
        }
        let old = self.calendar;
        trace!(from = %old, to = %calendar, sort_value = self.sort_value, "converting date");
        if !self.is_text_only() {
            let start = if self.start.is_empty() {
                Some(SingleDate::EMPTY)
            } else {
                carry_over(self.sort_value, calendar)
            };
            let stop = match self.stop {
                None => Some(None),
                Some(stop) if stop.is_empty() => Some(Some(stop)),
                Some(stop) => carry_over(stop.to_sdn(old), calendar)
                    .map(|date| Some(date.with_slash(stop.slash()))),
            };
            let (Some(start), Some(stop)) = (start, stop) else {
                debug!(
                    from = %old,
                    to = %calendar,
                    sort_value = self.sort_value,
                    "day missing from target calendar, date left unconverted"
                );
                return;
            };
            self.start = start.with_slash(self.start.slash());
            self.stop = stop;
        }
        self.calendar = calendar;
        self.recalc_sort_value();
    }

    /// Converted copy of this date
    #[must_use]
    pub fn to_calendar(&self, calendar: CalendarKind) -> Self {
        let mut date = self.clone();
        date.convert_calendar(calendar);
        date
    }

    /// Year of this date when expressed in `calendar`
    pub fn get_year_calendar(&self, calendar: CalendarKind) -> i32 {
        self.to_calendar(calendar).get_year()
    }

    /// Gregorian `(year, month, day)` of the sort value moved by `days`
    pub fn offset(&self, days: i64) -> (i32, i32, i32) {
        CalendarKind::Gregorian
            .system()
            .from_sdn(self.sort_value.saturating_add(days))
    }

    pub fn set_as_text(&mut self, text: &str) {
        self.modifier = Modifier::TextOnly;
        text.clone_into(&mut self.text);
        self.stop = None;
        self.sort_value = 0;
    }

    pub fn set_text_value(&mut self, text: &str) {
        text.clone_into(&mut self.text);
    }

    /// Sets the start components, keeping its slash flag.
    pub fn set_yr_mon_day(&mut self, year: i32, month: i32, day: i32) {
        self.start = SingleDate::new(year, month, day).with_slash(self.start.slash());
        self.recalc_sort_value();
    }

    /// Sets the stop components of a range or span.
    pub fn set2_yr_mon_day(&mut self, year: i32, month: i32, day: i32) -> Result<(), DateError> {
        let Some(stop) = self.stop.as_mut() else {
            return Err(DateError::NotCompound(self.modifier));
        };
        *stop = SingleDate::new(year, month, day).with_slash(stop.slash());
        Ok(())
    }

    pub fn set_year(&mut self, year: i32) {
        self.set_yr_mon_day(year, self.start.month(), self.start.day());
    }

    /// Forgets month and day on both endpoints
    pub fn make_vague(&mut self) {
        let vague = |date: SingleDate| {
            SingleDate::new(date.year(), UNKNOWN, UNKNOWN).with_slash(date.slash())
        };
        self.start = vague(self.start);
        self.stop = self.stop.map(vague);
        self.recalc_sort_value();
    }

    /// Checks that every endpoint names a day that exists in the calendar.
    /// Unknown components are accepted.
    pub fn check(&self) -> Result<(), DateError> {
        if self.is_text_only() {
            return Ok(());
        }
        for value in std::iter::once(self.start).chain(self.stop) {
            if !value.is_representable(self.calendar) {
                debug!(calendar = %self.calendar, %value, "date failed check");
                return Err(DateError::InvalidValue {
                    calendar: self.calendar,
                    value,
                });
            }
        }
        Ok(())
    }

    /// Same calendar, modifier, quality and endpoints. Two text-only dates
    /// are equal when their text is; the text of other dates is ignored.
    pub fn is_equal(&self, other: &Self) -> bool {
        if self.is_text_only() && other.is_text_only() {
            return self.text == other.text;
        }
        self.calendar == other.calendar
            && self.modifier == other.modifier
            && self.quality == other.quality
            && self.start == other.start
            && self.stop == other.stop
    }
}

// Accessors
impl Date {
    #[inline]
    pub const fn calendar(&self) -> CalendarKind {
        self.calendar
    }

    #[inline]
    pub const fn modifier(&self) -> Modifier {
        self.modifier
    }

    #[inline]
    pub const fn quality(&self) -> Quality {
        self.quality
    }

    #[inline]
    pub const fn sort_value(&self) -> Sdn {
        self.sort_value
    }

    /// Stored start endpoint, whatever the modifier
    #[inline]
    pub const fn start(&self) -> SingleDate {
        self.start
    }

    /// Stored stop endpoint; `Some` exactly for ranges and spans
    #[inline]
    pub const fn stop(&self) -> Option<SingleDate> {
        self.stop
    }

    /// The verbatim text of a text-only date, or a comment
    pub fn get_text(&self) -> &str {
        &self.text
    }

    pub fn is_text_only(&self) -> bool {
        self.modifier == Modifier::TextOnly
    }

    pub const fn is_compound(&self) -> bool {
        self.modifier.is_compound()
    }

    /// Text-only without text, or no known component on either endpoint
    pub fn is_empty(&self) -> bool {
        if self.is_text_only() {
            return self.text.is_empty();
        }
        self.start.is_empty() && self.stop.is_none_or(|stop| stop.is_empty())
    }

    /// A single exact date: no modifier, no quality, all components known
    pub fn is_regular(&self) -> bool {
        self.modifier == Modifier::None && self.quality == Quality::None && self.is_full()
    }

    /// Structured and mapped to a day
    pub fn is_valid(&self) -> bool {
        !self.is_text_only() && self.sort_value != 0
    }

    pub fn is_full(&self) -> bool {
        self.get_year_valid() && self.get_month_valid() && self.get_day_valid()
    }

    /// Start endpoint, empty for text-only dates
    pub fn get_start_date(&self) -> SingleDate {
        if self.is_text_only() {
            SingleDate::EMPTY
        } else {
            self.start
        }
    }

    /// Stop endpoint, empty unless this is a range or span
    pub fn get_stop_date(&self) -> SingleDate {
        self.stop.unwrap_or(SingleDate::EMPTY)
    }

    pub fn get_year(&self) -> i32 {
        self.get_start_date().year()
    }

    pub fn get_month(&self) -> i32 {
        self.get_start_date().month()
    }

    pub fn get_day(&self) -> i32 {
        self.get_start_date().day()
    }

    pub fn get_stop_year(&self) -> i32 {
        self.get_stop_date().year()
    }

    pub fn get_stop_month(&self) -> i32 {
        self.get_stop_date().month()
    }

    pub fn get_stop_day(&self) -> i32 {
        self.get_stop_date().day()
    }

    pub fn get_year_valid(&self) -> bool {
        self.get_year() != UNKNOWN
    }

    pub fn get_month_valid(&self) -> bool {
        self.get_month() != UNKNOWN
    }

    pub fn get_day_valid(&self) -> bool {
        self.get_day() != UNKNOWN
    }

    /// Stop year of a compound date when known, the start year otherwise
    pub fn get_high_year(&self) -> i32 {
        match self.stop {
            Some(stop) if stop.year() != UNKNOWN => stop.year(),
            _ => self.get_year(),
        }
    }

    pub fn get_ymd(&self) -> (i32, i32, i32) {
        self.get_start_date().ymd()
    }

    pub fn get_stop_ymd(&self) -> (i32, i32, i32) {
        self.get_stop_date().ymd()
    }

    /// `(day, month, year)` of the start
    pub fn get_dmy(&self) -> (i32, i32, i32) {
        let (year, month, day) = self.get_ymd();
        (day, month, year)
    }

    pub fn get_slash(&self) -> bool {
        self.get_start_date().slash()
    }

    pub fn get_slash2(&self) -> bool {
        self.get_stop_date().slash()
    }

    /// Day of the week of a regular date, Monday being 0
    pub fn get_dow(&self) -> Option<u8> {
        if !self.is_regular() {
            return None;
        }
        u8::try_from(self.sort_value.rem_euclid(DAYS_PER_WEEK)).ok()
    }
}

/// The same day in `calendar`, or `None` when the day has no counterpart
/// there. Serial day 0 gives an empty date.
fn carry_over(sdn: Sdn, calendar: CalendarKind) -> Option<SingleDate> {
    if sdn == 0 {
        return Some(SingleDate::EMPTY);
    }
    let date = SingleDate::from_sdn(sdn, calendar);
    (!date.is_empty()).then_some(date)
}

/// Flat persisted form of a [`Date`].
///
/// `value` is `(day, month, year, slash)`, or eight components for ranges
/// and spans. `sort_value` is written for readers that sort without
/// decoding; it is recomputed on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRecord {
    pub calendar:   CalendarKind,
    pub modifier:   Modifier,
    pub quality:    Quality,
    pub value:      DateValue,
    pub text:       String,
    pub sort_value: Sdn,
}

impl Date {
    pub fn to_record(&self) -> DateRecord {
        let value = match self.stop {
            Some(stop) => DateValue::Compound(self.start, stop),
            None => DateValue::Single(self.start),
        };
        DateRecord {
            calendar: self.calendar,
            modifier: self.modifier,
            quality: self.quality,
            value,
            text: self.text.clone(),
            sort_value: self.sort_value,
        }
    }

    /// Rebuilds a date; the value must have 8 components exactly for ranges
    /// and spans (text-only dates accept either shape).
    pub fn from_record(record: &DateRecord) -> Result<Self, DateError> {
        let found = record.value.component_count();
        let expected = match record.modifier {
            Modifier::TextOnly => found,
            modifier if modifier.is_compound() => 8,
            _ => 4,
        };
        if found != expected {
            return Err(DateError::ValueShape {
                modifier: record.modifier,
                expected,
                found,
            });
        }

        let mut date = Self::new();
        date.set(
            record.quality,
            record.modifier,
            record.calendar,
            record.value,
            Some(&record.text),
        );
        if date.sort_value != record.sort_value {
            debug!(
                stored = record.sort_value,
                computed = date.sort_value,
                "stale sort value in record"
            );
        }
        Ok(date)
    }
}

impl TryFrom<DateRecord> for Date {
    type Error = DateError;

    fn try_from(record: DateRecord) -> Result<Self, Self::Error> {
        Self::from_record(&record)
    }
}

impl From<Date> for DateRecord {
    fn from(date: Date) -> Self {
        date.to_record()
    }
}
