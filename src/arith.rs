//! Date arithmetic: moving a date by years, months and days, and the
//! `(years, months, days)` difference between two dates.
//!
//! Offsets are applied to the start endpoint in the Gregorian calendar and
//! the result is converted back, so month lengths are always Gregorian ones.
//! `date + 2` and `date - 2` move by whole years; a `(years, months, days)`
//! tuple moves by each component.

use crate::Date;
use crate::calendar::NO_DATE;
use crate::consts::{Sdn, UNKNOWN};
use crate::types::CalendarKind;
use std::ops::{Add, Sub};
use tracing::trace;

const MONTHS_PER_YEAR: i32 = 12;

/// Year and month lengths for differences across calendars
const DAYS_PER_YEAR_ESTIMATE: Sdn = 365;
const DAYS_PER_MONTH_ESTIMATE: Sdn = 30;

/// Largest day correction accepted when checking a difference
const MAX_CORRECTION: Sdn = 60;

/// Day count used when borrowing a month
const BORROW_DAYS: i32 = 31;

/// Day beyond which a month offset may land past the end of a month
const SAFE_DAY: i32 = 28;

impl Date {
    /// Moves the start endpoint by whole years, months and days, in the
    /// date's own calendar.
    ///
    /// Known components are shifted. An unknown year or month becomes the
    /// offset itself (a negative month offset counts back from January).
    /// Months outside `1..=12` roll into the year. A day offset, or a day
    /// past the 28th, is settled by moving the sort value, which makes every
    /// component known. Text-only dates are left alone.
    pub fn set_yr_mon_day_offset(&mut self, years: i32, months: i32, days: i32) {
        if self.is_text_only() {
            return;
        }
        let (mut year, mut month, day) = self.start().ymd();
        if year != UNKNOWN {
            year = year.saturating_add(years);
        } else if years != 0 {
            year = years;
        }
        if month != UNKNOWN {
            month = month.saturating_add(months);
        } else if months < 0 {
            month = 1 + months;
        } else {
            month = months;
        }
        if months != 0 {
            year = year.saturating_add((month - 1).div_euclid(MONTHS_PER_YEAR));
            month = (month - 1).rem_euclid(MONTHS_PER_YEAR) + 1;
        }
        self.set_yr_mon_day(year, month, day);

        if (days != 0 || day > SAFE_DAY) && self.sort_value() != 0 {
            let (year, month, day) = self
                .calendar()
                .system()
                .from_sdn(self.sort_value().saturating_add(i64::from(days)));
            if (year, month, day) != NO_DATE {
                self.set_yr_mon_day(year, month, day);
            }
        }
    }

    /// Copy moved by `(years, months, days)`, computed in the Gregorian
    /// calendar and converted back to this date's calendar.
    #[must_use]
    pub fn copy_offset_ymd(&self, years: i32, months: i32, days: i32) -> Self {
        let mut date = self.to_calendar(CalendarKind::Gregorian);
        date.set_yr_mon_day_offset(years, months, days);
        date.convert_calendar(self.calendar());
        date
    }

    /// Copy with the start set to `(year, month, day)`
    #[must_use]
    pub fn copy_ymd(&self, year: i32, month: i32, day: i32) -> Self {
        let mut date = self.clone();
        date.set_yr_mon_day(year, month, day);
        date
    }

    /// Time between the starts of two dates as `(years, months, days)`,
    /// always counted from the earlier to the later one.
    ///
    /// Unknown components count as 1. Dates in different calendars are
    /// measured on their sort values with 365 day years and 30 day months.
    /// Returns `None` for text-only or invalid dates, and when the estimate
    /// cannot be settled within two months of days.
    pub fn difference(&self, other: &Self) -> Option<(i32, i32, i32)> {
        if !self.is_valid() || !other.is_valid() {
            return None;
        }

        if self.calendar() != other.calendar() {
            let days = (self.sort_value() - other.sort_value()).abs();
            let rest = days % DAYS_PER_YEAR_ESTIMATE;
            return Some((
                i32::try_from(days / DAYS_PER_YEAR_ESTIMATE).ok()?,
                i32::try_from(rest / DAYS_PER_MONTH_ESTIMATE).ok()?,
                i32::try_from(rest % DAYS_PER_MONTH_ESTIMATE).ok()?,
            ));
        }

        let (later, earlier) = if self.start().sort_ymd() < other.start().sort_ymd() {
            (other, self)
        } else {
            (self, other)
        };
        let (mut year, mut month, mut day) = later.start().sort_ymd();
        let (from_year, from_month, from_day) = earlier.start().sort_ymd();

        if from_day > day {
            if from_month > month {
                year -= 1;
                month += MONTHS_PER_YEAR;
            }
            month -= 1;
            day += BORROW_DAYS;
        }
        if from_month > month {
            year -= 1;
            month += MONTHS_PER_YEAR;
        }
        let mut days = day - from_day;
        let mut months = month - from_month;
        let mut years = year - from_year;
        if days > BORROW_DAYS {
            months += days / BORROW_DAYS;
            days %= BORROW_DAYS;
        }
        if months > MONTHS_PER_YEAR {
            years += months / MONTHS_PER_YEAR;
            months %= MONTHS_PER_YEAR;
        }

        // later - difference must land on earlier; settle the days if not
        let estimate = later.copy_offset_ymd(-years, -months, -days);
        let gap = estimate.sort_value() - earlier.sort_value();
        if gap.abs() >= MAX_CORRECTION {
            trace!(years, months, days, gap, "date difference did not settle");
            return None;
        }
        Some((years, months, days + i32::try_from(gap).ok()?))
    }
}

impl Add<i32> for &Date {
    type Output = Date;

    fn add(self, years: i32) -> Date {
        self.copy_offset_ymd(years, 0, 0)
    }
}

impl Add<(i32, i32, i32)> for &Date {
    type Output = Date;

    fn add(self, (years, months, days): (i32, i32, i32)) -> Date {
        self.copy_offset_ymd(years, months, days)
    }
}

impl Add<&Date> for i32 {
    type Output = Date;

    fn add(self, date: &Date) -> Date {
        date + self
    }
}

impl Add<&Date> for (i32, i32, i32) {
    type Output = Date;

    fn add(self, date: &Date) -> Date {
        date + self
    }
}

impl Sub<i32> for &Date {
    type Output = Date;

    fn sub(self, years: i32) -> Date {
        self.copy_offset_ymd(-years, 0, 0)
    }
}

impl Sub<(i32, i32, i32)> for &Date {
    type Output = Date;

    fn sub(self, (years, months, days): (i32, i32, i32)) -> Date {
        self.copy_offset_ymd(-years, -months, -days)
    }
}

impl Sub for &Date {
    type Output = Option<(i32, i32, i32)>;

    fn sub(self, other: Self) -> Self::Output {
        self.difference(other)
    }
}
