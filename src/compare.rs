//! Ordering of [`Date`] values.
//!
//! [`compare`] looks at the stored components, not at the sort value, and
//! only orders dates of the same calendar. Dates in different calendars
//! always compare as `Greater`, so it is not a total order over mixed
//! collections; [`sort_dates`] groups by calendar first to stay consistent.

use crate::Date;
use std::cmp::Ordering;

/// Orders two dates.
///
/// - different calendars: `Greater`
/// - both text-only: by text
/// - one text-only: the text-only date is greater
/// - one compound: the compound date is greater
/// - otherwise start `(year, month, day, slash)`, then stop for compound dates
pub fn compare(a: &Date, b: &Date) -> Ordering {
    if a.calendar() != b.calendar() {
        return Ordering::Greater;
    }

    match (a.is_text_only(), b.is_text_only()) {
        (true, true) => return a.get_text().cmp(b.get_text()),
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {},
    }

    match (a.is_compound(), b.is_compound()) {
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        _ => {},
    }

    let start = a.start().compare_key().cmp(&b.start().compare_key());
    if start != Ordering::Equal || !a.is_compound() {
        return start;
    }
    let stop_key = |date: &Date| date.stop().map(|stop| stop.compare_key());
    stop_key(a).cmp(&stop_key(b))
}

/// Stable sort: by calendar code, then by [`compare`] within a calendar.
pub fn sort_dates(dates: &mut [Date]) {
    dates.sort_by(|a, b| {
        a.calendar()
            .code()
            .cmp(&b.calendar().code())
            .then_with(|| compare(a, b))
    });
}
