//! Conversions between calendar dates and serial day numbers.
//!
//! Every calendar maps `(year, month, day)` onto the same linear day count
//! (the serial day number, 1 being 24 November 4714 BC Gregorian). Inputs are
//! not validated up front: out-of-domain input converts to `0` and serial
//! day numbers at or before a calendar's epoch convert to `(0, 0, 0)`.
//!
//! The arithmetic is integer only. Gregorian and Julian years have no year
//! zero: 1 BC is `-1`.

use crate::consts::{
    DAYS_PER_4_YEARS, DAYS_PER_5_MONTHS, DAYS_PER_400_YEARS, FRENCH_DAYS_PER_MONTH,
    FRENCH_FIRST_VALID, FRENCH_LAST_VALID, FRENCH_MAX_YEAR, FRENCH_MONTHS, FRENCH_SDN_OFFSET,
    GREGORIAN_SDN_OFFSET, ISLAMIC_DAYS_PER_30_YEARS, ISLAMIC_DAYS_PER_YEAR, ISLAMIC_EPOCH,
    JULIAN_SDN_OFFSET, MAX_SDN, MIN_JULIAN_PERIOD_YEAR, PERSIAN_CYCLE_BASE_YEAR,
    PERSIAN_CYCLE_START, PERSIAN_CYCLE_YEARS, PERSIAN_DAYS_PER_CYCLE, PERSIAN_EPOCH,
    PERSIAN_LONG_HALF_DAYS, Sdn, YEAR_SHIFT,
};
use crate::types::CalendarKind;

/// `(0, 0, 0)`: no date
pub const NO_DATE: (i32, i32, i32) = (0, 0, 0);

/// A calendar that can be converted to and from serial day numbers.
///
/// Implementations are stateless, so a single instance is shared by every
/// caller through the [registry](crate::registry).
pub trait CalendarSystem: Send + Sync + std::fmt::Debug {
    /// Which calendar this is
    fn kind(&self) -> CalendarKind;

    /// Serial day number of a date, or `0` when the date is not representable.
    fn to_sdn(&self, year: i32, month: i32, day: i32) -> Sdn;

    /// `(year, month, day)` of a serial day number, or [`NO_DATE`] at or
    /// before the calendar's epoch.
    fn from_sdn(&self, sdn: Sdn) -> (i32, i32, i32);

    /// True when the date exists in this calendar, i.e. it converts to a
    /// serial day number and back unchanged.
    fn is_valid(&self, year: i32, month: i32, day: i32) -> bool {
        let sdn = self.to_sdn(year, month, day);
        sdn != 0 && self.from_sdn(sdn) == (year, month, day)
    }
}

/// Narrows a component that is in range by construction
pub(crate) fn narrow(value: i64) -> i32 {
    i32::try_from(value).unwrap_or_default()
}

/// Rejects the component ranges no month-based calendar accepts
const fn out_of_range(year: i32, month: i32, day: i32, months: i32) -> bool {
    year == 0 || month < 1 || month > months || day < 1 || day > 31
}

/// Proleptic Gregorian calendar
#[derive(Debug, Clone, Copy, Default)]
pub struct Gregorian;

impl CalendarSystem for Gregorian {
    fn kind(&self) -> CalendarKind {
        CalendarKind::Gregorian
    }

    fn to_sdn(&self, year: i32, month: i32, day: i32) -> Sdn {
        if year < MIN_JULIAN_PERIOD_YEAR || out_of_range(year, month, day, 12) {
            return 0;
        }
        let (year, month) = march_based(year, month);
        let sdn = (year / 100) * DAYS_PER_400_YEARS / 4
            + (year % 100) * DAYS_PER_4_YEARS / 4
            + (month * DAYS_PER_5_MONTHS + 2) / 5
            + Sdn::from(day)
            - GREGORIAN_SDN_OFFSET;
        sdn.max(0)
    }

    fn from_sdn(&self, sdn: Sdn) -> (i32, i32, i32) {
        if sdn <= 0 || sdn > MAX_SDN {
            return NO_DATE;
        }
        let temp = (sdn + GREGORIAN_SDN_OFFSET) * 4 - 1;

        let century = temp / DAYS_PER_400_YEARS;
        let temp = ((temp % DAYS_PER_400_YEARS) / 4) * 4 + 3;
        let year = century * 100 + temp / DAYS_PER_4_YEARS;
        let day_of_year = (temp % DAYS_PER_4_YEARS) / 4 + 1;

        from_march_based(year, day_of_year)
    }
}

/// Proleptic Julian calendar
#[derive(Debug, Clone, Copy, Default)]
pub struct Julian;

impl CalendarSystem for Julian {
    fn kind(&self) -> CalendarKind {
        CalendarKind::Julian
    }

    fn to_sdn(&self, year: i32, month: i32, day: i32) -> Sdn {
        if year < MIN_JULIAN_PERIOD_YEAR || out_of_range(year, month, day, 12) {
            return 0;
        }
        let (year, month) = march_based(year, month);
        let sdn = year * DAYS_PER_4_YEARS / 4 + (month * DAYS_PER_5_MONTHS + 2) / 5
            + Sdn::from(day)
            - JULIAN_SDN_OFFSET;
        sdn.max(0)
    }

    fn from_sdn(&self, sdn: Sdn) -> (i32, i32, i32) {
        if sdn <= 0 || sdn > MAX_SDN {
            return NO_DATE;
        }
        let temp = (sdn + JULIAN_SDN_OFFSET - 1) * 4 + 3;
        let year = temp / DAYS_PER_4_YEARS;
        let day_of_year = (temp % DAYS_PER_4_YEARS) / 4 + 1;

        from_march_based(year, day_of_year)
    }
}

/// Shifts a date onto a year that starts in March, counted from 4800 BC
fn march_based(year: i32, month: i32) -> (i64, i64) {
    let mut year = i64::from(year) + if year < 0 { YEAR_SHIFT + 1 } else { YEAR_SHIFT };
    let mut month = i64::from(month);
    if month > 2 {
        month -= 3;
    } else {
        month += 9;
        year -= 1;
    }
    (year, month)
}

/// Inverse of [`march_based`] given the day within the March-based year
fn from_march_based(year: i64, day_of_year: i64) -> (i32, i32, i32) {
    let temp = day_of_year * 5 - 3;
    let mut month = temp / DAYS_PER_5_MONTHS;
    let day = (temp % DAYS_PER_5_MONTHS) / 5 + 1;

    let mut year = year;
    if month < 10 {
        month += 3;
    } else {
        year += 1;
        month -= 9;
    }

    year -= YEAR_SHIFT;
    if year <= 0 {
        year -= 1;
    }
    (narrow(year), narrow(month), narrow(day))
}

/// French Republican calendar, in use from year I to year XIV.
///
/// Month 13 holds the five or six complementary days.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrenchRepublican;

impl CalendarSystem for FrenchRepublican {
    fn kind(&self) -> CalendarKind {
        CalendarKind::FrenchRepublican
    }

    fn to_sdn(&self, year: i32, month: i32, day: i32) -> Sdn {
        if !(1..=FRENCH_MAX_YEAR).contains(&year)
            || !(1..=FRENCH_MONTHS).contains(&month)
            || !(1..=30).contains(&day)
        {
            return 0;
        }
        Sdn::from(year) * DAYS_PER_4_YEARS / 4
            + Sdn::from(month - 1) * FRENCH_DAYS_PER_MONTH
            + Sdn::from(day)
            + FRENCH_SDN_OFFSET
    }

    fn from_sdn(&self, sdn: Sdn) -> (i32, i32, i32) {
        if !(FRENCH_FIRST_VALID..=FRENCH_LAST_VALID).contains(&sdn) {
            return NO_DATE;
        }
        let temp = (sdn - FRENCH_SDN_OFFSET) * 4 - 1;
        let year = temp / DAYS_PER_4_YEARS;
        let day_of_year = (temp % DAYS_PER_4_YEARS) / 4;
        let month = day_of_year / FRENCH_DAYS_PER_MONTH + 1;
        let day = day_of_year % FRENCH_DAYS_PER_MONTH + 1;
        (narrow(year), narrow(month), narrow(day))
    }
}

/// Arithmetic Persian (Solar Hijri) calendar using the 2820 year cycle.
#[derive(Debug, Clone, Copy, Default)]
pub struct Persian;

impl CalendarSystem for Persian {
    fn kind(&self) -> CalendarKind {
        CalendarKind::Persian
    }

    fn to_sdn(&self, year: i32, month: i32, day: i32) -> Sdn {
        if out_of_range(year, month, day, 12) {
            return 0;
        }
        let year = i64::from(year);
        let epoch_base = if year >= 0 {
            year - PERSIAN_CYCLE_BASE_YEAR
        } else {
            year - PERSIAN_CYCLE_BASE_YEAR + 1
        };
        let epoch_year = PERSIAN_CYCLE_BASE_YEAR + epoch_base.rem_euclid(PERSIAN_CYCLE_YEARS);
        let month = i64::from(month);
        let month_days = if month <= 7 {
            (month - 1) * 31
        } else {
            (month - 1) * 30 + 6
        };

        Sdn::from(day)
            + month_days
            + (epoch_year * 682 - 110).div_euclid(2816)
            + (epoch_year - 1) * 365
            + epoch_base.div_euclid(PERSIAN_CYCLE_YEARS) * PERSIAN_DAYS_PER_CYCLE
            + PERSIAN_EPOCH
    }

    fn from_sdn(&self, sdn: Sdn) -> (i32, i32, i32) {
        if sdn <= PERSIAN_EPOCH || sdn > MAX_SDN {
            return NO_DATE;
        }
        let days = sdn - PERSIAN_CYCLE_START;
        let cycle = days.div_euclid(PERSIAN_DAYS_PER_CYCLE);
        let day_in_cycle = days.rem_euclid(PERSIAN_DAYS_PER_CYCLE);
        let year_in_cycle = if day_in_cycle == PERSIAN_DAYS_PER_CYCLE - 1 {
            PERSIAN_CYCLE_YEARS
        } else {
            let aux1 = day_in_cycle / 366;
            let aux2 = day_in_cycle % 366;
            (2134 * aux1 + 2816 * aux2 + 2815) / 1_028_522 + aux1 + 1
        };
        let mut year = year_in_cycle + PERSIAN_CYCLE_YEARS * cycle + PERSIAN_CYCLE_BASE_YEAR;
        if year <= 0 {
            year -= 1;
        }
        let year = narrow(year);

        let day_of_year = sdn - self.to_sdn(year, 1, 1) + 1;
        let month = if day_of_year <= PERSIAN_LONG_HALF_DAYS {
            ceil_div(day_of_year, 31)
        } else {
            ceil_div(day_of_year - 6, 30)
        };
        let month = narrow(month);
        let day = sdn - self.to_sdn(year, month, 1) + 1;
        (year, month, narrow(day))
    }
}

/// Arithmetic (tabular civil) Islamic calendar.
#[derive(Debug, Clone, Copy, Default)]
pub struct Islamic;

impl CalendarSystem for Islamic {
    fn kind(&self) -> CalendarKind {
        CalendarKind::Islamic
    }

    fn to_sdn(&self, year: i32, month: i32, day: i32) -> Sdn {
        if year < 1 || out_of_range(year, month, day, 12) || day > 30 {
            return 0;
        }
        let year = i64::from(year);
        // ceil(29.5 * (month - 1))
        let month_days = (59 * i64::from(month - 1) + 1) / 2;
        Sdn::from(day)
            + month_days
            + (year - 1) * ISLAMIC_DAYS_PER_YEAR
            + (3 + 11 * year) / 30
            + ISLAMIC_EPOCH
    }

    fn from_sdn(&self, sdn: Sdn) -> (i32, i32, i32) {
        if sdn <= ISLAMIC_EPOCH || sdn > MAX_SDN {
            return NO_DATE;
        }
        let days = sdn - ISLAMIC_EPOCH - 1;
        let year = narrow((30 * days + 10_646) / ISLAMIC_DAYS_PER_30_YEARS);
        // ceil((sdn - (29 + new_year)) / 29.5) + 1, capped at 12
        let after_first_month = sdn - 29 - self.to_sdn(year, 1, 1);
        let month = (ceil_div(2 * after_first_month, 59) + 1).min(12);
        let month = narrow(month);
        let day = sdn - self.to_sdn(year, month, 1) + 1;
        (year, month, narrow(day))
    }
}

/// Ceiling division for a positive divisor
const fn ceil_div(numerator: i64, divisor: i64) -> i64 {
    -((-numerator).div_euclid(divisor))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gregorian_known_days() {
        struct TestCase {
            ymd:         (i32, i32, i32),
            sdn:         Sdn,
            description: &'static str,
        }

        let cases = [
            TestCase {
                ymd:         (2000, 1, 1),
                sdn:         2_451_545,
                description: "J2000 epoch",
            },
            TestCase {
                ymd:         (1582, 10, 15),
                sdn:         2_299_161,
                description: "first day of the Gregorian reform",
            },
            TestCase {
                ymd:         (1858, 11, 17),
                sdn:         2_400_001,
                description: "modified julian day zero",
            },
            TestCase {
                ymd:         (-4714, 11, 24),
                sdn:         0,
                description: "julian period start (day zero)",
            },
            TestCase {
                ymd:         (-4714, 11, 25),
                sdn:         1,
                description: "first encodable day",
            },
        ];

        for case in &cases {
            let (y, m, d) = case.ymd;
            assert_eq!(Gregorian.to_sdn(y, m, d), case.sdn, "{}", case.description);
        }
    }

    #[test]
    fn test_julian_matches_gregorian_reform() {
        assert_eq!(Julian.to_sdn(1582, 10, 5), Gregorian.to_sdn(1582, 10, 15));
        assert_eq!(Julian.from_sdn(2_299_161), (1582, 10, 5));
        assert_eq!(Julian.to_sdn(1, 1, 1), 1_721_424);
        assert_eq!(Julian.from_sdn(1_721_423), (-1, 12, 31));
    }

    #[test]
    fn test_no_year_zero() {
        assert_eq!(Gregorian.to_sdn(0, 1, 1), 0);
        assert_eq!(Gregorian.from_sdn(Gregorian.to_sdn(1, 1, 1) - 1), (-1, 12, 31));
    }

    #[test]
    fn test_gregorian_rejects_out_of_range() {
        assert_eq!(Gregorian.to_sdn(2000, 13, 1), 0);
        assert_eq!(Gregorian.to_sdn(2000, 0, 1), 0);
        assert_eq!(Gregorian.to_sdn(2000, 1, 32), 0);
        assert_eq!(Gregorian.to_sdn(-5000, 1, 1), 0);
        assert_eq!(Gregorian.from_sdn(0), NO_DATE);
        assert_eq!(Gregorian.from_sdn(-10), NO_DATE);
        assert_eq!(Gregorian.from_sdn(Sdn::MAX), NO_DATE);
    }

    #[test]
    fn test_is_valid_leap_days() {
        assert!(Gregorian.is_valid(2000, 2, 29));
        assert!(!Gregorian.is_valid(1900, 2, 29));
        assert!(Julian.is_valid(1900, 2, 29));
        assert!(!Gregorian.is_valid(2001, 4, 31));
    }

    #[test]
    fn test_french_republican() {
        assert_eq!(FrenchRepublican.to_sdn(1, 1, 1), FRENCH_FIRST_VALID);
        assert_eq!(FrenchRepublican.to_sdn(1, 1, 1), Gregorian.to_sdn(1792, 9, 22));
        assert_eq!(FrenchRepublican.to_sdn(14, 13, 5), FRENCH_LAST_VALID);
        assert_eq!(FrenchRepublican.from_sdn(FRENCH_FIRST_VALID - 1), NO_DATE);
        assert_eq!(FrenchRepublican.from_sdn(FRENCH_LAST_VALID + 1), NO_DATE);
        // 18 Brumaire VIII
        assert_eq!(
            FrenchRepublican.from_sdn(Gregorian.to_sdn(1799, 11, 9)),
            (8, 2, 18)
        );
        // year III is a leap year with six complementary days
        assert!(FrenchRepublican.is_valid(3, 13, 6));
        assert!(!FrenchRepublican.is_valid(4, 13, 6));
        assert_eq!(FrenchRepublican.to_sdn(15, 1, 1), 0);
        assert_eq!(FrenchRepublican.to_sdn(1, 14, 1), 0);
    }

    #[test]
    fn test_persian() {
        assert_eq!(Persian.to_sdn(1, 1, 1), PERSIAN_EPOCH + 1);
        assert_eq!(Persian.to_sdn(1, 1, 1), Julian.to_sdn(622, 3, 19));
        assert_eq!(Persian.from_sdn(PERSIAN_EPOCH), NO_DATE);
        // Nowruz 1403
        assert_eq!(Persian.to_sdn(1403, 1, 1), Gregorian.to_sdn(2024, 3, 20));
        assert_eq!(Persian.from_sdn(Gregorian.to_sdn(2024, 3, 20)), (1403, 1, 1));
        assert!(Persian.is_valid(1403, 6, 31));
        assert!(!Persian.is_valid(1403, 7, 31));
    }

    #[test]
    fn test_islamic() {
        assert_eq!(Islamic.to_sdn(1, 1, 1), ISLAMIC_EPOCH + 1);
        assert_eq!(Islamic.to_sdn(1, 1, 1), Julian.to_sdn(622, 7, 16));
        assert_eq!(Islamic.from_sdn(ISLAMIC_EPOCH), NO_DATE);
        assert_eq!(Islamic.from_sdn(ISLAMIC_EPOCH + 1), (1, 1, 1));
        // year 2 is the first leap year of the cycle
        let new_year_2 = Islamic.to_sdn(2, 1, 1);
        assert_eq!(Islamic.from_sdn(new_year_2 - 1), (1, 12, 29));
        assert_eq!(Islamic.from_sdn(new_year_2), (2, 1, 1));
        assert_eq!(Islamic.to_sdn(3, 1, 1) - new_year_2, 355);
        // Muharram has 30 days, Safar 29
        assert!(Islamic.is_valid(1445, 1, 30));
        assert!(!Islamic.is_valid(1445, 2, 30));
        assert_eq!(Islamic.to_sdn(0, 1, 1), 0);
        assert_eq!(Islamic.to_sdn(1445, 1, 31), 0);
    }

    #[test]
    fn test_sdn_sweep_round_trip() {
        let calendars: [&dyn CalendarSystem; 4] = [&Gregorian, &Julian, &Persian, &Islamic];
        let start = Gregorian.to_sdn(1890, 1, 1);
        for calendar in calendars {
            for sdn in start..start + 3 * 366 {
                let (y, m, d) = calendar.from_sdn(sdn);
                assert_eq!(
                    calendar.to_sdn(y, m, d),
                    sdn,
                    "{:?}: sdn {sdn} decoded to {y}-{m}-{d}",
                    calendar.kind()
                );
            }
        }
    }
}
