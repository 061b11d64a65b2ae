//! Hebrew (Jewish) calendar.
//!
//! The year starts at Tishri 1, which is derived from the molad (mean lunar
//! conjunction) of Tishri and four postponement rules. Molad times are
//! counted in halakim (1/1080 hour). Years follow a 19 year metonic cycle in
//! which seven years have a thirteenth month.
//!
//! Months are numbered from Tishri: 1 Tishri, 2 Heshvan, 3 Kislev, 4 Tevet,
//! 5 Shevat, 6 Adar I, 7 Adar II (plain Adar in common years), 8 Nisan,
//! 9 Iyyar, 10 Sivan, 11 Tammuz, 12 Av, 13 Elul. Month 6 only exists in
//! leap years.
//!
//! Day numbers handled here are relative to [`HEBREW_SDN_OFFSET`].

use crate::calendar::{CalendarSystem, NO_DATE, narrow};
use crate::consts::{
    AM3_11_20, AM9_32_43, FRIDAY, HALAKIM_PER_DAY, HALAKIM_PER_LUNAR_CYCLE,
    HALAKIM_PER_METONIC_CYCLE, HEBREW_MONTH_ABBREVS, HEBREW_MONTH_NAMES, HEBREW_MONTHS_PER_YEAR,
    HEBREW_SDN_OFFSET, HEBREW_YEAR_OFFSET, MAX_SDN, METONIC_YEARS, MONDAY, NEW_MOON_OF_CREATION,
    NOON, SUNDAY, TUESDAY, WEDNESDAY, Sdn,
};
use crate::types::CalendarKind;

/// Estimated days per metonic cycle (6939.69, rounded up)
const DAYS_PER_METONIC_CYCLE_ESTIMATE: i64 = 6940;
/// Slack added to the cycle estimate so it never overshoots
const CYCLE_ESTIMATE_SLACK: i64 = 310;

/// The moment of a molad: whole days since the epoch plus halakim into the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Molad {
    day:     i64,
    halakim: i64,
}

impl Molad {
    /// Adds `months` lunar cycles, carrying whole days out of the halakim
    const fn add_months(self, months: i64) -> Self {
        let halakim = self.halakim + HALAKIM_PER_LUNAR_CYCLE * months;
        Self {
            day:     self.day + halakim / HALAKIM_PER_DAY,
            halakim: halakim % HALAKIM_PER_DAY,
        }
    }

    /// Adds one full metonic cycle
    const fn add_cycle(self) -> Self {
        let halakim = self.halakim + HALAKIM_PER_METONIC_CYCLE;
        Self {
            day:     self.day + halakim / HALAKIM_PER_DAY,
            halakim: halakim % HALAKIM_PER_DAY,
        }
    }
}

/// Position of a year inside the metonic cycles, with its Tishri molad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct YearStart {
    cycle:         i64,
    year_in_cycle: i64,
    molad:         Molad,
}

impl YearStart {
    /// Day of Tishri 1 after the postponement rules
    const fn tishri1(&self) -> i64 {
        tishri1(self.year_in_cycle, self.molad)
    }

    /// Tishri 1 of the following year
    fn next_tishri1(&self) -> i64 {
        let molad = self.molad.add_months(months_in_cycle_year(self.year_in_cycle));
        tishri1((self.year_in_cycle + 1) % METONIC_YEARS, molad)
    }
}

fn months_in_cycle_year(year_in_cycle: i64) -> i64 {
    usize::try_from(year_in_cycle)
        .ok()
        .and_then(|index| HEBREW_MONTHS_PER_YEAR.get(index))
        .copied()
        .unwrap_or(12)
}

fn year_offset(year_in_cycle: i64) -> i64 {
    usize::try_from(year_in_cycle)
        .ok()
        .and_then(|index| HEBREW_YEAR_OFFSET.get(index))
        .copied()
        .unwrap_or_default()
}

const fn is_leap_cycle_year(year_in_cycle: i64) -> bool {
    matches!(year_in_cycle, 2 | 5 | 7 | 10 | 13 | 16 | 18)
}

/// Years that directly follow a leap year of the cycle
const fn follows_leap_cycle_year(year_in_cycle: i64) -> bool {
    matches!(year_in_cycle, 0 | 3 | 6 | 8 | 11 | 14 | 17)
}

/// Applies the postponement rules (dehiyyot) to the molad of Tishri.
const fn tishri1(year_in_cycle: i64, molad: Molad) -> i64 {
    let mut tishri1 = molad.day;
    let mut dow = tishri1 % 7;
    let leap_year = is_leap_cycle_year(year_in_cycle);
    let last_was_leap_year = follows_leap_cycle_year(year_in_cycle);

    // Rules 2, 3 and 4
    if molad.halakim >= NOON
        || (!leap_year && dow == TUESDAY && molad.halakim >= AM3_11_20)
        || (last_was_leap_year && dow == MONDAY && molad.halakim >= AM9_32_43)
    {
        tishri1 += 1;
        dow = (dow + 1) % 7;
    }
    // Rule 1 runs last because it can add a second day of delay
    if dow == WEDNESDAY || dow == FRIDAY || dow == SUNDAY {
        tishri1 += 1;
    }
    tishri1
}

/// Molad at the start of a metonic cycle.
///
/// The product needs more than 32 bits; `i64` holds it for any cycle
/// reachable from an `i32` year.
const fn molad_of_metonic_cycle(cycle: i64) -> Molad {
    let total = NEW_MOON_OF_CREATION + cycle * HALAKIM_PER_METONIC_CYCLE;
    Molad {
        day:     total / HALAKIM_PER_DAY,
        halakim: total % HALAKIM_PER_DAY,
    }
}

/// Finds the molad of the Tishri closest to `input_day`.
fn tishri_molad(input_day: i64) -> YearStart {
    // Never an overestimate: a cycle is 6939.69 days, not 6940
    let mut cycle = (input_day + CYCLE_ESTIMATE_SLACK) / DAYS_PER_METONIC_CYCLE_ESTIMATE;
    let mut molad = molad_of_metonic_cycle(cycle);

    while molad.day < input_day - DAYS_PER_METONIC_CYCLE_ESTIMATE + CYCLE_ESTIMATE_SLACK {
        cycle += 1;
        molad = molad.add_cycle();
    }

    let mut year_in_cycle = 0;
    while year_in_cycle < METONIC_YEARS - 1 {
        if molad.day > input_day - 74 {
            break;
        }
        molad = molad.add_months(months_in_cycle_year(year_in_cycle));
        year_in_cycle += 1;
    }

    YearStart {
        cycle,
        year_in_cycle,
        molad,
    }
}

/// Cycle position and Tishri molad of a Hebrew year (year 1 is the first).
fn start_of_year(year: i64) -> YearStart {
    let cycle = (year - 1) / METONIC_YEARS;
    let year_in_cycle = (year - 1) % METONIC_YEARS;
    let molad = molad_of_metonic_cycle(cycle).add_months(year_offset(year_in_cycle));
    YearStart {
        cycle,
        year_in_cycle,
        molad,
    }
}

/// True for years with thirteen months
pub const fn is_leap_year(year: i32) -> bool {
    if year < 1 {
        return false;
    }
    is_leap_cycle_year((year as i64 - 1) % METONIC_YEARS)
}

/// 12 or 13
pub const fn months_in_year(year: i32) -> i32 {
    if is_leap_year(year) { 13 } else { 12 }
}

/// Days from Tishri 1 of `year` to Tishri 1 of the next year:
/// 353, 354 or 355 for common years, 383, 384 or 385 for leap years.
/// Returns 0 for years before year 1.
pub fn year_length(year: i32) -> i32 {
    if year < 1 {
        return 0;
    }
    let start = start_of_year(i64::from(year));
    narrow(start.next_tishri1() - start.tishri1())
}

/// Long years give Heshvan 30 days
const fn is_long_year(length: i64) -> bool {
    length == 355 || length == 385
}

/// Name of a month in engine numbering (1 is Tishri)
pub fn month_name(month: i32) -> Option<&'static str> {
    usize::try_from(month - 1)
        .ok()
        .and_then(|index| HEBREW_MONTH_NAMES.get(index))
        .copied()
}

/// Month number for a full or abbreviated month name, ignoring case
pub fn month_from_abbrev(text: &str) -> Option<i32> {
    let wanted = text.trim().to_ascii_lowercase();
    HEBREW_MONTH_ABBREVS
        .iter()
        .find(|(abbrev, _)| *abbrev == wanted)
        .map(|&(_, month)| month)
}

/// The Hebrew calendar engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hebrew;

impl Hebrew {
    /// Month and day for a day on or after Tishri 1 of its year, given the
    /// Tishri 1 of the following year.
    fn early_months(input_day: i64, tishri1: i64, tishri1_after: i64) -> (i64, i64) {
        let year_length = tishri1_after - tishri1;
        let mut day = input_day - tishri1 - 29;
        let heshvan_days = if is_long_year(year_length) { 30 } else { 29 };
        if day <= heshvan_days {
            return (2, day);
        }
        day -= heshvan_days;
        (3, day)
    }
}

impl CalendarSystem for Hebrew {
    fn kind(&self) -> CalendarKind {
        CalendarKind::Hebrew
    }

    fn to_sdn(&self, year: i32, month: i32, day: i32) -> Sdn {
        if year <= 0 || day <= 0 || day > 30 {
            return 0;
        }
        let year = i64::from(year);
        let day = i64::from(day);

        let sdn = match month {
            1 | 2 => {
                // Tishri and Heshvan need only this year's start
                let tishri1 = start_of_year(year).tishri1();
                if month == 1 {
                    tishri1 + day - 1
                } else {
                    tishri1 + day + 29
                }
            },
            3 => {
                // Kislev depends on the length of Heshvan
                let start = start_of_year(year);
                let tishri1 = start.tishri1();
                let year_length = start.next_tishri1() - tishri1;
                if is_long_year(year_length) {
                    tishri1 + day + 59
                } else {
                    tishri1 + day + 58
                }
            },
            4..=6 => {
                // Tevet, Shevat and Adar I count back from next year
                let tishri1_after = start_of_year(year + 1).tishri1();
                let length_of_adar_i_and_ii =
                    if months_in_cycle_year((year - 1) % METONIC_YEARS) == 12 {
                        29
                    } else {
                        59
                    };
                let back = match month {
                    4 => 237,
                    5 => 208,
                    _ => 178,
                };
                tishri1_after + day - length_of_adar_i_and_ii - back
            },
            7..=13 => {
                let tishri1_after = start_of_year(year + 1).tishri1();
                let back = match month {
                    7 => 207,
                    8 => 178,
                    9 => 148,
                    10 => 119,
                    11 => 89,
                    12 => 60,
                    _ => 30,
                };
                tishri1_after + day - back
            },
            _ => return 0,
        };
        sdn + HEBREW_SDN_OFFSET
    }

    fn from_sdn(&self, sdn: Sdn) -> (i32, i32, i32) {
        if sdn <= HEBREW_SDN_OFFSET || sdn > MAX_SDN {
            return NO_DATE;
        }
        let input_day = sdn - HEBREW_SDN_OFFSET;

        let found = tishri_molad(input_day);
        let mut tishri1 = found.tishri1();

        let (year, tishri1_after) = if input_day >= tishri1 {
            // Tishri 1 found at the start of the year
            let year = found.cycle * METONIC_YEARS + found.year_in_cycle + 1;
            if input_day < tishri1 + 30 {
                return (narrow(year), 1, narrow(input_day - tishri1 + 1));
            }
            if input_day < tishri1 + 59 {
                return (narrow(year), 2, narrow(input_day - tishri1 - 29));
            }
            (year, found.next_tishri1())
        } else {
            // Tishri 1 found at the end of the year
            let year = found.cycle * METONIC_YEARS + found.year_in_cycle;
            if input_day >= tishri1 - 177 {
                // One of the last six months
                let (month, offset) = if input_day > tishri1 - 30 {
                    (13, 30)
                } else if input_day > tishri1 - 60 {
                    (12, 60)
                } else if input_day > tishri1 - 89 {
                    (11, 89)
                } else if input_day > tishri1 - 119 {
                    (10, 119)
                } else if input_day > tishri1 - 148 {
                    (9, 148)
                } else {
                    (8, 178)
                };
                return (narrow(year), month, narrow(input_day - tishri1 + offset));
            }

            // Walk back through Adar II, Adar I, Shevat and Tevet
            let mut month = 7;
            let mut day = input_day - tishri1 + 207;
            if day > 0 {
                return (narrow(year), month, narrow(day));
            }
            if months_in_cycle_year((year - 1) % METONIC_YEARS) == 13 {
                month -= 1;
                day += 30;
                if day > 0 {
                    return (narrow(year), month, narrow(day));
                }
                month -= 1;
            } else {
                month -= 2;
            }
            day += 30;
            if day > 0 {
                return (narrow(year), month, narrow(day));
            }
            month -= 1;
            day += 29;
            if day > 0 {
                return (narrow(year), month, narrow(day));
            }

            // Heshvan or Kislev: the year length is needed
            let tishri1_after = tishri1;
            tishri1 = tishri_molad(found.molad.day - 365).tishri1();
            (year, tishri1_after)
        };

        let (month, day) = Self::early_months(input_day, tishri1, tishri1_after);
        (narrow(year), narrow(month), narrow(day))
    }
}
