//! Loose matching of dates against each other.
//!
//! Every structured date is widened to the span of Gregorian days it could
//! mean: unknown components open the span to the whole month or year, and
//! before, after, about and estimated dates reach out by a configurable
//! number of years. Two dates then match when their spans relate as asked.

use crate::Date;
use crate::error::DateError;
use crate::prelude::*;
use crate::types::{CalendarKind, Modifier, Quality, lookup_name};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// `(year, month, day)` bound of a date span, compared component-wise
pub type Ymd = (i32, i32, i32);

const LAST_MONTH: i32 = 12;
const LAST_DAY: i32 = 31;

/// How far, in years, the open side of a date reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Years before the day of a "before" date
    pub before_range: i32,
    /// Years after the day of an "after" date
    pub after_range:  i32,
    /// Years on each side of an "about" or estimated date
    pub about_range:  i32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            before_range: 10,
            after_range:  10,
            about_range:  10,
        }
    }
}

/// Relation asked of two date spans by [`Date::matches`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Comparison {
    /// The spans overlap; for text, one contains the other
    #[display(fmt = "=")]
    Overlap,
    /// The spans start and stop on the same days; for text, equal text
    #[display(fmt = "==")]
    Exact,
    /// Some day of this date is before some day of the other
    #[display(fmt = "<")]
    Less,
    #[display(fmt = "<=")]
    LessOrEqual,
    /// Every day of this date is before every day of the other
    #[display(fmt = "<<")]
    AllLess,
    /// Some day of this date is after some day of the other
    #[display(fmt = ">")]
    Greater,
    #[display(fmt = ">=")]
    GreaterOrEqual,
    /// Every day of this date is after every day of the other
    #[display(fmt = ">>")]
    AllGreater,
}

impl Comparison {
    pub const ALL: [Self; 8] = [
        Self::Overlap,
        Self::Exact,
        Self::Less,
        Self::LessOrEqual,
        Self::AllLess,
        Self::Greater,
        Self::GreaterOrEqual,
        Self::AllGreater,
    ];
}

impl FromStr for Comparison {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup_name(&Self::ALL, s, "comparison")
    }
}

impl Date {
    /// Earliest and latest Gregorian `(year, month, day)` this date can
    /// mean.
    ///
    /// An unknown stop takes the start; an unknown month or day opens the
    /// span to January 1 on the early side and to December 31 on the late
    /// side (the late day is not clamped to the month length). "Before"
    /// ends the day before the start, "after" begins the day after the stop,
    /// and "about" or an estimated quality widen both sides.
    pub fn get_start_stop_range(&self, config: &MatchConfig) -> (Ymd, Ymd) {
        let date = self.to_calendar(CalendarKind::Gregorian);
        let start = date.get_start_date().ymd();
        let stop = match date.get_stop_ymd() {
            (0, 0, 0) => start,
            stop => stop,
        };

        let (start_year, start_month, start_day) = start;
        let mut earliest = (start_year, start_month.max(1), start_day.max(1));
        let (stop_year, stop_month, stop_day) = stop;
        let mut latest = (
            if stop_year == 0 { start_year } else { stop_year },
            if stop_month == 0 { LAST_MONTH } else { stop_month },
            if stop_day == 0 { LAST_DAY } else { stop_day },
        );

        if self.modifier() == Modifier::Before {
            latest = day_offset(earliest, -1);
            earliest = (latest.0 - config.before_range, latest.1, latest.2);
        } else if self.modifier() == Modifier::After {
            earliest = day_offset(latest, 1);
            latest = (earliest.0 + config.after_range, earliest.1, earliest.2);
        } else if self.modifier() == Modifier::About || self.quality() == Quality::Estimated {
            earliest.0 -= config.about_range;
            latest.0 += config.about_range;
        }
        (earliest, latest)
    }

    /// [`matches_with`](Self::matches_with) using the default ranges.
    pub fn matches(&self, other: &Self, comparison: Comparison) -> bool {
        self.matches_with(other, comparison, &MatchConfig::default())
    }

    /// True when this date relates to `other` as `comparison` asks.
    ///
    /// Text-only dates only match by text: `Overlap` looks for the other
    /// text inside this one, ignoring case, and `Exact` wants equal text.
    /// Dates without a sort value never match.
    pub fn matches_with(
        &self,
        other: &Self,
        comparison: Comparison,
        config: &MatchConfig,
    ) -> bool {
        if self.is_text_only() || other.is_text_only() {
            return match comparison {
                Comparison::Overlap => self
                    .get_text()
                    .to_uppercase()
                    .contains(&other.get_text().to_uppercase()),
                Comparison::Exact => self.get_text() == other.get_text(),
                _ => false,
            };
        }
        if self.sort_value() == 0 || other.sort_value() == 0 {
            return false;
        }

        let (self_start, self_stop) = self.get_start_stop_range(config);
        let (other_start, other_stop) = other.get_start_stop_range(config);
        match comparison {
            Comparison::Overlap => self_start <= other_stop && other_start <= self_stop,
            Comparison::Exact => self_start == other_start && self_stop == other_stop,
            Comparison::Less => self_start < other_stop,
            Comparison::LessOrEqual => self_start <= other_stop,
            Comparison::AllLess => self_stop < other_start,
            Comparison::Greater => self_stop > other_start,
            Comparison::GreaterOrEqual => self_stop >= other_start,
            Comparison::AllGreater => self_start > other_stop,
        }
    }
}

/// Gregorian day `days` away from `(year, month, day)`; a day past the end
/// of its month counts on into the next one.
fn day_offset((year, month, day): Ymd, days: i64) -> Ymd {
    let gregorian = CalendarKind::Gregorian.system();
    gregorian.from_sdn(gregorian.to_sdn(year, month, day) + days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DateValue;

    fn date(quality: Quality, modifier: Modifier, value: impl Into<DateValue>) -> Date {
        let mut date = Date::new();
        date.set(quality, modifier, CalendarKind::Gregorian, value, None);
        date
    }

    fn plain(modifier: Modifier, value: impl Into<DateValue>) -> Date {
        date(Quality::None, modifier, value)
    }

    fn text(text: &str) -> Date {
        let mut date = Date::new();
        date.set_as_text(text);
        date
    }

    #[test]
    fn test_start_stop_range_cases() {
        struct TestCase {
            date:        Date,
            expected:    (Ymd, Ymd),
            description: &'static str,
        }

        let cases = [
            TestCase {
                date:        plain(Modifier::None, (15, 3, 1990, false)),
                expected:    ((1990, 3, 15), (1990, 3, 15)),
                description: "exact day",
            },
            TestCase {
                date:        plain(Modifier::None, (0, 0, 1990, false)),
                expected:    ((1990, 1, 1), (1990, 12, 31)),
                description: "year only",
            },
            TestCase {
                date:        plain(Modifier::None, (0, 2, 1990, false)),
                expected:    ((1990, 2, 1), (1990, 2, 31)),
                description: "month only keeps day 31",
            },
            TestCase {
                date:        plain(Modifier::Before, (1, 1, 1990, false)),
                expected:    ((1979, 12, 31), (1989, 12, 31)),
                description: "before",
            },
            TestCase {
                date:        plain(Modifier::After, (0, 0, 1990, false)),
                expected:    ((1991, 1, 1), (2001, 1, 1)),
                description: "after a year",
            },
            TestCase {
                date:        plain(Modifier::About, (15, 3, 1990, false)),
                expected:    ((1980, 3, 15), (2000, 3, 15)),
                description: "about",
            },
            TestCase {
                date:        date(Quality::Estimated, Modifier::None, (0, 0, 1990, false)),
                expected:    ((1980, 1, 1), (2000, 12, 31)),
                description: "estimated",
            },
            TestCase {
                date:        plain(Modifier::Range, (0, 0, 1990, false, 0, 6, 1995, false)),
                expected:    ((1990, 1, 1), (1995, 6, 31)),
                description: "range",
            },
            TestCase {
                date:        plain(Modifier::Span, (1, 5, 1990, false)),
                expected:    ((1990, 5, 1), (1990, 5, 1)),
                description: "span without stop",
            },
        ];

        for case in &cases {
            assert_eq!(
                case.date.get_start_stop_range(&MatchConfig::default()),
                case.expected,
                "{}",
                case.description
            );
        }
    }

    #[test]
    fn test_start_stop_range_is_gregorian() {
        let mut date = Date::new();
        date.set(
            Quality::None,
            Modifier::None,
            CalendarKind::Julian,
            (19, 12, 1999, false),
            None,
        );
        assert_eq!(
            date.get_start_stop_range(&MatchConfig::default()),
            ((2000, 1, 1), (2000, 1, 1))
        );
    }

    #[test]
    fn test_config_changes_reach() {
        let config = MatchConfig {
            before_range: 1,
            after_range:  2,
            about_range:  3,
        };
        let about = plain(Modifier::About, (0, 0, 1900, false));
        assert_eq!(about.get_start_stop_range(&config), ((1897, 1, 1), (1903, 12, 31)));
        let before = plain(Modifier::Before, (0, 0, 1900, false));
        assert_eq!(before.get_start_stop_range(&config), ((1898, 12, 31), (1899, 12, 31)));
        let after = plain(Modifier::After, (0, 0, 1900, false));
        assert_eq!(after.get_start_stop_range(&config), ((1901, 1, 1), (1903, 1, 1)));
    }

    #[test]
    fn test_matches_cases() {
        struct TestCase {
            a:           Date,
            b:           Date,
            comparison:  Comparison,
            expected:    bool,
            description: &'static str,
        }

        let year = |year: i32| plain(Modifier::None, (0, 0, year, false));
        let day = |day: i32, month: i32, year: i32| plain(Modifier::None, (day, month, year, false));

        let cases = [
            TestCase {
                a:           year(1990),
                b:           day(15, 6, 1990),
                comparison:  Comparison::Overlap,
                expected:    true,
                description: "day inside year",
            },
            TestCase {
                a:           year(1990),
                b:           year(1991),
                comparison:  Comparison::Overlap,
                expected:    false,
                description: "neighbouring years",
            },
            TestCase {
                a:           plain(Modifier::About, (0, 0, 1990, false)),
                b:           year(2000),
                comparison:  Comparison::Overlap,
                expected:    true,
                description: "about reaches ten years",
            },
            TestCase {
                a:           plain(Modifier::Before, (1, 1, 1990, false)),
                b:           year(1990),
                comparison:  Comparison::Overlap,
                expected:    false,
                description: "before excludes its own day",
            },
            TestCase {
                a:           year(1990),
                b:           day(1, 1, 1990),
                comparison:  Comparison::Exact,
                expected:    false,
                description: "exact needs equal spans",
            },
            TestCase {
                a:           day(1, 1, 1990),
                b:           day(1, 1, 1990),
                comparison:  Comparison::Exact,
                expected:    true,
                description: "exact same day",
            },
            TestCase {
                a:           year(1990),
                b:           day(1, 1, 1990),
                comparison:  Comparison::Less,
                expected:    false,
                description: "any less: same first day",
            },
            TestCase {
                a:           year(1990),
                b:           day(1, 1, 1990),
                comparison:  Comparison::LessOrEqual,
                expected:    true,
                description: "any less or equal: same first day",
            },
            TestCase {
                a:           year(1990),
                b:           day(15, 6, 1990),
                comparison:  Comparison::AllLess,
                expected:    false,
                description: "all less: overlapping",
            },
            TestCase {
                a:           year(1989),
                b:           day(15, 6, 1990),
                comparison:  Comparison::AllLess,
                expected:    true,
                description: "all less: earlier year",
            },
            TestCase {
                a:           year(1990),
                b:           day(31, 12, 1990),
                comparison:  Comparison::Greater,
                expected:    false,
                description: "any greater: same last day",
            },
            TestCase {
                a:           year(1990),
                b:           day(31, 12, 1990),
                comparison:  Comparison::GreaterOrEqual,
                expected:    true,
                description: "any greater or equal: same last day",
            },
            TestCase {
                a:           year(1991),
                b:           day(31, 12, 1990),
                comparison:  Comparison::AllGreater,
                expected:    true,
                description: "all greater",
            },
            TestCase {
                a:           text("about 1850 or so"),
                b:           text("1850"),
                comparison:  Comparison::Overlap,
                expected:    true,
                description: "text contains text",
            },
            TestCase {
                a:           text("Spring"),
                b:           text("SPRING"),
                comparison:  Comparison::Exact,
                expected:    false,
                description: "exact text is case sensitive",
            },
            TestCase {
                a:           text("1850"),
                b:           year(1850),
                comparison:  Comparison::Less,
                expected:    false,
                description: "text never orders",
            },
        ];

        for case in &cases {
            assert_eq!(
                case.a.matches(&case.b, case.comparison),
                case.expected,
                "{}",
                case.description
            );
        }
    }

    #[test]
    fn test_unmapped_date_never_matches() {
        let mut bad = Date::new();
        bad.set(
            Quality::None,
            Modifier::None,
            CalendarKind::Hebrew,
            (31, 1, 5784, false),
            None,
        );
        assert_eq!(bad.sort_value(), 0);
        let year = plain(Modifier::None, (0, 0, 1990, false));
        for comparison in Comparison::ALL {
            assert!(!bad.matches(&year, comparison), "{comparison}");
            assert!(!year.matches(&bad, comparison), "{comparison}");
        }
    }

    #[test]
    fn test_comparison_from_str() {
        for comparison in Comparison::ALL {
            assert_eq!(comparison.to_string().parse(), Ok(comparison));
        }
        assert_eq!(" << ".parse(), Ok(Comparison::AllLess));
        assert_eq!(
            "=<".parse::<Comparison>(),
            Err(DateError::UnknownName {
                kind: "comparison",
                name: "=<".to_owned(),
            })
        );
    }

    #[test]
    fn test_config_serde_defaults() {
        let config: MatchConfig = serde_json::from_str(r#"{"about_range": 5}"#).unwrap();
        assert_eq!(
            config,
            MatchConfig {
                about_range: 5,
                ..MatchConfig::default()
            }
        );
    }
}
