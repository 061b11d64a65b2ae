/// Serial day number: the linear day count shared by every calendar
pub type Sdn = i64;

/// Largest serial day number any calendar will decode
pub const MAX_SDN: Sdn = i32::MAX as Sdn;

/// Value stored in a date component that is not known
pub const UNKNOWN: i32 = 0;

/// Component substituted for an unknown one when deriving a sort value
pub const MIN_COMPONENT: i32 = 1;

/// Days in a week, used for day-of-week arithmetic on serial day numbers
pub const DAYS_PER_WEEK: Sdn = 7;

// Gregorian and Julian day-count arithmetic

/// Gregorian offset between the March-based day count and the serial day number
pub(crate) const GREGORIAN_SDN_OFFSET: Sdn = 32045;
/// Julian offset between the March-based day count and the serial day number
pub(crate) const JULIAN_SDN_OFFSET: Sdn = 32083;
/// Days in five consecutive months starting from March
pub(crate) const DAYS_PER_5_MONTHS: Sdn = 153;
/// Days in a four year Julian leap cycle
pub(crate) const DAYS_PER_4_YEARS: Sdn = 1461;
/// Days in the 400 year Gregorian cycle
pub(crate) const DAYS_PER_400_YEARS: Sdn = 146_097;
/// Year shift that keeps the day-count arithmetic positive back to 4714 BC
pub(crate) const YEAR_SHIFT: i64 = 4800;
/// Earliest year the Gregorian and Julian engines accept
pub const MIN_JULIAN_PERIOD_YEAR: i32 = -4714;

// French Republican

/// Offset between the French Republican day count and the serial day number
pub(crate) const FRENCH_SDN_OFFSET: Sdn = 2_375_474;
/// 1 Vendemiaire I (22 September 1792)
pub const FRENCH_FIRST_VALID: Sdn = 2_375_840;
/// 5 jour complementaire XIV, the last day the calendar was in use
pub const FRENCH_LAST_VALID: Sdn = 2_380_952;
/// Last year of the French Republican calendar
pub const FRENCH_MAX_YEAR: i32 = 14;
/// Twelve 30-day months plus the complementary days
pub const FRENCH_MONTHS: i32 = 13;
/// Length of every regular French Republican month
pub(crate) const FRENCH_DAYS_PER_MONTH: Sdn = 30;

// Persian (arithmetic 2820-year cycle)

/// Day before 1 Farvardin 1 AP
pub const PERSIAN_EPOCH: Sdn = 1_948_320;
/// 1 Farvardin 475 AP, the start of the 2820 year grand cycle used for decoding
pub(crate) const PERSIAN_CYCLE_START: Sdn = 2_121_446;
/// Days in the 2820 year grand cycle
pub(crate) const PERSIAN_DAYS_PER_CYCLE: Sdn = 1_029_983;
/// Years in the grand cycle
pub(crate) const PERSIAN_CYCLE_YEARS: i64 = 2820;
/// Year the grand cycles are counted from
pub(crate) const PERSIAN_CYCLE_BASE_YEAR: i64 = 474;
/// Months one to six have 31 days, so day 186 ends the long half of the year
pub(crate) const PERSIAN_LONG_HALF_DAYS: Sdn = 186;

// Islamic (arithmetic civil calendar)

/// Day before 1 Muharram 1 AH (16 July 622 Julian)
pub const ISLAMIC_EPOCH: Sdn = 1_948_439;
/// Days in a common Islamic year
pub(crate) const ISLAMIC_DAYS_PER_YEAR: Sdn = 354;
/// Days in the thirty year intercalation cycle
pub(crate) const ISLAMIC_DAYS_PER_30_YEARS: Sdn = 10_631;

// Hebrew

/// Subdivisions of an hour used for molad arithmetic
pub const HALAKIM_PER_HOUR: i64 = 1080;
/// Halakim in one day
pub const HALAKIM_PER_DAY: i64 = 24 * HALAKIM_PER_HOUR;
/// One mean synodic month
pub const HALAKIM_PER_LUNAR_CYCLE: i64 = 29 * HALAKIM_PER_DAY + 13753;
/// 235 lunar months, which is 19 solar years
pub const HALAKIM_PER_METONIC_CYCLE: i64 = HALAKIM_PER_LUNAR_CYCLE * (12 * 19 + 7);
/// Serial day number of the Hebrew epoch; decoding at or before it yields no date
pub const HEBREW_SDN_OFFSET: Sdn = 347_997;
/// Halakim from the epoch to the first molad after creation
pub const NEW_MOON_OF_CREATION: i64 = 31524;
/// Years in a metonic cycle
pub const METONIC_YEARS: i64 = 19;

pub(crate) const SUNDAY: i64 = 0;
pub(crate) const MONDAY: i64 = 1;
pub(crate) const TUESDAY: i64 = 2;
pub(crate) const WEDNESDAY: i64 = 3;
pub(crate) const FRIDAY: i64 = 5;

/// Molad at or after noon postpones the new year
pub(crate) const NOON: i64 = 18 * HALAKIM_PER_HOUR;
/// 3:11:20 AM Tuesday threshold for common years
pub(crate) const AM3_11_20: i64 = 9 * HALAKIM_PER_HOUR + 204;
/// 9:32:43 AM Monday threshold after a leap year
pub(crate) const AM9_32_43: i64 = 15 * HALAKIM_PER_HOUR + 589;

/// Months in each year of the metonic cycle (index is the year within the cycle)
pub const HEBREW_MONTHS_PER_YEAR: [i64; 19] = [
    12, 12, 13, 12, 12, 13, 12, 13, 12, 12, 13, 12, 12, 13, 12, 12, 13, 12, 13,
];

/// Lunar months elapsed from the start of the cycle to Tishri of each year
pub const HEBREW_YEAR_OFFSET: [i64; 19] = [
    0, 12, 24, 37, 49, 61, 74, 86, 99, 111, 123, 136, 148, 160, 173, 185, 197, 210, 222,
];

/// Hebrew month names in engine order (Tishri is month 1)
pub const HEBREW_MONTH_NAMES: [&str; 13] = [
    "Tishri", "Heshvan", "Kislev", "Tevet", "Shevat", "AdarI", "AdarII", "Nisan", "Iyyar",
    "Sivan", "Tammuz", "Av", "Elul",
];

/// Abbreviations accepted when matching Hebrew month names
pub const HEBREW_MONTH_ABBREVS: [(&str, i32); 26] = [
    ("tsh", 1),
    ("tishri", 1),
    ("csh", 2),
    ("heshvan", 2),
    ("ksl", 3),
    ("kislev", 3),
    ("tvt", 4),
    ("tevet", 4),
    ("shv", 5),
    ("shevat", 5),
    ("adr", 6),
    ("adari", 6),
    ("ads", 7),
    ("adarii", 7),
    ("nsn", 8),
    ("nisan", 8),
    ("iyr", 9),
    ("iyyar", 9),
    ("svn", 10),
    ("sivan", 10),
    ("tmz", 11),
    ("tammuz", 11),
    ("aav", 12),
    ("av", 12),
    ("ell", 13),
    ("elul", 13),
];
