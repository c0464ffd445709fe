use std::ops::RangeInclusive;

/// Production years covered by both 1980s schemes
pub const EARLY_1980_YEARS: RangeInclusive<u16> = 1980..=1989;

/// Production years accepted when generating a 1990s code from an explicit year
pub const CODE_1990_YEARS: RangeInclusive<u16> = 1990..=2005;

/// Production years accepted when generating a 1990s code from a calendar date
/// and when decoding a 1990s code. Note the extra year compared to
/// [`CODE_1990_YEARS`].
pub const CODE_1990_DATE_YEARS: RangeInclusive<u16> = 1990..=2006;

/// First valid month (January)
pub const MIN_MONTH: u8 = 1;

/// Last valid month (December)
pub const MAX_MONTH: u8 = 12;

/// Length of a factory location code
pub const LOCATION_CODE_LEN: usize = 2;

/// Number of leading characters holding the year in the 1980s schemes
pub(crate) const YEAR_DIGITS: usize = 2;

/// Accepted lengths of an early-1980s code (`YYM` or `YYMM`)
pub const EARLY_1980_CODE_LEN: RangeInclusive<usize> = 3..=4;

/// Accepted lengths of a late-1980s code (`YYMLL` or `YYMMLL`)
pub const LATE_1980_CODE_LEN: RangeInclusive<usize> = 5..=6;

/// Exact length of a 1990s code (`LLMYMY`)
pub const CODE_1990_LEN: usize = 6;

/// Century prefix for two-digit years in the 1900s
pub(crate) const CENTURY_1900: u16 = 1900;
/// Century prefix for two-digit years in the 2000s
pub(crate) const CENTURY_2000: u16 = 2000;

/// Two-digit year remainder
pub(crate) const YEARS_PER_CENTURY: u16 = 100;

/// Every production year some scheme can encode
pub(crate) const PRODUCTION_YEARS: RangeInclusive<u16> = 1980..=2006;
