//! Encoding of production dates into date codes.
//!
//! Every scheme has an explicit `(year, month)` form and a `_from_date` form
//! taking any [`chrono::Datelike`] value. The date forms only read the year and
//! month, then go through the same validation as the explicit forms.

use std::ops::RangeInclusive;

use chrono::Datelike;

use crate::consts::{
    CODE_1990_DATE_YEARS, CODE_1990_YEARS, EARLY_1980_YEARS, MAX_MONTH, MIN_MONTH,
    YEARS_PER_CENTURY,
};
use crate::{DateCodeError, LocationCode, Month};

/// Checks a production year/month against a scheme's year window.
fn validate_production(
    years: &RangeInclusive<u16>,
    year: i64,
    month: i64,
) -> Result<(u16, Month), DateCodeError> {
    let year = u16::try_from(year)
        .ok()
        .filter(|y| years.contains(y))
        .ok_or(DateCodeError::OutOfRange {
            field: "year",
            value: year,
            min: *years.start(),
            max: *years.end(),
        })?;
    let month = u8::try_from(month)
        .map_err(|_| DateCodeError::OutOfRange {
            field: "month",
            value: month,
            min: u16::from(MIN_MONTH),
            max: u16::from(MAX_MONTH),
        })
        .and_then(Month::new)?;
    Ok((year, month))
}

fn date_parts(date: &impl Datelike) -> (i64, i64) {
    (i64::from(date.year()), i64::from(date.month()))
}

pub(crate) fn encode_early_1980(year: u16, month: Month) -> String {
    format!("{}{}", year % YEARS_PER_CENTURY, month)
}

pub(crate) fn encode_late_1980(location: &LocationCode, year: u16, month: Month) -> String {
    format!("{}{}{}", year % YEARS_PER_CENTURY, month, location)
}

/// Location code followed by the month and year digits interleaved.
pub(crate) fn encode_1990(location: &LocationCode, year: u16, month: Month) -> String {
    let year = format!("{:02}", year % YEARS_PER_CENTURY);
    let month = format!("{:02}", month.get());
    let mut code = String::with_capacity(location.len() + year.len() + month.len());
    code.push_str(location);
    for (m, y) in month.chars().zip(year.chars()) {
        code.push(m);
        code.push(y);
    }
    code
}

/// Generates an early-1980s code: two-digit year followed by the month,
/// neither zero-padded (`1980-01` is `"801"`).
///
/// # Errors
/// Returns `DateCodeError::OutOfRange` if the year is outside 1980..=1989 or
/// the month outside 1..=12.
pub fn generate_early_1980(year: u16, month: u8) -> Result<String, DateCodeError> {
    let (year, month) = validate_production(&EARLY_1980_YEARS, year.into(), month.into())?;
    Ok(encode_early_1980(year, month))
}

/// Calendar-date form of [`generate_early_1980`]; the day is ignored.
///
/// # Errors
/// Returns `DateCodeError::OutOfRange` if the year is outside 1980..=1989.
pub fn generate_early_1980_from_date(date: &impl Datelike) -> Result<String, DateCodeError> {
    let (year, month) = date_parts(date);
    let (year, month) = validate_production(&EARLY_1980_YEARS, year, month)?;
    Ok(encode_early_1980(year, month))
}

/// Generates a late-1980s code: two-digit year, month, then the uppercased
/// location code (`("bc", 1987, 1)` is `"871BC"`).
///
/// # Errors
/// - `DateCodeError::OutOfRange` for a year outside 1980..=1989 or a month outside 1..=12.
/// - `DateCodeError::MissingArgument` for an empty location code.
/// - `DateCodeError::InvalidFormat` for a location code that isn't two letters.
pub fn generate_late_1980(location: &str, year: u16, month: u8) -> Result<String, DateCodeError> {
    let (year, month) = validate_production(&EARLY_1980_YEARS, year.into(), month.into())?;
    let location = LocationCode::new(location)?;
    Ok(encode_late_1980(&location, year, month))
}

/// Calendar-date form of [`generate_late_1980`]; the day is ignored.
///
/// # Errors
/// Same conditions as [`generate_late_1980`].
pub fn generate_late_1980_from_date(
    location: &str,
    date: &impl Datelike,
) -> Result<String, DateCodeError> {
    let (year, month) = date_parts(date);
    let (year, month) = validate_production(&EARLY_1980_YEARS, year, month)?;
    let location = LocationCode::new(location)?;
    Ok(encode_late_1980(&location, year, month))
}

/// Generates a 1990s code: uppercased location code, then the zero-padded
/// month and year digits interleaved as month, year, month, year
/// (`("th", 1990, 1)` is `"TH0910"`).
///
/// Accepts years 1990..=2005. The calendar-date form also accepts 2006.
///
/// # Errors
/// - `DateCodeError::OutOfRange` for a year outside 1990..=2005 or a month outside 1..=12.
/// - `DateCodeError::MissingArgument` for an empty location code.
/// - `DateCodeError::InvalidFormat` for a location code that isn't two letters.
pub fn generate_1990(location: &str, year: u16, month: u8) -> Result<String, DateCodeError> {
    let (year, month) = validate_production(&CODE_1990_YEARS, year.into(), month.into())?;
    let location = LocationCode::new(location)?;
    Ok(encode_1990(&location, year, month))
}

/// Calendar-date form of [`generate_1990`]; the day is ignored. Unlike the
/// explicit form, 2006 is accepted.
///
/// # Errors
/// Same conditions as [`generate_1990`], with 1990..=2006 as the year window.
pub fn generate_1990_from_date(
    location: &str,
    date: &impl Datelike,
) -> Result<String, DateCodeError> {
    let (year, month) = date_parts(date);
    let (year, month) = validate_production(&CODE_1990_DATE_YEARS, year, month)?;
    let location = LocationCode::new(location)?;
    Ok(encode_1990(&location, year, month))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(year: i32, month: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, 1).unwrap()
    }

    fn is_out_of_range(result: &Result<String, DateCodeError>, field: &str) -> bool {
        matches!(result, Err(DateCodeError::OutOfRange { field: f, .. }) if *f == field)
    }

    #[test]
    fn test_early_1980_valid() {
        let cases = [
            (1980, 1, "801"),
            (1980, 12, "8012"),
            (1983, 6, "836"),
            (1986, 1, "861"),
            (1986, 12, "8612"),
        ];
        for (year, month, expected) in cases {
            assert_eq!(generate_early_1980(year, month).unwrap(), expected);
            assert_eq!(
                generate_early_1980_from_date(&date(year.into(), month.into())).unwrap(),
                expected
            );
        }
    }

    #[test]
    fn test_early_1980_out_of_range() {
        assert!(is_out_of_range(&generate_early_1980(1979, 1), "year"));
        assert!(is_out_of_range(&generate_early_1980(1990, 1), "year"));
        assert!(is_out_of_range(&generate_early_1980(1980, 13), "month"));
        assert!(is_out_of_range(&generate_early_1980(1980, 0), "month"));

        assert!(is_out_of_range(&generate_early_1980_from_date(&date(1979, 12)), "year"));
        assert!(is_out_of_range(&generate_early_1980_from_date(&date(1990, 1)), "year"));
    }

    #[test]
    fn test_late_1980_valid() {
        let cases = [
            ("bc", 1987, 1, "871BC"),
            ("lp", 1987, 12, "8712LP"),
            ("vx", 1987, 4, "874VX"),
            ("Vx", 1987, 4, "874VX"),
            ("lw", 1989, 9, "899LW"),
            ("FC", 1989, 2, "892FC"),
            ("dI", 1989, 12, "8912DI"),
        ];
        for (location, year, month, expected) in cases {
            assert_eq!(generate_late_1980(location, year, month).unwrap(), expected);
            assert_eq!(
                generate_late_1980_from_date(location, &date(year.into(), month.into())).unwrap(),
                expected
            );
        }
    }

    #[test]
    fn test_late_1980_out_of_range() {
        assert!(is_out_of_range(&generate_late_1980("BC", 1979, 1), "year"));
        assert!(is_out_of_range(&generate_late_1980("BC", 1990, 1), "year"));
        assert!(is_out_of_range(&generate_late_1980("BC", 1980, 13), "month"));

        assert!(is_out_of_range(&generate_late_1980_from_date("bc", &date(1979, 12)), "year"));
        assert!(is_out_of_range(&generate_late_1980_from_date("vx", &date(1990, 1)), "year"));
    }

    #[test]
    fn test_late_1980_bad_location() {
        assert_eq!(
            generate_late_1980("", 1986, 1),
            Err(DateCodeError::MissingArgument("factory location code"))
        );
        assert_eq!(
            generate_late_1980_from_date("", &date(1986, 1)),
            Err(DateCodeError::MissingArgument("factory location code"))
        );
        for location in ["79", "b9", "7b", "abc", "b"] {
            let result = generate_late_1980(location, 1986, 1);
            assert!(
                matches!(result, Err(DateCodeError::InvalidFormat(_))),
                "{location:?} should be rejected, got {result:?}"
            );
            assert!(matches!(
                generate_late_1980_from_date(location, &date(1986, 1)),
                Err(DateCodeError::InvalidFormat(_))
            ));
        }
    }

    #[test]
    fn test_range_checked_before_location() {
        assert!(is_out_of_range(&generate_late_1980("", 1990, 1), "year"));
        assert!(is_out_of_range(&generate_1990("b9", 1989, 1), "year"));
    }

    #[test]
    fn test_1990_valid() {
        let cases = [
            ("th", 1990, 1, "TH0910"),
            ("mb", 1995, 3, "MB0935"),
            ("ct", 2001, 10, "CT1001"),
            ("vi", 2005, 12, "VI1025"),
        ];
        for (location, year, month, expected) in cases {
            assert_eq!(generate_1990(location, year, month).unwrap(), expected);
            assert_eq!(
                generate_1990_from_date(location, &date(year.into(), month.into())).unwrap(),
                expected
            );
        }
    }

    #[test]
    fn test_1990_year_window_differs_by_form() {
        // 2006 is only reachable through the calendar-date form
        assert!(is_out_of_range(&generate_1990("rc", 2006, 7), "year"));
        assert_eq!(generate_1990_from_date("rC", &date(2006, 7)).unwrap(), "RC0076");

        assert!(is_out_of_range(&generate_1990("BC", 1989, 1), "year"));
        assert!(is_out_of_range(&generate_1990("BC", 2007, 1), "year"));
        assert!(is_out_of_range(&generate_1990("BC", 1990, 13), "month"));
        assert!(is_out_of_range(&generate_1990_from_date("bc", &date(1989, 12)), "year"));
        assert!(is_out_of_range(&generate_1990_from_date("bc", &date(2007, 1)), "year"));
    }

    #[test]
    fn test_1990_bad_location() {
        assert_eq!(
            generate_1990("", 1990, 1),
            Err(DateCodeError::MissingArgument("factory location code"))
        );
        assert_eq!(
            generate_1990_from_date("", &date(1990, 1)),
            Err(DateCodeError::MissingArgument("factory location code"))
        );
        for location in ["79", "b9", "7c", "abc", "b"] {
            assert!(matches!(
                generate_1990(location, 1990, 1),
                Err(DateCodeError::InvalidFormat(_))
            ));
            assert!(matches!(
                generate_1990_from_date(location, &date(1990, 1)),
                Err(DateCodeError::InvalidFormat(_))
            ));
        }
    }

    #[test]
    fn test_negative_calendar_year() {
        let ancient = NaiveDate::from_ymd_opt(-44, 3, 15).unwrap();
        let result = generate_early_1980_from_date(&ancient);
        assert!(matches!(
            result,
            Err(DateCodeError::OutOfRange { field: "year", value: -44, .. })
        ));
    }
}
