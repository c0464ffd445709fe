//! Decoding of date codes back into production dates.
//!
//! Parsing treats its input as untrusted: anything that doesn't decode to a
//! plausible date for the scheme is `DateCodeError::InvalidFormat`, including
//! years and months outside the scheme's window.

use std::ops::RangeInclusive;

use crate::consts::{
    CENTURY_1900, CENTURY_2000, CODE_1990_DATE_YEARS, CODE_1990_LEN, EARLY_1980_CODE_LEN,
    EARLY_1980_YEARS, LATE_1980_CODE_LEN, LOCATION_CODE_LEN, YEAR_DIGITS,
};
use crate::{DateCodeError, FactoryDateCode, LocationCode, Month, ProductionDate};

fn invalid(code: &str, reason: &str) -> DateCodeError {
    tracing::debug!(code, reason, "rejected date code");
    DateCodeError::InvalidFormat(format!("{reason}: {code:?}"))
}

/// Rejects empty input, lengths outside `lengths`, and non-ASCII input. After
/// this, byte offsets and character offsets agree.
fn check_shape(code: &str, lengths: &RangeInclusive<usize>) -> Result<(), DateCodeError> {
    if code.is_empty() {
        return Err(DateCodeError::MissingArgument("date code"));
    }
    let len = code.chars().count();
    if !lengths.contains(&len) {
        let expected = if lengths.start() == lengths.end() {
            lengths.start().to_string()
        } else {
            format!("{}-{}", lengths.start(), lengths.end())
        };
        return Err(invalid(
            code,
            &format!("expected {expected} characters, found {len}"),
        ));
    }
    if !code.is_ascii() {
        return Err(invalid(code, "unexpected non-ASCII character"));
    }
    Ok(())
}

fn digits(code: &str, part: &str) -> Result<u16, DateCodeError> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(code, "expected digits"));
    }
    part.parse::<u16>().map_err(|_| invalid(code, "expected digits"))
}

fn digit(code: &str, byte: u8) -> Result<u16, DateCodeError> {
    char::from(byte)
        .to_digit(10)
        .and_then(|d| u16::try_from(d).ok())
        .ok_or_else(|| invalid(code, "expected digits"))
}

fn year_in(code: &str, year: u16, years: &RangeInclusive<u16>) -> Result<u16, DateCodeError> {
    if years.contains(&year) {
        Ok(year)
    } else {
        Err(invalid(code, &format!("year {year} is outside {years:?}")))
    }
}

fn month_of(code: &str, month: u16) -> Result<Month, DateCodeError> {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::new(m).ok())
        .ok_or_else(|| invalid(code, &format!("month {month} is outside 1..=12")))
}

/// Decodes the `YY` + `M`/`MM` body shared by both 1980s schemes.
fn decode_1980s_body(code: &str, body: &str) -> Result<ProductionDate, DateCodeError> {
    let (year, month) = body.split_at(YEAR_DIGITS);
    let year = year_in(code, CENTURY_1900 + digits(code, year)?, &EARLY_1980_YEARS)?;
    let month = month_of(code, digits(code, month)?)?;
    Ok(ProductionDate::new(year, month))
}

/// Parses an early-1980s code such as `"801"` (January 1980) or `"8612"`.
///
/// # Errors
/// - `DateCodeError::MissingArgument` for an empty code.
/// - `DateCodeError::InvalidFormat` for a code that isn't 3 or 4 digits, or
///   whose year isn't in 1980..=1989 or month in 1..=12.
pub fn parse_early_1980(code: &str) -> Result<ProductionDate, DateCodeError> {
    check_shape(code, &EARLY_1980_CODE_LEN)?;
    decode_1980s_body(code, code)
}

/// Parses a late-1980s code such as `"871BC"` or `"8710SD"`.
///
/// # Errors
/// - `DateCodeError::MissingArgument` for an empty code.
/// - `DateCodeError::InvalidFormat` for a code that isn't 5 or 6 characters,
///   has an unknown location code, or decodes to a year outside 1980..=1989
///   or a month outside 1..=12.
pub fn parse_late_1980(code: &str) -> Result<FactoryDateCode, DateCodeError> {
    check_shape(code, &LATE_1980_CODE_LEN)?;
    let (body, location) = code.split_at(code.len() - LOCATION_CODE_LEN);
    let (location, countries) = LocationCode::registered(location)?;
    let date = decode_1980s_body(code, body)?;
    Ok(FactoryDateCode::new(location, countries, date))
}

/// Parses a 1990s code such as `"TH0910"`: location code, then month and year
/// digits interleaved. A year starting with `0` is read as 20xx, anything
/// else as 19xx.
///
/// # Errors
/// - `DateCodeError::MissingArgument` for an empty code.
/// - `DateCodeError::InvalidFormat` for a code that isn't 6 characters, has an
///   unknown location code, non-digit date characters, or decodes to a year
///   outside 1990..=2006 or a month outside 1..=12.
pub fn parse_1990(code: &str) -> Result<FactoryDateCode, DateCodeError> {
    check_shape(code, &(CODE_1990_LEN..=CODE_1990_LEN))?;
    let (location, tail) = code.split_at(LOCATION_CODE_LEN);
    let (location, countries) = LocationCode::registered(location)?;

    let tail = tail.as_bytes();
    let century = if tail[1] == b'0' {
        CENTURY_2000
    } else {
        CENTURY_1900
    };

    let year = digit(code, tail[1])? * 10 + digit(code, tail[3])?;
    let year = year_in(code, century + year, &CODE_1990_DATE_YEARS)?;
    let month = month_of(code, digit(code, tail[0])? * 10 + digit(code, tail[2])?)?;

    Ok(FactoryDateCode::new(location, countries, ProductionDate::new(year, month)))
}
