use crate::consts::{LOCATION_CODE_LEN, MAX_MONTH, MIN_MONTH, PRODUCTION_YEARS};
use crate::country::{Country, countries_for};
use crate::{DateCodeError, prelude::*};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU8;

/// A month value guaranteed to be in the range `MIN_MONTH..=MAX_MONTH` (1..=12)
/// Uses `NonZeroU8` internally, so 0 is not a valid month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `DateCodeError::OutOfRange` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, DateCodeError> {
        let out_of_range = || DateCodeError::OutOfRange {
            field: "month",
            value: i64::from(value),
            min: u16::from(MIN_MONTH),
            max: u16::from(MAX_MONTH),
        };
        let non_zero = NonZeroU8::new(value).ok_or_else(out_of_range)?;
        if value > MAX_MONTH {
            return Err(out_of_range());
        }
        Ok(Self(non_zero))
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Month {
    type Error = DateCodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A two-character factory location code, always stored in uppercase.
///
/// Codes supplied by a caller must be two ASCII letters; see [`LocationCode::new`].
/// Codes read back from a date code only need to be present in the country
/// table, which also lists a few letter-digit codes such as `A0`.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Deref, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct LocationCode(String);

impl LocationCode {
    /// Validates a caller-supplied location code and normalizes it to uppercase.
    ///
    /// # Errors
    /// - `DateCodeError::MissingArgument` if `code` is empty.
    /// - `DateCodeError::InvalidFormat` if `code` is not exactly two ASCII letters.
    pub fn new(code: &str) -> Result<Self, DateCodeError> {
        if code.is_empty() {
            return Err(DateCodeError::MissingArgument("factory location code"));
        }
        if code.chars().count() != LOCATION_CODE_LEN {
            return Err(DateCodeError::InvalidFormat(format!(
                "factory location code must have {LOCATION_CODE_LEN} characters: {code:?}"
            )));
        }
        if !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(DateCodeError::InvalidFormat(format!(
                "factory location code must contain only letters: {code:?}"
            )));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    /// Resolves a code exactly as printed in a date code. No case folding is
    /// applied, so a lowercase code is unknown.
    pub(crate) fn registered(code: &str) -> Result<(Self, Vec<Country>), DateCodeError> {
        let countries = countries_for(code)?;
        if countries.is_empty() {
            return Err(DateCodeError::InvalidFormat(format!(
                "unknown factory location code: {code:?}"
            )));
        }
        Ok((Self(code.to_owned()), countries))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Countries known to produce under this code. Empty for well-formed but
    /// unregistered codes.
    pub fn countries(&self) -> Vec<Country> {
        countries_for(&self.0).unwrap_or_default()
    }
}

impl TryFrom<String> for LocationCode {
    type Error = DateCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value).or_else(|err| {
            Self::registered(&value)
                .map(|(code, _)| code)
                .map_err(|_| err)
        })
    }
}

impl From<LocationCode> for String {
    fn from(code: LocationCode) -> Self {
        code.0
    }
}

impl AsRef<str> for LocationCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Production year and month decoded from a date code
///
/// Deserialization only accepts years some scheme can encode (1980..=2006).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ProductionDate {
    year: u16,
    month: Month,
}

#[derive(Deserialize)]
struct RawProductionDate {
    year: u16,
    month: Month,
}

impl ProductionDate {
    pub(crate) const fn new(year: u16, month: Month) -> Self {
        Self { year, month }
    }

    /// Four-digit production year
    pub const fn year(&self) -> u16 {
        self.year
    }

    pub const fn month(&self) -> Month {
        self.month
    }

    /// Returns `(year, month)` as plain integers
    pub const fn to_columns(&self) -> (u16, u8) {
        (self.year, self.month.get())
    }
}

impl<'de> Deserialize<'de> for ProductionDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawProductionDate::deserialize(deserializer)?;
        if !PRODUCTION_YEARS.contains(&raw.year) {
            return Err(serde::de::Error::custom(DateCodeError::OutOfRange {
                field: "year",
                value: i64::from(raw.year),
                min: *PRODUCTION_YEARS.start(),
                max: *PRODUCTION_YEARS.end(),
            }));
        }
        Ok(Self::new(raw.year, raw.month))
    }
}

/// Everything decoded from a code that carries a factory location
/// (late-1980s and 1990s schemes).
///
/// On deserialization the location must be registered and `countries` is
/// looked up again rather than trusted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FactoryDateCode {
    location: LocationCode,
    countries: Vec<Country>,
    date: ProductionDate,
}

#[derive(Deserialize)]
struct RawFactoryDateCode {
    location: String,
    date: ProductionDate,
}

impl FactoryDateCode {
    pub(crate) fn new(
        location: LocationCode,
        countries: Vec<Country>,
        date: ProductionDate,
    ) -> Self {
        Self {
            location,
            countries,
            date,
        }
    }

    pub const fn location(&self) -> &LocationCode {
        &self.location
    }

    /// Countries sharing the factory location code, in table order
    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub const fn date(&self) -> ProductionDate {
        self.date
    }

    pub const fn year(&self) -> u16 {
        self.date.year
    }

    pub const fn month(&self) -> Month {
        self.date.month
    }
}

impl<'de> Deserialize<'de> for FactoryDateCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawFactoryDateCode::deserialize(deserializer)?;
        let (location, countries) = LocationCode::registered(&raw.location.to_ascii_uppercase())
            .map_err(serde::de::Error::custom)?;
        Ok(Self::new(location, countries, raw.date))
    }
}
