//! Encode and decode manufacturing date codes.
//!
//! Three historical schemes are supported:
//!
//! | Scheme            | Layout          | Example  |
//! |-------------------|-----------------|----------|
//! | early 1980s       | `YYM` / `YYMM`  | `"836"`  |
//! | late 1980s        | `YYM(M)LL`      | `"871BC"`|
//! | 1990 to 2006      | `LLMYMY`        | `"TH0910"`|
//!
//! `Y` is a year digit, `M` a month digit and `LL` a factory location code.
//! Location codes map to the [`Country`] (or countries) producing there.

mod consts;
pub mod country;
pub mod generator;
pub mod parser;
mod prelude;
mod types;

pub use consts::*;
pub use country::{Country, countries_for};
pub use generator::{
    generate_1990, generate_1990_from_date, generate_early_1980, generate_early_1980_from_date,
    generate_late_1980, generate_late_1980_from_date,
};
pub use parser::{parse_1990, parse_early_1980, parse_late_1980};
pub use types::{FactoryDateCode, LocationCode, Month, ProductionDate};

use crate::prelude::*;
use std::str::FromStr;

/// Error type shared by generation, parsing and country lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateCodeError {
    /// A required string argument was empty.
    #[error("Missing {0}")]
    MissingArgument(&'static str),

    /// A caller-supplied year or month is outside the scheme's bounds.
    #[error("Invalid {field}: {value} (must be {min}-{max})")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: u16,
        max: u16,
    },

    /// Malformed date or location code, or one that decodes to an impossible date.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// The encoding scheme a date code follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum Scheme {
    #[display(fmt = "early 1980s")]
    Early1980,
    #[display(fmt = "late 1980s")]
    Late1980,
    #[display(fmt = "1990-2006")]
    Code1990,
}

/// A decoded date code of any scheme.
///
/// `FromStr` picks the scheme from the code's shape: 3 or 4 digits is an
/// early-1980s code, any other code starting with a digit is a late-1980s
/// code, and a code starting with a letter is a 1990s code.
///
/// `Display` (and serialization) re-encodes the decoded fields in the form
/// the generators produce, so a code parsed from a non-canonical spelling
/// prints canonically: `"8701BC"` prints as `"871BC"` and `"8001"` as `"801"`.
/// The output always parses back to an equal `DateCode`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DateCode(Decoded);

/// Only built by the parsers, so every payload is valid for its scheme.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Decoded {
    Early1980(ProductionDate),
    Late1980(FactoryDateCode),
    Code1990(FactoryDateCode),
}

impl DateCode {
    pub const fn scheme(&self) -> Scheme {
        match &self.0 {
            Decoded::Early1980(_) => Scheme::Early1980,
            Decoded::Late1980(_) => Scheme::Late1980,
            Decoded::Code1990(_) => Scheme::Code1990,
        }
    }

    pub const fn date(&self) -> ProductionDate {
        match &self.0 {
            Decoded::Early1980(date) => *date,
            Decoded::Late1980(code) | Decoded::Code1990(code) => code.date(),
        }
    }

    pub const fn year(&self) -> u16 {
        self.date().year()
    }

    pub const fn month(&self) -> Month {
        self.date().month()
    }

    /// Returns the location details if the scheme carries a location code
    pub const fn factory(&self) -> Option<&FactoryDateCode> {
        match &self.0 {
            Decoded::Early1980(_) => None,
            Decoded::Late1980(code) | Decoded::Code1990(code) => Some(code),
        }
    }

    /// Returns the factory location code if the scheme carries one
    pub fn location(&self) -> Option<&LocationCode> {
        self.factory().map(FactoryDateCode::location)
    }

    /// Countries for the location code; empty for early-1980s codes
    pub fn countries(&self) -> &[Country] {
        self.factory().map(FactoryDateCode::countries).unwrap_or_default()
    }
}

impl FromStr for DateCode {
    type Err = DateCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let Some(first) = trimmed.chars().next() else {
            return Err(DateCodeError::MissingArgument("date code"));
        };

        let decoded = if !first.is_ascii_digit() {
            Decoded::Code1990(parser::parse_1990(trimmed)?)
        } else if trimmed.chars().all(|c| c.is_ascii_digit())
            && EARLY_1980_CODE_LEN.contains(&trimmed.len())
        {
            Decoded::Early1980(parser::parse_early_1980(trimmed)?)
        } else {
            Decoded::Late1980(parser::parse_late_1980(trimmed)?)
        };
        Ok(Self(decoded))
    }
}

impl std::fmt::Display for DateCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let encoded = match &self.0 {
            Decoded::Early1980(date) => generator::encode_early_1980(date.year(), date.month()),
            Decoded::Late1980(code) => {
                generator::encode_late_1980(code.location(), code.year(), code.month())
            }
            Decoded::Code1990(code) => {
                generator::encode_1990(code.location(), code.year(), code.month())
            }
        };
        f.write_str(&encoded)
    }
}

impl serde::Serialize for DateCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for DateCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
