//! Factory location codes and the countries that use them.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::{DateCodeError, prelude::*};

/// Countries with factories that stamp date codes.
/// Declaration order is the order lookups report matches in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
pub enum Country {
    France,
    Germany,
    Italy,
    Spain,
    Switzerland,
    #[display(fmt = "USA")]
    #[serde(rename = "USA")]
    Usa,
}

impl Country {
    pub const ALL: [Self; 6] = [
        Self::France,
        Self::Germany,
        Self::Italy,
        Self::Spain,
        Self::Switzerland,
        Self::Usa,
    ];

    /// Location codes assigned to this country's factories
    pub fn location_codes(self) -> impl Iterator<Item = &'static str> {
        LOCATION_TABLE
            .get(&self)
            .into_iter()
            .flat_map(|codes| codes.iter().copied())
    }

    const fn raw_codes(self) -> &'static [&'static str] {
        match self {
            Self::France => &[
                "A0", "A1", "A2", "AA", "AH", "AN", "AR", "AS", "BA", "BJ", "BU", "DR", "DU", "DT",
                "CO", "CT", "CX", "ET", "FL", "LW", "MB", "MI", "NO", "RA", "RI", "SD", "SF", "SL",
                "SN", "SP", "SR", "TA", "TJ", "TH", "TN", "TR", "TS", "VI", "VX",
            ],
            Self::Germany => &["LP", "OL"],
            Self::Italy => &[
                "BC", "BO", "CE", "FN", "FO", "MA", "NZ", "OB", "PL", "RC", "RE", "SA", "TD",
            ],
            Self::Spain => &["CA", "LO", "LB", "LM", "LW", "GI", "UB"],
            Self::Switzerland => &["DI", "FA"],
            Self::Usa => &["FC", "FH", "LA", "OS", "SD", "FL", "TX"],
        }
    }
}

/// Country to location codes. A code may appear under several countries when
/// production is shared.
static LOCATION_TABLE: LazyLock<BTreeMap<Country, BTreeSet<&'static str>>> = LazyLock::new(|| {
    Country::ALL
        .into_iter()
        .map(|country| (country, country.raw_codes().iter().copied().collect()))
        .collect()
});

/// Returns every country whose factories use `code`.
///
/// Matching is exact and case-sensitive; callers normalize case beforehand.
/// An unknown code yields an empty vector.
///
/// # Errors
/// Returns `DateCodeError::MissingArgument` if `code` is empty.
pub fn countries_for(code: &str) -> Result<Vec<Country>, DateCodeError> {
    if code.is_empty() {
        return Err(DateCodeError::MissingArgument("factory location code"));
    }

    let countries: Vec<Country> = LOCATION_TABLE
        .iter()
        .filter(|(_, codes)| codes.contains(code))
        .map(|(country, _)| *country)
        .collect();

    if countries.is_empty() {
        tracing::trace!(code, "no country uses factory location code");
    }
    Ok(countries)
}
