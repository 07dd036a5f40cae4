//! Pure mapping from provider payloads to canonical records.
//!
//! Every function here is deterministic: identical input yields identical
//! output, so normalization can be re-run on a cached payload.

mod charset;
mod rows;
mod weather;

use thiserror::Error;
use vane_types::{ProviderKind, VaneError};

pub use charset::decode_payload;
pub use rows::{DomesticRow, InternationalRow, QuoteFields, RegionalRow, normalize_quote};
pub use weather::{RawCurrent, RawDaily, RawWeather, normalize_weather, wmo_code, wwo_to_wmo};

/// Why a payload fragment could not be normalized.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NormalizeError {
    /// A positional row had fewer columns than its layout needs.
    #[error("row has {found} columns, expected at least {expected}")]
    TooShort {
        /// Columns the layout reads.
        expected: usize,
        /// Columns present.
        found: usize,
    },
    /// A numeric column did not hold a finite number.
    #[error("column {column} is not a finite number: '{value}'")]
    NotNumeric {
        /// Zero-based column index.
        column: usize,
        /// Raw column text.
        value: String,
    },
    /// The provider kind has no positional row layout.
    #[error("{0:?} has no positional row layout")]
    NoRowLayout(ProviderKind),
    /// The charset label is not recognized.
    #[error("unknown charset '{0}'")]
    UnknownCharset(String),
}

impl NormalizeError {
    /// Convert into a `Parse` error attributed to `connector`.
    #[must_use]
    pub fn into_vane(self, connector: &str) -> VaneError {
        VaneError::parse(connector, self.to_string())
    }
}
