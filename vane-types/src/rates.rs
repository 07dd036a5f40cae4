//! Currency rate tables.

use serde::{Deserialize, Serialize};

use crate::VaneError;

/// Three-letter ISO 4217 currency code, upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Parse a code, accepting either case.
    ///
    /// # Errors
    /// Returns `InvalidArg` unless the input is exactly three ASCII letters.
    pub fn parse(code: &str) -> Result<Self, VaneError> {
        let code = code.trim();
        if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(VaneError::InvalidArg(format!(
                "currency code must be three letters, got '{code}'"
            )));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    /// The upper-case code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl core::str::FromStr for CurrencyCode {
    type Err = VaneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Upstream rate document, passed through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable(serde_json::Value);

impl RateTable {
    /// Wrap an upstream document after checking that it carries a `rates` object.
    ///
    /// # Errors
    /// Returns `Parse` tagged with `connector` when `rates` is missing or not an object.
    pub fn from_value(connector: &str, value: serde_json::Value) -> Result<Self, VaneError> {
        match value.get("rates") {
            Some(serde_json::Value::Object(_)) => Ok(Self(value)),
            _ => Err(VaneError::parse(connector, "missing 'rates' object")),
        }
    }

    /// Rate for `code` relative to the table's base, if listed.
    #[must_use]
    pub fn rate(&self, code: &str) -> Option<f64> {
        self.0.get("rates")?.get(code)?.as_f64()
    }

    /// The raw document.
    #[must_use]
    pub const fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    /// Consume into the raw document.
    #[must_use]
    pub fn into_value(self) -> serde_json::Value {
        self.0
    }
}
