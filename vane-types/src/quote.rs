//! Normalized market index quotes.

use serde::{Deserialize, Serialize};

use crate::Instrument;

/// One normalized index reading.
///
/// `open`, `high` and `low` are `None` when the provider does not publish them.
/// A placeholder (see [`Quote::placeholder`]) carries an `error_message`, zero
/// price fields and no OHLC, so a consumer can always tell an absent value from
/// a failed one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Canonical symbol.
    pub symbol: String,
    /// Human-readable name.
    pub display_name: String,
    /// Optional display hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<String>,
    /// Last price. Finite and positive on valid quotes.
    pub price: f64,
    /// Absolute change against the previous close.
    pub change: f64,
    /// Percentage change against the previous close.
    pub change_percent: f64,
    /// Session open, if published.
    pub open: Option<f64>,
    /// Session high, if published.
    pub high: Option<f64>,
    /// Session low, if published.
    pub low: Option<f64>,
    /// Present only on placeholders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Connector that produced the quote.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Quote {
    /// Build the placeholder returned for a symbol no provider could resolve.
    #[must_use]
    pub fn placeholder(instrument: &Instrument, message: impl Into<String>) -> Self {
        Self {
            symbol: instrument.symbol().to_string(),
            display_name: instrument.name().to_string(),
            flag: instrument.flag().map(str::to_string),
            price: 0.0,
            change: 0.0,
            change_percent: 0.0,
            open: None,
            high: None,
            low: None,
            error_message: Some(message.into()),
            source: None,
        }
    }

    /// Tag the quote with the connector that produced it.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// True when this quote is a placeholder for an unresolved symbol.
    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        self.error_message.is_some()
    }
}

/// `change / previous_close * 100`, or zero when the previous close is zero or not finite.
#[must_use]
pub fn change_percent(change: f64, previous_close: f64) -> f64 {
    if previous_close == 0.0 || !previous_close.is_finite() {
        return 0.0;
    }
    change / previous_close * 100.0
}
