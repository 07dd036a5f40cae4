use std::time::Duration;

use async_trait::async_trait;

pub use vane_types::ConnectorKey;
use vane_types::{
    Coordinates, CurrencyCode, Instrument, Market, Quote, RateTable, VaneError, WeatherSnapshot,
};

/// Focused role trait for connectors that resolve many quotes with one request.
#[async_trait]
pub trait QuoteBatchProvider: Send + Sync {
    /// Fetch quotes for every instrument in one upstream call.
    ///
    /// The returned vector has the same length and order as `instruments`; an
    /// entry is `None` when its row was missing, malformed, or implausible.
    /// An `Err` means the whole batch failed.
    async fn quote_batch(&self, instruments: &[Instrument])
    -> Result<Vec<Option<Quote>>, VaneError>;
}

/// Focused role trait for connectors that provide a single quote.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Fetch a point-in-time quote for the given instrument.
    async fn quote(&self, instrument: &Instrument) -> Result<Quote, VaneError>;
}

/// Focused role trait for connectors that provide weather.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetch current conditions and the daily forecast at `coords`.
    async fn weather(&self, coords: Coordinates) -> Result<WeatherSnapshot, VaneError>;
}

/// Focused role trait for connectors that provide currency rates.
#[async_trait]
pub trait RatesProvider: Send + Sync {
    /// Fetch the rate table for `base`.
    async fn rates(&self, base: &CurrencyCode) -> Result<RateTable, VaneError>;
}

/// Main connector trait implemented by provider crates. Exposes capability discovery.
pub trait VaneConnector: Send + Sync {
    /// A stable identifier for priority lists and response attribution (e.g. "sina").
    fn name(&self) -> &'static str;

    /// Canonical connector key constructed from the static name.
    fn key(&self) -> ConnectorKey {
        ConnectorKey::new(self.name())
    }

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Whether this connector can quote instruments of `market`.
    ///
    /// Default: every market. Only consulted for quote capabilities.
    fn supports_market(&self, market: Market) -> bool {
        let _ = market;
        true
    }

    /// Per-call budget declared by the connector's provider spec.
    ///
    /// `None` defers to the orchestrator's default provider timeout.
    fn timeout(&self) -> Option<Duration> {
        None
    }

    /// If implemented, returns a trait object for batch quotes.
    fn as_quote_batch_provider(&self) -> Option<&dyn QuoteBatchProvider> {
        None
    }

    /// Advertise quote capability by returning a usable trait object reference when supported.
    fn as_quote_provider(&self) -> Option<&dyn QuoteProvider> {
        None
    }

    /// If implemented, returns a trait object for weather.
    fn as_weather_provider(&self) -> Option<&dyn WeatherProvider> {
        None
    }

    /// If implemented, returns a trait object for currency rates.
    fn as_rates_provider(&self) -> Option<&dyn RatesProvider> {
        None
    }
}
