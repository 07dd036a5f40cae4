//! Static description of one upstream source.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ConnectorKey;

/// Which positional schema and code vocabulary a provider speaks.
///
/// The normalizer dispatches on this to pick the column mapping, unit handling,
/// and weather-code translation for a raw record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ProviderKind {
    /// Mainland exchange index rows (open, previous close, price, high, low).
    DomesticMarket,
    /// Hong Kong style rows (names first, then open, previous close, high, low, price).
    RegionalMarket,
    /// Overseas index rows (price, change, change percent; no OHLC).
    InternationalMarket,
    /// Batch endpoint mixing the three market layouts; each row is read with
    /// its instrument's market layout.
    MarketBatch,
    /// Per-symbol chart endpoint returning a complete quote.
    FullQuote,
    /// Weather source already using the canonical WMO vocabulary.
    WeatherPrimary,
    /// Weather source with its own condition codes, translated at the boundary.
    WeatherAlternate,
    /// Currency rates passthrough.
    Rates,
}

/// Default per-provider budget when a spec does not set one.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(8);

/// Immutable configuration for one upstream source.
///
/// Built once at startup and owned by its connector; the connector's trait
/// implementation is the parse function for this source.
#[derive(Debug, Clone)]
pub struct ProviderSpec {
    key: ConnectorKey,
    kind: ProviderKind,
    base_url: String,
    timeout: Duration,
    headers: Vec<(String, String)>,
}

impl ProviderSpec {
    /// Create a spec with the default timeout and no extra headers.
    #[must_use]
    pub fn new(key: ConnectorKey, kind: ProviderKind, base_url: impl Into<String>) -> Self {
        Self {
            key,
            kind,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_PROVIDER_TIMEOUT,
            headers: Vec::new(),
        }
    }

    /// Replace the timeout budget.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Point the spec at a different base URL (mirrors, tests).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Add a header sent on every request to this source.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Connector key this spec belongs to.
    #[must_use]
    pub const fn key(&self) -> ConnectorKey {
        self.key
    }

    /// Schema family of the source.
    #[must_use]
    pub const fn kind(&self) -> ProviderKind {
        self.kind
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Timeout budget for one call.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Headers required by the source.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }
}
