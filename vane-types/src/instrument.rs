//! Tracked instruments and the market families they belong to.

use serde::{Deserialize, Serialize};

use crate::ProviderKind;

/// Market family of a tracked instrument.
///
/// Determines which positional layout the batch provider uses for its row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Market {
    /// Mainland exchanges.
    Domestic,
    /// Hong Kong.
    Regional,
    /// Overseas indices.
    International,
}

impl Market {
    /// Provider schema family used for rows of this market.
    #[must_use]
    pub const fn provider_kind(self) -> ProviderKind {
        match self {
            Self::Domestic => ProviderKind::DomesticMarket,
            Self::Regional => ProviderKind::RegionalMarket,
            Self::International => ProviderKind::InternationalMarket,
        }
    }
}

/// One tracked symbol with its display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instrument {
    symbol: String,
    name: String,
    flag: Option<String>,
    market: Market,
    batch_code: String,
}

impl Instrument {
    /// Create an instrument.
    ///
    /// `batch_code` is the identifier the batch provider expects for this symbol
    /// (for example `sh000001` for `000001.SS`).
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        market: Market,
        batch_code: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            flag: None,
            market,
            batch_code: batch_code.into(),
        }
    }

    /// Attach a display flag (usually a country emoji).
    #[must_use]
    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flag = Some(flag.into());
        self
    }

    /// Canonical symbol, e.g. `^DJI`.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Human-readable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Optional display flag.
    #[must_use]
    pub fn flag(&self) -> Option<&str> {
        self.flag.as_deref()
    }

    /// Market family.
    #[must_use]
    pub const fn market(&self) -> Market {
        self.market
    }

    /// Batch provider code.
    #[must_use]
    pub fn batch_code(&self) -> &str {
        &self.batch_code
    }
}
