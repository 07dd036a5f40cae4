//! Vane resolves each query against an ordered list of upstream connectors and
//! returns the first good answer.
//!
//! Overview
//! - Connectors implement the `vane_core` role traits (`QuoteBatchProvider`,
//!   `QuoteProvider`, `WeatherProvider`, `RatesProvider`).
//! - Registration order is the fallback order; `prefer_symbol` re-orders the
//!   chain for individual symbols.
//! - Every provider call is bounded by that connector's timeout (or the builder
//!   default) and cancelled when it expires.
//!
//! Key behaviors
//! - Single queries (`quote`, `weather`, `rates`) try connectors strictly in
//!   order and stop at the first success. If all fail, the error keeps every
//!   attempt and its message is built from the last one.
//! - `quotes` issues one batch request, then resolves the symbols it missed
//!   concurrently, and always returns one entry per input in input order.
//!   Unresolvable symbols come back as placeholders, never as a failed call.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vane::Vane;
//! use vane_providers::{OpenMeteoConnector, SinaConnector, WttrConnector, YahooConnector};
//!
//! let vane = Vane::builder()
//!     .with_connector(Arc::new(SinaConnector::new()))
//!     .with_connector(Arc::new(YahooConnector::new()))
//!     .with_connector(Arc::new(OpenMeteoConnector::primary()))
//!     .with_connector(Arc::new(WttrConnector::new()))
//!     .build()?;
//!
//! let quotes = vane.quotes(&vane_providers::default_instruments()).await;
//! let weather = vane.weather(vane::Coordinates::new(31.23, 121.47)?).await?;
//! ```
#![warn(missing_docs)]

pub(crate) mod core;
mod router;

pub use core::{Vane, VaneBuilder};
pub use router::util::{collapse_errors, join_sources};

// Re-export core types for convenience
pub use vane_core::{
    Capability, Condition, ConnectorKey, Coordinates, CurrencyCode, CurrentConditions,
    DailyForecast, Instrument, Market, Quote, RateTable, VaneConfig, VaneConnector, VaneError,
    WeatherCode, WeatherSnapshot,
};
