//! vane-core
//!
//! Traits and pure helpers shared by every vane connector and the orchestrator.
//!
//! - `connector`: the `VaneConnector` trait and capability role traits.
//! - `fetch`: one bounded outbound HTTP call over a pluggable transport.
//! - `normalize`: positional row layouts, weather code translation, and charset
//!   decoding that turn provider payloads into canonical records.
//!
//! Timeouts are enforced with `tokio::time`, so callers must run under a Tokio
//! 1.x runtime.
#![warn(missing_docs)]

/// Connector capability traits and the primary `VaneConnector` interface.
pub mod connector;
/// Fetch-with-timeout over an `HttpTransport`.
pub mod fetch;
/// Pure mapping from provider payloads to canonical records.
pub mod normalize;

pub use connector::{
    QuoteBatchProvider, QuoteProvider, RatesProvider, VaneConnector, WeatherProvider,
};
pub use fetch::{HttpRequest, HttpTransport, RawResponse, TransportError, fetch_with_timeout};
pub use vane_types::*;
