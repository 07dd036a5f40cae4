//! vane-providers
//!
//! Concrete connectors implementing `VaneConnector` over plain HTTP:
//!
//! - [`SinaConnector`]: batch index quotes from a GBK-encoded positional feed.
//! - [`YahooConnector`]: per-symbol chart quotes, used as the quote fallback.
//! - [`OpenMeteoConnector`]: weather in WMO codes, primary host and mirror.
//! - [`WttrConnector`]: last-resort weather with translated condition codes.
//! - [`ExchangeRateConnector`]: currency rate tables from two public mirrors.
//!
//! Every connector owns one `ProviderSpec` and an `HttpTransport`; the default
//! transport is [`ReqwestTransport`].
#![warn(missing_docs)]

/// Browser-like agent; several upstreams reject requests without one.
pub(crate) const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Shared `ProviderSpec` and transport plumbing for connector types that hold
/// `spec` and `transport` fields.
macro_rules! spec_connector_methods {
    ($ty:ty) => {
        impl $ty {
            /// Point the connector at a different base URL (mirrors, tests).
            #[must_use]
            pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
                self.spec = self.spec.with_base_url(base_url);
                self
            }

            /// Replace the per-call timeout budget.
            #[must_use]
            pub fn with_timeout(mut self, timeout: std::time::Duration) -> Self {
                self.spec = self.spec.with_timeout(timeout);
                self
            }

            /// Replace the HTTP transport.
            #[must_use]
            pub fn with_transport(
                mut self,
                transport: std::sync::Arc<dyn vane_core::HttpTransport>,
            ) -> Self {
                self.transport = transport;
                self
            }

            /// The provider spec this connector was built with.
            #[must_use]
            pub const fn spec(&self) -> &vane_core::ProviderSpec {
                &self.spec
            }
        }
    };
}

mod exchange_rate;
mod instruments;
mod open_meteo;
mod sina;
mod transport;
mod wttr;
mod yahoo;

pub use exchange_rate::ExchangeRateConnector;
pub use instruments::default_instruments;
pub use open_meteo::OpenMeteoConnector;
pub use sina::SinaConnector;
pub use transport::ReqwestTransport;
pub use wttr::WttrConnector;
pub use yahoo::YahooConnector;
