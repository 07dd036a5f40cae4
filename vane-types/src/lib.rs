//! Shared data model, errors, and configuration primitives for the vane data proxy.
#![warn(missing_docs)]

mod capability;
mod config;
mod connector;
mod error;
mod instrument;
mod provider;
mod quote;
mod rates;
mod weather;

pub use capability::Capability;
pub use config::VaneConfig;
pub use connector::ConnectorKey;
pub use error::VaneError;
pub use instrument::{Instrument, Market};
pub use provider::{DEFAULT_PROVIDER_TIMEOUT, ProviderKind, ProviderSpec};
pub use quote::{Quote, change_percent};
pub use rates::{CurrencyCode, RateTable};
pub use weather::{
    Condition, Coordinates, CurrentConditions, DailyForecast, WeatherCode, WeatherSnapshot,
};
