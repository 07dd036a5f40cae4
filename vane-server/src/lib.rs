//! HTTP surface for vane.
//!
//! Exposes the orchestrator over four read-only endpoints:
//!
//! - `GET /quotes[?symbols=A,B]`: tracked index quotes, batch first then per-symbol fallback.
//! - `GET /weather?latitude=&longitude=`: current conditions plus a daily forecast.
//! - `GET /currency[?base=CNY]`: the raw rate table for a base currency.
//! - `GET /health`: liveness and uptime.
//!
//! Every successful response carries a `Cache-Control` header; errors are JSON
//! `{ "error": "..." }` bodies.

pub mod app;
pub mod config;
pub mod error;
pub mod logging;

pub use app::{AppState, create_router};
pub use config::{LogFormat, ServerConfig};
pub use error::ApiError;
