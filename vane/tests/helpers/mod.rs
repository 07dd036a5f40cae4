#![allow(dead_code)]

use std::sync::Arc;

use vane::{Instrument, Market, VaneError};
use vane_mock::MockBehavior;
use vane_mock::fixtures;

pub fn inst(symbol: &str) -> Instrument {
    fixtures::instrument(symbol)
}

pub fn intl(symbol: &str) -> Instrument {
    Instrument::new(symbol, symbol, Market::International, symbol.to_ascii_lowercase())
}

pub fn ok_quote(price: f64) -> MockBehavior<vane::Quote> {
    MockBehavior::Return(fixtures::quote("ANY", price))
}

pub fn fail(connector: &str, status: u16) -> MockBehavior<vane::Quote> {
    MockBehavior::Fail(VaneError::http(connector, status))
}

pub fn as_dyn(m: &Arc<vane_mock::MockConnector>) -> Arc<dyn vane::VaneConnector> {
    m.clone()
}

/// Paused-clock check: `expected` has passed, give or take timer granularity.
pub fn assert_elapsed(start: tokio::time::Instant, expected: std::time::Duration) {
    let elapsed = start.elapsed();
    assert!(
        elapsed >= expected && elapsed < expected + std::time::Duration::from_millis(20),
        "elapsed {elapsed:?}, expected about {expected:?}"
    );
}
