//! Test harness: a router over scripted mock connectors.

use std::sync::Arc;

use axum_test::TestServer;
use vane::{CurrencyCode, Instrument, Market, Vane, VaneConnector};
use vane_server::{AppState, create_router};

pub fn tracked() -> Vec<Instrument> {
    vec![
        Instrument::new("A", "Alpha", Market::Domestic, "sh_a").with_flag("🇨🇳"),
        Instrument::new("B", "Beta", Market::Regional, "hk_b"),
        Instrument::new("C", "Gamma", Market::International, "int_c"),
    ]
}

pub struct TestApiServer {
    pub server: TestServer,
}

impl TestApiServer {
    pub fn new(connectors: Vec<Arc<dyn VaneConnector>>) -> Self {
        let mut builder = Vane::builder();
        for c in connectors {
            builder = builder.with_connector(c);
        }
        let vane = builder.build().expect("at least one connector");
        let state = AppState::new(
            Arc::new(vane),
            tracked(),
            chrono_tz::Asia::Shanghai,
            CurrencyCode::parse("CNY").expect("valid code"),
        );
        let server = TestServer::new(create_router(state)).expect("start test server");
        Self { server }
    }
}
