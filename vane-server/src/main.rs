//! vane-server binary.

use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing::info;
use vane::Vane;
use vane_providers::{
    ExchangeRateConnector, OpenMeteoConnector, ReqwestTransport, SinaConnector, WttrConnector,
    YahooConnector, default_instruments,
};
use vane_server::{AppState, ServerConfig, create_router, logging};

fn build_vane(cfg: &ServerConfig) -> Result<Vane, vane::VaneError> {
    let budget = cfg.provider_timeout();
    // One connection pool for every upstream.
    let transport = Arc::new(ReqwestTransport::new());
    macro_rules! configured {
        ($connector:expr) => {{
            let c = $connector.with_transport(transport.clone());
            Arc::new(match budget {
                Some(t) => c.with_timeout(t),
                None => c,
            })
        }};
    }

    // Registration order is the fallback order within each capability.
    let mut builder = Vane::builder()
        .with_connector(configured!(SinaConnector::new()))
        .with_connector(configured!(YahooConnector::new()))
        .with_connector(configured!(OpenMeteoConnector::primary()))
        .with_connector(configured!(OpenMeteoConnector::mirror()))
        .with_connector(configured!(WttrConnector::new()))
        .with_connector(configured!(ExchangeRateConnector::exchangerate_api()))
        .with_connector(configured!(ExchangeRateConnector::open_er_api()));
    if let Some(t) = budget {
        builder = builder.provider_timeout(t);
    }
    builder.build()
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    info!("shutting down");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = ServerConfig::parse();
    logging::init_logging(cfg.log_format);

    let vane = build_vane(&cfg)?;
    info!(connectors = ?vane.connector_names(), "connectors registered");

    let state = AppState::new(
        Arc::new(vane),
        default_instruments(),
        cfg.timezone,
        cfg.default_currency.clone(),
    );
    let app = create_router(state);

    let addr = cfg.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, timezone = %cfg.timezone, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
