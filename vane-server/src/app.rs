//! Router and endpoint handlers.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use vane::{Coordinates, CurrencyCode, Instrument, Quote, Vane, join_sources};

use crate::error::ApiError;

const QUOTES_CACHE: &str = "public, max-age=30, s-maxage=30";
const WEATHER_CACHE: &str = "public, max-age=300, s-maxage=300";
const CURRENCY_CACHE: &str = "public, max-age=600, s-maxage=600";

/// Name reported by `/health`.
pub const SERVICE_NAME: &str = "vane-server";

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Orchestrator with all connectors registered.
    pub vane: Arc<Vane>,
    /// Tracked instrument list served by `/quotes`.
    pub instruments: Arc<Vec<Instrument>>,
    /// Timezone for the quote `time` stamp.
    pub timezone: Tz,
    /// Base currency when `/currency` has no `base` parameter.
    pub default_currency: CurrencyCode,
    /// Process start, for uptime.
    pub start_time: Instant,
}

impl AppState {
    /// State with the current instant as start time.
    #[must_use]
    pub fn new(
        vane: Arc<Vane>,
        instruments: Vec<Instrument>,
        timezone: Tz,
        default_currency: CurrencyCode,
    ) -> Self {
        Self {
            vane,
            instruments: Arc::new(instruments),
            timezone,
            default_currency,
            start_time: Instant::now(),
        }
    }

    /// Instruments named by a comma-separated `symbols` selection, in request order.
    fn select(&self, symbols: Option<&str>) -> Result<Vec<Instrument>, ApiError> {
        let Some(raw) = symbols else {
            return Ok(self.instruments.as_ref().clone());
        };
        let wanted: Vec<&str> = raw.split(',').map(str::trim).filter(|s| !s.is_empty()).collect();
        if wanted.is_empty() {
            return Err(ApiError::BadGateway("empty symbol selection".into()));
        }
        wanted
            .into_iter()
            .map(|s| {
                self.instruments
                    .iter()
                    .find(|i| i.symbol().eq_ignore_ascii_case(s))
                    .cloned()
                    .ok_or_else(|| ApiError::BadGateway(format!("unknown symbol '{s}'")))
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct QuotesQuery {
    symbols: Option<String>,
}

/// Body of a `/quotes` response.
#[derive(Debug, Serialize, Deserialize)]
pub struct QuotesResponse {
    /// One entry per requested instrument, placeholders included.
    pub data: Vec<Quote>,
    /// Wall-clock `HH:MM:SS` in the configured timezone.
    pub time: String,
    /// Connectors that contributed, joined with `+`.
    pub source: String,
}

async fn quotes(
    State(state): State<AppState>,
    Query(params): Query<QuotesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let selected = state.select(params.symbols.as_deref())?;
    let data = state.vane.quotes(&selected).await;
    let source = join_sources(data.iter().map(|q| q.source.as_deref()));
    let time = chrono::Utc::now()
        .with_timezone(&state.timezone)
        .format("%H:%M:%S")
        .to_string();

    Ok((
        [(header::CACHE_CONTROL, QUOTES_CACHE)],
        Json(QuotesResponse { data, time, source }),
    ))
}

#[derive(Debug, Deserialize)]
struct WeatherQuery {
    latitude: Option<String>,
    longitude: Option<String>,
}

fn parse_coordinate(name: &str, raw: Option<&str>) -> Result<f64, ApiError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::BadRequest(format!("missing {name} parameter")))?;
    raw.parse::<f64>()
        .map_err(|_| ApiError::BadRequest(format!("{name} must be a number, got '{raw}'")))
}

async fn weather(
    State(state): State<AppState>,
    Query(params): Query<WeatherQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let lat = parse_coordinate("latitude", params.latitude.as_deref())?;
    let lon = parse_coordinate("longitude", params.longitude.as_deref())?;
    let coords = Coordinates::new(lat, lon)?;
    let snapshot = state.vane.weather(coords).await?;
    Ok(([(header::CACHE_CONTROL, WEATHER_CACHE)], Json(snapshot)))
}

#[derive(Debug, Deserialize)]
struct CurrencyQuery {
    base: Option<String>,
}

async fn currency(
    State(state): State<AppState>,
    Query(params): Query<CurrencyQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let base = match params.base.as_deref() {
        Some(raw) => CurrencyCode::parse(raw)?,
        None => state.default_currency.clone(),
    };
    let table = state.vane.rates(&base).await?;
    Ok(([(header::CACHE_CONTROL, CURRENCY_CACHE)], Json(table.into_value())))
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "uptime_seconds": state.start_time.elapsed().as_secs(),
        "service": SERVICE_NAME,
    }))
}

/// Build the router with tracing and permissive CORS.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/quotes", get(quotes))
        .route("/weather", get(weather))
        .route("/currency", get(currency))
        .route("/health", get(health))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
