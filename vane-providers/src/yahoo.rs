use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use vane_core::connector::{ConnectorKey, QuoteProvider, VaneConnector};
use vane_core::normalize::{QuoteFields, normalize_quote};
use vane_core::{
    HttpRequest, HttpTransport, Instrument, ProviderKind, ProviderSpec, Quote, VaneError,
    fetch_with_timeout,
};

use crate::{ReqwestTransport, USER_AGENT};

/// Per-symbol quotes from Yahoo's v8 chart endpoint.
pub struct YahooConnector {
    spec: ProviderSpec,
    transport: Arc<dyn HttpTransport>,
}

#[derive(Deserialize)]
struct ChartEnvelope {
    chart: Chart,
}

#[derive(Deserialize)]
struct Chart {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
}

#[derive(Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    #[serde(default)]
    indicators: Option<Indicators>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    regular_market_price: Option<f64>,
    chart_previous_close: Option<f64>,
    previous_close: Option<f64>,
}

#[derive(Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<IndicatorQuote>,
}

#[derive(Deserialize, Default)]
struct IndicatorQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
}

fn last(series: &[Option<f64>]) -> Option<f64> {
    series.last().copied().flatten()
}

impl YahooConnector {
    /// Static connector key for priority configuration.
    pub const KEY: ConnectorKey = ConnectorKey::new("yahoo");

    const BASE_URL: &'static str = "https://query1.finance.yahoo.com";

    /// Connector against the public endpoint with an 8 s budget.
    #[must_use]
    pub fn new() -> Self {
        let spec = ProviderSpec::new(Self::KEY, ProviderKind::FullQuote, Self::BASE_URL)
            .with_timeout(Duration::from_secs(8))
            .with_header("User-Agent", USER_AGENT);
        Self {
            spec,
            transport: Arc::new(ReqwestTransport::new()),
        }
    }

    fn request(&self, symbol: &str) -> Result<HttpRequest, VaneError> {
        let mut req = HttpRequest::for_spec(&self.spec, "/v8/finance/chart")?;
        req.url_mut()
            .path_segments_mut()
            .map_err(|()| VaneError::InvalidArg(format!("{} base URL cannot take a path", self.name())))?
            .push(symbol);
        req.url_mut()
            .query_pairs_mut()
            .append_pair("interval", "1d")
            .append_pair("range", "1d");
        Ok(req)
    }

    fn parse(&self, instrument: &Instrument, envelope: ChartEnvelope) -> Result<Quote, VaneError> {
        let result = envelope
            .chart
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| VaneError::parse(self.name(), "chart has no result"))?;
        let price = result
            .meta
            .regular_market_price
            .ok_or_else(|| VaneError::parse(self.name(), "missing regularMarketPrice"))?;
        let previous_close = result
            .meta
            .chart_previous_close
            .or(result.meta.previous_close)
            .unwrap_or(price);
        let ohlc = result
            .indicators
            .and_then(|i| i.quote.into_iter().next())
            .unwrap_or_default();
        let fields = QuoteFields::from_previous_close(
            price,
            previous_close,
            last(&ohlc.open),
            last(&ohlc.high),
            last(&ohlc.low),
        );
        normalize_quote(instrument, fields)
            .map(|q| q.with_source(self.name()))
            .ok_or_else(|| {
                VaneError::validation(self.name(), format!("implausible price {price}"))
            })
    }
}

impl Default for YahooConnector {
    fn default() -> Self {
        Self::new()
    }
}

spec_connector_methods!(YahooConnector);

#[async_trait]
impl QuoteProvider for YahooConnector {
    async fn quote(&self, instrument: &Instrument) -> Result<Quote, VaneError> {
        let req = self.request(instrument.symbol())?;
        let resp =
            fetch_with_timeout(self.transport.as_ref(), self.name(), &req, self.spec.timeout())
                .await?;
        let envelope: ChartEnvelope = resp.json(self.name())?;
        self.parse(instrument, envelope)
    }
}

impl VaneConnector for YahooConnector {
    fn name(&self) -> &'static str {
        self.spec.key().as_str()
    }

    fn vendor(&self) -> &'static str {
        "Yahoo Finance"
    }

    fn timeout(&self) -> Option<Duration> {
        Some(self.spec.timeout())
    }

    fn as_quote_provider(&self) -> Option<&dyn QuoteProvider> {
        Some(self as &dyn QuoteProvider)
    }
}
