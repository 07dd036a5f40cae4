use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use vane_core::connector::{ConnectorKey, QuoteBatchProvider, VaneConnector};
use vane_core::normalize::{QuoteFields, normalize_quote};
use vane_core::{
    HttpRequest, HttpTransport, Instrument, ProviderKind, ProviderSpec, Quote, VaneError,
    fetch_with_timeout,
};

use crate::{ReqwestTransport, USER_AGENT};

/// Batch index quotes from Sina's `hq` feed.
///
/// One request covers every tracked instrument; the body is GBK text with one
/// `var hq_str_<code>="col,col,...";` line per requested code. Rows are matched
/// to instruments by that code, never by line position.
pub struct SinaConnector {
    spec: ProviderSpec,
    transport: Arc<dyn HttpTransport>,
}

impl SinaConnector {
    /// Static connector key for priority configuration.
    pub const KEY: ConnectorKey = ConnectorKey::new("sina");

    const BASE_URL: &'static str = "https://hq.sinajs.cn";

    /// Connector against the public endpoint with a 10 s budget.
    #[must_use]
    pub fn new() -> Self {
        let spec = ProviderSpec::new(Self::KEY, ProviderKind::MarketBatch, Self::BASE_URL)
            .with_timeout(Duration::from_secs(10))
            .with_header("Referer", "https://finance.sina.com.cn")
            .with_header("User-Agent", USER_AGENT);
        Self {
            spec,
            transport: Arc::new(ReqwestTransport::new()),
        }
    }

    fn parse_line(&self, instrument: &Instrument, line: Option<&str>) -> Option<Quote> {
        let payload = line.and_then(quoted)?;
        if payload.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::debug!(symbol = instrument.symbol(), "empty batch row");
            return None;
        }
        let columns: Vec<&str> = payload.split(',').collect();
        let fields = match QuoteFields::from_columns(instrument.market().provider_kind(), &columns)
        {
            Ok(f) => f,
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(symbol = instrument.symbol(), error = %_e, "malformed batch row");
                return None;
            }
        };
        normalize_quote(instrument, fields).map(|q| q.with_source(self.name()))
    }
}

impl Default for SinaConnector {
    fn default() -> Self {
        Self::new()
    }
}

spec_connector_methods!(SinaConnector);

/// The `<code>` of a `var hq_str_<code>=...` line.
fn row_code(line: &str) -> Option<&str> {
    let rest = &line[line.find("hq_str_")? + "hq_str_".len()..];
    let code = rest[..rest.find('=')?].trim();
    (!code.is_empty()).then_some(code)
}

/// Text between the first and last double quote of a line.
fn quoted(line: &str) -> Option<&str> {
    let start = line.find('"')?;
    let end = line.rfind('"')?;
    (end > start).then(|| &line[start + 1..end])
}

#[async_trait]
impl QuoteBatchProvider for SinaConnector {
    async fn quote_batch(
        &self,
        instruments: &[Instrument],
    ) -> Result<Vec<Option<Quote>>, VaneError> {
        if instruments.is_empty() {
            return Ok(Vec::new());
        }
        let codes: Vec<&str> = instruments.iter().map(Instrument::batch_code).collect();
        let req = HttpRequest::for_spec(&self.spec, &format!("/list={}", codes.join(",")))?;
        let resp =
            fetch_with_timeout(self.transport.as_ref(), self.name(), &req, self.spec.timeout())
                .await?;
        let text = resp.text(self.name(), Some(resp.charset().unwrap_or("gbk")))?;
        let rows: HashMap<&str, &str> = text
            .lines()
            .filter_map(|l| row_code(l).map(|code| (code, l)))
            .collect();
        #[cfg(feature = "tracing")]
        if rows.len() != instruments.len() {
            tracing::warn!(
                expected = instruments.len(),
                got = rows.len(),
                "batch feed row count differs from request"
            );
        }
        Ok(instruments
            .iter()
            .map(|inst| self.parse_line(inst, rows.get(inst.batch_code()).copied()))
            .collect())
    }
}

impl VaneConnector for SinaConnector {
    fn name(&self) -> &'static str {
        self.spec.key().as_str()
    }

    fn vendor(&self) -> &'static str {
        "Sina Finance"
    }

    fn timeout(&self) -> Option<Duration> {
        Some(self.spec.timeout())
    }

    fn as_quote_batch_provider(&self) -> Option<&dyn QuoteBatchProvider> {
        Some(self as &dyn QuoteBatchProvider)
    }
}
