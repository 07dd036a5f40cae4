use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use vane_core::connector::{ConnectorKey, RatesProvider, VaneConnector};
use vane_core::{
    CurrencyCode, HttpRequest, HttpTransport, ProviderKind, ProviderSpec, RateTable, VaneError,
    fetch_with_timeout,
};

use crate::ReqwestTransport;

/// Currency rate tables from a `/latest/{base}` style endpoint.
///
/// Two public mirrors speak this shape; build them with
/// [`ExchangeRateConnector::exchangerate_api`] and
/// [`ExchangeRateConnector::open_er_api`].
pub struct ExchangeRateConnector {
    spec: ProviderSpec,
    path_prefix: &'static str,
    transport: Arc<dyn HttpTransport>,
}

impl ExchangeRateConnector {
    /// Key of the `api.exchangerate-api.com` source.
    pub const EXCHANGERATE_API_KEY: ConnectorKey = ConnectorKey::new("exchangerate-api");
    /// Key of the `open.er-api.com` source.
    pub const OPEN_ER_API_KEY: ConnectorKey = ConnectorKey::new("open-er-api");

    fn with_spec(key: ConnectorKey, base_url: &str, path_prefix: &'static str) -> Self {
        let spec = ProviderSpec::new(key, ProviderKind::Rates, base_url)
            .with_timeout(Duration::from_secs(8));
        Self {
            spec,
            path_prefix,
            transport: Arc::new(ReqwestTransport::new()),
        }
    }

    /// `https://api.exchangerate-api.com/v4/latest/{base}`.
    #[must_use]
    pub fn exchangerate_api() -> Self {
        Self::with_spec(
            Self::EXCHANGERATE_API_KEY,
            "https://api.exchangerate-api.com",
            "/v4/latest",
        )
    }

    /// `https://open.er-api.com/v6/latest/{base}`.
    #[must_use]
    pub fn open_er_api() -> Self {
        Self::with_spec(Self::OPEN_ER_API_KEY, "https://open.er-api.com", "/v6/latest")
    }
}

spec_connector_methods!(ExchangeRateConnector);

#[async_trait]
impl RatesProvider for ExchangeRateConnector {
    async fn rates(&self, base: &CurrencyCode) -> Result<RateTable, VaneError> {
        let req = HttpRequest::for_spec(&self.spec, &format!("{}/{base}", self.path_prefix))?;
        let resp =
            fetch_with_timeout(self.transport.as_ref(), self.name(), &req, self.spec.timeout())
                .await?;
        let doc: serde_json::Value = resp.json(self.name())?;
        RateTable::from_value(self.name(), doc)
    }
}

impl VaneConnector for ExchangeRateConnector {
    fn name(&self) -> &'static str {
        self.spec.key().as_str()
    }

    fn vendor(&self) -> &'static str {
        match self.spec.key().as_str() {
            "open-er-api" => "Open Exchange Rates API",
            _ => "ExchangeRate-API",
        }
    }

    fn timeout(&self) -> Option<Duration> {
        Some(self.spec.timeout())
    }

    fn as_rates_provider(&self) -> Option<&dyn RatesProvider> {
        Some(self as &dyn RatesProvider)
    }
}
