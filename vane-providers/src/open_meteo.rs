use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use vane_core::connector::{ConnectorKey, VaneConnector, WeatherProvider};
use vane_core::normalize::{RawWeather, normalize_weather};
use vane_core::{
    Coordinates, HttpRequest, HttpTransport, ProviderKind, ProviderSpec, VaneError,
    WeatherSnapshot, fetch_with_timeout,
};

use crate::ReqwestTransport;

const CURRENT_FIELDS: &str =
    "temperature_2m,apparent_temperature,relative_humidity_2m,wind_speed_10m,weather_code";
const DAILY_FIELDS: &str =
    "weather_code,temperature_2m_max,temperature_2m_min,precipitation_probability_max";

/// Weather from the Open-Meteo forecast API, already in WMO codes.
///
/// The same API is served from two hosts; register [`OpenMeteoConnector::primary`]
/// and [`OpenMeteoConnector::mirror`] as separate fallbacks.
pub struct OpenMeteoConnector {
    spec: ProviderSpec,
    transport: Arc<dyn HttpTransport>,
}

impl OpenMeteoConnector {
    /// Key of the primary host.
    pub const PRIMARY_KEY: ConnectorKey = ConnectorKey::new("open-meteo");
    /// Key of the mirror host.
    pub const MIRROR_KEY: ConnectorKey = ConnectorKey::new("open-meteo-mirror");

    fn with_spec(key: ConnectorKey, base_url: &str) -> Self {
        let spec = ProviderSpec::new(key, ProviderKind::WeatherPrimary, base_url)
            .with_timeout(Duration::from_secs(8));
        Self {
            spec,
            transport: Arc::new(ReqwestTransport::new()),
        }
    }

    /// `api.open-meteo.com`.
    #[must_use]
    pub fn primary() -> Self {
        Self::with_spec(Self::PRIMARY_KEY, "https://api.open-meteo.com")
    }

    /// `archive-api.open-meteo.com`.
    #[must_use]
    pub fn mirror() -> Self {
        Self::with_spec(Self::MIRROR_KEY, "https://archive-api.open-meteo.com")
    }

    fn request(&self, coords: Coordinates) -> Result<HttpRequest, VaneError> {
        let mut req = HttpRequest::for_spec(&self.spec, "/v1/forecast")?;
        req.url_mut()
            .query_pairs_mut()
            .append_pair("latitude", &coords.latitude().to_string())
            .append_pair("longitude", &coords.longitude().to_string())
            .append_pair("current", CURRENT_FIELDS)
            .append_pair("daily", DAILY_FIELDS)
            .append_pair("timezone", "auto")
            .append_pair("forecast_days", "7");
        Ok(req)
    }
}

spec_connector_methods!(OpenMeteoConnector);

#[async_trait]
impl WeatherProvider for OpenMeteoConnector {
    async fn weather(&self, coords: Coordinates) -> Result<WeatherSnapshot, VaneError> {
        let req = self.request(coords)?;
        let resp =
            fetch_with_timeout(self.transport.as_ref(), self.name(), &req, self.spec.timeout())
                .await?;
        let raw: RawWeather = resp.json(self.name())?;
        normalize_weather(&raw, self.spec.kind())
            .map(|s| s.with_source(self.name()))
            .ok_or_else(|| VaneError::validation(self.name(), "inconsistent daily forecast"))
    }
}

impl VaneConnector for OpenMeteoConnector {
    fn name(&self) -> &'static str {
        self.spec.key().as_str()
    }

    fn vendor(&self) -> &'static str {
        "Open-Meteo"
    }

    fn timeout(&self) -> Option<Duration> {
        Some(self.spec.timeout())
    }

    fn as_weather_provider(&self) -> Option<&dyn WeatherProvider> {
        Some(self as &dyn WeatherProvider)
    }
}
