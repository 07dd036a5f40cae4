use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use vane_core::connector::{ConnectorKey, VaneConnector, WeatherProvider};
use vane_core::normalize::{RawCurrent, RawDaily, RawWeather, normalize_weather};
use vane_core::{
    Coordinates, HttpRequest, HttpTransport, ProviderKind, ProviderSpec, VaneError,
    WeatherSnapshot, fetch_with_timeout,
};

use crate::ReqwestTransport;

/// Last-resort weather from wttr.in's `j1` JSON format.
///
/// Numbers arrive as strings and condition codes are World Weather Online
/// codes, translated to WMO during normalization.
pub struct WttrConnector {
    spec: ProviderSpec,
    transport: Arc<dyn HttpTransport>,
}

#[derive(Deserialize)]
struct WttrReport {
    current_condition: Vec<WttrCurrent>,
    weather: Vec<WttrDay>,
}

#[derive(Deserialize)]
struct WttrCurrent {
    #[serde(rename = "temp_C")]
    temp_c: String,
    #[serde(rename = "FeelsLikeC")]
    feels_like_c: String,
    humidity: String,
    #[serde(rename = "windspeedKmph")]
    windspeed_kmph: String,
    #[serde(rename = "weatherCode")]
    weather_code: String,
}

#[derive(Deserialize)]
struct WttrDay {
    date: String,
    #[serde(rename = "maxtempC")]
    max_temp_c: String,
    #[serde(rename = "mintempC")]
    min_temp_c: String,
    #[serde(default)]
    hourly: Vec<WttrHourly>,
}

#[derive(Deserialize)]
struct WttrHourly {
    #[serde(rename = "weatherCode")]
    weather_code: String,
    #[serde(default)]
    chanceofrain: Option<String>,
}

// Eight 3-hourly slots per day; slot 4 is midday.
const MIDDAY_SLOT: usize = 4;

// Codes outside the WWO table translate to UNKNOWN.
const NO_CODE: i64 = -1;

impl WttrConnector {
    /// Static connector key for priority configuration.
    pub const KEY: ConnectorKey = ConnectorKey::new("wttr");

    const BASE_URL: &'static str = "https://wttr.in";

    /// Connector against the public endpoint with an 8 s budget.
    #[must_use]
    pub fn new() -> Self {
        let spec = ProviderSpec::new(Self::KEY, ProviderKind::WeatherAlternate, Self::BASE_URL)
            .with_timeout(Duration::from_secs(8));
        Self {
            spec,
            transport: Arc::new(ReqwestTransport::new()),
        }
    }

    fn request(&self, coords: Coordinates) -> Result<HttpRequest, VaneError> {
        let mut req = HttpRequest::for_spec(&self.spec, &format!("/{coords}"))?;
        req.url_mut().query_pairs_mut().append_pair("format", "j1");
        Ok(req)
    }

    fn num(&self, field: &str, raw: &str) -> Result<f64, VaneError> {
        raw.trim()
            .parse::<f64>()
            .map_err(|_| VaneError::parse(self.name(), format!("{field} is not a number: '{raw}'")))
    }

    fn code(&self, field: &str, raw: &str) -> Result<i64, VaneError> {
        raw.trim()
            .parse::<i64>()
            .map_err(|_| VaneError::parse(self.name(), format!("{field} is not a code: '{raw}'")))
    }

    fn to_raw(&self, report: WttrReport) -> Result<RawWeather, VaneError> {
        let now = report
            .current_condition
            .first()
            .ok_or_else(|| VaneError::parse(self.name(), "no current_condition"))?;
        let current = RawCurrent {
            temperature: self.num("temp_C", &now.temp_c)?,
            apparent_temperature: self.num("FeelsLikeC", &now.feels_like_c)?,
            humidity: self.num("humidity", &now.humidity)?,
            wind_speed: self.num("windspeedKmph", &now.windspeed_kmph)?,
            weather_code: self.code("weatherCode", &now.weather_code)?,
        };

        let mut daily = RawDaily {
            time: Vec::with_capacity(report.weather.len()),
            weather_code: Vec::with_capacity(report.weather.len()),
            temperature_max: Vec::with_capacity(report.weather.len()),
            temperature_min: Vec::with_capacity(report.weather.len()),
            precipitation_probability: Vec::with_capacity(report.weather.len()),
        };
        for day in &report.weather {
            let slot = day.hourly.get(MIDDAY_SLOT).or_else(|| day.hourly.first());
            let code = match slot {
                Some(h) => self.code("weatherCode", &h.weather_code)?,
                None => NO_CODE,
            };
            let rain = day
                .hourly
                .iter()
                .filter_map(|h| h.chanceofrain.as_deref()?.trim().parse::<f64>().ok())
                .reduce(f64::max);
            daily.time.push(day.date.clone());
            daily.weather_code.push(code);
            daily.temperature_max.push(self.num("maxtempC", &day.max_temp_c)?);
            daily.temperature_min.push(self.num("mintempC", &day.min_temp_c)?);
            daily.precipitation_probability.push(rain);
        }
        Ok(RawWeather { current, daily })
    }
}

impl Default for WttrConnector {
    fn default() -> Self {
        Self::new()
    }
}

spec_connector_methods!(WttrConnector);

#[async_trait]
impl WeatherProvider for WttrConnector {
    async fn weather(&self, coords: Coordinates) -> Result<WeatherSnapshot, VaneError> {
        let req = self.request(coords)?;
        let resp =
            fetch_with_timeout(self.transport.as_ref(), self.name(), &req, self.spec.timeout())
                .await?;
        let report: WttrReport = resp.json(self.name())?;
        let raw = self.to_raw(report)?;
        normalize_weather(&raw, self.spec.kind())
            .map(|s| s.with_source(self.name()))
            .ok_or_else(|| VaneError::validation(self.name(), "inconsistent daily forecast"))
    }
}

impl VaneConnector for WttrConnector {
    fn name(&self) -> &'static str {
        self.spec.key().as_str()
    }

    fn vendor(&self) -> &'static str {
        "wttr.in"
    }

    fn timeout(&self) -> Option<Duration> {
        Some(self.spec.timeout())
    }

    fn as_weather_provider(&self) -> Option<&dyn WeatherProvider> {
        Some(self as &dyn WeatherProvider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_coordinates() {
        let c = WttrConnector::new().with_base_url("http://127.0.0.1:1");
        let req = c.request(Coordinates::new(31.23, 121.47).unwrap()).unwrap();
        assert_eq!(req.url().path(), "/31.23,121.47");
        assert_eq!(req.url().query(), Some("format=j1"));
    }

    #[test]
    fn non_numeric_fields_are_parse_errors() {
        let c = WttrConnector::new();
        let report: WttrReport = serde_json::from_str(
            r#"{"current_condition":[{"temp_C":"n/a","FeelsLikeC":"1","humidity":"1",
                "windspeedKmph":"1","weatherCode":"113"}],"weather":[]}"#,
        )
        .unwrap();
        assert!(matches!(c.to_raw(report), Err(VaneError::Parse { .. })));
    }
}
