//! Weather snapshots in the WMO code vocabulary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::VaneError;

/// Validated geographic coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Validate and build coordinates.
    ///
    /// # Errors
    /// Returns `InvalidArg` when either value is not finite or out of range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, VaneError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(VaneError::InvalidArg(format!(
                "latitude must be within [-90, 90], got {latitude}"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(VaneError::InvalidArg(format!(
                "longitude must be within [-180, 180], got {longitude}"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl core::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// WMO weather interpretation code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeatherCode(pub u8);

/// Display text and icon for a weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition {
    /// Short description.
    pub description: &'static str,
    /// Emoji icon.
    pub icon: &'static str,
}

impl WeatherCode {
    /// Sentinel for provider codes with no WMO equivalent.
    pub const UNKNOWN: Self = Self(u8::MAX);

    /// Display lookup for this code.
    #[must_use]
    pub const fn describe(self) -> Condition {
        let (description, icon) = match self.0 {
            0 => ("Clear", "☀️"),
            1 => ("Mainly clear", "🌤️"),
            2 => ("Partly cloudy", "⛅"),
            3 => ("Overcast", "☁️"),
            45 => ("Fog", "🌫️"),
            48 => ("Rime fog", "🌫️"),
            51 => ("Light drizzle", "🌦️"),
            53 => ("Drizzle", "🌦️"),
            55 => ("Dense drizzle", "🌧️"),
            56 | 57 => ("Freezing drizzle", "🌧️"),
            61 => ("Light rain", "🌧️"),
            63 => ("Rain", "🌧️"),
            65 => ("Heavy rain", "🌧️"),
            66 | 67 => ("Freezing rain", "🌧️"),
            71 => ("Light snow", "🌨️"),
            73 => ("Snow", "🌨️"),
            75 => ("Heavy snow", "❄️"),
            77 => ("Snow grains", "❄️"),
            80 => ("Light showers", "🌦️"),
            81 => ("Showers", "🌧️"),
            82 => ("Violent showers", "⛈️"),
            85 | 86 => ("Snow showers", "🌨️"),
            95 => ("Thunderstorm", "⛈️"),
            96 | 99 => ("Thunderstorm with hail", "⛈️"),
            _ => ("Unknown", "❓"),
        };
        Condition { description, icon }
    }

    /// True for the [`WeatherCode::UNKNOWN`] sentinel.
    #[must_use]
    pub const fn is_unknown(self) -> bool {
        self.0 == Self::UNKNOWN.0
    }
}

/// Conditions at fetch time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditions {
    /// Air temperature, °C.
    pub temperature: f64,
    /// Feels-like temperature, °C.
    pub apparent_temperature: f64,
    /// Relative humidity, %.
    pub humidity: f64,
    /// Wind speed, km/h.
    pub wind_speed: f64,
    /// WMO condition code.
    pub weather_code: WeatherCode,
}

/// One forecast day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecast {
    /// Calendar date in the location's timezone.
    pub date: NaiveDate,
    /// WMO condition code.
    pub weather_code: WeatherCode,
    /// Daily maximum, °C.
    pub temp_max: f64,
    /// Daily minimum, °C.
    pub temp_min: f64,
    /// Maximum precipitation probability, %, when the provider has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precipitation_probability: Option<f64>,
}

/// Current conditions plus a forecast sorted ascending by date without duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    /// Conditions at fetch time.
    pub current: CurrentConditions,
    /// Forecast days.
    pub daily: Vec<DailyForecast>,
    /// Connector that produced the snapshot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl WeatherSnapshot {
    /// Build a snapshot, sorting the forecast by date and keeping the first entry
    /// for each date.
    #[must_use]
    pub fn new(current: CurrentConditions, mut daily: Vec<DailyForecast>) -> Self {
        daily.sort_by_key(|d| d.date);
        daily.dedup_by_key(|d| d.date);
        Self {
            current,
            daily,
            source: None,
        }
    }

    /// Tag the snapshot with the connector that produced it.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}
