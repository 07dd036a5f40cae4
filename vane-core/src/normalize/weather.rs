use chrono::NaiveDate;
use serde::Deserialize;
use vane_types::{CurrentConditions, DailyForecast, ProviderKind, WeatherCode, WeatherSnapshot};

/// Provider weather payload in column form, before code translation.
///
/// Field names follow the Open-Meteo forecast response so that payload can be
/// deserialized directly; other providers fill it by hand.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawWeather {
    /// Conditions at fetch time.
    pub current: RawCurrent,
    /// Forecast columns.
    pub daily: RawDaily,
}

/// Current conditions with the provider's own weather code.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawCurrent {
    /// °C
    #[serde(rename = "temperature_2m")]
    pub temperature: f64,
    /// °C
    pub apparent_temperature: f64,
    /// %
    #[serde(rename = "relative_humidity_2m")]
    pub humidity: f64,
    /// km/h
    #[serde(rename = "wind_speed_10m")]
    pub wind_speed: f64,
    /// Provider code.
    pub weather_code: i64,
}

/// Daily forecast columns; every column is indexed by day.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawDaily {
    /// `YYYY-MM-DD` dates.
    pub time: Vec<String>,
    /// Provider codes.
    pub weather_code: Vec<i64>,
    /// Daily maxima, °C.
    #[serde(rename = "temperature_2m_max")]
    pub temperature_max: Vec<f64>,
    /// Daily minima, °C.
    #[serde(rename = "temperature_2m_min")]
    pub temperature_min: Vec<f64>,
    /// Maximum precipitation probability per day; empty when not provided.
    #[serde(rename = "precipitation_probability_max", default)]
    pub precipitation_probability: Vec<Option<f64>>,
}

const WMO_CODES: &[u8] = &[
    0, 1, 2, 3, 45, 48, 51, 53, 55, 56, 57, 61, 63, 65, 66, 67, 71, 73, 75, 77, 80, 81, 82, 85,
    86, 95, 96, 99,
];

/// Accept a code already in the WMO vocabulary; anything else is `UNKNOWN`.
#[must_use]
pub fn wmo_code(raw: i64) -> WeatherCode {
    u8::try_from(raw)
        .ok()
        .filter(|c| WMO_CODES.contains(c))
        .map_or(WeatherCode::UNKNOWN, WeatherCode)
}

/// Translate a World Weather Online condition code into WMO.
#[must_use]
pub fn wwo_to_wmo(raw: i64) -> WeatherCode {
    let wmo = match raw {
        113 => 0,
        116 => 2,
        119 | 122 => 3,
        143 | 248 => 45,
        260 => 48,
        263 => 51,
        266 => 53,
        185 | 281 => 56,
        284 => 57,
        176 | 293 | 296 => 61,
        299 | 302 => 63,
        305 | 308 => 65,
        182 | 311 | 317 => 66,
        314 | 320 => 67,
        179 | 323 | 326 => 71,
        227 | 329 | 332 => 73,
        230 | 335 | 338 => 75,
        350 => 77,
        353 => 80,
        356 => 81,
        359 => 82,
        362 | 368 => 85,
        365 | 371 => 86,
        200 | 386 | 392 => 95,
        374 => 96,
        377 | 389 | 395 => 99,
        _ => return WeatherCode::UNKNOWN,
    };
    WeatherCode(wmo)
}

/// Map a column-form payload into a snapshot in the WMO vocabulary.
///
/// `kind` selects the code translation: `WeatherPrimary` codes are already WMO,
/// `WeatherAlternate` codes go through [`wwo_to_wmo`]. Returns `None` for other
/// kinds, non-finite current readings, empty or ragged daily columns, and
/// unparseable dates.
#[must_use]
pub fn normalize_weather(raw: &RawWeather, kind: ProviderKind) -> Option<WeatherSnapshot> {
    let translate: fn(i64) -> WeatherCode = match kind {
        ProviderKind::WeatherPrimary => wmo_code,
        ProviderKind::WeatherAlternate => wwo_to_wmo,
        _ => return None,
    };

    let c = &raw.current;
    let readings = [c.temperature, c.apparent_temperature, c.humidity, c.wind_speed];
    if !readings.iter().all(|v| v.is_finite()) {
        return None;
    }
    let current = CurrentConditions {
        temperature: c.temperature,
        apparent_temperature: c.apparent_temperature,
        humidity: c.humidity,
        wind_speed: c.wind_speed,
        weather_code: translate(c.weather_code),
    };

    let d = &raw.daily;
    let days = d.time.len();
    let precip_ok = d.precipitation_probability.is_empty() || d.precipitation_probability.len() == days;
    if days == 0
        || d.weather_code.len() != days
        || d.temperature_max.len() != days
        || d.temperature_min.len() != days
        || !precip_ok
    {
        return None;
    }

    let mut daily = Vec::with_capacity(days);
    for i in 0..days {
        let date = NaiveDate::parse_from_str(&d.time[i], "%Y-%m-%d").ok()?;
        let (max, min) = (d.temperature_max[i], d.temperature_min[i]);
        if !max.is_finite() || !min.is_finite() {
            return None;
        }
        daily.push(DailyForecast {
            date,
            weather_code: translate(d.weather_code[i]),
            temp_max: max,
            temp_min: min,
            precipitation_probability: d
                .precipitation_probability
                .get(i)
                .copied()
                .flatten()
                .filter(|p| p.is_finite()),
        });
    }

    Some(WeatherSnapshot::new(current, daily))
}
