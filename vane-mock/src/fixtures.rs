//! Deterministic records for tests.

use chrono::NaiveDate;
use vane_core::{
    CurrentConditions, DailyForecast, Instrument, Market, Quote, RateTable, WeatherCode,
    WeatherSnapshot,
};

/// Domestic instrument whose batch code is the lower-cased symbol.
#[must_use]
pub fn instrument(symbol: &str) -> Instrument {
    Instrument::new(symbol, symbol, Market::Domestic, symbol.to_ascii_lowercase())
}

/// Valid quote with `price` and a previous close of `price - 1`.
#[must_use]
pub fn quote(symbol: &str, price: f64) -> Quote {
    Quote {
        symbol: symbol.to_string(),
        display_name: symbol.to_string(),
        flag: None,
        price,
        change: 1.0,
        change_percent: vane_core::change_percent(1.0, price - 1.0),
        open: None,
        high: None,
        low: None,
        error_message: None,
        source: None,
    }
}

/// Three-day snapshot with a recognizable current temperature.
#[must_use]
pub fn snapshot(temperature: f64) -> WeatherSnapshot {
    let day = |d: u32| DailyForecast {
        date: NaiveDate::from_ymd_opt(2026, 1, d).expect("valid fixture date"),
        weather_code: WeatherCode(1),
        temp_max: temperature + 5.0,
        temp_min: temperature - 5.0,
        precipitation_probability: Some(10.0),
    };
    WeatherSnapshot::new(
        CurrentConditions {
            temperature,
            apparent_temperature: temperature,
            humidity: 50.0,
            wind_speed: 5.0,
            weather_code: WeatherCode(0),
        },
        vec![day(1), day(2), day(3)],
    )
}

/// Rate table for `base` listing a single USD rate.
#[must_use]
pub fn rate_table(base: &str, usd: f64) -> RateTable {
    let doc = serde_json::json!({ "base": base, "rates": { "USD": usd } });
    RateTable::from_value("vane-mock", doc).expect("fixture carries a rates object")
}
