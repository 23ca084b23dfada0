//! # Weather Adapter
//!
//! Fetches current conditions from the Open-Meteo forecast API and normalizes
//! them into a [`WeatherSnapshot`].
//!
//! ## Data Source
//! - **URL**: https://api.open-meteo.com/v1/forecast
//! - **Format**: JSON, temperatures requested in °F
//! - **Fields**: `current.temperature_2m`, `current.weather_code`,
//!   `daily.temperature_2m_max[0]`, `daily.temperature_2m_min[0]`
//!
//! ## Error Handling
//! Every failure surfaces as a [`WeatherError`]; the caller is expected to fall
//! back to [`crate::fallback::unavailable_weather`] so the board still renders.

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::config::WeatherConfig;
use crate::WeatherSnapshot;

const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur while fetching weather.
#[derive(Error, Debug)]
pub enum WeatherError {
    /// HTTP request failed (network, server, or protocol error)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response parsed but lacked a required value
    #[error("missing field: {0}")]
    Missing(&'static str),
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentBlock,
    daily: DailyBlock,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    temperature_2m: f64,
    weather_code: i32,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
}

/// Fetch today's conditions for the configured location.
pub async fn fetch(config: &WeatherConfig) -> Result<WeatherSnapshot, WeatherError> {
    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()?;

    let latitude = config.latitude.to_string();
    let longitude = config.longitude.to_string();
    let response: ForecastResponse = client
        .get(FORECAST_URL)
        .query(&[
            ("latitude", latitude.as_str()),
            ("longitude", longitude.as_str()),
            ("current", "temperature_2m,weather_code"),
            ("daily", "temperature_2m_max,temperature_2m_min"),
            ("temperature_unit", "fahrenheit"),
            ("timezone", "auto"),
            ("forecast_days", "1"),
        ])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let snapshot = normalize(response)?;
    debug!(?snapshot, "weather fetched");
    Ok(snapshot)
}

fn normalize(response: ForecastResponse) -> Result<WeatherSnapshot, WeatherError> {
    let high = response
        .daily
        .temperature_2m_max
        .first()
        .copied()
        .ok_or(WeatherError::Missing("daily.temperature_2m_max"))?;
    let low = response
        .daily
        .temperature_2m_min
        .first()
        .copied()
        .ok_or(WeatherError::Missing("daily.temperature_2m_min"))?;
    let code = response.current.weather_code;

    Ok(WeatherSnapshot {
        temperature: response.current.temperature_2m.round() as i32,
        temperature_high: high.round() as i32,
        temperature_low: low.round() as i32,
        condition: condition_label(code).to_string(),
        condition_code: code,
    })
}

/// Short display text for a WMO weather code.
pub fn condition_label(code: i32) -> &'static str {
    match code {
        0 => "Clear",
        1 => "Mostly Clear",
        2 => "Partly Cloudy",
        3 => "Overcast",
        45 | 48 => "Fog",
        51..=57 => "Drizzle",
        61..=67 => "Rain",
        71..=77 => "Snow",
        80..=82 => "Showers",
        85 | 86 => "Snow Showers",
        95..=99 => "Thunderstorm",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "latitude": 37.77,
        "longitude": -122.42,
        "current": {"time": "2026-10-18T09:00", "temperature_2m": 71.6, "weather_code": 2},
        "daily": {
            "time": ["2026-10-18"],
            "temperature_2m_max": [78.4],
            "temperature_2m_min": [60.5]
        }
    }"#;

    #[test]
    fn test_normalize_rounds_temperatures() {
        let response: ForecastResponse = serde_json::from_str(SAMPLE).unwrap();
        let snapshot = normalize(response).unwrap();
        assert_eq!(snapshot.temperature, 72);
        assert_eq!(snapshot.temperature_high, 78);
        assert_eq!(snapshot.temperature_low, 61);
        assert_eq!(snapshot.condition, "Partly Cloudy");
        assert_eq!(snapshot.condition_code, 2);
    }

    #[test]
    fn test_normalize_rejects_empty_daily() {
        let response = ForecastResponse {
            current: CurrentBlock {
                temperature_2m: 50.0,
                weather_code: 0,
            },
            daily: DailyBlock {
                temperature_2m_max: vec![],
                temperature_2m_min: vec![40.0],
            },
        };
        assert!(matches!(
            normalize(response),
            Err(WeatherError::Missing("daily.temperature_2m_max"))
        ));
    }

    #[test]
    fn test_condition_labels() {
        assert_eq!(condition_label(0), "Clear");
        assert_eq!(condition_label(63), "Rain");
        assert_eq!(condition_label(96), "Thunderstorm");
        assert_eq!(condition_label(-1), "Unknown");
    }
}
