//! Open-Meteo forecast API client and mappers
//!
//! This module fetches the current/daily/hourly payloads from the
//! Open-Meteo forecast API and maps them into the canonical records in
//! `crate::data`. The mappers are pure functions over the decoded
//! response and never substitute fallback data themselves; the caller
//! decides what to do when they fail.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::codes;
use super::{Coordinates, ForecastDay, HourlySlot, WeatherSnapshot};

/// Base URL for the Open-Meteo forecast API
const OPEN_METEO_BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Variables requested for the `current` section
const CURRENT_VARIABLES: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,precipitation,weather_code,pressure_msl,wind_speed_10m,wind_direction_10m,visibility";

/// Variables requested for the `daily` section
const DAILY_VARIABLES: &str = "temperature_2m_max,temperature_2m_min,precipitation_sum,weather_code";

/// Variables requested for the `hourly` section
const HOURLY_VARIABLES: &str = "temperature_2m,weather_code,precipitation_probability";

/// Number of hourly entries selected for the forward-looking window
const HOURLY_WINDOW: usize = 24;

/// Errors that can occur when fetching or mapping weather data
#[derive(Debug, Error)]
pub enum WeatherError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// A required section is absent or its parallel arrays disagree
    #[error("Malformed response shape: {0}")]
    InvalidResponseShape(String),

    /// Invalid time format in response
    #[error("Invalid time format: {0}")]
    InvalidTimeFormat(String),
}

/// Client for fetching weather data from the Open-Meteo forecast API
#[derive(Debug, Clone, Default)]
pub struct WeatherClient {
    client: Client,
}

impl WeatherClient {
    /// Creates a new WeatherClient with default settings
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Creates a new WeatherClient with a custom HTTP client
    #[allow(dead_code)]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetches current conditions for the given coordinates.
    pub async fn fetch_current(
        &self,
        coords: Coordinates,
    ) -> Result<WeatherSnapshot, WeatherError> {
        let url = format!(
            "{}?latitude={}&longitude={}&current={}&timezone=auto",
            OPEN_METEO_BASE_URL, coords.latitude, coords.longitude, CURRENT_VARIABLES
        );

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let text = response.text().await?;
        let parsed: ForecastResponse = serde_json::from_str(&text)?;

        map_current(&parsed)
    }

    /// Fetches the daily forecast for the given coordinates.
    pub async fn fetch_daily(
        &self,
        coords: Coordinates,
    ) -> Result<Vec<ForecastDay>, WeatherError> {
        let url = format!(
            "{}?latitude={}&longitude={}&daily={}&timezone=auto",
            OPEN_METEO_BASE_URL, coords.latitude, coords.longitude, DAILY_VARIABLES
        );

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let text = response.text().await?;
        let parsed: ForecastResponse = serde_json::from_str(&text)?;

        map_daily(&parsed)
    }

    /// Fetches the hourly forecast for the given coordinates and selects
    /// the 24-hour window starting at `reference`'s hour of day.
    pub async fn fetch_hourly(
        &self,
        coords: Coordinates,
        reference: NaiveDateTime,
    ) -> Result<Vec<HourlySlot>, WeatherError> {
        let url = format!(
            "{}?latitude={}&longitude={}&hourly={}&timezone=auto",
            OPEN_METEO_BASE_URL, coords.latitude, coords.longitude, HOURLY_VARIABLES
        );

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let text = response.text().await?;
        let parsed: ForecastResponse = serde_json::from_str(&text)?;

        map_hourly(&parsed, reference)
    }
}

/// Maps the `current` section into a WeatherSnapshot.
///
/// Values pass through unconverted; the weather code resolves through the
/// code table, falling back to the Unknown pair for unrecognized codes.
pub fn map_current(response: &ForecastResponse) -> Result<WeatherSnapshot, WeatherError> {
    let current = response
        .current
        .as_ref()
        .ok_or_else(|| WeatherError::InvalidResponseShape("missing current section".to_string()))?;

    let info = codes::lookup(current.weather_code);
    let timestamp = parse_datetime(&current.time)?;

    Ok(WeatherSnapshot {
        temperature: current.temperature_2m,
        feels_like: current.apparent_temperature,
        humidity: current.relative_humidity_2m,
        wind_speed: current.wind_speed_10m,
        wind_direction: current.wind_direction_10m,
        pressure: current.pressure_msl,
        visibility: current.visibility,
        precipitation: current.precipitation,
        description: info.description.to_string(),
        icon: info.icon.to_string(),
        timestamp,
    })
}

/// Maps the `daily` section into one ForecastDay per input index.
///
/// The parallel arrays must agree in length; order is preserved as-is and
/// min/max values are never reordered or clamped. The daily payload
/// carries no wind variable, so `wind_speed` is always `0.0` here.
pub fn map_daily(response: &ForecastResponse) -> Result<Vec<ForecastDay>, WeatherError> {
    let daily = response
        .daily
        .as_ref()
        .ok_or_else(|| WeatherError::InvalidResponseShape("missing daily section".to_string()))?;

    let len = daily.time.len();
    if daily.temperature_2m_min.len() != len
        || daily.temperature_2m_max.len() != len
        || daily.weather_code.len() != len
        || daily.precipitation_sum.len() != len
    {
        return Err(WeatherError::InvalidResponseShape(
            "daily arrays have inconsistent lengths".to_string(),
        ));
    }

    let mut days = Vec::with_capacity(len);
    for i in 0..len {
        let info = codes::lookup(daily.weather_code[i]);
        days.push(ForecastDay {
            date: parse_date(&daily.time[i])?,
            temp_min: daily.temperature_2m_min[i],
            temp_max: daily.temperature_2m_max[i],
            description: info.description.to_string(),
            icon: info.icon.to_string(),
            precipitation: daily.precipitation_sum[i],
            wind_speed: 0.0,
        });
    }

    Ok(days)
}

/// Maps the `hourly` section into the forward-looking 24-slot window.
///
/// The hourly arrays start at local midnight of the current day, so the
/// window starts at the array index equal to `reference`'s hour of day.
/// When fewer than 24 entries remain past the start index, only the
/// remaining entries are returned. Each slot's icon is day/night-adjusted
/// for the slot's own local hour.
pub fn map_hourly(
    response: &ForecastResponse,
    reference: NaiveDateTime,
) -> Result<Vec<HourlySlot>, WeatherError> {
    let hourly = response
        .hourly
        .as_ref()
        .ok_or_else(|| WeatherError::InvalidResponseShape("missing hourly section".to_string()))?;

    let len = hourly.time.len();
    if hourly.temperature_2m.len() != len
        || hourly.weather_code.len() != len
        || hourly.precipitation_probability.len() != len
    {
        return Err(WeatherError::InvalidResponseShape(
            "hourly arrays have inconsistent lengths".to_string(),
        ));
    }

    let start = (reference.hour() as usize).min(len);
    let end = (start + HOURLY_WINDOW).min(len);

    let mut slots = Vec::with_capacity(end - start);
    for i in start..end {
        let time = parse_datetime(&hourly.time[i])?;
        let code = hourly.weather_code[i];
        let info = codes::lookup(code);
        let icon = codes::icon_for(code, codes::is_daytime_hour(time.hour()));

        slots.push(HourlySlot {
            time,
            temperature: hourly.temperature_2m[i],
            description: info.description.to_string(),
            icon: icon.to_string(),
            precipitation_probability: hourly.precipitation_probability[i],
        });
    }

    Ok(slots)
}

/// Parses an ISO 8601 datetime as reported by Open-Meteo
/// (e.g. "2024-07-15T14:00", occasionally with seconds).
fn parse_datetime(datetime_str: &str) -> Result<NaiveDateTime, WeatherError> {
    NaiveDateTime::parse_from_str(datetime_str, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(datetime_str, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|_| WeatherError::InvalidTimeFormat(datetime_str.to_string()))
}

/// Parses an ISO date string (e.g. "2024-07-15") to NaiveDate
fn parse_date(date_str: &str) -> Result<NaiveDate, WeatherError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| WeatherError::InvalidTimeFormat(date_str.to_string()))
}

/// Open-Meteo forecast API response structure
///
/// Every section is optional on the wire: which ones are present depends
/// on the variables requested, and an absent section must map to
/// `InvalidResponseShape` rather than a decode failure.
#[derive(Debug, Deserialize, Default)]
pub struct ForecastResponse {
    current: Option<RawCurrent>,
    daily: Option<RawDaily>,
    hourly: Option<RawHourly>,
}

/// Current conditions section from Open-Meteo
#[derive(Debug, Deserialize)]
struct RawCurrent {
    temperature_2m: f64,
    apparent_temperature: f64,
    relative_humidity_2m: f64,
    wind_speed_10m: f64,
    wind_direction_10m: f64,
    pressure_msl: f64,
    visibility: f64,
    precipitation: f64,
    weather_code: u8,
    time: String,
}

/// Daily forecast section from Open-Meteo (parallel arrays)
#[derive(Debug, Deserialize)]
struct RawDaily {
    time: Vec<String>,
    temperature_2m_min: Vec<f64>,
    temperature_2m_max: Vec<f64>,
    weather_code: Vec<u8>,
    precipitation_sum: Vec<f64>,
}

/// Hourly forecast section from Open-Meteo (parallel arrays)
#[derive(Debug, Deserialize)]
struct RawHourly {
    time: Vec<String>,
    temperature_2m: Vec<f64>,
    weather_code: Vec<u8>,
    precipitation_probability: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    /// Sample valid current-conditions response
    const CURRENT_RESPONSE: &str = r#"{
        "latitude": 49.28,
        "longitude": -123.12,
        "generationtime_ms": 0.123,
        "utc_offset_seconds": -25200,
        "timezone": "America/Vancouver",
        "timezone_abbreviation": "PDT",
        "elevation": 5.0,
        "current_units": {
            "time": "iso8601",
            "interval": "seconds",
            "temperature_2m": "°C",
            "relative_humidity_2m": "%",
            "apparent_temperature": "°C",
            "precipitation": "mm",
            "weather_code": "wmo code",
            "pressure_msl": "hPa",
            "wind_speed_10m": "km/h",
            "wind_direction_10m": "°",
            "visibility": "m"
        },
        "current": {
            "time": "2024-07-15T14:00",
            "interval": 900,
            "temperature_2m": 22.5,
            "relative_humidity_2m": 65,
            "apparent_temperature": 23.8,
            "precipitation": 0.5,
            "weather_code": 2,
            "pressure_msl": 1012.4,
            "wind_speed_10m": 12.5,
            "wind_direction_10m": 270,
            "visibility": 9000
        }
    }"#;

    /// Sample valid daily-forecast response
    const DAILY_RESPONSE: &str = r#"{
        "latitude": 49.28,
        "longitude": -123.12,
        "daily_units": {
            "time": "iso8601",
            "temperature_2m_min": "°C",
            "temperature_2m_max": "°C",
            "weather_code": "wmo code",
            "precipitation_sum": "mm"
        },
        "daily": {
            "time": ["2024-07-01", "2024-07-02"],
            "temperature_2m_min": [15, 16],
            "temperature_2m_max": [25, 26],
            "weather_code": [1, 2],
            "precipitation_sum": [0, 1]
        }
    }"#;

    /// Two full days of hourly data starting at local midnight
    const HOURLY_RESPONSE: &str = r#"{
        "latitude": 49.28,
        "longitude": -123.12,
        "hourly_units": {
            "time": "iso8601",
            "temperature_2m": "°C",
            "weather_code": "wmo code",
            "precipitation_probability": "%"
        },
        "hourly": {
            "time": [
                "2024-07-15T00:00", "2024-07-15T01:00", "2024-07-15T02:00", "2024-07-15T03:00",
                "2024-07-15T04:00", "2024-07-15T05:00", "2024-07-15T06:00", "2024-07-15T07:00",
                "2024-07-15T08:00", "2024-07-15T09:00", "2024-07-15T10:00", "2024-07-15T11:00",
                "2024-07-15T12:00", "2024-07-15T13:00", "2024-07-15T14:00", "2024-07-15T15:00",
                "2024-07-15T16:00", "2024-07-15T17:00", "2024-07-15T18:00", "2024-07-15T19:00",
                "2024-07-15T20:00", "2024-07-15T21:00", "2024-07-15T22:00", "2024-07-15T23:00",
                "2024-07-16T00:00", "2024-07-16T01:00", "2024-07-16T02:00", "2024-07-16T03:00",
                "2024-07-16T04:00", "2024-07-16T05:00", "2024-07-16T06:00", "2024-07-16T07:00",
                "2024-07-16T08:00", "2024-07-16T09:00", "2024-07-16T10:00", "2024-07-16T11:00",
                "2024-07-16T12:00", "2024-07-16T13:00", "2024-07-16T14:00", "2024-07-16T15:00",
                "2024-07-16T16:00", "2024-07-16T17:00", "2024-07-16T18:00", "2024-07-16T19:00",
                "2024-07-16T20:00", "2024-07-16T21:00", "2024-07-16T22:00", "2024-07-16T23:00"
            ],
            "temperature_2m": [
                15.2, 14.8, 14.5, 14.2, 14.0, 14.5, 16.0, 18.5,
                20.0, 21.5, 22.5, 23.5, 24.0, 24.5, 24.8, 24.5,
                24.0, 23.0, 21.5, 20.0, 18.5, 17.5, 16.5, 15.8,
                15.5, 15.2, 14.8, 14.5, 14.2, 14.8, 16.5, 19.0,
                20.5, 22.0, 23.0, 24.0, 24.5, 25.0, 25.2, 25.0,
                24.5, 23.5, 22.0, 20.5, 19.0, 18.0, 17.0, 16.2
            ],
            "weather_code": [
                0, 0, 0, 0, 0, 1, 1, 1,
                2, 2, 2, 3, 3, 2, 2, 2,
                1, 1, 0, 0, 0, 0, 0, 0,
                0, 0, 0, 0, 0, 1, 1, 2,
                2, 3, 3, 3, 2, 2, 1, 1,
                1, 0, 0, 0, 0, 0, 0, 0
            ],
            "precipitation_probability": [
                0, 0, 0, 0, 0, 5, 5, 10,
                10, 15, 20, 25, 30, 25, 20, 15,
                10, 10, 5, 5, 0, 0, 0, 0,
                0, 0, 0, 0, 0, 5, 10, 15,
                20, 30, 35, 40, 35, 30, 20, 15,
                10, 5, 5, 0, 0, 0, 0, 0
            ]
        }
    }"#;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_map_current_valid_response() {
        let response: ForecastResponse =
            serde_json::from_str(CURRENT_RESPONSE).expect("Failed to parse valid response");

        let snapshot = map_current(&response).expect("Failed to map current conditions");

        assert!((snapshot.temperature - 22.5).abs() < 0.01);
        assert!((snapshot.feels_like - 23.8).abs() < 0.01);
        assert!((snapshot.humidity - 65.0).abs() < 0.01);
        assert!((snapshot.wind_speed - 12.5).abs() < 0.01);
        assert!((snapshot.wind_direction - 270.0).abs() < 0.01);
        assert!((snapshot.pressure - 1012.4).abs() < 0.01);
        assert!((snapshot.visibility - 9000.0).abs() < 0.01);
        assert!((snapshot.precipitation - 0.5).abs() < 0.01);
        assert_eq!(snapshot.description, "Partly cloudy");
        assert_eq!(snapshot.icon, "⛅");
        assert_eq!(snapshot.timestamp, at(2024, 7, 15, 14));
    }

    #[test]
    fn test_map_current_missing_section() {
        let response: ForecastResponse = serde_json::from_str("{}").expect("Failed to parse");
        let result = map_current(&response);

        match result {
            Err(WeatherError::InvalidResponseShape(msg)) => {
                assert!(msg.contains("current"));
            }
            _ => panic!("Expected InvalidResponseShape error"),
        }
    }

    #[test]
    fn test_map_current_unknown_code_resolves_to_unknown_pair() {
        let response = ForecastResponse {
            current: Some(RawCurrent {
                temperature_2m: 10.0,
                apparent_temperature: 9.0,
                relative_humidity_2m: 80.0,
                wind_speed_10m: 5.0,
                wind_direction_10m: 90.0,
                pressure_msl: 1000.0,
                visibility: 5000.0,
                precipitation: 0.0,
                weather_code: 42,
                time: "2024-07-15T10:00".to_string(),
            }),
            ..Default::default()
        };

        let snapshot = map_current(&response).expect("Failed to map");
        assert_eq!(snapshot.description, "Unknown");
        assert_eq!(snapshot.icon, "❓");
    }

    #[test]
    fn test_map_daily_valid_response() {
        let response: ForecastResponse =
            serde_json::from_str(DAILY_RESPONSE).expect("Failed to parse valid response");

        let days = map_daily(&response).expect("Failed to map daily forecast");

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
        assert!((days[0].temp_min - 15.0).abs() < 0.01);
        assert!((days[0].temp_max - 25.0).abs() < 0.01);
        assert_eq!(days[0].description, "Mainly clear");
        assert_eq!(days[0].icon, "🌤️");
        assert!((days[0].precipitation - 0.0).abs() < 0.01);

        assert_eq!(days[1].date, NaiveDate::from_ymd_opt(2024, 7, 2).unwrap());
        assert!((days[1].temp_min - 16.0).abs() < 0.01);
        assert!((days[1].temp_max - 26.0).abs() < 0.01);
        assert_eq!(days[1].description, "Partly cloudy");
        assert!((days[1].precipitation - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_map_daily_wind_speed_is_zero() {
        let response: ForecastResponse =
            serde_json::from_str(DAILY_RESPONSE).expect("Failed to parse valid response");

        let days = map_daily(&response).expect("Failed to map daily forecast");
        for day in &days {
            assert!((day.wind_speed - 0.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_map_daily_missing_section() {
        let response: ForecastResponse = serde_json::from_str("{}").expect("Failed to parse");
        let result = map_daily(&response);

        match result {
            Err(WeatherError::InvalidResponseShape(msg)) => {
                assert!(msg.contains("daily"));
            }
            _ => panic!("Expected InvalidResponseShape error"),
        }
    }

    #[test]
    fn test_map_daily_mismatched_array_lengths() {
        let response = ForecastResponse {
            daily: Some(RawDaily {
                time: vec!["2024-07-01".to_string(), "2024-07-02".to_string()],
                temperature_2m_min: vec![15.0],
                temperature_2m_max: vec![25.0, 26.0],
                weather_code: vec![1, 2],
                precipitation_sum: vec![0.0, 1.0],
            }),
            ..Default::default()
        };

        let result = map_daily(&response);
        match result {
            Err(WeatherError::InvalidResponseShape(msg)) => {
                assert!(msg.contains("inconsistent lengths"));
            }
            _ => panic!("Expected InvalidResponseShape error"),
        }
    }

    #[test]
    fn test_map_daily_preserves_inverted_min_max() {
        // The mapper passes temperature bounds through without reordering
        // or clamping, so an upstream violation stays visible downstream.
        let response = ForecastResponse {
            daily: Some(RawDaily {
                time: vec!["2024-07-01".to_string()],
                temperature_2m_min: vec![30.0],
                temperature_2m_max: vec![20.0],
                weather_code: vec![0],
                precipitation_sum: vec![0.0],
            }),
            ..Default::default()
        };

        let days = map_daily(&response).expect("Failed to map");
        assert!((days[0].temp_min - 30.0).abs() < 0.01);
        assert!((days[0].temp_max - 20.0).abs() < 0.01);
    }

    #[test]
    fn test_map_hourly_window_starts_at_reference_hour() {
        let response: ForecastResponse =
            serde_json::from_str(HOURLY_RESPONSE).expect("Failed to parse valid response");

        let slots = map_hourly(&response, at(2024, 7, 15, 14)).expect("Failed to map hourly");

        // Index 14 through 37: a full 24-hour window
        assert_eq!(slots.len(), 24);
        assert_eq!(slots[0].time, at(2024, 7, 15, 14));
        assert!((slots[0].temperature - 24.8).abs() < 0.01);
        assert_eq!(slots[23].time, at(2024, 7, 16, 13));
        assert!((slots[23].temperature - 24.0).abs() < 0.01);
    }

    #[test]
    fn test_map_hourly_window_at_midnight_takes_first_day() {
        let response: ForecastResponse =
            serde_json::from_str(HOURLY_RESPONSE).expect("Failed to parse valid response");

        let slots = map_hourly(&response, at(2024, 7, 15, 0)).expect("Failed to map hourly");

        assert_eq!(slots.len(), 24);
        assert_eq!(slots[0].time, at(2024, 7, 15, 0));
        assert_eq!(slots[23].time, at(2024, 7, 15, 23));
    }

    #[test]
    fn test_map_hourly_truncates_when_window_exceeds_array() {
        // 30 entries with a reference hour of 20: only 10 remain
        let times: Vec<String> = (0..30)
            .map(|i| {
                let day = 15 + i / 24;
                format!("2024-07-{:02}T{:02}:00", day, i % 24)
            })
            .collect();
        let response = ForecastResponse {
            hourly: Some(RawHourly {
                time: times,
                temperature_2m: vec![20.0; 30],
                weather_code: vec![2; 30],
                precipitation_probability: vec![10.0; 30],
            }),
            ..Default::default()
        };

        let slots = map_hourly(&response, at(2024, 7, 15, 20)).expect("Failed to map hourly");

        assert_eq!(slots.len(), 10);
        assert_eq!(slots[0].time, at(2024, 7, 15, 20));
        assert_eq!(slots[9].time, at(2024, 7, 16, 5));
    }

    #[test]
    fn test_map_hourly_day_night_icon_substitution() {
        let response: ForecastResponse =
            serde_json::from_str(HOURLY_RESPONSE).expect("Failed to parse valid response");

        // Window starting at midnight covers night and day hours
        let slots = map_hourly(&response, at(2024, 7, 15, 0)).expect("Failed to map hourly");

        // 00:00 has code 0 (Clear sky) at night
        assert_eq!(slots[0].icon, "🌙");
        assert_eq!(slots[0].description, "Clear sky");
        // 05:00 has code 1 (Mainly clear) at night
        assert_eq!(slots[5].icon, "🌙");
        // 08:00 has code 2 (Partly cloudy) in daytime
        assert_eq!(slots[8].icon, "⛅");
        // 11:00 has code 3 (Overcast): same icon regardless of hour
        assert_eq!(slots[11].icon, "☁️");
        // 18:00 has code 0 (Clear sky) at night again
        assert_eq!(slots[18].icon, "🌙");
    }

    #[test]
    fn test_map_hourly_missing_section() {
        let response: ForecastResponse =
            serde_json::from_str(CURRENT_RESPONSE).expect("Failed to parse");
        let result = map_hourly(&response, at(2024, 7, 15, 14));

        match result {
            Err(WeatherError::InvalidResponseShape(msg)) => {
                assert!(msg.contains("hourly"));
            }
            _ => panic!("Expected InvalidResponseShape error"),
        }
    }

    #[test]
    fn test_map_hourly_mismatched_array_lengths() {
        let response = ForecastResponse {
            hourly: Some(RawHourly {
                time: vec![
                    "2024-07-15T00:00".to_string(),
                    "2024-07-15T01:00".to_string(),
                ],
                temperature_2m: vec![15.0],
                weather_code: vec![0, 0],
                precipitation_probability: vec![0.0, 0.0],
            }),
            ..Default::default()
        };

        let result = map_hourly(&response, at(2024, 7, 15, 0));
        match result {
            Err(WeatherError::InvalidResponseShape(msg)) => {
                assert!(msg.contains("inconsistent lengths"));
            }
            _ => panic!("Expected InvalidResponseShape error"),
        }
    }

    #[test]
    fn test_map_hourly_slots_are_chronological() {
        let response: ForecastResponse =
            serde_json::from_str(HOURLY_RESPONSE).expect("Failed to parse valid response");

        let slots = map_hourly(&response, at(2024, 7, 15, 9)).expect("Failed to map hourly");

        for pair in slots.windows(2) {
            assert!(pair[0].time < pair[1].time);
        }
        assert_eq!(slots[0].time.hour(), 9);
    }

    #[test]
    fn test_parse_datetime_formats() {
        let dt = parse_datetime("2024-07-15T14:30").expect("Failed to parse datetime");
        assert_eq!(dt, at(2024, 7, 15, 14) + chrono::Duration::minutes(30));

        let dt = parse_datetime("2024-07-01T12:00:00").expect("Failed to parse with seconds");
        assert_eq!(dt, at(2024, 7, 1, 12));
    }

    #[test]
    fn test_parse_datetime_invalid() {
        assert!(parse_datetime("2024-07-15 14:30").is_err());
        assert!(parse_datetime("not a datetime").is_err());
    }

    #[test]
    fn test_parse_malformed_json() {
        let malformed = "{ invalid json }";
        let result: Result<ForecastResponse, _> = serde_json::from_str(malformed);
        assert!(result.is_err());
    }
}
