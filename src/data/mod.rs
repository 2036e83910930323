//! Core data models for Skycast
//!
//! This module contains the canonical weather records produced by the
//! Open-Meteo mappers and consumed by the slot selector and the UI.

pub mod codes;
pub mod geocode;
pub mod mock;
pub mod weather;

pub use geocode::{GeocodeError, GeocodedPlace};
#[allow(unused_imports)]
pub use weather::{ForecastResponse, WeatherClient, WeatherError};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current weather conditions at a point in time
///
/// Built fresh on every fetch and never mutated; all values pass through
/// from the provider unchanged (Celsius, km/h, hPa, meters, mm).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Air temperature in Celsius
    pub temperature: f64,
    /// Feels-like temperature in Celsius
    pub feels_like: f64,
    /// Relative humidity percentage (0-100)
    pub humidity: f64,
    /// Wind speed in km/h
    pub wind_speed: f64,
    /// Wind direction in degrees (0 = North, clockwise)
    pub wind_direction: f64,
    /// Sea-level pressure in hPa
    pub pressure: f64,
    /// Visibility in meters
    pub visibility: f64,
    /// Precipitation in mm
    pub precipitation: f64,
    /// Condition description resolved from the code table
    pub description: String,
    /// Condition icon resolved from the code table
    pub icon: String,
    /// Source-reported observation time (provider-local wall time)
    pub timestamp: NaiveDateTime,
}

/// One day of the daily forecast
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastDay {
    /// Calendar date of the forecast
    pub date: NaiveDate,
    /// Daily minimum temperature in Celsius
    pub temp_min: f64,
    /// Daily maximum temperature in Celsius
    pub temp_max: f64,
    /// Condition description resolved from the code table
    pub description: String,
    /// Condition icon resolved from the code table
    pub icon: String,
    /// Daily precipitation sum in mm
    pub precipitation: f64,
    /// Wind speed in km/h; `0.0` when the daily payload carries no wind data
    pub wind_speed: f64,
}

/// One hour of the hourly forecast
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlySlot {
    /// Forecast hour (provider-local wall time)
    pub time: NaiveDateTime,
    /// Air temperature in Celsius
    pub temperature: f64,
    /// Condition description resolved from the code table
    pub description: String,
    /// Condition icon, day/night-adjusted for the slot's own hour
    pub icon: String,
    /// Precipitation probability percentage (0-100)
    pub precipitation_probability: f64,
}

/// A geographic point, owned transiently by the caller
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Position accuracy in meters, when known
    pub accuracy: Option<f64>,
    /// When the position was determined, when known
    pub timestamp: Option<DateTime<Utc>>,
}

impl Coordinates {
    /// Creates coordinates from a bare latitude/longitude pair.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy: None,
            timestamp: None,
        }
    }
}

/// 16-point compass labels, clockwise from North
const CARDINALS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Converts a wind direction in degrees to a 16-point compass label.
pub fn wind_direction_cardinal(degrees: f64) -> &'static str {
    let index = ((degrees / 22.5).round() as usize) % 16;
    CARDINALS[index]
}
