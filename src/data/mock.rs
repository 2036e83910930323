//! Synthetic fallback weather data
//!
//! When the network and the cache both come up empty, the app still has to
//! render something. These generators build syntactically valid synthetic
//! records: fixed illustrative current conditions and randomized-in-range
//! forecasts. They perform no I/O and never fail.

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use rand::RngExt;

use super::codes;
use super::{ForecastDay, HourlySlot, WeatherSnapshot};

/// Number of days in the synthetic daily forecast
const MOCK_DAILY_LEN: usize = 7;

/// Number of slots in the synthetic hourly forecast
const MOCK_HOURLY_LEN: usize = 24;

/// Builds a synthetic current-conditions snapshot with fixed values.
pub fn snapshot(now: NaiveDateTime) -> WeatherSnapshot {
    WeatherSnapshot {
        temperature: 22.5,
        feels_like: 24.2,
        humidity: 65.0,
        wind_speed: 12.3,
        wind_direction: 180.0,
        pressure: 1013.25,
        visibility: 10000.0,
        precipitation: 0.0,
        description: "Partly cloudy".to_string(),
        icon: "⛅".to_string(),
        timestamp: now,
    }
}

/// Builds a 7-day synthetic forecast starting at `today`.
///
/// Temperature bounds draw uniformly from [15, 25) and [25, 35), keeping
/// `min < max` by construction.
pub fn daily(today: NaiveDate) -> Vec<ForecastDay> {
    let mut rng = rand::rng();
    let mut days = Vec::with_capacity(MOCK_DAILY_LEN);

    for i in 0..MOCK_DAILY_LEN {
        days.push(ForecastDay {
            date: today + Duration::days(i as i64),
            temp_min: rng.random_range(15.0..25.0),
            temp_max: rng.random_range(25.0..35.0),
            description: "Partly cloudy".to_string(),
            icon: "⛅".to_string(),
            precipitation: rng.random_range(0.0..5.0),
            wind_speed: 8.0 + rng.random_range(0.0..8.0),
        });
    }

    days
}

/// Builds 24 synthetic hourly slots starting at `now`'s hour.
///
/// Icons follow the same day/night rule as the real mapper, keyed off each
/// slot's own hour.
pub fn hourly(now: NaiveDateTime) -> Vec<HourlySlot> {
    let mut rng = rand::rng();
    let start = now
        .date()
        .and_hms_opt(now.hour(), 0, 0)
        .unwrap_or(now);

    let mut slots = Vec::with_capacity(MOCK_HOURLY_LEN);
    for i in 0..MOCK_HOURLY_LEN {
        let time = start + Duration::hours(i as i64);
        let icon = codes::icon_for(2, codes::is_daytime_hour(time.hour()));

        slots.push(HourlySlot {
            time,
            temperature: rng.random_range(20.0..30.0),
            description: "Partly cloudy".to_string(),
            icon: icon.to_string(),
            precipitation_probability: rng.random_range(0.0..100.0),
        });
    }

    slots
}
