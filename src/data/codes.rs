//! WMO weather code table
//!
//! Maps the numeric weather codes reported by Open-Meteo to human-readable
//! descriptions and display icons, including day/night icon variants for
//! the clear-to-overcast family.

/// Description/icon pair for a WMO weather code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeInfo {
    /// Human-readable condition description
    pub description: &'static str,
    /// Emoji icon for the condition
    pub icon: &'static str,
}

/// Icon shown for codes that are not in the table
pub const UNKNOWN_ICON: &str = "❓";

/// Local hour at which daytime starts (inclusive)
pub const DAYTIME_START_HOUR: u32 = 6;
/// Local hour at which daytime ends (exclusive)
pub const DAYTIME_END_HOUR: u32 = 18;

/// Looks up the description/icon pair for a WMO weather code.
///
/// Codes outside the table resolve to `("Unknown", "❓")` rather than an
/// error, so display code never has to handle a lookup failure.
pub fn lookup(code: u8) -> CodeInfo {
    let (description, icon) = match code {
        0 => ("Clear sky", "☀️"),
        1 => ("Mainly clear", "🌤️"),
        2 => ("Partly cloudy", "⛅"),
        3 => ("Overcast", "☁️"),
        45 => ("Foggy", "🌫️"),
        48 => ("Depositing rime fog", "🌫️"),
        51 => ("Light drizzle", "🌦️"),
        53 => ("Moderate drizzle", "🌦️"),
        55 => ("Dense drizzle", "🌦️"),
        61 => ("Slight rain", "🌧️"),
        63 => ("Moderate rain", "🌧️"),
        65 => ("Heavy rain", "🌧️"),
        71 => ("Slight snow", "🌨️"),
        73 => ("Moderate snow", "🌨️"),
        75 => ("Heavy snow", "🌨️"),
        77 => ("Snow grains", "🌨️"),
        80 => ("Slight rain showers", "🌦️"),
        81 => ("Moderate rain showers", "🌧️"),
        82 => ("Violent rain showers", "⛈️"),
        85 => ("Slight snow showers", "🌨️"),
        86 => ("Heavy snow showers", "🌨️"),
        95 => ("Thunderstorm", "⛈️"),
        96 => ("Thunderstorm with slight hail", "⛈️"),
        99 => ("Thunderstorm with heavy hail", "⛈️"),
        _ => ("Unknown", UNKNOWN_ICON),
    };

    CodeInfo { description, icon }
}

/// Returns the icon for a weather code, adjusted for day or night.
///
/// Only the clear-to-overcast codes (0-3) have night variants; overcast (3)
/// looks the same around the clock, so it keeps a single icon. All other
/// codes use their table icon regardless of the hour.
pub fn icon_for(code: u8, is_day: bool) -> &'static str {
    if is_day {
        return lookup(code).icon;
    }

    match code {
        0 | 1 => "🌙",
        2 | 3 => "☁️",
        _ => lookup(code).icon,
    }
}

/// Whether a local hour-of-day counts as daytime (`[6, 18)`).
pub fn is_daytime_hour(hour: u32) -> bool {
    (DAYTIME_START_HOUR..DAYTIME_END_HOUR).contains(&hour)
}
