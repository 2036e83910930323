//! Place-name resolution via the Open-Meteo geocoding API
//!
//! Resolves a user-supplied place name (e.g. "--place Vancouver") to
//! coordinates and a display name. A name the service cannot find is a
//! typed error so the caller can refuse to show weather for nowhere.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::Coordinates;

/// Base URL for the Open-Meteo geocoding API
const GEOCODING_BASE_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

/// Errors that can occur when resolving a place name
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// The service returned no match for the place name
    #[error("No location found matching '{0}'")]
    NotFound(String),
}

/// A resolved place: coordinates plus a display name
#[derive(Debug, Clone)]
pub struct GeocodedPlace {
    /// Coordinates of the best match
    pub coordinates: Coordinates,
    /// Display name, e.g. "Vancouver, British Columbia"
    pub display_name: String,
}

/// Resolves a place name to coordinates using the first (best) match.
pub async fn resolve_place(client: &Client, name: &str) -> Result<GeocodedPlace, GeocodeError> {
    let url = format!(
        "{}?name={}&count=1&language=en&format=json",
        GEOCODING_BASE_URL,
        urlencode(name)
    );

    let response = client.get(&url).send().await?.error_for_status()?;
    let text = response.text().await?;
    let parsed: GeocodingResponse = serde_json::from_str(&text)?;

    let result = parsed
        .results
        .and_then(|mut results| {
            if results.is_empty() {
                None
            } else {
                Some(results.remove(0))
            }
        })
        .ok_or_else(|| GeocodeError::NotFound(name.to_string()))?;

    tracing::debug!(place = %result.name, lat = result.latitude, lon = result.longitude, "resolved place");

    Ok(GeocodedPlace {
        coordinates: Coordinates::new(result.latitude, result.longitude),
        display_name: display_name(&result),
    })
}

/// Builds "Name, Region" from a geocoding result, preferring the admin1
/// region and falling back to the country when it is absent or redundant.
fn display_name(result: &GeocodingResult) -> String {
    let suffix = result
        .admin1
        .as_deref()
        .filter(|s| !s.is_empty() && *s != result.name)
        .or_else(|| {
            result
                .country
                .as_deref()
                .filter(|c| !c.is_empty() && *c != result.name)
        });

    match suffix {
        Some(s) => format!("{}, {}", result.name, s),
        None => result.name.clone(),
    }
}

/// Percent-encodes the characters that matter for a query value.
fn urlencode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            ' ' => out.push('+'),
            'A'..='Z' | 'a'..='z' | '0'..='9' | '-' | '_' | '.' | '~' => out.push(c),
            _ => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).bytes() {
                    out.push_str(&format!("%{:02X}", byte));
                }
            }
        }
    }
    out
}

/// Open-Meteo geocoding API response structure
#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    /// Absent entirely when the search has no matches
    results: Option<Vec<GeocodingResult>>,
}

/// A single geocoding match
#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    latitude: f64,
    longitude: f64,
    admin1: Option<String>,
    country: Option<String>,
}
