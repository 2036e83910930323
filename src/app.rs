//! Application state management for Skycast
//!
//! This module contains the main application state, handling keyboard input,
//! data loading with the live/cached/synthetic fallback chain, and state
//! transitions between the conditions and forecast views.

use chrono::{DateTime, Local, NaiveDateTime};
use crossterm::event::{KeyCode, KeyEvent};
use serde::{de::DeserializeOwned, Serialize};

use crate::cache::{CacheKind, CacheManager, CachedData};
use crate::cli::StartupConfig;
use crate::data::{
    mock, Coordinates, ForecastDay, HourlySlot, WeatherClient, WeatherError, WeatherSnapshot,
};
use crate::selector::{select_slots, MarkedSlot, SlotStrategy};

/// How long fetched payloads stay fresh in the cache
const CACHE_TTL_HOURS: u64 = 1;

/// Application state enum representing the current view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Initial loading state while fetching data
    Loading,
    /// Current conditions plus the hourly slot strip
    Conditions,
    /// 7-day forecast table
    Forecast,
}

/// Where the currently displayed data came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// Fetched from the weather API this load
    Live,
    /// Served from the on-disk cache after a fetch failure
    Cached,
    /// Generated synthetically after both fetch and cache failed
    Synthetic,
}

impl DataSource {
    /// Display label shown in the header
    pub fn label(&self) -> &'static str {
        match self {
            DataSource::Live => "live",
            DataSource::Cached => "cached",
            DataSource::Synthetic => "offline data",
        }
    }

    /// Severity for picking the badge when payloads degrade differently
    fn severity(&self) -> u8 {
        match self {
            DataSource::Live => 0,
            DataSource::Cached => 1,
            DataSource::Synthetic => 2,
        }
    }
}

/// Main application struct managing state and data
pub struct App {
    /// Current application state/view
    pub state: AppState,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Active hourly slot selection strategy
    pub strategy: SlotStrategy,
    /// Location being displayed
    pub coordinates: Coordinates,
    /// Display name for the location
    pub place_name: String,
    /// Latest current-conditions snapshot
    pub current: Option<WeatherSnapshot>,
    /// Latest daily forecast
    pub forecast: Vec<ForecastDay>,
    /// Latest 24-hour hourly window
    pub hourly: Vec<HourlySlot>,
    /// Worst data source used by the latest load
    pub data_source: DataSource,
    /// Timestamp of last data refresh
    pub last_refresh: Option<DateTime<Local>>,
    /// Flag indicating a refresh has been requested
    pub refresh_requested: bool,
    /// Whether network fetches are skipped entirely
    offline: bool,
    /// Weather API client
    weather_client: WeatherClient,
    /// On-disk payload cache; None when no cache directory is available
    cache: Option<CacheManager>,
}

impl App {
    /// Creates a new App instance for a resolved location.
    ///
    /// # Arguments
    /// * `coordinates` - Location to display weather for
    /// * `place_name` - Display name for the header
    /// * `config` - Startup configuration derived from CLI arguments
    pub fn new(coordinates: Coordinates, place_name: String, config: &StartupConfig) -> Self {
        Self {
            state: AppState::Loading,
            should_quit: false,
            show_help: false,
            strategy: config.strategy,
            coordinates,
            place_name,
            current: None,
            forecast: Vec::new(),
            hourly: Vec::new(),
            data_source: DataSource::Live,
            last_refresh: None,
            refresh_requested: false,
            offline: config.offline,
            weather_client: WeatherClient::new(),
            cache: CacheManager::new(),
        }
    }

    /// Replaces the cache manager (for testing)
    #[cfg(test)]
    pub fn with_cache(mut self, cache: Option<CacheManager>) -> Self {
        self.cache = cache;
        self
    }

    /// Runs the slot selector over the latest hourly window.
    ///
    /// Selection happens at display time so a strategy toggle takes effect
    /// without re-fetching.
    pub fn display_slots(&self, now: NaiveDateTime) -> Vec<MarkedSlot> {
        select_slots(&self.hourly, now, self.strategy)
    }

    /// Loads all three weather payloads concurrently.
    ///
    /// Each payload independently falls back to the cache (even expired)
    /// and then to synthetic data, so the UI always has something to
    /// render. Transitions out of Loading when complete.
    pub async fn load_all_data(&mut self) {
        let now = Local::now().naive_local();
        self.data_source = DataSource::Live;

        if self.offline {
            tracing::info!("offline mode: skipping network fetches");
            self.apply_fallbacks(now);
        } else {
            let (current, daily, hourly) = tokio::join!(
                self.weather_client.fetch_current(self.coordinates),
                self.weather_client.fetch_daily(self.coordinates),
                self.weather_client.fetch_hourly(self.coordinates, now),
            );

            self.current = Some(self.resolve_current(current, now));
            self.forecast = self.resolve_daily(daily, now);
            self.hourly = self.resolve_hourly(hourly, now);
        }

        self.last_refresh = Some(Local::now());
        if self.state == AppState::Loading {
            self.state = AppState::Conditions;
        }
    }

    /// Fills all payloads from cache or synthetic data without fetching.
    fn apply_fallbacks(&mut self, now: NaiveDateTime) {
        self.current = Some(self.fallback_current(now));
        self.forecast = self.fallback_daily(now);
        self.hourly = self.fallback_hourly(now);
    }

    fn resolve_current(
        &mut self,
        result: Result<WeatherSnapshot, WeatherError>,
        now: NaiveDateTime,
    ) -> WeatherSnapshot {
        match result {
            Ok(snapshot) => {
                self.cache_write(CacheKind::CurrentWeather, &snapshot);
                snapshot
            }
            Err(err) => {
                tracing::warn!("current weather fetch failed: {err}");
                self.fallback_current(now)
            }
        }
    }

    fn resolve_daily(
        &mut self,
        result: Result<Vec<ForecastDay>, WeatherError>,
        now: NaiveDateTime,
    ) -> Vec<ForecastDay> {
        match result {
            Ok(days) => {
                self.cache_write(CacheKind::DailyForecast, &days);
                days
            }
            Err(err) => {
                tracing::warn!("daily forecast fetch failed: {err}");
                self.fallback_daily(now)
            }
        }
    }

    fn resolve_hourly(
        &mut self,
        result: Result<Vec<HourlySlot>, WeatherError>,
        now: NaiveDateTime,
    ) -> Vec<HourlySlot> {
        match result {
            Ok(slots) => {
                self.cache_write(CacheKind::HourlyForecast, &slots);
                slots
            }
            Err(err) => {
                tracing::warn!("hourly forecast fetch failed: {err}");
                self.fallback_hourly(now)
            }
        }
    }

    fn fallback_current(&mut self, now: NaiveDateTime) -> WeatherSnapshot {
        if let Some(cached) = self.cache_read::<WeatherSnapshot>(CacheKind::CurrentWeather) {
            self.note_source(DataSource::Cached);
            cached.data
        } else {
            self.note_source(DataSource::Synthetic);
            mock::snapshot(now)
        }
    }

    fn fallback_daily(&mut self, now: NaiveDateTime) -> Vec<ForecastDay> {
        if let Some(cached) = self.cache_read::<Vec<ForecastDay>>(CacheKind::DailyForecast) {
            self.note_source(DataSource::Cached);
            cached.data
        } else {
            self.note_source(DataSource::Synthetic);
            mock::daily(now.date())
        }
    }

    fn fallback_hourly(&mut self, now: NaiveDateTime) -> Vec<HourlySlot> {
        if let Some(cached) = self.cache_read::<Vec<HourlySlot>>(CacheKind::HourlyForecast) {
            self.note_source(DataSource::Cached);
            cached.data
        } else {
            self.note_source(DataSource::Synthetic);
            mock::hourly(now)
        }
    }

    /// Downgrades the data-source badge, keeping the worst source seen
    fn note_source(&mut self, source: DataSource) {
        if source.severity() > self.data_source.severity() {
            self.data_source = source;
        }
    }

    fn cache_write<T: Serialize>(&self, kind: CacheKind, data: &T) {
        if let Some(cache) = &self.cache {
            let key = kind.key_for(self.coordinates.latitude, self.coordinates.longitude);
            if let Err(err) = cache.write(&key, data, CACHE_TTL_HOURS) {
                tracing::warn!("failed to write cache entry {key}: {err}");
            }
        }
    }

    fn cache_read<T: DeserializeOwned>(&self, kind: CacheKind) -> Option<CachedData<T>> {
        let cache = self.cache.as_ref()?;
        let key = kind.key_for(self.coordinates.latitude, self.coordinates.longitude);
        let cached = cache.read::<T>(&key)?;
        if cached.is_expired {
            tracing::debug!("serving expired cache entry {key}");
        }
        Some(cached)
    }

    /// Handles a keyboard event, updating state accordingly
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        // Handle help overlay - intercepts all keys when shown
        if self.show_help {
            match key_event.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                    self.show_help = false;
                }
                _ => {} // Ignore other keys when help is shown
            }
            return;
        }

        match self.state {
            AppState::Loading => {
                // Only quit is allowed during loading
                if key_event.code == KeyCode::Char('q') {
                    self.should_quit = true;
                }
            }
            AppState::Conditions | AppState::Forecast => match key_event.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.should_quit = true;
                }
                KeyCode::Tab => {
                    self.state = if self.state == AppState::Conditions {
                        AppState::Forecast
                    } else {
                        AppState::Conditions
                    };
                }
                KeyCode::Char('c') => {
                    self.state = AppState::Conditions;
                }
                KeyCode::Char('f') => {
                    self.state = AppState::Forecast;
                }
                KeyCode::Char('s') => {
                    self.strategy = self.strategy.toggled();
                }
                KeyCode::Char('r') => {
                    self.refresh_requested = true;
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                }
                _ => {}
            },
        }
    }
}
