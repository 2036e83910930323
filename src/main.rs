//! Skycast - terminal weather viewer
//!
//! A terminal UI application that displays current conditions, a compact
//! hourly outlook, and a 7-day forecast for a location, powered by the
//! Open-Meteo APIs.

mod app;
mod cache;
mod cli;
mod data;
mod refresh;
mod selector;
mod ui;

use std::io;
use std::panic;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use directories::ProjectDirs;
use ratatui::{backend::CrosstermBackend, Terminal};

use app::{App, AppState};
use cli::{Cli, StartupConfig};
use data::{geocode, Coordinates};
use refresh::{RefreshConfig, RefreshHandle, RefreshMessage};

/// Location shown when neither --place nor --lat/--lon is given
const DEFAULT_PLACE_NAME: &str = "Vancouver";
const DEFAULT_LATITUDE: f64 = 49.2827;
const DEFAULT_LONGITUDE: f64 = -123.1207;

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

/// Initializes tracing output to a log file under the cache directory.
///
/// Stderr belongs to the TUI, so when no cache directory or file is
/// available logging is silently skipped. Filtering follows RUST_LOG.
fn init_logging() {
    let Some(project_dirs) = ProjectDirs::from("", "", "skycast") else {
        return;
    };
    let log_dir = project_dirs.cache_dir();
    if std::fs::create_dir_all(log_dir).is_err() {
        return;
    }
    let Ok(file) = std::fs::File::create(log_dir.join("skycast.log")) else {
        return;
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

/// Resolves the location to display from the startup configuration.
///
/// Explicit coordinates win; a place name goes through the geocoding API;
/// otherwise the built-in default location is used.
async fn resolve_location(
    config: &StartupConfig,
) -> Result<(Coordinates, String), Box<dyn std::error::Error>> {
    if let Some((lat, lon)) = config.coordinates {
        return Ok((Coordinates::new(lat, lon), format!("{:.2}, {:.2}", lat, lon)));
    }

    if let Some(place) = &config.place {
        if config.offline {
            return Err("--place needs the geocoding API; use --lat/--lon with --offline".into());
        }
        let client = reqwest::Client::new();
        let resolved = geocode::resolve_place(&client, place).await?;
        return Ok((resolved.coordinates, resolved.display_name));
    }

    Ok((
        Coordinates::new(DEFAULT_LATITUDE, DEFAULT_LONGITUDE),
        DEFAULT_PLACE_NAME.to_string(),
    ))
}

/// Renders the UI based on the current application state
fn render_ui(frame: &mut ratatui::Frame, app: &App) {
    match app.state {
        AppState::Loading => {
            render_loading(frame);
        }
        AppState::Conditions => {
            ui::render_conditions(frame, app);
        }
        AppState::Forecast => {
            ui::render_forecast(frame, app);
        }
    }

    if app.show_help {
        ui::render_help_overlay(frame);
    }
}

/// Renders a loading message while data is being fetched
fn render_loading(frame: &mut ratatui::Frame) {
    use ratatui::{
        layout::{Alignment, Constraint, Direction, Layout},
        style::{Color, Style},
        widgets::Paragraph,
    };

    let area = frame.area();

    // Center the loading message vertically
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(3),
            Constraint::Percentage(45),
        ])
        .split(area);

    let loading_text = Paragraph::new("Loading weather data...")
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center);

    frame.render_widget(loading_text, chunks[1]);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(2);
        }
    };

    init_logging();

    // Resolve the location before touching the terminal so geocoding
    // errors print as normal CLI errors.
    let (coordinates, place_name) = match resolve_location(&config).await {
        Ok(resolved) => resolved,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(2);
        }
    };

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app instance
    let mut app = App::new(coordinates, place_name, &config);

    // Initial render to show loading state
    terminal.draw(|f| render_ui(f, &app))?;

    // Trigger initial data load
    app.load_all_data().await;

    // Background refresh only makes sense when fetching is allowed
    let refresh_config = RefreshConfig {
        enabled: config.auto_refresh && !config.offline,
        ..Default::default()
    };
    let mut refresh_handle = RefreshHandle::spawn(refresh_config);

    // Main event loop
    loop {
        // Render UI
        terminal.draw(|f| render_ui(f, &app))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        // Drain background refresh prompts without blocking
        if let Some(RefreshMessage::RefreshDue) = refresh::try_recv(&mut refresh_handle) {
            app.refresh_requested = true;
        }

        if app.refresh_requested {
            app.refresh_requested = false;
            app.load_all_data().await;
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}
