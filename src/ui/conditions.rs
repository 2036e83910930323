//! Conditions screen UI
//!
//! Renders the current weather block, a 24-hour temperature sparkline, and
//! the selected hourly slot strip with hottest/coldest markers.

use chrono::{Local, NaiveDateTime, Timelike};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, DataSource};
use crate::data::{wind_direction_cardinal, WeatherSnapshot};
use crate::selector::MarkedSlot;
use crate::ui::widgets::sparkline::TempSparkline;

/// Color scheme shared by the weather views
pub(crate) mod colors {
    use ratatui::style::Color;

    /// Section headers
    pub const HEADER: Color = Color::Cyan;
    /// Primary text
    pub const PRIMARY: Color = Color::White;
    /// Secondary/dimmed text
    pub const SECONDARY: Color = Color::Gray;
    /// Live data badge
    pub const LIVE: Color = Color::Green;
    /// Degraded data badge (cached or synthetic)
    pub const DEGRADED: Color = Color::Yellow;
    /// Hot marker accent
    pub const HOT: Color = Color::Red;
    /// Cold marker accent
    pub const COLD: Color = Color::Blue;
}

/// Renders the conditions screen
///
/// # Arguments
/// * `frame` - The ratatui frame to render into
/// * `app` - The application state
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let main_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::HEADER))
        .title(Span::styled(
            format!(" Skycast — {} ", app.place_name),
            Style::default()
                .fg(colors::PRIMARY)
                .add_modifier(Modifier::BOLD),
        ));

    let inner_area = main_block.inner(area);
    frame.render_widget(main_block, area);

    // Header (1), current conditions (5), sparkline (3), slot strip (rest), help (1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Min(7),
            Constraint::Length(1),
        ])
        .split(inner_area);

    render_header(frame, chunks[0], app);
    if let Some(current) = &app.current {
        render_current_section(frame, chunks[1], current);
    }
    render_sparkline_section(frame, chunks[2], app);
    render_slot_strip(frame, chunks[3], app);
    render_help_line(frame, chunks[4]);
}

/// Renders the status header: data source badge, strategy, last refresh
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let source_color = match app.data_source {
        DataSource::Live => colors::LIVE,
        _ => colors::DEGRADED,
    };

    let mut spans = vec![
        Span::styled("● ", Style::default().fg(source_color)),
        Span::styled(app.data_source.label(), Style::default().fg(source_color)),
        Span::styled("  strategy: ", Style::default().fg(colors::SECONDARY)),
        Span::styled(app.strategy.label(), Style::default().fg(colors::PRIMARY)),
    ];

    if let Some(refreshed) = app.last_refresh {
        spans.push(Span::styled(
            format!("  refreshed {}", refreshed.format("%H:%M")),
            Style::default().fg(colors::SECONDARY),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Renders the current-conditions block
fn render_current_section(frame: &mut Frame, area: Rect, current: &WeatherSnapshot) {
    let lines = vec![
        Line::from(vec![
            Span::raw(format!("{}  ", current.icon)),
            Span::styled(
                format_temperature(current.temperature),
                Style::default()
                    .fg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  feels like {}", format_temperature(current.feels_like)),
                Style::default().fg(colors::SECONDARY),
            ),
            Span::raw("  "),
            Span::styled(current.description.clone(), Style::default().fg(colors::PRIMARY)),
        ]),
        Line::from(vec![
            Span::styled("Humidity ", Style::default().fg(colors::SECONDARY)),
            Span::styled(
                format!("{}%", current.humidity.round()),
                Style::default().fg(colors::PRIMARY),
            ),
            Span::styled("   Wind ", Style::default().fg(colors::SECONDARY)),
            Span::styled(
                format!(
                    "{} km/h {}",
                    current.wind_speed.round(),
                    wind_direction_cardinal(current.wind_direction)
                ),
                Style::default().fg(colors::PRIMARY),
            ),
            Span::styled("   Pressure ", Style::default().fg(colors::SECONDARY)),
            Span::styled(
                format!("{} hPa", current.pressure.round()),
                Style::default().fg(colors::PRIMARY),
            ),
        ]),
        Line::from(vec![
            Span::styled("Visibility ", Style::default().fg(colors::SECONDARY)),
            Span::styled(
                format_visibility(current.visibility),
                Style::default().fg(colors::PRIMARY),
            ),
            Span::styled("   Precipitation ", Style::default().fg(colors::SECONDARY)),
            Span::styled(
                format!("{:.1} mm", current.precipitation),
                Style::default().fg(colors::PRIMARY),
            ),
        ]),
        Line::from(Span::styled(
            format!("Observed {}", current.timestamp.format("%Y-%m-%d %H:%M")),
            Style::default().fg(colors::SECONDARY),
        )),
    ];

    frame.render_widget(Paragraph::new(lines), area);
}

/// Renders the 24-hour temperature sparkline with hour labels
fn render_sparkline_section(frame: &mut Frame, area: Rect, app: &App) {
    if app.hourly.is_empty() || area.height < 3 {
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new(Span::styled(
            "Next 24 hours",
            Style::default()
                .fg(colors::HEADER)
                .add_modifier(Modifier::BOLD),
        )),
        rows[0],
    );

    let temps: Vec<f64> = app.hourly.iter().map(|slot| slot.temperature).collect();
    let spark_area = Rect {
        width: rows[1].width.min(temps.len() as u16),
        ..rows[1]
    };
    frame.render_widget(TempSparkline::new(&temps).current_position(0), spark_area);

    // First/last hour labels under the sparkline ends
    if let (Some(first), Some(last)) = (app.hourly.first(), app.hourly.last()) {
        let width = spark_area.width as usize;
        let left = format_hour(first.time);
        let right = format_hour(last.time);
        let pad = width.saturating_sub(left.len() + right.len());
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!("{}{}{}", left, " ".repeat(pad), right),
                Style::default().fg(colors::SECONDARY),
            )),
            rows[2],
        );
    }
}

/// Renders the selected hourly slots as equal-width columns
fn render_slot_strip(frame: &mut Frame, area: Rect, app: &App) {
    let now = Local::now().naive_local();
    let slots = app.display_slots(now);
    if slots.is_empty() || area.height < 5 {
        return;
    }

    let constraints: Vec<Constraint> = slots
        .iter()
        .map(|_| Constraint::Ratio(1, slots.len() as u32))
        .collect();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (slot, column) in slots.iter().zip(columns.iter()) {
        render_slot_cell(frame, *column, slot);
    }
}

/// Renders a single slot column: hour, icon, temperature, rain chance, marker
fn render_slot_cell(frame: &mut Frame, area: Rect, marked: &MarkedSlot) {
    let slot = &marked.slot;

    let marker_line = match marked.marker {
        Some(marker) => {
            let color = match marker {
                crate::selector::TempMarker::Hot => colors::HOT,
                crate::selector::TempMarker::Cold => colors::COLD,
            };
            Line::from(Span::styled(
                marker.symbol().to_string(),
                Style::default().fg(color),
            ))
        }
        None => Line::from(""),
    };

    let lines = vec![
        Line::from(Span::styled(
            format_hour(slot.time),
            Style::default().fg(colors::SECONDARY),
        )),
        Line::from(Span::raw(slot.icon.clone())),
        Line::from(Span::styled(
            format_temperature(slot.temperature),
            Style::default().fg(colors::PRIMARY),
        )),
        Line::from(Span::styled(
            format!("{}%", slot.precipitation_probability.round()),
            Style::default().fg(colors::SECONDARY),
        )),
        marker_line,
    ];

    let cell = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(cell, area);
}

/// Renders the one-line key hints footer
fn render_help_line(frame: &mut Frame, area: Rect) {
    frame.render_widget(
        Paragraph::new(Span::styled(
            "Tab forecast · s strategy · r refresh · ? help · q quit",
            Style::default().fg(colors::SECONDARY),
        )),
        area,
    );
}

/// Formats a temperature rounded to whole degrees, e.g. "23°C"
pub(crate) fn format_temperature(temp: f64) -> String {
    format!("{}°C", temp.round())
}

/// Formats visibility as km above 1000 m, otherwise meters
fn format_visibility(visibility: f64) -> String {
    if visibility >= 1000.0 {
        format!("{:.1} km", visibility / 1000.0)
    } else {
        format!("{} m", visibility.round())
    }
}

/// Formats an hour in 12-hour clock form, e.g. "2 PM"
pub(crate) fn format_hour(time: NaiveDateTime) -> String {
    let (is_pm, hour) = time.hour12();
    format!("{} {}", hour, if is_pm { "PM" } else { "AM" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::App;
    use crate::cli::StartupConfig;
    use crate::data::{mock, Coordinates};
    use chrono::NaiveDate;
    use ratatui::{backend::TestBackend, Terminal};

    fn loaded_app() -> App {
        let now = NaiveDate::from_ymd_opt(2024, 7, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let mut app = App::new(
            Coordinates::new(49.2827, -123.1207),
            "Vancouver".to_string(),
            &StartupConfig::default(),
        );
        app.current = Some(mock::snapshot(now));
        app.forecast = mock::daily(now.date());
        app.hourly = mock::hourly(now);
        app.state = crate::app::AppState::Conditions;
        app
    }

    #[test]
    fn test_conditions_view_renders_key_sections() {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let app = loaded_app();

        terminal.draw(|frame| render(frame, &app)).unwrap();

        let buffer = terminal.backend().buffer();
        let content: String = buffer.content().iter().map(|cell| cell.symbol()).collect();

        assert!(content.contains("Skycast"), "Should render title");
        assert!(content.contains("Vancouver"), "Should render place name");
        assert!(content.contains("Partly cloudy"), "Should render description");
        assert!(content.contains("Next 24 hours"), "Should render sparkline header");
        assert!(content.contains("strategy"), "Should render strategy label");
    }

    #[test]
    fn test_conditions_view_without_data_does_not_panic() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut app = loaded_app();
        app.current = None;
        app.hourly.clear();

        terminal.draw(|frame| render(frame, &app)).unwrap();
    }

    #[test]
    fn test_format_temperature_rounds() {
        assert_eq!(format_temperature(22.4), "22°C");
        assert_eq!(format_temperature(22.5), "23°C");
        assert_eq!(format_temperature(-0.4), "-0°C");
    }

    #[test]
    fn test_format_visibility_switches_units() {
        assert_eq!(format_visibility(10000.0), "10.0 km");
        assert_eq!(format_visibility(850.0), "850 m");
    }

    #[test]
    fn test_format_hour_twelve_hour_clock() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
        assert_eq!(format_hour(date.and_hms_opt(0, 0, 0).unwrap()), "12 AM");
        assert_eq!(format_hour(date.and_hms_opt(9, 0, 0).unwrap()), "9 AM");
        assert_eq!(format_hour(date.and_hms_opt(12, 0, 0).unwrap()), "12 PM");
        assert_eq!(format_hour(date.and_hms_opt(14, 0, 0).unwrap()), "2 PM");
        assert_eq!(format_hour(date.and_hms_opt(23, 0, 0).unwrap()), "11 PM");
    }
}
