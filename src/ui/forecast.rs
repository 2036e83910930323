//! Forecast screen UI
//!
//! Renders the 7-day forecast as one row per day: date, condition,
//! temperature range, precipitation, and wind.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::ForecastDay;
use crate::ui::conditions::{colors, format_temperature};

/// Renders the forecast screen
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
            format!(" 7-Day Forecast — {} ", app.place_name),
            Style::default()
                .fg(colors::PRIMARY)
                .add_modifier(Modifier::BOLD),
        ));

    let inner_area = main_block.inner(area);
    frame.render_widget(main_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner_area);

    render_day_rows(frame, chunks[0], app);
    render_help_line(frame, chunks[1]);
}

/// Renders one line per forecast day
fn render_day_rows(frame: &mut Frame, area: Rect, app: &App) {
    if app.forecast.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No forecast data available",
                Style::default().fg(colors::SECONDARY),
            )),
            area,
        );
        return;
    }

    let lines: Vec<Line> = app.forecast.iter().map(day_line).collect();
    frame.render_widget(Paragraph::new(lines), area);
}

/// Builds the display line for a single forecast day
fn day_line(day: &ForecastDay) -> Line<'static> {
    let mut spans = vec![
        Span::styled(
            format!("{:<12}", day.date.format("%a %b %e").to_string()),
            Style::default().fg(colors::PRIMARY),
        ),
        Span::raw(format!("{}  ", day.icon)),
        Span::styled(
            format!("{:<24}", day.description),
            Style::default().fg(colors::PRIMARY),
        ),
        Span::styled(
            format!(
                "{:>5} / {:<5}",
                format_temperature(day.temp_min),
                format_temperature(day.temp_max)
            ),
            Style::default().fg(colors::PRIMARY),
        ),
        Span::styled(
            format!("  rain {:>4.1} mm", day.precipitation),
            Style::default().fg(colors::SECONDARY),
        ),
    ];

    // Daily wind is a known gap in the upstream schema; hide the zero
    // instead of showing a misleading calm reading.
    if day.wind_speed > 0.0 {
        spans.push(Span::styled(
            format!("  wind {} km/h", day.wind_speed.round()),
            Style::default().fg(colors::SECONDARY),
        ));
    }

    Line::from(spans)
}

/// Renders the one-line key hints footer
fn render_help_line(frame: &mut Frame, area: Rect) {
    frame.render_widget(
        Paragraph::new(Span::styled(
            "Tab conditions · r refresh · ? help · q quit",
            Style::default().fg(colors::SECONDARY),
        )),
        area,
    );
}
