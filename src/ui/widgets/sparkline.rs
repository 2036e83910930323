//! Temperature sparkline widget for inline visualization

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Block characters for different temperature levels (8 levels)
const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// A sparkline widget showing hourly temperatures over time
///
/// Values are normalized over the series' own min..max range, so a winter
/// sequence of sub-zero readings still spans the full block height.
pub struct TempSparkline<'a> {
    /// Temperature for each hourly slot
    temperatures: &'a [f64],
    /// Current position marker (index into temperatures)
    current_position: Option<usize>,
    /// Style for the sparkline
    style: Style,
    /// Style for the current position marker
    marker_style: Style,
}

impl<'a> TempSparkline<'a> {
    pub fn new(temperatures: &'a [f64]) -> Self {
        Self {
            temperatures,
            current_position: None,
            style: Style::default().fg(Color::Cyan),
            marker_style: Style::default().fg(Color::Yellow),
        }
    }

    pub fn current_position(mut self, pos: usize) -> Self {
        self.current_position = Some(pos);
        self
    }

    #[allow(dead_code)]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Min and max of the series; a flat series gets a synthetic 1-degree
    /// span so normalization never divides by zero.
    fn bounds(&self) -> (f64, f64) {
        let min = self
            .temperatures
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min);
        let max = self
            .temperatures
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);

        if (max - min).abs() < f64::EPSILON {
            (min - 0.5, min + 0.5)
        } else {
            (min, max)
        }
    }

    fn temp_to_block(&self, temp: f64, min: f64, max: f64) -> char {
        let normalized = ((temp - min) / (max - min)).clamp(0.0, 1.0);
        let index = ((normalized * 7.0).round() as usize).min(7);
        BLOCKS[index]
    }
}

impl<'a> Widget for TempSparkline<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 || self.temperatures.is_empty() {
            return;
        }

        let width = area.width as usize;
        let (min, max) = self.bounds();

        for (i, temp) in self.temperatures.iter().take(width).enumerate() {
            let block = self.temp_to_block(*temp, min, max);
            let x = area.x + i as u16;
            let y = area.y;

            let style = if self.current_position == Some(i) {
                self.marker_style
            } else {
                self.style
            };

            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char(block).set_style(style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_to_block_extremes() {
        let temps = vec![10.0, 20.0];
        let sparkline = TempSparkline::new(&temps);
        let (min, max) = sparkline.bounds();
        assert_eq!(sparkline.temp_to_block(10.0, min, max), '▁');
        assert_eq!(sparkline.temp_to_block(20.0, min, max), '█');
    }

    #[test]
    fn test_temp_to_block_mid() {
        let temps = vec![0.0, 10.0];
        let sparkline = TempSparkline::new(&temps);
        let (min, max) = sparkline.bounds();
        let block = sparkline.temp_to_block(5.0, min, max);
        assert!(BLOCKS.contains(&block));
    }

    #[test]
    fn test_negative_temperatures_span_full_range() {
        let temps = vec![-15.0, -10.0, -5.0];
        let sparkline = TempSparkline::new(&temps);
        let (min, max) = sparkline.bounds();
        assert_eq!(sparkline.temp_to_block(-15.0, min, max), '▁');
        assert_eq!(sparkline.temp_to_block(-5.0, min, max), '█');
    }

    #[test]
    fn test_flat_series_does_not_divide_by_zero() {
        let temps = vec![20.0, 20.0, 20.0];
        let sparkline = TempSparkline::new(&temps);
        let (min, max) = sparkline.bounds();
        assert!(max > min);
        let block = sparkline.temp_to_block(20.0, min, max);
        assert!(BLOCKS.contains(&block));
    }

    #[test]
    fn test_sparkline_creation() {
        let temps = vec![15.0, 18.0, 22.0, 25.0, 22.0, 18.0, 15.0];
        let sparkline = TempSparkline::new(&temps)
            .current_position(3)
            .style(Style::default().fg(Color::Blue));

        assert_eq!(sparkline.temperatures.len(), 7);
        assert_eq!(sparkline.current_position, Some(3));
    }

    #[test]
    fn test_render_empty_series_is_noop() {
        let temps: Vec<f64> = Vec::new();
        let sparkline = TempSparkline::new(&temps);
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 1));
        sparkline.render(Rect::new(0, 0, 10, 1), &mut buf);

        for x in 0..10 {
            assert_eq!(buf.cell((x, 0)).unwrap().symbol(), " ");
        }
    }
}
