//! Axis configuration and rendering.

use crate::plotting::backend::SvgBackend;
use crate::plotting::scale::Scale;
use crate::plotting::style::{
    Color, DominantBaseline, LineStyle, TextAnchor, TextStyle,
};

/// Position of an axis relative to the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisPosition {
    Bottom,
    Left,
}

/// Configuration for an axis.
#[derive(Debug, Clone)]
pub struct AxisConfig {
    pub position: AxisPosition,
    /// Axis line style
    pub line_style: LineStyle,
    /// Length of tick marks in pixels
    pub tick_length: f64,
    /// Style for tick labels
    pub tick_label_style: TextStyle,
    /// Number of ticks to aim for
    pub num_ticks: usize,
    /// Padding between tick marks and labels
    pub tick_padding: f64,
    /// Axis title, drawn inside the plot area along the axis
    pub title: Option<String>,
}

impl AxisConfig {
    /// Create a new axis configuration with defaults.
    pub fn new(position: AxisPosition) -> Self {
        AxisConfig {
            position,
            line_style: LineStyle::new().color(Color::BLACK).width(1.0),
            tick_length: 6.0,
            tick_label_style: TextStyle::new().font_size(10.0),
            num_ticks: 5,
            tick_padding: 3.0,
            title: None,
        }
    }

    /// Set the number of ticks.
    pub fn num_ticks(mut self, num: usize) -> Self {
        self.num_ticks = num;
        self
    }

    /// Set the axis title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Format a tick value as a label.
    pub fn format_tick(&self, value: f64) -> String {
        if value == 0.0 {
            "0".to_string()
        } else if value.abs() >= 1e6 || value.abs() < 1e-4 {
            format!("{:.2e}", value)
        } else if value.fract() == 0.0 {
            format!("{:.0}", value)
        } else {
            let fixed = format!("{:.4}", value);
            fixed.trim_end_matches('0').trim_end_matches('.').to_string()
        }
    }

    /// Draw the axis line, ticks, labels and optional title.
    ///
    /// The backend origin must be the top-left corner of the plot area;
    /// `cross` is the plot extent perpendicular to the axis (the plot height
    /// for a bottom axis).
    pub fn render(&self, backend: &mut SvgBackend, scale: &dyn Scale, cross: f64) {
        let (r0, r1) = scale.range();
        let ticks = scale.ticks(self.num_ticks);
        match self.position {
            AxisPosition::Bottom => {
                backend.start_translated(0.0, cross, "class=\"x axis\"");
                backend.draw_line(r0, 0.0, r1, 0.0, &self.line_style);
                let label_style = self
                    .tick_label_style
                    .clone()
                    .anchor(TextAnchor::Middle)
                    .baseline(DominantBaseline::Hanging);
                for tick in &ticks {
                    backend.draw_line(tick.pixel, 0.0, tick.pixel, self.tick_length, &self.line_style);
                    backend.draw_text(
                        tick.pixel,
                        self.tick_length + self.tick_padding,
                        &self.format_tick(tick.value),
                        &label_style,
                    );
                }
                if let Some(ref title) = self.title {
                    let style = TextStyle::new().anchor(TextAnchor::End);
                    backend.draw_text(r0.max(r1) - 5.0, -5.0, title, &style);
                }
                backend.end_group();
            }
            AxisPosition::Left => {
                backend.start_group("class=\"y axis\"");
                backend.draw_line(0.0, r0, 0.0, r1, &self.line_style);
                let label_style = self
                    .tick_label_style
                    .clone()
                    .anchor(TextAnchor::End)
                    .baseline(DominantBaseline::Middle);
                for tick in &ticks {
                    backend.draw_line(-self.tick_length, tick.pixel, 0.0, tick.pixel, &self.line_style);
                    backend.draw_text(
                        -self.tick_length - self.tick_padding,
                        tick.pixel,
                        &self.format_tick(tick.value),
                        &label_style,
                    );
                }
                if let Some(ref title) = self.title {
                    let style = TextStyle::new().rotation(-90.0);
                    let offset = 5.0 + 0.71 * style.font_size;
                    backend.draw_text(offset, r0.max(r1) - 5.0, title, &style);
                }
                backend.end_group();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plotting::scale::LinearScale;

    #[test]
    fn test_format_tick() {
        let axis = AxisConfig::new(AxisPosition::Left);
        assert_eq!(axis.format_tick(0.0), "0");
        assert_eq!(axis.format_tick(0.2), "0.2");
        assert_eq!(axis.format_tick(1.0), "1");
        assert_eq!(axis.format_tick(250.0), "250");
        assert_eq!(axis.format_tick(2.5e7), "2.50e7");
    }

    #[test]
    fn test_left_axis_renders_every_tick() {
        let axis = AxisConfig::new(AxisPosition::Left).title("Survival probability");
        let scale = LinearScale::survival(400.0);
        let mut backend = SvgBackend::new(500.0, 500.0);
        axis.render(&mut backend, &scale, 300.0);
        let svg = backend.render();

        // axis line + one line per tick
        assert_eq!(svg.matches("<line").count(), 1 + 6);
        assert!(svg.contains(">0.6</text>"));
        assert!(svg.contains("rotate(-90"));
        assert!(svg.contains("Survival probability"));
    }

    #[test]
    fn test_bottom_axis_is_translated_to_plot_floor() {
        let axis = AxisConfig::new(AxisPosition::Bottom);
        let scale = LinearScale::time((0.0, 100.0), 300.0);
        let mut backend = SvgBackend::new(400.0, 400.0);
        axis.render(&mut backend, &scale, 250.0);
        let svg = backend.render();
        assert!(svg.contains("translate(0.00,250.00)"));
        assert!(svg.contains(">100</text>"));
    }
}
