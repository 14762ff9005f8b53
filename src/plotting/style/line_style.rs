//! Stroke styling for curve paths and censor ticks.

use super::color::Color;

/// Style configuration for stroked lines.
#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    /// Line color
    pub color: Color,
    /// Line width in pixels
    pub width: f64,
    /// Line cap style
    pub cap: LineCap,
    /// Line join style
    pub join: LineJoin,
    /// Opacity (0.0 - 1.0)
    pub opacity: f64,
}

impl LineStyle {
    /// Create a new line style with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line color.
    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }

    /// Set the line width.
    pub fn width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Set the line cap style.
    pub fn cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }

    /// Set the line join style.
    pub fn join(mut self, join: LineJoin) -> Self {
        self.join = join;
        self
    }

    /// Set the opacity.
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Generate SVG presentation attributes.
    pub fn to_svg_style(&self) -> String {
        let mut attrs = vec![
            format!("stroke=\"{}\"", self.color.to_svg_string()),
            format!("stroke-width=\"{}\"", self.width),
            format!("stroke-linecap=\"{}\"", self.cap.to_svg_string()),
            format!("stroke-linejoin=\"{}\"", self.join.to_svg_string()),
            "fill=\"none\"".to_string(),
        ];

        if self.opacity < 1.0 {
            attrs.push(format!("stroke-opacity=\"{}\"", self.opacity));
        }

        attrs.join(" ")
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        LineStyle {
            color: Color::default(),
            width: 1.5,
            cap: LineCap::Butt,
            join: LineJoin::Miter,
            opacity: 1.0,
        }
    }
}

/// Line cap styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    /// Flat end at the exact endpoint
    #[default]
    Butt,
    /// Rounded end
    Round,
    /// Square end extending past the endpoint
    Square,
}

impl LineCap {
    pub fn to_svg_string(&self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
            LineCap::Square => "square",
        }
    }
}

/// Line join styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    /// Sharp corner; keeps step corners square
    #[default]
    Miter,
    /// Rounded corner
    Round,
    /// Beveled corner
    Bevel,
}

impl LineJoin {
    pub fn to_svg_string(&self) -> &'static str {
        match self {
            LineJoin::Miter => "miter",
            LineJoin::Round => "round",
            LineJoin::Bevel => "bevel",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_style_includes_opacity_only_when_translucent() {
        let opaque = LineStyle::new().color("#ff0000").width(3.0);
        let svg = opaque.to_svg_style();
        assert!(svg.contains("stroke=\"#ff0000\""));
        assert!(svg.contains("stroke-width=\"3\""));
        assert!(!svg.contains("stroke-opacity"));

        let faint = opaque.opacity(0.25);
        assert!(faint.to_svg_style().contains("stroke-opacity=\"0.25\""));
    }

    #[test]
    fn test_opacity_is_clamped() {
        assert_eq!(LineStyle::new().opacity(3.0).opacity, 1.0);
        assert_eq!(LineStyle::new().opacity(-1.0).opacity, 0.0);
    }
}
