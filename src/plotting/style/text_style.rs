//! Text styling for axis labels, chart titles and the definitions panel.

use super::color::Color;

/// Horizontal alignment of a label relative to its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

/// Vertical alignment of a label relative to its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DominantBaseline {
    #[default]
    Auto,
    Middle,
    Hanging,
}

impl TextAnchor {
    fn as_attr(self) -> Option<&'static str> {
        match self {
            TextAnchor::Start => None,
            TextAnchor::Middle => Some("middle"),
            TextAnchor::End => Some("end"),
        }
    }
}

impl DominantBaseline {
    fn as_attr(self) -> Option<&'static str> {
        match self {
            DominantBaseline::Auto => None,
            DominantBaseline::Middle => Some("middle"),
            DominantBaseline::Hanging => Some("hanging"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font_size: f64,
    /// Chart titles
    pub bold: bool,
    /// Patient warnings
    pub italic: bool,
    pub color: Color,
    pub anchor: TextAnchor,
    pub baseline: DominantBaseline,
    /// Degrees about the text position; the y axis title uses -90.
    pub rotation: f64,
}

const FONT_FAMILY: &str = "sans-serif";

impl TextStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }

    pub fn anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn baseline(mut self, baseline: DominantBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    pub fn rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    /// Presentation attributes of a `<text>` element. Position and rotation
    /// are written by the backend.
    pub fn to_svg_attrs(&self) -> String {
        let mut attrs = format!(
            "font-family=\"{}\" font-size=\"{}\" fill=\"{}\"",
            FONT_FAMILY,
            self.font_size,
            self.color.to_svg_string()
        );
        if self.bold {
            attrs.push_str(" font-weight=\"bold\"");
        }
        if self.italic {
            attrs.push_str(" font-style=\"italic\"");
        }
        if let Some(anchor) = self.anchor.as_attr() {
            attrs.push_str(&format!(" text-anchor=\"{}\"", anchor));
        }
        if let Some(baseline) = self.baseline.as_attr() {
            attrs.push_str(&format!(" dominant-baseline=\"{}\"", baseline));
        }
        attrs
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        TextStyle {
            font_size: 12.0,
            bold: false,
            italic: false,
            color: Color::BLACK,
            anchor: TextAnchor::Start,
            baseline: DominantBaseline::Auto,
            rotation: 0.0,
        }
    }
}
