//! Color definitions and utilities.

use std::fmt;

use crate::plotting::element::escape_xml;

/// Represents a color for chart elements.
///
/// Group colors arrive from upstream as CSS strings; hex strings are parsed
/// into RGB, anything else is kept as a named color and escaped on output.
#[derive(Debug, Clone, PartialEq)]
pub enum Color {
    /// RGB color with values 0-255
    Rgb(u8, u8, u8),
    /// RGBA color with alpha 0.0-1.0
    Rgba(u8, u8, u8, f64),
    /// Named CSS color (e.g., "steelblue")
    Named(String),
}

impl Color {
    /// Create a color from a hex string (`#RGB`, `#RRGGBB` or `#RRGGBBAA`).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            3 => {
                let mut rgb = [0u8; 3];
                for (slot, c) in rgb.iter_mut().zip(hex.chars()) {
                    let v = c.to_digit(16)? as u8;
                    *slot = v * 16 + v;
                }
                Some(Color::Rgb(rgb[0], rgb[1], rgb[2]))
            }
            6 => Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Color::Rgba(
                channel(0)?,
                channel(2)?,
                channel(4)?,
                channel(6)? as f64 / 255.0,
            )),
            _ => None,
        }
    }

    /// Convert the color to an SVG-compatible string.
    pub fn to_svg_string(&self) -> String {
        match self {
            Color::Rgb(r, g, b) => format!("#{:02x}{:02x}{:02x}", r, g, b),
            Color::Rgba(r, g, b, a) => format!("rgba({},{},{},{})", r, g, b, a),
            Color::Named(name) => escape_xml(name),
        }
    }

    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
    pub const DARK_GRAY: Color = Color::Rgb(64, 64, 64);
    pub const WARNING: Color = Color::Rgb(240, 173, 78);
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_svg_string())
    }
}

impl From<&str> for Color {
    fn from(s: &str) -> Self {
        let s = s.trim();
        if s.starts_with('#') {
            Color::from_hex(s).unwrap_or_else(|| Color::Named(s.to_string()))
        } else {
            Color::Named(s.to_string())
        }
    }
}

impl From<String> for Color {
    fn from(s: String) -> Self {
        Color::from(s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing() {
        assert_eq!(Color::from_hex("#ff0000"), Some(Color::Rgb(255, 0, 0)));
        assert_eq!(Color::from_hex("#0f0"), Some(Color::Rgb(0, 255, 0)));
        assert_eq!(Color::from_hex("#zz0000"), None);
        assert_eq!(Color::from_hex("#12345"), None);
        match Color::from_hex("#00000080") {
            Some(Color::Rgba(0, 0, 0, a)) => assert!((a - 128.0 / 255.0).abs() < 1e-12),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_from_css_string() {
        assert_eq!(Color::from("#1f77b4").to_svg_string(), "#1f77b4");
        assert_eq!(Color::from("steelblue"), Color::Named("steelblue".to_string()));
        assert_eq!(Color::from("#nothex").to_svg_string(), "#nothex");
    }

    #[test]
    fn test_named_color_is_attribute_safe() {
        let color = Color::from("red\" onmouseover=\"alert(1)");
        assert_eq!(color.to_svg_string(), "red&quot; onmouseover=&quot;alert(1)");
        assert!(!color.to_svg_string().contains('"'));
    }
}
