//! SVG rendering backend.

use crate::plotting::element::text::escape_xml;
use crate::plotting::style::{Color, FillStyle, LineStyle, TextStyle};

/// SVG rendering backend.
///
/// Elements are appended in paint order; groups must be balanced by the
/// caller.
#[derive(Debug)]
pub struct SvgBackend {
    /// Image width in pixels
    pub width: f64,
    /// Image height in pixels
    pub height: f64,
    /// SVG content accumulated during rendering
    content: Vec<String>,
    /// Open `<g>` elements
    depth: usize,
    /// Whether to include XML declaration
    include_declaration: bool,
}

impl SvgBackend {
    /// Create a new SVG backend with the given dimensions.
    pub fn new(width: f64, height: f64) -> Self {
        SvgBackend {
            width,
            height,
            content: Vec::new(),
            depth: 0,
            include_declaration: true,
        }
    }

    /// Set whether to include XML declaration.
    pub fn include_declaration(mut self, include: bool) -> Self {
        self.include_declaration = include;
        self
    }

    /// Fill the whole canvas.
    pub fn background(&mut self, color: &Color) {
        self.content.push(format!(
            "<rect width=\"{}\" height=\"{}\" fill=\"{}\"/>",
            self.width,
            self.height,
            color.to_svg_string()
        ));
    }

    /// Draw a line between two points.
    pub fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, style: &LineStyle) {
        self.content.push(format!(
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" {}/>",
            x1,
            y1,
            x2,
            y2,
            style.to_svg_style()
        ));
    }

    /// Draw a path from pre-built path data.
    pub fn draw_path(&mut self, path_data: &str, style: &LineStyle) {
        self.content.push(format!(
            "<path d=\"{}\" {}/>",
            path_data,
            style.to_svg_style()
        ));
    }

    /// Draw a rectangle.
    pub fn draw_rect(&mut self, x: f64, y: f64, width: f64, height: f64, style: &FillStyle) {
        self.content.push(format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" {}/>",
            x,
            y,
            width,
            height,
            style.to_svg_style()
        ));
    }

    /// Draw text.
    pub fn draw_text(&mut self, x: f64, y: f64, text: &str, style: &TextStyle) {
        let transform = if style.rotation != 0.0 {
            format!(" transform=\"rotate({},{:.2},{:.2})\"", style.rotation, x, y)
        } else {
            String::new()
        };

        self.content.push(format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" {}{}>{}</text>",
            x,
            y,
            style.to_svg_attrs(),
            transform,
            escape_xml(text)
        ));
    }

    /// Start a group with optional attributes.
    pub fn start_group(&mut self, attrs: &str) {
        if attrs.is_empty() {
            self.content.push("<g>".to_string());
        } else {
            self.content.push(format!("<g {}>", attrs));
        }
        self.depth += 1;
    }

    /// Start a group translated by `(dx, dy)`.
    pub fn start_translated(&mut self, dx: f64, dy: f64, attrs: &str) {
        let translate = format!("transform=\"translate({:.2},{:.2})\"", dx, dy);
        if attrs.is_empty() {
            self.start_group(&translate);
        } else {
            self.start_group(&format!("{} {}", translate, attrs));
        }
    }

    /// End the current group.
    pub fn end_group(&mut self) {
        if self.depth > 0 {
            self.content.push("</g>".to_string());
            self.depth -= 1;
        }
    }

    /// Render the final SVG string, closing any group left open.
    pub fn render(mut self) -> String {
        while self.depth > 0 {
            self.end_group();
        }

        let declaration = if self.include_declaration {
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"
        } else {
            ""
        };

        format!(
            r#"{}<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">
  {}
</svg>"#,
            declaration,
            self.width,
            self.height,
            self.width,
            self.height,
            self.content.join("\n  ")
        )
    }
}
