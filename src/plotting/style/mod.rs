//! Styling types: colors, strokes, fills and text.

pub mod color;
pub mod fill_style;
pub mod line_style;
pub mod text_style;

pub use color::Color;
pub use fill_style::FillStyle;
pub use line_style::{LineCap, LineJoin, LineStyle};
pub use text_style::{DominantBaseline, TextAnchor, TextStyle};
