//! Visual elements drawn around the curves.

mod axis;
pub mod text;

pub use axis::{AxisConfig, AxisPosition};
pub use text::escape_xml;
