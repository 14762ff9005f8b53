//! Minimal SVG plotting primitives: linear scales, styles, axes and the SVG
//! writer the Kaplan-Meier renderer draws into.

pub mod backend;
pub mod element;
pub mod error;
pub mod scale;
pub mod style;

pub use backend::SvgBackend;
pub use element::{AxisConfig, AxisPosition};
pub use error::{PlotError, PlotResult};
pub use scale::{LinearScale, Scale, Tick};
pub use style::{Color, FillStyle, LineStyle, TextStyle};
