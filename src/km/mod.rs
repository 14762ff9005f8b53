//! Kaplan-Meier curve geometry, interaction state and chart assembly.

pub mod censor;
pub mod chart;
pub mod curve_group;
pub mod format;
pub mod intent;
pub mod interaction;
pub mod layout;
pub mod legend;
pub mod model;
pub mod render;
pub mod schema;
pub mod step;

pub use chart::{ChartFrame, ChartProps, Frame, KmChart};
pub use intent::{Intent, PdfExport, SplitCount};
pub use interaction::{ActiveLabel, HoverEvent, LeavePolicy};
pub use model::{Curve, Group, GroupSet, RawGroupSet, Sample};
