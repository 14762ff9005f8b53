//! Right-continuous step paths for survival curves.

use crate::km::model::Curve;
use crate::plotting::Scale;

/// One drawing command of a step path, in local pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(f64, f64),
    /// Horizontal segment to the given x, keeping y
    HorizontalTo(f64),
    /// Vertical segment to the given y, keeping x
    VerticalTo(f64),
}

/// A straight segment visited by a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: (f64, f64),
    pub to: (f64, f64),
}

impl Segment {
    pub fn is_horizontal(&self) -> bool {
        self.from.1 == self.to.1
    }

    pub fn is_vertical(&self) -> bool {
        self.from.0 == self.to.0
    }
}

/// Piecewise-constant path through a curve's samples.
#[derive(Debug, Clone, PartialEq)]
pub struct StepPath {
    commands: Vec<PathCommand>,
}

impl StepPath {
    /// True when the path is only the origin (empty curve).
    pub fn is_degenerate(&self) -> bool {
        self.commands.len() <= 1
    }

    /// Every segment in drawing order. Only axis-aligned segments can occur.
    pub fn segments(&self) -> Vec<Segment> {
        let mut segments = Vec::with_capacity(self.commands.len());
        let mut pen = (0.0, 0.0);
        for cmd in &self.commands {
            let next = match *cmd {
                PathCommand::MoveTo(x, y) => {
                    pen = (x, y);
                    continue;
                }
                PathCommand::HorizontalTo(x) => (x, pen.1),
                PathCommand::VerticalTo(y) => (pen.0, y),
            };
            segments.push(Segment { from: pen, to: next });
            pen = next;
        }
        segments
    }

    /// SVG path data: `M0,0 H<x>V<y> H<x>V<y> ...`.
    pub fn to_svg_data(&self) -> String {
        self.commands
            .iter()
            .map(|cmd| match *cmd {
                PathCommand::MoveTo(x, y) => format!("M{},{}", x, y),
                PathCommand::HorizontalTo(x) => format!(" H{}", x),
                PathCommand::VerticalTo(y) => format!("V{}", y),
            })
            .collect()
    }
}

/// Build the step path for `curve`.
///
/// The path starts at the local origin and, for each sample, runs
/// horizontally at the previous survival level to the sample's time, then
/// drops vertically to the sample's survival level.
pub fn step_path(curve: &Curve, x: &dyn Scale, y: &dyn Scale) -> StepPath {
    let mut commands = Vec::with_capacity(1 + 2 * curve.len());
    commands.push(PathCommand::MoveTo(0.0, 0.0));
    for p in curve.samples() {
        commands.push(PathCommand::HorizontalTo(x.apply(p.t)));
        commands.push(PathCommand::VerticalTo(y.apply(p.s)));
    }
    StepPath { commands }
}
