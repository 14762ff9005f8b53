//! Region sizing: outer box -> graph and definitions regions -> plot area.

use serde::Deserialize;

/// A width/height box in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Dims {
    pub width: f64,
    pub height: f64,
}

impl Dims {
    pub fn new(width: f64, height: f64) -> Self {
        Dims { width, height }
    }

    /// Scale each side independently.
    pub fn scaled(&self, ratio: &Ratio) -> Dims {
        Dims {
            width: self.width * ratio.width,
            height: self.height * ratio.height,
        }
    }
}

impl Default for Dims {
    fn default() -> Self {
        Dims::new(700.0, 450.0)
    }
}

/// Per-side fractions of a parent box.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Ratio {
    pub width: f64,
    pub height: f64,
}

impl Ratio {
    pub const fn new(width: f64, height: f64) -> Self {
        Ratio { width, height }
    }
}

/// Fractions of the outer box given to each region.
///
/// Regions are laid out side by side by the caller and the fractions need
/// not sum to one.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutRatios {
    pub graph: Ratio,
    pub definitions: Ratio,
}

impl Default for LayoutRatios {
    fn default() -> Self {
        LayoutRatios {
            graph: Ratio::new(0.75, 1.0),
            definitions: Ratio::new(0.4, 1.0),
        }
    }
}

/// Region boxes derived from the outer box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Regions {
    pub graph: Dims,
    pub definitions: Dims,
}

/// Derive each region's box from `outer`.
pub fn partition(outer: Dims, ratios: &LayoutRatios) -> Regions {
    Regions {
        graph: outer.scaled(&ratios.graph),
        definitions: outer.scaled(&ratios.definitions),
    }
}

/// Space reserved around the plot area for axes.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Margin {
            top: 20.0,
            right: 30.0,
            bottom: 30.0,
            left: 50.0,
        }
    }
}

/// Geometry of the graph region: the SVG canvas and the inner plot area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphLayout {
    /// Canvas size
    pub canvas: Dims,
    /// Plot area inside the margins; curves are drawn in this box
    pub plot: Dims,
    pub margin: Margin,
}

impl GraphLayout {
    /// The canvas takes `fill` of the graph region; the plot area is the
    /// canvas minus margins, clamped at zero.
    pub fn new(region: Dims, fill: &Ratio, margin: Margin) -> Self {
        let canvas = region.scaled(fill);
        let plot = Dims {
            width: (canvas.width - margin.left - margin.right).max(0.0),
            height: (canvas.height - margin.top - margin.bottom).max(0.0),
        };
        GraphLayout {
            canvas,
            plot,
            margin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_partition() {
        let regions = partition(Dims::new(700.0, 450.0), &LayoutRatios::default());
        assert_eq!(regions.graph, Dims::new(525.0, 450.0));
        assert_eq!(regions.definitions.height, 450.0);
        assert!((regions.definitions.width - 280.0).abs() < 1e-9);
    }

    #[test]
    fn test_partition_is_deterministic() {
        let ratios = LayoutRatios::default();
        let outer = Dims::new(700.0, 450.0);
        let a = partition(outer, &ratios);
        let b = partition(outer, &ratios);
        assert_eq!(a.graph.width.to_bits(), b.graph.width.to_bits());
        assert_eq!(a.definitions.width.to_bits(), b.definitions.width.to_bits());
        assert_eq!(a, b);
    }

    #[test]
    fn test_partition_scales_linearly() {
        let ratios = LayoutRatios::default();
        let one = partition(Dims::new(700.0, 450.0), &ratios);
        let two = partition(Dims::new(1400.0, 450.0), &ratios);
        assert_eq!(two.graph.width, 2.0 * one.graph.width);
        assert_eq!(two.definitions.width, 2.0 * one.definitions.width);
        assert_eq!(two.graph.height, one.graph.height);
    }

    #[test]
    fn test_graph_layout_subtracts_margins() {
        let layout = GraphLayout::new(
            Dims::new(500.0, 400.0),
            &Ratio::new(0.9, 0.8),
            Margin::default(),
        );
        assert_eq!(layout.canvas, Dims::new(450.0, 320.0));
        assert_eq!(layout.plot, Dims::new(370.0, 270.0));
    }

    #[test]
    fn test_tiny_region_clamps_plot() {
        let layout = GraphLayout::new(Dims::new(10.0, 10.0), &Ratio::new(1.0, 1.0), Margin::default());
        assert_eq!(layout.plot, Dims::new(0.0, 0.0));
    }
}
