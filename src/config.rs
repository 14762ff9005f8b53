//! Chart configuration.
//!
//! Every field has a default, so an empty JSON object (or no file at all)
//! yields the stock 700x450 chart.

use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;

use crate::km::curve_group::CurveStyle;
use crate::km::interaction::LeavePolicy;
use crate::km::layout::{Dims, LayoutRatios, Margin, Ratio};
use crate::km::legend::SwatchStyle;
use crate::plotting::{PlotError, PlotResult};

// ============================================================================
// Chart Configuration
// ============================================================================

/// Sizes, styles and interaction policy for a chart instance
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ChartConfig {
    /// Outer box the chart is laid out in
    #[serde(default)]
    pub dims: Dims,
    /// Fractions of the outer box given to the graph and definitions regions
    #[serde(default)]
    pub ratios: LayoutRatios,
    /// Fraction of the graph region used by the graph canvas
    #[serde(default = "default_graph_fill")]
    pub graph_fill: Ratio,
    /// Space around the plot area for axes
    #[serde(default)]
    pub margin: Margin,
    #[serde(default)]
    pub curve: CurveStyle,
    #[serde(default)]
    pub swatch: SwatchStyle,
    #[serde(default = "default_x_ticks")]
    pub x_ticks: usize,
    #[serde(default = "default_y_ticks")]
    pub y_ticks: usize,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    /// What pointer-leave does when another label is active
    #[serde(default)]
    pub leave_policy: LeavePolicy,
}

fn default_graph_fill() -> Ratio { Ratio::new(0.9, 0.8) }
fn default_x_ticks() -> usize { 6 }
fn default_y_ticks() -> usize { 5 }
fn default_font_size() -> f64 { 12.0 }

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig {
            dims: Dims::default(),
            ratios: LayoutRatios::default(),
            graph_fill: default_graph_fill(),
            margin: Margin::default(),
            curve: CurveStyle::default(),
            swatch: SwatchStyle::default(),
            x_ticks: default_x_ticks(),
            y_ticks: default_y_ticks(),
            font_size: default_font_size(),
            leave_policy: LeavePolicy::default(),
        }
    }
}

impl ChartConfig {
    /// Load chart configuration from a JSON file
    pub fn load(path: &str) -> PlotResult<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let config: ChartConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse chart configuration from a JSON string
    pub fn from_json(json: &str) -> PlotResult<Self> {
        let config: ChartConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> PlotResult<()> {
        let sizes = [
            ("dims.width", self.dims.width),
            ("dims.height", self.dims.height),
            ("graph_fill.width", self.graph_fill.width),
            ("graph_fill.height", self.graph_fill.height),
        ];
        for (name, value) in sizes {
            if !(value.is_finite() && value > 0.0) {
                return Err(PlotError::InvalidConfig(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_gives_defaults() {
        let config = ChartConfig::from_json("{}").unwrap();
        assert_eq!(config, ChartConfig::default());
        assert_eq!(config.dims, Dims::new(700.0, 450.0));
        assert_eq!(config.ratios.graph, Ratio::new(0.75, 1.0));
        assert_eq!(config.leave_policy, LeavePolicy::Unconditional);
    }

    #[test]
    fn test_partial_override() {
        let config = ChartConfig::from_json(
            r#"{
                "dims": {"width": 1000, "height": 600},
                "ratios": {"definitions": {"width": 0.3, "height": 1.0}},
                "curve": {"censor_half_length": 3.0},
                "leave_policy": "only_if_active"
            }"#,
        )
        .unwrap();
        assert_eq!(config.dims, Dims::new(1000.0, 600.0));
        assert_eq!(config.ratios.graph, Ratio::new(0.75, 1.0));
        assert_eq!(config.ratios.definitions, Ratio::new(0.3, 1.0));
        assert_eq!(config.curve.censor_half_length, 3.0);
        assert_eq!(config.curve.hover, CurveStyle::default().hover);
        assert_eq!(config.leave_policy, LeavePolicy::OnlyIfActive);
    }

    #[test]
    fn test_rejects_non_positive_dims() {
        let err = ChartConfig::from_json(r#"{"dims": {"width": 0, "height": 450}}"#).unwrap_err();
        assert!(matches!(err, PlotError::InvalidConfig(_)));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            ChartConfig::load("/nonexistent/kmplot.json"),
            Err(PlotError::Io(_))
        ));
    }
}
