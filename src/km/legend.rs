//! Legend entries, highlighted in step with their curve groups.

use serde::Deserialize;

use crate::km::format::EMPTY_SET;
use crate::km::interaction::ActiveLabel;
use crate::km::model::{Curve, Group};
use crate::plotting::style::{Color, FillStyle};

/// Swatch geometry for legend entries.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SwatchStyle {
    pub width: f64,
    pub height: f64,
    pub border_width: f64,
    pub active_border_width: f64,
}

impl Default for SwatchStyle {
    fn default() -> Self {
        SwatchStyle {
            width: 25.0,
            height: 6.0,
            border_width: 1.0,
            active_border_width: 2.0,
        }
    }
}

/// One legend row.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: Color,
    /// Initial at-risk count, or the empty-set glyph
    pub sample_count: String,
    pub is_active: bool,
    pub swatch: FillStyle,
}

impl LegendEntry {
    /// `"<label> (n=<count>)"`
    pub fn text(&self) -> String {
        format!("{} (n={})", self.label, self.sample_count)
    }
}

/// Number of samples in a group: the at-risk count at the first time point.
pub fn sample_count(curve: &Curve) -> String {
    curve
        .initial_at_risk()
        .map(|n| n.to_string())
        .unwrap_or_else(|| EMPTY_SET.to_string())
}

/// Build one entry.
pub fn legend_entry(group: &Group, is_active: bool, swatch: &SwatchStyle) -> LegendEntry {
    let border = if is_active {
        swatch.active_border_width
    } else {
        swatch.border_width
    };
    LegendEntry {
        label: group.label.clone(),
        color: group.color.clone(),
        sample_count: sample_count(&group.curve),
        is_active,
        swatch: FillStyle::new(group.color.clone())
            .stroke(Color::BLACK)
            .stroke_width(border),
    }
}

/// Entries for every group, in group order.
pub fn legend_entries(groups: &[Group], active: &ActiveLabel, swatch: &SwatchStyle) -> Vec<LegendEntry> {
    groups
        .iter()
        .map(|g| legend_entry(g, active.is_active(&g.label), swatch))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::km::model::Sample;

    fn groups() -> Vec<Group> {
        vec![
            Group::new(
                "#ff0000",
                "high",
                vec![
                    Sample { t: 0.0, s: 1.0, n: 42, e: true },
                    Sample { t: 3.0, s: 0.8, n: 30, e: true },
                ],
            ),
            Group::new("#0000ff", "low", Curve::empty()),
        ]
    }

    #[test]
    fn test_sample_count_text() {
        let entries = legend_entries(&groups(), &ActiveLabel::default(), &SwatchStyle::default());
        assert_eq!(entries[0].text(), "high (n=42)");
        assert_eq!(entries[1].text(), "low (n=\u{2205})");
        assert_eq!(entries[1].sample_count, EMPTY_SET);
    }

    #[test]
    fn test_active_entry_gets_thicker_border() {
        let mut active = ActiveLabel::default();
        active.set("low");
        let entries = legend_entries(&groups(), &active, &SwatchStyle::default());
        assert!(!entries[0].is_active);
        assert!(entries[1].is_active);
        assert_eq!(entries[0].swatch.stroke_width, 1.0);
        assert_eq!(entries[1].swatch.stroke_width, 2.0);
        assert_eq!(entries[1].swatch.color, Color::Rgb(0, 0, 255));
    }
}
