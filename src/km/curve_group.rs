//! Per-group curve layers and their memoization.
//!
//! Each group is drawn as two stacked copies of the same geometry: a wide
//! "outline" stroke under a narrow "highlight" stroke, for both the step path
//! and the censor ticks. Hovering swaps the normal stroke pair for the hover
//! pair.

use std::rc::Rc;

use log::debug;
use serde::Deserialize;

use crate::km::censor::{censor_marks, CensorMark};
use crate::km::interaction::ActiveLabel;
use crate::km::model::{Curve, Group};
use crate::km::step::{step_path, StepPath};
use crate::plotting::style::{Color, LineCap, LineJoin, LineStyle};
use crate::plotting::LinearScale;

/// Widths and opacities of one outline/highlight stroke pair.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct StrokeSpec {
    pub outline_width: f64,
    pub outline_opacity: f64,
    pub line_width: f64,
    pub line_opacity: f64,
}

/// The two fixed stroke pairs a group switches between.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CurveStyle {
    pub normal: StrokeSpec,
    pub hover: StrokeSpec,
    /// Half-length of censor ticks in pixels
    pub censor_half_length: f64,
}

impl Default for CurveStyle {
    fn default() -> Self {
        CurveStyle {
            // transparent wide outline acts as the hover target
            normal: StrokeSpec {
                outline_width: 8.0,
                outline_opacity: 0.0,
                line_width: 1.5,
                line_opacity: 1.0,
            },
            hover: StrokeSpec {
                outline_width: 8.0,
                outline_opacity: 0.3,
                line_width: 3.0,
                line_opacity: 1.0,
            },
            censor_half_length: crate::km::censor::CENSOR_HALF_LENGTH,
        }
    }
}

impl CurveStyle {
    /// Resolve the stroke pair for a group color and highlight state.
    pub fn pair(&self, color: &Color, is_active: bool) -> StylePair {
        let spec = if is_active { &self.hover } else { &self.normal };
        let base = LineStyle::new()
            .color(color.clone())
            .cap(LineCap::Butt)
            .join(LineJoin::Miter);
        StylePair {
            outline: base
                .clone()
                .width(spec.outline_width)
                .opacity(spec.outline_opacity),
            line: base.width(spec.line_width).opacity(spec.line_opacity),
        }
    }
}

/// Resolved outline and highlight strokes.
#[derive(Debug, Clone, PartialEq)]
pub struct StylePair {
    pub outline: LineStyle,
    pub line: LineStyle,
}

/// Which copy of the geometry a layer paints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerRole {
    Outline,
    Highlight,
}

/// Geometry painted by a layer.
#[derive(Debug, Clone, Copy)]
pub enum Geometry<'a> {
    Path(&'a StepPath),
    Censors(&'a [CensorMark]),
}

/// One paint layer of a group.
#[derive(Debug, Clone, Copy)]
pub struct Layer<'a> {
    pub role: LayerRole,
    pub style: &'a LineStyle,
    pub geometry: Geometry<'a>,
}

/// Everything needed to paint one group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupLayers {
    pub label: String,
    pub color: Color,
    pub is_active: bool,
    pub path: StepPath,
    pub censors: Vec<CensorMark>,
    pub styles: StylePair,
    pub censor_half_length: f64,
}

impl GroupLayers {
    /// The four layers in paint order: outline path, highlight path,
    /// outline censors, highlight censors.
    pub fn layers(&self) -> [Layer<'_>; 4] {
        [
            Layer {
                role: LayerRole::Outline,
                style: &self.styles.outline,
                geometry: Geometry::Path(&self.path),
            },
            Layer {
                role: LayerRole::Highlight,
                style: &self.styles.line,
                geometry: Geometry::Path(&self.path),
            },
            Layer {
                role: LayerRole::Outline,
                style: &self.styles.outline,
                geometry: Geometry::Censors(&self.censors),
            },
            Layer {
                role: LayerRole::Highlight,
                style: &self.styles.line,
                geometry: Geometry::Censors(&self.censors),
            },
        ]
    }
}

/// Build a group's layers from scratch.
pub fn render_group(
    group: &Group,
    x: &LinearScale,
    y: &LinearScale,
    is_active: bool,
    style: &CurveStyle,
) -> GroupLayers {
    GroupLayers {
        label: group.label.clone(),
        color: group.color.clone(),
        is_active,
        path: step_path(&group.curve, x, y),
        censors: censor_marks(&group.curve, x, y),
        styles: style.pair(&group.color, is_active),
        censor_half_length: style.censor_half_length,
    }
}

/// Inputs that determine a group's output. Scales compare by their
/// parameters, curves by identity.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupKey {
    pub color: Color,
    pub label: String,
    pub curve: Curve,
    pub is_active: bool,
    pub x: LinearScale,
    pub y: LinearScale,
}

impl GroupKey {
    pub fn new(group: &Group, is_active: bool, x: &LinearScale, y: &LinearScale) -> Self {
        GroupKey {
            color: group.color.clone(),
            label: group.label.clone(),
            curve: group.curve.clone(),
            is_active,
            x: *x,
            y: *y,
        }
    }
}

/// Memoized group layers, one slot per group index.
#[derive(Debug, Default)]
pub struct CurveGroupCache {
    slots: Vec<Option<(GroupKey, Rc<GroupLayers>)>>,
    style: CurveStyle,
    hits: usize,
    misses: usize,
}

impl CurveGroupCache {
    pub fn new(style: CurveStyle) -> Self {
        CurveGroupCache {
            style,
            ..Default::default()
        }
    }

    /// Layers for every group, reusing a slot when its key is unchanged.
    pub fn render(
        &mut self,
        groups: &[Group],
        active: &ActiveLabel,
        x: &LinearScale,
        y: &LinearScale,
    ) -> Vec<Rc<GroupLayers>> {
        self.slots.resize(groups.len(), None);
        let mut out = Vec::with_capacity(groups.len());
        for (slot, group) in self.slots.iter_mut().zip(groups) {
            let is_active = active.is_active(&group.label);
            let key = GroupKey::new(group, is_active, x, y);
            let hit = match slot {
                Some((cached, layers)) if *cached == key => Some(Rc::clone(layers)),
                _ => None,
            };
            let layers = match hit {
                Some(layers) => {
                    self.hits += 1;
                    layers
                }
                None => {
                    self.misses += 1;
                    let layers = Rc::new(render_group(group, x, y, is_active, &self.style));
                    *slot = Some((key, Rc::clone(&layers)));
                    layers
                }
            };
            out.push(layers);
        }
        debug!(
            "curve groups: {} rendered, cache hits {} misses {}",
            groups.len(),
            self.hits,
            self.misses
        );
        out
    }

    /// `(hits, misses)` since construction.
    pub fn stats(&self) -> (usize, usize) {
        (self.hits, self.misses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::km::model::Sample;

    fn groups() -> Vec<Group> {
        let a = vec![
            Sample { t: 0.0, s: 1.0, n: 10, e: true },
            Sample { t: 2.0, s: 0.9, n: 9, e: false },
            Sample { t: 5.0, s: 0.6, n: 6, e: true },
        ];
        let b = vec![
            Sample { t: 0.0, s: 1.0, n: 8, e: true },
            Sample { t: 4.0, s: 0.5, n: 4, e: true },
        ];
        vec![Group::new("#ff0000", "high", a), Group::new("#0000ff", "low", b)]
    }

    fn scales(width: f64) -> (LinearScale, LinearScale) {
        (LinearScale::time((0.0, 5.0), width), LinearScale::survival(100.0))
    }

    #[test]
    fn test_layers_share_geometry() {
        let (x, y) = scales(100.0);
        let layers = render_group(&groups()[0], &x, &y, false, &CurveStyle::default());
        let [outline_path, line_path, outline_censors, line_censors] = layers.layers();

        assert_eq!(outline_path.role, LayerRole::Outline);
        assert_eq!(line_path.role, LayerRole::Highlight);
        assert!(matches!(outline_path.geometry, Geometry::Path(p) if *p == layers.path));
        assert!(matches!(line_path.geometry, Geometry::Path(p) if *p == layers.path));
        assert!(matches!(outline_censors.geometry, Geometry::Censors(c) if c.len() == 1));
        assert!(matches!(line_censors.geometry, Geometry::Censors(c) if c.len() == 1));
        assert!(outline_path.style.width > line_path.style.width);
    }

    #[test]
    fn test_active_switches_style_pair() {
        let style = CurveStyle::default();
        let color = Color::from("#ff0000");
        let normal = style.pair(&color, false);
        let hover = style.pair(&color, true);
        assert_ne!(normal, hover);
        assert_eq!(hover.line.width, style.hover.line_width);
        assert_eq!(normal.outline.opacity, 0.0);
    }

    #[test]
    fn test_cache_reuses_unchanged_groups() {
        let groups = groups();
        let (x, y) = scales(100.0);
        let mut cache = CurveGroupCache::new(CurveStyle::default());
        let mut active = ActiveLabel::default();

        let first = cache.render(&groups, &active, &x, &y);
        assert_eq!(cache.stats(), (0, 2));

        let second = cache.render(&groups, &active, &x, &y);
        assert_eq!(cache.stats(), (2, 2));
        assert!(Rc::ptr_eq(&first[0], &second[0]));

        // only the group whose highlight flips is recomputed
        active.set("low");
        let third = cache.render(&groups, &active, &x, &y);
        assert_eq!(cache.stats(), (3, 3));
        assert!(Rc::ptr_eq(&first[0], &third[0]));
        assert!(third[1].is_active);
        assert!(!third[0].is_active);
    }

    #[test]
    fn test_scale_change_invalidates_cache() {
        let groups = groups();
        let active = ActiveLabel::default();
        let mut cache = CurveGroupCache::new(CurveStyle::default());
        let (x, y) = scales(100.0);
        let before = cache.render(&groups, &active, &x, &y);
        let (wide, y) = scales(200.0);
        let after = cache.render(&groups, &active, &wide, &y);
        assert_eq!(cache.stats(), (0, 4));
        assert_ne!(before[0].path, after[0].path);
    }

    #[test]
    fn test_fewer_groups_shrinks_cache() {
        let mut groups = groups();
        let (x, y) = scales(100.0);
        let active = ActiveLabel::default();
        let mut cache = CurveGroupCache::new(CurveStyle::default());
        cache.render(&groups, &active, &x, &y);
        groups.pop();
        let out = cache.render(&groups, &active, &x, &y);
        assert_eq!(out.len(), 1);
        assert_eq!(cache.stats(), (1, 2));
    }
}
