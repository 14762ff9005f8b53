//! Survival data model: samples, curves and the per-render group set.
//!
//! Upstream aggregation delivers groups as parallel `colors`/`labels`/`curves`
//! arrays ([`RawGroupSet`]). They are zipped exactly once, in
//! [`GroupSet::from_raw`], into a list of [`Group`] records so nothing
//! downstream indexes three arrays in lockstep.

use std::sync::Arc;

use log::warn;
use schemars::JsonSchema;
use serde::de::{Deserializer, Error as _};
use serde::{Deserialize, Serialize};

use crate::plotting::{Color, PlotError, PlotResult};

/// One point of a Kaplan-Meier curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Sample {
    /// Time
    pub t: f64,
    /// Survival probability in [0, 1]
    pub s: f64,
    /// Number at risk. Whole-valued floats such as `10.0` are accepted.
    #[serde(deserialize_with = "deserialize_count")]
    #[schemars(with = "f64")]
    pub n: u32,
    /// `true` for an event (death), `false` for a censored subject
    pub e: bool,
}

impl Sample {
    pub fn is_censor(&self) -> bool {
        !self.e
    }
}

/// Read a count written either as an integer or as a whole-valued float.
fn deserialize_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = f64::deserialize(deserializer)?;
    if value.is_finite() && value.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&value) {
        Ok(value as u32)
    } else {
        Err(D::Error::custom(format!(
            "number at risk must be a non-negative whole number, got {}",
            value
        )))
    }
}

/// An immutable, cheaply cloned sequence of samples ordered by time.
#[derive(Debug, Clone)]
pub struct Curve(Arc<[Sample]>);

impl Curve {
    pub fn new(samples: Vec<Sample>) -> Self {
        Curve(samples.into())
    }

    pub fn empty() -> Self {
        Curve::new(Vec::new())
    }

    pub fn samples(&self) -> &[Sample] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// At-risk count at the first time point.
    pub fn initial_at_risk(&self) -> Option<u32> {
        self.0.first().map(|p| p.n)
    }

    /// Identity check used by memoization: same allocation, or equal samples.
    pub fn same(&self, other: &Curve) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }

    /// `(min t, max t)`, or `None` for an empty curve.
    pub fn time_bounds(&self) -> Option<(f64, f64)> {
        bounds(self.0.iter().map(|p| p.t))
    }
}

impl PartialEq for Curve {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl From<Vec<Sample>> for Curve {
    fn from(samples: Vec<Sample>) -> Self {
        Curve::new(samples)
    }
}

/// One logical group: a colored, labelled survival curve.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub color: Color,
    /// Unique within a group set; joins curve output to legend output
    pub label: String,
    pub curve: Curve,
}

impl Group {
    pub fn new(color: impl Into<Color>, label: impl Into<String>, curve: impl Into<Curve>) -> Self {
        Group {
            color: color.into(),
            label: label.into(),
            curve: curve.into(),
        }
    }
}

/// Group set as delivered by the upstream aggregator.
///
/// Every field is optional; a set with no field present is a partial load
/// and renders as the loading state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RawGroupSet {
    /// CSS color per group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    /// Label per group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    /// Survival curve per group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curves: Option<Vec<Vec<Sample>>>,
    /// `[min, max]` of the feature the cutoff applies to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<[f64; 2]>,
    /// Shown next to the feature label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    /// Whether the 2/3 split selector applies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub may_split: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p_value: Option<f64>,
    /// Log-rank test statistic
    #[serde(default, alias = "KM_stats", skip_serializing_if = "Option::is_none")]
    pub log_rank: Option<f64>,
    /// Explanation attached to the p-value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_warning: Option<String>,
}

impl RawGroupSet {
    /// True when nothing has been delivered yet.
    pub fn is_empty(&self) -> bool {
        *self == RawGroupSet::default()
    }

    pub fn from_json(json: &str) -> PlotResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// The zipped, validated group set for one render pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupSet {
    pub groups: Vec<Group>,
    pub domain: Option<(f64, f64)>,
    pub warning: Option<String>,
    pub may_split: bool,
    pub p_value: Option<f64>,
    pub log_rank: Option<f64>,
    pub patient_warning: Option<String>,
}

impl GroupSet {
    /// Zip parallel arrays into groups. Missing arrays count as empty; arrays
    /// of different lengths are rejected.
    pub fn from_raw(raw: RawGroupSet) -> PlotResult<Self> {
        let colors = raw.colors.unwrap_or_default();
        let labels = raw.labels.unwrap_or_default();
        let curves = raw.curves.unwrap_or_default();

        if colors.len() != labels.len() || labels.len() != curves.len() {
            warn!(
                "group set arrays disagree: {} colors, {} labels, {} curves",
                colors.len(),
                labels.len(),
                curves.len()
            );
            return Err(PlotError::InvalidData(format!(
                "expected parallel arrays, got {} colors, {} labels, {} curves",
                colors.len(),
                labels.len(),
                curves.len()
            )));
        }

        let groups = colors
            .into_iter()
            .zip(labels)
            .zip(curves)
            .map(|((color, label), curve)| Group::new(color, label, curve))
            .collect();

        Ok(GroupSet {
            groups,
            domain: raw.domain.map(|[lo, hi]| (lo, hi)),
            warning: raw.warning,
            may_split: raw.may_split.unwrap_or(false),
            p_value: raw.p_value,
            log_rank: raw.log_rank,
            patient_warning: raw.patient_warning,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Time bounds across every sample of every curve.
    pub fn time_bounds(&self) -> Option<(f64, f64)> {
        bounds(
            self.groups
                .iter()
                .flat_map(|g| g.curve.samples().iter().map(|p| p.t)),
        )
    }

    pub fn find(&self, label: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.label == label)
    }
}

fn bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample(t: f64, s: f64, n: u32, e: bool) -> Sample {
        Sample { t, s, n, e }
    }

    #[test]
    fn test_zip_parallel_arrays() {
        let raw: RawGroupSet = serde_json::from_value(json!({
            "colors": ["#ff0000", "#0000ff"],
            "labels": ["high", "low"],
            "curves": [
                [{"t": 0.0, "s": 1.0, "n": 10, "e": true}],
                []
            ],
            "domain": [0.5, 9.5],
            "maySplit": true,
            "pValue": 0.0123,
            "KM_stats": 6.25
        }))
        .unwrap();

        let set = GroupSet::from_raw(raw).unwrap();
        assert_eq!(set.groups.len(), 2);
        assert_eq!(set.groups[0].label, "high");
        assert_eq!(set.groups[0].color, Color::Rgb(255, 0, 0));
        assert_eq!(set.groups[0].curve.initial_at_risk(), Some(10));
        assert!(set.groups[1].curve.is_empty());
        assert_eq!(set.domain, Some((0.5, 9.5)));
        assert!(set.may_split);
        assert_eq!(set.log_rank, Some(6.25));
        assert_eq!(set.find("low").map(|g| g.curve.len()), Some(0));
    }

    #[test]
    fn test_at_risk_count_accepts_whole_floats() {
        let raw = RawGroupSet::from_json(
            r#"{"colors": ["red"], "labels": ["a"],
                "curves": [[{"t": 0, "s": 1, "n": 10.0, "e": true},
                            {"t": 2.5, "s": 0.5, "n": 4, "e": false}]]}"#,
        )
        .unwrap();
        let set = GroupSet::from_raw(raw).unwrap();
        assert_eq!(set.groups[0].curve.initial_at_risk(), Some(10));
        assert_eq!(set.groups[0].curve.samples()[1].n, 4);

        for bad in ["10.5", "-1", "1e12"] {
            let json = format!(r#"{{"curves": [[{{"t": 0, "s": 1, "n": {}, "e": true}}]]}}"#, bad);
            assert!(matches!(RawGroupSet::from_json(&json), Err(PlotError::Json(_))), "{}", bad);
        }
    }

    #[test]
    fn test_mismatched_arrays_are_rejected() {
        let raw = RawGroupSet {
            colors: Some(vec!["red".into(), "blue".into()]),
            labels: Some(vec!["a".into()]),
            curves: Some(vec![vec![], vec![]]),
            ..Default::default()
        };
        assert!(matches!(GroupSet::from_raw(raw), Err(PlotError::InvalidData(_))));
    }

    #[test]
    fn test_empty_raw_set() {
        assert!(RawGroupSet::from_json("{}").unwrap().is_empty());
        let partial = RawGroupSet::from_json(r#"{"colors": []}"#).unwrap();
        assert!(!partial.is_empty());
        assert!(GroupSet::from_raw(partial).unwrap().is_empty());
    }

    #[test]
    fn test_time_bounds_span_all_curves() {
        let set = GroupSet {
            groups: vec![
                Group::new("red", "a", vec![sample(2.0, 1.0, 5, true), sample(8.0, 0.5, 3, false)]),
                Group::new("blue", "b", vec![sample(1.0, 1.0, 4, true), sample(4.0, 0.7, 2, true)]),
                Group::new("green", "c", Curve::empty()),
            ],
            ..Default::default()
        };
        assert_eq!(set.time_bounds(), Some((1.0, 8.0)));
        assert_eq!(GroupSet::default().time_bounds(), None);
    }

    #[test]
    fn test_curve_identity() {
        let a = Curve::new(vec![sample(0.0, 1.0, 3, true)]);
        let shared = a.clone();
        let rebuilt = Curve::new(vec![sample(0.0, 1.0, 3, true)]);
        let other = Curve::new(vec![sample(0.0, 0.9, 3, true)]);
        assert!(a.same(&shared));
        assert!(a.same(&rebuilt));
        assert!(!a.same(&other));
    }
}
