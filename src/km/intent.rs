//! Outbound requests to the host: re-aggregation, closing, export.

use std::fmt;
use std::str::FromStr;

use serde::ser::{SerializeSeq, Serializer};
use serde::Serialize;

use crate::km::model::GroupSet;
use crate::plotting::{PlotError, PlotResult};

pub const CUTOFF_EVENT: &str = "km-cutoff";
pub const SPLITS_EVENT: &str = "km-splits";
pub const CLOSE_EVENT: &str = "km-close";

/// Number of groups subjects are split into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitCount {
    #[default]
    Two,
    Three,
}

impl SplitCount {
    pub const ALL: [SplitCount; 2] = [SplitCount::Two, SplitCount::Three];

    pub fn get(self) -> u8 {
        match self {
            SplitCount::Two => 2,
            SplitCount::Three => 3,
        }
    }
}

impl TryFrom<u8> for SplitCount {
    type Error = PlotError;

    fn try_from(n: u8) -> PlotResult<Self> {
        match n {
            2 => Ok(SplitCount::Two),
            3 => Ok(SplitCount::Three),
            other => Err(PlotError::InvalidConfig(format!(
                "split count must be 2 or 3, got {}",
                other
            ))),
        }
    }
}

impl FromStr for SplitCount {
    type Err = PlotError;

    /// Parse a selector value such as `"3"`.
    fn from_str(s: &str) -> PlotResult<Self> {
        let n: u8 = s.trim().parse().map_err(|_| {
            PlotError::InvalidConfig(format!("split count must be 2 or 3, got {:?}", s))
        })?;
        SplitCount::try_from(n)
    }
}

impl fmt::Display for SplitCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// A request emitted to the host callback.
///
/// Serializes to the host's message shape: `["km-cutoff", 12.5]`,
/// `["km-splits", 3]`, `["km-close"]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    /// Re-aggregate groups at a new cutoff
    Cutoff(f64),
    /// Re-aggregate into a different number of groups
    Splits(SplitCount),
    Close,
}

impl Intent {
    pub fn event(&self) -> &'static str {
        match self {
            Intent::Cutoff(_) => CUTOFF_EVENT,
            Intent::Splits(_) => SPLITS_EVENT,
            Intent::Close => CLOSE_EVENT,
        }
    }

    pub fn to_json(&self) -> PlotResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Serialize for Intent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if matches!(self, Intent::Close) { 1 } else { 2 };
        let mut seq = serializer.serialize_seq(Some(len))?;
        seq.serialize_element(self.event())?;
        match self {
            Intent::Cutoff(v) => seq.serialize_element(v)?,
            Intent::Splits(n) => seq.serialize_element(&n.get())?,
            Intent::Close => {}
        }
        seq.end()
    }
}

/// Parameters handed to the cutoff number input.
///
/// Bounds come straight from the group set's domain; range checking is the
/// input widget's job.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CutoffInput {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub initial: Option<f64>,
    /// Value restored when the input is reset; the domain maximum
    pub default: Option<f64>,
}

impl CutoffInput {
    pub fn new(domain: Option<(f64, f64)>, initial: Option<f64>) -> Self {
        CutoffInput {
            min: domain.map(|d| d.0),
            max: domain.map(|d| d.1),
            initial,
            default: domain.map(|d| d.1),
        }
    }
}

/// Receiver of PDF export requests. The group set is forwarded unchanged.
pub trait PdfExport {
    fn export(&mut self, groups: &GroupSet) -> PlotResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_payloads() {
        assert_eq!(Intent::Cutoff(2.5).to_json().unwrap(), r#"["km-cutoff",2.5]"#);
        assert_eq!(
            Intent::Splits(SplitCount::Three).to_json().unwrap(),
            r#"["km-splits",3]"#
        );
        assert_eq!(Intent::Close.to_json().unwrap(), r#"["km-close"]"#);
    }

    #[test]
    fn test_split_count_parsing() {
        assert_eq!("2".parse::<SplitCount>().unwrap(), SplitCount::Two);
        assert_eq!(" 3 ".parse::<SplitCount>().unwrap(), SplitCount::Three);
        assert!("4".parse::<SplitCount>().is_err());
        assert!("two".parse::<SplitCount>().is_err());
        assert!(SplitCount::try_from(1).is_err());
        assert_eq!(SplitCount::default().get(), 2);
    }

    #[test]
    fn test_cutoff_input_passes_domain_through() {
        let input = CutoffInput::new(Some((-1.5, 8.0)), Some(3.0));
        assert_eq!(input.min, Some(-1.5));
        assert_eq!(input.max, Some(8.0));
        assert_eq!(input.default, Some(8.0));
        assert_eq!(input.initial, Some(3.0));
        assert_eq!(CutoffInput::new(None, None), CutoffInput::default());
    }
}
