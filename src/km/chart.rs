//! The chart engine: owns the highlight state and the curve cache, turns a
//! group set into a renderable [`Frame`] and forwards user actions to the
//! host as [`Intent`]s.

use std::fmt;
use std::rc::Rc;

use log::{debug, info, warn};

use crate::config::ChartConfig;
use crate::km::curve_group::{CurveGroupCache, GroupLayers};
use crate::km::format::format_stat;
use crate::km::intent::{CutoffInput, Intent, PdfExport, SplitCount};
use crate::km::interaction::{ActiveLabel, HoverEvent};
use crate::km::layout::{partition, GraphLayout, Regions};
use crate::km::legend::{legend_entries, LegendEntry};
use crate::km::model::{GroupSet, RawGroupSet};
use crate::plotting::{LinearScale, PlotError, PlotResult, Scale, Tick};

/// Message shown when the group set arrived but holds no groups.
pub const UNAVAILABLE_MESSAGE: &str = "KM plot can not be made";

/// Prefix of the dialog title.
pub const TITLE_PREFIX: &str = "Kaplan Meier";

/// Host-controlled chart parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartProps {
    /// Appended to [`TITLE_PREFIX`]
    pub title: String,
    /// Name of the feature the cutoff applies to
    pub feature_label: String,
    pub splits: SplitCount,
    /// Cutoff the current groups were aggregated at
    pub cutoff: Option<f64>,
}

/// What the host should display for the current input.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// Nothing delivered yet; holds the space the chart will take
    Loading { height: f64 },
    /// Delivered, but no groups
    Unavailable,
    Chart(ChartFrame),
}

impl Frame {
    pub fn kind(&self) -> &'static str {
        match self {
            Frame::Loading { .. } => "loading",
            Frame::Unavailable => "unavailable",
            Frame::Chart(_) => "chart",
        }
    }
}

/// A fully laid out chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartFrame {
    pub title: String,
    /// Feature label, with the group set's warning appended when present
    pub feature_label: String,
    pub regions: Regions,
    pub graph: GraphFrame,
    pub definitions: DefinitionsFrame,
    pub cutoff: CutoffInput,
}

/// Geometry of the graph region.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphFrame {
    pub layout: GraphLayout,
    pub x: LinearScale,
    pub y: LinearScale,
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
    /// One entry per group, in group order
    pub groups: Vec<Rc<GroupLayers>>,
}

/// Formatted summary statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsBlock {
    pub p_value: String,
    pub log_rank: String,
    /// Shown as a marker next to the p-value
    pub patient_warning: Option<String>,
}

impl StatsBlock {
    pub fn p_value_text(&self) -> String {
        format!("P-value = {}", self.p_value)
    }

    pub fn log_rank_text(&self) -> String {
        format!("Log-rank test statistics = {}", self.log_rank)
    }
}

/// The 2/3 group selector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitSelector {
    pub options: [SplitCount; 2],
    pub selected: SplitCount,
}

/// Contents of the definitions region.
#[derive(Debug, Clone, PartialEq)]
pub struct DefinitionsFrame {
    pub stats: StatsBlock,
    /// Present only when the group set may be split
    pub splits: Option<SplitSelector>,
    pub legend: Vec<LegendEntry>,
}

/// Receiver of outbound intents.
pub type IntentCallback = Box<dyn FnMut(Intent)>;

/// One chart instance.
pub struct KmChart {
    config: ChartConfig,
    props: ChartProps,
    active: ActiveLabel,
    cache: CurveGroupCache,
    /// Group set of the last render; `None` while loading
    current: Option<Rc<GroupSet>>,
    on_intent: IntentCallback,
}

impl fmt::Debug for KmChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KmChart")
            .field("config", &self.config)
            .field("props", &self.props)
            .field("active", &self.active)
            .field("cache", &self.cache)
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl KmChart {
    /// New chart with nothing highlighted.
    pub fn new(config: ChartConfig, props: ChartProps, on_intent: impl FnMut(Intent) + 'static) -> Self {
        KmChart {
            active: ActiveLabel::new(config.leave_policy),
            cache: CurveGroupCache::new(config.curve),
            config,
            props,
            current: None,
            on_intent: Box::new(on_intent),
        }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn props(&self) -> &ChartProps {
        &self.props
    }

    /// Replace the host parameters, typically after re-aggregation.
    pub fn set_props(&mut self, props: ChartProps) {
        self.props = props;
    }

    pub fn active(&self) -> &ActiveLabel {
        &self.active
    }

    /// `(hits, misses)` of the curve cache.
    pub fn cache_stats(&self) -> (usize, usize) {
        self.cache.stats()
    }

    /// Apply a hover event from a curve group or a legend entry. Returns true
    /// when the highlight changed and the chart should be re-rendered.
    pub fn hover(&mut self, event: HoverEvent) -> bool {
        self.active.apply(&event)
    }

    /// Build the frame for raw upstream input, zipping it first.
    pub fn render_raw(&mut self, raw: Option<&RawGroupSet>) -> PlotResult<Frame> {
        match raw {
            Some(raw) if !raw.is_empty() => {
                let set = GroupSet::from_raw(raw.clone())?;
                Ok(self.render(Some(&set)))
            }
            _ => Ok(self.render(None)),
        }
    }

    /// The group set shown by the last render.
    pub fn current(&self) -> Option<&GroupSet> {
        self.current.as_deref()
    }

    /// Build the frame for the current group set.
    pub fn render(&mut self, data: Option<&GroupSet>) -> Frame {
        match data {
            Some(set) if self.current.as_deref() != Some(set) => {
                self.current = Some(Rc::new(set.clone()));
            }
            Some(_) => {}
            None => self.current = None,
        }
        let frame = match data {
            None => Frame::Loading {
                height: self.config.dims.height,
            },
            Some(set) if set.is_empty() => Frame::Unavailable,
            Some(set) => Frame::Chart(self.chart_frame(set)),
        };
        debug!("km chart frame: {}", frame.kind());
        frame
    }

    fn chart_frame(&mut self, set: &GroupSet) -> ChartFrame {
        let regions = partition(self.config.dims, &self.config.ratios);
        let layout = GraphLayout::new(regions.graph, &self.config.graph_fill, self.config.margin);

        // all-empty curves leave no time bounds
        let time_domain = set.time_bounds().unwrap_or((0.0, 1.0));
        let x = LinearScale::time(time_domain, layout.plot.width);
        let y = LinearScale::survival(layout.plot.height);

        let groups = self.cache.render(&set.groups, &self.active, &x, &y);
        let legend = legend_entries(&set.groups, &self.active, &self.config.swatch);

        let graph = GraphFrame {
            layout,
            x_ticks: x.ticks(self.config.x_ticks),
            y_ticks: y.ticks(self.config.y_ticks),
            x,
            y,
            groups,
        };

        let definitions = DefinitionsFrame {
            stats: StatsBlock {
                p_value: format_stat(set.p_value),
                log_rank: format_stat(set.log_rank),
                patient_warning: set.patient_warning.clone(),
            },
            splits: set.may_split.then_some(SplitSelector {
                options: SplitCount::ALL,
                selected: self.props.splits,
            }),
            legend,
        };

        let feature_label = match &set.warning {
            Some(warning) => format!("{} ({})", self.props.feature_label, warning),
            None => self.props.feature_label.clone(),
        };

        ChartFrame {
            title: format!("{}{}", TITLE_PREFIX, self.props.title),
            feature_label,
            regions,
            graph,
            definitions,
            cutoff: CutoffInput::new(set.domain, self.props.cutoff),
        }
    }

    fn emit(&mut self, intent: Intent) {
        debug!("km chart intent: {:?}", intent);
        (self.on_intent)(intent);
    }

    /// Ask the host to re-aggregate at a new cutoff.
    pub fn set_cutoff(&mut self, value: f64) {
        self.emit(Intent::Cutoff(value));
    }

    /// Ask the host to re-aggregate into `splits` groups.
    pub fn set_splits(&mut self, splits: SplitCount) {
        self.emit(Intent::Splits(splits));
    }

    /// Handle a split selector change carrying the option's string value.
    pub fn select_splits(&mut self, value: &str) -> PlotResult<()> {
        let splits: SplitCount = value.parse()?;
        self.set_splits(splits);
        Ok(())
    }

    pub fn close(&mut self) {
        self.emit(Intent::Close);
    }

    /// Hand the group set of the last render to a PDF exporter unchanged.
    ///
    /// Fails with `InvalidData` while nothing has been rendered or the chart
    /// is still loading.
    pub fn export_pdf(&self, exporter: &mut dyn PdfExport) -> PlotResult<()> {
        let Some(groups) = self.current.as_deref() else {
            warn!("PDF export requested before a group set was rendered");
            return Err(PlotError::InvalidData(
                "no group set has been rendered yet".to_string(),
            ));
        };
        info!("exporting KM plot with {} groups to PDF", groups.groups.len());
        exporter.export(groups)
    }
}
