//! SVG output for chart frames.
//!
//! The graph region is drawn at the origin and the definitions region to its
//! right. Each curve group and legend entry carries a `data-label` attribute
//! so a host can route pointer events back to [`KmChart::hover`].
//!
//! [`KmChart::hover`]: crate::km::chart::KmChart::hover

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::config::ChartConfig;
use crate::km::chart::{ChartFrame, DefinitionsFrame, Frame, GraphFrame, UNAVAILABLE_MESSAGE};
use crate::km::curve_group::{Geometry, GroupLayers};
use crate::plotting::element::escape_xml;
use crate::plotting::style::{Color, DominantBaseline, TextAnchor, TextStyle};
use crate::plotting::{AxisConfig, AxisPosition, PlotResult, SvgBackend};

pub const SURVIVAL_AXIS_TITLE: &str = "Survival probability";
pub const LOADING_MESSAGE: &str = "Loading...";

/// Marker placed after the p-value when a patient warning is present.
const WARNING_MARKER: &str = "\u{26a0}";

const LINE_HEIGHT: f64 = 1.6;

/// Render a frame to an SVG document.
pub fn render_svg(frame: &Frame, config: &ChartConfig) -> String {
    match frame {
        Frame::Loading { height } => {
            message_svg(config.dims.width, *height, LOADING_MESSAGE, config.font_size)
        }
        Frame::Unavailable => message_svg(
            config.dims.width,
            config.dims.height,
            UNAVAILABLE_MESSAGE,
            config.font_size,
        ),
        Frame::Chart(chart) => chart_svg(chart, config),
    }
}

/// Render a frame and write it to `path`.
pub fn save_svg(frame: &Frame, config: &ChartConfig, path: impl AsRef<Path>) -> PlotResult<()> {
    let svg = render_svg(frame, config);
    let mut file = File::create(path)?;
    file.write_all(svg.as_bytes())?;
    Ok(())
}

fn message_svg(width: f64, height: f64, message: &str, font_size: f64) -> String {
    let mut backend = SvgBackend::new(width, height);
    let style = TextStyle::new()
        .font_size(font_size)
        .color(Color::DARK_GRAY)
        .anchor(TextAnchor::Middle)
        .baseline(DominantBaseline::Middle);
    backend.draw_text(width / 2.0, height / 2.0, message, &style);
    backend.render()
}

fn chart_svg(frame: &ChartFrame, config: &ChartConfig) -> String {
    let regions = &frame.regions;
    let width = regions.graph.width + regions.definitions.width;
    let height = regions.graph.height.max(regions.definitions.height);
    let mut backend = SvgBackend::new(width, height);
    backend.background(&Color::WHITE);

    backend.start_group("class=\"km-graph\"");
    draw_graph(&mut backend, &frame.graph, config);
    backend.end_group();

    backend.start_translated(regions.graph.width, 0.0, "class=\"km-definitions\"");
    draw_definitions(&mut backend, frame, config);
    backend.end_group();

    backend.render()
}

fn draw_graph(backend: &mut SvgBackend, graph: &GraphFrame, config: &ChartConfig) {
    let margin = &graph.layout.margin;
    let plot = &graph.layout.plot;
    backend.start_translated(margin.left, margin.top, "class=\"km-plot\"");

    AxisConfig::new(AxisPosition::Bottom)
        .num_ticks(config.x_ticks)
        .render(backend, &graph.x, plot.height);
    AxisConfig::new(AxisPosition::Left)
        .num_ticks(config.y_ticks)
        .title(SURVIVAL_AXIS_TITLE)
        .render(backend, &graph.y, plot.width);

    for group in &graph.groups {
        draw_group(backend, group);
    }
    backend.end_group();
}

fn draw_group(backend: &mut SvgBackend, group: &GroupLayers) {
    let class = if group.is_active {
        "km-group active"
    } else {
        "km-group"
    };
    backend.start_group(&format!(
        "class=\"{}\" data-label=\"{}\"",
        class,
        escape_xml(&group.label)
    ));
    let path_data = group.path.to_svg_data();
    for layer in group.layers() {
        match layer.geometry {
            Geometry::Path(_) => backend.draw_path(&path_data, layer.style),
            Geometry::Censors(marks) => {
                for mark in marks {
                    let ((x1, y1), (x2, y2)) = mark.tick(group.censor_half_length);
                    backend.draw_line(x1, y1, x2, y2, layer.style);
                }
            }
        }
    }
    backend.end_group();
}

fn draw_definitions(backend: &mut SvgBackend, frame: &ChartFrame, config: &ChartConfig) {
    let font_size = config.font_size;
    let line = font_size * LINE_HEIGHT;
    let text = TextStyle::new().font_size(font_size);
    let x = 10.0;
    let mut y = line;

    backend.draw_text(x, y, &frame.title, &text.clone().bold());
    y += line;
    if !frame.feature_label.is_empty() {
        backend.draw_text(x, y, &frame.feature_label, &text);
        y += line;
    }

    let defs: &DefinitionsFrame = &frame.definitions;
    let mut p_value = defs.stats.p_value_text();
    if defs.stats.patient_warning.is_some() {
        p_value = format!("{} {}", p_value, WARNING_MARKER);
    }
    backend.draw_text(x, y, &p_value, &text);
    y += line;
    if let Some(ref warning) = defs.stats.patient_warning {
        backend.draw_text(x, y, warning, &text.clone().italic().color(Color::WARNING));
        y += line;
    }
    backend.draw_text(x, y, &defs.stats.log_rank_text(), &text);
    y += line;

    if let Some(selector) = defs.splits {
        let options: Vec<String> = selector
            .options
            .iter()
            .map(|opt| {
                let mark = if *opt == selector.selected { "\u{25c9}" } else { "\u{25cb}" };
                format!("{} {}", mark, opt)
            })
            .collect();
        backend.draw_text(x, y, &format!("Groups: {}", options.join("  ")), &text);
        y += line;
    }

    y += line / 2.0;
    let swatch = &config.swatch;
    for entry in &defs.legend {
        let class = if entry.is_active {
            "km-legend-entry active"
        } else {
            "km-legend-entry"
        };
        backend.start_group(&format!(
            "class=\"{}\" data-label=\"{}\"",
            class,
            escape_xml(&entry.label)
        ));
        backend.draw_rect(x, y - swatch.height, swatch.width, swatch.height, &entry.swatch);
        backend.draw_text(x + swatch.width + 6.0, y, &entry.text(), &text);
        backend.end_group();
        y += line;
    }
}
