// ringstat: Descriptive Statistics and Figures for Chord Overlay Simulation Logs
// Copyright (C) 2024-2025 Roland Schmid <roschmi@ethz.ch> and Tibor Schneider <sctibor@ethz.ch>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//! Builders for the individual figures. They only arrange already prepared data into plots and
//! never touch the file system.
use itertools::Itertools;
use plotly::{
    common::{ErrorData, ErrorType, Line, Marker, Mode},
    BoxPlot, Histogram, Plot, Scatter,
};

use super::Style;
use crate::{aggregator::SummaryTable, experiment::Metric, topology::TopologySummary};

/// A named line of `(bucket, density)` points.
#[derive(Clone, Debug, PartialEq)]
pub struct Curve {
    pub name: String,
    pub points: Vec<(u64, f64)>,
}

/// Mean of the metric per node count, with error bars from the 1st to the 99th percentile.
pub fn error_bars(style: &Style, table: &SummaryTable) -> Plot {
    let nodes = table.nodes();
    let (lower, upper): (Vec<f64>, Vec<f64>) = table
        .error_bars()
        .into_iter()
        .map(|bar| (bar.lower, bar.upper))
        .unzip();

    let mut plot = Plot::new();
    plot.set_layout(
        style
            .layout(table.metric.label())
            .x_axis(style.nodes_axis(&nodes))
            .y_axis(style.value_axis(table.metric.label())),
    );
    plot.add_trace(
        Scatter::new(nodes, table.means())
            .name(format!("{} (mean, 1% - 99%)", table.metric))
            .mode(Mode::LinesMarkers)
            .line(
                Line::new()
                    .color(style.color(0))
                    .width(style.line_width)
                    .dash(plotly::common::DashType::DashDot),
            )
            .error_y(
                ErrorData::new(ErrorType::Data)
                    .symmetric(false)
                    .array(upper)
                    .array_minus(lower)
                    .width(style.cap_width)
                    .thickness(style.line_width),
            ),
    );
    plot
}

/// Histogram of the decoded samples of a single experiment.
pub fn distribution(style: &Style, metric: Metric, nodes: u64, samples: Vec<u64>) -> Plot {
    let mut plot = Plot::new();
    plot.set_layout(
        style
            .layout(format!("{} ({nodes} nodes)", metric.label()))
            .x_axis(style.value_axis(metric.label()))
            .y_axis(style.value_axis("Count")),
    );
    plot.add_trace(
        Histogram::new(samples)
            .name(metric.to_string())
            .marker(Marker::new().color(style.color(0))),
    );
    plot
}

/// Density curves, one trace per curve, in the order given.
pub fn densities(
    style: &Style,
    title: impl AsRef<str>,
    x_label: impl AsRef<str>,
    curves: Vec<Curve>,
) -> Plot {
    let mut plot = Plot::new();
    plot.set_layout(
        style
            .layout(title)
            .x_axis(style.value_axis(x_label))
            .y_axis(style.value_axis("Probability")),
    );
    for (i, curve) in curves.into_iter().enumerate() {
        let (x, y): (Vec<u64>, Vec<f64>) = curve.points.into_iter().unzip();
        plot.add_trace(
            Scatter::new(x, y)
                .name(curve.name)
                .mode(Mode::Lines)
                .line(Line::new().color(style.color(i)).width(style.line_width)),
        );
    }
    plot
}

/// Mean path length next to the radius and the diameter of the topology, per node count.
/// `topology` must contain one summary per row of `path_lengths`, in the same order.
pub fn radius_diameter(
    style: &Style,
    path_lengths: &SummaryTable,
    topology: &[TopologySummary],
) -> Plot {
    let mut plot = error_bars(style, path_lengths);
    let nodes = topology.iter().map(|t| t.nodes).collect_vec();
    plot.set_layout(
        style
            .layout("Path length, radius and diameter")
            .x_axis(style.nodes_axis(&nodes))
            .y_axis(style.value_axis("Hops")),
    );
    for (i, (name, values)) in [
        ("radius", topology.iter().map(|t| t.radius).collect_vec()),
        ("diameter", topology.iter().map(|t| t.diameter).collect_vec()),
    ]
    .into_iter()
    .enumerate()
    {
        plot.add_trace(
            Scatter::new(nodes.clone(), values)
                .name(name)
                .mode(Mode::LinesMarkers)
                .line(Line::new().color(style.color(i + 1)).width(style.line_width)),
        );
    }
    plot
}

/// Clustering coefficient per node count.
pub fn clustering_coefficient(style: &Style, topology: &[TopologySummary]) -> Plot {
    let nodes = topology.iter().map(|t| t.nodes).collect_vec();
    let mut plot = Plot::new();
    plot.set_layout(
        style
            .layout("Clustering coefficient")
            .x_axis(style.nodes_axis(&nodes))
            .y_axis(style.value_axis("Clustering coefficient")),
    );
    plot.add_trace(
        Scatter::new(nodes, topology.iter().map(|t| t.cc).collect_vec())
            .name("cc")
            .mode(Mode::LinesMarkers)
            .line(Line::new().color(style.color(0)).width(style.line_width)),
    );
    plot
}

/// One box per named group of samples. Groups sharing a `legend` entry get the same color.
pub fn boxes(
    style: &Style,
    title: impl AsRef<str>,
    y_label: impl AsRef<str>,
    groups: Vec<(String, String, Vec<f64>)>,
) -> Plot {
    let mut plot = Plot::new();
    plot.set_layout(
        style
            .layout(title)
            .y_axis(style.value_axis(y_label)),
    );
    let legends = groups.iter().map(|(legend, _, _)| legend.clone()).unique().collect_vec();
    for (legend, name, samples) in groups {
        let color = legends.iter().position(|l| *l == legend).unwrap_or_default();
        plot.add_trace(
            BoxPlot::<f64, f64>::new(samples)
                .name(name)
                .legend_group(legend)
                .marker(Marker::new().color(style.color(color))),
        );
    }
    plot
}
