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
//! Module rendering the report figures and summary tables of a simulation log.
//!
//! Every figure prepares its own data from the loaded log, so a figure whose inputs are
//! malformed or missing fails on its own without affecting the others.
use std::{
    fs,
    path::{Path, PathBuf},
};

use itertools::Itertools;
use plotly::Plot;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::{
    aggregator::{self, Aggregator, SummaryTable},
    experiment::{Experiment, ExperimentLog, LoadError, Metric},
    topology::{SampleDir, SampleKind, TopologyError, TopologyTable},
    util::PathBufExt,
};

pub mod figures;
pub mod style;

pub use figures::Curve;
pub use style::Style;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Json Error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Load(#[from] LoadError),
    #[error("{0}")]
    Aggregate(#[from] aggregator::Error),
    #[error("{0}")]
    Topology(#[from] TopologyError),
    #[error("The log contains no experiments")]
    NoExperiments,
    #[error("The log contains no experiment with {0} nodes")]
    UnknownFocus(u64),
}

/// Figures of a report. The name of each figure is also the stem of its output file.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Deserialize,
    Serialize,
    strum::Display,
    strum::EnumIter,
    strum_macros::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Figure {
    /// Keys per node over the node count.
    Gaps,
    /// Histogram of the keys per node of the focus experiment.
    GapsDistribution,
    /// Density of the keys per node of the focus experiment.
    GapsPdf,
    /// Queries answered per node over the node count.
    EndNodes,
    EndNodesDistribution,
    EndNodesPdf,
    /// Densities of the answered queries and of the keys per node in a single figure.
    EndNodesVsGapsPdf,
    /// Path length over the node count.
    PathLengths,
    PathLengthsDistribution,
    /// Density of the path lengths on a fixed range of hops.
    PathLengthsPdf,
    /// Lookups handled per node over the node count.
    Queries,
    QueriesDistribution,
    QueriesPdf,
    /// Path length next to the radius and diameter of the topology.
    RadiusDiameter,
    ClusteringCoefficient,
    /// Indegree samples per node count, single and multi edges.
    DegreeDistribution,
    /// Routed path lengths next to the shortest path lengths per node count.
    PathLengthsVsShortest,
}

/// What a figure shows, independent of its name.
enum FigureKind {
    ErrorBars(Metric),
    Distribution(Metric),
    Density(Metric),
    EndNodesVsGaps,
    RadiusDiameter,
    ClusteringCoefficient,
    DegreeDistribution,
    PathLengthsVsShortest,
}

impl Figure {
    fn kind(&self) -> FigureKind {
        match self {
            Self::Gaps => FigureKind::ErrorBars(Metric::Gaps),
            Self::GapsDistribution => FigureKind::Distribution(Metric::Gaps),
            Self::GapsPdf => FigureKind::Density(Metric::Gaps),
            Self::EndNodes => FigureKind::ErrorBars(Metric::EndNodes),
            Self::EndNodesDistribution => FigureKind::Distribution(Metric::EndNodes),
            Self::EndNodesPdf => FigureKind::Density(Metric::EndNodes),
            Self::EndNodesVsGapsPdf => FigureKind::EndNodesVsGaps,
            Self::PathLengths => FigureKind::ErrorBars(Metric::PathLengths),
            Self::PathLengthsDistribution => FigureKind::Distribution(Metric::PathLengths),
            Self::PathLengthsPdf => FigureKind::Density(Metric::PathLengths),
            Self::Queries => FigureKind::ErrorBars(Metric::Queries),
            Self::QueriesDistribution => FigureKind::Distribution(Metric::Queries),
            Self::QueriesPdf => FigureKind::Density(Metric::Queries),
            Self::RadiusDiameter => FigureKind::RadiusDiameter,
            Self::ClusteringCoefficient => FigureKind::ClusteringCoefficient,
            Self::DegreeDistribution => FigureKind::DegreeDistribution,
            Self::PathLengthsVsShortest => FigureKind::PathLengthsVsShortest,
        }
    }

    pub fn all() -> Vec<Figure> {
        Self::iter().collect()
    }
}

/// Inputs, outputs and parameters of a report run.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportConfig {
    /// JSON log written by the simulator.
    pub log_path: PathBuf,
    /// Tab-separated topology summary with the columns `nodes`, `radius`, `diameter` and `cc`.
    pub topology_path: PathBuf,
    /// Directory with the `{kind}_{nodes}.tsv` sample files.
    pub samples_dir: PathBuf,
    /// Directory receiving the figures and summary tables.
    pub output_dir: PathBuf,
    /// Node count of the experiment shown in the single-experiment figures. Defaults to the last
    /// experiment of the log.
    pub focus_nodes: Option<u64>,
    /// Number of hops (starting at zero) shown in the path length density.
    pub path_length_buckets: u64,
    pub aggregator: Aggregator,
    pub style: Style,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from("./data/logs/log.json"),
            topology_path: PathBuf::from("./data/topology.tsv"),
            samples_dir: PathBuf::from("./data/graphs/"),
            output_dir: PathBuf::from("./plots/"),
            focus_nodes: None,
            path_length_buckets: 14,
            aggregator: Aggregator::default(),
            style: Style::default(),
        }
    }
}

impl ReportConfig {
    /// Read a configuration from a JSON file. Missing fields take their default value.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        log::info!("Loading: {path:?}");
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }
}

/// A loaded simulation log together with the configuration to render it.
#[derive(Clone, Debug)]
pub struct Report {
    config: ReportConfig,
    log: ExperimentLog,
}

impl Report {
    /// Load the log named in `config`.
    pub fn load(config: ReportConfig) -> Result<Self, Error> {
        let log = ExperimentLog::load(&config.log_path)?;
        Self::new(config, log)
    }

    /// Create a report of an already loaded log and ensure the output directory exists.
    pub fn new(config: ReportConfig, log: ExperimentLog) -> Result<Self, Error> {
        if log.is_empty() {
            return Err(Error::NoExperiments);
        }
        fs::create_dir_all(&config.output_dir)?;
        Ok(Self { config, log })
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn log(&self) -> &ExperimentLog {
        &self.log
    }

    /// Experiment shown in the single-experiment figures.
    pub fn focus(&self) -> Result<&Experiment, Error> {
        match self.config.focus_nodes {
            Some(nodes) => self.log.find(nodes).ok_or(Error::UnknownFocus(nodes)),
            None => self.log.experiments.last().ok_or(Error::NoExperiments),
        }
    }

    /// Summary table of `metric` over all experiments.
    pub fn table(&self, metric: Metric) -> Result<SummaryTable, Error> {
        Ok(self
            .config
            .aggregator
            .aggregate(&self.log.experiments, metric)?)
    }

    /// Write one CSV summary table per metric. [`Metric::ShortestPathLengths`] is only written if
    /// every experiment carries it.
    pub fn write_summaries(&self) -> Result<Vec<PathBuf>, Error> {
        let mut written = Vec::new();
        for metric in Metric::iter() {
            if !Metric::REQUIRED.contains(&metric)
                && !self.log.experiments.iter().all(|exp| exp.has(metric))
            {
                log::debug!("Skipping summary of `{metric}`, not all experiments carry it");
                continue;
            }
            let path = self
                .config
                .output_dir
                .as_path()
                .then_file(format!("{}_summary", metric.slug()), "csv");
            self.table(metric)?.write_csv(&path)?;
            written.push(path);
        }
        Ok(written)
    }

    /// Render each figure, continuing with the next one if a figure fails.
    pub fn run(&self, figures: &[Figure]) -> Vec<(Figure, Result<PathBuf, Error>)> {
        figures
            .iter()
            .map(|figure| {
                let result = self.render(*figure);
                match &result {
                    Ok(path) => log::info!("Written {figure} to {path:?}"),
                    Err(e) => log::error!("Cannot render {figure}: {e}"),
                }
                (*figure, result)
            })
            .collect()
    }

    /// Render a single figure into `{output_dir}/{figure}.html`.
    pub fn render(&self, figure: Figure) -> Result<PathBuf, Error> {
        let plot = self.prepare(figure)?;
        let path = self
            .config
            .output_dir
            .as_path()
            .then_file(figure.to_string(), "html");
        log::debug!("Plotting {path:?}");
        fs::write(&path, plot.to_html())?;
        Ok(path)
    }

    /// Prepare the data of a figure and build the plot.
    pub fn prepare(&self, figure: Figure) -> Result<Plot, Error> {
        let style = &self.config.style;
        let aggregator = &self.config.aggregator;
        Ok(match figure.kind() {
            FigureKind::ErrorBars(metric) => figures::error_bars(style, &self.table(metric)?),
            FigureKind::Distribution(metric) => {
                let exp = self.focus()?;
                figures::distribution(style, metric, exp.nodes, aggregator.samples(exp, metric)?)
            }
            FigureKind::Density(metric) => {
                let exp = self.focus()?;
                let points = if metric == Metric::PathLengths {
                    aggregator.dense_density(exp, metric, 0..self.config.path_length_buckets)?
                } else {
                    aggregator.density(exp, metric)?
                };
                figures::densities(
                    style,
                    format!("{} ({} nodes)", metric.label(), exp.nodes),
                    metric.label(),
                    vec![Curve {
                        name: metric.to_string(),
                        points,
                    }],
                )
            }
            FigureKind::EndNodesVsGaps => {
                let exp = self.focus()?;
                let curves = [Metric::EndNodes, Metric::Gaps]
                    .into_iter()
                    .map(|metric| -> Result<Curve, Error> {
                        Ok(Curve {
                            name: metric.label().to_string(),
                            points: aggregator.density(exp, metric)?,
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                figures::densities(
                    style,
                    format!("Answered queries and keys per node ({} nodes)", exp.nodes),
                    "Count per node",
                    curves,
                )
            }
            FigureKind::RadiusDiameter => {
                let path_lengths = self.table(Metric::PathLengths)?;
                let topology =
                    TopologyTable::load(&self.config.topology_path)?.join(&path_lengths.nodes())?;
                figures::radius_diameter(style, &path_lengths, &topology)
            }
            FigureKind::ClusteringCoefficient => {
                let topology = TopologyTable::load(&self.config.topology_path)?
                    .join(&self.log.node_counts())?;
                figures::clustering_coefficient(style, &topology)
            }
            FigureKind::DegreeDistribution => {
                let samples = SampleDir::new(&self.config.samples_dir);
                let mut groups = Vec::new();
                for kind in [SampleKind::IndegreeSingle, SampleKind::IndegreeMulti] {
                    self.warn_unused_samples(&samples, kind)?;
                    for nodes in self.log.node_counts() {
                        groups.push((
                            kind.label().to_string(),
                            format!("{nodes} ({kind})"),
                            samples.load(kind, nodes)?,
                        ));
                    }
                }
                figures::boxes(style, "Indegree distribution", "Indegree", groups)
            }
            FigureKind::PathLengthsVsShortest => {
                let samples = SampleDir::new(&self.config.samples_dir);
                self.warn_unused_samples(&samples, SampleKind::SplMulti)?;
                let mut groups = Vec::new();
                for nodes in self.log.node_counts() {
                    let Some(exp) = self.log.find(nodes) else {
                        continue;
                    };
                    let routed = aggregator
                        .samples(exp, Metric::PathLengths)?
                        .into_iter()
                        .map(|x| x as f64)
                        .collect_vec();
                    groups.push((
                        Metric::PathLengths.label().to_string(),
                        format!("{nodes} (routed)"),
                        routed,
                    ));
                    groups.push((
                        SampleKind::SplMulti.label().to_string(),
                        format!("{nodes} (shortest)"),
                        samples.load(SampleKind::SplMulti, nodes)?,
                    ));
                }
                figures::boxes(style, "Routed and shortest path lengths", "Hops", groups)
            }
        })
    }

    fn warn_unused_samples(&self, samples: &SampleDir, kind: SampleKind) -> Result<(), Error> {
        let node_counts = self.log.node_counts();
        for nodes in samples.node_counts(kind)? {
            if !node_counts.contains(&nodes) {
                log::warn!("Ignoring {kind} samples for {nodes} nodes, not part of the log");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use super::*;

    fn log() -> ExperimentLog {
        ExperimentLog::from_json(
            r#"{"experiments": [
                {"nodes": 8, "iterations": 1, "gaps": {"1": 8}, "endNodes": {"1": 8},
                 "queries": {"2": 8}, "pathLengths": {"0": 1, "2": 7}},
                {"nodes": 4, "iterations": 1, "gaps": {"1": 4}, "endNodes": {"1": 4},
                 "queries": {"1": 4}, "pathLengths": {"1": 4}}
            ]}"#,
        )
        .unwrap()
    }

    fn config(dir: &Path) -> ReportConfig {
        ReportConfig {
            output_dir: dir.join("plots"),
            topology_path: dir.join("missing.tsv"),
            samples_dir: dir.to_path_buf(),
            aggregator: Aggregator::new(1),
            ..Default::default()
        }
    }

    #[test]
    fn figure_names() {
        assert_eq!(Figure::EndNodesVsGapsPdf.to_string(), "end_nodes_vs_gaps_pdf");
        assert_eq!(Figure::from_str("radius_diameter").unwrap(), Figure::RadiusDiameter);
        assert_eq!(Figure::all().len(), 17);
    }

    #[test]
    fn focus_experiment() {
        let dir = tempfile::tempdir().unwrap();
        let report = Report::new(config(dir.path()), log()).unwrap();
        assert_eq!(report.focus().unwrap().nodes, 4);

        let report = Report::new(
            ReportConfig {
                focus_nodes: Some(8),
                ..config(dir.path())
            },
            log(),
        )
        .unwrap();
        assert_eq!(report.focus().unwrap().nodes, 8);

        let report = Report::new(
            ReportConfig {
                focus_nodes: Some(16),
                ..config(dir.path())
            },
            log(),
        )
        .unwrap();
        assert!(matches!(report.focus(), Err(Error::UnknownFocus(16))));
    }

    #[test]
    fn reject_empty_log() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Report::new(config(dir.path()), ExperimentLog::default()),
            Err(Error::NoExperiments)
        ));
    }

    #[test]
    fn failing_figures_are_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let report = Report::new(config(dir.path()), log()).unwrap();
        let results = report.run(&[
            Figure::Gaps,
            Figure::RadiusDiameter,
            Figure::PathLengthsPdf,
        ]);
        assert!(results[0].1.is_ok());
        // the topology summary does not exist
        assert!(matches!(results[1].1, Err(Error::Topology(_))));
        assert!(results[2].1.is_ok());
        assert!(dir.path().join("plots/gaps.html").exists());
        assert!(!dir.path().join("plots/radius_diameter.html").exists());
        assert!(dir.path().join("plots/path_lengths_pdf.html").exists());
    }

    #[test]
    fn summaries() {
        let dir = tempfile::tempdir().unwrap();
        let report = Report::new(config(dir.path()), log()).unwrap();
        let written = report.write_summaries().unwrap();
        assert_eq!(written.len(), 4);
        assert!(dir.path().join("plots/end_nodes_summary.csv").exists());
        assert!(!dir
            .path()
            .join("plots/shortest_path_lengths_summary.csv")
            .exists());
    }

    #[test]
    fn partial_config() {
        let config: ReportConfig =
            serde_json::from_str(r#"{"focus_nodes": 4096, "aggregator": {"trial_multiplier": 1}}"#)
                .unwrap();
        assert_eq!(config.focus_nodes, Some(4096));
        assert_eq!(config.aggregator.trial_multiplier, 1);
        assert_eq!(config.path_length_buckets, 14);
        assert_eq!(config.style, Style::default());
    }
}
