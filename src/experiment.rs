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
//! Module to load the experiment records written by the overlay simulator.
use std::{fs, io::BufReader, path::Path};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::histogram::Histogram;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Json Error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Experiment with {nodes} nodes has no `{metric}` histogram")]
    MissingHistogram { nodes: u64, metric: Metric },
}

/// Quantities measured per experiment, each stored as a [`Histogram`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Deserialize,
    Serialize,
    strum::Display,
    strum::EnumIter,
    strum_macros::EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Metric {
    /// Distance between a node and its predecessor on the ring, i.e., the keys it is responsible
    /// for.
    Gaps,
    /// Node that finally answered a query.
    EndNodes,
    /// Number of queries each node had to handle.
    Queries,
    /// Number of hops along the routing path of a lookup.
    PathLengths,
    /// Shortest path length between the lookup's source and end node. Only written by newer
    /// versions of the simulator.
    ShortestPathLengths,
}

impl Metric {
    /// Metrics that every experiment record must carry.
    pub const REQUIRED: [Metric; 4] = [
        Metric::Gaps,
        Metric::EndNodes,
        Metric::Queries,
        Metric::PathLengths,
    ];

    /// Name used for output files and figure titles.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Gaps => "gaps",
            Self::EndNodes => "end_nodes",
            Self::Queries => "queries",
            Self::PathLengths => "path_lengths",
            Self::ShortestPathLengths => "shortest_path_lengths",
        }
    }

    /// Human readable label of the measured quantity.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Gaps => "Keys per node",
            Self::EndNodes => "Queries answered per node",
            Self::Queries => "Lookups handled per node",
            Self::PathLengths => "Path length [hops]",
            Self::ShortestPathLengths => "Shortest path length [hops]",
        }
    }
}

/// A single simulation run of the overlay.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Experiment {
    /// Number of nodes in the ring.
    pub nodes: u64,
    /// Number of lookups sampled per node.
    pub iterations: u64,
    /// Bit length of the identifiers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bits: Option<u32>,
    #[serde(default)]
    pub gaps: Option<Histogram>,
    #[serde(default)]
    pub end_nodes: Option<Histogram>,
    #[serde(default)]
    pub queries: Option<Histogram>,
    #[serde(default)]
    pub path_lengths: Option<Histogram>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortest_path_lengths: Option<Histogram>,
}

impl Experiment {
    /// Get the histogram of `metric`, failing if the record does not carry it.
    pub fn histogram(&self, metric: Metric) -> Result<&Histogram, LoadError> {
        match metric {
            Metric::Gaps => self.gaps.as_ref(),
            Metric::EndNodes => self.end_nodes.as_ref(),
            Metric::Queries => self.queries.as_ref(),
            Metric::PathLengths => self.path_lengths.as_ref(),
            Metric::ShortestPathLengths => self.shortest_path_lengths.as_ref(),
        }
        .ok_or(LoadError::MissingHistogram {
            nodes: self.nodes,
            metric,
        })
    }

    /// Check whether the record carries a histogram for `metric`.
    pub fn has(&self, metric: Metric) -> bool {
        self.histogram(metric).is_ok()
    }
}

/// Content of a simulation log file.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ExperimentLog {
    pub experiments: Vec<Experiment>,
}

impl ExperimentLog {
    /// Read and parse the log file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        log::info!("Loading: {path:?}");
        let file = fs::File::open(path)?;
        let log: Self = serde_json::from_reader(BufReader::new(file))?;
        log.check();
        Ok(log)
    }

    /// Parse a log from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let log: Self = serde_json::from_str(json)?;
        log.check();
        Ok(log)
    }

    fn check(&self) {
        for exp in self.experiments.iter() {
            if !exp.nodes.is_power_of_two() {
                log::warn!("Experiment with {} nodes: ring size is not a power of two", exp.nodes);
            }
            for metric in Metric::REQUIRED {
                if !exp.has(metric) {
                    log::warn!("Experiment with {} nodes has no `{metric}` histogram", exp.nodes);
                }
            }
        }
        log::debug!(
            "Loaded {} experiments with node counts {:?}",
            self.experiments.len(),
            self.node_counts()
        );
    }

    /// Distinct node counts in ascending order.
    pub fn node_counts(&self) -> Vec<u64> {
        self.experiments
            .iter()
            .map(|exp| exp.nodes)
            .sorted()
            .dedup()
            .collect()
    }

    /// First experiment with the given node count.
    pub fn find(&self, nodes: u64) -> Option<&Experiment> {
        self.experiments.iter().find(|exp| exp.nodes == nodes)
    }

    pub fn is_empty(&self) -> bool {
        self.experiments.is_empty()
    }
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use super::*;

    const LOG: &str = r#"{
        "experiments": [
            {
                "nodes": 8,
                "iterations": 2,
                "gaps": {"0": 2, "1": 1, "3": 1},
                "endNodes": [0, 2, 0, 1],
                "queries": [[5, 1], [2, 3]],
                "pathLengths": {"1": 4}
            },
            {
                "bits": 16,
                "nodes": 4,
                "iterations": 1,
                "gaps": {},
                "endNodes": [],
                "queries": [],
                "pathLengths": {"2": 1},
                "shortestPathLengths": {"1": 1}
            }
        ]
    }"#;

    #[test]
    fn parse_log() {
        let log = ExperimentLog::from_json(LOG).unwrap();
        assert_eq!(log.experiments.len(), 2);
        assert_eq!(log.node_counts(), vec![4, 8]);

        let exp = log.find(8).unwrap();
        assert_eq!(exp.iterations, 2);
        assert_eq!(exp.bits, None);
        assert_eq!(
            exp.histogram(Metric::Gaps).unwrap().unfold().unwrap(),
            vec![0, 0, 1, 3]
        );
        assert_eq!(
            exp.histogram(Metric::EndNodes).unwrap().unfold().unwrap(),
            vec![1, 1, 3]
        );
        assert_eq!(
            exp.histogram(Metric::Queries).unwrap().unfold().unwrap(),
            vec![2, 2, 2, 5]
        );
        assert!(!exp.has(Metric::ShortestPathLengths));

        let exp = log.find(4).unwrap();
        assert_eq!(exp.bits, Some(16));
        assert!(exp.has(Metric::ShortestPathLengths));
    }

    #[test]
    fn missing_histogram() {
        let log = ExperimentLog::from_json(
            r#"{"experiments": [{"nodes": 16, "iterations": 1, "gaps": {"1": 1}}]}"#,
        )
        .unwrap();
        let exp = &log.experiments[0];
        assert!(exp.has(Metric::Gaps));
        match exp.histogram(Metric::PathLengths) {
            Err(LoadError::MissingHistogram { nodes, metric }) => {
                assert_eq!(nodes, 16);
                assert_eq!(metric, Metric::PathLengths);
            }
            x => panic!("Unexpected result: {x:?}"),
        }
    }

    #[test]
    fn reject_malformed_log() {
        assert!(matches!(
            ExperimentLog::from_json(r#"{"experiments": [{"iterations": 1}]}"#),
            Err(LoadError::Json(_))
        ));
        assert!(matches!(
            ExperimentLog::from_json(r#"{"runs": []}"#),
            Err(LoadError::Json(_))
        ));
        assert!(matches!(
            ExperimentLog::load("./does/not/exist.json"),
            Err(LoadError::Io(_))
        ));
    }

    #[test]
    fn metric_names() {
        assert_eq!(Metric::EndNodes.to_string(), "endNodes");
        assert_eq!(Metric::from_str("pathLengths").unwrap(), Metric::PathLengths);
        assert_eq!(Metric::ShortestPathLengths.slug(), "shortest_path_lengths");
    }
}
