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
//! Module to load the graph analysis exports of the overlay topologies: summary statistics per
//! node count and raw samples of degrees and shortest path lengths.
use std::path::{Path, PathBuf};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::util::{self, PathBufExt};

#[derive(Debug, thiserror::Error)]
pub enum TopologyError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Glob Pattern Error: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error("Glob Error: {0}")]
    Glob(#[from] glob::GlobError),
    #[error("Invalid number {value:?} in {path:?}")]
    InvalidNumber { path: PathBuf, value: String },
    #[error("No topology summary for {0} nodes")]
    MissingNodes(u64),
    #[error("No {kind} samples for {nodes} nodes (expected {path:?})")]
    MissingSamples {
        kind: SampleKind,
        nodes: u64,
        path: PathBuf,
    },
}

/// Graph properties of the overlay with a given number of nodes.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct TopologySummary {
    pub nodes: u64,
    pub radius: f64,
    pub diameter: f64,
    /// Clustering coefficient
    pub cc: f64,
}

/// Topology summaries, ascending by node count.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TopologyTable {
    pub rows: Vec<TopologySummary>,
}

impl TopologyTable {
    /// Load the tab-separated summary file at `path`. Columns other than `nodes`, `radius`,
    /// `diameter` and `cc` are ignored.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TopologyError> {
        let path = path.as_ref();
        log::info!("Loading: {path:?}");
        let mut csv = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .trim(csv::Trim::All)
            .from_path(path)?;
        let rows = csv
            .deserialize()
            .collect::<Result<Vec<TopologySummary>, _>>()?
            .into_iter()
            .sorted_by_key(|row| row.nodes)
            .collect();
        Ok(Self { rows })
    }

    pub fn get(&self, nodes: u64) -> Result<&TopologySummary, TopologyError> {
        self.rows
            .iter()
            .find(|row| row.nodes == nodes)
            .ok_or(TopologyError::MissingNodes(nodes))
    }

    /// Summaries for each of the given node counts, failing if any of them is missing.
    pub fn join(&self, node_counts: &[u64]) -> Result<Vec<TopologySummary>, TopologyError> {
        node_counts
            .iter()
            .map(|nodes| self.get(*nodes).copied())
            .collect()
    }
}

/// Kinds of per-node-count sample files.
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
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SampleKind {
    /// Indegree of each node, counting parallel finger table entries once.
    IndegreeSingle,
    /// Indegree of each node, counting every finger table entry.
    IndegreeMulti,
    /// Shortest path lengths in the multi-edge graph.
    SplMulti,
}

impl SampleKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::IndegreeSingle => "Indegree (single edges)",
            Self::IndegreeMulti => "Indegree (multi edges)",
            Self::SplMulti => "Shortest path length",
        }
    }
}

/// Directory holding the sample files, named `{kind}_{nodes}.tsv`.
#[derive(Clone, Debug)]
pub struct SampleDir {
    root: PathBuf,
}

impl SampleDir {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self, kind: SampleKind, nodes: u64) -> PathBuf {
        self.root.as_path().then_file(format!("{kind}_{nodes}"), "tsv")
    }

    /// Node counts for which a file of `kind` exists, ascending.
    pub fn node_counts(&self, kind: SampleKind) -> Result<Vec<u64>, TopologyError> {
        let pattern = self.root.as_path().then(format!("{kind}_*.tsv"));
        let mut node_counts = Vec::new();
        for path in glob::glob(&pattern.to_string_lossy())? {
            let path = path?;
            let Some(file_name) = path.file_name() else {
                continue;
            };
            match util::parse_sample_file_name(file_name.to_string_lossy()) {
                Some((k, nodes)) if k == kind.to_string() => node_counts.push(nodes),
                _ => log::trace!("Skipping {path:?}"),
            }
        }
        node_counts.sort_unstable();
        node_counts.dedup();
        Ok(node_counts)
    }

    /// Load all values of the `kind` file for `nodes`. The file is tab-separated without a header,
    /// rows may have any number of columns and every non-empty cell is one sample.
    pub fn load(&self, kind: SampleKind, nodes: u64) -> Result<Vec<f64>, TopologyError> {
        let path = self.path(kind, nodes);
        if !path.exists() {
            return Err(TopologyError::MissingSamples { kind, nodes, path });
        }
        log::info!("Loading: {path:?}");
        let mut csv = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(&path)?;

        let mut samples = Vec::new();
        for record in csv.records() {
            for value in record?.iter().filter(|value| !value.is_empty()) {
                samples.push(value.parse().map_err(|_| TopologyError::InvalidNumber {
                    path: path.clone(),
                    value: value.to_string(),
                })?);
            }
        }
        Ok(samples)
    }
}
