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
//! Module aggregating the histograms of all experiments into per-node-count summary tables.
use std::{fs, ops::Range, path::Path};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    experiment::{Experiment, LoadError, Metric},
    histogram::DecodeError,
    stats::{ErrorBar, StatsError, Summary},
};

/// Lookups issued per node and iteration by the simulator.
pub const DEFAULT_TRIAL_MULTIPLIER: u64 = 1 << 12;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Load(#[from] LoadError),
    #[error("Cannot decode `{metric}` of the experiment with {nodes} nodes: {source}")]
    Decode {
        nodes: u64,
        metric: Metric,
        source: DecodeError,
    },
    #[error("Cannot summarize `{metric}` of the experiment with {nodes} nodes: {source}")]
    Stats {
        nodes: u64,
        metric: Metric,
        source: StatsError,
    },
    #[error("Cannot normalize the experiment with {nodes} nodes: {iterations} iterations with a trial multiplier of {multiplier}")]
    ZeroNormalization {
        nodes: u64,
        iterations: u64,
        multiplier: u64,
    },
    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
}

/// Computes summary tables and densities of the experiment metrics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Aggregator {
    /// Lookups per node and iteration. Densities divide the raw bucket counts by
    /// `iterations * trial_multiplier`.
    pub trial_multiplier: u64,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self {
            trial_multiplier: DEFAULT_TRIAL_MULTIPLIER,
        }
    }
}

impl Aggregator {
    pub fn new(trial_multiplier: u64) -> Self {
        Self { trial_multiplier }
    }

    /// Decoded samples of `metric` for a single experiment, ascending.
    pub fn samples(&self, exp: &Experiment, metric: Metric) -> Result<Vec<u64>, Error> {
        exp.histogram(metric)?
            .unfold()
            .map_err(|source| Error::Decode {
                nodes: exp.nodes,
                metric,
                source,
            })
    }

    /// Summarize `metric` of a single experiment.
    pub fn summarize(&self, exp: &Experiment, metric: Metric) -> Result<Summary, Error> {
        let samples = self.samples(exp, metric)?;
        Summary::from_samples(exp.nodes, &samples).map_err(|source| Error::Stats {
            nodes: exp.nodes,
            metric,
            source,
        })
    }

    /// Summarize `metric` of every experiment, one row per experiment ordered by node count.
    /// Fails on the first experiment that cannot be summarized.
    pub fn aggregate(
        &self,
        experiments: &[Experiment],
        metric: Metric,
    ) -> Result<SummaryTable, Error> {
        let rows = experiments
            .iter()
            .map(|exp| self.summarize(exp, metric))
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .sorted_by_key(|row| row.nodes)
            .collect();
        Ok(SummaryTable { metric, rows })
    }

    /// Probability density of `metric` for a single experiment: `(bucket, count / (iterations *
    /// trial_multiplier))` for every bucket with a non-zero count, ascending by bucket.
    pub fn density(&self, exp: &Experiment, metric: Metric) -> Result<Vec<(u64, f64)>, Error> {
        let norm = self.normalization(exp)?;
        Ok(self
            .counts(exp, metric)?
            .into_iter()
            .map(|(bucket, count)| (bucket, count as f64 / norm))
            .collect())
    }

    /// Same as [`Aggregator::density`], but evaluated on every bucket in `buckets`. Buckets without
    /// observations have a density of zero.
    pub fn dense_density(
        &self,
        exp: &Experiment,
        metric: Metric,
        buckets: Range<u64>,
    ) -> Result<Vec<(u64, f64)>, Error> {
        let norm = self.normalization(exp)?;
        let counts = self.counts(exp, metric)?;
        Ok(buckets
            .map(|bucket| {
                let count = counts.get(&bucket).copied().unwrap_or_default();
                (bucket, count as f64 / norm)
            })
            .collect())
    }

    fn counts(
        &self,
        exp: &Experiment,
        metric: Metric,
    ) -> Result<std::collections::BTreeMap<u64, u64>, Error> {
        exp.histogram(metric)?
            .counts()
            .map_err(|source| Error::Decode {
                nodes: exp.nodes,
                metric,
                source,
            })
    }

    fn normalization(&self, exp: &Experiment) -> Result<f64, Error> {
        match exp.iterations.checked_mul(self.trial_multiplier) {
            Some(norm) if norm > 0 => Ok(norm as f64),
            _ => Err(Error::ZeroNormalization {
                nodes: exp.nodes,
                iterations: exp.iterations,
                multiplier: self.trial_multiplier,
            }),
        }
    }
}

/// Summaries of one metric over all experiments, ordered by node count.
#[derive(Clone, Debug, PartialEq)]
pub struct SummaryTable {
    pub metric: Metric,
    pub rows: Vec<Summary>,
}

impl SummaryTable {
    pub fn nodes(&self) -> Vec<u64> {
        self.rows.iter().map(|row| row.nodes).collect()
    }

    pub fn means(&self) -> Vec<f64> {
        self.rows.iter().map(|row| row.mean).collect()
    }

    pub fn error_bars(&self) -> Vec<ErrorBar> {
        self.rows.iter().map(Summary::error_bar).collect()
    }

    /// First row with the given node count.
    pub fn get(&self, nodes: u64) -> Option<&Summary> {
        self.rows.iter().find(|row| row.nodes == nodes)
    }

    /// Write the table as CSV, one line per row.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        let mut csv = csv::WriterBuilder::new().from_writer(
            fs::OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)?,
        );
        for row in self.rows.iter() {
            csv.serialize(row)?;
        }
        csv.flush()?;
        log::debug!("Wrote {} rows of `{}` to {path:?}", self.rows.len(), self.metric);
        Ok(())
    }
}
