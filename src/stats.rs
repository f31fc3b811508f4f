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
//! Descriptive statistics over decoded sample sets.
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StatsError {
    #[error("Cannot summarize an empty sample set")]
    Empty,
}

/// One row of a summary table: the descriptive statistics of a single experiment's metric.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct Summary {
    pub nodes: u64,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (`n - 1` in the denominator), `NaN` for a single sample.
    pub std: f64,
    pub min: f64,
    pub p1: f64,
    pub p99: f64,
    pub max: f64,
}

/// Asymmetric error bar around the mean, spanning the 1st to the 99th percentile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ErrorBar {
    pub lower: f64,
    pub upper: f64,
}

impl Summary {
    /// Summarize the samples of an experiment with `nodes` nodes.
    pub fn from_samples(nodes: u64, samples: &[u64]) -> Result<Self, StatsError> {
        let sorted = samples
            .iter()
            .map(|x| *x as f64)
            .sorted_by(f64::total_cmp)
            .collect_vec();
        let (Some(min), Some(max)) = (sorted.first(), sorted.last()) else {
            return Err(StatsError::Empty);
        };

        Ok(Self {
            nodes,
            count: sorted.len(),
            mean: sorted.iter().mean(),
            std: sorted.iter().std_dev(),
            min: *min,
            p1: percentile(&sorted, 0.01).ok_or(StatsError::Empty)?,
            p99: percentile(&sorted, 0.99).ok_or(StatsError::Empty)?,
            max: *max,
        })
    }

    /// Error bar from the 1st percentile up to the 99th. Both sides are clamped at zero, as the
    /// mean of a heavily skewed sample set may lie outside of the percentile band.
    pub fn error_bar(&self) -> ErrorBar {
        ErrorBar {
            lower: (self.mean - self.p1).max(0.0),
            upper: (self.p99 - self.mean).max(0.0),
        }
    }
}

/// Percentile `q` (in `[0, 1]`) of an ascending slice, interpolating linearly between the two
/// closest order statistics at rank `q * (n - 1)`.
///
/// The rank is clamped into the slice, so small sample sets degrade to their extreme order
/// statistics. Returns `None` for an empty slice.
pub fn percentile(sorted: &[f64], q: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let rank = q.clamp(0.0, 1.0) * last as f64;
    let lo = (rank.floor() as usize).min(last);
    let hi = (rank.ceil() as usize).min(last);
    let frac = rank - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}
