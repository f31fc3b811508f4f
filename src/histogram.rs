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
//! Module decoding the compact frequency summaries stored in the simulation log.
use std::collections::BTreeMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("Histogram bucket {0:?} is not a non-negative integer")]
    InvalidKey(String),
    #[error("Histogram bucket {bucket} has a negative count ({count})")]
    NegativeCount { bucket: u64, count: i64 },
}

/// Frequency summary of a measured quantity, in one of the three encodings found in the logs.
///
/// Counts are kept signed so that a negative count is reported as a [`DecodeError`] naming the
/// offending bucket instead of an opaque parse error.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Histogram {
    /// Sequence of counts, the position in the sequence is the bucket.
    Dense(Vec<i64>),
    /// Sequence of `(bucket, count)` pairs in any order.
    Pairs(Vec<(u64, i64)>),
    /// Mapping from the decimal string of a bucket to its count.
    Mapping(BTreeMap<String, i64>),
}

impl Default for Histogram {
    fn default() -> Self {
        Self::Mapping(BTreeMap::new())
    }
}

impl Histogram {
    /// Normalized form of the histogram: bucket -> count, ascending by bucket.
    ///
    /// Buckets with a count of zero are dropped and buckets that occur more than once (e.g. `"1"`
    /// and `"01"`, or a repeated pair) are summed.
    pub fn counts(&self) -> Result<BTreeMap<u64, u64>, DecodeError> {
        let mut counts = BTreeMap::new();
        for (bucket, count) in self.entries()? {
            if count < 0 {
                return Err(DecodeError::NegativeCount { bucket, count });
            }
            if count > 0 {
                *counts.entry(bucket).or_default() += count as u64;
            }
        }
        Ok(counts)
    }

    /// Number of observations summarized by this histogram.
    pub fn total(&self) -> Result<u64, DecodeError> {
        Ok(self.counts()?.values().sum())
    }

    /// Expand the histogram into one entry per observation, ascending by bucket.
    pub fn unfold(&self) -> Result<Vec<u64>, DecodeError> {
        Ok(self
            .counts()?
            .into_iter()
            .flat_map(|(bucket, count)| itertools::repeat_n(bucket, count as usize))
            .collect())
    }

    fn entries(&self) -> Result<Vec<(u64, i64)>, DecodeError> {
        match self {
            Self::Dense(counts) => Ok(counts
                .iter()
                .enumerate()
                .map(|(bucket, count)| (bucket as u64, *count))
                .collect()),
            Self::Pairs(pairs) => Ok(pairs.clone()),
            Self::Mapping(map) => map
                .iter()
                .map(|(key, count)| Ok((parse_bucket(key)?, *count)))
                .collect(),
        }
    }
}

impl FromIterator<(u64, u64)> for Histogram {
    fn from_iter<I: IntoIterator<Item = (u64, u64)>>(iter: I) -> Self {
        Self::Pairs(
            iter.into_iter()
                .map(|(bucket, count)| (bucket, count as i64))
                .collect(),
        )
    }
}

fn parse_bucket(key: &str) -> Result<u64, DecodeError> {
    key.trim()
        .parse()
        .map_err(|_| DecodeError::InvalidKey(key.to_string()))
}

/// Count the occurrences of each value in a decoded sample sequence. Inverse of
/// [`Histogram::unfold`] with respect to [`Histogram::counts`].
pub fn refold(samples: &[u64]) -> BTreeMap<u64, u64> {
    samples
        .iter()
        .copied()
        .counts()
        .into_iter()
        .map(|(bucket, count)| (bucket, count as u64))
        .collect()
}
