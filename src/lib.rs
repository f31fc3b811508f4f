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
//! Library for analyzing the logs of Chord overlay simulations: decoding the logged histograms,
//! summarizing them per node count and rendering the report figures.
pub mod aggregator;
pub mod experiment;
pub mod histogram;
pub mod report;
pub mod stats;
pub mod topology;
pub mod util;

pub mod prelude {
    pub use super::{
        aggregator::{Aggregator, SummaryTable},
        experiment::{Experiment, ExperimentLog, Metric},
        histogram::Histogram,
        report::{Figure, Report, ReportConfig, Style},
        stats::Summary,
        topology::{SampleDir, SampleKind, TopologyTable},
    };
}
