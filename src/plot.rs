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
use std::{path::PathBuf, process};

use clap::Parser;
use itertools::Itertools;

use ringstat::{
    report::{Figure, Report, ReportConfig},
    util,
};

#[derive(Parser, Debug)]
#[command(about, long_about = None)]
struct Args {
    /// JSON configuration file. Arguments given on the command line take precedence.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Overwrite the path of the simulation log.
    #[arg(short, long)]
    log: Option<PathBuf>,
    /// Overwrite the path of the topology summary.
    #[arg(short, long)]
    topology: Option<PathBuf>,
    /// Overwrite the directory of the degree and shortest path length samples.
    #[arg(short, long)]
    samples_dir: Option<PathBuf>,
    /// Overwrite the output path for plots and summary tables.
    #[arg(short, long)]
    output_path: Option<PathBuf>,
    /// Node count of the experiment shown in the single-experiment plots.
    #[arg(short, long)]
    focus_nodes: Option<u64>,
    /// Lookups per node and iteration, used to normalize the densities.
    #[arg(long)]
    trial_multiplier: Option<u64>,
    /// Plot to generate, can be repeated. Generates all plots if omitted.
    #[arg(short, long = "plot")]
    plots: Vec<Figure>,
    /// Do not write the summary tables.
    #[arg(long)]
    no_summaries: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    util::init_logging();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => ReportConfig::load(path)?,
        None => ReportConfig::default(),
    };
    if let Some(log) = args.log {
        config.log_path = log;
    }
    if let Some(topology) = args.topology {
        config.topology_path = topology;
    }
    if let Some(samples_dir) = args.samples_dir {
        config.samples_dir = samples_dir;
    }
    if let Some(output_path) = args.output_path {
        config.output_dir = output_path;
    }
    if let Some(nodes) = args.focus_nodes {
        config.focus_nodes = Some(nodes);
    }
    if let Some(multiplier) = args.trial_multiplier {
        config.aggregator.trial_multiplier = multiplier;
    }

    // ensure that the log exists
    if !config.log_path.exists() {
        log::error!("Could not read the log in {:?}!", config.log_path);
        process::exit(1)
    }

    let report = Report::load(config)?;
    let mut failed = Vec::new();

    if !args.no_summaries {
        match report.write_summaries() {
            Ok(paths) => paths
                .iter()
                .for_each(|path| log::info!("Written summary table to {path:?}")),
            Err(e) => {
                log::error!("Cannot write the summary tables: {e}");
                failed.push("summaries".to_string());
            }
        }
    }

    let figures = if args.plots.is_empty() {
        Figure::all()
    } else {
        args.plots
    };
    failed.extend(
        report
            .run(&figures)
            .into_iter()
            .filter(|(_, result)| result.is_err())
            .map(|(figure, _)| figure.to_string()),
    );

    if !failed.is_empty() {
        log::error!("Failed to produce: {}", failed.iter().join(", "));
        process::exit(1)
    }
    Ok(())
}
