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
//! Runs the full report over a small generated dataset.
use std::{fs, path::Path};

use serde_json::json;

use ringstat::prelude::*;

const NODE_COUNTS: [u64; 3] = [4, 8, 16];
const ITERATIONS: u64 = 2;
const TRIALS: u64 = 4;

/// Write a log where every node did `ITERATIONS * TRIALS` lookups, using a different histogram
/// encoding for each metric.
fn write_dataset(root: &Path) {
    let experiments = NODE_COUNTS
        .iter()
        .map(|nodes| {
            let lookups = nodes * ITERATIONS * TRIALS;
            let hops = nodes.trailing_zeros() as u64;
            json!({
                "bits": 8,
                "nodes": nodes,
                "iterations": ITERATIONS,
                // half of the lookups at a gap of 1, the other half spread over two larger gaps
                "gaps": {
                    "1": lookups / 2,
                    "3": lookups / 4,
                    (hops + 3).to_string(): lookups / 4,
                },
                "endNodes": [0, lookups / 2, lookups / 2],
                "queries": [[hops + 1, lookups / 2], [1, lookups / 2]],
                "pathLengths": {
                    "0": 1,
                    hops.to_string(): lookups - 1,
                },
            })
        })
        .collect::<Vec<_>>();
    fs::write(
        root.join("log.json"),
        serde_json::to_string_pretty(&json!({ "experiments": experiments })).unwrap(),
    )
    .unwrap();

    let mut topology = "nodes\tradius\tdiameter\tcc\n".to_string();
    for nodes in NODE_COUNTS.iter().rev() {
        let hops = nodes.trailing_zeros();
        topology.push_str(&format!("{nodes}\t{}\t{}\t0.{hops}\n", hops - 1, hops));
    }
    fs::write(root.join("topology.tsv"), topology).unwrap();

    let samples = root.join("graphs");
    fs::create_dir_all(&samples).unwrap();
    for nodes in NODE_COUNTS {
        let hops = nodes.trailing_zeros();
        for kind in ["indegree_single", "indegree_multi"] {
            fs::write(
                samples.join(format!("{kind}_{nodes}.tsv")),
                format!("{hops}\t{}\n{}\n", hops + 1, hops + 2),
            )
            .unwrap();
        }
        fs::write(
            samples.join(format!("spl_multi_{nodes}.tsv")),
            format!("0\t1\n{hops}\t{hops}\n"),
        )
        .unwrap();
    }
    // not part of the log, must be ignored
    fs::write(samples.join("indegree_single_32.tsv"), "1\n").unwrap();
}

fn config(root: &Path) -> ReportConfig {
    ReportConfig {
        log_path: root.join("log.json"),
        topology_path: root.join("topology.tsv"),
        samples_dir: root.join("graphs"),
        output_dir: root.join("plots"),
        aggregator: Aggregator::new(TRIALS),
        ..Default::default()
    }
}

#[test]
fn render_all_figures() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(dir.path());

    let report = Report::load(config(dir.path())).unwrap();
    assert_eq!(report.log().node_counts(), NODE_COUNTS.to_vec());
    assert_eq!(report.focus().unwrap().nodes, 16);

    let results = report.run(&Figure::all());
    assert_eq!(results.len(), Figure::all().len());
    for (figure, result) in results {
        let path = result.unwrap_or_else(|e| panic!("{figure} failed: {e}"));
        assert_eq!(path, dir.path().join(format!("plots/{figure}.html")));
        assert!(fs::read_to_string(path).unwrap().contains("plotly"));
    }

    let summaries = report.write_summaries().unwrap();
    assert_eq!(summaries.len(), 4);
}

#[test]
fn summary_tables() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(dir.path());
    let report = Report::load(config(dir.path())).unwrap();

    for metric in Metric::REQUIRED {
        let table = report.table(metric).unwrap();
        assert_eq!(table.nodes(), NODE_COUNTS.to_vec());
        for (row, bar) in table.rows.iter().zip(table.error_bars()) {
            assert_eq!(row.count as u64, row.nodes * ITERATIONS * TRIALS);
            assert!(bar.lower >= 0.0 && bar.upper >= 0.0);
        }
    }

    let end_nodes = report.table(Metric::EndNodes).unwrap();
    assert!(end_nodes.rows.iter().all(|row| (row.mean - 1.5).abs() < 1e-9));
}

#[test]
fn densities_sum_to_one() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(dir.path());
    let report = Report::load(config(dir.path())).unwrap();
    let aggregator = report.config().aggregator;

    for exp in report.log().experiments.iter() {
        for metric in Metric::REQUIRED {
            let sum: f64 = aggregator
                .density(exp, metric)
                .unwrap()
                .iter()
                .map(|(_, p)| p)
                .sum::<f64>()
                / exp.nodes as f64;
            assert!((sum - 1.0).abs() < 1e-9, "{metric} of {} nodes: {sum}", exp.nodes);
        }
    }
}

#[test]
fn missing_topology_rows_fail_only_their_figures() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(dir.path());
    fs::write(
        dir.path().join("topology.tsv"),
        "nodes\tradius\tdiameter\tcc\n4\t1\t2\t0.5\n",
    )
    .unwrap();

    let report = Report::load(config(dir.path())).unwrap();
    let results = report.run(&[
        Figure::RadiusDiameter,
        Figure::ClusteringCoefficient,
        Figure::Queries,
    ]);
    assert!(results[0].1.is_err());
    assert!(results[1].1.is_err());
    assert!(results[2].1.is_ok());
}

#[test]
fn malformed_log_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("log.json"), r#"{"experiments": [{"nodes": 4}]}"#).unwrap();
    assert!(Report::load(config(dir.path())).is_err());

    fs::write(
        dir.path().join("log.json"),
        r#"{"experiments": [{"nodes": 4, "iterations": 1, "gaps": {"x": 1}}]}"#,
    )
    .unwrap();
    let report = Report::load(config(dir.path())).unwrap();
    assert!(report.render(Figure::Gaps).is_err());
    // no path lengths in the log
    assert!(report.render(Figure::PathLengths).is_err());
}
