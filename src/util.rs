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
//! Utility module collection of functions

use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;

/// Configuration file for `log4rs`, looked up in the working directory.
pub const LOG_CONFIG: &str = "log4rs.yml";

/// Initialize logging from [`LOG_CONFIG`] if it exists, and from `RUST_LOG` otherwise.
pub fn init_logging() {
    if Path::new(LOG_CONFIG).exists() {
        match log4rs::init_file(LOG_CONFIG, Default::default()) {
            Ok(()) => return,
            Err(e) => eprintln!("Cannot initialize logging from {LOG_CONFIG}: {e}"),
        }
    }
    // fails only if a logger is already set, e.g., by a previous call
    let _ = pretty_env_logger::try_init();
}

lazy_static! {
    static ref NODE_COUNT: Regex =
        Regex::new(r"^(?P<kind>[a-z_]+)_(?P<nodes>[1-9][0-9]*)\.tsv$").unwrap();
}
/// Extract the kind and the node count from the file name of a per-node-count sample file,
/// e.g., `indegree_single_4096.tsv`.
pub fn parse_sample_file_name(file_name: impl AsRef<str>) -> Option<(String, u64)> {
    let captures = NODE_COUNT.captures(file_name.as_ref())?;
    let nodes = captures.name("nodes")?.as_str().parse().ok()?;
    Some((captures.name("kind")?.as_str().to_string(), nodes))
}

pub trait PathBufExt: Sized {
    fn then(self, p: impl AsRef<Path>) -> PathBuf;

    /// Append `{stem}.{ext}`.
    fn then_file(self, stem: impl AsRef<str>, ext: &str) -> PathBuf {
        self.then(format!("{}.{ext}", stem.as_ref()))
    }
}

impl PathBufExt for PathBuf {
    fn then(mut self, p: impl AsRef<Path>) -> PathBuf {
        self.push(p);
        self
    }
}

impl PathBufExt for &Path {
    fn then(self, p: impl AsRef<Path>) -> PathBuf {
        let mut path = self.to_path_buf();
        path.push(p);
        path
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sample_file_names() {
        assert_eq!(
            parse_sample_file_name("indegree_single_4096.tsv"),
            Some(("indegree_single".to_string(), 4096))
        );
        assert_eq!(
            parse_sample_file_name("spl_multi_8.tsv"),
            Some(("spl_multi".to_string(), 8))
        );
        assert_eq!(parse_sample_file_name("spl_multi_08.tsv"), None);
        assert_eq!(parse_sample_file_name("spl_multi.tsv"), None);
        assert_eq!(parse_sample_file_name("spl_multi_8.csv"), None);
    }

    #[test]
    fn path_ext() {
        let p = Path::new("/tmp").then("plots").then_file("gaps", "html");
        assert_eq!(p, PathBuf::from("/tmp/plots/gaps.html"));
    }
}
