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
use plotly::{
    common::Font,
    layout::{Axis, AxisType},
    Layout,
};
use serde::{Deserialize, Serialize};

/// Seaborn's "muted" palette.
const MUTED: [&str; 10] = [
    "#4878D0", "#EE854A", "#6ACC64", "#D65F5F", "#956CB4", "#8C613C", "#DC7EC0", "#797979",
    "#D5BB67", "#82C6E2",
];

/// Visual settings shared by all figures of a report.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Style {
    /// Trace colors, used in order and repeated if a figure has more traces.
    pub palette: Vec<String>,
    pub font_family: String,
    pub font_size: usize,
    pub width: usize,
    pub height: usize,
    pub line_width: f64,
    /// Width of the error bar caps in pixels.
    pub cap_width: usize,
    /// Use a logarithmic axis with ticks at the node counts whenever the node count is on the x
    /// axis.
    pub log2_nodes_axis: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            palette: MUTED.iter().map(|c| c.to_string()).collect(),
            font_family: "serif".to_string(),
            font_size: 14,
            width: 800,
            height: 500,
            line_width: 1.0,
            cap_width: 5,
            log2_nodes_axis: true,
        }
    }
}

impl Style {
    pub fn color(&self, i: usize) -> String {
        if self.palette.is_empty() {
            return "#000000".to_string();
        }
        self.palette[i % self.palette.len()].clone()
    }

    pub fn layout(&self, title: impl AsRef<str>) -> Layout {
        Layout::new()
            .title(format!("<b>{}</b>", title.as_ref()))
            .font(Font::new().family(self.font_family.as_str()).size(self.font_size))
            .width(self.width)
            .height(self.height)
    }

    /// Y axis with a title and without grid lines.
    pub fn value_axis(&self, title: impl AsRef<str>) -> Axis {
        Axis::new()
            .title(title.as_ref().to_string())
            .show_grid(false)
    }

    /// X axis for the node counts. On a log axis, the ticks are placed at the node counts and
    /// labeled with their power of two.
    pub fn nodes_axis(&self, node_counts: &[u64]) -> Axis {
        let axis = Axis::new().title("Nodes".to_string()).show_grid(false);
        if !self.log2_nodes_axis {
            return axis;
        }
        axis.type_(AxisType::Log)
            .tick_values(node_counts.iter().map(|n| *n as f64).collect())
            .tick_text(node_counts.iter().map(|n| tick_label(*n)).collect())
    }
}

fn tick_label(nodes: u64) -> String {
    if nodes.is_power_of_two() {
        format!("2<sup>{}</sup>", nodes.trailing_zeros())
    } else {
        nodes.to_string()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn palette_repeats() {
        let style = Style::default();
        assert_eq!(style.color(0), "#4878D0");
        assert_eq!(style.color(10), style.color(0));
        let style = Style {
            palette: vec![],
            ..Default::default()
        };
        assert_eq!(style.color(3), "#000000");
    }

    #[test]
    fn tick_labels() {
        assert_eq!(tick_label(4096), "2<sup>12</sup>");
        assert_eq!(tick_label(1), "2<sup>0</sup>");
        assert_eq!(tick_label(12), "12");
    }

    #[test]
    fn partial_style_config() {
        let style: Style = serde_json::from_str(r#"{"font_family": "Latin Modern", "width": 400}"#)
            .unwrap();
        assert_eq!(style.font_family, "Latin Modern");
        assert_eq!(style.width, 400);
        assert_eq!(style.height, Style::default().height);
        assert_eq!(style.palette.len(), 10);
    }
}
