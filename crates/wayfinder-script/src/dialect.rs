//! Command sets understood by the interpreter
//!
//! A dialect fixes the edge label type of its graphs, how labels are read
//! from and written to a script, and which optional commands exist.

use std::path::PathBuf;

use wayfinder_core::{bfs, dijkstra, Cost, EdgeLabel, Graph, Node};
use wayfinder_data::social;

use crate::error::{Result, ScriptError};

const BASE_COMMANDS: &[&str] = &["CreateGraph", "AddNode", "AddEdge", "ListNodes", "ListChildren"];

pub trait Dialect {
    type Label: EdgeLabel;

    /// Whether `command` is part of this dialect.
    fn supports(&self, command: &str) -> bool {
        BASE_COMMANDS.contains(&command)
    }

    fn parse_label(&self, raw: &str) -> Result<Self::Label>;

    fn format_label(&self, label: &Self::Label) -> String;

    fn load_graph(&self, _file: &str) -> Result<Graph<String, Self::Label>> {
        Err(ScriptError::Unrecognized("LoadGraph".to_string()))
    }

    /// Lines describing the route from `start` to `dest`, or `None` when the
    /// nodes are disconnected. Both nodes are known to be in `graph`.
    fn find_path(
        &self,
        _graph: &Graph<String, Self::Label>,
        _start: &Node<String>,
        _dest: &Node<String>,
    ) -> Result<Option<Vec<String>>> {
        Err(ScriptError::Unrecognized("FindPath".to_string()))
    }
}

/// Plain string labels, no search commands.
#[derive(Debug, Default, Clone, Copy)]
pub struct Labeled;

impl Dialect for Labeled {
    type Label = String;

    fn parse_label(&self, raw: &str) -> Result<String> {
        Ok(raw.to_string())
    }

    fn format_label(&self, label: &String) -> String {
        label.clone()
    }
}

/// String labels plus dataset loading and fewest-hop search.
#[derive(Debug, Default, Clone)]
pub struct Social {
    data_dir: PathBuf,
}

impl Social {
    /// `LoadGraph` file names resolve against `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }
}

impl Dialect for Social {
    type Label = String;

    fn supports(&self, command: &str) -> bool {
        BASE_COMMANDS.contains(&command) || matches!(command, "LoadGraph" | "FindPath")
    }

    fn parse_label(&self, raw: &str) -> Result<String> {
        Ok(raw.to_string())
    }

    fn format_label(&self, label: &String) -> String {
        label.clone()
    }

    fn load_graph(&self, file: &str) -> Result<Graph<String, String>> {
        Ok(social::load_graph(&self.data_dir.join(file))?)
    }

    fn find_path(
        &self,
        graph: &Graph<String, String>,
        start: &Node<String>,
        dest: &Node<String>,
    ) -> Result<Option<Vec<String>>> {
        let Some(edges) = bfs::shortest_path(graph, start, dest)? else {
            return Ok(None);
        };

        let mut parent = start.data();
        let mut lines = Vec::with_capacity(edges.len());
        for edge in &edges {
            let child = edge.target().data();
            lines.push(format!("{} to {} via {}", parent, child, edge.label()));
            parent = child;
        }
        Ok(Some(lines))
    }
}

/// Numeric labels printed to three decimals, minimum-cost search.
#[derive(Debug, Default, Clone, Copy)]
pub struct Weighted;

impl Dialect for Weighted {
    type Label = Cost;

    fn supports(&self, command: &str) -> bool {
        BASE_COMMANDS.contains(&command) || command == "FindPath"
    }

    fn parse_label(&self, raw: &str) -> Result<Cost> {
        let value: f64 = raw
            .parse()
            .map_err(|_| ScriptError::InvalidLabel(raw.to_string()))?;
        Ok(Cost::new(value)?)
    }

    fn format_label(&self, label: &Cost) -> String {
        label.to_string()
    }

    fn find_path(
        &self,
        graph: &Graph<String, Cost>,
        start: &Node<String>,
        dest: &Node<String>,
    ) -> Result<Option<Vec<String>>> {
        let Some(path) = dijkstra::shortest_path(graph, start, dest)? else {
            return Ok(None);
        };

        let mut lines: Vec<String> = path
            .segments()
            .into_iter()
            .map(|s| format!("{} to {} with weight {:.3}", s.start(), s.end(), s.cost()))
            .collect();
        lines.push(format!("total cost: {:.3}", path.cost()));
        Ok(Some(lines))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_sets() {
        assert!(Labeled.supports("AddEdge"));
        assert!(!Labeled.supports("FindPath"));
        assert!(!Labeled.supports("LoadGraph"));
        assert!(Social::default().supports("LoadGraph"));
        assert!(Weighted.supports("FindPath"));
        assert!(!Weighted.supports("LoadGraph"));
    }

    #[test]
    fn test_weighted_labels() {
        let cost = Weighted.parse_label("2.5").unwrap();
        assert_eq!(Weighted.format_label(&cost), "2.500");
        assert!(matches!(
            Weighted.parse_label("heavy"),
            Err(ScriptError::InvalidLabel(_))
        ));
        assert!(matches!(Weighted.parse_label("-1"), Err(ScriptError::Graph(_))));
    }
}
