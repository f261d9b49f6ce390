//! Test utilities for building small graphs

use crate::graph::Graph;
use crate::model::{Cost, Node};

/// Shorthand for a string node.
pub fn node(name: &str) -> Node<String> {
    Node::new(name.to_string())
}

/// Build a string-labeled graph from node names and `(from, to, label)` triples.
pub fn labeled_graph(nodes: &[&str], edges: &[(&str, &str, &str)]) -> Graph<String, String> {
    let mut graph = Graph::new();
    for name in nodes {
        graph.add_node(node(name));
    }
    for (from, to, label) in edges {
        graph.add_edge(&node(from), &node(to), label.to_string()).unwrap();
    }
    graph
}

/// Build a cost-labeled graph from node names and `(from, to, cost)` triples.
pub fn weighted_graph(nodes: &[&str], edges: &[(&str, &str, f64)]) -> Graph<String, Cost> {
    let mut graph = Graph::new();
    for name in nodes {
        graph.add_node(node(name));
    }
    for (from, to, cost) in edges {
        graph
            .add_edge(&node(from), &node(to), Cost::new(*cost).unwrap())
            .unwrap();
    }
    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_builders() {
        let graph = labeled_graph(&["a", "b"], &[("a", "b", "x")]);
        assert_eq!(graph.size(), 2);
        assert_eq!(graph.edge_count(), 1);

        let graph = weighted_graph(&["a", "b"], &[("a", "b", 1.0), ("b", "a", 2.0)]);
        assert_eq!(graph.edge_count(), 2);
    }
}
