//! Wayfinder Core — labeled multigraph, paths, BFS and Dijkstra search

pub mod error;
pub mod model;
pub mod graph;
pub mod path;
pub mod bfs;
pub mod dijkstra;


#[cfg(test)]
pub mod test_utils;

pub use error::{GraphError, Result};
pub use model::{Cost, Edge, EdgeLabel, Node, NodeData, Point, Weighted};
pub use graph::Graph;
pub use path::{Path, Segment};
