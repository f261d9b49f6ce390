//! Fewest-hop search over an unweighted graph

use std::collections::{HashMap, VecDeque};

use tracing::debug;

use crate::error::{GraphError, Result};
use crate::graph::Graph;
use crate::model::{Edge, EdgeLabel, Node, NodeData};
use crate::path::Path;

/// Find the route from `start` to `dest` with the fewest edges.
///
/// Outgoing edges are explored in `(target, label)` order, so among routes
/// of equal length the result is always the same one. Returns `Ok(None)`
/// when `dest` is unreachable and an error when either node is not in the
/// graph. A search from a node to itself yields an empty route.
pub fn shortest_path<N: NodeData, L: EdgeLabel>(
    graph: &Graph<N, L>,
    start: &Node<N>,
    dest: &Node<N>,
) -> Result<Option<Vec<Edge<N, L>>>> {
    for node in [start, dest] {
        if !graph.contains_node(node) {
            return Err(GraphError::unknown_node(node));
        }
    }

    // node -> (parent, edge taken from parent); the start has no entry
    let mut came_from: HashMap<Node<N>, (Node<N>, Edge<N, L>)> = HashMap::new();
    let mut queue = VecDeque::new();
    queue.push_back(start.clone());

    while let Some(current) = queue.pop_front() {
        if current == *dest {
            let route = reconstruct(&came_from, start, dest);
            debug!("BFS reached {:?} in {} hops", dest, route.len());
            return Ok(Some(route));
        }

        for edge in graph.sorted_edges(&current)? {
            let child = edge.target();
            if child == start || came_from.contains_key(child) {
                continue;
            }
            queue.push_back(child.clone());
            came_from.insert(child.clone(), (current.clone(), edge));
        }
    }

    debug!("BFS found no path from {:?} to {:?}", start, dest);
    Ok(None)
}

fn reconstruct<N: NodeData, L: EdgeLabel>(
    came_from: &HashMap<Node<N>, (Node<N>, Edge<N, L>)>,
    start: &Node<N>,
    dest: &Node<N>,
) -> Vec<Edge<N, L>> {
    let mut route = Vec::new();
    let mut cursor = dest;
    while cursor != start {
        match came_from.get(cursor) {
            Some((parent, edge)) => {
                route.push(edge.clone());
                cursor = parent;
            }
            None => break,
        }
    }
    route.reverse();
    route
}

/// Turn an edge route starting at `start` into a [`Path`], pricing each hop
/// with `hop_cost`.
pub fn edges_to_path<N: NodeData, L>(
    start: &Node<N>,
    route: &[Edge<N, L>],
    hop_cost: impl Fn(&L) -> f64,
) -> Path<N> {
    route.iter().fold(Path::new(start.data().clone()), |path, edge| {
        path.extend(edge.target().data().clone(), hop_cost(edge.label()))
    })
}
