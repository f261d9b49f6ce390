//! Minimum-cost search over a graph with non-negative edge costs

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use tracing::debug;

use crate::error::{GraphError, Result};
use crate::graph::Graph;
use crate::model::{EdgeLabel, Node, NodeData, Weighted};
use crate::path::Path;

/// A partial path waiting in the frontier.
///
/// `BinaryHeap` is a max-heap, so the ordering is reversed: the cheapest
/// path is the greatest. Equal costs fall back to the smaller terminus and
/// then to the earlier push, which keeps results reproducible.
struct Candidate<N> {
    path: Path<N>,
    seq: u64,
}

impl<N: Ord> Ord for Candidate<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .path
            .cost()
            .total_cmp(&self.path.cost())
            .then_with(|| other.path.end().cmp(self.path.end()))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<N: Ord> PartialOrd for Candidate<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N: Ord> PartialEq for Candidate<N> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<N: Ord> Eq for Candidate<N> {}

/// Find the cheapest path from `start` to `dest`.
///
/// Returns `Ok(None)` when `dest` is unreachable and an error when either
/// node is not in the graph or an explored edge carries a negative or
/// non-finite cost. A search from a node to itself yields an empty,
/// zero-cost path.
pub fn shortest_path<N, L>(graph: &Graph<N, L>, start: &Node<N>, dest: &Node<N>) -> Result<Option<Path<N>>>
where
    N: NodeData,
    L: EdgeLabel + Weighted,
{
    for node in [start, dest] {
        if !graph.contains_node(node) {
            return Err(GraphError::unknown_node(node));
        }
    }

    let mut frontier = BinaryHeap::new();
    let mut finalized: HashSet<Node<N>> = HashSet::new();
    let mut seq = 0u64;

    frontier.push(Candidate {
        path: Path::new(start.data().clone()),
        seq,
    });

    while let Some(Candidate { path, .. }) = frontier.pop() {
        if path.end() == dest.data() {
            debug!(
                "Dijkstra reached {:?} with cost {} over {} segments",
                dest,
                path.cost(),
                path.len()
            );
            return Ok(Some(path));
        }

        let terminus = Node::new(path.end().clone());
        if finalized.contains(&terminus) {
            continue;
        }

        for edge in graph.sorted_edges(&terminus)? {
            if finalized.contains(edge.target()) {
                continue;
            }
            let hop = edge.label().cost();
            if !hop.is_finite() || hop < 0.0 {
                return Err(GraphError::InvalidCost(hop));
            }
            seq += 1;
            frontier.push(Candidate {
                path: path.extend(edge.target().data().clone(), hop),
                seq,
            });
        }

        finalized.insert(terminus);
    }

    debug!("Dijkstra found no path from {:?} to {:?}", start, dest);
    Ok(None)
}
