//! Graph wrapper using petgraph::StableDiGraph keyed by node value

use std::collections::{HashMap, HashSet};

use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use tracing::debug;

use crate::error::{GraphError, Result};
use crate::model::{Edge, EdgeLabel, Node, NodeData};

/// A mutable, directed, labeled multigraph.
///
/// Nodes are identified by value. Each parent may hold several edges to the
/// same child as long as their labels differ, and self-loops are allowed.
/// An edge is only admitted once both of its endpoints are present.
///
/// The graph owns all of its data; every query hands back copies.
pub struct Graph<N, L> {
    inner: StableDiGraph<Node<N>, L>,
    index: HashMap<Node<N>, NodeIndex>,
    // (parent, child, label) -> edge, one entry per stored edge
    edge_index: HashMap<(NodeIndex, NodeIndex, L), EdgeIndex>,
}

impl<N, L> std::fmt::Debug for Graph<N, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("node_count", &self.inner.node_count())
            .field("edge_count", &self.inner.edge_count())
            .finish()
    }
}

impl<N: NodeData, L: EdgeLabel> Graph<N, L> {
    pub fn new() -> Self {
        Graph {
            inner: StableDiGraph::new(),
            index: HashMap::new(),
            edge_index: HashMap::new(),
        }
    }

    /// Add a node if it is not already present. Returns whether it was inserted.
    pub fn add_node(&mut self, node: Node<N>) -> bool {
        if self.index.contains_key(&node) {
            return false;
        }
        let idx = self.inner.add_node(node.clone());
        self.index.insert(node, idx);
        self.debug_check_node(idx);
        true
    }

    /// Add an edge labeled `label` from `from` to `to`.
    ///
    /// Both endpoints must already be in the graph. Re-adding an edge that
    /// is already present succeeds without changing anything; the returned
    /// flag says whether a new edge was stored.
    pub fn add_edge(&mut self, from: &Node<N>, to: &Node<N>, label: L) -> Result<bool> {
        let from_idx = self.node_index(from)?;
        let to_idx = self.node_index(to)?;

        let key = (from_idx, to_idx, label);
        if self.edge_index.contains_key(&key) {
            debug!("Edge {:?} from {:?} to {:?} already present", key.2, from, to);
            return Ok(false);
        }

        let edge_idx = self.inner.add_edge(from_idx, to_idx, key.2.clone());
        self.debug_check_edge(&key, Some(edge_idx));
        self.edge_index.insert(key, edge_idx);
        Ok(true)
    }

    /// Remove a node together with every edge leading into or out of it.
    pub fn remove_node(&mut self, node: &Node<N>) -> Result<()> {
        let idx = self.node_index(node)?;
        for direction in [Direction::Outgoing, Direction::Incoming] {
            for edge_ref in self.inner.edges_directed(idx, direction) {
                if let Some((from, to)) = self.inner.edge_endpoints(edge_ref.id()) {
                    self.edge_index.remove(&(from, to, edge_ref.weight().clone()));
                }
            }
        }
        self.inner.remove_node(idx);
        self.index.remove(node);
        debug!("Removed node {:?}", node);
        self.debug_check();
        Ok(())
    }

    /// Remove one edge from `from`'s edge set.
    pub fn remove_edge(&mut self, from: &Node<N>, edge: &Edge<N, L>) -> Result<()> {
        let from_idx = self.node_index(from)?;
        let unknown = || GraphError::UnknownEdge {
            from: format!("{:?}", from),
            edge: format!("{:?}", edge),
        };
        let to_idx = *self.index.get(edge.target()).ok_or_else(unknown)?;
        let key = (from_idx, to_idx, edge.label().clone());
        let edge_idx = self.edge_index.remove(&key).ok_or_else(unknown)?;
        self.inner.remove_edge(edge_idx);
        self.debug_check_edge(&key, None);
        Ok(())
    }

    pub fn contains_node(&self, node: &Node<N>) -> bool {
        self.index.contains_key(node)
    }

    /// Copy of every node in the graph.
    pub fn all_nodes(&self) -> HashSet<Node<N>> {
        self.index.keys().cloned().collect()
    }

    /// Copy of the outgoing edge set of `node`.
    pub fn all_edges(&self, node: &Node<N>) -> Result<HashSet<Edge<N, L>>> {
        let idx = self.node_index(node)?;
        Ok(self.outgoing(idx).collect())
    }

    /// Outgoing edges of `node`, sorted by target and then label.
    pub fn sorted_edges(&self, node: &Node<N>) -> Result<Vec<Edge<N, L>>> {
        let idx = self.node_index(node)?;
        let mut edges: Vec<_> = self.outgoing(idx).collect();
        edges.sort();
        Ok(edges)
    }

    /// Every node reachable from `node` over a single edge.
    pub fn all_children(&self, node: &Node<N>) -> Result<HashSet<Node<N>>> {
        let idx = self.node_index(node)?;
        Ok(self
            .inner
            .edges_directed(idx, Direction::Outgoing)
            .filter_map(|edge_ref| self.inner.node_weight(edge_ref.target()).cloned())
            .collect())
    }

    /// Number of nodes.
    pub fn size(&self) -> usize {
        self.inner.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.node_count() == 0
    }

    /// Number of parallel edges from `from` to `to` (one per distinct label).
    pub fn num_edges(&self, from: &Node<N>, to: &Node<N>) -> Result<usize> {
        let from_idx = self.node_index(from)?;
        let to_idx = self.node_index(to)?;
        Ok(self
            .inner
            .edges_directed(from_idx, Direction::Outgoing)
            .filter(|edge_ref| edge_ref.target() == to_idx)
            .count())
    }

    /// Total number of edges across the whole graph.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Drop every node and edge.
    pub fn clear(&mut self) {
        self.inner.clear();
        self.index.clear();
        self.edge_index.clear();
        self.debug_check();
    }

    /// Describe the first broken representation invariant, if any.
    pub fn invariant_violation(&self) -> Option<String> {
        if let Some(violation) = self.count_violation() {
            return Some(violation);
        }
        if let Some(violation) = self
            .index
            .iter()
            .find_map(|(node, &idx)| self.node_violation(node, idx))
        {
            return Some(violation);
        }
        // with equal counts, every stored edge owning its own entry rules
        // out duplicates and stale entries
        self.inner.edge_indices().find_map(|edge_idx| {
            let (from, to) = self.inner.edge_endpoints(edge_idx)?;
            let label = self.inner.edge_weight(edge_idx)?.clone();
            let key = (from, to, label);
            (self.edge_index.get(&key) != Some(&edge_idx))
                .then(|| format!("edge {:?} is missing from the edge index", key.2))
        })
    }

    fn count_violation(&self) -> Option<String> {
        if self.index.len() != self.inner.node_count() {
            return Some(format!(
                "index holds {} nodes but graph holds {}",
                self.index.len(),
                self.inner.node_count()
            ));
        }
        if self.edge_index.len() != self.inner.edge_count() {
            return Some(format!(
                "edge index holds {} edges but graph holds {}",
                self.edge_index.len(),
                self.inner.edge_count()
            ));
        }
        None
    }

    fn node_violation(&self, node: &Node<N>, idx: NodeIndex) -> Option<String> {
        (self.inner.node_weight(idx) != Some(node))
            .then(|| format!("index entry for {:?} is stale", node))
    }

    fn debug_check(&self) {
        debug_assert!(
            self.invariant_violation().is_none(),
            "graph invariant broken: {:?}",
            self.invariant_violation()
        );
    }

    // Constant-time checks for mutations that touch a single element.
    fn debug_check_node(&self, idx: NodeIndex) {
        if cfg!(debug_assertions) {
            let violation = self.count_violation().or_else(|| {
                let Some(node) = self.inner.node_weight(idx) else {
                    return Some(format!("node slot {:?} is empty", idx));
                };
                match self.index.get(node) {
                    Some(&found) if found == idx => None,
                    _ => Some(format!("node {:?} is not indexed", node)),
                }
            });
            debug_assert!(violation.is_none(), "graph invariant broken: {:?}", violation);
        }
    }

    // `stored` is the edge expected under `key`, or `None` after removal.
    // Runs before the index is updated on insert, so counts are compared
    // against the pending state.
    fn debug_check_edge(&self, key: &(NodeIndex, NodeIndex, L), stored: Option<EdgeIndex>) {
        if cfg!(debug_assertions) {
            let pending = usize::from(stored.is_some() && !self.edge_index.contains_key(key));
            let violation = if self.edge_index.len() + pending != self.inner.edge_count() {
                Some("edge index and graph edge counts differ".to_string())
            } else {
                match stored {
                    Some(edge_idx) => {
                        let endpoints = self.inner.edge_endpoints(edge_idx);
                        let label = self.inner.edge_weight(edge_idx);
                        (endpoints != Some((key.0, key.1)) || label != Some(&key.2))
                            .then(|| format!("edge {:?} stored with wrong endpoints", key.2))
                    }
                    None => self
                        .edge_index
                        .contains_key(key)
                        .then(|| format!("removed edge {:?} still indexed", key.2)),
                }
            };
            debug_assert!(violation.is_none(), "graph invariant broken: {:?}", violation);
        }
    }

    fn node_index(&self, node: &Node<N>) -> Result<NodeIndex> {
        self.index
            .get(node)
            .copied()
            .ok_or_else(|| GraphError::unknown_node(node))
    }

    fn outgoing(&self, idx: NodeIndex) -> impl Iterator<Item = Edge<N, L>> + '_ {
        self.inner
            .edges_directed(idx, Direction::Outgoing)
            .filter_map(move |edge_ref| {
                let target = self.inner.node_weight(edge_ref.target())?;
                Some(Edge::new(target.clone(), edge_ref.weight().clone()))
            })
    }
}

impl<N: NodeData, L: EdgeLabel> Default for Graph<N, L> {
    fn default() -> Self {
        Self::new()
    }
}
