//! Value types stored in the graph: nodes, edges, edge costs, planar points

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};

/// Bounds every node payload must satisfy.
pub trait NodeData: Clone + Eq + Hash + Ord + fmt::Debug {}

impl<T: Clone + Eq + Hash + Ord + fmt::Debug> NodeData for T {}

/// Bounds every edge label must satisfy.
pub trait EdgeLabel: Clone + Eq + Hash + Ord + fmt::Debug {}

impl<T: Clone + Eq + Hash + Ord + fmt::Debug> EdgeLabel for T {}

/// A label that can be read as the cost of traversing its edge.
pub trait Weighted {
    fn cost(&self) -> f64;
}

/// A graph vertex. Two nodes are equal iff their wrapped values are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Node<N>(N);

impl<N> Node<N> {
    pub fn new(data: N) -> Self {
        Node(data)
    }

    /// The application value this node wraps.
    pub fn data(&self) -> &N {
        &self.0
    }

    pub fn into_inner(self) -> N {
        self.0
    }
}

impl<N> From<N> for Node<N> {
    fn from(data: N) -> Self {
        Node(data)
    }
}

impl<N: fmt::Display> fmt::Display for Node<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A directed, labeled edge pointing at its child node.
///
/// Edges compare by `(target, label)`, which is also the order the
/// search and listing code walks them in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge<N, L> {
    // Field order drives the derived `Ord`: target first, then label.
    target: Node<N>,
    label: L,
}

impl<N, L> Edge<N, L> {
    pub fn new(target: Node<N>, label: L) -> Self {
        Edge { target, label }
    }

    /// The child (destination) node of this edge.
    pub fn target(&self) -> &Node<N> {
        &self.target
    }

    pub fn label(&self) -> &L {
        &self.label
    }
}

/// Non-negative, finite edge cost.
///
/// `f64` is neither `Eq` nor `Ord`, so weighted graphs label their edges
/// with this wrapper instead. Equality and hashing use the bit pattern,
/// ordering uses `f64::total_cmp`.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(transparent)]
pub struct Cost(f64);

impl Cost {
    pub const ZERO: Cost = Cost(0.0);

    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() || value < 0.0 {
            return Err(GraphError::InvalidCost(value));
        }
        // -0.0 would hash differently from 0.0
        Ok(Cost(value + 0.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Cost {
    type Error = GraphError;

    fn try_from(value: f64) -> Result<Self> {
        Cost::new(value)
    }
}

impl<'de> Deserialize<'de> for Cost {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Cost::new(value).map_err(serde::de::Error::custom)
    }
}

impl PartialEq for Cost {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for Cost {}

impl Hash for Cost {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl Weighted for Cost {
    fn cost(&self) -> f64 {
        self.0
    }
}

/// A location on the planar campus map.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        // normalize -0.0 so equal points hash equally
        Point { x: x + 0.0, y: y + 0.0 }
    }

    /// Euclidean distance between two points.
    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.x.to_bits() == other.x.to_bits() && self.y.to_bits() == other.y.to_bits()
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.to_bits().hash(state);
        self.y.to_bits().hash(state);
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}
