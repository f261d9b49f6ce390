//! Errors reported by the graph engine and the search algorithms
//!
//! Every variant is a caller mistake (an invalid argument). A search that
//! simply finds no route is not an error: it returns `Ok(None)`.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// A node argument is not a member of the graph.
    #[error("unknown node: {0}")]
    UnknownNode(String),

    /// The edge is not in the parent node's edge set.
    #[error("unknown edge {edge} from {from}")]
    UnknownEdge { from: String, edge: String },

    /// Edge costs must be finite and non-negative.
    #[error("invalid edge cost {0}: costs must be finite and non-negative")]
    InvalidCost(f64),
}

impl GraphError {
    pub(crate) fn unknown_node(node: &impl std::fmt::Debug) -> Self {
        GraphError::UnknownNode(format!("{:?}", node))
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
