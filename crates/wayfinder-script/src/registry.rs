//! Named graphs owned by one interpreter session

use std::collections::HashMap;

use wayfinder_core::{EdgeLabel, Graph};

use crate::error::{Result, ScriptError};

/// Graphs keyed by the name a script gave them.
#[derive(Debug)]
pub struct GraphRegistry<L> {
    graphs: HashMap<String, Graph<String, L>>,
}

impl<L: EdgeLabel> GraphRegistry<L> {
    pub fn new() -> Self {
        Self {
            graphs: HashMap::new(),
        }
    }

    /// Store `graph` under `name`, replacing any graph already there.
    pub fn insert(&mut self, name: &str, graph: Graph<String, L>) {
        self.graphs.insert(name.to_string(), graph);
    }

    pub fn get(&self, name: &str) -> Result<&Graph<String, L>> {
        self.graphs
            .get(name)
            .ok_or_else(|| ScriptError::UnknownGraph(name.to_string()))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut Graph<String, L>> {
        self.graphs
            .get_mut(name)
            .ok_or_else(|| ScriptError::UnknownGraph(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }
}

impl<L: EdgeLabel> Default for GraphRegistry<L> {
    fn default() -> Self {
        Self::new()
    }
}
