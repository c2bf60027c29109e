use super::density::Density;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable handle of a node inside a [`super::BayesianNetwork`] arena.
///
/// Identity is the handle, never the name: two nodes may share a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A discrete variable with its parent/child links and CPD rows.
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    pub(crate) name: String,
    pub(crate) states: usize,
    pub(crate) parents: Vec<NodeId>,
    pub(crate) children: Vec<NodeId>,
    /// one density per parent-state combination, in `cpd_index` order
    pub(crate) cpd: Vec<Density>,
}

impl Node {
    pub(crate) fn new(name: &str, states: usize) -> Self {
        Node {
            name: name.to_string(),
            states,
            parents: Vec::new(),
            children: Vec::new(),
            cpd: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cardinality of the node's domain; states are `0..states`.
    pub fn states(&self) -> usize {
        self.states
    }

    pub fn parents(&self) -> &[NodeId] {
        &self.parents
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn cpd(&self) -> &[Density] {
        &self.cpd
    }

    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Drops every edge and the CPD; state count is kept.
    pub(crate) fn clear_topology(&mut self) {
        self.parents.clear();
        self.children.clear();
        self.cpd.clear();
    }
}
