use super::density::Density;
use super::index::{cpd_index, cpd_length, parent_combinations};
use super::node::{Node, NodeId};
use crate::error::BayesError;
use log::{debug, trace};
use std::collections::{HashMap, HashSet};

/// State assignment keyed by node handle. A full sample covers every node;
/// evidence and training rows may cover a subset.
pub type Observation = HashMap<NodeId, usize>;

/// A discrete Bayesian network.
///
/// Nodes are owned by an arena and addressed by [`NodeId`]. `order` is the
/// sequence the sampling and likelihood code walks; it must be topological
/// for those operations and is not re-sorted automatically after the
/// topology changes.
#[derive(Debug, Clone, Default)]
pub struct BayesianNetwork {
    pub(crate) nodes: Vec<Node>,
    pub(crate) order: Vec<NodeId>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnPath,
    Done,
}

impl BayesianNetwork {
    /// Creates an empty network
    pub fn new() -> Self {
        BayesianNetwork::default()
    }

    /// Adds a node with `states` states and appends it to the order.
    ///
    /// A node needs at least one state.
    pub fn add_node(&mut self, name: &str, states: usize) -> Result<NodeId, BayesError> {
        if states == 0 {
            return Err(BayesError::InvalidStateCount(name.to_string()));
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(name, states));
        self.order.push(id);
        trace!("add_node - {} '{}' with {} states", id, name, states);
        Ok(id)
    }

    /// Adds a directed edge `parent -> child`. Repeating an existing edge is a no-op.
    ///
    /// The child's CPD is not resized; refit or call [`BayesianNetwork::set_cpd`]
    /// afterwards.
    pub fn add_edge(&mut self, parent: NodeId, child: NodeId) -> Result<(), BayesError> {
        self.check(parent)?;
        self.check(child)?;
        if self.nodes[child.0].parents.contains(&parent) {
            return Ok(());
        }
        self.nodes[child.0].parents.push(parent);
        self.nodes[parent.0].children.push(child);
        Ok(())
    }

    pub fn node(&self, id: NodeId) -> Result<&Node, BayesError> {
        self.nodes.get(id.0).ok_or(BayesError::UnknownNode(id))
    }

    /// First node carrying `name`, in arena order.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.name == name).map(NodeId)
    }

    /// Current node order.
    pub fn order(&self) -> &[NodeId] {
        &self.order
    }

    /// Replaces the node order. Every handle must belong to this network.
    pub fn set_order(&mut self, order: Vec<NodeId>) -> Result<(), BayesError> {
        for &id in &order {
            self.check(id)?;
        }
        self.order = order;
        Ok(())
    }

    /// Every node handle in the arena, whether or not it is in the order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Number of nodes in the order.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// All edges as `(parent, child)` pairs.
    pub fn edges(&self) -> Vec<(NodeId, NodeId)> {
        self.node_ids()
            .flat_map(|id| self.nodes[id.0].children.iter().map(move |&c| (id, c)))
            .collect()
    }

    pub fn set_states(&mut self, id: NodeId, states: usize) -> Result<(), BayesError> {
        self.check(id)?;
        if states == 0 {
            return Err(BayesError::InvalidStateCount(self.nodes[id.0].name.clone()));
        }
        self.nodes[id.0].states = states;
        Ok(())
    }

    /// State counts of `id`'s parents, in parent order.
    pub fn parent_radices(&self, id: NodeId) -> Result<Vec<usize>, BayesError> {
        let node = self.node(id)?;
        Ok(node.parents.iter().map(|p| self.nodes[p.0].states).collect())
    }

    /// Installs a full CPD for `id`, one row per parent-state combination.
    pub fn set_cpd(&mut self, id: NodeId, cpd: Vec<Density>) -> Result<(), BayesError> {
        let expected = cpd_length(&self.parent_radices(id)?);
        let node = &self.nodes[id.0];
        if cpd.len() != expected {
            return Err(BayesError::CpdLength {
                name: node.name.clone(),
                expected,
                actual: cpd.len(),
            });
        }
        if let Some(row) = cpd.iter().find(|d| d.states() != node.states) {
            return Err(BayesError::DensityWidth {
                name: node.name.clone(),
                expected: node.states,
                actual: row.states(),
            });
        }
        self.nodes[id.0].cpd = cpd;
        Ok(())
    }

    /// CPD row of `id` for the given parent states.
    ///
    /// `None` when `parent_states` does not cover exactly the node's parent
    /// set, or a state is outside its parent's domain.
    pub fn cpd_index(&self, id: NodeId, parent_states: &Observation) -> Option<usize> {
        let node = self.nodes.get(id.0)?;
        if parent_states.len() != node.parents.len() {
            return None;
        }
        let states = node
            .parents
            .iter()
            .map(|p| parent_states.get(p).copied())
            .collect::<Option<Vec<_>>>()?;
        let radices: Vec<usize> = node.parents.iter().map(|p| self.nodes[p.0].states).collect();
        cpd_index(&radices, &states)
    }

    /// Density of `id` selected by the parent states recorded in `observation`.
    pub(crate) fn conditional(&self, id: NodeId, observation: &Observation) -> Result<&Density, BayesError> {
        let node = self.node(id)?;
        let mut radices = Vec::with_capacity(node.parents.len());
        let mut states = Vec::with_capacity(node.parents.len());
        for parent in &node.parents {
            let parent_node = &self.nodes[parent.0];
            let state = observation
                .get(parent)
                .copied()
                .ok_or_else(|| BayesError::MissingState(parent_node.name.clone()))?;
            radices.push(parent_node.states);
            states.push(state);
        }
        cpd_index(&radices, &states)
            .and_then(|row| node.cpd.get(row))
            .ok_or_else(|| BayesError::MissingCpdRow(node.name.clone()))
    }

    /// CPD of `id` paired with the parent assignment each row belongs to.
    pub fn cpd_rows(&self, id: NodeId) -> Result<Vec<(Vec<(NodeId, usize)>, &Density)>, BayesError> {
        let node = self.node(id)?;
        let radices = self.parent_radices(id)?;
        parent_combinations(&radices)
            .map(|combo| {
                let row = cpd_index(&radices, &combo).ok_or_else(|| BayesError::MissingCpdRow(node.name.clone()))?;
                let density = node.cpd.get(row).ok_or_else(|| BayesError::MissingCpdRow(node.name.clone()))?;
                let assignment: Vec<(NodeId, usize)> = node.parents.iter().copied().zip(combo).collect();
                Ok((assignment, density))
            })
            .collect()
    }

    /// Kahn ordering over the nodes currently in the order.
    ///
    /// Returns `true` when cycles remain. The order is overwritten in every
    /// case; nodes that never reach zero unresolved parents (cycle members and
    /// everything downstream of them) are dropped from it. A self-loop is an
    /// edge that can never be resolved.
    pub fn topological_sort(&mut self) -> bool {
        let members: HashSet<NodeId> = self.order.iter().copied().collect();
        let mut remaining: HashMap<NodeId, usize> = HashMap::new();
        let mut ready = Vec::new();
        for &id in &self.order {
            let unresolved = self.nodes[id.0].parents.iter().filter(|p| members.contains(p)).count();
            if unresolved == 0 {
                ready.push(id);
            } else {
                remaining.insert(id, unresolved);
            }
        }

        let mut sorted = Vec::with_capacity(self.order.len());
        while let Some(id) = ready.pop() {
            sorted.push(id);
            for child in &self.nodes[id.0].children {
                if let Some(count) = remaining.get_mut(child) {
                    if *count > 0 {
                        *count -= 1;
                        if *count == 0 {
                            ready.push(*child);
                        }
                    }
                }
            }
        }

        let has_cycles = sorted.len() < self.order.len();
        if has_cycles {
            debug!(
                "topological_sort - {} of {} nodes left unsorted",
                self.order.len() - sorted.len(),
                self.order.len()
            );
        }
        self.order = sorted;
        has_cycles
    }

    /// Depth-first topological ordering (reverse post-order).
    ///
    /// # Panics
    ///
    /// Panics if [`BayesianNetwork::has_cycles`] reports a cycle. Callers that
    /// may hold a cyclic topology must check first or use
    /// [`BayesianNetwork::topological_sort`].
    pub fn topological_sort_dfs(&mut self) {
        if self.has_cycles() {
            panic!("network has cycles, cannot sort it depth-first");
        }
        let mut visited = vec![false; self.nodes.len()];
        let mut post_order = Vec::with_capacity(self.order.len());
        for &id in &self.order {
            self.visit_post_order(id, &mut visited, &mut post_order);
        }
        post_order.reverse();
        self.order = post_order;
    }

    fn visit_post_order(&self, id: NodeId, visited: &mut [bool], post_order: &mut Vec<NodeId>) {
        if visited[id.0] {
            return;
        }
        visited[id.0] = true;
        for &child in &self.nodes[id.0].children {
            self.visit_post_order(child, visited, post_order);
        }
        post_order.push(id);
    }

    /// True when any directed cycle exists, including a self-loop.
    ///
    /// Runs a depth-first traversal from every node; reaching a node that is
    /// still on the current traversal path is a cycle. Nodes whose subtrees
    /// are fully explored are not walked again, so shared descendants are
    /// not mistaken for cycles.
    pub fn has_cycles(&self) -> bool {
        let mut marks = vec![Mark::Unvisited; self.nodes.len()];
        self.node_ids().any(|id| self.visit_for_cycle(id, &mut marks))
    }

    fn visit_for_cycle(&self, id: NodeId, marks: &mut [Mark]) -> bool {
        match marks[id.0] {
            Mark::OnPath => return true,
            Mark::Done => return false,
            Mark::Unvisited => {}
        }
        marks[id.0] = Mark::OnPath;
        for &child in &self.nodes[id.0].children {
            if self.visit_for_cycle(child, marks) {
                return true;
            }
        }
        marks[id.0] = Mark::Done;
        false
    }

    pub(crate) fn check(&self, id: NodeId) -> Result<(), BayesError> {
        if id.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(BayesError::UnknownNode(id))
        }
    }
}
