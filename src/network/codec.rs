//! Topology <-> flattened adjacency bit vector.
//!
//! For an ordering of N nodes the vector has N*N entries; entry `i * N + j`
//! is set when `order[i]` is a parent of `order[j]`. Diagonal entries are
//! self-loops.

use super::graph::BayesianNetwork;
use super::node::NodeId;
use crate::error::BayesError;
use std::collections::HashMap;

impl BayesianNetwork {
    /// Encodes the edges among `node_order` as an adjacency bit vector.
    pub fn to_bits(&self, node_order: &[NodeId]) -> Result<Vec<bool>, BayesError> {
        let n = node_order.len();
        let mut position = HashMap::with_capacity(n);
        for (i, &id) in node_order.iter().enumerate() {
            self.check(id)?;
            position.insert(id, i);
        }

        let mut bits = vec![false; n * n];
        for (i, &id) in node_order.iter().enumerate() {
            for child in &self.nodes[id.0].children {
                if let Some(&j) = position.get(child) {
                    bits[i * n + j] = true;
                }
            }
        }
        Ok(bits)
    }

    /// Rewires the network from an adjacency bit vector over `node_order`.
    ///
    /// Every node loses its parents, children and CPD first, so the bit vector
    /// describes the entire topology afterwards. State counts and the node
    /// order are left alone; CPDs must be refit before sampling.
    pub fn apply_bits(&mut self, node_order: &[NodeId], bits: &[bool]) -> Result<(), BayesError> {
        let n = node_order.len();
        if bits.len() != n * n {
            return Err(BayesError::GenomeLength {
                expected: n * n,
                actual: bits.len(),
            });
        }
        for &id in node_order {
            self.check(id)?;
        }

        for node in &mut self.nodes {
            node.clear_topology();
        }
        for (k, _) in bits.iter().enumerate().filter(|(_, set)| **set) {
            let parent = node_order[k / n];
            let child = node_order[k % n];
            self.nodes[parent.0].children.push(child);
            self.nodes[child.0].parents.push(parent);
        }
        Ok(())
    }
}
