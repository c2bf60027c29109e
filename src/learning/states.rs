use crate::error::BayesError;
use crate::network::{BayesianNetwork, NodeId, Observation};
use log::debug;
use std::collections::BTreeMap;

impl BayesianNetwork {
    /// Sets each observed node's state count to its largest observed state
    /// plus one.
    ///
    /// The order is replaced by exactly the nodes that appear in
    /// `observations`, by ascending handle; topology and CPDs are untouched.
    pub fn infer_states(&mut self, observations: &[Observation]) -> Result<(), BayesError> {
        let mut maxima: BTreeMap<NodeId, usize> = BTreeMap::new();
        for observation in observations {
            for (&id, &state) in observation {
                self.check(id)?;
                let max = maxima.entry(id).or_insert(0);
                *max = (*max).max(state);
            }
        }
        for (&id, &max) in &maxima {
            self.nodes[id.0].states = max + 1;
        }
        self.order = maxima.into_keys().collect();
        debug!("infer_states - {} nodes observed", self.order.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_states_from_maxima() {
        let mut network = BayesianNetwork::new();
        let a = network.add_node("A", 1).unwrap();
        let b = network.add_node("B", 1).unwrap();
        let unused = network.add_node("C", 4).unwrap();
        let observations = vec![
            Observation::from([(a, 0), (b, 2)]),
            Observation::from([(a, 1), (b, 0)]),
        ];
        network.infer_states(&observations).unwrap();

        assert_eq!(network.node(a).unwrap().states(), 2);
        assert_eq!(network.node(b).unwrap().states(), 3);
        assert_eq!(network.node(unused).unwrap().states(), 4);
        assert_eq!(network.order(), &[a, b]);
    }

    #[test]
    fn test_unknown_node_in_data() {
        let mut network = BayesianNetwork::new();
        let mut other = BayesianNetwork::new();
        other.add_node("X", 2).unwrap();
        let foreign = other.add_node("Y", 2).unwrap();
        let observations = vec![Observation::from([(foreign, 1)])];
        assert!(matches!(network.infer_states(&observations), Err(BayesError::UnknownNode(_))));
    }
}
