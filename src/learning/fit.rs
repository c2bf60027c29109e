use crate::error::BayesError;
use crate::network::{BayesianNetwork, Density, NodeId, Observation, cpd_index, cpd_length};
use log::{debug, trace};
use rayon::prelude::*;

impl BayesianNetwork {
    /// Maximum-likelihood CPDs for the current topology.
    ///
    /// Sorts the network (Kahn) first and fails with [`BayesError::Cyclic`]
    /// if it is not a DAG. Each row is the empirical state distribution of the
    /// node among observations matching that row's parent states. A row with
    /// no matching observations is left all-NaN. Nodes are fitted in
    /// parallel.
    pub fn fit_cpds(&mut self, observations: &[Observation]) -> Result<(), BayesError> {
        if self.topological_sort() {
            return Err(BayesError::Cyclic);
        }
        let fitted: Vec<(NodeId, Vec<Density>)> = self
            .order
            .par_iter()
            .map(|&id| self.fit_node(id, observations).map(|cpd| (id, cpd)))
            .collect::<Result<_, BayesError>>()?;
        for (id, cpd) in fitted {
            self.nodes[id.0].cpd = cpd;
        }
        Ok(())
    }

    fn fit_node(&self, id: NodeId, observations: &[Observation]) -> Result<Vec<Density>, BayesError> {
        let node = &self.nodes[id.0];
        let radices = self.parent_radices(id)?;
        let mut counts = vec![vec![0usize; node.states]; cpd_length(&radices)];

        let mut parent_states = Vec::with_capacity(radices.len());
        for observation in observations {
            parent_states.clear();
            for &parent in &node.parents {
                parent_states.push(self.observed_state(parent, observation)?);
            }
            let state = self.observed_state(id, observation)?;
            // states are range-checked above, so the row always exists
            if let Some(row) = cpd_index(&radices, &parent_states) {
                counts[row][state] += 1;
            }
        }

        let cpd: Vec<Density> = counts.iter().map(|c| Density::from_counts(c)).collect();
        let undefined = cpd.iter().filter(|d| d.is_undefined()).count();
        debug!(
            "fit_node - '{}' with {} parents: {} rows, {} without data",
            node.name,
            node.parents.len(),
            cpd.len(),
            undefined
        );
        trace!("fit_node - '{}' cpd {:?}", node.name, cpd);
        Ok(cpd)
    }

    fn observed_state(&self, id: NodeId, observation: &Observation) -> Result<usize, BayesError> {
        let node = &self.nodes[id.0];
        let state = observation
            .get(&id)
            .copied()
            .ok_or_else(|| BayesError::MissingState(node.name.clone()))?;
        if state >= node.states {
            return Err(BayesError::StateOutOfRange {
                name: node.name.clone(),
                state,
                states: node.states,
            });
        }
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_per_parent_row() {
        let mut network = BayesianNetwork::new();
        let a = network.add_node("A", 2).unwrap();
        let b = network.add_node("B", 2).unwrap();
        network.add_edge(a, b).unwrap();

        let observations = vec![
            Observation::from([(a, 0), (b, 0)]),
            Observation::from([(a, 0), (b, 1)]),
            Observation::from([(a, 0), (b, 1)]),
            Observation::from([(a, 1), (b, 1)]),
        ];
        network.fit_cpds(&observations).unwrap();

        assert_eq!(network.node(a).unwrap().cpd()[0].probabilities(), &[0.75, 0.25]);
        let rows = network.node(b).unwrap().cpd();
        assert!((rows[0].probability(1) - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(rows[1].probabilities(), &[0.0, 1.0]);
    }

    #[test]
    fn test_unobserved_parent_row_is_nan() {
        let mut network = BayesianNetwork::new();
        let a = network.add_node("A", 3).unwrap();
        let b = network.add_node("B", 2).unwrap();
        network.add_edge(a, b).unwrap();

        let observations = vec![Observation::from([(a, 0), (b, 1)]), Observation::from([(a, 1), (b, 0)])];
        network.fit_cpds(&observations).unwrap();

        let rows = network.node(b).unwrap().cpd();
        assert_eq!(rows.len(), 3);
        assert!(!rows[0].is_undefined());
        assert!(rows[2].is_undefined());
    }

    #[test]
    fn test_cyclic_topology_rejected() {
        let mut network = BayesianNetwork::new();
        let a = network.add_node("A", 2).unwrap();
        let b = network.add_node("B", 2).unwrap();
        network.add_edge(a, b).unwrap();
        network.add_edge(b, a).unwrap();
        let observations = vec![Observation::from([(a, 0), (b, 1)])];
        assert!(matches!(network.fit_cpds(&observations), Err(BayesError::Cyclic)));
    }

    #[test]
    fn test_out_of_range_state_rejected() {
        let mut network = BayesianNetwork::new();
        let a = network.add_node("A", 2).unwrap();
        let observations = vec![Observation::from([(a, 2)])];
        assert!(matches!(
            network.fit_cpds(&observations),
            Err(BayesError::StateOutOfRange { state: 2, states: 2, .. })
        ));
    }
}
