use super::InferenceConfig;
use crate::error::BayesError;
use crate::network::{BayesianNetwork, Density, NodeId, Observation};
use log::debug;
use rand::Rng;
use std::collections::HashMap;

impl BayesianNetwork {
    /// Approximate posterior of each `query` node given `evidence`, by
    /// rejection (logic) sampling with the default batch size.
    pub fn posterior<R: Rng + ?Sized>(
        &self,
        query: &[NodeId],
        evidence: &Observation,
        rng: &mut R,
    ) -> Result<HashMap<NodeId, Density>, BayesError> {
        self.posterior_with(query, evidence, &InferenceConfig::default(), rng)
    }

    /// Rejection sampling with an explicit batch size.
    ///
    /// Draws `samples_per_node * len()` forward samples, discards every sample
    /// that disagrees with the evidence, and returns the normalised state
    /// counts of each query node over the survivors. When nothing survives
    /// the query fails with [`BayesError::NoConsistentSamples`].
    pub fn posterior_with<R: Rng + ?Sized>(
        &self,
        query: &[NodeId],
        evidence: &Observation,
        config: &InferenceConfig,
        rng: &mut R,
    ) -> Result<HashMap<NodeId, Density>, BayesError> {
        let samples = self.sample_batch(self.order.len() * config.samples_per_node, rng)?;
        let accepted: Vec<&Observation> = samples
            .iter()
            .filter(|sample| evidence.iter().all(|(id, state)| sample.get(id) == Some(state)))
            .collect();
        debug!(
            "posterior - {} of {} samples consistent with {} evidence nodes",
            accepted.len(),
            samples.len(),
            evidence.len()
        );
        if accepted.is_empty() {
            return Err(BayesError::NoConsistentSamples);
        }

        let mut densities = HashMap::with_capacity(query.len());
        for &id in query {
            let node = self.node(id)?;
            let mut counts = vec![0usize; node.states];
            for sample in &accepted {
                let state = sample
                    .get(&id)
                    .copied()
                    .ok_or_else(|| BayesError::MissingState(node.name.clone()))?;
                let slot = counts.get_mut(state).ok_or_else(|| BayesError::StateOutOfRange {
                    name: node.name.clone(),
                    state,
                    states: node.states,
                })?;
                *slot += 1;
            }
            densities.insert(id, Density::from_counts(&counts));
        }
        Ok(densities)
    }
}
