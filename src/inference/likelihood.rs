use crate::error::BayesError;
use crate::network::{BayesianNetwork, Observation};
use rayon::prelude::*;

impl BayesianNetwork {
    /// Probability the network assigns to one fully specified observation:
    /// the product over nodes of P(state | parent states).
    pub fn observation_likelihood(&self, observation: &Observation) -> Result<f64, BayesError> {
        let mut likelihood = 1.0;
        for &id in &self.order {
            let state = observation
                .get(&id)
                .copied()
                .ok_or_else(|| BayesError::MissingState(self.nodes[id.0].name.clone()))?;
            likelihood *= self.conditional(id, observation)?.probability(state);
        }
        Ok(likelihood)
    }

    /// Likelihood of every observation, computed in parallel. Slot `i` holds
    /// the likelihood of `observations[i]`.
    pub fn likelihood(&self, observations: &[Observation]) -> Result<Vec<f64>, BayesError> {
        observations
            .par_iter()
            .map(|observation| self.observation_likelihood(observation))
            .collect()
    }

    /// Sum of natural-log likelihoods over the dataset.
    ///
    /// A single zero-probability observation makes the result `-inf`; it is
    /// returned as is.
    pub fn model_log_likelihood(&self, observations: &[Observation]) -> Result<f64, BayesError> {
        Ok(self.likelihood(observations)?.iter().map(|l| l.ln()).sum())
    }
}
