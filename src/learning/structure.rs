use super::SearchConfig;
use crate::error::BayesError;
use crate::network::{BayesianNetwork, NodeId, Observation};
use crate::search::{Objective, evolve};
use log::{info, warn};
use rand::Rng;

/// Scores candidate topologies of one network against a dataset.
///
/// Every call to [`Objective::score`] or [`Objective::is_valid`] rewires the
/// borrowed network in place, so after a search the network holds whatever
/// candidate was evaluated last. Call [`StructureSearch::finish`] with the
/// winning genome to leave it in that configuration.
///
/// Candidates are scored on the same data the CPDs are fitted on; there is
/// no held-out split.
pub struct StructureSearch<'a> {
    network: &'a mut BayesianNetwork,
    node_order: Vec<NodeId>,
    observations: &'a [Observation],
    evaluations: usize,
}

impl<'a> StructureSearch<'a> {
    /// Prepares a search over the nodes present in the first observation.
    pub fn new(network: &'a mut BayesianNetwork, observations: &'a [Observation]) -> Result<Self, BayesError> {
        let first = observations.first().ok_or(BayesError::EmptyDataset)?;
        let mut node_order: Vec<NodeId> = first.keys().copied().collect();
        node_order.sort();
        network.infer_states(observations)?;

        Ok(StructureSearch {
            network,
            node_order,
            observations,
            evaluations: 0,
        })
    }

    /// Bits the optimizer works on: one per ordered node pair.
    pub fn genome_size(&self) -> usize {
        self.node_order.len() * self.node_order.len()
    }

    /// Node behind each row/column of the adjacency genome.
    pub fn node_order(&self) -> &[NodeId] {
        &self.node_order
    }

    /// Number of candidates scored so far.
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Applies `genome`, refits every CPD and returns the model log-likelihood.
    pub fn evaluate(&mut self, genome: &[bool]) -> Result<f64, BayesError> {
        self.network.apply_bits(&self.node_order, genome)?;
        self.network.infer_states(self.observations)?;
        self.network.fit_cpds(self.observations)?;
        self.network.model_log_likelihood(self.observations)
    }

    /// Re-applies `genome` and refits, leaving the network ready for queries.
    pub fn finish(self, genome: &[bool]) -> Result<(), BayesError> {
        self.network.apply_bits(&self.node_order, genome)?;
        self.network.infer_states(self.observations)?;
        self.network.fit_cpds(self.observations)
    }
}

impl Objective for StructureSearch<'_> {
    /// Log-likelihood of the candidate. A candidate that cannot be fitted
    /// scores `-inf`.
    fn score(&mut self, genome: &[bool]) -> f64 {
        self.evaluations += 1;
        match self.evaluate(genome) {
            Ok(score) => score,
            Err(e) => {
                warn!("score - candidate {} rejected: {}", self.evaluations, e);
                f64::NEG_INFINITY
            }
        }
    }

    /// A candidate is valid when its decoded topology is acyclic.
    fn is_valid(&mut self, genome: &[bool]) -> bool {
        match self.network.apply_bits(&self.node_order, genome) {
            Ok(()) => !self.network.has_cycles(),
            Err(e) => {
                warn!("is_valid - {}", e);
                false
            }
        }
    }
}

/// Learns a topology for `network` from `observations` and fits its CPDs.
///
/// The state count of every observed node is inferred from the data, the
/// adjacency genome is hill-climbed to maximise model log-likelihood with
/// cyclic candidates rejected, and the winner is applied and refitted.
/// Returns the winning genome over the nodes of the first observation in
/// ascending handle order.
pub fn learn_structure<R: Rng + ?Sized>(
    network: &mut BayesianNetwork,
    observations: &[Observation],
    config: &SearchConfig,
    rng: &mut R,
) -> Result<Vec<bool>, BayesError> {
    let mut search = StructureSearch::new(network, observations)?;
    let genome_size = search.genome_size();
    info!(
        "learn_structure - {} nodes, {} observations, {} iterations",
        search.node_order().len(),
        observations.len(),
        config.iterations
    );

    let best = evolve(&mut search, genome_size, config.iterations, false, rng);
    info!("learn_structure - scored {} candidates", search.evaluations());
    search.finish(&best)?;
    Ok(best)
}
