//! The "student" network from Koller & Friedman.
//!
//! Difficulty (D) and Intelligence (I) are binary roots, Grade (G) has three
//! states and depends on both, SAT (S) depends on I, Letter (L) on G.

use crate::error::BayesError;
use crate::network::{BayesianNetwork, Density, NodeId};

pub struct StudentNetwork {
    pub network: BayesianNetwork,
    pub intelligence: NodeId,
    pub difficulty: NodeId,
    pub grade: NodeId,
    pub sat: NodeId,
    pub letter: NodeId,
}

impl StudentNetwork {
    /// The network in topological order, ready for sampling.
    pub fn new() -> Result<Self, BayesError> {
        let mut student = Self::unsorted()?;
        student.network.topological_sort();
        Ok(student)
    }

    /// The network with its nodes listed as I, S, L, D, G, which is not a
    /// topological order.
    pub fn unsorted() -> Result<Self, BayesError> {
        let mut network = BayesianNetwork::new();
        let intelligence = network.add_node("I", 2)?;
        let sat = network.add_node("S", 2)?;
        let letter = network.add_node("L", 2)?;
        let difficulty = network.add_node("D", 2)?;
        let grade = network.add_node("G", 3)?;

        network.add_edge(intelligence, grade)?;
        network.add_edge(difficulty, grade)?;
        network.add_edge(intelligence, sat)?;
        network.add_edge(grade, letter)?;

        network.set_cpd(intelligence, vec![Density::try_new(vec![0.7, 0.3])?])?;
        network.set_cpd(difficulty, vec![Density::try_new(vec![0.6, 0.4])?])?;
        // rows for (I, D) = (0,0) (1,0) (0,1) (1,1)
        network.set_cpd(
            grade,
            vec![
                Density::try_new(vec![0.3, 0.4, 0.3])?,
                Density::try_new(vec![0.9, 0.08, 0.02])?,
                Density::try_new(vec![0.05, 0.25, 0.7])?,
                Density::try_new(vec![0.5, 0.3, 0.2])?,
            ],
        )?;
        network.set_cpd(
            sat,
            vec![Density::try_new(vec![0.95, 0.05])?, Density::try_new(vec![0.2, 0.8])?],
        )?;
        network.set_cpd(
            letter,
            vec![
                Density::try_new(vec![0.1, 0.9])?,
                Density::try_new(vec![0.4, 0.6])?,
                Density::try_new(vec![0.99, 0.01])?,
            ],
        )?;

        Ok(StudentNetwork {
            network,
            intelligence,
            difficulty,
            grade,
            sat,
            letter,
        })
    }
}
