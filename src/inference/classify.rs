use crate::error::BayesError;
use crate::network::{BayesianNetwork, NodeId, Observation};
use log::debug;
use rand::Rng;

/// Outcome of predicting one node from the rest of each observation.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationReport {
    /// `confusion[actual][predicted]`
    pub confusion: Vec<Vec<usize>>,
    /// observations whose evidence no forward sample reproduced, or whose
    /// sampling hit a CPD row fitted from no data
    pub unclassified: usize,
}

impl ClassificationReport {
    /// Fraction of each actual class that was predicted correctly. NaN for a
    /// class that never occurs.
    pub fn recall(&self) -> Vec<f64> {
        self.confusion
            .iter()
            .enumerate()
            .map(|(class, row)| row[class] as f64 / row.iter().sum::<usize>() as f64)
            .collect()
    }

    /// Fraction of classified observations predicted correctly.
    pub fn accuracy(&self) -> f64 {
        let correct: usize = (0..self.confusion.len()).map(|c| self.confusion[c][c]).sum();
        let total: usize = self.confusion.iter().flatten().sum();
        correct as f64 / total as f64
    }
}

/// Predicts `class` for every observation as the argmax of its posterior
/// given all other observed nodes.
pub fn classify<R: Rng + ?Sized>(
    network: &BayesianNetwork,
    class: NodeId,
    observations: &[Observation],
    rng: &mut R,
) -> Result<ClassificationReport, BayesError> {
    let class_node = network.node(class)?;
    let states = class_node.states();
    let mut report = ClassificationReport {
        confusion: vec![vec![0; states]; states],
        unclassified: 0,
    };

    for observation in observations {
        let actual = observation
            .get(&class)
            .copied()
            .ok_or_else(|| BayesError::MissingState(class_node.name().to_string()))?;
        if actual >= states {
            return Err(BayesError::StateOutOfRange {
                name: class_node.name().to_string(),
                state: actual,
                states,
            });
        }
        let evidence: Observation = observation
            .iter()
            .filter(|(id, _)| **id != class)
            .map(|(&id, &state)| (id, state))
            .collect();

        match network.posterior(&[class], &evidence, rng) {
            Ok(posterior) => match posterior.get(&class).and_then(|d| d.most_likely_state()) {
                Some(predicted) => report.confusion[actual][predicted] += 1,
                None => report.unclassified += 1,
            },
            Err(BayesError::NoConsistentSamples | BayesError::UndefinedCpdRow(_)) => report.unclassified += 1,
            Err(e) => return Err(e),
        }
    }
    debug!(
        "classify - {} observations, {} unclassified",
        observations.len(),
        report.unclassified
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::Density;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_deterministic_link_is_classified() {
        let mut network = BayesianNetwork::new();
        let label = network.add_node("label", 2).unwrap();
        let feature = network.add_node("feature", 2).unwrap();
        network.add_edge(label, feature).unwrap();
        network.set_cpd(label, vec![Density::new(vec![0.5, 0.5])]).unwrap();
        network
            .set_cpd(feature, vec![Density::new(vec![1.0, 0.0]), Density::new(vec![0.0, 1.0])])
            .unwrap();

        let observations = vec![
            Observation::from([(label, 0), (feature, 0)]),
            Observation::from([(label, 1), (feature, 1)]),
            Observation::from([(label, 1), (feature, 1)]),
        ];
        let report = classify(&network, label, &observations, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(report.confusion, vec![vec![1, 0], vec![0, 2]]);
        assert_eq!(report.unclassified, 0);
        assert_eq!(report.accuracy(), 1.0);
        assert_eq!(report.recall(), vec![1.0, 1.0]);
    }

    #[test]
    fn test_undefined_rows_leave_observations_unclassified() {
        let mut network = BayesianNetwork::new();
        let label = network.add_node("label", 2).unwrap();
        let feature = network.add_node("feature", 2).unwrap();
        network.add_edge(label, feature).unwrap();

        // label = 1 never occurs, so its feature row is fitted from nothing
        let observations = vec![Observation::from([(label, 0), (feature, 1)]); 4];
        network.fit_cpds(&observations).unwrap();
        network.set_cpd(label, vec![Density::new(vec![0.5, 0.5])]).unwrap();

        let report = classify(&network, label, &observations, &mut StdRng::seed_from_u64(6)).unwrap();
        assert_eq!(report.unclassified, 4);
        assert_eq!(report.confusion, vec![vec![0, 0], vec![0, 0]]);
    }
}
