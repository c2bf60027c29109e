use crate::error::BayesError;
use crate::network::{BayesianNetwork, Observation};
use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

impl BayesianNetwork {
    /// Draws one full sample by ancestral sampling.
    ///
    /// Walks the current order, which must be topological: each node's
    /// parents have to be drawn before the node itself. Reaching a CPD row
    /// that was fitted from no data fails with
    /// [`BayesError::UndefinedCpdRow`].
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Observation, BayesError> {
        let mut sample = Observation::with_capacity(self.order.len());
        for &id in &self.order {
            let density = self.conditional(id, &sample)?;
            if density.is_undefined() {
                return Err(BayesError::UndefinedCpdRow(self.nodes[id.0].name.clone()));
            }
            sample.insert(id, density.sample(rng));
        }
        Ok(sample)
    }

    /// Draws `count` independent samples across the rayon pool.
    ///
    /// One seed per sample is taken from `rng` up front, so the batch is
    /// reproducible for a seeded `rng` whatever the thread scheduling.
    pub fn sample_batch<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Result<Vec<Observation>, BayesError> {
        trace!("sample_batch - drawing {} samples", count);
        let seeds: Vec<u64> = (0..count).map(|_| rng.r#gen::<u64>()).collect();
        seeds
            .into_par_iter()
            .map(|seed| {
                let mut local = StdRng::seed_from_u64(seed);
                self.sample(&mut local)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::error::BayesError;
    use crate::network::{BayesianNetwork, Density, Observation};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn chain() -> BayesianNetwork {
        let mut network = BayesianNetwork::new();
        let a = network.add_node("A", 2).unwrap();
        let b = network.add_node("B", 2).unwrap();
        network.add_edge(a, b).unwrap();
        network.set_cpd(a, vec![Density::new(vec![0.5, 0.5])]).unwrap();
        network
            .set_cpd(b, vec![Density::new(vec![1.0, 0.0]), Density::new(vec![0.0, 1.0])])
            .unwrap();
        network
    }

    #[test]
    fn test_child_follows_parent() {
        let network = chain();
        let a = network.find("A").unwrap();
        let b = network.find("B").unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let samples = network.sample_batch(200, &mut rng).unwrap();
        assert_eq!(samples.len(), 200);
        for sample in &samples {
            assert_eq!(sample.len(), 2);
            assert_eq!(sample[&a], sample[&b]);
        }
        assert!(samples.iter().any(|s| s[&a] == 0));
        assert!(samples.iter().any(|s| s[&a] == 1));
    }

    #[test]
    fn test_batch_is_reproducible() {
        let network = chain();
        let first = network.sample_batch(50, &mut StdRng::seed_from_u64(5)).unwrap();
        let second = network.sample_batch(50, &mut StdRng::seed_from_u64(5)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_child_before_parent_fails() {
        let mut network = chain();
        let a = network.find("A").unwrap();
        let b = network.find("B").unwrap();
        network.set_order(vec![b, a]).unwrap();
        let result = network.sample(&mut StdRng::seed_from_u64(1));
        assert!(matches!(result, Err(BayesError::MissingState(name)) if name == "A"));
    }

    #[test]
    fn test_unfitted_node_fails() {
        let mut network = BayesianNetwork::new();
        network.add_node("A", 2).unwrap();
        let result = network.sample(&mut StdRng::seed_from_u64(1));
        assert!(matches!(result, Err(BayesError::MissingCpdRow(_))));
    }

    #[test]
    fn test_unobserved_parent_row_fails() {
        let mut network = BayesianNetwork::new();
        let a = network.add_node("A", 2).unwrap();
        let b = network.add_node("B", 2).unwrap();
        network.add_edge(a, b).unwrap();
        let observations = vec![Observation::from([(a, 0), (b, 1)]); 3];
        network.fit_cpds(&observations).unwrap();
        network.set_cpd(a, vec![Density::new(vec![0.0, 1.0])]).unwrap();

        let result = network.sample(&mut StdRng::seed_from_u64(1));
        assert!(matches!(result, Err(BayesError::UndefinedCpdRow(name)) if name == "B"));
    }
}
