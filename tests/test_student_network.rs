#[cfg(test)]
mod test_student_network {
    use bayesnet::inference::InferenceConfig;
    use bayesnet::network::parent_combinations;
    use bayesnet::scenarios::StudentNetwork;
    use bayesnet::{BayesianNetwork, NodeId, Observation};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    fn assert_parents_first(network: &BayesianNetwork) {
        let position: HashMap<NodeId, usize> =
            network.order().iter().enumerate().map(|(i, &id)| (id, i)).collect();
        assert_eq!(position.len(), 5);
        for (parent, child) in network.edges() {
            assert!(position[&parent] < position[&child]);
        }
    }

    #[test]
    fn test_both_sorts_order_parents_first() {
        let mut student = StudentNetwork::unsorted().unwrap();
        assert!(!student.network.topological_sort());
        assert_parents_first(&student.network);

        let mut student = StudentNetwork::unsorted().unwrap();
        student.network.topological_sort_dfs();
        assert_parents_first(&student.network);
    }

    #[test]
    fn test_kahn_order_is_stack_based() {
        let student = StudentNetwork::new().unwrap();
        assert_eq!(
            student.network.order(),
            &[student.difficulty, student.intelligence, student.sat, student.grade, student.letter]
        );
    }

    #[test]
    fn test_cpd_index_round_trip() {
        let student = StudentNetwork::new().unwrap();
        let network = &student.network;
        for &id in network.order() {
            let node = network.node(id).unwrap();
            let radices = network.parent_radices(id).unwrap();
            let combos: Vec<Vec<usize>> = parent_combinations(&radices).collect();
            assert_eq!(combos.len(), node.cpd().len());
            for (k, combo) in combos.iter().enumerate() {
                let assignment: Observation = node.parents().iter().copied().zip(combo.iter().copied()).collect();
                assert_eq!(network.cpd_index(id, &assignment), Some(k));
            }
        }
    }

    #[test]
    fn test_grade_rows_follow_intelligence_first() {
        let student = StudentNetwork::new().unwrap();
        let (i, d, g) = (student.intelligence, student.difficulty, student.grade);
        let network = &student.network;
        assert_eq!(network.cpd_index(g, &Observation::from([(i, 0), (d, 0)])), Some(0));
        assert_eq!(network.cpd_index(g, &Observation::from([(i, 1), (d, 0)])), Some(1));
        assert_eq!(network.cpd_index(g, &Observation::from([(i, 0), (d, 1)])), Some(2));
        assert_eq!(network.cpd_index(g, &Observation::from([(i, 1), (d, 1)])), Some(3));
        assert_eq!(network.cpd_index(g, &Observation::from([(i, 1)])), None);
    }

    fn fixed_observations(student: &StudentNetwork) -> Vec<Observation> {
        vec![
            Observation::from([
                (student.difficulty, 0),
                (student.intelligence, 1),
                (student.sat, 1),
                (student.grade, 1),
                (student.letter, 0),
            ]),
            Observation::from([
                (student.difficulty, 1),
                (student.intelligence, 1),
                (student.sat, 1),
                (student.grade, 1),
                (student.letter, 1),
            ]),
        ]
    }

    #[test]
    fn test_likelihood_of_fixed_observations() {
        let student = StudentNetwork::new().unwrap();
        let observations = fixed_observations(&student);

        let likelihood = student.network.likelihood(&observations).unwrap();
        // factors in network order D, I, S, G, L
        assert_eq!(likelihood[0], 0.6 * 0.3 * 0.8 * 0.08 * 0.4);
        assert_eq!(likelihood[1], 0.4 * 0.3 * 0.8 * 0.3 * 0.6);
        assert!((likelihood[0] - 0.004608).abs() < 1e-15);
        assert!((likelihood[1] - 0.01728).abs() < 1e-15);

        let model = student.network.model_log_likelihood(&observations).unwrap();
        assert!((model - -9.438166871194774).abs() < 1e-9);
    }

    #[test]
    fn test_refit_recovers_cpds() {
        let student = StudentNetwork::new().unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let samples = student.network.sample_batch(5000, &mut rng).unwrap();

        let mut refit = student.network.clone();
        refit.fit_cpds(&samples).unwrap();
        for &id in student.network.order() {
            let truth = student.network.node(id).unwrap().cpd();
            let learned = refit.node(id).unwrap().cpd();
            assert_eq!(truth.len(), learned.len());
            for (t, l) in truth.iter().zip(learned) {
                for state in 0..t.states() {
                    let diff = (t.probability(state) - l.probability(state)).abs();
                    assert!(diff < 0.05, "{}: {:?} vs {:?}", refit.node(id).unwrap().name(), t, l);
                }
            }
        }
    }

    #[test]
    fn test_infer_states_from_samples() {
        let student = StudentNetwork::new().unwrap();
        let samples = student.network.sample_batch(1000, &mut StdRng::seed_from_u64(2)).unwrap();

        let mut network = student.network.clone();
        for id in network.node_ids().collect::<Vec<_>>() {
            network.set_states(id, 1).unwrap();
        }
        network.infer_states(&samples).unwrap();
        assert_eq!(network.len(), 5);
        assert_eq!(network.node(student.grade).unwrap().states(), 3);
        assert_eq!(network.node(student.letter).unwrap().states(), 2);
        assert_eq!(network.node(student.intelligence).unwrap().states(), 2);
    }

    #[test]
    fn test_posterior_matches_cpds() {
        let student = StudentNetwork::new().unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let config = InferenceConfig { samples_per_node: 400 };

        let prior = student
            .network
            .posterior_with(&[student.intelligence], &Observation::new(), &config, &mut rng)
            .unwrap();
        assert!((prior[&student.intelligence].probability(0) - 0.7).abs() < 0.1);

        let evidence = Observation::from([(student.difficulty, 0), (student.intelligence, 1)]);
        let posterior = student
            .network
            .posterior_with(&[student.grade], &evidence, &config, &mut rng)
            .unwrap();
        let grade = &posterior[&student.grade];
        for (state, expected) in [0.9, 0.08, 0.02].into_iter().enumerate() {
            assert!((grade.probability(state) - expected).abs() < 0.1);
        }
    }

    #[test]
    fn test_topology_bits_round_trip() {
        let student = StudentNetwork::new().unwrap();
        let order: Vec<NodeId> = student.network.node_ids().collect();
        let bits = student.network.to_bits(&order).unwrap();
        assert_eq!(bits.iter().filter(|b| **b).count(), 4);

        let mut rebuilt = student.network.clone();
        rebuilt.apply_bits(&order, &vec![false; 25]).unwrap();
        assert!(rebuilt.edges().is_empty());
        rebuilt.apply_bits(&order, &bits).unwrap();
        assert_eq!(rebuilt.to_bits(&order).unwrap(), bits);
        assert!(!rebuilt.has_cycles());
    }
}
