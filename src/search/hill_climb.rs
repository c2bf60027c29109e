//! Stochastic hill climbing over fixed-length bit genomes.
//!
//! Knows nothing about networks: callers supply a score and a validity
//! predicate through [`Objective`].

use log::{debug, info};
use rand::Rng;

/// What the optimizer needs from a problem.
///
/// Both methods take `&mut self` because implementations are free to mutate
/// shared state (e.g. rewire a network) to answer. The optimizer never calls
/// them concurrently.
pub trait Objective {
    fn score(&mut self, genome: &[bool]) -> f64;

    /// Whether `genome` may be proposed at all. Invalid genomes are never scored.
    fn is_valid(&mut self, genome: &[bool]) -> bool;
}

/// [`Objective`] built from a score closure and a validity closure.
pub struct FnObjective<S, V> {
    score: S,
    is_valid: V,
}

impl<S, V> FnObjective<S, V>
where
    S: FnMut(&[bool]) -> f64,
    V: FnMut(&[bool]) -> bool,
{
    pub fn new(score: S, is_valid: V) -> Self {
        FnObjective { score, is_valid }
    }
}

impl<S, V> Objective for FnObjective<S, V>
where
    S: FnMut(&[bool]) -> f64,
    V: FnMut(&[bool]) -> bool,
{
    fn score(&mut self, genome: &[bool]) -> f64 {
        (self.score)(genome)
    }

    fn is_valid(&mut self, genome: &[bool]) -> bool {
        (self.is_valid)(genome)
    }
}

/// Hill-climbs for `iterations` steps and returns the best genome seen.
///
/// Starts from a mutation of the all-zero genome. Each step mutates a copy of
/// the current best and keeps it only if it strictly improves the score
/// (lower when `minimize`, higher otherwise). A NaN incumbent is beaten by any
/// number; a NaN candidate never wins.
pub fn evolve<O, R>(objective: &mut O, genome_size: usize, iterations: usize, minimize: bool, rng: &mut R) -> Vec<bool>
where
    O: Objective + ?Sized,
    R: Rng + ?Sized,
{
    if genome_size == 0 {
        return Vec::new();
    }
    let mut best = mutate(&vec![false; genome_size], objective, rng);
    let mut best_score = objective.score(&best);
    debug!("evolve - initial score {}", best_score);

    for iteration in 0..iterations {
        let child = mutate(&best, objective, rng);
        let score = objective.score(&child);
        if improves(score, best_score, minimize) {
            debug!("evolve - iteration {}: score {} -> {}", iteration, best_score, score);
            best = child;
            best_score = score;
        }
    }
    info!("evolve - finished {} iterations with score {}", iterations, best_score);
    best
}

fn improves(candidate: f64, incumbent: f64, minimize: bool) -> bool {
    if candidate.is_nan() {
        return false;
    }
    if incumbent.is_nan() {
        return true;
    }
    if minimize {
        candidate < incumbent
    } else {
        candidate > incumbent
    }
}

/// Flips a random subset of positions of `individual`, one at a time.
///
/// The subset size is uniform in `[0, len)`. A flip is kept only when the
/// genome it produces passes [`Objective::is_valid`], so the result is valid
/// whenever `individual` is.
pub fn mutate<O, R>(individual: &[bool], objective: &mut O, rng: &mut R) -> Vec<bool>
where
    O: Objective + ?Sized,
    R: Rng + ?Sized,
{
    let mut candidate = individual.to_vec();
    if candidate.is_empty() {
        return candidate;
    }
    let flips = rng.gen_range(0..candidate.len());
    for position in rand::seq::index::sample(rng, candidate.len(), flips) {
        let mut check = candidate.clone();
        check[position] = !check[position];
        if objective.is_valid(&check) {
            candidate = check;
        }
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_improves() {
        assert!(improves(1.0, 2.0, true));
        assert!(!improves(2.0, 2.0, true));
        assert!(improves(3.0, 2.0, false));
        assert!(improves(f64::NEG_INFINITY, f64::NAN, false));
        assert!(!improves(f64::NAN, f64::NEG_INFINITY, false));
        assert!(improves(-10.0, f64::NEG_INFINITY, false));
    }

    #[test]
    fn test_mutate_respects_validity() {
        let mut rng = StdRng::seed_from_u64(4);
        // only genomes with at most one set bit are valid
        let mut objective = FnObjective::new(|_: &[bool]| 0.0, |g: &[bool]| g.iter().filter(|b| **b).count() <= 1);
        for _ in 0..100 {
            let child = mutate(&[false; 6], &mut objective, &mut rng);
            assert!(child.iter().filter(|b| **b).count() <= 1);
        }
    }

    #[test]
    fn test_empty_genome() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut objective = FnObjective::new(|_: &[bool]| 0.0, |_: &[bool]| true);
        assert!(evolve(&mut objective, 0, 10, true, &mut rng).is_empty());
    }
}
