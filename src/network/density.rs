use crate::error::BayesError;
use rand::Rng;
use serde::Serialize;

const SUM_TOLERANCE: f64 = 1e-6;

/// A discrete probability mass function over a node's states.
///
/// The probabilities are kept twice: in state order for lookups, and sorted
/// ascending by probability together with a running sum for sampling. The
/// permutation back to the original state is retained so a draw always
/// returns a state index, never a sorted position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Density {
    /// probability of each state, indexed by state
    probabilities: Vec<f64>,
    /// states ordered by ascending probability
    sorted_states: Vec<usize>,
    /// running sum of the probabilities in `sorted_states` order
    cumulative: Vec<f64>,
}

impl Density {
    /// Builds a density without validating it.
    ///
    /// Fitted rows for unobserved parent combinations are all NaN and must be
    /// representable, so only manual specification goes through
    /// [`Density::try_new`].
    pub fn new(probabilities: Vec<f64>) -> Self {
        let mut sorted_states: Vec<usize> = (0..probabilities.len()).collect();
        sorted_states.sort_by(|&a, &b| probabilities[a].total_cmp(&probabilities[b]));

        let mut running = 0.0;
        let cumulative = sorted_states
            .iter()
            .map(|&state| {
                running += probabilities[state];
                running
            })
            .collect();

        Density {
            probabilities,
            sorted_states,
            cumulative,
        }
    }

    /// Builds a density, rejecting empty, negative or non-normalised input.
    pub fn try_new(probabilities: Vec<f64>) -> Result<Self, BayesError> {
        if probabilities.is_empty() {
            return Err(BayesError::InvalidDensity("no states".to_string()));
        }
        if let Some(p) = probabilities.iter().find(|p| !p.is_finite() || **p < 0.0) {
            return Err(BayesError::InvalidDensity(format!(
                "probability {} is not a finite non-negative number",
                p
            )));
        }
        let total: f64 = probabilities.iter().sum();
        if (total - 1.0).abs() > SUM_TOLERANCE {
            return Err(BayesError::InvalidDensity(format!(
                "probabilities sum to {}, expected 1",
                total
            )));
        }
        Ok(Density::new(probabilities))
    }

    /// Empirical distribution from per-state counts. A zero total gives a NaN row.
    pub fn from_counts(counts: &[usize]) -> Self {
        let total: usize = counts.iter().sum();
        let total = total as f64;
        Density::new(counts.iter().map(|&c| c as f64 / total).collect())
    }

    /// Number of states this density covers.
    pub fn states(&self) -> usize {
        self.probabilities.len()
    }

    /// Probability of `state`; zero for states outside the domain.
    pub fn probability(&self, state: usize) -> f64 {
        self.probabilities.get(state).copied().unwrap_or(0.0)
    }

    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// True when any entry is NaN, i.e. the row was fitted from no data.
    pub fn is_undefined(&self) -> bool {
        self.probabilities.iter().any(|p| p.is_nan())
    }

    /// The state with the highest probability (lowest state wins ties).
    pub fn most_likely_state(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (state, &p) in self.probabilities.iter().enumerate() {
            if p.is_nan() {
                continue;
            }
            match best {
                Some((_, bp)) if bp >= p => {}
                _ => best = Some((state, p)),
            }
        }
        best.map(|(state, _)| state)
    }

    /// Draws a state.
    ///
    /// A uniform value in `[0, 1)` is located in the cumulative array by binary
    /// search (first running sum above the draw) and mapped back through the
    /// sort permutation, so zero-probability states are never returned.
    /// Rounding can leave the final running sum slightly below the draw; that
    /// lands on the most probable state.
    ///
    /// An undefined (NaN) row has no meaningful draw; callers check
    /// [`Density::is_undefined`] first.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let u: f64 = rng.r#gen::<f64>();
        let position = self.cumulative.partition_point(|&c| c <= u);
        let position = position.min(self.sorted_states.len().saturating_sub(1));
        self.sorted_states[position]
    }
}
