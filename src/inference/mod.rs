pub mod classify;
pub mod likelihood;
pub mod posterior;
pub mod sampling;

pub use classify::{ClassificationReport, classify};

use serde::Deserialize;

/// Forward samples drawn per network node for one rejection query.
pub const DEFAULT_SAMPLES_PER_NODE: usize = 100;

/// Settings for rejection-sampling queries.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct InferenceConfig {
    /// batch size is `samples_per_node * node count`
    pub samples_per_node: usize,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        InferenceConfig {
            samples_per_node: DEFAULT_SAMPLES_PER_NODE,
        }
    }
}
