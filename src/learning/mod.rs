pub mod fit;
pub mod states;
pub mod structure;

pub use structure::{StructureSearch, learn_structure};

use serde::Deserialize;

/// Settings for structure learning.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SearchConfig {
    /// hill-climbing steps after the initial candidate
    pub iterations: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig { iterations: 500 }
    }
}
