#[macro_use]
pub mod common;
pub mod data;
pub mod error;
pub mod inference;
pub mod learning;
pub mod network;
pub mod scenarios;
pub mod search;

pub use data::{Dataset, RawDataset};
pub use error::BayesError;
pub use inference::InferenceConfig;
pub use learning::{SearchConfig, learn_structure};
pub use network::{BayesianNetwork, Density, NodeId, Observation};
