pub mod codec;
pub mod density;
pub mod graph;
pub mod index;
pub mod node;

pub use density::Density;
pub use graph::{BayesianNetwork, Observation};
pub use index::{cpd_index, cpd_length, parent_combinations};
pub use node::{Node, NodeId};
