pub mod dataset;
pub mod discretize;

pub use dataset::{Dataset, RawDataset};
pub use discretize::discretize;
