use crate::network::NodeId;
use thiserror::Error;

/// Errors raised while building, querying or learning a network.
///
/// Statistical degeneracies that the model should carry forward (NaN rows from
/// unobserved parent combinations, `-inf` log-likelihoods) are not errors and
/// never show up here.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum BayesError {
    /// A handle that does not belong to this network's arena.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    #[error("node '{name}' needs {expected} CPD rows, got {actual}")]
    CpdLength {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("node '{0}' must have at least one state")]
    InvalidStateCount(String),

    #[error("density for node '{name}' has {actual} states, expected {expected}")]
    DensityWidth {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("invalid density: {0}")]
    InvalidDensity(String),

    /// The parent assignment did not select a CPD row (wrong parent set or no fitted CPD).
    #[error("no CPD row for node '{0}' under the given parent states")]
    MissingCpdRow(String),

    /// The selected row was fitted from no data and holds NaN.
    #[error("CPD row for node '{0}' is undefined under the given parent states")]
    UndefinedCpdRow(String),

    #[error("observation has no state for node '{0}'")]
    MissingState(String),

    #[error("state {state} is out of range for node '{name}' with {states} states")]
    StateOutOfRange {
        name: String,
        state: usize,
        states: usize,
    },

    #[error("network topology has cycles")]
    Cyclic,

    #[error("topology bit vector has length {actual}, expected {expected}")]
    GenomeLength { expected: usize, actual: usize },

    #[error("no samples were consistent with the evidence")]
    NoConsistentSamples,

    #[error("dataset is empty")]
    EmptyDataset,

    #[error("dataset row {row} has {actual} values, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("value {value} in column '{feature}' is not a non-negative integer")]
    NonIntegerValue { feature: String, value: f64 },

    #[error("cannot discretize into {0} bins")]
    InvalidBinCount(usize),

    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse dataset: {0}")]
    Json(#[from] serde_json::Error),
}
