use super::discretize::discretize;
use crate::error::BayesError;
use crate::network::{BayesianNetwork, NodeId, Observation};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Numeric table as read from disk: one named column per feature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDataset {
    pub features: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl RawDataset {
    /// Reads `{ "features": [...], "rows": [[...], ...] }` from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, BayesError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let raw: RawDataset = serde_json::from_str(&text)?;
        info!(
            "Loaded {} rows of {} features from {}",
            raw.rows.len(),
            raw.features.len(),
            path.as_ref().display()
        );
        Ok(raw)
    }

    /// Equal-width bins per column.
    pub fn discretize(&self, bins: usize) -> Result<Dataset, BayesError> {
        Dataset::new(self.features.clone(), discretize(&self.rows, bins)?)
    }

    /// Interprets the values as integer state codes already.
    pub fn to_codes(&self) -> Result<Dataset, BayesError> {
        let mut rows = Vec::with_capacity(self.rows.len());
        for values in &self.rows {
            let mut row = Vec::with_capacity(values.len());
            for (c, &value) in values.iter().enumerate() {
                if value < 0.0 || value.fract() != 0.0 || !value.is_finite() {
                    return Err(BayesError::NonIntegerValue {
                        feature: self.features.get(c).cloned().unwrap_or_default(),
                        value,
                    });
                }
                row.push(value as usize);
            }
            rows.push(row);
        }
        Dataset::new(self.features.clone(), rows)
    }
}

/// Integer-coded observations with one named column per feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    features: Vec<String>,
    rows: Vec<Vec<usize>>,
}

impl Dataset {
    /// Every row must have one value per feature.
    pub fn new(features: Vec<String>, rows: Vec<Vec<usize>>) -> Result<Self, BayesError> {
        for (row, values) in rows.iter().enumerate() {
            if values.len() != features.len() {
                return Err(BayesError::RowWidth {
                    row,
                    expected: features.len(),
                    actual: values.len(),
                });
            }
        }
        Ok(Dataset { features, rows })
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn rows(&self) -> &[Vec<usize>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Adds one node per feature to `network` and converts each row into an
    /// observation keyed by those nodes.
    ///
    /// Each new node gets the column maximum plus one as its state count.
    /// Returns the node handles in feature order alongside the observations.
    pub fn to_observations(&self, network: &mut BayesianNetwork) -> Result<(Vec<NodeId>, Vec<Observation>), BayesError> {
        let nodes = self
            .features
            .iter()
            .enumerate()
            .map(|(c, name)| {
                let states = self.rows.iter().map(|r| r[c] + 1).max().unwrap_or(1);
                network.add_node(name, states)
            })
            .collect::<Result<Vec<NodeId>, BayesError>>()?;

        let observations = self
            .rows
            .iter()
            .map(|row| nodes.iter().copied().zip(row.iter().copied()).collect())
            .collect();
        Ok((nodes, observations))
    }
}
