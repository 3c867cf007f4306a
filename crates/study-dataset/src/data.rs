//! Immutable training data and named training sets.

use serde::{Deserialize, Serialize};
use study_core::{Error, Result};
use tracing::debug;

/// Input rows paired positionally with scalar targets.
///
/// Only constructible through [`TrainingData::new`] (or deserialization, which
/// runs the same checks): at least one row, one target per row, every row the
/// same non-zero arity, every value finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTrainingData")]
pub struct TrainingData {
    inputs: Vec<Vec<f64>>,
    outputs: Vec<f64>,
}

#[derive(Deserialize)]
struct RawTrainingData {
    inputs: Vec<Vec<f64>>,
    outputs: Vec<f64>,
}

impl TryFrom<RawTrainingData> for TrainingData {
    type Error = Error;

    fn try_from(raw: RawTrainingData) -> Result<Self> {
        Self::new(raw.inputs, raw.outputs)
    }
}

impl TrainingData {
    /// Creates training data, checking every invariant up front.
    pub fn new(inputs: Vec<Vec<f64>>, outputs: Vec<f64>) -> Result<Self> {
        Self::check(&inputs, &outputs)?;
        Ok(Self { inputs, outputs })
    }

    /// Wraps constant tables that are known to be valid.
    pub(crate) fn new_unchecked(inputs: Vec<Vec<f64>>, outputs: Vec<f64>) -> Self {
        debug_assert!(Self::check(&inputs, &outputs).is_ok());
        Self { inputs, outputs }
    }

    fn check(inputs: &[Vec<f64>], outputs: &[f64]) -> Result<()> {
        if inputs.is_empty() {
            return Err(Error::Dataset("training data has no rows".to_string()));
        }

        if inputs.len() != outputs.len() {
            return Err(Error::Dataset(format!(
                "{} input rows but {} outputs",
                inputs.len(),
                outputs.len()
            )));
        }

        let arity = inputs[0].len();
        if arity == 0 {
            return Err(Error::Dataset("input rows must not be empty".to_string()));
        }

        for (row, input) in inputs.iter().enumerate() {
            if input.len() != arity {
                return Err(Error::Dataset(format!(
                    "row {} has {} inputs, expected {}",
                    row,
                    input.len(),
                    arity
                )));
            }
            if let Some(value) = input.iter().find(|v| !v.is_finite()) {
                return Err(Error::Dataset(format!("row {row} has a non-finite input: {value}")));
            }
        }

        if let Some((row, value)) = outputs.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(Error::Dataset(format!("row {row} has a non-finite output: {value}")));
        }

        Ok(())
    }

    /// Input rows
    pub fn inputs(&self) -> &[Vec<f64>] {
        &self.inputs
    }

    /// Targets, index-aligned with [`inputs`](Self::inputs)
    pub fn outputs(&self) -> &[f64] {
        &self.outputs
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    /// Whether there are no rows; never true for constructed data
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    /// Number of inputs per row
    pub fn arity(&self) -> usize {
        self.inputs[0].len()
    }

    /// Iterates `(input row, target)` pairs in order.
    pub fn pairs(&self) -> impl Iterator<Item = (&[f64], f64)> + '_ {
        self.inputs
            .iter()
            .map(Vec::as_slice)
            .zip(self.outputs.iter().copied())
    }
}

/// A named, immutable training dataset for one problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTrainingSet")]
pub struct TrainingSet {
    name: String,
    data: TrainingData,
}

#[derive(Deserialize)]
struct RawTrainingSet {
    name: String,
    data: TrainingData,
}

impl TryFrom<RawTrainingSet> for TrainingSet {
    type Error = Error;

    fn try_from(raw: RawTrainingSet) -> Result<Self> {
        Self::new(raw.data, raw.name)
    }
}

impl TrainingSet {
    /// Wraps `data` under a non-blank `name`.
    pub fn new(data: TrainingData, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::Dataset("training set name must not be empty".to_string()));
        }

        debug!(
            "Training set '{}': {} rows of arity {}",
            name,
            data.len(),
            data.arity()
        );

        Ok(Self { name, data })
    }

    /// Names constant data with a name that is known to be non-blank.
    pub(crate) fn new_unchecked(data: TrainingData, name: &str) -> Self {
        debug_assert!(!name.trim().is_empty());
        Self {
            name: name.to_string(),
            data,
        }
    }

    /// Problem name used for reporting and catalog lookup
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The wrapped data
    pub fn data(&self) -> &TrainingData {
        &self.data
    }
}
