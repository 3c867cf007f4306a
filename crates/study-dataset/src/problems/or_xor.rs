//! The Or/Xor single problem: every corner of the 3-bit bipolar cube.

use super::TrainingSetFactory;
use crate::data::{TrainingData, TrainingSet};
use study_core::Result;

/// Name reported for the Or/Xor single problem
pub const OR_XOR_SINGLE_PROBLEM: &str = "Or/Xor single problem";

/// Cube corners counting in binary from all `-1`, first coordinate most significant.
const INPUTS: [[f64; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, 1.0, 1.0],
    [1.0, -1.0, -1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, -1.0],
    [1.0, 1.0, 1.0],
];

const OUTPUTS: [f64; 8] = [-0.9, 0.9, 0.9, 0.9, -0.9, 0.9, 0.9, -0.9];

/// Builds the Or/Xor single problem training set.
pub fn or_xor_single_problem() -> TrainingSet {
    let inputs = INPUTS.iter().map(|row| row.to_vec()).collect();
    let data = TrainingData::new_unchecked(inputs, OUTPUTS.to_vec());
    TrainingSet::new_unchecked(data, OR_XOR_SINGLE_PROBLEM)
}

/// Factory handle for [`or_xor_single_problem`]
#[derive(Debug, Clone, Copy, Default)]
pub struct OrXorSingleProblem;

impl TrainingSetFactory for OrXorSingleProblem {
    fn name(&self) -> &str {
        OR_XOR_SINGLE_PROBLEM
    }

    fn build(&self) -> Result<TrainingSet> {
        Ok(or_xor_single_problem())
    }
}
