//! Bipolar encoding of boolean inputs and targets.

use study_core::{Error, Result};

use crate::data::TrainingData;

/// Magnitude of an encoded target. Stays below 1.0 so a tanh-style output
/// never has to reach its asymptote.
pub const TARGET_MARGIN: f64 = 0.9;

/// Encodes a boolean input coordinate as `1.0` / `-1.0`.
pub fn bipolar(bit: bool) -> f64 {
    if bit {
        1.0
    } else {
        -1.0
    }
}

/// Encodes a boolean label as `0.9` / `-0.9`.
pub fn bipolar_target(label: bool) -> f64 {
    if label {
        TARGET_MARGIN
    } else {
        -TARGET_MARGIN
    }
}

/// Largest arity [`bipolar_hypercube`] will enumerate (about a million corners).
pub const MAX_HYPERCUBE_ARITY: usize = 20;

/// Enumerates every corner of the `arity`-dimensional bipolar hypercube.
///
/// Rows come out in lexicographic order with `-1` before `1` and the first
/// coordinate most significant, i.e. counting in binary from all-`-1`.
/// Arities above [`MAX_HYPERCUBE_ARITY`] are rejected.
pub fn bipolar_hypercube(arity: usize) -> Result<Vec<Vec<f64>>> {
    if arity > MAX_HYPERCUBE_ARITY {
        return Err(Error::InvalidArgument(format!(
            "hypercube arity {arity} exceeds the maximum of {MAX_HYPERCUBE_ARITY}"
        )));
    }

    let corners = 1usize << arity;
    Ok((0..corners)
        .map(|index| {
            (0..arity)
                .map(|position| bipolar((index >> (arity - 1 - position)) & 1 == 1))
                .collect()
        })
        .collect())
}

/// Checks that every input is `±1` and every target is `±TARGET_MARGIN`.
pub fn check_bipolar_encoding(data: &TrainingData) -> Result<()> {
    for (row, (input, target)) in data.pairs().enumerate() {
        if let Some(value) = input.iter().find(|&&v| v != 1.0 && v != -1.0) {
            return Err(Error::Dataset(format!("row {row} has input {value}, expected 1 or -1")));
        }
        if target != TARGET_MARGIN && target != -TARGET_MARGIN {
            return Err(Error::Dataset(format!(
                "row {row} has target {target}, expected {TARGET_MARGIN} or -{TARGET_MARGIN}"
            )));
        }
    }
    Ok(())
}
