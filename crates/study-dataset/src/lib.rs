//! Training sets for the retention study.
//!
//! Every problem in the study is a small boolean-style function over a
//! bipolar hypercube. Problems are produced by [`TrainingSetFactory`]
//! implementations and collected in a [`ProblemCatalog`] so the study driver
//! can treat them uniformly.

pub mod catalog;
pub mod data;
pub mod encoding;
pub mod problems;

pub use catalog::ProblemCatalog;
pub use data::{TrainingData, TrainingSet};
pub use encoding::{
    bipolar, bipolar_hypercube, bipolar_target, check_bipolar_encoding, MAX_HYPERCUBE_ARITY,
    TARGET_MARGIN,
};
pub use problems::{
    or_xor_single_problem, OrXorSingleProblem, TrainingSetFactory, OR_XOR_SINGLE_PROBLEM,
};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::catalog::*;
    pub use crate::data::*;
    pub use crate::encoding::*;
    pub use crate::problems::*;
}
