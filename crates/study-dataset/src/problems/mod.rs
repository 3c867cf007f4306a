//! Problem factories.
//!
//! A problem is a pure, deterministic function that builds one bipolar
//! [`TrainingSet`]. New problems implement [`TrainingSetFactory`] and are
//! registered with the [`ProblemCatalog`](crate::ProblemCatalog).

pub mod or_xor;

pub use or_xor::{or_xor_single_problem, OrXorSingleProblem, OR_XOR_SINGLE_PROBLEM};

use crate::data::TrainingSet;
use study_core::Result;

/// Builds the training set for one problem.
///
/// Implementations take no external state and must return equal datasets on
/// every call; the catalog caches the first result by [`name`](Self::name).
pub trait TrainingSetFactory: Send + Sync {
    /// Name of the training set this factory builds
    fn name(&self) -> &str;

    /// Builds the training set
    fn build(&self) -> Result<TrainingSet>;
}
