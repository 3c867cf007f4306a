//! Aggregate statistics for repeated retention-study trials.
//!
//! The study driver runs many independent simulations, describes each one
//! with a [`TrialReport`], folds them through a [`StudyAccumulator`] and ends
//! up with exactly one validated [`StudyResultRecord`].

pub mod accumulator;
pub mod record;
pub mod statistics;
pub mod trial;

pub use accumulator::StudyAccumulator;
pub use record::StudyResultRecord;
pub use statistics::{percentage, Summary};
pub use trial::{TrialOutcome, TrialReport};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::accumulator::*;
    pub use crate::record::*;
    pub use crate::statistics::*;
    pub use crate::trial::*;
}
