//! Per-simulation reports handed from the study driver to the accumulator.

use serde::{Deserialize, Serialize};
use study_core::{Error, Result};

/// How one simulation ended.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TrialOutcome {
    /// Learned every problem and kept the solution
    SucceededFirstTry,
    /// Lost the initial solution and relearned it within the retrain cap
    SucceededAfterRetries { retries: usize },
    /// Never converged during initial training
    FailedToLearnInitially,
    /// Lost the initial solution and no retraining was attempted
    FailedToRetainInitially,
    /// Lost the initial solution and used every allowed retrain without success
    FailedToRetrain { retries: usize },
}

impl std::fmt::Display for TrialOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrialOutcome::SucceededFirstTry => write!(f, "succeeded_first_try"),
            TrialOutcome::SucceededAfterRetries { retries } => {
                write!(f, "succeeded_after_{}_retries", retries)
            }
            TrialOutcome::FailedToLearnInitially => write!(f, "failed_to_learn_initially"),
            TrialOutcome::FailedToRetainInitially => write!(f, "failed_to_retain_initially"),
            TrialOutcome::FailedToRetrain { .. } => write!(f, "failed_to_retrain"),
        }
    }
}

/// What the training procedure observed in one simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialReport {
    /// Epochs spent in initial training, one entry per problem
    pub initial_epochs: Vec<usize>,
    /// Whether initial training converged
    pub learned_initially: bool,
    /// Whether the initial solution survived
    pub retained_initially: bool,
    /// Epochs spent in each retraining attempt
    pub retraining_epochs: Vec<usize>,
    /// Whether the last retraining attempt converged
    pub retrained: bool,
}

impl TrialReport {
    /// Learned every problem first time and retained the solution.
    pub fn succeeded(initial_epochs: Vec<usize>) -> Self {
        Self {
            initial_epochs,
            learned_initially: true,
            retained_initially: true,
            retraining_epochs: Vec::new(),
            retrained: false,
        }
    }

    /// Initial training never converged.
    pub fn failed_to_learn(initial_epochs: Vec<usize>) -> Self {
        Self {
            initial_epochs,
            learned_initially: false,
            retained_initially: false,
            retraining_epochs: Vec::new(),
            retrained: false,
        }
    }

    /// Learned, lost the solution, then went through `retraining_epochs.len()`
    /// retraining attempts.
    pub fn lost(
        initial_epochs: Vec<usize>,
        retraining_epochs: Vec<usize>,
        retrained: bool,
    ) -> Self {
        Self {
            initial_epochs,
            learned_initially: true,
            retained_initially: false,
            retraining_epochs,
            retrained,
        }
    }

    /// Number of retraining attempts
    pub fn retries(&self) -> usize {
        self.retraining_epochs.len()
    }

    /// Epochs of initial training summed over problems
    pub fn initial_training_epochs(&self) -> usize {
        self.initial_epochs.iter().sum()
    }

    /// Epochs summed over every retraining attempt
    pub fn retraining_epoch_total(&self) -> usize {
        self.retraining_epochs.iter().sum()
    }

    /// Initial plus retraining epochs
    pub fn total_epochs(&self) -> usize {
        self.initial_training_epochs() + self.retraining_epoch_total()
    }

    /// Whether the simulation ended with a working solution
    pub fn is_success(&self) -> bool {
        self.learned_initially && (self.retained_initially || self.retrained)
    }

    pub fn outcome(&self) -> TrialOutcome {
        if !self.learned_initially {
            TrialOutcome::FailedToLearnInitially
        } else if self.retained_initially {
            TrialOutcome::SucceededFirstTry
        } else if self.retrained {
            TrialOutcome::SucceededAfterRetries {
                retries: self.retries(),
            }
        } else if self.retraining_epochs.is_empty() {
            TrialOutcome::FailedToRetainInitially
        } else {
            TrialOutcome::FailedToRetrain {
                retries: self.retries(),
            }
        }
    }

    /// Checks the report is consistent with a study over `problems` problems
    /// and a cap of `max_retrains_allowed` retraining attempts.
    pub fn check(&self, problems: usize, max_retrains_allowed: usize) -> Result<()> {
        if self.initial_epochs.len() != problems {
            return Err(Error::Study(format!(
                "trial reports initial epochs for {} problems, expected {}",
                self.initial_epochs.len(),
                problems
            )));
        }

        let retries = self.retries();
        if !self.learned_initially && (self.retained_initially || retries > 0 || self.retrained) {
            return Err(Error::Study(
                "trial that never learned cannot retain or retrain".to_string(),
            ));
        }

        if self.retained_initially && (retries > 0 || self.retrained) {
            return Err(Error::Study(
                "trial that retained its solution cannot have retrained".to_string(),
            ));
        }

        if retries > max_retrains_allowed {
            return Err(Error::Study(format!(
                "trial retrained {retries} times, cap is {max_retrains_allowed}"
            )));
        }

        if self.retrained && retries == 0 {
            return Err(Error::Study(
                "trial marked retrained without any retraining attempt".to_string(),
            ));
        }

        if matches!(self.outcome(), TrialOutcome::FailedToRetrain { .. })
            && retries != max_retrains_allowed
        {
            return Err(Error::Study(format!(
                "failed retraining stopped after {retries} of {max_retrains_allowed} attempts"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcomes() {
        assert_eq!(
            TrialReport::succeeded(vec![300]).outcome(),
            TrialOutcome::SucceededFirstTry
        );
        assert_eq!(
            TrialReport::failed_to_learn(vec![5000]).outcome(),
            TrialOutcome::FailedToLearnInitially
        );
        assert_eq!(
            TrialReport::lost(vec![300], vec![80, 40], true).outcome(),
            TrialOutcome::SucceededAfterRetries { retries: 2 }
        );
        assert_eq!(
            TrialReport::lost(vec![300], vec![], false).outcome(),
            TrialOutcome::FailedToRetainInitially
        );
        assert_eq!(
            TrialReport::lost(vec![300], vec![100, 100, 100], false).outcome(),
            TrialOutcome::FailedToRetrain { retries: 3 }
        );
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(
            TrialOutcome::SucceededAfterRetries { retries: 2 }.to_string(),
            "succeeded_after_2_retries"
        );
        assert_eq!(TrialOutcome::FailedToRetrain { retries: 3 }.to_string(), "failed_to_retrain");
    }

    #[test]
    fn test_epoch_totals() {
        let report = TrialReport::lost(vec![120, 80], vec![30, 20], true);
        assert_eq!(report.initial_training_epochs(), 200);
        assert_eq!(report.retraining_epoch_total(), 50);
        assert_eq!(report.total_epochs(), 250);
        assert_eq!(report.retries(), 2);
        assert!(report.is_success());
        assert!(!TrialReport::failed_to_learn(vec![1, 1]).is_success());
    }

    #[test]
    fn test_check_accepts_consistent_reports() {
        assert!(TrialReport::succeeded(vec![10]).check(1, 3).is_ok());
        assert!(TrialReport::lost(vec![10], vec![5], true).check(1, 3).is_ok());
        assert!(TrialReport::lost(vec![10], vec![5, 5, 5], false).check(1, 3).is_ok());
        assert!(TrialReport::lost(vec![10], vec![], false).check(1, 0).is_ok());
    }

    #[test]
    fn test_check_rejects_inconsistent_reports() {
        assert!(TrialReport::succeeded(vec![10, 20]).check(1, 3).is_err());
        assert!(TrialReport::lost(vec![10], vec![5; 4], true).check(1, 3).is_err());
        assert!(TrialReport::lost(vec![10], vec![5], false).check(1, 3).is_err());
        assert!(TrialReport::lost(vec![10], vec![], true).check(1, 3).is_err());

        let mut never_learned = TrialReport::failed_to_learn(vec![10]);
        never_learned.retained_initially = true;
        assert!(never_learned.check(1, 3).is_err());

        let mut retained = TrialReport::succeeded(vec![10]);
        retained.retraining_epochs.push(4);
        assert!(retained.check(1, 3).is_err());
    }
}
