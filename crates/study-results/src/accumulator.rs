//! Folds trial reports into a single [`StudyResultRecord`].

use study_core::{Error, Result, StudyConfig};
use tracing::{debug, info};

use crate::record::StudyResultRecord;
use crate::statistics::{percentage, Summary};
use crate::trial::{TrialOutcome, TrialReport};

/// Collects every simulation of a study and summarizes them once the study
/// has finished.
///
/// Statistics are computed from the full set of reports in [`finish`](Self::finish),
/// so the order in which reports are recorded or accumulators merged does not
/// change the result.
#[derive(Debug, Clone)]
pub struct StudyAccumulator {
    problem_names: Vec<String>,
    max_retrains_allowed: usize,
    expected_sim_count: Option<usize>,
    trials: Vec<TrialReport>,
}

impl StudyAccumulator {
    /// Creates an accumulator for the given problems and retrain cap.
    pub fn new(problem_names: Vec<String>, max_retrains_allowed: usize) -> Result<Self> {
        if problem_names.is_empty() {
            return Err(Error::InvalidArgument(
                "a study needs at least one problem".to_string(),
            ));
        }

        Ok(Self {
            problem_names,
            max_retrains_allowed,
            expected_sim_count: None,
            trials: Vec::new(),
        })
    }

    /// Creates an accumulator that also expects exactly `config.sim_count` reports.
    pub fn from_config(config: &StudyConfig) -> Result<Self> {
        config.validate()?;
        let mut accumulator = Self::new(config.problems.clone(), config.max_retrains_allowed)?;
        accumulator.expected_sim_count = Some(config.sim_count);
        Ok(accumulator)
    }

    /// Adds one simulation after checking it against the study shape.
    pub fn record(&mut self, report: TrialReport) -> Result<()> {
        report.check(self.problem_names.len(), self.max_retrains_allowed)?;
        debug!(
            "Trial {} finished: {}",
            self.trials.len() + 1,
            report.outcome()
        );
        self.trials.push(report);
        Ok(())
    }

    /// Adds several simulations, stopping at the first inconsistent one.
    pub fn record_all<I>(&mut self, reports: I) -> Result<()>
    where
        I: IntoIterator<Item = TrialReport>,
    {
        for report in reports {
            self.record(report)?;
        }
        Ok(())
    }

    /// Absorbs the reports of an accumulator that ran part of the same study.
    pub fn merge(&mut self, other: StudyAccumulator) -> Result<()> {
        if other.problem_names != self.problem_names {
            return Err(Error::InvalidArgument(format!(
                "cannot merge studies over different problems: {:?} vs {:?}",
                self.problem_names, other.problem_names
            )));
        }

        if other.max_retrains_allowed != self.max_retrains_allowed {
            return Err(Error::InvalidArgument(format!(
                "cannot merge studies with different retrain caps: {} vs {}",
                self.max_retrains_allowed, other.max_retrains_allowed
            )));
        }

        self.trials.extend(other.trials);
        Ok(())
    }

    /// Number of simulations recorded so far
    pub fn len(&self) -> usize {
        self.trials.len()
    }

    /// Whether no simulation has been recorded
    pub fn is_empty(&self) -> bool {
        self.trials.is_empty()
    }

    /// Summarizes every recorded simulation.
    ///
    /// Initial-training and retry statistics cover simulations that learned
    /// initially; total successful epochs cover simulations that ended with a
    /// working solution; retraining epochs cover simulations that made at
    /// least one retraining attempt.
    pub fn finish(self) -> Result<StudyResultRecord> {
        if self.trials.is_empty() {
            return Err(Error::Study("no simulations were recorded".to_string()));
        }

        if let Some(expected) = self.expected_sim_count {
            if expected != self.trials.len() {
                return Err(Error::Study(format!(
                    "study expected {} simulations but {} were recorded",
                    expected,
                    self.trials.len()
                )));
            }
        }

        let sim_count = self.trials.len();
        let learned: Vec<&TrialReport> =
            self.trials.iter().filter(|t| t.learned_initially).collect();

        let initial = Summary::of_counts(
            &learned
                .iter()
                .map(|t| t.initial_training_epochs())
                .collect::<Vec<_>>(),
        );

        let per_problem: Vec<Summary> = (0..self.problem_names.len())
            .map(|i| {
                Summary::of_counts(
                    &learned
                        .iter()
                        .map(|t| t.initial_epochs[i])
                        .collect::<Vec<_>>(),
                )
            })
            .collect();

        let retries =
            Summary::of_counts(&learned.iter().map(|t| t.retries()).collect::<Vec<_>>());

        let successful = Summary::of_counts(
            &learned
                .iter()
                .filter(|t| t.is_success())
                .map(|t| t.total_epochs())
                .collect::<Vec<_>>(),
        );

        let retraining = Summary::of_counts(
            &learned
                .iter()
                .filter(|t| t.retries() > 0)
                .map(|t| t.retraining_epoch_total())
                .collect::<Vec<_>>(),
        );

        let failed_to_learn_initially_count = sim_count - learned.len();
        let failed_to_retain_initially_count =
            learned.iter().filter(|t| !t.retained_initially).count();
        let failed_to_retrain_count = learned
            .iter()
            .filter(|t| matches!(t.outcome(), TrialOutcome::FailedToRetrain { .. }))
            .count();

        let record = StudyResultRecord {
            avg_initial_training_epochs: initial.mean,
            std_initial_training_epochs: initial.std_dev,
            avg_total_successful_epochs: successful.mean,
            std_total_successful_epochs: successful.std_dev,
            avg_initial_epochs_for_each_problem: per_problem.iter().map(|s| s.mean).collect(),
            std_initial_epochs_for_each_problem: per_problem.iter().map(|s| s.std_dev).collect(),
            sim_count,
            avg_retry_count: retries.mean,
            std_retry_count: retries.std_dev,
            failed_to_learn_initially_count,
            perc_failed_to_learn_initially: percentage(failed_to_learn_initially_count, sim_count),
            problem_names: self.problem_names,
            max_retrains_allowed: self.max_retrains_allowed,
            failed_to_retain_initially_count,
            failed_to_retrain_count,
            perc_failed_to_retrain: percentage(failed_to_retrain_count, sim_count),
            avg_retraining_epochs: retraining.mean,
            std_retraining_epochs: retraining.std_dev,
        };

        record.validate()?;

        info!(
            "Study finished: {} simulations, {:.1}% failed to learn, {:.1}% failed to retrain",
            record.sim_count, record.perc_failed_to_learn_initially, record.perc_failed_to_retrain
        );

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn or_xor_study() -> StudyAccumulator {
        StudyAccumulator::new(vec!["Or/Xor single problem".to_string()], 3).unwrap()
    }

    fn mixed_reports() -> Vec<TrialReport> {
        vec![
            TrialReport::succeeded(vec![100]),
            TrialReport::succeeded(vec![300]),
            TrialReport::lost(vec![200], vec![50, 30], true),
            TrialReport::lost(vec![200], vec![40, 40, 40], false),
            TrialReport::failed_to_learn(vec![5000]),
        ]
    }

    #[test]
    fn test_finish_mixed_study() {
        let mut study = or_xor_study();
        study.record_all(mixed_reports()).unwrap();
        let record = study.finish().unwrap();

        assert_eq!(record.sim_count, 5);
        assert_eq!(record.max_retrains_allowed, 3);
        assert_eq!(record.problem_names, vec!["Or/Xor single problem".to_string()]);

        // Learned initially: 100, 300, 200, 200
        assert_eq!(record.avg_initial_training_epochs, 200.0);
        assert!((record.std_initial_training_epochs - 5000.0f64.sqrt()).abs() < 1e-9);
        assert_eq!(record.avg_initial_epochs_for_each_problem, vec![200.0]);

        // Retries over learned trials: 0, 0, 2, 3
        assert_eq!(record.avg_retry_count, 1.25);

        // Successful totals: 100, 300, 280
        assert!((record.avg_total_successful_epochs - 680.0 / 3.0).abs() < 1e-9);

        // Retraining totals: 80, 120
        assert_eq!(record.avg_retraining_epochs, 100.0);
        assert_eq!(record.std_retraining_epochs, 20.0);

        assert_eq!(record.failed_to_learn_initially_count, 1);
        assert_eq!(record.perc_failed_to_learn_initially, 20.0);
        assert_eq!(record.failed_to_retain_initially_count, 2);
        assert_eq!(record.failed_to_retrain_count, 1);
        assert_eq!(record.perc_failed_to_retrain, 20.0);
    }

    #[test]
    fn test_per_problem_statistics() {
        let mut study =
            StudyAccumulator::new(vec!["first".to_string(), "second".to_string()], 1).unwrap();
        study.record(TrialReport::succeeded(vec![10, 40])).unwrap();
        study.record(TrialReport::succeeded(vec![30, 40])).unwrap();
        study.record(TrialReport::failed_to_learn(vec![999, 999])).unwrap();

        let record = study.finish().unwrap();
        assert_eq!(record.avg_initial_epochs_for_each_problem, vec![20.0, 40.0]);
        assert_eq!(record.std_initial_epochs_for_each_problem, vec![10.0, 0.0]);
        assert_eq!(record.avg_initial_training_epochs, 60.0);
        assert_eq!(record.problem_summary("second").unwrap().mean, 40.0);
    }

    #[test]
    fn test_order_and_partition_independent() {
        let mut whole = or_xor_study();
        whole.record_all(mixed_reports()).unwrap();
        let expected = whole.finish().unwrap();

        let mut reports = mixed_reports();
        reports.reverse();
        let mut left = or_xor_study();
        let mut right = or_xor_study();
        left.record_all(reports.drain(..2)).unwrap();
        right.record_all(reports).unwrap();
        right.merge(left).unwrap();
        let merged = right.finish().unwrap();

        assert_eq!(merged.sim_count, expected.sim_count);
        assert_eq!(merged.failed_to_retrain_count, expected.failed_to_retrain_count);
        assert!(
            (merged.avg_initial_training_epochs - expected.avg_initial_training_epochs).abs() < 1e-9
        );
        assert!((merged.std_retry_count - expected.std_retry_count).abs() < 1e-9);
        assert!(
            (merged.avg_total_successful_epochs - expected.avg_total_successful_epochs).abs() < 1e-9
        );
    }

    #[test]
    fn test_merge_requires_same_shape() {
        let mut study = or_xor_study();
        let other = StudyAccumulator::new(vec!["Or/Xor single problem".to_string()], 4).unwrap();
        assert!(study.merge(other).is_err());

        let other = StudyAccumulator::new(vec!["Parity".to_string()], 3).unwrap();
        assert!(study.merge(other).is_err());
    }

    #[test]
    fn test_empty_study_rejected() {
        let err = or_xor_study().finish().unwrap_err();
        assert!(matches!(err, Error::Study(_)));
        assert!(StudyAccumulator::new(Vec::new(), 3).is_err());
    }

    #[test]
    fn test_inconsistent_report_rejected() {
        let mut study = or_xor_study();
        assert!(study.record(TrialReport::succeeded(vec![1, 2])).is_err());
        assert!(study
            .record(TrialReport::lost(vec![1], vec![1, 1, 1, 1], true))
            .is_err());
        assert!(study.is_empty());
    }

    #[test]
    fn test_from_config_checks_sim_count() {
        let config = StudyConfig {
            sim_count: 3,
            max_retrains_allowed: 3,
            ..StudyConfig::default()
        };

        let mut short = StudyAccumulator::from_config(&config).unwrap();
        short.record(TrialReport::succeeded(vec![10])).unwrap();
        assert!(short.finish().is_err());

        let mut full = StudyAccumulator::from_config(&config).unwrap();
        full.record_all(mixed_reports().into_iter().take(3)).unwrap();
        assert_eq!(full.len(), 3);
        let record = full.finish().unwrap();
        assert_eq!(record.sim_count, 3);
        assert_eq!(record.failed_to_learn_initially_count, 0);
    }

    #[test]
    fn test_record_round_trips_through_json() {
        let mut study = or_xor_study();
        study.record_all(mixed_reports()).unwrap();
        let record = study.finish().unwrap();

        let restored = StudyResultRecord::from_json(&record.to_json().unwrap()).unwrap();
        assert_eq!(restored, record);
    }

    #[test]
    fn test_uneven_statistics_round_trip_exactly() {
        let mut study = or_xor_study();
        let primes = [3, 7, 11, 13, 17, 19, 23];
        study
            .record_all(primes.map(|epochs| TrialReport::succeeded(vec![epochs])))
            .unwrap();
        study.record(TrialReport::lost(vec![29], vec![31, 37], true)).unwrap();
        study.record(TrialReport::failed_to_learn(vec![41])).unwrap();
        let record = study.finish().unwrap();
        assert!(record.std_initial_training_epochs.fract() != 0.0);

        let restored = StudyResultRecord::from_json(&record.to_json().unwrap()).unwrap();
        assert_eq!(restored, record);
        assert_eq!(
            restored.perc_failed_to_learn_initially.to_bits(),
            record.perc_failed_to_learn_initially.to_bits()
        );
    }
}
