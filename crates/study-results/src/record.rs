//! The aggregate-statistics record emitted once per completed study.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use study_core::{Error, Result};
use tracing::{info, warn};

use crate::statistics::{percentage, Summary};

/// Tolerance when checking a percentage against its count.
const PERCENTAGE_TOLERANCE: f64 = 1e-6;

/// Summary of every simulation in one study run.
///
/// Field names serialize in camelCase and form the persisted format; all
/// fields are required and every deserialized record passes
/// [`validate`](Self::validate). Percentages are on a 0–100 scale relative to
/// `sim_count`, and per-problem vectors are index-aligned with
/// `problem_names`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawStudyResultRecord")]
pub struct StudyResultRecord {
    /// Mean epochs needed for the first successful training
    pub avg_initial_training_epochs: f64,
    pub std_initial_training_epochs: f64,
    /// Mean epochs consumed by successful simulations, retries included
    pub avg_total_successful_epochs: f64,
    pub std_total_successful_epochs: f64,
    /// Mean initial-training epochs per problem
    pub avg_initial_epochs_for_each_problem: Vec<f64>,
    pub std_initial_epochs_for_each_problem: Vec<f64>,
    /// Number of simulations summarized
    pub sim_count: usize,
    /// Mean retraining attempts per simulation
    pub avg_retry_count: f64,
    pub std_retry_count: f64,
    /// Simulations that never converged on the first attempt
    pub failed_to_learn_initially_count: usize,
    pub perc_failed_to_learn_initially: f64,
    pub problem_names: Vec<String>,
    /// Configured cap on retraining attempts
    pub max_retrains_allowed: usize,
    /// Simulations that learned but did not retain the initial solution
    pub failed_to_retain_initially_count: usize,
    /// Simulations that exhausted `max_retrains_allowed`
    pub failed_to_retrain_count: usize,
    pub perc_failed_to_retrain: f64,
    /// Mean epochs spent in retraining phases
    pub avg_retraining_epochs: f64,
    #[serde(rename = "stdRetraningEpochs")]
    pub std_retraining_epochs: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStudyResultRecord {
    avg_initial_training_epochs: f64,
    std_initial_training_epochs: f64,
    avg_total_successful_epochs: f64,
    std_total_successful_epochs: f64,
    avg_initial_epochs_for_each_problem: Vec<f64>,
    std_initial_epochs_for_each_problem: Vec<f64>,
    sim_count: usize,
    avg_retry_count: f64,
    std_retry_count: f64,
    failed_to_learn_initially_count: usize,
    perc_failed_to_learn_initially: f64,
    problem_names: Vec<String>,
    max_retrains_allowed: usize,
    failed_to_retain_initially_count: usize,
    failed_to_retrain_count: usize,
    perc_failed_to_retrain: f64,
    avg_retraining_epochs: f64,
    #[serde(rename = "stdRetraningEpochs")]
    std_retraining_epochs: f64,
}

impl TryFrom<RawStudyResultRecord> for StudyResultRecord {
    type Error = Error;

    fn try_from(raw: RawStudyResultRecord) -> Result<Self> {
        let record = Self {
            avg_initial_training_epochs: raw.avg_initial_training_epochs,
            std_initial_training_epochs: raw.std_initial_training_epochs,
            avg_total_successful_epochs: raw.avg_total_successful_epochs,
            std_total_successful_epochs: raw.std_total_successful_epochs,
            avg_initial_epochs_for_each_problem: raw.avg_initial_epochs_for_each_problem,
            std_initial_epochs_for_each_problem: raw.std_initial_epochs_for_each_problem,
            sim_count: raw.sim_count,
            avg_retry_count: raw.avg_retry_count,
            std_retry_count: raw.std_retry_count,
            failed_to_learn_initially_count: raw.failed_to_learn_initially_count,
            perc_failed_to_learn_initially: raw.perc_failed_to_learn_initially,
            problem_names: raw.problem_names,
            max_retrains_allowed: raw.max_retrains_allowed,
            failed_to_retain_initially_count: raw.failed_to_retain_initially_count,
            failed_to_retrain_count: raw.failed_to_retrain_count,
            perc_failed_to_retrain: raw.perc_failed_to_retrain,
            avg_retraining_epochs: raw.avg_retraining_epochs,
            std_retraining_epochs: raw.std_retraining_epochs,
        };

        if let Err(e) = record.validate() {
            warn!("Rejected study result record: {}", e);
            return Err(e);
        }
        Ok(record)
    }
}

impl StudyResultRecord {
    /// Checks every cross-field invariant of the record.
    pub fn validate(&self) -> Result<()> {
        if self.sim_count == 0 {
            return Err(Error::Study("simCount must be greater than 0".to_string()));
        }

        if self.problem_names.is_empty() {
            return Err(Error::Study("problemNames must not be empty".to_string()));
        }
        if self.problem_names.iter().any(|name| name.trim().is_empty()) {
            return Err(Error::Study("problemNames contains an empty name".to_string()));
        }

        let problems = self.problem_names.len();
        for (field, len) in [
            (
                "avgInitialEpochsForEachProblem",
                self.avg_initial_epochs_for_each_problem.len(),
            ),
            (
                "stdInitialEpochsForEachProblem",
                self.std_initial_epochs_for_each_problem.len(),
            ),
        ] {
            if len != problems {
                return Err(Error::Study(format!(
                    "{field} has {len} entries but there are {problems} problems"
                )));
            }
        }

        for (field, count) in [
            ("failedToLearnInitiallyCount", self.failed_to_learn_initially_count),
            ("failedToRetainInitiallyCount", self.failed_to_retain_initially_count),
            ("failedToRetrainCount", self.failed_to_retrain_count),
        ] {
            if count > self.sim_count {
                return Err(Error::Study(format!(
                    "{field} ({count}) exceeds simCount ({})",
                    self.sim_count
                )));
            }
        }

        for (field, perc, count) in [
            (
                "percFailedToLearnInitially",
                self.perc_failed_to_learn_initially,
                self.failed_to_learn_initially_count,
            ),
            (
                "percFailedToRetrain",
                self.perc_failed_to_retrain,
                self.failed_to_retrain_count,
            ),
        ] {
            let expected = percentage(count, self.sim_count);
            if !perc.is_finite() || (perc - expected).abs() > PERCENTAGE_TOLERANCE {
                return Err(Error::Study(format!(
                    "{field} is {perc} but {count}/{} simulations is {expected}",
                    self.sim_count
                )));
            }
        }

        for (field, value) in self.std_devs() {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::Study(format!("{field} is negative or non-finite: {value}")));
            }
        }

        for (field, value) in self.means() {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::Study(format!("{field} is negative or non-finite: {value}")));
            }
        }

        Ok(())
    }

    fn std_devs(&self) -> Vec<(String, f64)> {
        let mut fields = vec![
            ("stdInitialTrainingEpochs".to_string(), self.std_initial_training_epochs),
            ("stdTotalSuccessfulEpochs".to_string(), self.std_total_successful_epochs),
            ("stdRetryCount".to_string(), self.std_retry_count),
            ("stdRetraningEpochs".to_string(), self.std_retraining_epochs),
        ];
        fields.extend(
            self.std_initial_epochs_for_each_problem
                .iter()
                .enumerate()
                .map(|(i, &v)| (format!("stdInitialEpochsForEachProblem[{i}]"), v)),
        );
        fields
    }

    fn means(&self) -> Vec<(String, f64)> {
        let mut fields = vec![
            ("avgInitialTrainingEpochs".to_string(), self.avg_initial_training_epochs),
            ("avgTotalSuccessfulEpochs".to_string(), self.avg_total_successful_epochs),
            ("avgRetryCount".to_string(), self.avg_retry_count),
            ("avgRetrainingEpochs".to_string(), self.avg_retraining_epochs),
        ];
        fields.extend(
            self.avg_initial_epochs_for_each_problem
                .iter()
                .enumerate()
                .map(|(i, &v)| (format!("avgInitialEpochsForEachProblem[{i}]"), v)),
        );
        fields
    }

    /// Per-problem initial-training statistics, paired with the problem name.
    pub fn problems(&self) -> impl Iterator<Item = (&str, Summary)> + '_ {
        self.problem_names
            .iter()
            .zip(&self.avg_initial_epochs_for_each_problem)
            .zip(&self.std_initial_epochs_for_each_problem)
            .map(|((name, &mean), &std_dev)| (name.as_str(), Summary { mean, std_dev }))
    }

    /// Initial-training statistics for one problem.
    pub fn problem_summary(&self, name: &str) -> Option<Summary> {
        self.problems()
            .find(|(problem, _)| *problem == name)
            .map(|(_, summary)| summary)
    }

    /// Serializes a valid record to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        self.validate()?;
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a record from JSON; invalid records are rejected while parsing.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Writes a valid record to `path` as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        fs::write(path, json)?;
        info!("Study results saved to: {}", path.display());
        Ok(())
    }

    /// Reads and validates a record from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
