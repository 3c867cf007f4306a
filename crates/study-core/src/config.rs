//! Configuration structures for the retention study.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::{Error, Result};

/// Name of the problem the default study runs on.
pub const DEFAULT_PROBLEM: &str = "Or/Xor single problem";

/// Parameters shared by the study driver and the result aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudyConfig {
    /// Study name, used in logs and output paths
    pub name: String,
    /// Number of independent simulations to run
    pub sim_count: usize,
    /// Cap on retraining attempts per simulation
    pub max_retrains_allowed: usize,
    /// Problem names, in the order their per-problem statistics are reported
    pub problems: Vec<String>,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            name: "retention-study".to_string(),
            sim_count: 100,
            max_retrains_allowed: 5,
            problems: vec![DEFAULT_PROBLEM.to_string()],
        }
    }
}

impl StudyConfig {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Config("Study name must not be empty".to_string()));
        }

        if self.sim_count == 0 {
            return Err(Error::Config("sim_count must be greater than 0".to_string()));
        }

        if self.problems.is_empty() {
            return Err(Error::Config("At least one problem must be configured".to_string()));
        }

        let mut seen = HashSet::new();
        for problem in &self.problems {
            if problem.trim().is_empty() {
                return Err(Error::Config("Problem names must not be empty".to_string()));
            }
            if !seen.insert(problem.as_str()) {
                return Err(Error::Config(format!("Problem listed twice: {problem}")));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_study_config() {
        let config = StudyConfig::default();
        assert_eq!(config.sim_count, 100);
        assert_eq!(config.max_retrains_allowed, 5);
        assert_eq!(config.problems, vec![DEFAULT_PROBLEM.to_string()]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_simulations_rejected() {
        let config = StudyConfig {
            sim_count: 0,
            ..StudyConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("sim_count"));
    }

    #[test]
    fn test_problem_list_validation() {
        let empty = StudyConfig {
            problems: Vec::new(),
            ..StudyConfig::default()
        };
        assert!(empty.validate().is_err());

        let duplicated = StudyConfig {
            problems: vec!["a".to_string(), "b".to_string(), "a".to_string()],
            ..StudyConfig::default()
        };
        let err = duplicated.validate().unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: Problem listed twice: a");

        let blank = StudyConfig {
            problems: vec!["  ".to_string()],
            ..StudyConfig::default()
        };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: StudyConfig = toml::from_str("sim_count = 20").unwrap();
        assert_eq!(config.sim_count, 20);
        assert_eq!(config.max_retrains_allowed, 5);
        assert_eq!(config.name, "retention-study");
    }
}
