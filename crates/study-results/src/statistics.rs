//! Mean and standard deviation over simulation samples.

use serde::{Deserialize, Serialize};

/// Mean and population standard deviation of a sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub mean: f64,
    pub std_dev: f64,
}

impl Summary {
    /// Summarizes `samples`; an empty sample summarizes to zeros.
    pub fn of(samples: &[f64]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }

        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;

        Self {
            mean,
            std_dev: variance.sqrt(),
        }
    }

    /// Summarizes integer counts such as epochs or retries.
    pub fn of_counts(samples: &[usize]) -> Self {
        let samples: Vec<f64> = samples.iter().map(|&x| x as f64).collect();
        Self::of(&samples)
    }
}

/// `count` as a percentage (0–100) of `total`; zero when `total` is zero.
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    100.0 * count as f64 / total as f64
}
