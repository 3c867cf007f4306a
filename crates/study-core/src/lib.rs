//! Core types and utilities for the retention study.
//!
//! This crate provides the error type, study configuration and the
//! logging/config-loading helpers shared by the dataset and results crates.

pub mod config;
pub mod error;
pub mod setup;

pub use config::StudyConfig;
pub use error::{Error, Result};
pub use setup::{load_toml_config, setup_logging};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::*;
    pub use crate::error::{Error, Result};
    pub use crate::setup::*;
}
