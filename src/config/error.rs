//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::classification::ClassifierError;
use crate::domain::foundation::ValidationError as FieldError;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Failed to read configuration file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("ingest.max_input_bytes must be greater than zero")]
    InvalidInputLimit,

    #[error("Invalid log filter '{0}'")]
    InvalidLogFilter(String),

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error(transparent)]
    Pattern(#[from] ClassifierError),
}
