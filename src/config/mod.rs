//! Profiling configuration module
//!
//! This module provides type-safe configuration loading from environment
//! variables (via the `config` and `dotenvy` crates) or from a YAML file.
//! Environment variables use the `DFS_PERSONA` prefix and nested values are
//! separated by double underscores. Every section has defaults, so an empty
//! environment yields the built-in tables.
//!
//! # Example
//!
//! ```no_run
//! use dfs_persona::config::ProfileConfig;
//!
//! let config = ProfileConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Input limit: {} bytes", config.ingest.max_input_bytes);
//! ```

mod error;
mod logging;

pub use error::{ConfigError, ValidationError};
pub use logging::{LogFormat, LoggingConfig};

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domain::classification::{ClassifierPatterns, ContestClassifier};
use crate::domain::ingest::IngestSettings;
use crate::domain::metrics::MetricsSettings;
use crate::domain::persona::PersonaSettings;
use crate::domain::weights::WeightSettings;

/// Root profiling configuration
///
/// Load from the environment with [`ProfileConfig::load()`] or from YAML with
/// [`ProfileConfig::from_yaml_file()`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Input limits
    #[serde(default)]
    pub ingest: IngestSettings,

    /// Contest-name pattern sets
    #[serde(default)]
    pub classifier: ClassifierPatterns,

    /// Recency and confidence constants
    #[serde(default)]
    pub metrics: MetricsSettings,

    /// Archetype signal tables and fallback distribution
    #[serde(default)]
    pub persona: PersonaSettings,

    /// Per-archetype coefficient tables
    #[serde(default)]
    pub weights: WeightSettings,

    /// Log filter and output format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ProfileConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `DFS_PERSONA` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `DFS_PERSONA__INGEST__MAX_INPUT_BYTES=1048576` -> `ingest.max_input_bytes`
    /// - `DFS_PERSONA__LOGGING__FORMAT=json` -> `logging.format`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("DFS_PERSONA")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Parse configuration from a YAML document
    ///
    /// Missing sections and fields fall back to their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read and parse a YAML configuration file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    /// Validate all configuration values
    ///
    /// Checks:
    /// - Input limit is positive
    /// - Contest patterns compile
    /// - Metric constants are positive and confidence weights sum to 1
    /// - Signal ranges are ordered
    /// - Coefficients are non-negative
    /// - Log filter parses
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` naming the first invalid value.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.ingest.max_input_bytes == 0 {
            return Err(ValidationError::InvalidInputLimit);
        }
        ContestClassifier::with_patterns(&self.classifier)?;
        self.metrics.validate()?;
        self.persona.validate()?;
        self.weights.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ContestType;
    use crate::domain::persona::{Archetype, PersonaVector};
    use std::env;
    use std::io::Write;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("DFS_PERSONA__INGEST__MAX_INPUT_BYTES");
        env::remove_var("DFS_PERSONA__METRICS__RECENCY_DECAY_DAYS");
        env::remove_var("DFS_PERSONA__LOGGING__FORMAT");
        env::remove_var("DFS_PERSONA__LOGGING__LEVEL");
    }

    #[test]
    fn test_load_defaults_from_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = ProfileConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.ingest.max_input_bytes, 10 * 1024 * 1024);
        assert_eq!(config.metrics.recency_decay_days, 90.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_overrides_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("DFS_PERSONA__INGEST__MAX_INPUT_BYTES", "2048");
        env::set_var("DFS_PERSONA__METRICS__RECENCY_DECAY_DAYS", "30");
        env::set_var("DFS_PERSONA__LOGGING__FORMAT", "json");
        env::set_var("DFS_PERSONA__LOGGING__LEVEL", "debug");
        let result = ProfileConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.ingest.max_input_bytes, 2048);
        assert_eq!(config.metrics.recency_decay_days, 30.0);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_yaml_partial_override() {
        let yaml = r#"
ingest:
  max_input_bytes: 4096
classifier:
  cash:
    - '\bbeginner\b'
persona:
  fallback: { bettor: 0.5, optimizer: 0.25, researcher: 0.25 }
"#;
        let config = ProfileConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(config.ingest.max_input_bytes, 4096);
        assert_eq!(config.classifier.cash, vec![r"\bbeginner\b".to_string()]);
        assert_eq!(config.classifier.tournament, ClassifierPatterns::default().tournament);
        assert_eq!(config.persona.fallback.dominant(), Archetype::Bettor);
        assert_eq!(config.weights, WeightSettings::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_file_round_trip() {
        let original = ProfileConfig::default();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_yaml::to_string(&original).unwrap().as_bytes())
            .unwrap();

        let loaded = ProfileConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = ProfileConfig::from_yaml_file("/nonexistent/dfs-persona.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
        assert!(err.to_string().contains("/nonexistent/dfs-persona.yaml"));
    }

    #[test]
    fn test_invalid_fallback_rejected_at_parse() {
        let yaml = "persona:\n  fallback: { bettor: 0.9, optimizer: 0.9, researcher: 0.9 }\n";
        assert!(matches!(
            ProfileConfig::from_yaml_str(yaml),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_limit() {
        let mut config = ProfileConfig::default();
        config.ingest.max_input_bytes = 0;
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidInputLimit)
        ));
    }

    #[test]
    fn test_validate_rejects_bad_pattern() {
        let mut config = ProfileConfig::default();
        config.classifier.push(ContestType::HeadToHead, "(");
        assert!(matches!(config.validate(), Err(ValidationError::Pattern(_))));
    }

    #[test]
    fn test_validate_rejects_negative_coefficient() {
        let mut config = ProfileConfig::default();
        config.weights.optimizer.live_odds_delta = -1.0;
        assert!(matches!(config.validate(), Err(ValidationError::Field(_))));
    }

    #[test]
    fn test_validate_rejects_unordered_signal_range() {
        let yaml = r#"
persona:
  researcher:
    - metric: sport_diversity
      range: { min: 1.0, max: 0.5 }
      shape: rising
"#;
        let config = ProfileConfig::from_yaml_str(yaml).unwrap();
        assert!(matches!(config.validate(), Err(ValidationError::Field(_))));
        assert_eq!(config.persona.fallback, PersonaVector::fallback());
    }
}
