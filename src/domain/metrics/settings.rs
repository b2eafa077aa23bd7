//! Tunable constants for metric aggregation.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Constants used by the recency and confidence formulas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsSettings {
    /// Exponential decay constant for recency, in days.
    pub recency_decay_days: f64,
    /// Record count at which the volume factor saturates.
    pub full_confidence_entries: f64,
    /// Age of the latest record, in days, at which freshness reaches zero.
    pub staleness_horizon_days: f64,
    pub confidence_volume_weight: f64,
    pub confidence_freshness_weight: f64,
    pub confidence_variety_weight: f64,
}

impl Default for MetricsSettings {
    fn default() -> Self {
        Self {
            recency_decay_days: 90.0,
            full_confidence_entries: 50.0,
            staleness_horizon_days: 365.0,
            confidence_volume_weight: 0.5,
            confidence_freshness_weight: 0.3,
            confidence_variety_weight: 0.2,
        }
    }
}

impl MetricsSettings {
    /// Checks that every constant is usable by the formulas.
    pub fn validate(&self) -> Result<(), ValidationError> {
        positive("metrics.recency_decay_days", self.recency_decay_days)?;
        positive("metrics.full_confidence_entries", self.full_confidence_entries)?;
        positive("metrics.staleness_horizon_days", self.staleness_horizon_days)?;

        let weights = [
            ("metrics.confidence_volume_weight", self.confidence_volume_weight),
            ("metrics.confidence_freshness_weight", self.confidence_freshness_weight),
            ("metrics.confidence_variety_weight", self.confidence_variety_weight),
        ];
        for (field, weight) in weights {
            if !(0.0..=1.0).contains(&weight) {
                return Err(ValidationError::out_of_range(field, 0.0, 1.0, weight));
            }
        }

        let sum: f64 = weights.iter().map(|(_, w)| w).sum();
        if (sum - 1.0).abs() > 1e-6 {
            return Err(ValidationError::invalid_format(
                "metrics.confidence_weights",
                format!("must sum to 1.0, got {}", sum),
            ));
        }
        Ok(())
    }
}

fn positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::invalid_format(
            field,
            format!("must be a positive number, got {}", value),
        ))
    }
}
