//! PersonaScorer - maps aggregated metrics onto archetype scores.

use serde::{Deserialize, Serialize};

use super::archetype::Archetype;
use super::signals::ArchetypeSignals;
use super::vector::PersonaVector;
use crate::domain::foundation::{ProfileError, ValidationError};
use crate::domain::metrics::AggregatedMetrics;

/// Signal tables and fallback distribution for persona scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonaSettings {
    pub bettor: ArchetypeSignals,
    pub optimizer: ArchetypeSignals,
    pub researcher: ArchetypeSignals,
    /// Used when every archetype scores zero.
    pub fallback: PersonaVector,
}

impl Default for PersonaSettings {
    fn default() -> Self {
        Self {
            bettor: ArchetypeSignals::default_bettor(),
            optimizer: ArchetypeSignals::default_optimizer(),
            researcher: ArchetypeSignals::default_researcher(),
            fallback: PersonaVector::fallback(),
        }
    }
}

impl PersonaSettings {
    pub fn signals(&self, archetype: Archetype) -> &ArchetypeSignals {
        match archetype {
            Archetype::Bettor => &self.bettor,
            Archetype::Optimizer => &self.optimizer,
            Archetype::Researcher => &self.researcher,
        }
    }

    /// Validates every signal range. The fallback is validated on construction.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.bettor.validate("persona.bettor")?;
        self.optimizer.validate("persona.optimizer")?;
        self.researcher.validate("persona.researcher")
    }
}

/// Scores metrics against each archetype and normalizes the result.
#[derive(Debug, Clone, Default)]
pub struct PersonaScorer {
    settings: PersonaSettings,
}

impl PersonaScorer {
    pub fn new(settings: PersonaSettings) -> Self {
        Self { settings }
    }

    /// Raw, un-normalized fit of each archetype in canonical order.
    pub fn raw_scores(&self, metrics: &AggregatedMetrics) -> [f64; 3] {
        [
            self.settings.bettor.raw_score(metrics),
            self.settings.optimizer.raw_score(metrics),
            self.settings.researcher.raw_score(metrics),
        ]
    }

    /// Produces a persona vector summing to 1.0.
    ///
    /// Falls back to the configured distribution when no archetype fits.
    ///
    /// # Errors
    ///
    /// `InvariantViolation` if the normalized scores do not form a valid vector.
    pub fn score(&self, metrics: &AggregatedMetrics) -> Result<PersonaVector, ProfileError> {
        let vector = self.normalize(self.raw_scores(metrics))?;

        tracing::debug!(
            bettor = vector.bettor(),
            optimizer = vector.optimizer(),
            researcher = vector.researcher(),
            dominant = %vector.dominant(),
            "Scored persona"
        );
        Ok(vector)
    }

    fn normalize(&self, raw: [f64; 3]) -> Result<PersonaVector, ProfileError> {
        let [bettor, optimizer, researcher] = raw;
        let sum = bettor + optimizer + researcher;

        if !(sum > 0.0 && sum.is_finite()) {
            tracing::debug!("No archetype signal fired, using fallback distribution");
            return Ok(self.settings.fallback);
        }

        PersonaVector::try_new(bettor / sum, optimizer / sum, researcher / sum).map_err(|e| {
            tracing::warn!(
                bettor,
                optimizer,
                researcher,
                error = %e,
                "Raw persona scores are invalid"
            );
            ProfileError::invariant(format!(
                "raw persona scores {:?} do not normalize: {}",
                raw, e
            ))
        })
    }
}
