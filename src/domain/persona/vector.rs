//! PersonaVector - normalized archetype membership scores.

use serde::{Deserialize, Serialize};

use super::archetype::Archetype;
use crate::domain::foundation::ValidationError;

/// Allowed deviation of the score sum from 1.0.
pub const SUM_TOLERANCE: f64 = 0.001;

/// Scores above this mark an archetype as a significant component.
pub const HYBRID_THRESHOLD: f64 = 0.3;

/// Unvalidated wire form of a [`PersonaVector`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PersonaScores {
    pub bettor: f64,
    pub optimizer: f64,
    pub researcher: f64,
}

/// Non-negative archetype scores summing to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PersonaScores", into = "PersonaScores")]
pub struct PersonaVector {
    bettor: f64,
    optimizer: f64,
    researcher: f64,
}

impl PersonaVector {
    /// Creates a vector, validating the scores.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` for a negative or non-finite score
    /// - `InvalidFormat` if the scores do not sum to 1.0
    pub fn try_new(bettor: f64, optimizer: f64, researcher: f64) -> Result<Self, ValidationError> {
        for (archetype, score) in [
            (Archetype::Bettor, bettor),
            (Archetype::Optimizer, optimizer),
            (Archetype::Researcher, researcher),
        ] {
            if !score.is_finite() || !(0.0..=1.0 + SUM_TOLERANCE).contains(&score) {
                return Err(ValidationError::out_of_range(
                    archetype.to_string().to_lowercase(),
                    0.0,
                    1.0,
                    score,
                ));
            }
        }

        let sum = bettor + optimizer + researcher;
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(ValidationError::invalid_format(
                "persona_vector",
                format!("scores must sum to 1.0, got {}", sum),
            ));
        }

        Ok(Self {
            bettor,
            optimizer,
            researcher,
        })
    }

    /// Default distribution used when no archetype fits at all.
    pub fn fallback() -> Self {
        Self {
            bettor: 0.33,
            optimizer: 0.33,
            researcher: 0.34,
        }
    }

    pub fn bettor(&self) -> f64 {
        self.bettor
    }

    pub fn optimizer(&self) -> f64 {
        self.optimizer
    }

    pub fn researcher(&self) -> f64 {
        self.researcher
    }

    /// Returns the score for one archetype.
    pub fn score(&self, archetype: Archetype) -> f64 {
        match archetype {
            Archetype::Bettor => self.bettor,
            Archetype::Optimizer => self.optimizer,
            Archetype::Researcher => self.researcher,
        }
    }

    /// Archetypes ordered by descending score; ties keep canonical order.
    pub fn ranked(&self) -> [(Archetype, f64); 3] {
        let mut ranked = [
            (Archetype::Bettor, self.bettor),
            (Archetype::Optimizer, self.optimizer),
            (Archetype::Researcher, self.researcher),
        ];
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }

    /// Highest-scoring archetype.
    pub fn dominant(&self) -> Archetype {
        self.ranked()[0].0
    }

    /// Second-highest-scoring archetype.
    pub fn secondary(&self) -> Archetype {
        self.ranked()[1].0
    }

    /// True when two or more archetypes score above the hybrid threshold.
    pub fn is_hybrid(&self) -> bool {
        Archetype::all()
            .iter()
            .filter(|a| self.score(**a) > HYBRID_THRESHOLD)
            .count()
            >= 2
    }

    /// Spread between the highest and lowest score.
    pub fn confidence(&self) -> f64 {
        let ranked = self.ranked();
        ranked[0].1 - ranked[2].1
    }
}

impl Default for PersonaVector {
    fn default() -> Self {
        Self::fallback()
    }
}

impl TryFrom<PersonaScores> for PersonaVector {
    type Error = ValidationError;

    fn try_from(s: PersonaScores) -> Result<Self, Self::Error> {
        Self::try_new(s.bettor, s.optimizer, s.researcher)
    }
}

impl From<PersonaVector> for PersonaScores {
    fn from(v: PersonaVector) -> Self {
        Self {
            bettor: v.bettor,
            optimizer: v.optimizer,
            researcher: v.researcher,
        }
    }
}
