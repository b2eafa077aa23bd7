//! WeightSynthesizer - blends coefficient tables by persona score.

use serde::{Deserialize, Serialize};

use super::coefficients::WeightSettings;
use super::pattern::PatternCategory;
use super::vector::WeightVector;
use crate::domain::persona::{Archetype, PersonaVector};

/// Weights above this are reported as boosted.
pub const BOOST_THRESHOLD: f64 = 1.1;

/// Weights below this are reported as dampened.
pub const DAMPEN_THRESHOLD: f64 = 0.9;

/// How a category's weight compares with neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum WeightEffect {
    Boosted { by: Archetype },
    Dampened,
    Neutral,
}

/// Human-readable account of one category's weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightExplanation {
    pub category: PatternCategory,
    pub weight: f64,
    #[serde(flatten)]
    pub effect: WeightEffect,
    pub message: String,
}

/// Produces personalized weights as a persona-weighted sum of tables.
#[derive(Debug, Clone, Default)]
pub struct WeightSynthesizer {
    settings: WeightSettings,
}

impl WeightSynthesizer {
    pub fn new(settings: WeightSettings) -> Self {
        Self { settings }
    }

    /// `weight[p] = Σ score[a] × coefficient[a][p]`, without normalization.
    pub fn synthesize(&self, persona: &PersonaVector) -> WeightVector {
        let weights = WeightVector::from_fn(|category| {
            Archetype::all()
                .iter()
                .map(|a| persona.score(*a) * self.settings.table(*a).get(category))
                .sum()
        });

        tracing::debug!(
            boosted = weights.boosted().len(),
            dampened = weights.dampened().len(),
            "Synthesized pattern weights"
        );
        weights
    }

    /// Explains every category's weight in canonical order.
    ///
    /// Boosts are attributed to the persona's dominant archetype.
    pub fn explain(&self, persona: &PersonaVector, weights: &WeightVector) -> Vec<WeightExplanation> {
        let dominant = persona.dominant();
        PatternCategory::all()
            .iter()
            .map(|category| {
                let weight = weights.get(*category);
                let (effect, message) = if weight > BOOST_THRESHOLD {
                    (
                        WeightEffect::Boosted { by: dominant },
                        format!("Boosted by {} persona ({:.2}x)", dominant, weight),
                    )
                } else if weight < DAMPEN_THRESHOLD {
                    (
                        WeightEffect::Dampened,
                        format!("Deprioritized for this profile ({:.2}x)", weight),
                    )
                } else {
                    (WeightEffect::Neutral, format!("Neutral weight ({:.2}x)", weight))
                };
                WeightExplanation {
                    category: *category,
                    weight,
                    effect,
                    message,
                }
            })
            .collect()
    }
}
