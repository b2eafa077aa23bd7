//! WeightVector - personalized multipliers per pattern category.

use serde::{Deserialize, Serialize};

use super::coefficients::CoefficientTable;
use super::pattern::PatternCategory;
use crate::domain::foundation::ValidationError;

/// Non-negative multiplier for each pattern category; 1.0 is neutral.
///
/// Serialized with the same field layout as a [`CoefficientTable`] and
/// validated on the way in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CoefficientTable", into = "CoefficientTable")]
pub struct WeightVector {
    line_movement: f64,
    historical_trends: f64,
    injury_impact: f64,
    weather_factors: f64,
    player_correlations: f64,
    situational_stats: f64,
    live_odds_delta: f64,
    contrarian_plays: f64,
}

impl WeightVector {
    /// All multipliers at 1.0.
    pub fn neutral() -> Self {
        Self::from_fn(|_| 1.0)
    }

    /// Builds a vector by evaluating `f` for each category.
    pub(crate) fn from_fn(mut f: impl FnMut(PatternCategory) -> f64) -> Self {
        Self {
            line_movement: f(PatternCategory::LineMovement),
            historical_trends: f(PatternCategory::HistoricalTrends),
            injury_impact: f(PatternCategory::InjuryImpact),
            weather_factors: f(PatternCategory::WeatherFactors),
            player_correlations: f(PatternCategory::PlayerCorrelations),
            situational_stats: f(PatternCategory::SituationalStats),
            live_odds_delta: f(PatternCategory::LiveOddsDelta),
            contrarian_plays: f(PatternCategory::ContrarianPlays),
        }
    }

    pub fn get(&self, category: PatternCategory) -> f64 {
        match category {
            PatternCategory::LineMovement => self.line_movement,
            PatternCategory::HistoricalTrends => self.historical_trends,
            PatternCategory::InjuryImpact => self.injury_impact,
            PatternCategory::WeatherFactors => self.weather_factors,
            PatternCategory::PlayerCorrelations => self.player_correlations,
            PatternCategory::SituationalStats => self.situational_stats,
            PatternCategory::LiveOddsDelta => self.live_odds_delta,
            PatternCategory::ContrarianPlays => self.contrarian_plays,
        }
    }

    /// Scales a detector's base score by this category's multiplier.
    pub fn apply(&self, category: PatternCategory, base_score: f64) -> f64 {
        base_score * self.get(category)
    }

    /// Every category with its weight, highest first; ties keep canonical order.
    pub fn ranked(&self) -> Vec<(PatternCategory, f64)> {
        let mut ranked: Vec<_> = PatternCategory::all()
            .iter()
            .map(|c| (*c, self.get(*c)))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }

    /// Categories weighted above neutral, highest first.
    pub fn boosted(&self) -> Vec<PatternCategory> {
        self.ranked()
            .into_iter()
            .filter(|(_, w)| *w > 1.0)
            .map(|(c, _)| c)
            .collect()
    }

    /// Categories weighted below neutral, lowest first.
    pub fn dampened(&self) -> Vec<PatternCategory> {
        let mut below: Vec<_> = PatternCategory::all()
            .iter()
            .map(|c| (*c, self.get(*c)))
            .filter(|(_, w)| *w < 1.0)
            .collect();
        below.sort_by(|a, b| a.1.total_cmp(&b.1));
        below.into_iter().map(|(c, _)| c).collect()
    }
}

impl Default for WeightVector {
    fn default() -> Self {
        Self::neutral()
    }
}

impl TryFrom<CoefficientTable> for WeightVector {
    type Error = ValidationError;

    fn try_from(table: CoefficientTable) -> Result<Self, Self::Error> {
        table.validate("weights")?;
        Ok(Self::from_fn(|category| table.get(category)))
    }
}

impl From<WeightVector> for CoefficientTable {
    fn from(v: WeightVector) -> Self {
        CoefficientTable::from_values([
            v.line_movement,
            v.historical_trends,
            v.injury_impact,
            v.weather_factors,
            v.player_correlations,
            v.situational_stats,
            v.live_odds_delta,
            v.contrarian_plays,
        ])
    }
}
