//! Per-archetype coefficient tables.

use serde::{Deserialize, Serialize};

use super::pattern::PatternCategory;
use crate::domain::foundation::ValidationError;
use crate::domain::persona::Archetype;

/// One archetype's multiplier for each pattern category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoefficientTable {
    pub line_movement: f64,
    pub historical_trends: f64,
    pub injury_impact: f64,
    pub weather_factors: f64,
    pub player_correlations: f64,
    pub situational_stats: f64,
    pub live_odds_delta: f64,
    pub contrarian_plays: f64,
}

impl CoefficientTable {
    /// Builds a table from values in canonical category order.
    pub fn from_values(values: [f64; 8]) -> Self {
        let [
            line_movement,
            historical_trends,
            injury_impact,
            weather_factors,
            player_correlations,
            situational_stats,
            live_odds_delta,
            contrarian_plays,
        ] = values;
        Self {
            line_movement,
            historical_trends,
            injury_impact,
            weather_factors,
            player_correlations,
            situational_stats,
            live_odds_delta,
            contrarian_plays,
        }
    }

    /// Builds a validated table.
    pub fn try_from_values(values: [f64; 8]) -> Result<Self, ValidationError> {
        let table = Self::from_values(values);
        table.validate("coefficients")?;
        Ok(table)
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

    /// Rejects negative or non-finite coefficients.
    pub fn validate(&self, field: &str) -> Result<(), ValidationError> {
        for category in PatternCategory::all() {
            let value = self.get(*category);
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::out_of_range(
                    format!("{}.{}", field, category.as_str()),
                    0.0,
                    f64::MAX,
                    value,
                ));
            }
        }
        Ok(())
    }

    pub fn default_bettor() -> Self {
        Self::from_values([1.5, 0.9, 1.3, 0.8, 0.7, 1.0, 1.4, 1.1])
    }

    pub fn default_optimizer() -> Self {
        Self::from_values([0.8, 1.1, 1.5, 1.0, 1.6, 1.3, 0.6, 1.4])
    }

    pub fn default_researcher() -> Self {
        Self::from_values([0.7, 1.5, 0.9, 1.3, 1.2, 1.6, 0.5, 1.3])
    }
}

/// Coefficient tables for every archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightSettings {
    pub bettor: CoefficientTable,
    pub optimizer: CoefficientTable,
    pub researcher: CoefficientTable,
}

impl Default for WeightSettings {
    fn default() -> Self {
        Self {
            bettor: CoefficientTable::default_bettor(),
            optimizer: CoefficientTable::default_optimizer(),
            researcher: CoefficientTable::default_researcher(),
        }
    }
}

impl WeightSettings {
    pub fn table(&self, archetype: Archetype) -> &CoefficientTable {
        match archetype {
            Archetype::Bettor => &self.bettor,
            Archetype::Optimizer => &self.optimizer,
            Archetype::Researcher => &self.researcher,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.bettor.validate("weights.bettor")?;
        self.optimizer.validate("weights.optimizer")?;
        self.researcher.validate("weights.researcher")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tables_match_canonical_order() {
        let bettor = CoefficientTable::default_bettor();
        assert_eq!(bettor.get(PatternCategory::LineMovement), 1.5);
        assert_eq!(bettor.get(PatternCategory::LiveOddsDelta), 1.4);

        let optimizer = CoefficientTable::default_optimizer();
        assert_eq!(optimizer.get(PatternCategory::PlayerCorrelations), 1.6);

        let researcher = CoefficientTable::default_researcher();
        assert_eq!(researcher.get(PatternCategory::SituationalStats), 1.6);
        assert_eq!(researcher.get(PatternCategory::ContrarianPlays), 1.3);
    }

    #[test]
    fn defaults_are_valid() {
        assert!(WeightSettings::default().validate().is_ok());
    }

    #[test]
    fn negative_coefficient_is_rejected() {
        let err = CoefficientTable::try_from_values([1.0, 1.0, -0.1, 1.0, 1.0, 1.0, 1.0, 1.0])
            .unwrap_err();
        assert_eq!(err.field(), "coefficients.injury_impact");
    }

    #[test]
    fn table_lookup_by_archetype() {
        let settings = WeightSettings::default();
        assert_eq!(
            settings.table(Archetype::Optimizer),
            &CoefficientTable::default_optimizer()
        );
    }
}
