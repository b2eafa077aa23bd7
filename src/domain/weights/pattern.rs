//! Pattern category enum.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A family of betting/lineup signals a downstream recommender detects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternCategory {
    LineMovement,
    HistoricalTrends,
    InjuryImpact,
    WeatherFactors,
    PlayerCorrelations,
    SituationalStats,
    LiveOddsDelta,
    ContrarianPlays,
}

impl PatternCategory {
    /// Returns all categories in canonical order.
    pub fn all() -> &'static [PatternCategory] {
        &[
            PatternCategory::LineMovement,
            PatternCategory::HistoricalTrends,
            PatternCategory::InjuryImpact,
            PatternCategory::WeatherFactors,
            PatternCategory::PlayerCorrelations,
            PatternCategory::SituationalStats,
            PatternCategory::LiveOddsDelta,
            PatternCategory::ContrarianPlays,
        ]
    }

    /// Stable snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternCategory::LineMovement => "line_movement",
            PatternCategory::HistoricalTrends => "historical_trends",
            PatternCategory::InjuryImpact => "injury_impact",
            PatternCategory::WeatherFactors => "weather_factors",
            PatternCategory::PlayerCorrelations => "player_correlations",
            PatternCategory::SituationalStats => "situational_stats",
            PatternCategory::LiveOddsDelta => "live_odds_delta",
            PatternCategory::ContrarianPlays => "contrarian_plays",
        }
    }
}

impl fmt::Display for PatternCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PatternCategory::LineMovement => "Line Movement",
            PatternCategory::HistoricalTrends => "Historical Trends",
            PatternCategory::InjuryImpact => "Injury Impact",
            PatternCategory::WeatherFactors => "Weather Factors",
            PatternCategory::PlayerCorrelations => "Player Correlations",
            PatternCategory::SituationalStats => "Situational Stats",
            PatternCategory::LiveOddsDelta => "Live Odds Delta",
            PatternCategory::ContrarianPlays => "Contrarian Plays",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_has_eight_categories() {
        assert_eq!(PatternCategory::all().len(), 8);
    }

    #[test]
    fn serde_name_matches_as_str() {
        for category in PatternCategory::all() {
            let json = serde_json::to_string(category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
        }
    }
}
