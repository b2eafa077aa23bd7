//! AggregatedMetrics - the behavioral summary of one batch.

use chrono::Weekday;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::{ContestType, SportCode, Timestamp};

/// Aggregate statistics over a user's classified contest entries.
///
/// Ratios and scores are in `0.0..=1.0` unless noted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedMetrics {
    pub total_entries: usize,
    pub entries_by_sport: BTreeMap<SportCode, usize>,
    pub entries_by_contest_type: BTreeMap<ContestType, usize>,

    pub total_invested: Decimal,
    pub total_returned: Decimal,
    pub avg_entry_fee: Decimal,
    /// Percentage; may be negative.
    pub roi_percent: Decimal,

    pub tournament_share: f64,
    pub cash_share: f64,
    pub head_to_head_share: f64,
    pub multi_entry_rate: f64,

    /// Normalized Shannon entropy of the sport distribution.
    pub sport_diversity: f64,
    /// Coefficient of variation of entry fees; unbounded above.
    pub stake_variability: f64,
    pub entries_per_week: f64,
    /// Average records per distinct contest; at least 1.0.
    pub entries_per_contest: f64,
    pub most_active_weekday: Weekday,

    pub recency_score: f64,
    pub confidence_score: f64,

    pub first_entry_at: Timestamp,
    pub last_entry_at: Timestamp,
    pub as_of: Timestamp,
}

impl AggregatedMetrics {
    /// Total returned minus total invested.
    pub fn net_profit(&self) -> Decimal {
        self.total_returned - self.total_invested
    }

    pub fn is_profitable(&self) -> bool {
        self.net_profit() > Decimal::ZERO
    }

    /// Sport with the most entries; ties go to the alphabetically first code.
    pub fn primary_sport(&self) -> Option<&SportCode> {
        self.entries_by_sport
            .iter()
            .fold(None, |best: Option<(&SportCode, usize)>, (sport, &n)| match best {
                Some((_, top)) if top >= n => best,
                _ => Some((sport, n)),
            })
            .map(|(sport, _)| sport)
    }

    /// Contest type with the most entries; ties follow classifier priority.
    pub fn primary_contest_type(&self) -> Option<ContestType> {
        self.entries_by_contest_type
            .iter()
            .fold(None, |best: Option<(ContestType, usize)>, (&ct, &n)| match best {
                Some((_, top)) if top >= n => best,
                _ => Some((ct, n)),
            })
            .map(|(ct, _)| ct)
    }

    /// Number of distinct sports played.
    pub fn sport_count(&self) -> usize {
        self.entries_by_sport.len()
    }
}
