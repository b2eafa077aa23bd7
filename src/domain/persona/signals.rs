//! Signal tables mapping metrics onto archetype fit.

use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;
use crate::domain::metrics::AggregatedMetrics;

/// A metric an archetype signal can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricSignal {
    TournamentShare,
    CashShare,
    HeadToHeadShare,
    MultiEntryRate,
    AvgEntryFee,
    RoiPercent,
    SportDiversity,
    StakeVariability,
    EntriesPerWeek,
    EntriesPerContest,
    RecencyScore,
}

impl MetricSignal {
    /// Reads the metric's value as a float.
    pub fn value(&self, metrics: &AggregatedMetrics) -> f64 {
        match self {
            MetricSignal::TournamentShare => metrics.tournament_share,
            MetricSignal::CashShare => metrics.cash_share,
            MetricSignal::HeadToHeadShare => metrics.head_to_head_share,
            MetricSignal::MultiEntryRate => metrics.multi_entry_rate,
            MetricSignal::AvgEntryFee => metrics.avg_entry_fee.to_f64().unwrap_or(0.0),
            MetricSignal::RoiPercent => metrics.roi_percent.to_f64().unwrap_or(0.0),
            MetricSignal::SportDiversity => metrics.sport_diversity,
            MetricSignal::StakeVariability => metrics.stake_variability,
            MetricSignal::EntriesPerWeek => metrics.entries_per_week,
            MetricSignal::EntriesPerContest => metrics.entries_per_contest,
            MetricSignal::RecencyScore => metrics.recency_score,
        }
    }
}

/// Closed interval over which a signal goes from no fit to full fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalRange {
    pub min: f64,
    pub max: f64,
}

impl SignalRange {
    /// Creates a range, rejecting unordered or non-finite bounds.
    pub fn try_new(min: f64, max: f64) -> Result<Self, ValidationError> {
        let range = Self { min, max };
        range.validate("signal_range")?;
        Ok(range)
    }

    pub fn validate(&self, field: &str) -> Result<(), ValidationError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(ValidationError::invalid_format(field, "bounds must be finite"));
        }
        if self.min > self.max {
            return Err(ValidationError::invalid_format(
                field,
                format!("min {} exceeds max {}", self.min, self.max),
            ));
        }
        Ok(())
    }

    /// Linear fit: 0 below `min`, 1 above `max`, interpolated between.
    pub fn fit(&self, value: f64) -> f64 {
        if value < self.min {
            0.0
        } else if value > self.max {
            1.0
        } else if self.max == self.min {
            1.0
        } else {
            (value - self.min) / (self.max - self.min)
        }
    }

    /// Triangular fit: 1 at the midpoint, falling to 0 at either bound.
    pub fn peak(&self, value: f64) -> f64 {
        if value < self.min || value > self.max {
            return 0.0;
        }
        let half_width = (self.max - self.min) / 2.0;
        if half_width == 0.0 {
            return 1.0;
        }
        let mid = self.min + half_width;
        (1.0 - (value - mid).abs() / half_width).clamp(0.0, 1.0)
    }
}

/// How a signal's fit is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalShape {
    /// Higher values fit better.
    Rising,
    /// Lower values fit better.
    Falling,
    /// Values near the middle of the range fit best.
    Peaked,
}

/// One metric-to-fit rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalSpec {
    pub metric: MetricSignal,
    pub range: SignalRange,
    pub shape: SignalShape,
}

impl SignalSpec {
    pub fn new(metric: MetricSignal, min: f64, max: f64, shape: SignalShape) -> Self {
        Self {
            metric,
            range: SignalRange { min, max },
            shape,
        }
    }

    /// Scores the metrics against this rule, in `0.0..=1.0`.
    pub fn score(&self, metrics: &AggregatedMetrics) -> f64 {
        let value = self.metric.value(metrics);
        if !value.is_finite() {
            return 0.0;
        }
        match self.shape {
            SignalShape::Rising => self.range.fit(value),
            SignalShape::Falling => 1.0 - self.range.fit(value),
            SignalShape::Peaked => self.range.peak(value),
        }
    }
}

/// The signal table for one archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArchetypeSignals(Vec<SignalSpec>);

impl ArchetypeSignals {
    pub fn new(signals: Vec<SignalSpec>) -> Self {
        Self(signals)
    }

    pub fn signals(&self) -> &[SignalSpec] {
        &self.0
    }

    /// Mean of the signal scores; zero for an empty table.
    pub fn raw_score(&self, metrics: &AggregatedMetrics) -> f64 {
        if self.0.is_empty() {
            return 0.0;
        }
        self.0.iter().map(|s| s.score(metrics)).sum::<f64>() / self.0.len() as f64
    }

    pub fn validate(&self, field: &str) -> Result<(), ValidationError> {
        for (i, signal) in self.0.iter().enumerate() {
            signal.range.validate(&format!("{}[{}].range", field, i))?;
        }
        Ok(())
    }

    /// Tournament-heavy, high-stakes, single-sport, one entry per contest.
    pub fn default_bettor() -> Self {
        use MetricSignal::*;
        use SignalShape::*;
        Self(vec![
            SignalSpec::new(TournamentShare, 0.7, 1.0, Rising),
            SignalSpec::new(AvgEntryFee, 10.0, 999.0, Rising),
            SignalSpec::new(SportDiversity, 0.0, 0.5, Falling),
            SignalSpec::new(EntriesPerContest, 1.0, 2.0, Falling),
        ])
    }

    /// Cash-heavy, many lineups per contest, high volume, moderate ROI.
    pub fn default_optimizer() -> Self {
        use MetricSignal::*;
        use SignalShape::*;
        Self(vec![
            SignalSpec::new(CashShare, 0.4, 1.0, Rising),
            SignalSpec::new(EntriesPerContest, 3.0, 20.0, Rising),
            SignalSpec::new(EntriesPerWeek, 20.0, 100.0, Rising),
            SignalSpec::new(RoiPercent, -20.0, 20.0, Peaked),
        ])
    }

    /// Multi-sport, variable stakes, low average fee.
    pub fn default_researcher() -> Self {
        use MetricSignal::*;
        use SignalShape::*;
        Self(vec![
            SignalSpec::new(SportDiversity, 0.7, 1.0, Rising),
            SignalSpec::new(StakeVariability, 0.5, 2.0, Rising),
            SignalSpec::new(AvgEntryFee, 0.0, 5.0, Falling),
        ])
    }
}
