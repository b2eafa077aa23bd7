//! BuildProfileHandler - runs the full pipeline for one export.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::ProfileConfig;
use crate::domain::classification::{ClassifierError, ContestClassifier};
use crate::domain::foundation::{AnalysisId, Platform, ProfileError, Timestamp};
use crate::domain::ingest::{RecordNormalizer, RowWarning};
use crate::domain::metrics::{AggregatedMetrics, MetricsAggregator};
use crate::domain::persona::{PersonaScorer, PersonaVector};
use crate::domain::weights::{WeightExplanation, WeightSynthesizer, WeightVector};
use crate::ports::Clock;

/// Command to profile one CSV export.
#[derive(Debug, Clone)]
pub struct BuildProfileCommand {
    pub csv: String,
}

impl BuildProfileCommand {
    pub fn new(csv: impl Into<String>) -> Self {
        Self { csv: csv.into() }
    }
}

/// Complete behavioral profile for one batch of contest history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehavioralProfile {
    pub analysis_id: AnalysisId,
    pub generated_at: Timestamp,
    pub platform: Platform,
    pub record_count: usize,
    pub rows_read: usize,
    pub first_entry_at: Timestamp,
    pub last_entry_at: Timestamp,
    pub metrics: AggregatedMetrics,
    pub persona: PersonaVector,
    pub weights: WeightVector,
    pub weight_explanations: Vec<WeightExplanation>,
    pub warnings: Vec<RowWarning>,
}

/// Handler that normalizes, classifies, aggregates, scores and weights.
///
/// Holds only immutable tables, so one instance may serve any number of
/// batches concurrently.
pub struct BuildProfileHandler {
    clock: Arc<dyn Clock>,
    normalizer: RecordNormalizer,
    classifier: ContestClassifier,
    aggregator: MetricsAggregator,
    scorer: PersonaScorer,
    synthesizer: WeightSynthesizer,
}

impl BuildProfileHandler {
    /// Creates a handler from configuration.
    ///
    /// # Errors
    ///
    /// `InvalidPattern` if a configured contest pattern does not compile.
    pub fn new(clock: Arc<dyn Clock>, config: &ProfileConfig) -> Result<Self, ClassifierError> {
        Ok(Self {
            clock,
            normalizer: RecordNormalizer::new(config.ingest.clone()),
            classifier: ContestClassifier::with_patterns(&config.classifier)?,
            aggregator: MetricsAggregator::new(config.metrics.clone()),
            scorer: PersonaScorer::new(config.persona.clone()),
            synthesizer: WeightSynthesizer::new(config.weights.clone()),
        })
    }

    /// Creates a handler with built-in tables and constants.
    pub fn with_defaults(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            normalizer: RecordNormalizer::default(),
            classifier: ContestClassifier::default(),
            aggregator: MetricsAggregator::default(),
            scorer: PersonaScorer::default(),
            synthesizer: WeightSynthesizer::default(),
        }
    }

    pub fn handle(&self, cmd: BuildProfileCommand) -> Result<BehavioralProfile, ProfileError> {
        let as_of = self.clock.now();

        // 1. Normalize rows
        let batch = self.normalizer.normalize(&cmd.csv)?;
        if !batch.warnings.is_empty() {
            tracing::warn!(
                skipped = batch.warnings.len(),
                rows_read = batch.rows_read,
                "Some rows were skipped during normalization"
            );
        }

        // 2. Tag contest types
        let records = self.classifier.classify_all(batch.records)?;

        // 3. Aggregate
        let metrics = self.aggregator.aggregate(&records, as_of)?;

        // 4. Score persona and derive weights
        let persona = self.scorer.score(&metrics)?;
        let weights = self.synthesizer.synthesize(&persona);
        let weight_explanations = self.synthesizer.explain(&persona, &weights);

        let profile = BehavioralProfile {
            analysis_id: AnalysisId::new(),
            generated_at: as_of,
            platform: batch.platform,
            record_count: records.len(),
            rows_read: batch.rows_read,
            first_entry_at: metrics.first_entry_at,
            last_entry_at: metrics.last_entry_at,
            metrics,
            persona,
            weights,
            weight_explanations,
            warnings: batch.warnings,
        };

        tracing::info!(
            analysis_id = %profile.analysis_id,
            platform = %profile.platform,
            records = profile.record_count,
            dominant = %profile.persona.dominant(),
            hybrid = profile.persona.is_hybrid(),
            "Built behavioral profile"
        );

        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::FixedClock;
    use crate::domain::foundation::ContestType;
    use crate::domain::persona::Archetype;
    use chrono::DateTime;
    use rust_decimal_macros::dec;

    /// 2024-01-11 00:00:00 UTC
    fn as_of() -> Timestamp {
        Timestamp::from_datetime(DateTime::from_timestamp(1704931200, 0).unwrap())
    }

    fn handler() -> BuildProfileHandler {
        BuildProfileHandler::with_defaults(Arc::new(FixedClock::new(as_of())))
    }

    const CSV: &str = "Entry ID,Contest Name,Entry Fee,Winnings,Sport,Date Entered,Points\n\
        1,NFL $20K Shot,$50.00,$0.00,NFL,2024-01-07 13:00:00,120.5\n\
        2,NFL $100K Millionaire Maker,$50.00,$300.00,NFL,2024-01-07 13:00:00,160\n\
        3,NFL Sunday Showdown GPP,$50.00,$0.00,NFL,2024-01-08 20:15:00,98\n\
        4,NFL Classic Double Up,-$50.00,$0.00,NFL,2024-01-08 20:15:00,98\n";

    #[test]
    fn builds_profile_from_export() {
        let profile = handler().handle(BuildProfileCommand::new(CSV)).unwrap();

        assert_eq!(profile.platform, Platform::DraftKings);
        assert_eq!(profile.record_count, 3);
        assert_eq!(profile.rows_read, 4);
        assert_eq!(profile.warnings.len(), 1);
        assert_eq!(profile.warnings[0].row, 4);
        assert_eq!(profile.generated_at, as_of());

        assert_eq!(profile.metrics.total_invested, dec!(150.00));
        assert_eq!(profile.metrics.roi_percent, dec!(100));
        assert_eq!(profile.metrics.tournament_share, 1.0);
        assert_eq!(
            profile.metrics.entries_by_contest_type.get(&ContestType::Tournament),
            Some(&3)
        );
        assert_eq!(profile.persona.dominant(), Archetype::Bettor);
        assert_eq!(profile.weight_explanations.len(), 8);
    }

    #[test]
    fn identical_input_gives_identical_results() {
        let h = handler();
        let a = h.handle(BuildProfileCommand::new(CSV)).unwrap();
        let b = h.handle(BuildProfileCommand::new(CSV)).unwrap();

        assert_eq!(a.metrics, b.metrics);
        assert_eq!(a.persona, b.persona);
        assert_eq!(a.weights, b.weights);
        assert_ne!(a.analysis_id, b.analysis_id);
    }

    #[test]
    fn fatal_errors_propagate() {
        let err = handler()
            .handle(BuildProfileCommand::new("foo,bar\n1,2\n"))
            .unwrap_err();
        assert!(matches!(err, ProfileError::FormatUnrecognized { .. }));
    }

    #[test]
    fn config_with_bad_pattern_is_rejected() {
        let mut config = ProfileConfig::default();
        config.classifier.tournament.push("[".to_string());
        let result = BuildProfileHandler::new(Arc::new(FixedClock::new(as_of())), &config);
        assert!(result.is_err());
    }

    #[test]
    fn profile_serializes_to_json() {
        let profile = handler().handle(BuildProfileCommand::new(CSV)).unwrap();
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["platform"], "draft_kings");
        assert_eq!(json["record_count"], 3);
        assert!(json["weights"]["line_movement"].as_f64().unwrap() > 1.0);
    }
}
