//! MetricsAggregator - computes AggregatedMetrics from classified records.

use chrono::Weekday;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

use super::aggregated::AggregatedMetrics;
use super::settings::MetricsSettings;
use crate::domain::foundation::{ContestType, Money, ProfileError, SportCode, Timestamp};
use crate::domain::ingest::NormalizedRecord;

/// Number of classified contest types, used to saturate the variety factor.
const CLASSIFIED_TYPE_COUNT: f64 = 4.0;

/// Aggregates a batch of classified records into behavioral metrics.
///
/// All time-relative values use the caller-supplied `as_of`, never the
/// wall clock.
#[derive(Debug, Clone, Default)]
pub struct MetricsAggregator {
    settings: MetricsSettings,
}

impl MetricsAggregator {
    pub fn new(settings: MetricsSettings) -> Self {
        Self { settings }
    }

    /// Computes metrics for the batch.
    ///
    /// # Errors
    ///
    /// - `EmptyResult` if `records` is empty
    /// - `InvariantViolation` if any record skipped classification
    /// - `AmountOverflow` if money totals or ROI leave the `Decimal` range
    pub fn aggregate(
        &self,
        records: &[NormalizedRecord],
        as_of: Timestamp,
    ) -> Result<AggregatedMetrics, ProfileError> {
        let (first, last) = match (
            records.iter().map(|r| r.entered_at()).min(),
            records.iter().map(|r| r.entered_at()).max(),
        ) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                return Err(ProfileError::EmptyResult {
                    rows_read: 0,
                    rejected: 0,
                })
            }
        };

        if let Some(unclassified) = records.iter().find(|r| !r.is_classified()) {
            return Err(ProfileError::invariant(format!(
                "record {} reached aggregation without classification",
                unclassified.entry_id()
            )));
        }

        let total = records.len();
        let count = total as f64;

        let mut entries_by_sport: BTreeMap<SportCode, usize> = BTreeMap::new();
        let mut entries_by_contest_type: BTreeMap<ContestType, usize> = BTreeMap::new();
        for record in records {
            *entries_by_sport.entry(record.sport().clone()).or_default() += 1;
            *entries_by_contest_type.entry(record.contest_type()).or_default() += 1;
        }

        let total_invested = Money::checked_sum(records.iter().map(|r| r.entry_fee()))
            .ok_or_else(|| ProfileError::overflow("total_invested"))?
            .amount();
        let total_returned = Money::checked_sum(records.iter().map(|r| r.winnings()))
            .ok_or_else(|| ProfileError::overflow("total_returned"))?
            .amount();
        let avg_entry_fee = total_invested / Decimal::from(total);
        let roi = roi_percent(total_invested, total_returned)
            .ok_or_else(|| ProfileError::overflow("roi_percent"))?;

        let share = |ct: ContestType| {
            entries_by_contest_type.get(&ct).copied().unwrap_or(0) as f64 / count
        };

        let fees: Vec<f64> = records
            .iter()
            .map(|r| r.entry_fee().amount().to_f64().unwrap_or(0.0))
            .collect();

        let tournament_share = share(ContestType::Tournament);
        let cash_share = share(ContestType::Cash);
        let head_to_head_share = share(ContestType::HeadToHead);
        let multi_entry_rate = share(ContestType::MultiEntry);
        let sport_diversity = normalized_entropy(entries_by_sport.values().copied());
        let confidence_score =
            self.confidence_score(total, last, &entries_by_contest_type, as_of);

        let metrics = AggregatedMetrics {
            total_entries: total,
            entries_by_sport,
            entries_by_contest_type,
            total_invested,
            total_returned,
            avg_entry_fee,
            roi_percent: roi,
            tournament_share,
            cash_share,
            head_to_head_share,
            multi_entry_rate,
            sport_diversity,
            stake_variability: coefficient_of_variation(&fees),
            entries_per_week: entries_per_week(total, first, last),
            entries_per_contest: entries_per_contest(records),
            most_active_weekday: most_active_weekday(records),
            recency_score: self.recency_score(records, as_of),
            confidence_score,
            first_entry_at: first,
            last_entry_at: last,
            as_of,
        };

        tracing::debug!(
            entries = metrics.total_entries,
            sports = metrics.sport_count(),
            roi = %metrics.roi_percent,
            confidence = metrics.confidence_score,
            "Aggregated behavioral metrics"
        );

        Ok(metrics)
    }

    /// Mean of `exp(-age / decay)` over all records, ages clamped at zero.
    fn recency_score(&self, records: &[NormalizedRecord], as_of: Timestamp) -> f64 {
        let decay = self.settings.recency_decay_days;
        let total: f64 = records
            .iter()
            .map(|r| age_in_days(r.entered_at(), as_of))
            .map(|days| (-days / decay).exp())
            .sum();
        (total / records.len() as f64).min(1.0)
    }

    fn confidence_score(
        &self,
        total: usize,
        last: Timestamp,
        by_type: &BTreeMap<ContestType, usize>,
        as_of: Timestamp,
    ) -> f64 {
        let s = &self.settings;

        let volume = (total as f64 / s.full_confidence_entries).min(1.0);
        let freshness = (1.0 - age_in_days(last, as_of) / s.staleness_horizon_days).max(0.0);
        let variety = (by_type.keys().filter(|ct| ct.is_classified()).count() as f64
            / CLASSIFIED_TYPE_COUNT)
            .min(1.0);

        (s.confidence_volume_weight * volume
            + s.confidence_freshness_weight * freshness
            + s.confidence_variety_weight * variety)
            .clamp(0.0, 1.0)
    }
}

/// Whole days from `at` to `as_of`, never negative.
fn age_in_days(at: Timestamp, as_of: Timestamp) -> f64 {
    as_of.whole_days_since(&at).max(0) as f64
}

/// `(returned - invested) / invested * 100`, zero when nothing was invested.
///
/// `None` when the ratio leaves the `Decimal` range.
pub fn roi_percent(invested: Decimal, returned: Decimal) -> Option<Decimal> {
    if invested.is_zero() {
        return Some(Decimal::ZERO);
    }
    returned
        .checked_sub(invested)?
        .checked_div(invested)?
        .checked_mul(Decimal::ONE_HUNDRED)
}

/// Shannon entropy of a count distribution, normalized by `log2(N)`.
///
/// Zero for fewer than two categories.
pub fn normalized_entropy(counts: impl IntoIterator<Item = usize>) -> f64 {
    let counts: Vec<usize> = counts.into_iter().filter(|&n| n > 0).collect();
    if counts.len() < 2 {
        return 0.0;
    }
    let total: usize = counts.iter().sum();
    let entropy: f64 = counts
        .iter()
        .map(|&n| {
            let p = n as f64 / total as f64;
            -p * p.log2()
        })
        .sum();
    (entropy / (counts.len() as f64).log2()).clamp(0.0, 1.0)
}

/// Population standard deviation divided by the mean.
///
/// Zero for fewer than two values or a zero mean.
pub fn coefficient_of_variation(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    if mean == 0.0 {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt() / mean
}

/// Entries divided by the span in weeks, with a one-week floor.
pub fn entries_per_week(total: usize, first: Timestamp, last: Timestamp) -> f64 {
    let weeks = (last.whole_days_since(&first) as f64 / 7.0).max(1.0);
    total as f64 / weeks
}

/// Average records per contest, where a contest is identified by its
/// case-folded name and UTC entry date.
///
/// Records without a contest name are left out; 1.0 when none have one.
pub fn entries_per_contest(records: &[NormalizedRecord]) -> f64 {
    let mut groups: HashMap<(String, chrono::NaiveDate), usize> = HashMap::new();
    for record in records {
        if let Some(name) = record.contest_name() {
            let key = (name.trim().to_lowercase(), record.entered_at().date());
            *groups.entry(key).or_default() += 1;
        }
    }
    if groups.is_empty() {
        return 1.0;
    }
    groups.values().sum::<usize>() as f64 / groups.len() as f64
}

/// Most frequent UTC weekday; ties go to the earliest day starting Monday.
pub fn most_active_weekday(records: &[NormalizedRecord]) -> Weekday {
    let mut counts = [0usize; 7];
    for record in records {
        counts[record.entered_at().weekday().num_days_from_monday() as usize] += 1;
    }
    let best = (1..7).fold(0, |best, day| if counts[day] > counts[best] { day } else { best });
    WEEK[best]
}

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{EntryId, Money, Platform};
    use chrono::DateTime;
    use rust_decimal_macros::dec;

    /// Thursday 2024-01-04 00:00:00 UTC.
    fn base() -> Timestamp {
        Timestamp::from_datetime(DateTime::from_timestamp(1704326400, 0).unwrap())
    }

    struct Entry<'a> {
        sport: &'a str,
        fee: Decimal,
        winnings: Decimal,
        day: i64,
        contest: Option<&'a str>,
        tag: ContestType,
    }

    impl Default for Entry<'_> {
        fn default() -> Self {
            Self {
                sport: "NFL",
                fee: dec!(10),
                winnings: dec!(0),
                day: 0,
                contest: None,
                tag: ContestType::Tournament,
            }
        }
    }

    fn build(entry: Entry<'_>) -> NormalizedRecord {
        build_with_id(0, entry)
    }

    fn build_with_id(id: usize, entry: Entry<'_>) -> NormalizedRecord {
        let mut r = NormalizedRecord::new(
            EntryId::new(id.to_string()).unwrap(),
            base().add_days(entry.day),
            SportCode::new(entry.sport).unwrap(),
            Money::try_new(entry.fee).unwrap(),
            Money::try_new(entry.winnings).unwrap(),
            Platform::DraftKings,
        );
        if let Some(name) = entry.contest {
            r = r.with_contest_name(name);
        }
        r.classify_as(entry.tag).unwrap()
    }

    fn many(n: usize, f: impl Fn(usize) -> Entry<'static>) -> Vec<NormalizedRecord> {
        (0..n).map(|i| build_with_id(i, f(i))).collect()
    }

    #[test]
    fn single_record_roi_is_exact() {
        let records = vec![build(Entry {
            fee: dec!(10.00),
            winnings: dec!(25.00),
            ..Default::default()
        })];
        let m = MetricsAggregator::default().aggregate(&records, base()).unwrap();

        assert_eq!(m.roi_percent, dec!(150));
        assert_eq!(m.total_invested, dec!(10.00));
        assert_eq!(m.total_returned, dec!(25.00));
        assert_eq!(m.net_profit(), dec!(15.00));
        assert!(m.is_profitable());
    }

    #[test]
    fn zero_fees_give_zero_roi() {
        let records = vec![build(Entry {
            fee: dec!(0),
            winnings: dec!(5),
            ..Default::default()
        })];
        let m = MetricsAggregator::default().aggregate(&records, base()).unwrap();
        assert_eq!(m.roi_percent, Decimal::ZERO);
        assert_eq!(m.stake_variability, 0.0);
    }

    #[test]
    fn fee_total_overflow_is_reported() {
        let records = many(2, |_| Entry {
            fee: Decimal::MAX,
            ..Default::default()
        });
        let err = MetricsAggregator::default().aggregate(&records, base()).unwrap_err();
        assert_eq!(err, ProfileError::overflow("total_invested"));
    }

    #[test]
    fn dust_stake_roi_overflow_is_reported() {
        let records = vec![build(Entry {
            fee: dec!(0.0000000000000000000000000001),
            winnings: dec!(1000),
            ..Default::default()
        })];
        let err = MetricsAggregator::default().aggregate(&records, base()).unwrap_err();
        assert_eq!(err, ProfileError::overflow("roi_percent"));
    }

    #[test]
    fn roi_helper_handles_edges() {
        assert_eq!(roi_percent(dec!(10), dec!(25)), Some(dec!(150)));
        assert_eq!(roi_percent(Decimal::ZERO, dec!(5)), Some(Decimal::ZERO));
        assert_eq!(roi_percent(dec!(0.0000000000000000000000000001), dec!(1000)), None);
    }

    #[test]
    fn empty_batch_is_empty_result() {
        let err = MetricsAggregator::default().aggregate(&[], base()).unwrap_err();
        assert!(matches!(err, ProfileError::EmptyResult { .. }));
    }

    #[test]
    fn unclassified_record_is_invariant_violation() {
        let raw = NormalizedRecord::new(
            EntryId::new("x").unwrap(),
            base(),
            SportCode::new("NFL").unwrap(),
            Money::ZERO,
            Money::ZERO,
            Platform::FanDuel,
        );
        let err = MetricsAggregator::default().aggregate(&[raw], base()).unwrap_err();
        assert!(matches!(err, ProfileError::InvariantViolation(_)));
    }

    #[test]
    fn single_sport_has_zero_diversity() {
        let records = many(5, |_| Entry::default());
        let m = MetricsAggregator::default().aggregate(&records, base()).unwrap();
        assert_eq!(m.sport_diversity, 0.0);
        assert_eq!(m.primary_sport().unwrap().as_str(), "NFL");
    }

    #[test]
    fn even_spread_has_full_diversity() {
        assert!((normalized_entropy([3, 3, 3, 3]) - 1.0).abs() < 1e-9);
        assert!(normalized_entropy([9, 1]) < normalized_entropy([6, 4]));
        assert!(normalized_entropy([6, 4]) < normalized_entropy([5, 5]));
        assert_eq!(normalized_entropy([7]), 0.0);
        assert_eq!(normalized_entropy([7, 0]), 0.0);
    }

    #[test]
    fn stake_variability_is_population_cv() {
        // mean 15, population std-dev 5
        assert!((coefficient_of_variation(&[10.0, 20.0]) - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(coefficient_of_variation(&[10.0]), 0.0);
        assert_eq!(coefficient_of_variation(&[0.0, 0.0]), 0.0);
    }

    #[test]
    fn entries_per_week_uses_one_week_floor() {
        let b = base();
        assert_eq!(entries_per_week(6, b, b.add_days(3)), 6.0);
        assert_eq!(entries_per_week(28, b, b.add_days(28)), 7.0);
    }

    #[test]
    fn shares_sum_with_unclassified_remainder() {
        let tags = [
            ContestType::Tournament,
            ContestType::Tournament,
            ContestType::Cash,
            ContestType::HeadToHead,
            ContestType::MultiEntry,
            ContestType::Unclassified,
            ContestType::Tournament,
            ContestType::Cash,
        ];
        let records = many(tags.len(), |i| Entry {
            tag: tags[i],
            ..Default::default()
        });
        let m = MetricsAggregator::default().aggregate(&records, base()).unwrap();

        assert_eq!(m.tournament_share, 3.0 / 8.0);
        assert_eq!(m.cash_share, 2.0 / 8.0);
        assert_eq!(m.head_to_head_share, 1.0 / 8.0);
        assert_eq!(m.multi_entry_rate, 1.0 / 8.0);
        assert_eq!(m.entries_by_contest_type[&ContestType::Unclassified], 1);
        assert_eq!(m.primary_contest_type(), Some(ContestType::Tournament));
    }

    #[test]
    fn recency_decays_with_age() {
        let fresh = vec![build(Entry::default())];
        let m = MetricsAggregator::default().aggregate(&fresh, base()).unwrap();
        assert!((m.recency_score - 1.0).abs() < 1e-12);

        let m = MetricsAggregator::default()
            .aggregate(&fresh, base().add_days(90))
            .unwrap();
        assert!((m.recency_score - (-1.0f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn future_records_clamp_to_zero_age() {
        let records = vec![build(Entry {
            day: 10,
            ..Default::default()
        })];
        let m = MetricsAggregator::default().aggregate(&records, base()).unwrap();
        assert!((m.recency_score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn confidence_combines_volume_freshness_variety() {
        let tags = [
            ContestType::Tournament,
            ContestType::Cash,
            ContestType::HeadToHead,
            ContestType::MultiEntry,
        ];
        let records = many(50, |i| Entry {
            tag: tags[i % 4],
            ..Default::default()
        });
        let m = MetricsAggregator::default().aggregate(&records, base()).unwrap();
        assert!((m.confidence_score - 1.0).abs() < 1e-12);

        // 5 records, one type, latest a year stale: 0.5*0.1 + 0 + 0.2*0.25
        let records = many(5, |_| Entry::default());
        let m = MetricsAggregator::default()
            .aggregate(&records, base().add_days(400))
            .unwrap();
        assert!((m.confidence_score - 0.1).abs() < 1e-12);
    }

    #[test]
    fn unclassified_does_not_count_toward_variety() {
        let records = many(50, |i| Entry {
            tag: if i % 2 == 0 {
                ContestType::Unclassified
            } else {
                ContestType::Cash
            },
            ..Default::default()
        });
        let m = MetricsAggregator::default().aggregate(&records, base()).unwrap();
        assert!((m.confidence_score - (0.5 + 0.3 + 0.2 * 0.25)).abs() < 1e-12);
    }

    #[test]
    fn entries_per_contest_groups_by_name_and_date() {
        let records = many(6, |i| Entry {
            contest: Some(if i < 4 { "NFL $20K Shot" } else { "nfl $20k shot " }),
            day: if i < 3 { 0 } else { 1 },
            ..Default::default()
        });
        // Day 0: 3 entries in one contest; day 1: 3 entries in one contest.
        assert_eq!(entries_per_contest(&records), 3.0);

        let unnamed = many(3, |_| Entry::default());
        assert_eq!(entries_per_contest(&unnamed), 1.0);
    }

    #[test]
    fn weekday_ties_break_monday_first() {
        // base() is Thursday; day 4 is Monday.
        let records = many(4, |i| Entry {
            day: if i % 2 == 0 { 0 } else { 4 },
            ..Default::default()
        });
        assert_eq!(most_active_weekday(&records), Weekday::Mon);

        let records = many(3, |i| Entry {
            day: if i == 0 { 4 } else { 0 },
            ..Default::default()
        });
        assert_eq!(most_active_weekday(&records), Weekday::Thu);
    }

    #[test]
    fn aggregation_is_deterministic() {
        let records = many(20, |i| Entry {
            sport: ["NFL", "NBA", "MLB"][i % 3],
            fee: Decimal::from(i as i64 + 1),
            day: i as i64,
            ..Default::default()
        });
        let aggregator = MetricsAggregator::default();
        let as_of = base().add_days(30);
        assert_eq!(
            aggregator.aggregate(&records, as_of).unwrap(),
            aggregator.aggregate(&records, as_of).unwrap()
        );
    }
}
