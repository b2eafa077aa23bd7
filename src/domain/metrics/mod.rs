//! Metrics module - behavioral statistics over classified records.

mod aggregated;
mod aggregator;
mod settings;

pub use aggregated::AggregatedMetrics;
pub use aggregator::{
    coefficient_of_variation, entries_per_contest, entries_per_week, most_active_weekday,
    normalized_entropy, roi_percent, MetricsAggregator,
};
pub use settings::MetricsSettings;
