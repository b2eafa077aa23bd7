//! Persona module - archetype scoring over aggregated metrics.
//!
//! Each archetype owns a table of typed signals. Signal fits are averaged
//! per archetype and the three raw scores are normalized to sum to 1.0.

mod archetype;
mod scorer;
mod signals;
mod vector;

pub use archetype::Archetype;
pub use scorer::{PersonaScorer, PersonaSettings};
pub use signals::{ArchetypeSignals, MetricSignal, SignalRange, SignalShape, SignalSpec};
pub use vector::{PersonaScores, PersonaVector, HYBRID_THRESHOLD, SUM_TOLERANCE};
