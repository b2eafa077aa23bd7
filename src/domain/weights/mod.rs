//! Weights module - personalized pattern multipliers.

mod coefficients;
mod pattern;
mod synthesizer;
mod vector;

pub use coefficients::{CoefficientTable, WeightSettings};
pub use pattern::PatternCategory;
pub use synthesizer::{
    WeightEffect, WeightExplanation, WeightSynthesizer, BOOST_THRESHOLD, DAMPEN_THRESHOLD,
};
pub use vector::WeightVector;
