//! Classification module - contest-type inference from contest names.

mod classifier;
mod patterns;

pub use classifier::{ClassifierError, ContestClassifier};
pub use patterns::ClassifierPatterns;
