//! ContestClassifier - tags records with a contest type from the contest name.

use regex::{Regex, RegexBuilder};
use thiserror::Error;

use super::patterns::ClassifierPatterns;
use crate::domain::foundation::{ContestType, DomainError, ErrorCode, ProfileError};
use crate::domain::ingest::NormalizedRecord;

/// Errors building a classifier from custom patterns.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassifierError {
    #[error("Invalid {contest_type} pattern '{pattern}': {reason}")]
    InvalidPattern {
        contest_type: ContestType,
        pattern: String,
        reason: String,
    },
}

impl From<ClassifierError> for DomainError {
    fn from(err: ClassifierError) -> Self {
        let ClassifierError::InvalidPattern { pattern, .. } = &err;
        DomainError::new(ErrorCode::ValidationFailed, err.to_string())
            .with_detail("pattern", pattern.clone())
    }
}

#[derive(Debug, Clone)]
struct CompiledPattern {
    contest_type: ContestType,
    regex: Regex,
}

/// Rule-based contest classifier.
///
/// First match wins, in priority order head-to-head, cash, multi-entry,
/// tournament. A missing or unmatched name is `Unclassified`.
#[derive(Debug, Clone)]
pub struct ContestClassifier {
    patterns: Vec<CompiledPattern>,
}

impl ContestClassifier {
    /// Compiles a classifier from pattern sources.
    ///
    /// # Errors
    ///
    /// `InvalidPattern` naming the first pattern that fails to compile.
    pub fn with_patterns(patterns: &ClassifierPatterns) -> Result<Self, ClassifierError> {
        let mut compiled = Vec::new();
        for (contest_type, sources) in patterns.in_priority_order() {
            for source in sources {
                let regex = RegexBuilder::new(source)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| ClassifierError::InvalidPattern {
                        contest_type,
                        pattern: source.clone(),
                        reason: e.to_string(),
                    })?;
                compiled.push(CompiledPattern {
                    contest_type,
                    regex,
                });
            }
        }
        Ok(Self { patterns: compiled })
    }

    /// Classifies a contest name.
    pub fn classify(&self, contest_name: Option<&str>) -> ContestType {
        self.matched_pattern(contest_name)
            .map(|(contest_type, _)| contest_type)
            .unwrap_or(ContestType::Unclassified)
    }

    /// Returns the tag and the pattern source that fired, if any.
    pub fn matched_pattern(&self, contest_name: Option<&str>) -> Option<(ContestType, &str)> {
        let name = contest_name?.trim();
        if name.is_empty() {
            return None;
        }
        self.patterns
            .iter()
            .find(|p| p.regex.is_match(name))
            .map(|p| (p.contest_type, p.regex.as_str()))
    }

    /// Tags one record.
    ///
    /// # Errors
    ///
    /// `InvariantViolation` if the record was already classified.
    pub fn classify_record(&self, record: NormalizedRecord) -> Result<NormalizedRecord, ProfileError> {
        let contest_type = self.classify(record.contest_name());
        record.classify_as(contest_type)
    }

    /// Tags every record in a batch.
    pub fn classify_all(
        &self,
        records: Vec<NormalizedRecord>,
    ) -> Result<Vec<NormalizedRecord>, ProfileError> {
        let classified = records
            .into_iter()
            .map(|r| self.classify_record(r))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(records = classified.len(), "Classified contest entries");
        Ok(classified)
    }
}

impl Default for ContestClassifier {
    fn default() -> Self {
        Self::with_patterns(&ClassifierPatterns::default())
            .expect("built-in contest patterns compile")
    }
}
