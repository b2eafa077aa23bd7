//! Contest-name pattern sets, one per classified contest type.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ContestType;

/// Ordered regex sources for each contest type.
///
/// Patterns are matched case-insensitively. Categories are checked in the
/// fixed order head-to-head, cash, multi-entry, tournament.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierPatterns {
    pub head_to_head: Vec<String>,
    pub cash: Vec<String>,
    pub multi_entry: Vec<String>,
    pub tournament: Vec<String>,
}

impl ClassifierPatterns {
    /// Pattern lists paired with their tag, in priority order.
    pub fn in_priority_order(&self) -> [(ContestType, &[String]); 4] {
        [
            (ContestType::HeadToHead, &self.head_to_head),
            (ContestType::Cash, &self.cash),
            (ContestType::MultiEntry, &self.multi_entry),
            (ContestType::Tournament, &self.tournament),
        ]
    }

    /// Adds a pattern to the end of one category's list.
    pub fn push(&mut self, contest_type: ContestType, pattern: impl Into<String>) {
        let list = match contest_type {
            ContestType::HeadToHead => &mut self.head_to_head,
            ContestType::Cash => &mut self.cash,
            ContestType::MultiEntry => &mut self.multi_entry,
            ContestType::Tournament => &mut self.tournament,
            ContestType::Unclassified => return,
        };
        list.push(pattern.into());
    }
}

fn owned(patterns: &[&str]) -> Vec<String> {
    patterns.iter().map(|p| p.to_string()).collect()
}

impl Default for ClassifierPatterns {
    fn default() -> Self {
        Self {
            head_to_head: owned(&[
                r"\bH2H\b",
                r"\bhead\s*to\s*head\b",
                r"\bheads?\s*up\b",
                r"\b1v1\b",
                r"\bone\s*on\s*one\b",
            ]),
            cash: owned(&[
                r"\b50/50\b",
                r"\bfifty[\s-]*fifty\b",
                r"\bdouble[\s-]*up\b",
                r"\bcash\s*game\b",
                r"\bsingle[\s-]*entry\b.*\bcash\b",
            ]),
            multi_entry: owned(&[
                r"\b\d+[\s-]*max\b",
                r"\bmulti[\s-]*entry\b",
                r"\b\d+[\s-]*entry\b",
                r"\bunlimited\b.*\bentry\b",
            ]),
            tournament: owned(&[
                r"\bGPP\b",
                r"\btournament\b",
                r"\$[\d,]+K\b",
                r"\bguaranteed\b",
                r"\bGTD\b",
                r"\bmillion\b",
                r"\bfreeroll\b",
                r"\bshowdown\b",
                r"\bclassic\b",
                r"\bshot\b",
                r"\bslate\b",
                r"\bmaker\b",
            ]),
        }
    }
}
