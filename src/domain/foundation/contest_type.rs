//! Contest type enum.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The structural class of a contest, inferred from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContestType {
    HeadToHead,
    Cash,
    MultiEntry,
    Tournament,
    Unclassified,
}

impl ContestType {
    /// Returns all contest types, classified ones in classifier priority order.
    pub fn all() -> &'static [ContestType] {
        &[
            ContestType::HeadToHead,
            ContestType::Cash,
            ContestType::MultiEntry,
            ContestType::Tournament,
            ContestType::Unclassified,
        ]
    }

    /// Returns true for every tag except `Unclassified`.
    pub fn is_classified(&self) -> bool {
        !matches!(self, ContestType::Unclassified)
    }
}

impl Default for ContestType {
    fn default() -> Self {
        ContestType::Unclassified
    }
}

impl fmt::Display for ContestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContestType::HeadToHead => "Head-to-Head",
            ContestType::Cash => "Cash",
            ContestType::MultiEntry => "Multi-Entry",
            ContestType::Tournament => "Tournament",
            ContestType::Unclassified => "Unclassified",
        };
        write!(f, "{}", name)
    }
}
