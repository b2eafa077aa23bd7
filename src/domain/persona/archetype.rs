//! Archetype enum.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A behavioral archetype a user's history is scored against.
///
/// Declaration order is the canonical order used to break score ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    /// Tournament-focused, high stakes, narrow sport focus.
    Bettor,
    /// Cash-game and multi-lineup volume player.
    Optimizer,
    /// Low-stakes, multi-sport, experimental player.
    Researcher,
}

impl Archetype {
    /// Returns all archetypes in canonical order.
    pub fn all() -> &'static [Archetype] {
        &[Archetype::Bettor, Archetype::Optimizer, Archetype::Researcher]
    }

    /// Returns a one-line description of the archetype.
    pub fn description(&self) -> &'static str {
        match self {
            Archetype::Bettor => "Tournament grinder with higher stakes and a narrow sport focus",
            Archetype::Optimizer => "Volume player favoring cash games and multiple lineups",
            Archetype::Researcher => "Low-stakes experimenter spread across many sports",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Archetype::Bettor => "Bettor",
            Archetype::Optimizer => "Optimizer",
            Archetype::Researcher => "Researcher",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_canonical_order() {
        assert_eq!(
            Archetype::all(),
            &[Archetype::Bettor, Archetype::Optimizer, Archetype::Researcher]
        );
    }

    #[test]
    fn serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&Archetype::Researcher).unwrap(),
            "\"researcher\""
        );
    }
}
