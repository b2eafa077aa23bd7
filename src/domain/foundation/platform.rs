//! Source platform of a contest history export.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// A DFS operator whose CSV export format is understood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    DraftKings,
    FanDuel,
}

impl Platform {
    /// Returns all platforms in detection order.
    pub fn all() -> &'static [Platform] {
        &[Platform::DraftKings, Platform::FanDuel]
    }

    /// Stable machine-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::DraftKings => "draft_kings",
            Platform::FanDuel => "fan_duel",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::DraftKings => "DraftKings",
            Platform::FanDuel => "FanDuel",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Platform {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match folded.as_str() {
            "draftkings" | "dk" => Ok(Platform::DraftKings),
            "fanduel" | "fd" => Ok(Platform::FanDuel),
            _ => Err(ValidationError::invalid_value(
                "platform",
                s,
                &["DraftKings", "FanDuel"],
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_spellings() {
        assert_eq!("DraftKings".parse::<Platform>().unwrap(), Platform::DraftKings);
        assert_eq!("draft_kings".parse::<Platform>().unwrap(), Platform::DraftKings);
        assert_eq!("FD".parse::<Platform>().unwrap(), Platform::FanDuel);
    }

    #[test]
    fn rejects_unknown_platform() {
        assert!("Yahoo".parse::<Platform>().is_err());
    }

    #[test]
    fn serializes_to_snake_case() {
        let json = serde_json::to_string(&Platform::FanDuel).unwrap();
        assert_eq!(json, "\"fan_duel\"");
        assert_eq!(Platform::FanDuel.as_str(), "fan_duel");
    }

    #[test]
    fn all_lists_both_platforms() {
        assert_eq!(Platform::all().len(), 2);
    }
}
