//! Sport code value object.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::ValidationError;

/// Long-form sport names mapped onto the canonical league code.
static SPORT_ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("FOOTBALL", "NFL"),
        ("BASKETBALL", "NBA"),
        ("BASEBALL", "MLB"),
        ("HOCKEY", "NHL"),
        ("GOLF", "PGA"),
        ("UFC", "MMA"),
        ("NCAAB", "CBB"),
        ("NCAAF", "CFB"),
        ("COLLEGE BASKETBALL", "CBB"),
        ("COLLEGE FOOTBALL", "CFB"),
    ])
});

/// Uppercase, alias-normalized sport code such as `NFL` or `NBA`.
///
/// Codes outside the alias table pass through uppercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SportCode(String);

impl SportCode {
    /// Normalizes a raw sport cell.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        let upper = raw
            .as_ref()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_uppercase();
        if upper.is_empty() {
            return Err(ValidationError::empty_field("sport"));
        }
        let code = SPORT_ALIASES
            .get(upper.as_str())
            .map(|alias| alias.to_string())
            .unwrap_or(upper);
        Ok(Self(code))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SportCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SportCode> for String {
    fn from(code: SportCode) -> Self {
        code.0
    }
}

impl fmt::Display for SportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
