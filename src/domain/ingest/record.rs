//! NormalizedRecord - one contest entry in platform-independent form.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ContestType, EntryId, Money, Platform, ProfileError, SportCode, Timestamp,
};

/// A single historical contest entry after normalization.
///
/// Immutable once built, except for the contest-type tag which the
/// classifier fills in exactly once via [`NormalizedRecord::classify_as`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    entry_id: EntryId,
    entered_at: Timestamp,
    sport: SportCode,
    contest_type: ContestType,
    entry_fee: Money,
    winnings: Money,
    points: Decimal,
    platform: Platform,
    contest_name: Option<String>,
    #[serde(default)]
    classified: bool,
}

impl NormalizedRecord {
    /// Creates an unclassified record with zero points and no contest name.
    pub fn new(
        entry_id: EntryId,
        entered_at: Timestamp,
        sport: SportCode,
        entry_fee: Money,
        winnings: Money,
        platform: Platform,
    ) -> Self {
        Self {
            entry_id,
            entered_at,
            sport,
            contest_type: ContestType::Unclassified,
            entry_fee,
            winnings,
            points: Decimal::ZERO,
            platform,
            contest_name: None,
            classified: false,
        }
    }

    /// Sets the contest name; blank names are stored as `None`.
    pub fn with_contest_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        let trimmed = name.trim();
        self.contest_name = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    /// Sets the fantasy points scored.
    pub fn with_points(mut self, points: Decimal) -> Self {
        self.points = points;
        self
    }

    /// Tags the record with its contest type.
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` if the record was already classified.
    pub fn classify_as(mut self, contest_type: ContestType) -> Result<Self, ProfileError> {
        if self.classified {
            return Err(ProfileError::invariant(format!(
                "record {} classified twice",
                self.entry_id
            )));
        }
        self.contest_type = contest_type;
        self.classified = true;
        Ok(self)
    }

    // Accessors

    pub fn entry_id(&self) -> &EntryId {
        &self.entry_id
    }

    pub fn entered_at(&self) -> Timestamp {
        self.entered_at
    }

    pub fn sport(&self) -> &SportCode {
        &self.sport
    }

    pub fn contest_type(&self) -> ContestType {
        self.contest_type
    }

    pub fn entry_fee(&self) -> Money {
        self.entry_fee
    }

    pub fn winnings(&self) -> Money {
        self.winnings
    }

    pub fn points(&self) -> Decimal {
        self.points
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn contest_name(&self) -> Option<&str> {
        self.contest_name.as_deref()
    }

    /// Returns true once the classifier has run on this record.
    pub fn is_classified(&self) -> bool {
        self.classified
    }

    /// Winnings minus entry fee.
    pub fn profit(&self) -> Decimal {
        self.winnings.amount() - self.entry_fee.amount()
    }

    /// Return on this entry as a percentage; zero for free entries.
    ///
    /// `None` when a near-zero fee pushes the ratio out of `Decimal` range.
    pub fn roi_percent(&self) -> Option<Decimal> {
        if self.entry_fee.is_zero() {
            return Some(Decimal::ZERO);
        }
        self.profit()
            .checked_div(self.entry_fee.amount())?
            .checked_mul(Decimal::ONE_HUNDRED)
    }

    /// True when the entry returned more than it cost.
    pub fn is_winning(&self) -> bool {
        self.winnings > self.entry_fee
    }
}
