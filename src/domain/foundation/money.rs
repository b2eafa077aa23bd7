//! Money value object: a non-negative exact decimal amount.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A non-negative monetary amount.
///
/// Arithmetic that may go negative (profit, ROI) is done on the inner
/// `Decimal`, never on `Money`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    /// Zero dollars.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a Money value, rejecting negative amounts.
    pub fn try_new(amount: Decimal) -> Result<Self, ValidationError> {
        Self::try_for_field("amount", amount)
    }

    /// Creates a Money value, naming `field` in the error on failure.
    pub fn try_for_field(field: &str, amount: Decimal) -> Result<Self, ValidationError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(ValidationError::negative_amount(field, amount));
        }
        Ok(Self(amount))
    }

    /// Parses an export currency cell such as `"$1,234.50"`.
    ///
    /// Whitespace, `$` and `,` are stripped; an empty cell or a lone `-`
    /// means zero.
    pub fn parse_currency(field: &str, raw: &str) -> Result<Self, ValidationError> {
        let cleaned: String = raw
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '$' && *c != ',')
            .collect();

        if cleaned.is_empty() || cleaned == "-" {
            return Ok(Self::ZERO);
        }

        let amount: Decimal = cleaned.parse().map_err(|_| {
            ValidationError::invalid_format(field, format!("'{}' is not a currency amount", raw))
        })?;
        Self::try_for_field(field, amount)
    }

    /// Returns the amount as a Decimal.
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Adds two amounts, or `None` if the sum leaves the `Decimal` range.
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Totals amounts, or `None` on overflow.
    pub fn checked_sum(amounts: impl IntoIterator<Item = Money>) -> Option<Money> {
        amounts
            .into_iter()
            .try_fold(Money::ZERO, |total, amount| total.checked_add(amount))
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::ZERO
    }
}

impl TryFrom<Decimal> for Money {
    type Error = ValidationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}
