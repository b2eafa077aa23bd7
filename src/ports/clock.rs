//! Clock Port - source of the analysis reference time.
//!
//! Time-relative metrics (recency, freshness) are computed against the
//! instant this port returns, so tests can pin it.

use crate::domain::foundation::Timestamp;

/// Port for reading the current time.
///
/// # Contract
///
/// Implementations must be cheap to call and never fail.
pub trait Clock: Send + Sync {
    /// Returns the current instant in UTC.
    fn now(&self) -> Timestamp;
}
