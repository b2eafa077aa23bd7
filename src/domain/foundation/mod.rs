//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the profiling domain.

mod contest_type;
mod errors;
mod ids;
mod money;
mod platform;
mod sport;
mod timestamp;

pub use contest_type::ContestType;
pub use errors::{DomainError, ErrorCode, ProfileError, ValidationError};
pub use ids::{AnalysisId, EntryId};
pub use money::Money;
pub use platform::Platform;
pub use sport::SportCode;
pub use timestamp::Timestamp;
