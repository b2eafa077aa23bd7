//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod profile;

pub use profile::{BehavioralProfile, BuildProfileCommand, BuildProfileHandler};
