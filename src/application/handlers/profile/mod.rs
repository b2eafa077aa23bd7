//! Profile handlers.

mod build_profile;

pub use build_profile::{BehavioralProfile, BuildProfileCommand, BuildProfileHandler};
