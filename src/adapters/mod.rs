//! Adapters - Implementations of port interfaces.
//!
//! - `clock` - System and fixed clocks

pub mod clock;

pub use clock::{FixedClock, SystemClock};
