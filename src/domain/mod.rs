//! Domain layer containing the profiling pipeline and its types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `ingest` - Export format detection and record normalization
//! - `classification` - Contest-type inference from contest names
//! - `metrics` - Behavioral statistics over classified records
//! - `persona` - Archetype scoring
//! - `weights` - Persona-blended pattern multipliers
//!
//! Every stage is a pure function of its inputs; tables and constants are
//! passed in explicitly.

pub mod classification;
pub mod foundation;
pub mod ingest;
pub mod metrics;
pub mod persona;
pub mod weights;
