//! DFS Persona - Behavioral profiling of daily-fantasy-sports contest history
//!
//! This crate turns a DraftKings or FanDuel contest-history export into
//! aggregate behavioral metrics, a three-way persona classification and a
//! vector of pattern weights for downstream recommenders.
//!
//! The pipeline runs strictly forward:
//! raw CSV → normalized records → classified records → metrics → persona → weights.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
