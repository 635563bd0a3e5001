//! Credit risk scoring core: turns a default probability into an auditable lending decision.

pub mod config;
pub mod error;
pub mod scoring;
pub mod telemetry;
