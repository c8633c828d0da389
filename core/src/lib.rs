//! # Scopr Core
//!
//! Orchestration for the recon pipeline: host set construction, the
//! concurrent prober, per-protocol aggregation and the two batch phases that
//! tie them together.

pub mod aggregator;
pub mod hosts;
pub mod pipeline;
pub mod prober;

#[cfg(test)]
mod testing;
