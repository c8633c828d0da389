//! # scopr common
//!
//! Shared building blocks for the scopr pipeline:
//!
//! * **[`scope`]**: scope records, token extraction, domain normalization and
//!   wildcard expansion.
//! * **[`probe`]**: protocol, target and outcome models plus the
//!   [`probe::LivenessCheck`] seam implemented by `scopr-protocols`.
//! * **[`config`]**: the run configuration handed to every component.
//! * **[`error`]**: error types shared across crates.

pub mod config;
pub mod error;
pub mod log;
pub mod probe;
pub mod scope;

#[doc(hidden)]
pub use tracing;
