//! Filmdex Core - Shared runtime plumbing
//!
//! This crate provides the pieces every Filmdex component leans on:
//! configuration with environment overrides, the request pacer used to
//! space out provider calls, and tracing setup for the CLI.

pub mod config;
pub mod pacing;
pub mod tracing_setup;

// Re-export main types for convenient access
pub use config::{FilmdexConfig, ProviderConfig, SearchConfig};
pub use pacing::{FixedDelayPacer, RequestPacer};
pub use tracing_setup::{CliLogLevel, init_tracing};
