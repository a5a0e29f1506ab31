//! Integration tests for Filmdex
//!
//! These tests exercise the full search pipeline against scripted
//! providers, and the OMDb client against a local mock HTTP server.

#[path = "style.rs"]
mod style;

#[path = "integration/search_pipeline.rs"]
mod search_pipeline;

#[path = "integration/omdb_wire.rs"]
mod omdb_wire;
