//! Integration Tests for the Chain Explorer
//!
//! This crate contains various test modules:
//!
//! - `chain_client_tests`: `ChainClient` request encoding and response decoding against mockito
//! - `explorer_tests`: Out-of-order completions and per-kind state, driven by a scripted chain
//! - `end_to_end_tests`: Full explorer sessions over HTTP against a mocked provider
//! - `mock_infrastructure`: Reusable mock types for testing (RPC, scripted chain, fixtures)
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --package tests
//! ```
//!
//! Tests that start a mockito server are marked `#[serial]`.

#[cfg(test)]
mod chain_client_tests;


#[cfg(test)]
mod end_to_end_tests;

/// Mock infrastructure for testing
pub mod mock_infrastructure;
