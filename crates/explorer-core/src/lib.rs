//! # Explorer Core
//!
//! Core library for a race-free blockchain explorer over Ethereum JSON-RPC providers.
//!
//! This crate provides:
//!
//! - **[`chain`]**: [`chain::ChainClient`], a stateless façade for head height, blocks,
//!   transaction receipts and balances, decoding provider JSON into typed views.
//!
//! - **[`explorer`]**: the orchestrator. A single task owns the per-kind
//!   sequence-numbered [`explorer::ExplorerState`] and publishes
//!   [`explorer::ExplorerSnapshot`]s; late responses to superseded requests are discarded.
//!
//! - **[`provider`]**: HTTP transport with bounded concurrency and JSON-RPC framing.
//!
//! - **[`config`]**: layered configuration (defaults, TOML file, environment).
//!
//! ## Request Flow
//!
//! ```text
//! select_block(101)
//!       │
//!       ▼
//! ┌──────────────────┐
//! │  ExplorerState   │  block: seq 2, Pending
//! │    dispatch      │
//! └────────┬─────────┘
//!          │ Ticket { block, 2 }
//!          ▼
//! ┌──────────────────┐
//! │   ChainClient    │  eth_getBlockByNumber("0x65", false)
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐
//! │  ExplorerState   │ ─── seq < latest ──► discarded (stale)
//! │      apply       │
//! └────────┬─────────┘
//!          │ current
//!          ▼
//!   ExplorerSnapshot ──► presentation
//! ```

pub mod chain;
pub mod config;
pub mod explorer;
pub mod provider;
pub mod types;
pub mod utils;
