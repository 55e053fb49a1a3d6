//! Mock Infrastructure for Testing the Chain Explorer
//!
//! ## Components
//!
//! - `RpcMockBuilder`: Wraps mockito to provide Ethereum JSON-RPC mocking
//! - `ScriptedChain`: In-memory `ChainApi` with per-request release gates
//! - Test helpers for common fixtures
//!
//! ## Usage
//!
//! ```ignore
//! use tests::mock_infrastructure::{client_for, BlockResponseBuilder, RpcMockBuilder};
//!
//! let mut mock = RpcMockBuilder::new().await;
//! mock.mock_get_block_by_number(100, false, &BlockResponseBuilder::new(100).build());
//!
//! let client = client_for(&mock.url());
//! ```

pub mod test_helpers;

pub use rpc_mock::{BlockResponseBuilder, RpcMockBuilder};
pub use scripted_chain::{Gate, ScriptedChain};
pub use test_helpers::*;
