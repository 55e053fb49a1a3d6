//! Chain queries against a JSON-RPC provider.
//!
//! [`ChainClient`] is a stateless façade: each [`ChainApi`] method issues one
//! (or, for receipts, two concurrent) provider calls and decodes the result
//! into the semantic views in [`types`]. Provider `null` results become
//! [`ChainError::NotFound`]; malformed payloads become provider errors and
//! never produce a partially populated view.
//!
//! ```text
//! ChainApi ──► ChainClient ──► RpcTransport ──► HttpClient ──► provider
//!                   │
//!                   └── decode: JSON ──► BlockView / TransactionReceiptView / U256
//! ```

pub mod client;
pub mod decode;
pub mod errors;
pub mod types;

pub use client::{parse_address, ChainApi, ChainClient};
pub use errors::{ChainError, Entity, ErrorKind};
pub use types::{
    Address, BalanceResult, BlockHash, BlockTransactions, BlockView, Hash32, HexParseError,
    ReceiptStatus, TransactionReceiptView, TransactionSummary, TxHash,
};
