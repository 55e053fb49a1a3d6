//! Provider plumbing: HTTP transport and JSON-RPC framing.
//!
//! - [`HttpClient`]: pooled reqwest client with semaphore-bounded concurrency
//! - [`RpcTransport`]: JSON-RPC request/response framing against one endpoint
//! - [`ProviderError`]: transport and remote failures, classified for retryability
//!
//! Nothing in this module knows about blocks or receipts; decoding lives in
//! [`crate::chain`].

pub mod errors;
pub mod http_client;
pub mod transport;

pub use errors::{ProviderError, RpcErrorCategory};
pub use http_client::{HttpClient, HttpClientConfig};
pub use transport::RpcTransport;
