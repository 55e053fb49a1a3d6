//! JSON-RPC 2.0 wire types shared by the provider transport.
//!
//! Only the client side of the protocol is modelled: the explorer builds
//! requests and parses responses, it never serves them.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// JSON-RPC protocol version constant to avoid repeated allocations.
pub const JSONRPC_VERSION: &str = "2.0";

/// Pre-allocated `Cow` for the JSON-RPC version.
pub const JSONRPC_VERSION_COW: Cow<'static, str> = Cow::Borrowed(JSONRPC_VERSION);

/// Provider methods issued by the chain client.
pub mod methods {
    pub const BLOCK_NUMBER: &str = "eth_blockNumber";
    pub const GET_BLOCK_BY_NUMBER: &str = "eth_getBlockByNumber";
    pub const GET_TRANSACTION_RECEIPT: &str = "eth_getTransactionReceipt";
    pub const GET_TRANSACTION_BY_HASH: &str = "eth_getTransactionByHash";
    pub const GET_BALANCE: &str = "eth_getBalance";
}

/// JSON-RPC 2.0 request structure.
///
/// # Example
///
/// ```
/// use explorer_core::types::JsonRpcRequest;
/// use serde_json::json;
///
/// let request = JsonRpcRequest::new("eth_blockNumber", json!([]), 1);
///
/// assert_eq!(request.method, "eth_blockNumber");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: Cow<'static, str>,
    pub method: Cow<'static, str>,
    pub params: serde_json::Value,
    pub id: u64,
}

impl JsonRpcRequest {
    /// Creates a new JSON-RPC request with zero allocation for the version string.
    #[must_use]
    pub fn new(method: &'static str, params: serde_json::Value, id: u64) -> Self {
        Self { jsonrpc: JSONRPC_VERSION_COW, method: Cow::Borrowed(method), params, id }
    }
}

/// JSON-RPC 2.0 response structure.
///
/// A `null` result deserializes to `None`; providers use it to signal that the
/// requested block or transaction does not exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: Cow<'static, str>,
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
    #[serde(default)]
    pub id: serde_json::Value,
}

/// JSON-RPC 2.0 error object.
///
/// # Example
///
/// ```
/// use explorer_core::types::JsonRpcError;
///
/// let error: JsonRpcError =
///     serde_json::from_str(r#"{"code":-32602,"message":"invalid argument"}"#).unwrap();
/// assert_eq!(error.code, -32602);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}
