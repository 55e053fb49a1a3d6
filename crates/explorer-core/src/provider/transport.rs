use std::{fmt, sync::Arc, time::Duration};

use crate::{
    provider::{HttpClient, ProviderError},
    types::{JsonRpcRequest, JsonRpcResponse},
};

/// JSON-RPC transport bound to a single provider endpoint.
///
/// Holds no per-call state: every request carries the same id and the
/// transport can be shared freely between concurrent queries.
pub struct RpcTransport {
    http_client: Arc<HttpClient>,
    url: String,
    timeout: Duration,
}

impl fmt::Debug for RpcTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcTransport")
            .field("url", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl RpcTransport {
    #[must_use]
    pub fn new(http_client: Arc<HttpClient>, url: impl Into<String>, timeout: Duration) -> Self {
        Self { http_client, url: url.into(), timeout }
    }

    /// Sends a JSON-RPC request and returns its `result`.
    ///
    /// A `null` result is returned as `Ok(None)` so callers can map it to a
    /// not-found condition.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::InvalidRequest` if request serialization fails,
    /// `ProviderError::InvalidResponse` if the body is not a JSON-RPC response,
    /// `ProviderError::RpcError` if the response carries an error object, and
    /// any transport error from [`HttpClient::send_request`].
    pub async fn call(
        &self,
        method: &'static str,
        params: serde_json::Value,
    ) -> Result<Option<serde_json::Value>, ProviderError> {
        let request = JsonRpcRequest::new(method, params, 1);
        let body = serde_json::to_vec(&request).map_err(|e| {
            ProviderError::InvalidRequest(format!("Failed to serialize request: {e}"))
        })?;

        let start_time = std::time::Instant::now();
        let response_bytes = self
            .http_client
            .send_request(&self.url, bytes::Bytes::from(body), self.timeout)
            .await
            .inspect_err(|e| tracing::debug!(method = method, error = %e, "provider call failed"))?;

        let response: JsonRpcResponse = serde_json::from_slice(&response_bytes)
            .map_err(|e| ProviderError::InvalidResponse(format!("Invalid JSON: {e}")))?;

        tracing::trace!(
            method = method,
            elapsed_ms = u64::try_from(start_time.elapsed().as_millis()).unwrap_or(u64::MAX),
            "provider call completed"
        );

        if let Some(error) = response.error {
            let rpc_error = ProviderError::RpcError(error.code, error.message);
            if let Some(category) = rpc_error.rpc_category() {
                tracing::debug!(method = method, category = category.as_str(), "provider rpc error");
            }
            return Err(rpc_error);
        }

        Ok(response.result)
    }
}
