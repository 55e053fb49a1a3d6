use thiserror::Error;

/// Classification of JSON-RPC errors returned by a provider.
///
/// The explorer never retries on its own, but the category decides whether a
/// failure is reported as retryable to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RpcErrorCategory {
    /// Invalid request, method not found, invalid params.
    Client,
    /// Internal or server-side failure at the provider.
    Server,
    /// Rate limiting at JSON-RPC level (-32005).
    RateLimit,
    /// The provider could not parse the request.
    Parse,
    /// Execution errors (reverts, out of gas).
    Execution,
}

impl RpcErrorCategory {
    /// Classifies a JSON-RPC error code and message into a category.
    ///
    /// Standard JSON-RPC error codes:
    /// - -32700: Parse error
    /// - -32600: Invalid Request
    /// - -32601: Method not found
    /// - -32602: Invalid params
    /// - -32603: Internal error
    /// - -32005: Limit exceeded (rate limiting)
    /// - -32000 to -32099: Server errors (varies by message content)
    #[must_use]
    pub fn from_code_and_message(code: i32, message: &str) -> Self {
        match code {
            -32700 => Self::Parse,
            -32602..=-32600 => Self::Client,
            -32005 => Self::RateLimit,
            -32099..=-32000 => {
                let message_lower = message.to_lowercase();
                if message_lower.contains("execution reverted") ||
                    message_lower.contains("out of gas") ||
                    message_lower.contains("revert")
                {
                    Self::Execution
                } else {
                    Self::Server
                }
            }
            _ => Self::Server,
        }
    }

    /// Returns `true` if re-issuing the same request may succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::RateLimit | Self::Server)
    }

    /// Returns a static string representation for log fields.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client_error",
            Self::Server => "server_error",
            Self::RateLimit => "rate_limit",
            Self::Parse => "parse_error",
            Self::Execution => "execution_error",
        }
    }
}

/// Errors that can occur while talking to the remote chain-data provider.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ProviderError {
    /// Request exceeded the configured timeout duration.
    #[error("Request timeout")]
    Timeout,

    /// Failed to establish a connection to the provider.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP-level error occurred (non-2xx status code).
    ///
    /// First field is the HTTP status code, second is the (truncated) body.
    #[error("HTTP error: {0}")]
    HttpError(u16, String),

    /// JSON-RPC error returned by the provider.
    #[error("RPC error {0}: {1}")]
    RpcError(i32, String),

    /// Network-level error from the underlying HTTP client.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response could not be parsed or did not have the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request could not be serialized.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Maximum concurrent requests limit has been reached.
    #[error("Concurrency limit reached")]
    ConcurrencyLimit,
}

impl ProviderError {
    /// Returns the RPC error category if this is an RPC error.
    #[must_use]
    pub fn rpc_category(&self) -> Option<RpcErrorCategory> {
        match self {
            Self::RpcError(code, message) => {
                Some(RpcErrorCategory::from_code_and_message(*code, message))
            }
            _ => None,
        }
    }

    /// Returns `true` if this error is transient and re-issuing the command may succeed.
    ///
    /// Transient errors include timeouts, connection failures, HTTP 5xx and 429,
    /// and RPC server or rate-limit errors.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout |
            Self::Network(_) |
            Self::ConnectionFailed(_) |
            Self::ConcurrencyLimit => true,
            Self::HttpError(status, _) => (500..=599).contains(status) || *status == 429,
            Self::RpcError(_, _) => self.rpc_category().is_some_and(|cat| cat.is_transient()),
            Self::InvalidResponse(_) | Self::InvalidRequest(_) => false,
        }
    }
}
