use reqwest::{Client, ClientBuilder};
use serde::{Deserialize, Serialize};
use std::{sync::Arc, time::Duration};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::provider::ProviderError;

/// Configuration for HTTP client concurrency, timeout and retry behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpClientConfig {
    /// Maximum number of concurrent HTTP requests allowed
    pub concurrent_limit: usize,
    /// Permit acquisition timeout in milliseconds
    pub permit_timeout_ms: u64,
    /// Retries for 5xx responses and connection errors. Zero disables retries.
    pub max_retries: u32,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self { concurrent_limit: 16, permit_timeout_ms: 500, max_retries: 0 }
    }
}

/// HTTP client with semaphore-based concurrency control.
///
/// Shared by every provider call. Request URLs may embed credentials, so they
/// are never written to logs or error messages.
pub struct HttpClient {
    client: Client,
    concurrent_limit: Arc<Semaphore>,
    config: HttpClientConfig,
}

/// RAII guard ensuring semaphore permits are always released.
struct PermitGuard {
    _permit: OwnedSemaphorePermit,
    semaphore: Arc<Semaphore>,
}

impl PermitGuard {
    fn new(permit: OwnedSemaphorePermit, semaphore: Arc<Semaphore>) -> Self {
        Self { _permit: permit, semaphore }
    }

    fn available_permits(&self) -> usize {
        self.semaphore.available_permits()
    }
}

impl Drop for PermitGuard {
    fn drop(&mut self) {
        tracing::trace!(
            available_permits = self.semaphore.available_permits(),
            "permit guard dropped"
        );
    }
}

impl HttpClient {
    /// Creates a new HTTP client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying reqwest client fails to build.
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Sanitizes network errors so the request URL never leaks.
    fn sanitize_network_error(error: &reqwest::Error) -> String {
        if error.is_connect() {
            "connection refused or unreachable".to_string()
        } else if error.is_timeout() {
            "connection timed out".to_string()
        } else if error.is_request() {
            "request failed".to_string()
        } else if error.is_body() {
            "response body error".to_string()
        } else if error.is_decode() {
            "response decode error".to_string()
        } else if error.is_redirect() {
            "too many redirects".to_string()
        } else {
            "network error".to_string()
        }
    }

    /// Creates a new HTTP client with the provided configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying reqwest client fails to build.
    pub fn with_config(config: HttpClientConfig) -> Result<Self, ProviderError> {
        let client = ClientBuilder::new()
            .pool_idle_timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(config.concurrent_limit)
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(45))
            .http2_adaptive_window(true)
            .use_rustls_tls()
            .redirect(reqwest::redirect::Policy::none())
            .user_agent(concat!("chain-explorer/", env!("CARGO_PKG_VERSION")))
            .tcp_keepalive(Duration::from_secs(30))
            .tcp_nodelay(true)
            .build()
            .map_err(|e| {
                tracing::error!(error = %e, "failed to build http client");
                ProviderError::ConnectionFailed(format!("HTTP client build failed: {e}"))
            })?;

        Ok(Self {
            client,
            concurrent_limit: Arc::new(Semaphore::new(config.concurrent_limit)),
            config,
        })
    }

    /// Sends an HTTP POST request with semaphore-based concurrency control.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::Timeout`] if permit acquisition or the request times out
    /// - [`ProviderError::ConcurrencyLimit`] if the semaphore is closed
    /// - [`ProviderError::HttpError`] for non-success HTTP status codes
    /// - [`ProviderError::ConnectionFailed`] for network-related failures
    pub async fn send_request(
        &self,
        url: &str,
        body: bytes::Bytes,
        timeout: Duration,
    ) -> Result<bytes::Bytes, ProviderError> {
        let permit = tokio::time::timeout(
            Duration::from_millis(self.config.permit_timeout_ms),
            Arc::clone(&self.concurrent_limit).acquire_owned(),
        )
        .await
        .map_err(|_| {
            tracing::warn!(
                available_permits = self.concurrent_limit.available_permits(),
                "http client semaphore acquisition timeout"
            );
            ProviderError::Timeout
        })?
        .map_err(|_| {
            tracing::warn!("http client semaphore closed");
            ProviderError::ConcurrencyLimit
        })?;

        let permit_guard = PermitGuard::new(permit, self.concurrent_limit.clone());

        tracing::trace!(
            available_permits = permit_guard.available_permits(),
            "http request started"
        );

        let mut retries = 0;

        loop {
            let result = self
                .client
                .post(url)
                .header("content-type", "application/json")
                .body(body.clone())
                .timeout(timeout)
                .send()
                .await;

            match result {
                Ok(response) => {
                    if response.status().is_success() {
                        let result =
                            response.bytes().await.map_err(|e| ProviderError::Network(e.without_url()));
                        tracing::trace!(
                            available_permits = permit_guard.available_permits(),
                            "http request completed"
                        );
                        return result;
                    } else if response.status().is_server_error() && retries < self.config.max_retries
                    {
                        retries += 1;
                        tokio::time::sleep(Duration::from_millis(100 * (1 << retries))).await;
                        continue;
                    }

                    let status = response.status().as_u16();
                    let raw_text = response.text().await.unwrap_or_default();
                    let sanitized_text = if raw_text.len() > 256 {
                        let cut = (0..=256).rev().find(|i| raw_text.is_char_boundary(*i)).unwrap_or(0);
                        format!("{}... (truncated)", &raw_text[..cut])
                    } else {
                        raw_text
                    };
                    tracing::debug!(status = status, "http request failed");
                    return Err(ProviderError::HttpError(status, sanitized_text));
                }
                Err(_e) if retries < self.config.max_retries => {
                    retries += 1;
                    tokio::time::sleep(Duration::from_millis(100 * (1 << retries))).await;
                }
                Err(e) => {
                    tracing::debug!(
                        available_permits = permit_guard.available_permits(),
                        "http request error"
                    );
                    if e.is_timeout() {
                        return Err(ProviderError::Timeout);
                    }
                    return Err(ProviderError::ConnectionFailed(Self::sanitize_network_error(&e)));
                }
            }
        }
    }

    #[cfg(test)]
    #[must_use]
    pub fn available_permits(&self) -> usize {
        self.concurrent_limit.available_permits()
    }
}
