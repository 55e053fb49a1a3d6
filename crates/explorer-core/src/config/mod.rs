//! Application configuration with layered loading.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in this order (later overrides earlier):
//!
//! 1. **Compiled defaults**: Hardcoded in struct `Default` implementations
//! 2. **Config file**: TOML file specified by `EXPLORER_CONFIG` env var
//! 3. **Environment variables**: `EXPLORER__*` env vars override specific fields
//!
//! # Configuration Sections
//!
//! - [`ProviderConfig`]: chain-data provider network, credentials and timeout
//! - [`HttpClientConfig`]: outbound concurrency and retry settings
//! - [`ExplorerConfig`]: presentation-facing explorer settings
//! - [`LoggingConfig`]: Log level and format
//!
//! # Example
//!
//! ```toml
//! [provider]
//! network = "eth-mainnet"
//! api_key = "YOUR_API_KEY"
//! timeout_seconds = 30
//!
//! [http]
//! concurrent_limit = 16
//!
//! [explorer]
//! recent_blocks = 3
//! ```

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::{fmt, path::Path, str::FromStr, time::Duration};

pub use crate::provider::HttpClientConfig;

/// Chain networks served by the hosted provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    EthMainnet,
    EthSepolia,
    EthHolesky,
    ArbMainnet,
    ArbSepolia,
    OptMainnet,
    OptSepolia,
    PolygonMainnet,
    PolygonAmoy,
    BaseMainnet,
    BaseSepolia,
}

impl Network {
    pub const ALL: [Network; 11] = [
        Self::EthMainnet,
        Self::EthSepolia,
        Self::EthHolesky,
        Self::ArbMainnet,
        Self::ArbSepolia,
        Self::OptMainnet,
        Self::OptSepolia,
        Self::PolygonMainnet,
        Self::PolygonAmoy,
        Self::BaseMainnet,
        Self::BaseSepolia,
    ];

    /// The provider's subdomain slug for this network.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::EthMainnet => "eth-mainnet",
            Self::EthSepolia => "eth-sepolia",
            Self::EthHolesky => "eth-holesky",
            Self::ArbMainnet => "arb-mainnet",
            Self::ArbSepolia => "arb-sepolia",
            Self::OptMainnet => "opt-mainnet",
            Self::OptSepolia => "opt-sepolia",
            Self::PolygonMainnet => "polygon-mainnet",
            Self::PolygonAmoy => "polygon-amoy",
            Self::BaseMainnet => "base-mainnet",
            Self::BaseSepolia => "base-sepolia",
        }
    }

    /// Builds the hosted JSON-RPC endpoint for this network.
    #[must_use]
    pub fn endpoint(self, api_key: &str) -> String {
        format!("https://{}.g.alchemy.com/v2/{api_key}", self.slug())
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|n| n.slug() == wanted).ok_or_else(|| {
            let known: Vec<&str> = Self::ALL.iter().map(|n| n.slug()).collect();
            format!("Unknown network '{s}', expected one of: {}", known.join(", "))
        })
    }
}

/// Chain-data provider settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Network slug (e.g. `"eth-mainnet"`). Defaults to `"eth-mainnet"`.
    #[serde(default = "default_network")]
    pub network: String,

    /// Provider API key. Required unless `endpoint_url` is set.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Full endpoint override, e.g. a local node. Takes precedence over `network`.
    #[serde(default)]
    pub endpoint_url: Option<String>,

    /// Per-request timeout in seconds. Defaults to `30`.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_network() -> String {
    Network::EthMainnet.slug().to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

// The API key never appears in Debug output.
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("network", &self.network)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("endpoint_url", &self.endpoint_url.as_ref().map(|_| "<redacted>"))
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            network: default_network(),
            api_key: None,
            endpoint_url: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl ProviderConfig {
    /// Convenience constructor for a hosted network with an API key.
    #[must_use]
    pub fn hosted(network: Network, api_key: impl Into<String>) -> Self {
        Self { network: network.slug().to_string(), api_key: Some(api_key.into()), ..Self::default() }
    }

    /// Convenience constructor for an explicit endpoint such as a local node or mock server.
    #[must_use]
    pub fn with_endpoint(url: impl Into<String>) -> Self {
        Self { endpoint_url: Some(url.into()), ..Self::default() }
    }

    /// Parses the configured network slug.
    ///
    /// # Errors
    ///
    /// Returns a descriptive error string if the slug is unknown.
    pub fn network(&self) -> Result<Network, String> {
        self.network.parse()
    }

    /// Resolves the JSON-RPC endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns a descriptive error string if the override URL is not http(s),
    /// the network is unknown, or no API key is available for a hosted network.
    pub fn resolve_endpoint(&self) -> Result<String, String> {
        if let Some(url) = &self.endpoint_url {
            if !url.starts_with("http") {
                return Err("Endpoint URL must start with http:// or https://".to_string());
            }
            return Ok(url.clone());
        }

        let network = self.network()?;
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(network.endpoint(key)),
            _ => Err(format!("Missing API key for network {network}")),
        }
    }

    /// Returns the request timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Explorer settings consumed by the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// How many block numbers at and below the head are offered for selection. Defaults to `3`.
    #[serde(default = "default_recent_blocks")]
    pub recent_blocks: usize,
}

fn default_recent_blocks() -> usize {
    3
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self { recent_blocks: default_recent_blocks() }
    }
}

/// Application logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (e.g., "trace", "debug", "info", "warn", "error"). Defaults to `"info"`.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: `"json"` or `"pretty"`. Defaults to `"pretty"`.
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), format: default_log_format() }
    }
}

/// Root application configuration.
///
/// Loaded with the `EXPLORER` prefix for environment overrides using `__` as a
/// separator, e.g. `EXPLORER__PROVIDER__API_KEY`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub http: HttpClientConfig,

    #[serde(default)]
    pub explorer: ExplorerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Loads configuration from a TOML file with environment variable overrides.
    ///
    /// The file is optional; a missing file yields defaults plus environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be parsed or deserialized.
    pub fn from_file<P: AsRef<Path>>(config_path: P) -> Result<Self, ConfigError> {
        let config_builder = Config::builder()
            .set_default("provider.network", default_network())?
            .set_default("provider.timeout_seconds", default_timeout_seconds())?
            .set_default("http.concurrent_limit", 16)?
            .set_default("http.permit_timeout_ms", 500)?
            .set_default("http.max_retries", 0)?
            .set_default("explorer.recent_blocks", 3)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            .add_source(File::with_name(&config_path.as_ref().to_string_lossy()).required(false))
            .add_source(Environment::with_prefix("EXPLORER").prefix_separator("__").separator("__"))
            .build()?;

        config_builder.try_deserialize()
    }

    /// Loads configuration from `config/config.toml` with fallback to defaults.
    ///
    /// The path can be overridden using the `EXPLORER_CONFIG` environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration cannot be loaded or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("EXPLORER_CONFIG").unwrap_or_else(|_| "config/config.toml".to_string());
        Self::from_file(&config_path)
    }

    /// Validates the configuration for correctness and consistency.
    ///
    /// Credentials are not required here; `ChainClient::new` rejects a
    /// configuration that cannot resolve an endpoint.
    ///
    /// # Errors
    ///
    /// Returns a descriptive error string if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if self.provider.network.trim().is_empty() {
            return Err("Provider network must not be empty".to_string());
        }
        self.provider.network()?;

        if let Some(url) = &self.provider.endpoint_url {
            if !url.starts_with("http") {
                return Err("Endpoint URL must start with http:// or https://".to_string());
            }
        }

        if self.provider.timeout_seconds == 0 {
            return Err("Provider timeout must be greater than 0".to_string());
        }

        if self.http.concurrent_limit == 0 {
            return Err("HTTP concurrent limit must be greater than 0".to_string());
        }

        if self.http.permit_timeout_ms == 0 {
            return Err("HTTP permit timeout must be greater than 0".to_string());
        }

        if self.explorer.recent_blocks == 0 {
            return Err("Recent blocks must be greater than 0".to_string());
        }

        if !["json", "pretty"].contains(&self.logging.format.as_str()) {
            return Err("Logging format must be 'json' or 'pretty'".to_string());
        }

        Ok(())
    }

    /// Returns whether credentials are present to build a provider client.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.provider.resolve_endpoint().is_ok()
    }
}
