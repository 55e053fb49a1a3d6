use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::{chain::types::TxHash, provider::ProviderError};

/// The entity a not-found error refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity {
    Block(u64),
    Transaction(TxHash),
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Block(number) => write!(f, "block {number}"),
            Self::Transaction(hash) => write!(f, "transaction {hash}"),
        }
    }
}

/// Errors surfaced by chain queries.
#[derive(Error, Debug)]
pub enum ChainError {
    /// Transient network or remote failure; safe to retry by re-issuing the command.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The request was valid but the provider has no such entity (yet).
    #[error("{0} not found")]
    NotFound(Entity),

    /// Client-side address validation failed; no request was sent.
    #[error("invalid address {input:?}: {reason}")]
    InvalidAddress { input: String, reason: String },

    /// Missing or invalid provider configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Coarse error classification for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Provider,
    NotFound,
    InvalidAddress,
    Config,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Provider => "temporarily unavailable",
            Self::NotFound => "not found",
            Self::InvalidAddress => "invalid address",
            Self::Config => "configuration error",
        })
    }
}

impl ChainError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Provider(_) => ErrorKind::Provider,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::InvalidAddress { .. } => ErrorKind::InvalidAddress,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// Returns `true` if re-issuing the same command may succeed.
    ///
    /// Not-found is retryable too: a pending transaction may be mined later.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Provider(e) => e.is_transient(),
            Self::NotFound(_) => true,
            Self::InvalidAddress { .. } | Self::Config(_) => false,
        }
    }

    pub(crate) fn malformed(what: &str) -> Self {
        Self::Provider(ProviderError::InvalidResponse(format!("malformed {what}")))
    }
}
