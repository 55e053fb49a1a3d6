//! Semantic chain types exposed to the presentation layer.
//!
//! Provider values arrive as hex strings; everything here is already decoded.
//! Views are immutable once built and shared behind `Arc` by the explorer.

use primitive_types::U256;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

/// Error type for address and hash parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HexParseError {
    #[error("missing 0x prefix")]
    MissingPrefix,
    #[error("invalid hex character in {0:?}")]
    InvalidHex(String),
    #[error("invalid length: expected {expected} hex digits, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

fn parse_fixed<const N: usize>(value: &str) -> Result<[u8; N], HexParseError> {
    let hex_str = value.strip_prefix("0x").ok_or(HexParseError::MissingPrefix)?;
    if hex_str.len() != N * 2 {
        return Err(HexParseError::InvalidLength { expected: N * 2, actual: hex_str.len() });
    }

    let mut arr = [0u8; N];
    hex::decode_to_slice(hex_str, &mut arr)
        .map_err(|_| HexParseError::InvalidHex(value.to_string()))?;
    Ok(arr)
}

macro_rules! fixed_hex_type {
    ($(#[$meta:meta])* $name:ident, $len:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name([u8; $len]);

        impl $name {
            pub const LEN: usize = $len;

            #[must_use]
            pub const fn new(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            #[must_use]
            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            /// Abbreviated form for narrow displays, e.g. `0x1111…1111`.
            #[must_use]
            pub fn short(&self) -> String {
                let full = self.to_string();
                format!("{}…{}", &full[..6], &full[full.len() - 4..])
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl FromStr for $name {
            type Err = HexParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_fixed::<$len>(s).map(Self)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = HexParseError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x{}", hex::encode(self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({self})", stringify!($name))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

fixed_hex_type!(
    /// A 20-byte account address.
    Address,
    20
);

fixed_hex_type!(
    /// A 32-byte Keccak digest identifying a block or transaction.
    Hash32,
    32
);

/// Transaction hashes and block hashes share the digest representation.
pub type TxHash = Hash32;
pub type BlockHash = Hash32;

/// Lightweight transaction record embedded in a block fetched with full transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSummary {
    pub hash: TxHash,
    pub from: Address,
    /// `None` for contract-creation transactions.
    pub to: Option<Address>,
    pub value: U256,
    pub nonce: u64,
    pub transaction_index: Option<u64>,
}

/// Transaction list of a block, in block order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum BlockTransactions {
    /// Block fetched without transaction objects.
    Hashes(Vec<TxHash>),
    /// Block fetched with full transaction objects.
    Full(Vec<TransactionSummary>),
}

impl BlockTransactions {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Hashes(hashes) => hashes.len(),
            Self::Full(txs) => txs.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Transaction hashes in block order, regardless of representation.
    pub fn hashes(&self) -> impl Iterator<Item = &TxHash> + '_ {
        let (hashes, full) = match self {
            Self::Hashes(hashes) => (hashes.as_slice(), &[][..]),
            Self::Full(txs) => (&[][..], txs.as_slice()),
        };
        hashes.iter().chain(full.iter().map(|tx| &tx.hash))
    }

    #[must_use]
    pub fn contains(&self, hash: &TxHash) -> bool {
        self.hashes().any(|h| h == hash)
    }
}

/// A block as shown by the explorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockView {
    pub number: u64,
    pub hash: BlockHash,
    pub parent_hash: BlockHash,
    pub timestamp: u64,
    pub miner: Address,
    pub gas_used: u64,
    pub gas_limit: u64,
    pub transactions: BlockTransactions,
}

impl BlockView {
    #[must_use]
    pub fn has_full_transactions(&self) -> bool {
        matches!(self.transactions, BlockTransactions::Full(_))
    }
}

/// Outcome of a mined transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptStatus {
    Success,
    Failed,
    /// Pre-Byzantium receipts carry a state root instead of a status.
    Unknown,
}

impl fmt::Display for ReceiptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failed => write!(f, "failed"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// A transaction receipt joined with the transferred value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceiptView {
    pub hash: TxHash,
    pub from: Address,
    /// `None` for contract-creation transactions.
    pub to: Option<Address>,
    /// Address of the created contract, if any.
    pub contract_address: Option<Address>,
    pub value: U256,
    pub status: ReceiptStatus,
    pub block_number: u64,
    pub block_hash: BlockHash,
    pub gas_used: u64,
}

/// Result of a balance query for one address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceResult {
    /// The address as entered by the user.
    pub address: String,
    /// Balance in wei.
    pub balance: U256,
}
