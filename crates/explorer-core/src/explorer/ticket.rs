use serde::{Deserialize, Serialize};
use std::fmt;

use crate::chain::TxHash;

/// The independent request streams tracked by the explorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    Head,
    Block,
    Transaction,
    Balance,
}

impl RequestKind {
    pub const ALL: [RequestKind; 4] = [Self::Head, Self::Block, Self::Transaction, Self::Balance];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Head => "head",
            Self::Block => "block",
            Self::Transaction => "transaction",
            Self::Balance => "balance",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies one dispatched request: its kind and per-kind sequence number.
///
/// Sequence numbers start at 1; 0 means nothing of that kind was ever dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticket {
    pub kind: RequestKind,
    pub seq: u64,
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.kind, self.seq)
    }
}

/// A user intent that results in one chain query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "query", rename_all = "snake_case")]
pub enum Query {
    Head,
    Block { number: u64, with_transactions: bool },
    Transaction { hash: TxHash },
    Balance { address: String },
}

impl Query {
    #[must_use]
    pub fn kind(&self) -> RequestKind {
        match self {
            Self::Head => RequestKind::Head,
            Self::Block { .. } => RequestKind::Block,
            Self::Transaction { .. } => RequestKind::Transaction,
            Self::Balance { .. } => RequestKind::Balance,
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Head => f.write_str("head"),
            Self::Block { number, with_transactions: false } => write!(f, "block {number}"),
            Self::Block { number, with_transactions: true } => {
                write!(f, "block {number} with transactions")
            }
            Self::Transaction { hash } => write!(f, "transaction {}", hash.short()),
            Self::Balance { address } => write!(f, "balance of {address}"),
        }
    }
}
