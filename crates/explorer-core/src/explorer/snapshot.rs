use chrono::{DateTime, Utc};
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    chain::{BalanceResult, BlockView, ChainError, ErrorKind, TransactionReceiptView},
    explorer::ticket::{Query, RequestKind},
};

/// Why the latest request of a kind failed, in presentation terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureInfo {
    pub kind: ErrorKind,
    pub message: String,
    pub retryable: bool,
}

impl From<&ChainError> for FailureInfo {
    fn from(error: &ChainError) -> Self {
        Self { kind: error.kind(), message: error.to_string(), retryable: error.is_retryable() }
    }
}

/// Lifecycle of the latest request of one kind.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    Idle,
    Pending,
    Resolved,
    Failed(FailureInfo),
}

impl RequestStatus {
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    #[must_use]
    pub fn failure(&self) -> Option<&FailureInfo> {
        match self {
            Self::Failed(info) => Some(info),
            _ => None,
        }
    }
}

/// Visible state of one request kind.
///
/// `value` is the last successfully applied result. It survives later
/// failures (except for balances) and is only replaced wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindView<T> {
    /// Highest sequence number dispatched for this kind.
    pub seq: u64,
    pub status: RequestStatus,
    /// The query behind `seq`.
    pub request: Option<Query>,
    pub value: Option<T>,
    /// When `status` last settled.
    pub updated_at: Option<DateTime<Utc>>,
}

impl<T> Default for KindView<T> {
    fn default() -> Self {
        Self { seq: 0, status: RequestStatus::Idle, request: None, value: None, updated_at: None }
    }
}

/// Dispatch bookkeeping, mostly useful to observe stale discards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExplorerStats {
    pub dispatched: u64,
    pub applied: u64,
    pub stale_discarded: u64,
}

/// Immutable view of everything the explorer currently knows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExplorerSnapshot {
    pub head: KindView<u64>,
    pub block: KindView<Arc<BlockView>>,
    pub transaction: KindView<Arc<TransactionReceiptView>>,
    pub balance: KindView<Arc<BalanceResult>>,
    pub stats: ExplorerStats,
}

impl ExplorerSnapshot {
    #[must_use]
    pub fn head_height(&self) -> Option<u64> {
        self.head.value
    }

    #[must_use]
    pub fn selected_block(&self) -> Option<&BlockView> {
        self.block.value.as_deref()
    }

    #[must_use]
    pub fn selected_transaction(&self) -> Option<&TransactionReceiptView> {
        self.transaction.value.as_deref()
    }

    #[must_use]
    pub fn last_balance(&self) -> Option<&BalanceResult> {
        self.balance.value.as_deref()
    }

    #[must_use]
    pub fn last_balance_wei(&self) -> Option<U256> {
        self.last_balance().map(|b| b.balance)
    }

    #[must_use]
    pub fn seq(&self, kind: RequestKind) -> u64 {
        match kind {
            RequestKind::Head => self.head.seq,
            RequestKind::Block => self.block.seq,
            RequestKind::Transaction => self.transaction.seq,
            RequestKind::Balance => self.balance.seq,
        }
    }

    #[must_use]
    pub fn status(&self, kind: RequestKind) -> &RequestStatus {
        match kind {
            RequestKind::Head => &self.head.status,
            RequestKind::Block => &self.block.status,
            RequestKind::Transaction => &self.transaction.status,
            RequestKind::Balance => &self.balance.status,
        }
    }

    /// Returns `true` once the latest request of `kind` has resolved or failed.
    #[must_use]
    pub fn is_settled(&self, kind: RequestKind) -> bool {
        matches!(self.status(kind), RequestStatus::Resolved | RequestStatus::Failed(_))
    }

    /// Block numbers offered for selection: the head and the blocks right below it.
    ///
    /// Stops at genesis and is empty until the head is known.
    #[must_use]
    pub fn recent_block_numbers(&self, count: usize) -> Vec<u64> {
        let Some(head) = self.head_height() else {
            return Vec::new();
        };
        (0..=head).rev().take(count).collect()
    }
}
