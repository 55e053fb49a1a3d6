//! Sequence-numbered explorer state machine.
//!
//! Each [`RequestKind`] runs `idle → pending → {resolved, failed}` and goes
//! back to `pending` on every dispatch. A completion may only touch visible
//! state if its ticket carries the latest sequence number of its kind;
//! anything older is counted and dropped.

use chrono::Utc;
use primitive_types::U256;
use std::sync::Arc;
use tracing::{debug, trace, warn};

use crate::{
    chain::{BalanceResult, BlockView, ChainError, TransactionReceiptView},
    explorer::{
        snapshot::{ExplorerSnapshot, FailureInfo, KindView, RequestStatus},
        ticket::{Query, RequestKind, Ticket},
    },
};

/// Result of one chain query, tagged by kind.
#[derive(Debug)]
pub enum Outcome {
    Head(Result<u64, ChainError>),
    Block(Result<BlockView, ChainError>),
    Transaction(Result<TransactionReceiptView, ChainError>),
    Balance { address: String, result: Result<U256, ChainError> },
}

impl Outcome {
    /// The outcome of `query` when it ended in `error` without producing a result.
    #[must_use]
    pub fn failed(query: &Query, error: ChainError) -> Self {
        match query {
            Query::Head => Self::Head(Err(error)),
            Query::Block { .. } => Self::Block(Err(error)),
            Query::Transaction { .. } => Self::Transaction(Err(error)),
            Query::Balance { address } => {
                Self::Balance { address: address.clone(), result: Err(error) }
            }
        }
    }

    #[must_use]
    pub fn kind(&self) -> RequestKind {
        match self {
            Self::Head(_) => RequestKind::Head,
            Self::Block(_) => RequestKind::Block,
            Self::Transaction(_) => RequestKind::Transaction,
            Self::Balance { .. } => RequestKind::Balance,
        }
    }

    fn error(&self) -> Option<&ChainError> {
        match self {
            Self::Head(Err(e))
            | Self::Block(Err(e))
            | Self::Transaction(Err(e))
            | Self::Balance { result: Err(e), .. } => Some(e),
            _ => None,
        }
    }
}

/// A finished query together with the ticket it was dispatched under.
#[derive(Debug)]
pub struct Completion {
    pub ticket: Ticket,
    pub outcome: Outcome,
}

/// One-shot notification emitted when a balance query succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceNotice {
    pub address: String,
    pub balance: U256,
}

/// What [`ExplorerState::apply`] did with a completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The completion was current and is now visible.
    Applied { notice: Option<BalanceNotice> },
    /// A newer request of the same kind exists; nothing changed.
    Stale,
}

impl ApplyOutcome {
    #[must_use]
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::Stale)
    }
}

impl<T> KindView<T> {
    fn begin(&mut self, query: Query) -> u64 {
        self.seq += 1;
        self.status = RequestStatus::Pending;
        self.request = Some(query);
        self.seq
    }

    fn resolve(&mut self, value: T) {
        self.value = Some(value);
        self.status = RequestStatus::Resolved;
        self.updated_at = Some(Utc::now());
    }

    fn fail(&mut self, error: &ChainError) {
        self.status = RequestStatus::Failed(FailureInfo::from(error));
        self.updated_at = Some(Utc::now());
    }
}

/// Per-kind request bookkeeping and the last known good views.
///
/// Owned by a single task; nothing here is shared or locked.
#[derive(Debug, Default)]
pub struct ExplorerState {
    view: ExplorerSnapshot,
}

impl ExplorerState {
    /// Creates a state with every kind idle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `query` as the latest request of its kind and returns its ticket.
    ///
    /// Any earlier pending request of the same kind is abandoned.
    pub fn dispatch(&mut self, query: Query) -> Ticket {
        let kind = query.kind();
        let seq = match kind {
            RequestKind::Head => self.view.head.begin(query),
            RequestKind::Block => self.view.block.begin(query),
            RequestKind::Transaction => self.view.transaction.begin(query),
            RequestKind::Balance => self.view.balance.begin(query),
        };
        self.view.stats.dispatched += 1;
        debug!(kind = %kind, seq = seq, "request dispatched");
        Ticket { kind, seq }
    }

    /// Returns the latest ticket dispatched for `kind`, if any.
    #[must_use]
    pub fn latest(&self, kind: RequestKind) -> Option<Ticket> {
        match self.view.seq(kind) {
            0 => None,
            seq => Some(Ticket { kind, seq }),
        }
    }

    /// Applies a completion if it is still the latest of its kind.
    pub fn apply(&mut self, completion: Completion) -> ApplyOutcome {
        let Completion { ticket, outcome } = completion;

        if ticket.kind != outcome.kind() {
            warn!(ticket = %ticket, outcome = %outcome.kind(), "completion kind mismatch");
            self.view.stats.stale_discarded += 1;
            return ApplyOutcome::Stale;
        }

        let latest = self.view.seq(ticket.kind);
        if ticket.seq == 0 || ticket.seq != latest {
            debug!(kind = %ticket.kind, seq = ticket.seq, latest = latest, "stale response discarded");
            self.view.stats.stale_discarded += 1;
            return ApplyOutcome::Stale;
        }

        if let Some(error) = outcome.error() {
            warn!(kind = %ticket.kind, seq = ticket.seq, error = %error, "request failed");
        }

        let mut notice = None;
        match outcome {
            Outcome::Head(Ok(height)) => self.view.head.resolve(height),
            Outcome::Head(Err(e)) => self.view.head.fail(&e),
            Outcome::Block(Ok(block)) => self.view.block.resolve(Arc::new(block)),
            Outcome::Block(Err(e)) => self.view.block.fail(&e),
            Outcome::Transaction(Ok(receipt)) => self.view.transaction.resolve(Arc::new(receipt)),
            Outcome::Transaction(Err(e)) => self.view.transaction.fail(&e),
            Outcome::Balance { address, result: Ok(balance) } => {
                notice = Some(BalanceNotice { address: address.clone(), balance });
                self.view.balance.resolve(Arc::new(BalanceResult { address, balance }));
            }
            Outcome::Balance { result: Err(e), .. } => {
                self.view.balance.value = None;
                self.view.balance.fail(&e);
            }
        }

        self.view.stats.applied += 1;
        trace!(kind = %ticket.kind, seq = ticket.seq, "response applied");
        ApplyOutcome::Applied { notice }
    }

    /// Returns a copy of the visible state. Views are shared, not cloned.
    #[must_use]
    pub fn snapshot(&self) -> ExplorerSnapshot {
        self.view.clone()
    }
}
