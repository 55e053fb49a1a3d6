//! Explorer state orchestration.
//!
//! The explorer turns user intents ([`Query`]) into chain queries and keeps a
//! consistent [`ExplorerSnapshot`] of what is currently known. Four request
//! kinds (head, block, transaction, balance) are tracked independently; within
//! a kind only the most recently dispatched request may change what is shown.
//!
//! ```text
//!  ExplorerHandle ──cmd──► Explorer task ──spawn──► JoinSet<Completion>
//!        ▲                    │    ▲                       │
//!        │                    │    └─────── completion ────┘
//!        │                    ▼
//!        └──── watch ──── ExplorerState::apply (stale check) ──► broadcast<BalanceNotice>
//! ```

pub mod driver;
pub mod snapshot;
pub mod state;
pub mod ticket;

use thiserror::Error;

pub use driver::{Explorer, ExplorerHandle};
pub use snapshot::{ExplorerSnapshot, ExplorerStats, FailureInfo, KindView, RequestStatus};
pub use state::{ApplyOutcome, BalanceNotice, Completion, ExplorerState, Outcome};
pub use ticket::{Query, RequestKind, Ticket};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ExplorerError {
    #[error("explorer task has stopped")]
    Closed,
}
