use std::{collections::HashMap, sync::Arc};
use tokio::{
    sync::{broadcast, mpsc, oneshot, watch},
    task::{self, JoinError, JoinHandle, JoinSet},
};
use tracing::{debug, error, info};

use crate::{
    chain::{ChainApi, ChainError, TxHash},
    explorer::{
        snapshot::ExplorerSnapshot,
        state::{ApplyOutcome, BalanceNotice, Completion, ExplorerState, Outcome},
        ticket::{Query, RequestKind, Ticket},
        ExplorerError,
    },
    provider::ProviderError,
};

const COMMAND_BUFFER: usize = 64;
const NOTICE_BUFFER: usize = 16;

enum Command {
    Dispatch { query: Query, reply: oneshot::Sender<Ticket> },
    Shutdown,
}

/// Runs one chain query to completion.
async fn execute(chain: &dyn ChainApi, query: Query) -> Outcome {
    match query {
        Query::Head => Outcome::Head(chain.get_head_height().await),
        Query::Block { number, with_transactions: false } => {
            Outcome::Block(chain.get_block(number).await)
        }
        Query::Block { number, with_transactions: true } => {
            Outcome::Block(chain.get_block_with_transactions(number).await)
        }
        Query::Transaction { hash } => {
            Outcome::Transaction(chain.get_transaction_receipt(&hash).await)
        }
        Query::Balance { address } => {
            let result = chain.get_balance(&address).await;
            Outcome::Balance { address, result }
        }
    }
}

/// The explorer task: sole owner of [`ExplorerState`].
///
/// Commands are dispatched immediately and their queries run concurrently in
/// a [`JoinSet`]; completions are applied in arrival order and the staleness
/// check decides which of them become visible.
pub struct Explorer {
    chain: Arc<dyn ChainApi>,
    state: ExplorerState,
    inflight: JoinSet<Completion>,
    /// Dispatch record of every task in `inflight`, for settling tasks that die.
    tickets: HashMap<task::Id, (Ticket, Query)>,
    commands: mpsc::Receiver<Command>,
    snapshots: watch::Sender<ExplorerSnapshot>,
    notices: broadcast::Sender<BalanceNotice>,
}

impl Explorer {
    /// Spawns the explorer task on the current runtime and dispatches the
    /// initial head query.
    #[must_use]
    pub fn spawn(chain: Arc<dyn ChainApi>) -> ExplorerHandle {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (snapshot_tx, snapshot_rx) = watch::channel(ExplorerSnapshot::default());
        let (notice_tx, _) = broadcast::channel(NOTICE_BUFFER);

        let mut explorer = Self {
            chain,
            state: ExplorerState::new(),
            inflight: JoinSet::new(),
            tickets: HashMap::new(),
            commands: command_rx,
            snapshots: snapshot_tx,
            notices: notice_tx.clone(),
        };
        explorer.dispatch(Query::Head);

        let task = tokio::spawn(explorer.run());
        info!("explorer started");

        ExplorerHandle { commands: command_tx, snapshots: snapshot_rx, notices: notice_tx, task }
    }

    fn dispatch(&mut self, query: Query) -> Ticket {
        let ticket = self.state.dispatch(query.clone());
        let chain = Arc::clone(&self.chain);
        let record = (ticket, query.clone());
        let task = self.inflight.spawn(async move {
            let outcome = execute(chain.as_ref(), query).await;
            Completion { ticket, outcome }
        });
        self.tickets.insert(task.id(), record);
        self.publish();
        ticket
    }

    fn complete(&mut self, completion: Completion) {
        match self.state.apply(completion) {
            ApplyOutcome::Applied { notice } => {
                if let Some(notice) = notice {
                    // No subscribers is fine; the snapshot still carries the result.
                    let _ = self.notices.send(notice);
                }
                self.publish();
            }
            ApplyOutcome::Stale => self.publish(),
        }
    }

    /// Settles the request of a task that ended without a completion.
    fn abandon(&mut self, error: &JoinError) {
        let Some((ticket, query)) = self.tickets.remove(&error.id()) else {
            return;
        };
        if error.is_cancelled() {
            debug!(ticket = %ticket, "query task cancelled");
        } else {
            error!(ticket = %ticket, error = %error, "query task panicked");
        }

        let failure =
            ChainError::Provider(ProviderError::InvalidResponse("query task panicked".to_string()));
        self.complete(Completion { ticket, outcome: Outcome::failed(&query, failure) });
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.state.snapshot());
    }

    async fn run(mut self) {
        loop {
            tokio::select! {
                biased;

                Some(joined) = self.inflight.join_next_with_id(), if !self.inflight.is_empty() => {
                    match joined {
                        Ok((id, completion)) => {
                            self.tickets.remove(&id);
                            self.complete(completion);
                        }
                        Err(e) => self.abandon(&e),
                    }
                }

                command = self.commands.recv() => match command {
                    Some(Command::Dispatch { query, reply }) => {
                        let ticket = self.dispatch(query);
                        let _ = reply.send(ticket);
                    }
                    Some(Command::Shutdown) | None => break,
                },
            }
        }

        let abandoned = self.inflight.len();
        self.inflight.abort_all();
        self.tickets.clear();
        info!(abandoned = abandoned, "explorer stopped");
    }
}

/// Command surface of a running [`Explorer`].
///
/// Dropping the handle stops the explorer task.
pub struct ExplorerHandle {
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<ExplorerSnapshot>,
    notices: broadcast::Sender<BalanceNotice>,
    task: JoinHandle<()>,
}

impl ExplorerHandle {
    async fn send(&self, query: Query) -> Result<Ticket, ExplorerError> {
        let (reply, ticket) = oneshot::channel();
        self.commands
            .send(Command::Dispatch { query, reply })
            .await
            .map_err(|_| ExplorerError::Closed)?;
        ticket.await.map_err(|_| ExplorerError::Closed)
    }

    /// Selects a block, fetching its transaction hashes.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::Closed`] if the explorer task has stopped.
    pub async fn select_block(&self, number: u64) -> Result<Ticket, ExplorerError> {
        self.send(Query::Block { number, with_transactions: false }).await
    }

    /// Selects a block, fetching full transaction summaries.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::Closed`] if the explorer task has stopped.
    pub async fn select_block_with_transactions(&self, number: u64) -> Result<Ticket, ExplorerError> {
        self.send(Query::Block { number, with_transactions: true }).await
    }

    /// Selects a transaction and fetches its receipt.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::Closed`] if the explorer task has stopped.
    pub async fn select_transaction(&self, hash: TxHash) -> Result<Ticket, ExplorerError> {
        self.send(Query::Transaction { hash }).await
    }

    /// Queries the balance of `address`. Malformed addresses settle as a failed balance request.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::Closed`] if the explorer task has stopped.
    pub async fn check_balance(&self, address: impl Into<String>) -> Result<Ticket, ExplorerError> {
        self.send(Query::Balance { address: address.into() }).await
    }

    /// Re-queries the chain head.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::Closed`] if the explorer task has stopped.
    pub async fn refresh_head(&self) -> Result<Ticket, ExplorerError> {
        self.send(Query::Head).await
    }

    /// The most recently published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> ExplorerSnapshot {
        self.snapshots.borrow().clone()
    }

    /// A receiver notified on every published snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ExplorerSnapshot> {
        self.snapshots.clone()
    }

    /// A receiver for balance notifications issued after this call.
    #[must_use]
    pub fn balance_notices(&self) -> broadcast::Receiver<BalanceNotice> {
        self.notices.subscribe()
    }

    /// Waits until a published snapshot satisfies `predicate`, starting with the current one.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::Closed`] if the explorer stops first.
    pub async fn wait_for(
        &self,
        mut predicate: impl FnMut(&ExplorerSnapshot) -> bool,
    ) -> Result<ExplorerSnapshot, ExplorerError> {
        let mut rx = self.snapshots.clone();
        let snapshot = rx.wait_for(|s| predicate(s)).await.map_err(|_| ExplorerError::Closed)?;
        Ok(snapshot.clone())
    }

    /// Waits until the request behind `ticket` has settled or been superseded.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::Closed`] if the explorer stops first.
    pub async fn settled(&self, ticket: Ticket) -> Result<ExplorerSnapshot, ExplorerError> {
        self.wait_for(|s| {
            let seq = s.seq(ticket.kind);
            seq > ticket.seq || (seq == ticket.seq && s.is_settled(ticket.kind))
        })
        .await
    }

    /// Waits until the latest request of `kind` has settled.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::Closed`] if the explorer stops first.
    pub async fn settled_kind(&self, kind: RequestKind) -> Result<ExplorerSnapshot, ExplorerError> {
        self.wait_for(|s| s.is_settled(kind)).await
    }

    /// Stops the explorer task, abandoning in-flight queries.
    pub async fn shutdown(self) {
        if self.commands.send(Command::Shutdown).await.is_err() {
            debug!("explorer already stopped");
        }
        if let Err(e) = self.task.await {
            if !e.is_cancelled() {
                error!(error = %e, "explorer task failed");
            }
        }
    }
}
