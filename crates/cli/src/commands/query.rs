use explorer_core::{
    chain::{ChainClient, TxHash},
    config::AppConfig,
    explorer::{Explorer, ExplorerHandle, ExplorerSnapshot, RequestKind, RequestStatus, Ticket},
};
use std::sync::Arc;

use super::{
    render,
    utils::{print_error, CliError, CliResult},
};

/// A one-shot query run against a fresh explorer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OneShot {
    Head,
    Block { number: u64, with_transactions: bool },
    Transaction(TxHash),
    Balance(String),
    Recent,
}

/// Builds the chain client from configuration and starts an explorer over it.
///
/// # Errors
///
/// Returns [`CliError::Config`] if the provider cannot be configured.
pub fn start_explorer(config: &AppConfig) -> CliResult<ExplorerHandle> {
    let client = ChainClient::new(&config.provider, config.http.clone())?;
    Ok(Explorer::spawn(Arc::new(client)))
}

pub fn parse_tx_hash(input: &str) -> CliResult<TxHash> {
    input.trim().parse().map_err(|e| CliError::Input(format!("transaction hash {input:?}: {e}")))
}

async fn issue(handle: &ExplorerHandle, query: &OneShot) -> CliResult<Option<Ticket>> {
    let ticket = match query {
        OneShot::Head | OneShot::Recent => None,
        OneShot::Block { number, with_transactions: false } => {
            Some(handle.select_block(*number).await?)
        }
        OneShot::Block { number, with_transactions: true } => {
            Some(handle.select_block_with_transactions(*number).await?)
        }
        OneShot::Transaction(hash) => Some(handle.select_transaction(*hash).await?),
        OneShot::Balance(address) => Some(handle.check_balance(address.as_str()).await?),
    };
    Ok(ticket)
}

fn kind_of(query: &OneShot) -> RequestKind {
    match query {
        OneShot::Head | OneShot::Recent => RequestKind::Head,
        OneShot::Block { .. } => RequestKind::Block,
        OneShot::Transaction(_) => RequestKind::Transaction,
        OneShot::Balance(_) => RequestKind::Balance,
    }
}

fn print_result(
    query: &OneShot,
    snapshot: &ExplorerSnapshot,
    recent_blocks: usize,
    json: bool,
) -> CliResult<()> {
    if json {
        let value = match query {
            OneShot::Head => serde_json::to_value(&snapshot.head)?,
            OneShot::Recent => serde_json::json!({
                "head": snapshot.head_height(),
                "recent": snapshot.recent_block_numbers(recent_blocks),
            }),
            OneShot::Block { .. } => serde_json::to_value(&snapshot.block)?,
            OneShot::Transaction(_) => serde_json::to_value(&snapshot.transaction)?,
            OneShot::Balance(_) => serde_json::to_value(&snapshot.balance)?,
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    match query {
        OneShot::Head => {
            if let Some(head) = snapshot.head_height() {
                println!("Head: #{head}");
            }
        }
        OneShot::Recent => {
            for number in snapshot.recent_block_numbers(recent_blocks) {
                println!("#{number}");
            }
        }
        OneShot::Block { .. } => {
            if let Some(block) = snapshot.selected_block() {
                print!("{}", render::render_block(block));
            }
        }
        OneShot::Transaction(_) => {
            if let Some(receipt) = snapshot.selected_transaction() {
                print!("{}", render::render_transaction(receipt));
            }
        }
        OneShot::Balance(_) => {
            if let Some(balance) = snapshot.last_balance() {
                println!(
                    "{}: {} wei ({})",
                    balance.address,
                    balance.balance,
                    render::format_ether(balance.balance)
                );
            }
        }
    }
    Ok(())
}

/// Runs one query to completion and prints its result.
///
/// # Errors
///
/// Returns [`CliError::Chain`] if the query settles as failed.
pub async fn run_one_shot(config: &AppConfig, query: OneShot, json: bool) -> CliResult<()> {
    let handle = start_explorer(config)?;
    let kind = kind_of(&query);

    let snapshot = match issue(&handle, &query).await? {
        Some(ticket) => handle.settled(ticket).await?,
        None => handle.settled_kind(kind).await?,
    };
    handle.shutdown().await;

    if let RequestStatus::Failed(info) = snapshot.status(kind) {
        if json {
            println!("{}", serde_json::to_string_pretty(info)?);
        }
        print_error(&format!("{kind}: {} ({})", info.message, info.kind));
        return Err(CliError::Chain(info.message.clone()));
    }

    print_result(&query, &snapshot, config.explorer.recent_blocks, json)
}
