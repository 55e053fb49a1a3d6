use explorer_core::{
    chain::TxHash,
    config::AppConfig,
    explorer::{BalanceNotice, ExplorerHandle, ExplorerSnapshot},
};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::{broadcast, watch},
    task::JoinHandle,
};

use super::{
    query::{parse_tx_hash, start_explorer},
    render,
    utils::{print_error, print_info, CliError, CliResult},
};

const HELP: &str = "commands: block <N> | block+ <N> | tx <HASH> | balance <ADDR> | head | help | quit";

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExploreCommand {
    Block(u64),
    BlockWithTransactions(u64),
    Transaction(TxHash),
    Balance(String),
    Head,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> CliResult<ExploreCommand> {
    let mut parts = line.split_whitespace();
    let verb = parts.next().unwrap_or_default().to_ascii_lowercase();
    let arg = parts.next();
    if parts.next().is_some() {
        return Err(CliError::Input(format!("too many arguments in {line:?}")));
    }

    let number = |arg: Option<&str>| -> CliResult<u64> {
        let arg = arg.ok_or_else(|| CliError::Input("missing block number".to_string()))?;
        arg.parse().map_err(|_| CliError::Input(format!("not a block number: {arg}")))
    };

    match (verb.as_str(), arg) {
        ("block" | "b", arg) => Ok(ExploreCommand::Block(number(arg)?)),
        ("block+" | "b+", arg) => Ok(ExploreCommand::BlockWithTransactions(number(arg)?)),
        ("tx" | "t", Some(hash)) => Ok(ExploreCommand::Transaction(parse_tx_hash(hash)?)),
        ("balance" | "bal", Some(address)) => Ok(ExploreCommand::Balance(address.to_string())),
        ("head" | "h", None) => Ok(ExploreCommand::Head),
        ("help" | "?", None) => Ok(ExploreCommand::Help),
        ("quit" | "exit" | "q", None) => Ok(ExploreCommand::Quit),
        ("tx" | "t" | "balance" | "bal", None) => {
            Err(CliError::Input(format!("{verb} needs an argument")))
        }
        _ => Err(CliError::Input(format!("unknown command {line:?}; {HELP}"))),
    }
}

/// Re-renders on every snapshot change and prints balance notices as they arrive.
fn spawn_renderer(
    mut snapshots: watch::Receiver<ExplorerSnapshot>,
    mut notices: broadcast::Receiver<BalanceNotice>,
    recent_blocks: usize,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut last_rendered = String::new();
        loop {
            tokio::select! {
                changed = snapshots.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let rendered =
                        render::render_snapshot(&snapshots.borrow_and_update(), recent_blocks);
                    if rendered != last_rendered {
                        println!("\n{rendered}");
                        last_rendered = rendered;
                    }
                }
                notice = notices.recv() => match notice {
                    Ok(notice) => println!("\n*** {} ***", render::render_notice(&notice)),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::debug!(skipped = skipped, "balance notices lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
            }
        }
    })
}

async fn forward(handle: &ExplorerHandle, command: ExploreCommand) -> CliResult<bool> {
    match command {
        ExploreCommand::Block(number) => {
            handle.select_block(number).await?;
        }
        ExploreCommand::BlockWithTransactions(number) => {
            handle.select_block_with_transactions(number).await?;
        }
        ExploreCommand::Transaction(hash) => {
            handle.select_transaction(hash).await?;
        }
        ExploreCommand::Balance(address) => {
            handle.check_balance(address).await?;
        }
        ExploreCommand::Head => {
            handle.refresh_head().await?;
        }
        ExploreCommand::Help => print_info(HELP),
        ExploreCommand::Quit => return Ok(false),
    }
    Ok(true)
}

/// Interactive explorer reading commands from stdin.
///
/// # Errors
///
/// Returns an error if the provider cannot be configured or stdin fails.
pub async fn run_explore(config: &AppConfig) -> CliResult<()> {
    let handle = start_explorer(config)?;
    let renderer =
        spawn_renderer(handle.subscribe(), handle.balance_notices(), config.explorer.recent_blocks);

    print_info(HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line) {
            Ok(command) => {
                if !forward(&handle, command).await? {
                    break;
                }
            }
            Err(e) => print_error(&e.to_string()),
        }
    }

    handle.shutdown().await;
    renderer.abort();
    Ok(())
}
