use explorer_core::{
    chain::{BlockTransactions, BlockView, TransactionReceiptView},
    explorer::{BalanceNotice, ExplorerSnapshot, KindView, RequestStatus},
};
use primitive_types::U256;
use std::fmt::Write;

const WEI_DECIMALS: usize = 18;

/// Formats a wei amount as ether without losing precision, e.g. `1.5 ETH`.
pub fn format_ether(wei: U256) -> String {
    let unit = U256::exp10(WEI_DECIMALS);
    let whole = wei / unit;
    let fraction = (wei % unit).to_string();

    let padded = format!("{fraction:0>WEI_DECIMALS$}");
    let trimmed = padded.trim_end_matches('0');
    if trimmed.is_empty() {
        format!("{whole} ETH")
    } else {
        format!("{whole}.{trimmed} ETH")
    }
}

fn status_line<T>(label: &str, view: &KindView<T>) -> Option<String> {
    let target = view.request.as_ref().map(ToString::to_string).unwrap_or_default();
    match &view.status {
        RequestStatus::Idle | RequestStatus::Resolved => None,
        RequestStatus::Pending => Some(format!("{label}: loading {target}...")),
        RequestStatus::Failed(info) => {
            let hint = if info.retryable { " (retry to try again)" } else { "" };
            Some(format!("{label}: {} - {}{hint}", info.kind, info.message))
        }
    }
}

pub fn render_block(block: &BlockView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Block #{}", block.number);
    let _ = writeln!(out, "  Hash:        {}", block.hash);
    let _ = writeln!(out, "  Parent:      {}", block.parent_hash);
    let _ = writeln!(out, "  Timestamp:   {}", format_timestamp(block.timestamp));
    let _ = writeln!(out, "  Miner:       {}", block.miner);
    let _ = writeln!(out, "  Gas:         {} / {}", block.gas_used, block.gas_limit);
    let _ = writeln!(out, "  Transactions ({}):", block.transactions.len());
    match &block.transactions {
        BlockTransactions::Hashes(hashes) => {
            for hash in hashes {
                let _ = writeln!(out, "    {hash}");
            }
        }
        BlockTransactions::Full(txs) => {
            for tx in txs {
                let to = tx.to.map_or_else(|| "contract creation".to_string(), |a| a.to_string());
                let _ = writeln!(
                    out,
                    "    {}  {} -> {}  {}",
                    tx.hash,
                    tx.from.short(),
                    to,
                    format_ether(tx.value)
                );
            }
        }
    }
    out
}

pub fn render_transaction(receipt: &TransactionReceiptView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Transaction {}", receipt.hash);
    let _ = writeln!(out, "  Status:      {}", receipt.status);
    let _ = writeln!(out, "  Block:       #{} ({})", receipt.block_number, receipt.block_hash);
    let _ = writeln!(out, "  From:        {}", receipt.from);
    match (receipt.to, receipt.contract_address) {
        (Some(to), _) => {
            let _ = writeln!(out, "  To:          {to}");
        }
        (None, Some(created)) => {
            let _ = writeln!(out, "  Created:     {created}");
        }
        (None, None) => {}
    }
    let _ = writeln!(out, "  Value:       {} wei ({})", receipt.value, format_ether(receipt.value));
    let _ = writeln!(out, "  Gas used:    {}", receipt.gas_used);
    out
}

pub fn render_notice(notice: &BalanceNotice) -> String {
    format!(
        "Balance of {}: {} wei ({})",
        notice.address,
        notice.balance,
        format_ether(notice.balance)
    )
}

fn format_timestamp(timestamp: u64) -> String {
    i64::try_from(timestamp)
        .ok()
        .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
        .map_or_else(|| timestamp.to_string(), |dt| dt.to_rfc3339())
}

/// Renders everything the explorer currently knows, head first.
pub fn render_snapshot(snapshot: &ExplorerSnapshot, recent_blocks: usize) -> String {
    let mut out = String::new();

    match snapshot.head_height() {
        Some(head) => {
            let _ = writeln!(out, "Head: #{head}");
            let recent: Vec<String> = snapshot
                .recent_block_numbers(recent_blocks)
                .iter()
                .map(u64::to_string)
                .collect();
            let _ = writeln!(out, "Recent blocks: {}", recent.join(", "));
        }
        None => {
            let _ = writeln!(out, "Head: unknown");
        }
    }

    let lines = [
        status_line("head", &snapshot.head),
        status_line("block", &snapshot.block),
        status_line("transaction", &snapshot.transaction),
        status_line("balance", &snapshot.balance),
    ];
    for line in lines.into_iter().flatten() {
        let _ = writeln!(out, "{line}");
    }

    if let Some(block) = snapshot.selected_block() {
        out.push('\n');
        out.push_str(&render_block(block));
    }
    if let Some(receipt) = snapshot.selected_transaction() {
        out.push('\n');
        out.push_str(&render_transaction(receipt));
    }
    if let Some(balance) = snapshot.last_balance() {
        out.push('\n');
        let _ = writeln!(
            out,
            "Last balance: {} = {} wei ({})",
            balance.address,
            balance.balance,
            format_ether(balance.balance)
        );
    }

    out
}
