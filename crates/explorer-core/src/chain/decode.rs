//! Conversion of provider JSON objects into chain views.
//!
//! Every decoder is all-or-nothing: a missing or malformed required field
//! yields `None` and no partially populated view ever escapes.

use serde_json::Value;

use crate::{
    chain::types::{
        Address, BlockTransactions, BlockView, Hash32, ReceiptStatus, TransactionReceiptView,
        TransactionSummary,
    },
    utils::hex::{hex_to_u256, hex_to_u64},
};
use primitive_types::U256;

fn field_u64(object: &Value, key: &str) -> Option<u64> {
    hex_to_u64(object.get(key)?.as_str()?)
}

fn field_hash(object: &Value, key: &str) -> Option<Hash32> {
    object.get(key)?.as_str()?.parse().ok()
}

fn field_address(object: &Value, key: &str) -> Option<Address> {
    object.get(key)?.as_str()?.parse().ok()
}

/// Decodes a nullable address field. `Some(None)` means explicitly null or absent;
/// the outer `None` means the field is present but malformed.
fn field_optional_address(object: &Value, key: &str) -> Option<Option<Address>> {
    match object.get(key) {
        None | Some(Value::Null) => Some(None),
        Some(Value::String(s)) => s.parse().ok().map(Some),
        Some(_) => None,
    }
}

/// Decodes a hex quantity (balance, value) into a [`U256`].
#[must_use]
pub fn decode_quantity(value: &Value) -> Option<U256> {
    hex_to_u256(value.as_str()?)
}

/// Decodes an `eth_blockNumber` result.
#[must_use]
pub fn decode_block_number(value: &Value) -> Option<u64> {
    hex_to_u64(value.as_str()?)
}

/// Converts a transaction object into a [`TransactionSummary`].
#[must_use]
pub fn decode_transaction_summary(tx: &Value) -> Option<TransactionSummary> {
    Some(TransactionSummary {
        hash: field_hash(tx, "hash")?,
        from: field_address(tx, "from")?,
        to: field_optional_address(tx, "to")?,
        value: decode_quantity(tx.get("value")?)?,
        nonce: field_u64(tx, "nonce")?,
        transaction_index: match tx.get("transactionIndex") {
            None | Some(Value::Null) => None,
            Some(v) => Some(hex_to_u64(v.as_str()?)?),
        },
    })
}

/// Converts an `eth_getBlockByNumber` result into a [`BlockView`].
///
/// `full_transactions` must match the flag the block was requested with:
/// hashes are expected when `false`, transaction objects when `true`.
#[must_use]
pub fn decode_block(block: &Value, full_transactions: bool) -> Option<BlockView> {
    let raw_transactions = block.get("transactions")?.as_array()?;

    let transactions = if full_transactions {
        BlockTransactions::Full(
            raw_transactions.iter().map(decode_transaction_summary).collect::<Option<Vec<_>>>()?,
        )
    } else {
        BlockTransactions::Hashes(
            raw_transactions
                .iter()
                .map(|tx| tx.as_str()?.parse::<Hash32>().ok())
                .collect::<Option<Vec<_>>>()?,
        )
    };

    Some(BlockView {
        number: field_u64(block, "number")?,
        hash: field_hash(block, "hash")?,
        parent_hash: field_hash(block, "parentHash")?,
        timestamp: field_u64(block, "timestamp")?,
        miner: field_address(block, "miner")?,
        gas_used: field_u64(block, "gasUsed")?,
        gas_limit: field_u64(block, "gasLimit")?,
        transactions,
    })
}

/// Joins an `eth_getTransactionReceipt` result with the matching
/// `eth_getTransactionByHash` result into a [`TransactionReceiptView`].
///
/// Returns `None` if either object is malformed or they describe different transactions.
#[must_use]
pub fn decode_receipt(receipt: &Value, transaction: &Value) -> Option<TransactionReceiptView> {
    let hash = field_hash(receipt, "transactionHash")?;
    if field_hash(transaction, "hash")? != hash {
        return None;
    }

    let status = match receipt.get("status") {
        None | Some(Value::Null) => ReceiptStatus::Unknown,
        Some(v) => match hex_to_u64(v.as_str()?)? {
            1 => ReceiptStatus::Success,
            0 => ReceiptStatus::Failed,
            _ => return None,
        },
    };

    Some(TransactionReceiptView {
        hash,
        from: field_address(receipt, "from")?,
        to: field_optional_address(receipt, "to")?,
        contract_address: field_optional_address(receipt, "contractAddress")?,
        value: decode_quantity(transaction.get("value")?)?,
        status,
        block_number: field_u64(receipt, "blockNumber")?,
        block_hash: field_hash(receipt, "blockHash")?,
        gas_used: field_u64(receipt, "gasUsed")?,
    })
}
