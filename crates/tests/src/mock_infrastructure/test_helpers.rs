//! Test Helper Functions and Utilities
//!
//! Common fixtures and constructors shared by the integration tests.

use explorer_core::{
    chain::{
        Address, BlockTransactions, BlockView, ChainClient, Hash32, ReceiptStatus,
        TransactionReceiptView, TxHash,
    },
    config::{HttpClientConfig, ProviderConfig},
};
use primitive_types::U256;
use serde_json::{json, Value};

pub const SENDER: &str = "0x1111111111111111111111111111111111111111";
pub const RECIPIENT: &str = "0x2222222222222222222222222222222222222222";
pub const HEAD: u64 = 18_000_000;

/// `0xabc…123`: the transaction the end-to-end scenario selects.
#[must_use]
pub fn scenario_tx_hash() -> String {
    format!("0xabc{}123", "0".repeat(58))
}

/// Creates a chain client pointed at a mock endpoint.
#[must_use]
pub fn client_for(url: &str) -> ChainClient {
    let mut provider = ProviderConfig::with_endpoint(url);
    provider.timeout_seconds = 5;
    ChainClient::new(&provider, HttpClientConfig::default()).expect("mock endpoint is valid")
}

/// Creates an `eth_getTransactionByHash` result.
#[must_use]
pub fn create_test_transaction(hash: &str, block_number: u64, value_hex: &str) -> Value {
    json!({
        "hash": hash,
        "nonce": "0x2a",
        "blockHash": format!("0x{block_number:064x}"),
        "blockNumber": format!("0x{block_number:x}"),
        "transactionIndex": "0x0",
        "from": SENDER,
        "to": RECIPIENT,
        "value": value_hex,
        "gas": "0x5208",
        "gasPrice": "0x4a817c800",
        "input": "0x"
    })
}

/// Creates an `eth_getTransactionReceipt` result.
#[must_use]
pub fn create_test_receipt(hash: &str, block_number: u64, status: &str) -> Value {
    json!({
        "transactionHash": hash,
        "transactionIndex": "0x0",
        "blockHash": format!("0x{block_number:064x}"),
        "blockNumber": format!("0x{block_number:x}"),
        "from": SENDER,
        "to": RECIPIENT,
        "cumulativeGasUsed": "0x5208",
        "gasUsed": "0x5208",
        "effectiveGasPrice": "0x4a817c800",
        "contractAddress": null,
        "logs": [],
        "logsBloom": format!("0x{}", "0".repeat(512)),
        "type": "0x2",
        "status": status
    })
}

/// A decoded block with transaction hashes only.
#[must_use]
pub fn block_view(number: u64) -> BlockView {
    BlockView {
        number,
        hash: Hash32::new(u256_bytes(number)),
        parent_hash: Hash32::new(u256_bytes(number.saturating_sub(1))),
        timestamp: 1_600_000_000 + number,
        miner: Address::new([0; 20]),
        gas_used: 21_000,
        gas_limit: 30_000_000,
        transactions: BlockTransactions::Hashes(Vec::new()),
    }
}

/// A decoded successful value transfer from [`SENDER`] to [`RECIPIENT`].
#[must_use]
pub fn receipt_view(hash: TxHash, value: U256) -> TransactionReceiptView {
    TransactionReceiptView {
        hash,
        from: SENDER.parse().expect("valid sender"),
        to: Some(RECIPIENT.parse().expect("valid recipient")),
        contract_address: None,
        value,
        status: ReceiptStatus::Success,
        block_number: HEAD,
        block_hash: Hash32::new(u256_bytes(HEAD)),
        gas_used: 21_000,
    }
}

fn u256_bytes(value: u64) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    bytes[24..].copy_from_slice(&value.to_be_bytes());
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_hash_is_well_formed() {
        let hash: TxHash = scenario_tx_hash().parse().unwrap();
        assert_eq!(hash.short(), "0xabc0…0123");
    }

    #[test]
    fn test_block_view_hash_matches_json_fixture() {
        assert_eq!(block_view(100).hash.to_string(), format!("0x{:064x}", 100));
    }
}
