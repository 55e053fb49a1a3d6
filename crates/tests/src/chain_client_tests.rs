//! Integration tests for `ChainClient` against a mocked JSON-RPC provider.
//!
//! These tests verify request encoding, response decoding, the receipt join,
//! not-found handling, and how provider failures are classified.

use crate::mock_infrastructure::{
    client_for, create_test_receipt, create_test_transaction, scenario_tx_hash,
    BlockResponseBuilder, RpcMockBuilder, HEAD, RECIPIENT, SENDER,
};
use explorer_core::{
    chain::{BlockTransactions, ChainApi, ChainError, Entity, ErrorKind, ReceiptStatus, TxHash},
    config::{HttpClientConfig, ProviderConfig},
    provider::ProviderError,
};
use primitive_types::U256;
use serde_json::{json, Value};
use serial_test::serial;

fn one_ether() -> U256 {
    U256::from(10).pow(U256::from(18))
}

#[tokio::test]
#[serial]
async fn test_head_height() {
    let mut mock = RpcMockBuilder::new().await;
    mock.mock_block_number(HEAD);

    let client = client_for(&mock.url());
    assert_eq!(client.get_head_height().await.unwrap(), 18_000_000);
    assert!(mock.verify_all_called());
}

#[tokio::test]
#[serial]
async fn test_block_with_hashes() {
    let tx = scenario_tx_hash();
    let mut mock = RpcMockBuilder::new().await;
    mock.mock_get_block_by_number(
        HEAD,
        false,
        &BlockResponseBuilder::new(HEAD).with_transaction_hashes(&[&tx]).build(),
    );

    let client = client_for(&mock.url());
    let block = client.get_block(HEAD).await.unwrap();

    assert_eq!(block.number, HEAD);
    assert_eq!(block.hash.to_string(), format!("0x{HEAD:064x}"));
    assert!(!block.has_full_transactions());
    assert!(block.transactions.contains(&tx.parse().unwrap()));
    assert!(mock.verify_all_called());
}

#[tokio::test]
#[serial]
async fn test_block_with_full_transactions() {
    let tx = scenario_tx_hash();
    let mut mock = RpcMockBuilder::new().await;
    mock.mock_get_block_by_number(
        HEAD,
        true,
        &BlockResponseBuilder::new(HEAD)
            .with_transactions(vec![create_test_transaction(&tx, HEAD, "0xde0b6b3a7640000")])
            .build(),
    );

    let client = client_for(&mock.url());
    let block = client.get_block_with_transactions(HEAD).await.unwrap();

    let BlockTransactions::Full(txs) = &block.transactions else {
        panic!("expected full transactions, got {:?}", block.transactions);
    };
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].hash.to_string(), tx);
    assert_eq!(txs[0].from.to_string(), SENDER);
    assert_eq!(txs[0].value, one_ether());
}

#[tokio::test]
#[serial]
async fn test_block_hash_is_taken_from_provider() {
    let hash = format!("0x{}", "ab".repeat(32));
    let mut mock = RpcMockBuilder::new().await;
    mock.mock_get_block_by_number(7, false, &BlockResponseBuilder::new(7).with_hash(&hash).build());

    let client = client_for(&mock.url());
    let block = client.get_block(7).await.unwrap();

    assert_eq!(block.hash.to_string(), hash);
    assert_eq!(block.parent_hash.to_string(), format!("0x{:064x}", 6));
    assert!(block.transactions.is_empty());
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
#[serial]
async fn test_missing_block_is_not_found() {
    let mut mock = RpcMockBuilder::new().await;
    mock.mock_null_result("eth_getBlockByNumber");

    let client = client_for(&mock.url());
    let err = client.get_block(HEAD + 1_000).await.unwrap_err();

    assert!(matches!(err, ChainError::NotFound(Entity::Block(n)) if n == HEAD + 1_000));
    assert!(err.is_retryable());
}

#[tokio::test]
#[serial]
async fn test_wrong_block_number_is_malformed() {
    let mut mock = RpcMockBuilder::new().await;
    mock.mock_get_block_by_number(100, false, &BlockResponseBuilder::new(101).build());

    let client = client_for(&mock.url());
    let err = client.get_block(100).await.unwrap_err();

    assert!(matches!(err, ChainError::Provider(ProviderError::InvalidResponse(_))));
}

#[tokio::test]
#[serial]
async fn test_receipt_joins_transaction_value() {
    let hash = scenario_tx_hash();
    let mut mock = RpcMockBuilder::new().await;
    mock.mock_get_transaction_receipt(&hash, &create_test_receipt(&hash, HEAD, "0x1"))
        .mock_get_transaction_by_hash(
            &hash,
            &create_test_transaction(&hash, HEAD, "0xde0b6b3a7640000"),
        );

    let client = client_for(&mock.url());
    let receipt = client.get_transaction_receipt(&hash.parse().unwrap()).await.unwrap();

    assert_eq!(receipt.hash.to_string(), hash);
    assert_eq!(receipt.from.to_string(), SENDER);
    assert_eq!(receipt.to.map(|a| a.to_string()).as_deref(), Some(RECIPIENT));
    assert_eq!(receipt.value, one_ether());
    assert_eq!(receipt.status, ReceiptStatus::Success);
    assert_eq!(receipt.block_number, HEAD);
    assert_eq!(receipt.gas_used, 21_000);
    assert!(mock.verify_all_called());
}

#[tokio::test]
#[serial]
async fn test_failed_receipt_status() {
    let hash = scenario_tx_hash();
    let mut mock = RpcMockBuilder::new().await;
    mock.mock_get_transaction_receipt(&hash, &create_test_receipt(&hash, HEAD, "0x0"))
        .mock_get_transaction_by_hash(&hash, &create_test_transaction(&hash, HEAD, "0x0"));

    let client = client_for(&mock.url());
    let receipt = client.get_transaction_receipt(&hash.parse().unwrap()).await.unwrap();

    assert_eq!(receipt.status, ReceiptStatus::Failed);
    assert_eq!(receipt.value, U256::zero());
}

#[tokio::test]
#[serial]
async fn test_pending_transaction_is_not_found() {
    let hash = scenario_tx_hash();
    let mut mock = RpcMockBuilder::new().await;
    // Pending: known to the node but not yet mined, so no receipt.
    mock.mock_null_result("eth_getTransactionReceipt").mock_get_transaction_by_hash(
        &hash,
        &create_test_transaction(&hash, HEAD, "0x1"),
    );

    let client = client_for(&mock.url());
    let tx: TxHash = hash.parse().unwrap();
    let err = client.get_transaction_receipt(&tx).await.unwrap_err();

    assert!(matches!(err, ChainError::NotFound(Entity::Transaction(h)) if h == tx));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
#[serial]
async fn test_unknown_transaction_is_not_found() {
    let mut mock = RpcMockBuilder::new().await;
    mock.mock_null_result("eth_getTransactionReceipt")
        .mock_null_result("eth_getTransactionByHash");

    let client = client_for(&mock.url());
    let err = client.get_transaction_receipt(&scenario_tx_hash().parse().unwrap()).await;

    assert!(matches!(err, Err(ChainError::NotFound(Entity::Transaction(_)))));
}

#[tokio::test]
#[serial]
async fn test_balance_beyond_u64() {
    let mut mock = RpcMockBuilder::new().await;
    mock.mock_get_balance(SENDER, "0x1a249b1f10a06c96aff2");

    let client = client_for(&mock.url());
    let balance = client.get_balance(SENDER).await.unwrap();

    assert_eq!(balance, U256::from_dec_str("123456789012345678901234").unwrap());
    assert!(mock.verify_all_called());
}

#[tokio::test]
#[serial]
async fn test_balance_address_is_normalized() {
    let mut mock = RpcMockBuilder::new().await;
    mock.mock_get_balance("0xabcdef0123456789abcdef0123456789abcdef01", "0x0");

    let client = client_for(&mock.url());
    let balance =
        client.get_balance("  0xAbCdEf0123456789ABCDEF0123456789abcdef01 ").await.unwrap();

    assert_eq!(balance, U256::zero());
    assert!(mock.verify_all_called());
}

#[tokio::test]
#[serial]
async fn test_invalid_address_sends_no_request() {
    let mut mock = RpcMockBuilder::new().await;
    mock.forbid_method("eth_getBalance");

    let client = client_for(&mock.url());
    for bad in [
        "0x12345",
        "1111111111111111111111111111111111111111",
        "0xgg11111111111111111111111111111111111111",
    ] {
        let err = client.get_balance(bad).await.unwrap_err();
        assert!(matches!(err, ChainError::InvalidAddress { .. }), "input {bad}: {err:?}");
        assert!(!err.is_retryable());
    }

    assert!(mock.forbidden_untouched());
}

#[tokio::test]
#[serial]
async fn test_rpc_error_is_provider_error() {
    let mut mock = RpcMockBuilder::new().await;
    mock.mock_rpc_error("eth_blockNumber", -32005, "daily request count exceeded");

    let client = client_for(&mock.url());
    let err = client.get_head_height().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Provider);
    assert!(matches!(err, ChainError::Provider(ProviderError::RpcError(-32005, _))));
}

#[tokio::test]
#[serial]
async fn test_server_error_is_retryable() {
    let mut mock = RpcMockBuilder::new().await;
    mock.mock_server_error();

    let client = client_for(&mock.url());
    let err = client.get_head_height().await.unwrap_err();

    assert!(matches!(err, ChainError::Provider(ProviderError::HttpError(500, _))));
    assert!(err.is_retryable());
}

#[tokio::test]
#[serial]
async fn test_malformed_head_result() {
    let mut mock = RpcMockBuilder::new().await;
    mock.mock_null_result("eth_blockNumber");

    let client = client_for(&mock.url());
    let err = client.get_head_height().await.unwrap_err();

    assert!(matches!(err, ChainError::Provider(ProviderError::InvalidResponse(_))));
}

#[tokio::test]
#[serial]
async fn test_api_key_not_in_errors() {
    let key = "sk-live-do-not-print";
    let mut provider = ProviderConfig::with_endpoint(format!("http://127.0.0.1:9/v2/{key}"));
    provider.timeout_seconds = 2;
    let client =
        explorer_core::chain::ChainClient::new(&provider, HttpClientConfig::default()).unwrap();

    let err = client.get_head_height().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Provider);
    assert!(!err.to_string().contains(key), "key leaked in {err}");
    assert!(!format!("{err:?}").contains(key), "key leaked in {err:?}");
    assert!(!format!("{client:?}").contains(key), "key leaked in {client:?}");
}

#[test]
fn test_fixture_receipt_shape() {
    let receipt: Value = create_test_receipt("0xaa", 1, "0x1");
    assert_eq!(receipt["status"], json!("0x1"));
    assert_eq!(receipt["contractAddress"], Value::Null);
}
