//! End-to-end explorer session against a mocked provider.
//!
//! Exercises the full stack: explorer task, `ChainClient`, the JSON-RPC
//! transport and the HTTP client, with mockito standing in for the provider.

use crate::mock_infrastructure::{
    client_for, create_test_receipt, create_test_transaction, scenario_tx_hash,
    BlockResponseBuilder, RpcMockBuilder, HEAD, RECIPIENT, SENDER,
};
use explorer_core::{
    chain::{BlockTransactions, ErrorKind, ReceiptStatus},
    explorer::{Explorer, RequestKind, RequestStatus},
};
use primitive_types::U256;
use serial_test::serial;
use std::sync::Arc;

#[tokio::test]
#[serial]
async fn test_head_block_transaction_session() {
    let hash = scenario_tx_hash();
    let mut mock = RpcMockBuilder::new().await;
    mock.mock_block_number(HEAD)
        .mock_get_block_by_number(
            HEAD,
            false,
            &BlockResponseBuilder::new(HEAD).with_transaction_hashes(&[&hash]).build(),
        )
        .mock_get_transaction_receipt(&hash, &create_test_receipt(&hash, HEAD, "0x1"))
        .mock_get_transaction_by_hash(
            &hash,
            &create_test_transaction(&hash, HEAD, "0xde0b6b3a7640000"),
        );

    let handle = Explorer::spawn(Arc::new(client_for(&mock.url())));

    let snapshot = handle.settled_kind(RequestKind::Head).await.unwrap();
    assert_eq!(snapshot.head_height(), Some(18_000_000));
    let recent = snapshot.recent_block_numbers(3);
    assert_eq!(recent, vec![18_000_000, 17_999_999, 17_999_998]);

    let ticket = handle.select_block(recent[0]).await.unwrap();
    let snapshot = handle.settled(ticket).await.unwrap();
    let block = snapshot.selected_block().unwrap();
    assert_eq!(block.number, HEAD);
    let selected = *block.transactions.hashes().next().unwrap();
    assert_eq!(selected.to_string(), hash);

    let ticket = handle.select_transaction(selected).await.unwrap();
    let snapshot = handle.settled(ticket).await.unwrap();

    assert_eq!(snapshot.head_height(), Some(HEAD));
    assert_eq!(snapshot.selected_block().map(|b| b.number), Some(HEAD));
    let receipt = snapshot.selected_transaction().unwrap();
    assert_eq!(receipt.from.to_string(), SENDER);
    assert_eq!(receipt.to.map(|a| a.to_string()).as_deref(), Some(RECIPIENT));
    assert_eq!(receipt.value, U256::from(10).pow(U256::from(18)));
    assert_eq!(receipt.status, ReceiptStatus::Success);
    for kind in [RequestKind::Head, RequestKind::Block, RequestKind::Transaction] {
        assert_eq!(snapshot.status(kind), &RequestStatus::Resolved, "{kind}");
    }
    assert_eq!(snapshot.stats.stale_discarded, 0);

    handle.shutdown().await;
    assert!(mock.verify_all_called());
}

#[tokio::test]
#[serial]
async fn test_head_block_with_transactions_session() {
    let hash = scenario_tx_hash();
    let tx = create_test_transaction(&hash, HEAD, "0xde0b6b3a7640000");
    let mut mock = RpcMockBuilder::new().await;
    mock.mock_block_number(HEAD)
        .mock_get_block_by_number(
            HEAD,
            true,
            &BlockResponseBuilder::new(HEAD).with_transactions(vec![tx.clone()]).build(),
        )
        .mock_get_transaction_receipt(&hash, &create_test_receipt(&hash, HEAD, "0x1"))
        .mock_get_transaction_by_hash(&hash, &tx);

    let handle = Explorer::spawn(Arc::new(client_for(&mock.url())));
    let snapshot = handle.settled_kind(RequestKind::Head).await.unwrap();
    assert_eq!(snapshot.head_height(), Some(18_000_000));

    let ticket = handle.select_block_with_transactions(HEAD).await.unwrap();
    let snapshot = handle.settled(ticket).await.unwrap();
    let block = snapshot.selected_block().unwrap();
    let BlockTransactions::Full(summaries) = &block.transactions else {
        panic!("expected transaction summaries, got {:?}", block.transactions);
    };
    assert_eq!(summaries.len(), 1);
    let summary = &summaries[0];
    assert_eq!(summary.hash.to_string(), hash);
    assert_eq!(summary.from.to_string(), SENDER);
    assert_eq!(summary.value, U256::exp10(18));

    let ticket = handle.select_transaction(summary.hash).await.unwrap();
    let snapshot = handle.settled(ticket).await.unwrap();

    assert_eq!(snapshot.head_height(), Some(HEAD));
    assert!(snapshot.selected_block().unwrap().has_full_transactions());
    let receipt = snapshot.selected_transaction().unwrap();
    assert_eq!(receipt.from.to_string(), SENDER);
    assert_eq!(receipt.to.map(|a| a.to_string()).as_deref(), Some(RECIPIENT));
    assert_eq!(receipt.value.to_string(), "1000000000000000000");
    for kind in [RequestKind::Head, RequestKind::Block, RequestKind::Transaction] {
        assert_eq!(snapshot.status(kind), &RequestStatus::Resolved, "{kind}");
    }

    handle.shutdown().await;
    assert_eq!(mock.call_count(), 4);
}

#[tokio::test]
#[serial]
async fn test_balance_session() {
    let mut mock = RpcMockBuilder::new().await;
    mock.mock_block_number(HEAD).mock_get_balance(SENDER, "0x1a249b1f10a06c96aff2");
    mock.forbid_method("eth_getTransactionReceipt");

    let handle = Explorer::spawn(Arc::new(client_for(&mock.url())));
    let mut notices = handle.balance_notices();

    let ticket = handle.check_balance(SENDER).await.unwrap();
    let snapshot = handle.settled(ticket).await.unwrap();

    let expected = U256::from_dec_str("123456789012345678901234").unwrap();
    assert_eq!(snapshot.last_balance_wei(), Some(expected));
    let notice = notices.recv().await.unwrap();
    assert_eq!(notice.address, SENDER);
    assert_eq!(notice.balance, expected);

    let ticket = handle.check_balance("not-an-address").await.unwrap();
    let snapshot = handle.settled(ticket).await.unwrap();
    assert_eq!(snapshot.balance.status.failure().map(|f| f.kind), Some(ErrorKind::InvalidAddress));
    assert!(snapshot.last_balance().is_none());

    handle.settled_kind(RequestKind::Head).await.unwrap();
    handle.shutdown().await;
    assert!(mock.verify_all_called());
    assert!(mock.forbidden_untouched());
}

#[tokio::test]
#[serial]
async fn test_provider_outage_is_reported_per_kind() {
    let mut mock = RpcMockBuilder::new().await;
    mock.mock_block_number(HEAD).mock_http_status("eth_getBlockByNumber", 503);

    let handle = Explorer::spawn(Arc::new(client_for(&mock.url())));
    handle.settled_kind(RequestKind::Head).await.unwrap();

    let ticket = handle.select_block(HEAD).await.unwrap();
    let snapshot = handle.settled(ticket).await.unwrap();

    let failure = snapshot.block.status.failure().unwrap();
    assert_eq!(failure.kind, ErrorKind::Provider);
    assert!(failure.retryable);
    assert_eq!(snapshot.head_height(), Some(HEAD));
    assert_eq!(snapshot.head.status, RequestStatus::Resolved);

    handle.shutdown().await;
}
