//! Sequential sending of an attested pair through the upstream node.

use alloy::primitives::{bytes, Bytes};
use core::time::Duration;
use warden_clients::{Bundler, SequentialSendError, SequentialSender};
use warden_test_utils::{
    node::{MockNode, ReceiptScript},
    TEST_CHAIN_ID,
};
use warden_types::TxBundle;

const ATTESTATION: Bytes = bytes!("aa");
const USER: Bytes = bytes!("bb");

fn sender(node: &MockNode, retry_times: u64) -> SequentialSender<MockNode> {
    SequentialSender::new(node.clone(), retry_times, Duration::from_secs(2))
}

#[tokio::test(start_paused = true)]
async fn sends_in_order_after_receipt() {
    let node = MockNode::new(TEST_CHAIN_ID);
    node.push_receipts([ReceiptScript::Missing, ReceiptScript::Status(true)]);

    sender(&node, 10).send_bundle(TxBundle::attested(ATTESTATION, USER)).await.unwrap();

    assert_eq!(node.sent(), vec![ATTESTATION, USER]);
    assert_eq!(node.receipt_polls(), 2);
}

#[tokio::test(start_paused = true)]
async fn failed_first_tx_stops_the_bundle() {
    let node = MockNode::new(TEST_CHAIN_ID);
    node.push_receipts([ReceiptScript::Error, ReceiptScript::Status(false)]);

    let err =
        sender(&node, 10).send_bundle(TxBundle::attested(ATTESTATION, USER)).await.unwrap_err();

    assert!(matches!(err, SequentialSendError::FirstTxFailed(_)));
    assert_eq!(node.sent(), vec![ATTESTATION]);
}

#[tokio::test(start_paused = true)]
async fn exhausted_polling_still_sends_second() {
    let node = MockNode::new(TEST_CHAIN_ID);
    node.set_default_receipt(ReceiptScript::Error);

    let start = tokio::time::Instant::now();
    sender(&node, 3).send_bundle(TxBundle::attested(ATTESTATION, USER)).await.unwrap();

    assert_eq!(node.sent(), vec![ATTESTATION, USER]);
    assert_eq!(node.receipt_polls(), 3);
    // One second of initial delay, then one interval after each attempt.
    assert_eq!(start.elapsed(), Duration::from_secs(7));
}

#[tokio::test(start_paused = true)]
async fn missing_receipt_still_sends_second() {
    let node = MockNode::new(TEST_CHAIN_ID);
    node.set_default_receipt(ReceiptScript::Missing);

    sender(&node, 2).send_bundle(TxBundle::attested(ATTESTATION, USER)).await.unwrap();

    assert_eq!(node.sent(), vec![ATTESTATION, USER]);
    assert_eq!(node.receipt_polls(), 2);
}

#[tokio::test(start_paused = true)]
async fn only_pairs_are_sent() {
    let node = MockNode::new(TEST_CHAIN_ID);

    for txs in [vec![], vec![ATTESTATION], vec![ATTESTATION, USER, bytes!("cc")]] {
        let len = txs.len();
        let err = sender(&node, 1).send_bundle(TxBundle::new(txs)).await.unwrap_err();
        assert!(matches!(err, SequentialSendError::BundleSize(n) if n == len));
    }
    assert!(node.sent().is_empty());
}

#[tokio::test(start_paused = true)]
async fn first_send_failure_is_final() {
    let node = MockNode::new(TEST_CHAIN_ID);
    node.fail_sends("insufficient funds");

    let err =
        sender(&node, 1).send_bundle(TxBundle::attested(ATTESTATION, USER)).await.unwrap_err();

    assert!(matches!(err, SequentialSendError::FirstTx(_)));
    assert_eq!(node.receipt_polls(), 0);
}
