//! Firewall decisions, end to end over in-memory collaborators.
//!
//! - Contract creation is never attested.
//! - Simulation decides attestation need only on the marker revert.
//! - An attestation is always bundled before the user transaction.
//! - Every failure after deciding to attest drops the user transaction.

use alloy::{
    consensus::TxLegacy,
    primitives::{bytes, keccak256, Address, Bytes, TxKind, U256},
    rpc::types::{
        state::{AccountOverride, StateOverride},
        TransactionRequest,
    },
};
use warden_rpc::{Firewall, FirewallError};
use warden_test_utils::{
    attester::MockAttester,
    bundler::MockBundler,
    node::MockNode,
    specs::{
        make_wallet, raw, sign_legacy_with_key_pair, sign_tx_with_key_pair, simple_call,
        simple_create, simple_send,
    },
    TEST_CHAIN_ID,
};
use warden_types::{AttestationMode, FIREWALL_BYPASS_ADDRESS, FIREWALL_BYPASS_CODE};

const RECIPIENT: Address = Address::repeat_byte(0x31);
const ATTESTATION: Bytes = bytes!("f00d");

type TestFirewall = Firewall<MockNode, MockAttester, MockBundler>;

fn firewall(mode: AttestationMode, attester: MockAttester) -> (TestFirewall, MockNode, MockBundler) {
    let node = MockNode::new(TEST_CHAIN_ID);
    let bundler = MockBundler::new();
    let firewall = Firewall::new(TEST_CHAIN_ID, mode, node.clone(), attester, bundler.clone());
    (firewall, node, bundler)
}

fn user_call() -> Bytes {
    let tx = simple_call(RECIPIENT, bytes!("deadbeef"), U256::from(3), 0, TEST_CHAIN_ID);
    raw(&sign_tx_with_key_pair(&make_wallet(1), tx))
}

#[tokio::test]
async fn contract_creation_is_forwarded() {
    for mode in [AttestationMode::Simulate, AttestationMode::AlwaysAsk] {
        let attester = MockAttester::attesting(ATTESTATION);
        let (firewall, node, bundler) = firewall(mode, attester.clone());
        node.revert_calls_attestation_not_found();

        let tx = raw(&sign_tx_with_key_pair(
            &make_wallet(1),
            simple_create(bytes!("6080"), 0, TEST_CHAIN_ID),
        ));
        let hash = firewall.send_raw_transaction(tx.clone()).await.unwrap();

        assert_eq!(hash, keccak256(&tx));
        assert_eq!(node.sent(), vec![tx]);
        assert!(node.calls().is_empty());
        assert!(attester.requests().is_empty());
        assert!(bundler.bundles().is_empty());
    }
}

#[tokio::test]
async fn passing_simulation_is_forwarded() {
    let attester = MockAttester::attesting(ATTESTATION);
    let (firewall, node, bundler) = firewall(AttestationMode::Simulate, attester.clone());

    let tx = user_call();
    firewall.send_raw_transaction(tx.clone()).await.unwrap();

    assert_eq!(node.sent(), vec![tx]);
    assert!(attester.requests().is_empty());
    assert!(bundler.bundles().is_empty());

    // The simulation runs with the bypass override.
    let calls = node.calls();
    assert_eq!(calls.len(), 1);
    let bypass = &calls[0].overrides[&FIREWALL_BYPASS_ADDRESS];
    assert_eq!(bypass.code.as_ref(), Some(&FIREWALL_BYPASS_CODE));
    assert_eq!(calls[0].request.from, Some(make_wallet(1).address()));
}

#[tokio::test]
async fn unrelated_revert_is_forwarded() {
    let attester = MockAttester::attesting(ATTESTATION);
    let (firewall, node, bundler) = firewall(AttestationMode::Simulate, attester.clone());
    node.revert_calls_with("0x08c379a0");

    let tx = user_call();
    firewall.send_raw_transaction(tx.clone()).await.unwrap();

    assert_eq!(node.sent(), vec![tx]);
    assert!(attester.requests().is_empty());
    assert!(bundler.bundles().is_empty());
}

#[tokio::test]
async fn marker_revert_is_attested_and_bundled() {
    let attester = MockAttester::attesting(ATTESTATION);
    let (firewall, node, bundler) = firewall(AttestationMode::Simulate, attester.clone());
    node.revert_calls_attestation_not_found();

    let tx = user_call();
    let hash = firewall.send_raw_transaction(tx.clone()).await.unwrap();

    // The hash is the user transaction's, computed locally.
    assert_eq!(hash, keccak256(&tx));
    assert!(node.sent().is_empty());

    let bundles = bundler.bundles();
    assert_eq!(bundles.len(), 1);
    assert_eq!(bundles[0].txs(), &[ATTESTATION, tx]);

    let requests = attester.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].from, make_wallet(1).address());
    assert_eq!(requests[0].to, RECIPIENT);
    assert_eq!(requests[0].input, "0xdeadbeef");
    assert_eq!(requests[0].value, U256::from(3));
    assert_eq!(requests[0].chain_id, TEST_CHAIN_ID);
}

#[tokio::test]
async fn always_ask_skips_simulation() {
    let attester = MockAttester::attesting(ATTESTATION);
    let (firewall, node, bundler) = firewall(AttestationMode::AlwaysAsk, attester.clone());

    let tx = user_call();
    firewall.send_raw_transaction(tx.clone()).await.unwrap();

    assert!(node.calls().is_empty());
    assert_eq!(attester.requests().len(), 1);
    assert_eq!(bundler.bundles()[0].txs(), &[ATTESTATION, tx]);
}

#[tokio::test]
async fn not_required_is_forwarded_once() {
    let attester = MockAttester::not_required();
    let (firewall, node, bundler) = firewall(AttestationMode::AlwaysAsk, attester.clone());

    let tx = user_call();
    let hash = firewall.send_raw_transaction(tx.clone()).await.unwrap();

    assert_eq!(hash, keccak256(&tx));
    assert_eq!(node.sent(), vec![tx]);
    assert_eq!(attester.requests().len(), 1);
    assert!(bundler.bundles().is_empty());
}

#[tokio::test]
async fn attester_failure_sends_nothing() {
    let attester = MockAttester::failing("attester down");
    let (firewall, node, bundler) = firewall(AttestationMode::Simulate, attester.clone());
    node.revert_calls_attestation_not_found();

    let err = firewall.send_raw_transaction(user_call()).await.unwrap_err();

    assert!(matches!(err, FirewallError::Attestation(_)));
    assert!(err.to_string().contains("attester down"));
    assert!(node.sent().is_empty());
    assert!(bundler.bundles().is_empty());
}

#[tokio::test]
async fn bundler_failure_is_final() {
    let node = MockNode::new(TEST_CHAIN_ID);
    let bundler = MockBundler::failing("builder rejected bundle");
    let firewall = Firewall::new(
        TEST_CHAIN_ID,
        AttestationMode::AlwaysAsk,
        node.clone(),
        MockAttester::attesting(ATTESTATION),
        bundler.clone(),
    );

    let err = firewall.send_raw_transaction(user_call()).await.unwrap_err();

    assert!(matches!(err, FirewallError::Bundle(_)));
    assert_eq!(bundler.bundles().len(), 1);
    // No fallback path.
    assert!(node.sent().is_empty());
}

#[tokio::test]
async fn undecodable_tx_is_rejected() {
    let attester = MockAttester::attesting(ATTESTATION);
    let (firewall, node, _) = firewall(AttestationMode::Simulate, attester.clone());

    let err = firewall.send_raw_transaction(bytes!("02c0ffee")).await.unwrap_err();

    assert!(matches!(err, FirewallError::Decode(_)));
    assert!(err.is_client_error());
    assert!(node.sent().is_empty());
    assert!(node.calls().is_empty());
    assert!(attester.requests().is_empty());
}

#[tokio::test]
async fn foreign_chain_is_rejected() {
    let attester = MockAttester::attesting(ATTESTATION);
    let (firewall, node, _) = firewall(AttestationMode::AlwaysAsk, attester.clone());

    let tx = simple_send(RECIPIENT, U256::from(1), 0, TEST_CHAIN_ID + 1);
    let err =
        firewall.send_raw_transaction(raw(&sign_tx_with_key_pair(&make_wallet(1), tx))).await;

    assert!(matches!(
        err,
        Err(FirewallError::ChainId { expected: TEST_CHAIN_ID, got }) if got == TEST_CHAIN_ID + 1
    ));
    assert!(node.sent().is_empty());
    assert!(attester.requests().is_empty());
}

#[tokio::test]
async fn pre_eip155_legacy_is_accepted() {
    let (firewall, node, _) = firewall(AttestationMode::Simulate, MockAttester::not_required());

    let tx = TxLegacy {
        chain_id: None,
        gas_price: 1_000_000_000,
        gas_limit: 21_000,
        to: TxKind::Call(RECIPIENT),
        ..Default::default()
    };
    let tx = raw(&sign_legacy_with_key_pair(&make_wallet(2), tx));
    firewall.send_raw_transaction(tx.clone()).await.unwrap();

    assert_eq!(node.sent(), vec![tx]);
    assert_eq!(node.calls()[0].request.gas_price, Some(1_000_000_000));
}

#[tokio::test]
async fn forward_failure_is_relayed() {
    let (firewall, node, _) = firewall(AttestationMode::Simulate, MockAttester::not_required());
    node.fail_sends("nonce too low");

    let err = firewall.send_raw_transaction(user_call()).await.unwrap_err();
    assert!(err.as_node_error().is_some());
    assert!(err.to_string().contains("nonce too low"));
}

#[tokio::test]
async fn simulation_calls_keep_caller_overrides() {
    let (firewall, node, _) = firewall(AttestationMode::Simulate, MockAttester::not_required());

    let other = Address::repeat_byte(0x44);
    let mut overrides = StateOverride::default();
    overrides.insert(
        other,
        AccountOverride { balance: Some(U256::from(9)), ..Default::default() },
    );

    let request = TransactionRequest { to: Some(TxKind::Call(RECIPIENT)), ..Default::default() };
    firewall.call(request.clone(), None, Some(overrides), None).await.unwrap();
    firewall.estimate_gas(request, None, None, None).await.unwrap();

    let call = &node.calls()[0];
    assert_eq!(call.overrides.len(), 2);
    assert_eq!(call.overrides[&other].balance, Some(U256::from(9)));
    assert!(call.overrides.contains_key(&FIREWALL_BYPASS_ADDRESS));
    assert!(call.block.is_latest());

    let estimate = &node.estimates()[0];
    assert_eq!(estimate.overrides.len(), 1);
    assert!(estimate.overrides.contains_key(&FIREWALL_BYPASS_ADDRESS));
}
