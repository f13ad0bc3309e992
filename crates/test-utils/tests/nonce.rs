//! Nonce sequencing for the managed account.

use alloy::primitives::Address;
use std::sync::Arc;
use warden_clients::{NodeClient, NonceManager};
use warden_test_utils::{node::MockNode, TEST_CHAIN_ID};

const MANAGED: Address = Address::repeat_byte(0x11);
const OTHER: Address = Address::repeat_byte(0x22);

fn manager(remote: u64, max_drift: u64) -> (NonceManager<MockNode>, MockNode) {
    let node = MockNode::new(TEST_CHAIN_ID);
    node.set_nonce(MANAGED, remote);
    (NonceManager::new(node.clone(), MANAGED, max_drift), node)
}

#[tokio::test]
async fn consecutive_nonces() {
    let (nonces, _) = manager(5, 16);
    for expected in 5..10 {
        assert_eq!(nonces.transaction_count(MANAGED).await.unwrap(), expected);
    }
}

#[tokio::test]
async fn remote_overtakes_local() {
    let (nonces, node) = manager(5, 16);
    assert_eq!(nonces.next_nonce(MANAGED).await.unwrap(), 5);
    assert_eq!(nonces.next_nonce(MANAGED).await.unwrap(), 6);

    node.set_nonce(MANAGED, 20);
    assert_eq!(nonces.next_nonce(MANAGED).await.unwrap(), 20);
    assert_eq!(nonces.next_nonce(MANAGED).await.unwrap(), 21);
}

#[tokio::test]
async fn drift_resets_to_remote() {
    let (nonces, _) = manager(0, 3);

    // Local runs ahead of a remote that never moves.
    assert_eq!(nonces.next_nonce(MANAGED).await.unwrap(), 0);
    assert_eq!(nonces.next_nonce(MANAGED).await.unwrap(), 1);
    assert_eq!(nonces.next_nonce(MANAGED).await.unwrap(), 2);
    // local - remote == 3 == max_drift
    assert_eq!(nonces.next_nonce(MANAGED).await.unwrap(), 0);
    assert_eq!(nonces.next_nonce(MANAGED).await.unwrap(), 1);
}

#[tokio::test]
async fn unmanaged_accounts_read_remote() {
    let (nonces, node) = manager(0, 16);
    node.set_nonce(OTHER, 7);

    assert_eq!(nonces.next_nonce(OTHER).await.unwrap(), 7);
    assert_eq!(nonces.next_nonce(OTHER).await.unwrap(), 7);
    // Managed account state is untouched.
    assert_eq!(nonces.next_nonce(MANAGED).await.unwrap(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_nonces_are_unique() {
    let (nonces, _) = manager(100, 1_000);
    let nonces = Arc::new(nonces);

    let handles: Vec<_> = (0..50)
        .map(|_| {
            let nonces = nonces.clone();
            tokio::spawn(async move { nonces.next_nonce(MANAGED).await.unwrap() })
        })
        .collect();

    let mut issued = Vec::new();
    for handle in handles {
        issued.push(handle.await.unwrap());
    }
    issued.sort_unstable();
    assert_eq!(issued, (100..150).collect::<Vec<_>>());
}

#[tokio::test]
async fn other_methods_are_delegated() {
    let (nonces, node) = manager(0, 16);
    assert_eq!(nonces.chain_id().await.unwrap(), TEST_CHAIN_ID);
    assert_eq!(nonces.gas_price().await.unwrap(), node.with_state(|s| s.gas_price));
}
