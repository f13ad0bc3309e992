use crate::NodeClient;
use alloy::{
    primitives::{Address, Bytes, B256, U64},
    transports::TransportResult,
};
use tokio::sync::Mutex;
use tracing::{debug, instrument};
use warden_types::SimulationParams;

/// Hands out nonces for one managed account, reconciled with the node.
///
/// Wraps a [`NodeClient`] and is one itself. Every method is delegated except
/// [`NodeClient::transaction_count`], which for the managed account returns
/// the next locally tracked nonce and consumes it:
///
/// - the local nonce is seeded from the node on first use,
/// - it jumps forward if the node reports a higher nonce,
/// - it resets to the node's value once it runs `max_drift` or more ahead.
///
/// Handed-out nonces are expected to be used by a submitted transaction.
/// Unused nonces are not detected; the drift reset bounds the damage. Local
/// state is not persisted, a restart starts again from the node's value.
#[derive(Debug)]
pub struct NonceManager<N> {
    inner: N,
    managed: Address,
    max_drift: u64,
    local: Mutex<Option<u64>>,
}

impl<N> NonceManager<N> {
    /// Manage the nonce of `managed` on top of `inner`.
    pub fn new(inner: N, managed: Address, max_drift: u64) -> Self {
        Self { inner, managed, max_drift, local: Mutex::new(None) }
    }

    /// The managed account.
    pub const fn managed(&self) -> Address {
        self.managed
    }

    /// The drift threshold.
    pub const fn max_drift(&self) -> u64 {
        self.max_drift
    }

    /// Get a reference to the wrapped client.
    pub const fn inner(&self) -> &N {
        &self.inner
    }
}

impl<N> NonceManager<N>
where
    N: NodeClient + Sync,
{
    /// Next nonce to use for `account`.
    ///
    /// Unmanaged accounts get the node's value verbatim.
    #[instrument(skip(self), fields(managed = account == self.managed))]
    pub async fn next_nonce(&self, account: Address) -> TransportResult<u64> {
        if account != self.managed {
            return self.inner.transaction_count(account).await;
        }

        // Held across the node call, issuance for the managed account is
        // serialized.
        let mut local = self.local.lock().await;
        let remote = self.inner.transaction_count(account).await?;

        let mut current = local.unwrap_or(remote).max(remote);
        if current - remote >= self.max_drift {
            debug!(current, remote, max_drift = self.max_drift, "nonce drifted, resetting");
            current = remote;
        }

        *local = Some(current + 1);
        Ok(current)
    }
}

impl<N> NodeClient for NonceManager<N>
where
    N: NodeClient + Send + Sync,
{
    fn chain_id(&self) -> impl core::future::Future<Output = TransportResult<u64>> + Send {
        self.inner.chain_id()
    }

    fn send_raw_transaction(
        &self,
        tx: Bytes,
    ) -> impl core::future::Future<Output = TransportResult<B256>> + Send {
        self.inner.send_raw_transaction(tx)
    }

    fn receipt_status(
        &self,
        hash: B256,
    ) -> impl core::future::Future<Output = TransportResult<Option<bool>>> + Send {
        self.inner.receipt_status(hash)
    }

    async fn transaction_count(&self, account: Address) -> TransportResult<u64> {
        self.next_nonce(account).await
    }

    fn gas_price(&self) -> impl core::future::Future<Output = TransportResult<u128>> + Send {
        self.inner.gas_price()
    }

    fn call(
        &self,
        params: SimulationParams,
    ) -> impl core::future::Future<Output = TransportResult<Bytes>> + Send {
        self.inner.call(params)
    }

    fn estimate_gas(
        &self,
        params: SimulationParams,
    ) -> impl core::future::Future<Output = TransportResult<U64>> + Send {
        self.inner.estimate_gas(params)
    }
}
