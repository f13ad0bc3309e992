use crate::{Bundler, NodeClient};
use alloy::{primitives::B256, transports::TransportError};
use core::time::Duration;
use tracing::{debug, instrument, warn};
use warden_types::TxBundle;

/// Delay between submitting the first transaction and the first receipt poll.
const INITIAL_DELAY: Duration = Duration::from_secs(1);

/// Errors returned by the [`SequentialSender`].
#[derive(Debug, thiserror::Error)]
pub enum SequentialSendError {
    /// Only `[attestation, user]` pairs can be sent.
    #[error("unexpected bundle size {0}, expected 2")]
    BundleSize(usize),
    /// The node refused the first transaction.
    #[error("failed to send first tx: {0}")]
    FirstTx(#[source] TransportError),
    /// The first transaction was mined and reverted.
    #[error("first tx failed: {0}")]
    FirstTxFailed(B256),
    /// The node refused the second transaction.
    #[error("failed to send second tx: {0}")]
    SecondTx(#[source] TransportError),
}

/// Sends a bundle through the upstream node one transaction at a time.
///
/// Used when no block builder is available. The first transaction is
/// submitted, its receipt is polled for a bounded number of attempts, then the
/// second transaction is submitted. A mined-and-failed first transaction stops
/// the bundle. A receipt that never shows up does not: once the polling budget
/// is spent the second transaction is sent anyway. Ordering is best effort,
/// not atomic.
#[derive(Debug, Clone)]
pub struct SequentialSender<N> {
    node: N,
    retry_times: u64,
    retry_interval: Duration,
    initial_delay: Duration,
}

impl<N> SequentialSender<N> {
    /// Create a new sender polling `retry_times` times, `retry_interval`
    /// apart.
    pub const fn new(node: N, retry_times: u64, retry_interval: Duration) -> Self {
        Self { node, retry_times, retry_interval, initial_delay: INITIAL_DELAY }
    }

    /// Set the delay before the first receipt poll.
    pub const fn with_initial_delay(mut self, initial_delay: Duration) -> Self {
        self.initial_delay = initial_delay;
        self
    }

    /// Get a reference to the node client.
    pub const fn node(&self) -> &N {
        &self.node
    }

    /// Receipt polling attempts.
    pub const fn retry_times(&self) -> u64 {
        self.retry_times
    }

    /// Delay between receipt polling attempts.
    pub const fn retry_interval(&self) -> Duration {
        self.retry_interval
    }
}

impl<N> SequentialSender<N>
where
    N: NodeClient + Sync,
{
    /// Poll for the first transaction's receipt. Fails only if the receipt
    /// reports a failed execution.
    async fn await_first(&self, hash: B256) -> Result<(), SequentialSendError> {
        tokio::time::sleep(self.initial_delay).await;

        for attempt in 0..self.retry_times {
            match self.node.receipt_status(hash).await {
                Ok(Some(true)) => return Ok(()),
                Ok(Some(false)) => return Err(SequentialSendError::FirstTxFailed(hash)),
                Ok(None) => debug!(attempt, %hash, "first tx receipt not available yet"),
                Err(err) => debug!(attempt, %hash, %err, "failed to get first tx receipt"),
            }
            tokio::time::sleep(self.retry_interval).await;
        }

        warn!(%hash, attempts = self.retry_times, "no receipt for first tx, sending second tx anyway");
        Ok(())
    }

    /// Send the two transactions in order.
    #[instrument(skip_all, fields(txs = bundle.len()))]
    pub async fn send(&self, bundle: TxBundle) -> Result<(), SequentialSendError> {
        let [first, second]: [_; 2] = bundle
            .into_txs()
            .try_into()
            .map_err(|txs: Vec<_>| SequentialSendError::BundleSize(txs.len()))?;

        let hash =
            self.node.send_raw_transaction(first).await.map_err(SequentialSendError::FirstTx)?;

        self.await_first(hash).await?;

        // Send the second transaction and forget about it.
        self.node.send_raw_transaction(second).await.map_err(SequentialSendError::SecondTx)?;
        Ok(())
    }
}

impl<N> Bundler for SequentialSender<N>
where
    N: NodeClient + Send + Sync,
{
    type Error = SequentialSendError;

    async fn send_bundle(&self, bundle: TxBundle) -> Result<(), Self::Error> {
        self.send(bundle).await
    }
}
