use alloy::{
    primitives::{Address, Bytes, B256, U64},
    transports::TransportResult,
};
use core::future::Future;
use warden_types::{AttestRequest, Attestation, SimulationParams, TxBundle};

/// A trait for the upstream node.
///
/// Errors are alloy [`TransportError`]s so that JSON-RPC error payloads
/// returned by the node, including revert data, reach the caller intact.
///
/// [`TransportError`]: alloy::transports::TransportError
pub trait NodeClient {
    /// Chain id reported by the node.
    fn chain_id(&self) -> impl Future<Output = TransportResult<u64>> + Send;

    /// Submit a signed, EIP-2718 encoded transaction. Returns its hash.
    fn send_raw_transaction(&self, tx: Bytes)
        -> impl Future<Output = TransportResult<B256>> + Send;

    /// Execution status of a mined transaction. `None` while no receipt
    /// exists.
    fn receipt_status(&self, hash: B256)
        -> impl Future<Output = TransportResult<Option<bool>>> + Send;

    /// Next nonce of `account` at the latest block.
    fn transaction_count(&self, account: Address)
        -> impl Future<Output = TransportResult<u64>> + Send;

    /// Current gas price suggested by the node.
    fn gas_price(&self) -> impl Future<Output = TransportResult<u128>> + Send;

    /// `eth_call` with the given parameters.
    fn call(&self, params: SimulationParams)
        -> impl Future<Output = TransportResult<Bytes>> + Send;

    /// `eth_estimateGas` with the given parameters.
    fn estimate_gas(&self, params: SimulationParams)
        -> impl Future<Output = TransportResult<U64>> + Send;
}

/// A trait for attestation sources.
///
/// A declined attestation is the [`Attestation::NotRequired`] outcome, not an
/// error. Implementors make at most one attempt per call.
pub trait Attester {
    /// The error type returned when no outcome could be obtained.
    type Error: core::error::Error + Send + Sync + 'static;

    /// Obtain an attestation for the described transaction.
    fn attest(
        &self,
        request: AttestRequest,
    ) -> impl Future<Output = Result<Attestation, Self::Error>> + Send;
}

/// A trait for delivering an ordered bundle of transactions.
pub trait Bundler {
    /// The error type returned by submission.
    type Error: core::error::Error + Send + Sync + 'static;

    /// Deliver the bundle, preserving its order.
    fn send_bundle(&self, bundle: TxBundle) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
