mod error;
pub use error::FirewallError;

use alloy::{
    consensus::{transaction::SignerRecoverable, Transaction, TxEnvelope},
    eips::{eip2718::Decodable2718, BlockId},
    primitives::{Address, Bytes, TxKind, B256, U64},
    rpc::types::{state::StateOverride, BlockOverrides, TransactionInput, TransactionRequest},
    transports::TransportResult,
};
use tracing::{debug, info, instrument, warn};
use warden_clients::{Attester, Bundler, NodeClient};
use warden_types::{
    is_attestation_not_found, with_firewall_bypass, AttestRequest, Attestation, AttestationMode,
    SimulationParams, TxBundle,
};

/// The transaction firewall.
///
/// Decides, per submitted transaction, whether an attestation is needed. When
/// it is, the attestation and the user transaction are handed to the
/// [`Bundler`] as one ordered pair. Every failure after the decision to attest
/// is final: the user transaction is never sent without its attestation.
#[derive(Debug, Clone)]
pub struct Firewall<N, A, B> {
    chain_id: u64,
    mode: AttestationMode,
    node: N,
    attester: A,
    bundler: B,
}

impl<N, A, B> Firewall<N, A, B> {
    /// Create a new firewall for `chain_id`.
    pub const fn new(
        chain_id: u64,
        mode: AttestationMode,
        node: N,
        attester: A,
        bundler: B,
    ) -> Self {
        Self { chain_id, mode, node, attester, bundler }
    }

    /// Chain served by the firewall.
    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// How attestation need is decided.
    pub const fn mode(&self) -> AttestationMode {
        self.mode
    }

    /// Get a reference to the node client.
    pub const fn node(&self) -> &N {
        &self.node
    }

    /// Get a reference to the attester.
    pub const fn attester(&self) -> &A {
        &self.attester
    }

    /// Get a reference to the bundler.
    pub const fn bundler(&self) -> &B {
        &self.bundler
    }
}

impl<N, A, B> Firewall<N, A, B>
where
    N: NodeClient + Sync,
    A: Attester + Sync,
    B: Bundler + Sync,
{
    /// Submit a signed transaction, attesting it first if needed. Returns the
    /// hash of the user transaction.
    #[instrument(skip_all, fields(tx_hash = tracing::field::Empty))]
    pub async fn send_raw_transaction(&self, raw: Bytes) -> Result<B256, FirewallError> {
        let envelope = TxEnvelope::decode_2718(&mut raw.as_ref())?;
        tracing::Span::current().record("tx_hash", tracing::field::display(envelope.tx_hash()));

        if let Some(got) = envelope.chain_id() {
            if got != self.chain_id {
                return Err(FirewallError::ChainId { expected: self.chain_id, got });
            }
        }

        let from = envelope.recover_signer().map_err(|e| FirewallError::Recovery(e.to_string()))?;

        // Contract creation has no fixed address to attest against.
        let Some(to) = envelope.to() else {
            debug!(%from, "contract creation, forwarding");
            return self.forward(raw).await;
        };

        if self.mode == AttestationMode::Simulate
            && !self.simulate_needs_attestation(&envelope, from).await
        {
            debug!(%from, %to, "simulation passed, forwarding");
            return self.forward(raw).await;
        }

        let request =
            AttestRequest::new(from, to, envelope.input(), envelope.value(), self.chain_id);
        let attestation = match self.attester.attest(request).await {
            Ok(Attestation::Attested(attestation)) => attestation,
            Ok(Attestation::NotRequired) => {
                debug!(%from, %to, "attestation not required, forwarding");
                return self.forward(raw).await;
            }
            Err(err) => {
                warn!(%err, "attestation failed, dropping tx");
                return Err(FirewallError::Attestation(Box::new(err)));
            }
        };

        self.bundler
            .send_bundle(TxBundle::attested(attestation, raw))
            .await
            .map_err(|err| FirewallError::Bundle(Box::new(err)))?;

        info!(%from, %to, "sent attested bundle");
        Ok(*envelope.tx_hash())
    }

    /// Simulate the transaction with the firewall bypassed. Only the
    /// "attestation not found" revert means an attestation is needed.
    async fn simulate_needs_attestation(&self, envelope: &TxEnvelope, from: Address) -> bool {
        let params =
            SimulationParams::latest(call_request(envelope, from), with_firewall_bypass(None));
        match self.node.call(params).await {
            Ok(_) => false,
            Err(err) if is_attestation_not_found(&err) => true,
            Err(err) => {
                debug!(%err, "simulation failed without the attestation marker");
                false
            }
        }
    }

    async fn forward(&self, raw: Bytes) -> Result<B256, FirewallError> {
        self.node.send_raw_transaction(raw).await.map_err(Into::into)
    }

    /// `eth_call` through the firewall bypass.
    pub async fn call(
        &self,
        request: TransactionRequest,
        block: Option<BlockId>,
        overrides: Option<StateOverride>,
        block_overrides: Option<Box<BlockOverrides>>,
    ) -> TransportResult<Bytes> {
        self.node.call(bypass_params(request, block, overrides, block_overrides)).await
    }

    /// `eth_estimateGas` through the firewall bypass.
    pub async fn estimate_gas(
        &self,
        request: TransactionRequest,
        block: Option<BlockId>,
        overrides: Option<StateOverride>,
        block_overrides: Option<Box<BlockOverrides>>,
    ) -> TransportResult<U64> {
        self.node.estimate_gas(bypass_params(request, block, overrides, block_overrides)).await
    }
}

fn bypass_params(
    request: TransactionRequest,
    block: Option<BlockId>,
    overrides: Option<StateOverride>,
    block_overrides: Option<Box<BlockOverrides>>,
) -> SimulationParams {
    SimulationParams {
        request,
        block: block.unwrap_or_else(BlockId::latest),
        overrides: with_firewall_bypass(overrides),
        block_overrides,
    }
}

/// Build the `eth_call` request simulating `envelope` as sent by `from`.
fn call_request(envelope: &TxEnvelope, from: Address) -> TransactionRequest {
    let mut request = TransactionRequest {
        from: Some(from),
        to: envelope.to().map(TxKind::Call),
        value: Some(envelope.value()),
        input: TransactionInput::new(envelope.input().clone()),
        gas: Some(envelope.gas_limit()),
        access_list: envelope.access_list().cloned(),
        max_fee_per_blob_gas: envelope.max_fee_per_blob_gas(),
        blob_versioned_hashes: envelope.blob_versioned_hashes().map(<[B256]>::to_vec),
        authorization_list: envelope.authorization_list().map(<[_]>::to_vec),
        ..Default::default()
    };

    if envelope.is_dynamic_fee() {
        request.max_fee_per_gas = Some(envelope.max_fee_per_gas());
        request.max_priority_fee_per_gas = envelope.max_priority_fee_per_gas();
    } else {
        request.gas_price = envelope.gas_price();
    }

    request
}
