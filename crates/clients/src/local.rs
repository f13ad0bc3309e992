use crate::{Attester, NodeClient, NonceManager};
use alloy::{
    consensus::{SignableTransaction, TxEnvelope, TxLegacy},
    eips::eip2718::Encodable2718,
    primitives::{Address, TxKind, U256},
    signers::{local::PrivateKeySigner, SignerSync},
    sol_types::SolCall,
    transports::TransportError,
};
use tracing::{info, instrument};
use warden_types::{AttestRequest, Attestation};

alloy::sol! {
    interface ISecurityValidator {
        function enable() external;
    }
}

/// Errors returned by the [`LocalAttester`].
#[derive(Debug, thiserror::Error)]
pub enum LocalAttesterError {
    /// Fetching the nonce or gas price failed.
    #[error("node error: {0}")]
    Node(#[from] TransportError),
    /// Signing the attestation failed.
    #[error("signing error: {0}")]
    Signing(#[from] alloy::signers::Error),
}

/// Issues attestations by signing `enable()` calls on a validator contract
/// with a locally held key.
///
/// Every request is attested. Nonces come from the wrapped [`NodeClient`],
/// which should be a [`NonceManager`] for the signer's account so that
/// concurrent attestations never share a nonce.
#[derive(Debug, Clone)]
pub struct LocalAttester<N> {
    node: N,
    signer: PrivateKeySigner,
    validator: Address,
    chain_id: u64,
    gas_limit: u64,
}

impl<N> LocalAttester<N> {
    /// Create a new local attester.
    pub const fn new(
        node: N,
        signer: PrivateKeySigner,
        validator: Address,
        chain_id: u64,
        gas_limit: u64,
    ) -> Self {
        Self { node, signer, validator, chain_id, gas_limit }
    }

    /// The attester account.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// The validator contract attestations are sent to.
    pub const fn validator(&self) -> Address {
        self.validator
    }

    /// Get a reference to the node client.
    pub const fn node(&self) -> &N {
        &self.node
    }
}

impl<N> LocalAttester<NonceManager<N>> {
    /// Create a local attester whose nonces are sequenced by a
    /// [`NonceManager`] for the signer's account.
    pub fn with_nonce_manager(
        node: N,
        signer: PrivateKeySigner,
        validator: Address,
        chain_id: u64,
        gas_limit: u64,
        max_drift: u64,
    ) -> Self {
        let node = NonceManager::new(node, signer.address(), max_drift);
        Self::new(node, signer, validator, chain_id, gas_limit)
    }
}

impl<N> LocalAttester<N>
where
    N: NodeClient + Sync,
{
    /// Sign a fresh attestation transaction.
    #[instrument(skip_all, fields(from = %request.from, to = %request.to))]
    pub async fn sign_attestation(
        &self,
        request: &AttestRequest,
    ) -> Result<Attestation, LocalAttesterError> {
        // The nonce is taken last, a failed read before it must not consume one.
        let gas_price = self.node.gas_price().await?;
        let nonce = self.node.transaction_count(self.signer.address()).await?;

        let tx = TxLegacy {
            chain_id: Some(self.chain_id),
            nonce,
            gas_price,
            gas_limit: self.gas_limit,
            to: TxKind::Call(self.validator),
            value: U256::ZERO,
            input: ISecurityValidator::enableCall {}.abi_encode().into(),
        };

        let signature = self.signer.sign_hash_sync(&tx.signature_hash())?;
        let envelope = TxEnvelope::from(tx.into_signed(signature));

        info!(tx_hash = %envelope.tx_hash(), nonce, "created local attestation");
        Ok(Attestation::Attested(envelope.encoded_2718().into()))
    }
}

impl<N> Attester for LocalAttester<N>
where
    N: NodeClient + Send + Sync,
{
    type Error = LocalAttesterError;

    async fn attest(&self, request: AttestRequest) -> Result<Attestation, Self::Error> {
        self.sign_attestation(&request).await
    }
}
