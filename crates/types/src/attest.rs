use alloy::primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

/// Request body sent to the attestation service for a transaction that needs
/// an attestation before it may be broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttestRequest {
    /// Recovered sender of the user transaction.
    pub from: Address,
    /// Recipient of the user transaction.
    pub to: Address,
    /// Transaction input, `0x`-prefixed hex.
    pub input: String,
    /// Value carried by the user transaction.
    pub value: U256,
    /// Chain the transaction is destined for.
    pub chain_id: u64,
}

impl AttestRequest {
    /// Build a request from the decoded transaction fields.
    pub fn new(from: Address, to: Address, input: &Bytes, value: U256, chain_id: u64) -> Self {
        Self { from, to, input: input.to_string(), value, chain_id }
    }
}

/// Successful outcome of an attestation exchange.
///
/// Failures are reported through the attester's error type. The
/// [`Attestation::NotRequired`] outcome is not a failure: the caller should
/// forward the user transaction unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attestation {
    /// The signed, EIP-2718 encoded attestation transaction.
    Attested(Bytes),
    /// The attester declined because the transaction does not need one.
    NotRequired,
}

impl Attestation {
    /// True if the attester declined to attest.
    pub const fn is_not_required(&self) -> bool {
        matches!(self, Self::NotRequired)
    }

    /// The attestation transaction, if one was issued.
    pub const fn tx(&self) -> Option<&Bytes> {
        match self {
            Self::Attested(tx) => Some(tx),
            Self::NotRequired => None,
        }
    }
}
