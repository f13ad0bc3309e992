//! Bodies exchanged with the attestation service and the block builder.
use alloy::primitives::Bytes;
use serde::{Deserialize, Serialize};

/// Body of a `200` response from `/attest-tx`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestResponse {
    /// The signed attestation transaction.
    pub tx: Bytes,
}

/// Body of a structured error response from `/attest-tx`. A `409` carrying
/// this body means the transaction needs no attestation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestErrorBody {
    /// Service-specific error code.
    pub code: i64,
    /// Human readable explanation.
    pub message: String,
}

/// Parameter object of `eth_sendBundle`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendBundleRequest {
    /// Raw transactions, in inclusion order.
    pub txs: Vec<Bytes>,
}
