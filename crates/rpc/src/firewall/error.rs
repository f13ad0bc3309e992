use alloy::{eips::eip2718::Eip2718Error, transports::TransportError};

type BoxError = Box<dyn core::error::Error + Send + Sync>;

/// Errors returned by the [`Firewall`].
///
/// [`Firewall`]: crate::Firewall
#[derive(Debug, thiserror::Error)]
pub enum FirewallError {
    /// The raw transaction could not be decoded.
    #[error("failed to decode transaction: {0}")]
    Decode(#[from] Eip2718Error),
    /// The signer could not be recovered.
    #[error("failed to recover tx signer: {0}")]
    Recovery(String),
    /// The transaction targets another chain.
    #[error("invalid chain id: expected {expected}, got {got}")]
    ChainId {
        /// The chain served by the gateway.
        expected: u64,
        /// The chain the transaction was signed for.
        got: u64,
    },
    /// The upstream node returned an error.
    #[error(transparent)]
    Node(#[from] TransportError),
    /// The attester failed. The user transaction was not sent.
    #[error("attestation fails: {0}")]
    Attestation(#[source] BoxError),
    /// The bundle could not be delivered.
    #[error("failed to send bundle: {0}")]
    Bundle(#[source] BoxError),
}

impl FirewallError {
    /// True for errors caused by the submitted transaction itself.
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::Recovery(_) | Self::ChainId { .. })
    }

    /// The upstream node's error, if this error came from it.
    pub const fn as_node_error(&self) -> Option<&TransportError> {
        match self {
            Self::Node(err) => Some(err),
            _ => None,
        }
    }

    /// Turn into a string by value, allows for
    /// `.map_err(FirewallError::into_string)` to be used.
    pub fn into_string(self) -> String {
        ToString::to_string(&self)
    }
}
