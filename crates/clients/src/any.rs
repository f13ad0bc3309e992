use crate::{
    Attester, AttesterClient, AttesterError, BuilderClient, Bundler, LocalAttester,
    LocalAttesterError, NodeClient, NonceManager, SequentialSendError, SequentialSender,
};
use alloy::transports::TransportError;
use warden_types::{AttestRequest, Attestation, TxBundle};

/// Errors returned by [`AnyAttester`].
#[derive(Debug, thiserror::Error)]
pub enum AnyAttesterError {
    /// Remote attestation service error.
    #[error(transparent)]
    Remote(#[from] AttesterError),
    /// Local attester error.
    #[error(transparent)]
    Local(#[from] LocalAttesterError),
}

/// Errors returned by [`AnyBundler`].
#[derive(Debug, thiserror::Error)]
pub enum AnyBundlerError {
    /// Block builder error.
    #[error(transparent)]
    Builder(#[from] TransportError),
    /// Sequential sender error.
    #[error(transparent)]
    Sequential(#[from] SequentialSendError),
}

/// The attestation source chosen at startup.
#[derive(Debug)]
pub enum AnyAttester<N> {
    /// A remote attestation service.
    Remote(AttesterClient),
    /// A locally held key, with nonces sequenced for its account.
    Local(LocalAttester<NonceManager<N>>),
}

impl<N> From<AttesterClient> for AnyAttester<N> {
    fn from(client: AttesterClient) -> Self {
        Self::Remote(client)
    }
}

impl<N> From<LocalAttester<NonceManager<N>>> for AnyAttester<N> {
    fn from(attester: LocalAttester<NonceManager<N>>) -> Self {
        Self::Local(attester)
    }
}

impl<N> Attester for AnyAttester<N>
where
    N: NodeClient + Send + Sync,
{
    type Error = AnyAttesterError;

    async fn attest(&self, request: AttestRequest) -> Result<Attestation, Self::Error> {
        match self {
            Self::Remote(client) => client.attest(request).await.map_err(Into::into),
            Self::Local(attester) => attester.attest(request).await.map_err(Into::into),
        }
    }
}

/// The bundle delivery strategy chosen at startup.
#[derive(Debug, Clone)]
pub enum AnyBundler<N> {
    /// Atomic delivery through a block builder.
    Builder(BuilderClient),
    /// Best-effort ordered delivery through the upstream node.
    Sequential(SequentialSender<N>),
}

impl<N> From<BuilderClient> for AnyBundler<N> {
    fn from(client: BuilderClient) -> Self {
        Self::Builder(client)
    }
}

impl<N> From<SequentialSender<N>> for AnyBundler<N> {
    fn from(sender: SequentialSender<N>) -> Self {
        Self::Sequential(sender)
    }
}

impl<N> Bundler for AnyBundler<N>
where
    N: NodeClient + Send + Sync,
{
    type Error = AnyBundlerError;

    async fn send_bundle(&self, bundle: TxBundle) -> Result<(), Self::Error> {
        match self {
            Self::Builder(client) => client.send_bundle(bundle).await.map_err(Into::into),
            Self::Sequential(sender) => sender.send_bundle(bundle).await.map_err(Into::into),
        }
    }
}
