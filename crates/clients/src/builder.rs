use crate::{types::SendBundleRequest, Bundler};
use alloy::{
    providers::{Provider, RootProvider},
    rpc::client::RpcClient,
    transports::{http::Http, TransportError},
};
use std::borrow::Cow;
use tracing::{debug, instrument};
use warden_types::TxBundle;

/// Sends bundles to a block builder for atomic, ordered inclusion.
///
/// One `eth_sendBundle` call per bundle. No local polling: the outcome is
/// whatever the builder reports.
#[derive(Debug, Clone)]
pub struct BuilderClient {
    provider: RootProvider,
}

impl BuilderClient {
    /// Connect to the builder at `url`, sending requests with `client`.
    pub fn new_with_client(url: reqwest::Url, client: reqwest::Client) -> Self {
        let transport = Http::with_client(client, url);
        Self { provider: RootProvider::new(RpcClient::new(transport, false)) }
    }

    /// Connect to the builder at `url` with a new reqwest client.
    pub fn new(url: reqwest::Url) -> Self {
        Self::new_with_client(url, reqwest::Client::new())
    }

    /// Send the bundle as a single `eth_sendBundle` call.
    #[instrument(skip_all, fields(txs = bundle.len()))]
    pub async fn send(&self, bundle: TxBundle) -> Result<(), TransportError> {
        let params = (SendBundleRequest { txs: bundle.into_txs() },);
        let resp: serde_json::Value =
            self.provider.raw_request(Cow::Borrowed("eth_sendBundle"), params).await?;
        debug!(%resp, "bundle accepted by builder");
        Ok(())
    }
}

impl Bundler for BuilderClient {
    type Error = TransportError;

    async fn send_bundle(&self, bundle: TxBundle) -> Result<(), Self::Error> {
        self.send(bundle).await
    }
}
