use crate::NodeClient;
use alloy::{
    eips::BlockId,
    primitives::{Address, Bytes, B256, U64},
    providers::{Provider, RootProvider},
    rpc::client::RpcClient,
    transports::{http::Http, TransportResult},
};
use std::borrow::Cow;
use tracing::instrument;
use warden_types::SimulationParams;

/// JSON-RPC client of the upstream node.
#[derive(Debug, Clone)]
pub struct NodeRpc {
    provider: RootProvider,
}

impl NodeRpc {
    /// Connect to the node at `url`, sending requests with `client`.
    pub fn new_with_client(url: reqwest::Url, client: reqwest::Client) -> Self {
        let transport = Http::with_client(client, url);
        Self { provider: RootProvider::new(RpcClient::new(transport, false)) }
    }

    /// Connect to the node at `url` with a new reqwest client.
    pub fn new(url: reqwest::Url) -> Self {
        Self::new_with_client(url, reqwest::Client::new())
    }

    /// Get the underlying provider.
    pub const fn provider(&self) -> &RootProvider {
        &self.provider
    }

    async fn simulate<R>(&self, method: &'static str, params: SimulationParams) -> TransportResult<R>
    where
        R: alloy::rpc::json_rpc::RpcRecv,
    {
        let SimulationParams { request, block, overrides, block_overrides } = params;
        let method = Cow::Borrowed(method);
        match block_overrides {
            Some(block_overrides) => {
                self.provider.raw_request(method, (request, block, overrides, block_overrides)).await
            }
            None => self.provider.raw_request(method, (request, block, overrides)).await,
        }
    }
}

impl NodeClient for NodeRpc {
    async fn chain_id(&self) -> TransportResult<u64> {
        self.provider.get_chain_id().await
    }

    #[instrument(skip_all)]
    async fn send_raw_transaction(&self, tx: Bytes) -> TransportResult<B256> {
        self.provider.send_raw_transaction(&tx).await.map(|pending| *pending.tx_hash())
    }

    async fn receipt_status(&self, hash: B256) -> TransportResult<Option<bool>> {
        self.provider
            .get_transaction_receipt(hash)
            .await
            .map(|receipt| receipt.map(|receipt| receipt.status()))
    }

    async fn transaction_count(&self, account: Address) -> TransportResult<u64> {
        self.provider.get_transaction_count(account).block_id(BlockId::latest()).await
    }

    async fn gas_price(&self) -> TransportResult<u128> {
        self.provider.get_gas_price().await
    }

    #[instrument(skip_all)]
    async fn call(&self, params: SimulationParams) -> TransportResult<Bytes> {
        self.simulate("eth_call", params).await
    }

    #[instrument(skip_all)]
    async fn estimate_gas(&self, params: SimulationParams) -> TransportResult<U64> {
        self.simulate("eth_estimateGas", params).await
    }
}
