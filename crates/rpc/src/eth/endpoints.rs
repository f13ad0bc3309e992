use crate::{
    ctx::RpcCtx,
    eth::helpers::{firewall_error, relay_error, RpcErrorData},
};
use ajj::{HandlerCtx, ResponsePayload};
use alloy::{
    eips::BlockId,
    primitives::{Bytes, B256, U64},
    rpc::types::{state::StateOverride, BlockOverrides, TransactionRequest},
};
use serde::Deserialize;
use tracing::debug;
use warden_clients::{Attester, Bundler, NodeClient};

/// Args for `eth_estimateGas` and `eth_call`.
#[derive(Debug, Deserialize)]
pub(super) struct TxParams(
    TransactionRequest,
    #[serde(default)] Option<BlockId>,
    #[serde(default)] Option<StateOverride>,
    #[serde(default)] Option<Box<BlockOverrides>>,
);

pub(super) async fn send_raw_transaction<N, A, B>(
    _hctx: HandlerCtx,
    (tx,): (Bytes,),
    ctx: RpcCtx<N, A, B>,
) -> ResponsePayload<B256, RpcErrorData>
where
    N: NodeClient + Send + Sync + 'static,
    A: Attester + Send + Sync + 'static,
    B: Bundler + Send + Sync + 'static,
{
    match ctx.send_raw_transaction(tx).await {
        Ok(hash) => ResponsePayload::Success(hash),
        Err(err) => {
            debug!(%err, "eth_sendRawTransaction failed");
            ResponsePayload::Failure(firewall_error(err))
        }
    }
}

pub(super) async fn call<N, A, B>(
    _hctx: HandlerCtx,
    TxParams(request, block, overrides, block_overrides): TxParams,
    ctx: RpcCtx<N, A, B>,
) -> ResponsePayload<Bytes, RpcErrorData>
where
    N: NodeClient + Send + Sync + 'static,
    A: Attester + Send + Sync + 'static,
    B: Bundler + Send + Sync + 'static,
{
    match ctx.call(request, block, overrides, block_overrides).await {
        Ok(output) => ResponsePayload::Success(output),
        Err(err) => ResponsePayload::Failure(relay_error(err)),
    }
}

pub(super) async fn estimate_gas<N, A, B>(
    _hctx: HandlerCtx,
    TxParams(request, block, overrides, block_overrides): TxParams,
    ctx: RpcCtx<N, A, B>,
) -> ResponsePayload<U64, RpcErrorData>
where
    N: NodeClient + Send + Sync + 'static,
    A: Attester + Send + Sync + 'static,
    B: Bundler + Send + Sync + 'static,
{
    match ctx.estimate_gas(request, block, overrides, block_overrides).await {
        Ok(gas) => ResponsePayload::Success(gas),
        Err(err) => ResponsePayload::Failure(relay_error(err)),
    }
}
