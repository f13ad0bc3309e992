mod endpoints;
use endpoints::*;

mod helpers;
pub use helpers::{firewall_error, relay_error, RpcErrorData};

use crate::ctx::RpcCtx;
use warden_clients::{Attester, Bundler, NodeClient};

/// Instantiate the `eth` API router.
///
/// Only the methods the firewall intercepts are served here. Everything else
/// is routed by the gateway before it reaches this router.
pub fn eth<N, A, B>() -> ajj::Router<RpcCtx<N, A, B>>
where
    N: NodeClient + Send + Sync + 'static,
    A: Attester + Send + Sync + 'static,
    B: Bundler + Send + Sync + 'static,
{
    ajj::Router::new()
        .route("sendRawTransaction", send_raw_transaction)
        .route("call", call)
        .route("estimateGas", estimate_gas)
}
