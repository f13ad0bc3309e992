//! Warden RPC.
//!
//! This crate provides the transaction firewall, the `eth_` JSON-RPC
//! endpoints it serves, and the gateway routing every inbound request either
//! to those endpoints, to the upstream node, or to a JSON-RPC error.
//!
//! ## Usage Example
//!
//! ```no_run
//! # use warden_clients::{NodeRpc, AttesterClient, BuilderClient};
//! # use warden_types::AttestationMode;
//! use warden_rpc::{shutdown_signal, Firewall, Gateway, RpcCtx, ServeConfig, UpstreamProxy};
//!
//! # async fn f(node: NodeRpc, attester: AttesterClient, builder: BuilderClient, upstream: reqwest::Url) -> eyre::Result<()> {
//! let firewall = Firewall::new(1, AttestationMode::Simulate, node, attester, builder);
//! let gateway = Gateway::new(RpcCtx::new(firewall), UpstreamProxy::new(upstream), None);
//!
//! ServeConfig::all_interfaces(8080).serve(gateway, shutdown_signal()).await?;
//! # Ok(())
//! # }
//! ```

#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    clippy::missing_const_for_fn,
    rustdoc::all
)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod config;
pub use config::{shutdown_signal, ServeConfig};

mod ctx;
pub use ctx::RpcCtx;

mod eth;
pub use eth::{eth, firewall_error, relay_error, RpcErrorData};

mod firewall;
pub use firewall::{Firewall, FirewallError};

mod gateway;
pub use gateway::{
    cors_layer, method_name, Gateway, Route, UpstreamProxy, METHOD_NOT_AVAILABLE, PARSE_ERROR,
};

/// Re-exported for convenience
pub use ::ajj;

use warden_clients::{Attester, Bundler, NodeClient};

/// Create a new router serving the intercepted methods.
pub fn router<N, A, B>() -> ajj::Router<RpcCtx<N, A, B>>
where
    N: NodeClient + Send + Sync + 'static,
    A: Attester + Send + Sync + 'static,
    B: Bundler + Send + Sync + 'static,
{
    ajj::Router::new().nest("eth", eth::<N, A, B>())
}
