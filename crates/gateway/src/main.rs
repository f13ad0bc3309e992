//! The `warden` binary: an attestation-enforcing JSON-RPC gateway.

use alloy::signers::local::PrivateKeySigner;
use eyre::WrapErr;
use tracing::info;
use tracing_subscriber::EnvFilter;
use warden_clients::{
    http_client, AnyAttester, AnyBundler, AttesterClient, BuilderClient, LocalAttester,
    NodeClient, NodeRpc, SequentialSender,
};
use warden_rpc::{shutdown_signal, Firewall, Gateway, RpcCtx, ServeConfig, UpstreamProxy};
use warden_types::{AttesterConfig, GatewayConfig};

fn init_tracing(log_level: &str) -> eyre::Result<()> {
    let filter = match std::env::var("RUST_LOG") {
        Ok(directives) if !directives.is_empty() => EnvFilter::try_new(directives)?,
        _ => EnvFilter::try_new(log_level)?,
    };
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| eyre::eyre!(e))
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let config = GatewayConfig::from_env().wrap_err("invalid configuration")?;
    init_tracing(&config.log_level).wrap_err("invalid log level")?;
    info!(?config, "loaded configuration");

    let client = http_client()?;
    let node = NodeRpc::new_with_client(config.target_rpc_url.clone(), client.clone());
    let chain_id = node.chain_id().await.wrap_err("failed to get chain id")?;

    let bundler: AnyBundler<NodeRpc> = match &config.builder_url {
        Some(url) => BuilderClient::new_with_client(url.clone(), client.clone()).into(),
        None => {
            SequentialSender::new(node.clone(), config.tx_retry_times, config.tx_retry_interval)
                .into()
        }
    };

    let attester: AnyAttester<NodeRpc> = match &config.attester {
        AttesterConfig::Remote { url, token } => {
            AttesterClient::new_with_client(url, token.clone(), client.clone())?.into()
        }
        AttesterConfig::Local { private_key, validator, gas_limit, max_drift } => {
            let signer = PrivateKeySigner::from_bytes(private_key)?;
            info!(attester = %signer.address(), %validator, "using local attester");
            LocalAttester::with_nonce_manager(
                node.clone(),
                signer,
                *validator,
                chain_id,
                *gas_limit,
                *max_drift,
            )
            .into()
        }
    };

    let firewall = Firewall::new(chain_id, config.attestation_mode, node, attester, bundler);
    let proxy = UpstreamProxy::new_with_client(config.target_rpc_url.clone(), client);
    let gateway = Gateway::new(RpcCtx::new(firewall), proxy, config.api_key.clone());

    info!(chain_id, mode = %config.attestation_mode, "starting warden json-rpc gateway");
    ServeConfig::all_interfaces(config.port).serve(gateway, shutdown_signal()).await
}
