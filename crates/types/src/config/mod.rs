mod env_utils;
use env_utils::{
    load_address, load_b256_opt, load_string, load_string_opt, load_u16_or, load_u64_or,
    load_url, load_url_opt,
};

mod error;
pub use error::ConfigError;

use alloy::primitives::{Address, B256};
use core::{fmt, str::FromStr, time::Duration};
use url::Url;

/// Default receipt polling attempts of the sequential sender.
pub const DEFAULT_TX_RETRY_TIMES: u64 = 10;
/// Default receipt polling interval of the sequential sender.
pub const DEFAULT_TX_RETRY_INTERVAL_SECONDS: u64 = 2;
/// Default drift threshold of the nonce sequencer.
pub const DEFAULT_NONCE_MAX_DRIFT: u64 = 16;
/// Default gas limit of locally signed attestation transactions.
pub const DEFAULT_ATTESTER_GAS_LIMIT: u64 = 100_000;
/// Default listen port.
pub const DEFAULT_PORT: u16 = 8080;
/// Default log filter.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// How the firewall decides whether a transaction needs an attestation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttestationMode {
    /// Simulate the transaction with the bypass override. Attest only if the
    /// simulation reverts with the "attestation not found" marker.
    Simulate,
    /// Ask the attester for every transaction with a recipient.
    AlwaysAsk,
}

impl FromStr for AttestationMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simulate" => Ok(Self::Simulate),
            "always-ask" | "always_ask" => Ok(Self::AlwaysAsk),
            _ => Err(ConfigError::Mode(s.to_string())),
        }
    }
}

impl fmt::Display for AttestationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simulate => f.write_str("simulate"),
            Self::AlwaysAsk => f.write_str("always-ask"),
        }
    }
}

/// Where attestations come from.
#[derive(Clone, PartialEq, Eq)]
pub enum AttesterConfig {
    /// A remote attestation service.
    Remote {
        /// Base URL, `/attest-tx` is appended.
        url: Url,
        /// Bearer token.
        token: String,
    },
    /// Sign `enable()` calls on a validator contract with a local key.
    Local {
        /// Signing key of the attester account.
        private_key: B256,
        /// The validator contract.
        validator: Address,
        /// Gas limit of each attestation transaction.
        gas_limit: u64,
        /// Drift threshold of the attester account's nonce sequencer.
        max_drift: u64,
    },
}

// Keep secrets out of logs.
impl fmt::Debug for AttesterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote { url, .. } => {
                f.debug_struct("Remote").field("url", url).finish_non_exhaustive()
            }
            Self::Local { validator, gas_limit, max_drift, .. } => f
                .debug_struct("Local")
                .field("validator", validator)
                .field("gas_limit", gas_limit)
                .field("max_drift", max_drift)
                .finish_non_exhaustive(),
        }
    }
}

/// Configuration of the gateway process, loaded once at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Upstream node HTTP endpoint.
    pub target_rpc_url: Url,
    /// How attestation need is decided.
    pub attestation_mode: AttestationMode,
    /// Attestation source.
    pub attester: AttesterConfig,
    /// Block builder endpoint. When absent, bundles are sent sequentially.
    pub builder_url: Option<Url>,
    /// Receipt polling attempts of the sequential sender.
    pub tx_retry_times: u64,
    /// Receipt polling interval of the sequential sender.
    pub tx_retry_interval: Duration,
    /// Gateway credential unlocking credential-gated methods.
    pub api_key: Option<String>,
    /// Listen port.
    pub port: u16,
    /// Tracing filter directive.
    pub log_level: String,
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("target_rpc_url", &self.target_rpc_url.as_str())
            .field("attestation_mode", &self.attestation_mode)
            .field("attester", &self.attester)
            .field("builder_url", &self.builder_url.as_ref().map(Url::as_str))
            .field("tx_retry_times", &self.tx_retry_times)
            .field("tx_retry_interval", &self.tx_retry_interval)
            .field("api_key", &self.api_key.is_some())
            .field("port", &self.port)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl GatewayConfig {
    /// Load the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key: &str| std::env::var(key).ok())
    }

    /// Load the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let src = &lookup;

        let attestation_mode = load_string(src, "ATTESTATION_MODE")?.parse()?;

        let attester = match load_b256_opt(src, "ATTESTER_PRIVATE_KEY")? {
            Some(private_key) => AttesterConfig::Local {
                private_key,
                validator: load_address(src, "VALIDATOR_ADDRESS")?,
                gas_limit: load_u64_or(src, "ATTESTER_GAS_LIMIT", DEFAULT_ATTESTER_GAS_LIMIT)?,
                max_drift: load_u64_or(src, "NONCE_MAX_DRIFT", DEFAULT_NONCE_MAX_DRIFT)?,
            },
            None => AttesterConfig::Remote {
                url: load_url(src, "ATTESTER_API_URL")?,
                token: load_string(src, "ATTESTER_AUTH_TOKEN")?,
            },
        };

        Ok(Self {
            target_rpc_url: load_url(src, "TARGET_RPC_URL")?,
            attestation_mode,
            attester,
            builder_url: load_url_opt(src, "BUILDER_API_URL")?,
            tx_retry_times: load_u64_or(src, "TX_RETRY_TIMES", DEFAULT_TX_RETRY_TIMES)?,
            tx_retry_interval: Duration::from_secs(load_u64_or(
                src,
                "TX_RETRY_INTERVAL_SECONDS",
                DEFAULT_TX_RETRY_INTERVAL_SECONDS,
            )?),
            api_key: load_string_opt(src, "API_KEY"),
            port: load_u16_or(src, "PORT", DEFAULT_PORT)?,
            log_level: load_string_opt(src, "LOG_LEVEL")
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        })
    }
}
