//! Types shared by the warden attestation gateway.
//!
//! This crate holds plain data only: attestation requests and outcomes, the
//! ordered transaction bundle, simulation parameters and the firewall state
//! override, the JSON-RPC method classification sets and the environment
//! configuration of the gateway.

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

mod attest;
pub use attest::{AttestRequest, Attestation};

mod bundle;
pub use bundle::TxBundle;

/// Environment configuration of the gateway.
pub mod config;
pub use config::{AttestationMode, AttesterConfig, ConfigError, GatewayConfig};

mod methods;
pub use methods::{MethodClass, INTERCEPTED_METHODS, OPEN_METHODS};

mod overrides;
pub use overrides::{
    is_attestation_not_found, with_firewall_bypass, ATTESTATION_NOT_FOUND,
    FIREWALL_BYPASS_ADDRESS, FIREWALL_BYPASS_CODE,
};

mod sim;
pub use sim::SimulationParams;
