use alloy::{
    primitives::{address, Address, Bytes},
    rpc::types::state::{AccountOverride, StateOverride},
    transports::TransportError,
};

/// Sentinel account recognized by the on-chain security validator during
/// checkpoint execution. A truthy code at this address makes the validator
/// skip the attestation check.
pub const FIREWALL_BYPASS_ADDRESS: Address = address!("0x0000000000000000000000000000000000f01274");

/// Code installed at [`FIREWALL_BYPASS_ADDRESS`] during simulation.
pub const FIREWALL_BYPASS_CODE: Bytes = Bytes::from_static(&[0x10]);

/// Hex marker present in the revert of a protected call that has no
/// attestation stored for it.
pub const ATTESTATION_NOT_FOUND: &str =
    "120a2e773951f3178d454b2ed5973f0df81a0d0dc37028cedef36e011a64a265";

/// Add the firewall bypass account to a caller-supplied state override.
///
/// Without it, simulating a transaction that executes a checkpoint looks like
/// a revert. Entries for other addresses are left untouched. An existing
/// entry for the sentinel address is replaced.
pub fn with_firewall_bypass(overrides: Option<StateOverride>) -> StateOverride {
    let mut overrides = overrides.unwrap_or_default();
    overrides.insert(
        FIREWALL_BYPASS_ADDRESS,
        AccountOverride { code: Some(FIREWALL_BYPASS_CODE), ..Default::default() },
    );
    overrides
}

/// True if a simulation error carries the "attestation not found" revert.
///
/// Both the error message and the revert data of a JSON-RPC error response
/// are searched.
pub fn is_attestation_not_found(err: &TransportError) -> bool {
    let in_data = err
        .as_error_resp()
        .and_then(|payload| payload.data.as_ref())
        .is_some_and(|data| data.get().to_ascii_lowercase().contains(ATTESTATION_NOT_FOUND));

    in_data || err.to_string().to_ascii_lowercase().contains(ATTESTATION_NOT_FOUND)
}
