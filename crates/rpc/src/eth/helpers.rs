use crate::FirewallError;
use ajj::ErrorPayload;
use alloy::transports::{RpcError, TransportError};
use serde_json::value::RawValue;

/// Error data of intercepted methods. Upstream error data is relayed as-is.
pub type RpcErrorData = Box<RawValue>;

/// JSON-RPC code for rejected transaction input.
const INVALID_PARAMS: i64 = -32602;

/// Convert an upstream error into the payload returned to the caller.
///
/// JSON-RPC errors returned by the node keep their code, message and data,
/// so reverts surface exactly as the node reported them.
pub fn relay_error(err: TransportError) -> ErrorPayload<RpcErrorData> {
    match err {
        RpcError::ErrorResp(payload) => {
            ErrorPayload { code: payload.code, message: payload.message, data: payload.data }
        }
        other => ErrorPayload::internal_error_message(other.to_string().into()),
    }
}

/// Convert a firewall error into the payload returned to the caller.
pub fn firewall_error(err: FirewallError) -> ErrorPayload<RpcErrorData> {
    if err.is_client_error() {
        return ErrorPayload { code: INVALID_PARAMS, message: err.to_string().into(), data: None };
    }
    match err {
        FirewallError::Node(err) => relay_error(err),
        other => ErrorPayload::internal_error_message(other.to_string().into()),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use alloy::transports::TransportErrorKind;

    const INTERNAL_ERROR: i64 = -32603;

    #[test]
    fn upstream_payload_is_kept() {
        let data = RawValue::from_string("\"0xdead\"".to_string()).unwrap();
        let err = TransportError::ErrorResp(alloy::rpc::json_rpc::ErrorPayload {
            code: 3,
            message: "execution reverted".into(),
            data: Some(data),
        });

        let payload = relay_error(err);
        assert_eq!(payload.code, 3);
        assert_eq!(payload.message, "execution reverted");
        assert_eq!(payload.data.unwrap().get(), "\"0xdead\"");
    }

    #[test]
    fn relayed_payload_serializes_upstream_data() {
        let data = RawValue::from_string("\"0x08c379a0\"".to_string()).unwrap();
        let err = TransportError::ErrorResp(alloy::rpc::json_rpc::ErrorPayload {
            code: -32000,
            message: "execution reverted: nope".into(),
            data: Some(data),
        });

        let json = serde_json::to_value(relay_error(err)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "code": -32000,
                "message": "execution reverted: nope",
                "data": "0x08c379a0",
            })
        );
    }

    #[test]
    fn transport_failure_is_internal() {
        let payload = relay_error(TransportErrorKind::custom_str("connection refused"));
        assert_eq!(payload.code, INTERNAL_ERROR);
        assert!(payload.message.contains("connection refused"));
        assert!(payload.data.is_none());
    }

    #[test]
    fn client_errors_are_invalid_params() {
        let payload = firewall_error(FirewallError::ChainId { expected: 1, got: 5 });
        assert_eq!(payload.code, INVALID_PARAMS);
        assert_eq!(payload.message, "invalid chain id: expected 1, got 5");
    }

    #[test]
    fn attestation_failure_is_internal() {
        let payload =
            firewall_error(FirewallError::Attestation("attester unavailable".into()));
        assert_eq!(payload.code, INTERNAL_ERROR);
        assert_eq!(payload.message, "attestation fails: attester unavailable");
    }
}
