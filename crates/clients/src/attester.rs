use crate::{
    types::{AttestErrorBody, AttestResponse},
    Attester, AttesterError,
};
use reqwest::StatusCode;
use tracing::{debug, instrument, warn};
use warden_types::{AttestRequest, Attestation};

/// The attestation endpoint, relative to the service base URL.
const ATTEST_TX: &str = "attest-tx";

/// Client of a remote attestation service.
///
/// Posts [`AttestRequest`]s to `{base}/attest-tx` with a bearer token. One
/// attempt per call; the deadline is that of the injected [`reqwest::Client`].
#[derive(Clone)]
pub struct AttesterClient {
    /// The full `/attest-tx` URL.
    url: reqwest::Url,
    /// Bearer token.
    token: String,
    /// The reqwest client used to send requests.
    client: reqwest::Client,
}

impl core::fmt::Debug for AttesterClient {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AttesterClient").field("url", &self.url.as_str()).finish_non_exhaustive()
    }
}

impl AttesterClient {
    /// Create a new client for the service at `base`, using `client` to send
    /// requests.
    pub fn new_with_client(
        base: &reqwest::Url,
        token: impl Into<String>,
        client: reqwest::Client,
    ) -> Result<Self, url::ParseError> {
        // Append the path segment, keeping any path the base already has.
        let url = format!("{}/{ATTEST_TX}", base.as_str().trim_end_matches('/')).parse()?;
        Ok(Self { url, token: token.into(), client })
    }

    /// Create a new client for the service at `base` with a new reqwest
    /// client.
    pub fn new(base: &reqwest::Url, token: impl Into<String>) -> Result<Self, url::ParseError> {
        Self::new_with_client(base, token, reqwest::Client::new())
    }

    /// Get the URL requests are posted to.
    pub const fn url(&self) -> &reqwest::Url {
        &self.url
    }

    /// Get the client used to send requests.
    pub const fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Request an attestation transaction for `request`.
    ///
    /// - `200` with `{tx}`: the attestation.
    /// - `409` with `{code, message}`: [`Attestation::NotRequired`].
    /// - anything else: [`AttesterError::Status`] with the raw body.
    #[instrument(skip_all, fields(from = %request.from, to = %request.to))]
    pub async fn attest_with_tx(
        &self,
        request: &AttestRequest,
    ) -> Result<Attestation, AttesterError> {
        let resp = self
            .client
            .post(self.url.clone())
            .bearer_auth(&self.token)
            .json(request)
            .send()
            .await
            .inspect_err(|e| warn!(%e, "Failed to send attest request"))?;

        match resp.status() {
            StatusCode::OK => {
                let body: AttestResponse = resp
                    .json()
                    .await
                    .map_err(|source| AttesterError::Decode { status: StatusCode::OK, source })?;
                Ok(Attestation::Attested(body.tx))
            }
            StatusCode::CONFLICT => {
                let body: AttestErrorBody = resp.json().await.map_err(|source| {
                    AttesterError::Decode { status: StatusCode::CONFLICT, source }
                })?;
                debug!(code = body.code, message = %body.message, "attestation not required");
                Ok(Attestation::NotRequired)
            }
            status => {
                let body = resp
                    .text()
                    .await
                    .map_err(|source| AttesterError::Decode { status, source })?;
                Err(AttesterError::Status { status, body })
            }
        }
    }
}

impl Attester for AttesterClient {
    type Error = AttesterError;

    async fn attest(&self, request: AttestRequest) -> Result<Attestation, Self::Error> {
        self.attest_with_tx(&request).await
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use alloy::primitives::{bytes, Address, U256};
    use httpmock::prelude::*;
    use serde_json::json;

    fn request() -> AttestRequest {
        AttestRequest::new(
            Address::repeat_byte(0x11),
            Address::repeat_byte(0x22),
            &bytes!("cafe"),
            U256::from(5),
            1,
        )
    }

    fn client(server: &MockServer) -> AttesterClient {
        let base = server.url("/v1").parse().unwrap();
        AttesterClient::new(&base, "tok").unwrap()
    }

    #[test]
    fn url_joins_path() {
        let base = "https://attester.example.com/api/".parse().unwrap();
        let client = AttesterClient::new(&base, "tok").unwrap();
        assert_eq!(client.url().as_str(), "https://attester.example.com/api/attest-tx");
    }

    #[tokio::test]
    async fn attested() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/attest-tx")
                    .header("authorization", "Bearer tok")
                    .json_body(json!({
                        "from": "0x1111111111111111111111111111111111111111",
                        "to": "0x2222222222222222222222222222222222222222",
                        "input": "0xcafe",
                        "value": "0x5",
                        "chainId": 1,
                    }));
                then.status(200).json_body(json!({ "tx": "0xdeadbeef" }));
            })
            .await;

        let outcome = client(&server).attest(request()).await.unwrap();
        assert_eq!(outcome, Attestation::Attested(bytes!("deadbeef")));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn conflict_means_not_required() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/attest-tx");
                then.status(409).json_body(json!({ "code": 409, "message": "not required" }));
            })
            .await;

        let outcome = client(&server).attest(request()).await.unwrap();
        assert!(outcome.is_not_required());
    }

    #[tokio::test]
    async fn conflict_with_garbage_is_a_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/attest-tx");
                then.status(409).body("nope");
            })
            .await;

        let err = client(&server).attest(request()).await.unwrap_err();
        assert!(matches!(err, AttesterError::Decode { status: StatusCode::CONFLICT, .. }));
    }

    #[tokio::test]
    async fn other_status_keeps_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/attest-tx");
                then.status(503).body("overloaded");
            })
            .await;

        let err = client(&server).attest(request()).await.unwrap_err();
        match &err {
            AttesterError::Status { status, body } => {
                assert_eq!(*status, StatusCode::SERVICE_UNAVAILABLE);
                assert_eq!(body, "overloaded");
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(err.to_string(), "attest request failed with code 503: overloaded");
    }

    #[tokio::test]
    async fn unreachable_service() {
        // Nothing listens on port 9 of localhost.
        let base = "http://127.0.0.1:9".parse().unwrap();
        let err = AttesterClient::new(&base, "tok").unwrap().attest(request()).await.unwrap_err();
        assert!(matches!(err, AttesterError::Request(_)));
    }
}
