use axum::{
    body::Bytes,
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{instrument, warn};

/// Request headers never passed upstream.
///
/// The gateway credential is for the gateway only. The rest are connection
/// specific and are set again by the client. `accept-encoding` is dropped so
/// the upstream answers uncompressed and bodies can be relayed verbatim.
const STRIPPED_HEADERS: &[&str] =
    &["authorization", "host", "content-length", "connection", "transfer-encoding", "accept-encoding"];

/// Response headers never relayed back. Hop-by-hop headers belong to the
/// upstream connection, and CORS headers are set by the gateway itself.
const HOP_HEADERS: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-connection",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
    "content-length",
];

/// Reverse proxy to the upstream node.
///
/// Every request is sent to the configured URL, whatever the inbound path.
#[derive(Debug, Clone)]
pub struct UpstreamProxy {
    url: reqwest::Url,
    client: reqwest::Client,
}

impl UpstreamProxy {
    /// Create a new proxy with the given URL and client.
    pub const fn new_with_client(url: reqwest::Url, client: reqwest::Client) -> Self {
        Self { url, client }
    }

    /// Instantiate a new proxy with the given URL and a new reqwest client.
    pub fn new(url: reqwest::Url) -> Self {
        Self { url, client: reqwest::Client::new() }
    }

    /// The upstream URL.
    pub const fn url(&self) -> &reqwest::Url {
        &self.url
    }

    /// Replay a buffered request upstream and relay the answer.
    ///
    /// The upstream status, end-to-end headers and body are relayed
    /// unchanged. A transport failure is answered with `502 Bad Gateway`.
    #[instrument(skip_all)]
    pub async fn forward(&self, method: Method, headers: &HeaderMap, body: Bytes) -> Response {
        let mut headers = headers.clone();
        for name in STRIPPED_HEADERS {
            headers.remove(*name);
        }

        let resp = match self
            .client
            .request(method, self.url.clone())
            .headers(headers)
            .body(body)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                warn!(%e, "Failed to reach upstream node");
                return StatusCode::BAD_GATEWAY.into_response();
            }
        };

        let status = resp.status();
        let headers = relayed_headers(resp.headers());

        let body = match resp.bytes().await {
            Ok(body) => body,
            Err(e) => {
                warn!(%e, "Failed to read upstream response");
                return StatusCode::BAD_GATEWAY.into_response();
            }
        };

        let mut out = (status, body).into_response();
        // Replaces the body's default content type.
        out.headers_mut().remove(header::CONTENT_TYPE);
        out.headers_mut().extend(headers);
        out.headers_mut()
            .entry(header::CONTENT_TYPE)
            .or_insert_with(|| HeaderValue::from_static("application/json"));
        out
    }
}

/// Upstream response headers to pass back to the caller.
fn relayed_headers(upstream: &HeaderMap) -> HeaderMap {
    let mut headers = upstream.clone();
    for name in HOP_HEADERS {
        headers.remove(*name);
    }
    let cors: Vec<_> = headers
        .keys()
        .filter(|name| name.as_str().starts_with("access-control-"))
        .cloned()
        .collect();
    for name in cors {
        headers.remove(name);
    }
    headers
}
