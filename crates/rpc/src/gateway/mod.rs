mod proxy;
pub use proxy::UpstreamProxy;

use crate::{router, RpcCtx};
use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, HeaderMap, HeaderValue, Method, Request, Uri},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tower::ServiceExt;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::debug;
use warden_clients::{Attester, Bundler, NodeClient};
use warden_types::MethodClass;

/// Returned when the method of a request cannot be read.
pub const PARSE_ERROR: &str =
    r#"{"jsonrpc":"2.0","id":null,"error":{"code":-32600,"message":"failed to parse json-rpc method"}}"#;

/// Returned for methods the caller may not use.
pub const METHOD_NOT_AVAILABLE: &str =
    r#"{"jsonrpc":"2.0","id":null,"error":{"code":-32601,"message":"method not available"}}"#;

/// Only the method of an inbound request is read before dispatch.
#[derive(Deserialize)]
struct MethodOnly {
    #[serde(default)]
    method: Option<String>,
}

/// Read the method name of a JSON-RPC request body. `None` for malformed
/// bodies and missing or empty methods.
pub fn method_name(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<MethodOnly>(body)
        .ok()
        .and_then(|req| req.method)
        .filter(|method| !method.is_empty())
}

/// Where a request goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The local firewall handlers.
    Local,
    /// The upstream node.
    Upstream,
    /// Nowhere, answered with [`METHOD_NOT_AVAILABLE`].
    Reject,
}

/// The request router in front of the firewall.
///
/// Intercepted methods are served by the `ajj` router, open methods are
/// proxied for everyone, any other method is proxied only for callers
/// presenting the gateway API key.
#[derive(Debug)]
pub struct Gateway {
    rpc: axum::Router,
    proxy: UpstreamProxy,
    auth: Option<String>,
}

impl Gateway {
    /// Create a gateway serving the firewall in `ctx`.
    ///
    /// Without an `api_key`, credential-gated methods are always rejected.
    pub fn new<N, A, B>(ctx: RpcCtx<N, A, B>, proxy: UpstreamProxy, api_key: Option<String>) -> Self
    where
        N: NodeClient + Send + Sync + 'static,
        A: Attester + Send + Sync + 'static,
        B: Bundler + Send + Sync + 'static,
    {
        let rpc = router::<N, A, B>().with_state::<()>(ctx).into_axum("/");
        let auth = api_key.filter(|key| !key.is_empty()).map(|key| format!("Bearer {key}"));
        Self { rpc, proxy, auth }
    }

    /// Decide where a request for `method` goes.
    pub fn route(&self, method: &str, headers: &HeaderMap) -> Route {
        match MethodClass::of(method) {
            MethodClass::Intercepted => Route::Local,
            MethodClass::Open => Route::Upstream,
            MethodClass::Credentialed if self.is_authorized(headers) => Route::Upstream,
            MethodClass::Credentialed => Route::Reject,
        }
    }

    fn is_authorized(&self, headers: &HeaderMap) -> bool {
        let Some(expected) = self.auth.as_deref() else { return false };
        headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) == Some(expected)
    }

    /// Handle one buffered HTTP request.
    pub async fn handle(&self, method: Method, headers: HeaderMap, body: Bytes) -> Response {
        let Some(rpc_method) = method_name(&body) else {
            debug!("failed to parse json-rpc method");
            return json_response(PARSE_ERROR);
        };

        match self.route(&rpc_method, &headers) {
            Route::Local => {
                debug!(method = %rpc_method, "received request for intercepted method");
                self.serve_local(body).await
            }
            Route::Upstream => {
                debug!(method = %rpc_method, "received request for proxied method");
                self.proxy.forward(method, &headers, body).await
            }
            Route::Reject => {
                debug!(method = %rpc_method, "rejected request for unavailable method");
                json_response(METHOD_NOT_AVAILABLE)
            }
        }
    }

    async fn serve_local(&self, body: Bytes) -> Response {
        let mut req = Request::new(Body::from(body));
        *req.method_mut() = Method::POST;
        *req.uri_mut() = Uri::from_static("/");
        req.headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));

        match self.rpc.clone().oneshot(req).await {
            Ok(resp) => resp,
            Err(never) => match never {},
        }
    }

    /// Turn the gateway into an axum router answering on every path, with
    /// the CORS policy applied.
    pub fn into_router(self) -> axum::Router {
        axum::Router::new().fallback(dispatch).with_state(Arc::new(self)).layer(cors_layer())
    }
}

async fn dispatch(
    State(gateway): State<Arc<Gateway>>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    gateway.handle(method, headers, body).await
}

fn json_response(body: &'static str) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

/// CORS policy of the gateway. The request origin is mirrored, so that
/// credentialed browser requests are accepted.
pub fn cors_layer() -> CorsLayer {
    let headers = [
        header::ACCEPT,
        header::ACCEPT_LANGUAGE,
        header::CONTENT_TYPE,
        header::CONTENT_LANGUAGE,
        header::ORIGIN,
        header::AUTHORIZATION,
    ];
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(headers.clone())
        .expose_headers(headers)
        .allow_credentials(true)
}
