use core::time::Duration;

/// Deadline applied to every outbound HTTP request.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the HTTP client shared by every outbound client and the reverse
/// proxy.
///
/// HTTP/2 is disabled: pooled HTTP/2 connections that failed are not reliably
/// closed and get reused.
pub fn http_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder().http1_only().timeout(HTTP_TIMEOUT).build()
}
