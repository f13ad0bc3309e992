use reqwest::StatusCode;

/// Errors returned by the [`AttesterClient`].
///
/// [`AttesterClient`]: crate::AttesterClient
#[derive(thiserror::Error, Debug)]
pub enum AttesterError {
    /// The request could not be built or sent, or the connection failed.
    #[error("attest request failed: {0}")]
    Request(#[source] reqwest::Error),
    /// The response body could not be read or decoded.
    #[error("failed to decode {status} body from attest response: {source}")]
    Decode {
        /// Status of the undecodable response.
        status: StatusCode,
        /// Underlying error.
        #[source]
        source: reqwest::Error,
    },
    /// The service answered with an unexpected status.
    #[error("attest request failed with code {}: {body}", status.as_u16())]
    Status {
        /// Response status.
        status: StatusCode,
        /// Raw response body.
        body: String,
    },
}

impl From<reqwest::Error> for AttesterError {
    fn from(err: reqwest::Error) -> Self {
        Self::Request(err)
    }
}
