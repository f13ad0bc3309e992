use crate::MockError;
use alloy::primitives::Bytes;
use std::sync::{Arc, Mutex};
use warden_clients::Attester;
use warden_types::{AttestRequest, Attestation};

/// An attester answering every request the same way, and recording the
/// requests it saw. Clones share state.
#[derive(Debug, Clone)]
pub struct MockAttester {
    answer: Result<Attestation, MockError>,
    requests: Arc<Mutex<Vec<AttestRequest>>>,
}

impl MockAttester {
    fn answering(answer: Result<Attestation, MockError>) -> Self {
        Self { answer, requests: Default::default() }
    }

    /// Attest every request with `tx`.
    pub fn attesting(tx: Bytes) -> Self {
        Self::answering(Ok(Attestation::Attested(tx)))
    }

    /// Decline every request.
    pub fn not_required() -> Self {
        Self::answering(Ok(Attestation::NotRequired))
    }

    /// Fail every request.
    pub fn failing(message: &str) -> Self {
        Self::answering(Err(MockError(message.to_string())))
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<AttestRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Attester for MockAttester {
    type Error = MockError;

    async fn attest(&self, request: AttestRequest) -> Result<Attestation, Self::Error> {
        self.requests.lock().unwrap().push(request);
        self.answer.clone()
    }
}
