use crate::MockError;
use std::sync::{Arc, Mutex};
use warden_clients::Bundler;
use warden_types::TxBundle;

/// A bundler recording the bundles it is given. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockBundler {
    error: Option<MockError>,
    bundles: Arc<Mutex<Vec<TxBundle>>>,
}

impl MockBundler {
    /// A bundler accepting every bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// A bundler rejecting every bundle, after recording it.
    pub fn failing(message: &str) -> Self {
        Self { error: Some(MockError(message.to_string())), ..Default::default() }
    }

    /// Bundles received so far.
    pub fn bundles(&self) -> Vec<TxBundle> {
        self.bundles.lock().unwrap().clone()
    }
}

impl Bundler for MockBundler {
    type Error = MockError;

    async fn send_bundle(&self, bundle: TxBundle) -> Result<(), Self::Error> {
        self.bundles.lock().unwrap().push(bundle);
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}
