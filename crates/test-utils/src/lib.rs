//! In-memory stand-ins for the warden capabilities, and helpers to build
//! signed transactions.

pub mod attester;
pub mod bundler;
pub mod node;
pub mod specs;

/// Chain id used throughout the tests.
pub const TEST_CHAIN_ID: u64 = 17;

/// Error returned by the mock attester and bundler.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct MockError(pub String);
