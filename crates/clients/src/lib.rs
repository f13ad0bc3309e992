//! Outbound clients of the warden gateway.
//!
//! The gateway talks to three remote systems: the upstream node, the
//! attestation service and (optionally) a block builder. Each is reached
//! through a narrow trait defined here, so that the firewall can be driven by
//! any implementation, including in-memory mocks:
//!
//! - [`NodeClient`]: transaction submission, receipts, nonces and
//!   simulation. Implemented by [`NodeRpc`] and by the nonce-sequencing
//!   wrapper [`NonceManager`].
//! - [`Attester`]: obtains an attestation transaction. Implemented by the
//!   remote [`AttesterClient`] and the key-holding [`LocalAttester`].
//! - [`Bundler`]: delivers an `[attestation, user]` pair. Implemented by the
//!   atomic [`BuilderClient`] and the best-effort [`SequentialSender`].
//!
//! [`AnyAttester`] and [`AnyBundler`] hold whichever strategy was chosen at
//! startup.

#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    clippy::missing_const_for_fn,
    rustdoc::all
)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod any;
pub use any::{AnyAttester, AnyAttesterError, AnyBundler, AnyBundlerError};

mod attester;
pub use attester::AttesterClient;

mod builder;
pub use builder::BuilderClient;

mod error;
pub use error::AttesterError;

mod http;
pub use http::{http_client, HTTP_TIMEOUT};

mod local;
pub use local::{LocalAttester, LocalAttesterError};

mod node;
pub use node::NodeRpc;

mod nonce;
pub use nonce::NonceManager;

mod sender;
pub use sender::{SequentialSendError, SequentialSender};

mod traits;
pub use traits::{Attester, Bundler, NodeClient};

/// Wire types of the attestation and builder services.
pub mod types;
