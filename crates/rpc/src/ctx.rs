use crate::Firewall;
use std::sync::Arc;

/// RPC context. Shares one [`Firewall`] between all request handlers.
#[derive(Debug)]
pub struct RpcCtx<N, A, B> {
    inner: Arc<Firewall<N, A, B>>,
}

impl<N, A, B> RpcCtx<N, A, B> {
    /// Create a new `RpcCtx`.
    pub fn new(firewall: Firewall<N, A, B>) -> Self {
        Self { inner: Arc::new(firewall) }
    }

    /// Get a reference to the firewall.
    pub fn firewall(&self) -> &Firewall<N, A, B> {
        &self.inner
    }
}

impl<N, A, B> Clone for RpcCtx<N, A, B> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<N, A, B> core::ops::Deref for RpcCtx<N, A, B> {
    type Target = Firewall<N, A, B>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<N, A, B> From<Firewall<N, A, B>> for RpcCtx<N, A, B> {
    fn from(firewall: Firewall<N, A, B>) -> Self {
        Self::new(firewall)
    }
}
