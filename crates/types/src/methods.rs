/// Methods served by the local firewall handlers. Never proxied.
pub const INTERCEPTED_METHODS: &[&str] =
    &["eth_sendRawTransaction", "eth_call", "eth_estimateGas"];

/// Read-only node queries proxied to the upstream node for every caller.
pub const OPEN_METHODS: &[&str] = &[
    "net_version",
    "eth_chainId",
    "eth_getBalance",
    "eth_getTransactionCount",
    "eth_getBlockByNumber",
    "eth_getBlockByHash",
    "eth_blockNumber",
    "eth_getCode",
    "eth_gasPrice",
    "eth_getTransactionReceipt",
    "eth_feeHistory",
    "eth_maxPriorityFeePerGas",
];

/// Routing class of a JSON-RPC method name.
///
/// Precedence is intercepted, then open, then credentialed. Any method outside
/// the first two sets is credential-gated: it is proxied only for callers
/// presenting the gateway API key, and rejected otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodClass {
    /// Handled by the firewall service.
    Intercepted,
    /// Proxied for everyone.
    Open,
    /// Proxied only with a valid gateway credential.
    Credentialed,
}

impl MethodClass {
    /// Classify a method name.
    pub fn of(method: &str) -> Self {
        if INTERCEPTED_METHODS.contains(&method) {
            Self::Intercepted
        } else if OPEN_METHODS.contains(&method) {
            Self::Open
        } else {
            Self::Credentialed
        }
    }

    /// True if the method is handled locally.
    pub const fn is_intercepted(self) -> bool {
        matches!(self, Self::Intercepted)
    }
}
