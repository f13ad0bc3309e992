use alloy::{
    eips::BlockId,
    rpc::types::{state::StateOverride, BlockOverrides, TransactionRequest},
};

/// Parameters of a simulation-class call (`eth_call`, `eth_estimateGas`)
/// issued to the upstream node.
#[derive(Debug, Clone, Default)]
pub struct SimulationParams {
    /// The transaction to simulate.
    pub request: TransactionRequest,
    /// Block to simulate against.
    pub block: BlockId,
    /// State override applied during the simulation.
    pub overrides: StateOverride,
    /// Optional block header overrides.
    pub block_overrides: Option<Box<BlockOverrides>>,
}

impl SimulationParams {
    /// Simulate `request` against the latest block with `overrides`.
    pub fn latest(request: TransactionRequest, overrides: StateOverride) -> Self {
        Self { request, block: BlockId::latest(), overrides, block_overrides: None }
    }
}
