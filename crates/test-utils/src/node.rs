use alloy::{
    primitives::{keccak256, Address, Bytes, B256, U64},
    rpc::json_rpc::ErrorPayload,
    transports::{TransportError, TransportErrorKind, TransportResult},
};
use serde_json::value::RawValue;
use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex},
};
use warden_clients::NodeClient;
use warden_types::{SimulationParams, ATTESTATION_NOT_FOUND};

/// What a receipt lookup returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptScript {
    /// No receipt yet.
    Missing,
    /// The lookup fails.
    Error,
    /// A receipt with the given execution status.
    Status(bool),
}

/// Recorded calls and scripted answers of a [`MockNode`].
#[derive(Debug)]
pub struct MockNodeState {
    /// Answer to `eth_chainId`.
    pub chain_id: u64,
    /// Answer to `eth_gasPrice`.
    pub gas_price: u128,
    /// Number of upcoming `eth_gasPrice` reads that fail.
    pub gas_price_failures: usize,
    /// Answer to `eth_estimateGas`.
    pub estimate: U64,
    /// Answer to `eth_call`.
    pub call_output: Bytes,
    /// When set, `eth_call` and `eth_estimateGas` fail with this payload.
    pub call_error: Option<ErrorPayload>,
    /// When set, every submission fails with this message.
    pub send_error: Option<String>,
    /// Remote nonces. Unknown accounts are at nonce 0.
    pub nonces: HashMap<Address, u64>,
    /// Answers to receipt lookups, in order. Once drained, every lookup
    /// answers `default_receipt`.
    pub receipts: VecDeque<ReceiptScript>,
    /// Receipt answer once `receipts` is drained.
    pub default_receipt: ReceiptScript,

    /// Submitted transactions.
    pub sent: Vec<Bytes>,
    /// Received `eth_call` parameters.
    pub calls: Vec<SimulationParams>,
    /// Received `eth_estimateGas` parameters.
    pub estimates: Vec<SimulationParams>,
    /// Number of receipt lookups.
    pub receipt_polls: usize,
    /// Number of nonce reads.
    pub nonce_reads: usize,
}

impl MockNodeState {
    fn new(chain_id: u64) -> Self {
        Self {
            chain_id,
            gas_price: 1_000_000_000,
            gas_price_failures: 0,
            estimate: U64::from(21_000),
            call_output: Bytes::new(),
            call_error: None,
            send_error: None,
            nonces: HashMap::new(),
            receipts: VecDeque::new(),
            default_receipt: ReceiptScript::Status(true),
            sent: Vec::new(),
            calls: Vec::new(),
            estimates: Vec::new(),
            receipt_polls: 0,
            nonce_reads: 0,
        }
    }
}

/// An in-memory upstream node. Clones share state.
///
/// Submitted transactions are recorded and hashed with `keccak256`, which is
/// the transaction hash for EIP-2718 encoded input.
#[derive(Debug, Clone)]
pub struct MockNode {
    state: Arc<Mutex<MockNodeState>>,
}

impl MockNode {
    /// A node for `chain_id` on which every call succeeds.
    pub fn new(chain_id: u64) -> Self {
        Self { state: Arc::new(Mutex::new(MockNodeState::new(chain_id))) }
    }

    /// Inspect or script the node.
    pub fn with_state<T>(&self, f: impl FnOnce(&mut MockNodeState) -> T) -> T {
        f(&mut self.state.lock().unwrap())
    }

    /// Make simulations revert with `data`.
    pub fn revert_calls_with(&self, data: &str) -> &Self {
        let data = RawValue::from_string(format!("\"{data}\"")).unwrap();
        self.with_state(|s| {
            s.call_error = Some(ErrorPayload {
                code: 3,
                message: "execution reverted".into(),
                data: Some(data),
            })
        });
        self
    }

    /// Make simulations revert with the "attestation not found" marker.
    pub fn revert_calls_attestation_not_found(&self) -> &Self {
        self.revert_calls_with(&format!("0x{ATTESTATION_NOT_FOUND}"))
    }

    /// Make every submission fail.
    pub fn fail_sends(&self, message: &str) -> &Self {
        self.with_state(|s| s.send_error = Some(message.to_string()));
        self
    }

    /// Make the next `count` gas price reads fail.
    pub fn fail_gas_price_reads(&self, count: usize) -> &Self {
        self.with_state(|s| s.gas_price_failures = count);
        self
    }

    /// Set the remote nonce of `account`.
    pub fn set_nonce(&self, account: Address, nonce: u64) -> &Self {
        self.with_state(|s| s.nonces.insert(account, nonce));
        self
    }

    /// Queue receipt lookup answers.
    pub fn push_receipts(&self, receipts: impl IntoIterator<Item = ReceiptScript>) -> &Self {
        self.with_state(|s| s.receipts.extend(receipts));
        self
    }

    /// Answer for receipt lookups once the queue is drained.
    pub fn set_default_receipt(&self, receipt: ReceiptScript) -> &Self {
        self.with_state(|s| s.default_receipt = receipt);
        self
    }

    /// Transactions submitted so far, in order.
    pub fn sent(&self) -> Vec<Bytes> {
        self.with_state(|s| s.sent.clone())
    }

    /// `eth_call` parameters received so far.
    pub fn calls(&self) -> Vec<SimulationParams> {
        self.with_state(|s| s.calls.clone())
    }

    /// `eth_estimateGas` parameters received so far.
    pub fn estimates(&self) -> Vec<SimulationParams> {
        self.with_state(|s| s.estimates.clone())
    }

    /// Number of receipt lookups so far.
    pub fn receipt_polls(&self) -> usize {
        self.with_state(|s| s.receipt_polls)
    }

    fn simulation_error(&self) -> Option<TransportError> {
        self.with_state(|s| s.call_error.clone()).map(TransportError::ErrorResp)
    }
}

impl NodeClient for MockNode {
    async fn chain_id(&self) -> TransportResult<u64> {
        Ok(self.with_state(|s| s.chain_id))
    }

    async fn send_raw_transaction(&self, tx: Bytes) -> TransportResult<B256> {
        self.with_state(|s| match &s.send_error {
            Some(message) => Err(TransportErrorKind::custom_str(message)),
            None => {
                let hash = keccak256(&tx);
                s.sent.push(tx);
                Ok(hash)
            }
        })
    }

    async fn receipt_status(&self, _hash: B256) -> TransportResult<Option<bool>> {
        let script = self.with_state(|s| {
            s.receipt_polls += 1;
            s.receipts.pop_front().unwrap_or(s.default_receipt)
        });
        match script {
            ReceiptScript::Missing => Ok(None),
            ReceiptScript::Error => Err(TransportErrorKind::custom_str("receipt lookup failed")),
            ReceiptScript::Status(status) => Ok(Some(status)),
        }
    }

    async fn transaction_count(&self, account: Address) -> TransportResult<u64> {
        Ok(self.with_state(|s| {
            s.nonce_reads += 1;
            s.nonces.get(&account).copied().unwrap_or_default()
        }))
    }

    async fn gas_price(&self) -> TransportResult<u128> {
        self.with_state(|s| {
            if s.gas_price_failures > 0 {
                s.gas_price_failures -= 1;
                return Err(TransportErrorKind::custom_str("gas price unavailable"));
            }
            Ok(s.gas_price)
        })
    }

    async fn call(&self, params: SimulationParams) -> TransportResult<Bytes> {
        self.with_state(|s| s.calls.push(params));
        match self.simulation_error() {
            Some(err) => Err(err),
            None => Ok(self.with_state(|s| s.call_output.clone())),
        }
    }

    async fn estimate_gas(&self, params: SimulationParams) -> TransportResult<U64> {
        self.with_state(|s| s.estimates.push(params));
        match self.simulation_error() {
            Some(err) => Err(err),
            None => Ok(self.with_state(|s| s.estimate)),
        }
    }
}
