use alloy::primitives::Bytes;

/// An ordered set of raw transactions to be included together.
///
/// The firewall only ever builds the pair `[attestation, user]`; the
/// attestation must land before, or atomically with, the user transaction.
/// Submitters that can only handle that pair reject any other size.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxBundle {
    txs: Vec<Bytes>,
}

impl TxBundle {
    /// Create a bundle from an ordered list of raw transactions.
    pub const fn new(txs: Vec<Bytes>) -> Self {
        Self { txs }
    }

    /// Pair an attestation with the transaction it attests.
    pub fn attested(attestation: Bytes, user: Bytes) -> Self {
        Self { txs: vec![attestation, user] }
    }

    /// The transactions, in inclusion order.
    pub fn txs(&self) -> &[Bytes] {
        &self.txs
    }

    /// Consume the bundle, returning the transactions in inclusion order.
    pub fn into_txs(self) -> Vec<Bytes> {
        self.txs
    }

    /// Number of transactions in the bundle.
    pub fn len(&self) -> usize {
        self.txs.len()
    }

    /// True if the bundle holds no transactions.
    pub fn is_empty(&self) -> bool {
        self.txs.is_empty()
    }
}

impl From<Vec<Bytes>> for TxBundle {
    fn from(txs: Vec<Bytes>) -> Self {
        Self::new(txs)
    }
}
