use alloy::{
    consensus::{constants::GWEI_TO_WEI, SignableTransaction, TxEip1559, TxEnvelope, TxLegacy},
    eips::eip2718::Encodable2718,
    primitives::{Address, Bytes, TxKind, B256, U256},
    signers::{local::PrivateKeySigner, SignerSync},
};

/// Make a wallet with a deterministic keypair.
pub fn make_wallet(i: u8) -> PrivateKeySigner {
    PrivateKeySigner::from_bytes(&B256::repeat_byte(i)).unwrap()
}

/// Sign an EIP-1559 transaction with a wallet.
pub fn sign_tx_with_key_pair(wallet: &PrivateKeySigner, tx: TxEip1559) -> TxEnvelope {
    let signature = wallet.sign_hash_sync(&tx.signature_hash()).unwrap();
    tx.into_signed(signature).into()
}

/// Sign a legacy transaction with a wallet.
pub fn sign_legacy_with_key_pair(wallet: &PrivateKeySigner, tx: TxLegacy) -> TxEnvelope {
    let signature = wallet.sign_hash_sync(&tx.signature_hash()).unwrap();
    tx.into_signed(signature).into()
}

/// The EIP-2718 encoding of a signed transaction, as sent by wallets.
pub fn raw(tx: &TxEnvelope) -> Bytes {
    tx.encoded_2718().into()
}

/// Make a simple send transaction.
pub fn simple_send(to: Address, amount: U256, nonce: u64, chain_id: u64) -> TxEip1559 {
    simple_call(to, Bytes::new(), amount, nonce, chain_id)
}

/// Make a simple contract call.
pub fn simple_call(to: Address, input: Bytes, value: U256, nonce: u64, chain_id: u64) -> TxEip1559 {
    TxEip1559 {
        nonce,
        gas_limit: 100_000,
        to: TxKind::Call(to),
        value,
        input,
        chain_id,
        max_fee_per_gas: GWEI_TO_WEI as u128 * 100,
        max_priority_fee_per_gas: GWEI_TO_WEI as u128,
        ..Default::default()
    }
}

/// Make a contract creation transaction.
pub fn simple_create(code: Bytes, nonce: u64, chain_id: u64) -> TxEip1559 {
    TxEip1559 {
        nonce,
        gas_limit: 1_000_000,
        to: TxKind::Create,
        input: code,
        chain_id,
        max_fee_per_gas: GWEI_TO_WEI as u128 * 100,
        max_priority_fee_per_gas: GWEI_TO_WEI as u128,
        ..Default::default()
    }
}
