//! Transaction builders for test transactions.

use edr_primitives::{Address, Bytes, U256};
use edr_signer::SecretKey;
use edr_transaction::{
    request::{Legacy, TransactionRequest},
    signed::TypedTransaction,
    TxKind,
};

/// A minimal legacy transaction request: a plain value transfer to
/// `Address::ZERO`, paying `42` gwei gas, with `nonce` left for the caller to
/// fill in.
pub fn dummy_legacy_request(nonce: u64, chain_id: Option<u64>) -> TransactionRequest {
    TransactionRequest::Legacy(Legacy {
        nonce,
        gas_price: 42_000_000_000u128,
        gas_limit: 30_000,
        kind: TxKind::Call(Address::ZERO),
        value: U256::from(1),
        input: Bytes::default(),
        chain_id,
    })
}

/// Builds and signs a [`dummy_legacy_request`] with `secret_key`.
pub fn signed_dummy_transaction(
    secret_key: &SecretKey,
    nonce: u64,
    chain_id: Option<u64>,
) -> Result<TypedTransaction, edr_signer::SignatureError> {
    dummy_legacy_request(nonce, chain_id).sign(secret_key)
}

/// Builds a [`dummy_legacy_request`], fake-signed for `sender` rather than
/// signed with a real secret key, for impersonation tests.
pub fn impersonated_dummy_transaction(sender: Address, nonce: u64, chain_id: Option<u64>) -> TypedTransaction {
    dummy_legacy_request(nonce, chain_id).fake_sign(sender)
}
