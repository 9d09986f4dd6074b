#![warn(missing_docs)]
// Part of this code was inspired by foundry. For the original context see:
// https://github.com/foundry-rs/foundry/blob/01b16238ff87dc7ca8ee3f5f13e389888c2a2ee4/anvil/core/src/eth/transaction/mod.rs

//! Ethereum transaction types: legacy, EIP-2930 and EIP-1559.
//!
//! EIP-4844 (blob) and EIP-7702 (authorization list) transactions are out of
//! scope: this core targets a plain L1 chain, and the original distilled
//! spec's data model names only legacy/2930/1559.

/// Types for unsigned transaction requests.
pub mod request;
/// Types for signed transactions.
pub mod signed;

use edr_eip2930::AccessListItem;
pub use edr_primitives::{Address, Bytes, Hash as B256, U256};
pub use revm_primitives::TxKind;

pub use self::signed::TypedTransaction;

/// Trait implemented by every signed transaction variant, giving the VM
/// adapter a single way to read whichever fields it needs regardless of
/// transaction type.
pub trait ExecutableTransaction {
    /// Caller/sender address, recovered from the signature.
    fn caller(&self) -> &Address;
    /// Gas limit.
    fn gas_limit(&self) -> u64;
    /// Gas price (legacy/2930) or max fee per gas (1559), in wei.
    fn gas_price(&self) -> &u128;
    /// Recipient, or `Create` for contract creation.
    fn kind(&self) -> TxKind;
    /// Value transferred, in wei.
    fn value(&self) -> &U256;
    /// Call data / init code.
    fn data(&self) -> &Bytes;
    /// Sender's nonce at the time this transaction was built.
    fn nonce(&self) -> u64;
    /// EIP-155 chain id, if the transaction is replay-protected.
    fn chain_id(&self) -> Option<u64>;
    /// EIP-2930 access list, if any.
    fn access_list(&self) -> Option<&[AccessListItem]>;
    /// The gas price actually paid given a block's base fee (EIP-1559-aware).
    fn effective_gas_price(&self, block_base_fee: u128) -> Option<u128>;
    /// EIP-1559 max fee per gas.
    fn max_fee_per_gas(&self) -> Option<&u128>;
    /// EIP-1559 max priority fee per gas.
    fn max_priority_fee_per_gas(&self) -> Option<&u128>;
    /// The transaction's RLP encoding, memoized.
    fn rlp_encoding(&self) -> &Bytes;
    /// The transaction's hash, memoized.
    fn transaction_hash(&self) -> &B256;
}

/// The maximum amount of wei a transaction could spend on gas, ignoring the
/// value transferred.
pub fn max_cost(transaction: &impl ExecutableTransaction) -> u128 {
    u128::from(transaction.gas_limit()).saturating_mul(*transaction.gas_price())
}

/// The maximum total amount of wei a transaction could debit from its
/// sender's balance: gas cost plus value transferred.
pub fn upfront_cost(transaction: &impl ExecutableTransaction) -> U256 {
    U256::from(max_cost(transaction)).saturating_add(*transaction.value())
}
