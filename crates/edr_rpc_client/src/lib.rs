#![warn(missing_docs)]

//! Interface to the fork collaborator: pinned-block reads against a remote
//! Ethereum node. This crate defines the trait only; the HTTP transport that
//! implements it lives outside this core.

use edr_primitives::{Address, Bytecode, Hash, U256};

/// Error produced by a [`ForkCollaborator`] implementation.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ForkError(#[from] Box<dyn std::error::Error + Send + Sync>);

/// Pinned-block reads against a remote Ethereum node, used to back a forked
/// state store. No HTTP transport is implemented here; a production binary
/// supplies a concrete implementation.
#[auto_impl::auto_impl(&, Box, Arc)]
pub trait ForkCollaborator {
    /// The id of the network being forked from.
    fn network_id(&self) -> Result<u64, ForkError>;

    /// The balance of `address` as of `block_number`.
    fn balance(&self, address: Address, block_number: u64) -> Result<U256, ForkError>;

    /// The deployed code at `address` as of `block_number`.
    fn code(&self, address: Address, block_number: u64) -> Result<Bytecode, ForkError>;

    /// The value of the storage slot `index` of `address` as of
    /// `block_number`.
    fn storage_at(&self, address: Address, index: U256, block_number: u64)
        -> Result<U256, ForkError>;

    /// The transaction count (i.e. nonce) of `address` as of `block_number`.
    fn transaction_count(&self, address: Address, block_number: u64) -> Result<u64, ForkError>;

    /// The hash of the block at `block_number`.
    fn block_hash(&self, block_number: u64) -> Result<Hash, ForkError>;
}
