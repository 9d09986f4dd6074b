#![warn(missing_docs)]

//! The interface the VM adapter consumes from the blockchain collaborator.
//!
//! Blockchain storage, block assembly and persistence are all out of scope
//! for this crate; it defines the one read the BLOCKHASH opcode needs.

use edr_primitives::Hash;

/// Resolves a block number to its hash, for the `BLOCKHASH` opcode.
#[auto_impl::auto_impl(&, Box, Arc)]
pub trait BlockHashByNumber {
    /// The error type returned on a lookup failure (e.g. an unknown block
    /// number).
    type Error;

    /// Returns the hash of the block at `block_number`.
    fn block_hash_by_number(&self, block_number: u64) -> Result<Hash, Self::Error>;
}
