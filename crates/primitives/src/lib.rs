//! Primitive type aliases shared by every crate in the workspace.
//!
//! Re-exports the subset of `alloy-primitives`/`revm-primitives` types this
//! core actually needs, so the rest of the workspace depends on one place
//! for them instead of picking its own aliases per crate.

pub use revm_bytecode::Bytecode;
pub use revm_primitives::{
    alloy_primitives::Bloom, keccak256, Address, HashMap, HashSet, B256 as Hash, Bytes, U256,
    KECCAK_EMPTY,
};

/// Root hash of an empty RLP list (`keccak256(rlp::encode(&[]))`), i.e. the
/// state/storage root of an account with no storage and the receipts root of
/// a block with no transactions.
pub const KECCAK_NULL_RLP: Hash = Hash::new([
    0x56, 0xe8, 0x1f, 0x17, 0x1b, 0xcc, 0x55, 0xa6, 0xff, 0x83, 0x45, 0xe6, 0x92, 0xc0, 0xf8, 0x6e,
    0x5b, 0x48, 0xe0, 0x1b, 0x99, 0x6c, 0xad, 0xc0, 0x01, 0x62, 0x2f, 0xb5, 0xe3, 0x63, 0xb4, 0x21,
]);

/// A 256-bit value used as a storage key.
pub type StorageKey = U256;

/// A 256-bit value used as a storage value.
pub type StorageValue = U256;
