//! Account types shared between the state journal and the trie.

use alloy_rlp::{RlpDecodable, RlpEncodable};
use edr_primitives::{HashMap, Hash, U256};

/// Basic information about an account, without its storage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccountInfo {
    /// Account balance
    pub balance: U256,
    /// Account nonce
    pub nonce: u64,
    /// Hash of the account's bytecode, or [`edr_primitives::KECCAK_EMPTY`] for
    /// an externally-owned account.
    pub code_hash: Hash,
}

/// The RLP-encodable representation of an account, as stored in the state
/// trie: balance, nonce, storage root and code hash, in that field order.
#[derive(Clone, Debug, PartialEq, Eq, RlpEncodable, RlpDecodable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BasicAccount {
    /// Account nonce
    pub nonce: u64,
    /// Account balance
    pub balance: U256,
    /// Root of the account's storage trie
    pub storage_root: Hash,
    /// Hash of the account's bytecode
    pub code_hash: Hash,
}

impl Default for BasicAccount {
    fn default() -> Self {
        Self {
            nonce: 0,
            balance: U256::ZERO,
            storage_root: edr_primitives::KECCAK_NULL_RLP,
            code_hash: edr_primitives::KECCAK_EMPTY,
        }
    }
}

impl From<&AccountInfo> for BasicAccount {
    fn from(info: &AccountInfo) -> Self {
        Self {
            nonce: info.nonce,
            balance: info.balance,
            storage_root: edr_primitives::KECCAK_NULL_RLP,
            code_hash: info.code_hash,
        }
    }
}

/// Per-address storage, keyed by storage slot.
pub type AccountStorage = HashMap<U256, U256>;
