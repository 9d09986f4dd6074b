//! Types for EIP-2930 (access list transactions).
//!
//! Part of this code was adapted from ethers-rs and is distributed under
//! their license:
//! - <https://github.com/gakonst/ethers-rs/blob/cba6f071aedafb766e82e4c2f469ed5e4638337d/LICENSE-APACHE>
//! - <https://github.com/gakonst/ethers-rs/blob/cba6f071aedafb766e82e4c2f469ed5e4638337d/LICENSE-MIT>

use alloy_rlp::{RlpDecodable, RlpDecodableWrapper, RlpEncodable, RlpEncodableWrapper};
use edr_primitives::{Address, Hash};

/// A single access list entry: an address plus the storage slots a
/// transaction pre-declares it will touch.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, RlpEncodable, RlpDecodable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccessListItem {
    /// Account address
    pub address: Address,
    /// Storage keys
    pub storage_keys: Vec<Hash>,
}

/// A full access list, i.e. a list of [`AccessListItem`]s.
#[derive(Debug, Default, Clone, PartialEq, Eq, RlpDecodableWrapper, RlpEncodableWrapper)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccessList(pub Vec<AccessListItem>);

impl From<Vec<AccessListItem>> for AccessList {
    fn from(items: Vec<AccessListItem>) -> Self {
        Self(items)
    }
}

impl From<AccessList> for Vec<AccessListItem> {
    fn from(list: AccessList) -> Self {
        list.0
    }
}
