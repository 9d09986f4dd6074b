use std::sync::OnceLock;

use alloy_rlp::Encodable;
use edr_eip2930::AccessListItem;
use edr_primitives::{keccak256, Address, Bytes, Hash as B256, U256};
use edr_signer::{FakeableSignature, SignatureWithYParity};
use revm_primitives::TxKind;

use crate::ExecutableTransaction;

/// A signed EIP-1559 (dynamic fee) transaction.
#[derive(Clone, Debug)]
pub struct Eip1559 {
    /// EIP-155 chain id
    pub chain_id: u64,
    /// Sender's nonce
    pub nonce: u64,
    /// Maximum priority fee (tip) per gas
    pub max_priority_fee_per_gas: u128,
    /// Maximum total fee per gas, including the base fee
    pub max_fee_per_gas: u128,
    /// Gas limit
    pub gas_limit: u64,
    /// Recipient, or `Create`
    pub kind: TxKind,
    /// Value transferred
    pub value: U256,
    /// Call data / init code
    pub input: Bytes,
    /// Pre-declared storage accesses
    pub access_list: Vec<AccessListItem>,
    /// The transaction's signature.
    pub signature: FakeableSignature<SignatureWithYParity>,
    pub(crate) hash: OnceLock<B256>,
    pub(crate) rlp_encoding: OnceLock<Bytes>,
}

impl Eip1559 {
    /// The EIP-2718 transaction type identifier for an EIP-1559 transaction.
    pub const TYPE: u8 = 2;

    fn rlp_payload_length(&self) -> usize {
        self.chain_id.length()
            + self.nonce.length()
            + self.max_priority_fee_per_gas.length()
            + self.max_fee_per_gas.length()
            + self.gas_limit.length()
            + self.kind.length()
            + self.value.length()
            + self.input.length()
            + self.access_list.length()
            + self.signature.length()
    }
}

impl PartialEq for Eip1559 {
    fn eq(&self, other: &Self) -> bool {
        self.chain_id == other.chain_id
            && self.nonce == other.nonce
            && self.max_priority_fee_per_gas == other.max_priority_fee_per_gas
            && self.max_fee_per_gas == other.max_fee_per_gas
            && self.gas_limit == other.gas_limit
            && self.kind == other.kind
            && self.value == other.value
            && self.input == other.input
            && self.access_list == other.access_list
            && self.signature == other.signature
    }
}

impl Eq for Eip1559 {}

impl alloy_rlp::Encodable for Eip1559 {
    fn encode(&self, out: &mut dyn alloy_rlp::BufMut) {
        use alloy_rlp::BufMut as _;

        out.put_u8(Self::TYPE);

        alloy_rlp::Header {
            list: true,
            payload_length: self.rlp_payload_length(),
        }
        .encode(out);

        self.chain_id.encode(out);
        self.nonce.encode(out);
        self.max_priority_fee_per_gas.encode(out);
        self.max_fee_per_gas.encode(out);
        self.gas_limit.encode(out);
        self.kind.encode(out);
        self.value.encode(out);
        self.input.encode(out);
        self.access_list.encode(out);
        self.signature.encode(out);
    }

    fn length(&self) -> usize {
        let payload_length = self.rlp_payload_length();
        1 + alloy_rlp::length_of_length(payload_length) + payload_length
    }
}

impl ExecutableTransaction for Eip1559 {
    fn caller(&self) -> &Address {
        self.signature.caller()
    }

    fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    fn gas_price(&self) -> &u128 {
        &self.max_fee_per_gas
    }

    fn kind(&self) -> TxKind {
        self.kind
    }

    fn value(&self) -> &U256 {
        &self.value
    }

    fn data(&self) -> &Bytes {
        &self.input
    }

    fn nonce(&self) -> u64 {
        self.nonce
    }

    fn chain_id(&self) -> Option<u64> {
        Some(self.chain_id)
    }

    fn access_list(&self) -> Option<&[AccessListItem]> {
        Some(&self.access_list)
    }

    fn effective_gas_price(&self, block_base_fee: u128) -> Option<u128> {
        Some(
            self.max_priority_fee_per_gas
                .min(self.max_fee_per_gas.saturating_sub(block_base_fee))
                .saturating_add(block_base_fee),
        )
    }

    fn max_fee_per_gas(&self) -> Option<&u128> {
        Some(&self.max_fee_per_gas)
    }

    fn max_priority_fee_per_gas(&self) -> Option<&u128> {
        Some(&self.max_priority_fee_per_gas)
    }

    fn rlp_encoding(&self) -> &Bytes {
        self.rlp_encoding.get_or_init(|| {
            let mut out = Vec::with_capacity(self.length());
            self.encode(&mut out);
            Bytes::from(out)
        })
    }

    fn transaction_hash(&self) -> &B256 {
        self.hash.get_or_init(|| keccak256(self.rlp_encoding()))
    }
}
