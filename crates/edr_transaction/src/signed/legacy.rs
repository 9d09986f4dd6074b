use std::sync::OnceLock;

use alloy_rlp::{BufMut, Encodable};
use edr_primitives::{keccak256, Address, Bytes, Hash as B256, U256};
use edr_signer::{FakeableSignature, SignatureWithRecoveryId};
use revm_primitives::TxKind;

use crate::ExecutableTransaction;

/// A signed legacy transaction, optionally replay-protected per EIP-155.
#[derive(Clone, Debug)]
pub struct Legacy {
    /// Sender's nonce
    pub nonce: u64,
    /// Gas price
    pub gas_price: u128,
    /// Gas limit
    pub gas_limit: u64,
    /// Recipient, or `Create`
    pub kind: TxKind,
    /// Value transferred
    pub value: U256,
    /// Call data / init code
    pub input: Bytes,
    /// EIP-155 chain id, if replay-protected. Folded into the signature's `v`
    /// value on the wire, so it is not encoded as a separate field.
    pub chain_id: Option<u64>,
    /// The transaction's signature.
    pub signature: FakeableSignature<SignatureWithRecoveryId>,
    pub(crate) hash: OnceLock<B256>,
    pub(crate) rlp_encoding: OnceLock<Bytes>,
}

impl Legacy {
    /// The type identifier for a legacy transaction. It has no EIP-2718
    /// envelope byte on the wire; this exists only for dispatch purposes.
    pub const TYPE: u8 = 0;

    fn rlp_payload_length(&self) -> usize {
        self.nonce.length()
            + self.gas_price.length()
            + self.gas_limit.length()
            + self.kind.length()
            + self.value.length()
            + self.input.length()
            + self.signature.length()
    }
}

impl PartialEq for Legacy {
    fn eq(&self, other: &Self) -> bool {
        self.nonce == other.nonce
            && self.gas_price == other.gas_price
            && self.gas_limit == other.gas_limit
            && self.kind == other.kind
            && self.value == other.value
            && self.input == other.input
            && self.chain_id == other.chain_id
            && self.signature == other.signature
    }
}

impl Eq for Legacy {}

impl alloy_rlp::Encodable for Legacy {
    fn encode(&self, out: &mut dyn BufMut) {
        alloy_rlp::Header {
            list: true,
            payload_length: self.rlp_payload_length(),
        }
        .encode(out);

        self.nonce.encode(out);
        self.gas_price.encode(out);
        self.gas_limit.encode(out);
        self.kind.encode(out);
        self.value.encode(out);
        self.input.encode(out);
        self.signature.encode(out);
    }

    fn length(&self) -> usize {
        let payload_length = self.rlp_payload_length();
        alloy_rlp::length_of_length(payload_length) + payload_length
    }
}

impl ExecutableTransaction for Legacy {
    fn caller(&self) -> &Address {
        self.signature.caller()
    }

    fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    fn gas_price(&self) -> &u128 {
        &self.gas_price
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
        self.chain_id
    }

    fn access_list(&self) -> Option<&[edr_eip2930::AccessListItem]> {
        None
    }

    fn effective_gas_price(&self, _block_base_fee: u128) -> Option<u128> {
        None
    }

    fn max_fee_per_gas(&self) -> Option<&u128> {
        None
    }

    fn max_priority_fee_per_gas(&self) -> Option<&u128> {
        None
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
