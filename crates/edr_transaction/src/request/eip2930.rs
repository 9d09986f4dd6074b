use std::sync::OnceLock;

use alloy_rlp::Encodable;
use edr_eip2930::AccessListItem;
use edr_primitives::{keccak256, Address, Bytes, Hash as B256, U256};
use edr_signer::{FakeableSignature, SignatureError, SignatureWithRecoveryId, SignatureWithYParity};
use revm_primitives::TxKind;

use crate::signed;

/// An unsigned EIP-2930 (access list) transaction request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Eip2930 {
    /// EIP-155 chain id
    pub chain_id: u64,
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
    /// Pre-declared storage accesses
    pub access_list: Vec<AccessListItem>,
}

impl Eip2930 {
    /// The EIP-2718 transaction type identifier for an EIP-2930 transaction.
    pub const TYPE: u8 = 1;

    /// The signing hash: `keccak256(0x01 || rlp([chain_id, nonce, gas_price,
    /// gas_limit, kind, value, input, access_list]))`.
    pub fn hash(&self) -> B256 {
        let mut out = vec![Self::TYPE];
        let payload_length = self.chain_id.length()
            + self.nonce.length()
            + self.gas_price.length()
            + self.gas_limit.length()
            + self.kind.length()
            + self.value.length()
            + self.input.length()
            + self.access_list.len_as_rlp();

        alloy_rlp::Header {
            list: true,
            payload_length,
        }
        .encode(&mut out);

        self.chain_id.encode(&mut out);
        self.nonce.encode(&mut out);
        self.gas_price.encode(&mut out);
        self.gas_limit.encode(&mut out);
        self.kind.encode(&mut out);
        self.value.encode(&mut out);
        self.input.encode(&mut out);
        self.access_list.encode(&mut out);

        keccak256(&out)
    }

    /// Signs the request, producing a [`signed::Eip2930`].
    pub fn sign(
        self,
        secret_key: &edr_signer::SecretKey,
    ) -> Result<signed::Eip2930, SignatureError> {
        let hash = self.hash();
        let ecdsa = SignatureWithRecoveryId::new(hash, secret_key)?;
        let signature = SignatureWithYParity::from(ecdsa);
        let signature = FakeableSignature::recover(signature, hash.into())?;

        Ok(signed::Eip2930 {
            chain_id: self.chain_id,
            nonce: self.nonce,
            gas_price: self.gas_price,
            gas_limit: self.gas_limit,
            kind: self.kind,
            value: self.value,
            input: self.input,
            access_list: self.access_list,
            signature,
            hash: OnceLock::new(),
            rlp_encoding: OnceLock::new(),
        })
    }

    /// Fake-signs the request for the given sender, for impersonation.
    pub fn fake_sign(self, sender: Address) -> signed::Eip2930 {
        let signature = FakeableSignature::fake(sender, Some(1));

        signed::Eip2930 {
            chain_id: self.chain_id,
            nonce: self.nonce,
            gas_price: self.gas_price,
            gas_limit: self.gas_limit,
            kind: self.kind,
            value: self.value,
            input: self.input,
            access_list: self.access_list,
            signature,
            hash: OnceLock::new(),
            rlp_encoding: OnceLock::new(),
        }
    }
}

trait RlpListLength {
    fn len_as_rlp(&self) -> usize;
}

impl RlpListLength for Vec<AccessListItem> {
    fn len_as_rlp(&self) -> usize {
        let inner: usize = self.iter().map(Encodable::length).sum();
        alloy_rlp::length_of_length(inner) + inner
    }
}
