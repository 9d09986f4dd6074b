use std::sync::OnceLock;

use alloy_rlp::Encodable;
use edr_eip2930::AccessListItem;
use edr_primitives::{keccak256, Address, Bytes, Hash as B256, U256};
use edr_signer::{FakeableSignature, SignatureError, SignatureWithRecoveryId, SignatureWithYParity};
use revm_primitives::TxKind;

use crate::signed;

/// An unsigned EIP-1559 (dynamic fee) transaction request.
#[derive(Clone, Debug, PartialEq, Eq)]
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
}

impl Eip1559 {
    /// The EIP-2718 transaction type identifier for an EIP-1559 transaction.
    pub const TYPE: u8 = 2;

    /// The signing hash: `keccak256(0x02 || rlp([chain_id, nonce,
    /// max_priority_fee_per_gas, max_fee_per_gas, gas_limit, kind, value,
    /// input, access_list]))`.
    pub fn hash(&self) -> B256 {
        let mut out = vec![Self::TYPE];
        let access_list_len: usize = {
            let inner: usize = self.access_list.iter().map(Encodable::length).sum();
            alloy_rlp::length_of_length(inner) + inner
        };

        let payload_length = self.chain_id.length()
            + self.nonce.length()
            + self.max_priority_fee_per_gas.length()
            + self.max_fee_per_gas.length()
            + self.gas_limit.length()
            + self.kind.length()
            + self.value.length()
            + self.input.length()
            + access_list_len;

        alloy_rlp::Header {
            list: true,
            payload_length,
        }
        .encode(&mut out);

        self.chain_id.encode(&mut out);
        self.nonce.encode(&mut out);
        self.max_priority_fee_per_gas.encode(&mut out);
        self.max_fee_per_gas.encode(&mut out);
        self.gas_limit.encode(&mut out);
        self.kind.encode(&mut out);
        self.value.encode(&mut out);
        self.input.encode(&mut out);
        self.access_list.encode(&mut out);

        keccak256(&out)
    }

    /// Signs the request, producing a [`signed::Eip1559`].
    pub fn sign(
        self,
        secret_key: &edr_signer::SecretKey,
    ) -> Result<signed::Eip1559, SignatureError> {
        let hash = self.hash();
        let ecdsa = SignatureWithRecoveryId::new(hash, secret_key)?;
        let signature = SignatureWithYParity::from(ecdsa);
        let signature = FakeableSignature::recover(signature, hash.into())?;

        Ok(signed::Eip1559 {
            chain_id: self.chain_id,
            nonce: self.nonce,
            max_priority_fee_per_gas: self.max_priority_fee_per_gas,
            max_fee_per_gas: self.max_fee_per_gas,
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
    pub fn fake_sign(self, sender: Address) -> signed::Eip1559 {
        let signature = FakeableSignature::fake(sender, Some(1));

        signed::Eip1559 {
            chain_id: self.chain_id,
            nonce: self.nonce,
            max_priority_fee_per_gas: self.max_priority_fee_per_gas,
            max_fee_per_gas: self.max_fee_per_gas,
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
