use alloy_rlp::Encodable;
use edr_primitives::{keccak256, Address, Bytes, Hash as B256, U256};
use edr_signer::{FakeableSignature, SignatureError, SignatureWithRecoveryId};
use revm_primitives::TxKind;

use crate::signed;

/// An unsigned legacy transaction request.
///
/// `chain_id` is `None` for a pre-EIP-155 transaction (replayable across
/// chains) and `Some` for an EIP-155 transaction, which folds the chain id
/// into the signature's `v` value.
#[derive(Clone, Debug, PartialEq, Eq)]
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
    /// EIP-155 chain id, if replay-protected
    pub chain_id: Option<u64>,
}

impl Legacy {
    /// The type identifier for a legacy transaction (it has no EIP-2718
    /// envelope byte, but downstream code still needs a tag to dispatch on).
    pub const TYPE: u8 = 0;

    /// The RLP preimage that gets hashed and signed: `[nonce, gas_price,
    /// gas_limit, kind, value, input]`, extended per EIP-155 with `[chain_id,
    /// 0, 0]` when `chain_id` is set.
    pub fn hash(&self) -> B256 {
        let mut out = Vec::with_capacity(64);
        let header = alloy_rlp::Header {
            list: true,
            payload_length: self.signing_payload_length(),
        };
        header.encode(&mut out);

        self.nonce.encode(&mut out);
        self.gas_price.encode(&mut out);
        self.gas_limit.encode(&mut out);
        self.kind.encode(&mut out);
        self.value.encode(&mut out);
        self.input.encode(&mut out);

        if let Some(chain_id) = self.chain_id {
            chain_id.encode(&mut out);
            0u8.encode(&mut out);
            0u8.encode(&mut out);
        }

        keccak256(&out)
    }

    fn signing_payload_length(&self) -> usize {
        let mut length = self.nonce.length()
            + self.gas_price.length()
            + self.gas_limit.length()
            + self.kind.length()
            + self.value.length()
            + self.input.length();

        if let Some(chain_id) = self.chain_id {
            length += chain_id.length() + 0u8.length() + 0u8.length();
        }

        length
    }

    /// Signs the request, producing a [`signed::Legacy`].
    pub fn sign(self, secret_key: &edr_signer::SecretKey) -> Result<signed::Legacy, SignatureError> {
        let hash = self.hash();
        let signature = SignatureWithRecoveryId::new(hash, secret_key)?;
        let signature = apply_eip155(signature, self.chain_id);
        let signature = FakeableSignature::recover(signature, hash.into())?;

        Ok(signed::Legacy {
            nonce: self.nonce,
            gas_price: self.gas_price,
            gas_limit: self.gas_limit,
            kind: self.kind,
            value: self.value,
            input: self.input,
            chain_id: self.chain_id,
            signature,
            hash: std::sync::OnceLock::new(),
            rlp_encoding: std::sync::OnceLock::new(),
        })
    }

    /// Fake-signs the request for the given sender, for impersonation.
    pub fn fake_sign(self, sender: Address) -> signed::Legacy {
        let recovery_id = self.chain_id.map(|_| 1).or(Some(0));
        let signature = FakeableSignature::fake(sender, recovery_id);

        signed::Legacy {
            nonce: self.nonce,
            gas_price: self.gas_price,
            gas_limit: self.gas_limit,
            kind: self.kind,
            value: self.value,
            input: self.input,
            chain_id: self.chain_id,
            signature,
            hash: std::sync::OnceLock::new(),
            rlp_encoding: std::sync::OnceLock::new(),
        }
    }
}

fn apply_eip155(
    signature: SignatureWithRecoveryId,
    chain_id: Option<u64>,
) -> SignatureWithRecoveryId {
    match chain_id {
        None => signature,
        Some(chain_id) => {
            let parity = u64::from(signature.odd_y_parity());
            SignatureWithRecoveryId {
                r: signature.r,
                s: signature.s,
                v: chain_id * 2 + 35 + parity,
            }
        }
    }
}
