use alloy_rlp::{RlpDecodable, RlpEncodable};
use k256::{
    ecdsa::{RecoveryId, Signature as EcdsaSignature, SigningKey, VerifyingKey},
    SecretKey,
};

use super::{Recoverable, RecoveryMessage, Signature, SignatureError};
use crate::{public_key_to_address, Address, U256};

/// An ECDSA signature with a legacy `v`-style recovery id, as used by
/// pre-EIP-2930 (legacy/EIP-155) transactions.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, RlpEncodable, RlpDecodable)]
pub struct SignatureWithRecoveryId {
    /// R value
    pub r: U256,
    /// S value
    pub s: U256,
    /// V value (recovery id, possibly offset by a chain id per EIP-155)
    pub v: u64,
}

impl SignatureWithRecoveryId {
    /// Signs the given message with the provided secret key.
    pub fn new<M>(message: M, secret_key: &SecretKey) -> Result<Self, SignatureError>
    where
        M: Into<RecoveryMessage>,
    {
        let message: RecoveryMessage = message.into();
        let hash = message.hash();

        let signing_key = SigningKey::from(secret_key);
        let (signature, recovery_id): (EcdsaSignature, RecoveryId) = signing_key
            .sign_prehash_recoverable(hash.as_slice())
            .map_err(SignatureError::ECDSAError)?;

        let r = U256::from_be_slice(&signature.r().to_bytes());
        let s = U256::from_be_slice(&signature.s().to_bytes());
        let v = u64::from(recovery_id.to_byte()) + 27;

        Ok(Self { r, s, v })
    }

    /// Returns whether the recovery id's `y_parity` bit is 1.
    pub fn odd_y_parity(&self) -> bool {
        normalize_recovery_id(self.v) == 1
    }

    /// Recovers the signer's address from the given message.
    pub fn recover(&self, message: RecoveryMessage) -> Result<Address, SignatureError> {
        let hash = message.hash();

        let recovery_id = RecoveryId::from_byte(normalize_recovery_id(self.v))
            .ok_or(SignatureError::RecoveryError)?;

        let mut bytes = [0u8; 64];
        bytes[..32].copy_from_slice(&self.r.to_be_bytes::<32>());
        bytes[32..].copy_from_slice(&self.s.to_be_bytes::<32>());

        let signature =
            EcdsaSignature::from_slice(&bytes).map_err(|_| SignatureError::RecoveryError)?;

        let verifying_key =
            VerifyingKey::recover_from_prehash(hash.as_slice(), &signature, recovery_id)
                .map_err(|_| SignatureError::RecoveryError)?;

        Ok(public_key_to_address(k256::PublicKey::from(
            &verifying_key,
        )))
    }
}

fn normalize_recovery_id(v: u64) -> u8 {
    match v {
        0 | 27 => 0,
        1 | 28 => 1,
        v if v >= 35 => ((v - 35) % 2) as u8,
        v => (v % 2) as u8,
    }
}

impl Recoverable for SignatureWithRecoveryId {
    fn recover_address(&self, message: RecoveryMessage) -> Result<Address, SignatureError> {
        self.recover(message)
    }
}

impl Signature for SignatureWithRecoveryId {
    fn r(&self) -> U256 {
        self.r
    }

    fn s(&self) -> U256 {
        self.s
    }

    fn v(&self) -> u64 {
        self.v
    }

    fn y_parity(&self) -> Option<bool> {
        None
    }
}

#[cfg(test)]
mod tests {
    use edr_primitives::keccak256;

    use super::*;

    #[test]
    fn sign_and_recover_round_trip() {
        let secret_key = SecretKey::from_slice(&[7u8; 32]).unwrap();
        let address = public_key_to_address(secret_key.public_key());

        let hash = keccak256(b"hello world");
        let signature = SignatureWithRecoveryId::new(hash, &secret_key).unwrap();

        let recovered = signature.recover(RecoveryMessage::Hash(hash)).unwrap();
        assert_eq!(recovered, address);
    }
}
