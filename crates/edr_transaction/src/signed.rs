mod eip1559;
mod eip2930;
mod legacy;

use edr_primitives::{Address, Bytes, Hash as B256, U256};
use edr_signer::Signature;
use revm_primitives::TxKind;

pub use self::{eip1559::Eip1559, eip2930::Eip2930, legacy::Legacy};
use crate::ExecutableTransaction;

/// A signed transaction, as one of the three supported types.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypedTransaction {
    /// Legacy (optionally EIP-155) transaction
    Legacy(Legacy),
    /// EIP-2930 transaction
    Eip2930(Eip2930),
    /// EIP-1559 transaction
    Eip1559(Eip1559),
}

impl TypedTransaction {
    /// The EIP-2718 transaction type identifier. Legacy transactions have no
    /// real envelope type, so this returns `0` for them by convention.
    pub fn transaction_type(&self) -> u8 {
        match self {
            Self::Legacy(_) => Legacy::TYPE,
            Self::Eip2930(_) => Eip2930::TYPE,
            Self::Eip1559(_) => Eip1559::TYPE,
        }
    }

    /// The transaction's ECDSA signature.
    pub fn signature(&self) -> &dyn Signature {
        match self {
            Self::Legacy(tx) => &tx.signature,
            Self::Eip2930(tx) => &tx.signature,
            Self::Eip1559(tx) => &tx.signature,
        }
    }

    /// Whether this transaction was fake-signed (impersonated), rather than
    /// signed with a real secret key.
    pub fn is_fake(&self) -> bool {
        match self {
            Self::Legacy(tx) => tx.signature.is_fake(),
            Self::Eip2930(tx) => tx.signature.is_fake(),
            Self::Eip1559(tx) => tx.signature.is_fake(),
        }
    }
}

impl ExecutableTransaction for TypedTransaction {
    fn caller(&self) -> &Address {
        match self {
            Self::Legacy(tx) => ExecutableTransaction::caller(tx),
            Self::Eip2930(tx) => ExecutableTransaction::caller(tx),
            Self::Eip1559(tx) => ExecutableTransaction::caller(tx),
        }
    }

    fn gas_limit(&self) -> u64 {
        match self {
            Self::Legacy(tx) => tx.gas_limit,
            Self::Eip2930(tx) => tx.gas_limit,
            Self::Eip1559(tx) => tx.gas_limit,
        }
    }

    fn gas_price(&self) -> &u128 {
        match self {
            Self::Legacy(tx) => &tx.gas_price,
            Self::Eip2930(tx) => &tx.gas_price,
            Self::Eip1559(tx) => &tx.max_fee_per_gas,
        }
    }

    fn kind(&self) -> TxKind {
        match self {
            Self::Legacy(tx) => tx.kind,
            Self::Eip2930(tx) => tx.kind,
            Self::Eip1559(tx) => tx.kind,
        }
    }

    fn value(&self) -> &U256 {
        match self {
            Self::Legacy(tx) => &tx.value,
            Self::Eip2930(tx) => &tx.value,
            Self::Eip1559(tx) => &tx.value,
        }
    }

    fn data(&self) -> &Bytes {
        match self {
            Self::Legacy(tx) => &tx.input,
            Self::Eip2930(tx) => &tx.input,
            Self::Eip1559(tx) => &tx.input,
        }
    }

    fn nonce(&self) -> u64 {
        match self {
            Self::Legacy(tx) => tx.nonce,
            Self::Eip2930(tx) => tx.nonce,
            Self::Eip1559(tx) => tx.nonce,
        }
    }

    fn chain_id(&self) -> Option<u64> {
        match self {
            Self::Legacy(tx) => tx.chain_id,
            Self::Eip2930(tx) => Some(tx.chain_id),
            Self::Eip1559(tx) => Some(tx.chain_id),
        }
    }

    fn access_list(&self) -> Option<&[edr_eip2930::AccessListItem]> {
        match self {
            Self::Legacy(_) => None,
            Self::Eip2930(tx) => Some(&tx.access_list),
            Self::Eip1559(tx) => Some(&tx.access_list),
        }
    }

    fn effective_gas_price(&self, block_base_fee: u128) -> Option<u128> {
        match self {
            Self::Legacy(_) | Self::Eip2930(_) => None,
            Self::Eip1559(tx) => Some(
                tx.max_priority_fee_per_gas
                    .min(tx.max_fee_per_gas.saturating_sub(block_base_fee))
                    .saturating_add(block_base_fee),
            ),
        }
    }

    fn max_fee_per_gas(&self) -> Option<&u128> {
        match self {
            Self::Legacy(_) | Self::Eip2930(_) => None,
            Self::Eip1559(tx) => Some(&tx.max_fee_per_gas),
        }
    }

    fn max_priority_fee_per_gas(&self) -> Option<&u128> {
        match self {
            Self::Legacy(_) | Self::Eip2930(_) => None,
            Self::Eip1559(tx) => Some(&tx.max_priority_fee_per_gas),
        }
    }

    fn rlp_encoding(&self) -> &Bytes {
        match self {
            Self::Legacy(tx) => ExecutableTransaction::rlp_encoding(tx),
            Self::Eip2930(tx) => ExecutableTransaction::rlp_encoding(tx),
            Self::Eip1559(tx) => ExecutableTransaction::rlp_encoding(tx),
        }
    }

    fn transaction_hash(&self) -> &B256 {
        match self {
            Self::Legacy(tx) => ExecutableTransaction::transaction_hash(tx),
            Self::Eip2930(tx) => ExecutableTransaction::transaction_hash(tx),
            Self::Eip1559(tx) => ExecutableTransaction::transaction_hash(tx),
        }
    }
}
