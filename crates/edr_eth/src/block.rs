//! The per-block execution context and the rules for deriving it from a
//! block header, independent of any particular hardfork's `BlockEnv` shape.
//!
//! Grounded on the teacher's `edr_eth::block`/`block::difficulty` modules:
//! the difficulty clamp and the post-Merge `prevrandao`/`mix_hash` field
//! reinterpretation are kept, the RLP header encoding and withdrawal/blob
//! gas fields are not (out of scope: block assembly and persistence).

use edr_primitives::{Address, Hash, U256};

/// Difficulty is clamped to `2^32 - 1` from the Merge onward, since `revm`
/// reads the post-Merge `prevrandao` out of the same field slot.
pub const POST_MERGE_DIFFICULTY: U256 = U256::from_limbs([u32::MAX as u64, 0, 0, 0]);

/// The header fields the VM adapter needs to build a per-transaction
/// execution environment. A thin, execution-only subset of a full block
/// header (no withdrawals, no parent hash, no RLP encoding).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockContext {
    /// Block number
    pub number: u64,
    /// Unix timestamp
    pub timestamp: u64,
    /// Coinbase/beneficiary address
    pub beneficiary: Address,
    /// Gas limit
    pub gas_limit: u64,
    /// Base fee per gas, `None` before EIP-1559 activates
    pub base_fee: Option<u128>,
    /// Pre-Merge: PoW difficulty. Post-Merge: ignored in favor of
    /// `prev_randao`, but still carried since some opcodes read it raw.
    pub difficulty: U256,
    /// Post-Merge randomness beacon output (`prevRandao`), `None` pre-Merge.
    pub prev_randao: Option<Hash>,
}

impl BlockContext {
    /// Returns the value `DIFFICULTY`/`PREVRANDAO` should read, applying the
    /// Merge's field-reinterpretation and difficulty clamp.
    ///
    /// Pre-Merge this is the raw PoW difficulty. Post-Merge it is
    /// `prev_randao` reinterpreted as a `U256`, and the stored difficulty is
    /// expected to already be clamped to [`POST_MERGE_DIFFICULTY`] by
    /// whoever built this context.
    pub fn difficulty_or_prev_randao(&self) -> U256 {
        match self.prev_randao {
            Some(randao) => U256::from_be_bytes(randao.0),
            None => self.difficulty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pre_merge_reads_raw_difficulty() {
        let ctx = BlockContext {
            number: 1,
            timestamp: 0,
            beneficiary: Address::ZERO,
            gas_limit: 30_000_000,
            base_fee: None,
            difficulty: U256::from(17),
            prev_randao: None,
        };

        assert_eq!(ctx.difficulty_or_prev_randao(), U256::from(17));
    }

    #[test]
    fn post_merge_reads_prev_randao() {
        let randao = Hash::from([7u8; 32]);
        let ctx = BlockContext {
            number: 20_000_000,
            timestamp: 0,
            beneficiary: Address::ZERO,
            gas_limit: 30_000_000,
            base_fee: Some(1_000_000_000),
            difficulty: POST_MERGE_DIFFICULTY,
            prev_randao: Some(randao),
        };

        assert_eq!(
            ctx.difficulty_or_prev_randao(),
            U256::from_be_bytes(randao.0)
        );
    }
}
