//! EVM logs and bloom filters.
//!
//! Adapted from the teacher's `edr_eth::log`/`log::block` modules, trimmed to
//! the subset the VM adapter and receipt encoding need: log construction and
//! folding logs into a block- or receipt-level bloom filter.

use edr_primitives::{keccak256, Address, Bloom, Bytes, Hash};

/// A single EVM log emitted by a `LOG0`-`LOG4` opcode.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Log {
    /// Address that emitted the log
    pub address: Address,
    /// Indexed topics, 0 to 4 of them
    pub topics: Vec<Hash>,
    /// Non-indexed log data
    pub data: Bytes,
}

/// Adds a single log's address and topics into the given bloom filter.
pub fn add_log_to_bloom(log: &Log, bloom: &mut Bloom) {
    m3_2048(bloom, log.address.as_slice());
    for topic in &log.topics {
        m3_2048(bloom, topic.as_slice());
    }
}

/// Folds a set of logs into a single bloom filter, as stored in a receipt or
/// block header.
pub fn logs_to_bloom(logs: &[Log]) -> Bloom {
    let mut bloom = Bloom::default();
    for log in logs {
        add_log_to_bloom(log, &mut bloom);
    }
    bloom
}

/// The Ethereum "M3:2048" bloom filter construction: hash `bytes`, then set
/// three bits in the 2048-bit filter derived from the low 11 bits of three
/// 16-bit windows of the hash.
fn m3_2048(bloom: &mut Bloom, bytes: &[u8]) {
    let hash = keccak256(bytes);
    for i in [0usize, 2, 4] {
        let bit = (u16::from(hash[i + 1]) + (u16::from(hash[i]) << 8)) & 0x7ff;
        let byte_index = 256 - 1 - usize::from(bit) / 8;
        let bit_index = usize::from(bit) % 8;
        bloom.0[byte_index] |= 1 << bit_index;
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn empty_logs_give_empty_bloom() {
        assert_eq!(logs_to_bloom(&[]), Bloom::default());
    }

    #[test]
    fn single_log_sets_some_bits() {
        let log = Log {
            address: Address::from_str("0x0000000000000000000000000000000000000001").unwrap(),
            topics: vec![Hash::ZERO],
            data: Bytes::new(),
        };

        let bloom = logs_to_bloom(&[log]);
        assert_ne!(bloom, Bloom::default());
    }
}
