#![warn(missing_docs)]

//! Ethereum L1 domain types: accounts, logs and the block execution context.
//!
//! Transactions, receipts and signatures live in their own crates
//! (`edr_transaction`, `edr_receipt`, `edr_signer`); this crate holds the
//! types the state journal and the VM adapter share: account records, logs
//! and bloom filters, and the per-block environment the adapter maps onto
//! `revm`'s `BlockEnv`.

/// Account types used by the state journal and the trie.
pub mod account;
/// Block execution context and difficulty/prevrandao rules.
pub mod block;
/// Log and bloom filter types.
pub mod log;

pub use edr_primitives::*;
