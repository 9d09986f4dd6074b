//! Ethereum transaction receipt types.
//!
//! Part of this code was adapted from foundry and is distributed under their
//! license:
//! - <https://github.com/foundry-rs/foundry/blob/01b16238ff87dc7ca8ee3f5f13e389888c2a2ee4/LICENSE-APACHE>
//! - <https://github.com/foundry-rs/foundry/blob/01b16238ff87dc7ca8ee3f5f13e389888c2a2ee4/LICENSE-MIT>
//! For the original context see:
//! <https://github.com/foundry-rs/foundry/blob/01b16238ff87dc7ca8ee3f5f13e389888c2a2ee4/anvil/core/src/eth/receipt.rs>

#![warn(missing_docs)]

pub mod execution;
mod factory;

use auto_impl::auto_impl;
use edr_eth::Bloom;
pub use edr_primitives::Hash as B256;

pub use self::factory::ReceiptFactory;

/// An execution receipt, either the pre-EIP-658 state-root form or the
/// post-EIP-658 status-code form.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum Execution<LogT> {
    /// Legacy (pre-EIP-658) receipt.
    Legacy(self::execution::Legacy<LogT>),
    /// EIP-658 receipt.
    Eip658(self::execution::Eip658<LogT>),
}

/// Either the state root (pre-EIP-658) or the status code (post-EIP-658) of a
/// receipt.
#[derive(Debug, PartialEq, Eq)]
pub enum RootOrStatus<'root> {
    /// State root (pre-EIP-658).
    Root(&'root B256),
    /// Status code (post-EIP-658).
    Status(bool),
}

/// Trait for a receipt that's generated after execution of a transaction.
#[auto_impl(Box, Arc, &)]
pub trait ExecutionReceipt {
    /// Type of the logs the receipt carries.
    type Log;

    /// Cumulative gas used in the block after this transaction was executed.
    fn cumulative_gas_used(&self) -> u64;
    /// Bloom filter over the logs this transaction emitted.
    fn logs_bloom(&self) -> &Bloom;
    /// Logs generated within this transaction.
    fn transaction_logs(&self) -> &[Self::Log];
    /// State root (pre-EIP-658) or status (post-EIP-658) of the receipt.
    fn root_or_status(&self) -> RootOrStatus<'_>;
}

/// Trait for remapping a receipt's log type, e.g. from an execution-time log
/// to a receipt-side log carrying additional indexing metadata.
pub trait MapReceiptLogs<OldLogT, NewLogT, OutputT> {
    /// Maps the logs of the receipt to a new type.
    fn map_logs(self, map_fn: impl FnMut(OldLogT) -> NewLogT) -> OutputT;
}
