//! Error types for the VM adapter.
//!
//! Grounded on the teacher's `state::StateError`/`transaction::TransactionError`
//! split between EVM-semantic outcomes (returned as values, see
//! [`crate::exit::Exit`]) and infrastructure failures (propagated here).

use edr_chain::ChainConfigError;

/// Errors the adapter can return. EVM-semantic outcomes (revert, halt) are
/// never represented here; they travel inside [`crate::adapter::RunTxResult`]
/// as an [`crate::exit::Exit`].
#[derive(Debug, thiserror::Error)]
pub enum VmAdapterError<StateErrorT>
where
    StateErrorT: std::error::Error + 'static,
{
    /// The requested configuration is unsupported, e.g. a forked
    /// configuration given to the native backend, or a post-Merge block
    /// missing `prevRandao`.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// `startBlock`/`runTxInBlock`/`sealBlock`/`revertBlock` were called out
    /// of the sequence spec.md §4.4 requires.
    #[error(transparent)]
    InvalidBlockLifecycle(#[from] InvalidBlockLifecycle),

    /// The backend (state store or `revm`) failed for a reason outside the
    /// normal halt taxonomy: this is an infrastructure failure, not a
    /// program outcome, and is propagated to the caller verbatim.
    #[error(transparent)]
    BackendExecution(#[from] BackendExecutionError<StateErrorT>),
}

/// An unsupported or internally inconsistent configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    /// The native backend was asked to run against a forked chain
    /// configuration. This is a known limitation of the native backend, not
    /// the interpreted one.
    #[error("the native backend does not support forked configurations")]
    ForkingUnsupported,
    /// Chain configuration failed its own internal validation (e.g. a fork
    /// network id of zero).
    #[error(transparent)]
    Chain(#[from] ChainConfigError),
    /// The active hardfork is at or past the Merge and the block context
    /// carries no `prevRandao`.
    #[error("prevRandao is required at and after the Merge hardfork")]
    MixHashRequired,
}

/// The in-block call sequence (`startBlock` → `runTxInBlock`* →
/// `addBlockRewards` → `sealBlock`/`revertBlock`) was violated.
#[derive(Debug, thiserror::Error)]
pub enum InvalidBlockLifecycle {
    /// `startBlock` was called while a checkpoint was already open.
    #[error("a block checkpoint is already open; call sealBlock or revertBlock first")]
    AlreadyOpen,
    /// `runTxInBlock`, `addBlockRewards`, `sealBlock` or `revertBlock` was
    /// called without an open checkpoint.
    #[error("no block checkpoint is open; call startBlock first")]
    NoneOpen,
}

/// The backend threw for a reason outside the EVM's normal halt taxonomy:
/// a state-store I/O failure, a `revm` internal database error, and so on.
#[derive(Debug, thiserror::Error)]
pub enum BackendExecutionError<StateErrorT>
where
    StateErrorT: std::error::Error + 'static,
{
    /// The underlying state store failed.
    #[error(transparent)]
    State(#[from] StateErrorT),
    /// `revm` itself rejected the transaction before execution (e.g. a
    /// malformed nonce or an insufficient funds check that wasn't skipped).
    #[error("transaction rejected by the backend: {0}")]
    Rejected(String),
}

/// An error raised by a trace bus subscriber. Captured by the
/// [`crate::trace::TraceBus`], never propagated out of the VM stepper;
/// surfaced later via `getLastTrace().error`.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct TracerError {
    /// Human-readable description of what went wrong.
    pub message: String,
}

impl TracerError {
    /// Constructs a [`TracerError`] from any displayable value.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
