#![warn(missing_docs)]

//! The VM adapter core: the exit-code taxonomy, trace bus and `VmAdapter`
//! trait that sit between a state store/blockchain pair and the `revm`
//! interpreter.

mod adapter;
/// Bridges this crate's state traits to `revm`'s `Database` trait.
pub mod db;
/// Translates chain/block/transaction types into the `revm` environment.
pub mod env;
/// Adapter and trace-bus error types.
pub mod error;
/// The normalized success/revert/halt exit taxonomy.
pub mod exit;
/// Feeds `revm`'s inspector hooks into the trace bus.
pub mod inspector;
/// The before/step/after trace bus and message-trace reconstruction.
pub mod trace;

pub use crate::adapter::{InterpretedAdapter, NativeAdapter, RunTxResult, VmAdapter};
pub use crate::db::{DatabaseComponentError, DatabaseComponents};
pub use crate::error::{
    BackendExecutionError, ConfigurationError, InvalidBlockLifecycle, TracerError, VmAdapterError,
};
pub use crate::exit::{Exit, HaltCode, SuccessReason};
pub use crate::inspector::TracingInspector;
pub use crate::trace::{
    DebugTracer, MessageTrace, StructuralTracer, TraceBus, Tracer, TracingMessage,
    TracingMessageResult, TracingStep,
};
