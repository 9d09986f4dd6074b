//! The trace bus: synchronous before/step/after event fan-out to a mandatory
//! structural tracer and an optional debug tracer.
//!
//! Replaces the teacher's `TraceCollector`/`validate_before_message` pair
//! (which assumed a single handler wired directly into `revm`'s handler
//! registration) with the bus contract of spec.md §4.2: subscriber errors
//! are caught here and never unwind into the VM stepper.

use edr_primitives::{Address, Bytecode, Bytes, U256};

use crate::exit::Exit;
use crate::error::TracerError;

/// Fired before a call or create message executes. Absence of `to` denotes
/// contract creation.
#[derive(Clone, Debug)]
pub struct TracingMessage {
    /// Call depth, starting at 0 for the top-level message.
    pub depth: usize,
    /// Caller address.
    pub caller: Address,
    /// Callee address, or `None` for contract creation.
    pub to: Option<Address>,
    /// Value transferred.
    pub value: U256,
    /// Call data / init code.
    pub data: Bytes,
    /// Gas limit available to this message.
    pub gas_limit: u64,
    /// The callee's bytecode, if known at dispatch time.
    pub code: Option<Bytecode>,
}

/// Fired once per executed opcode.
#[derive(Clone, Debug)]
pub struct TracingStep {
    /// Call depth of the message this step belongs to.
    pub depth: usize,
    /// Program counter.
    pub pc: u64,
    /// The opcode being executed.
    pub opcode: u8,
    /// Gas remaining before this step executes.
    pub gas_left: u64,
    /// The address of the contract whose code is executing.
    pub contract_address: Address,
    /// Stack snapshot at this step, top-of-stack last.
    pub stack: Vec<U256>,
    /// Memory snapshot at this step.
    pub memory: Vec<u8>,
}

/// Fired after a call or create message completes.
#[derive(Clone, Debug)]
pub struct TracingMessageResult {
    /// The normalized outcome.
    pub exit: Exit,
    /// Gas consumed by the message.
    pub gas_used: u64,
    /// Gas refunded (storage clears, etc.).
    pub gas_refunded: u64,
    /// Raw return data.
    pub return_value: Bytes,
    /// Newly created contract address, for a successful `CREATE`.
    pub created_address: Option<Address>,
}

/// A reconstructed call-frame tree: one node per `beforeMessage`/
/// `afterMessage` pair, with `step` events and nested messages attached in
/// issuance order.
#[derive(Clone, Debug)]
pub struct MessageTrace {
    /// The message that opened this frame.
    pub message: TracingMessage,
    /// Opcode-level steps executed directly in this frame.
    pub steps: Vec<TracingStep>,
    /// Nested call/create frames, in call order.
    pub children: Vec<MessageTrace>,
    /// The frame's outcome, set once `afterMessage` has fired for it.
    pub result: Option<TracingMessageResult>,
}

/// A subscriber to the trace bus. Implemented by the structural tracer
/// (always subscribed) and, optionally, by a debug tracer.
///
/// Event ordering for any message is `before_message, (step)*,
/// after_message`; nested messages nest strictly between their parent's
/// `before_message` and `after_message`.
pub trait Tracer {
    /// Called before a call or create message executes.
    fn before_message(&mut self, message: &TracingMessage) -> Result<(), TracerError>;
    /// Called once per executed opcode.
    fn step(&mut self, step: &TracingStep) -> Result<(), TracerError>;
    /// Called after a call or create message completes.
    fn after_message(&mut self, result: &TracingMessageResult) -> Result<(), TracerError>;
}

/// Marker trait for a [`Tracer`] suitable for attachment as the optional
/// debug tracer via [`TraceBus::set_debug_tracer`].
pub trait DebugTracer: Tracer + Send {}

impl<T: Tracer + Send> DebugTracer for T {}

/// The always-on subscriber: reconstructs a [`MessageTrace`] tree and
/// records the most recent subscriber error.
#[derive(Debug, Default)]
pub struct StructuralTracer {
    stack: Vec<MessageTrace>,
    last_top_level: Option<MessageTrace>,
    last_error: Option<TracerError>,
}

impl StructuralTracer {
    /// Constructs an empty structural tracer.
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently completed top-level message trace, if any.
    pub fn get_last_top_level_message_trace(&self) -> Option<&MessageTrace> {
        self.last_top_level.as_ref()
    }

    /// The error captured from the most recent subscriber failure, if any.
    pub fn get_last_error(&self) -> Option<&TracerError> {
        self.last_error.as_ref()
    }

    /// Zeroes the error slot without dropping any traces.
    pub fn clear_last_error(&mut self) {
        self.last_error = None;
    }

    fn record_error(&mut self, error: TracerError) {
        self.last_error = Some(error);
    }
}

impl Tracer for StructuralTracer {
    fn before_message(&mut self, message: &TracingMessage) -> Result<(), TracerError> {
        self.stack.push(MessageTrace {
            message: message.clone(),
            steps: Vec::new(),
            children: Vec::new(),
            result: None,
        });

        Ok(())
    }

    fn step(&mut self, step: &TracingStep) -> Result<(), TracerError> {
        if let Some(frame) = self.stack.last_mut() {
            frame.steps.push(step.clone());
        }

        Ok(())
    }

    fn after_message(&mut self, result: &TracingMessageResult) -> Result<(), TracerError> {
        let Some(mut frame) = self.stack.pop() else {
            return Err(TracerError::new(
                "afterMessage with no matching beforeMessage",
            ));
        };

        frame.result = Some(result.clone());

        match self.stack.last_mut() {
            Some(parent) => parent.children.push(frame),
            None => self.last_top_level = Some(frame),
        }

        Ok(())
    }
}

/// Dispatches `beforeMessage`/`step`/`afterMessage` events to the structural
/// tracer and, if attached, the debug tracer. Subscriber errors are caught
/// here and recorded on the structural tracer rather than propagated, so a
/// misbehaving tracer can never corrupt the VM stepper (spec.md §4.2).
#[derive(Debug, Default)]
pub struct TraceBus {
    structural: StructuralTracer,
    debug: Option<Box<dyn DebugTracer>>,
}

impl TraceBus {
    /// Constructs a bus with no debug tracer attached.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches `tracer` as the debug tracer, replacing any previous one.
    pub fn set_debug_tracer(&mut self, tracer: Box<dyn DebugTracer>) {
        self.debug = Some(tracer);
    }

    /// Detaches and returns the current debug tracer, if any.
    pub fn remove_debug_tracer(&mut self) -> Option<Box<dyn DebugTracer>> {
        self.debug.take()
    }

    /// The most recently completed top-level message trace.
    pub fn get_last_top_level_message_trace(&self) -> Option<&MessageTrace> {
        self.structural.get_last_top_level_message_trace()
    }

    /// The most recent subscriber error, not yet cleared.
    pub fn get_last_error(&self) -> Option<&TracerError> {
        self.structural.get_last_error()
    }

    /// Zeroes the error slot without dropping any traces.
    pub fn clear_last_error(&mut self) {
        self.structural.clear_last_error();
    }

    fn dispatch(&mut self, mut call: impl FnMut(&mut dyn Tracer) -> Result<(), TracerError>) {
        if let Err(error) = call(&mut self.structural) {
            self.structural.record_error(error);
        }

        if let Some(debug) = self.debug.as_deref_mut() {
            if let Err(error) = call(debug) {
                self.structural.record_error(error);
            }
        }
    }

    /// Broadcasts `beforeMessage` to both subscribers.
    pub fn before_message(&mut self, message: TracingMessage) {
        self.dispatch(|tracer| tracer.before_message(&message));
    }

    /// Broadcasts `step` to both subscribers.
    pub fn step(&mut self, step: TracingStep) {
        self.dispatch(|tracer| tracer.step(&step));
    }

    /// Broadcasts `afterMessage` to both subscribers.
    pub fn after_message(&mut self, result: TracingMessageResult) {
        self.dispatch(|tracer| tracer.after_message(&result));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(depth: usize) -> TracingMessage {
        TracingMessage {
            depth,
            caller: Address::ZERO,
            to: Some(Address::ZERO),
            value: U256::ZERO,
            data: Bytes::new(),
            gas_limit: 21_000,
            code: None,
        }
    }

    fn result() -> TracingMessageResult {
        TracingMessageResult {
            exit: Exit::Success(crate::exit::SuccessReason::Stop),
            gas_used: 21_000,
            gas_refunded: 0,
            return_value: Bytes::new(),
            created_address: None,
        }
    }

    #[test]
    fn nested_messages_attach_as_children() {
        let mut bus = TraceBus::new();

        bus.before_message(message(0));
        bus.before_message(message(1));
        bus.after_message(result());
        bus.after_message(result());

        let trace = bus.get_last_top_level_message_trace().unwrap();
        assert_eq!(trace.children.len(), 1);
        assert!(trace.result.is_some());
    }

    #[test]
    fn unmatched_after_message_is_caught_not_propagated() {
        let mut bus = TraceBus::new();

        // No beforeMessage: the structural tracer errors, but the bus must
        // not panic or unwind.
        bus.after_message(result());

        assert!(bus.get_last_error().is_some());
    }

    #[test]
    fn debug_tracer_error_is_isolated_from_structural_tracking() {
        struct FailingTracer;
        impl Tracer for FailingTracer {
            fn before_message(&mut self, _message: &TracingMessage) -> Result<(), TracerError> {
                Err(TracerError::new("boom"))
            }
            fn step(&mut self, _step: &TracingStep) -> Result<(), TracerError> {
                Ok(())
            }
            fn after_message(
                &mut self,
                _result: &TracingMessageResult,
            ) -> Result<(), TracerError> {
                Ok(())
            }
        }

        let mut bus = TraceBus::new();
        bus.set_debug_tracer(Box::new(FailingTracer));

        bus.before_message(message(0));
        bus.after_message(result());

        assert_eq!(bus.get_last_error().unwrap().message, "boom");
        // The structural tracer itself still recorded the frame correctly.
        assert!(bus.get_last_top_level_message_trace().is_some());
    }

    #[test]
    fn clear_last_error_drops_error_but_not_traces() {
        let mut bus = TraceBus::new();
        bus.after_message(result());
        assert!(bus.get_last_error().is_some());

        bus.clear_last_error();
        assert!(bus.get_last_error().is_none());
    }
}
