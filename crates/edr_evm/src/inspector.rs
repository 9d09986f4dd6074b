//! Feeds `revm`'s per-step/per-call inspector events into the [`TraceBus`].
//!
//! Grounded on `examples/edb-rs-edb`'s `CallTracer`: the modern, single
//! generic-parameter `Inspector<CTX>` trait (`call`/`call_end`/`create`/
//! `create_end`/`step`/`selfdestruct`/`log`), adapted to emit this crate's
//! `TracingMessage`/`TracingStep`/`TracingMessageResult` instead of that
//! tracer's own `TraceEntry` shape.

use edr_primitives::{Address, Bytes};
use revm::context::ContextTr;
use revm::interpreter::{
    CallInputs, CallOutcome, CreateInputs, CreateOutcome, Interpreter, InstructionResult,
};
use revm::primitives::Log;
use revm::Inspector;

use crate::exit::{Exit, HaltCode, SuccessReason};
use crate::trace::{TraceBus, TracingMessage, TracingMessageResult, TracingStep};

/// Classifies a single call/create frame's outcome. Coarser than
/// [`Exit::from_execution_result`] (which reads the whole transaction's
/// `ExecutionResult`): a frame only ever reports success/revert/halt, with
/// no SELFDESTRUCT-vs-STOP distinction available at this granularity.
fn classify_frame(result: InstructionResult, output: &Bytes) -> Exit {
    use InstructionResult as I;

    match result {
        I::Return | I::Stop | I::SelfDestruct => {
            let reason = if matches!(result, I::SelfDestruct) {
                SuccessReason::SelfDestruct
            } else if matches!(result, I::Return) || !output.is_empty() {
                SuccessReason::Return
            } else {
                SuccessReason::Stop
            };
            Exit::Success(reason)
        }
        I::Revert => Exit::Revert {
            return_value: output.clone(),
        },
        I::OutOfGas | I::MemoryOOG | I::MemoryLimitOOG | I::PrecompileOOG | I::InvalidOperandOOG => {
            Exit::Halt(HaltCode::OutOfGas)
        }
        I::OpcodeNotFound | I::InvalidFEOpcode => Exit::Halt(HaltCode::InvalidOpcode),
        I::StackUnderflow => Exit::Halt(HaltCode::StackUnderflow),
        I::StackOverflow => Exit::Halt(HaltCode::StackOverflow),
        I::InvalidJump => Exit::Halt(HaltCode::InvalidJump),
        I::StateChangeDuringStaticCall => Exit::Halt(HaltCode::StateChangeDuringStaticCall),
        I::CallTooDeep => Exit::Halt(HaltCode::CallTooDeep),
        I::OutOfFunds => Exit::Halt(HaltCode::InsufficientFunds),
        I::CreateContractSizeLimit | I::CreateInitCodeSizeLimit => {
            Exit::Halt(HaltCode::CreateContractSizeLimit)
        }
        _ => Exit::Halt(HaltCode::Unknown),
    }
}

/// Drives a [`TraceBus`] from `revm`'s inspector hooks. Borrows the bus for
/// the duration of a single `inspect_one_tx` call.
pub struct TracingInspector<'a> {
    bus: &'a mut TraceBus,
    depth: usize,
}

impl<'a> TracingInspector<'a> {
    /// Wraps `bus`, to be driven by a single transaction's execution.
    pub fn new(bus: &'a mut TraceBus) -> Self {
        Self { bus, depth: 0 }
    }
}

impl<'a, CTX: ContextTr> Inspector<CTX> for TracingInspector<'a> {
    fn step(&mut self, interp: &mut Interpreter, _context: &mut CTX) {
        let step = TracingStep {
            depth: self.depth,
            pc: interp.bytecode.pc() as u64,
            opcode: interp.bytecode.opcode(),
            gas_left: interp.gas.remaining(),
            contract_address: interp.input.target_address(),
            stack: interp.stack.data().clone(),
            memory: interp.memory.context_memory().to_vec(),
        };

        self.bus.step(step);
    }

    fn log(&mut self, _interp: &mut Interpreter, _context: &mut CTX, _log: Log) {}

    fn call(&mut self, context: &mut CTX, inputs: &mut CallInputs) -> Option<CallOutcome> {
        let message = TracingMessage {
            depth: self.depth,
            caller: inputs.caller,
            to: Some(inputs.target_address),
            value: inputs.transfer_value().unwrap_or_default(),
            data: inputs.input.bytes(context),
            gas_limit: inputs.gas_limit,
            code: None,
        };

        self.depth += 1;
        self.bus.before_message(message);

        None
    }

    fn call_end(&mut self, _context: &mut CTX, _inputs: &CallInputs, outcome: &mut CallOutcome) {
        self.depth = self.depth.saturating_sub(1);

        let result = TracingMessageResult {
            exit: classify_frame(outcome.result.result, &outcome.result.output),
            gas_used: outcome.result.gas.spent(),
            gas_refunded: u64::try_from(outcome.result.gas.refunded()).unwrap_or(0),
            return_value: outcome.result.output.clone(),
            created_address: None,
        };

        self.bus.after_message(result);
    }

    fn create(&mut self, _context: &mut CTX, inputs: &mut CreateInputs) -> Option<CreateOutcome> {
        let message = TracingMessage {
            depth: self.depth,
            caller: inputs.caller,
            to: None,
            value: inputs.value,
            data: inputs.init_code.clone(),
            gas_limit: inputs.gas_limit,
            code: None,
        };

        self.depth += 1;
        self.bus.before_message(message);

        None
    }

    fn create_end(
        &mut self,
        _context: &mut CTX,
        _inputs: &CreateInputs,
        outcome: &mut CreateOutcome,
    ) {
        self.depth = self.depth.saturating_sub(1);

        let result = TracingMessageResult {
            exit: classify_frame(outcome.result.result, &outcome.result.output),
            gas_used: outcome.result.gas.spent(),
            gas_refunded: u64::try_from(outcome.result.gas.refunded()).unwrap_or(0),
            return_value: outcome.result.output.clone(),
            created_address: outcome.address,
        };

        self.bus.after_message(result);
    }

    fn selfdestruct(&mut self, _contract: Address, _target: Address, _value: edr_primitives::U256) {}
}
