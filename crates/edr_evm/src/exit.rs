//! The unified success/revert/halt classification shared by both backends.
//!
//! Grounded on the teacher's `trace.rs::SuccessOrHalt`/`ExecutionResult`
//! mapping: both backends ultimately produce a `revm` `ExecutionResult`, and
//! this module collapses it to the one taxonomy the rest of the adapter
//! reasons about.

use edr_primitives::Bytes;
use revm::context::result::{ExecutionResult, HaltReason, OutOfGasError};

/// The reason an execution completed successfully.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SuccessReason {
    /// `STOP` opcode, or an empty-code call.
    Stop,
    /// `RETURN` opcode.
    Return,
    /// `SELFDESTRUCT` opcode.
    SelfDestruct,
}

/// A single exceptional-halt code. Every backend-specific halt reason maps
/// to exactly one of these; unmapped reasons fall back to [`Self::Unknown`]
/// and are logged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HaltCode {
    /// Ran out of gas.
    OutOfGas,
    /// Encountered an opcode not defined at the active hardfork.
    InvalidOpcode,
    /// Popped an empty stack.
    StackUnderflow,
    /// Pushed past the 1024-element stack limit.
    StackOverflow,
    /// Jumped to a non-`JUMPDEST` target.
    InvalidJump,
    /// Wrote to storage/balance from a `STATICCALL` context.
    StateChangeDuringStaticCall,
    /// Exceeded the maximum call depth (1024).
    CallTooDeep,
    /// Insufficient balance to cover a `CALL`'s value or a `CREATE`'s
    /// initial transfer.
    InsufficientFunds,
    /// Created contract code starts with the EIP-3541 `0xEF` byte, or
    /// exceeds the EIP-170 size limit.
    CreateContractSizeLimit,
    /// A reason this adapter has no explicit mapping for.
    Unknown,
}

/// The normalized outcome of running a transaction or a single call/create
/// frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Exit {
    /// Execution completed without reverting.
    Success(SuccessReason),
    /// Execution reverted; `return_value` carries the revert reason.
    Revert {
        /// ABI-encoded (or raw) revert payload.
        return_value: Bytes,
    },
    /// Execution halted for an exceptional, non-recoverable reason.
    Halt(HaltCode),
}

impl Exit {
    /// Classifies a `revm` [`ExecutionResult`].
    ///
    /// The `created_address`/`returned_nonempty` inputs disambiguate
    /// `Success` into `Return` vs `Stop` vs `SelfDestruct` per spec: a
    /// self-destruct takes priority, then any created address or non-empty
    /// return value means `Return`, otherwise `Stop`.
    pub fn from_execution_result(result: &ExecutionResult<HaltReason>) -> Self {
        match result {
            ExecutionResult::Success {
                output, reason, ..
            } => {
                use revm::context::result::SuccessReason as RevmSuccessReason;

                let reason = match reason {
                    RevmSuccessReason::SelfDestruct => SuccessReason::SelfDestruct,
                    RevmSuccessReason::Return => SuccessReason::Return,
                    RevmSuccessReason::Stop | RevmSuccessReason::EofReturnContract => {
                        if output.address().is_some() || !output.data().is_empty() {
                            SuccessReason::Return
                        } else {
                            SuccessReason::Stop
                        }
                    }
                };

                Exit::Success(reason)
            }
            ExecutionResult::Revert { output, .. } => Exit::Revert {
                return_value: output.clone(),
            },
            ExecutionResult::Halt { reason, .. } => Exit::Halt(Self::map_halt(reason)),
        }
    }

    fn map_halt(reason: &HaltReason) -> HaltCode {
        match reason {
            HaltReason::OutOfGas(_) => HaltCode::OutOfGas,
            HaltReason::OpcodeNotFound | HaltReason::InvalidFEOpcode => HaltCode::InvalidOpcode,
            HaltReason::StackUnderflow => HaltCode::StackUnderflow,
            HaltReason::StackOverflow => HaltCode::StackOverflow,
            HaltReason::InvalidJump => HaltCode::InvalidJump,
            HaltReason::StateChangeDuringStaticCall => HaltCode::StateChangeDuringStaticCall,
            HaltReason::CallTooDeep => HaltCode::CallTooDeep,
            HaltReason::OutOfFunds => HaltCode::InsufficientFunds,
            HaltReason::CreateContractSizeLimit | HaltReason::CreateContractStartingWithEF => {
                HaltCode::CreateContractSizeLimit
            }
            _ => {
                #[cfg(feature = "tracing")]
                tracing::warn!("unmapped halt reason: {reason:?}, defaulting to Unknown");

                HaltCode::Unknown
            }
        }
    }

    /// Whether this is a [`Exit::Halt`] — the one outcome that represents an
    /// EVM-semantic (as opposed to infrastructure) failure, carrying no
    /// return value.
    pub fn is_error(&self) -> bool {
        matches!(self, Exit::Halt(_))
    }

    /// The halt code, if this is a [`Exit::Halt`].
    pub fn get_halt_code(&self) -> Option<HaltCode> {
        match self {
            Exit::Halt(code) => Some(*code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use revm::context::result::{Output, SuccessReason as RevmSuccessReason};

    use super::*;

    fn success(reason: RevmSuccessReason, output: Output) -> ExecutionResult<HaltReason> {
        ExecutionResult::Success {
            reason,
            gas_used: 21_000,
            gas_refunded: 0,
            logs: vec![],
            output,
        }
    }

    #[test]
    fn stop_with_empty_output_is_stop() {
        let result = success(RevmSuccessReason::Stop, Output::Call(Bytes::new()));

        assert_eq!(
            Exit::from_execution_result(&result),
            Exit::Success(SuccessReason::Stop)
        );
    }

    #[test]
    fn stop_with_created_address_is_return() {
        let result = success(
            RevmSuccessReason::Stop,
            Output::Create(Bytes::new(), Some(edr_primitives::Address::ZERO)),
        );

        assert_eq!(
            Exit::from_execution_result(&result),
            Exit::Success(SuccessReason::Return)
        );
    }

    #[test]
    fn selfdestruct_reason_is_selfdestruct() {
        let result = success(RevmSuccessReason::SelfDestruct, Output::Call(Bytes::new()));

        assert_eq!(
            Exit::from_execution_result(&result),
            Exit::Success(SuccessReason::SelfDestruct)
        );
    }

    #[test]
    fn revert_carries_return_value() {
        let return_value = Bytes::from_static(b"nope");
        let result = ExecutionResult::Revert {
            gas_used: 30_000,
            output: return_value.clone(),
        };

        assert_eq!(
            Exit::from_execution_result(&result),
            Exit::Revert { return_value }
        );
    }

    #[test]
    fn out_of_gas_halt_is_error() {
        let result = ExecutionResult::Halt {
            reason: HaltReason::OutOfGas(OutOfGasError::Basic),
            gas_used: 30_000,
        };

        let exit = Exit::from_execution_result(&result);
        assert!(exit.is_error());
        assert_eq!(exit.get_halt_code(), Some(HaltCode::OutOfGas));
    }
}
