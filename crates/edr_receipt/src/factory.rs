use edr_chain::Hardfork;
use edr_eth::log::{logs_to_bloom, Log};

use crate::Execution;

/// Builds an [`Execution`] receipt from the outcome of a transaction,
/// choosing the pre- or post-EIP-658 encoding based on the active hardfork.
///
/// Grounded on the teacher's `edr_receipt::factory`: a receipt's shape
/// depends on the hardfork at execution time, not on any property of the
/// transaction itself, so the factory takes the hardfork explicitly rather
/// than trying to infer it from the receipt's logs.
#[derive(Clone, Copy, Debug)]
pub struct ReceiptFactory;

impl ReceiptFactory {
    /// Builds a receipt for a transaction executed at `hardfork`.
    ///
    /// `state_root` is only consulted pre-EIP-658 (Byzantium); it must be
    /// `Some` for any hardfork before [`Hardfork::Byzantium`].
    pub fn build(
        hardfork: Hardfork,
        success: bool,
        cumulative_gas_used: u64,
        logs: Vec<Log>,
        state_root: Option<edr_primitives::Hash>,
    ) -> Execution<Log> {
        let logs_bloom = logs_to_bloom(&logs);

        if hardfork >= Hardfork::Byzantium {
            Execution::Eip658(crate::execution::Eip658 {
                status: success,
                cumulative_gas_used,
                logs_bloom,
                logs,
            })
        } else {
            Execution::Legacy(crate::execution::Legacy {
                root: state_root.expect("pre-Byzantium receipts require a state root"),
                cumulative_gas_used,
                logs_bloom,
                logs,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use edr_primitives::Address;

    use super::*;
    use crate::{ExecutionReceipt, RootOrStatus};

    #[test]
    fn byzantium_onward_uses_status_code() {
        let receipt = ReceiptFactory::build(Hardfork::Byzantium, true, 21_000, vec![], None);

        assert!(matches!(receipt.root_or_status(), RootOrStatus::Status(true)));
        assert_eq!(receipt.cumulative_gas_used(), 21_000);
    }

    #[test]
    fn pre_byzantium_uses_state_root() {
        let root = edr_primitives::Hash::from([1u8; 32]);
        let receipt = ReceiptFactory::build(Hardfork::Homestead, true, 21_000, vec![], Some(root));

        assert!(matches!(receipt.root_or_status(), RootOrStatus::Root(r) if *r == root));
    }

    #[test]
    fn bloom_reflects_logs() {
        let log = Log {
            address: Address::ZERO,
            topics: vec![],
            data: Default::default(),
        };
        let receipt = ReceiptFactory::build(Hardfork::Cancun, true, 0, vec![log], None);

        assert_ne!(*receipt.logs_bloom(), edr_eth::Bloom::default());
    }
}
