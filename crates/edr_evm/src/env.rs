//! Translates this crate's chain/block/transaction types into the `revm`
//! execution environment (`CfgEnv`/`BlockEnv`/`TxEnv`).
//!
//! Grounded on the teacher's own `CfgEnv` flag usage (`edr_provider::data`,
//! `foundry::evm::core::opts`) and `BlockEnv` construction
//! (`edr_evm::spec::BlockEnvConstructor`): both build these `revm` structs
//! via `..Default::default()` from a narrower set of fields, which is the
//! pattern this module follows.

use edr_chain::Hardfork;
use edr_eip2930::AccessListItem;
use edr_eth::block::{BlockContext, POST_MERGE_DIFFICULTY};
use edr_primitives::{Address, U256};
use edr_transaction::ExecutableTransaction;
use revm::context::{BlockEnv, CfgEnv, TxEnv};
use revm::context::transaction::AccessListItem as RevmAccessListItem;
use revm::primitives::hardfork::SpecId;
use revm_primitives::TxKind;

/// Maps this core's closed [`Hardfork`] enumeration onto `revm`'s `SpecId`.
pub fn spec_id(hardfork: Hardfork) -> SpecId {
    match hardfork {
        Hardfork::Frontier => SpecId::FRONTIER,
        Hardfork::Homestead => SpecId::HOMESTEAD,
        Hardfork::Tangerine => SpecId::TANGERINE,
        Hardfork::SpuriousDragon => SpecId::SPURIOUS_DRAGON,
        Hardfork::Byzantium => SpecId::BYZANTIUM,
        Hardfork::Constantinople => SpecId::CONSTANTINOPLE,
        Hardfork::Petersburg => SpecId::PETERSBURG,
        Hardfork::Istanbul => SpecId::ISTANBUL,
        Hardfork::Berlin => SpecId::BERLIN,
        Hardfork::London => SpecId::LONDON,
        Hardfork::ArrowGlacier => SpecId::ARROW_GLACIER,
        Hardfork::GrayGlacier => SpecId::GRAY_GLACIER,
        Hardfork::Merge => SpecId::MERGE,
        Hardfork::Shanghai => SpecId::SHANGHAI,
        Hardfork::Cancun => SpecId::CANCUN,
    }
}

/// Builds the `revm` configuration environment for a chain/hardfork pair.
///
/// `skip_validation` mirrors the teacher's `simulate.rs`/`foundry::fork::init`
/// guarantee relaxation: nonce, balance and block-gas-limit checks are
/// disabled, which `dryRun` always requests (spec.md §4.4).
pub fn build_cfg_env(
    chain_id: u64,
    hardfork: Hardfork,
    allow_unlimited_contract_size: bool,
    skip_validation: bool,
) -> CfgEnv {
    let mut cfg = CfgEnv::default();
    cfg.chain_id = chain_id;
    cfg.spec = spec_id(hardfork);
    cfg.limit_contract_code_size = if allow_unlimited_contract_size {
        Some(usize::MAX)
    } else {
        None
    };
    cfg.disable_eip3607 = true;

    if skip_validation {
        cfg.disable_nonce_check = true;
        cfg.disable_balance_check = true;
        cfg.disable_block_gas_limit = true;
    }

    cfg
}

/// Builds the `revm` block environment, applying the Merge's
/// difficulty/`prevRandao` field reinterpretation.
pub fn build_block_env(block: &BlockContext, hardfork: Hardfork) -> BlockEnv {
    let difficulty = if hardfork.is_post_merge() {
        POST_MERGE_DIFFICULTY
    } else {
        block.difficulty
    };

    BlockEnv {
        number: U256::from(block.number),
        beneficiary: block.beneficiary,
        timestamp: U256::from(block.timestamp),
        difficulty,
        basefee: block.base_fee.map_or(0u64, |base_fee| {
            u64::try_from(base_fee).unwrap_or(u64::MAX)
        }),
        gas_limit: block.gas_limit,
        prevrandao: block.prev_randao,
        blob_excess_gas_and_price: None,
    }
}

fn to_revm_access_list(items: &[AccessListItem]) -> Vec<RevmAccessListItem> {
    items
        .iter()
        .map(|item| RevmAccessListItem {
            address: item.address,
            storage_keys: item.storage_keys.clone(),
        })
        .collect()
}

/// Builds the `revm` transaction environment from any [`ExecutableTransaction`].
///
/// `caller_override` lets `dryRun`'s `forceBaseFeeZero` path (and any other
/// impersonation use) run as a sender other than the one recovered from the
/// transaction's own signature; `None` uses `transaction.caller()` as-is.
pub fn build_tx_env(
    transaction: &impl ExecutableTransaction,
    caller_override: Option<Address>,
) -> TxEnv {
    let kind = transaction.kind();

    TxEnv {
        caller: caller_override.unwrap_or(*transaction.caller()),
        gas_limit: transaction.gas_limit(),
        gas_price: *transaction.gas_price(),
        kind,
        value: *transaction.value(),
        data: transaction.data().clone(),
        nonce: transaction.nonce(),
        chain_id: transaction.chain_id(),
        access_list: transaction
            .access_list()
            .map(to_revm_access_list)
            .unwrap_or_default()
            .into(),
        gas_priority_fee: transaction.max_priority_fee_per_gas().copied(),
        ..TxEnv::default()
    }
}

/// Whether `kind` is a contract creation, for callers that need to
/// distinguish without matching on [`TxKind`] directly.
pub fn is_create(kind: TxKind) -> bool {
    matches!(kind, TxKind::Create)
}
