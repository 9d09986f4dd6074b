//! Exercises the in-block checkpoint lifecycle, `dryRun`'s
//! snapshot-and-restore policy and the native/interpreted backends'
//! cross-backend agreement, against a real [`LocalState`] store.

use std::sync::Arc;

use edr_chain::{ChainConfig, ForkConfig, Hardfork, HardforkSelector};
use edr_eth::account::AccountInfo;
use edr_eth::block::BlockContext;
use edr_eth::Hash;
use edr_evm::{ConfigurationError, InterpretedAdapter, InvalidBlockLifecycle, NativeAdapter, VmAdapter, VmAdapterError};
use edr_primitives::{Address, HashMap, U256};
use edr_state_api::StateDebug;
use edr_state_local::LocalState;
use edr_test_utils::genesis::{default_secret_keys, one_ether};
use edr_test_utils::secret_key::secret_key_to_address;
use edr_test_utils::transaction::signed_dummy_transaction;

fn hardfork_selector(hardfork: Hardfork) -> HardforkSelector {
    Arc::new(move |_block_number: u64| hardfork)
}

fn chain_config(hardfork: Hardfork, fork: Option<ForkConfig>) -> ChainConfig {
    ChainConfig {
        chain_id: 31337,
        network_id: 31337,
        hardfork,
        genesis_accounts: HashMap::default(),
        allow_unlimited_contract_size: false,
        fork,
    }
}

#[derive(Clone)]
struct NullBlockchain;

impl edr_blockchain_api::BlockHashByNumber for NullBlockchain {
    type Error = std::convert::Infallible;

    fn block_hash_by_number(&self, _block_number: u64) -> Result<Hash, Self::Error> {
        Ok(Hash::ZERO)
    }
}

fn funded_state() -> (LocalState, Address) {
    let mut state = LocalState::new();
    let sender = secret_key_to_address(
        "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
    )
    .expect("well-known test key parses");

    state
        .insert_account(
            sender,
            AccountInfo {
                balance: one_ether(),
                nonce: 0,
                code_hash: edr_primitives::KECCAK_EMPTY,
            },
        )
        .expect("insert funded account");

    (state, sender)
}

fn block(number: u64, base_fee: Option<u128>) -> BlockContext {
    BlockContext {
        number,
        timestamp: 1_700_000_000,
        beneficiary: Address::ZERO,
        gas_limit: 30_000_000,
        base_fee,
        difficulty: U256::from(1),
        prev_randao: None,
    }
}

#[test]
fn run_tx_in_block_commits_and_seal_block_persists_it() {
    let (state, _sender) = funded_state();
    let mut adapter = NativeAdapter::new(
        chain_config(Hardfork::London, None),
        hardfork_selector(Hardfork::London),
        NullBlockchain,
        state,
    )
    .expect("unforked config is accepted");

    let tx = signed_dummy_transaction(&default_secret_keys()[0], 0, Some(31337))
        .expect("signs with the funded key");

    adapter.start_block().expect("no checkpoint open yet");
    let result = adapter
        .run_tx_in_block(&tx, &block(1, Some(1_000_000_000)))
        .expect("funded transfer executes");
    assert!(!result.exit.is_error());
    adapter.seal_block().expect("checkpoint is open");

    assert!(adapter.get_last_trace().is_some());
}

#[test]
fn run_tx_in_block_without_start_block_fails() {
    let (state, _sender) = funded_state();
    let mut adapter = NativeAdapter::new(
        chain_config(Hardfork::London, None),
        hardfork_selector(Hardfork::London),
        NullBlockchain,
        state,
    )
    .unwrap();

    let tx = signed_dummy_transaction(&default_secret_keys()[0], 0, Some(31337)).unwrap();

    let error = adapter
        .run_tx_in_block(&tx, &block(1, Some(1_000_000_000)))
        .unwrap_err();

    assert!(matches!(
        error,
        VmAdapterError::InvalidBlockLifecycle(InvalidBlockLifecycle::NoneOpen)
    ));
}

#[test]
fn start_block_twice_fails() {
    let (state, _sender) = funded_state();
    let mut adapter = NativeAdapter::new(
        chain_config(Hardfork::London, None),
        hardfork_selector(Hardfork::London),
        NullBlockchain,
        state,
    )
    .unwrap();

    adapter.start_block().unwrap();
    let error = adapter.start_block().unwrap_err();

    assert!(matches!(
        error,
        VmAdapterError::InvalidBlockLifecycle(InvalidBlockLifecycle::AlreadyOpen)
    ));
}

#[test]
fn revert_block_discards_writes() {
    let (state, _sender) = funded_state();
    let mut adapter = NativeAdapter::new(
        chain_config(Hardfork::London, None),
        hardfork_selector(Hardfork::London),
        NullBlockchain,
        state,
    )
    .unwrap();

    let tx = signed_dummy_transaction(&default_secret_keys()[0], 0, Some(31337)).unwrap();

    adapter.start_block().unwrap();
    adapter
        .run_tx_in_block(&tx, &block(1, Some(1_000_000_000)))
        .unwrap();
    adapter.revert_block().unwrap();

    // A fresh block can be opened again; the reverted writes didn't leave
    // the checkpoint stack unbalanced.
    adapter.start_block().unwrap();
    adapter.seal_block().unwrap();
}

#[test]
fn dry_run_does_not_mutate_committed_state() {
    let (state, _sender) = funded_state();
    let mut adapter = NativeAdapter::new(
        chain_config(Hardfork::London, None),
        hardfork_selector(Hardfork::London),
        NullBlockchain,
        state,
    )
    .unwrap();

    let tx = signed_dummy_transaction(&default_secret_keys()[0], 0, Some(31337)).unwrap();

    adapter
        .dry_run(&tx, &block(1, Some(1_000_000_000)), false)
        .expect("dry run executes");

    // If the dry run had leaked its nonce increment into committed state,
    // replaying the same nonce-0 transaction for real would be rejected as
    // a stale nonce.
    adapter.start_block().unwrap();
    let result = adapter
        .run_tx_in_block(&tx, &block(1, Some(1_000_000_000)))
        .expect("the dry run left committed state untouched");
    assert!(!result.exit.is_error());
    adapter.seal_block().unwrap();
}

#[test]
fn native_adapter_rejects_forked_config() {
    let (state, _sender) = funded_state();
    let error = NativeAdapter::new(
        chain_config(
            Hardfork::London,
            Some(ForkConfig {
                block_number: 100,
                network_id: 1,
            }),
        ),
        hardfork_selector(Hardfork::London),
        NullBlockchain,
        state,
    )
    .unwrap_err();

    assert!(matches!(error, ConfigurationError::ForkingUnsupported));
}

#[test]
fn interpreted_adapter_accepts_forked_config() {
    let (state, _sender) = funded_state();
    InterpretedAdapter::new(
        chain_config(
            Hardfork::London,
            Some(ForkConfig {
                block_number: 100,
                network_id: 1,
            }),
        ),
        hardfork_selector(Hardfork::London),
        NullBlockchain,
        state,
    )
    .expect("the interpreted backend supports forked configurations");
}

#[test]
fn post_merge_block_without_prev_randao_is_rejected() {
    let (state, _sender) = funded_state();
    let mut adapter = NativeAdapter::new(
        chain_config(Hardfork::Merge, None),
        hardfork_selector(Hardfork::Merge),
        NullBlockchain,
        state,
    )
    .unwrap();

    let tx = signed_dummy_transaction(&default_secret_keys()[0], 0, Some(31337)).unwrap();

    let error = adapter
        .dry_run(&tx, &block(15_537_394, Some(1_000_000_000)), false)
        .unwrap_err();

    assert!(matches!(
        error,
        VmAdapterError::Configuration(ConfigurationError::MixHashRequired)
    ));
}

#[test]
fn interpreted_adapter_populates_a_trace() {
    let (state, _sender) = funded_state();
    let mut adapter = InterpretedAdapter::new(
        chain_config(Hardfork::London, None),
        hardfork_selector(Hardfork::London),
        NullBlockchain,
        state,
    )
    .unwrap();

    let tx = signed_dummy_transaction(&default_secret_keys()[0], 0, Some(31337)).unwrap();

    adapter.start_block().unwrap();
    adapter
        .run_tx_in_block(&tx, &block(1, Some(1_000_000_000)))
        .expect("funded transfer executes");
    adapter.seal_block().unwrap();

    let trace = adapter.get_last_trace().expect("a trace was recorded");
    assert_eq!(trace.message.depth, 0);
    assert!(trace.result.is_some());
}
