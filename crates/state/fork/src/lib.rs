#![warn(missing_docs)]

//! A world-state store that proxies reads to a remote fork node, layering a
//! local, mutable [`LocalState`] on top.

use std::sync::Arc;

use edr_eth::account::AccountInfo;
use edr_primitives::{Address, Bytecode, Hash, HashMap, HashSet, U256};
use edr_rpc_client::{ForkCollaborator, ForkError};
use edr_state_api::{AccountModifierFn, State, StateCommit, StateDebug, StateError, StateJournal};
use edr_state_local::LocalState;
use parking_lot::Mutex;
use revm_state::Account;

/// Caches reads against the fork collaborator, so repeated queries for the
/// same account/slot/code at the pinned fork block don't re-hit the remote
/// node.
#[derive(Default)]
struct RemoteCache {
    accounts: HashMap<Address, Option<AccountInfo>>,
    code: HashMap<Hash, Bytecode>,
    storage: HashMap<(Address, U256), U256>,
}

/// A database integrating the state from a remote node, pinned at
/// `fork_block_number`, with a local, writable overlay.
///
/// A value is only fetched remotely once: `removed_storage_slots` and
/// `removed_remote_accounts` tombstone slots/accounts that were zeroed or
/// removed locally, so they are never re-fetched from the fork even though
/// the local layer also reports a zero/missing value for them.
pub struct ForkedState {
    local: LocalState,
    collaborator: Arc<dyn ForkCollaborator + Send + Sync>,
    fork_block_number: u64,
    cache: Mutex<RemoteCache>,
    removed_storage_slots: HashSet<(Address, U256)>,
    removed_remote_accounts: HashSet<Address>,
}

impl ForkedState {
    /// Constructs a new instance, backed by `collaborator` pinned at
    /// `fork_block_number`.
    pub fn new(
        collaborator: Arc<dyn ForkCollaborator + Send + Sync>,
        fork_block_number: u64,
    ) -> Self {
        Self {
            local: LocalState::new(),
            collaborator,
            fork_block_number,
            cache: Mutex::new(RemoteCache::default()),
            removed_storage_slots: HashSet::default(),
            removed_remote_accounts: HashSet::default(),
        }
    }

    fn remote_basic(&self, address: Address) -> Result<Option<AccountInfo>, StateError> {
        if let Some(cached) = self.cache.lock().accounts.get(&address) {
            return Ok(cached.clone());
        }

        let balance = self
            .collaborator
            .balance(address, self.fork_block_number)
            .map_err(remote_error)?;
        let nonce = self
            .collaborator
            .transaction_count(address, self.fork_block_number)
            .map_err(remote_error)?;
        let code = self
            .collaborator
            .code(address, self.fork_block_number)
            .map_err(remote_error)?;

        let info = if balance.is_zero() && nonce == 0 && code.is_empty() {
            None
        } else {
            let code_hash = code.hash_slow();
            self.cache.lock().code.insert(code_hash, code);

            Some(AccountInfo {
                balance,
                nonce,
                code_hash,
            })
        };

        self.cache.lock().accounts.insert(address, info.clone());

        Ok(info)
    }
}

fn remote_error(error: ForkError) -> StateError {
    StateError::Unsupported {
        action: "fork read".to_string(),
        details: Some(error.to_string()),
    }
}

impl State for ForkedState {
    type Error = StateError;

    fn basic(&self, address: Address) -> Result<Option<AccountInfo>, Self::Error> {
        if let Some(local) = self.local.basic(address)? {
            return Ok(Some(local));
        }

        if self.removed_remote_accounts.contains(&address) {
            return Ok(None);
        }

        self.remote_basic(address)
    }

    fn code_by_hash(&self, code_hash: Hash) -> Result<Bytecode, Self::Error> {
        if let Ok(code) = self.local.code_by_hash(code_hash) {
            return Ok(code);
        }

        self.cache
            .lock()
            .code
            .get(&code_hash)
            .cloned()
            .ok_or(StateError::InvalidCodeHash(code_hash))
    }

    fn storage(&self, address: Address, index: U256) -> Result<U256, Self::Error> {
        let local = self.local.storage(address, index)?;
        if local != U256::ZERO || self.removed_storage_slots.contains(&(address, index)) {
            return Ok(local);
        }

        if let Some(value) = self.cache.lock().storage.get(&(address, index)) {
            return Ok(*value);
        }

        let value = self
            .collaborator
            .storage_at(address, index, self.fork_block_number)
            .map_err(remote_error)?;
        self.cache.lock().storage.insert((address, index), value);

        Ok(value)
    }
}

impl StateCommit for ForkedState {
    fn commit(&mut self, changes: HashMap<Address, Account>) {
        for (address, account) in &changes {
            for (index, slot) in &account.storage {
                if slot.present_value == U256::ZERO {
                    self.removed_storage_slots.insert((*address, *index));
                }
            }

            if account.is_selfdestructed() {
                self.removed_remote_accounts.insert(*address);
            }
        }

        self.local.commit(changes);
    }
}

impl StateDebug for ForkedState {
    type Error = StateError;

    fn account_storage_root(&self, _address: &Address) -> Result<Option<Hash>, Self::Error> {
        // Matching the node under test, storage roots of forked accounts are not
        // reconstructed; callers needing one should use `state_root` instead.
        Ok(Some(edr_primitives::KECCAK_NULL_RLP))
    }

    fn insert_account(
        &mut self,
        address: Address,
        account_info: AccountInfo,
    ) -> Result<(), Self::Error> {
        self.local.insert_account(address, account_info)
    }

    fn modify_account(
        &mut self,
        address: Address,
        modifier: AccountModifierFn,
    ) -> Result<AccountInfo, Self::Error> {
        if self.local.basic(address)?.is_none() {
            if let Some(remote) = self.remote_basic(address)? {
                self.local.insert_account(address, remote)?;
            }
        }

        self.local.modify_account(address, modifier)
    }

    fn remove_account(&mut self, address: Address) -> Result<Option<AccountInfo>, Self::Error> {
        if let Some(account) = self.local.remove_account(address)? {
            return Ok(Some(account));
        }

        if self.removed_remote_accounts.contains(&address) {
            return Ok(None);
        }

        if let Some(account) = self.remote_basic(address)? {
            self.removed_remote_accounts.insert(address);
            return Ok(Some(account));
        }

        Ok(None)
    }

    fn serialize(&self) -> String {
        self.local.serialize()
    }

    fn set_account_storage_slot(
        &mut self,
        address: Address,
        index: U256,
        value: U256,
    ) -> Result<U256, Self::Error> {
        if value == U256::ZERO {
            self.removed_storage_slots.insert((address, index));
        }

        self.local.set_account_storage_slot(address, index, value)
    }

    fn state_root(&self) -> Result<Hash, Self::Error> {
        self.local.state_root()
    }
}

impl StateJournal for ForkedState {
    type Error = StateError;

    fn checkpoint(&mut self) -> Result<(), Self::Error> {
        self.local.checkpoint()
    }

    fn commit(&mut self) -> Result<(), Self::Error> {
        StateJournal::commit(&mut self.local)
    }

    fn revert(&mut self) -> Result<(), Self::Error> {
        self.local.revert()
    }

    fn set_state_root(&mut self, state_root: Hash) -> Result<(), Self::Error> {
        self.local.set_state_root(state_root)
    }

    fn make_snapshot(&mut self) -> Hash {
        self.local.make_snapshot()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap as StdHashMap;

    use parking_lot::Mutex as StdMutex;

    use super::*;

    #[derive(Default)]
    struct FakeCollaborator {
        balances: StdMutex<StdHashMap<Address, U256>>,
        nonces: StdMutex<StdHashMap<Address, u64>>,
    }

    impl ForkCollaborator for FakeCollaborator {
        fn network_id(&self) -> Result<u64, ForkError> {
            Ok(1)
        }

        fn balance(&self, address: Address, _block_number: u64) -> Result<U256, ForkError> {
            Ok(self
                .balances
                .lock()
                .get(&address)
                .copied()
                .unwrap_or(U256::ZERO))
        }

        fn code(&self, _address: Address, _block_number: u64) -> Result<Bytecode, ForkError> {
            Ok(Bytecode::new())
        }

        fn storage_at(
            &self,
            _address: Address,
            _index: U256,
            _block_number: u64,
        ) -> Result<U256, ForkError> {
            Ok(U256::ZERO)
        }

        fn transaction_count(&self, address: Address, _block_number: u64) -> Result<u64, ForkError> {
            Ok(self.nonces.lock().get(&address).copied().unwrap_or(0))
        }

        fn block_hash(&self, _block_number: u64) -> Result<Hash, ForkError> {
            Ok(Hash::ZERO)
        }
    }

    fn forked_state() -> (ForkedState, Arc<FakeCollaborator>) {
        let collaborator = Arc::new(FakeCollaborator::default());
        let state = ForkedState::new(collaborator.clone(), 42);
        (state, collaborator)
    }

    #[test]
    fn remote_balance_is_visible_through_basic() {
        let (state, collaborator) = forked_state();
        let address = Address::from([0x22; 20]);
        collaborator
            .balances
            .lock()
            .insert(address, U256::from(100u64));

        let account = state.basic(address).unwrap().expect("remote account");
        assert_eq!(account.balance, U256::from(100u64));
    }

    #[test]
    fn removed_remote_account_is_tombstoned() {
        let (mut state, collaborator) = forked_state();
        let address = Address::from([0x33; 20]);
        collaborator
            .balances
            .lock()
            .insert(address, U256::from(100u64));

        assert!(state.remove_account(address).unwrap().is_some());
        assert_eq!(state.basic(address).unwrap(), None);
    }

    #[test]
    fn local_write_shadows_remote_read() {
        let (mut state, collaborator) = forked_state();
        let address = Address::from([0x44; 20]);
        collaborator
            .balances
            .lock()
            .insert(address, U256::from(100u64));

        state
            .insert_account(
                address,
                AccountInfo {
                    balance: U256::from(5u64),
                    nonce: 0,
                    code_hash: edr_primitives::KECCAK_EMPTY,
                },
            )
            .unwrap();

        let account = state.basic(address).unwrap().expect("local account");
        assert_eq!(account.balance, U256::from(5u64));
    }

    #[test]
    fn journal_delegates_to_local_layer() {
        let (mut state, _collaborator) = forked_state();
        let root_before = state.state_root().unwrap();

        StateJournal::checkpoint(&mut state).unwrap();
        state
            .insert_account(
                Address::from([0x55; 20]),
                AccountInfo {
                    balance: U256::from(1u64),
                    nonce: 0,
                    code_hash: edr_primitives::KECCAK_EMPTY,
                },
            )
            .unwrap();

        assert_ne!(state.state_root().unwrap(), root_before);

        state.revert().unwrap();
        assert_eq!(state.state_root().unwrap(), root_before);
    }
}
