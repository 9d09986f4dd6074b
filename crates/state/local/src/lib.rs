#![warn(missing_docs)]

//! An in-memory, `HashMap`-backed world-state store with a checkpoint stack,
//! used as the non-forked backend of the state journal.

use edr_eth::{account::AccountInfo, KECCAK_NULL_RLP};
use edr_primitives::{Address, Bytecode, Hash, HashMap, U256};
use edr_state_api::{
    state_root, storage_root, AccountModifierFn, AccountStorage, EvmTrieState, State,
    StateCommit, StateDebug, StateError, StateJournal,
};
use revm_state::Account;

#[derive(Clone, Debug, Default)]
struct Layer {
    accounts: EvmTrieState,
    account_infos: HashMap<Address, AccountInfo>,
    storage: HashMap<Address, AccountStorage>,
    code: HashMap<Hash, Bytecode>,
}

/// A `HashMap`-backed state store.
///
/// Committed state lives at the bottom of `checkpoints`; every
/// [`StateJournal::checkpoint`] pushes a clone of the current layer, and
/// [`StateJournal::revert`] pops back to the previous one. This trades
/// memory for simplicity, matching the dev-node scale this store targets
/// (no sharing of unmodified state between layers).
#[derive(Clone, Debug)]
pub struct LocalState {
    checkpoints: Vec<Layer>,
    /// State roots observed so far, so `set_state_root` can validate its
    /// argument and `make_snapshot` can hand out a stable reference.
    snapshots: HashMap<Hash, Layer>,
}

impl LocalState {
    /// Constructs an empty state store.
    pub fn new() -> Self {
        let genesis = Layer::default();
        let mut snapshots = HashMap::default();
        snapshots.insert(KECCAK_NULL_RLP, genesis.clone());

        Self {
            checkpoints: vec![genesis],
            snapshots,
        }
    }

    fn current(&self) -> &Layer {
        self.checkpoints
            .last()
            .expect("at least the genesis layer is always present")
    }

    fn current_mut(&mut self) -> &mut Layer {
        self.checkpoints
            .last_mut()
            .expect("at least the genesis layer is always present")
    }

    fn recompute_state_root(&mut self) -> Hash {
        let root = state_root(self.current().accounts.iter());
        self.snapshots.insert(root, self.current().clone());
        root
    }
}

impl Default for LocalState {
    fn default() -> Self {
        Self::new()
    }
}

impl State for LocalState {
    type Error = StateError;

    fn basic(&self, address: Address) -> Result<Option<AccountInfo>, Self::Error> {
        Ok(self.current().account_infos.get(&address).cloned())
    }

    fn code_by_hash(&self, code_hash: Hash) -> Result<Bytecode, Self::Error> {
        self.current()
            .code
            .get(&code_hash)
            .cloned()
            .ok_or(StateError::InvalidCodeHash(code_hash))
    }

    fn storage(&self, address: Address, index: U256) -> Result<U256, Self::Error> {
        Ok(self
            .current()
            .storage
            .get(&address)
            .and_then(|storage| storage.get(&index))
            .copied()
            .unwrap_or(U256::ZERO))
    }
}

impl StateCommit for LocalState {
    fn commit(&mut self, changes: HashMap<Address, Account>) {
        let layer = self.current_mut();

        for (address, account) in changes {
            if account.is_selfdestructed() {
                layer.accounts.remove(&address);
                layer.account_infos.remove(&address);
                layer.storage.remove(&address);
                continue;
            }

            if !account.is_touched() {
                continue;
            }

            if let Some(code) = account.info.code.clone() {
                layer.code.insert(account.info.code_hash, code);
            }

            let storage = layer.storage.entry(address).or_default();
            for (index, slot) in &account.storage {
                storage.insert(*index, slot.present_value);
            }

            let storage_root = storage_root(storage.iter());
            let basic_account = edr_eth::account::BasicAccount {
                nonce: account.info.nonce,
                balance: account.info.balance,
                storage_root,
                code_hash: account.info.code_hash,
            };

            layer.accounts.insert(address, basic_account);
            layer.account_infos.insert(
                address,
                AccountInfo {
                    balance: account.info.balance,
                    nonce: account.info.nonce,
                    code_hash: account.info.code_hash,
                },
            );
        }
    }
}

impl StateDebug for LocalState {
    type Error = StateError;

    fn account_storage_root(&self, address: &Address) -> Result<Option<Hash>, Self::Error> {
        Ok(self
            .current()
            .accounts
            .get(address)
            .map(|account| account.storage_root))
    }

    fn insert_account(
        &mut self,
        address: Address,
        account_info: AccountInfo,
    ) -> Result<(), Self::Error> {
        let layer = self.current_mut();
        let basic_account = edr_eth::account::BasicAccount::from(&account_info);

        layer.accounts.insert(address, basic_account);
        layer.account_infos.insert(address, account_info);

        Ok(())
    }

    fn modify_account(
        &mut self,
        address: Address,
        modifier: AccountModifierFn,
    ) -> Result<AccountInfo, Self::Error> {
        let layer = self.current_mut();
        let mut account = layer.account_infos.get(&address).cloned().unwrap_or(AccountInfo {
            balance: U256::ZERO,
            nonce: 0,
            code_hash: edr_primitives::KECCAK_EMPTY,
        });

        let mut code = None;
        (*modifier)(&mut account.balance, &mut account.nonce, &mut code);
        if let Some(code) = code {
            account.code_hash = code.hash_slow();
            layer.code.insert(account.code_hash, code);
        }

        layer.account_infos.insert(address, account.clone());
        let storage_root = layer
            .storage
            .get(&address)
            .map_or(KECCAK_NULL_RLP, |storage| storage_root(storage.iter()));
        layer.accounts.insert(
            address,
            edr_eth::account::BasicAccount {
                nonce: account.nonce,
                balance: account.balance,
                storage_root,
                code_hash: account.code_hash,
            },
        );

        Ok(account)
    }

    fn remove_account(&mut self, address: Address) -> Result<Option<AccountInfo>, Self::Error> {
        let layer = self.current_mut();
        layer.storage.remove(&address);
        layer.accounts.remove(&address);

        Ok(layer.account_infos.remove(&address))
    }

    fn serialize(&self) -> String {
        format!("{:#?}", self.current().account_infos)
    }

    fn set_account_storage_slot(
        &mut self,
        address: Address,
        index: U256,
        value: U256,
    ) -> Result<U256, Self::Error> {
        let layer = self.current_mut();
        let storage = layer.storage.entry(address).or_default();
        let old_value = storage.insert(index, value).unwrap_or(U256::ZERO);

        let storage_root = storage_root(storage.iter());
        if let Some(account) = layer.accounts.get_mut(&address) {
            account.storage_root = storage_root;
        }

        Ok(old_value)
    }

    fn state_root(&self) -> Result<Hash, Self::Error> {
        Ok(state_root(self.current().accounts.iter()))
    }
}

impl StateJournal for LocalState {
    type Error = StateError;

    fn checkpoint(&mut self) -> Result<(), Self::Error> {
        let layer = self.current().clone();
        self.checkpoints.push(layer);

        #[cfg(feature = "tracing")]
        tracing::debug!(depth = self.checkpoints.len(), "pushed state checkpoint");

        Ok(())
    }

    fn commit(&mut self) -> Result<(), Self::Error> {
        if self.checkpoints.len() < 2 {
            return Err(StateError::CannotRevert);
        }

        let top = self.checkpoints.pop().expect("checked length above");
        *self.current_mut() = top;

        Ok(())
    }

    fn revert(&mut self) -> Result<(), Self::Error> {
        if self.checkpoints.len() < 2 {
            return Err(StateError::CannotRevert);
        }

        self.checkpoints.pop();

        #[cfg(feature = "tracing")]
        tracing::debug!(depth = self.checkpoints.len(), "reverted state checkpoint");

        Ok(())
    }

    fn set_state_root(&mut self, state_root: Hash) -> Result<(), Self::Error> {
        let layer = self
            .snapshots
            .get(&state_root)
            .cloned()
            .ok_or(StateError::UnknownStateRoot {
                state_root,
                is_fork: false,
            })?;

        *self.current_mut() = layer;

        Ok(())
    }

    fn make_snapshot(&mut self) -> Hash {
        self.recompute_state_root()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkpoint_and_revert_restores_state_root() {
        let mut state = LocalState::new();
        let root_before = StateDebug::state_root(&state).unwrap();

        StateJournal::checkpoint(&mut state).unwrap();
        state
            .insert_account(Address::ZERO, AccountInfo {
                balance: U256::from(100u64),
                nonce: 1,
                code_hash: edr_primitives::KECCAK_EMPTY,
            })
            .unwrap();

        assert_ne!(StateDebug::state_root(&state).unwrap(), root_before);

        StateJournal::revert(&mut state).unwrap();
        assert_eq!(StateDebug::state_root(&state).unwrap(), root_before);
    }

    #[test]
    fn revert_without_checkpoint_fails() {
        let mut state = LocalState::new();
        assert!(matches!(
            StateJournal::revert(&mut state),
            Err(StateError::CannotRevert)
        ));
    }

    #[test]
    fn modify_account_creates_missing_account() {
        let mut state = LocalState::new();
        let address = Address::from([0x11; 20]);

        let account = state
            .modify_account(
                address,
                AccountModifierFn::new(Box::new(|balance, _nonce, _code| {
                    *balance += U256::from(42u64);
                })),
            )
            .unwrap();

        assert_eq!(account.balance, U256::from(42u64));
    }
}
