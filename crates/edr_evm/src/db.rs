//! Bridges this crate's [`State`]/[`StateCommit`] traits to `revm`'s
//! `Database` trait.
//!
//! Grounded on the teacher's `state::DatabaseComponents`: a `revm` database
//! is really two collaborators glued together, a read-only blockchain (for
//! `BLOCKHASH`) and a mutable state store. This module keeps that split and
//! drops the teacher's chain-spec-generic error plumbing in favor of the
//! concrete [`edr_state_api::StateError`]-shaped errors this core uses.

use std::fmt;

use edr_blockchain_api::BlockHashByNumber;
use edr_primitives::{Address, Bytecode, Hash, U256};
use edr_state_api::{State, StateCommit};
use revm::database_interface::DatabaseRef;
use revm_state::AccountInfo as RevmAccountInfo;

/// Glues a blockchain collaborator (for `BLOCKHASH`) and a state store
/// (for everything else) into a single `revm` database.
pub struct DatabaseComponents<BlockchainT, StateT> {
    /// The blockchain collaborator.
    pub blockchain: BlockchainT,
    /// The state store.
    pub state: StateT,
}

/// Either half of a [`DatabaseComponents`] failed.
#[derive(Debug)]
pub enum DatabaseComponentError<BlockchainErrorT, StateErrorT> {
    /// The blockchain collaborator failed.
    Blockchain(BlockchainErrorT),
    /// The state store failed.
    State(StateErrorT),
}

impl<BlockchainErrorT, StateErrorT> fmt::Display
    for DatabaseComponentError<BlockchainErrorT, StateErrorT>
where
    BlockchainErrorT: fmt::Display,
    StateErrorT: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blockchain(error) => write!(f, "blockchain error: {error}"),
            Self::State(error) => write!(f, "state error: {error}"),
        }
    }
}

impl<BlockchainErrorT, StateErrorT> std::error::Error
    for DatabaseComponentError<BlockchainErrorT, StateErrorT>
where
    BlockchainErrorT: fmt::Debug + fmt::Display,
    StateErrorT: fmt::Debug + fmt::Display,
{
}

impl<BlockchainT: BlockHashByNumber, StateT: State> DatabaseRef
    for DatabaseComponents<BlockchainT, StateT>
{
    type Error = DatabaseComponentError<BlockchainT::Error, StateT::Error>;

    fn basic_ref(&self, address: Address) -> Result<Option<RevmAccountInfo>, Self::Error> {
        self.state
            .basic(address)
            .map(|account| {
                account.map(|account| RevmAccountInfo {
                    balance: account.balance,
                    nonce: account.nonce,
                    code_hash: account.code_hash,
                    code: None,
                })
            })
            .map_err(DatabaseComponentError::State)
    }

    fn code_by_hash_ref(&self, code_hash: Hash) -> Result<Bytecode, Self::Error> {
        self.state
            .code_by_hash(code_hash)
            .map_err(DatabaseComponentError::State)
    }

    fn storage_ref(&self, address: Address, index: U256) -> Result<U256, Self::Error> {
        self.state
            .storage(address, index)
            .map_err(DatabaseComponentError::State)
    }

    fn block_hash_ref(&self, number: u64) -> Result<Hash, Self::Error> {
        self.blockchain
            .block_hash_by_number(number)
            .map_err(DatabaseComponentError::Blockchain)
    }
}

impl<BlockchainT, StateT: StateCommit> StateCommit for DatabaseComponents<BlockchainT, StateT> {
    fn commit(&mut self, changes: edr_primitives::HashMap<Address, revm_state::Account>) {
        self.state.commit(changes);
    }
}
