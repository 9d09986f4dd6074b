use edr_primitives::{Address, Bytes, HashMap, Hash, U256};

use crate::hardfork::Hardfork;

/// A single genesis account: the pre-resolved balance/nonce/code/storage a
/// chain starts with. Genesis *loading* (reading a genesis JSON file, a
/// snapshot, ...) is out of scope; the adapter only consumes the resolved
/// map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenesisAccount {
    /// Starting balance
    pub balance: U256,
    /// Starting nonce
    pub nonce: u64,
    /// Starting bytecode, if any
    pub code: Option<Bytes>,
    /// Starting storage
    pub storage: HashMap<Hash, U256>,
}

/// What this core needs to know about a remote fork: not the URL (that's the
/// forking HTTP client's concern, out of scope) but the pinned block number
/// and network id spec.md §4.4 requires it to remember.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ForkConfig {
    /// Block number the fork is pinned at
    pub block_number: u64,
    /// Network id reported by the remote endpoint at fork time
    pub network_id: u64,
}

/// Configuration threaded into `VmAdapter::new`.
#[derive(Clone, Debug)]
pub struct ChainConfig {
    /// EIP-155 chain id
    pub chain_id: u64,
    /// Network id (may differ from `chain_id` on some networks)
    pub network_id: u64,
    /// Default hardfork used when no [`crate::HardforkSelector`] is
    /// supplied
    pub hardfork: Hardfork,
    /// Genesis account balances/code/storage
    pub genesis_accounts: HashMap<Address, GenesisAccount>,
    /// Whether to skip the EIP-170 24KB contract size limit
    pub allow_unlimited_contract_size: bool,
    /// Fork details, if this chain is forked from a remote network
    pub fork: Option<ForkConfig>,
}

impl ChainConfig {
    /// Returns an error if the configuration is internally inconsistent.
    ///
    /// Currently checks only that a [`ForkConfig`]'s pinned block is
    /// sensible; more checks belong here as the adapter grows them.
    pub fn validate(&self) -> Result<(), ChainConfigError> {
        if let Some(fork) = &self.fork {
            if fork.network_id == 0 {
                return Err(ChainConfigError::InvalidForkNetworkId);
            }
        }
        Ok(())
    }
}

/// Errors constructing or validating a [`ChainConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ChainConfigError {
    /// A [`ForkConfig`] was given a network id of zero.
    #[error("fork network id must be nonzero")]
    InvalidForkNetworkId,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> ChainConfig {
        ChainConfig {
            chain_id: 31337,
            network_id: 31337,
            hardfork: Hardfork::Cancun,
            genesis_accounts: HashMap::default(),
            allow_unlimited_contract_size: false,
            fork: None,
        }
    }

    #[test]
    fn validate_accepts_unforked_config() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_fork_network_id() {
        let mut config = base_config();
        config.fork = Some(ForkConfig {
            block_number: 100,
            network_id: 0,
        });

        assert!(matches!(
            config.validate(),
            Err(ChainConfigError::InvalidForkNetworkId)
        ));
    }
}
