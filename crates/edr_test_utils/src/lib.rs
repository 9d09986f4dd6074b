//! Deterministic fixtures shared by this workspace's test suites: secret
//! keys, genesis accounts and transaction builders.

/// Genesis account fixtures for a funded test chain.
pub mod genesis;
/// Deterministic secret keys for test accounts.
pub mod secret_key;
/// Transaction builders for test transactions.
pub mod transaction;
