//! Genesis account fixtures for a funded test chain.

use edr_eth::account::AccountInfo;
use edr_primitives::{Address, HashMap, U256, KECCAK_EMPTY};
use edr_signer::{public_key_to_address, SecretKey};

use crate::secret_key::secret_key_from_str;

/// A well-known test secret key, matching the first account a local dev
/// chain hands out.
pub const TEST_SECRET_KEY: &str =
    "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// A second well-known test secret key, distinct from [`TEST_SECRET_KEY`].
pub const TEST_SECRET_KEY_SIGN_TYPED_DATA_V4: &str =
    "c85ef7d79691fe79573b1a7064c19c1a9819ebdbd1faaab1a8ec92344438aaf4";

/// One ether, in wei.
pub fn one_ether() -> U256 {
    U256::from(10).pow(U256::from(18))
}

/// The default test accounts: [`TEST_SECRET_KEY`] and
/// [`TEST_SECRET_KEY_SIGN_TYPED_DATA_V4`].
pub fn default_secret_keys() -> Vec<SecretKey> {
    vec![
        secret_key_from_str(TEST_SECRET_KEY).expect("should construct secret key from string"),
        secret_key_from_str(TEST_SECRET_KEY_SIGN_TYPED_DATA_V4)
            .expect("should construct secret key from string"),
    ]
}

/// Builds a genesis state funding every address recovered from
/// `secret_keys` with `balance`.
pub fn funded_genesis_accounts(
    secret_keys: &[SecretKey],
    balance: U256,
) -> HashMap<Address, AccountInfo> {
    secret_keys
        .iter()
        .map(|secret_key| {
            let address = public_key_to_address(secret_key.public_key());
            let account = AccountInfo {
                balance,
                nonce: 0,
                code_hash: KECCAK_EMPTY,
            };

            (address, account)
        })
        .collect()
}

/// The default genesis state: [`default_secret_keys`] each funded with
/// [`one_ether`].
pub fn default_genesis_accounts() -> HashMap<Address, AccountInfo> {
    funded_genesis_accounts(&default_secret_keys(), one_ether())
}
