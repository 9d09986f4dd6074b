#![warn(missing_docs)]

//! Hardfork selection and chain configuration.
//!
//! Grounded on the teacher's `edr_chain_l1` crate: where the teacher
//! generalizes over a `ChainSpec` trait to support several chain families
//! (L1, OP, ...), this crate commits to the one concrete chain family this
//! core targets and keeps only its `Hardfork`/config shape.

mod config;
mod hardfork;

pub use self::{
    config::{ChainConfig, ChainConfigError, ForkConfig, GenesisAccount},
    hardfork::{Hardfork, HardforkSelector},
};
