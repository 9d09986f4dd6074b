use std::sync::Arc;

/// Closed enumeration of the hardforks this core can execute against,
/// mirroring the subset of `revm`'s `SpecId` relevant to a plain L1 chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Hardfork {
    /// Frontier
    Frontier,
    /// Homestead
    Homestead,
    /// Tangerine Whistle (EIP-150)
    Tangerine,
    /// Spurious Dragon (EIP-155/160/161/170)
    SpuriousDragon,
    /// Byzantium
    Byzantium,
    /// Constantinople
    Constantinople,
    /// Petersburg
    Petersburg,
    /// Istanbul
    Istanbul,
    /// Berlin (EIP-2929/2930)
    Berlin,
    /// London (EIP-1559/3198/3529)
    London,
    /// Arrow Glacier
    ArrowGlacier,
    /// Gray Glacier
    GrayGlacier,
    /// The Merge (EIP-3675, PoW -> PoS)
    Merge,
    /// Shanghai (EIP-3855/3860/4895)
    Shanghai,
    /// Cancun (EIP-1153/4844/5656/6780)
    Cancun,
}

impl Hardfork {
    /// Whether `DIFFICULTY`/block header difficulty is replaced by
    /// `prevRandao` at this hardfork.
    pub fn is_post_merge(self) -> bool {
        self >= Self::Merge
    }

    /// Whether EIP-1559 (and therefore a base fee) is active at this
    /// hardfork.
    pub fn is_post_london(self) -> bool {
        self >= Self::London
    }

    /// Whether EIP-2930 access lists are valid transaction types at this
    /// hardfork.
    pub fn is_post_berlin(self) -> bool {
        self >= Self::Berlin
    }
}

/// Selects the active [`Hardfork`] for a given block number.
///
/// Modeled as a boxed closure (mirroring the teacher's hardfork-activation
/// lookup) rather than a sorted activation table, since spec.md treats the
/// activation schedule itself as the embedding application's concern; this
/// core only needs to ask "which hardfork applies here."
pub type HardforkSelector = Arc<dyn Fn(u64) -> Hardfork + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::Hardfork;

    #[test]
    fn ordering_matches_activation_order() {
        assert!(Hardfork::Frontier < Hardfork::Merge);
        assert!(Hardfork::Merge < Hardfork::Cancun);
    }

    #[test]
    fn post_merge_only_from_merge_onward() {
        assert!(!Hardfork::London.is_post_merge());
        assert!(Hardfork::Merge.is_post_merge());
        assert!(Hardfork::Shanghai.is_post_merge());
    }
}
