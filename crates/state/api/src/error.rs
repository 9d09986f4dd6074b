use edr_primitives::Hash;

/// Combinatorial error for the state API.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// No checkpoints to revert.
    #[error("No checkpoints to revert.")]
    CannotRevert,
    /// Contract with specified code hash does not exist.
    #[error("Contract with code hash `{0}` does not exist.")]
    InvalidCodeHash(Hash),
    /// `set_state_root`/`restore_context` was called with a root that was
    /// never committed.
    #[error("State root `{state_root:?}` does not exist (fork: {is_fork}).")]
    UnknownStateRoot {
        /// Requested state root
        state_root: Hash,
        /// Whether the state root was intended for a fork
        is_fork: bool,
    },
    /// The requested action is unsupported by this state store.
    #[error("The action `{action}` is unsupported. {}", details.as_ref().map_or("", String::as_str))]
    Unsupported {
        /// The unsupported action's name.
        action: String,
        /// Additional detail, if any.
        details: Option<String>,
    },
}
