//! Errors produced while assembling a timed hybrid automaton.

/// Convenience wrapper for the result of the top-level build.
pub type BuildResult<T> = std::result::Result<T, BuildError>;

/// Fatal errors that abort `build_timed_hybrid_automaton` before it
/// produces a model. The model is never returned in a partially
/// inconsistent state -- the build either fully succeeds or fails with one
/// of these -- construction failures abort the entire build.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    /// A transition's guard is not an axis-aligned box over (state, clock).
    #[error(
        "transition {transition_id} has a guard that is not an axis-aligned box"
    )]
    UnsupportedGuardShape { transition_id: usize },
}

/// Errors returned by read-only accessors on an already-built model. These
/// never mutate the model and never abort a build in progress.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum AccessError {
    /// `global_id_of_continuous`/`global_id_of_switching` style lookups are
    /// encoded as a `0` sentinel, not this error; this variant is for calls
    /// that take a global input id as an *argument* outside both ranges, or
    /// whose classification does not match the mode the call was made
    /// against.
    #[error("input id {input_id} is not a valid input id for the requested mode")]
    InvalidInputId { input_id: usize },

    /// `abstract_state` was called with an `(x, tau, mode)` triple that does
    /// not correspond to any augmented state actually present in the model.
    #[error(
        "augmented state (mode {mode_id}, spatial symbol {spatial}, time index {time}) is not present in the model"
    )]
    UnknownAugmentedState {
        mode_id: usize,
        spatial: usize,
        time: usize,
    },
}
