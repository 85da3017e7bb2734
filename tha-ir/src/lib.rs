//! Symbolic abstraction builder for timed hybrid automata.
//!
//! Given a hybrid automaton expressed through [`HybridSystem`] and a
//! collaborating [`ReachabilityAbstractor`] that over-approximates each
//! mode's one-step reachable sets on a finite grid, [`builder`] assembles a
//! single finite-state, finite-input symbolic [`Automaton`] over the
//! product of spatial cells, clock indices, and mode -- the structure a
//! downstream symbolic controller synthesizer consumes.
//!
//! The crate is a pure, synchronous, offline builder: it does not perform
//! reachability analysis itself (that is [`ReachabilityAbstractor`]'s job),
//! does not parse or load hybrid automata from files, and does not persist
//! or serialize the assembled model -- all non-goals of the design.
mod automaton;
mod builder;
mod clock;
mod dynamics;
mod guard;
mod hybrid_system;
mod ids;
mod input_map;
mod transitions;

pub use automaton::Automaton;
pub use builder::build_timed_hybrid_automaton;
pub use clock::ClockModel;
pub use dynamics::{GridSpace, GrowthBound, ModeParams, ReachabilityAbstractor, SymDyn};
pub use guard::{BoundingBox, GuardShape};
pub use hybrid_system::{HybridSystem, HybridTransition, ResetMap};
pub use ids::{
    AugStateId, GlobalInput, InputSym, ModeId, StateSym, TimeIdx, TransitionId,
};
pub use input_map::{GlobalInputMap, InputClass};
pub use transitions::{
    build_intra_mode_transitions, build_switching_transitions, AugmentedState, TransitionTriple,
};

pub use tha_utils::{AccessError, BuildError, BuildResult};
