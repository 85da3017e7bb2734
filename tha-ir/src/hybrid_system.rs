//! The input contract: a hybrid-system handle the core reads from,
//! but never constructs or parses -- loading a problem from a file is an
//! explicit non-goal.
use crate::guard::GuardShape;
use crate::ids::{ModeId, TransitionId};

/// Relocates the augmented state `(x, τ)` at the moment of a mode switch.
/// Applied to a vector of the source mode's augmented dimension; must
/// return a vector of the target mode's augmented dimension (last entry is
/// the new clock value).
pub trait ResetMap {
    fn apply(&self, augmented: &[f64]) -> Vec<f64>;
}

/// One discrete transition of the caller's hybrid automaton.
pub struct HybridTransition {
    pub id: TransitionId,
    pub source: ModeId,
    pub target: ModeId,
    pub guard: Box<dyn GuardShape>,
    pub reset: Box<dyn ResetMap>,
}

/// The hybrid automaton the builder consumes. `System` is the opaque
/// continuous-dynamics handle the caller's reachability abstractor
/// understands; the core never inspects it.
pub trait HybridSystem {
    type System;

    fn n_modes(&self) -> usize;
    fn mode_system(&self, mode: ModeId) -> &Self::System;
    /// The clock horizon for `mode`; ignored when the mode's time step is
    /// `0` (frozen clock).
    fn clock_horizon(&self, mode: ModeId) -> f64;
    fn transitions(&self) -> &[HybridTransition];
}
