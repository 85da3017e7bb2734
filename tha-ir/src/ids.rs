//! Dense newtype ids for every numeric space in the symbolic model: mode
//! ids, per-mode spatial/input symbols, per-mode clock indices, global
//! input ids, dense augmented-state ids, and hybrid automaton transition
//! ids. Keeping them distinct types, rather than bare `usize`, makes it a
//! compile error to e.g. index a clock with a state symbol.
use tha_idx::impl_index;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModeId(u32);
impl_index!(ModeId);

/// A symbol indexing a cell of a mode's state-space grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateSym(u32);
impl_index!(StateSym);

/// A symbol indexing a cell of a mode's input-space grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InputSym(u32);
impl_index!(InputSym);

/// An index into a mode's `tsteps` clock grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeIdx(u32);
impl_index!(TimeIdx);

/// A single contiguous numbering unifying per-mode continuous inputs and
/// hybrid-automaton switching transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GlobalInput(u32);
impl_index!(GlobalInput);

/// Dense id of an augmented state `(q, t, k)` in the assembled automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AugStateId(u32);
impl_index!(AugStateId);

/// Id of a transition in the caller's hybrid automaton (the index into
/// `HybridSystem::transitions()`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransitionId(u32);
impl_index!(TransitionId);
