//! Grid abstraction interface and the per-mode dynamics abstractor that
//! wraps it.
use tha_idx::IndexRef;

use crate::guard::BoundingBox;
use crate::ids::{InputSym, StateSym};

/// A matrix or scalar bounding the Jacobian of a mode's dynamics, used by
/// the collaborating reachability abstractor to over-approximate reachable
/// tubes.
#[derive(Debug, Clone)]
pub enum GrowthBound {
    Scalar(f64),
    Matrix(Vec<Vec<f64>>),
}

/// The per-mode discretization parameters `(dx, du, Δt)`.
#[derive(Debug, Clone)]
pub struct ModeParams {
    pub dx: Vec<f64>,
    pub du: Vec<f64>,
    pub dt: f64,
}

/// Uniform-grid quantizer over a bounded continuous domain, as produced by
/// the external reachability collaborator. The core never
/// interprets cell geometry itself -- it only calls these operations.
///
/// `abstract_of`/`abstract_input` returning `None` is the Rust rendering of
/// a "sentinel 0" contract: a point outside every cell of the grid.
pub trait GridSpace: Send + Sync {
    fn n_states(&self) -> usize;
    fn n_inputs(&self) -> usize;

    /// Representative point (cell center) of `q`.
    fn concrete_of(&self, q: StateSym) -> Vec<f64>;
    /// The symbol whose cell contains `x`, or `None` if `x` lies outside
    /// the grid.
    fn abstract_of(&self, x: &[f64]) -> Option<StateSym>;
    /// All symbols whose cells are contained in `set`, under INNER
    /// semantics.
    fn states_in_set(&self, set: &BoundingBox) -> Vec<StateSym>;

    fn concrete_input(&self, u: InputSym) -> Vec<f64>;
    fn abstract_input(&self, u: &[f64]) -> Option<InputSym>;

    /// The full transition relation as `(target, source, input)` triples,
    /// the over-approximation computed by the growth-bound reachability
    /// analysis for one time step of `Δt`.
    fn enum_transitions(&self) -> Vec<(StateSym, StateSym, InputSym)>;
}

/// The external collaborator (non-goal: the reachability kernel itself).
/// Given a mode's continuous-dynamics system and discretization
/// parameters, produces a finite [`GridSpace`] over-approximating its
/// one-step reachable sets.
pub trait ReachabilityAbstractor {
    type System;

    fn abstract_mode(
        &self,
        system: &Self::System,
        growth_bound: &GrowthBound,
        params: &ModeParams,
    ) -> Box<dyn GridSpace>;
}

/// `SymDyn[k]`: a mode's materialized symbolic dynamics -- the grid plus
/// its cached transition relation. Everything downstream
/// reads a mode exclusively through this type.
pub struct SymDyn {
    grid: Box<dyn GridSpace>,
    transitions: Vec<(StateSym, StateSym, InputSym)>,
}

impl SymDyn {
    pub fn build<A: ReachabilityAbstractor>(
        abstractor: &A,
        system: &A::System,
        growth_bound: &GrowthBound,
        params: &ModeParams,
    ) -> Self {
        let grid = abstractor.abstract_mode(system, growth_bound, params);
        let transitions = grid.enum_transitions();
        Self { grid, transitions }
    }

    pub fn n_states(&self) -> usize {
        self.grid.n_states()
    }

    pub fn n_inputs(&self) -> usize {
        self.grid.n_inputs()
    }

    pub fn transitions(&self) -> &[(StateSym, StateSym, InputSym)] {
        &self.transitions
    }

    pub fn concrete_of(&self, q: StateSym) -> Vec<f64> {
        self.grid.concrete_of(q)
    }

    pub fn abstract_of(&self, x: &[f64]) -> Option<StateSym> {
        self.grid.abstract_of(x)
    }

    pub fn states_in_set(&self, set: &BoundingBox) -> Vec<StateSym> {
        self.grid.states_in_set(set)
    }

    pub fn concrete_input(&self, u: InputSym) -> Vec<f64> {
        self.grid.concrete_input(u)
    }

    pub fn abstract_input(&self, u: &[f64]) -> Option<InputSym> {
        self.grid.abstract_input(u)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! A trivial uniform-grid [`GridSpace`] used by builder/assembler
    //! tests in place of a real reachability optimizer.
    use super::*;

    pub struct UniformGrid {
        pub origin: f64,
        pub cell: f64,
        pub n_states: usize,
        pub transitions: Vec<(StateSym, StateSym, InputSym)>,
    }

    impl GridSpace for UniformGrid {
        fn n_states(&self) -> usize {
            self.n_states
        }

        fn n_inputs(&self) -> usize {
            1
        }

        fn concrete_of(&self, q: StateSym) -> Vec<f64> {
            vec![self.origin + (q.index() as f64 + 0.5) * self.cell]
        }

        fn abstract_of(&self, x: &[f64]) -> Option<StateSym> {
            let idx = ((x[0] - self.origin) / self.cell).floor();
            if idx < 0.0 || idx as usize >= self.n_states {
                None
            } else {
                Some(StateSym::new(idx as usize))
            }
        }

        fn states_in_set(&self, set: &BoundingBox) -> Vec<StateSym> {
            (0..self.n_states)
                .map(StateSym::new)
                .filter(|&q| {
                    let c = self.concrete_of(q)[0];
                    let lo = c - self.cell / 2.0;
                    let hi = c + self.cell / 2.0;
                    lo >= set.lower[0] - 1e-9 && hi <= set.upper[0] + 1e-9
                })
                .collect()
        }

        fn concrete_input(&self, _u: InputSym) -> Vec<f64> {
            vec![0.0]
        }

        fn abstract_input(&self, _u: &[f64]) -> Option<InputSym> {
            Some(InputSym::new(0))
        }

        fn enum_transitions(&self) -> Vec<(StateSym, StateSym, InputSym)> {
            self.transitions.clone()
        }
    }

    pub struct UnitAbstractor;

    impl ReachabilityAbstractor for UnitAbstractor {
        type System = UniformGrid;

        fn abstract_mode(
            &self,
            system: &Self::System,
            _growth_bound: &GrowthBound,
            _params: &ModeParams,
        ) -> Box<dyn GridSpace> {
            Box::new(UniformGrid {
                origin: system.origin,
                cell: system.cell,
                n_states: system.n_states,
                transitions: system.transitions.clone(),
            })
        }
    }
}
