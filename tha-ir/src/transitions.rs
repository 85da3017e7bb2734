//! Intra-mode transition building and switching transition building -- the
//! two producers that feed the automaton assembler.
use tha_idx::IndexRef;
use tha_utils::BuildError;

use crate::clock::ClockModel;
use crate::dynamics::SymDyn;
use crate::hybrid_system::HybridTransition;
use crate::ids::{GlobalInput, ModeId, TimeIdx};
use crate::input_map::GlobalInputMap;

/// `(target, source, input)`, the atomic unit assembled by the automaton
/// assembler. The target/source here are still the `(spatial, time, mode)`
/// triple, not yet interned into dense [`crate::ids::AugStateId`]s -- that
/// happens in the assembler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AugmentedState {
    pub spatial: crate::ids::StateSym,
    pub time: TimeIdx,
    pub mode: ModeId,
}

#[derive(Debug, Clone, Copy)]
pub struct TransitionTriple {
    pub target: AugmentedState,
    pub source: AugmentedState,
    pub input: GlobalInput,
}

/// For every `(target_q, source_q, local_input)` in `sym_dyn`, lift it
/// into the product with the clock advance. A frozen clock (one
/// time index) produces one triple at that index; an active clock with
/// `L` steps produces `L - 1` temporal copies, one per consecutive pair of
/// indices -- the terminal index has no outgoing intra-mode transition.
pub fn build_intra_mode_transitions(
    mode: ModeId,
    sym_dyn: &SymDyn,
    clock: &ClockModel,
    input_map: &GlobalInputMap,
) -> Vec<TransitionTriple> {
    let mut out = Vec::new();
    for &(target_q, source_q, local_input) in sym_dyn.transitions() {
        let g = input_map
            .global_id_of_continuous(mode, local_input)
            .expect("every local input of an abstracted mode is registered in the global input map");

        if clock.len() == 1 {
            let t = TimeIdx::new(0);
            out.push(TransitionTriple {
                target: AugmentedState {
                    spatial: target_q,
                    time: t,
                    mode,
                },
                source: AugmentedState {
                    spatial: source_q,
                    time: t,
                    mode,
                },
                input: g,
            });
        } else {
            for i in 0..clock.len() - 1 {
                out.push(TransitionTriple {
                    target: AugmentedState {
                        spatial: target_q,
                        time: TimeIdx::new(i + 1),
                        mode,
                    },
                    source: AugmentedState {
                        spatial: source_q,
                        time: TimeIdx::new(i),
                        mode,
                    },
                    input: g,
                });
            }
        }
    }
    out
}

/// Enumerates guard intersections, applies the reset map at the concrete
/// level, and re-abstracts into the target mode's grid. Reset
/// images that miss the target grid or target clock entirely are dropped
/// silently -- this is the documented, deliberate sentinel-zero protocol,
/// not a bug (see design note "Avoid exceptions for expected misses" and
/// the open question on boundary reset images).
pub fn build_switching_transitions(
    transition: &HybridTransition,
    source_sym_dyn: &SymDyn,
    source_clock: &ClockModel,
    target_sym_dyn: &SymDyn,
    target_clock: &ClockModel,
    input_map: &GlobalInputMap,
) -> Result<Vec<TransitionTriple>, BuildError> {
    let guard_box = transition.guard.as_bounding_box().ok_or(
        BuildError::UnsupportedGuardShape {
            transition_id: transition.id.index(),
        },
    )?;
    let spatial_guard = guard_box.spatial_projection();
    let (t_min, t_max) = guard_box.temporal_projection();

    let source_states = source_sym_dyn.states_in_set(&spatial_guard);
    let source_times = source_clock.indices_in_interval(t_min, t_max);

    let g = input_map
        .global_id_of_switching(transition.id)
        .expect("every hybrid transition is registered in the global input map");

    let mut out = Vec::new();
    for &q in &source_states {
        for &i in &source_times {
            let mut xi = source_sym_dyn.concrete_of(q);
            xi.push(source_clock.tsteps()[i.index()]);

            let xi_prime = transition.reset.apply(&xi);
            let (x_prime, tau_prime) = xi_prime.split_at(xi_prime.len() - 1);

            let q_prime = target_sym_dyn.abstract_of(x_prime);
            let i_prime = target_clock.locate(tau_prime[0]);

            match (q_prime, i_prime) {
                (Some(q_prime), Some(i_prime)) => out.push(TransitionTriple {
                    target: AugmentedState {
                        spatial: q_prime,
                        time: i_prime,
                        mode: transition.target,
                    },
                    source: AugmentedState {
                        spatial: q,
                        time: i,
                        mode: transition.source,
                    },
                    input: g,
                }),
                _ => log::trace!(
                    "transition {}: dropping reset image outside target mode {}'s grid/clock",
                    transition.id.index(),
                    transition.target.index()
                ),
            }
        }
    }
    Ok(out)
}
