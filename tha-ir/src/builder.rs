//! Top-level orchestration: the only place that calls all seven phases, in
//! order (data flow `A -> B,C -> D -> E,F -> G`). The build is
//! single-threaded, synchronous, and offline -- it runs to completion and
//! returns an immutable [`Automaton`], or aborts with a [`BuildError`]
//! (construction failures abort the entire build).
use tha_idx::IndexRef;
use tha_utils::BuildResult;

use crate::automaton::Automaton;
use crate::dynamics::{GrowthBound, ModeParams, ReachabilityAbstractor, SymDyn};
use crate::clock::ClockModel;
use crate::hybrid_system::HybridSystem;
use crate::ids::ModeId;
use crate::input_map::GlobalInputMap;
use crate::transitions::{build_intra_mode_transitions, build_switching_transitions};

/// Builds the temporal-hybrid symbolic model for `system`, using
/// `abstractor` as the external reachability collaborator for every mode.
pub fn build_timed_hybrid_automaton<H, A>(
    system: &H,
    abstractor: &A,
    growth_bounds: &[GrowthBound],
    params: &[ModeParams],
) -> BuildResult<Automaton>
where
    H: HybridSystem<System = A::System>,
    A: ReachabilityAbstractor,
{
    let n_modes = system.n_modes();
    assert_eq!(growth_bounds.len(), n_modes, "one growth bound per mode");
    assert_eq!(params.len(), n_modes, "one discretization parameter triple per mode");

    // Phases B & C: per-mode dynamics abstraction and clock model.
    let mut sym_dyn = Vec::with_capacity(n_modes);
    let mut clocks = Vec::with_capacity(n_modes);
    for k in 0..n_modes {
        let mode = ModeId::new(k);
        log::debug!("abstracting mode {k}");
        let sd = SymDyn::build(
            abstractor,
            system.mode_system(mode),
            &growth_bounds[k],
            &params[k],
        );
        let clock = if params[k].dt == 0.0 {
            ClockModel::frozen()
        } else {
            ClockModel::from_horizon(system.clock_horizon(mode), params[k].dt)
        };
        log::debug!(
            "mode {k}: {} states, {} inputs, {} clock steps",
            sd.n_states(),
            sd.n_inputs(),
            clock.len()
        );
        sym_dyn.push(sd);
        clocks.push(clock);
    }

    // Phase D: global input map, built from mode input cardinalities and
    // the hybrid automaton's own transition list.
    let n_inputs_per_mode: Vec<usize> = sym_dyn.iter().map(SymDyn::n_inputs).collect();
    let input_map = GlobalInputMap::build(&n_inputs_per_mode, system.transitions());
    log::debug!(
        "global input map: {} continuous, {} switching",
        input_map.continuous_range().size(),
        input_map.switching_range().size()
    );

    // Phase E: intra-mode transitions.
    let mut triples = Vec::new();
    for k in 0..n_modes {
        triples.extend(build_intra_mode_transitions(
            ModeId::new(k),
            &sym_dyn[k],
            &clocks[k],
            &input_map,
        ));
    }

    // Phase F: switching transitions, in the hybrid automaton's natural
    // transition order.
    for transition in system.transitions() {
        let s = transition.source.index();
        let t = transition.target.index();
        let switched = build_switching_transitions(
            transition,
            &sym_dyn[s],
            &clocks[s],
            &sym_dyn[t],
            &clocks[t],
            &input_map,
        )?;
        triples.extend(switched);
    }

    log::debug!("assembling automaton from {} triples", triples.len());

    // Phase G: assembly.
    Ok(Automaton::assemble(triples, input_map, sym_dyn, clocks))
}
