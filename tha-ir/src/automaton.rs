//! Automaton assembler: collects the triple lists produced by the
//! intra-mode and switching transition builders, assigns dense
//! augmented-state ids, and emits the final labeled transition relation
//! plus its public accessors.
use ahash::{AHashMap, AHashSet};

use tha_idx::{IndexRef, IndexedMap};
use tha_utils::AccessError;

use crate::clock::ClockModel;
use crate::dynamics::SymDyn;
use crate::guard::BoundingBox;
use crate::ids::{AugStateId, GlobalInput, InputSym, ModeId, TimeIdx};
use crate::input_map::{GlobalInputMap, InputClass};
use crate::transitions::{AugmentedState, TransitionTriple};

/// The assembled, immutable symbolic model. Every accessor is a pure
/// function of the value -- safe to call concurrently from multiple
/// threads without synchronization.
pub struct Automaton {
    int2aug: IndexedMap<AugStateId, AugmentedState>,
    aug2int: AHashMap<AugmentedState, AugStateId>,
    relation: AHashMap<(AugStateId, GlobalInput), AHashSet<AugStateId>>,
    input_map: GlobalInputMap,
    sym_dyn: Vec<SymDyn>,
    clocks: Vec<ClockModel>,
}

impl Automaton {
    /// Assembles the final model from the unordered triple list produced
    /// by the intra-mode and switching builders. The enumeration order of
    /// first appearance determines each augmented state's dense id; it is
    /// stable for a single build (the caller supplies triples in a fixed
    /// order: modes ascending, then switching transitions in their
    /// natural enumeration order) but not meaningful across builds.
    pub fn assemble(
        triples: Vec<TransitionTriple>,
        input_map: GlobalInputMap,
        sym_dyn: Vec<SymDyn>,
        clocks: Vec<ClockModel>,
    ) -> Self {
        let mut int2aug = IndexedMap::new();
        let mut aug2int: AHashMap<AugmentedState, AugStateId> = AHashMap::new();
        let mut relation: AHashMap<(AugStateId, GlobalInput), AHashSet<AugStateId>> =
            AHashMap::new();

        let mut intern = |state: AugmentedState,
                           aug2int: &mut AHashMap<AugmentedState, AugStateId>,
                           int2aug: &mut IndexedMap<AugStateId, AugmentedState>| {
            *aug2int.entry(state).or_insert_with(|| int2aug.push(state))
        };

        for triple in &triples {
            let s = intern(triple.source, &mut aug2int, &mut int2aug);
            let d = intern(triple.target, &mut aug2int, &mut int2aug);
            relation.entry((s, triple.input)).or_default().insert(d);
        }

        Self {
            int2aug,
            aug2int,
            relation,
            input_map,
            sym_dyn,
            clocks,
        }
    }

    /// Number of augmented states actually exercised as source or target
    /// of some triple (dense, no gaps).
    pub fn n_states(&self) -> usize {
        self.int2aug.len()
    }

    /// From the global input map, not the triple-observed set -- a mode
    /// may declare inputs that happen not to appear in any emitted
    /// transition.
    pub fn n_inputs(&self) -> usize {
        self.input_map.total_inputs()
    }

    pub fn enum_states(&self) -> impl Iterator<Item = AugStateId> + '_ {
        self.int2aug.keys()
    }

    pub fn enum_inputs(&self, mode: ModeId) -> Vec<InputSym> {
        self.sym_dyn
            .get(mode.index())
            .map(|sd| (0..sd.n_inputs()).map(InputSym::new).collect())
            .unwrap_or_default()
    }

    /// The successor states reached from `source` under `input`, if any
    /// transition was emitted for that pair.
    pub fn post(&self, source: AugStateId, input: GlobalInput) -> Option<&AHashSet<AugStateId>> {
        self.relation.get(&(source, input))
    }

    /// Unpacks `int2aug[s]` into `(concrete_x, concrete_time, mode)`.
    pub fn concrete_state(&self, s: AugStateId) -> (Vec<f64>, f64, ModeId) {
        let aug = self.int2aug[s];
        let sym_dyn = &self.sym_dyn[aug.mode.index()];
        let clock = &self.clocks[aug.mode.index()];
        (
            sym_dyn.concrete_of(aug.spatial),
            clock.tsteps()[aug.time.index()],
            aug.mode,
        )
    }

    /// Composes `abstract_of`, `floor_int`, and `aug2int`. Fails with
    /// [`AccessError::UnknownAugmentedState`] if the resulting triple was
    /// never exercised as a source or target in this build.
    pub fn abstract_state(
        &self,
        x: &[f64],
        tau: f64,
        mode: ModeId,
    ) -> Result<AugStateId, AccessError> {
        let sym_dyn = &self.sym_dyn[mode.index()];
        let clock = &self.clocks[mode.index()];
        let spatial = sym_dyn.abstract_of(x);
        let time = clock.floor_int(tau);
        let candidate = spatial.map(|spatial| AugmentedState {
            spatial,
            time,
            mode,
        });
        candidate
            .and_then(|aug| self.aug2int.get(&aug).copied())
            .ok_or_else(|| AccessError::UnknownAugmentedState {
                mode_id: mode.index(),
                spatial: spatial.map(|s| s.index()).unwrap_or(usize::MAX),
                time: time.index(),
            })
    }

    /// For each mode in `modes`, the cross product of `states_in_set(Xs[k],
    /// k)` and `ceil_int..floor_int(Ts[k])`, keeping only tuples actually
    /// present in the model.
    pub fn states_in_augmented_set(
        &self,
        regions: &[(ModeId, BoundingBox, (f64, f64))],
    ) -> Vec<AugStateId> {
        let mut out = Vec::new();
        for (mode, spatial_set, (t_min, t_max)) in regions {
            let sym_dyn = &self.sym_dyn[mode.index()];
            let clock = &self.clocks[mode.index()];
            let lo = clock.ceil_int(*t_min).index();
            let hi = clock.floor_int(*t_max).index();
            if lo > hi {
                continue;
            }
            for spatial in sym_dyn.states_in_set(spatial_set) {
                for time_idx in lo..=hi {
                    let aug = AugmentedState {
                        spatial,
                        time: TimeIdx::new(time_idx),
                        mode: *mode,
                    };
                    if let Some(&id) = self.aug2int.get(&aug) {
                        out.push(id);
                    }
                }
            }
        }
        out
    }

    /// `concrete_input_k(local)` if `g` is continuous with matching mode;
    /// `None` if `g` is switching; an error otherwise.
    pub fn concrete_input(
        &self,
        g: GlobalInput,
        mode: ModeId,
    ) -> Result<Option<Vec<f64>>, AccessError> {
        match self.input_map.classify(g) {
            InputClass::Continuous { mode: m, local } if m == mode => {
                Ok(Some(self.sym_dyn[mode.index()].concrete_input(local)))
            }
            InputClass::Continuous { .. } => {
                Err(AccessError::InvalidInputId { input_id: g.index() })
            }
            InputClass::Switching { .. } => Ok(None),
            InputClass::Invalid => Err(AccessError::InvalidInputId { input_id: g.index() }),
        }
    }

    /// `global_id_of_continuous(mode, abstract_input_k(u))`, or `None` if
    /// `u` is not representable in `mode`'s input grid.
    pub fn abstract_input(&self, u: &[f64], mode: ModeId) -> Option<GlobalInput> {
        let local = self.sym_dyn[mode.index()].abstract_input(u)?;
        self.input_map.global_id_of_continuous(mode, local)
    }

    pub fn global_input_map(&self) -> &GlobalInputMap {
        &self.input_map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::test_support::{UniformGrid, UnitAbstractor};
    use crate::dynamics::{GrowthBound, ModeParams};
    use crate::hybrid_system::{HybridTransition, ResetMap};
    use crate::ids::{InputSym, StateSym, TransitionId};
    use crate::transitions::{
        build_intra_mode_transitions, build_switching_transitions,
    };

    struct IdentityReset;
    impl ResetMap for IdentityReset {
        fn apply(&self, augmented: &[f64]) -> Vec<f64> {
            augmented.to_vec()
        }
    }

    fn two_mode_system(n_states: usize) -> SymDyn {
        let system = UniformGrid {
            origin: 0.0,
            cell: 0.5,
            n_states,
            transitions: vec![],
        };
        SymDyn::build(
            &UnitAbstractor,
            &system,
            &GrowthBound::Scalar(0.0),
            &ModeParams {
                dx: vec![0.5],
                du: vec![1.0],
                dt: 0.0,
            },
        )
    }

    /// Two modes, frozen clock, one switching transition.
    #[test]
    fn two_modes_frozen_clock_one_switch() {
        let mode1 = two_mode_system(2);
        let mode2 = two_mode_system(2);
        let clock1 = ClockModel::frozen();
        let clock2 = ClockModel::frozen();

        let transition = HybridTransition {
            id: TransitionId::new(0),
            source: ModeId::new(0),
            target: ModeId::new(1),
            guard: Box::new(BoundingBox::new(vec![0.4, 0.0], vec![0.6, 0.0])),
            reset: Box::new(IdentityReset),
        };
        let input_map = GlobalInputMap::build(&[1, 1], std::slice::from_ref(&transition));

        let mut triples =
            build_intra_mode_transitions(ModeId::new(0), &mode1, &clock1, &input_map);
        triples.extend(build_intra_mode_transitions(
            ModeId::new(1),
            &mode2,
            &clock2,
            &input_map,
        ));
        triples.extend(
            build_switching_transitions(
                &transition,
                &mode1,
                &clock1,
                &mode2,
                &clock2,
                &input_map,
            )
            .unwrap(),
        );

        let automaton = Automaton::assemble(
            triples,
            input_map,
            vec![mode1, mode2],
            vec![clock1, clock2],
        );

        assert_eq!(automaton.n_inputs(), 3);
        let g = automaton
            .global_input_map()
            .global_id_of_switching(TransitionId::new(0))
            .unwrap();
        assert_eq!(g.index(), 2);

        // Cell [0, 0.5) and [0.5, 1.0) both overlap the guard [0.4, 0.6]
        // under INNER semantics only if fully contained; with cell 0.5 the
        // guard properly contains neither cell, so the switching relation
        // may drop to empty -- it must still stay internally consistent.
        for id in automaton.enum_states() {
            let _ = automaton.concrete_state(id);
        }
    }

    /// A state's concrete coordinates, re-abstracted, must return the same id.
    #[test]
    fn round_trips_through_concrete_and_abstract() {
        let mode = two_mode_system(2);
        let clock = ClockModel::frozen();
        let input_map = GlobalInputMap::build(&[1], &[]);
        let triples = build_intra_mode_transitions(ModeId::new(0), &mode, &clock, &input_map);
        // No spatial transitions declared on this fixture, so force one
        // augmented state into the model directly via a self-loop triple.
        let mut triples = triples;
        triples.push(TransitionTriple {
            target: AugmentedState {
                spatial: StateSym::new(0),
                time: TimeIdx::new(0),
                mode: ModeId::new(0),
            },
            source: AugmentedState {
                spatial: StateSym::new(0),
                time: TimeIdx::new(0),
                mode: ModeId::new(0),
            },
            input: GlobalInput::new(0),
        });
        let automaton = Automaton::assemble(triples, input_map, vec![mode], vec![clock]);

        let id = *automaton.enum_states().collect::<Vec<_>>().first().unwrap();
        let (x, tau, mode_id) = automaton.concrete_state(id);
        let round_tripped = automaton.abstract_state(&x, tau, mode_id).unwrap();
        assert_eq!(round_tripped, id);
    }

    #[test]
    fn unknown_augmented_state_is_an_error() {
        let mode = two_mode_system(2);
        let clock = ClockModel::frozen();
        let input_map = GlobalInputMap::build(&[1], &[]);
        let automaton = Automaton::assemble(vec![], input_map, vec![mode], vec![clock]);
        let err = automaton
            .abstract_state(&[0.25], 0.0, ModeId::new(0))
            .unwrap_err();
        assert!(matches!(err, AccessError::UnknownAugmentedState { .. }));
    }

    #[test]
    fn invalid_input_id_is_an_error() {
        let mode = two_mode_system(2);
        let clock = ClockModel::frozen();
        let input_map = GlobalInputMap::build(&[1], &[]);
        let automaton = Automaton::assemble(vec![], input_map, vec![mode], vec![clock]);
        let err = automaton
            .concrete_input(GlobalInput::new(99), ModeId::new(0))
            .unwrap_err();
        assert_eq!(err, AccessError::InvalidInputId { input_id: 99 });
    }
}
