//! Global input map: unifies per-mode continuous inputs and
//! switching transitions into one contiguous global input id space.
use std::collections::HashMap;

use crate::hybrid_system::HybridTransition;
use crate::ids::{GlobalInput, InputSym, ModeId, TransitionId};
use tha_idx::{IndexRange, IndexRef};

/// The decidable-in-O(1) classification of a global input id (design note
/// "Tagged variants over dynamic typing").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputClass {
    Continuous { mode: ModeId, local: InputSym },
    Switching { transition: TransitionId },
    Invalid,
}

pub struct GlobalInputMap {
    continuous_range: IndexRange<GlobalInput>,
    switching_range: IndexRange<GlobalInput>,
    continuous_fwd: HashMap<(ModeId, InputSym), GlobalInput>,
    continuous_rev: Vec<(ModeId, InputSym)>,
    switching_fwd: HashMap<TransitionId, GlobalInput>,
    switching_rev: Vec<TransitionId>,
    labels: Vec<String>,
}

impl GlobalInputMap {
    /// Two-phase, order-sensitive construction:
    /// 1. modes in ascending id, each given a contiguous block of
    ///    `n_inputs_per_mode[k]` ids;
    /// 2. the hybrid automaton's transitions, in their natural enumeration
    ///    order, each given the next id after the last continuous one.
    pub fn build(
        n_inputs_per_mode: &[usize],
        transitions: &[HybridTransition],
    ) -> Self {
        let mut continuous_fwd = HashMap::new();
        let mut continuous_rev = Vec::new();
        let mut next = 0usize;
        for (k, &n) in n_inputs_per_mode.iter().enumerate() {
            let mode = ModeId::new(k);
            for local in 0..n {
                let local = InputSym::new(local);
                let g = GlobalInput::new(next);
                continuous_fwd.insert((mode, local), g);
                continuous_rev.push((mode, local));
                next += 1;
            }
        }
        let continuous_range = IndexRange::new(GlobalInput::new(0), GlobalInput::new(next));

        let mut switching_fwd = HashMap::new();
        let mut switching_rev = Vec::new();
        let mut labels = Vec::new();
        let switching_start = next;
        for transition in transitions {
            let g = GlobalInput::new(next);
            switching_fwd.insert(transition.id, g);
            switching_rev.push(transition.id);
            labels.push(format!(
                "SWITCH {} -> {}",
                transition.source.index(),
                transition.target.index()
            ));
            next += 1;
        }
        let switching_range =
            IndexRange::new(GlobalInput::new(switching_start), GlobalInput::new(next));

        Self {
            continuous_range,
            switching_range,
            continuous_fwd,
            continuous_rev,
            switching_fwd,
            switching_rev,
            labels,
        }
    }

    pub fn total_inputs(&self) -> usize {
        self.continuous_range.size() + self.switching_range.size()
    }

    pub fn continuous_range(&self) -> IndexRange<GlobalInput> {
        self.continuous_range
    }

    pub fn switching_range(&self) -> IndexRange<GlobalInput> {
        self.switching_range
    }

    pub fn global_id_of_continuous(&self, mode: ModeId, local: InputSym) -> Option<GlobalInput> {
        self.continuous_fwd.get(&(mode, local)).copied()
    }

    pub fn global_id_of_switching(&self, transition: TransitionId) -> Option<GlobalInput> {
        self.switching_fwd.get(&transition).copied()
    }

    pub fn classify(&self, g: GlobalInput) -> InputClass {
        if self.continuous_range.contains(g) {
            let (mode, local) = self.continuous_rev[g.index()];
            InputClass::Continuous { mode, local }
        } else if self.switching_range.contains(g) {
            let transition = self.switching_rev[g.index() - self.switching_range.start().index()];
            InputClass::Switching { transition }
        } else {
            InputClass::Invalid
        }
    }

    pub fn is_continuous(&self, g: GlobalInput) -> bool {
        self.continuous_range.contains(g)
    }

    pub fn is_switching(&self, g: GlobalInput) -> bool {
        self.switching_range.contains(g)
    }

    /// Human-readable label for a switching input, e.g. `"SWITCH 0 -> 1"`.
    pub fn switching_label(&self, transition: TransitionId) -> Option<&str> {
        let g = self.global_id_of_switching(transition)?;
        self.labels
            .get(g.index() - self.switching_range.start().index())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::BoundingBox;
    use crate::hybrid_system::HybridTransition;

    struct NoopReset;
    impl crate::hybrid_system::ResetMap for NoopReset {
        fn apply(&self, augmented: &[f64]) -> Vec<f64> {
            augmented.to_vec()
        }
    }

    fn transition(id: usize, src: usize, tgt: usize) -> HybridTransition {
        HybridTransition {
            id: TransitionId::new(id),
            source: ModeId::new(src),
            target: ModeId::new(tgt),
            guard: Box::new(BoundingBox::new(vec![0.0, 0.0], vec![1.0, 1.0])),
            reset: Box::new(NoopReset),
        }
    }

    #[test]
    fn input_multiplexing_across_modes_and_transitions() {
        let transitions = vec![
            transition(0, 0, 1),
            transition(1, 1, 0),
            transition(2, 1, 2),
            transition(3, 2, 0),
        ];
        let map = GlobalInputMap::build(&[2, 3, 2], &transitions);

        assert_eq!(map.continuous_range().size(), 7);
        assert_eq!(map.switching_range().size(), 4);
        assert_eq!(map.total_inputs(), 11);

        for k in 0..3 {
            let n = [2, 3, 2][k];
            for local in 0..n {
                let g = map
                    .global_id_of_continuous(ModeId::new(k), InputSym::new(local))
                    .unwrap();
                assert_eq!(
                    map.classify(g),
                    InputClass::Continuous {
                        mode: ModeId::new(k),
                        local: InputSym::new(local)
                    }
                );
            }
        }
        for (i, t) in transitions.iter().enumerate() {
            let g = map.global_id_of_switching(t.id).unwrap();
            assert_eq!(g.index(), 7 + i);
            assert_eq!(
                map.classify(g),
                InputClass::Switching { transition: t.id }
            );
        }
        assert_eq!(
            map.classify(GlobalInput::new(11)),
            InputClass::Invalid
        );
    }
}
