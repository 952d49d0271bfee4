use crate::util::fsm::{Fsm, FsmBuilder, FsmSequence, StateId};
use std::hash::Hash;

use super::FastFsm;

/// A state in the [`SmallFsm`]. Stores an index into the transitions array.
#[repr(transparent)]
#[derive(Clone, Copy, Debug)]
pub struct State(TransitionStartId);

/// An index into the transitions array in [`SmallFsm`].
#[repr(transparent)]
#[derive(Clone, Copy, Debug)]
pub struct TransitionStartId(usize);

/// A transition, mapping from one state to another.
#[derive(Clone, Copy, Debug)]
pub struct Transition<T>(T, StateId);

/// A memory optimised finite state machine.
///
/// States contain a 'pointer' into the transitions array, so can be used to
/// iterate over transitions. States are ordered by whether they are
/// terminal, so the position of a state can be compared to the number of
/// terminal states to determine whether the state is terminal. Within a
/// state, transitions are kept sorted by symbol, so a lookup is a binary
/// search over a contiguous packed array rather than a hashmap probe.
///
/// This implementation of the [`Fsm`] trait is memory optimised, as the
/// array implementation is very compact.
#[derive(Debug)]
pub struct SmallFsm<T> {
    states: Vec<State>,
    transitions: Vec<Transition<T>>,
    terminal_count: usize,
}

impl<T> SmallFsm<T> {
    /// Gets the start and end of the transition array for a state.
    fn transition_limits(&self, StateId(id): StateId) -> (usize, usize) {
        let State(TransitionStartId(start)) = self.states[id];
        let end = match self.states.get(id + 1) {
            Some(&State(TransitionStartId(end))) => end,
            _ => self.transitions.len(),
        };

        (start, end)
    }
}
impl<T: Hash + Eq> From<FsmBuilder<T>> for SmallFsm<T>
where
    T: Ord,
{
    fn from(builder: FsmBuilder<T>) -> Self {
        Self::from(FastFsm::from(builder))
    }
}
impl<T: Hash + Eq + Ord> From<FastFsm<T>> for SmallFsm<T> {
    fn from(fast_fsm: FastFsm<T>) -> Self {
        // reuse the code for the fast fsm.
        let FastFsm {
            states,
            terminal_count,
        } = fast_fsm;

        let mut small_states = Vec::with_capacity(states.len());
        let mut transitions = Vec::new();

        // add the states in the same order as the fast fsm.
        let mut transition_id = 0;
        for state in states {
            small_states.push(State(TransitionStartId(transition_id)));

            // sort this state's transitions by symbol before packing them,
            // so lookups can binary search the slice.
            let mut sorted: Vec<_> = state.transitions.into_iter().collect();
            sorted.sort_by(|(a, _), (b, _)| a.cmp(b));

            for (k, state_id) in sorted {
                // can reuse the state_id as the ordering is unchanged.
                transitions.push(Transition(k, state_id));
                transition_id += 1;
            }
        }

        Self {
            states: small_states,
            transitions,
            terminal_count,
        }
    }
}
impl<'a, T: 'a + Hash + Eq + Ord> Fsm<'a, T> for SmallFsm<T> {
    type TransitionsIter = SmallFsmTransitionsIter<'a, T>;

    fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    fn state_count(&self) -> usize {
        self.states.len()
    }

    fn transitions(&'a self, state_id: StateId) -> Self::TransitionsIter {
        let (start, end) = self.transition_limits(state_id);
        SmallFsmTransitionsIter {
            slice_iter: self.transitions[start..end].iter(),
        }
    }

    fn transition(&self, state_id: StateId, symbol: &T) -> Option<StateId> {
        let (start, end) = self.transition_limits(state_id);
        self.transitions[start..end]
            .binary_search_by(|Transition(k, _)| k.cmp(symbol))
            .ok()
            .map(|i| self.transitions[start + i].1)
    }

    fn is_terminal(&self, StateId(id): StateId) -> bool {
        id >= self.states.len() - self.terminal_count
    }

    fn initial_state(&self) -> StateId {
        StateId(0)
    }

    fn traverse_from<'s>(
        &self,
        state_id: StateId,
        seq: impl FsmSequence<'s, T>,
    ) -> Option<StateId> {
        let mut curr_state = state_id;

        for item in seq.into_iter() {
            curr_state = self.transition(curr_state, &item)?;
        }

        Some(curr_state)
    }
}

/// Used to iterate over the transitions in the [`SmallFsm`].
pub struct SmallFsmTransitionsIter<'a, T> {
    slice_iter: std::slice::Iter<'a, Transition<T>>,
}

impl<'a, T: 'a> Iterator for SmallFsmTransitionsIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.slice_iter.next().map(|Transition(item, _)| item)
    }
}
