/*! Deterministic finite automata (DFA).

A [`Dfa`] is derived from an [`Nfa`] by subset construction: every DFA state
stands for the set of NFA states the automaton could be in at once (its
*power set*), starting from the ε-closure of the NFA's start state. DFA
states are keyed by their power set, so the construction handles arbitrary
unions: two NFA states reached on the same byte simply land in the same
power set.

When a power set contains more than one accepting NFA state, the DFA state
records the lowest output value among them. Output values are the indices of
the source expressions, so the expression added first wins, which is the
tie-breaking the scanner relies on.

After construction a merge pass collapses states that are observationally
identical (same output, same 256 successors). The result has no two equal
states but is not guaranteed to be minimal; full Myhill–Nerode minimization
is not attempted.
*/

use std::fmt::{Display, Formatter};

use log::debug;
use rustc_hash::FxHashMap;

use crate::compiler::PatternId;
use crate::fsa::nfa::Nfa;
use crate::fsa::{byte_ranges, fmt_byte, Error, StateId, StateSet, MAX_STATES};

/// A state of a [`Dfa`].
#[derive(PartialEq)]
pub struct DfaState {
    transitions: [Option<StateId>; 256],
    output: Option<PatternId>,
}

impl DfaState {
    fn new() -> Self {
        Self { transitions: [None; 256], output: None }
    }

    /// Returns the successor for `byte`, if there is one.
    #[inline]
    pub fn transition(&self, byte: u8) -> Option<StateId> {
        self.transitions[byte as usize]
    }

    /// Returns the pattern this state accepts, if it is an accepting state.
    ///
    /// When several patterns accept here, this is the one with the lowest
    /// index.
    #[inline]
    pub fn output(&self) -> Option<PatternId> {
        self.output
    }
}

/// A deterministic finite automaton.
///
/// Produced from an [`Nfa`] by [`Dfa::from_nfa`]. State [`Dfa::START`] is
/// the start state; for every state and every input byte there is at most
/// one successor.
pub struct Dfa {
    states: Vec<DfaState>,
}

impl Dfa {
    /// Id of the start state. Always 0.
    pub const START: StateId = 0;

    /// Converts `nfa` into a DFA by subset construction, then merges
    /// equivalent states.
    pub fn from_nfa(nfa: &Nfa) -> Result<Dfa, Error> {
        let mut dfa = Dfa { states: Vec::new() };

        // Power set each DFA state stands for, parallel to `dfa.states`.
        let mut power_sets: Vec<StateSet> = Vec::new();

        // Interns power sets: which DFA state stands for which set.
        let mut states_by_set: FxHashMap<StateSet, StateId> =
            FxHashMap::default();

        dfa.add_state(
            nfa,
            nfa.epsilon_closure(Nfa::START),
            &mut power_sets,
            &mut states_by_set,
        )?;

        // New states are appended in discovery order, so iterating by index
        // doubles as the worklist.
        let mut state = 0;
        while state < dfa.states.len() {
            let power_set = power_sets[state];
            for byte in 0..=u8::MAX {
                let mut target_set = StateSet::new();
                for nfa_state in power_set.iter() {
                    if let Some(target) = nfa.state(nfa_state).transition(byte)
                    {
                        target_set.union(&nfa.epsilon_closure(target));
                    }
                }
                if target_set.is_empty() {
                    continue;
                }
                let target = match states_by_set.get(&target_set) {
                    Some(&existing) => existing,
                    None => dfa.add_state(
                        nfa,
                        target_set,
                        &mut power_sets,
                        &mut states_by_set,
                    )?,
                };
                dfa.states[state].transitions[byte as usize] = Some(target);
            }
            state += 1;
        }

        let before_merging = dfa.states.len();
        dfa.merge_equivalent_states();
        debug!(
            "subset construction produced {} states, {} after merging",
            before_merging,
            dfa.states.len()
        );

        Ok(dfa)
    }

    /// Number of states in the automaton.
    #[inline]
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Returns the state with the given id.
    #[inline]
    pub fn state(&self, state: StateId) -> &DfaState {
        &self.states[state]
    }

    /// Allocates the DFA state standing for `power_set`.
    ///
    /// The new state accepts the lowest-index pattern accepted by any NFA
    /// state in the set, if there is one.
    fn add_state(
        &mut self,
        nfa: &Nfa,
        power_set: StateSet,
        power_sets: &mut Vec<StateSet>,
        states_by_set: &mut FxHashMap<StateSet, StateId>,
    ) -> Result<StateId, Error> {
        if self.states.len() == MAX_STATES {
            return Err(Error::DfaTooLarge);
        }
        let mut state = DfaState::new();
        state.output = power_set
            .iter()
            .filter_map(|nfa_state| nfa.state(nfa_state).output())
            .min();
        self.states.push(state);
        let id = self.states.len() - 1;
        power_sets.push(power_set);
        states_by_set.insert(power_set, id);
        Ok(id)
    }

    /// Repeatedly merges pairs of equal states until none are left.
    ///
    /// Two states are equal when they agree on their output and on all 256
    /// successors. The second state of an equal pair is removed: incoming
    /// transitions are redirected to the first state, the last state of the
    /// arena takes the freed slot, and the slot is examined again since the
    /// moved state may be equal to the first one too. Each merge shrinks
    /// the arena by one state, so the passes terminate.
    fn merge_equivalent_states(&mut self) {
        loop {
            let mut merged = false;
            let mut i = 0;
            while i < self.states.len() {
                let mut j = i + 1;
                while j < self.states.len() {
                    if self.states[i] == self.states[j] {
                        self.redirect(j, i);
                        let last = self.states.len() - 1;
                        self.states.swap_remove(j);
                        if j < last {
                            self.redirect(last, j);
                        }
                        merged = true;
                    } else {
                        j += 1;
                    }
                }
                i += 1;
            }
            if !merged {
                break;
            }
        }
    }

    /// Rewrites every transition targeting `from` so that it targets `to`.
    fn redirect(&mut self, from: StateId, to: StateId) {
        for state in self.states.iter_mut() {
            for target in state.transitions.iter_mut() {
                if *target == Some(from) {
                    *target = Some(to);
                }
            }
        }
    }
}

impl Display for Dfa {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (id, state) in self.states.iter().enumerate() {
            write!(f, "{:02}:", id)?;
            if let Some(output) = state.output {
                write!(f, " accept({})", output)?;
            }
            writeln!(f)?;
            for (lo, hi, target) in byte_ranges(&state.transitions) {
                if lo == hi {
                    writeln!(f, "    {} → {:02}", fmt_byte(lo), target)?;
                } else {
                    writeln!(
                        f,
                        "    {}..{} → {:02}",
                        fmt_byte(lo),
                        fmt_byte(hi),
                        target
                    )?;
                }
            }
        }
        Ok(())
    }
}
