/*! Nondeterministic finite automata (NFA).

An [`Nfa`] is built from expression syntax trees using Thompson's
construction: each kind of node maps to a small automaton fragment with one
entry and one exit state, and fragments are wired together with
ε-transitions. The interesting guarantee is the one the DFA conversion
relies on: when several expressions are combined, the shared start state
reaches each expression's sub-automaton through its own dispatch state, in
the order the expressions were given, so the priority of each expression is
encoded in the automaton and survives the conversion.
*/

use std::fmt::{Display, Formatter};

use itertools::Itertools;
use relex_parser::ast::RegExp;

use crate::compiler::PatternId;
use crate::fsa::{byte_ranges, fmt_byte, Error, StateId, StateSet, MAX_STATES};

/// A state of an [`Nfa`].
pub struct NfaState {
    transitions: [Option<StateId>; 256],
    epsilon: StateSet,
    output: Option<PatternId>,
}

impl NfaState {
    fn new() -> Self {
        Self {
            transitions: [None; 256],
            epsilon: StateSet::new(),
            output: None,
        }
    }

    /// Returns the successor for `byte`, if there is one.
    #[inline]
    pub fn transition(&self, byte: u8) -> Option<StateId> {
        self.transitions[byte as usize]
    }

    /// Returns the pattern this state accepts, if it is an accepting state.
    #[inline]
    pub fn output(&self) -> Option<PatternId> {
        self.output
    }

    /// States reachable from this one through a single ε-transition.
    pub(crate) fn epsilon(&self) -> &StateSet {
        &self.epsilon
    }
}

/// Entry and exit states of an automaton fragment under construction.
#[derive(Clone, Copy)]
struct Fragment {
    start: StateId,
    end: StateId,
}

/// A nondeterministic finite automaton with ε-transitions.
///
/// States live in an arena and refer to each other by [`StateId`], so the
/// loops that `*` and `+` introduce are just indices pointing back into the
/// arena. State [`Nfa::START`] is the start state.
pub struct Nfa {
    states: Vec<NfaState>,
}

impl Nfa {
    /// Id of the start state. Always 0.
    pub const START: StateId = 0;

    /// Builds an NFA that recognizes `regexp` and reports `output` at its
    /// accepting state.
    ///
    /// # Panics
    ///
    /// If `regexp` contains a range whose endpoints are not single-character
    /// strings. The parser guarantees this for every tree it returns.
    pub fn from_regexp(
        regexp: &RegExp,
        output: PatternId,
    ) -> Result<Nfa, Error> {
        let mut nfa = Nfa { states: Vec::new() };
        let start = nfa.add_state()?;
        let accept = nfa.add_accepting_state(output)?;
        let body = nfa.emit(regexp)?;
        nfa.add_epsilon(start, body.start);
        nfa.add_epsilon(body.end, accept);
        Ok(nfa)
    }

    /// Builds a single NFA that recognizes the union of `regexps`.
    ///
    /// The i-th expression's accepting state reports output value i. Every
    /// expression is reached from the start state through a dedicated
    /// dispatch state; the extra ε-hop keeps the sub-automata apart and
    /// preserves the order of the expressions for priority tie-breaking.
    ///
    /// # Panics
    ///
    /// Same contract as [`Nfa::from_regexp`].
    pub fn from_regexps<'a, R>(regexps: R) -> Result<Nfa, Error>
    where
        R: IntoIterator<Item = &'a RegExp>,
    {
        let mut nfa = Nfa { states: Vec::new() };
        let start = nfa.add_state()?;
        for (i, regexp) in regexps.into_iter().enumerate() {
            let dispatch = nfa.add_state()?;
            let accept = nfa.add_accepting_state(PatternId::from(i))?;
            let body = nfa.emit(regexp)?;
            nfa.add_epsilon(start, dispatch);
            nfa.add_epsilon(dispatch, body.start);
            nfa.add_epsilon(body.end, accept);
        }
        Ok(nfa)
    }

    /// Number of states in the automaton.
    #[inline]
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Returns the state with the given id.
    #[inline]
    pub fn state(&self, state: StateId) -> &NfaState {
        &self.states[state]
    }

    /// Returns the smallest set that contains `start` and is closed under
    /// ε-transitions.
    pub(crate) fn epsilon_closure(&self, start: StateId) -> StateSet {
        let mut closure = StateSet::new();
        let mut pending = vec![start];
        closure.insert(start);
        while let Some(state) = pending.pop() {
            for target in self.states[state].epsilon.iter() {
                if !closure.contains(target) {
                    closure.insert(target);
                    pending.push(target);
                }
            }
        }
        closure
    }

    fn emit(&mut self, regexp: &RegExp) -> Result<Fragment, Error> {
        match regexp {
            RegExp::Sequence(children) => self.emit_sequence(children),
            RegExp::Or(left, right) => self.emit_or(left, right),
            RegExp::Optional(child) => self.emit_optional(child),
            RegExp::ZeroOrMore(child) => self.emit_zero_or_more(child),
            RegExp::OneOrMore(child) => self.emit_one_or_more(child),
            RegExp::String(literal) => self.emit_string(literal),
            RegExp::OneOf(children) => self.emit_one_of(children),
            RegExp::Range(start, end) => self.emit_range(start, end),
        }
    }

    /// Children chained with ε-edges from each child's exit to the next
    /// child's entry. No states of its own.
    fn emit_sequence(&mut self, children: &[RegExp]) -> Result<Fragment, Error> {
        let (first, rest) = match children.split_first() {
            Some(split) => split,
            // An empty sequence matches the empty string.
            None => {
                let state = self.add_state()?;
                return Ok(Fragment { start: state, end: state });
            }
        };
        let mut fragment = self.emit(first)?;
        for child in rest {
            let next = self.emit(child)?;
            self.add_epsilon(fragment.end, next.start);
            fragment.end = next.end;
        }
        Ok(fragment)
    }

    fn emit_or(&mut self, left: &RegExp, right: &RegExp) -> Result<Fragment, Error> {
        let fragment = self.add_fragment()?;
        let left = self.emit(left)?;
        let right = self.emit(right)?;
        self.add_epsilon(fragment.start, left.start);
        self.add_epsilon(left.end, fragment.end);
        self.add_epsilon(fragment.start, right.start);
        self.add_epsilon(right.end, fragment.end);
        Ok(fragment)
    }

    fn emit_optional(&mut self, child: &RegExp) -> Result<Fragment, Error> {
        let fragment = self.add_fragment()?;
        self.add_epsilon(fragment.start, fragment.end);
        let body = self.emit(child)?;
        self.add_epsilon(fragment.start, body.start);
        self.add_epsilon(body.end, fragment.end);
        Ok(fragment)
    }

    fn emit_zero_or_more(&mut self, child: &RegExp) -> Result<Fragment, Error> {
        let fragment = self.add_fragment()?;
        self.add_epsilon(fragment.start, fragment.end);
        let body = self.emit(child)?;
        self.add_epsilon(fragment.start, body.start);
        self.add_epsilon(body.end, fragment.end);
        self.add_epsilon(body.end, body.start);
        Ok(fragment)
    }

    /// Same as [`Nfa::emit_zero_or_more`] but without the ε-edge that skips
    /// the body.
    fn emit_one_or_more(&mut self, child: &RegExp) -> Result<Fragment, Error> {
        let fragment = self.add_fragment()?;
        let body = self.emit(child)?;
        self.add_epsilon(fragment.start, body.start);
        self.add_epsilon(body.end, fragment.end);
        self.add_epsilon(body.end, body.start);
        Ok(fragment)
    }

    /// A chain of states, one byte-transition per character. No ε-edges.
    fn emit_string(&mut self, literal: &[u8]) -> Result<Fragment, Error> {
        let start = self.add_state()?;
        let mut end = start;
        for &byte in literal {
            let next = self.add_state()?;
            self.states[end].transitions[byte as usize] = Some(next);
            end = next;
        }
        Ok(Fragment { start, end })
    }

    fn emit_one_of(&mut self, children: &[RegExp]) -> Result<Fragment, Error> {
        let fragment = self.add_fragment()?;
        for child in children {
            let body = self.emit(child)?;
            self.add_epsilon(fragment.start, body.start);
            self.add_epsilon(body.end, fragment.end);
        }
        Ok(fragment)
    }

    /// Two states with one transition per byte in the range.
    fn emit_range(&mut self, start: &RegExp, end: &RegExp) -> Result<Fragment, Error> {
        let (RegExp::String(start), RegExp::String(end)) = (start, end) else {
            panic!("malformed range: endpoints must be literals");
        };
        assert!(start.len() == 1 && end.len() == 1);
        let fragment = self.add_fragment()?;
        for byte in start[0]..=end[0] {
            self.states[fragment.start].transitions[byte as usize] =
                Some(fragment.end);
        }
        Ok(fragment)
    }

    fn add_state(&mut self) -> Result<StateId, Error> {
        if self.states.len() == MAX_STATES {
            return Err(Error::NfaTooLarge);
        }
        self.states.push(NfaState::new());
        Ok(self.states.len() - 1)
    }

    fn add_accepting_state(
        &mut self,
        output: PatternId,
    ) -> Result<StateId, Error> {
        let state = self.add_state()?;
        self.states[state].output = Some(output);
        Ok(state)
    }

    fn add_fragment(&mut self) -> Result<Fragment, Error> {
        Ok(Fragment { start: self.add_state()?, end: self.add_state()? })
    }

    fn add_epsilon(&mut self, from: StateId, to: StateId) {
        self.states[from].epsilon.insert(to);
    }
}

impl Display for Nfa {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (id, state) in self.states.iter().enumerate() {
            write!(f, "{:02}:", id)?;
            if let Some(output) = state.output {
                write!(f, " accept({})", output)?;
            }
            if !state.epsilon.is_empty() {
                write!(
                    f,
                    " ε → {{{}}}",
                    state.epsilon.iter().map(|s| format!("{:02}", s)).join(", ")
                )?;
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
