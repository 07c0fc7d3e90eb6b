/*! Finite-state automata.

This module contains the automata half of the compilation pipeline: the
[`nfa::Nfa`] built from expression syntax trees with Thompson's
construction, and the [`dfa::Dfa`] derived from it by subset construction.
Both automata are arenas of states addressed by [`StateId`]; transitions are
dense 256-slot tables indexed by input byte, with `None` meaning "no
transition". Back-edges introduced by `*` and `+` are plain indices into the
arena, so no reference cycles ever exist and dropping an automaton frees
everything it owns.

Both automata share the same state budget, [`MAX_STATES`]; builders report
[`Error`] when a pattern set needs more states than that.
*/

use thiserror::Error;

pub mod dfa;
pub mod nfa;

mod stateset;


pub(crate) use stateset::StateSet;

/// Identifies a state within an automaton.
///
/// Valid ids are below the owning automaton's state count; state 0 is
/// always the start state.
pub type StateId = usize;

/// Maximum number of states in an automaton, NFA or DFA.
pub const MAX_STATES: usize = StateSet::CAPACITY;

/// An automaton outgrew the state budget while being built.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// The NFA needs more than [`MAX_STATES`] states.
    #[error("NFA too large (max: 64 states)")]
    NfaTooLarge,

    /// The DFA needs more than [`MAX_STATES`] states.
    #[error("DFA too large (max: 64 states)")]
    DfaTooLarge,
}

/// Groups a dense transition table into maximal runs of consecutive bytes
/// that share a target, for the automaton dumps.
fn byte_ranges(
    transitions: &[Option<StateId>; 256],
) -> Vec<(u8, u8, StateId)> {
    use itertools::Itertools;

    transitions
        .iter()
        .enumerate()
        .filter_map(|(byte, &target)| {
            target.map(|t| (byte as u8, byte as u8, t))
        })
        .coalesce(|(lo1, hi1, t1), (lo2, hi2, t2)| {
            if t1 == t2 && lo2 as usize == hi1 as usize + 1 {
                Ok((lo1, hi2, t1))
            } else {
                Err(((lo1, hi1, t1), (lo2, hi2, t2)))
            }
        })
        .collect()
}

/// Formats a byte for the automaton dumps: printable ASCII as the character
/// itself, everything else in hex.
fn fmt_byte(byte: u8) -> String {
    if byte.is_ascii_graphic() {
        format!("'{}'", byte as char)
    } else {
        format!("{:#04x}", byte)
    }
}
