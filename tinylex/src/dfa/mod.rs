//! The DFA data structure.
//!
//! A DFA state is literally a frozen set of NFA state ids (`BTreeSet<usize>`)
//! used directly as a map key, rather than a separately-allocated integer id
//! -- two equal-content sets collapse to the same DFA node simply because
//! `BTreeSet`'s `Eq`/`Hash`/`Ord` already treat them as equal. The empty set
//! is the sink: a state with no accept states and, implicitly, a self-loop
//! on every symbol (any missing transition entry targets it again).

use crate::nfa::StateId;
use std::collections::{BTreeSet, HashMap};

/// A DFA state: a frozen set of NFA state ids. The empty set is the sink.
pub type DfaState = BTreeSet<StateId>;

/// A deterministic finite automaton whose states are frozen sets of NFA
/// states, produced by [`crate::nfa::Nfa::to_dfa`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa {
    pub(crate) alphabet: BTreeSet<char>,
    pub(crate) states: BTreeSet<DfaState>,
    pub(crate) initial: DfaState,
    pub(crate) accept: BTreeSet<DfaState>,
    pub(crate) transitions: HashMap<(DfaState, char), DfaState>,
}

impl Dfa {
    pub(crate) fn new(
        alphabet: BTreeSet<char>,
        states: BTreeSet<DfaState>,
        initial: DfaState,
        accept: BTreeSet<DfaState>,
        transitions: HashMap<(DfaState, char), DfaState>,
    ) -> Dfa {
        Dfa {
            alphabet,
            states,
            initial,
            accept,
            transitions,
        }
    }

    pub fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    pub fn states(&self) -> &BTreeSet<DfaState> {
        &self.states
    }

    pub fn initial(&self) -> &DfaState {
        &self.initial
    }

    pub fn accept(&self) -> &BTreeSet<DfaState> {
        &self.accept
    }

    /// `δ_DFA(state, c)`. A missing entry maps to the sink (the empty set),
    /// matching the DFA's total-transition-function invariant.
    pub fn step(&self, state: &DfaState, c: char) -> DfaState {
        self.transitions
            .get(&(state.clone(), c))
            .cloned()
            .unwrap_or_default()
    }

    pub fn is_accepting(&self, state: &DfaState) -> bool {
        self.accept.contains(state)
    }

    /// The sink state: the empty frozen set, accept-free by construction.
    pub fn sink(&self) -> DfaState {
        BTreeSet::new()
    }

    /// Simulates the DFA over `word`, returning whether it lands in an
    /// accept state after consuming every character. `word` is split into
    /// `char`s; characters outside the alphabet dead-end at the sink like
    /// any other missing transition.
    pub fn accepts(&self, word: &str) -> bool {
        let mut state = self.initial.clone();
        for c in word.chars() {
            state = self.step(&state, c);
            if state.is_empty() {
                return false;
            }
        }
        self.is_accepting(&state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regex::Regex;

    #[test]
    fn sink_state_is_the_empty_set_and_is_accept_free() {
        let dfa = Regex::parse("a").unwrap().thompson(0).to_dfa();
        let sink = dfa.sink();
        assert!(sink.is_empty());
        assert!(!dfa.is_accepting(&sink));
    }

    #[test]
    fn dead_end_on_out_of_alphabet_character() {
        let dfa = Regex::parse("a").unwrap().thompson(0).to_dfa();
        assert!(!dfa.accepts("b"));
        assert!(!dfa.accepts("ab"));
    }
}
