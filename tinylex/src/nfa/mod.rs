//! The NFA data structure, ε-closure, and subset construction into a [`Dfa`].
//!
//! States are plain `usize`s with contiguous numbering from a compile-time
//! offset (see [`crate::regex::Regex::thompson`]) -- this replaces pointer
//! identity entirely. Transitions are keyed by `(state, symbol)`, with
//! `None` standing for ε; the absence of a key means "no transition".

use crate::dfa::Dfa;
use std::collections::{BTreeSet, HashMap, VecDeque};

/// An NFA state identifier.
pub type StateId = usize;

/// A nondeterministic finite automaton with ε-transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nfa {
    pub(crate) alphabet: BTreeSet<char>,
    pub(crate) states: BTreeSet<StateId>,
    pub(crate) initial: StateId,
    pub(crate) accept: BTreeSet<StateId>,
    pub(crate) transitions: HashMap<(StateId, Option<char>), BTreeSet<StateId>>,
}

impl Nfa {
    /// The alphabet Σ (never includes the ε sentinel).
    pub fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    /// The state set K.
    pub fn states(&self) -> &BTreeSet<StateId> {
        &self.states
    }

    pub fn initial(&self) -> StateId {
        self.initial
    }

    pub fn accept(&self) -> &BTreeSet<StateId> {
        &self.accept
    }

    /// `δ(state, symbol)`. Returns an empty set for a missing entry.
    pub fn delta(&self, state: StateId, symbol: Option<char>) -> BTreeSet<StateId> {
        self.transitions
            .get(&(state, symbol))
            .cloned()
            .unwrap_or_default()
    }

    /// The sole accept state of a single-fragment NFA (e.g. one produced by
    /// [`crate::regex::Regex::thompson`]). Debug-asserts the contiguity
    /// invariant that such a fragment has exactly one accept state.
    pub(crate) fn sole_accept(&self) -> StateId {
        debug_assert_eq!(
            self.accept.len(),
            1,
            "a Thompson fragment must have exactly one accept state"
        );
        *self.accept.iter().next().unwrap()
    }

    /// `εclose(q)`: the minimal set containing `q` and closed under `δ(_, ε)`.
    pub fn epsilon_closure(&self, state: StateId) -> BTreeSet<StateId> {
        let mut closure = BTreeSet::new();
        closure.insert(state);
        let mut frontier = vec![state];
        while let Some(s) = frontier.pop() {
            for next in self.delta(s, None) {
                if closure.insert(next) {
                    frontier.push(next);
                }
            }
        }
        closure
    }

    /// Precomputes [`Nfa::epsilon_closure`] for every state in `K`.
    pub fn closures(&self) -> HashMap<StateId, BTreeSet<StateId>> {
        self.states
            .iter()
            .map(|&s| (s, self.epsilon_closure(s)))
            .collect()
    }

    /// Determinizes this NFA into a [`Dfa`] via subset construction (§4.4):
    /// DFA states are frozen sets of NFA states, the start state is
    /// `εclose(q0)`, and transitions are `move` followed by `εclose`. The
    /// worklist is unbounded (a `VecDeque`), not sized by `1 << |K|`.
    pub fn to_dfa(&self) -> Dfa {
        let closures = self.closures();
        let start: BTreeSet<StateId> = closures.get(&self.initial).cloned().unwrap_or_default();

        let mut states: BTreeSet<BTreeSet<StateId>> = BTreeSet::new();
        let mut transitions: HashMap<(BTreeSet<StateId>, char), BTreeSet<StateId>> =
            HashMap::new();
        let mut worklist: VecDeque<BTreeSet<StateId>> = VecDeque::new();

        states.insert(start.clone());
        worklist.push_back(start.clone());

        while let Some(group) = worklist.pop_front() {
            for &c in &self.alphabet {
                let moved: BTreeSet<StateId> =
                    group.iter().flat_map(|&s| self.delta(s, Some(c))).collect();
                let target: BTreeSet<StateId> = moved
                    .iter()
                    .flat_map(|s| closures.get(s).cloned().unwrap_or_default())
                    .collect();
                if states.insert(target.clone()) {
                    worklist.push_back(target.clone());
                }
                transitions.insert((group.clone(), c), target);
            }
        }

        let accept: BTreeSet<BTreeSet<StateId>> = states
            .iter()
            .filter(|group| !group.is_disjoint(&self.accept))
            .cloned()
            .collect();

        Dfa::new(self.alphabet.clone(), states, start, accept, transitions)
    }

    /// An NFA fragment consisting of a single state that is both initial and
    /// accepting (Thompson's construction for `Epsilon`).
    pub(crate) fn epsilon_fragment(q0: StateId) -> Nfa {
        let mut states = BTreeSet::new();
        states.insert(q0);
        let mut accept = BTreeSet::new();
        accept.insert(q0);
        Nfa {
            alphabet: BTreeSet::new(),
            states,
            initial: q0,
            accept,
            transitions: HashMap::new(),
        }
    }

    /// A two-state fragment with a single transition `q0 --c--> q0+1`
    /// (Thompson's construction for `Char`).
    pub(crate) fn char_fragment(q0: StateId, c: char) -> Nfa {
        Self::charset_fragment(q0, std::iter::once(c))
    }

    /// A two-state fragment with a transition `q0 --s--> q0+1` for every `s`
    /// in `chars` (Thompson's construction for `CharSet`).
    pub(crate) fn charset_fragment(q0: StateId, chars: impl Iterator<Item = char>) -> Nfa {
        let q1 = q0 + 1;
        let mut alphabet = BTreeSet::new();
        let mut targets = BTreeSet::new();
        targets.insert(q1);
        let mut transitions = HashMap::new();
        for c in chars {
            alphabet.insert(c);
            transitions.insert((q0, Some(c)), targets.clone());
        }
        let mut states = BTreeSet::new();
        states.insert(q0);
        states.insert(q1);
        let mut accept = BTreeSet::new();
        accept.insert(q1);
        Nfa {
            alphabet,
            states,
            initial: q0,
            accept,
            transitions,
        }
    }

    /// Merges another NFA fragment (with a disjoint state range) into this
    /// one, unioning alphabets, states, and transitions. Does not touch
    /// `initial`/`accept` -- callers set those explicitly once the scaffold
    /// states for the enclosing construct are known.
    pub(crate) fn merged_with(mut self, other: Nfa) -> Nfa {
        self.alphabet.extend(other.alphabet);
        self.states.extend(other.states);
        for (key, targets) in other.transitions {
            self.transitions.entry(key).or_default().extend(targets);
        }
        self
    }

    pub(crate) fn add_state(&mut self, q: StateId) {
        self.states.insert(q);
    }

    pub(crate) fn add_epsilon(&mut self, from: StateId, to: StateId) {
        self.transitions
            .entry((from, None))
            .or_default()
            .insert(to);
    }

    pub(crate) fn set_initial(&mut self, q: StateId) {
        self.initial = q;
    }

    pub(crate) fn set_accept(&mut self, accept: BTreeSet<StateId>) {
        self.accept = accept;
    }

    pub(crate) fn accept_mut(&mut self) -> &mut BTreeSet<StateId> {
        &mut self.accept
    }

    /// An NFA with a single, transition-free state, used as the seed
    /// accumulator when composing several token NFAs under a shared start
    /// state (§4.5).
    pub(crate) fn empty_start(q0: StateId) -> Nfa {
        let mut states = BTreeSet::new();
        states.insert(q0);
        Nfa {
            alphabet: BTreeSet::new(),
            states,
            initial: q0,
            accept: BTreeSet::new(),
            transitions: HashMap::new(),
        }
    }
}
