//! Thompson's construction: compiles a [`Regex`] into an [`Nfa`].
//!
//! Every compile is parameterized by a starting state id `q0` to permit
//! composition without collisions (§4.2). For a subexpression that consumes
//! `n` states, the resulting NFA's states are the contiguous range
//! `[q0, q0+n-1]`, with `q0` as initial and `q0+n-1` as the sole accept --
//! this is what makes trivial offsetting during composition possible.

use crate::nfa::{Nfa, StateId};
use crate::regex::Regex;
use std::collections::BTreeSet;

impl Regex {
    /// Compiles this regex into an NFA fragment whose states are the
    /// contiguous range starting at `q0`.
    pub fn thompson(&self, q0: StateId) -> Nfa {
        match self {
            Regex::Epsilon => Nfa::epsilon_fragment(q0),
            Regex::Char(c) => Nfa::char_fragment(q0, *c),
            Regex::CharSet(set) => Nfa::charset_fragment(q0, set.chars()),
            Regex::Concat(a, b) => Self::thompson_concat(a, b, q0),
            Regex::Union(a, b) => Self::thompson_union(a, b, q0),
            Regex::Star(r) => Self::thompson_star(r, q0),
        }
    }

    fn thompson_concat(a: &Regex, b: &Regex, q0: StateId) -> Nfa {
        let nfa_a = a.thompson(q0);
        let qf_a = nfa_a.sole_accept();
        let b_q0 = qf_a + 1;
        let nfa_b = b.thompson(b_q0);
        let qf_b = nfa_b.sole_accept();

        let mut nfa = nfa_a.merged_with(nfa_b);
        nfa.add_epsilon(qf_a, b_q0);
        nfa.set_initial(q0);
        nfa.set_accept(BTreeSet::from([qf_b]));
        nfa
    }

    fn thompson_union(a: &Regex, b: &Regex, q0: StateId) -> Nfa {
        let a_q0 = q0 + 1;
        let nfa_a = a.thompson(a_q0);
        let qf_a = nfa_a.sole_accept();
        let b_q0 = qf_a + 1;
        let nfa_b = b.thompson(b_q0);
        let qf_b = nfa_b.sole_accept();
        let qf = qf_b + 1;

        let mut nfa = nfa_a.merged_with(nfa_b);
        nfa.add_state(q0);
        nfa.add_state(qf);
        nfa.add_epsilon(q0, a_q0);
        nfa.add_epsilon(q0, b_q0);
        nfa.add_epsilon(qf_a, qf);
        nfa.add_epsilon(qf_b, qf);
        nfa.set_initial(q0);
        nfa.set_accept(BTreeSet::from([qf]));
        nfa
    }

    fn thompson_star(r: &Regex, q0: StateId) -> Nfa {
        let r_q0 = q0 + 1;
        let nfa_r = r.thompson(r_q0);
        let qf_r = nfa_r.sole_accept();
        let qf = qf_r + 1;

        let mut nfa = nfa_r;
        nfa.add_state(q0);
        nfa.add_state(qf);
        nfa.add_epsilon(q0, r_q0);
        nfa.add_epsilon(q0, qf);
        nfa.add_epsilon(qf_r, r_q0);
        nfa.add_epsilon(qf_r, qf);
        nfa.set_initial(q0);
        nfa.set_accept(BTreeSet::from([qf]));
        nfa
    }
}
