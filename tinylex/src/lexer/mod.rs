//! Composes per-token NFAs under a shared start state, determinizes the
//! result, and performs longest-prefix-match tokenization (§4.5-§4.7).

mod error;

pub use error::{LexError, LexErrorColumn};

use crate::dfa::{Dfa, DfaState};
use crate::nfa::Nfa;
use crate::regex::{Regex, RegexParseError};
use std::collections::HashMap;

/// A lexer compiled from a [`LexerSpec`](compile)-shaped `&[(Token, &str)]`:
/// an immutable DFA plus the map from accepting DFA state to the token it
/// realizes (§3's `CompiledLexer`).
///
/// Built once by [`compile`]; tokenization (`lex`) only touches per-call
/// local state, so a `CompiledLexer` is freely shareable among concurrent
/// readers (§5).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledLexer<Token> {
    dfa: Dfa,
    accept_token: HashMap<DfaState, usize>,
    token_names: Vec<Token>,
}

/// Compiles an ordered `[(TokenName, regexText)]` spec into a
/// [`CompiledLexer`] (§4.5). Order is significant: earlier entries win
/// ties between equally-long matches (specification priority).
///
/// Fails fast: the first malformed regex aborts compilation of the whole
/// spec (§7).
pub fn compile<Token: Clone>(
    spec: &[(Token, &str)],
) -> Result<CompiledLexer<Token>, RegexParseError> {
    let mut nfa = Nfa::empty_start(0);
    let mut accept_from_nfa_state = HashMap::new();
    let mut next_free = 1usize;

    for (index, (_, pattern)) in spec.iter().enumerate() {
        let tree = Regex::parse(pattern)?;
        let frag_q0 = next_free;
        let frag = tree.thompson(frag_q0);
        let frag_accept = frag.sole_accept();
        accept_from_nfa_state.insert(frag_accept, index);
        next_free = frag_accept + 1;

        nfa.add_epsilon(0, frag_q0);
        nfa.accept_mut().insert(frag_accept);
        nfa = nfa.merged_with(frag);
    }

    let dfa = nfa.to_dfa();

    // §4.5 point 5: a DFA state maps to the smallest token index among the
    // NFA accept states it contains (specification priority).
    let accept_token: HashMap<DfaState, usize> = dfa
        .states()
        .iter()
        .filter_map(|state| {
            state
                .iter()
                .filter_map(|nfa_state| accept_from_nfa_state.get(nfa_state).copied())
                .min()
                .map(|token_index| (state.clone(), token_index))
        })
        .collect();

    let token_names = spec.iter().map(|(token, _)| token.clone()).collect();

    Ok(CompiledLexer {
        dfa,
        accept_token,
        token_names,
    })
}

impl<Token: Clone> CompiledLexer<Token> {
    /// Tokenizes `input` by repeated longest-prefix match (§4.7). On
    /// success, every character of `input` is accounted for by some token;
    /// on failure, returns the first lexical error encountered.
    pub fn lex(&self, input: &str) -> Result<Vec<(Token, String)>, LexError> {
        let chars: Vec<char> = input.chars().collect();
        let mut remaining: &[char] = &chars;
        let mut abs_index = 0usize;
        let mut tokens = Vec::new();

        while !remaining.is_empty() {
            let (accept, len) = self.longest_prefix_match(remaining);
            abs_index += len;

            let Some(state) = accept else {
                let is_eof = len == remaining.len();
                return Err(self.error_at(input, abs_index, is_eof));
            };

            if len == 0 {
                // Zero-length accepts (e.g. an `eps` token) would otherwise
                // never make progress. Treated as a lexical error rather
                // than looping forever.
                return Err(self.error_at(input, abs_index, false));
            }

            let token_index = *self
                .accept_token
                .get(&state)
                .expect("an accepting DFA state must have a token mapping");
            let lexeme: String = remaining[..len].iter().collect();
            tokens.push((self.token_names[token_index].clone(), lexeme));
            remaining = &remaining[len..];
        }

        Ok(tokens)
    }

    /// Longest-prefix match (`lpm`, §4.6): scans `word` from the DFA's
    /// start state, remembering the last position at which an accept state
    /// was reached. Stops at the first dead end (the sink, or a missing
    /// transition) or at end of input.
    fn longest_prefix_match(&self, word: &[char]) -> (Option<DfaState>, usize) {
        let mut current = self.dfa.initial().clone();
        let mut best: Option<(DfaState, usize)> = if self.dfa.is_accepting(&current) {
            Some((current.clone(), 0))
        } else {
            None
        };

        for (i, &c) in word.iter().enumerate() {
            let next = self.dfa.step(&current, c);
            if self.dfa.is_accepting(&next) {
                best = Some((next.clone(), i + 1));
            }
            if next.is_empty() {
                return match best {
                    Some((state, len)) => (Some(state), len),
                    None => (None, i),
                };
            }
            current = next;
        }

        match best {
            Some((state, len)) => (Some(state), len),
            None => (None, word.len()),
        }
    }

    /// Computes `(line, column)` from an absolute character index by
    /// folding over `input.split('\n')` line lengths, matching §4.7/§9's
    /// fold-based recompute (never mutates lexer state).
    fn error_at(&self, input: &str, abs_index: usize, is_eof: bool) -> LexError {
        let line_lengths: Vec<usize> = input.split('\n').map(|l| l.chars().count()).collect();
        let mut col = abs_index as isize;
        let mut line = 0usize;
        for (i, &line_len) in line_lengths.iter().enumerate() {
            line = i;
            if i > 0 {
                col -= 1;
            }
            if col < line_len as isize {
                break;
            }
            col -= line_len as isize;
        }
        let column = if is_eof {
            LexErrorColumn::Eof
        } else {
            LexErrorColumn::Column(col.max(0) as usize)
        };
        LexError::NoViableAlternative { line, column }
    }
}
