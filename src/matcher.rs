//! Compiled patterns and the matching walk.

use crate::dfa::{Dfa, StateId};
use crate::error::CompileError;
use crate::nfa::Nfa;
use crate::parser;

/// Default ceiling on automaton size, applied to both the NFA and the
/// DFA.  Counted repetitions and determinization can otherwise blow up
/// on short patterns.
pub const DEFAULT_MAX_STATES: usize = 16_384;

/// Compile `pattern` with the default state ceiling.
pub fn compile(pattern: &str) -> Result<Regex, CompileError> {
    Regex::new(pattern)
}

/// A compiled regular expression.
///
/// Matching is one greedy pass over the DFA: starting from the start
/// state, an edge is followed whenever the current state has one for the
/// next character, and acceptance is judged at the state where the walk
/// stops.  There is no backtracking, which cuts both ways:
///
/// * the walk can be dragged past a shorter match into a dead end, so
///   `(?:aa)*` reports no match on `"aaa"` even though `"aa"` is in the
///   language;
/// * input left over after the walk stops is not held against the
///   match, so `a+` matches `"aab"`.
///
/// [`Regex::is_full_match`] is the stricter alternative that requires
/// the whole input to be accepted.
#[derive(Debug)]
pub struct Regex {
    pattern: String,
    dfa: Dfa,
}

impl Regex {
    /// Compile with [`DEFAULT_MAX_STATES`].
    pub fn new(pattern: &str) -> Result<Regex, CompileError> {
        Regex::with_max_states(pattern, DEFAULT_MAX_STATES)
    }

    /// Compile with an explicit ceiling on automaton size.
    pub fn with_max_states(pattern: &str, max_states: usize) -> Result<Regex, CompileError> {
        let ast = parser::parse(pattern)?;
        let nfa = Nfa::thompson(&ast, max_states)?;
        let dfa = Dfa::determinize(&nfa, max_states)?;
        Ok(Regex {
            pattern: pattern.to_string(),
            dfa,
        })
    }

    /// The pattern this regex was compiled from.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// True when the greedy walk stops on an accepting state.
    pub fn is_match(&self, input: &str) -> bool {
        let (state, _) = self.walk(input);
        self.dfa.is_accepting(state)
    }

    /// The number of characters the greedy walk consumed, if it stopped
    /// on an accepting state.
    pub fn match_pos(&self, input: &str) -> Option<usize> {
        let (state, consumed) = self.walk(input);
        self.dfa.is_accepting(state).then_some(consumed)
    }

    /// Whole-input acceptance: every character must be consumed and the
    /// final state must accept.
    pub fn is_full_match(&self, input: &str) -> bool {
        let mut state = self.dfa.start();
        for c in input.chars() {
            match self.dfa.edge(state, c) {
                Some(next) => state = next,
                None => return false,
            }
        }
        self.dfa.is_accepting(state)
    }

    /// Follow edges while one exists and input remains.
    fn walk(&self, input: &str) -> (StateId, usize) {
        let mut state = self.dfa.start();
        let mut consumed = 0;
        for c in input.chars() {
            match self.dfa.edge(state, c) {
                Some(next) => {
                    state = next;
                    consumed += 1;
                }
                None => break,
            }
        }
        (state, consumed)
    }
}
