//! Subset construction: determinizing an [`Nfa`].
//!
//! Each DFA state stands for one epsilon-closed set of NFA states.  The
//! canonical sorted set is the memo key, and a freshly allocated state is
//! registered in the memo before its successors are explored, so the
//! cycles a star introduces close back on existing states instead of
//! recursing forever.

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

use crate::error::CompileError;
use crate::nfa::{self, Nfa, pretty_char};

/// Index of a state in a [`Dfa`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(usize);

#[derive(Debug, Default)]
struct State {
    /// Exactly one target per character; determinism holds by shape.
    edges: BTreeMap<char, StateId>,
    accepting: bool,
}

/// A deterministic finite automaton.
#[derive(Debug)]
pub struct Dfa {
    states: Vec<State>,
    start: StateId,
}

impl Dfa {
    /// Determinize `nfa`.
    ///
    /// The result can be exponentially larger than the input in the
    /// worst case, so the same `max_states` ceiling applies here as in
    /// the NFA builder.
    pub fn determinize(nfa: &Nfa, max_states: usize) -> Result<Dfa, CompileError> {
        let mut det = Determinizer {
            nfa,
            states: Vec::new(),
            cache: HashMap::new(),
            max_states,
        };
        let start = det.transform(&BTreeSet::from([nfa.start()]))?;
        Ok(Dfa {
            states: det.states,
            start,
        })
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn is_accepting(&self, id: StateId) -> bool {
        self.states[id.0].accepting
    }

    /// The unique successor of `id` over `c`, if any.
    pub fn edge(&self, id: StateId, c: char) -> Option<StateId> {
        self.states[id.0].edges.get(&c).copied()
    }

    /// Render the automaton with states numbered in breadth-first
    /// discovery order from the start state.
    pub fn dump(&self) -> String {
        let mut ids: HashMap<StateId, usize> = HashMap::new();
        let mut order: Vec<StateId> = Vec::new();
        let mut queue: VecDeque<StateId> = VecDeque::new();
        ids.insert(self.start, 0);
        queue.push_back(self.start);
        while let Some(id) = queue.pop_front() {
            order.push(id);
            for &next in self.states[id.0].edges.values() {
                let n = ids.len();
                if let Entry::Vacant(entry) = ids.entry(next) {
                    entry.insert(n);
                    queue.push_back(next);
                }
            }
        }

        let mut out = String::new();
        out.push_str(&format!("DFA: total nodes = {}\n", order.len()));
        for (n, &id) in order.iter().enumerate() {
            let state = &self.states[id.0];
            out.push_str(&format!("  [{n}]"));
            if state.accepting {
                out.push_str(" (ACCEPT)");
            }
            out.push('\n');
            for (&c, &next) in &state.edges {
                out.push_str(&format!("     -{}-> [{}]\n", pretty_char(c), ids[&next]));
            }
        }
        out
    }
}

struct Determinizer<'a> {
    nfa: &'a Nfa,
    states: Vec<State>,
    cache: HashMap<BTreeSet<nfa::StateId>, StateId>,
    max_states: usize,
}

impl Determinizer<'_> {
    /// The DFA state for the given set of NFA states, building it and
    /// its successors on first sight.
    fn transform(&mut self, nodes: &BTreeSet<nfa::StateId>) -> Result<StateId, CompileError> {
        let closure = self.nfa.epsilon_closure(nodes);
        if let Some(&id) = self.cache.get(&closure) {
            return Ok(id);
        }
        if self.states.len() >= self.max_states {
            return Err(CompileError::StateLimitExceeded {
                limit: self.max_states,
            });
        }

        let id = StateId(self.states.len());
        let accepting = closure.iter().any(|&n| self.nfa.is_accepting(n));
        self.states.push(State {
            edges: BTreeMap::new(),
            accepting,
        });
        // A cycle leading back to this closure must find it in the memo.
        self.cache.insert(closure.clone(), id);

        let mut moves: BTreeMap<char, BTreeSet<nfa::StateId>> = BTreeMap::new();
        for &node in &closure {
            for (&c, targets) in self.nfa.edges(node) {
                moves.entry(c).or_default().extend(targets.iter().copied());
            }
        }
        for (c, move_set) in moves {
            let target = self.transform(&move_set)?;
            self.states[id.0].edges.insert(c, target);
        }
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    fn dfa(pattern: &str) -> Dfa {
        let ast = parser::parse(pattern).expect("parse should succeed");
        let nfa = Nfa::thompson(&ast, 1024).expect("automaton should fit");
        Dfa::determinize(&nfa, 1024).expect("determinization should fit")
    }

    /// Whole-input acceptance, straight off the automaton.
    fn accepts(d: &Dfa, input: &str) -> bool {
        let mut state = d.start();
        for c in input.chars() {
            match d.edge(state, c) {
                Some(next) => state = next,
                None => return false,
            }
        }
        d.is_accepting(state)
    }

    // --- State sharing ---

    #[test]
    fn test_star_collapses_to_two_states() {
        let d = dfa("a*");
        assert_eq!(d.state_count(), 2);
        assert!(d.is_accepting(d.start()));
        let looped = d.edge(d.start(), 'a').expect("edge over 'a'");
        assert_eq!(d.edge(looped, 'a'), Some(looped));
    }

    #[test]
    fn test_same_pattern_dumps_identically() {
        assert_eq!(dfa("gr(a|e)y").dump(), dfa("gr(a|e)y").dump());
    }

    // --- Language checks ---

    #[test]
    fn test_star_cycle_terminates_and_accepts() {
        let d = dfa("(?:ab)*");
        assert!(accepts(&d, ""));
        assert!(accepts(&d, "ab"));
        assert!(accepts(&d, "abab"));
        assert!(!accepts(&d, "a"));
        assert!(!accepts(&d, "aba"));
    }

    #[test]
    fn test_optional_suffix() {
        let d = dfa("a?");
        assert!(accepts(&d, ""));
        assert!(accepts(&d, "a"));
        assert!(!accepts(&d, "aa"));
    }

    #[test]
    fn test_bounded_repeat_window() {
        let d = dfa("a{2,4}");
        assert!(!accepts(&d, "a"));
        assert!(accepts(&d, "aa"));
        assert!(accepts(&d, "aaa"));
        assert!(accepts(&d, "aaaa"));
        assert!(!accepts(&d, "aaaaa"));
    }

    #[test]
    fn test_alternation_of_class_and_literal() {
        let d = dfa("[b-chm-pP]at|ot");
        assert!(accepts(&d, "bat"));
        assert!(accepts(&d, "Pat"));
        assert!(accepts(&d, "nat"));
        assert!(accepts(&d, "ot"));
        assert!(!accepts(&d, "at"));
        assert!(!accepts(&d, "zat"));
    }

    // --- Limits ---

    #[test]
    fn test_state_limit_stops_determinization() {
        let ast = parser::parse("abc").expect("parse should succeed");
        let nfa = Nfa::thompson(&ast, 1024).expect("automaton should fit");
        let err = Dfa::determinize(&nfa, 3).expect_err("limit should trip");
        assert_eq!(err, CompileError::StateLimitExceeded { limit: 3 });
    }

    // --- Dump ---

    #[test]
    fn test_dump_format() {
        assert_eq!(
            dfa("a*").dump(),
            "DFA: total nodes = 2\n\
             \x20 [0] (ACCEPT)\n\
             \x20    -a-> [1]\n\
             \x20 [1] (ACCEPT)\n\
             \x20    -a-> [1]\n"
        );
    }
}
