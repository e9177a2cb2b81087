//! Thompson construction of a nondeterministic automaton.
//!
//! States live in a flat arena indexed by [`StateId`]; fragments under
//! construction are `(start, end)` pairs into that arena.  Every syntax
//! tree node becomes a small fragment with one entry and one exit, and
//! the overall exit is the automaton's single accepting state.  The only
//! cycles in the graph come from the star loop-back edge.

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

use crate::ast::Ast;
use crate::error::CompileError;

/// Index of a state in an [`Nfa`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(usize);

#[derive(Debug, Default)]
struct State {
    /// Character edges; a character may lead to several states.
    edges: BTreeMap<char, Vec<StateId>>,
    epsilon: Vec<StateId>,
    accepting: bool,
}

/// A nondeterministic finite automaton with a single accepting state.
#[derive(Debug)]
pub struct Nfa {
    states: Vec<State>,
    start: StateId,
}

impl Nfa {
    /// Build the automaton for `ast`.
    ///
    /// Counted repetitions lay down one sub-automaton per copy, so state
    /// count grows with the bounds; construction stops with
    /// [`CompileError::StateLimitExceeded`] once `max_states` is reached.
    pub fn thompson(ast: &Ast, max_states: usize) -> Result<Nfa, CompileError> {
        let mut builder = Builder {
            states: Vec::new(),
            max_states,
        };
        let frag = builder.fragment(ast)?;
        builder.states[frag.end.0].accepting = true;
        Ok(Nfa {
            states: builder.states,
            start: frag.start,
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

    pub(crate) fn edges(&self, id: StateId) -> &BTreeMap<char, Vec<StateId>> {
        &self.states[id.0].edges
    }

    pub(crate) fn epsilon(&self, id: StateId) -> &[StateId] {
        &self.states[id.0].epsilon
    }

    /// The set of states reachable from `nodes` through epsilon edges
    /// alone.  Always a superset of the input; applying it twice changes
    /// nothing.
    pub fn epsilon_closure(&self, nodes: &BTreeSet<StateId>) -> BTreeSet<StateId> {
        let mut closure = nodes.clone();
        let mut stack: Vec<StateId> = nodes.iter().copied().collect();
        while let Some(id) = stack.pop() {
            for &next in self.epsilon(id) {
                if closure.insert(next) {
                    stack.push(next);
                }
            }
        }
        closure
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
            let state = &self.states[id.0];
            let neighbours = state
                .edges
                .values()
                .flatten()
                .chain(state.epsilon.iter())
                .copied();
            for next in neighbours {
                let n = ids.len();
                if let Entry::Vacant(entry) = ids.entry(next) {
                    entry.insert(n);
                    queue.push_back(next);
                }
            }
        }

        let mut out = String::new();
        out.push_str(&format!("NFA: total nodes = {}\n", order.len()));
        for (n, &id) in order.iter().enumerate() {
            let state = &self.states[id.0];
            out.push_str(&format!("  [{n}]"));
            if state.accepting {
                out.push_str(" (ACCEPT)");
            }
            out.push('\n');
            for (&c, targets) in &state.edges {
                for &next in targets {
                    out.push_str(&format!("     -{}-> [{}]\n", pretty_char(c), ids[&next]));
                }
            }
            for &next in &state.epsilon {
                out.push_str(&format!("     -Epsilon-> [{}]\n", ids[&next]));
            }
        }
        out
    }
}

/// Printable rendering of an edge character for dumps.
pub(crate) fn pretty_char(c: char) -> String {
    match c {
        '\n' => "\\n".to_string(),
        '\r' => "\\r".to_string(),
        '\t' => "\\t".to_string(),
        '\\' => "\\\\".to_string(),
        '"' => "\\\"".to_string(),
        c if c.is_ascii_graphic() || c == ' ' => c.to_string(),
        c => format!("\\x{:X}", c as u32),
    }
}

/// A sub-automaton: entry and exit states in the arena being built.
#[derive(Clone, Copy)]
struct Fragment {
    start: StateId,
    end: StateId,
}

struct Builder {
    states: Vec<State>,
    max_states: usize,
}

impl Builder {
    fn state(&mut self) -> Result<StateId, CompileError> {
        if self.states.len() >= self.max_states {
            return Err(CompileError::StateLimitExceeded {
                limit: self.max_states,
            });
        }
        let id = StateId(self.states.len());
        self.states.push(State::default());
        Ok(id)
    }

    fn edge(&mut self, from: StateId, c: char, to: StateId) {
        self.states[from.0].edges.entry(c).or_default().push(to);
    }

    fn epsilon(&mut self, from: StateId, to: StateId) {
        self.states[from.0].epsilon.push(to);
    }

    fn fragment(&mut self, ast: &Ast) -> Result<Fragment, CompileError> {
        match ast {
            Ast::Empty => {
                let start = self.state()?;
                let end = self.state()?;
                self.epsilon(start, end);
                Ok(Fragment { start, end })
            }
            Ast::Char(c) => {
                let start = self.state()?;
                let end = self.state()?;
                self.edge(start, *c, end);
                Ok(Fragment { start, end })
            }
            Ast::Set(elements) => {
                // One private midpoint per element, all converging on end.
                let start = self.state()?;
                let end = self.state()?;
                for &c in elements {
                    let mid = self.state()?;
                    self.edge(start, c, mid);
                    self.epsilon(mid, end);
                }
                Ok(Fragment { start, end })
            }
            Ast::Repeat { body, min, max } => {
                // A chain of `min` mandatory copies, then `max - min`
                // optional ones, each able to short-circuit to end.
                let start = self.state()?;
                let end = self.state()?;
                let mut tail = start;
                for _ in 0..*min {
                    let copy = self.fragment(body)?;
                    self.epsilon(tail, copy.start);
                    tail = copy.end;
                }
                self.epsilon(tail, end);
                for _ in *min..*max {
                    let copy = self.fragment(body)?;
                    self.epsilon(tail, copy.start);
                    tail = copy.end;
                    self.epsilon(tail, end);
                }
                Ok(Fragment { start, end })
            }
            Ast::Star(body) => {
                let start = self.state()?;
                let end = self.state()?;
                self.epsilon(start, end);
                let inner = self.fragment(body)?;
                self.epsilon(start, inner.start);
                self.epsilon(inner.end, end);
                // the loop-back edge, sole source of cycles
                self.epsilon(inner.end, inner.start);
                Ok(Fragment { start, end })
            }
            Ast::Concat(left, right) => {
                let l = self.fragment(left)?;
                let r = self.fragment(right)?;
                self.epsilon(l.end, r.start);
                Ok(Fragment {
                    start: l.start,
                    end: r.end,
                })
            }
            Ast::Or(left, right) => {
                let start = self.state()?;
                let end = self.state()?;
                let l = self.fragment(left)?;
                let r = self.fragment(right)?;
                self.epsilon(start, l.start);
                self.epsilon(l.end, end);
                self.epsilon(start, r.start);
                self.epsilon(r.end, end);
                Ok(Fragment { start, end })
            }
            // Grouping has no automaton of its own.
            Ast::Group(body) | Ast::NonCapturingGroup(body) => self.fragment(body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    fn nfa(pattern: &str) -> Nfa {
        let ast = parser::parse(pattern).expect("parse should succeed");
        Nfa::thompson(&ast, 1024).expect("automaton should fit")
    }

    fn start_closure(n: &Nfa) -> BTreeSet<StateId> {
        n.epsilon_closure(&BTreeSet::from([n.start()]))
    }

    fn contains_accepting(n: &Nfa, set: &BTreeSet<StateId>) -> bool {
        set.iter().any(|&id| n.is_accepting(id))
    }

    // --- Fragment shapes ---

    #[test]
    fn test_char_is_two_states() {
        let n = nfa("a");
        assert_eq!(n.state_count(), 2);
        assert!(!contains_accepting(&n, &start_closure(&n)));
        let targets = &n.edges(n.start())[&'a'];
        assert_eq!(targets.len(), 1);
        assert!(n.is_accepting(targets[0]));
    }

    #[test]
    fn test_empty_accepts_without_consuming() {
        let n = nfa("");
        assert_eq!(n.state_count(), 2);
        assert!(contains_accepting(&n, &start_closure(&n)));
    }

    #[test]
    fn test_set_fans_out_through_midpoints() {
        let n = nfa("[abc]");
        // start, end and one midpoint per element
        assert_eq!(n.state_count(), 5);
        let keys: Vec<char> = n.edges(n.start()).keys().copied().collect();
        assert_eq!(keys, vec!['a', 'b', 'c']);
    }

    #[test]
    fn test_repeat_lays_down_one_copy_per_count() {
        // outer pair plus four copies of the two-state char fragment
        assert_eq!(nfa("a{2,4}").state_count(), 10);
        assert_eq!(nfa("a{3}").state_count(), 8);
    }

    #[test]
    fn test_star_accepts_empty_and_loops() {
        let n = nfa("a*");
        assert_eq!(n.state_count(), 4);
        let closure = start_closure(&n);
        assert!(contains_accepting(&n, &closure));
        // after one 'a' the closure leads back to a state with an 'a' edge
        let inner: Vec<StateId> = closure
            .iter()
            .copied()
            .filter(|&id| n.edges(id).contains_key(&'a'))
            .collect();
        assert_eq!(inner.len(), 1);
        let after = n.epsilon_closure(&BTreeSet::from([n.edges(inner[0])[&'a'][0]]));
        assert!(contains_accepting(&n, &after));
        assert!(after.iter().any(|&id| n.edges(id).contains_key(&'a')));
    }

    #[test]
    fn test_groups_are_transparent() {
        assert_eq!(nfa("(ab)").state_count(), nfa("ab").state_count());
        assert_eq!(nfa("(?:ab)").state_count(), nfa("ab").state_count());
    }

    // --- Epsilon closure ---

    #[test]
    fn test_closure_is_superset_and_idempotent() {
        let n = nfa("(?:ab)*|c");
        let closure = start_closure(&n);
        assert!(closure.contains(&n.start()));
        assert_eq!(n.epsilon_closure(&closure), closure);
    }

    // --- Limits ---

    #[test]
    fn test_state_limit_stops_construction() {
        let ast = parser::parse("a{100}").expect("parse should succeed");
        let err = Nfa::thompson(&ast, 16).expect_err("limit should trip");
        assert_eq!(err, CompileError::StateLimitExceeded { limit: 16 });
    }

    // --- Dump ---

    #[test]
    fn test_dump_renumbers_breadth_first() {
        let n = nfa("ab");
        assert_eq!(
            n.dump(),
            "NFA: total nodes = 4\n\
             \x20 [0]\n\
             \x20    -a-> [1]\n\
             \x20 [1]\n\
             \x20    -Epsilon-> [2]\n\
             \x20 [2]\n\
             \x20    -b-> [3]\n\
             \x20 [3] (ACCEPT)\n"
        );
    }

    #[test]
    fn test_pretty_char_escapes() {
        assert_eq!(pretty_char('a'), "a");
        assert_eq!(pretty_char(' '), " ");
        assert_eq!(pretty_char('\n'), "\\n");
        assert_eq!(pretty_char('\\'), "\\\\");
        assert_eq!(pretty_char('"'), "\\\"");
        assert_eq!(pretty_char('\x0B'), "\\xB");
        assert_eq!(pretty_char('\x0C'), "\\xC");
    }
}
