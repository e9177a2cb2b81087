//! A small regular expression engine over a fixed ASCII alphabet.
//!
//! Patterns compile in three stages: recursive descent parsing into an
//! [`Ast`], Thompson construction of an [`Nfa`], and subset construction
//! of the [`Dfa`] the matcher walks.  Matching is a single greedy pass
//! with no backtracking; see [`Regex`] for what that implies.
//!
//! # Example
//!
//! ```rust
//! use dregex::Regex;
//!
//! let re = Regex::new("b[aeiou]bb(?:le){1,3}").unwrap();
//!
//! assert!(re.is_match("babble"));
//! assert!(!re.is_match("bubbly"));
//!
//! // match_pos reports how many characters the walk consumed
//! assert_eq!(re.match_pos("babblele"), Some(8));
//! ```

pub mod alphabet;
mod ast;
pub mod dfa;
mod error;
mod matcher;
pub mod nfa;
mod parser;

pub use ast::Ast;
pub use dfa::Dfa;
pub use error::{CompileError, SyntaxError, SyntaxErrorKind};
pub use matcher::{DEFAULT_MAX_STATES, Regex, compile};
pub use nfa::Nfa;
pub use parser::parse;
