//! Recursive descent parser for regular expressions.
//!
//! One character of lookahead, no backtracking:
//!
//! ```text
//! or         := concat ('|' concat)*
//! concat     := atom*
//! atom       := (escape | class | group | literal) quantifier?
//! quantifier := '*' | '+' | '?' | '{' bounds '}'
//! ```
//!
//! Alternation binds loosest, then concatenation, then quantifiers.  An
//! empty `concat` is the [`Ast::Empty`] node, so `a|` and the empty
//! pattern are valid.  Negated classes and the `\D \S \W` shorthands are
//! resolved against [`alphabet::SIGMA`] here; later stages never see
//! negation.

use itertools::Itertools;
use phf::{Map, phf_map};
use std::iter::Peekable;
use std::str::Chars;

use crate::alphabet;
use crate::ast::Ast;
use crate::error::{SyntaxError, SyntaxErrorKind};

/// Parse a regular expression into an [`Ast`].
pub fn parse(input: &str) -> Result<Ast, SyntaxError> {
    let mut parser = Parser {
        chars: input.chars().peekable(),
        pos: 0,
    };
    let ast = parser.parse_or()?;
    match parser.chars.peek() {
        None => Ok(ast),
        Some(&c) => Err(parser.err(SyntaxErrorKind::UnexpectedChar(c))),
    }
}

struct Parser<'a> {
    chars: Peekable<Chars<'a>>,
    /// Character index of the next unconsumed character.
    pos: usize,
}

impl Parser<'_> {
    fn parse_or(&mut self) -> Result<Ast, SyntaxError> {
        let mut node = self.parse_concat()?;
        while self.chars.peek() == Some(&'|') {
            self.bump(); // consume '|'
            let right = self.parse_concat()?;
            node = Ast::Or(Box::new(node), Box::new(right));
        }
        Ok(node)
    }

    fn parse_concat(&mut self) -> Result<Ast, SyntaxError> {
        let mut node: Option<Ast> = None;
        while !matches!(self.chars.peek(), None | Some('|') | Some(')')) {
            let atom = self.parse_atom()?;
            node = Some(match node {
                None => atom,
                Some(left) => Ast::Concat(Box::new(left), Box::new(atom)),
            });
        }
        Ok(node.unwrap_or(Ast::Empty))
    }

    /// Parse one atom plus at most one postfix quantifier.
    fn parse_atom(&mut self) -> Result<Ast, SyntaxError> {
        let node = match self.chars.peek().copied() {
            None => return Err(self.err(SyntaxErrorKind::UnexpectedEnd)),
            Some('\\') => match self.parse_escape()? {
                Escaped::One(c) => Ast::Char(c),
                Escaped::Many(elements) => Ast::Set(elements),
            },
            Some('[') => self.parse_class()?,
            Some('(') => self.parse_group()?,
            Some(c @ ('{' | '*' | '+' | '?')) => {
                return Err(self.err(SyntaxErrorKind::MisplacedQuantifier(c)));
            }
            Some('.') => {
                self.bump();
                Ast::Set(alphabet::SIGMA.to_vec())
            }
            Some(c) => {
                self.bump();
                Ast::Char(c)
            }
        };

        match self.chars.peek() {
            Some('{') => self.parse_repeat(node),
            Some('*') => {
                self.bump();
                Ok(Ast::Star(Box::new(node)))
            }
            Some('+') => {
                self.bump();
                Ok(Ast::Concat(
                    Box::new(node.clone()),
                    Box::new(Ast::Star(Box::new(node))),
                ))
            }
            Some('?') => {
                self.bump();
                Ok(Ast::Or(Box::new(Ast::Empty), Box::new(node)))
            }
            _ => Ok(node),
        }
    }

    /// Parse a `{...}` quantifier applied to `body`.
    ///
    /// `{m}` repeats exactly m times, `{m,n}` between m and n, `{,n}` up
    /// to n.  `{m,}` has no upper bound and desugars to m mandatory
    /// copies followed by a star.
    fn parse_repeat(&mut self, body: Ast) -> Result<Ast, SyntaxError> {
        self.bump(); // consume '{'
        let min_start = self.pos;
        let min_digits = self.digits();
        match self.chars.peek().copied() {
            None => Err(self.err(SyntaxErrorKind::UnclosedRepeat)),
            Some('}') => {
                let min = repeat_bound(&min_digits, min_start)?;
                self.bump(); // consume '}'
                Ok(Ast::Repeat {
                    body: Box::new(body),
                    min,
                    max: min,
                })
            }
            Some(',') => {
                self.bump(); // consume ','
                let max_start = self.pos;
                let max_digits = self.digits();
                match self.chars.peek().copied() {
                    None => Err(self.err(SyntaxErrorKind::UnclosedRepeat)),
                    Some('}') => {
                        let node = match (min_digits.is_empty(), max_digits.is_empty()) {
                            (true, true) => {
                                return Err(SyntaxError {
                                    pos: min_start,
                                    kind: SyntaxErrorKind::InvalidRepeatBound,
                                });
                            }
                            (false, true) => {
                                let min = repeat_bound(&min_digits, min_start)?;
                                Ast::Concat(
                                    Box::new(Ast::Repeat {
                                        body: Box::new(body.clone()),
                                        min,
                                        max: min,
                                    }),
                                    Box::new(Ast::Star(Box::new(body))),
                                )
                            }
                            (true, false) => {
                                let max = repeat_bound(&max_digits, max_start)?;
                                Ast::Repeat {
                                    body: Box::new(body),
                                    min: 0,
                                    max,
                                }
                            }
                            (false, false) => {
                                let min = repeat_bound(&min_digits, min_start)?;
                                let max = repeat_bound(&max_digits, max_start)?;
                                if min > max {
                                    return Err(
                                        self.err(SyntaxErrorKind::ReversedRepeatBounds(min, max))
                                    );
                                }
                                Ast::Repeat {
                                    body: Box::new(body),
                                    min,
                                    max,
                                }
                            }
                        };
                        self.bump(); // consume '}'
                        Ok(node)
                    }
                    Some(c) => Err(self.err(SyntaxErrorKind::UnexpectedChar(c))),
                }
            }
            Some(c) => Err(self.err(SyntaxErrorKind::UnexpectedChar(c))),
        }
    }

    /// Parse a `[...]` character class (the `[` has not been consumed).
    ///
    /// A leading `^` negates.  `a-b` expands inclusively by code point
    /// and expands to nothing when reversed.  A `-` with no single
    /// character to its left, or directly before `]`, is a literal
    /// hyphen.
    fn parse_class(&mut self) -> Result<Ast, SyntaxError> {
        self.bump(); // consume '['
        let negated = if self.chars.peek() == Some(&'^') {
            self.bump();
            true
        } else {
            false
        };

        let mut elements: Vec<char> = Vec::new();
        // The most recent single character, eligible as a range start.
        let mut last_single: Option<char> = None;
        loop {
            match self.chars.peek().copied() {
                None => return Err(self.err(SyntaxErrorKind::UnclosedClass)),
                Some(']') => {
                    self.bump();
                    break;
                }
                Some('\\') => match self.parse_escape()? {
                    Escaped::One(c) => {
                        elements.push(c);
                        last_single = Some(c);
                    }
                    Escaped::Many(expansion) => {
                        elements.extend(expansion);
                        last_single = None;
                    }
                },
                Some('-') => {
                    self.bump();
                    match (last_single.take(), self.chars.peek().copied()) {
                        (Some(lo), Some(c)) if c != ']' => {
                            let hi = if c == '\\' {
                                let esc_pos = self.pos;
                                match self.parse_escape()? {
                                    Escaped::One(h) => h,
                                    Escaped::Many(_) => {
                                        return Err(SyntaxError {
                                            pos: esc_pos,
                                            kind: SyntaxErrorKind::InvalidRangeEnd,
                                        });
                                    }
                                }
                            } else {
                                self.bump();
                                c
                            };
                            // lo went in as a single; replace it with the range
                            elements.pop();
                            elements.extend(lo..=hi);
                        }
                        _ => {
                            elements.push('-');
                            last_single = Some('-');
                        }
                    }
                }
                Some(c) => {
                    self.bump();
                    elements.push(c);
                    last_single = Some(c);
                }
            }
        }

        elements.sort_unstable();
        elements.dedup();
        if negated {
            elements = alphabet::complement(&elements);
        }
        Ok(Ast::Set(elements))
    }

    /// Parse a `(...)` or `(?:...)` group (the `(` has not been consumed).
    fn parse_group(&mut self) -> Result<Ast, SyntaxError> {
        self.bump(); // consume '('
        let non_capturing = if self.chars.peek() == Some(&'?') {
            self.bump(); // consume '?'
            match self.chars.peek() {
                Some(':') => {
                    self.bump();
                    true
                }
                Some(&c) => return Err(self.err(SyntaxErrorKind::UnexpectedChar(c))),
                None => return Err(self.err(SyntaxErrorKind::UnexpectedEnd)),
            }
        } else {
            false
        };

        let body = self.parse_or()?;
        match self.chars.peek() {
            Some(')') => {
                self.bump();
            }
            _ => return Err(self.err(SyntaxErrorKind::UnclosedGroup)),
        }
        Ok(if non_capturing {
            Ast::NonCapturingGroup(Box::new(body))
        } else {
            Ast::Group(Box::new(body))
        })
    }

    /// Parse a `\x` escape (the `\` has not been consumed).
    fn parse_escape(&mut self) -> Result<Escaped, SyntaxError> {
        self.bump(); // consume '\\'
        match self.chars.peek().copied() {
            None => Err(self.err(SyntaxErrorKind::UnexpectedEnd)),
            Some(c) => {
                self.bump();
                Ok(match ESCAPES.get(&c) {
                    Some(Escape::Literal(resolved)) => Escaped::One(*resolved),
                    Some(Escape::Digit) => Escaped::Many(alphabet::DIGITS.to_vec()),
                    Some(Escape::NotDigit) => Escaped::Many(alphabet::complement(alphabet::DIGITS)),
                    Some(Escape::Space) => Escaped::Many(alphabet::WHITESPACE.to_vec()),
                    Some(Escape::NotSpace) => {
                        Escaped::Many(alphabet::complement(alphabet::WHITESPACE))
                    }
                    Some(Escape::Word) => Escaped::Many(alphabet::WORD.to_vec()),
                    Some(Escape::NotWord) => Escaped::Many(alphabet::complement(alphabet::WORD)),
                    None => Escaped::One(c),
                })
            }
        }
    }

    /// Collect a run of ASCII digits (possibly empty).
    fn digits(&mut self) -> String {
        let run: String = self
            .chars
            .peeking_take_while(|&c| c.is_ascii_digit())
            .collect();
        self.pos += run.len();
        run
    }

    /// Consume one character and advance the position counter.
    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    /// An error at the current (not yet consumed) character.
    fn err(&self, kind: SyntaxErrorKind) -> SyntaxError {
        SyntaxError {
            pos: self.pos,
            kind,
        }
    }
}

fn repeat_bound(digits: &str, pos: usize) -> Result<u32, SyntaxError> {
    digits.parse().map_err(|_| SyntaxError {
        pos,
        kind: SyntaxErrorKind::InvalidRepeatBound,
    })
}

/// What one escape resolves to.
enum Escaped {
    One(char),
    Many(Vec<char>),
}

enum Escape {
    Literal(char),
    Digit,
    NotDigit,
    Space,
    NotSpace,
    Word,
    NotWord,
}

/// Escapes that do not resolve to themselves.  Any other escaped
/// character is that literal character, which covers `\\`, `\[`, `\.`
/// and the rest of the metacharacters.
const ESCAPES: Map<char, Escape> = phf_map! {
    'D' => Escape::NotDigit,
    'S' => Escape::NotSpace,
    'W' => Escape::NotWord,
    'd' => Escape::Digit,
    'f' => Escape::Literal('\x0C'),
    'n' => Escape::Literal('\n'),
    'r' => Escape::Literal('\r'),
    's' => Escape::Space,
    't' => Escape::Literal('\t'),
    'v' => Escape::Literal('\x0B'),
    'w' => Escape::Word,
};
