//! Syntax tree for parsed regular expressions.
//!
//! Every node owns its children outright; the tree is immutable once the
//! parser hands it over.  Negation never appears here: negated classes are
//! already resolved to plain [`Ast::Set`] nodes against the alphabet.
//!
//! The `Display` rendering spells out the tree as nested constructors,
//! e.g. `a|b*` renders as `Or(Char(a), Star(Char(b)))`.

/// A parsed regular expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ast {
    /// Matches the empty string.
    Empty,
    /// A single literal character.
    Char(char),
    /// Any one character out of a sorted, duplicate-free set.
    Set(Vec<char>),
    /// `body` repeated between `min` and `max` times, inclusive.
    Repeat { body: Box<Ast>, min: u32, max: u32 },
    /// `body` repeated zero or more times.
    Star(Box<Ast>),
    Concat(Box<Ast>, Box<Ast>),
    Or(Box<Ast>, Box<Ast>),
    /// `(...)` — grouping only, nothing is captured.
    Group(Box<Ast>),
    /// `(?:...)`.
    NonCapturingGroup(Box<Ast>),
}

impl std::fmt::Display for Ast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty()"),
            Self::Char(c) => {
                write!(f, "Char(")?;
                write_escaped(f, *c)?;
                write!(f, ")")
            }
            Self::Set(elements) => {
                write!(f, "Set([")?;
                for &c in elements {
                    write_escaped(f, c)?;
                }
                write!(f, "])")
            }
            Self::Repeat { body, min, max } => write!(f, "Repeat({body}, {min}, {max})"),
            Self::Star(body) => write!(f, "Star({body})"),
            Self::Concat(left, right) => write!(f, "Concat({left}, {right})"),
            Self::Or(left, right) => write!(f, "Or({left}, {right})"),
            Self::Group(body) => write!(f, "Group({body})"),
            Self::NonCapturingGroup(body) => write!(f, "NonCapturingGroup({body})"),
        }
    }
}

/// Characters rendered as named escapes inside `Char(...)` and `Set([...])`.
fn write_escaped(f: &mut std::fmt::Formatter<'_>, c: char) -> std::fmt::Result {
    match c {
        '\n' => write!(f, "\\n"),
        '\r' => write!(f, "\\r"),
        '\x0B' => write!(f, "\\v"),
        '\x0C' => write!(f, "\\f"),
        '\t' => write!(f, "\\t"),
        _ => write!(f, "{c}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_leaves() {
        assert_eq!(Ast::Empty.to_string(), "Empty()");
        assert_eq!(Ast::Char('a').to_string(), "Char(a)");
        assert_eq!(Ast::Set(vec!['a', 'b', 'c']).to_string(), "Set([abc])");
    }

    #[test]
    fn test_display_escapes_whitespace_controls() {
        assert_eq!(Ast::Char('\n').to_string(), "Char(\\n)");
        assert_eq!(
            Ast::Set(vec!['\t', '\n', '\x0B', '\x0C', '\r']).to_string(),
            "Set([\\t\\n\\v\\f\\r])"
        );
    }

    #[test]
    fn test_display_nested() {
        let tree = Ast::Concat(
            Box::new(Ast::Char('a')),
            Box::new(Ast::Star(Box::new(Ast::Char('b')))),
        );
        assert_eq!(tree.to_string(), "Concat(Char(a), Star(Char(b)))");
    }

    #[test]
    fn test_display_repeat_and_groups() {
        let repeat = Ast::Repeat {
            body: Box::new(Ast::Char('a')),
            min: 1,
            max: 3,
        };
        assert_eq!(repeat.to_string(), "Repeat(Char(a), 1, 3)");
        assert_eq!(
            Ast::Group(Box::new(Ast::Or(
                Box::new(Ast::Empty),
                Box::new(Ast::Char('x')),
            )))
            .to_string(),
            "Group(Or(Empty(), Char(x)))"
        );
        assert_eq!(
            Ast::NonCapturingGroup(Box::new(Ast::Char('x'))).to_string(),
            "NonCapturingGroup(Char(x))"
        );
    }
}
