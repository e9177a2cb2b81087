//! Error types for regex compilation.

/// The reason a pattern failed to parse.
#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxErrorKind {
    UnexpectedChar(char),
    UnexpectedEnd,
    MisplacedQuantifier(char),
    UnclosedClass,
    UnclosedGroup,
    UnclosedRepeat,
    InvalidRepeatBound,
    ReversedRepeatBounds(u32, u32),
    InvalidRangeEnd,
}

impl std::fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedChar(c) => write!(f, "unexpected character {c:?}"),
            Self::UnexpectedEnd => write!(f, "unexpected end of pattern"),
            Self::MisplacedQuantifier(c) => write!(f, "quantifier {c:?} has nothing to repeat"),
            Self::UnclosedClass => write!(f, "unclosed character class '['"),
            Self::UnclosedGroup => write!(f, "unclosed group '('"),
            Self::UnclosedRepeat => write!(f, "unclosed repetition '{{'"),
            Self::InvalidRepeatBound => write!(f, "invalid repetition bounds"),
            Self::ReversedRepeatBounds(min, max) => {
                write!(f, "reversed repetition bounds {{{min},{max}}}")
            }
            Self::InvalidRangeEnd => write!(f, "class shorthand cannot end a range"),
        }
    }
}

/// A parse failure, carrying the character index it was detected at.
///
/// `pos` is the index of the offending character, or the pattern length
/// when the pattern ended too early.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxError {
    pub pos: usize,
    pub kind: SyntaxErrorKind,
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Syntax error at position {}: {}", self.pos, self.kind)
    }
}

impl std::error::Error for SyntaxError {}

/// Any failure of the compilation pipeline (parse, NFA build, determinize).
#[derive(Debug, Clone, PartialEq)]
pub enum CompileError {
    Syntax(SyntaxError),
    /// An automaton grew past the configured state ceiling.  Counted
    /// repetitions multiply NFA states and determinization is worst-case
    /// exponential, so both stages are capped.
    StateLimitExceeded { limit: usize },
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Syntax(e) => write!(f, "{e}"),
            Self::StateLimitExceeded { limit } => {
                write!(f, "Pattern too large: automaton exceeds {limit} states")
            }
        }
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Syntax(e) => Some(e),
            Self::StateLimitExceeded { .. } => None,
        }
    }
}

impl From<SyntaxError> for CompileError {
    fn from(e: SyntaxError) -> Self {
        Self::Syntax(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_display_includes_position() {
        let e = SyntaxError {
            pos: 3,
            kind: SyntaxErrorKind::UnclosedClass,
        };
        assert_eq!(
            e.to_string(),
            "Syntax error at position 3: unclosed character class '['"
        );
    }

    #[test]
    fn test_reversed_bounds_display() {
        let e = SyntaxErrorKind::ReversedRepeatBounds(4, 2);
        assert_eq!(e.to_string(), "reversed repetition bounds {4,2}");
    }

    #[test]
    fn test_compile_error_wraps_syntax_error() {
        let syn = SyntaxError {
            pos: 0,
            kind: SyntaxErrorKind::UnexpectedEnd,
        };
        let err = CompileError::from(syn.clone());
        assert_eq!(err, CompileError::Syntax(syn));
        assert_eq!(
            err.to_string(),
            "Syntax error at position 0: unexpected end of pattern"
        );
    }

    #[test]
    fn test_state_limit_display() {
        let err = CompileError::StateLimitExceeded { limit: 64 };
        assert_eq!(err.to_string(), "Pattern too large: automaton exceeds 64 states");
    }
}
