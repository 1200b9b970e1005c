use std::fmt;
use thiserror::Error;

/// The column of a lexical error: either a 1-based column on the reported
/// line, or the `EOF` sentinel when the scanner consumed the whole input
/// without ever accepting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorColumn {
    Column(usize),
    Eof,
}

impl fmt::Display for LexErrorColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexErrorColumn::Column(c) => write!(f, "{c}"),
            LexErrorColumn::Eof => write!(f, "EOF"),
        }
    }
}

/// A lexical error: no regex in the spec accepted any nonempty prefix of the
/// remaining input (§4.7, §6.3).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("No viable alternative at character {column}, line {line}")]
    NoViableAlternative { line: usize, column: LexErrorColumn },
}
