use crate::regex::{CharClass, Regex};
use thiserror::Error;

/// Parses a regex according to the grammar:
///
/// ```text
/// regex       := unionTerm ('|' regex)?
/// unionTerm   := concatFactor (unionTerm)?        -- concatenation by juxtaposition
/// concatFactor:= unitItem ('*' | '+' | '?')?
/// unitItem    := '(' regex ')'
///              | '[a-z]' | '[A-Z]' | '[0-9]'
///              | 'eps'
///              | '\' <any-char>                   -- escape: next char literal
///              | <any-char>                       -- literal
/// ```
///
/// Whitespace between tokens is skipped; to match a literal space, escape it
/// (`\ `). Concatenation is right-associative and implicit; alternation is
/// right-associative with lower precedence than concatenation; postfix `*`,
/// `+`, `?` bind to the immediately preceding atom.
pub fn parse(input: &str) -> Result<Regex, RegexParseError> {
    let mut parser = Parser {
        chars: input.chars().collect(),
        pos: 0,
    };
    parser.parse_regex()
}

/// Error raised when a regex fails to parse.
///
/// The error position is a character index (not a byte offset) into the
/// original regex text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unexpected {found} at position {position}, expected {expected}")]
pub struct RegexParseError {
    pub found: String,
    pub expected: String,
    pub position: usize,
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn consume_char(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consumes `s` if it matches at the current position; `s` is treated as
    /// a sequence of chars, never as bytes.
    fn consume_str(&mut self, s: &str) -> bool {
        let pattern: Vec<char> = s.chars().collect();
        let end = self.pos + pattern.len();
        if end <= self.chars.len() && self.chars[self.pos..end] == pattern[..] {
            self.pos = end;
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while self.consume_char(' ') {}
    }

    fn found_description(&self) -> String {
        match self.peek() {
            Some(c) => c.to_string(),
            None => "end of input".to_string(),
        }
    }

    /// `regex := unionTerm ('|' regex)?`
    fn parse_regex(&mut self) -> Result<Regex, RegexParseError> {
        let term = self.parse_union_term()?;
        self.skip_whitespace();
        if self.consume_char('|') {
            let rest = self.parse_regex()?;
            Ok(Regex::Union(Box::new(term), Box::new(rest)))
        } else {
            Ok(term)
        }
    }

    /// `unionTerm := concatFactor (unionTerm)?`, implicit concatenation.
    fn parse_union_term(&mut self) -> Result<Regex, RegexParseError> {
        let factor = self.parse_concat_factor()?;
        self.skip_whitespace();
        match self.peek() {
            Some('|') | Some(')') | None => Ok(factor),
            _ => {
                let rest = self.parse_union_term()?;
                Ok(Regex::Concat(Box::new(factor), Box::new(rest)))
            }
        }
    }

    /// `concatFactor := unitItem ('*' | '+' | '?')?`
    fn parse_concat_factor(&mut self) -> Result<Regex, RegexParseError> {
        let item = self.parse_unit_item()?;
        self.skip_whitespace();
        if self.consume_char('*') {
            Ok(Regex::Star(Box::new(item)))
        } else if self.consume_char('+') {
            Ok(Regex::Concat(
                Box::new(item.clone()),
                Box::new(Regex::Star(Box::new(item))),
            ))
        } else if self.consume_char('?') {
            Ok(Regex::Union(Box::new(item), Box::new(Regex::Epsilon)))
        } else {
            Ok(item)
        }
    }

    fn parse_unit_item(&mut self) -> Result<Regex, RegexParseError> {
        self.skip_whitespace();
        if self.consume_char('(') {
            let inner = self.parse_regex()?;
            if !self.consume_char(')') {
                return Err(RegexParseError {
                    found: self.found_description(),
                    expected: ")".to_string(),
                    position: self.pos,
                });
            }
            Ok(inner)
        } else if self.consume_str("[a-z]") {
            Ok(Regex::CharSet(CharClass::Lower))
        } else if self.consume_str("[A-Z]") {
            Ok(Regex::CharSet(CharClass::Upper))
        } else if self.consume_str("[0-9]") {
            Ok(Regex::CharSet(CharClass::Digit))
        } else if self.consume_str("eps") {
            Ok(Regex::Epsilon)
        } else if self.consume_char('\\') {
            // Any character following `\` is taken literally, including one
            // outside the documented whitelist; end of input after `\`
            // yields a literal backslash. See DESIGN.md's note on the
            // post-escape peek bug.
            match self.advance() {
                Some(c) => Ok(Regex::Char(c)),
                None => Ok(Regex::Char('\\')),
            }
        } else {
            match self.advance() {
                Some(c) => Ok(Regex::Char(c)),
                None => Err(RegexParseError {
                    found: "end of input".to_string(),
                    expected: "a regex atom".to_string(),
                    position: self.pos,
                }),
            }
        }
    }
}
