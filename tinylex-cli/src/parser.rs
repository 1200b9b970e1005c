//! A recursive-descent parser over the `tinylex`-produced token stream,
//! grounded on `original_source/src/main.py`'s `LParser` grammar (there
//! expressed as an explicit push-down stack machine; reimplemented here as
//! ordinary recursive descent, which is the idiomatic shape for a grammar
//! this small).

use crate::ast::LAtom;
use crate::token::LTerminal;
use std::collections::HashMap;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected token {found:?}, expected {expected}")]
    UnexpectedToken { found: LTerminal, expected: &'static str },
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: &'static str },
    #[error("malformed number literal {0:?}")]
    BadNumber(String),
}

/// Parses a full token stream (whitespace already stripped by the caller)
/// as a single top-level parenthesized list, the reference's "the whole
/// program is itself one list" convention.
pub fn parse(tokens: &[(LTerminal, String)]) -> Result<LAtom, ParseError> {
    let mut pos = 0usize;
    let atom = parse_list(tokens, &mut pos)?;
    Ok(atom)
}

fn peek<'a>(tokens: &'a [(LTerminal, String)], pos: usize) -> Option<&'a (LTerminal, String)> {
    tokens.get(pos)
}

fn expect<'a>(
    tokens: &'a [(LTerminal, String)],
    pos: &mut usize,
    want: LTerminal,
    expected: &'static str,
) -> Result<&'a (LTerminal, String), ParseError> {
    match peek(tokens, *pos) {
        Some(entry) if entry.0 == want => {
            *pos += 1;
            Ok(entry)
        }
        Some(entry) => Err(ParseError::UnexpectedToken { found: entry.0, expected }),
        None => Err(ParseError::UnexpectedEof { expected }),
    }
}

fn parse_list(tokens: &[(LTerminal, String)], pos: &mut usize) -> Result<LAtom, ParseError> {
    expect(tokens, pos, LTerminal::LParen, "(")?;
    let mut items = Vec::new();
    while !matches!(peek(tokens, *pos), Some((LTerminal::RParen, _))) {
        items.push(parse_atom(tokens, pos)?);
    }
    expect(tokens, pos, LTerminal::RParen, ")")?;
    Ok(LAtom::List(items))
}

fn parse_atom(tokens: &[(LTerminal, String)], pos: &mut usize) -> Result<LAtom, ParseError> {
    match peek(tokens, *pos) {
        Some((LTerminal::LParen, _)) => parse_list(tokens, pos),
        Some((LTerminal::Lambda, _)) => parse_lambda(tokens, pos),
        Some((LTerminal::Id, text)) => {
            let id = text.clone();
            *pos += 1;
            Ok(LAtom::Id(id))
        }
        Some((LTerminal::Num, text)) => {
            let n = text
                .parse::<i64>()
                .map_err(|_| ParseError::BadNumber(text.clone()))?;
            *pos += 1;
            Ok(LAtom::Num(n))
        }
        Some((LTerminal::Plus, _)) => {
            *pos += 1;
            Ok(LAtom::Id("+".to_string()))
        }
        Some((LTerminal::Concat, _)) => {
            *pos += 1;
            Ok(LAtom::Id("++".to_string()))
        }
        Some((found, _)) => Err(ParseError::UnexpectedToken { found: *found, expected: "an atom" }),
        None => Err(ParseError::UnexpectedEof { expected: "an atom" }),
    }
}

fn parse_lambda(tokens: &[(LTerminal, String)], pos: &mut usize) -> Result<LAtom, ParseError> {
    expect(tokens, pos, LTerminal::Lambda, "lambda")?;
    let (_, arg) = expect(tokens, pos, LTerminal::Id, "a lambda argument name")?;
    let arg = arg.clone();
    expect(tokens, pos, LTerminal::Colon, ":")?;
    let expr = parse_atom(tokens, pos)?;
    Ok(LAtom::LambdaExpr {
        arg,
        expr: Box::new(expr),
        context: HashMap::new(),
    })
}
