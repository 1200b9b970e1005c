//! The token alphabet of the toy Lisp-like demo language, and the ordered
//! `tinylex` spec that recognizes it.

/// The terminal symbols of the demo language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LTerminal {
    Lambda,
    Id,
    Num,
    Plus,
    Concat,
    Colon,
    LParen,
    RParen,
    Ws,
}

/// The ordered `(token, regex)` spec handed to [`tinylex::lexer::compile`].
///
/// Order matters for `Lambda` vs `Id`: the literal keyword `lambda` must
/// precede the identifier class so it wins the declaration-order tie
/// (both match the full four letters with the same length). `Plus` vs
/// `Concat` is declared in the reference's original order; which one comes
/// first doesn't actually matter here since `++` is always the longer
/// match and longest-match always outranks declaration order.
pub fn spec() -> [(LTerminal, &'static str); 9] {
    [
        (LTerminal::Lambda, "lambda"),
        (LTerminal::Id, "([a-z]|[A-Z])+"),
        (LTerminal::Num, "[0-9]+"),
        (LTerminal::Plus, r"\+"),
        (LTerminal::Concat, r"\+\+"),
        (LTerminal::Colon, ":"),
        (LTerminal::LParen, r"\("),
        (LTerminal::RParen, r"\)"),
        (LTerminal::Ws, "(\\ |\t|\n)+"),
    ]
}
