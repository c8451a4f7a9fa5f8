use logos::{Logos, Span};
use std::fmt;

/// Splits one dice expression into tokens. Whitespace is not skipped; it
/// lexes as [TokenKind::Error] so a space inside an expression is rejected.
pub(crate) fn lex(s: &str) -> Vec<(TokenKind, Span)> {
    TokenKind::lexer(s).spanned().collect()
}

#[derive(Logos, Debug, Copy, Clone, Eq, PartialEq)]
pub enum TokenKind {
    #[regex(r"[0-9]+")]
    Integer,

    #[token("d")]
    Dice,
    #[token("%")]
    Percent,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,

    #[token("k")]
    Keep,
    #[token("dl")]
    DropLowest,

    #[token("h")]
    Highest,
    #[token("l")]
    Lowest,

    #[error]
    Error,
}

impl TokenKind {
    pub const SIGNS: &'static [Self] = &[Self::Plus, Self::Minus];

    pub const SELECTORS: &'static [Self] = &[Self::Keep, Self::DropLowest];

    pub fn to_str(self) -> &'static str {
        use TokenKind::*;

        match self {
            Integer => "<integer>",
            Dice => "'d'",
            Percent => "'%'",
            Plus => "'+'",
            Minus => "'-'",
            Keep => "'k'",
            DropLowest => "'dl'",
            Highest => "'h'",
            Lowest => "'l'",
            Error => "<error>",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}
