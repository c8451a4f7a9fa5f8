use super::{ast::*, lexer::*};
use crate::chain;
use crate::common::*;
use crate::roll::{DropLowest, KeepHighest, KeepLowest, Selection};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

type PResult<T> = Result<T, ParseError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("error at position {} ({slice:?}): {kind}", .span.start)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Range<usize>,
    pub slice: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    UnexpectedToken {
        found: Option<TokenKind>,
        expected: Vec<TokenKind>,
    },
    UnexpectedString {
        expected: Vec<TokenKind>,
    },
    InvalidNumber,
    ZeroDice,
    TooFewSides,
    InvalidSelection,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken { found: None, expected } => {
                write!(f, "unexpected end of expression, expected ")?;
                fmt_expected(expected, f)
            }
            Self::UnexpectedToken {
                found: Some(found),
                expected,
            } => {
                write!(f, "unexpected token: found {}, expected ", found)?;
                fmt_expected(expected, f)
            }
            Self::UnexpectedString { expected } => {
                write!(f, "expected ")?;
                fmt_expected(expected, f)
            }
            Self::InvalidNumber => write!(f, "number is too large"),
            Self::ZeroDice => write!(f, "must roll at least one die"),
            Self::TooFewSides => write!(f, "a die must have at least 2 sides"),
            Self::InvalidSelection => write!(f, "must keep or drop at least one die"),
        }
    }
}

fn fmt_expected(expected: &[TokenKind], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let len = expected.len();

    if expected.is_empty() {
        f.write_str("end of expression")
    } else if len == 1 {
        f.write_str(expected[0].to_str())
    } else if len == 2 {
        write!(f, "{} or {}", expected[0].to_str(), expected[1].to_str())
    } else {
        for exp in &expected[..len - 1] {
            write!(f, "{}, ", exp.to_str())?;
        }
        write!(f, "or {}", expected[len - 1].to_str())
    }
}

pub struct Parser<'a> {
    source: &'a str,
    tokens: Vec<(TokenKind, Range<usize>)>,
    pos: usize,
}

impl<'a> Parser<'a> {
    pub fn new(s: &'a str) -> Self {
        let source = s.trim();
        Self {
            source,
            tokens: lex(source),
            pos: 0,
        }
    }

    pub fn parse(mut self) -> PResult<DiceExpression> {
        self.parse_expression()
    }

    fn peek_nth(&self, n: usize) -> Option<TokenKind> {
        self.tokens.get(self.pos + n).map(|(kind, _)| *kind)
    }

    fn peek(&self) -> Option<TokenKind> {
        self.peek_nth(0)
    }

    fn matches(&self, kind: TokenKind) -> bool {
        self.peek() == Some(kind)
    }

    fn matches_any(&self, options: &[TokenKind]) -> bool {
        self.peek().map_or(false, |peeked| options.contains(&peeked))
    }

    fn advance(&mut self) -> Option<TokenKind> {
        let kind = self.peek()?;
        self.pos += 1;
        Some(kind)
    }

    /// Span of the most recently consumed token.
    fn span(&self) -> Range<usize> {
        match self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)) {
            Some((_, span)) => span.clone(),
            None => 0..0,
        }
    }

    fn slice(&self) -> &'a str {
        &self.source[self.span()]
    }

    fn consume(&mut self, expected: TokenKind) -> PResult<()> {
        if self.matches(expected) {
            self.advance();
            Ok(())
        } else {
            self.unexpected_token(vec![expected])
        }
    }

    fn consume_as<T: FromStr>(&mut self, expected: TokenKind) -> PResult<T> {
        self.consume(expected)?;
        match self.slice().parse() {
            Ok(x) => Ok(x),
            Err(_) => self.error(ParseErrorKind::InvalidNumber),
        }
    }

    fn error<T>(&self, kind: ParseErrorKind) -> PResult<T> {
        Err(ParseError {
            kind,
            span: self.span(),
            slice: self.slice().to_string(),
        })
    }

    fn unexpected_token<T>(&mut self, expected: Vec<TokenKind>) -> PResult<T> {
        match self.advance() {
            None => Err(ParseError {
                kind: ParseErrorKind::UnexpectedToken {
                    found: None,
                    expected,
                },
                span: self.source.len()..self.source.len(),
                slice: String::new(),
            }),
            Some(TokenKind::Error) => self.error(ParseErrorKind::UnexpectedString { expected }),
            found => self.error(ParseErrorKind::UnexpectedToken { found, expected }),
        }
    }

    fn parse_expression(&mut self) -> PResult<DiceExpression> {
        let count = self.parse_count()?;
        self.consume(TokenKind::Dice)?;
        let sides = self.parse_sides()?;

        let mut expr = DiceExpression::new(count, sides).with_step(self.parse_steps()?);
        if let Some(selection) = self.parse_selection()? {
            expr = expr.with_selection(selection);
        }
        if let Some(modifier) = self.parse_modifier()? {
            expr = expr.with_modifier(modifier);
        }

        if self.peek().is_some() {
            let mut expected = Vec::new();
            if expr.modifier().is_none() {
                expected.extend_from_slice(TokenKind::SIGNS);
                if expr.selection() == Selection::default() {
                    expected.extend_from_slice(TokenKind::SELECTORS);
                }
            }
            return self.unexpected_token(expected);
        }
        Ok(expr)
    }

    fn parse_count(&mut self) -> PResult<Num> {
        if !self.matches(TokenKind::Integer) {
            if !self.matches(TokenKind::Dice) {
                return self.unexpected_token(vec![TokenKind::Integer, TokenKind::Dice]);
            }
            return Ok(Num::MIN);
        }
        let count: usize = self.consume_as(TokenKind::Integer)?;
        match Num::new(count) {
            Some(count) => Ok(count),
            None => self.error(ParseErrorKind::ZeroDice),
        }
    }

    fn parse_sides(&mut self) -> PResult<Sides> {
        if self.matches(TokenKind::Percent) {
            self.advance();
            return Ok(Sides::Percentile);
        }
        if !self.matches(TokenKind::Integer) {
            return self.unexpected_token(vec![TokenKind::Integer, TokenKind::Percent]);
        }
        let faces: UInt = self.consume_as(TokenKind::Integer)?;
        match Sides::poly(faces) {
            Some(sides) => Ok(sides),
            None => self.error(ParseErrorKind::TooFewSides),
        }
    }

    fn parse_steps(&mut self) -> PResult<i32> {
        let mut net: i32 = 0;
        while self.matches_any(TokenKind::SIGNS) && self.peek_nth(1) == Some(TokenKind::Dice) {
            let sign = self.parse_sign();
            self.consume(TokenKind::Dice)?;
            let magnitude: i32 = if self.matches(TokenKind::Integer) {
                self.consume_as(TokenKind::Integer)?
            } else {
                1
            };
            net = match sign {
                Sign::Pos => net.saturating_add(magnitude),
                Sign::Neg => net.saturating_sub(magnitude),
            }
            .clamp(-chain::MAX_STEPS, chain::MAX_STEPS);
        }
        Ok(net)
    }

    fn parse_selection(&mut self) -> PResult<Option<Selection>> {
        if self.matches(TokenKind::Keep) {
            self.advance();
            let selection = match self.peek() {
                Some(TokenKind::Highest) => {
                    self.advance();
                    KeepHighest(self.parse_selection_count()?).into()
                }
                Some(TokenKind::Lowest) => {
                    self.advance();
                    KeepLowest(self.parse_selection_count()?).into()
                }
                Some(TokenKind::Integer) | None => KeepHighest(self.parse_selection_count()?).into(),
                Some(kind) if TokenKind::SIGNS.contains(&kind) => KeepHighest(Num::MIN).into(),
                Some(_) => {
                    return self.unexpected_token(vec![
                        TokenKind::Integer,
                        TokenKind::Highest,
                        TokenKind::Lowest,
                    ])
                }
            };
            Ok(Some(selection))
        } else if self.matches(TokenKind::DropLowest) {
            self.advance();
            Ok(Some(DropLowest(self.parse_selection_count()?).into()))
        } else {
            Ok(None)
        }
    }

    /// An optional selector argument, defaulting to one die.
    fn parse_selection_count(&mut self) -> PResult<Num> {
        if !self.matches(TokenKind::Integer) {
            if self.peek().is_some() && !self.matches_any(TokenKind::SIGNS) {
                return self.unexpected_token(vec![TokenKind::Integer]);
            }
            return Ok(Num::MIN);
        }
        let n: usize = self.consume_as(TokenKind::Integer)?;
        match Num::new(n) {
            Some(n) => Ok(n),
            None => self.error(ParseErrorKind::InvalidSelection),
        }
    }

    fn parse_modifier(&mut self) -> PResult<Option<Modifier>> {
        if !self.matches_any(TokenKind::SIGNS) {
            return Ok(None);
        }
        let sign = self.parse_sign();
        let value = self.consume_as(TokenKind::Integer)?;
        Ok(Some(Modifier::new(sign, value)))
    }

    fn parse_sign(&mut self) -> Sign {
        match self.advance() {
            Some(TokenKind::Minus) => Sign::Neg,
            _ => Sign::Pos,
        }
    }
}
