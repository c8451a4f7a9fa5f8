pub mod ast;
mod lexer;
mod parser;

pub use lexer::TokenKind;
pub use parser::{ParseError, ParseErrorKind};

/// Parses a single dice expression. Leading and trailing whitespace is
/// ignored; splitting a line into several expressions is the caller's job
/// (see [crate::session::split_expressions]).
pub fn parse(s: &str) -> Result<ast::DiceExpression, ParseError> {
    parser::Parser::new(s).parse()
}
