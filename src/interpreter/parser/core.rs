use std::iter::Peekable;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{lexer::Token, parser::binary::parse_additive},
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a full expression.
///
/// This is the entry point for expression parsing.
/// It begins at the lowest-precedence level, addition, and recursively
/// descends through the precedence hierarchy.
///
/// Grammar: `expression := additive`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
/// - `line`: The line being parsed, reported if it ends too early.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_additive(tokens, line)
}

/// Parses a token slice that must contain exactly one expression.
///
/// Used for f-string placeholders, whose text is lexed on its own.
///
/// # Errors
/// Returns a `ParseError` if the expression is malformed or followed by
/// extra tokens.
pub fn parse_complete_expression(tokens: &[(Token, usize)], line: usize) -> ParseResult<Expr> {
    let mut iter = tokens.iter().peekable();
    if iter.peek().is_none() {
        return Err(ParseError::UnexpectedEndOfInput { line });
    }

    let expr = parse_expression(&mut iter, line)?;

    match iter.next() {
        None => Ok(expr),
        Some((tok, line)) => Err(ParseError::UnexpectedTrailingTokens { token: tok.to_string(),
                                                                       line:  *line, }),
    }
}
