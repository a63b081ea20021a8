use std::iter::Peekable;

use crate::{
    ast::{Builtin, Expr, ListMethod, LiteralValue},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            fstring::parse_fstring,
            utils::{expect, parse_call_args, parse_comma_separated},
        },
    },
};

/// Parses a unary expression.
///
/// Supports prefix `-` (numeric negation). Negation is right-associative, so
/// `--x` is parsed as `-(-x)`. A negated numeric literal is folded into a
/// negative literal, so `[-3, 4]` holds two plain literals.
///
/// Grammar:
/// ```text
///     unary := "-" unary
///            | primary postfix*
/// ```
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
/// - `line`: The line being parsed.
///
/// # Returns
/// An [`Expr::Negate`], a folded literal, or a primary expression possibly
/// followed by postfixes.
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Minus, minus_line)) = tokens.peek() {
        tokens.next();
        let expr = parse_unary(tokens, line)?;
        return Ok(match expr {
                      Expr::Literal { value: LiteralValue::Integer(n), line } if n != i64::MIN => {
                          Expr::Literal { value: (-n).into(),
                                          line }
                      },
                      Expr::Literal { value: LiteralValue::Real(r), line } => {
                          Expr::Literal { value: (-r).into(),
                                          line }
                      },
                      other => Expr::Negate { expr: Box::new(other),
                                              line: *minus_line, },
                  });
    }
    let primary = parse_primary(tokens, line)?;
    parse_postfix(tokens, primary)
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar and include:
/// - numeric, string and boolean literals
/// - f-strings
/// - list literals (`[ ... ]`)
/// - parenthesized expressions
/// - identifiers and builtin calls
///
/// Grammar (simplified):
/// ```text
///     primary := literal
///              | FSTRING
///              | "[" elements "]"
///              | "(" expression ")"
///              | identifier_or_call
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a primary expression.
/// - `line`: The line being parsed, reported if it ends here.
///
/// # Returns
/// The parsed primary [`Expr`] or a `ParseError` on failure.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((token, line)) = tokens.next() else {
        return Err(ParseError::UnexpectedEndOfInput { line });
    };
    let line = *line;

    match token {
        Token::Integer(n) => Ok(Expr::Literal { value: (*n).into(),
                                                line }),
        Token::Real(r) => Ok(Expr::Literal { value: (*r).into(),
                                             line }),
        Token::Bool(b) => Ok(Expr::Literal { value: (*b).into(),
                                             line }),
        Token::NoneLiteral => Ok(Expr::Literal { value: LiteralValue::None,
                                                 line }),
        Token::Str(s) => Ok(Expr::Literal { value: LiteralValue::Str(s.clone()),
                                            line }),
        Token::FString(raw) => Ok(Expr::FString { parts: parse_fstring(raw, line)?,
                                                  line }),
        Token::LBracket => {
            let elements = parse_comma_separated(tokens,
                                                 |tokens| parse_expression(tokens, line),
                                                 &Token::RBracket,
                                                 line)?;
            Ok(Expr::List { elements, line })
        },
        Token::LParen => {
            let expr = parse_expression(tokens, line)?;
            match tokens.next() {
                Some((Token::RParen, _)) => Ok(expr),
                _ => Err(ParseError::ExpectedClosingParen { line }),
            }
        },
        Token::Identifier(name) => parse_identifier_or_call(tokens, name, line),
        tok => Err(ParseError::UnexpectedToken { token: tok.to_string(),
                                                 line }),
    }
}

/// Parses an identifier or a builtin call whose name was already consumed.
///
/// Supported forms:
///
/// - identifier
/// - builtin(arg1, arg2, ..., keyword=value)
///
/// Only the builtins listed in [`Builtin`] may be called; any other name
/// followed by `(` is rejected so that the whole line is skipped.
///
/// # Errors
/// Returns a `ParseError` if:
/// - the called name is not a supported builtin,
/// - the arguments fail to parse or are not closed.
fn parse_identifier_or_call<'a, I>(tokens: &mut Peekable<I>,
                                   name: &str,
                                   line: usize)
                                   -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::LParen, _)) = tokens.peek() {
        tokens.next();
        let builtin = Builtin::from_name(name).ok_or_else(|| ParseError::UnknownFunction {
                                                  name: name.to_string(),
                                                  line,
                                              })?;
        let arguments = parse_call_args(tokens, line)?;
        return Ok(Expr::Call { builtin,
                               arguments,
                               line });
    }
    Ok(Expr::Variable { name: name.to_string(),
                        line })
}

/// Parses postfix operators applied to an expression.
///
/// This function is called after parsing a primary expression and handles
/// two kinds of postfix constructs, which may be chained:
///
/// 1. **Indexing and slicing** `expr[index]`, `expr[start:end]`, where either
///    slice bound may be omitted.
/// 2. **List method calls** `expr.method(args)`.
///
/// Grammar:
/// ```text
///     postfix := primary
///              | postfix "[" expression "]"
///              | postfix "[" expression? ":" expression? "]"
///              | postfix "." IDENT "(" arguments ")"
/// ```
/// # Errors
/// Returns a `ParseError` if:
/// - an `[` is not properly closed with `]`,
/// - the method is not a supported list method,
/// - attribute access is not followed by a call.
fn parse_postfix<'a, I>(tokens: &mut Peekable<I>, mut node: Expr) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    loop {
        match tokens.peek() {
            Some((Token::LBracket, line)) => {
                let line = *line;
                tokens.next();
                node = parse_subscript(tokens, node, line)?;
            },
            Some((Token::Dot, line)) => {
                let line = *line;
                tokens.next();
                let name = match tokens.next() {
                    Some((Token::Identifier(name), _)) => name,
                    Some((tok, line)) => {
                        return Err(ParseError::UnexpectedToken { token: format!("expected method name, found '{tok}'"),
                                                                 line:  *line, });
                    },
                    None => return Err(ParseError::UnexpectedEndOfInput { line }),
                };
                let method =
                    ListMethod::from_name(name).ok_or_else(|| ParseError::UnknownMethod {
                                                   name: name.clone(),
                                                   line,
                                               })?;
                expect(tokens, &Token::LParen, line)?;
                let arguments = parse_call_args(tokens, line)?;
                node = Expr::MethodCall { target: Box::new(node),
                                          method,
                                          arguments,
                                          line };
            },
            _ => break,
        }
    }
    Ok(node)
}

/// Parses the inside of `[...]` after a target expression, producing either
/// an index or a slice.
fn parse_subscript<'a, I>(tokens: &mut Peekable<I>, target: Expr, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let start = match tokens.peek() {
        Some((Token::Colon, _)) => None,
        _ => Some(Box::new(parse_expression(tokens, line)?)),
    };

    match tokens.next() {
        Some((Token::RBracket, _)) => {
            let index = start.ok_or(ParseError::ExpectedClosingBracket { line })?;
            Ok(Expr::Index { target: Box::new(target),
                             index,
                             line })
        },
        Some((Token::Colon, _)) => {
            let end = match tokens.peek() {
                Some((Token::RBracket, _)) => None,
                _ => Some(Box::new(parse_expression(tokens, line)?)),
            };
            match tokens.next() {
                Some((Token::RBracket, _)) => Ok(Expr::Slice { target: Box::new(target),
                                                               start,
                                                               end,
                                                               line }),
                _ => Err(ParseError::ExpectedClosingBracket { line }),
            }
        },
        _ => Err(ParseError::ExpectedClosingBracket { line }),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{ast::BinaryOperator, interpreter::lexer::tokenize_line};

    fn parse(text: &str) -> ParseResult<Expr> {
        let tokens = tokenize_line(text, 1).unwrap();
        crate::interpreter::parser::core::parse_complete_expression(&tokens, 1)
    }

    #[test]
    fn folds_negative_literals() {
        assert_eq!(parse("-3").unwrap(),
                   Expr::Literal { value: LiteralValue::Integer(-3),
                                   line:  1, });
    }

    #[test]
    fn method_call_binds_tighter_than_addition() {
        let Expr::BinaryOp { left, op, .. } = parse("a.count(1) + 2").unwrap() else {
            panic!("expected a binary operation");
        };
        assert_eq!(op, BinaryOperator::Add);
        assert!(matches!(*left, Expr::MethodCall { method: ListMethod::Count, .. }));
    }

    #[test]
    fn slices_with_open_bounds() {
        let Expr::Slice { start, end, .. } = parse("x[:2]").unwrap() else {
            panic!("expected a slice");
        };
        assert!(start.is_none());
        assert!(end.is_some());
    }

    #[test]
    fn keyword_arguments_are_collected() {
        let Expr::Call { builtin, arguments, .. } = parse("sorted(x, reverse=True)").unwrap()
        else {
            panic!("expected a call");
        };
        assert_eq!(builtin, Builtin::Sorted);
        assert_eq!(arguments.positional.len(), 1);
        assert!(arguments.keyword("reverse").is_some());
    }

    #[test]
    fn unknown_function_and_method_are_rejected() {
        assert!(matches!(parse("input()"), Err(ParseError::UnknownFunction { .. })));
        assert!(matches!(parse("x.upper()"), Err(ParseError::UnknownMethod { .. })));
    }
}
