use std::iter::Peekable;

use crate::{
    ast::{CallArgs, Expr},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, parse_expression},
    },
};

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by list literals, call arguments and `def`
/// parameter lists. It repeatedly calls `parse_item` to parse one element,
/// expecting either:
///
/// - a comma, to continue the list, or
/// - the specified closing token, to end it.
///
/// An immediately encountered closing token produces an empty list, and a
/// trailing comma before the closing token is accepted, as in Python.
///
/// Grammar (simplified): `list := (item ("," item)* ","?)?`
///
/// # Parameters
/// - `tokens`: Token iterator positioned after the opening token.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list (e.g., `]` or `)`).
/// - `line`: Line of the opening token, for end-of-line errors.
///
/// # Errors
/// Returns a `ParseError` if:
/// - an item fails to parse,
/// - an unexpected token is encountered,
/// - the line ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token,
    line: usize)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut items = Vec::new();
    loop {
        if let Some((tok, _)) = tokens.peek()
           && tok == closing
        {
            tokens.next();
            break;
        }
        items.push(parse_item(tokens)?);
        match tokens.peek() {
            Some((Token::Comma, _)) => {
                tokens.next();
            },
            Some((tok, _)) if tok == closing => {
                tokens.next();
                break;
            },
            Some((tok, line)) => {
                return Err(ParseError::UnexpectedToken { token: format!("expected ',' or '{closing}', found '{tok}'"),
                                                         line:  *line, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line }),
        }
    }
    Ok(items)
}

/// Parses a plain identifier and returns its name.
///
/// # Errors
/// Returns a `ParseError` if the next token is not an identifier or the line
/// ends.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>,
                                                              line: usize)
                                                              -> ParseResult<String>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::Identifier(s), _)) => Ok(s.clone()),
        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { token: format!("expected identifier, found '{tok}'"),
                                              line:  *line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line }),
    }
}

/// Consumes the next token, requiring it to be `expected`.
///
/// # Errors
/// Returns `ParseError::UnexpectedToken` naming both tokens, or
/// `UnexpectedEndOfInput` if the line ends.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    expected: &Token,
                                                    line: usize)
                                                    -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((tok, _)) if tok == expected => Ok(()),
        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { token: format!("expected '{expected}', found '{tok}'"),
                                              line:  *line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line }),
    }
}

/// One element of a call's argument list.
enum Argument {
    Positional(Expr),
    Keyword(String, Expr),
}

/// Parses call arguments up to and including the closing `)`.
///
/// The opening `(` must already be consumed. Each argument is either an
/// expression or a keyword argument of the form `name=expression`, detected
/// with a one-token lookahead the way assignments are.
///
/// Grammar: `arguments := (argument ("," argument)* ","?)? ")"`,
/// `argument := IDENT "=" expression | expression`
///
/// # Errors
/// Returns a `ParseError` if an argument fails to parse or the list is not
/// closed.
pub(in crate::interpreter::parser) fn parse_call_args<'a, I>(tokens: &mut Peekable<I>,
                                                             line: usize)
                                                             -> ParseResult<CallArgs>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let arguments = parse_comma_separated(tokens,
                                          |tokens| parse_argument(tokens, line),
                                          &Token::RParen,
                                          line)?;

    let mut call_args = CallArgs::default();
    for argument in arguments {
        match argument {
            Argument::Positional(expr) => {
                if !call_args.keywords.is_empty() {
                    return Err(ParseError::UnexpectedToken {
                        token: "positional argument follows keyword argument".to_string(),
                        line,
                    });
                }
                call_args.positional.push(expr);
            },
            Argument::Keyword(name, expr) => call_args.keywords.push((name, expr)),
        }
    }
    Ok(call_args)
}

fn parse_argument<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Argument>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Identifier(name), _)) = tokens.peek() {
        let mut lookahead = tokens.clone();
        lookahead.next();
        if let Some((Token::Equals, _)) = lookahead.peek() {
            let name = name.clone();
            tokens.next();
            tokens.next();
            return Ok(Argument::Keyword(name, parse_expression(tokens, line)?));
        }
    }
    Ok(Argument::Positional(parse_expression(tokens, line)?))
}
