use std::iter::Peekable;

use crate::{
    ast::{FunctionDef, Statement},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::compound_assignment_operator,
            core::{ParseResult, parse_expression},
            utils::{expect, parse_call_args, parse_comma_separated, parse_identifier},
        },
    },
};

/// Parses one whole source line into a statement.
///
/// The line must be fully consumed: anything left after the statement makes
/// the line unrecognized.
///
/// # Errors
/// Returns a `ParseError` if the tokens do not form a supported statement.
///
/// # Example
/// ```
/// use pysnip::{
///     ast::Statement,
///     interpreter::{lexer::tokenize_line, parser::statement::parse_line},
/// };
///
/// let tokens = tokenize_line("fruits.append('kiwi')", 2).unwrap();
/// assert!(matches!(parse_line(&tokens, 2), Ok(Statement::Expression { line: 2, .. })));
///
/// let tokens = tokenize_line("fruits", 3).unwrap();
/// assert!(parse_line(&tokens, 3).is_err());
/// ```
pub fn parse_line(tokens: &[(Token, usize)], line: usize) -> ParseResult<Statement> {
    let mut iter = tokens.iter().peekable();
    if iter.peek().is_none() {
        return Err(ParseError::UnexpectedEndOfInput { line });
    }
    let statement = parse_statement(&mut iter, line)?;

    match iter.next() {
        None => Ok(statement),
        Some((tok, _)) => Err(ParseError::UnexpectedTrailingTokens { token: tok.to_string(),
                                                                    line }),
    }
}

/// Parses a single statement.
///
/// A statement may be one of:
/// - a `class` header,
/// - a `def` header,
/// - a `print(...)` call,
/// - an assignment or compound assignment,
/// - an item assignment (`name[index] = value`),
/// - a call used as a statement.
///
/// Parsing is attempted in that order; the first matching construct is
/// returned. If none match, the input is parsed as an expression, which must
/// be a call: a bare value on its own line has no effect and is rejected.
///
/// # Parameters
/// - `tokens`: Token iterator containing `(Token, line)` pairs.
/// - `line`: The line being parsed.
///
/// # Returns
/// A parsed [`Statement`] node.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some(statement) = parse_class_definition(tokens)? {
        return Ok(statement);
    }
    if let Some(statement) = parse_function_definition(tokens)? {
        return Ok(statement);
    }
    if let Some(statement) = parse_print(tokens)? {
        return Ok(statement);
    }
    if let Some(statement) = parse_assignment(tokens)? {
        return Ok(statement);
    }
    if let Some(statement) = parse_index_assignment(tokens)? {
        return Ok(statement);
    }

    let expr = parse_expression(tokens, line)?;
    if !expr.is_call() {
        return Err(ParseError::NoEffect { line });
    }

    Ok(Statement::Expression { expr, line })
}

/// Parses a class header of the form `class Name:` or `class Name(Base):`.
///
/// Empty parentheses mean no base class. Returns `Ok(None)` without consuming
/// input if the line does not start with `class`.
///
/// # Errors
/// Returns a `ParseError` if the name, the parentheses or the trailing `:`
/// are malformed.
fn parse_class_definition<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Statement>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Class, line)) = tokens.peek() {
        let line = *line;
        tokens.next();

        let name = parse_identifier(tokens, line)?;
        let mut base = None;
        if let Some((Token::LParen, _)) = tokens.peek() {
            tokens.next();
            if let Some((Token::Identifier(_), _)) = tokens.peek() {
                base = Some(parse_identifier(tokens, line)?);
            }
            expect(tokens, &Token::RParen, line)?;
        }
        expect(tokens, &Token::Colon, line)?;

        return Ok(Some(Statement::ClassDef { name, base, line }));
    }
    Ok(None)
}

/// Parses a function header of the form `def name(param, param=default):`.
///
/// Default values are parsed for validity and then dropped; only parameter
/// names are kept. Returns `Ok(None)` without consuming input if the line
/// does not start with `def`.
///
/// # Errors
/// Returns a `ParseError` if:
/// - the name or the parameter list is malformed,
/// - a default value fails to parse,
/// - the trailing `:` is missing.
fn parse_function_definition<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Statement>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Def, line)) = tokens.peek() {
        let line = *line;
        tokens.next();

        let name = parse_identifier(tokens, line)?;
        expect(tokens, &Token::LParen, line)?;
        let params = parse_comma_separated(tokens,
                                           |tokens| {
                                               let param = parse_identifier(tokens, line)?;
                                               if let Some((Token::Equals, _)) = tokens.peek() {
                                                   tokens.next();
                                                   parse_expression(tokens, line)?;
                                               }
                                               Ok(param)
                                           },
                                           &Token::RParen,
                                           line)?;
        expect(tokens, &Token::Colon, line)?;

        return Ok(Some(Statement::FunctionDef(FunctionDef { name, params, line })));
    }
    Ok(None)
}

/// Parses `print(...)`.
///
/// `print` is not an expression in the supported subset: it may only appear
/// as a whole statement. Returns `Ok(None)` without consuming input if the
/// line is not a `print` call.
fn parse_print<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Statement>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Identifier(name), line)) = tokens.peek()
       && name == "print"
    {
        let line = *line;
        let mut lookahead = tokens.clone();
        lookahead.next();
        if let Some((Token::LParen, _)) = lookahead.peek() {
            tokens.next();
            tokens.next();
            let arguments = parse_call_args(tokens, line)?;
            return Ok(Some(Statement::Print { arguments, line }));
        }
    }
    Ok(None)
}

/// Parses an assignment or compound-assignment statement.
///
/// Supported forms:
///
/// - `<identifier> = <expression>`
/// - `<identifier> += <expression>`
/// - `<identifier> -= <expression>`
/// - `<identifier> *= <expression>`
/// - `<identifier> /= <expression>`
///
/// The function performs a limited lookahead: if the next token is an
/// identifier and the following token is `=` or one of the
/// compound-assignment operators, an assignment is parsed.
///
/// If no assignment pattern matches, the function returns `Ok(None)` and does
/// not consume tokens.
///
/// # Errors
/// Returns a `ParseError` if the assigned expression fails to parse.
fn parse_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Statement>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((Token::Identifier(name), line)) = tokens.peek() else {
        return Ok(None);
    };
    let (name, line) = (name.clone(), *line);

    let mut lookahead = tokens.clone();
    lookahead.next();
    match lookahead.peek() {
        Some((Token::Equals, _)) => {
            tokens.next();
            tokens.next();
            let value = parse_expression(tokens, line)?;
            Ok(Some(Statement::Assignment { name, value, line }))
        },
        Some((token, _)) if compound_assignment_operator(token).is_some() => {
            tokens.next();
            let op = tokens.next()
                           .and_then(|(token, _)| compound_assignment_operator(token))
                           .ok_or(ParseError::UnexpectedEndOfInput { line })?;
            let value = parse_expression(tokens, line)?;
            Ok(Some(Statement::CompoundAssignment { name,
                                                    op,
                                                    value,
                                                    line }))
        },
        _ => Ok(None),
    }
}

/// Parses an item assignment of the form `<identifier>[<expression>] =
/// <expression>`.
///
/// This function identifies the form by checking:
/// 1. The next token is an identifier.
/// 2. It is immediately followed by `[`.
/// 3. A matching `]` exists (nested brackets inside the index are allowed).
/// 4. The token after the closing `]` is `=`.
///
/// If the input does not match, the function returns `Ok(None)` without
/// consuming tokens, so `x[0]` or `x[0].count(1)` are left for expression
/// parsing.
///
/// # Errors
/// Returns a `ParseError` if the index or the value fails to parse.
fn parse_index_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Statement>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((Token::Identifier(_), line)) = tokens.peek() else {
        return Ok(None);
    };
    let line = *line;

    let mut lookahead = tokens.clone();
    lookahead.next();
    if !matches!(lookahead.next(), Some((Token::LBracket, _))) {
        return Ok(None);
    }
    let mut brackets = 1;
    while brackets > 0 {
        match lookahead.next() {
            Some((Token::LBracket, _)) => brackets += 1,
            Some((Token::RBracket, _)) => brackets -= 1,
            Some(_) => {},
            None => return Ok(None),
        }
    }
    if !matches!(lookahead.peek(), Some((Token::Equals, _))) {
        return Ok(None);
    }

    let name = parse_identifier(tokens, line)?;
    tokens.next();
    let index = parse_expression(tokens, line)?;
    expect(tokens, &Token::RBracket, line)?;
    expect(tokens, &Token::Equals, line)?;
    let value = parse_expression(tokens, line)?;

    Ok(Some(Statement::IndexAssignment { name,
                                         index,
                                         value,
                                         line }))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        ast::{BinaryOperator, Expr, ListMethod},
        interpreter::lexer::tokenize_line,
    };

    fn parse(text: &str) -> ParseResult<Statement> {
        parse_line(&tokenize_line(text, 1).unwrap(), 1)
    }

    #[test]
    fn class_headers() {
        assert_eq!(parse("class Dog(Animal):").unwrap(),
                   Statement::ClassDef { name: "Dog".to_string(),
                                         base: Some("Animal".to_string()),
                                         line: 1, });
        assert_eq!(parse("class Animal():").unwrap(),
                   Statement::ClassDef { name: "Animal".to_string(),
                                         base: None,
                                         line: 1, });
    }

    #[test]
    fn def_header_drops_defaults() {
        let Statement::FunctionDef(def) = parse("def speak(self, loud=False):").unwrap() else {
            panic!("expected a def header");
        };
        assert_eq!(def.params, vec!["self".to_string(), "loud".to_string()]);
    }

    #[test]
    fn compound_assignment() {
        assert!(matches!(parse("total += 5").unwrap(),
                         Statement::CompoundAssignment { op: BinaryOperator::Add, .. }));
    }

    #[test]
    fn index_assignment_versus_index_call() {
        assert!(matches!(parse("xs[-1] = 7").unwrap(), Statement::IndexAssignment { .. }));
        assert!(matches!(parse("xs[0].count(1)").unwrap(),
                         Statement::Expression { expr: Expr::MethodCall { method: ListMethod::Count,
                                                                          .. },
                                                 .. }));
    }

    #[test]
    fn print_with_separator() {
        let Statement::Print { arguments, .. } = parse("print(a, b, sep=', ')").unwrap() else {
            panic!("expected print");
        };
        assert_eq!(arguments.positional.len(), 2);
        assert!(arguments.keyword("sep").is_some());
    }

    #[test]
    fn rejects_statements_without_effect() {
        assert!(matches!(parse("x + 1"), Err(ParseError::NoEffect { .. })));
        assert!(parse("foo === bar").is_err());
        assert!(parse("print x").is_err());
    }

    #[test]
    fn lines_ending_early_report_their_own_line() {
        let at_line = |text: &str, line: usize| {
            parse_line(&tokenize_line(text, line).unwrap(), line)
        };

        assert_eq!(at_line("x = ", 4), Err(ParseError::UnexpectedEndOfInput { line: 4 }));
        assert_eq!(at_line("xs = [1, 2 *", 6), Err(ParseError::UnexpectedEndOfInput { line: 6 }));
        assert_eq!(at_line("total += -", 9), Err(ParseError::UnexpectedEndOfInput { line: 9 }));
        assert_eq!(parse_line(&[], 2), Err(ParseError::UnexpectedEndOfInput { line: 2 }));
    }
}
