use crate::{
    ast::FStringPart,
    error::ParseError,
    interpreter::{
        lexer::tokenize_line,
        parser::core::{ParseResult, parse_complete_expression},
    },
};

/// Splits the raw text of an f-string into text and placeholders.
///
/// `{{` and `}}` stand for literal braces. A placeholder runs to its matching
/// `}`; braces, brackets and parentheses nested inside it, as well as quoted
/// strings, do not end it. A top-level `:` starts a format spec, of which only
/// `.Nf` is honored (fixed `N` decimal places); other specs are accepted and
/// ignored.
///
/// # Errors
/// Returns `ParseError::InvalidFString` for an unmatched brace or an empty
/// placeholder, or the placeholder's own parse error.
///
/// # Example
/// ```
/// use pysnip::{ast::FStringPart, interpreter::parser::fstring::parse_fstring};
///
/// let parts = parse_fstring("Total: {total:.2f}", 1).unwrap();
/// assert_eq!(parts.len(), 2);
/// assert!(matches!(&parts[1], FStringPart::Placeholder { precision: Some(2), .. }));
/// ```
pub fn parse_fstring(raw: &str, line: usize) -> ParseResult<Vec<FStringPart>> {
    let mut parts = Vec::new();
    let mut text = String::new();
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                text.push('{');
            },
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                text.push('}');
            },
            '}' => {
                return Err(ParseError::InvalidFString { details: "single '}' is not allowed".to_string(),
                                                        line });
            },
            '{' => {
                let (body, spec) = take_placeholder(&mut chars, line)?;
                if !text.is_empty() {
                    parts.push(FStringPart::Text(std::mem::take(&mut text)));
                }
                parts.push(parse_placeholder(&body, spec.as_deref(), line)?);
            },
            other => text.push(other),
        }
    }

    if !text.is_empty() {
        parts.push(FStringPart::Text(text));
    }
    Ok(parts)
}

/// Consumes a placeholder up to and including its closing `}`, returning the
/// expression text and the format spec, if any.
fn take_placeholder<I>(chars: &mut std::iter::Peekable<I>,
                       line: usize)
                       -> ParseResult<(String, Option<String>)>
    where I: Iterator<Item = char>
{
    let mut body = String::new();
    let mut spec: Option<String> = None;
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for c in chars.by_ref() {
        if let Some(spec) = spec.as_mut() {
            if c == '}' {
                return Ok((body, Some(spec.clone())));
            }
            spec.push(c);
            continue;
        }
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            body.push(c);
            continue;
        }
        match c {
            '\'' | '"' => {
                quote = Some(c);
                body.push(c);
            },
            '(' | '[' | '{' => {
                depth += 1;
                body.push(c);
            },
            ')' | ']' => {
                depth = depth.saturating_sub(1);
                body.push(c);
            },
            '}' if depth > 0 => {
                depth -= 1;
                body.push(c);
            },
            '}' => return Ok((body, None)),
            ':' if depth == 0 => spec = Some(String::new()),
            other => body.push(other),
        }
    }

    Err(ParseError::InvalidFString { details: "expected '}' before the end of the string".to_string(),
                                     line })
}

fn parse_placeholder(body: &str, spec: Option<&str>, line: usize) -> ParseResult<FStringPart> {
    if body.trim().is_empty() {
        return Err(ParseError::InvalidFString { details: "empty expression is not allowed".to_string(),
                                                line });
    }
    let tokens = tokenize_line(body, line)?;
    let expr = parse_complete_expression(&tokens, line)?;
    let precision = spec.and_then(parse_precision);
    Ok(FStringPart::Placeholder { expr, precision })
}

/// Reads `N` from a `.Nf` format spec.
/// Precisions above this are ignored like any other unsupported spec.
const MAX_PRECISION: usize = 100;

fn parse_precision(spec: &str) -> Option<usize> {
    spec.strip_prefix('.')?
        .strip_suffix('f')?
        .parse()
        .ok()
        .filter(|digits| *digits <= MAX_PRECISION)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ast::Expr;

    #[test]
    fn escaped_braces_are_text() {
        assert_eq!(parse_fstring("{{x}}", 1).unwrap(),
                   vec![FStringPart::Text("{x}".to_string())]);
    }

    #[test]
    fn placeholder_with_call_and_ignored_spec() {
        let parts = parse_fstring("n={len(xs)} w={x:>5}", 2).unwrap();
        assert_eq!(parts.len(), 4);
        assert!(matches!(&parts[1],
                         FStringPart::Placeholder { expr: Expr::Call { .. },
                                                    precision: None }));
        assert!(matches!(&parts[3], FStringPart::Placeholder { precision: None, .. }));
    }

    #[test]
    fn nested_index_does_not_close_placeholder() {
        let parts = parse_fstring("{xs[0]}!", 1).unwrap();
        assert!(matches!(&parts[0], FStringPart::Placeholder { expr: Expr::Index { .. }, .. }));
        assert_eq!(parts[1], FStringPart::Text("!".to_string()));
    }

    #[test]
    fn malformed_placeholders_are_errors() {
        assert!(matches!(parse_fstring("{}", 1), Err(ParseError::InvalidFString { .. })));
        assert!(matches!(parse_fstring("{x", 1), Err(ParseError::InvalidFString { .. })));
        assert!(matches!(parse_fstring("a}b", 1), Err(ParseError::InvalidFString { .. })));
    }
}
