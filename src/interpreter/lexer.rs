use logos::Logos;

use crate::error::ParseError;

/// Why a slice of a line did not become a token.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LexError {
    /// The slice matches no token.
    #[default]
    Unrecognized,
    /// An integer literal does not fit in 64 bits.
    IntegerTooLarge,
}

/// Represents a lexical token of a snippet line.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens of the supported Python subset.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(error = LexError)]
pub enum Token {
    /// Float literal tokens, such as `3.14` or `2.1e-10`.
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", parse_float)]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+", parse_float)]
    Real(f64),
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// Boolean literal tokens, `True` or `False`.
    #[token("True", |_| true)]
    #[token("False", |_| false)]
    Bool(bool),
    /// `None`
    #[token("None")]
    NoneLiteral,
    /// String literal tokens with escapes decoded, such as `"apple"`.
    #[regex(r#""([^"\\\n]|\\.)*""#, parse_string)]
    #[regex(r"'([^'\\\n]|\\.)*'", parse_string)]
    Str(String),
    /// f-string tokens carrying the raw text between the quotes.
    #[regex(r#"[fF]"([^"\\\n]|\\.)*""#, parse_fstring)]
    #[regex(r"[fF]'([^'\\\n]|\\.)*'", parse_fstring)]
    FString(String),
    /// `class`
    #[token("class")]
    Class,
    /// `def`
    #[token("def")]
    Def,
    /// Identifier tokens, such as `fruits` or `append`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `# Comments.`
    #[regex(r"#[^\n\r]*", logos::skip, allow_greedy = true)]
    Comment,
    /// `+=`
    #[token("+=")]
    PlusAssign,
    /// `-=`
    #[token("-=")]
    MinusAssign,
    /// `*=`
    #[token("*=")]
    MulAssign,
    /// `/=`
    #[token("/=")]
    DivAssign,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `//`
    #[token("//")]
    DoubleSlash,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `,`
    #[token(",")]
    Comma,
    /// `.`
    #[token(".")]
    Dot,
    /// `:`
    #[token(":")]
    Colon,
    /// `=`
    #[token("=")]
    Equals,
    /// Spaces, tabs and feeds.
    #[regex(r"[ \t\f\r]+", logos::skip)]
    Ignored,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Real(r) => write!(f, "{r}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Bool(true) => write!(f, "True"),
            Self::Bool(false) => write!(f, "False"),
            Self::NoneLiteral => write!(f, "None"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::FString(s) => write!(f, "f{s:?}"),
            Self::Class => write!(f, "class"),
            Self::Def => write!(f, "def"),
            Self::Identifier(name) => write!(f, "{name}"),
            Self::Comment => write!(f, "#"),
            Self::PlusAssign => write!(f, "+="),
            Self::MinusAssign => write!(f, "-="),
            Self::MulAssign => write!(f, "*="),
            Self::DivAssign => write!(f, "/="),
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Star => write!(f, "*"),
            Self::DoubleSlash => write!(f, "//"),
            Self::Slash => write!(f, "/"),
            Self::Percent => write!(f, "%"),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::LBracket => write!(f, "["),
            Self::RBracket => write!(f, "]"),
            Self::Comma => write!(f, ","),
            Self::Dot => write!(f, "."),
            Self::Colon => write!(f, ":"),
            Self::Equals => write!(f, "="),
            Self::Ignored => write!(f, " "),
        }
    }
}

/// Tokenizes a single line of source text.
///
/// Every token is paired with `line`, the 1-based line number it came from,
/// which is the shape the parser consumes.
///
/// # Errors
/// Returns `ParseError::UnrecognizedCharacters` at the first slice that does
/// not form a token, such as an unterminated string, and
/// `ParseError::LiteralTooLarge` for an integer beyond 64 bits.
///
/// # Example
/// ```
/// use pysnip::interpreter::lexer::{Token, tokenize_line};
///
/// let tokens = tokenize_line("x = [1, 2]  # two numbers", 3).unwrap();
/// assert_eq!(tokens.len(), 7);
/// assert_eq!(tokens[0], (Token::Identifier("x".to_string()), 3));
/// ```
pub fn tokenize_line(text: &str, line: usize) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(text);

    while let Some(token) = lexer.next() {
        match token {
            Ok(tok) => tokens.push((tok, line)),
            Err(LexError::Unrecognized) => {
                return Err(ParseError::UnrecognizedCharacters { text: lexer.slice().to_string(),
                                                                line });
            },
            Err(LexError::IntegerTooLarge) => return Err(ParseError::LiteralTooLarge { line }),
        }
    }

    Ok(tokens)
}

/// Parses a floating-point literal from the current token slice.
///
/// # Returns
/// - `Some(f64)`: The parsed floating-point value if successful.
/// - `None`: If the token slice is not a valid float.
fn parse_float(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}
/// Parses an integer literal from the current token slice.
///
/// # Errors
/// Returns `LexError::IntegerTooLarge` if the literal does not fit into an
/// `i64`.
fn parse_integer(lex: &logos::Lexer<Token>) -> Result<i64, LexError> {
    lex.slice().parse().map_err(|_| LexError::IntegerTooLarge)
}
/// Parses a quoted string literal, decoding escape sequences.
fn parse_string(lex: &logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    unescape(&slice[1..slice.len() - 1])
}
/// Parses an f-string literal, keeping the placeholders for the parser.
fn parse_fstring(lex: &logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    unescape(&slice[2..slice.len() - 1])
}

/// Decodes the escape sequences Python beginners actually use.
///
/// Unknown escapes are kept verbatim, backslash included, as Python does.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some('\'') => out.push('\''),
            Some('"') => out.push('"'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            },
            None => out.push('\\'),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn kinds(text: &str) -> Vec<Token> {
        tokenize_line(text, 1).unwrap()
                              .into_iter()
                              .map(|(tok, _)| tok)
                              .collect()
    }

    #[test]
    fn lexes_list_assignment() {
        assert_eq!(kinds("scores = [78, 9.5, 'a']"),
                   vec![Token::Identifier("scores".into()),
                        Token::Equals,
                        Token::LBracket,
                        Token::Integer(78),
                        Token::Comma,
                        Token::Real(9.5),
                        Token::Comma,
                        Token::Str("a".into()),
                        Token::RBracket]);
    }

    #[test]
    fn fstring_beats_identifier_f() {
        assert_eq!(kinds(r#"print(f"Total: {total}")"#),
                   vec![Token::Identifier("print".into()),
                        Token::LParen,
                        Token::FString("Total: {total}".into()),
                        Token::RParen]);
        assert_eq!(kinds("f = 1")[0], Token::Identifier("f".into()));
    }

    #[test]
    fn decodes_escapes_and_skips_trailing_comment() {
        assert_eq!(kinds(r#""it\'s\n" # note"#), vec![Token::Str("it's\n".into())]);
    }

    #[test]
    fn keywords_and_floor_division() {
        assert_eq!(kinds("class def // /"),
                   vec![Token::Class, Token::Def, Token::DoubleSlash, Token::Slash]);
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let err = tokenize_line("print(\"oops)", 4).unwrap_err();
        assert_eq!(err.line(), 4);
    }

    #[test]
    fn oversized_integers_are_too_large_not_unrecognized() {
        assert_eq!(tokenize_line("x = 99999999999999999999", 2),
                   Err(ParseError::LiteralTooLarge { line: 2 }));
        assert_eq!(kinds("x = 9223372036854775807")[2], Token::Integer(i64::MAX));
    }

    #[test]
    fn comparison_lexes_as_two_equals() {
        assert_eq!(kinds("=="), vec![Token::Equals, Token::Equals]);
    }
}
