use thiserror::Error;

use crate::grammar::Feature;

/// Represents all reasons a line can fail to be recognized.
///
/// None of these abort an evaluation. The evaluator records them next to the
/// skipped line so that tooling can explain why a line had no effect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The lexer met characters that do not form any token.
    #[error("Error on line {line}: Unrecognized characters: {text}.")]
    UnrecognizedCharacters {
        /// The offending slice of source text.
        text: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Found an unexpected token while parsing.
    #[error("Error on line {line}: Unexpected token: {token}.")]
    UnexpectedToken {
        /// The token encountered.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Reached the end of the line unexpectedly.
    #[error("Error on line {line}: Unexpected end of line.")]
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A closing parenthesis `)` was expected but not found.
    #[error("Error on line {line}: Expected closing parenthesis ')' but none found.")]
    ExpectedClosingParen {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A closing bracket `]` was expected but not found.
    #[error("Error on line {line}: Expected closing bracket ']' but none found.")]
    ExpectedClosingBracket {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Found extra tokens after a complete statement.
    #[error("Error on line {line}: Extra tokens after statement: {token}")]
    UnexpectedTrailingTokens {
        /// The first extra token.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Called a function that is not part of the supported builtins.
    #[error("Error on line {line}: Unknown function '{name}'.")]
    UnknownFunction {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called a method that is not a supported list method.
    #[error("Error on line {line}: Unknown method '{name}'.")]
    UnknownMethod {
        /// The name of the method.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A bare expression that is not a call and therefore has no effect.
    #[error("Error on line {line}: Expression statement has no effect.")]
    NoEffect {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A block header (`for`, `if`, ...) that is not supported.
    #[error("Error on line {line}: Unsupported block '{header}'.")]
    UnsupportedBlock {
        /// The keyword or text opening the block.
        header: String,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// A line nested under a block that was itself skipped.
    #[error("Error on line {line}: Inside the unsupported block opened on line {header_line}.")]
    InsideSkippedBlock {
        /// The line of the enclosing block header.
        header_line: usize,
        /// The source line where the error occurred.
        line:        usize,
    },
    /// A placeholder inside an f-string is malformed.
    #[error("Error on line {line}: Invalid f-string: {details}.")]
    InvalidFString {
        /// Details about the malformed placeholder.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// The statement uses a pattern the active grammar does not enable.
    #[error("Error on line {line}: '{feature}' is not available in this lesson.")]
    UnsupportedFeature {
        /// The disabled feature.
        feature: Feature,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A literal value was too large to be represented.
    #[error("Error on line {line}: Literal is too large.")]
    LiteralTooLarge {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl ParseError {
    /// Gets the line number the error refers to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnrecognizedCharacters { line, .. }
            | Self::UnexpectedToken { line, .. }
            | Self::UnexpectedEndOfInput { line }
            | Self::ExpectedClosingParen { line }
            | Self::ExpectedClosingBracket { line }
            | Self::UnexpectedTrailingTokens { line, .. }
            | Self::UnknownFunction { line, .. }
            | Self::UnknownMethod { line, .. }
            | Self::NoEffect { line }
            | Self::UnsupportedBlock { line, .. }
            | Self::InsideSkippedBlock { line, .. }
            | Self::InvalidFString { line, .. }
            | Self::UnsupportedFeature { line, .. }
            | Self::LiteralTooLarge { line } => *line,
        }
    }
}
