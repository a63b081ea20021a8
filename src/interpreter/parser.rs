/// Expression entry point and the shared parse result type.
///
/// Contains `parse_expression`, where every expression parse begins, and the
/// `ParseResult` alias used by the whole parser.
pub mod core;

/// Binary operator parsing.
///
/// Implements the additive and multiplicative precedence levels, all
/// left-associative.
pub mod binary;

/// Unary, postfix and primary expression parsing.
///
/// Handles negation, literals, list literals, f-strings, grouping, builtin
/// calls, method calls, indexing and slicing.
pub mod unary;

/// f-string parsing.
///
/// Splits the raw text of an f-string into literal text and placeholders and
/// parses each placeholder as an expression.
pub mod fstring;

/// Utility functions for the parser.
///
/// Provides comma-separated list parsing, call argument parsing and small
/// token expectations shared by the other parser modules.
pub mod utils;

/// Statement parsing.
///
/// Recognizes the statement shapes of a single line: assignments, item
/// assignments, compound assignments, `print`, bare calls, and `class` /
/// `def` headers.
pub mod statement;
