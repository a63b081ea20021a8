/// The evaluator module executes parsed lines and records their effects.
///
/// The evaluator walks the snippet line by line, skips what it cannot
/// recognize, executes the statements it can, and collects printed output,
/// variables and the structural facts used for grading.
///
/// # Responsibilities
/// - Tracks indentation blocks: class bodies, method bodies and unsupported
///   headers.
/// - Evaluates expressions, builtin calls and list methods.
/// - Reports runtime errors such as an out-of-range index or `max([])`.
pub mod evaluator;
/// The lexer module tokenizes one source line for further parsing.
///
/// The lexer (tokenizer) reads the raw text of a line and produces tokens
/// such as numbers, strings, f-strings, identifiers, operators, delimiters
/// and the `class` / `def` keywords. This is the first stage of
/// interpretation.
///
/// # Responsibilities
/// - Converts a line into tokens paired with the line number.
/// - Decodes string escapes and drops trailing comments.
/// - Reports lexical errors such as unterminated strings.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the tokens of one line and constructs a statement.
/// A line that does not match any supported shape is rejected as a whole.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, statements).
/// - Enforces the supported statement shapes, reporting errors with the line.
/// - Supports arithmetic, list literals, calls, indexing and f-strings.
pub mod parser;
/// Splitting of snippet text into numbered, indented lines.
pub mod source;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the values a snippet can hold: integers, floats,
/// strings, booleans, `None` and lists. It also provides Python-style
/// rendering, equality and the ordering used by `sort`, `sorted`,
/// `max` and `min`.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported value variants.
/// - Renders values the way Python's `str` and `repr` do.
/// - Orders mixed sequences deterministically.
pub mod value;
