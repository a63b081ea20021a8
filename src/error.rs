/// Parsing errors.
///
/// Defines every reason a source line can fail to be recognized: lexing
/// failures, malformed statement shapes, trailing tokens, unknown functions,
/// or patterns the active grammar does not enable. Parse errors never abort an
/// evaluation; the line is skipped and the error is kept for diagnostics.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while executing recognized
/// statements, such as unknown variables, extrema of empty lists, index
/// errors, type mismatches and division by zero. A runtime error aborts the
/// whole evaluation.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
