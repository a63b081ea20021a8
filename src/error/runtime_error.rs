use thiserror::Error;

/// Represents all errors that can occur while executing a snippet.
///
/// Any of these aborts the evaluation. The degrade-gracefully entry points
/// replace the whole result with a fixed message instead of surfacing them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Tried to use an undefined variable.
    #[error("Error on line {line}: Unknown variable '{name}'.")]
    UnknownVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A value had an unexpected or incompatible type.
    #[error("Error on line {line}: Type error: {details}.")]
    TypeError {
        /// Details about the type mismatch.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A numeric value was expected, but not found.
    #[error("Error on line {line}: Expected number.")]
    ExpectedNumber {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An operation that needs at least one element got an empty sequence.
    #[error("Error on line {line}: {operation}() of an empty sequence.")]
    EmptySequence {
        /// The operation that was attempted, e.g. `max` or `pop`.
        operation: String,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// Tried to access a list or string element outside its bounds.
    #[error("Error on line {line}: Index {index} out of range for length {len}.")]
    IndexOutOfBounds {
        /// The index that was requested.
        index: i64,
        /// The length of the sequence.
        len:   usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// `list.index(value)` did not find the value.
    #[error("Error on line {line}: {value} is not in list.")]
    ValueNotFound {
        /// The searched value in its printed form.
        value: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// The wrong number of arguments was supplied to a function or method.
    #[error("Error on line {line}: Argument count mismatch for '{name}'.")]
    ArgumentCountMismatch {
        /// The function or method name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An argument was invalid or out of range.
    #[error("Error on line {line}: Invalid argument: {details}.")]
    InvalidArgument {
        /// Details about why the argument is invalid.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Arithmetic operation overflowed.
    #[error("Error on line {line}: Integer overflow while trying to compute result.")]
    Overflow {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Attempted division by zero.
    #[error("Error on line {line}: Division by zero.")]
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A number could not be converted without loss.
    #[error("Error on line {line}: Number is too large.")]
    LiteralTooLarge {
        /// The source line where the error occurred.
        line: usize,
    },
}
