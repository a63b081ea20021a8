/// Core evaluation logic and context management.
///
/// Contains the runtime context, the evaluation record handed to graders,
/// statement execution and error propagation.
pub mod core;

/// Whole-program execution.
///
/// Walks source lines, tracks indented blocks, applies the grammar gate and
/// records lines that could not be run.
pub mod program;

/// Expression evaluation: literals, variables, f-strings, calls, indexing.
pub mod expression;

/// Binary operator evaluation logic.
///
/// Handles arithmetic on numbers plus concatenation and repetition of
/// strings and lists.
pub mod binary;

/// List method calls such as `append`, `pop` and `sort`.
pub mod method;

/// The `print` statement.
pub mod print;

/// Builtin function evaluation.
///
/// Handles argument checking and dispatch for the builtin functions.
pub mod function;

/// Utility functions for evaluation.
///
/// Provides argument checks shared by builtins and list methods.
pub mod utils;
