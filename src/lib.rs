//! # pysnip
//!
//! pysnip is a forgiving evaluator for beginner Python snippets written in
//! Rust. It runs the handful of list, printing and class patterns an
//! introductory course teaches, silently skips everything else, grades lesson
//! challenges heuristically and reports progress through an injected tracker.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use tracing::warn;

use crate::{
    error::RuntimeError,
    grammar::Grammar,
    interpreter::evaluator::core::{Context, Evaluation},
};

/// Defines the structure of parsed snippet lines.
///
/// This module declares the `Statement` and `Expr` enums and the closed sets
/// of builtins and list methods. The AST is built by the parser, gated by the
/// grammar and executed by the evaluator.
///
/// # Responsibilities
/// - Defines statement and expression types for every supported pattern.
/// - Attaches line numbers to nodes for error reporting.
/// - Reports the grammar features each statement relies on.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// `ParseError` explains why a line was skipped; `RuntimeError` aborts an
/// evaluation. Both carry the source line.
pub mod error;
/// The statement-pattern table as data.
///
/// A lesson enables a subset of features; statements outside it are treated
/// as unrecognized text.
pub mod grammar;
/// Heuristic, substring-based challenge grading.
pub mod grading;
/// Orchestrates the evaluation of a snippet.
///
/// This module ties together line splitting, lexing, parsing, value
/// representations and the evaluator.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// Lesson descriptors and submission sessions.
pub mod lesson;
/// Learner progress and the collaborator trait that records it.
pub mod progress;
/// General utilities for safe numeric conversion and Python indexing.
///
/// # Responsibilities
/// - Safely convert between `i64`, `usize`, and `f64` without silent data
///   loss.
/// - Normalize and clamp Python-style (negative) indices.
pub mod util;

/// The text shown instead of any output when a snippet fails at runtime.
pub const ERROR_MESSAGE: &str = "Error in code! Check your syntax.";

/// Evaluates a snippet with every feature enabled.
///
/// # Errors
/// Returns the first runtime error. Unrecognized lines are never errors; they
/// are listed in [`Evaluation::skipped`].
///
/// # Examples
/// ```
/// use pysnip::evaluate;
///
/// let evaluation = evaluate("fruits = [\"apple\"]\nfruits.append(\"kiwi\")\nprint(fruits)").unwrap();
/// assert_eq!(evaluation.output_text(), "['apple', 'kiwi']");
///
/// // Unknown variables are runtime errors.
/// assert!(evaluate("print(missing)").is_err());
/// ```
pub fn evaluate(source: &str) -> Result<Evaluation, RuntimeError> {
    evaluate_with(source, &Grammar::full())
}

/// Evaluates a snippet with the features enabled by `grammar`.
///
/// Each call starts from an empty context, so the result depends on nothing
/// but `source` and `grammar`.
///
/// # Errors
/// Returns the first runtime error raised by a recognized statement.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn evaluate_with(source: &str, grammar: &Grammar) -> Result<Evaluation, RuntimeError> {
    let mut context = Context::new();
    context.run_program(source, grammar)?;
    Ok(context.into_evaluation())
}

/// Runs a snippet with every feature enabled and returns its printed output.
///
/// On any runtime error the whole result is replaced by [`ERROR_MESSAGE`].
///
/// # Examples
/// ```
/// use pysnip::{ERROR_MESSAGE, run};
///
/// assert_eq!(run("scores = [85, 92]\nprint(sum(scores))"), "177");
/// assert_eq!(run("xs = []\nxs.pop()"), ERROR_MESSAGE);
/// assert_eq!(run("this is not python"), "");
/// ```
#[must_use]
pub fn run(source: &str) -> String {
    run_with(source, &Grammar::full())
}

/// Runs a snippet with the features enabled by `grammar` and returns its
/// printed output, or [`ERROR_MESSAGE`] on a runtime error.
#[must_use]
pub fn run_with(source: &str, grammar: &Grammar) -> String {
    match evaluate_with(source, grammar) {
        Ok(evaluation) => evaluation.output_text(),
        Err(e) => {
            warn!(error = %e, "snippet failed");
            ERROR_MESSAGE.to_string()
        },
    }
}
