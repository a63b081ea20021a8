use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::{BinaryOperator, Builtin, FunctionDef, ListMethod, Statement},
    error::{ParseError, RuntimeError},
    interpreter::value::core::Value,
    util::num::resolve_index,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// An operation applied to a named variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `name = ...`
    Assign,
    /// `name += ...` and friends.
    CompoundAssign(BinaryOperator),
    /// `name[i] = ...`
    IndexAssign,
    /// `name.method(...)`
    Method(ListMethod),
    /// `builtin(name, ...)`
    Call(Builtin),
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Assign => write!(f, "="),
            Self::CompoundAssign(op) => write!(f, "{op}="),
            Self::IndexAssign => write!(f, "[]="),
            Self::Method(method) => write!(f, ".{}()", method.name()),
            Self::Call(builtin) => write!(f, "{}()", builtin.name()),
        }
    }
}

/// Records that a statement touched a variable.
///
/// Touches let a grader ask structural questions such as "was `sorted`
/// called on `scores`" without matching source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Touch {
    /// The variable name.
    pub variable:  String,
    /// What was done to it.
    pub operation: Operation,
    /// Line number in the source code.
    pub line:      usize,
}

/// The shape of a `class` block: its header and the methods declared in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassShape {
    /// The class name.
    pub name:        String,
    /// The base class, if any.
    pub base:        Option<String>,
    /// `def` headers found directly in the class body.
    pub methods:     Vec<FunctionDef>,
    /// Whether any method body calls `super()`.
    pub calls_super: bool,
    /// Line number of the `class` header.
    pub line:        usize,
}

impl ClassShape {
    /// Finds a method by name.
    #[must_use]
    pub fn method(&self, name: &str) -> Option<&FunctionDef> {
        self.methods.iter().find(|m| m.name == name)
    }
}

/// A line the evaluator did not execute, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number.
    pub line:   usize,
    /// The trimmed source text.
    pub text:   String,
    /// Why the line was not recognized.
    pub reason: ParseError,
}

/// Everything one evaluation of a snippet produced.
#[derive(Debug, Clone, Default)]
pub struct Evaluation {
    /// Printed lines, in order.
    pub output:    Vec<String>,
    /// Final variable bindings.
    pub variables: HashMap<String, Value>,
    /// Variable touches, in execution order.
    pub touches:   Vec<Touch>,
    /// Classes declared at the top level.
    pub classes:   Vec<ClassShape>,
    /// Functions declared at the top level.
    pub functions: Vec<FunctionDef>,
    /// Lines that were not recognized.
    pub skipped:   Vec<SkippedLine>,
}

impl Evaluation {
    /// The printed output as a single newline-joined string.
    #[must_use]
    pub fn output_text(&self) -> String {
        self.output.join("\n")
    }

    /// Looks up a final variable binding.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Finds a declared class by name.
    #[must_use]
    pub fn class(&self, name: &str) -> Option<&ClassShape> {
        self.classes.iter().find(|c| c.name == name)
    }

    /// Tests whether `variable` was touched by `operation`.
    #[must_use]
    pub fn touched(&self, variable: &str, operation: Operation) -> bool {
        self.touches
            .iter()
            .any(|t| t.variable == variable && t.operation == operation)
    }
}

/// Stores the runtime evaluation context.
///
/// This struct holds the state of one snippet evaluation: variable bindings,
/// printed output and the structural facts collected along the way.
///
/// ## Usage
///
/// A `Context` is created per evaluation and consumed by
/// [`Context::into_evaluation`]. Nothing is shared between evaluations.
#[derive(Debug, Default)]
pub struct Context {
    /// Variable bindings.
    pub variables:   HashMap<String, Value>,
    /// Completed output lines.
    pub output:      Vec<String>,
    /// Output written since the last newline.
    pending:         String,
    /// Variable touches, in execution order.
    pub touches:     Vec<Touch>,
    /// Declared classes.
    pub classes:     Vec<ClassShape>,
    /// Declared top-level functions.
    pub functions:   Vec<FunctionDef>,
    /// Lines that were not recognized.
    pub skipped:     Vec<SkippedLine>,
}

impl Context {
    /// Creates a new evaluation context with no variables and no output.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Finishes the evaluation and returns what it produced.
    #[must_use]
    pub fn into_evaluation(mut self) -> Evaluation {
        self.flush();
        Evaluation { output:    self.output,
                     variables: self.variables,
                     touches:   self.touches,
                     classes:   self.classes,
                     functions: self.functions,
                     skipped:   self.skipped, }
    }

    /// Appends text to the output, splitting it into lines at `\n`.
    pub fn write(&mut self, text: &str) {
        let mut pieces = text.split('\n');
        if let Some(first) = pieces.next() {
            self.pending.push_str(first);
        }
        for piece in pieces {
            self.output.push(std::mem::take(&mut self.pending));
            self.pending.push_str(piece);
        }
    }

    /// Moves a trailing partial line, left by `print(..., end="")`, into the
    /// output.
    pub fn flush(&mut self) {
        if !self.pending.is_empty() {
            self.output.push(std::mem::take(&mut self.pending));
        }
    }

    /// Records that `variable` was touched by `operation`.
    pub fn touch(&mut self, variable: &str, operation: Operation, line: usize) {
        self.touches.push(Touch { variable: variable.to_string(),
                                  operation,
                                  line });
    }

    /// Looks up a variable by name.
    ///
    /// # Errors
    /// Returns `RuntimeError::UnknownVariable` if it was never assigned.
    ///
    /// # Example
    /// ```
    /// use pysnip::interpreter::{evaluator::core::Context, value::core::Value};
    ///
    /// let mut ctx = Context::new();
    /// ctx.variables.insert("x".to_string(), Value::Integer(10));
    ///
    /// assert_eq!(ctx.get_variable("x", 1).unwrap(), &Value::Integer(10));
    /// assert!(ctx.get_variable("y", 1).is_err());
    /// ```
    pub fn get_variable(&self, name: &str, line: usize) -> EvalResult<&Value> {
        self.variables
            .get(name)
            .ok_or_else(|| RuntimeError::UnknownVariable { name: name.to_string(),
                                                           line })
    }

    /// Looks up a variable by name for mutation.
    ///
    /// # Errors
    /// Returns `RuntimeError::UnknownVariable` if it was never assigned.
    pub fn get_variable_mut(&mut self, name: &str, line: usize) -> EvalResult<&mut Value> {
        self.variables
            .get_mut(name)
            .ok_or_else(|| RuntimeError::UnknownVariable { name: name.to_string(),
                                                           line })
    }

    /// Evaluates a single statement.
    ///
    /// Handles assignments, compound and item assignments, `print`, calls used
    /// as statements, and records `class` / `def` headers. Block structure is
    /// handled by the caller.
    ///
    /// # Errors
    /// Returns the first `RuntimeError` raised while evaluating the statement.
    ///
    /// # Example
    /// ```
    /// use pysnip::{
    ///     interpreter::{
    ///         evaluator::core::Context, lexer::tokenize_line, parser::statement::parse_line,
    ///         value::core::Value,
    ///     },
    /// };
    ///
    /// let mut ctx = Context::new();
    /// for line in ["xs = [3, 1]", "xs.append(2)", "print(len(xs))"] {
    ///     let statement = parse_line(&tokenize_line(line, 1).unwrap(), 1).unwrap();
    ///     ctx.eval_statement(&statement).unwrap();
    /// }
    /// assert_eq!(ctx.into_evaluation().output, vec!["3".to_string()]);
    /// ```
    pub fn eval_statement(&mut self, statement: &Statement) -> EvalResult<()> {
        match statement {
            Statement::Assignment { name, value, line } => {
                let value = self.eval(value)?;
                self.touch(name, Operation::Assign, *line);
                self.variables.insert(name.clone(), value);
                Ok(())
            },
            Statement::CompoundAssignment { name,
                                            op,
                                            value,
                                            line, } => {
                let old_value = self.get_variable(name, *line)?.clone();
                let rhs_value = self.eval(value)?;
                let result = Self::eval_binary(*op, &old_value, &rhs_value, *line)?;

                self.touch(name, Operation::CompoundAssign(*op), *line);
                self.variables.insert(name.clone(), result);
                Ok(())
            },
            Statement::IndexAssignment { name,
                                         index,
                                         value,
                                         line, } => {
                let index = self.eval(index)?.as_index(*line)?;
                let value = self.eval(value)?;
                self.touch(name, Operation::IndexAssign, *line);

                match self.get_variable_mut(name, *line)? {
                    Value::List(items) => {
                        let position = resolve_index(index, items.len(), *line)?;
                        Rc::make_mut(items)[position] = value;
                        Ok(())
                    },
                    other => Err(RuntimeError::TypeError { details: format!("'{}' object does not support item assignment",
                                                                            other.type_name()),
                                                           line:    *line, }),
                }
            },
            Statement::Print { arguments, line } => self.eval_print(arguments, *line),
            Statement::Expression { expr, .. } => self.eval(expr).map(|_| ()),
            Statement::ClassDef { name, base, line } => {
                self.classes.push(ClassShape { name:        name.clone(),
                                               base:        base.clone(),
                                               methods:     Vec::new(),
                                               calls_super: false,
                                               line:        *line, });
                Ok(())
            },
            Statement::FunctionDef(def) => {
                self.functions.push(def.clone());
                Ok(())
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn write_splits_lines_and_keeps_partial_line() {
        let mut ctx = Context::new();
        ctx.write("a\nb");
        ctx.write("c\n");
        ctx.write("d");
        assert_eq!(ctx.into_evaluation().output,
                   vec!["a".to_string(), "bc".to_string(), "d".to_string()]);
    }

    #[test]
    fn operations_display_like_source() {
        assert_eq!(Operation::Method(ListMethod::Append).to_string(), ".append()");
        assert_eq!(Operation::Call(Builtin::Sorted).to_string(), "sorted()");
        assert_eq!(Operation::CompoundAssign(BinaryOperator::Add).to_string(), "+=");
    }
}
