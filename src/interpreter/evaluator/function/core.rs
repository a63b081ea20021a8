use crate::{
    ast::Builtin,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            function::{builtin, min_max, sorted},
            utils::{check_arity, check_keywords},
        },
        value::core::Value,
    },
};

/// Evaluated call arguments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Arguments {
    /// Positional values in source order.
    pub positional: Vec<Value>,
    /// Keyword values in source order.
    pub keywords:   Vec<(String, Value)>,
}

impl Arguments {
    /// Creates arguments from positional values only.
    #[must_use]
    pub const fn positional(positional: Vec<Value>) -> Self {
        Self { positional,
               keywords: Vec::new() }
    }

    /// Finds a keyword argument by name.
    #[must_use]
    pub fn keyword(&self, name: &str) -> Option<&Value> {
        self.keywords
            .iter()
            .find_map(|(key, value)| (key == name).then_some(value))
    }
}

/// Type alias for builtin function handlers.
///
/// A builtin receives the evaluated arguments and the line number. Arity and
/// keyword names are checked before it is called.
type BuiltinFn = fn(&Arguments, usize) -> EvalResult<Value>;

/// Specifies the allowed number of positional arguments.
///
/// - `Exact(n)` means exactly `n` arguments.
/// - `OneOf(slice)` means any count listed in `slice`.
/// - `AtLeast(n)` means `n` or more arguments.
#[derive(Debug, Clone, Copy)]
pub enum Arity {
    Exact(usize),
    OneOf(&'static [usize]),
    AtLeast(usize),
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    ///
    /// Returns `true` if the count is permitted, `false` otherwise.
    #[must_use]
    pub fn check(&self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == *m,
            Self::OneOf(arr) => arr.contains(&n),
            Self::AtLeast(m) => n >= *m,
        }
    }
}

/// Defines builtin functions by generating a lookup table.
///
/// Each entry provides:
/// - the [`Builtin`] it implements,
/// - an arity specification,
/// - the keyword argument names it accepts,
/// - a function pointer implementing the builtin.
///
/// The macro produces `BuiltinDef` (internal metadata) and `BUILTIN_TABLE`
/// (static table for lookup).
macro_rules! builtin_functions {
    (
        $(
            $builtin:path => {
                arity: $arity:expr,
                keywords: $keywords:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            builtin:  Builtin,
            arity:    Arity,
            keywords: &'static [&'static str],
            func:     BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { builtin: $builtin, arity: $arity, keywords: $keywords, func: $func },
            )*
        ];
    };
}

builtin_functions! {
    Builtin::Len    => { arity: Arity::Exact(1),        keywords: &[],          func: builtin::len },
    Builtin::Sum    => { arity: Arity::OneOf(&[1, 2]),  keywords: &["start"],   func: builtin::sum },
    Builtin::Max    => { arity: Arity::AtLeast(1),      keywords: &[],          func: |args, line| min_max::min_max(true, args, line) },
    Builtin::Min    => { arity: Arity::AtLeast(1),      keywords: &[],          func: |args, line| min_max::min_max(false, args, line) },
    Builtin::Sorted => { arity: Arity::Exact(1),        keywords: &["reverse"], func: sorted::sorted },
    Builtin::Str    => { arity: Arity::OneOf(&[0, 1]),  keywords: &[],          func: builtin::str },
    Builtin::Int    => { arity: Arity::OneOf(&[0, 1]),  keywords: &[],          func: builtin::int },
    Builtin::Float  => { arity: Arity::OneOf(&[0, 1]),  keywords: &[],          func: builtin::float },
    Builtin::Abs    => { arity: Arity::Exact(1),        keywords: &[],          func: builtin::abs },
    Builtin::Round  => { arity: Arity::OneOf(&[1, 2]),  keywords: &["ndigits"], func: builtin::round },
}

impl Context {
    /// Evaluates a builtin function call.
    ///
    /// The builtin's table entry is looked up, the argument count and keyword
    /// names are verified, and the builtin is executed.
    ///
    /// # Parameters
    /// - `builtin`: The called builtin.
    /// - `arguments`: Evaluated argument values.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The function result or an error if arity, keywords or the builtin
    /// itself fail.
    ///
    /// # Example
    /// ```
    /// use pysnip::{
    ///     ast::Builtin,
    ///     interpreter::{
    ///         evaluator::{core::Context, function::core::Arguments},
    ///         value::core::Value,
    ///     },
    /// };
    ///
    /// let scores = Value::from(vec![Value::Integer(78), Value::Integer(96)]);
    /// let args = Arguments::positional(vec![scores]);
    ///
    /// assert_eq!(Context::eval_builtin(Builtin::Max, &args, 1).unwrap(), Value::Integer(96));
    /// assert_eq!(Context::eval_builtin(Builtin::Len, &args, 1).unwrap(), Value::Integer(2));
    /// ```
    pub fn eval_builtin(builtin: Builtin, arguments: &Arguments, line: usize) -> EvalResult<Value> {
        let def = BUILTIN_TABLE.iter()
                               .find(|b| b.builtin == builtin)
                               .ok_or_else(|| RuntimeError::InvalidArgument {
                                   details: format!("'{}' is not callable", builtin.name()),
                                   line,
                               })?;
        check_arity(builtin.name(), def.arity, arguments, line)?;
        check_keywords(builtin.name(), def.keywords, arguments, line)?;
        (def.func)(arguments, line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_has_an_entry() {
        for name in ["len", "sum", "max", "min", "sorted", "str", "int", "float", "abs", "round"] {
            let builtin = Builtin::from_name(name).unwrap();
            assert!(BUILTIN_TABLE.iter().any(|b| b.builtin == builtin), "{name}");
        }
    }

    #[test]
    fn wrong_arity_and_unknown_keywords_are_rejected() {
        let args = Arguments::positional(vec![]);
        assert!(matches!(Context::eval_builtin(Builtin::Len, &args, 3),
                         Err(RuntimeError::ArgumentCountMismatch { line: 3, .. })));

        let args = Arguments { positional: vec![Value::from(vec![])],
                               keywords:   vec![("key".to_string(), Value::None)], };
        assert!(matches!(Context::eval_builtin(Builtin::Sorted, &args, 3),
                         Err(RuntimeError::InvalidArgument { .. })));
    }
}
