use crate::{
    ast::{CallArgs, Expr, FStringPart},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult, Operation},
            function::core::Arguments,
        },
        value::core::{Number, Value},
    },
    util::num::{clamp_index, resolve_index},
};

impl Context {
    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. The evaluator
    /// dispatches on the expression variant: literals, list literals,
    /// variables, f-strings, negation, binary operations, builtin calls, list
    /// method calls, indexing and slicing.
    ///
    /// Calls whose receiver or first argument is a plain variable are
    /// recorded as touches of that variable.
    ///
    /// # Errors
    /// Returns a `RuntimeError` for unknown variables, type mismatches,
    /// out-of-range indices and failing builtins.
    ///
    /// # Example
    /// ```
    /// use pysnip::{
    ///     ast::Expr,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let mut ctx = Context::new();
    /// let expr = Expr::Literal { value: 10.into(),
    ///                            line:  1, };
    ///
    /// assert_eq!(ctx.eval(&expr).unwrap(), Value::Integer(10));
    /// ```
    pub fn eval(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Value::from(value)),
            Expr::List { elements, .. } => {
                let values = elements.iter()
                                     .map(|e| self.eval(e))
                                     .collect::<EvalResult<Vec<_>>>()?;
                Ok(values.into())
            },
            Expr::Variable { name, line } => self.get_variable(name, *line).cloned(),
            Expr::FString { parts, line } => self.eval_fstring(parts, *line),
            Expr::Negate { expr, line } => {
                let value = self.eval(expr)?;
                Self::eval_negate(&value, *line)
            },
            Expr::BinaryOp { left,
                             op,
                             right,
                             line, } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                Self::eval_binary(*op, &left, &right, *line)
            },
            Expr::Call { builtin,
                         arguments,
                         line, } => {
                if let Some(Expr::Variable { name, .. }) = arguments.positional.first() {
                    self.touch(name, Operation::Call(*builtin), *line);
                }
                let arguments = self.eval_arguments(arguments)?;
                Self::eval_builtin(*builtin, &arguments, *line)
            },
            Expr::MethodCall { target,
                               method,
                               arguments,
                               line, } => self.eval_method_call(target, *method, arguments, *line),
            Expr::Index { target, index, line } => {
                let target = self.eval(target)?;
                let index = self.eval(index)?.as_index(*line)?;
                Self::eval_index(&target, index, *line)
            },
            Expr::Slice { target,
                          start,
                          end,
                          line, } => {
                let target = self.eval(target)?;
                let start = self.eval_bound(start.as_deref(), *line)?;
                let end = self.eval_bound(end.as_deref(), *line)?;
                Self::eval_slice(&target, start, end, *line)
            },
        }
    }

    /// Evaluates the arguments of a call, positional first, then keywords.
    ///
    /// # Errors
    /// Propagates the first failing argument.
    pub fn eval_arguments(&mut self, arguments: &CallArgs) -> EvalResult<Arguments> {
        let positional = arguments.positional
                                  .iter()
                                  .map(|e| self.eval(e))
                                  .collect::<EvalResult<Vec<_>>>()?;
        let keywords = arguments.keywords
                                .iter()
                                .map(|(name, e)| self.eval(e).map(|value| (name.clone(), value)))
                                .collect::<EvalResult<Vec<_>>>()?;
        Ok(Arguments { positional, keywords })
    }

    /// Negates a numeric value.
    ///
    /// # Errors
    /// - `RuntimeError::TypeError` for non-numeric operands.
    /// - `RuntimeError::Overflow` when negating `i64::MIN`.
    pub fn eval_negate(value: &Value, line: usize) -> EvalResult<Value> {
        match value.number() {
            Some(Number::Integer(n)) => {
                n.checked_neg()
                 .map(Value::Integer)
                 .ok_or(RuntimeError::Overflow { line })
            },
            Some(Number::Real(r)) => Ok(Value::Real(-r)),
            None => Err(RuntimeError::TypeError { details: format!("bad operand type for unary -: '{}'",
                                                                   value.type_name()),
                                                  line }),
        }
    }

    /// Reads one element of a list or one character of a string.
    ///
    /// Negative indices count from the end.
    ///
    /// # Errors
    /// - `RuntimeError::IndexOutOfBounds` if the index is out of range.
    /// - `RuntimeError::TypeError` if the target is not subscriptable.
    ///
    /// # Example
    /// ```
    /// use pysnip::interpreter::{evaluator::core::Context, value::core::Value};
    ///
    /// let list = Value::from(vec![Value::Integer(10), Value::Integer(20)]);
    /// assert_eq!(Context::eval_index(&list, -1, 1).unwrap(), Value::Integer(20));
    ///
    /// let word = Value::from("kiwi");
    /// assert_eq!(Context::eval_index(&word, 0, 1).unwrap(), Value::from("k"));
    /// ```
    pub fn eval_index(target: &Value, index: i64, line: usize) -> EvalResult<Value> {
        match target {
            Value::List(items) => {
                let position = resolve_index(index, items.len(), line)?;
                Ok(items[position].clone())
            },
            Value::Str(s) => {
                let chars: Vec<char> = s.chars().collect();
                let position = resolve_index(index, chars.len(), line)?;
                Ok(Value::Str(chars[position].to_string()))
            },
            other => Err(RuntimeError::TypeError { details: format!("'{}' object is not subscriptable",
                                                                    other.type_name()),
                                                   line }),
        }
    }

    /// Takes a `[start:end]` slice of a list or string.
    ///
    /// Missing bounds default to the ends; out-of-range bounds are clamped,
    /// so slicing never fails on a valid target.
    ///
    /// # Errors
    /// Returns `RuntimeError::TypeError` if the target is not subscriptable.
    pub fn eval_slice(target: &Value,
                      start: Option<i64>,
                      end: Option<i64>,
                      line: usize)
                      -> EvalResult<Value> {
        let bounds = |len: usize| {
            let from = start.map_or(0, |i| clamp_index(i, len));
            let to = end.map_or(len, |i| clamp_index(i, len));
            (from, to.max(from))
        };

        match target {
            Value::List(items) => {
                let (from, to) = bounds(items.len());
                Ok(items[from..to].to_vec().into())
            },
            Value::Str(s) => {
                let chars: Vec<char> = s.chars().collect();
                let (from, to) = bounds(chars.len());
                Ok(Value::Str(chars[from..to].iter().collect()))
            },
            other => Err(RuntimeError::TypeError { details: format!("'{}' object is not subscriptable",
                                                                    other.type_name()),
                                                   line }),
        }
    }

    fn eval_bound(&mut self, bound: Option<&Expr>, line: usize) -> EvalResult<Option<i64>> {
        bound.map(|e| self.eval(e).and_then(|value| value.as_index(line)))
             .transpose()
    }

    /// Interpolates the parts of an f-string.
    ///
    /// A placeholder with a precision formats its value as a fixed-point
    /// number with that many decimals, so it must be numeric.
    fn eval_fstring(&mut self, parts: &[FStringPart], line: usize) -> EvalResult<Value> {
        let mut out = String::new();
        for part in parts {
            match part {
                FStringPart::Text(text) => out.push_str(text),
                FStringPart::Placeholder { expr, precision } => {
                    let value = self.eval(expr)?;
                    match precision {
                        Some(digits) => {
                            let digits = *digits;
                            let number = value.as_real(line).map_err(|_| RuntimeError::TypeError {
                                details: format!("unknown format code 'f' for object of type '{}'",
                                                 value.type_name()),
                                line,
                            })?;
                            out.push_str(&format!("{number:.digits$}"));
                        },
                        None => out.push_str(&value.to_string()),
                    }
                },
            }
        }
        Ok(Value::Str(out))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn slices_clamp_and_accept_negative_bounds() {
        let list = Value::from(vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)]);
        assert_eq!(Context::eval_slice(&list, Some(-2), None, 1).unwrap().to_string(), "[2, 3]");
        assert_eq!(Context::eval_slice(&list, Some(2), Some(1), 1).unwrap().to_string(), "[]");
        assert_eq!(Context::eval_slice(&list, None, Some(99), 1).unwrap().to_string(),
                   "[1, 2, 3]");
        assert_eq!(Context::eval_slice(&Value::from("python"), Some(1), Some(3), 1).unwrap(),
                   Value::from("yt"));
    }

    #[test]
    fn indexing_errors() {
        let list = Value::from(vec![Value::Integer(1)]);
        assert!(matches!(Context::eval_index(&list, 1, 4),
                         Err(RuntimeError::IndexOutOfBounds { index: 1, len: 1, line: 4 })));
        assert!(matches!(Context::eval_index(&Value::Integer(5), 0, 4),
                         Err(RuntimeError::TypeError { .. })));
    }

    #[test]
    fn negation() {
        assert_eq!(Context::eval_negate(&Value::Real(2.5), 1).unwrap(), Value::Real(-2.5));
        assert!(Context::eval_negate(&Value::Integer(i64::MIN), 1).is_err());
        assert!(Context::eval_negate(&Value::from("a"), 1).is_err());
    }
}
