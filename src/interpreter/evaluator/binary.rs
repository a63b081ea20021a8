use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::{Number, Value},
    },
    util::num::usize_to_i64_checked,
};

/// Largest number of elements (or characters) a repetition may produce.
pub const MAX_REPEAT_LEN: usize = 1_000_000;

impl Context {
    /// Evaluates a binary operation between two values.
    ///
    /// This function routes the operation by operand types:
    /// - two numbers use checked integer or float arithmetic,
    /// - `+` concatenates two lists or two strings, and joins a string with
    ///   the printed form of a number or boolean on either side,
    /// - `*` repeats a string or list by an integer count.
    ///
    /// Anything else is a type error.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    ///
    /// # Example
    /// ```
    /// use pysnip::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let sum = Context::eval_binary(BinaryOperator::Add, &3.into(), &4.into(), 1);
    /// assert_eq!(sum.unwrap(), Value::Integer(7));
    ///
    /// let text = Context::eval_binary(BinaryOperator::Add, &"Score: ".into(), &96.into(), 1);
    /// assert_eq!(text.unwrap(), Value::from("Score: 96"));
    ///
    /// let ratio = Context::eval_binary(BinaryOperator::Div, &5.into(), &2.into(), 1);
    /// assert_eq!(ratio.unwrap(), Value::Real(2.5));
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       line: usize)
                       -> EvalResult<Value> {
        use BinaryOperator::{Add, Mul};
        use Value::{List, Str};

        if let (Some(a), Some(b)) = (left.number(), right.number()) {
            return Self::eval_numeric_op(op, a, b, line);
        }

        match (op, left, right) {
            (Add, List(a), List(b)) => {
                let mut joined = Vec::with_capacity(a.len() + b.len());
                joined.extend(a.iter().cloned());
                joined.extend(b.iter().cloned());
                Ok(joined.into())
            },
            (Add, Str(a), Str(b)) => Ok(Str(format!("{a}{b}"))),
            (Add, Str(a), other) if other.is_numeric() => Ok(Str(format!("{a}{other}"))),
            (Add, other, Str(b)) if other.is_numeric() => Ok(Str(format!("{other}{b}"))),
            (Mul, Str(s), count) | (Mul, count, Str(s)) if count.number().is_some() => {
                let count = repeat_count(count, s.chars().count(), line)?;
                Ok(Str(s.repeat(count)))
            },
            (Mul, List(items), count) | (Mul, count, List(items)) if count.number().is_some() => {
                let count = repeat_count(count, items.len(), line)?;
                let repeated: Vec<Value> = items.iter()
                                                .cycle()
                                                .take(items.len() * count)
                                                .cloned()
                                                .collect();
                Ok(repeated.into())
            },
            _ => Err(RuntimeError::TypeError { details: format!("unsupported operand type(s) for {op}: '{}' and '{}'",
                                                                left.type_name(),
                                                                right.type_name()),
                                               line }),
        }
    }

    /// Evaluates an arithmetic operation on two numbers.
    ///
    /// Two integers stay integers except under `/`, which always yields a
    /// float. Integer overflow is an error rather than a wrap. `//` and `%`
    /// round toward negative infinity, so the remainder takes the sign of the
    /// divisor.
    ///
    /// # Errors
    /// - `RuntimeError::DivisionByZero` for a zero divisor.
    /// - `RuntimeError::Overflow` if an integer result does not fit.
    ///
    /// # Example
    /// ```
    /// use pysnip::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::{Number, Value}},
    /// };
    ///
    /// let r = Context::eval_numeric_op(BinaryOperator::Mod,
    ///                                  Number::Integer(-7),
    ///                                  Number::Integer(3),
    ///                                  1);
    /// assert_eq!(r.unwrap(), Value::Integer(2));
    ///
    /// let r = Context::eval_numeric_op(BinaryOperator::FloorDiv,
    ///                                  Number::Integer(-7),
    ///                                  Number::Integer(2),
    ///                                  1);
    /// assert_eq!(r.unwrap(), Value::Integer(-4));
    /// ```
    pub fn eval_numeric_op(op: BinaryOperator,
                           left: Number,
                           right: Number,
                           line: usize)
                           -> EvalResult<Value> {
        use BinaryOperator::{Add, Div, FloorDiv, Mod, Mul, Sub};

        if let (Number::Integer(a), Number::Integer(b)) = (left, right) {
            let overflow = RuntimeError::Overflow { line };
            let result = match op {
                Add => Some(a.checked_add(b).ok_or(overflow)?),
                Sub => Some(a.checked_sub(b).ok_or(overflow)?),
                Mul => Some(a.checked_mul(b).ok_or(overflow)?),
                FloorDiv => Some(floor_div(a, b, line)?),
                Mod => Some(floor_mod(a, b, line)?),
                Div => None,
            };
            if let Some(result) = result {
                return Ok(Value::Integer(result));
            }
        }

        let a = left.to_f64();
        let b = right.to_f64();
        if matches!(op, Div | FloorDiv | Mod) && b == 0.0 {
            return Err(RuntimeError::DivisionByZero { line });
        }

        Ok(Value::Real(match op {
                           Add => a + b,
                           Sub => a - b,
                           Mul => a * b,
                           Div => a / b,
                           FloorDiv => (a / b).floor(),
                           Mod => {
                               let r = a % b;
                               if r != 0.0 && (r < 0.0) != (b < 0.0) { r + b } else { r }
                           },
                       }))
    }
}

fn floor_div(a: i64, b: i64, line: usize) -> EvalResult<i64> {
    if b == 0 {
        return Err(RuntimeError::DivisionByZero { line });
    }
    let quotient = a.checked_div(b).ok_or(RuntimeError::Overflow { line })?;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        Ok(quotient - 1)
    } else {
        Ok(quotient)
    }
}

fn floor_mod(a: i64, b: i64, line: usize) -> EvalResult<i64> {
    if b == 0 {
        return Err(RuntimeError::DivisionByZero { line });
    }
    let r = a.checked_rem(b).ok_or(RuntimeError::Overflow { line })?;
    if r != 0 && ((r < 0) != (b < 0)) { Ok(r + b) } else { Ok(r) }
}

/// Reads a repetition count; negative counts repeat zero times.
///
/// An empty unit repeats zero times whatever the count.
fn repeat_count(count: &Value, unit_len: usize, line: usize) -> EvalResult<usize> {
    let count = match count.number() {
        Some(Number::Integer(n)) => n,
        _ => {
            return Err(RuntimeError::TypeError { details: format!("can't multiply sequence by non-int of type '{}'",
                                                                  count.type_name()),
                                                 line });
        },
    };
    if unit_len == 0 {
        return Ok(0);
    }
    let count = usize::try_from(count.max(0)).map_err(|_| RuntimeError::Overflow { line })?;
    let total = count.checked_mul(unit_len)
                     .ok_or(RuntimeError::Overflow { line })?;
    if total > MAX_REPEAT_LEN {
        return Err(RuntimeError::InvalidArgument { details: format!("repetition of {} elements is too large",
                                                                    usize_to_i64_checked(total, line)?),
                                                   line });
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn list(values: &[i64]) -> Value {
        values.iter().copied().map(Value::Integer).collect::<Vec<_>>().into()
    }

    #[test]
    fn list_concatenation_and_repetition() {
        let joined = Context::eval_binary(BinaryOperator::Add, &list(&[1, 2]), &list(&[3]), 1);
        assert_eq!(joined.unwrap(), list(&[1, 2, 3]));

        let repeated = Context::eval_binary(BinaryOperator::Mul, &list(&[0]), &3.into(), 1);
        assert_eq!(repeated.unwrap(), list(&[0, 0, 0]));
    }

    #[test]
    fn number_on_the_left_of_a_string_is_joined_too() {
        let r = Context::eval_binary(BinaryOperator::Add, &2.5.into(), &" points".into(), 1);
        assert_eq!(r.unwrap(), Value::from("2.5 points"));
    }

    #[test]
    fn incompatible_operands_are_type_errors() {
        let r = Context::eval_binary(BinaryOperator::Add, &list(&[1]), &1.into(), 7);
        assert!(matches!(r, Err(RuntimeError::TypeError { line: 7, .. })));
        let r = Context::eval_binary(BinaryOperator::Sub, &"a".into(), &"b".into(), 7);
        assert!(matches!(r, Err(RuntimeError::TypeError { .. })));
    }

    #[test]
    fn zero_divisors_and_overflow() {
        for op in [BinaryOperator::Div, BinaryOperator::FloorDiv, BinaryOperator::Mod] {
            let r = Context::eval_binary(op, &1.into(), &0.into(), 2);
            assert_eq!(r, Err(RuntimeError::DivisionByZero { line: 2 }));
        }
        let r = Context::eval_binary(BinaryOperator::Mul, &i64::MAX.into(), &2.into(), 3);
        assert_eq!(r, Err(RuntimeError::Overflow { line: 3 }));
    }

    #[test]
    fn empty_sequences_repeat_instantly() {
        let r = Context::eval_binary(BinaryOperator::Mul, &list(&[]), &i64::MAX.into(), 1);
        assert_eq!(r.unwrap(), list(&[]));

        let r = Context::eval_binary(BinaryOperator::Mul, &i64::MAX.into(), &"".into(), 1);
        assert_eq!(r.unwrap(), Value::from(""));
    }

    #[test]
    fn true_division_of_large_integers_rounds() {
        let r = Context::eval_binary(BinaryOperator::Div,
                                     &Value::Integer(9_007_199_254_740_993),
                                     &1.into(),
                                     1);
        assert_eq!(r.unwrap(), Value::Real(9_007_199_254_740_992.0));
    }

    #[test]
    fn huge_repetition_is_refused() {
        let r = Context::eval_binary(BinaryOperator::Mul, &"ab".into(), &1_000_000.into(), 1);
        assert!(matches!(r, Err(RuntimeError::InvalidArgument { .. })));
    }
}
