use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            function::core::Arguments,
        },
        value::core::{Number, Value},
    },
    util::num::{f64_to_i64_truncating, usize_to_i64_checked},
};

/// Returns the number of elements of a list or characters of a string.
///
/// # Example
/// ```
/// use pysnip::interpreter::{
///     evaluator::function::{builtin::len, core::Arguments},
///     value::core::Value,
/// };
///
/// let r = len(&Arguments::positional(vec![Value::from("kiwi")]), 1).unwrap();
/// assert_eq!(r, Value::Integer(4));
/// ```
pub fn len(args: &Arguments, line: usize) -> EvalResult<Value> {
    let count = match &args.positional[0] {
        Value::List(items) => items.len(),
        Value::Str(s) => s.chars().count(),
        other => {
            return Err(RuntimeError::TypeError { details: format!("object of type '{}' has no len()",
                                                                  other.type_name()),
                                                 line });
        },
    };
    Ok(Value::Integer(usize_to_i64_checked(count, line)?))
}

/// Adds up the elements of an iterable, starting from `start` (default `0`).
///
/// Integers stay integers; a single float makes the result a float. An
/// empty list sums to the start value.
///
/// # Example
/// ```
/// use pysnip::interpreter::{
///     evaluator::function::{builtin::sum, core::Arguments},
///     value::core::Value,
/// };
///
/// let scores = Value::from(vec![Value::Integer(85), Value::Integer(92)]);
/// assert_eq!(sum(&Arguments::positional(vec![scores]), 1).unwrap(), Value::Integer(177));
///
/// let empty = Value::from(Vec::new());
/// assert_eq!(sum(&Arguments::positional(vec![empty]), 1).unwrap(), Value::Integer(0));
/// ```
pub fn sum(args: &Arguments, line: usize) -> EvalResult<Value> {
    let start = args.positional
                    .get(1)
                    .or_else(|| args.keyword("start"))
                    .cloned()
                    .unwrap_or(Value::Integer(0));

    let mut total = start.number().ok_or_else(|| unsupported_sum(&start, line))?;
    for element in args.positional[0].elements(line)? {
        let number = element.number()
                            .ok_or_else(|| unsupported_sum(&element, line))?;
        total = match Context::eval_numeric_op(BinaryOperator::Add, total, number, line)? {
            Value::Integer(n) => Number::Integer(n),
            Value::Real(r) => Number::Real(r),
            other => return Err(unsupported_sum(&other, line)),
        };
    }
    Ok(total.into())
}

fn unsupported_sum(value: &Value, line: usize) -> RuntimeError {
    RuntimeError::TypeError { details: format!("unsupported operand type(s) for +: 'int' and '{}'",
                                               value.type_name()),
                              line }
}

/// Converts a value to its printed text. With no argument, returns `""`.
#[allow(clippy::unnecessary_wraps)]
pub fn str(args: &Arguments, _line: usize) -> EvalResult<Value> {
    Ok(Value::Str(args.positional
                      .first()
                      .map(ToString::to_string)
                      .unwrap_or_default()))
}

/// Converts a value to an integer. With no argument, returns `0`.
///
/// Floats are truncated toward zero and strings must spell an integer,
/// surrounding whitespace allowed.
///
/// # Example
/// ```
/// use pysnip::interpreter::{
///     evaluator::function::{builtin::int, core::Arguments},
///     value::core::Value,
/// };
///
/// assert_eq!(int(&Arguments::positional(vec![Value::Real(-2.7)]), 1).unwrap(), Value::Integer(-2));
/// assert_eq!(int(&Arguments::positional(vec![Value::from(" 42 ")]), 1).unwrap(), Value::Integer(42));
/// assert!(int(&Arguments::positional(vec![Value::from("4.2")]), 1).is_err());
/// ```
pub fn int(args: &Arguments, line: usize) -> EvalResult<Value> {
    let Some(value) = args.positional.first() else {
        return Ok(Value::Integer(0));
    };
    match value {
        Value::Str(s) => s.trim().parse().map(Value::Integer).map_err(|_| {
            RuntimeError::InvalidArgument { details: format!("invalid literal for int() with base 10: {}",
                                                             value.repr()),
                                            line }
        }),
        _ => match value.number() {
            Some(Number::Integer(n)) => Ok(Value::Integer(n)),
            Some(Number::Real(r)) => Ok(Value::Integer(f64_to_i64_truncating(r, line)?)),
            None => Err(RuntimeError::TypeError { details: format!("int() argument must be a string or a number, not '{}'",
                                                                   value.type_name()),
                                                  line }),
        },
    }
}

/// Converts a value to a float. With no argument, returns `0.0`.
pub fn float(args: &Arguments, line: usize) -> EvalResult<Value> {
    let Some(value) = args.positional.first() else {
        return Ok(Value::Real(0.0));
    };
    match value {
        Value::Str(s) => s.trim().parse().map(Value::Real).map_err(|_| {
            RuntimeError::InvalidArgument { details: format!("could not convert string to float: {}",
                                                             value.repr()),
                                            line }
        }),
        _ => match value.number() {
            Some(number) => Ok(Value::Real(number.to_f64())),
            None => Err(RuntimeError::TypeError { details: format!("float() argument must be a string or a number, not '{}'",
                                                                   value.type_name()),
                                                  line }),
        },
    }
}

/// Returns the absolute value of a number.
pub fn abs(args: &Arguments, line: usize) -> EvalResult<Value> {
    match args.positional[0].number() {
        Some(Number::Integer(n)) => {
            n.checked_abs()
             .map(Value::Integer)
             .ok_or(RuntimeError::Overflow { line })
        },
        Some(Number::Real(r)) => Ok(Value::Real(r.abs())),
        None => Err(RuntimeError::TypeError { details: format!("bad operand type for abs(): '{}'",
                                                               args.positional[0].type_name()),
                                              line }),
    }
}

/// Rounds a number, halves going to the even neighbour.
///
/// Without `ndigits` the result is an integer. With `ndigits` a float stays a
/// float rounded to that many decimals, and an integer stays an integer,
/// rounded to tens, hundreds and so on when `ndigits` is negative.
///
/// # Example
/// ```
/// use pysnip::interpreter::{
///     evaluator::function::{builtin::round, core::Arguments},
///     value::core::Value,
/// };
///
/// let r = round(&Arguments::positional(vec![Value::Real(2.5)]), 1).unwrap();
/// assert_eq!(r, Value::Integer(2));
///
/// let r = round(&Arguments::positional(vec![Value::Real(3.14159), Value::Integer(2)]), 1);
/// assert_eq!(r.unwrap(), Value::Real(3.14));
/// ```
pub fn round(args: &Arguments, line: usize) -> EvalResult<Value> {
    let number = args.positional[0].number().ok_or_else(|| RuntimeError::TypeError {
                                                 details: format!("type {} doesn't define __round__ method",
                                                                  args.positional[0].type_name()),
                                                 line,
                                             })?;
    let digits = match args.positional.get(1).or_else(|| args.keyword("ndigits")) {
        None | Some(Value::None) => None,
        Some(value) => Some(value.as_index(line)?),
    };

    match (number, digits) {
        (Number::Integer(n), Some(digits)) if digits < 0 => round_integer(n, digits, line),
        (Number::Integer(n), _) => Ok(Value::Integer(n)),
        (Number::Real(r), None) => Ok(Value::Integer(f64_to_i64_truncating(r.round_ties_even(),
                                                                           line)?)),
        (Number::Real(r), Some(digits)) => {
            let digits = i32::try_from(digits.clamp(-308, 308)).unwrap_or(0);
            let scale = 10f64.powi(digits);
            Ok(Value::Real((r * scale).round_ties_even() / scale))
        },
    }
}

/// Rounds `n` to a multiple of `10^-digits`, halves going to the even
/// multiple.
fn round_integer(n: i64, digits: i64, line: usize) -> EvalResult<Value> {
    // Past 10^20 every i64 rounds to zero.
    let Some(step) = u32::try_from(digits.unsigned_abs()).ok()
                                                         .filter(|&exp| exp <= 20)
                                                         .map(|exp| 10i128.pow(exp))
    else {
        return Ok(Value::Integer(0));
    };
    let n = i128::from(n);
    let quotient = n.div_euclid(step);
    let remainder = n.rem_euclid(step);
    let quotient = if remainder * 2 > step || (remainder * 2 == step && quotient % 2 != 0) {
        quotient + 1
    } else {
        quotient
    };
    i64::try_from(quotient * step).map(Value::Integer)
                                  .map_err(|_| RuntimeError::Overflow { line })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn one(value: Value) -> Arguments {
        Arguments::positional(vec![value])
    }

    #[test]
    fn sum_promotes_to_float_and_rejects_text() {
        let mixed = Value::from(vec![Value::Integer(1), Value::Real(0.5)]);
        assert_eq!(sum(&one(mixed), 1).unwrap(), Value::Real(1.5));

        let words = Value::from(vec![Value::from("a")]);
        assert!(matches!(sum(&one(words), 1), Err(RuntimeError::TypeError { .. })));
    }

    #[test]
    fn sum_with_start() {
        let args = Arguments::positional(vec![Value::from(vec![Value::Integer(1)]),
                                              Value::Integer(10)]);
        assert_eq!(sum(&args, 1).unwrap(), Value::Integer(11));
    }

    #[test]
    fn len_of_non_sequence_is_an_error() {
        assert!(matches!(len(&one(Value::Integer(3)), 2),
                         Err(RuntimeError::TypeError { line: 2, .. })));
    }

    #[test]
    fn conversions() {
        assert_eq!(str(&one(Value::Real(2.0)), 1).unwrap(), Value::from("2.0"));
        assert_eq!(float(&one(Value::from("2.5")), 1).unwrap(), Value::Real(2.5));
        assert_eq!(abs(&one(Value::Integer(-4)), 1).unwrap(), Value::Integer(4));
        assert_eq!(str(&Arguments::default(), 1).unwrap(), Value::from(""));
    }

    #[test]
    fn round_ties_to_even() {
        assert_eq!(round(&one(Value::Real(3.5)), 1).unwrap(), Value::Integer(4));
        assert_eq!(round(&one(Value::Real(-0.5)), 1).unwrap(), Value::Integer(0));
    }

    #[test]
    fn round_integers_to_tens_and_hundreds() {
        let round_to = |n: i64, digits: i64| {
            let args = Arguments::positional(vec![Value::Integer(n), Value::Integer(digits)]);
            round(&args, 1).unwrap()
        };
        assert_eq!(round_to(1234, -2), Value::Integer(1200));
        assert_eq!(round_to(1250, -2), Value::Integer(1200));
        assert_eq!(round_to(1350, -2), Value::Integer(1400));
        assert_eq!(round_to(-1260, -1), Value::Integer(-1260));
        assert_eq!(round_to(-1265, -1), Value::Integer(-1260));
        assert_eq!(round_to(1234, 2), Value::Integer(1234));
        assert_eq!(round_to(1234, -40), Value::Integer(0));
    }
}
