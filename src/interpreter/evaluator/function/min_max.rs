use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{core::EvalResult, function::core::Arguments},
        value::{core::Value, ordering::extremum},
    },
};

/// Computes the minimum or maximum of an iterable or of several arguments.
///
/// A single argument is treated as an iterable (a list, or a string as its
/// characters). Two or more arguments are compared directly. Among equal
/// candidates the first one wins.
///
/// # Parameters
/// - `want_max`: `true` for `max`, `false` for `min`.
/// - `args`: At least one positional argument.
/// - `line`: Line number for error reporting.
///
/// # Errors
/// - `RuntimeError::EmptySequence` if there is nothing to compare.
/// - `RuntimeError::TypeError` if a single argument is not iterable.
///
/// # Example
/// ```
/// use pysnip::interpreter::{
///     evaluator::function::{core::Arguments, min_max::min_max},
///     value::core::Value,
/// };
///
/// let scores = Value::from(vec![Value::Integer(78), Value::Real(96.5), Value::Integer(12)]);
/// let r = min_max(true, &Arguments::positional(vec![scores.clone()]), 1).unwrap();
/// assert_eq!(r, Value::Real(96.5));
///
/// let r = min_max(false, &Arguments::positional(vec![3.into(), 7.into()]), 1).unwrap();
/// assert_eq!(r, Value::Integer(3));
/// ```
pub fn min_max(want_max: bool, args: &Arguments, line: usize) -> EvalResult<Value> {
    let candidates = match args.positional.as_slice() {
        [single] => single.elements(line)?,
        many => many.to_vec(),
    };

    extremum(&candidates, want_max).cloned()
                                   .ok_or_else(|| RuntimeError::EmptySequence {
                                       operation: if want_max { "max" } else { "min" }.to_string(),
                                       line,
                                   })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_iterable_is_an_error() {
        let empty = Arguments::positional(vec![Value::from(Vec::new())]);
        assert_eq!(min_max(true, &empty, 4),
                   Err(RuntimeError::EmptySequence { operation: "max".to_string(),
                                                     line:      4, }));
    }

    #[test]
    fn strings_compare_as_text() {
        let words = Value::from(vec![Value::from("pear"), Value::from("apple")]);
        let r = min_max(false, &Arguments::positional(vec![words]), 1).unwrap();
        assert_eq!(r, Value::from("apple"));

        let r = min_max(true, &Arguments::positional(vec![Value::from("kiwi")]), 1).unwrap();
        assert_eq!(r, Value::from("w"));
    }
}
