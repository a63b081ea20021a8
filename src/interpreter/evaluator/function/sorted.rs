use crate::interpreter::{
    evaluator::{core::EvalResult, function::core::Arguments, utils::reverse_flag},
    value::{core::Value, ordering::sort_values},
};

/// Returns a new sorted list built from an iterable.
///
/// The argument itself is left untouched. `reverse=True` flips the order
/// after a stable sort.
///
/// # Errors
/// - `RuntimeError::TypeError` if the argument is not iterable or `reverse`
///   is not a boolean.
///
/// # Example
/// ```
/// use pysnip::interpreter::{
///     evaluator::function::{core::Arguments, sorted::sorted},
///     value::core::Value,
/// };
///
/// let scores = Value::from(vec![Value::Integer(3), Value::Integer(1), Value::Integer(2)]);
/// let r = sorted(&Arguments::positional(vec![scores]), 1).unwrap();
/// assert_eq!(r.to_string(), "[1, 2, 3]");
/// ```
pub fn sorted(args: &Arguments, line: usize) -> EvalResult<Value> {
    let mut items = args.positional[0].elements(line)?;
    let reverse = reverse_flag(args, line)?;
    sort_values(&mut items, reverse);
    Ok(items.into())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn reverse_keyword() {
        let args = Arguments { positional: vec![Value::from("bca")],
                               keywords:   vec![("reverse".to_string(), Value::Bool(true))], };
        assert_eq!(sorted(&args, 1).unwrap().to_string(), "['c', 'b', 'a']");
    }

    #[test]
    fn non_iterable_is_a_type_error() {
        let args = Arguments::positional(vec![Value::Integer(5)]);
        assert!(sorted(&args, 1).is_err());
    }
}
