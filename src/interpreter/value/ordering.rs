use std::cmp::Ordering;

use ordered_float::OrderedFloat;

use crate::interpreter::value::core::{Number, Value};

/// How the elements of one sequence are compared.
///
/// The mode is picked once per sequence from its first element, so a list
/// that starts with a number sorts numerically even if it also holds text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Numeric,
    Text,
}

impl Mode {
    fn of(values: &[Value]) -> Self {
        match values.first() {
            Some(first) if first.is_numeric() => Self::Numeric,
            _ => Self::Text,
        }
    }

    fn compare(self, a: &Value, b: &Value) -> Ordering {
        match self {
            Self::Text => a.to_string().cmp(&b.to_string()),
            Self::Numeric => match (a.number(), b.number()) {
                (Some(x), Some(y)) => compare_numbers(x, y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => a.to_string().cmp(&b.to_string()),
            },
        }
    }
}

fn compare_numbers(a: Number, b: Number) -> Ordering {
    match (a, b) {
        (Number::Integer(x), Number::Integer(y)) => x.cmp(&y),
        _ => OrderedFloat(a.to_f64()).cmp(&OrderedFloat(b.to_f64())),
    }
}

/// Sorts `values` in place.
///
/// The sort is stable. With `reverse`, the sorted result is reversed.
///
/// # Example
/// ```
/// use pysnip::interpreter::value::{core::Value, ordering::sort_values};
///
/// let mut values = vec![Value::Integer(10), Value::Real(2.5), Value::Integer(-1)];
/// sort_values(&mut values, false);
/// assert_eq!(values, vec![Value::Integer(-1), Value::Real(2.5), Value::Integer(10)]);
///
/// let mut words = vec![Value::from("pear"), Value::from("apple")];
/// sort_values(&mut words, true);
/// assert_eq!(words, vec![Value::from("pear"), Value::from("apple")]);
/// ```
pub fn sort_values(values: &mut [Value], reverse: bool) {
    let mode = Mode::of(values);
    values.sort_by(|a, b| mode.compare(a, b));
    if reverse {
        values.reverse();
    }
}

/// Finds the largest (`want_max`) or smallest element, using the same
/// comparison as [`sort_values`].
///
/// Among equal candidates the first one wins. Returns `None` for an empty
/// slice.
///
/// # Example
/// ```
/// use pysnip::interpreter::value::{core::Value, ordering::extremum};
///
/// let scores = [Value::Integer(78), Value::Integer(96), Value::Integer(85)];
/// assert_eq!(extremum(&scores, true), Some(&Value::Integer(96)));
/// assert_eq!(extremum(&scores, false), Some(&Value::Integer(78)));
/// assert_eq!(extremum(&[], true), None);
/// ```
#[must_use]
pub fn extremum(values: &[Value], want_max: bool) -> Option<&Value> {
    let mode = Mode::of(values);
    let wanted = if want_max { Ordering::Greater } else { Ordering::Less };

    let mut best = values.first()?;
    for candidate in &values[1..] {
        if mode.compare(candidate, best) == wanted {
            best = candidate;
        }
    }
    Some(best)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn numbers_sort_before_text_when_list_starts_numeric() {
        let mut values = vec![Value::from("b"), Value::Integer(2), Value::Real(1.5)];
        sort_values(&mut values[1..], false);
        assert_eq!(values[1..].to_vec(), vec![Value::Real(1.5), Value::Integer(2)]);

        let mut mixed = vec![Value::Integer(3), Value::from("a"), Value::Integer(1)];
        sort_values(&mut mixed, false);
        assert_eq!(mixed, vec![Value::Integer(1), Value::Integer(3), Value::from("a")]);
    }

    #[test]
    fn text_mode_compares_printed_form() {
        let mut values = vec![Value::from("b"), Value::Integer(10), Value::Integer(9)];
        sort_values(&mut values, false);
        assert_eq!(values, vec![Value::Integer(10), Value::Integer(9), Value::from("b")]);
    }

    #[test]
    fn large_integers_compare_exactly() {
        let mut values = vec![Value::Integer(i64::MAX), Value::Integer(i64::MAX - 1)];
        sort_values(&mut values, false);
        assert_eq!(values[0], Value::Integer(i64::MAX - 1));
    }

    #[test]
    fn extremum_of_words() {
        let words = [Value::from("kiwi"), Value::from("apple"), Value::from("pear")];
        assert_eq!(extremum(&words, true), Some(&Value::from("pear")));
        assert_eq!(extremum(&words, false), Some(&Value::from("apple")));
    }
}
