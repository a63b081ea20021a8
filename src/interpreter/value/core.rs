use std::rc::Rc;

use crate::{
    ast::LiteralValue,
    error::RuntimeError,
    interpreter::evaluator::core::EvalResult,
    util::num::i64_to_f64_lossy,
};

/// Represents a runtime value in the interpreter.
///
/// This enum models all the values a snippet can bind to a variable, print,
/// or store in a list.
#[derive(Debug, Clone)]
pub enum Value {
    /// An integer value (64 bit integer).
    Integer(i64),
    /// A floating-point value, produced by float literals and `/`.
    Real(f64),
    /// A text value.
    Str(String),
    /// A boolean value, `True` or `False`.
    Bool(bool),
    /// The result of calls that return nothing, such as `list.append`.
    None,
    /// A list of `Value` elements.
    ///
    /// The elements are shared until one side changes them, so binding a list
    /// to a second name copies it lazily.
    List(Rc<Vec<Self>>),
}

/// A numeric view of a value. Booleans count as `0` and `1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// An exact integer.
    Integer(i64),
    /// A float.
    Real(f64),
}

impl Number {
    /// Converts the number to the nearest `f64`.
    #[must_use]
    pub const fn to_f64(self) -> f64 {
        match self {
            Self::Integer(n) => i64_to_f64_lossy(n),
            Self::Real(r) => r,
        }
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        match n {
            Number::Integer(i) => Self::Integer(i),
            Number::Real(r) => Self::Real(r),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::List(Rc::new(v))
    }
}

impl From<&LiteralValue> for Value {
    fn from(lit: &LiteralValue) -> Self {
        match lit {
            LiteralValue::Real(n) => (*n).into(),
            LiteralValue::Integer(i) => (*i).into(),
            LiteralValue::Bool(b) => (*b).into(),
            LiteralValue::Str(s) => s.as_str().into(),
            LiteralValue::None => Self::None,
        }
    }
}

impl Value {
    /// The Python name of the value's type, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "int",
            Self::Real(_) => "float",
            Self::Str(_) => "str",
            Self::Bool(_) => "bool",
            Self::None => "NoneType",
            Self::List(_) => "list",
        }
    }

    /// Returns the numeric view of the value, if it has one.
    ///
    /// # Example
    /// ```
    /// use pysnip::interpreter::value::core::{Number, Value};
    ///
    /// assert_eq!(Value::Bool(true).number(), Some(Number::Integer(1)));
    /// assert_eq!(Value::from("7").number(), None);
    /// ```
    #[must_use]
    pub const fn number(&self) -> Option<Number> {
        match self {
            Self::Integer(n) => Some(Number::Integer(*n)),
            Self::Real(r) => Some(Number::Real(*r)),
            Self::Bool(b) => Some(Number::Integer(*b as i64)),
            _ => None,
        }
    }

    /// Returns `true` if the value has a numeric view.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        self.number().is_some()
    }

    /// Converts the value to an `f64`, or returns an error if not numeric.
    ///
    /// # Errors
    /// Returns `RuntimeError::ExpectedNumber` if the value is not numeric.
    pub fn as_real(&self, line: usize) -> EvalResult<f64> {
        self.number()
            .map(Number::to_f64)
            .ok_or(RuntimeError::ExpectedNumber { line })
    }

    /// Converts the value to an index, or returns an error if it is not an
    /// integer.
    ///
    /// # Errors
    /// Returns `RuntimeError::TypeError` for floats, strings and lists.
    pub fn as_index(&self, line: usize) -> EvalResult<i64> {
        match self.number() {
            Some(Number::Integer(n)) => Ok(n),
            _ => {
                Err(RuntimeError::TypeError { details: format!("indices must be integers, not {}",
                                                               self.type_name()),
                                              line })
            },
        }
    }

    /// Collects the elements of an iterable value.
    ///
    /// Lists yield their elements and strings yield one-character strings,
    /// as iterating them in Python would.
    ///
    /// # Errors
    /// Returns `RuntimeError::TypeError` for values that are not iterable.
    pub fn elements(&self, line: usize) -> EvalResult<Vec<Self>> {
        match self {
            Self::List(items) => Ok(items.to_vec()),
            Self::Str(s) => Ok(s.chars().map(|c| Self::Str(c.to_string())).collect()),
            other => {
                Err(RuntimeError::TypeError { details: format!("'{}' object is not iterable",
                                                               other.type_name()),
                                              line })
            },
        }
    }

    /// Renders the value the way Python's `repr` does.
    ///
    /// Only strings differ from [`Display`](std::fmt::Display): they are
    /// quoted, with escapes for quotes, backslashes and control characters.
    ///
    /// # Example
    /// ```
    /// use pysnip::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::from("kiwi").repr(), "'kiwi'");
    /// assert_eq!(Value::from("it's").repr(), "\"it's\"");
    /// assert_eq!(Value::from(vec![Value::from("a"), Value::Integer(1)]).repr(), "['a', 1]");
    /// ```
    #[must_use]
    pub fn repr(&self) -> String {
        match self {
            Self::Str(s) => quote(s),
            other => other.to_string(),
        }
    }
}

/// Quotes a string like Python's `repr`.
fn quote(text: &str) -> String {
    let delimiter = if text.contains('\'') && !text.contains('"') { '"' } else { '\'' };
    let mut out = String::with_capacity(text.len() + 2);
    out.push(delimiter);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c == delimiter => {
                out.push('\\');
                out.push(c);
            },
            c => out.push(c),
        }
    }
    out.push(delimiter);
    out
}

/// Formats a float the way Python prints it.
///
/// Integral values keep a trailing `.0`, and very large or very small
/// magnitudes switch to exponent notation with a signed, two-digit exponent.
///
/// # Example
/// ```
/// use pysnip::interpreter::value::core::format_real;
///
/// assert_eq!(format_real(2.0), "2.0");
/// assert_eq!(format_real(0.1), "0.1");
/// assert_eq!(format_real(1e16), "1e+16");
/// assert_eq!(format_real(1.5e-7), "1.5e-07");
/// assert_eq!(format_real(f64::INFINITY), "inf");
/// ```
#[must_use]
pub fn format_real(r: f64) -> String {
    if r.is_nan() {
        return "nan".to_string();
    }
    if r.is_infinite() {
        let text = if r > 0.0 { "inf" } else { "-inf" };
        return text.to_string();
    }
    if r == 0.0 {
        let text = if r.is_sign_negative() { "-0.0" } else { "0.0" };
        return text.to_string();
    }

    let scientific = format!("{r:e}");
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if !(-4..16).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs());
    }

    let plain = r.to_string();
    if plain.contains('.') { plain } else { format!("{plain}.0") }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) => write!(f, "{}", format_real(*r)),
            Self::Str(s) => write!(f, "{s}"),
            Self::Bool(true) => write!(f, "True"),
            Self::Bool(false) => write!(f, "False"),
            Self::None => write!(f, "None"),
            Self::List(items) => {
                write!(f, "[")?;

                for (index, value) in items.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }

                    write!(f, "{}", value.repr())?;
                }

                write!(f, "]")
            },
        }
    }
}

/// Equality by value, as Python's `==`: numbers compare across `int`,
/// `float` and `bool`, lists compare element-wise.
impl PartialEq for Value {
    #[allow(clippy::cast_precision_loss)]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::None, Self::None) => true,
            (Self::List(a), Self::List(b)) => a == b,
            _ => match (self.number(), other.number()) {
                (Some(Number::Integer(a)), Some(Number::Integer(b))) => a == b,
                (Some(Number::Real(a)), Some(Number::Real(b))) => a == b,
                (Some(Number::Integer(a)), Some(Number::Real(b)))
                | (Some(Number::Real(b)), Some(Number::Integer(a))) => a as f64 == b,
                _ => false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn lists_print_with_repr_elements() {
        let list = Value::from(vec![Value::from("apple"),
                                    Value::Integer(3),
                                    Value::Real(2.5),
                                    Value::Bool(false),
                                    Value::None,
                                    Value::from(Vec::new())]);
        assert_eq!(list.to_string(), "['apple', 3, 2.5, False, None, []]");
    }

    #[test]
    fn reals_print_like_python() {
        assert_eq!(Value::Real(2.0).to_string(), "2.0");
        assert_eq!(Value::Real(-0.5).to_string(), "-0.5");
        assert_eq!(Value::Real(1e15).to_string(), "1000000000000000.0");
        assert_eq!(Value::Real(0.0001).to_string(), "0.0001");
        assert_eq!(Value::Real(0.00001).to_string(), "1e-05");
    }

    #[test]
    fn numeric_equality_crosses_types() {
        assert_eq!(Value::Integer(1), Value::Real(1.0));
        assert_eq!(Value::Bool(true), Value::Integer(1));
        assert_ne!(Value::Integer(1), Value::from("1"));
        assert_eq!(Value::from(vec![Value::Integer(2)]), Value::from(vec![Value::Real(2.0)]));
    }

    #[test]
    fn strings_iterate_as_characters() {
        assert_eq!(Value::from("ab").elements(1).unwrap(),
                   vec![Value::from("a"), Value::from("b")]);
        assert!(Value::Integer(3).elements(1).is_err());
    }

    #[test]
    fn repr_escapes_quotes_and_newlines() {
        assert_eq!(Value::from("a'b\"c").repr(), r#"'a\'b"c'"#);
        assert_eq!(Value::from("x\ny").repr(), r"'x\ny'");
    }
}
