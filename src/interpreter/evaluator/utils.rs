use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::EvalResult,
            function::core::{Arguments, Arity},
        },
        value::core::Value,
    },
};

/// Verifies the positional argument count of a call.
///
/// # Errors
/// Returns `RuntimeError::ArgumentCountMismatch` naming the callee.
pub fn check_arity(name: &str,
                   arity: Arity,
                   arguments: &Arguments,
                   line: usize)
                   -> EvalResult<()> {
    if arity.check(arguments.positional.len()) {
        Ok(())
    } else {
        Err(RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                                  line })
    }
}

/// Verifies that every keyword argument of a call is one the callee accepts.
///
/// # Errors
/// Returns `RuntimeError::InvalidArgument` for the first unexpected keyword.
///
/// # Example
/// ```
/// use pysnip::interpreter::{
///     evaluator::{function::core::Arguments, utils::check_keywords},
///     value::core::Value,
/// };
///
/// let args = Arguments { positional: vec![],
///                        keywords:   vec![("reverse".to_string(), Value::Bool(true))], };
/// assert!(check_keywords("sorted", &["reverse"], &args, 1).is_ok());
/// assert!(check_keywords("len", &[], &args, 1).is_err());
/// ```
pub fn check_keywords(name: &str,
                      allowed: &[&str],
                      arguments: &Arguments,
                      line: usize)
                      -> EvalResult<()> {
    match arguments.keywords
                   .iter()
                   .find(|(key, _)| !allowed.contains(&key.as_str()))
    {
        Some((key, _)) => {
            Err(RuntimeError::InvalidArgument { details: format!("'{key}' is an invalid keyword argument for {name}()"),
                                                line })
        },
        None => Ok(()),
    }
}

/// Reads the `reverse=` keyword shared by `sorted` and `list.sort`.
///
/// Absent means `False`.
///
/// # Errors
/// Returns `RuntimeError::TypeError` if the value is not a boolean.
pub fn reverse_flag(arguments: &Arguments, line: usize) -> EvalResult<bool> {
    match arguments.keyword("reverse") {
        None => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => Err(RuntimeError::TypeError { details: format!("reverse must be True or False, not {}",
                                                                      other.type_name()),
                                                     line }),
    }
}
