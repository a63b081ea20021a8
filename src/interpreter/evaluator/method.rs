use std::rc::Rc;

use crate::{
    ast::{CallArgs, Expr, ListMethod},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult, Operation},
            function::core::{Arguments, Arity},
            utils::{check_arity, check_keywords, reverse_flag},
        },
        value::{core::Value, ordering::sort_values},
    },
    util::num::{clamp_index, resolve_index, usize_to_i64_checked},
};

/// Positional arity and accepted keywords of a list method.
const fn signature(method: ListMethod) -> (Arity, &'static [&'static str]) {
    match method {
        ListMethod::Append
        | ListMethod::Remove
        | ListMethod::Extend
        | ListMethod::Count
        | ListMethod::Index => (Arity::Exact(1), &[]),
        ListMethod::Pop => (Arity::OneOf(&[0, 1]), &[]),
        ListMethod::Insert => (Arity::Exact(2), &[]),
        ListMethod::Sort => (Arity::Exact(0), &["reverse"]),
        ListMethod::Reverse | ListMethod::Clear => (Arity::Exact(0), &[]),
    }
}

impl Context {
    /// Evaluates `target.method(arguments)`.
    ///
    /// When the receiver is a plain variable, the call is recorded as a touch
    /// and mutating methods change the stored list in place, while `count`
    /// and `index` leave a shared list shared. Any other
    /// receiver is evaluated to a temporary list, so `[3, 1].sort()` runs but
    /// has no lasting effect.
    ///
    /// # Errors
    /// - `RuntimeError::TypeError` if the receiver is not a list.
    /// - `RuntimeError::ArgumentCountMismatch` for a wrong argument count.
    /// - Method specific errors, e.g. popping from an empty list.
    ///
    /// # Example
    /// ```
    /// use pysnip::{
    ///     ast::{CallArgs, Expr, ListMethod},
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let mut ctx = Context::new();
    /// ctx.variables.insert("xs".to_string(), Value::from(vec![Value::Integer(1)]));
    ///
    /// let target = Expr::Variable { name: "xs".to_string(),
    ///                               line: 2, };
    /// let args = CallArgs { positional: vec![Expr::Literal { value: 5.into(),
    ///                                                        line:  2, }],
    ///                       keywords:   vec![], };
    /// ctx.eval_method_call(&target, ListMethod::Append, &args, 2).unwrap();
    ///
    /// assert_eq!(ctx.get_variable("xs", 2).unwrap().to_string(), "[1, 5]");
    /// ```
    pub fn eval_method_call(&mut self,
                            target: &Expr,
                            method: ListMethod,
                            arguments: &CallArgs,
                            line: usize)
                            -> EvalResult<Value> {
        let arguments = self.eval_arguments(arguments)?;
        let (arity, keywords) = signature(method);
        check_arity(method.name(), arity, &arguments, line)?;
        check_keywords(method.name(), keywords, &arguments, line)?;

        if let Expr::Variable { name, .. } = target {
            self.touch(name, Operation::Method(method), line);
            if method.mutates() {
                return apply(self.get_variable_mut(name, line)?, method, &arguments, line);
            }
        }
        let mut receiver = self.eval(target)?;
        apply(&mut receiver, method, &arguments, line)
    }
}

fn apply(receiver: &mut Value,
         method: ListMethod,
         arguments: &Arguments,
         line: usize)
         -> EvalResult<Value> {
    let Value::List(items) = receiver else {
        return Err(RuntimeError::TypeError { details: format!("'{}' object has no attribute '{}'",
                                                              receiver.type_name(),
                                                              method.name()),
                                             line });
    };
    let argument = arguments.positional.first();

    match method {
        ListMethod::Count => {
            let needle = argument.unwrap_or(&Value::None);
            let count = items.iter().filter(|v| *v == needle).count();
            Ok(Value::Integer(usize_to_i64_checked(count, line)?))
        },
        ListMethod::Index => {
            let needle = argument.unwrap_or(&Value::None);
            let position = items.iter()
                                .position(|v| v == needle)
                                .ok_or_else(|| RuntimeError::ValueNotFound { value: needle.repr(),
                                                                             line })?;
            Ok(Value::Integer(usize_to_i64_checked(position, line)?))
        },
        _ => mutate(Rc::make_mut(items), method, arguments, line),
    }
}

fn mutate(items: &mut Vec<Value>,
          method: ListMethod,
          arguments: &Arguments,
          line: usize)
          -> EvalResult<Value> {
    let positional = &arguments.positional;
    match method {
        ListMethod::Append => items.push(positional[0].clone()),
        ListMethod::Remove => {
            if let Some(position) = items.iter().position(|v| *v == positional[0]) {
                items.remove(position);
            }
        },
        ListMethod::Pop => {
            if items.is_empty() {
                return Err(RuntimeError::EmptySequence { operation: "pop".to_string(),
                                                         line });
            }
            let position = match positional.first() {
                Some(index) => resolve_index(index.as_index(line)?, items.len(), line)?,
                None => items.len() - 1,
            };
            return Ok(items.remove(position));
        },
        ListMethod::Insert => {
            let position = clamp_index(positional[0].as_index(line)?, items.len());
            items.insert(position, positional[1].clone());
        },
        ListMethod::Sort => sort_values(items, reverse_flag(arguments, line)?),
        ListMethod::Extend => items.extend(positional[0].elements(line)?),
        ListMethod::Reverse => items.reverse(),
        ListMethod::Clear => items.clear(),
        ListMethod::Count | ListMethod::Index => {},
    }
    Ok(Value::None)
}
