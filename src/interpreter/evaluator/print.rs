use crate::{
    ast::CallArgs,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            utils::check_keywords,
        },
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a `print(...)` statement and writes the result to the
    /// output.
    ///
    /// Values are shown in their printed form and joined by `sep` (default a
    /// single space), then followed by `end` (default a newline). Passing
    /// `None` for either keyword selects the default.
    ///
    /// # Errors
    /// - `RuntimeError::InvalidArgument` for keywords other than `sep` and
    ///   `end`.
    /// - `RuntimeError::TypeError` if `sep` or `end` is not a string.
    ///
    /// # Example
    /// ```
    /// use pysnip::interpreter::{
    ///     evaluator::core::Context, lexer::tokenize_line, parser::statement::parse_line,
    /// };
    ///
    /// let mut ctx = Context::new();
    /// let statement = parse_line(&tokenize_line(r#"print(1, "a", sep="-")"#, 1).unwrap(), 1).unwrap();
    /// ctx.eval_statement(&statement).unwrap();
    ///
    /// assert_eq!(ctx.into_evaluation().output, vec!["1-a".to_string()]);
    /// ```
    pub fn eval_print(&mut self, arguments: &CallArgs, line: usize) -> EvalResult<()> {
        let arguments = self.eval_arguments(arguments)?;
        check_keywords("print", &["sep", "end"], &arguments, line)?;

        let sep = text_keyword(arguments.keyword("sep"), "sep", " ", line)?;
        let end = text_keyword(arguments.keyword("end"), "end", "\n", line)?;

        let mut text = arguments.positional
                                .iter()
                                .map(ToString::to_string)
                                .collect::<Vec<_>>()
                                .join(&sep);
        text.push_str(&end);
        self.write(&text);
        Ok(())
    }
}

fn text_keyword(value: Option<&Value>,
                name: &str,
                default: &str,
                line: usize)
                -> EvalResult<String> {
    match value {
        None | Some(Value::None) => Ok(default.to_string()),
        Some(Value::Str(s)) => Ok(s.clone()),
        Some(other) => Err(RuntimeError::TypeError { details: format!("{name} must be None or a string, not {}",
                                                                      other.type_name()),
                                                     line }),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::interpreter::{lexer::tokenize_line, parser::statement::parse_line};

    fn run(lines: &[&str]) -> EvalResult<Vec<String>> {
        let mut ctx = Context::new();
        for (i, text) in lines.iter().enumerate() {
            let statement = parse_line(&tokenize_line(text, i + 1).unwrap(), i + 1).unwrap();
            ctx.eval_statement(&statement)?;
        }
        Ok(ctx.into_evaluation().output)
    }

    #[test]
    fn end_keyword_joins_lines() {
        let output = run(&[r#"print("a", end="")"#, r#"print("b")"#, "print()"]).unwrap();
        assert_eq!(output, vec!["ab".to_string(), String::new()]);
    }

    #[test]
    fn strings_print_without_quotes_but_inside_lists_with_them() {
        let output = run(&[r#"print("kiwi", ["kiwi"], None, True)"#]).unwrap();
        assert_eq!(output, vec!["kiwi ['kiwi'] None True".to_string()]);
    }

    #[test]
    fn non_string_separator_is_rejected() {
        assert!(matches!(run(&["print(1, 2, sep=3)"]),
                         Err(RuntimeError::TypeError { line: 1, .. })));
    }
}
