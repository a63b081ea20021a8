use tracing::{debug, trace};

use crate::{
    ast::Statement,
    error::ParseError,
    grammar::Grammar,
    interpreter::{
        evaluator::core::{Context, EvalResult, SkippedLine},
        lexer::{Token, tokenize_line},
        parser::{core::ParseResult, statement::parse_line},
        source::{SourceLine, source_lines},
    },
};

/// An indented block the walker is currently inside.
#[derive(Debug, Clone, Copy)]
enum Block {
    /// The body of an unrecognized block header; nothing in it runs.
    Skipped { indent: usize, header_line: usize },
    /// The body of a recorded class; `index` points into `Context::classes`.
    Class { indent: usize, index: usize },
    /// The body of a function or method; inspected but never run.
    Function { indent: usize },
}

impl Block {
    const fn indent(&self) -> usize {
        match self {
            Self::Skipped { indent, .. } | Self::Class { indent, .. } | Self::Function { indent } => {
                *indent
            },
        }
    }
}

impl Context {
    /// Runs every line of a snippet under `grammar`.
    ///
    /// Lines are handled one at a time, in order. A line that does not lex,
    /// does not parse or needs a feature the grammar does not enable is
    /// recorded in `skipped` and otherwise ignored. An unrecognized block
    /// header takes its indented body with it. Bodies of `class` and `def`
    /// blocks are not run; they only contribute method headers and `super()`
    /// calls to the recorded class shapes.
    ///
    /// # Errors
    /// Returns the first `RuntimeError` raised by a recognized statement.
    ///
    /// # Example
    /// ```
    /// use pysnip::{grammar::Grammar, interpreter::evaluator::core::Context};
    ///
    /// let source = "xs = [1, 2]\nfor x in xs:\n    print(x)\nprint(len(xs))";
    /// let mut ctx = Context::new();
    /// ctx.run_program(source, &Grammar::full()).unwrap();
    ///
    /// let evaluation = ctx.into_evaluation();
    /// assert_eq!(evaluation.output, vec!["2".to_string()]);
    /// assert_eq!(evaluation.skipped.len(), 2);
    /// ```
    pub fn run_program(&mut self, source: &str, grammar: &Grammar) -> EvalResult<()> {
        let mut blocks: Vec<Block> = Vec::new();

        for line in source_lines(source) {
            while blocks.last().is_some_and(|block| line.indent <= block.indent()) {
                blocks.pop();
            }

            match blocks.last().copied() {
                Some(Block::Skipped { header_line, .. }) => {
                    let reason = ParseError::InsideSkippedBlock { header_line,
                                                                  line:        line.number, };
                    self.skip(&line, reason);
                },
                Some(_) => self.inspect_body(&line, &mut blocks),
                None => self.run_line(&line, grammar, &mut blocks)?,
            }
        }

        self.flush();
        Ok(())
    }

    fn run_line(&mut self,
                line: &SourceLine<'_>,
                grammar: &Grammar,
                blocks: &mut Vec<Block>)
                -> EvalResult<()> {
        let statement = match recognize(line, grammar) {
            Ok(statement) => statement,
            Err(reason) => {
                if opens_block(line) {
                    blocks.push(Block::Skipped { indent:      line.indent,
                                                 header_line: line.number, });
                }
                self.skip(line, reason);
                return Ok(());
            },
        };

        trace!(line = line.number, ?statement, "executing statement");
        self.eval_statement(&statement)?;

        match statement {
            Statement::ClassDef { .. } => {
                blocks.push(Block::Class { indent: line.indent,
                                           index:  self.classes.len() - 1, });
            },
            Statement::FunctionDef(_) => blocks.push(Block::Function { indent: line.indent }),
            _ => {},
        }
        Ok(())
    }

    /// Looks at a line inside a `class` or `def` body without running it.
    fn inspect_body(&mut self, line: &SourceLine<'_>, blocks: &mut Vec<Block>) {
        let Ok(tokens) = tokenize_line(line.text, line.number) else {
            return;
        };

        if let Some(&Block::Class { index, .. }) = blocks.last()
           && let Ok(Statement::FunctionDef(def)) = parse_line(&tokens, line.number)
        {
            debug!(line = line.number, method = %def.name, "recording method");
            self.classes[index].methods.push(def);
            blocks.push(Block::Function { indent: line.indent });
            return;
        }

        if calls_super(&tokens)
           && let Some(index) = blocks.iter().rev().find_map(|block| match block {
                                                       Block::Class { index, .. } => Some(*index),
                                                       _ => None,
                                                   })
        {
            self.classes[index].calls_super = true;
        }
    }

    fn skip(&mut self, line: &SourceLine<'_>, reason: ParseError) {
        debug!(line = line.number, text = line.text, %reason, "skipping unrecognized line");
        self.skipped.push(SkippedLine { line: line.number,
                                        text: line.text.to_string(),
                                        reason });
    }
}

/// Lexes, parses and gates one top-level line.
fn recognize(line: &SourceLine<'_>, grammar: &Grammar) -> ParseResult<Statement> {
    let tokens = tokenize_line(line.text, line.number)?;

    if matches!(tokens.last(), Some((Token::Colon, _)))
       && !matches!(tokens.first(), Some((Token::Class | Token::Def, _)))
    {
        return Err(ParseError::UnsupportedBlock { header: block_keyword(line.text),
                                                  line:   line.number, });
    }

    let statement = parse_line(&tokens, line.number)?;
    match grammar.first_missing(&statement.features()) {
        Some(feature) => Err(ParseError::UnsupportedFeature { feature,
                                                              line: line.number }),
        None => Ok(statement),
    }
}

fn opens_block(line: &SourceLine<'_>) -> bool {
    match tokenize_line(line.text, line.number) {
        Ok(tokens) => matches!(tokens.last(), Some((Token::Colon, _))),
        Err(_) => line.text.ends_with(':'),
    }
}

fn block_keyword(text: &str) -> String {
    text.split(|c: char| !c.is_alphanumeric() && c != '_')
        .find(|word| !word.is_empty())
        .unwrap_or(text)
        .to_string()
}

fn calls_super(tokens: &[(Token, usize)]) -> bool {
    tokens.windows(3).any(|window| {
                         matches!(window,
                                  [(Token::Identifier(name), _), (Token::LParen, _), (Token::RParen, _)]
                                  if name == "super")
                     })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{grammar::Feature, interpreter::evaluator::core::Evaluation};

    fn evaluate(source: &str, grammar: &Grammar) -> Evaluation {
        let mut ctx = Context::new();
        ctx.run_program(source, grammar).unwrap();
        ctx.into_evaluation()
    }

    #[test]
    fn class_bodies_record_methods_and_super_calls() {
        let source = "\
class Animal:
    def speak(self):
        print(\"...\")
class Dog(Animal):
    def __init__(self, name):
        super().__init__()
    def speak(self):
        print(\"Woof\")
print(\"done\")";
        let evaluation = evaluate(source, &Grammar::full());

        assert_eq!(evaluation.output, vec!["done".to_string()]);
        let dog = evaluation.class("Dog").unwrap();
        assert_eq!(dog.base.as_deref(), Some("Animal"));
        assert!(dog.calls_super);
        assert!(dog.method("speak").is_some());
        assert_eq!(dog.method("__init__").unwrap().params, vec!["self", "name"]);
        assert!(!evaluation.class("Animal").unwrap().calls_super);
    }

    #[test]
    fn unsupported_blocks_take_their_body_with_them() {
        let source = "\
xs = [1]
if len(xs) == 1:
    xs.append(2)
    for x in xs:
        print(x)
xs.append(3)
print(xs)";
        let evaluation = evaluate(source, &Grammar::full());

        assert_eq!(evaluation.output, vec!["[1, 3]".to_string()]);
        assert!(matches!(evaluation.skipped[0].reason,
                         ParseError::UnsupportedBlock { ref header, line: 2 } if header == "if"));
        assert!(evaluation.skipped[1..]
                          .iter()
                          .all(|s| matches!(s.reason, ParseError::InsideSkippedBlock { header_line: 2, .. })));
    }

    #[test]
    fn disabled_features_skip_the_line() {
        let grammar = Grammar::full().without(Feature::Sorted);
        let evaluation = evaluate("xs = [2, 1]\nys = sorted(xs)\nprint(xs)", &grammar);

        assert_eq!(evaluation.output, vec!["[2, 1]".to_string()]);
        assert!(evaluation.variable("ys").is_none());
        assert_eq!(evaluation.skipped[0].reason,
                   ParseError::UnsupportedFeature { feature: Feature::Sorted,
                                                    line:    2, });
    }

    #[test]
    fn disabled_class_header_skips_its_body() {
        let grammar = Grammar::full().without(Feature::Classes);
        let evaluation = evaluate("class A:\n    def f(self):\n        pass", &grammar);

        assert!(evaluation.classes.is_empty());
        assert_eq!(evaluation.skipped.len(), 3);
    }

    #[test]
    fn block_keyword_is_the_first_word() {
        assert_eq!(block_keyword("while True:"), "while");
        assert_eq!(block_keyword("else:"), "else");
    }
}
