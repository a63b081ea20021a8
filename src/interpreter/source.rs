/// One non-blank, non-comment line of a snippet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// 1-based line number in the original snippet.
    pub number: usize,
    /// Width of the leading whitespace; a tab counts as four spaces.
    pub indent: usize,
    /// The line with surrounding whitespace removed.
    pub text:   &'a str,
}

/// Splits a snippet into the lines the evaluator looks at.
///
/// Blank lines and lines whose first non-blank character is `#` are dropped,
/// but numbering still counts them, so errors point at the right line.
///
/// # Example
/// ```
/// use pysnip::interpreter::source::source_lines;
///
/// let lines = source_lines("# setup\nx = 1\n\n    print(x)\n");
/// assert_eq!(lines.len(), 2);
/// assert_eq!(lines[0].number, 2);
/// assert_eq!(lines[1].indent, 4);
/// assert_eq!(lines[1].text, "print(x)");
/// ```
#[must_use]
pub fn source_lines(source: &str) -> Vec<SourceLine<'_>> {
    source.lines()
          .enumerate()
          .filter_map(|(i, raw)| {
              let text = raw.trim();
              if text.is_empty() || text.starts_with('#') {
                  return None;
              }
              Some(SourceLine { number: i + 1,
                                indent: indent_width(raw),
                                text })
          })
          .collect()
}

fn indent_width(raw: &str) -> usize {
    raw.chars()
       .take_while(|c| c.is_whitespace())
       .map(|c| if c == '\t' { 4 } else { 1 })
       .sum()
}
