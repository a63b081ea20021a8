use tracing::debug;

/// A lesson challenge, checked by substring containment.
///
/// Markers are matched against the raw source text and the produced output
/// exactly as written. This is deliberately loose: a marker inside a comment
/// counts, and an output marker like `"3"` also matches `"13"`.
///
/// # Example
/// ```
/// use pysnip::grading::Challenge;
///
/// let challenge = Challenge::new().expect_source(".append(")
///                                 .expect_output("kiwi");
///
/// let report = challenge.grade("fruits.append(\"kiwi\")", "['kiwi']");
/// assert!(report.passed);
///
/// let report = challenge.grade("fruits = [\"kiwi\"]", "['kiwi']");
/// assert!(!report.passed);
/// assert_eq!(report.missing_source, vec![".append(".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Challenge {
    /// Texts the source must contain.
    pub source_markers:   Vec<String>,
    /// Texts the output must contain.
    pub output_markers:   Vec<String>,
    /// Texts the output must not contain.
    pub forbidden_output: Vec<String>,
}

/// The outcome of grading one submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GradeReport {
    /// Whether every check held.
    pub passed:                 bool,
    /// Source markers that were not found.
    pub missing_source:         Vec<String>,
    /// Output markers that were not found.
    pub missing_output:         Vec<String>,
    /// Forbidden texts that appeared in the output.
    pub forbidden_output_found: Vec<String>,
}

impl Challenge {
    /// Creates a challenge with no markers; it passes any submission.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires the source to contain `marker`.
    #[must_use]
    pub fn expect_source(mut self, marker: impl Into<String>) -> Self {
        self.source_markers.push(marker.into());
        self
    }

    /// Requires the output to contain `marker`.
    #[must_use]
    pub fn expect_output(mut self, marker: impl Into<String>) -> Self {
        self.output_markers.push(marker.into());
        self
    }

    /// Rejects any output containing `text`, e.g. the runtime error message.
    #[must_use]
    pub fn forbid_output(mut self, text: impl Into<String>) -> Self {
        self.forbidden_output.push(text.into());
        self
    }

    /// Grades a submission's source text and printed output.
    #[must_use]
    pub fn grade(&self, source: &str, output: &str) -> GradeReport {
        let missing = |markers: &[String], haystack: &str| {
            markers.iter()
                   .filter(|m| !haystack.contains(m.as_str()))
                   .cloned()
                   .collect::<Vec<_>>()
        };

        let missing_source = missing(&self.source_markers, source);
        let missing_output = missing(&self.output_markers, output);
        let forbidden_output_found = self.forbidden_output
                                         .iter()
                                         .filter(|f| output.contains(f.as_str()))
                                         .cloned()
                                         .collect::<Vec<_>>();

        let passed = missing_source.is_empty()
                     && missing_output.is_empty()
                     && forbidden_output_found.is_empty();
        debug!(passed,
               ?missing_source,
               ?missing_output,
               ?forbidden_output_found,
               "graded submission");

        GradeReport { passed,
                      missing_source,
                      missing_output,
                      forbidden_output_found }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ERROR_MESSAGE;

    #[test]
    fn markers_in_comments_still_count() {
        let challenge = Challenge::new().expect_source("sorted(");
        assert!(challenge.grade("# sorted( later\nprint(1)", "1").passed);
    }

    #[test]
    fn output_markers_match_incidental_numbers() {
        let challenge = Challenge::new().expect_output("3");
        assert!(challenge.grade("", "13").passed);
    }

    #[test]
    fn forbidden_output_rejects_the_error_message() {
        let challenge = Challenge::new().expect_output("")
                                        .forbid_output(ERROR_MESSAGE);
        let report = challenge.grade("xs = []\nxs.pop()", ERROR_MESSAGE);

        assert!(!report.passed);
        assert_eq!(report.forbidden_output_found, vec![ERROR_MESSAGE.to_string()]);
        assert!(report.missing_output.is_empty());
    }

    #[test]
    fn an_empty_challenge_passes() {
        assert!(Challenge::new().grade("", "").passed);
    }
}
