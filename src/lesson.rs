use std::time::Duration;

use tracing::info;

use crate::{
    grading::{Challenge, GradeReport},
    grammar::Grammar,
    progress::ProgressTracker,
    run_with,
};

/// An optional bonus task attached to a lesson.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Supercharge {
    /// The bonus challenge.
    pub challenge:  Challenge,
    /// XP awarded on the first pass.
    pub xp_bonus:   u32,
    /// Coins awarded on the first pass.
    pub coin_bonus: u32,
}

/// Describes one lesson: what it teaches, what it accepts and what it pays.
///
/// The crate ships no course content; hosts build these from their own
/// tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    /// Stable level number, used for progress.
    pub id:              u32,
    /// Display title.
    pub title:           String,
    /// The concept the lesson introduces.
    pub concept:         String,
    /// XP awarded on completion.
    pub xp_reward:       u32,
    /// Coins awarded on completion.
    pub coin_reward:     u32,
    /// Shown after a passing submission.
    pub success_message: String,
    /// Patterns the evaluator recognizes in this lesson.
    pub grammar:         Grammar,
    /// The main challenge.
    pub challenge:       Challenge,
    /// The optional bonus challenge.
    pub supercharge:     Option<Supercharge>,
}

impl Lesson {
    /// Creates a lesson with the full grammar, no rewards and no supercharge.
    #[must_use]
    pub fn new(id: u32, title: impl Into<String>, challenge: Challenge) -> Self {
        Self { id,
               title: title.into(),
               concept: String::new(),
               xp_reward: 0,
               coin_reward: 0,
               success_message: String::new(),
               grammar: Grammar::full(),
               challenge,
               supercharge: None }
    }

    /// Sets the completion rewards.
    #[must_use]
    pub const fn with_rewards(mut self, xp: u32, coins: u32) -> Self {
        self.xp_reward = xp;
        self.coin_reward = coins;
        self
    }

    /// Restricts the recognized patterns.
    #[must_use]
    pub fn with_grammar(mut self, grammar: Grammar) -> Self {
        self.grammar = grammar;
        self
    }

    /// Attaches a bonus challenge.
    #[must_use]
    pub fn with_supercharge(mut self, supercharge: Supercharge) -> Self {
        self.supercharge = Some(supercharge);
        self
    }
}

/// The result of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// What the learner sees: the printed output or the error message.
    pub output:          String,
    /// The grading result.
    pub report:          GradeReport,
    /// Whether this submission earned a reward it had not earned before.
    pub newly_completed: bool,
}

/// Tracks one learner working through one lesson.
///
/// # Example
/// ```
/// use std::time::Duration;
///
/// use pysnip::{
///     grading::Challenge,
///     lesson::{Lesson, LessonSession},
///     progress::{InMemoryProgress, ProgressTracker},
/// };
///
/// let lesson = Lesson::new(4, "Appending", Challenge::new().expect_source(".append(")
///                                                          .expect_output("kiwi"))
///     .with_rewards(50, 10);
/// let mut tracker = InMemoryProgress::default();
/// let mut session = LessonSession::new(&lesson);
///
/// let source = "fruits = []\nfruits.append(\"kiwi\")\nprint(fruits)";
/// let submission = session.submit(source, &mut tracker, Duration::from_secs(30));
///
/// assert!(submission.report.passed);
/// assert!(submission.newly_completed);
/// assert_eq!(tracker.progress().completed_levels[0].stars, 2);
/// ```
#[derive(Debug)]
pub struct LessonSession<'a> {
    lesson:       &'a Lesson,
    attempts:     u32,
    supercharged: bool,
}

impl<'a> LessonSession<'a> {
    /// Starts a session on `lesson`.
    #[must_use]
    pub const fn new(lesson: &'a Lesson) -> Self {
        Self { lesson,
               attempts: 0,
               supercharged: false }
    }

    /// Runs and grades a submission of the main challenge.
    ///
    /// The first passing submission completes the level. A level the tracker
    /// already lists as completed is never completed again.
    pub fn submit(&mut self,
                  source: &str,
                  tracker: &mut dyn ProgressTracker,
                  elapsed: Duration)
                  -> Submission {
        self.attempts += 1;
        let output = run_with(source, &self.lesson.grammar);
        let report = self.lesson.challenge.grade(source, &output);

        let newly_completed = report.passed && !tracker.progress().has_completed(self.lesson.id);
        if newly_completed {
            let stars = self.stars();
            info!(level = self.lesson.id, stars, attempts = self.attempts, "lesson passed");
            tracker.complete_level(self.lesson.id,
                                   self.lesson.xp_reward,
                                   self.lesson.coin_reward,
                                   stars,
                                   elapsed.as_secs());
        }

        Submission { output,
                     report,
                     newly_completed }
    }

    /// Runs and grades a submission of the bonus challenge.
    ///
    /// The bonus is paid at most once per session. A lesson without a
    /// supercharge never passes this check.
    pub fn submit_supercharge(&mut self,
                              source: &str,
                              tracker: &mut dyn ProgressTracker)
                              -> Submission {
        let output = run_with(source, &self.lesson.grammar);
        let Some(supercharge) = &self.lesson.supercharge else {
            return Submission { output,
                                report: GradeReport::default(),
                                newly_completed: false };
        };

        let report = supercharge.challenge.grade(source, &output);
        let newly_completed = report.passed && !self.supercharged;
        if newly_completed {
            self.supercharged = true;
            info!(level = self.lesson.id,
                  xp = supercharge.xp_bonus,
                  coins = supercharge.coin_bonus,
                  "supercharge earned");
            tracker.add_xp_and_coins(supercharge.xp_bonus, supercharge.coin_bonus);
        }

        Submission { output,
                     report,
                     newly_completed }
    }

    /// Stars for completing the level now.
    #[must_use]
    pub const fn stars(&self) -> u8 {
        if self.supercharged {
            3
        } else if self.attempts <= 1 {
            2
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        ERROR_MESSAGE,
        grammar::Feature,
        progress::{InMemoryProgress, Progress},
    };

    fn lesson() -> Lesson {
        let challenge = Challenge::new().expect_source("sorted(")
                                        .expect_output("[1, 2, 3]")
                                        .forbid_output(ERROR_MESSAGE);
        let supercharge = Supercharge { challenge:  Challenge::new().expect_source("reverse=True")
                                                                    .expect_output("[3, 2, 1]"),
                                        xp_bonus:   20,
                                        coin_bonus: 5, };
        Lesson::new(7, "Sorting lists", challenge).with_rewards(100, 25)
                                                  .with_supercharge(supercharge)
    }

    const GOOD: &str = "xs = [3, 1, 2]\nprint(sorted(xs))";
    const BONUS: &str = "xs = [3, 1, 2]\nprint(sorted(xs, reverse=True))";

    #[test]
    fn a_level_is_completed_once() {
        let lesson = lesson();
        let mut tracker = InMemoryProgress::default();
        let mut session = LessonSession::new(&lesson);

        assert!(session.submit(GOOD, &mut tracker, Duration::from_secs(5)).newly_completed);
        let again = session.submit(GOOD, &mut tracker, Duration::from_secs(9));
        assert!(again.report.passed);
        assert!(!again.newly_completed);

        assert_eq!(tracker.progress().xp, 100);
        assert_eq!(tracker.progress().coins, 25);
        assert_eq!(tracker.progress().completed_levels.len(), 1);
        assert_eq!(tracker.progress().completed_levels[0].time_spent_secs, 5);
    }

    #[test]
    fn stars_depend_on_attempts_and_supercharge() {
        let lesson = lesson();

        let mut tracker = InMemoryProgress::default();
        let mut session = LessonSession::new(&lesson);
        assert!(!session.submit("print(1)", &mut tracker, Duration::ZERO).report.passed);
        session.submit(GOOD, &mut tracker, Duration::ZERO);
        assert_eq!(tracker.progress().completed_levels[0].stars, 1);

        let mut tracker = InMemoryProgress::default();
        let mut session = LessonSession::new(&lesson);
        assert!(session.submit_supercharge(BONUS, &mut tracker).newly_completed);
        session.submit(GOOD, &mut tracker, Duration::ZERO);
        assert_eq!(tracker.progress().completed_levels[0].stars, 3);
        assert_eq!(tracker.progress().xp, 120);
    }

    #[test]
    fn supercharge_pays_once_per_session() {
        let lesson = lesson();
        let mut tracker = InMemoryProgress::default();
        let mut session = LessonSession::new(&lesson);

        session.submit_supercharge(BONUS, &mut tracker);
        let second = session.submit_supercharge(BONUS, &mut tracker);
        assert!(second.report.passed);
        assert!(!second.newly_completed);
        assert_eq!(tracker.progress().coins, 5);
    }

    #[test]
    fn runtime_errors_fail_the_challenge() {
        let lesson = lesson();
        let mut tracker = InMemoryProgress::default();
        let mut session = LessonSession::new(&lesson);

        let submission = session.submit("xs = []\nprint(sorted(xs)[0])",
                                        &mut tracker,
                                        Duration::ZERO);
        assert_eq!(submission.output, ERROR_MESSAGE);
        assert!(!submission.report.passed);
        assert_eq!(tracker.progress(), &Progress::default());
    }

    #[test]
    fn lesson_grammar_gates_patterns() {
        let lesson = lesson().with_grammar(Grammar::full().without(Feature::Sorted));
        let mut tracker = InMemoryProgress::default();
        let mut session = LessonSession::new(&lesson);

        let submission = session.submit(GOOD, &mut tracker, Duration::ZERO);
        assert_eq!(submission.output, "");
        assert_eq!(submission.report.missing_output, vec!["[1, 2, 3]".to_string()]);
    }

    #[test]
    fn lessons_without_supercharge_never_pay_a_bonus() {
        let lesson = Lesson::new(1, "Plain", Challenge::new());
        let mut tracker = InMemoryProgress::default();
        let mut session = LessonSession::new(&lesson);

        assert!(!session.submit_supercharge("print(1)", &mut tracker).report.passed);
    }
}
