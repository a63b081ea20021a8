use std::{fs, process::ExitCode, time::Instant};

use clap::{Args, Parser, Subcommand};
use pysnip::{
    ERROR_MESSAGE, evaluate_with,
    grading::Challenge,
    grammar::{Feature, Grammar},
    lesson::{Lesson, LessonSession},
    progress::{InMemoryProgress, ProgressTracker},
    run_with,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// pysnip runs beginner Python snippets the forgiving way a lesson page does:
/// recognized lines run, everything else is skipped.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a snippet's output, or the fixed error message.
    Run(Input),
    /// Submit a snippet as a lesson and grade it against substring markers.
    Grade {
        #[command(flatten)]
        input:         Input,
        /// Text the source must contain. May be repeated.
        #[arg(long = "expect-source")]
        source_marker: Vec<String>,
        /// Text the output must contain. May be repeated.
        #[arg(long = "expect-output")]
        output_marker: Vec<String>,
        /// Level number recorded on completion.
        #[arg(long, default_value_t = 1)]
        level:         u32,
        /// XP awarded on completion.
        #[arg(long, default_value_t = 0)]
        xp:            u32,
        /// Coins awarded on completion.
        #[arg(long, default_value_t = 0)]
        coins:         u32,
    },
    /// Show variables, touches, class shapes and skipped lines.
    Explain(Input),
}

#[derive(Args, Debug)]
struct Input {
    /// Tells pysnip to look at a file instead of a snippet.
    #[arg(short, long)]
    file: bool,

    /// Comma separated features to enable, e.g. `assign,list_literal,print`.
    /// All features are enabled when absent.
    #[arg(long, value_delimiter = ',')]
    features: Vec<Feature>,

    contents: String,
}

impl Input {
    fn source(&self) -> Result<String, String> {
        if self.file {
            fs::read_to_string(&self.contents).map_err(|_| {
                format!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                        self.contents)
            })
        } else {
            Ok(self.contents.clone())
        }
    }

    fn grammar(&self) -> Grammar {
        if self.features.is_empty() {
            Grammar::full()
        } else {
            Grammar::only(&self.features)
        }
    }
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry().with(filter)
                                          .with(tracing_subscriber::fmt::layer().with_target(false)
                                                                                .compact()
                                                                                .with_writer(std::io::stderr))
                                          .try_init();

    let cli = Cli::parse();
    match execute(&cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}

fn execute(command: &Command) -> Result<ExitCode, String> {
    match command {
        Command::Run(input) => {
            println!("{}", run_with(&input.source()?, &input.grammar()));
            Ok(ExitCode::SUCCESS)
        },
        Command::Grade { input,
                         source_marker,
                         output_marker,
                         level,
                         xp,
                         coins, } => {
            let started = Instant::now();
            let source = input.source()?;
            let lesson = marker_lesson(*level, source_marker, output_marker)
                .with_rewards(*xp, *coins)
                .with_grammar(input.grammar());

            let mut tracker = InMemoryProgress::default();
            let mut session = LessonSession::new(&lesson);
            let submission = session.submit(&source, &mut tracker, started.elapsed());
            let report = submission.report;

            println!("{}", submission.output);
            println!("---");
            for marker in &report.missing_source {
                println!("missing in source: {marker}");
            }
            for marker in &report.missing_output {
                println!("missing in output: {marker}");
            }
            for text in &report.forbidden_output_found {
                println!("forbidden in output: {text}");
            }
            println!("{}", if report.passed { "PASSED" } else { "FAILED" });
            for completed in &tracker.progress().completed_levels {
                println!("level {} completed: {} star(s), +{} xp, +{} coins",
                         completed.level, completed.stars, completed.xp, completed.coins);
            }

            Ok(if report.passed {
                   ExitCode::SUCCESS
               } else {
                   ExitCode::FAILURE
               })
        },
        Command::Explain(input) => {
            let evaluation = evaluate_with(&input.source()?, &input.grammar()).map_err(|e| e.to_string())?;

            println!("output:");
            for line in &evaluation.output {
                println!("  {line}");
            }

            let mut names: Vec<_> = evaluation.variables.keys().collect();
            names.sort();
            println!("variables:");
            for name in names {
                println!("  {name} = {}", evaluation.variables[name].repr());
            }

            println!("touches:");
            for touch in &evaluation.touches {
                println!("  line {}: {} {}", touch.line, touch.variable, touch.operation);
            }

            println!("classes:");
            for class in &evaluation.classes {
                let methods: Vec<_> = class.methods.iter().map(|m| m.name.as_str()).collect();
                println!("  {}({}) methods=[{}] super={}",
                         class.name,
                         class.base.as_deref().unwrap_or(""),
                         methods.join(", "),
                         class.calls_super);
            }
            println!("functions:");
            for function in &evaluation.functions {
                println!("  def {}({})", function.name, function.params.join(", "));
            }

            println!("skipped:");
            for skipped in &evaluation.skipped {
                println!("  {}: {}", skipped.text, skipped.reason);
            }
            Ok(ExitCode::SUCCESS)
        },
    }
}

/// A lesson whose challenge is just the given markers. Runtime errors always
/// fail it.
fn marker_lesson(level: u32, source_markers: &[String], output_markers: &[String]) -> Lesson {
    let challenge = source_markers.iter()
                                  .fold(Challenge::new(), |c, m| c.expect_source(m))
                                  .forbid_output(ERROR_MESSAGE);
    let challenge = output_markers.iter().fold(challenge, |c, m| c.expect_output(m));
    Lesson::new(level, format!("Level {level}"), challenge)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn grading_completes_the_level_once() {
        let lesson =
            marker_lesson(3, &[".append(".to_string()], &["kiwi".to_string()]).with_rewards(40, 8);
        let mut tracker = InMemoryProgress::default();
        let mut session = LessonSession::new(&lesson);

        let source = "fruits = []\nfruits.append(\"kiwi\")\nprint(fruits)";
        let submission = session.submit(source, &mut tracker, Duration::from_secs(2));
        assert!(submission.report.passed);
        assert!(submission.newly_completed);

        let completed = &tracker.progress().completed_levels[0];
        assert_eq!((completed.level, completed.stars, completed.xp, completed.coins),
                   (3, 2, 40, 8));
    }

    #[test]
    fn runtime_errors_fail_marker_lessons() {
        let lesson = marker_lesson(1, &[], &[]);
        let mut tracker = InMemoryProgress::default();
        let mut session = LessonSession::new(&lesson);

        let submission = session.submit("xs = []\nxs.pop()", &mut tracker, Duration::ZERO);
        assert_eq!(submission.report.forbidden_output_found, vec![ERROR_MESSAGE.to_string()]);
        assert!(tracker.progress().completed_levels.is_empty());
    }
}
