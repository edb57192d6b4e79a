use std::fmt;
use std::time::Duration;

use flag_core::model::{DEFAULT_FLAG_BASE_URL, FlagImageSource, Level, QuizSettings};
use services::{Clock, QuizLoop, RunOutcome, RunReport};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

mod terminal;

use terminal::TerminalPresenter;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidLevel { raw: String },
    InvalidSeed { raw: String },
    InvalidMillis { flag: &'static str, raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidLevel { raw } => write!(f, "invalid --level value: {raw}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::InvalidMillis { flag, raw } => {
                write!(f, "invalid {flag} value (milliseconds): {raw}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_millis(raw: String, flag: &'static str) -> Result<Duration, ArgsError> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| ArgsError::InvalidMillis { flag, raw })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  flag-quiz [--level <1-5>] [--seed <u64>] [--flag-base-url <url>]");
    eprintln!("            [--feedback-ms <ms>] [--retry-ms <ms>]");
    eprintln!();
    eprintln!("Type a country name and press Enter for each flag. Ctrl-D quits.");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --level 1");
    eprintln!("  --flag-base-url {DEFAULT_FLAG_BASE_URL}");
    eprintln!("  --feedback-ms 700, --retry-ms 2200");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  FLAG_QUIZ_LEVEL, FLAG_QUIZ_SEED, FLAG_QUIZ_FLAG_BASE_URL, RUST_LOG");
}

#[derive(Debug)]
struct Args {
    level: u32,
    seed: Option<u64>,
    flag_base_url: String,
    feedback_delay: Option<Duration>,
    retry_delay: Option<Duration>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Option<Self>, ArgsError> {
        let mut level = std::env::var("FLAG_QUIZ_LEVEL")
            .ok()
            .and_then(|value| value.trim().parse::<u32>().ok())
            .unwrap_or(Level::MIN);
        let mut seed = std::env::var("FLAG_QUIZ_SEED")
            .ok()
            .and_then(|value| value.trim().parse::<u64>().ok());
        let mut flag_base_url = std::env::var("FLAG_QUIZ_FLAG_BASE_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FLAG_BASE_URL.to_string());
        let mut feedback_delay = None;
        let mut retry_delay = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--level" => {
                    let value = require_value(args, "--level")?;
                    level = value
                        .trim()
                        .parse()
                        .map_err(|_| ArgsError::InvalidLevel { raw: value.clone() })?;
                }
                "--seed" => {
                    let value = require_value(args, "--seed")?;
                    let parsed = value
                        .trim()
                        .parse()
                        .map_err(|_| ArgsError::InvalidSeed { raw: value.clone() })?;
                    seed = Some(parsed);
                }
                "--flag-base-url" => {
                    flag_base_url = require_value(args, "--flag-base-url")?;
                }
                "--feedback-ms" => {
                    let value = require_value(args, "--feedback-ms")?;
                    feedback_delay = Some(parse_millis(value, "--feedback-ms")?);
                }
                "--retry-ms" => {
                    let value = require_value(args, "--retry-ms")?;
                    retry_delay = Some(parse_millis(value, "--retry-ms")?);
                }
                "--help" | "-h" => return Ok(None),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Some(Self {
            level,
            seed,
            flag_base_url,
            feedback_delay,
            retry_delay,
        }))
    }

    fn validate(&self) -> Result<(Level, FlagImageSource), flag_core::Error> {
        let level = Level::new(self.level)?;
        let flags = FlagImageSource::new(&self.flag_base_url)?;
        Ok((level, flags))
    }

    fn settings(&self) -> QuizSettings {
        let mut settings = QuizSettings::default();
        if let Some(delay) = self.feedback_delay {
            settings = settings.with_feedback_delay(delay);
        }
        if let Some(delay) = self.retry_delay {
            settings = settings.with_retry_delay(delay);
        }
        settings
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Forward stdin lines as guesses until EOF or the receiver goes away.
fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(16);
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if tx.send(line).await.is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(err) => {
                    tracing::warn!(%err, "failed to read stdin");
                    break;
                }
            }
        }
    });
    rx
}

fn print_report(report: &RunReport) {
    println!();
    match report.outcome {
        RunOutcome::AllLevelsComplete => println!("Finished every level."),
        RunOutcome::Abandoned => println!("Quiz ended."),
    }
    for summary in &report.summaries {
        let mark = if summary.passed() { "passed" } else { "failed" };
        println!(
            "  level {}: {}/{} {mark}",
            summary.level(),
            summary.correct(),
            summary.total()
        );
    }
    if report.restarts > 0 {
        println!("  retries: {}", report.restarts);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = match Args::parse(&mut argv) {
        Ok(Some(parsed)) => parsed,
        Ok(None) => {
            print_usage();
            return Ok(());
        }
        Err(e) => {
            eprintln!("{e}");
            print_usage();
            return Err(e.into());
        }
    };

    // Validate everything before touching stdin.
    let (level, flags) = parsed.validate()?;
    let settings = parsed.settings();

    let clock = Clock::system();
    let mut quiz = match parsed.seed {
        Some(seed) => QuizLoop::seeded(settings, clock, seed),
        None => QuizLoop::new(settings, clock),
    };

    let mut guesses = spawn_stdin_reader();
    let mut presenter = TerminalPresenter::new(flags);
    let report = quiz.run(level.get(), &mut guesses, &mut presenter).await?;
    print_report(&report);
    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
