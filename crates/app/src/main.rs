use std::fmt;
use std::fs;
use std::io::{self, BufRead};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use engine::{
    Cue, LoadError, Navigator, Notifier, Phase, Presenter, QuestionBank, QuestionView,
    RevealOutcome, RoundController, RoundExit, SlotFeedback,
};
use quiz_core::Clock;
use quiz_core::model::{OPTION_SLOTS, QuestionSet, RoundSettings, RoundSummary};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Host-loop frame length. `TICK_SECONDS` is what the controller sees;
/// the two constants must describe the same span.
const TICK: Duration = Duration::from_millis(100);
const TICK_SECONDS: f32 = 0.1;

//
// ─── ARGUMENTS ─────────────────────────────────────────────────────────────────
//

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidNumber { flag: &'static str, raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidNumber { flag, raw } => {
                write!(f, "invalid {flag} value: {raw}")
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

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--questions <path>] [--time <secs>] [--max <n>] [--seed <n>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --questions crates/app/assets/questions.json");
    eprintln!("  --time 10        seconds per question");
    eprintln!("  --max (none)     play the whole set");
    eprintln!("  --seed (none)    fresh shuffle order every run");
    eprintln!();
    eprintln!("During a round, answer with 1-{OPTION_SLOTS}; q quits.");
}

struct Args {
    questions_path: String,
    question_time: f32,
    max_questions: Option<u32>,
    seed: Option<u64>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self {
            questions_path: "crates/app/assets/questions.json".into(),
            question_time: 10.0,
            max_questions: None,
            seed: None,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--questions" => {
                    parsed.questions_path = require_value(args, "--questions")?;
                }
                "--time" => {
                    let value = require_value(args, "--time")?;
                    parsed.question_time = value.parse().map_err(|_| ArgsError::InvalidNumber {
                        flag: "--time",
                        raw: value.clone(),
                    })?;
                }
                "--max" => {
                    let value = require_value(args, "--max")?;
                    parsed.max_questions =
                        Some(value.parse().map_err(|_| ArgsError::InvalidNumber {
                            flag: "--max",
                            raw: value.clone(),
                        })?);
                }
                "--seed" => {
                    let value = require_value(args, "--seed")?;
                    parsed.seed = Some(value.parse().map_err(|_| ArgsError::InvalidNumber {
                        flag: "--seed",
                        raw: value.clone(),
                    })?);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }
}

//
// ─── COLLABORATORS ─────────────────────────────────────────────────────────────
//

/// Renders engine events as plain terminal lines.
#[derive(Default)]
struct TerminalPresenter {
    last_countdown: Mutex<Option<u32>>,
}

impl Presenter for TerminalPresenter {
    fn question_presented(&self, view: &QuestionView) {
        *self.last_countdown.lock().unwrap() = None;
        println!();
        println!("[{}/{}] {}", view.index + 1, view.total, view.prompt);
        for (slot, option) in view.options.iter().enumerate() {
            println!("  {}) {option}", slot + 1);
        }
        println!("  ({} seconds)", view.time_limit_secs);
    }

    fn countdown(&self, remaining_secs: u32) {
        let mut last = self.last_countdown.lock().unwrap();
        if *last == Some(remaining_secs) {
            return;
        }
        *last = Some(remaining_secs);
        if remaining_secs > 0 && remaining_secs <= 3 {
            println!("  {remaining_secs}...");
        }
    }

    fn revealed(&self, outcome: &RevealOutcome) {
        match outcome.selected() {
            None => println!("  time's up!"),
            Some(chosen) if chosen == outcome.correct_index() => println!("  correct!"),
            Some(chosen) => println!("  {} was wrong", chosen + 1),
        }
        for (slot, feedback) in outcome.slots().iter().enumerate() {
            match feedback {
                SlotFeedback::Correct => println!("  {}) is the answer", slot + 1),
                SlotFeedback::Wrong | SlotFeedback::Neutral => {}
            }
        }
    }

    fn round_completed(&self, summary: &RoundSummary) {
        println!();
        println!("game over!");
        println!(
            "  {} of {} correct ({} wrong, {} timed out)",
            summary.correct(),
            summary.total(),
            summary.wrong(),
            summary.timed_out()
        );
    }

    fn load_failed(&self, reason: &LoadError) {
        eprintln!("could not load questions: {reason}");
    }
}

/// Audio playback is out of scope for the host demo; cues go to the log.
struct CueLog;

impl Notifier for CueLog {
    fn cue(&self, cue: Cue) {
        debug!(?cue, "cue");
    }
}

/// Stands in for the menu/scene navigation of a full front end.
struct MenuNavigator;

impl Navigator for MenuNavigator {
    fn exit_round(&self, exit: RoundExit) {
        debug!(?exit, "leaving round flow");
    }
}

//
// ─── HOST LOOP ─────────────────────────────────────────────────────────────────
//

enum HostInput {
    Select(usize),
    Quit,
}

/// Reads stdin lines off-thread; selections are serialized onto the host
/// loop through the channel, never applied directly.
fn spawn_input_reader(tx: Sender<HostInput>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let trimmed = line.trim();
            if trimmed.eq_ignore_ascii_case("q") {
                let _ = tx.send(HostInput::Quit);
                break;
            }
            if let Ok(n) = trimmed.parse::<usize>() {
                if (1..=OPTION_SLOTS).contains(&n) {
                    if tx.send(HostInput::Select(n - 1)).is_err() {
                        break;
                    }
                }
            }
        }
    });
}

fn load_questions(path: &str, settings: &RoundSettings) -> Result<QuestionSet, LoadError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(LoadError::SourceNotFound { path: path.into() });
        }
        Err(err) => {
            return Err(LoadError::SourceNotFound {
                path: format!("{path} ({err})"),
            });
        }
    };
    QuestionBank::prepare(&bytes, settings)
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let defaults = RoundSettings::default();
    let settings = RoundSettings::new(
        args.question_time,
        args.max_questions.unwrap_or(defaults.max_questions()),
        defaults.reveal_delay(),
        defaults.inter_round_pause(),
        args.seed,
    )?;

    let presenter = Arc::new(TerminalPresenter::default());
    let notifier = Arc::new(CueLog);
    let navigator = Arc::new(MenuNavigator);

    let questions = match load_questions(&args.questions_path, &settings) {
        Ok(questions) => questions,
        Err(err) => {
            presenter.load_failed(&err);
            navigator.exit_round(RoundExit::NoContent);
            return Err(err.into());
        }
    };

    let mut controller = RoundController::new(
        questions,
        settings,
        Clock::default_clock(),
        presenter,
        notifier,
        navigator,
    );

    let (tx, rx) = mpsc::channel();
    spawn_input_reader(tx);

    controller.start();
    loop {
        // Input is drained before the tick so a selection arriving in the
        // same frame as a timeout wins the race.
        while let Ok(input) = rx.try_recv() {
            match input {
                HostInput::Select(slot) => controller.select(slot),
                HostInput::Quit => {
                    controller.reset();
                    println!("session abandoned");
                    return Ok(());
                }
            }
        }

        controller.tick(TICK_SECONDS);
        if controller.phase() == Phase::Completed {
            break;
        }
        thread::sleep(TICK);
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
