//! Scripted session driver
//!
//! One command per line:
//!
//! - an action name (`moveLeft`, `hardDrop`, `debugToggle`, ...), case-insensitive
//! - `start`
//! - `tick <ms>`: advance time once
//! - `run <ms> [step]`: advance time in `step`-sized ticks (default 16ms, at most
//!   [`MAX_RUN_TICKS`] of them)
//! - `snapshot`: report the current state without changing it
//! - `quit`
//!
//! Blank lines and `#` comments are skipped.

use anyhow::{bail, Context, Result};

use crate::core::{EngineConfig, Event, GameSnapshot, GameState, Notifier, Observer};
use crate::types::GameAction;

/// Tick size used by `run` when no step is given (about 60 Hz)
pub const DEFAULT_STEP_MS: f64 = 16.0;

/// Most ticks a single `run` may take
pub const MAX_RUN_TICKS: u64 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Start,
    Action(GameAction),
    Tick(f64),
    Run { total_ms: f64, step_ms: f64 },
    Snapshot,
    Quit,
}

/// Parse one script line; `Ok(None)` for blank lines and comments
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match name.to_ascii_lowercase().as_str() {
        "start" => Command::Start,
        "snapshot" => Command::Snapshot,
        "quit" | "exit" => Command::Quit,
        "tick" => {
            let [ms] = args[..] else {
                bail!("usage: tick <ms>");
            };
            Command::Tick(parse_ms(ms)?)
        }
        "run" => {
            let (total, step) = match args[..] {
                [total] => (total, None),
                [total, step] => (total, Some(step)),
                _ => bail!("usage: run <ms> [step]"),
            };
            let total_ms = parse_ms(total)?;
            let step_ms = step.map(parse_ms).transpose()?.unwrap_or(DEFAULT_STEP_MS);
            if step_ms <= 0.0 {
                bail!("run step must be positive, got {step_ms}");
            }
            if (total_ms / step_ms).ceil() > MAX_RUN_TICKS as f64 {
                bail!("run {total_ms} {step_ms} needs more than {MAX_RUN_TICKS} ticks");
            }
            Command::Run { total_ms, step_ms }
        }
        _ => match GameAction::from_str(name) {
            Some(action) if args.is_empty() => Command::Action(action),
            Some(_) => bail!("action {name} takes no arguments"),
            None => bail!("unknown command: {name}"),
        },
    };

    Ok(Some(command))
}

/// Number of ticks `run` takes, capped at [`MAX_RUN_TICKS`]; zero for a non-positive step
pub fn run_ticks(total_ms: f64, step_ms: f64) -> u64 {
    if step_ms.is_nan() || total_ms.is_nan() || step_ms <= 0.0 || total_ms <= 0.0 {
        return 0;
    }
    let ticks = (total_ms / step_ms).ceil();
    if ticks >= MAX_RUN_TICKS as f64 {
        MAX_RUN_TICKS
    } else {
        ticks as u64
    }
}

fn parse_ms(value: &str) -> Result<f64> {
    let ms: f64 = value
        .parse()
        .with_context(|| format!("invalid milliseconds: {value}"))?;
    if !ms.is_finite() || ms < 0.0 {
        bail!("milliseconds must be a non-negative number, got {value}");
    }
    Ok(ms)
}

/// What the runner should do after a command
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Snapshot(GameSnapshot),
    Quit,
}

/// A game plus the notifier that watches it
pub struct Session<O> {
    game: GameState,
    notifier: Notifier<O>,
}

impl<O: Observer> Session<O> {
    pub fn new(config: EngineConfig, observer: O) -> Self {
        let game = GameState::with_config(config);
        let mut notifier = Notifier::new(observer);
        notifier.publish(game.snapshot());
        Self { game, notifier }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Run one command; every mutating command publishes and returns a snapshot
    pub fn execute(&mut self, command: Command) -> Outcome {
        match command {
            Command::Start => self.step(Event::Start),
            Command::Action(action) => self.step(Event::Input(action)),
            Command::Tick(ms) => self.step(Event::Tick(ms)),
            Command::Run { total_ms, step_ms } => {
                for tick in 0..run_ticks(total_ms, step_ms) {
                    // the last tick only covers what is left
                    let remaining = total_ms - step_ms * tick as f64;
                    self.step(Event::Tick(step_ms.min(remaining).max(0.0)));
                }
                Outcome::Snapshot(self.game.snapshot())
            }
            Command::Snapshot => Outcome::Snapshot(self.game.snapshot()),
            Command::Quit => Outcome::Quit,
        }
    }

    fn step(&mut self, event: Event) -> Outcome {
        self.game.handle_event(event);
        let snapshot = self.game.snapshot();
        self.notifier.publish(snapshot.clone());
        Outcome::Snapshot(snapshot)
    }
}
