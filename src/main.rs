//! Scripted session runner (default binary).
//!
//! Reads commands from a script file (first argument) or stdin, applies them to a game,
//! and prints one JSON snapshot per mutating command to stdout. Notifications and
//! lifecycle messages go to stderr.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};

use anyhow::{Context, Result};

use guideline_tetris::core::{EngineConfig, Notification, Observer};
use guideline_tetris::session::{parse_command, Outcome, Session};

/// Logs every notification to stderr.
struct LogObserver;

impl Observer for LogObserver {
    fn notify(&mut self, notification: Notification) {
        eprintln!("[Session] {:?}", notification);
    }
}

fn main() -> Result<()> {
    let config = EngineConfig::from_env();
    eprintln!(
        "[Session] seed {} preview {}",
        config.seed, config.preview_count
    );

    let input: Box<dyn BufRead> = match std::env::args().nth(1) {
        Some(path) => {
            let file =
                File::open(&path).with_context(|| format!("failed to open script {}", path))?;
            eprintln!("[Session] reading commands from {}", path);
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut session = Session::new(config, LogObserver);

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("failed to read line {}", line_no))?;
        let Some(command) =
            parse_command(&line).with_context(|| format!("line {}: {}", line_no, line.trim()))?
        else {
            continue;
        };

        match session.execute(command) {
            Outcome::Snapshot(snapshot) => {
                serde_json::to_writer(&mut out, &snapshot)
                    .context("failed to write snapshot")?;
                writeln!(out)?;
                out.flush()?;
            }
            Outcome::Quit => break,
        }
    }

    let game = session.game();
    eprintln!(
        "[Session] finished: status {:?} score {} level {} lines {}",
        game.status(),
        game.score(),
        game.level(),
        game.lines_cleared()
    );
    Ok(())
}
