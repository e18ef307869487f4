//! Chrono Exile script runner
//!
//! Drives the engine from text commands read from a file or stdin and prints
//! the message log (or a JSON snapshot) as it goes.

mod input;

use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use clap::Parser;
use env_logger::Env;

use exile_core::world::{AudioError, AudioSink, EngineOptions, SoundCue};
use exile_core::{GameLoop, LoopResult, Mode, WorldState};

use input::{for_mode, parse_intent};

/// Chrono Exile
#[derive(Parser, Debug)]
#[command(name = "exile")]
#[command(author, version, about = "Chrono Exile - headless runner", long_about = None)]
struct Args {
    /// RNG seed (overrides the config file)
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON options file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Read commands from a file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,

    /// Skip the main menu
    #[arg(long)]
    play: bool,

    /// Print a JSON snapshot after every command
    #[arg(long)]
    json: bool,

    /// Verbose logging (RUST_LOG still wins)
    #[arg(short, long)]
    verbose: bool,
}

/// Sink that reports cues through the logger
struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, cue: SoundCue) -> Result<(), AudioError> {
        log::info!("cue: {cue}");
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let mut options = match &args.config {
        Some(path) => EngineOptions::load_from_file(path)?,
        None => EngineOptions::default(),
    };
    if let Some(seed) = args.seed {
        options.seed = Some(seed);
    }

    let mut state = WorldState::new(options)?;
    if args.play {
        state.mode = Mode::Playing;
    }
    let mut game = GameLoop::new(state).with_sink(Box::new(LogSink));

    let reader: Box<dyn BufRead> = match &args.script {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let command = line.trim();
        if command.is_empty() || command.starts_with('#') {
            continue;
        }
        let intent = match parse_intent(command) {
            Ok(intent) => intent,
            Err(err) => {
                log::warn!("line {}: {err}", number + 1);
                continue;
            }
        };

        let intent = for_mode(intent, game.state().mode);
        let mark = game.state().messages.total();
        let result = game.handle(intent);
        let state = game.state();
        if args.json {
            serde_json::to_writer(&mut out, &state.snapshot())?;
            writeln!(out)?;
        } else {
            for message in state.messages.since(mark) {
                writeln!(out, "[{}] {}", message.turn, message.text)?;
            }
        }
        if result == LoopResult::Quit {
            break;
        }
    }
    out.flush()?;
    Ok(())
}
