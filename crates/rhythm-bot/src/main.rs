// rhythm-bot: offline driver for the five-fret input strategy.
//
// Plays note scripts in bot mode or replays recorded input frames, printing
// every emitted event as a JSON line.

mod frames;

use std::cell::RefCell;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use log::info;
use rhythm_input::{
    InputStrategy, KeysStrategy, ManualClock, Mode, NoInput, NoteScript, SongClock,
    StrategyConfig, StrategyEvent, VirtualInputSource,
};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "rhythm-bot", about = "Drive the five-fret input strategy offline")]
struct Args {
    /// Path to a strategy config JSON file.
    #[arg(long, global = true, default_value = "strategy.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a note script in bot mode.
    Bot {
        /// Note script JSON file.
        #[arg(long)]
        script: PathBuf,

        /// Ticks per second.
        #[arg(long, default_value_t = 60.0)]
        tick_rate: f64,

        /// Seconds to keep ticking after the last note.
        #[arg(long, default_value_t = 1.0)]
        tail: f64,
    },
    /// Replay recorded input frames.
    Replay {
        /// Input frames JSON file.
        #[arg(long)]
        frames: PathBuf,

        /// Note script for frames in bot mode.
        #[arg(long)]
        script: Option<PathBuf>,
    },
    /// Print the binding table and strategy metadata.
    Bindings,
}

#[derive(Serialize)]
struct EventLine {
    tick: u64,
    time: f64,
    mode: Mode,
    #[serde(flatten)]
    event: StrategyEvent,
}

/// Collects strategy events between ticks and writes them out.
struct EventPrinter<W: Write> {
    pending: Rc<RefCell<Vec<StrategyEvent>>>,
    out: W,
    written: usize,
}

impl<W: Write> EventPrinter<W> {
    fn attach(strategy: &mut KeysStrategy, out: W) -> Self {
        let pending = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&pending);
        strategy.subscribe(move |e| sink.borrow_mut().push(*e));
        Self {
            pending,
            out,
            written: 0,
        }
    }

    fn flush_tick(&mut self, tick: u64, time: f64, mode: Mode) -> Result<()> {
        for event in self.pending.borrow_mut().drain(..) {
            let line = EventLine {
                tick,
                time,
                mode,
                event,
            };
            serde_json::to_writer(&mut self.out, &line)?;
            writeln!(self.out)?;
            self.written += 1;
        }
        Ok(())
    }

    fn finish(mut self) -> Result<usize> {
        self.out.flush()?;
        Ok(self.written)
    }
}

fn run_bot(config: StrategyConfig, script: PathBuf, tick_rate: f64, tail: f64) -> Result<()> {
    if !(tick_rate.is_finite() && tick_rate > 0.0) {
        bail!("--tick-rate must be positive, got {tick_rate}");
    }
    let script = NoteScript::load_from(&script)?;
    let end = script.end_time().unwrap_or(0.0) + tail.max(0.0);
    info!("Playing {} notes until {:.3}s at {} Hz", script.len(), end, tick_rate);

    let mut strategy = KeysStrategy::new(config)?;
    strategy.initialize_bot_mode(script);
    strategy.select_mode(Mode::Bot);

    let mut printer = EventPrinter::attach(&mut strategy, BufWriter::new(io::stdout().lock()));
    let clock = ManualClock::new();
    let step = 1.0 / tick_rate;
    let mut tick = 0u64;
    loop {
        let time = clock.song_time();
        let mode = strategy.tick(&NoInput, time)?;
        printer.flush_tick(tick, time, mode)?;
        if time >= end {
            break;
        }
        tick += 1;
        clock.set_time(tick as f64 * step);
    }

    let written = printer.finish()?;
    info!("{} ticks, {} events", tick + 1, written);
    Ok(())
}

fn run_replay(config: StrategyConfig, frames: PathBuf, script: Option<PathBuf>) -> Result<()> {
    let frames = frames::load_frames(&frames)?;
    let mut strategy = KeysStrategy::new(config)?;
    if let Some(path) = script {
        strategy.initialize_bot_mode(NoteScript::load_from(&path)?);
    }

    let mut printer = EventPrinter::attach(&mut strategy, BufWriter::new(io::stdout().lock()));
    let mut source = VirtualInputSource::new();
    for (tick, frame) in frames.iter().enumerate() {
        frame.apply(&mut source);
        strategy.select_mode(frame.mode);
        let mode = strategy.tick(&source, frame.time)?;
        printer.flush_tick(tick as u64, frame.time, mode)?;
    }

    let written = printer.finish()?;
    info!("{} frames, {} events", frames.len(), written);
    Ok(())
}

#[derive(Serialize)]
struct BindingsReport<'a> {
    icon: &'static str,
    track_path: &'static str,
    instruments: &'static [rhythm_input::Instrument],
    bindings: Vec<&'a rhythm_input::BindingDescriptor>,
}

fn run_bindings(config: StrategyConfig) -> Result<()> {
    let strategy = KeysStrategy::new(config)?;
    let report = BindingsReport {
        icon: strategy.icon_name(),
        track_path: strategy.track_path(),
        instruments: strategy.allowed_instruments(),
        bindings: strategy.registry().iter().collect(),
    };
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, &report)?;
    writeln!(out)?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = StrategyConfig::load_from(&args.config)
        .with_context(|| format!("Failed to load config {}", args.config.display()))?;

    match args.command {
        Command::Bot {
            script,
            tick_rate,
            tail,
        } => run_bot(config, script, tick_rate, tail),
        Command::Replay { frames, script } => run_replay(config, frames, script),
        Command::Bindings => run_bindings(config),
    }
}
