#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that animates pipes across the terminal.

mod terminal;

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use clap::Parser;
use pipes_core::{CanvasSize, PipeColor, Thickness};
use pipes_simulation::{Config, Simulation};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use signal_hook::consts::{SIGINT, SIGTERM};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::terminal::TerminalSession;

const LOG_ENV: &str = "PIPES_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";
const SLEEP_SLICE: Duration = Duration::from_millis(25);

/// Command-line arguments accepted by the pipes binary.
#[derive(Debug, Parser)]
#[command(
    name = "pipes",
    version,
    about = "Animated pipes screensaver for the terminal"
)]
struct CliArgs {
    /// Number of pipes kept on screen.
    #[arg(short = 'n', long = "pipes", default_value_t = 1)]
    pipes: u32,
    /// Ticks between full canvas resets.
    #[arg(short = 'r', long = "reset", default_value_t = 2_000)]
    reset: u32,
    /// Seconds to pause between ticks.
    #[arg(short = 's', long = "speed", default_value_t = 0.02)]
    speed: f64,
    /// Colour for every pipe: red, green, yellow, blue, magenta, cyan or white.
    #[arg(short = 'c', long = "color")]
    color: Option<String>,
    /// Draw with thin glyphs instead of bold ones.
    #[arg(short = 't', long = "thin")]
    thin: bool,
    /// One-in-N chance that a pipe turns on each tick.
    #[arg(short = 'p', long = "prob", default_value_t = 10)]
    prob: u32,
    /// Seed for a reproducible animation.
    #[arg(long)]
    seed: Option<u64>,
}

impl CliArgs {
    fn config(&self) -> Result<Config> {
        let thickness = if self.thin {
            Thickness::Thin
        } else {
            Thickness::Bold
        };
        Config::new(
            self.pipes,
            self.reset,
            self.speed,
            color_override(self.color.as_deref()),
            thickness,
            self.prob,
        )
        .context("invalid pipes configuration")
    }

    fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }
}

/// Entry point for the pipes command-line interface.
fn main() -> Result<()> {
    init_logging();

    let args = CliArgs::parse();
    let config = args.config()?;
    let (columns, rows) = terminal::dimensions();
    let canvas = CanvasSize::new(u32::from(columns), u32::from(rows))
        .context("terminal reports an unusable canvas")?;
    let interrupted = register_interrupts()?;

    let mut simulation = Simulation::new(config, canvas, args.rng());
    info!(
        columns,
        rows,
        pipes = config.pipe_count(),
        seed = ?args.seed,
        "starting animation"
    );

    let mut session = TerminalSession::start().context("failed to prepare the terminal")?;
    run(&mut simulation, &mut session, &interrupted)?;
    drop(session);

    info!("interrupted, terminal restored");
    Ok(())
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn register_interrupts() -> Result<Arc<AtomicBool>> {
    let interrupted = Arc::new(AtomicBool::new(false));
    for signal in [SIGINT, SIGTERM] {
        let _ = signal_hook::flag::register(signal, Arc::clone(&interrupted))
            .with_context(|| format!("failed to install handler for signal {signal}"))?;
    }
    Ok(interrupted)
}

fn run<R: Rng>(
    simulation: &mut Simulation<R>,
    session: &mut TerminalSession,
    interrupted: &AtomicBool,
) -> Result<()> {
    while !interrupted.load(Ordering::Relaxed) {
        session
            .draw(&simulation.frame())
            .context("failed to draw frame")?;
        simulation.tick();
        pause(simulation.tick_speed(), interrupted);
        let _ = simulation.maybe_reset();
    }
    Ok(())
}

/// Sleeps for `duration`, waking early once `interrupted` is set.
fn pause(duration: Duration, interrupted: &AtomicBool) {
    let started = Instant::now();
    while !interrupted.load(Ordering::Relaxed) {
        let remaining = duration.saturating_sub(started.elapsed());
        if remaining.is_zero() {
            break;
        }
        thread::sleep(remaining.min(SLEEP_SLICE));
    }
}

fn color_override(name: Option<&str>) -> Option<PipeColor> {
    let name = name?;
    match name.parse::<PipeColor>() {
        Ok(color) => Some(color),
        Err(error) => {
            warn!(%error, "falling back to random pipe colours");
            None
        }
    }
}
