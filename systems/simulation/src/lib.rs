#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Simulation instance that owns the canvas and drives the pipe systems.
//!
//! A tick snapshots the active pipes, lets the steering system emit one step
//! command per pipe, applies those commands to the world, and then lets the
//! spawning system replace every pipe that left the canvas. The pipe
//! population therefore matches the configured count between ticks.

use std::time::Duration;

use pipes_core::{CanvasSize, Command, Event, RetireCause};
use pipes_system_spawning::{self as spawning, Spawning};
use pipes_system_steering::Steering;
use pipes_world::{self as world, query, World};
use rand::Rng;
use tracing::{debug, trace};

mod config;

pub use config::Config;

/// Running animation: canvas, pipes, systems and the injected random source.
#[derive(Debug)]
pub struct Simulation<R> {
    world: World,
    spawning: Spawning,
    steering: Steering,
    config: Config,
    rng: R,
    ticks_since_reset: u32,
}

impl<R: Rng> Simulation<R> {
    /// Allocates a blank canvas and spawns the configured number of pipes.
    pub fn new(config: Config, canvas: CanvasSize, rng: R) -> Self {
        let spawning = Spawning::new(spawning::Config::new(
            config.color(),
            config.thickness(),
            config.turn_chance(),
        ));
        let mut simulation = Self {
            world: World::new(canvas),
            spawning,
            steering: Steering,
            config,
            rng,
            ticks_since_reset: 0,
        };

        let count = usize::try_from(config.pipe_count()).unwrap_or(usize::MAX);
        let mut commands = Vec::with_capacity(count);
        simulation
            .spawning
            .populate(count, canvas, &mut simulation.rng, &mut commands);
        let events = simulation.execute(commands);
        debug!(
            columns = canvas.columns(),
            rows = canvas.rows(),
            pipes = spawned(&events),
            "simulation started"
        );
        simulation
    }

    /// Steps every active pipe once and replaces the ones that left the canvas.
    pub fn tick(&mut self) {
        let pipes = query::pipe_view(&self.world);
        let mut commands = Vec::with_capacity(pipes.len());
        self.steering.handle(&pipes, &mut self.rng, &mut commands);
        let events = self.execute(commands);
        self.replace_retired(&events);
        self.ticks_since_reset = self.ticks_since_reset.saturating_add(1);

        debug_assert_eq!(
            query::pipe_count(&self.world),
            usize::try_from(self.config.pipe_count()).unwrap_or(usize::MAX)
        );
        trace!(tick = self.ticks_since_reset, "tick complete");
    }

    /// Resets the canvas once the reset interval has elapsed.
    ///
    /// Every pipe is retired and replaced by a fresh edge spawn, the canvas is
    /// cleared, and the tick counter starts over. Returns whether a reset
    /// happened.
    pub fn maybe_reset(&mut self) -> bool {
        if self.ticks_since_reset < self.config.reset_interval() {
            return false;
        }
        self.ticks_since_reset = 0;

        let retirements: Vec<Command> = query::pipe_view(&self.world)
            .iter()
            .map(|pipe| Command::RetirePipe { pipe: pipe.id })
            .collect();
        let events = self.execute(retirements);
        self.replace_retired(&events);
        let _ = self.execute(vec![Command::ClearCanvas]);

        debug!(pipes = query::pipe_count(&self.world), "canvas reset");
        true
    }

    /// Composes the current frame as a single drawable string.
    #[must_use]
    pub fn frame(&self) -> String {
        query::render(&self.world)
    }

    /// Read-only access to the underlying world for queries.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Configuration the simulation was created with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Pause the driver should take between ticks.
    #[must_use]
    pub fn tick_speed(&self) -> Duration {
        self.config.tick_speed()
    }

    /// Ticks taken since the simulation started or was last reset.
    #[must_use]
    pub fn ticks_since_reset(&self) -> u32 {
        self.ticks_since_reset
    }

    fn replace_retired(&mut self, events: &[Event]) {
        let retired = events
            .iter()
            .filter(|event| {
                matches!(
                    event,
                    Event::PipeRetired {
                        cause: RetireCause::LeftCanvas,
                        ..
                    }
                )
            })
            .count();
        if retired > 0 {
            trace!(retired, "pipes left the canvas");
        }

        let mut commands = Vec::new();
        self.spawning.handle(
            events,
            query::canvas_size(&self.world),
            &mut self.rng,
            &mut commands,
        );
        let _ = self.execute(commands);
    }

    fn execute(&mut self, commands: Vec<Command>) -> Vec<Event> {
        let mut events = Vec::new();
        for command in commands {
            world::apply(&mut self.world, command, &mut events);
        }
        events
    }
}

fn spawned(events: &[Event]) -> usize {
    events
        .iter()
        .filter(|event| matches!(event, Event::PipeSpawned { .. }))
        .count()
}
