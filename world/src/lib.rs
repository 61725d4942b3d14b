#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative canvas and pipe state for the pipes animation.

use std::collections::BTreeSet;

use pipes_core::{CanvasSize, Command, Event, PipeId, RetireCause};

mod canvas;
mod pipe;

pub use canvas::{Canvas, CanvasError, Cell};
pub use pipe::{Pipe, StepOutcome, Turn};

/// Represents the authoritative state of a running animation.
#[derive(Debug)]
pub struct World {
    canvas: Canvas,
    pipes: PipeSlots,
}

impl World {
    /// Creates a world with a blank canvas of the provided size and no pipes.
    #[must_use]
    pub fn new(size: CanvasSize) -> Self {
        Self {
            canvas: Canvas::new(size),
            pipes: PipeSlots::default(),
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::SpawnPipe {
            origin,
            heading,
            color,
            thickness,
            turn_chance,
        } => {
            let pipe = Pipe::new(origin, heading, color, thickness, turn_chance);
            if pipe.paint_origin(&mut world.canvas).is_err() {
                out_events.push(Event::SpawnRejected { origin });
                return;
            }

            let id = world.pipes.insert(pipe);
            out_events.push(Event::PipeSpawned {
                pipe: id,
                cell: origin,
                heading,
                color,
            });
        }
        Command::StepPipe { pipe: id, turn } => {
            let Some(pipe) = world.pipes.get_mut(id) else {
                return;
            };

            match pipe.step(&mut world.canvas, turn) {
                StepOutcome::Continued { from, to, turn } => {
                    out_events.push(Event::PipeAdvanced { pipe: id, from, to });
                    if let Some(turn) = turn {
                        out_events.push(Event::PipeTurned {
                            pipe: id,
                            cell: to,
                            from: turn.from,
                            to: turn.to,
                        });
                    }
                }
                StepOutcome::Retired => {
                    let _ = world.pipes.remove(id);
                    out_events.push(Event::PipeRetired {
                        pipe: id,
                        cause: RetireCause::LeftCanvas,
                    });
                }
            }
        }
        Command::RetirePipe { pipe: id } => {
            if world.pipes.remove(id).is_some() {
                out_events.push(Event::PipeRetired {
                    pipe: id,
                    cause: RetireCause::Recycled,
                });
            }
        }
        Command::ClearCanvas => {
            world.canvas.clear();
            out_events.push(Event::CanvasCleared);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use pipes_core::{CanvasSize, PipeId, PipeSnapshot, PipeView};

    use super::{Canvas, Pipe, World};

    /// Provides read-only access to the canvas.
    #[must_use]
    pub fn canvas(world: &World) -> &Canvas {
        &world.canvas
    }

    /// Dimensions of the canvas.
    #[must_use]
    pub fn canvas_size(world: &World) -> CanvasSize {
        world.canvas.size()
    }

    /// Number of pipes currently on the canvas.
    #[must_use]
    pub fn pipe_count(world: &World) -> usize {
        world.pipes.len()
    }

    /// Looks up a single active pipe.
    #[must_use]
    pub fn pipe(world: &World, id: PipeId) -> Option<&Pipe> {
        world.pipes.get(id)
    }

    /// Captures a read-only view of every active pipe in identifier order.
    #[must_use]
    pub fn pipe_view(world: &World) -> PipeView {
        let snapshots = world
            .pipes
            .iter()
            .map(|(id, pipe)| PipeSnapshot {
                id,
                cell: pipe.cell(),
                heading: pipe.heading(),
                color: pipe.color(),
                thickness: pipe.thickness(),
                turn_chance: pipe.turn_chance(),
            })
            .collect();
        PipeView::from_snapshots(snapshots)
    }

    /// Composes the current frame as a single drawable string.
    #[must_use]
    pub fn render(world: &World) -> String {
        world.canvas.render()
    }
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    pipe: Option<Pipe>,
}

/// Slot list holding the active pipes; freed slots are reused lowest-first.
#[derive(Debug, Default)]
struct PipeSlots {
    slots: Vec<Slot>,
    free: BTreeSet<u32>,
    len: usize,
}

impl PipeSlots {
    fn insert(&mut self, pipe: Pipe) -> PipeId {
        self.len += 1;
        if let Some(index) = self.free.pop_first() {
            if let Some(slot) = usize::try_from(index)
                .ok()
                .and_then(|position| self.slots.get_mut(position))
            {
                slot.pipe = Some(pipe);
                return PipeId::new(index, slot.generation);
            }
        }

        let index = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
        self.slots.push(Slot {
            generation: 0,
            pipe: Some(pipe),
        });
        PipeId::new(index, 0)
    }

    fn remove(&mut self, id: PipeId) -> Option<Pipe> {
        let slot = self.slot_mut(id)?;
        let pipe = slot.pipe.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        let _ = self.free.insert(id.slot());
        self.len -= 1;
        Some(pipe)
    }

    fn get(&self, id: PipeId) -> Option<&Pipe> {
        let slot = self.slots.get(usize::try_from(id.slot()).ok()?)?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.pipe.as_ref()
    }

    fn get_mut(&mut self, id: PipeId) -> Option<&mut Pipe> {
        self.slot_mut(id)?.pipe.as_mut()
    }

    fn slot_mut(&mut self, id: PipeId) -> Option<&mut Slot> {
        let slot = self.slots.get_mut(usize::try_from(id.slot()).ok()?)?;
        (slot.generation == id.generation()).then_some(slot)
    }

    fn iter(&self) -> impl Iterator<Item = (PipeId, &Pipe)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            let pipe = slot.pipe.as_ref()?;
            let index = u32::try_from(index).ok()?;
            Some((PipeId::new(index, slot.generation), pipe))
        })
    }

    fn len(&self) -> usize {
        self.len
    }
}
