#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Steering system that advances every pipe and decides when it turns.

use pipes_core::{Command, Direction, PipeView, TurnChance};
use rand::Rng;

/// Pure system that emits one step command per active pipe.
#[derive(Debug, Default)]
pub struct Steering;

impl Steering {
    /// Emits a step command for every pipe in `pipes`, in snapshot order.
    ///
    /// Each pipe rolls its own turn chance before stepping; the world discards
    /// the turn when the step takes the pipe off the canvas.
    pub fn handle<R>(&self, pipes: &PipeView, rng: &mut R, out: &mut Vec<Command>)
    where
        R: Rng + ?Sized,
    {
        for pipe in pipes.iter() {
            let turn = decide_turn(pipe.heading, pipe.turn_chance, rng);
            out.push(Command::StepPipe {
                pipe: pipe.id,
                turn,
            });
        }
    }
}

/// Rolls a one-in-N chance: a uniform draw over `0..N` that fires on zero.
pub fn rolls_turn<R>(chance: TurnChance, rng: &mut R) -> bool
where
    R: Rng + ?Sized,
{
    rng.gen_range(0..chance.denominator()) == 0
}

/// Decides whether a pipe heading `heading` turns, and towards which direction.
///
/// A turn always switches axis; both directions on the new axis are equally likely.
pub fn decide_turn<R>(heading: Direction, chance: TurnChance, rng: &mut R) -> Option<Direction>
where
    R: Rng + ?Sized,
{
    if !rolls_turn(chance, rng) {
        return None;
    }
    let options = heading.perpendicular();
    Some(options[rng.gen_range(0..options.len())])
}
