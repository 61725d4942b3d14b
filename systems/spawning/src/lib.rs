#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Spawning system that places pipes on the canvas edges.
//!
//! Every retirement reported by the world is answered with exactly one spawn
//! command, which keeps the pipe population constant across ticks.

use pipes_core::{
    CanvasSize, CellCoord, Command, Direction, Event, PipeColor, Thickness, TurnChance, PALETTE,
};
use rand::{seq::SliceRandom, Rng};

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    color: Option<PipeColor>,
    thickness: Thickness,
    turn_chance: TurnChance,
}

impl Config {
    /// Creates a configuration applied to every spawned pipe.
    ///
    /// Without a colour override each pipe draws its own colour from the palette.
    #[must_use]
    pub const fn new(
        color: Option<PipeColor>,
        thickness: Thickness,
        turn_chance: TurnChance,
    ) -> Self {
        Self {
            color,
            thickness,
            turn_chance,
        }
    }
}

/// Canvas edge a pipe can enter from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Column zero.
    Left,
    /// The last column.
    Right,
    /// Row zero.
    Top,
    /// The last row.
    Bottom,
}

impl Edge {
    /// Every edge, drawn from uniformly when spawning.
    pub const ALL: [Edge; 4] = [Self::Left, Self::Right, Self::Top, Self::Bottom];

    /// Heading that points from the edge into the canvas.
    #[must_use]
    pub const fn inward(self) -> Direction {
        match self {
            Self::Left => Direction::Right,
            Self::Right => Direction::Left,
            Self::Top => Direction::Down,
            Self::Bottom => Direction::Up,
        }
    }
}

/// Pure system that emits spawn commands.
#[derive(Debug)]
pub struct Spawning {
    config: Config,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Emits `count` spawn commands for an initial population.
    pub fn populate<R>(
        &self,
        count: usize,
        canvas: CanvasSize,
        rng: &mut R,
        out: &mut Vec<Command>,
    ) where
        R: Rng + ?Sized,
    {
        out.extend((0..count).map(|_| self.spawn_command(canvas, rng)));
    }

    /// Emits one replacement spawn command for every retirement in `events`.
    pub fn handle<R>(
        &self,
        events: &[Event],
        canvas: CanvasSize,
        rng: &mut R,
        out: &mut Vec<Command>,
    ) where
        R: Rng + ?Sized,
    {
        for event in events {
            if let Event::PipeRetired { .. } = event {
                out.push(self.spawn_command(canvas, rng));
            }
        }
    }

    fn spawn_command<R>(&self, canvas: CanvasSize, rng: &mut R) -> Command
    where
        R: Rng + ?Sized,
    {
        let color = choose_color(self.config.color, rng);
        let (origin, heading) = spawn_edge(canvas, rng);
        Command::SpawnPipe {
            origin,
            heading,
            color,
            thickness: self.config.thickness,
            turn_chance: self.config.turn_chance,
        }
    }
}

/// Picks a uniformly random edge and a uniformly random cell along it.
///
/// The returned heading points into the canvas.
pub fn spawn_edge<R>(canvas: CanvasSize, rng: &mut R) -> (CellCoord, Direction)
where
    R: Rng + ?Sized,
{
    let edge = Edge::ALL[rng.gen_range(0..Edge::ALL.len())];
    let last_column = canvas.columns() - 1;
    let last_row = canvas.rows() - 1;
    let cell = match edge {
        Edge::Left => CellCoord::new(0, rng.gen_range(0..=last_row)),
        Edge::Right => CellCoord::new(last_column, rng.gen_range(0..=last_row)),
        Edge::Top => CellCoord::new(rng.gen_range(0..=last_column), 0),
        Edge::Bottom => CellCoord::new(rng.gen_range(0..=last_column), last_row),
    };
    (cell, edge.inward())
}

/// Returns the override when present, otherwise a uniformly random palette colour.
pub fn choose_color<R>(color: Option<PipeColor>, rng: &mut R) -> PipeColor
where
    R: Rng + ?Sized,
{
    color.unwrap_or_else(|| *PALETTE.choose(rng).unwrap_or(&PALETTE[0]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_edge_points_inward() {
        for edge in Edge::ALL {
            let heading = edge.inward();
            let axis_matches = match edge {
                Edge::Left | Edge::Right => heading.axis() == pipes_core::Axis::Horizontal,
                Edge::Top | Edge::Bottom => heading.axis() == pipes_core::Axis::Vertical,
            };
            assert!(axis_matches, "{edge:?} -> {heading:?}");
        }
    }
}
