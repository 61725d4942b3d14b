use pipes_core::{Axis, CellCoord, Direction, Glyph, PipeColor, Shape, Thickness, TurnChance};

use crate::canvas::{Canvas, CanvasError};

/// Result of advancing a pipe by one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The pipe painted its new cell and remains on the canvas.
    Continued {
        /// Cell the pipe occupied before the step.
        from: CellCoord,
        /// Cell the pipe painted during the step.
        to: CellCoord,
        /// Direction change applied after painting, if any.
        turn: Option<Turn>,
    },
    /// The next cell lies outside the canvas; the pipe must be replaced.
    Retired,
}

/// A committed change of heading between perpendicular directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Turn {
    /// Heading before the turn.
    pub from: Direction,
    /// Heading after the turn.
    pub to: Direction,
}

/// A single trail-drawing entity travelling across the canvas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pipe {
    cell: CellCoord,
    heading: Direction,
    color: PipeColor,
    thickness: Thickness,
    turn_chance: TurnChance,
}

impl Pipe {
    /// Creates a pipe at `origin` travelling towards `heading`.
    #[must_use]
    pub const fn new(
        origin: CellCoord,
        heading: Direction,
        color: PipeColor,
        thickness: Thickness,
        turn_chance: TurnChance,
    ) -> Self {
        Self {
            cell: origin,
            heading,
            color,
            thickness,
            turn_chance,
        }
    }

    /// Cell the pipe most recently painted.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        self.cell
    }

    /// Direction the pipe travels in.
    #[must_use]
    pub const fn heading(&self) -> Direction {
        self.heading
    }

    /// Axis the pipe is currently travelling along.
    #[must_use]
    pub const fn axis(&self) -> Axis {
        self.heading.axis()
    }

    /// Colour of every glyph the pipe paints.
    #[must_use]
    pub const fn color(&self) -> PipeColor {
        self.color
    }

    /// Weight of every glyph the pipe paints.
    #[must_use]
    pub const fn thickness(&self) -> Thickness {
        self.thickness
    }

    /// One-in-N chance that the pipe turns on a step.
    #[must_use]
    pub const fn turn_chance(&self) -> TurnChance {
        self.turn_chance
    }

    /// Reports whether the pipe's cell lies inside the canvas.
    #[must_use]
    pub const fn is_in_bounds(&self, canvas: &Canvas) -> bool {
        canvas.size().contains(self.cell)
    }

    /// Paints the straight segment for the current heading at the pipe's cell.
    pub fn paint_origin(&self, canvas: &mut Canvas) -> Result<(), CanvasError> {
        canvas.set(self.cell, self.glyph(Shape::straight(self.heading)), self.color)
    }

    /// Advances one cell, paints it, and applies `turn` when it is perpendicular.
    ///
    /// Nothing is written when the next cell lies outside the canvas.
    pub fn step(&mut self, canvas: &mut Canvas, turn: Option<Direction>) -> StepOutcome {
        let from = self.cell;
        let Some(to) = self
            .heading
            .advance(from)
            .filter(|cell| canvas.size().contains(*cell))
        else {
            return StepOutcome::Retired;
        };

        let straight = self.glyph(Shape::straight(self.heading));
        if canvas.set(to, straight, self.color).is_err() {
            return StepOutcome::Retired;
        }
        self.cell = to;

        let turn = turn.and_then(|next| self.turn(canvas, next));
        StepOutcome::Continued { from, to, turn }
    }

    fn turn(&mut self, canvas: &mut Canvas, next: Direction) -> Option<Turn> {
        let corner = Shape::corner(self.heading, next)?;
        canvas.set(self.cell, self.glyph(corner), self.color).ok()?;
        let from = std::mem::replace(&mut self.heading, next);
        Some(Turn { from, to: next })
    }

    const fn glyph(&self, shape: Shape) -> Glyph {
        Glyph::new(shape, self.thickness)
    }
}
