#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the pipes animation engine.
//!
//! This crate defines the message surface that connects the simulation
//! driver, the authoritative world, and pure systems. Systems read
//! [`PipeView`] snapshots and respond with [`Command`] batches, the world
//! executes those commands via its `apply` entry point, and then broadcasts
//! [`Event`] values that systems react to deterministically.

use std::{fmt, num::NonZeroU32, str::FromStr};

use thiserror::Error;

/// Number of colours a pipe may be assigned when no override is configured.
pub const PALETTE_LEN: usize = 6;

/// Colours drawn uniformly at random when no colour override is configured.
pub const PALETTE: [PipeColor; PALETTE_LEN] = [
    PipeColor::Red,
    PipeColor::Green,
    PipeColor::Yellow,
    PipeColor::Blue,
    PipeColor::Magenta,
    PipeColor::Cyan,
];

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Requests that a new pipe enter the canvas at the provided cell.
    SpawnPipe {
        /// Cell the pipe occupies when it appears.
        origin: CellCoord,
        /// Direction the pipe travels in once it starts stepping.
        heading: Direction,
        /// Colour applied to every glyph the pipe paints.
        color: PipeColor,
        /// Glyph weight used for every glyph the pipe paints.
        thickness: Thickness,
        /// Likelihood that the pipe attempts a turn on each step.
        turn_chance: TurnChance,
    },
    /// Requests that a pipe advance a single cell, optionally turning afterwards.
    StepPipe {
        /// Identifier of the pipe that should advance.
        pipe: PipeId,
        /// Direction the pipe should turn towards after painting its new cell.
        turn: Option<Direction>,
    },
    /// Requests that a pipe be withdrawn from the canvas so it can be replaced.
    RetirePipe {
        /// Identifier of the pipe to withdraw.
        pipe: PipeId,
    },
    /// Requests that every canvas cell be reset to blank.
    ClearCanvas,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that a pipe entered the canvas.
    PipeSpawned {
        /// Identifier allocated to the pipe.
        pipe: PipeId,
        /// Cell the pipe occupies after spawning.
        cell: CellCoord,
        /// Direction the pipe travels in.
        heading: Direction,
        /// Colour assigned to the pipe.
        color: PipeColor,
    },
    /// Reports that a spawn request named a cell outside the canvas.
    SpawnRejected {
        /// Cell provided in the spawn request.
        origin: CellCoord,
    },
    /// Confirms that a pipe moved between two cells and painted the destination.
    PipeAdvanced {
        /// Identifier of the pipe that advanced.
        pipe: PipeId,
        /// Cell the pipe occupied before moving.
        from: CellCoord,
        /// Cell the pipe occupies after moving.
        to: CellCoord,
    },
    /// Confirms that a pipe switched axis and painted a corner glyph.
    PipeTurned {
        /// Identifier of the pipe that turned.
        pipe: PipeId,
        /// Cell that received the corner glyph.
        cell: CellCoord,
        /// Heading before the turn.
        from: Direction,
        /// Heading after the turn.
        to: Direction,
    },
    /// Confirms that a pipe was removed from the canvas.
    PipeRetired {
        /// Identifier of the pipe that was removed.
        pipe: PipeId,
        /// Reason the pipe was removed.
        cause: RetireCause,
    },
    /// Confirms that every canvas cell was reset to blank.
    CanvasCleared,
}

/// Reasons a pipe leaves the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RetireCause {
    /// The pipe's next step would have left the canvas bounds.
    LeftCanvas,
    /// The pipe was withdrawn as part of a population refresh.
    Recycled,
}

/// Cardinal directions available to pipes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing column indices.
    Right,
    /// Movement toward decreasing column indices.
    Left,
}

impl Direction {
    /// Every direction in a stable order.
    pub const ALL: [Direction; 4] = [Self::Down, Self::Up, Self::Right, Self::Left];

    /// Axis the direction travels along.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Down | Self::Up => Axis::Vertical,
            Self::Right | Self::Left => Axis::Horizontal,
        }
    }

    /// Directions a pipe heading this way may turn towards.
    #[must_use]
    pub const fn perpendicular(self) -> [Direction; 2] {
        self.axis().other().directions()
    }

    /// Reports whether the other direction lies on the opposite axis.
    #[must_use]
    pub fn is_perpendicular_to(self, other: Direction) -> bool {
        self.axis() != other.axis()
    }

    /// Returns the neighbouring cell one unit away in this direction.
    ///
    /// Yields `None` when the step would underflow past row or column zero.
    #[must_use]
    pub fn advance(self, cell: CellCoord) -> Option<CellCoord> {
        let (column, row) = (cell.column(), cell.row());
        match self {
            Self::Down => row.checked_add(1).map(|row| CellCoord::new(column, row)),
            Self::Up => row.checked_sub(1).map(|row| CellCoord::new(column, row)),
            Self::Right => column.checked_add(1).map(|column| CellCoord::new(column, row)),
            Self::Left => column.checked_sub(1).map(|column| CellCoord::new(column, row)),
        }
    }
}

/// Axis of travel; a pipe is always travelling along exactly one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Travelling up or down.
    Vertical,
    /// Travelling left or right.
    Horizontal,
}

impl Axis {
    /// The axis a turn switches to.
    #[must_use]
    pub const fn other(self) -> Axis {
        match self {
            Self::Vertical => Self::Horizontal,
            Self::Horizontal => Self::Vertical,
        }
    }

    /// The two directions that travel along this axis.
    #[must_use]
    pub const fn directions(self) -> [Direction; 2] {
        match self {
            Self::Vertical => [Direction::Down, Direction::Up],
            Self::Horizontal => [Direction::Right, Direction::Left],
        }
    }
}

/// Terminal foreground colour applied to a pipe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PipeColor {
    /// ANSI red.
    Red,
    /// ANSI green.
    Green,
    /// ANSI yellow.
    Yellow,
    /// ANSI blue.
    Blue,
    /// ANSI magenta.
    Magenta,
    /// ANSI cyan.
    Cyan,
    /// ANSI white. Only reachable through an explicit override.
    White,
}

impl PipeColor {
    /// SGR parameter selecting the colour as a foreground.
    #[must_use]
    pub const fn sgr_code(self) -> u8 {
        match self {
            Self::Red => 31,
            Self::Green => 32,
            Self::Yellow => 33,
            Self::Blue => 34,
            Self::Magenta => 35,
            Self::Cyan => 36,
            Self::White => 37,
        }
    }

    /// Upper-case name accepted on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Red => "RED",
            Self::Green => "GREEN",
            Self::Yellow => "YELLOW",
            Self::Blue => "BLUE",
            Self::Magenta => "MAGENTA",
            Self::Cyan => "CYAN",
            Self::White => "WHITE",
        }
    }
}

impl fmt::Display for PipeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PipeColor {
    type Err = UnknownColor;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        [
            Self::Red,
            Self::Green,
            Self::Yellow,
            Self::Blue,
            Self::Magenta,
            Self::Cyan,
            Self::White,
        ]
        .into_iter()
        .find(|color| color.name().eq_ignore_ascii_case(trimmed))
        .ok_or_else(|| UnknownColor(trimmed.to_owned()))
    }
}

/// Returned when a colour name does not match any [`PipeColor`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown pipe color '{0}'")]
pub struct UnknownColor(pub String);

/// Weight of the box-drawing glyph set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Thickness {
    /// Light box-drawing characters.
    Thin,
    /// Heavy box-drawing characters.
    #[default]
    Bold,
}

/// Outline of a glyph independent of its weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// `│` / `┃`
    Vertical,
    /// `─` / `━`
    Horizontal,
    /// `┌` / `┏`
    DownAndRight,
    /// `┐` / `┓`
    DownAndLeft,
    /// `└` / `┗`
    UpAndRight,
    /// `┘` / `┛`
    UpAndLeft,
}

impl Shape {
    /// Straight segment drawn while travelling in the provided direction.
    #[must_use]
    pub const fn straight(heading: Direction) -> Shape {
        match heading.axis() {
            Axis::Vertical => Self::Vertical,
            Axis::Horizontal => Self::Horizontal,
        }
    }

    /// Corner drawn when a pipe turns from `from` to `to`.
    ///
    /// Returns `None` for reversals and same-axis pairs, which are not turns.
    #[must_use]
    pub const fn corner(from: Direction, to: Direction) -> Option<Shape> {
        use Direction::{Down, Left, Right, Up};

        match (from, to) {
            (Up, Right) | (Left, Up) => Some(Self::UpAndRight),
            (Up, Left) | (Right, Up) => Some(Self::UpAndLeft),
            (Down, Right) | (Left, Down) => Some(Self::DownAndRight),
            (Down, Left) | (Right, Down) => Some(Self::DownAndLeft),
            _ => None,
        }
    }

    /// Reports whether the shape is one of the four corners.
    #[must_use]
    pub const fn is_corner(self) -> bool {
        !matches!(self, Self::Vertical | Self::Horizontal)
    }
}

/// A shape rendered at a particular weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Glyph {
    shape: Shape,
    thickness: Thickness,
}

impl Glyph {
    /// Creates a glyph from its outline and weight.
    #[must_use]
    pub const fn new(shape: Shape, thickness: Thickness) -> Self {
        Self { shape, thickness }
    }

    /// Outline of the glyph.
    #[must_use]
    pub const fn shape(&self) -> Shape {
        self.shape
    }

    /// Weight of the glyph.
    #[must_use]
    pub const fn thickness(&self) -> Thickness {
        self.thickness
    }

    /// Box-drawing character that represents the glyph.
    #[must_use]
    pub const fn symbol(&self) -> char {
        match (self.thickness, self.shape) {
            (Thickness::Thin, Shape::Vertical) => '│',
            (Thickness::Thin, Shape::Horizontal) => '─',
            (Thickness::Thin, Shape::DownAndRight) => '┌',
            (Thickness::Thin, Shape::DownAndLeft) => '┐',
            (Thickness::Thin, Shape::UpAndRight) => '└',
            (Thickness::Thin, Shape::UpAndLeft) => '┘',
            (Thickness::Bold, Shape::Vertical) => '┃',
            (Thickness::Bold, Shape::Horizontal) => '━',
            (Thickness::Bold, Shape::DownAndRight) => '┏',
            (Thickness::Bold, Shape::DownAndLeft) => '┓',
            (Thickness::Bold, Shape::UpAndRight) => '┗',
            (Thickness::Bold, Shape::UpAndLeft) => '┛',
        }
    }
}

/// Location of a single canvas cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new canvas cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Dimensions of the canvas measured in character cells.
///
/// Both dimensions are at least one and stay fixed for a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CanvasSize {
    columns: u32,
    rows: u32,
}

impl CanvasSize {
    /// Creates a canvas size, rejecting zero-sized dimensions.
    pub fn new(columns: u32, rows: u32) -> Result<Self, ConfigError> {
        if columns == 0 || rows == 0 {
            return Err(ConfigError::EmptyCanvas { columns, rows });
        }
        Ok(Self { columns, rows })
    }

    /// Number of columns (the width).
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows (the height).
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Reports whether the cell lies inside the canvas.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Reports whether the cell lies on one of the four canvas edges.
    #[must_use]
    pub const fn is_edge(&self, cell: CellCoord) -> bool {
        self.contains(cell)
            && (cell.column() == 0
                || cell.row() == 0
                || cell.column() == self.columns - 1
                || cell.row() == self.rows - 1)
    }

    /// Total number of cells covered by the canvas.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        let count = u64::from(self.columns) * u64::from(self.rows);
        usize::try_from(count).unwrap_or(usize::MAX)
    }
}

/// Handle addressing a pipe stored in the world's slot list.
///
/// The generation distinguishes successive pipes that reuse the same slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PipeId {
    slot: u32,
    generation: u32,
}

impl PipeId {
    /// Creates a new pipe identifier.
    #[must_use]
    pub const fn new(slot: u32, generation: u32) -> Self {
        Self { slot, generation }
    }

    /// Slot index occupied by the pipe.
    #[must_use]
    pub const fn slot(&self) -> u32 {
        self.slot
    }

    /// Number of pipes that occupied the slot before this one.
    #[must_use]
    pub const fn generation(&self) -> u32 {
        self.generation
    }
}

/// One-in-N likelihood that a pipe attempts a turn on a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TurnChance(NonZeroU32);

impl TurnChance {
    /// Creates a turn chance of one in `denominator`.
    pub fn one_in(denominator: u32) -> Result<Self, ConfigError> {
        NonZeroU32::new(denominator)
            .map(Self)
            .ok_or(ConfigError::ZeroTurnChance)
    }

    /// A chance that fires on every step.
    #[must_use]
    pub const fn always() -> Self {
        Self(NonZeroU32::MIN)
    }

    /// Denominator of the one-in-N chance.
    #[must_use]
    pub const fn denominator(&self) -> u32 {
        self.0.get()
    }
}

impl Default for TurnChance {
    fn default() -> Self {
        Self(NonZeroU32::new(10).unwrap_or(NonZeroU32::MIN))
    }
}

/// Immutable representation of a single pipe's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PipeSnapshot {
    /// Identifier allocated to the pipe.
    pub id: PipeId,
    /// Cell the pipe most recently painted.
    pub cell: CellCoord,
    /// Direction the pipe travels in.
    pub heading: Direction,
    /// Colour of the pipe's glyphs.
    pub color: PipeColor,
    /// Weight of the pipe's glyphs.
    pub thickness: Thickness,
    /// Likelihood that the pipe turns on a step.
    pub turn_chance: TurnChance,
}

/// Read-only snapshot describing every active pipe.
#[derive(Clone, Debug, Default)]
pub struct PipeView {
    snapshots: Vec<PipeSnapshot>,
}

impl PipeView {
    /// Creates a new pipe view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<PipeSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured pipe snapshots in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &PipeSnapshot> {
        self.snapshots.iter()
    }

    /// Number of pipes captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view captured no pipes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<PipeSnapshot> {
        self.snapshots
    }
}

/// Reasons a simulation configuration is rejected.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// At least one pipe must be active.
    #[error("pipe count must be at least 1")]
    ZeroPipeCount,
    /// The reset interval must span at least one tick.
    #[error("reset interval must be at least 1 tick")]
    ZeroResetInterval,
    /// A one-in-zero chance is meaningless.
    #[error("turn chance denominator must be at least 1")]
    ZeroTurnChance,
    /// The pause between ticks must be a positive, finite number of seconds.
    #[error("tick speed must be a positive number of seconds, got {seconds}")]
    InvalidTickSpeed {
        /// Value that was supplied.
        seconds: f64,
    },
    /// The canvas needs at least one cell.
    #[error("canvas must be at least 1x1, got {columns}x{rows}")]
    EmptyCanvas {
        /// Requested number of columns.
        columns: u32,
        /// Requested number of rows.
        rows: u32,
    },
}
