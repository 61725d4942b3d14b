use std::fmt;

use pipes_core::{CanvasSize, CellCoord, Glyph, PipeColor};
use thiserror::Error;

const SGR_RESET: &str = "\x1b[0m";

/// Content of a single canvas cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Cell {
    /// Nothing has been painted since the last clear.
    #[default]
    Blank,
    /// A pipe segment painted in a colour.
    Painted {
        /// Box-drawing glyph occupying the cell.
        glyph: Glyph,
        /// Foreground colour of the glyph.
        color: PipeColor,
    },
}

impl Cell {
    /// Reports whether the cell is blank.
    #[must_use]
    pub const fn is_blank(&self) -> bool {
        matches!(self, Self::Blank)
    }
}

/// Errors reported when writing to the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum CanvasError {
    /// The cell lies outside the canvas.
    #[error(
        "cell ({}, {}) lies outside the {}x{} canvas",
        .cell.column(),
        .cell.row(),
        .size.columns(),
        .size.rows()
    )]
    OutOfBounds {
        /// Cell that was addressed.
        cell: CellCoord,
        /// Dimensions of the canvas.
        size: CanvasSize,
    },
}

/// Fixed-size character grid that pipes paint into.
#[derive(Clone, Debug)]
pub struct Canvas {
    size: CanvasSize,
    cells: Vec<Cell>,
}

impl Canvas {
    /// Creates a canvas with every cell blank.
    #[must_use]
    pub fn new(size: CanvasSize) -> Self {
        Self {
            size,
            cells: vec![Cell::Blank; size.cell_count()],
        }
    }

    /// Dimensions of the canvas.
    #[must_use]
    pub const fn size(&self) -> CanvasSize {
        self.size
    }

    /// Writes a coloured glyph into the cell.
    pub fn set(
        &mut self,
        cell: CellCoord,
        glyph: Glyph,
        color: PipeColor,
    ) -> Result<(), CanvasError> {
        let size = self.size;
        let slot = self
            .index(cell)
            .and_then(|index| self.cells.get_mut(index))
            .ok_or(CanvasError::OutOfBounds { cell, size })?;
        *slot = Cell::Painted { glyph, color };
        Ok(())
    }

    /// Returns the content of the cell, or `None` outside the canvas.
    #[must_use]
    pub fn cell(&self, cell: CellCoord) -> Option<Cell> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Resets every cell to blank.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Blank);
    }

    /// Number of cells that currently hold a glyph.
    #[must_use]
    pub fn painted_cells(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_blank()).count()
    }

    /// Composes the whole canvas as newline-separated rows of styled glyphs.
    ///
    /// The result is a pure function of the canvas contents and is meant to be
    /// written to the terminal in a single call.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.size.contains(cell) {
            return None;
        }
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.size.columns()).ok()?;
        Some(row * width + column)
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = usize::try_from(self.size.columns()).map_err(|_| fmt::Error)?;
        for (index, row) in self.cells.chunks(width).enumerate() {
            if index > 0 {
                f.write_str("\n")?;
            }
            for cell in row {
                match cell {
                    Cell::Blank => f.write_str(" ")?,
                    Cell::Painted { glyph, color } => write!(
                        f,
                        "\x1b[{}m{}{SGR_RESET}",
                        color.sgr_code(),
                        glyph.symbol()
                    )?,
                }
            }
        }
        Ok(())
    }
}
