//! Terminal session handling for the animation loop.

use std::io::{self, Stdout, Write};

use crossterm::{cursor, execute, queue, style, terminal};
use tracing::warn;

const FALLBACK_DIMENSIONS: (u16, u16) = (80, 24);

/// Hides the cursor while alive and restores the terminal when dropped.
#[derive(Debug)]
pub(crate) struct TerminalSession {
    out: Stdout,
}

impl TerminalSession {
    /// Hides the cursor on standard output.
    pub(crate) fn start() -> io::Result<Self> {
        let mut out = io::stdout();
        execute!(out, cursor::Hide)?;
        Ok(Self { out })
    }

    /// Homes the cursor and writes `frame` over the previous one.
    pub(crate) fn draw(&mut self, frame: &str) -> io::Result<()> {
        queue!(self.out, cursor::MoveTo(0, 0), style::Print(frame))?;
        self.out.flush()
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            style::ResetColor,
            cursor::Show,
            style::Print("\n")
        );
    }
}

/// Columns and rows available for the canvas.
///
/// Falls back to 80x24 when standard output is not a terminal.
pub(crate) fn dimensions() -> (u16, u16) {
    match terminal::size() {
        Ok(dimensions) => dimensions,
        Err(error) => {
            let (columns, rows) = FALLBACK_DIMENSIONS;
            warn!(%error, columns, rows, "terminal size unavailable, using fallback");
            FALLBACK_DIMENSIONS
        }
    }
}
