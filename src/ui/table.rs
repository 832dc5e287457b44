//! Window table: a fixed block of terminal rows redrawn in place.
//!
//! Lines are appended once and never removed. Each redraw moves the cursor up
//! over the whole table and rewrites every row in a single write, so partial
//! frames never reach the terminal.
//!
//! Locking: the table lock is held during `add_line` and `render`, and block
//! locks are only taken briefly inside it. Producers never take the table lock
//! while holding a block lock.

use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use crossterm::{cursor, Command};
use parking_lot::Mutex;

use super::blocks::Block;
use crate::error::{Error, Result};
use crate::platform::TerminalSession;

const FULL_LINE: u32 = 100;

/// One terminal row: blocks in visual order with their allocated widths.
#[derive(Debug)]
pub struct Line {
    blocks: Vec<(Block, usize)>,
}

impl Line {
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().map(|(block, _)| block)
    }

    /// Allocated width of each block, left to right
    pub fn widths(&self) -> Vec<usize> {
        self.blocks.iter().map(|(_, width)| *width).collect()
    }

    /// Current text of the row
    pub fn render_row(&self) -> String {
        self.blocks.iter().map(|(block, _)| block.content()).collect()
    }
}

struct TableState {
    lines: Vec<Arc<Line>>,
    out: Box<dyn Write + Send>,
}

/// Shared, append-only table of progress lines.
///
/// Hand an `Arc<WindowTable>` to every producer and to the refresh scheduler.
pub struct WindowTable {
    terminal_width: usize,
    state: Mutex<TableState>,
}

impl WindowTable {
    /// Table sized to the session's terminal, drawing to stdout
    pub fn new(session: &TerminalSession) -> Self {
        Self::with_writer(session.width(), io::stdout())
    }

    /// Table drawing to an arbitrary sink
    pub fn with_writer<W>(terminal_width: usize, out: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            terminal_width,
            state: Mutex::new(TableState {
                lines: Vec::new(),
                out: Box::new(out),
            }),
        }
    }

    pub fn terminal_width(&self) -> usize {
        self.terminal_width
    }

    pub fn line_count(&self) -> usize {
        self.state.lock().lines.len()
    }

    /// Register a new row made of `blocks`, given in left-to-right order.
    ///
    /// Each block is initialized with `floor(percentage * width / 100)` columns.
    /// Fails with [`Error::Layout`] if the blocks add up to more than 100% or a
    /// block ends up wider than the terminal; the table is left unchanged.
    /// On success one empty row is emitted to make room for the line.
    pub fn add_line<I>(&self, blocks: I) -> Result<Arc<Line>>
    where
        I: IntoIterator<Item = Block>,
    {
        let mut state = self.state.lock();

        let mut placed = Vec::new();
        let mut used: u32 = 0;
        for block in blocks {
            let percentage = block.percentage();
            let width = allocate_width(percentage, self.terminal_width);
            block.init(width);

            let content_width = block.content().chars().count();
            if content_width > self.terminal_width {
                return Err(Error::layout(format!(
                    "block is {} columns wide but the terminal has {}",
                    content_width, self.terminal_width
                )));
            }

            used += u32::from(percentage);
            if used > FULL_LINE {
                return Err(Error::layout(format!(
                    "line blocks take {}% of the terminal width",
                    used
                )));
            }

            placed.push((block, width));
        }

        state.out.write_all(b"\r\n")?;
        state.out.flush()?;

        let line = Arc::new(Line { blocks: placed });
        state.lines.push(line.clone());
        log::debug!(
            "added line {} with widths {:?}",
            state.lines.len(),
            line.widths()
        );

        Ok(line)
    }

    /// Redraw every line in one write. Does nothing while the table is empty.
    pub fn render(&self) -> Result<()> {
        let mut state = self.state.lock();
        if state.lines.is_empty() {
            return Ok(());
        }

        let frame = compose_frame(&state.lines)
            .map_err(|_| Error::terminal("cannot encode cursor movement"))?;
        state.out.write_all(frame.as_bytes())?;
        state.out.flush()?;
        Ok(())
    }
}

impl fmt::Debug for WindowTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowTable")
            .field("terminal_width", &self.terminal_width)
            .field("lines", &self.line_count())
            .finish()
    }
}

fn allocate_width(percentage: u16, terminal_width: usize) -> usize {
    usize::from(percentage) * terminal_width / FULL_LINE as usize
}

/// Cursor to the first table row, then each row followed by "down one, column 0".
///
/// Cursor moves are always emitted as ANSI sequences so the whole frame stays
/// one write; legacy Windows consoles without VT processing are not supported.
fn compose_frame(lines: &[Arc<Line>]) -> std::result::Result<String, fmt::Error> {
    let mut frame = String::new();
    let rows = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    cursor::MoveToPreviousLine(rows).write_ansi(&mut frame)?;
    for line in lines {
        frame.push_str(&line.render_row());
        cursor::MoveDown(1).write_ansi(&mut frame)?;
        frame.push('\r');
    }
    Ok(frame)
}
