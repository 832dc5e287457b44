//! Terminal session: raw mode for the lifetime of the progress table.
//!
//! Known limitation: the cursor position query in [`TerminalSession::setup`]
//! blocks until the terminal answers on stdin. It cannot be interrupted by a
//! shutdown signal.

use std::io::{self, Read, Write};

use crossterm::terminal;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

/// Device status report request: "where is the cursor?"
const CURSOR_POSITION_QUERY: &[u8] = b"\x1b[6n";
/// Upper bound for a `ESC[row;colR` reply, digits included
const MAX_REPLY_LEN: usize = 32;

static CURSOR_REPLY: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^\x1b\[(\d+);(\d+)R$").ok());

/// Disables raw mode at most once, on [`release`](Self::release) or on drop.
struct RawModeGuard {
    active: bool,
    disable: fn() -> io::Result<()>,
}

impl RawModeGuard {
    /// Guard for a raw mode that is already on
    fn new(disable: fn() -> io::Result<()>) -> Self {
        Self { active: true, disable }
    }

    fn release(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        (self.disable)()
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            log::error!("failed to restore terminal mode: {}", e);
        }
    }
}

impl std::fmt::Debug for RawModeGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawModeGuard")
            .field("active", &self.active)
            .finish()
    }
}

/// Raw-mode terminal session.
///
/// Raw mode is restored exactly once: by [`close`](Self::close), or by `Drop`
/// when the session goes out of scope on an error path.
#[derive(Debug)]
pub struct TerminalSession {
    width: usize,
    cursor_row: u16,
    cursor_col: u16,
    raw_mode: RawModeGuard,
}

impl TerminalSession {
    /// Read the terminal width, enable raw mode and locate the cursor.
    ///
    /// If anything fails after raw mode was enabled, it is disabled again before
    /// the error is returned.
    pub fn setup() -> Result<Self> {
        let (columns, _rows) = terminal::size()
            .map_err(|e| Error::terminal(format!("cannot read terminal width: {}", e)))?;
        if columns == 0 {
            return Err(Error::terminal("terminal reports zero columns"));
        }

        terminal::enable_raw_mode()
            .map_err(|e| Error::terminal(format!("cannot enable raw mode: {}", e)))?;
        let guard = RawModeGuard::new(terminal::disable_raw_mode);

        Self::locate(columns, guard, &mut io::stdout(), &mut io::stdin().lock())
    }

    /// Finish setup once raw mode is on. Dropping `guard` on failure restores it.
    fn locate<W, R>(columns: u16, guard: RawModeGuard, out: &mut W, input: &mut R) -> Result<Self>
    where
        W: Write,
        R: Read,
    {
        let (row, col) = query_cursor_position(out, input)?;

        log::debug!(
            "terminal session ready: {} columns, cursor at {};{}",
            columns,
            row,
            col
        );
        Ok(Self {
            width: usize::from(columns),
            cursor_row: row,
            cursor_col: col,
            raw_mode: guard,
        })
    }

    /// Terminal width in columns, fixed for the session
    pub fn width(&self) -> usize {
        self.width
    }

    /// Cursor row (1-based) reported by the terminal at setup
    pub fn initial_row(&self) -> u16 {
        self.cursor_row
    }

    /// Cursor column (1-based) reported by the terminal at setup
    pub fn initial_col(&self) -> u16 {
        self.cursor_col
    }

    /// Restore the terminal mode saved at setup.
    pub fn close(mut self) -> Result<()> {
        self.raw_mode.release()?;
        Ok(())
    }
}

/// Ask the terminal for the cursor position and parse its answer.
pub fn query_cursor_position<W, R>(out: &mut W, input: &mut R) -> Result<(u16, u16)>
where
    W: Write,
    R: Read,
{
    out.write_all(CURSOR_POSITION_QUERY)?;
    out.flush()?;

    let reply = read_cursor_reply(input)?;
    parse_cursor_reply(&reply)
}

/// Read bytes up to and including the terminating `R`.
fn read_cursor_reply<R: Read>(input: &mut R) -> Result<String> {
    let mut reply = Vec::with_capacity(MAX_REPLY_LEN);
    let mut byte = [0u8; 1];

    while reply.len() < MAX_REPLY_LEN {
        if input.read(&mut byte)? == 0 {
            return Err(Error::terminal(
                "terminal closed input before answering the cursor position query",
            ));
        }
        reply.push(byte[0]);
        if byte[0] == b'R' {
            return Ok(String::from_utf8_lossy(&reply).into_owned());
        }
    }

    Err(Error::terminal(format!(
        "cursor position reply longer than {} bytes",
        MAX_REPLY_LEN
    )))
}

/// Parse `ESC[row;colR` into `(row, col)`.
pub fn parse_cursor_reply(reply: &str) -> Result<(u16, u16)> {
    let pattern = CURSOR_REPLY
        .as_ref()
        .ok_or_else(|| Error::terminal("cursor reply pattern failed to compile"))?;

    let malformed = || Error::terminal(format!("malformed cursor position reply: {:?}", reply));
    let captures = pattern.captures(reply).ok_or_else(malformed)?;

    let row = captures[1].parse::<u16>().map_err(|_| malformed())?;
    let col = captures[2].parse::<u16>().map_err(|_| malformed())?;
    Ok((row, col))
}
