use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// In-memory terminal that can be shared with a `WindowTable`
#[derive(Clone, Default)]
pub struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }

    /// Number of redraws of a table with `lines` rows written so far
    pub fn frames(&self, lines: usize) -> usize {
        self.text().matches(&cursor_up(lines)).count()
    }

    /// Rows written by the most recent redraw, after its cursor-up sequence
    pub fn last_frame(&self, lines: usize) -> Option<String> {
        let text = self.text();
        let marker = cursor_up(lines);
        let start = text.rfind(&marker)?;
        Some(text[start + marker.len()..].to_string())
    }
}

fn cursor_up(lines: usize) -> String {
    format!("\x1b[{}F", lines)
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Sink that works until `break_pipe` is called, then refuses every write
#[derive(Clone, Default)]
pub struct FlakyPipe(Arc<AtomicBool>);

impl FlakyPipe {
    pub fn break_pipe(&self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

impl Write for FlakyPipe {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.0.load(Ordering::SeqCst) {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal went away"));
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
