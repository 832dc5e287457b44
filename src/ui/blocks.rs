//! Line blocks.
//!
//! A block is a sub-region of a table row that owns a fixed percentage of the
//! terminal width. The set of block kinds is closed: [`ProgressBarBlock`],
//! [`BlankBlock`] and [`InfoBlock`], dispatched through the [`Block`] enum.
//!
//! Every block guards its own content, so a producer can mutate its blocks
//! while the renderer reads them.

use parking_lot::Mutex;
use std::sync::{Arc, OnceLock};

const BLANK: char = ' ';
const OPEN_BRACKET: char = '[';
const CLOSE_BRACKET: char = ']';
const COMPLETE: u32 = 100;

/// Fill symbol used by progress bars unless configured otherwise
pub const DEFAULT_FILL_SYMBOL: char = '=';

/// A block placed on a line, in left-to-right order.
///
/// Each variant holds a shared handle so the producer that owns the block can
/// keep updating it after the line is registered.
#[derive(Debug, Clone)]
pub enum Block {
    ProgressBar(Arc<ProgressBarBlock>),
    Blank(Arc<BlankBlock>),
    Info(Arc<InfoBlock>),
}

impl Block {
    /// Size the block's buffer to `width` characters. Only the first call has an effect.
    pub fn init(&self, width: usize) {
        match self {
            Block::ProgressBar(bar) => bar.init(width),
            Block::Blank(blank) => blank.init(width),
            Block::Info(info) => info.init(width),
        }
    }

    /// Current content of the block
    pub fn content(&self) -> String {
        match self {
            Block::ProgressBar(bar) => bar.content(),
            Block::Blank(blank) => blank.content(),
            Block::Info(info) => info.content(),
        }
    }

    /// Share of the line width assigned at construction
    pub fn percentage(&self) -> u16 {
        match self {
            Block::ProgressBar(bar) => bar.percentage(),
            Block::Blank(blank) => blank.percentage(),
            Block::Info(info) => info.percentage(),
        }
    }
}

impl From<Arc<ProgressBarBlock>> for Block {
    fn from(bar: Arc<ProgressBarBlock>) -> Self {
        Block::ProgressBar(bar)
    }
}

impl From<Arc<BlankBlock>> for Block {
    fn from(blank: Arc<BlankBlock>) -> Self {
        Block::Blank(blank)
    }
}

impl From<Arc<InfoBlock>> for Block {
    fn from(info: Arc<InfoBlock>) -> Self {
        Block::Info(info)
    }
}

// Progress bar

#[derive(Debug, Default)]
struct BarState {
    content: Vec<char>,
    completed: u32,
    initialized: bool,
}

/// Bracketed progress bar, e.g. `[=====     ]`.
///
/// The fill is computed with floor rounding over non-overlapping ranges, so the
/// bar never shows more than the accumulated percentage.
#[derive(Debug)]
pub struct ProgressBarBlock {
    percentage: u16,
    fill_symbol: char,
    state: Mutex<BarState>,
}

impl ProgressBarBlock {
    pub fn new(percentage: u16, fill_symbol: char) -> Self {
        Self {
            percentage,
            fill_symbol,
            state: Mutex::new(BarState::default()),
        }
    }

    pub fn init(&self, width: usize) {
        let mut state = self.state.lock();
        if state.initialized {
            log::warn!("progress bar already initialized, ignoring init({})", width);
            return;
        }
        state.initialized = true;
        state.content = vec![BLANK; width];
        if width >= 2 {
            state.content[0] = OPEN_BRACKET;
            state.content[width - 1] = CLOSE_BRACKET;

            // Progress reported before the bar was placed on a line.
            let filled = fill_index(state.completed, width - 2).min(width - 1);
            let symbol = self.fill_symbol;
            for cell in state.content.iter_mut().take(filled).skip(1) {
                *cell = symbol;
            }
        }
    }

    pub fn content(&self) -> String {
        self.state.lock().content.iter().collect()
    }

    pub fn percentage(&self) -> u16 {
        self.percentage
    }

    /// Advance the bar by `delta` percent.
    ///
    /// Returns `true` when the bar was already complete, in which case nothing
    /// changes. Otherwise fills the interior cells between the previous and the
    /// new floor position and returns `false`.
    pub fn progress(&self, delta: u32) -> bool {
        let mut state = self.state.lock();
        if state.completed >= COMPLETE {
            return true;
        }

        let width = state.content.len();
        if width >= 2 {
            let interior = width - 2;
            // Index 0 holds the opening bracket.
            let from = fill_index(state.completed, interior).max(1);
            let to = fill_index(state.completed.saturating_add(delta), interior).min(width - 1);
            let symbol = self.fill_symbol;
            for cell in state.content.iter_mut().take(to).skip(from) {
                *cell = symbol;
            }
        }

        state.completed = state.completed.saturating_add(delta).min(COMPLETE);
        false
    }

    /// Accumulated percentage, clamped at 100
    pub fn completed(&self) -> u32 {
        self.state.lock().completed
    }

    pub fn is_complete(&self) -> bool {
        self.completed() >= COMPLETE
    }
}

fn fill_index(percentage: u32, interior: usize) -> usize {
    (u64::from(percentage) * interior as u64 / u64::from(COMPLETE)) as usize
}

// Blank

/// Empty spacer; its content never changes after init.
#[derive(Debug)]
pub struct BlankBlock {
    percentage: u16,
    content: OnceLock<String>,
}

impl BlankBlock {
    pub fn new(percentage: u16) -> Self {
        Self {
            percentage,
            content: OnceLock::new(),
        }
    }

    pub fn init(&self, width: usize) {
        if self.content.set(blanks(width)).is_err() {
            log::warn!("blank block already initialized, ignoring init({})", width);
        }
    }

    pub fn content(&self) -> String {
        self.content.get().cloned().unwrap_or_default()
    }

    pub fn percentage(&self) -> u16 {
        self.percentage
    }
}

// Info

#[derive(Debug, Default)]
struct InfoState {
    content: String,
    max_width: usize,
    initialized: bool,
}

/// Free text, padded or truncated to the block width.
#[derive(Debug)]
pub struct InfoBlock {
    percentage: u16,
    state: Mutex<InfoState>,
}

impl InfoBlock {
    pub fn new(percentage: u16) -> Self {
        Self {
            percentage,
            state: Mutex::new(InfoState::default()),
        }
    }

    pub fn init(&self, width: usize) {
        let mut state = self.state.lock();
        if state.initialized {
            log::warn!("info block already initialized, ignoring init({})", width);
            return;
        }
        state.initialized = true;
        state.content = blanks(width);
        state.max_width = width;
    }

    pub fn content(&self) -> String {
        self.state.lock().content.clone()
    }

    pub fn percentage(&self) -> u16 {
        self.percentage
    }

    /// Replace the text. Short text is padded with blanks, long text is cut at
    /// the block width with no ellipsis.
    pub fn update(&self, text: &str) {
        let mut state = self.state.lock();
        state.content = fit_to_width(text, state.max_width);
    }

    pub fn max_width(&self) -> usize {
        self.state.lock().max_width
    }
}

fn blanks(width: usize) -> String {
    std::iter::repeat(BLANK).take(width).collect()
}

fn fit_to_width(text: &str, width: usize) -> String {
    let mut fitted: String = text.chars().take(width).collect();
    let len = fitted.chars().count();
    fitted.push_str(&blanks(width - len));
    fitted
}
