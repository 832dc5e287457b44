// Standard producer row: info text, a spacer and a progress bar

use std::sync::Arc;

use super::blocks::{BlankBlock, Block, InfoBlock, ProgressBarBlock, DEFAULT_FILL_SYMBOL};

const INFO_SHARE: u16 = 40;
const PADDING_SHARE: u16 = 20;
const BAR_SHARE: u16 = 40;
const COMPLETE_STEP: u32 = 100;

/// One producer's row: `InfoBlock` (40%), `BlankBlock` (20%), `ProgressBarBlock` (40%).
///
/// The producer keeps the `ProgressLine` and registers its [`blocks`](Self::blocks)
/// with the window table once.
#[derive(Debug, Clone)]
pub struct ProgressLine {
    info: Arc<InfoBlock>,
    padding: Arc<BlankBlock>,
    bar: Arc<ProgressBarBlock>,
}

impl ProgressLine {
    pub fn new() -> Self {
        Self::with_fill(DEFAULT_FILL_SYMBOL)
    }

    pub fn with_fill(fill_symbol: char) -> Self {
        Self {
            info: Arc::new(InfoBlock::new(INFO_SHARE)),
            padding: Arc::new(BlankBlock::new(PADDING_SHARE)),
            bar: Arc::new(ProgressBarBlock::new(BAR_SHARE, fill_symbol)),
        }
    }

    /// Advance the bar. Returns `true` when it was already complete.
    pub fn progress(&self, percentage: u32) -> bool {
        self.bar.progress(percentage)
    }

    pub fn update_info(&self, info: &str) {
        self.info.update(info);
    }

    pub fn is_complete(&self) -> bool {
        self.bar.is_complete()
    }

    /// Blocks in visual order, ready for `WindowTable::add_line`
    pub fn blocks(&self) -> Vec<Block> {
        vec![
            Block::Info(self.info.clone()),
            Block::Blank(self.padding.clone()),
            Block::ProgressBar(self.bar.clone()),
        ]
    }

    /// Percentage to advance per finished item when a job has `total_items` items.
    ///
    /// Rounds up so the bar always reaches 100 once every item is done.
    pub fn step_percentage(total_items: usize) -> u32 {
        if total_items == 0 {
            return COMPLETE_STEP;
        }
        let total = total_items as u64;
        u64::from(COMPLETE_STEP).div_ceil(total) as u32
    }
}

impl Default for ProgressLine {
    fn default() -> Self {
        Self::new()
    }
}
