// UI module: the progress table and its blocks

pub mod blocks;
pub mod progress;
pub mod table;

// Re-export commonly used items for cleaner imports
pub use blocks::{BlankBlock, Block, InfoBlock, ProgressBarBlock, DEFAULT_FILL_SYMBOL};
pub use progress::ProgressLine;
pub use table::{Line, WindowTable};
