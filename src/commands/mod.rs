// Command handlers module
pub mod config;
pub mod demo;
pub mod version;

// Re-exports for cleaner imports
pub use demo::execute as demo;
pub use version::execute as version;
