//! Concrete sink implementations

pub mod console;
pub mod file;

pub use console::{ConsoleSink, ConsoleTarget};
pub use file::FileSink;

// Re-export the contract for convenience
pub use crate::core::{FlushPolicy, Sink};
