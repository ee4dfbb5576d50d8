//! # Logtree
//!
//! A hierarchical, thread-safe logging framework built around a tree of
//! named categories, each independently leveled and routable to one or
//! more sinks.
//!
//! ## Features
//!
//! - **Category Tree**: Per-category levels and sinks with recursive
//!   propagation to subtrees
//! - **Order-Independent Construction**: Categories link into the tree
//!   correctly no matter which is constructed first
//! - **Multiple Sinks**: Console, file, and custom sinks sharing one
//!   polymorphic contract
//! - **Thread Safe**: Lock-free enablement fast path, per-node
//!   reader/writer locking, serialized sink output

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        current_thread_tag, Category, Field, FieldSequence, FieldValue, FlushPolicy, Formatter,
        JsonFormatter, Level, LoggerError, Registry, Result, Sink, TextFormatter, TimestampFormat,
        CATEGORY_PAD_WIDTH, THREAD_TAG_PREFIX,
    };
    pub use crate::sinks::{ConsoleSink, FileSink};
}

pub use crate::core::{
    current_thread_tag, Category, Field, FieldSequence, FieldValue, FlushPolicy, Formatter,
    JsonFormatter, Level, LoggerError, Registry, Result, Sink, TextFormatter, TimestampFormat,
    CATEGORY_PAD_WIDTH, THREAD_TAG_PREFIX,
};
pub use crate::sinks::{ConsoleSink, FileSink};

/// Shorthand for the process-wide root category.
pub fn root() -> std::sync::Arc<Category> {
    Registry::global().root().clone()
}

/// Shorthand for constructing (or re-declaring) a category under the
/// process-wide registry, parented to the root.
pub fn category(name: impl Into<String>) -> std::sync::Arc<Category> {
    Registry::global().category(name)
}
