//! Sink trait: the polymorphic output capability for log records

use crate::core::error::Result;
use crate::core::field::Field;
use crate::core::level::Level;

/// When a stream-backed sink pushes bytes to the underlying stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlushPolicy {
    /// Flush after every record (default)
    #[default]
    Immediate,
    /// Leave flushing to the stream's own buffering
    Buffered,
}

/// A capability that accepts log records and renders/persists them
///
/// One sink may be attached to many categories simultaneously, so all
/// methods take `&self` and implementations serialize concurrent writers
/// internally (a single mutex around format + write + flush), guaranteeing
/// two records are never interleaved byte-by-byte in the output.
///
/// `record` re-checks enablement itself: a category forwards to every
/// attached sink, and each sink independently decides whether to act,
/// because its own level may differ from that of the forwarding category.
pub trait Sink: Send + Sync {
    /// Pure predicate, safe to call concurrently from many categories
    fn is_enabled(&self, level: Level) -> bool;

    /// Accept one record for output
    ///
    /// Errors are sink-local: callers on the emission path ignore the
    /// result so a failed sink never disturbs its siblings or the
    /// emitting thread.
    fn record(&self, level: Level, fields: &[Field]) -> Result<()>;

    fn name(&self) -> &str;
}
