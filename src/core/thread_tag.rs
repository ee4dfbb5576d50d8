//! Per-thread ordinal tags
//!
//! Records are annotated with a small, densely increasing identifier
//! instead of the platform's opaque thread ID. The first call on a thread
//! draws the next value from a shared counter and caches it in
//! thread-local storage; every later call is a plain cache hit.

use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};

// Tags start at 1 so 0 can serve as the "not yet drawn" sentinel.
static NEXT_TAG: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static THREAD_TAG: Cell<u64> = const { Cell::new(0) };
}

/// Return this thread's tag, drawing and caching it on first use
///
/// The tag never changes for the life of the thread.
pub fn current_thread_tag() -> u64 {
    THREAD_TAG.with(|cell| {
        let tag = cell.get();
        if tag != 0 {
            return tag;
        }
        let tag = NEXT_TAG.fetch_add(1, Ordering::Relaxed);
        cell.set(tag);
        tag
    })
}
