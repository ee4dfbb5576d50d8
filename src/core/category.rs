//! Category: a named, leveled node in the logging tree
//!
//! Call sites hold an `Arc<Category>` and use it as a guarded unit:
//! check [`Category::is_enabled`], build the caller's fields only when the
//! check passes, then [`Category::emit`]. Configuration (level changes,
//! sink attachment) goes through the same node, optionally applied to the
//! whole subtree.
//!
//! Locking discipline: the node's level lives in an atomic so enablement
//! checks reject without taking any lock; the sink and child sets sit
//! behind a per-node reader/writer lock (emission reads, configuration
//! writes). Recursive operations snapshot the child list and release the
//! node's lock before descending, so no two node locks are ever held at
//! once. The cost is that a recursive operation is not a single atomic
//! snapshot across the subtree; concurrent readers may transiently see a
//! mix of old and new settings on different nodes.

use crate::core::field::{Field, FieldSequence};
use crate::core::level::Level;
use crate::core::sink::Sink;
use crate::core::thread_tag::current_thread_tag;
use chrono::Utc;
use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Weak};

pub struct Category {
    name: String,
    parent_name: Option<String>,
    level: AtomicU8,
    parent: RwLock<Weak<Category>>,
    inner: RwLock<CategoryInner>,
}

#[derive(Default)]
struct CategoryInner {
    sinks: Vec<Arc<dyn Sink>>,
    children: Vec<Arc<Category>>,
}

impl Category {
    pub(crate) fn create(name: String, parent_name: Option<String>, level: Level) -> Arc<Self> {
        Arc::new(Self {
            name,
            parent_name,
            level: AtomicU8::new(level.as_u8()),
            parent: RwLock::new(Weak::new()),
            inner: RwLock::new(CategoryInner::default()),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn parent_name(&self) -> Option<&str> {
        self.parent_name.as_deref()
    }

    pub fn level(&self) -> Level {
        Level::from_u8(self.level.load(Ordering::Relaxed))
    }

    /// Check whether a record at `level` would reach at least one sink
    ///
    /// The level comparison is lock-free; level changes are rare and a
    /// stale read here is an accepted, eventually-consistent tradeoff.
    /// Only when it passes is the read lock taken to consult the sinks.
    pub fn is_enabled(&self, level: Level) -> bool {
        if self.level() < level {
            return false;
        }
        let inner = self.inner.read();
        inner.sinks.iter().any(|sink| sink.is_enabled(level))
    }

    /// Emit one record to every attached sink, in attachment order
    ///
    /// The final field sequence is the caller's fields prefixed by the
    /// current timestamp, this thread's tag, and this category's name.
    /// Every sink re-validates its own enablement, and a sink's failure
    /// never reaches the caller or its sibling sinks.
    pub fn emit(&self, level: Level, fields: FieldSequence) {
        if self.level() < level {
            return;
        }

        let mut record = FieldSequence::with_capacity(fields.len() + 3);
        record.push(Field::timestamp("timestamp", Utc::now()));
        record.push(Field::int("threadid", current_thread_tag() as i64));
        record.push(Field::string("category", &self.name));
        record.extend(fields);

        let inner = self.inner.read();
        for sink in &inner.sinks {
            let _ = sink.record(level, &record);
        }
    }

    /// Emit a plain message as a single `"message"` field
    pub fn log(&self, level: Level, message: impl AsRef<str>) {
        if self.level() < level {
            return;
        }
        self.emit(level, vec![Field::string("message", message)]);
    }

    /// Set this node's level, optionally for every current descendant
    ///
    /// The recursive variant applies to the subtree as it exists at call
    /// time; it is not a live subscription.
    pub fn set_level(&self, level: Level, recursive: bool) {
        self.level.store(level.as_u8(), Ordering::Relaxed);
        if recursive {
            for child in self.subcategories() {
                child.set_level(level, true);
            }
        }
    }

    /// Attach a sink by reference; the category never takes ownership
    pub fn add_sink(&self, sink: Arc<dyn Sink>, recursive: bool) {
        self.inner.write().sinks.push(Arc::clone(&sink));
        if recursive {
            for child in self.subcategories() {
                child.add_sink(Arc::clone(&sink), true);
            }
        }
    }

    /// Detach a sink (matched by reference identity)
    ///
    /// Future records stop reaching it; records already delivered are
    /// unaffected.
    pub fn remove_sink(&self, sink: &Arc<dyn Sink>, recursive: bool) {
        self.inner
            .write()
            .sinks
            .retain(|attached| !Arc::ptr_eq(attached, sink));
        if recursive {
            for child in self.subcategories() {
                child.remove_sink(sink, true);
            }
        }
    }

    pub fn parent(&self) -> Option<Arc<Category>> {
        self.parent.read().upgrade()
    }

    /// Snapshot copy of the current children, not a live view
    pub fn subcategories(&self) -> Vec<Arc<Category>> {
        self.inner.read().children.clone()
    }

    /// Snapshot copy of the currently attached sinks
    pub fn sinks(&self) -> Vec<Arc<dyn Sink>> {
        self.inner.read().sinks.clone()
    }

    /// Link `child` under this node and hand it the node's current
    /// level and sink set, recursively through the child's own subtree.
    ///
    /// Inherited sinks are merged in after any the child already holds;
    /// sinks attached directly to the child survive a late-arriving
    /// parent.
    pub(crate) fn link_child(self: &Arc<Self>, child: &Arc<Category>) {
        *child.parent.write() = Arc::downgrade(self);
        self.inner.write().children.push(Arc::clone(child));
        child.adopt(self.level(), &self.sinks());
    }

    pub(crate) fn unlink_child(&self, child: &Arc<Category>) {
        self.inner
            .write()
            .children
            .retain(|c| !Arc::ptr_eq(c, child));
    }

    pub(crate) fn clear_parent(&self) {
        *self.parent.write() = Weak::new();
    }

    fn adopt(&self, level: Level, sinks: &[Arc<dyn Sink>]) {
        self.level.store(level.as_u8(), Ordering::Relaxed);
        let children = {
            let mut inner = self.inner.write();
            for sink in sinks {
                if !inner.sinks.iter().any(|attached| Arc::ptr_eq(attached, sink)) {
                    inner.sinks.push(Arc::clone(sink));
                }
            }
            inner.children.clone()
        };
        for child in children {
            child.adopt(level, sinks);
        }
    }
}

impl fmt::Debug for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("Category")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("sinks", &inner.sinks.len())
            .field("children", &inner.children.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Result;
    use crate::core::formatter::{Formatter, TextFormatter};
    use parking_lot::Mutex;

    struct MemorySink {
        level: Level,
        lines: Mutex<Vec<String>>,
        formatter: TextFormatter,
    }

    impl MemorySink {
        fn new(level: Level) -> Arc<Self> {
            Arc::new(Self {
                level,
                lines: Mutex::new(Vec::new()),
                formatter: TextFormatter::new(),
            })
        }

        fn lines(&self) -> Vec<String> {
            self.lines.lock().clone()
        }
    }

    impl Sink for MemorySink {
        fn is_enabled(&self, level: Level) -> bool {
            self.level >= level
        }

        fn record(&self, level: Level, fields: &[Field]) -> Result<()> {
            if !self.is_enabled(level) {
                return Ok(());
            }
            self.lines.lock().push(self.formatter.format(fields));
            Ok(())
        }

        fn name(&self) -> &str {
            "memory"
        }
    }

    #[test]
    fn test_enablement_requires_level_and_sink() {
        let cat = Category::create("io".to_string(), None, Level(5));

        // Level passes but no sink is attached.
        assert!(!cat.is_enabled(Level(5)));

        let sink = MemorySink::new(Level(9));
        cat.add_sink(sink, false);
        assert!(cat.is_enabled(Level(5)));
        assert!(!cat.is_enabled(Level(6)));
    }

    #[test]
    fn test_sink_level_gates_enablement() {
        let cat = Category::create("io".to_string(), None, Level(9));
        let sink = MemorySink::new(Level(1));
        cat.add_sink(sink, false);

        assert!(cat.is_enabled(Level(1)));
        assert!(!cat.is_enabled(Level(2)));
    }

    #[test]
    fn test_emit_prefixes_standard_fields() {
        let cat = Category::create("disk".to_string(), None, Level(9));
        let sink = MemorySink::new(Level(9));
        cat.add_sink(Arc::clone(&sink) as Arc<dyn Sink>, false);

        cat.emit(Level(5), vec![Field::string("message", "spun up")]);

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        // timestamp, thread tag, padded category, then the caller's field
        assert!(line.contains('#'));
        assert!(line.contains("disk"));
        assert!(line.ends_with("spun up"));
        let tag_pos = line.find('#').unwrap();
        let cat_pos = line.find("disk").unwrap();
        assert!(tag_pos < cat_pos, "thread tag renders before the category");
    }

    #[test]
    fn test_emit_below_level_is_a_noop() {
        let cat = Category::create("io".to_string(), None, Level(3));
        let sink = MemorySink::new(Level(9));
        cat.add_sink(Arc::clone(&sink) as Arc<dyn Sink>, false);

        cat.log(Level(5), "too verbose");
        assert!(sink.lines().is_empty());
    }

    #[test]
    fn test_sink_revalidates_its_own_level() {
        // The sink is less verbose than the category; delivery must stop
        // at the sink, not at the category.
        let cat = Category::create("io".to_string(), None, Level(9));
        let quiet = MemorySink::new(Level(1));
        let chatty = MemorySink::new(Level(9));
        cat.add_sink(Arc::clone(&quiet) as Arc<dyn Sink>, false);
        cat.add_sink(Arc::clone(&chatty) as Arc<dyn Sink>, false);

        cat.log(Level(5), "routine");
        assert!(quiet.lines().is_empty());
        assert_eq!(chatty.lines().len(), 1);
    }

    #[test]
    fn test_set_level_non_recursive_leaves_children() {
        let parent = Category::create("parent".to_string(), None, Level(5));
        let child = Category::create("child".to_string(), Some("parent".to_string()), Level(5));
        parent.link_child(&child);

        parent.set_level(Level(9), false);
        assert_eq!(parent.level(), Level(9));
        assert_eq!(child.level(), Level(5));
    }

    #[test]
    fn test_set_level_recursive_covers_subtree() {
        let parent = Category::create("parent".to_string(), None, Level(5));
        let child = Category::create("child".to_string(), Some("parent".to_string()), Level(5));
        let grandchild =
            Category::create("grandchild".to_string(), Some("child".to_string()), Level(5));
        parent.link_child(&child);
        child.link_child(&grandchild);

        parent.set_level(Level(2), true);
        assert_eq!(parent.level(), Level(2));
        assert_eq!(child.level(), Level(2));
        assert_eq!(grandchild.level(), Level(2));
    }

    #[test]
    fn test_add_and_remove_sink_recursive() {
        let parent = Category::create("parent".to_string(), None, Level(9));
        let child = Category::create("child".to_string(), Some("parent".to_string()), Level(9));
        parent.link_child(&child);

        let sink: Arc<dyn Sink> = MemorySink::new(Level(9));
        parent.add_sink(Arc::clone(&sink), true);
        assert_eq!(parent.sinks().len(), 1);
        assert_eq!(child.sinks().len(), 1);

        parent.remove_sink(&sink, true);
        assert!(parent.sinks().is_empty());
        assert!(child.sinks().is_empty());
    }

    #[test]
    fn test_link_child_hands_down_level_and_sinks() {
        let parent = Category::create("parent".to_string(), None, Level(7));
        let sink: Arc<dyn Sink> = MemorySink::new(Level(9));
        parent.add_sink(Arc::clone(&sink), false);

        let child = Category::create("child".to_string(), Some("parent".to_string()), Level(5));
        parent.link_child(&child);

        assert_eq!(child.level(), Level(7));
        assert_eq!(child.sinks().len(), 1);
        assert!(child.parent().is_some());
        assert_eq!(parent.subcategories().len(), 1);
    }

    #[test]
    fn test_link_child_keeps_directly_attached_sinks() {
        let parent = Category::create("parent".to_string(), None, Level(7));
        let parent_sink: Arc<dyn Sink> = MemorySink::new(Level(9));
        parent.add_sink(Arc::clone(&parent_sink), false);

        let child = Category::create("child".to_string(), Some("parent".to_string()), Level(5));
        let own_sink: Arc<dyn Sink> = MemorySink::new(Level(9));
        child.add_sink(Arc::clone(&own_sink), false);

        parent.link_child(&child);

        let sinks = child.sinks();
        assert_eq!(sinks.len(), 2);
        assert!(
            Arc::ptr_eq(&sinks[0], &own_sink),
            "own sink keeps its attachment position"
        );
        assert!(Arc::ptr_eq(&sinks[1], &parent_sink));
    }

    #[test]
    fn test_link_child_does_not_duplicate_shared_sink() {
        let parent = Category::create("parent".to_string(), None, Level(7));
        let shared: Arc<dyn Sink> = MemorySink::new(Level(9));
        parent.add_sink(Arc::clone(&shared), false);

        let child = Category::create("child".to_string(), Some("parent".to_string()), Level(5));
        child.add_sink(Arc::clone(&shared), false);

        parent.link_child(&child);
        assert_eq!(child.sinks().len(), 1);
    }
}
