//! Registry: process-wide bookkeeping that links categories into a tree
//!
//! Categories are typically long-lived objects created by independent
//! initialization code in no particular order. The registry's two-way
//! scan on registration makes the final tree identical whether parents
//! are constructed before their children or after them.
//!
//! The registry lock is held only for the duration of `add`/`remove` and
//! is independent of the per-category locks, so registering a category
//! never blocks logging on unrelated categories.

use crate::core::category::Category;
use crate::core::level::Level;
use parking_lot::Mutex;
use std::sync::{Arc, OnceLock, Weak};

/// Name of the designated root category
pub const ROOT_CATEGORY: &str = "root";

pub struct Registry {
    root: Arc<Category>,
    live: Mutex<Vec<Weak<Category>>>,
}

impl Registry {
    /// Create a registry with its root category already registered
    ///
    /// The root exists before any other category and is never removed.
    pub fn new() -> Self {
        let root = Category::create(ROOT_CATEGORY.to_string(), None, Level::INFO);
        let registry = Self {
            root: Arc::clone(&root),
            live: Mutex::new(Vec::new()),
        };
        registry.add(&root);
        registry
    }

    /// The process-wide registry instance
    ///
    /// Initialized on first use; safe to leak at process exit.
    pub fn global() -> &'static Registry {
        static GLOBAL: OnceLock<Registry> = OnceLock::new();
        GLOBAL.get_or_init(Registry::new)
    }

    pub fn root(&self) -> &Arc<Category> {
        &self.root
    }

    /// Construct and register a category parented to the root
    ///
    /// If a live category with this name already exists, it is returned
    /// instead of creating a duplicate.
    pub fn category(&self, name: impl Into<String>) -> Arc<Category> {
        self.category_with_parent(name, ROOT_CATEGORY)
    }

    /// Construct and register a category declaring a parent by name
    ///
    /// The parent does not need to exist yet; the edge is created when it
    /// is registered, whichever side arrives second. Lookup and
    /// registration happen under a single acquisition of the registry
    /// lock, so racing declarations of one name converge on one node.
    pub fn category_with_parent(
        &self,
        name: impl Into<String>,
        parent: impl Into<String>,
    ) -> Arc<Category> {
        let name = name.into();
        let mut live = self.live.lock();
        live.retain(|weak| weak.strong_count() > 0);
        if let Some(existing) = Self::find_live(&live, &name) {
            return existing;
        }
        let category = Category::create(name, Some(parent.into()), Level::INFO);
        Self::link_edges(&live, &category);
        live.push(Arc::downgrade(&category));
        category
    }

    /// Look up a live category by name
    pub fn find(&self, name: &str) -> Option<Arc<Category>> {
        Self::find_live(&self.live.lock(), name)
    }

    fn find_live(live: &[Weak<Category>], name: &str) -> Option<Arc<Category>> {
        live.iter()
            .filter_map(Weak::upgrade)
            .find(|category| category.name() == name)
    }

    /// Register a category, resolving tree edges in both directions
    ///
    /// Re-registering an already-live category is a no-op.
    pub(crate) fn add(&self, category: &Arc<Category>) {
        let mut live = self.live.lock();
        live.retain(|weak| weak.strong_count() > 0);
        let registered = live
            .iter()
            .any(|weak| std::ptr::eq(weak.as_ptr(), Arc::as_ptr(category)));
        if registered {
            return;
        }
        Self::link_edges(&live, category);
        live.push(Arc::downgrade(category));
    }

    /// Resolve tree edges for a newcomer against every live category
    ///
    /// Any live category that declared the newcomer as its parent is
    /// linked beneath it (and adopts the newcomer's current level and
    /// sinks, recursively); if the newcomer's declared parent is already
    /// live, the newcomer is linked beneath it and inherits likewise.
    fn link_edges(live: &[Weak<Category>], category: &Arc<Category>) {
        for weak in live.iter() {
            let Some(existing) = weak.upgrade() else {
                continue;
            };
            if existing.parent_name() == Some(category.name()) && existing.parent().is_none() {
                category.link_child(&existing);
            } else if category.parent_name() == Some(existing.name()) && category.parent().is_none()
            {
                existing.link_child(category);
            }
        }
    }

    /// Deregister a category and detach it from its parent
    ///
    /// The removed category's children are deliberately not relinked to
    /// their grandparent; they keep the level and sinks they already
    /// captured and simply stop receiving propagation through the removed
    /// node.
    pub fn remove(&self, category: &Arc<Category>) {
        let mut live = self.live.lock();
        if let Some(parent) = category.parent() {
            parent.unlink_child(category);
        }
        category.clear_parent();
        live.retain(|weak| {
            weak.strong_count() > 0 && !std::ptr::eq(weak.as_ptr(), Arc::as_ptr(category))
        });
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
