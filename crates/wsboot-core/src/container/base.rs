//! Generic id-keyed registry.
//!
//! Shared storage behind the endpoint container: thread-safe, duplicate
//! checked on insert, and able to hand back whatever already holds an id.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

/// Trait for items that can be stored in a registry.
///
/// Each registerable item must provide a unique ID.
pub trait Registerable: Send + Sync {
    /// Returns the unique identifier for this item.
    fn registry_id(&self) -> &str;
}

/// Registry of items keyed by [`Registerable::registry_id`].
pub struct BaseRegistry<T: ?Sized + Registerable> {
    items: DashMap<String, Arc<T>>,
}

impl<T: ?Sized + Registerable> BaseRegistry<T> {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            items: DashMap::new(),
        }
    }

    /// Register an item.
    ///
    /// When the ID is taken the registry is left untouched and the item
    /// already holding it is returned as the error.
    pub fn register(&self, item: Arc<T>) -> Result<(), Arc<T>> {
        match self.items.entry(item.registry_id().to_string()) {
            Entry::Occupied(entry) => Err(entry.get().clone()),
            Entry::Vacant(entry) => {
                entry.insert(item);
                Ok(())
            }
        }
    }

    /// Get an item by ID.
    pub fn get(&self, id: &str) -> Option<Arc<T>> {
        self.items.get(id).map(|item| item.clone())
    }

    /// Check if an item with the given ID is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over all items in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = Arc<T>> + '_ {
        self.items.iter().map(|entry| entry.value().clone())
    }

    /// Remove every item.
    pub fn clear(&self) {
        self.items.clear();
    }
}

impl<T: ?Sized + Registerable> Default for BaseRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}
