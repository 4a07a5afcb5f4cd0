//! Id-keyed owning collection of entities
//!
//! Iteration is always in ascending id order so passes are reproducible.
//! Passes that remove entities take an id snapshot first (`ids`) or collect
//! removals and apply them afterwards.

use std::collections::BTreeMap;

/// Anything stored in a registry carries its own id
pub trait Identified {
    fn id(&self) -> u32;
    fn set_id(&mut self, id: u32);
}

#[derive(Debug, Clone)]
pub struct Registry<T> {
    items: BTreeMap<u32, T>,
    next_id: u32,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// Fresh ids start at `first_id`; lower ids stay free for fixed entities
    pub fn starting_at(first_id: u32) -> Self {
        Self {
            items: BTreeMap::new(),
            next_id: first_id,
        }
    }

    pub fn get(&self, id: u32) -> Option<&T> {
        self.items.get(&id)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut T> {
        self.items.get_mut(&id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.items.contains_key(&id)
    }

    pub fn remove(&mut self, id: u32) -> Option<T> {
        self.items.remove(&id)
    }

    /// Snapshot of live ids, ascending
    pub fn ids(&self) -> Vec<u32> {
        self.items.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.values_mut()
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        self.items.retain(|_, item| keep(item));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Next id `insert` will hand out
    pub fn peek_next_id(&self) -> u32 {
        self.next_id
    }
}

impl<T: Identified> Registry<T> {
    /// Store `item` under a fresh id and return it
    pub fn insert(&mut self, mut item: T) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        item.set_id(id);
        self.items.insert(id, item);
        id
    }

    /// Store `item` under its own id, returning whatever was displaced
    ///
    /// Fresh ids are bumped past `id` so they never collide with it.
    pub fn insert_with_id(&mut self, item: T) -> Option<T> {
        let id = item.id();
        self.next_id = self.next_id.max(id.saturating_add(1));
        self.items.insert(id, item)
    }

    /// Drop everything and restart id allocation at `first_id`
    pub fn clear(&mut self, first_id: u32) {
        self.items.clear();
        self.next_id = first_id;
    }
}
