//! Generic in-memory table with its own id counter.

use parking_lot::RwLock;
use std::collections::BTreeMap;

use super::models::Id;

struct Inner<T> {
    next_id: Id,
    rows: BTreeMap<Id, T>,
}

/// A single entity table. The map and the counter share one lock, so id
/// assignment and insertion happen as one step.
pub struct Collection<T> {
    inner: RwLock<Inner<T>>,
}

impl<T: Clone> Collection<T> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                next_id: 1,
                rows: BTreeMap::new(),
            }),
        }
    }

    /// Assign the next id, build the row from it and store it
    pub fn insert_with(&self, build: impl FnOnce(Id) -> T) -> T {
        let mut inner = self.inner.write();
        let id = inner.next_id;
        inner.next_id += 1;
        let row = build(id);
        inner.rows.insert(id, row.clone());
        row
    }

    /// Like `insert_with`, but `check` runs against every stored row first
    /// and may veto the insert. No id is consumed when it does.
    pub fn try_insert_with<E>(
        &self,
        check: impl Fn(&T) -> Result<(), E>,
        build: impl FnOnce(Id) -> T,
    ) -> Result<T, E> {
        let mut inner = self.inner.write();
        for existing in inner.rows.values() {
            check(existing)?;
        }
        let id = inner.next_id;
        inner.next_id += 1;
        let row = build(id);
        inner.rows.insert(id, row.clone());
        Ok(row)
    }

    pub fn get(&self, id: Id) -> Option<T> {
        self.inner.read().rows.get(&id).cloned()
    }

    /// Snapshot of every row in id order
    pub fn list(&self) -> Vec<T> {
        self.inner.read().rows.values().cloned().collect()
    }

    pub fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.inner
            .read()
            .rows
            .values()
            .filter(|row| predicate(row))
            .cloned()
            .collect()
    }

    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        self.inner
            .read()
            .rows
            .values()
            .find(|row| predicate(row))
            .cloned()
    }

    /// Mutate a row in place and return the updated copy
    pub fn update(&self, id: Id, change: impl FnOnce(&mut T)) -> Option<T> {
        let mut inner = self.inner.write();
        let row = inner.rows.get_mut(&id)?;
        change(row);
        Some(row.clone())
    }
}

impl<T: Clone> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}
