// Copyright 2025 the Mapframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

/// A set of selected keys plus the most recently selected one and a revision.
///
/// Keys live in a small `Vec<T>` with uniqueness enforced by equality, so no
/// hashing or ordering constraints are imposed on `T`. Iteration order is the
/// order in which keys were added; it is stable within an instance but carries
/// no meaning for the selection itself.
#[derive(Clone, Debug, Default)]
pub struct Selection<T> {
    items: Vec<T>,
    primary: Option<usize>,
    revision: u64,
}

impl<T> Selection<T> {
    /// Creates an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            primary: None,
            revision: 0,
        }
    }

    /// Returns `true` if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of selected keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Selected keys in insertion order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// The most recently selected key, if it is still selected.
    #[must_use]
    pub fn primary(&self) -> Option<&T> {
        self.primary.map(|idx| &self.items[idx])
    }

    /// Monotonically increasing counter, bumped only when the contents or the
    /// primary key actually change.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Removes all keys. Returns `true` if anything was selected.
    pub fn clear(&mut self) -> bool {
        if self.items.is_empty() {
            return false;
        }
        self.items.clear();
        self.primary = None;
        self.bump_revision();
        true
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl<T> Selection<T>
where
    T: PartialEq,
{
    /// Returns `true` if `key` is selected.
    #[must_use]
    pub fn contains(&self, key: &T) -> bool {
        self.position_of(key).is_some()
    }

    /// Replaces the selection with the single `key`.
    ///
    /// Returns the keys that were dropped to make room for it.
    pub fn select_only(&mut self, key: T) -> Vec<T> {
        if self.items.len() == 1 && self.items.first() == Some(&key) {
            return Vec::new();
        }
        let mut dropped = core::mem::take(&mut self.items);
        dropped.retain(|k| k != &key);
        self.items.push(key);
        self.primary = Some(0);
        self.bump_revision();
        dropped
    }

    /// Replaces the selection with a batch of keys, ignoring duplicates.
    ///
    /// The last unique key becomes primary. Returns `true` if the contents changed.
    pub fn replace_with<I>(&mut self, keys: I) -> bool
    where
        I: IntoIterator<Item = T>,
    {
        let mut new_items: Vec<T> = Vec::new();
        for key in keys {
            if !new_items.iter().any(|existing| existing == &key) {
                new_items.push(key);
            }
        }
        let same_members = new_items.len() == self.items.len()
            && new_items.iter().all(|k| self.items.contains(k));
        if same_members {
            return false;
        }
        self.primary = new_items.len().checked_sub(1);
        self.items = new_items;
        self.bump_revision();
        true
    }

    /// Adds `key` if absent and makes it primary. Returns `true` if it was added.
    pub fn add(&mut self, key: T) -> bool {
        if let Some(idx) = self.position_of(&key) {
            if self.primary != Some(idx) {
                self.primary = Some(idx);
                self.bump_revision();
            }
            false
        } else {
            self.items.push(key);
            self.primary = Some(self.items.len() - 1);
            self.bump_revision();
            true
        }
    }

    /// Removes `key` if present. Returns `true` if it was removed.
    pub fn remove(&mut self, key: &T) -> bool {
        match self.position_of(key) {
            Some(idx) => {
                self.remove_at(idx);
                self.bump_revision();
                true
            }
            None => false,
        }
    }

    fn position_of(&self, key: &T) -> Option<usize> {
        self.items.iter().position(|k| k == key)
    }

    fn remove_at(&mut self, idx: usize) -> T {
        let key = self.items.remove(idx);
        self.primary = match self.primary {
            Some(p) if p == idx => None,
            Some(p) if p > idx => Some(p - 1),
            other => other,
        };
        key
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::Selection;

    #[test]
    fn select_only_reports_dropped_keys() {
        let mut sel = Selection::new();
        sel.add(1);
        sel.add(2);
        let dropped = sel.select_only(3);
        assert_eq!(dropped, vec![1, 2]);
        assert_eq!(sel.items(), &[3]);
        assert_eq!(sel.primary(), Some(&3));

        let rev = sel.revision();
        assert!(sel.select_only(3).is_empty());
        assert_eq!(sel.revision(), rev);
    }

    #[test]
    fn replace_with_ignores_order_for_change_detection() {
        let mut sel = Selection::new();
        assert!(sel.replace_with([1, 2, 2, 3]));
        assert_eq!(sel.items(), &[1, 2, 3]);
        assert_eq!(sel.primary(), Some(&3));
        let rev = sel.revision();
        assert!(!sel.replace_with([3, 1, 2]));
        assert_eq!(sel.revision(), rev);
        assert!(sel.replace_with(core::iter::empty()));
        assert!(sel.is_empty());
        assert_eq!(sel.primary(), None);
    }

    #[test]
    fn remove_shifts_primary_index() {
        let mut sel = Selection::new();
        sel.add(10);
        sel.add(20);
        sel.remove(&10);
        assert_eq!(sel.primary(), Some(&20));
        sel.remove(&20);
        assert_eq!(sel.primary(), None);
        assert!(!sel.clear());
    }
}
