// Copyright 2025 the Mapframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use crate::Selection;

/// How a toggle interacts with the rest of the selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum SelectionPolicy {
    /// Selecting a shape deselects every other shape.
    Single,
    /// Shapes are toggled independently, up to the configured cap.
    #[default]
    Multi,
}

/// Result of [`SelectionMachine::toggle`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToggleOutcome<K> {
    /// The key was added; nothing else changed.
    Selected,
    /// The key was added and the listed keys were deselected to make room.
    Replaced {
        /// Keys that are no longer selected.
        deselected: Vec<K>,
    },
    /// The key was removed.
    Deselected,
    /// Adding the key would exceed the cap; nothing changed.
    Rejected {
        /// The configured maximum.
        cap: usize,
    },
    /// A reframe is in flight; the toggle was ignored.
    Locked,
}

impl<K> ToggleOutcome<K> {
    /// Returns `true` if the selection changed and should be persisted.
    #[must_use]
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Selected | Self::Replaced { .. } | Self::Deselected)
    }

    /// Returns `true` if the view should be reframed on the new selection.
    ///
    /// Only transitions that leave a newly selected shape reframe; pure
    /// deselection never moves the view.
    #[must_use]
    pub fn wants_reframe(&self) -> bool {
        matches!(self, Self::Selected | Self::Replaced { .. })
    }
}

/// Result of [`SelectionMachine::hydrate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HydrateOutcome<K> {
    /// `true` if the selection contents changed.
    pub changed: bool,
    /// Keys that were discarded because the policy or cap does not admit them.
    pub overflow: Vec<K>,
}

/// Selection set plus the rules that govern how user actions change it.
///
/// Wraps a [`Selection`] with a [`SelectionPolicy`], an optional cap on the
/// number of selected keys, and a lock that is held while the view is being
/// reframed. Every mutating operation reports enough for the caller to decide
/// whether to persist, which marks to refresh, and whether to reframe.
#[derive(Clone, Debug)]
pub struct SelectionMachine<K> {
    selection: Selection<K>,
    policy: SelectionPolicy,
    max_selected: Option<usize>,
    locked: bool,
}

impl<K> SelectionMachine<K> {
    /// Creates an empty, unlocked machine.
    #[must_use]
    pub const fn new(policy: SelectionPolicy, max_selected: Option<usize>) -> Self {
        Self {
            selection: Selection::new(),
            policy,
            max_selected,
            locked: false,
        }
    }

    /// The configured policy.
    #[must_use]
    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    /// The configured cap, if any.
    #[must_use]
    pub fn max_selected(&self) -> Option<usize> {
        self.max_selected
    }

    /// Read-only view of the underlying selection.
    #[must_use]
    pub fn selection(&self) -> &Selection<K> {
        &self.selection
    }

    /// Selected keys.
    #[must_use]
    pub fn ids(&self) -> &[K] {
        self.selection.items()
    }

    /// Number of selected keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.selection.len()
    }

    /// Returns `true` if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }

    /// Revision of the underlying selection.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.selection.revision()
    }

    /// Ignore toggles until [`SelectionMachine::unlock`].
    pub fn lock(&mut self) {
        self.locked = true;
    }

    /// Accept toggles again.
    pub fn unlock(&mut self) {
        self.locked = false;
    }

    /// Returns `true` while toggles are being ignored.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Empties the selection. Returns `true` if anything was selected.
    ///
    /// Not affected by the lock.
    pub fn clear(&mut self) -> bool {
        self.selection.clear()
    }

    fn admits(&self, len: usize) -> bool {
        self.max_selected.is_none_or(|cap| len <= cap)
    }
}

impl<K> SelectionMachine<K>
where
    K: PartialEq,
{
    /// Returns `true` if `key` is selected.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.selection.contains(key)
    }

    /// Flips `key` according to the policy.
    pub fn toggle(&mut self, key: K) -> ToggleOutcome<K> {
        if self.locked {
            return ToggleOutcome::Locked;
        }
        if self.selection.remove(&key) {
            return ToggleOutcome::Deselected;
        }
        let resulting_len = match self.policy {
            SelectionPolicy::Single => 1,
            SelectionPolicy::Multi => self.selection.len() + 1,
        };
        if !self.admits(resulting_len) {
            return ToggleOutcome::Rejected {
                cap: self.max_selected.unwrap_or(0),
            };
        }
        match self.policy {
            SelectionPolicy::Single => {
                let deselected = self.selection.select_only(key);
                if deselected.is_empty() {
                    ToggleOutcome::Selected
                } else {
                    ToggleOutcome::Replaced { deselected }
                }
            }
            SelectionPolicy::Multi => {
                self.selection.add(key);
                ToggleOutcome::Selected
            }
        }
    }

    /// Replaces the selection wholesale, typically from a persisted value.
    ///
    /// Duplicates are ignored. Keys past what the policy admits (one for
    /// [`SelectionPolicy::Single`], the cap for [`SelectionPolicy::Multi`])
    /// are discarded in input order and reported as overflow. Not affected by
    /// the lock.
    pub fn hydrate<I>(&mut self, keys: I) -> HydrateOutcome<K>
    where
        I: IntoIterator<Item = K>,
    {
        let limit = match self.policy {
            SelectionPolicy::Single => Some(1),
            SelectionPolicy::Multi => self.max_selected,
        };
        let mut kept: Vec<K> = Vec::new();
        let mut overflow = Vec::new();
        for key in keys {
            if kept.contains(&key) {
                continue;
            }
            if limit.is_some_and(|limit| kept.len() >= limit) {
                overflow.push(key);
            } else {
                kept.push(key);
            }
        }
        let changed = self.selection.replace_with(kept);
        HydrateOutcome { changed, overflow }
    }
}

impl<K> Default for SelectionMachine<K> {
    fn default() -> Self {
        Self::new(SelectionPolicy::default(), None)
    }
}
