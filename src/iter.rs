//! Views and cursors over the slot array.
//!
//! Read views (`Keys`, `Values`, `Entries`) are lazy projections in
//! strictly increasing slot-index order, skipping empty and tombstone
//! slots; restart one by asking the map for a fresh view. Cursors
//! (`KeysMut`, `ValuesMut`, `EntriesMut`) hold an exclusive borrow of
//! the owning map plus their own position, and can remove the entry
//! they last yielded by handing its slot index back to the map.

use crate::clock_hash_map::{ClockHashMap, MapError, Slot};

macro_rules! read_view {
    ($(#[$doc:meta])* $name:ident, $item:ty, |$slot:ident| $project:expr) => {
        $(#[$doc])*
        pub struct $name<'a, K, V> {
            slots: &'a [Slot<K, V>],
            position: usize,
            remaining: usize,
        }

        impl<'a, K, V> $name<'a, K, V> {
            pub(crate) fn new<S>(map: &'a ClockHashMap<K, V, S>) -> Self {
                Self {
                    slots: map.slots(),
                    position: 0,
                    remaining: map.len(),
                }
            }
        }

        impl<'a, K, V> Iterator for $name<'a, K, V> {
            type Item = $item;

            fn next(&mut self) -> Option<Self::Item> {
                while self.position < self.slots.len() {
                    let index = self.position;
                    self.position += 1;
                    if let Slot::Live { $slot, .. } = &self.slots[index] {
                        self.remaining -= 1;
                        return Some($project);
                    }
                }
                None
            }

            fn size_hint(&self) -> (usize, Option<usize>) {
                (self.remaining, Some(self.remaining))
            }
        }

        impl<K, V> ExactSizeIterator for $name<'_, K, V> {}
        impl<K, V> core::iter::FusedIterator for $name<'_, K, V> {}
    };
}

read_view!(
    /// Lazy iterator over keys, in slot-index order.
    Keys,
    &'a K,
    |key| key
);

read_view!(
    /// Lazy iterator over values, in slot-index order.
    Values,
    &'a V,
    |value| value
);

/// Lazy iterator over `(key, value)` pairs, in slot-index order.
pub struct Entries<'a, K, V> {
    slots: &'a [Slot<K, V>],
    position: usize,
    remaining: usize,
}

impl<'a, K, V> Entries<'a, K, V> {
    pub(crate) fn new<S>(map: &'a ClockHashMap<K, V, S>) -> Self {
        Self {
            slots: map.slots(),
            position: 0,
            remaining: map.len(),
        }
    }
}

impl<'a, K, V> Iterator for Entries<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while self.position < self.slots.len() {
            let index = self.position;
            self.position += 1;
            if let Slot::Live { key, value, .. } = &self.slots[index] {
                self.remaining -= 1;
                return Some((key, value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Entries<'_, K, V> {}
impl<K, V> core::iter::FusedIterator for Entries<'_, K, V> {}

macro_rules! cursor_common {
    () => {
        /// Removes the entry last yielded by `next`, leaving a
        /// tombstone. Fails with `IllegalState` when `next` has not
        /// been called since construction or the previous removal.
        pub fn remove(&mut self) -> Result<(), MapError> {
            match self.last_next.take() {
                Some(index) => self.map.iterator_remove(index),
                None => Err(MapError::IllegalState(
                    "cursor removal requires a prior call to next",
                )),
            }
        }

        /// Bulk addition through a view is not supported; the call
        /// fails without touching the map.
        pub fn insert_all<I>(&mut self, _entries: I) -> Result<(), MapError> {
            Err(MapError::Unsupported("bulk addition through a view"))
        }

        /// Bulk removal through a view is not supported; the call
        /// fails without touching the map.
        pub fn remove_all<I>(&mut self, _items: I) -> Result<(), MapError> {
            Err(MapError::Unsupported("bulk removal through a view"))
        }

        /// Retain-style filtering through a view is not supported; the
        /// call fails without touching the map.
        pub fn retain_all<I>(&mut self, _items: I) -> Result<(), MapError> {
            Err(MapError::Unsupported("bulk retention through a view"))
        }
    };
}

/// Single-pass key cursor with removal.
pub struct KeysMut<'a, K, V, S> {
    map: &'a mut ClockHashMap<K, V, S>,
    position: usize,
    last_next: Option<usize>,
}

impl<'a, K, V, S> KeysMut<'a, K, V, S> {
    pub(crate) fn new(map: &'a mut ClockHashMap<K, V, S>) -> Self {
        Self {
            map,
            position: 0,
            last_next: None,
        }
    }

    /// Advances to the next live slot and yields its key, recording the
    /// slot index for a following `remove`.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&K> {
        while self.position < self.map.table_size() {
            let index = self.position;
            self.position += 1;
            if self.map.slots()[index].is_live() {
                self.last_next = Some(index);
                return self.map.slot_key(index);
            }
        }
        None
    }

    cursor_common!();
}

/// Single-pass value cursor with mutable access and removal.
pub struct ValuesMut<'a, K, V, S> {
    map: &'a mut ClockHashMap<K, V, S>,
    position: usize,
    last_next: Option<usize>,
}

impl<'a, K, V, S> ValuesMut<'a, K, V, S> {
    pub(crate) fn new(map: &'a mut ClockHashMap<K, V, S>) -> Self {
        Self {
            map,
            position: 0,
            last_next: None,
        }
    }

    /// Advances to the next live slot and yields its value mutably,
    /// recording the slot index for a following `remove`.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&mut V> {
        while self.position < self.map.table_size() {
            let index = self.position;
            self.position += 1;
            if self.map.slots()[index].is_live() {
                self.last_next = Some(index);
                return self.map.slot_value_mut(index);
            }
        }
        None
    }

    cursor_common!();
}

/// Single-pass entry cursor with mutable values, in-place value
/// replacement, and removal.
pub struct EntriesMut<'a, K, V, S> {
    map: &'a mut ClockHashMap<K, V, S>,
    position: usize,
    last_next: Option<usize>,
}

impl<'a, K, V, S> EntriesMut<'a, K, V, S> {
    pub(crate) fn new(map: &'a mut ClockHashMap<K, V, S>) -> Self {
        Self {
            map,
            position: 0,
            last_next: None,
        }
    }

    /// Advances to the next live slot and yields the key with mutable
    /// access to the value, recording the slot index for a following
    /// `remove` or `set_value`.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<(&K, &mut V)> {
        while self.position < self.map.table_size() {
            let index = self.position;
            self.position += 1;
            if self.map.slots()[index].is_live() {
                self.last_next = Some(index);
                return self.map.slot_entry_mut(index);
            }
        }
        None
    }

    /// Replaces the value of the entry last yielded, writing directly
    /// into the backing slot, and returns the previous value. Unlike
    /// `remove`, this leaves the cursor state intact, so it can be
    /// called repeatedly or followed by a removal.
    pub fn set_value(&mut self, value: V) -> Result<V, MapError> {
        match self.last_next {
            Some(index) => self.map.replace_value_at(index, value),
            None => Err(MapError::IllegalState(
                "set_value requires a prior call to next",
            )),
        }
    }

    cursor_common!();
}
