//! ClockHashMap: open-addressed slot storage with double-hashed
//! probing, tombstone reclamation, and second-chance eviction.

use crate::bitset::BitSet;
use crate::iter::{Entries, EntriesMut, Keys, KeysMut, Values, ValuesMut};
use crate::reentrancy::DebugReentrancy;
use crate::twin_primes::{self, MAX_TWIN_PRIME};
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::mem;
use std::collections::hash_map::RandomState;
use thiserror::Error;

/// Capacity hint used by `new()`/`Default`.
const DEFAULT_CAPACITY: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MapError {
    /// Out-of-range construction parameter.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// Cursor misuse, or a growth request past the representable
    /// table-size ceiling.
    #[error("illegal state: {0}")]
    IllegalState(&'static str),
    /// Cursor removal aimed at a slot index outside the table.
    #[error("no such element")]
    NoSuchElement,
    /// Bulk mutation through a view; the backing table cannot honor
    /// set-style mutation without invalidating probe state.
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
}

/// One table position. `Tombstone` keeps probe paths for other keys
/// intact after a removal until the next rebuild drops it. A live slot
/// carries its precomputed hash so rebuilds never re-invoke `K: Hash`.
#[derive(Debug)]
pub(crate) enum Slot<K, V> {
    Empty,
    Tombstone,
    Live { hash: u64, key: K, value: V },
}

impl<K, V> Slot<K, V> {
    pub(crate) fn is_live(&self) -> bool {
        matches!(self, Slot::Live { .. })
    }
}

/// Bounded-capacity open-addressing map with clock eviction.
///
/// In bounded mode (`bounded*` constructors) the map tracks a recency
/// bit per slot, set by `get`/`get_mut`; once an insertion of a new key
/// would exceed the cap, a backward sweep evicts the first entry whose
/// bit is unset, forgiving each set bit it passes. Unbounded maps skip
/// the bitmap entirely.
pub struct ClockHashMap<K, V, S = RandomState> {
    slots: Vec<Slot<K, V>>,
    num_entries: usize,
    num_slots_used: usize,
    max_entries: Option<usize>,
    recency: Option<BitSet>,
    hasher: S,
    reentrancy: DebugReentrancy,
}

impl<K, V> ClockHashMap<K, V>
where
    K: Eq + Hash,
{
    /// Unbounded map with the default capacity hint.
    pub fn new() -> Self {
        Self::from_parts(
            twin_primes::next_twin_prime(DEFAULT_CAPACITY << 1),
            None,
            RandomState::default(),
        )
    }

    /// Unbounded map sized to hold `capacity` entries without a rebuild.
    pub fn with_capacity(capacity: usize) -> Result<Self, MapError> {
        Self::with_capacity_and_hasher(capacity, RandomState::default())
    }

    /// Bounded map: once `max_entries` live entries are present, each
    /// insertion of a new key evicts an approximately-stale one.
    pub fn bounded(capacity: usize, max_entries: usize) -> Result<Self, MapError> {
        Self::bounded_with_hasher(capacity, max_entries, RandomState::default())
    }
}

impl<K, V> Default for ClockHashMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> ClockHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Result<Self, MapError> {
        Self::build(capacity, None, hasher)
    }

    pub fn bounded_with_hasher(
        capacity: usize,
        max_entries: usize,
        hasher: S,
    ) -> Result<Self, MapError> {
        if max_entries < 1 {
            return Err(MapError::InvalidArgument("max_entries must be at least 1"));
        }
        Self::build(capacity, Some(max_entries), hasher)
    }

    fn build(capacity: usize, max_entries: Option<usize>, hasher: S) -> Result<Self, MapError> {
        if capacity < 1 {
            return Err(MapError::InvalidArgument("capacity must be at least 1"));
        }
        if capacity >= MAX_TWIN_PRIME >> 1 {
            return Err(MapError::InvalidArgument(
                "capacity too close to the maximum table size",
            ));
        }
        Ok(Self::from_parts(
            twin_primes::next_twin_prime(capacity << 1),
            max_entries,
            hasher,
        ))
    }

    fn from_parts(hash_size: usize, max_entries: Option<usize>, hasher: S) -> Self {
        Self {
            slots: Self::empty_slots(hash_size),
            num_entries: 0,
            num_slots_used: 0,
            max_entries,
            recency: max_entries.map(|_| BitSet::new(hash_size)),
            hasher,
            reentrancy: DebugReentrancy::new(),
        }
    }

    /// Resolves a key to a slot index: either the slot holding an equal
    /// key, or the first empty slot on the key's probe path. Tombstones
    /// and mismatched live keys are stepped over; never mutates.
    fn probe<Q>(&self, hash: u64, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        Self::probe_slots(&self.slots, hash, key)
    }

    /// The jump is in `[1, size - 2]` and coprime with `size` (the
    /// twin-prime family guarantees it), so the path cycles through the
    /// whole table before repeating.
    fn probe_slots<Q>(slots: &[Slot<K, V>], hash: u64, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let size = slots.len();
        let jump = 1 + (hash % (size as u64 - 2)) as usize;
        let mut index = (hash % size as u64) as usize;
        loop {
            match &slots[index] {
                Slot::Empty => return index,
                Slot::Live { key: k, .. } if k.borrow() == key => return index,
                _ => {
                    index = if index < jump {
                        index + size - jump
                    } else {
                        index - jump
                    };
                }
            }
        }
    }

    /// Looks up a value and, in bounded mode, marks the resolved slot
    /// as recently accessed (even on a miss; a stray bit on an empty
    /// slot at worst grants its next occupant one free sweep pass).
    ///
    /// Use [`peek`](Self::peek) for a read that must not influence
    /// eviction.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        let hash = self.hasher.hash_one(key);
        let index = self.probe(hash, key);
        if let Some(bits) = &mut self.recency {
            bits.set(index);
        }
        match &self.slots[index] {
            Slot::Live { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Like [`get`](Self::get), yielding mutable access.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        let hash = self.hasher.hash_one(key);
        let index = self.probe(hash, key);
        if let Some(bits) = &mut self.recency {
            bits.set(index);
        }
        match &mut self.slots[index] {
            Slot::Live { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Lookup without touching recency state.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        let hash = self.hasher.hash_one(key);
        match &self.slots[self.probe(hash, key)] {
            Slot::Live { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        let hash = self.hasher.hash_one(key);
        self.slots[self.probe(hash, key)].is_live()
    }

    /// Inserts, returning the previous value when the key was already
    /// present. Runs pre-insertion maintenance first (grow or purge
    /// tombstones once half the table is used); in bounded mode an
    /// insertion of a new key at the cap evicts a stale entry before
    /// writing.
    ///
    /// The only failure is `IllegalState` when a required growth step
    /// would pass the representable table-size ceiling; the map is
    /// unchanged in that case.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>, MapError> {
        let _g = self.reentrancy.enter();
        // Once half the slots are in use, clean up before probing
        // degrades: grow when live entries dominate the used slots,
        // otherwise rebuild at 2 * len() to purge the tombstones.
        if self.num_slots_used >= self.slots.len() >> 1 {
            let new_size = if self.num_entries >= self.num_slots_used >> 1 {
                if self.slots.len() >= MAX_TWIN_PRIME >> 1 {
                    return Err(MapError::IllegalState(
                        "table is already at its maximum size",
                    ));
                }
                twin_primes::next_twin_prime(self.slots.len() << 1)
            } else {
                twin_primes::next_twin_prime(self.num_entries << 1)
            };
            Self::rehash_into(
                &mut self.slots,
                &mut self.recency,
                &mut self.num_entries,
                &mut self.num_slots_used,
                new_size,
            );
        }
        let hash = self.hasher.hash_one(&key);
        let index = self.probe(hash, &key);
        if let Slot::Live { value: old, .. } = &mut self.slots[index] {
            return Ok(Some(mem::replace(old, value)));
        }
        // `probe` stops only on a match or an empty slot, so this key is new.
        if let Some(max) = self.max_entries {
            if self.num_entries >= max {
                Self::evict_stale(
                    &mut self.slots,
                    &mut self.recency,
                    &mut self.num_entries,
                    index,
                );
            }
        }
        self.slots[index] = Slot::Live { hash, key, value };
        self.num_entries += 1;
        self.num_slots_used += 1;
        Ok(None)
    }

    /// Applies [`insert`](Self::insert) to each pair in source order.
    pub fn insert_all<I>(&mut self, entries: I) -> Result<(), MapError>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in entries {
            self.insert(key, value)?;
        }
        Ok(())
    }

    /// Removes a key, leaving a tombstone so other keys' probe paths
    /// stay valid until the next rebuild. Absent keys are a no-op.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        let hash = self.hasher.hash_one(key);
        let index = self.probe(hash, key);
        match mem::replace(&mut self.slots[index], Slot::Tombstone) {
            Slot::Live { value, .. } => {
                // num_slots_used stays put: the tombstone still occupies
                // the slot. The recency bit is left stale; the slot's
                // next occupant or the next rebuild resets it.
                self.num_entries -= 1;
                Some(value)
            }
            other => {
                self.slots[index] = other;
                None
            }
        }
    }

    /// Rebuilds at `next_twin_prime(2 * len())`, purging tombstones.
    /// May shrink the table below its current size; that reclaims space
    /// but can lengthen eviction sweeps under bounded-mode churn.
    pub fn compact(&mut self) {
        let _g = self.reentrancy.enter();
        let new_size = twin_primes::next_twin_prime(self.num_entries << 1);
        Self::rehash_into(
            &mut self.slots,
            &mut self.recency,
            &mut self.num_entries,
            &mut self.num_slots_used,
            new_size,
        );
    }

    /// Replaces the table wholesale: fresh slots, fresh bitmap, zeroed
    /// counters, then reinsertion of every live entry using its stored
    /// hash. Old storage is discarded, never partially reused.
    ///
    /// Associated fn over disjoint field borrows so callers can keep
    /// the reentrancy guard alive across the rebuild.
    fn rehash_into(
        slots: &mut Vec<Slot<K, V>>,
        recency: &mut Option<BitSet>,
        num_entries: &mut usize,
        num_slots_used: &mut usize,
        new_size: usize,
    ) {
        let old = mem::replace(slots, Self::empty_slots(new_size));
        *num_entries = 0;
        *num_slots_used = 0;
        if let Some(bits) = recency {
            *bits = BitSet::new(new_size);
        }
        for slot in old {
            if let Slot::Live { hash, key, value } = slot {
                // The fresh table has no tombstones, so the probe lands
                // straight on an empty slot, and the new table holds at
                // least twice the entry count, so reinsertion can never
                // itself demand maintenance or eviction.
                let index = Self::probe_slots(slots, hash, &key);
                slots[index] = Slot::Live { hash, key, value };
                *num_entries += 1;
                *num_slots_used += 1;
            }
        }
    }

    /// Clock sweep. Walks backward (wrapping) from the slot a new key
    /// is about to occupy, skipping empty and tombstone slots. A live
    /// slot with its recency bit set is forgiven (bit cleared) and the
    /// walk continues; the first live slot without the bit becomes the
    /// victim and is tombstoned. Bounded by one full lap even when
    /// every bit starts set.
    fn evict_stale(
        slots: &mut [Slot<K, V>],
        recency: &mut Option<BitSet>,
        num_entries: &mut usize,
        mut index: usize,
    ) {
        let size = slots.len();
        loop {
            loop {
                index = if index == 0 { size - 1 } else { index - 1 };
                if slots[index].is_live() {
                    break;
                }
            }
            match recency {
                Some(bits) if bits.get(index) => bits.clear(index),
                _ => break,
            }
        }
        slots[index] = Slot::Tombstone;
        *num_entries -= 1;
    }
}

impl<K, V, S> ClockHashMap<K, V, S>
where
    V: PartialEq,
{
    /// Linear scan over the whole table; O(table size). Present for
    /// contract completeness, not a fast path.
    pub fn contains_value(&self, value: &V) -> bool {
        let _g = self.reentrancy.enter();
        self.slots
            .iter()
            .any(|slot| matches!(slot, Slot::Live { value: v, .. } if v == value))
    }
}

impl<K, V, S> ClockHashMap<K, V, S> {
    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.num_entries
    }

    pub fn is_empty(&self) -> bool {
        self.num_entries == 0
    }

    /// The cap on live entries, or `None` for an unbounded map.
    pub fn max_entries(&self) -> Option<usize> {
        self.max_entries
    }

    /// Empties the map in place: counters zeroed, every slot reset,
    /// bitmap cleared. The table is not shrunk; use
    /// [`compact`](Self::compact) to reclaim space.
    pub fn clear(&mut self) {
        let _g = self.reentrancy.enter();
        self.num_entries = 0;
        self.num_slots_used = 0;
        for slot in &mut self.slots {
            *slot = Slot::Empty;
        }
        if let Some(bits) = &mut self.recency {
            bits.clear_all();
        }
    }

    /// Lazy view over keys in slot-index order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self)
    }

    /// Lazy view over values in slot-index order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self)
    }

    /// Lazy view over key-value pairs in slot-index order.
    pub fn entries(&self) -> Entries<'_, K, V> {
        Entries::new(self)
    }

    /// Single-pass key cursor supporting removal of the entry last
    /// yielded.
    pub fn keys_mut(&mut self) -> KeysMut<'_, K, V, S> {
        KeysMut::new(self)
    }

    /// Single-pass value cursor with mutable access and removal.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V, S> {
        ValuesMut::new(self)
    }

    /// Single-pass entry cursor with mutable values, in-place value
    /// replacement, and removal.
    pub fn entries_mut(&mut self) -> EntriesMut<'_, K, V, S> {
        EntriesMut::new(self)
    }

    pub(crate) fn table_size(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn slots(&self) -> &[Slot<K, V>] {
        &self.slots
    }

    pub(crate) fn slot_key(&self, index: usize) -> Option<&K> {
        match &self.slots[index] {
            Slot::Live { key, .. } => Some(key),
            _ => None,
        }
    }

    pub(crate) fn slot_value_mut(&mut self, index: usize) -> Option<&mut V> {
        match &mut self.slots[index] {
            Slot::Live { value, .. } => Some(value),
            _ => None,
        }
    }

    pub(crate) fn slot_entry_mut(&mut self, index: usize) -> Option<(&K, &mut V)> {
        match &mut self.slots[index] {
            Slot::Live { key, value, .. } => Some((&*key, value)),
            _ => None,
        }
    }

    /// Removal callback for cursors: tombstones the slot a cursor last
    /// yielded. The explicit index keeps cursors free of any state
    /// beyond their position.
    pub(crate) fn iterator_remove(&mut self, index: usize) -> Result<(), MapError> {
        if index >= self.slots.len() {
            return Err(MapError::NoSuchElement);
        }
        match mem::replace(&mut self.slots[index], Slot::Tombstone) {
            Slot::Live { .. } => {
                self.num_entries -= 1;
                Ok(())
            }
            other => {
                self.slots[index] = other;
                Err(MapError::IllegalState("slot does not hold a live entry"))
            }
        }
    }

    /// In-place value replacement for entry cursors.
    pub(crate) fn replace_value_at(&mut self, index: usize, value: V) -> Result<V, MapError> {
        match &mut self.slots[index] {
            Slot::Live { value: old, .. } => Ok(mem::replace(old, value)),
            _ => Err(MapError::IllegalState("slot does not hold a live entry")),
        }
    }

    fn empty_slots(hash_size: usize) -> Vec<Slot<K, V>> {
        let mut slots = Vec::with_capacity(hash_size);
        slots.resize_with(hash_size, || Slot::Empty);
        slots
    }

    /// Full-rescan consistency check used by the test suites after
    /// every model step.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        let mut live = 0usize;
        let mut tombstones = 0usize;
        for slot in &self.slots {
            match slot {
                Slot::Live { .. } => live += 1,
                Slot::Tombstone => tombstones += 1,
                Slot::Empty => {}
            }
        }
        assert_eq!(live, self.num_entries, "live slots vs num_entries");
        assert_eq!(
            live + tombstones,
            self.num_slots_used,
            "occupied slots vs num_slots_used"
        );
        assert!(self.num_slots_used <= self.slots.len());
        if let Some(max) = self.max_entries {
            assert!(self.num_entries <= max, "capacity bound exceeded");
        }
        assert_eq!(self.max_entries.is_some(), self.recency.is_some());
        if let Some(bits) = &self.recency {
            assert_eq!(bits.len(), self.slots.len(), "bitmap not resized with table");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::hash::Hasher;

    #[derive(Clone, Default)]
    struct ConstBuildHasher;
    struct ConstHasher;
    impl BuildHasher for ConstBuildHasher {
        type Hasher = ConstHasher;
        fn build_hasher(&self) -> Self::Hasher {
            ConstHasher
        }
    }
    impl Hasher for ConstHasher {
        fn write(&mut self, _bytes: &[u8]) {}
        fn finish(&self) -> u64 {
            0 // force every key onto the same probe path
        }
    }

    /// Invariant: counters track live and tombstoned slots exactly
    /// through insert/remove churn.
    #[test]
    fn counter_accounting_through_churn() {
        let mut m: ClockHashMap<String, i32> = ClockHashMap::new();
        for i in 0..20 {
            m.insert(format!("k{i}"), i).unwrap();
            m.check_invariants();
        }
        for i in (0..20).step_by(2) {
            assert_eq!(m.remove(&format!("k{i}")), Some(i));
            m.check_invariants();
        }
        assert_eq!(m.len(), 10);
    }

    /// Invariant: with a constant hasher every key shares one probe
    /// path; equality probing must still resolve each key to its own
    /// slot, through tombstones.
    #[test]
    fn collision_probing_resolves_through_tombstones() {
        let mut m: ClockHashMap<String, i32, ConstBuildHasher> =
            ClockHashMap::with_capacity_and_hasher(8, ConstBuildHasher).unwrap();
        for i in 0..6 {
            m.insert(format!("k{i}"), i).unwrap();
        }
        assert_eq!(m.remove(&"k2".to_string()), Some(2));
        assert_eq!(m.remove(&"k4".to_string()), Some(4));
        m.check_invariants();
        // Keys probing through the vacated slots are still reachable.
        for i in [0, 1, 3, 5] {
            assert_eq!(m.peek(&format!("k{i}")), Some(&i));
        }
        // Reinsertion through tombstoned territory works too.
        m.insert("k9".to_string(), 9).unwrap();
        for i in [0, 1, 3, 5, 9] {
            assert_eq!(m.peek(&format!("k{i}")), Some(&i));
        }
        m.check_invariants();
    }

    /// Invariant: growth replaces the table and every entry survives.
    #[test]
    fn growth_preserves_entries() {
        let mut m: ClockHashMap<i32, i32> = ClockHashMap::with_capacity(1).unwrap();
        let before = m.table_size();
        for i in 0..100 {
            m.insert(i, i * 10).unwrap();
            m.check_invariants();
        }
        assert!(m.table_size() > before);
        for i in 0..100 {
            assert_eq!(m.peek(&i), Some(&(i * 10)));
        }
    }

    /// Invariant: compact purges tombstones (num_slots_used falls back
    /// to num_entries) and may shrink the table.
    #[test]
    fn compact_purges_tombstones_and_can_shrink() {
        let mut m: ClockHashMap<i32, i32> = ClockHashMap::with_capacity(100).unwrap();
        for i in 0..100 {
            m.insert(i, i).unwrap();
        }
        for i in 0..95 {
            m.remove(&i);
        }
        let before = m.table_size();
        m.compact();
        m.check_invariants();
        assert!(m.table_size() < before);
        for i in 95..100 {
            assert_eq!(m.peek(&i), Some(&i));
        }
    }

    /// Invariant: at the cap, a marked entry survives the sweep at the
    /// expense of an unmarked one; peek grants no such protection.
    #[test]
    fn sweep_prefers_unmarked_victims() {
        let mut m: ClockHashMap<&str, i32> = ClockHashMap::bounded(5, 2).unwrap();
        m.insert("a", 1).unwrap();
        m.insert("b", 2).unwrap();
        assert_eq!(m.get(&"a"), Some(&1));
        assert_eq!(m.peek(&"b"), Some(&2));
        m.insert("c", 3).unwrap();
        m.check_invariants();
        assert_eq!(m.len(), 2);
        assert!(m.contains_key(&"a"), "marked entry must survive");
        assert!(!m.contains_key(&"b"), "unmarked entry is the victim");
        assert!(m.contains_key(&"c"));
    }

    /// Invariant: a sweep that finds every bit set clears them all and
    /// still terminates with exactly one eviction.
    #[test]
    fn sweep_terminates_when_everything_is_marked() {
        let mut m: ClockHashMap<i32, i32> = ClockHashMap::bounded(8, 4).unwrap();
        for i in 0..4 {
            m.insert(i, i).unwrap();
        }
        for i in 0..4 {
            m.get(&i);
        }
        m.insert(99, 99).unwrap();
        m.check_invariants();
        assert_eq!(m.len(), 4);
        assert!(m.contains_key(&99));
    }

    /// Invariant: cursor-removal callback rejects out-of-range indices
    /// and non-live slots without mutating anything.
    #[test]
    fn iterator_remove_error_paths() {
        let mut m: ClockHashMap<i32, i32> = ClockHashMap::new();
        m.insert(1, 1).unwrap();
        assert_eq!(
            m.iterator_remove(m.table_size() + 5),
            Err(MapError::NoSuchElement)
        );
        // Find an empty slot; removing through it is an error.
        let empty = (0..m.table_size())
            .find(|&i| !m.slots()[i].is_live())
            .unwrap();
        assert!(matches!(
            m.iterator_remove(empty),
            Err(MapError::IllegalState(_))
        ));
        m.check_invariants();
        assert_eq!(m.len(), 1);
    }

    /// Invariant: clear empties the map but keeps the table allocation.
    #[test]
    fn clear_retains_table_size() {
        let mut m: ClockHashMap<i32, i32> = ClockHashMap::bounded(10, 50).unwrap();
        for i in 0..10 {
            m.insert(i, i).unwrap();
        }
        let size = m.table_size();
        m.clear();
        m.check_invariants();
        assert!(m.is_empty());
        assert_eq!(m.table_size(), size);
        assert_eq!(m.peek(&3), None);
        // The map is fully usable afterwards.
        m.insert(3, 33).unwrap();
        assert_eq!(m.peek(&3), Some(&33));
    }

    /// Invariant: construction validates its parameters.
    #[test]
    fn construction_validation() {
        assert!(matches!(
            ClockHashMap::<i32, i32>::with_capacity(0),
            Err(MapError::InvalidArgument(_))
        ));
        assert!(matches!(
            ClockHashMap::<i32, i32>::bounded(4, 0),
            Err(MapError::InvalidArgument(_))
        ));
        assert!(matches!(
            ClockHashMap::<i32, i32>::with_capacity(MAX_TWIN_PRIME >> 1),
            Err(MapError::InvalidArgument(_))
        ));
        assert!(ClockHashMap::<i32, i32>::bounded(4, 1).is_ok());
    }

    /// Invariant: value replacement for an existing key changes neither
    /// counter nor triggers eviction, even at the cap.
    #[test]
    fn replacement_at_capacity_does_not_evict() {
        let mut m: ClockHashMap<&str, i32> = ClockHashMap::bounded(4, 2).unwrap();
        m.insert("a", 1).unwrap();
        m.insert("b", 2).unwrap();
        assert_eq!(m.insert("a", 10).unwrap(), Some(1));
        m.check_invariants();
        assert_eq!(m.len(), 2);
        assert!(m.contains_key(&"a") && m.contains_key(&"b"));
    }
}
