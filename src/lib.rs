//! clock-hashmap: a single-threaded, bounded-capacity map built on
//! open-addressed slot storage with an integrated second-chance
//! eviction policy.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a faster, more memory-compact alternative to a general hash
//!   map for workloads that want a hard cap on live entries and are
//!   happy with "approximately least recently used" eviction rather
//!   than strict LRU order.
//! - Layout: one flat slot array where each slot is `Empty`,
//!   `Tombstone` (removed but not yet reclaimed), or `Live`. All
//!   "references" into the table are plain slot indices recomputed by
//!   the probe function; no index survives a rebuild.
//! - Probing: double hashing. A key's hash picks both a start index and
//!   a fixed per-key jump distance; the probe path steps backward
//!   through the table, skipping tombstones and mismatched keys, until
//!   it hits an empty slot or the sought key. Table sizes come from the
//!   twin-prime family in `twin_primes`, which makes every possible
//!   jump coprime with the table size, so a probe path visits every
//!   slot before repeating.
//! - Maintenance: when half the table is used, an insertion first
//!   either grows the table (tombstones are a minority of used slots)
//!   or rebuilds it at `2 * len()` to purge tombstones, possibly
//!   shrinking it.
//! - Eviction: only in bounded mode. When a new key would exceed the
//!   cap, a backward sweep from the target slot forgives (unmarks)
//!   entries read since the last sweep and evicts the first entry it
//!   finds that was not.
//!
//! Constraints
//! - Single-threaded: `!Send`/`!Sync` by design; a debug-only
//!   reentrancy guard panics on nested entry through `Eq`/`Hash` user
//!   code while internals are transiently inconsistent.
//! - No per-entry heap allocations beyond the slot array itself.
//! - Each live slot stores its precomputed `u64` hash; `K: Hash` is
//!   never invoked after insertion, so rebuilds run no user hashing
//!   code.
//! - Operations are synchronous and run to completion; there is no
//!   blocking, no cancellation, and no internal retry.
//!
//! Iteration
//! - `keys()`/`values()`/`entries()` are lazy read views in slot-index
//!   order (not insertion order). `keys_mut()`/`values_mut()`/
//!   `entries_mut()` are single-pass cursors that additionally support
//!   removing the entry last yielded; the borrow checker rules out the
//!   "mutated the map behind its own iterator" class of bugs the
//!   structure would otherwise have to document as undefined.
//!
//! Notes and non-goals
//! - Eviction is a clock/second-chance approximation, not exact
//!   recency order.
//! - No thread safety; no interior mutability. Reads that should count
//!   as "recent" go through `get(&mut self)`; `peek(&self)` reads
//!   without touching recency state.
//! - `u64` hash values come from a caller-supplied `BuildHasher`
//!   (`RandomState` by default); the map assumes a roughly uniform
//!   distribution but not a cryptographic one.
//! - Public API surface is `ClockHashMap`, its view/cursor types, and
//!   `MapError`; `twin_primes` is exposed for callers that want to
//!   pre-size tables.

mod bitset;
pub mod clock_hash_map;
mod clock_hash_map_proptest;
mod iter;
mod reentrancy;
pub mod twin_primes;

// Public surface
pub use clock_hash_map::{ClockHashMap, MapError};
pub use iter::{Entries, EntriesMut, Keys, KeysMut, Values, ValuesMut};
