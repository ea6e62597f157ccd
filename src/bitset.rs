//! Fixed-size bit set backing the recency bitmap.
//!
//! One bit per table slot; sized at construction and reallocated in
//! lockstep with every table rebuild. Kept crate-private: the map is
//! the only consumer.

#[derive(Debug, Clone)]
pub(crate) struct BitSet {
    words: Vec<u64>,
    nbits: usize,
}

impl BitSet {
    pub(crate) fn new(nbits: usize) -> Self {
        Self {
            words: vec![0; nbits.div_ceil(64)],
            nbits,
        }
    }

    // Only the test-build invariant rescan asks for the size.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.nbits
    }

    pub(crate) fn get(&self, index: usize) -> bool {
        debug_assert!(index < self.nbits);
        self.words[index / 64] & (1 << (index % 64)) != 0
    }

    pub(crate) fn set(&mut self, index: usize) {
        debug_assert!(index < self.nbits);
        self.words[index / 64] |= 1 << (index % 64);
    }

    pub(crate) fn clear(&mut self, index: usize) {
        debug_assert!(index < self.nbits);
        self.words[index / 64] &= !(1 << (index % 64));
    }

    pub(crate) fn clear_all(&mut self) {
        self.words.fill(0);
    }
}
