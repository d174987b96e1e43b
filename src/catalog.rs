//! Deduplicating catalog of knot invariants.
//!
//! The first mosaic to produce an invariant becomes its permanent
//! representative. Later mosaics with the same invariant are only counted.
//! The catalog only grows.

use std::hash::Hash;

use rustc_hash::FxHashMap;

/// Result of a catalog lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lookup<'a> {
    /// Whether this call inserted the invariant.
    pub is_new: bool,
    /// The representative mosaic for the invariant.
    pub representative: &'a str,
}

/// Map from invariant to representative mosaic, in insertion order.
#[derive(Debug, Clone)]
pub struct InvariantCatalog<I> {
    index: FxHashMap<I, usize>,
    entries: Vec<(I, String)>,
    knots_seen: u64,
}

impl<I> Default for InvariantCatalog<I> {
    fn default() -> Self {
        Self {
            index: FxHashMap::default(),
            entries: Vec::new(),
            knots_seen: 0,
        }
    }
}

impl<I: Clone + Eq + Hash> InvariantCatalog<I> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the representative for `invariant`, inserting `mosaic` as
    /// the representative if the invariant is new.
    pub fn lookup_or_insert(&mut self, invariant: I, mosaic: &str) -> Lookup<'_> {
        let next = self.entries.len();
        let slot = *self.index.entry(invariant.clone()).or_insert(next);
        let is_new = slot == next;
        if is_new {
            self.entries.push((invariant, mosaic.to_string()));
        }
        Lookup {
            is_new,
            representative: &self.entries[slot].1,
        }
    }

    /// Counts one more mosaic confirmed to be a knot.
    pub fn record_knot(&mut self) -> u64 {
        self.knots_seen += 1;
        self.knots_seen
    }

    /// Total mosaics confirmed to be knots, novel or not.
    #[inline]
    pub fn knots_seen(&self) -> u64 {
        self.knots_seen
    }

    /// Representative for an invariant, if cataloged.
    pub fn get(&self, invariant: &I) -> Option<&str> {
        self.index
            .get(invariant)
            .map(|&slot| self.entries[slot].1.as_str())
    }

    /// Number of distinct invariants.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in the order they were first inserted.
    pub fn iter(&self) -> impl Iterator<Item = (&I, &str)> {
        self.entries
            .iter()
            .map(|(invariant, mosaic)| (invariant, mosaic.as_str()))
    }
}
