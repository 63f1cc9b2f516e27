//! Memoization of the last stack computation.

use super::{FactStack, StackBuilder};
use crate::corpus::{Fact, RelationSource};

/// Remembers the stacks for the last input and returns them while the input is unchanged.
///
/// The cache compares the full input, so a hit always returns exactly what a
/// fresh computation would.
#[derive(Debug, Clone, Default)]
pub struct StackCache {
    entry: Option<CacheEntry>,
    hits: u64,
    misses: u64,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    source: RelationSource,
    input: Vec<Fact>,
    stacks: Vec<FactStack>,
}

impl StackCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the stacks for `facts`, computing them only when the input changed.
    pub fn stacks(&mut self, builder: &StackBuilder, facts: &[Fact]) -> &[FactStack] {
        let source = builder.relation_source();
        let fresh = matches!(
            &self.entry,
            Some(entry) if entry.source == source && entry.input.as_slice() == facts
        );

        if fresh {
            self.hits += 1;
        } else {
            self.misses += 1;
            self.entry = Some(CacheEntry {
                source,
                input: facts.to_vec(),
                stacks: builder.compute_stacks(facts),
            });
        }

        self.entry
            .as_ref()
            .map(|entry| entry.stacks.as_slice())
            .unwrap_or_default()
    }

    /// Drop the cached result.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// Number of lookups answered from the cache.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Number of lookups that required a computation.
    pub fn misses(&self) -> u64 {
        self.misses
    }
}
