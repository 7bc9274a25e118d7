use std::collections::HashMap;

use enginefuse_types::{CompositeBlock, Hash};
use parking_lot::RwLock;

use crate::errors::StoreError;

/// Maps composite block hashes back to the per-backend hash pair they were
/// fused from.
///
/// Entries are never removed - a composite hash the driver has seen must
/// stay resolvable for as long as the process runs. The zero hash is never
/// looked up: it passes through both directions untouched, since it denotes
/// "no block" to both backends identically.
#[derive(Debug, Default)]
pub struct BlockStore {
    by_composite: RwLock<HashMap<Hash, CompositeBlock>>,
}

impl BlockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a fused pair, returning the composite hash the driver should
    /// be given. Re-recording an already-known pair is a no-op (the fuse is
    /// deterministic, so the resulting hash is identical).
    pub fn record(&self, pair: CompositeBlock) -> Hash {
        let composite = pair.fuse();
        self.by_composite.write().entry(composite).or_insert(pair);
        composite
    }

    /// Resolves a composite hash back to the pair it was fused from.
    ///
    /// The zero hash always resolves to `(Hash::ZERO, Hash::ZERO)` without
    /// touching the map.
    pub fn defuse(&self, composite: Hash) -> Result<CompositeBlock, StoreError> {
        if composite.is_zero() {
            return Ok(CompositeBlock::new(Hash::ZERO, Hash::ZERO));
        }
        self.by_composite
            .read()
            .get(&composite)
            .copied()
            .ok_or_else(|| StoreError::unknown_block(composite))
    }

    pub fn len(&self) -> usize {
        self.by_composite.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_then_defuse_round_trips() {
        let store = BlockStore::new();
        let pair = CompositeBlock::new(Hash([1u8; 32]), Hash([2u8; 32]));
        let composite = store.record(pair);
        assert_eq!(store.defuse(composite).unwrap(), pair);
    }

    #[test]
    fn zero_hash_passes_through_without_lookup() {
        let store = BlockStore::new();
        let defused = store.defuse(Hash::ZERO).unwrap();
        assert_eq!(defused, CompositeBlock::new(Hash::ZERO, Hash::ZERO));
        assert!(store.is_empty());
    }

    #[test]
    fn unknown_hash_is_an_error() {
        let store = BlockStore::new();
        assert!(store.defuse(Hash([3u8; 32])).is_err());
    }

    #[test]
    fn re_recording_the_same_pair_does_not_duplicate() {
        let store = BlockStore::new();
        let pair = CompositeBlock::new(Hash([4u8; 32]), Hash([5u8; 32]));
        store.record(pair);
        store.record(pair);
        assert_eq!(store.len(), 1);
    }
}
