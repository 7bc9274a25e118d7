use std::collections::HashMap;

use enginefuse_types::{CompositePayload, PayloadId};
use parking_lot::RwLock;

use crate::errors::StoreError;

/// Maps composite payload IDs back to the per-backend payload ID pair they
/// were fused from. Entries are never removed; a payload ID handed out by
/// `forkchoiceUpdated` must remain resolvable for the subsequent
/// `getPayload` call no matter how long the driver waits to make it.
#[derive(Debug, Default)]
pub struct PayloadStore {
    by_composite: RwLock<HashMap<PayloadId, CompositePayload>>,
}

impl PayloadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a fused pair, returning the composite payload ID the driver
    /// should be given.
    pub fn record(&self, pair: CompositePayload) -> PayloadId {
        let composite = pair.fuse();
        self.by_composite.write().entry(composite).or_insert(pair);
        composite
    }

    /// Resolves a composite payload ID back to the pair it was fused from.
    pub fn defuse(&self, composite: PayloadId) -> Result<CompositePayload, StoreError> {
        self.by_composite
            .read()
            .get(&composite)
            .copied()
            .ok_or_else(|| StoreError::unknown_payload(composite))
    }

    pub fn len(&self) -> usize {
        self.by_composite.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
