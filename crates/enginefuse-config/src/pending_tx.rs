use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use enginefuse_types::Hash;
use parking_lot::Mutex;

/// Observational record of raw transaction hashes submitted through
/// `eth_sendRawTransaction`, letting the frontend later answer "has this tx
/// made it into a confirmed composite block".
///
/// Owned by neither `EngineMux` nor `EthPass`: `EthPass::send_raw_transaction`
/// records into it, `EngineMux::forkchoice_updated` prunes it at each
/// fork-choice boundary. It does not alter fan-out semantics.
#[derive(Debug)]
pub struct PendingTxTracker {
    entries: Mutex<HashMap<Hash, Instant>>,
    retention: Duration,
}

impl PendingTxTracker {
    pub fn new(retention: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            retention,
        }
    }

    pub fn record(&self, hash: Hash) {
        self.entries.lock().insert(hash, Instant::now());
    }

    pub fn contains(&self, hash: &Hash) -> bool {
        self.entries.lock().contains_key(hash)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every entry older than the configured retention window.
    pub fn prune(&self) {
        let now = Instant::now();
        let retention = self.retention;
        self.entries
            .lock()
            .retain(|_, submitted_at| now.duration_since(*submitted_at) < retention);
    }
}
