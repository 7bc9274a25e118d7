use sha2::{Digest, Sha256};

use crate::hash::{Hash, PayloadId};

/// A block identifier fused from both backends' native hashes.
///
/// `Hash::fuse` is `sha256(ee1 ++ ee2)`; it is deterministic and order
/// sensitive, so callers must always place the EE1 (geth-like) hash first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositeBlock {
    pub ee1_hash: Hash,
    pub ee2_hash: Hash,
}

impl CompositeBlock {
    pub fn new(ee1_hash: Hash, ee2_hash: Hash) -> Self {
        Self { ee1_hash, ee2_hash }
    }

    /// Fuses the pair into the single composite hash handed to the driver.
    pub fn fuse(&self) -> Hash {
        let mut hasher = Sha256::new();
        hasher.update(self.ee1_hash.as_bytes());
        hasher.update(self.ee2_hash.as_bytes());
        let digest = hasher.finalize();
        let mut out = [0u8; 32];
        out.copy_from_slice(&digest);
        Hash(out)
    }
}

/// A payload identifier fused from both backends' native payload IDs.
///
/// Either side may be absent (the backend returned no payload ID, or the
/// call to it failed); an absent side contributes an empty byte string to
/// the digest rather than short-circuiting the fuse, matching the
/// `CompositePayload` construction in the upstream driver-facing protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositePayload {
    pub ee1_id: Option<PayloadId>,
    pub ee2_id: Option<PayloadId>,
}

impl CompositePayload {
    pub fn new(ee1_id: Option<PayloadId>, ee2_id: Option<PayloadId>) -> Self {
        Self { ee1_id, ee2_id }
    }

    /// Fuses the pair into the 8-byte composite payload ID handed to the
    /// driver: `sha256(s1 ++ s2)[0..8]`, where `si` is the textual hex
    /// rendering of the backend's payload ID, or empty if absent.
    pub fn fuse(&self) -> PayloadId {
        let s1 = self.ee1_id.map(|id| id.to_string()).unwrap_or_default();
        let s2 = self.ee2_id.map(|id| id.to_string()).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(s1.as_bytes());
        hasher.update(s2.as_bytes());
        let digest = hasher.finalize();
        let mut out = [0u8; 8];
        out.copy_from_slice(&digest[..8]);
        PayloadId(out)
    }
}
