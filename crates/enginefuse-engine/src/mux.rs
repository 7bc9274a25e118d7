use std::sync::Arc;

use enginefuse_client::{AppClient, EngineClient, ForkchoiceUpdatedResult, GetPayloadResult};
use enginefuse_config::PendingTxTracker;
use enginefuse_store::{BlockStore, MsgBuf, PayloadStore};
use enginefuse_types::{CompositeBlock, CompositePayload, ForkchoiceState, PayloadAttributes, PayloadId, PayloadStatus};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::errors::EngineMuxError;

/// The dual-engine fan-out and identifier-fusion state machine.
///
/// `EngineMux` implements the three Engine-API methods the interceptor
/// fronts: `forkchoiceUpdated`, `getPayload`, `newPayload`. All three share a
/// single [`tokio::sync::Mutex`] so a `forkchoiceUpdated` call can never
/// interleave its `MsgBuf` drain with a concurrent call on the same mux.
#[derive(Debug)]
pub struct EngineMux<E1, E2> {
    ee1: E1,
    ee2: E2,
    block_store: Arc<BlockStore>,
    payload_store: Arc<PayloadStore>,
    msg_buf: Arc<MsgBuf>,
    pending_tx: Arc<PendingTxTracker>,
    lock: Mutex<()>,
}

impl<E1, E2> EngineMux<E1, E2>
where
    E1: EngineClient,
    E2: EngineClient + AppClient,
{
    pub fn new(
        ee1: E1,
        ee2: E2,
        block_store: Arc<BlockStore>,
        payload_store: Arc<PayloadStore>,
        msg_buf: Arc<MsgBuf>,
        pending_tx: Arc<PendingTxTracker>,
    ) -> Self {
        Self {
            ee1,
            ee2,
            block_store,
            payload_store,
            msg_buf,
            pending_tx,
            lock: Mutex::new(()),
        }
    }

    /// `forkchoiceUpdated`.
    pub async fn forkchoice_updated(
        &self,
        fcs_c: ForkchoiceState,
        pa: Option<PayloadAttributes>,
    ) -> Result<ForkchoiceUpdatedResult, EngineMuxError> {
        if fcs_c.head_block_hash.is_zero() {
            return Err(EngineMuxError::EmptyForkchoiceState);
        }

        let _guard = self.lock.lock().await;

        // 1. Defuse.
        let head = self.block_store.defuse(fcs_c.head_block_hash)?;
        let safe = self.block_store.defuse(fcs_c.safe_block_hash)?;
        let finalized = self.block_store.defuse(fcs_c.finalized_block_hash)?;

        let fcs1 = ForkchoiceState {
            head_block_hash: head.ee1_hash,
            safe_block_hash: safe.ee1_hash,
            finalized_block_hash: finalized.ee1_hash,
        };
        let fcs2 = ForkchoiceState {
            head_block_hash: head.ee2_hash,
            safe_block_hash: safe.ee2_hash,
            finalized_block_hash: finalized.ee2_hash,
        };

        // 2. EE1 is authoritative: abort on failure, EE2 is never called.
        info!(?fcs1, "forwarding forkchoiceUpdated to EE1");
        let ee1_result = self
            .ee1
            .forkchoice_updated(fcs1, pa.clone())
            .await
            .map_err(EngineMuxError::ee1_unavailable)?;

        // 3. EE2 is best-effort.
        info!(?fcs2, "forwarding forkchoiceUpdated to EE2");
        let ee2_result = match self.ee2.forkchoice_updated(fcs2, pa).await {
            Ok(result) => Some(result),
            Err(err) => {
                warn!(%err, "EE2 forkchoiceUpdated failed, continuing with EE1 result only");
                None
            }
        };

        // 4. Drain MsgBuf into EE2. Only messages buffered before this point
        // are flushed; concurrent appends remain for the next boundary.
        let pending = self.msg_buf.drain();
        if !pending.is_empty() {
            info!(count = pending.len(), "draining MsgBuf into EE2");
        }
        for msg in pending {
            if let Err(err) = self.ee2.add_msg(msg).await {
                warn!(%err, "failed to forward buffered message to EE2, skipping");
            }
        }
        self.pending_tx.prune();

        // 5. Fuse payload IDs.
        let ee1_payload_id = ee1_result.payload_id;
        let ee2_payload_id = ee2_result.as_ref().and_then(|r| r.payload_id);
        let composite_payload = CompositePayload::new(ee1_payload_id, ee2_payload_id);
        let payload_id = self.payload_store.record(composite_payload);

        // 6. Fuse latestValidHash.
        let ee1_lvh = ee1_result.payload_status.latest_valid_hash;
        let ee2_lvh = ee2_result.and_then(|r| r.payload_status.latest_valid_hash);
        let fused_lvh = match (ee1_lvh, ee2_lvh) {
            (Some(h1), Some(h2)) => Some(self.block_store.record(CompositeBlock::new(h1, h2))),
            // Can't fuse what one side didn't produce; pass EE1's own value
            // through unchanged rather than unconditionally dereferencing it.
            _ => ee1_lvh,
        };

        let mut status = ee1_result.payload_status;
        status.latest_valid_hash = fused_lvh;

        info!(%payload_id, "completed forkchoiceUpdated");

        Ok(ForkchoiceUpdatedResult {
            payload_status: status,
            payload_id: Some(payload_id),
        })
    }

    /// `getPayload`.
    pub async fn get_payload(&self, id: PayloadId) -> Result<GetPayloadResult, EngineMuxError> {
        let _guard = self.lock.lock().await;

        let pair = self.payload_store.defuse(id)?;
        let ee1_id = pair.ee1_id.ok_or(EngineMuxError::MissingEe1PayloadId)?;

        let mut ee1_envelope = self
            .ee1
            .get_payload(ee1_id)
            .await
            .map_err(EngineMuxError::ee1_unavailable)?;

        let ee2_envelope = match pair.ee2_id {
            Some(ee2_id) => match self.ee2.get_payload(ee2_id).await {
                Ok(envelope) => Some(envelope),
                Err(err) => {
                    warn!(%err, "EE2 getPayload failed, fusing with a zero EE2 hash");
                    None
                }
            },
            None => {
                warn!("composite payload has no EE2 payload id, fusing with a zero EE2 hash");
                None
            }
        };

        let degraded = ee2_envelope.is_none();
        let ee2_block_hash = ee2_envelope
            .as_ref()
            .map(|e| e.execution_payload.block_hash)
            .unwrap_or_default();
        let ee2_parent_hash = ee2_envelope
            .as_ref()
            .map(|e| e.execution_payload.parent_hash)
            .unwrap_or_default();

        let block_hash_c = self.block_store.record(CompositeBlock::new(
            ee1_envelope.execution_payload.block_hash,
            ee2_block_hash,
        ));
        let parent_hash_c = self.block_store.record(CompositeBlock::new(
            ee1_envelope.execution_payload.parent_hash,
            ee2_parent_hash,
        ));

        if degraded {
            warn!(%block_hash_c, %parent_hash_c, "composite recorded with a degraded (zero) EE2 side");
        }

        ee1_envelope.execution_payload = ee1_envelope
            .execution_payload
            .with_hashes(block_hash_c, parent_hash_c);

        Ok(ee1_envelope)
    }

    /// `newPayload`.
    pub async fn new_payload(
        &self,
        payload_c: enginefuse_types::ExecutionPayload,
    ) -> Result<PayloadStatus, EngineMuxError> {
        let _guard = self.lock.lock().await;

        let block_pair = self.block_store.defuse(payload_c.block_hash)?;
        let parent_pair = self.block_store.defuse(payload_c.parent_hash)?;

        let ee1_payload = payload_c.with_hashes(block_pair.ee1_hash, parent_pair.ee1_hash);
        let ee1_status = self
            .ee1
            .new_payload(ee1_payload)
            .await
            .map_err(EngineMuxError::ee1_unavailable)?;

        let ee2_payload = payload_c.with_hashes(block_pair.ee2_hash, parent_pair.ee2_hash);
        let ee2_status = match self.ee2.new_payload(ee2_payload).await {
            Ok(status) => Some(status),
            Err(err) => {
                warn!(%err, "EE2 newPayload failed, continuing with EE1 status only");
                None
            }
        };

        if ee1_status.status == "VALID" {
            if let Some(ref s2) = ee2_status {
                if s2.status != "VALID" {
                    warn!(
                        ee1_status = %ee1_status.status,
                        ee2_status = %s2.status,
                        "EE1 reported VALID while EE2 diverged; returning VALID per EE1-authoritative policy"
                    );
                }
            }
        }

        let fused_lvh = match (
            ee1_status.latest_valid_hash,
            ee2_status.and_then(|s| s.latest_valid_hash),
        ) {
            (Some(h1), Some(h2)) => Some(self.block_store.record(CompositeBlock::new(h1, h2))),
            _ => ee1_status.latest_valid_hash,
        };

        let mut result = ee1_status;
        result.latest_valid_hash = fused_lvh;
        Ok(result)
    }
}
