use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use enginefuse_client::{
    AppClient, ClientResult, EngineClient, ForkchoiceUpdatedResult, GetPayloadResult,
    MockAppClient, MockEngineClient,
};
use enginefuse_config::PendingTxTracker;
use enginefuse_store::{BlockStore, MsgBuf, PayloadStore};
use enginefuse_types::{
    CompositeBlock, CompositePayload, ExecutionPayload, ForkchoiceState, Hash, PayloadAttributes,
    PayloadId, PayloadStatus,
};
use mockall::predicate::eq;

use super::EngineMux;

/// EE2 in this protocol implements both `EngineClient` and `AppClient`;
/// `mockall::automock` can only mock one trait per struct, so tests compose
/// the two generated mocks behind a thin delegate.
#[derive(Default)]
struct Ee2Mock {
    engine: MockEngineClient,
    app: MockAppClient,
}

#[async_trait]
impl EngineClient for Ee2Mock {
    async fn forkchoice_updated(
        &self,
        state: ForkchoiceState,
        attrs: Option<PayloadAttributes>,
    ) -> ClientResult<ForkchoiceUpdatedResult> {
        self.engine.forkchoice_updated(state, attrs).await
    }

    async fn get_payload(&self, id: PayloadId) -> ClientResult<GetPayloadResult> {
        self.engine.get_payload(id).await
    }

    async fn new_payload(&self, payload: ExecutionPayload) -> ClientResult<PayloadStatus> {
        self.engine.new_payload(payload).await
    }
}

#[async_trait]
impl AppClient for Ee2Mock {
    async fn add_msg(&self, msg: Vec<u8>) -> ClientResult<()> {
        self.app.add_msg(msg).await
    }
}

fn mux(
    ee1: MockEngineClient,
    ee2: Ee2Mock,
) -> EngineMux<MockEngineClient, Ee2Mock> {
    EngineMux::new(
        ee1,
        ee2,
        Arc::new(BlockStore::new()),
        Arc::new(PayloadStore::new()),
        Arc::new(MsgBuf::new()),
        Arc::new(PendingTxTracker::new(Duration::from_secs(300))),
    )
}

fn mux_with_stores(
    ee1: MockEngineClient,
    ee2: Ee2Mock,
    block_store: Arc<BlockStore>,
    payload_store: Arc<PayloadStore>,
    msg_buf: Arc<MsgBuf>,
) -> EngineMux<MockEngineClient, Ee2Mock> {
    EngineMux::new(
        ee1,
        ee2,
        block_store,
        payload_store,
        msg_buf,
        Arc::new(PendingTxTracker::new(Duration::from_secs(300))),
    )
}

#[tokio::test]
async fn empty_forkchoice_is_rejected_without_contacting_backends() {
    // No expectations set on either mock: any call would panic, proving
    // neither backend is contacted.
    let engine_mux = mux(MockEngineClient::new(), Ee2Mock::default());

    let fcs = ForkchoiceState {
        head_block_hash: Hash::ZERO,
        safe_block_hash: Hash::ZERO,
        finalized_block_hash: Hash::ZERO,
    };
    let err = engine_mux.forkchoice_updated(fcs, None).await.unwrap_err();
    assert!(matches!(err, super::EngineMuxError::EmptyForkchoiceState));
}

#[tokio::test]
async fn first_build_fuses_payload_id_and_latest_valid_hash() {
    let block_store = Arc::new(BlockStore::new());
    let payload_store = Arc::new(PayloadStore::new());
    let msg_buf = Arc::new(MsgBuf::new());

    let head_pair = CompositeBlock::new(Hash([0x10; 32]), Hash([0x20; 32]));
    let head_c = block_store.record(head_pair);

    let h1 = Hash([0xAA; 32]);
    let h2 = Hash([0xBB; 32]);
    let p1 = PayloadId([1, 2, 3, 4, 5, 6, 7, 8]);
    let p2 = PayloadId([0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18]);

    let mut ee1 = MockEngineClient::new();
    ee1.expect_forkchoice_updated().times(1).returning(move |_, _| {
        Ok(ForkchoiceUpdatedResult {
            payload_status: PayloadStatus::valid(Some(h1)),
            payload_id: Some(p1),
        })
    });

    let mut ee2_engine = MockEngineClient::new();
    ee2_engine
        .expect_forkchoice_updated()
        .times(1)
        .returning(move |_, _| {
            Ok(ForkchoiceUpdatedResult {
                payload_status: PayloadStatus::valid(Some(h2)),
                payload_id: Some(p2),
            })
        });
    let ee2 = Ee2Mock {
        engine: ee2_engine,
        app: MockAppClient::new(),
    };

    let engine_mux = mux_with_stores(ee1, ee2, block_store.clone(), payload_store.clone(), msg_buf);

    let fcs = ForkchoiceState {
        head_block_hash: head_c,
        safe_block_hash: Hash::ZERO,
        finalized_block_hash: Hash::ZERO,
    };
    let result = engine_mux
        .forkchoice_updated(fcs, Some(PayloadAttributes(serde_json::json!({}))))
        .await
        .unwrap();

    let expected_payload_id = CompositePayload::new(Some(p1), Some(p2)).fuse();
    let expected_lvh = CompositeBlock::new(h1, h2).fuse();

    assert_eq!(result.payload_id, Some(expected_payload_id));
    assert_eq!(result.payload_status.latest_valid_hash, Some(expected_lvh));
    assert_eq!(
        payload_store.defuse(expected_payload_id).unwrap(),
        CompositePayload::new(Some(p1), Some(p2))
    );
    assert_eq!(
        block_store.defuse(expected_lvh).unwrap(),
        CompositeBlock::new(h1, h2)
    );
}

#[tokio::test]
async fn get_payload_fuses_block_and_parent_hash() {
    let block_store = Arc::new(BlockStore::new());
    let payload_store = Arc::new(PayloadStore::new());

    let p1 = PayloadId([1; 8]);
    let p2 = PayloadId([2; 8]);
    let composite_payload_id = payload_store.record(CompositePayload::new(Some(p1), Some(p2)));

    let gc = Hash([0xCC; 32]);
    let ga = Hash([0xAA; 32]);
    let dd = Hash([0xDD; 32]);
    let bb = Hash([0xBB; 32]);

    let mut ee1 = MockEngineClient::new();
    ee1.expect_get_payload().times(1).returning(move |_| {
        Ok(GetPayloadResult {
            execution_payload: ExecutionPayload {
                block_hash: gc,
                parent_hash: ga,
                rest: Default::default(),
            },
            rest: Default::default(),
        })
    });

    let mut ee2_engine = MockEngineClient::new();
    ee2_engine.expect_get_payload().times(1).returning(move |_| {
        Ok(GetPayloadResult {
            execution_payload: ExecutionPayload {
                block_hash: dd,
                parent_hash: bb,
                rest: Default::default(),
            },
            rest: Default::default(),
        })
    });
    let ee2 = Ee2Mock {
        engine: ee2_engine,
        app: MockAppClient::new(),
    };

    let engine_mux = mux_with_stores(
        ee1,
        ee2,
        block_store.clone(),
        payload_store.clone(),
        Arc::new(MsgBuf::new()),
    );

    let result = engine_mux.get_payload(composite_payload_id).await.unwrap();

    let expected_block_hash = CompositeBlock::new(gc, dd).fuse();
    let expected_parent_hash = CompositeBlock::new(ga, bb).fuse();

    assert_eq!(result.execution_payload.block_hash, expected_block_hash);
    assert_eq!(result.execution_payload.parent_hash, expected_parent_hash);
    assert!(block_store.defuse(expected_block_hash).is_ok());
    assert!(block_store.defuse(expected_parent_hash).is_ok());
}

#[tokio::test]
async fn new_payload_round_trips_and_fuses_latest_valid_hash_matching_get_payload() {
    let block_store = Arc::new(BlockStore::new());

    let gc = Hash([0xCC; 32]);
    let ga = Hash([0xAA; 32]);
    let dd = Hash([0xDD; 32]);
    let bb = Hash([0xBB; 32]);

    // Pre-populate as `get_payload` would have in scenario 3.
    let block_hash_c = block_store.record(CompositeBlock::new(gc, dd));
    let parent_hash_c = block_store.record(CompositeBlock::new(ga, bb));

    let mut ee1 = MockEngineClient::new();
    ee1.expect_new_payload()
        .with(eq(ExecutionPayload {
            block_hash: gc,
            parent_hash: ga,
            rest: Default::default(),
        }))
        .times(1)
        .returning(move |_| Ok(PayloadStatus::valid(Some(gc))));

    let mut ee2_engine = MockEngineClient::new();
    ee2_engine
        .expect_new_payload()
        .with(eq(ExecutionPayload {
            block_hash: dd,
            parent_hash: bb,
            rest: Default::default(),
        }))
        .times(1)
        .returning(move |_| Ok(PayloadStatus::valid(Some(dd))));
    let ee2 = Ee2Mock {
        engine: ee2_engine,
        app: MockAppClient::new(),
    };

    let engine_mux = mux_with_stores(
        ee1,
        ee2,
        block_store.clone(),
        Arc::new(PayloadStore::new()),
        Arc::new(MsgBuf::new()),
    );

    let payload_c = ExecutionPayload {
        block_hash: block_hash_c,
        parent_hash: parent_hash_c,
        rest: Default::default(),
    };
    let status = engine_mux.new_payload(payload_c).await.unwrap();

    assert_eq!(status.status, "VALID");
    assert_eq!(status.latest_valid_hash, Some(block_hash_c));
}

#[tokio::test]
async fn message_buffering_drains_exactly_once_in_order() {
    let msg_buf = Arc::new(MsgBuf::new());
    msg_buf.append(b"cosmos.channel.v1.MsgChannelOpenInit".to_vec());
    assert_eq!(msg_buf.len(), 1);

    let head_pair_store = Arc::new(BlockStore::new());
    let head_c = head_pair_store.record(CompositeBlock::new(Hash([1; 32]), Hash([2; 32])));

    let mut ee1 = MockEngineClient::new();
    ee1.expect_forkchoice_updated().times(1).returning(|_, _| {
        Ok(ForkchoiceUpdatedResult {
            payload_status: PayloadStatus::valid(None),
            payload_id: None,
        })
    });

    let mut ee2_engine = MockEngineClient::new();
    ee2_engine
        .expect_forkchoice_updated()
        .times(1)
        .returning(|_, _| {
            Ok(ForkchoiceUpdatedResult {
                payload_status: PayloadStatus::valid(None),
                payload_id: None,
            })
        });
    let mut ee2_app = MockAppClient::new();
    ee2_app
        .expect_add_msg()
        .with(eq(b"cosmos.channel.v1.MsgChannelOpenInit".to_vec()))
        .times(1)
        .returning(|_| Ok(()));
    let ee2 = Ee2Mock {
        engine: ee2_engine,
        app: ee2_app,
    };

    let engine_mux = mux_with_stores(
        ee1,
        ee2,
        head_pair_store,
        Arc::new(PayloadStore::new()),
        msg_buf.clone(),
    );

    let fcs = ForkchoiceState {
        head_block_hash: head_c,
        safe_block_hash: Hash::ZERO,
        finalized_block_hash: Hash::ZERO,
    };
    engine_mux.forkchoice_updated(fcs, None).await.unwrap();

    assert!(msg_buf.is_empty());
}

#[tokio::test]
async fn defuse_miss_rejects_new_payload_without_contacting_backends() {
    let engine_mux = mux(MockEngineClient::new(), Ee2Mock::default());

    let payload = ExecutionPayload {
        block_hash: Hash([0x99; 32]),
        parent_hash: Hash([0x98; 32]),
        rest: Default::default(),
    };
    let err = engine_mux.new_payload(payload).await.unwrap_err();
    assert!(matches!(err, super::EngineMuxError::DefuseMiss(_)));
}
