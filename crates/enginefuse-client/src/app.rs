use async_trait::async_trait;
#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use crate::errors::ClientResult;

/// The EE2-only mempool-injection method `cosmos_*` RPCs ultimately drain
/// into, called once per buffered message at the `forkchoiceUpdated`
/// boundary.
///
/// `#[async_trait]` boxes the returned future as `Send`, which the RPC
/// frontend's server traits require of anything they call into.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AppClient {
    async fn add_msg(&self, msg: Vec<u8>) -> ClientResult<()>;
}
