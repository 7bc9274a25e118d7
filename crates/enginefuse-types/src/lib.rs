//! Wire and data-model types shared by every crate fanning a call out to the
//! two execution backends.

mod composite;
mod errors;
mod hash;
mod payload;

pub use composite::{CompositeBlock, CompositePayload};
pub use errors::TypesError;
pub use hash::{Hash, PayloadId};
pub use payload::{ExecutionPayload, ForkchoiceState, PayloadAttributes, PayloadStatus};
