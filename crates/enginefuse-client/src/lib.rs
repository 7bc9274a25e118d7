//! Backend RPC clients: the EE1 (authenticated) and EE2 (unauthenticated)
//! links `EngineMux`, `EthPass` and `AppMsg` fan calls out through.

mod app;
mod engine;
mod errors;
mod eth;
mod http;
mod jwt;

pub use app::AppClient;
pub use engine::{EngineClient, ForkchoiceUpdatedResult, GetPayloadResult};
pub use errors::{ClientError, ClientResult};
pub use eth::{BlockLookup, EthPassThrough};
pub use http::{Ee1Client, Ee2Client};
pub use jwt::build_jwt_secret;

#[cfg(any(test, feature = "test-utils"))]
pub use app::MockAppClient;
#[cfg(any(test, feature = "test-utils"))]
pub use engine::MockEngineClient;
#[cfg(any(test, feature = "test-utils"))]
pub use eth::{MockBlockLookup, MockEthPassThrough};
