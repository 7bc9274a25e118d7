use enginefuse_client::ClientError;
use enginefuse_engine::EngineMuxError;
use enginefuse_store::StoreError;
use jsonrpsee::types::{
    error::INVALID_PARAMS_CODE,
    ErrorObjectOwned,
};

/// `go-ethereum/beacon/engine.InvalidForkChoiceState`.
const INVALID_FORKCHOICE_STATE_CODE: i32 = -38002;
/// `go-ethereum/beacon/engine.UnknownPayload`.
const UNKNOWN_PAYLOAD_CODE: i32 = -38001;
/// Generic downstream-unavailable server error, no Engine-API code fits.
const SERVER_ERROR_CODE: i32 = -32000;

/// Maps an [`EngineMuxError`] to the JSON-RPC error object handed back to
/// the driver, using the Engine-API's own error code conventions.
pub(crate) fn map_engine_mux_error(err: EngineMuxError) -> ErrorObjectOwned {
    match err {
        EngineMuxError::EmptyForkchoiceState => {
            ErrorObjectOwned::owned(INVALID_FORKCHOICE_STATE_CODE, err.to_string(), None::<()>)
        }
        EngineMuxError::DefuseMiss(StoreError::UnknownPayload(_)) => {
            ErrorObjectOwned::owned(UNKNOWN_PAYLOAD_CODE, err.to_string(), None::<()>)
        }
        EngineMuxError::DefuseMiss(StoreError::UnknownBlock(_)) => {
            ErrorObjectOwned::owned(INVALID_PARAMS_CODE, err.to_string(), None::<()>)
        }
        EngineMuxError::MissingEe1PayloadId => {
            ErrorObjectOwned::owned(INVALID_PARAMS_CODE, err.to_string(), None::<()>)
        }
        EngineMuxError::Ee1Unavailable(_) => {
            ErrorObjectOwned::owned(SERVER_ERROR_CODE, err.to_string(), None::<()>)
        }
    }
}

/// Maps a direct [`ClientError`] (the passthrough `eth_*` and `cosmos_*`
/// paths, which never touch `EngineMux`) to a JSON-RPC error object.
pub(crate) fn map_client_error(err: ClientError) -> ErrorObjectOwned {
    ErrorObjectOwned::owned(SERVER_ERROR_CODE, err.to_string(), None::<()>)
}

/// Maps a [`StoreError`] surfaced outside `EngineMux` (`eth_getBlockByHash`'s
/// own `BlockStore` defuse) to a JSON-RPC error object.
pub(crate) fn map_store_error(err: StoreError) -> ErrorObjectOwned {
    match err {
        StoreError::UnknownBlock(_) => {
            ErrorObjectOwned::owned(INVALID_PARAMS_CODE, err.to_string(), None::<()>)
        }
        StoreError::UnknownPayload(_) => {
            ErrorObjectOwned::owned(UNKNOWN_PAYLOAD_CODE, err.to_string(), None::<()>)
        }
    }
}
