use serde::{Deserialize, Serialize};

use crate::hash::Hash;

/// The three block references carried by `engine_forkchoiceUpdated*`.
///
/// Every field is a composite identifier at the driver boundary; `EngineMux`
/// defuses each one independently before forwarding to either backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForkchoiceState {
    pub head_block_hash: Hash,
    pub safe_block_hash: Hash,
    pub finalized_block_hash: Hash,
}

/// Payload-building parameters. The interceptor never interprets these - they
/// are opaque to both the composite-ID machinery and the OP-stack schema, so
/// they are carried as a raw JSON value and duplicated verbatim to both
/// backends.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PayloadAttributes(pub serde_json::Value);

/// Result of a `forkchoiceUpdated` or `newPayload` call.
///
/// `latest_valid_hash` is a composite identifier when both backends agreed;
/// see `EngineMux::new_payload` for the missing-value fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_valid_hash: Option<Hash>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_error: Option<String>,
}

impl PayloadStatus {
    pub fn valid(latest_valid_hash: Option<Hash>) -> Self {
        Self {
            status: "VALID".to_string(),
            latest_valid_hash,
            validation_error: None,
        }
    }
}

/// An execution payload as submitted to `newPayload` or returned from
/// `getPayload`.
///
/// Every field the interceptor doesn't need to rewrite is preserved verbatim
/// in `rest`; `block_hash` and `parent_hash` are pulled out because they are
/// exactly the two fields the composite-ID machinery substitutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionPayload {
    #[serde(rename = "blockHash")]
    pub block_hash: Hash,
    #[serde(rename = "parentHash")]
    pub parent_hash: Hash,
    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>,
}

impl ExecutionPayload {
    /// Returns a copy with `block_hash`/`parent_hash` substituted, leaving
    /// every other field untouched. Used to rewrite a backend-native payload
    /// into the composite-identified one handed back to the driver, and vice
    /// versa when defusing for submission to a specific backend.
    pub fn with_hashes(&self, block_hash: Hash, parent_hash: Hash) -> Self {
        Self {
            block_hash,
            parent_hash,
            rest: self.rest.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forkchoice_state_serializes_camel_case() {
        let fcs = ForkchoiceState {
            head_block_hash: Hash::ZERO,
            safe_block_hash: Hash::ZERO,
            finalized_block_hash: Hash::ZERO,
        };
        let v = serde_json::to_value(&fcs).unwrap();
        assert!(v.get("headBlockHash").is_some());
        assert!(v.get("safeBlockHash").is_some());
        assert!(v.get("finalizedBlockHash").is_some());
    }

    #[test]
    fn execution_payload_round_trips_unknown_fields() {
        let raw = serde_json::json!({
            "blockHash": Hash([1u8; 32]).to_string(),
            "parentHash": Hash([2u8; 32]).to_string(),
            "blockNumber": "0x1",
            "transactions": [],
        });
        let payload: ExecutionPayload = serde_json::from_value(raw).unwrap();
        assert_eq!(payload.rest.get("blockNumber").unwrap(), "0x1");
        let rewritten = payload.with_hashes(Hash([3u8; 32]), Hash([4u8; 32]));
        assert_eq!(rewritten.rest.get("blockNumber").unwrap(), "0x1");
        assert_eq!(rewritten.block_hash, Hash([3u8; 32]));
    }
}
