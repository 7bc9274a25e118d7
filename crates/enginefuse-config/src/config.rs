use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Accepted log levels: `trace`, `debug`, `info`, `warn`, `error`, `crit`.
/// `Crit` has no direct `tracing` equivalent and is mapped to `ERROR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Crit,
}

impl LogLevel {
    pub fn as_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error | Self::Crit => tracing::Level::ERROR,
        }
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        Self::Info
    }
}

/// Output encoding for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

fn default_engine_server_addr() -> String {
    "127.0.0.1:9000".to_string()
}

fn default_max_batch_requests() -> u32 {
    100
}

fn default_max_response_body_size() -> u32 {
    10 * 1024 * 1024
}

fn default_pending_tx_retention_secs() -> u64 {
    300
}

fn default_backend_request_timeout_ms() -> u64 {
    10_000
}

/// On-disk JSON configuration for the interceptor binary.
///
/// Carries the addresses and auth material for both backend links
/// (`gethEngineAddr`, `gethAuthSecret`, `peptideEngineAddr`), the RPC bind
/// address, and the ambient fields `logLevel`, `logFormat`,
/// `maxBatchRequests`, `maxResponseBodySize` and `pendingTxRetentionSecs`.
///
/// `gethAuthSecret` is accepted as a hex string; see `hex_secret` below.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub log_level: LogLevel,

    #[serde(default)]
    pub log_format: LogFormat,

    pub geth_engine_addr: String,

    #[serde(default, with = "hex_secret")]
    pub geth_auth_secret: Vec<u8>,

    pub peptide_engine_addr: String,

    #[serde(default = "default_engine_server_addr")]
    pub engine_server_addr: String,

    #[serde(default = "default_max_batch_requests")]
    pub max_batch_requests: u32,

    #[serde(default = "default_max_response_body_size")]
    pub max_response_body_size: u32,

    #[serde(default = "default_pending_tx_retention_secs")]
    pub pending_tx_retention_secs: u64,

    /// Per-call deadline applied to every outbound `EE1`/`EE2` request (§5:
    /// "each outbound call carries a request-scoped deadline").
    #[serde(default = "default_backend_request_timeout_ms")]
    pub backend_request_timeout_ms: u64,
}

impl Config {
    /// Reads and parses the config file at `path`. There is no implicit
    /// fallback to defaults when the file is missing - the CLI always passes
    /// an explicit path (defaulting to `config.json`).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

mod hex_secret {
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(d)?;
        let stripped = s.strip_prefix("0x").unwrap_or(&s);
        hex::decode(stripped).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_config_with_defaults() {
        let raw = r#"{
            "gethEngineAddr": "http://localhost:8551",
            "peptideEngineAddr": "http://localhost:8552"
        }"#;
        let config: Config = serde_json::from_str(raw).unwrap();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.log_format, LogFormat::Text);
        assert!(config.geth_auth_secret.is_empty());
        assert_eq!(config.engine_server_addr, "127.0.0.1:9000");
        assert_eq!(config.max_batch_requests, 100);
        assert_eq!(config.backend_request_timeout_ms, 10_000);
    }

    #[test]
    fn parses_hex_secret() {
        let raw = r#"{
            "gethEngineAddr": "http://localhost:8551",
            "gethAuthSecret": "0xaabbcc",
            "peptideEngineAddr": "http://localhost:8552"
        }"#;
        let config: Config = serde_json::from_str(raw).unwrap();
        assert_eq!(config.geth_auth_secret, vec![0xaa, 0xbb, 0xcc]);
    }

    #[test]
    fn rejects_malformed_secret_hex() {
        let raw = r#"{
            "gethEngineAddr": "http://localhost:8551",
            "gethAuthSecret": "zz",
            "peptideEngineAddr": "http://localhost:8552"
        }"#;
        assert!(serde_json::from_str::<Config>(raw).is_err());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Config::from_file("/nonexistent/path/config.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
