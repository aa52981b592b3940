//! JSON decoding against a declared shape.

use serde::de::DeserializeOwned;
use thiserror::Error;

/// The payload did not match the expected shape.
///
/// Callers treat this as "no data available"; it never carries a partial
/// value.
#[derive(Debug, Error)]
#[error("Failed to decode {target}: {source}")]
pub struct DecodeError {
    pub target: &'static str,
    #[source]
    pub source: serde_json::Error,
}

/// Decode `bytes` as JSON into `T`.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeError> {
    serde_json::from_slice(bytes).map_err(|source| {
        let target = std::any::type_name::<T>();
        tracing::debug!(target_type = target, error = %source, "Decoding failed");
        DecodeError { target, source }
    })
}
