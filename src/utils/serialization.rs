// src/utils/serialization.rs
//! Serialization utilities.
//!
//! Provides the JSON and base64 helpers shared by:
//! - The wallet's identity documents
//! - The CA wire envelope and registrar auth tokens

use serde::{de::DeserializeOwned, Serialize};
use serde_json;

/// Serializes a value to JSON bytes.
///
/// # Arguments
/// * `data` - The value to serialize (must implement `Serialize`)
///
/// # Returns
/// - `Ok(Vec<u8>)` with the JSON representation on success
/// - `Err(serde_json::Error)` if serialization fails
pub fn serialize_bytes<T: Serialize>(data: &T) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(data)
}

/// Deserializes a value from JSON bytes.
///
/// # Arguments
/// * `data` - JSON bytes to deserialize
///
/// # Returns
/// - `Ok(T)` with the deserialized value on success
/// - `Err(serde_json::Error)` if the bytes are not valid JSON for `T`
pub fn deserialize_bytes<T: DeserializeOwned>(data: &[u8]) -> Result<T, serde_json::Error> {
    serde_json::from_slice(data)
}

/// Standard base64 with padding, as used by the CA protocol.
pub fn encode_b64<T: AsRef<[u8]>>(data: T) -> String {
    base64::encode(data)
}

/// Decodes standard base64 into a UTF-8 string (PEM payloads).
pub fn decode_b64_string(data: &str) -> Result<String, String> {
    let bytes = base64::decode(data).map_err(|e| format!("Base64 decoding failed: {}", e))?;
    String::from_utf8(bytes).map_err(|e| format!("Decoded payload is not UTF-8: {}", e))
}
