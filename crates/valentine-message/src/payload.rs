//! Messages packed into (and unpacked from) the `data` query parameter.
//!
//! Decoding runs base64 → inflate → JSON → schema and stops at the first step
//! that fails. Every failure is reported as the same [`Error::InvalidPayload`]
//! so a crafted link cannot reveal which step rejected it.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::compression::{compress_string_to_base64, decompress, from_base64};
use crate::message::CombinedMessage;
use crate::schema::Schema;
use crate::types::MAX_ENCODED_PAYLOAD_LEN;
use crate::{Error, Result};

/// The transport form of a message: `{ "data": "<base64>" }`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EncodedPayload {
    pub data: String,
}

impl EncodedPayload {
    pub fn new(data: impl Into<String>) -> Self {
        Self { data: data.into() }
    }

    pub fn encode<T: Schema>(value: &T) -> Result<Self> {
        Ok(Self {
            data: encode_payload(value)?,
        })
    }

    pub fn decode<T: Schema>(&self) -> Result<T> {
        decode_payload(&self.data)
    }

    pub fn decode_or_default<T: Schema + Default>(&self) -> T {
        decode_payload_or_default(&self.data)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl fmt::Display for EncodedPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.data)
    }
}

/// Validates `value` again and packs the normalized form as compressed
/// base64 JSON, so decoding yields exactly what was packed.
pub fn encode_payload<T: Schema>(value: &T) -> Result<String> {
    let normalized = value.revalidate()?;
    compress_string_to_base64(&normalized.to_value()?.to_string())
}

/// Unpacks a payload, propagating failure so the caller decides what to do.
pub fn decode_payload<T: Schema>(data: &str) -> Result<T> {
    if data.len() > MAX_ENCODED_PAYLOAD_LEN {
        return Err(reject("length", data.len()));
    }
    let bytes = from_base64(data).map_err(|e| reject("base64", e))?;
    let json = decompress(&bytes).map_err(|e| reject("inflate", e))?;
    let raw: Value = serde_json::from_str(&json).map_err(|e| reject("json", e))?;
    T::validate(&raw).map_err(|e| reject("schema", e))
}

/// Unpacks a payload from a shared link, using the default value for anything
/// stale, truncated or tampered with.
pub fn decode_payload_or_default<T: Schema + Default>(data: &str) -> T {
    match decode_payload(data) {
        Ok(value) => value,
        Err(_) => {
            warn!("shared payload could not be decoded, using the default message");
            T::default()
        }
    }
}

pub fn encode_message(message: &CombinedMessage) -> Result<String> {
    encode_payload(message)
}

pub fn decode_message(data: &str) -> Result<CombinedMessage> {
    decode_payload(data)
}

pub fn decode_message_or_default(data: &str) -> CombinedMessage {
    decode_payload_or_default(data)
}

fn reject(step: &'static str, cause: impl fmt::Display) -> Error {
    debug!(step, cause = %cause, "rejected payload");
    Error::InvalidPayload
}
