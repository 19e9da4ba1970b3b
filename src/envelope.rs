//! The `{"status": ..., "response": ..., "errorMessage": ...}` wrapper every
//! API call answers with, and the decoding modes built on it.
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "ok")]
    Ok,
    #[serde(rename = "error")]
    Error,
    #[serde(rename = "invalid-token")]
    InvalidToken,
}

/// Response wrapper. `T` defaults to an untyped payload so the status can be
/// checked before the payload is interpreted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T = serde_json::Value> {
    pub status: Status,
    #[serde(default = "none")]
    pub response: Option<T>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub inner_error_message: Option<String>,
    #[serde(default)]
    pub stack_trace: Option<String>,
}

fn none<T>() -> Option<T> {
    None
}

impl<T> Envelope<T> {
    /// Map a non-`ok` status to its error; `ok` yields the envelope back.
    pub fn check(self) -> Result<Self> {
        match self.status {
            Status::Ok => Ok(self),
            Status::InvalidToken => Err(Error::InvalidToken),
            Status::Error => Err(Error::Api {
                message: self.error_message.unwrap_or_default(),
                inner: self.inner_error_message,
                stack_trace: self.stack_trace,
            }),
        }
    }

    /// The payload of an `ok` envelope. A missing payload is a decode error.
    pub fn into_payload(self) -> Result<T> {
        self.check()?
            .response
            .ok_or_else(|| Error::decode("status ok but no response payload"))
    }
}

/// Decode an envelope and its payload as `T`. The payload is read into a
/// `serde_json::Value` first, which flattened models need to see numbers as
/// numbers.
pub fn decode_payload<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    let raw: Envelope = serde_json::from_slice(body)?;
    let payload = raw.into_payload()?;
    Ok(serde_json::from_value(payload)?)
}

/// Decode an envelope for an endpoint that returns nothing on success.
pub fn decode_ack(body: &[u8]) -> Result<()> {
    let raw: Envelope = serde_json::from_slice(body)?;
    raw.check().map(|_| ())
}

/// Decode an envelope whose payload fields sit beside `status` at the top
/// level instead of under `response`.
pub fn decode_flat<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    let object: serde_json::Value = serde_json::from_slice(body)?;
    let raw: Envelope = serde_json::from_value(object.clone())?;
    raw.check()?;
    Ok(serde_json::from_value(object)?)
}

/// Plain-text endpoints answer with the file itself on success and with an
/// envelope on failure.
pub fn decode_text(body: &[u8]) -> Result<String> {
    if let Ok(raw) = serde_json::from_slice::<Envelope>(body) {
        raw.check()?;
    }
    String::from_utf8(body.to_vec()).map_err(|e| Error::decode(e.to_string()))
}

/// Whether the bytes parse as an envelope at all, whatever the status.
pub fn is_envelope(body: &[u8]) -> bool {
    serde_json::from_slice::<Envelope<serde::de::IgnoredAny>>(body).is_ok()
}
