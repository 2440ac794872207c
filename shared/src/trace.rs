//! Wire-trace envelope
//!
//! Diagnostic record of the raw request/response exchanged with the POS
//! terminal, exposed by the frontend monitor endpoints. Each frame carries
//! the original text plus ASCII and hex renderings for display.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One direction of a POS exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireFrame {
    /// Original text as sent/received
    pub raw: String,
    /// Best-effort ASCII transliteration (non-ASCII bytes replaced)
    pub ascii: String,
    /// Hex encoding of the raw bytes
    pub hex: String,
}

impl WireFrame {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        Self {
            ascii: ascii_safe(&raw),
            hex: hex::encode(raw.as_bytes()),
            raw,
        }
    }
}

/// Trace of a single POS round trip
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireTrace {
    pub request: WireFrame,
    pub response: WireFrame,
    /// Decoded payloads keyed by payload name
    pub payloads: HashMap<String, Value>,
    /// The protocol message that was (or would be) sent to the terminal
    pub pos_message: String,
}

impl WireTrace {
    /// Build a trace from the request text and an already-decoded response
    /// payload. The response frame carries the payload's JSON rendering.
    pub fn new(
        request: impl Into<String>,
        response_payload: &Value,
        payloads: HashMap<String, Value>,
        pos_message: Option<String>,
    ) -> Self {
        let request = request.into();
        let response_text = response_payload.to_string();
        Self {
            pos_message: pos_message.unwrap_or_else(|| request.clone()),
            request: WireFrame::new(request),
            response: WireFrame::new(response_text),
            payloads,
        }
    }
}

/// Replace every non-ASCII character with `?`
fn ascii_safe(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_ascii() { c } else { '?' })
        .collect()
}
