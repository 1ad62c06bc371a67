//! Base64 decoding stage.
//!
//! Strictly `Text → Bytes` with the standard alphabet and mandatory valid
//! padding; a decode failure aborts the tuple upstream. There is no
//! auto-detection of already-decoded payloads.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// Decodes standard Base64, returning `None` on any syntax error.
pub fn decode(text: &str) -> Option<Vec<u8>> {
    STANDARD.decode(text.as_bytes()).ok()
}

/// Encodes bytes to standard Base64 (the inverse used by tests and by users
/// reproducing a discovered chain).
pub fn encode(data: &[u8]) -> String {
    STANDARD.encode(data)
}
