//! Repeating-key XOR.
//!
//! The key is its UTF-8 byte sequence; output length always equals input
//! length. XOR is its own inverse, so one function serves both directions.

/// Applies repeating-key XOR. Returns `None` for an empty key.
pub fn apply(data: &[u8], key: &str) -> Option<Vec<u8>> {
    let key = key.as_bytes();
    if key.is_empty() {
        return None;
    }
    Some(data.iter().enumerate().map(|(i, &b)| b ^ key[i % key.len()]).collect())
}
