//! Reversal stage.
//!
//! Parameterless; reverses characters of text or bytes of a binary payload
//! and keeps the payload kind.

/// Reverses a text payload character-wise.
pub fn text(s: &str) -> String {
    s.chars().rev().collect()
}

/// Reverses a binary payload byte-wise.
pub fn bytes(data: &[u8]) -> Vec<u8> {
    data.iter().rev().copied().collect()
}
