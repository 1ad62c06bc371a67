//! English-likeness scoring.
//!
//! Rates a candidate plaintext on a deterministic [0.0, 2.0] scale. Payloads
//! containing any non-printable byte score below 1.0 (the printable ratio
//! itself); fully printable payloads score `1.0 + english`, where `english`
//! weighs letter-frequency distance, common-word matches, and word spacing.
//!
//! Scoring is a pure function of the byte content; the reference tables are
//! embedded at compile time and shared read-only.

mod english;

pub use english::{chi_squared, space_bonus, word_match_ratio};

use crate::config::{FREQ_WEIGHT, WORD_WEIGHT};

/// Fraction of bytes that are printable ASCII (32..=126) or `\t`, `\n`, `\r`.
///
/// Empty input is defined as 0.0, so an empty payload can never be a hit.
pub fn printable_ratio(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let printable = data
        .iter()
        .filter(|&&b| (32..=126).contains(&b) || b == b'\t' || b == b'\n' || b == b'\r')
        .count();
    printable as f64 / data.len() as f64
}

/// Scores a candidate plaintext, returning a value in [0.0, 2.0].
pub fn score(data: &[u8]) -> f64 {
    let ratio = printable_ratio(data);
    if ratio < 1.0 {
        return ratio;
    }

    // Fully printable ASCII is valid UTF-8, so this cannot fail here; the
    // fallback keeps the function total anyway.
    let freq = chi_squared(data).map_or(0.0, english::frequency_score);
    let words = match std::str::from_utf8(data) {
        Ok(text) => word_match_ratio(text),
        Err(_) => 0.0,
    };

    let english = (FREQ_WEIGHT * freq + WORD_WEIGHT * words + space_bonus(data)).clamp(0.0, 1.0);
    1.0 + english
}
