//! English reference statistics and sub-scores.

use std::sync::LazyLock;

use hashbrown::HashSet;

use crate::config::{
    CHI2_NORMALIZATION, SPACE_BONUS_MAX, SPACE_RATIO_MAX, SPACE_RATIO_MIN, SPACE_RATIO_PEAK_HI,
    SPACE_RATIO_PEAK_LO,
};

/// Relative frequency of each letter A–Z in English text.
const LETTER_FREQUENCIES: [f64; 26] = [
    0.08167, // a
    0.01492, // b
    0.02782, // c
    0.04253, // d
    0.12702, // e
    0.02228, // f
    0.02015, // g
    0.06094, // h
    0.06966, // i
    0.00153, // j
    0.00772, // k
    0.04025, // l
    0.02406, // m
    0.06749, // n
    0.07507, // o
    0.01929, // p
    0.00095, // q
    0.05987, // r
    0.06327, // s
    0.09056, // t
    0.02758, // u
    0.00978, // v
    0.02360, // w
    0.00150, // x
    0.01974, // y
    0.00074, // z
];

/// Common English words, one per line, uppercased at load.
static COMMON_WORDS: LazyLock<HashSet<String>> = LazyLock::new(|| {
    include_str!("../../datasets/common_words.txt")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_ascii_uppercase)
        .collect()
});

/// χ² distance between the observed A–Z distribution and English.
///
/// Letters are case-folded; non-letters are ignored. Returns `None` when the
/// input contains no letters at all.
pub fn chi_squared(data: &[u8]) -> Option<f64> {
    let mut counts = [0u32; 26];
    let mut total = 0u32;
    for &b in data {
        if b.is_ascii_alphabetic() {
            counts[(b.to_ascii_lowercase() - b'a') as usize] += 1;
            total += 1;
        }
    }
    if total == 0 {
        return None;
    }

    let total = f64::from(total);
    let mut distance = 0.0;
    for (count, expected) in counts.iter().zip(LETTER_FREQUENCIES) {
        let observed = f64::from(*count) / total;
        let diff = observed - expected;
        distance += diff * diff / expected;
    }
    Some(distance)
}

/// Maps a χ² distance onto [0, 1]: 1.0 at a perfect match, 0.0 at or past
/// [`CHI2_NORMALIZATION`].
#[inline]
pub fn frequency_score(chi2: f64) -> f64 {
    (1.0 - chi2 / CHI2_NORMALIZATION).max(0.0)
}

/// Fraction of whitespace-delimited tokens found in the common-word list.
///
/// Tokens are trimmed of leading/trailing punctuation and uppercased before
/// lookup; the denominator counts every token. No tokens means 0.0.
pub fn word_match_ratio(text: &str) -> f64 {
    let mut tokens = 0usize;
    let mut matched = 0usize;
    for token in text.split_ascii_whitespace() {
        tokens += 1;
        let word = token
            .trim_matches(|c: char| !c.is_ascii_alphanumeric())
            .to_ascii_uppercase();
        if COMMON_WORDS.contains(word.as_str()) {
            matched += 1;
        }
    }
    if tokens == 0 {
        return 0.0;
    }
    matched as f64 / tokens as f64
}

/// Word-spacing bonus: a triangular function of the space ratio.
///
/// Zero outside [`SPACE_RATIO_MIN`, `SPACE_RATIO_MAX`], a flat
/// [`SPACE_BONUS_MAX`] on the English-typical plateau
/// [`SPACE_RATIO_PEAK_LO`, `SPACE_RATIO_PEAK_HI`], linear in between.
pub fn space_bonus(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let ratio = data.iter().filter(|&&b| b == b' ').count() as f64 / data.len() as f64;

    if ratio < SPACE_RATIO_MIN || ratio > SPACE_RATIO_MAX {
        0.0
    } else if ratio < SPACE_RATIO_PEAK_LO {
        SPACE_BONUS_MAX * (ratio - SPACE_RATIO_MIN) / (SPACE_RATIO_PEAK_LO - SPACE_RATIO_MIN)
    } else if ratio <= SPACE_RATIO_PEAK_HI {
        SPACE_BONUS_MAX
    } else {
        SPACE_BONUS_MAX * (SPACE_RATIO_MAX - ratio) / (SPACE_RATIO_MAX - SPACE_RATIO_PEAK_HI)
    }
}
