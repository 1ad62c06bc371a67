//! Bifid cipher over a keyed Polybius square.
//!
//! The square lists the key's unique characters first, then the rest of the
//! alphabet. Two alphabets are supported: the classical 25-letter square
//! (J merged into I, input uppercased) and an 8×8 square over the Base64
//! character set, where case is significant.
//!
//! The period equals the input length: coordinates are fractionated across
//! the whole text in one block. Characters outside the alphabet are stripped
//! before the transform and are not reinserted.

use clap::ValueEnum;
use strum::Display;

/// Which alphabet the Polybius square is built over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Alphabet {
    /// 25 uppercase letters, J folded into I, 5×5.
    #[default]
    Standard,

    /// The 64 Base64 characters `A-Z a-z 0-9 + /`, 8×8.
    Base64,
}

impl Alphabet {
    /// The alphabet in square-filling order.
    fn chars(self) -> &'static str {
        match self {
            Self::Standard => "ABCDEFGHIKLMNOPQRSTUVWXYZ",
            Self::Base64 => "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/",
        }
    }

    /// Side length of the square.
    fn side(self) -> usize {
        match self {
            Self::Standard => 5,
            Self::Base64 => 8,
        }
    }

    /// Maps an input character into the alphabet, or drops it.
    fn normalize(self, ch: char) -> Option<char> {
        match self {
            Self::Standard => {
                if ch.is_ascii_alphabetic() {
                    let up = ch.to_ascii_uppercase();
                    Some(if up == 'J' { 'I' } else { up })
                } else {
                    None
                }
            }
            Self::Base64 => self.chars().contains(ch).then_some(ch),
        }
    }
}

/// A keyed Polybius square with O(1) coordinate lookup.
struct Square {
    cells: Vec<char>,
    side: usize,
    // Flat cell index per ASCII code; the alphabets are all ASCII.
    index: [Option<u8>; 128],
}

impl Square {
    fn new(key: &str, alphabet: Alphabet) -> Self {
        let mut cells: Vec<char> = Vec::with_capacity(alphabet.chars().len());
        let unique_key = key.chars().filter_map(|c| alphabet.normalize(c));
        for ch in unique_key.chain(alphabet.chars().chars()) {
            if !cells.contains(&ch) {
                cells.push(ch);
            }
        }

        let mut index = [None; 128];
        for (i, &ch) in cells.iter().enumerate() {
            index[ch as usize] = Some(i as u8);
        }
        Self { cells, side: alphabet.side(), index }
    }

    /// Flat cell index of a normalized character.
    #[inline]
    fn position(&self, ch: char) -> usize {
        // Normalized characters are always present in the square.
        self.index[ch as usize].map_or(0, usize::from)
    }
}

/// Decrypts a bifid ciphertext with the given key.
pub fn decrypt(text: &str, key: &str, alphabet: Alphabet) -> String {
    let square = Square::new(key, alphabet);
    let positions: Vec<usize> = text
        .chars()
        .filter_map(|c| alphabet.normalize(c))
        .map(|c| square.position(c))
        .collect();
    let n = positions.len();

    // Reading the ciphertext coordinates in order reconstructs the
    // row-stream-then-column-stream laid down at encryption time.
    let mut stream = Vec::with_capacity(2 * n);
    for &pos in &positions {
        stream.push(pos / square.side);
        stream.push(pos % square.side);
    }

    (0..n).map(|i| square.cells[stream[i] * square.side + stream[i + n]]).collect()
}

/// Encrypts plaintext with the given key.
///
/// Non-alphabet characters are stripped, exactly as decryption strips them.
pub fn encrypt(text: &str, key: &str, alphabet: Alphabet) -> String {
    let square = Square::new(key, alphabet);
    let positions: Vec<usize> = text
        .chars()
        .filter_map(|c| alphabet.normalize(c))
        .map(|c| square.position(c))
        .collect();
    let n = positions.len();

    let mut stream = Vec::with_capacity(2 * n);
    stream.extend(positions.iter().map(|p| p / square.side));
    stream.extend(positions.iter().map(|p| p % square.side));

    (0..n).map(|i| square.cells[stream[2 * i] * square.side + stream[2 * i + 1]]).collect()
}
