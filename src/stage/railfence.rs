//! Rail fence (zigzag) transposition.
//!
//! A pure permutation: every character of the input appears exactly once in
//! the output. With `rails >= len` the zigzag never folds and the transform
//! degenerates to the identity.

/// Rail index of each position in a zigzag of the given length.
fn rail_pattern(len: usize, rails: usize) -> Vec<usize> {
    let period = 2 * (rails - 1);
    (0..len)
        .map(|i| {
            let p = i % period;
            if p < rails { p } else { period - p }
        })
        .collect()
}

/// Decrypts a rail-fence ciphertext with the given rail count (`rails >= 2`).
pub fn decrypt(text: &str, rails: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if rails < 2 || chars.len() < 2 {
        return text.to_owned();
    }

    let pattern = rail_pattern(chars.len(), rails);

    // Rails were emitted top to bottom; slice the ciphertext back into them.
    let mut counts = vec![0usize; rails];
    for &r in &pattern {
        counts[r] += 1;
    }
    let mut rail_chunks: Vec<&[char]> = Vec::with_capacity(rails);
    let mut pos = 0;
    for &count in &counts {
        rail_chunks.push(&chars[pos..pos + count]);
        pos += count;
    }

    // Re-emit in zigzag position order.
    let mut cursors = vec![0usize; rails];
    pattern
        .iter()
        .map(|&r| {
            let ch = rail_chunks[r][cursors[r]];
            cursors[r] += 1;
            ch
        })
        .collect()
}

/// Encrypts by reading the zigzag rails top to bottom.
pub fn encrypt(text: &str, rails: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if rails < 2 || chars.len() < 2 {
        return text.to_owned();
    }

    let pattern = rail_pattern(chars.len(), rails);
    let mut fence: Vec<Vec<char>> = vec![Vec::new(); rails];
    for (ch, &r) in chars.iter().zip(&pattern) {
        fence[r].push(*ch);
    }
    fence.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_three_rail() {
        assert_eq!(encrypt("THE MAN WAS HERE", 3), "TMWHH A A EEENSR");
        assert_eq!(decrypt("TMWHH A A EEENSR", 3), "THE MAN WAS HERE");
    }

    #[test]
    fn test_round_trip_all_rail_counts() {
        let plain = "WE ARE DISCOVERED FLEE AT ONCE";
        for rails in 2..=30 {
            assert_eq!(decrypt(&encrypt(plain, rails), rails), plain);
        }
    }

    #[test]
    fn test_more_rails_than_chars_is_identity() {
        assert_eq!(encrypt("SHORT", 10), "SHORT");
        assert_eq!(decrypt("SHORT", 10), "SHORT");
    }

    #[test]
    fn test_single_char() {
        assert_eq!(decrypt("X", 5), "X");
    }
}
