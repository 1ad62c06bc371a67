//! Columnar transposition.
//!
//! The key is uppercased and stripped of repeated characters; its length is
//! the column count and the alphabetical rank of each character (ties broken
//! left to right) is the order columns were read out in. A pure permutation
//! over all characters, spaces included.

/// Column read order for a key: the sequence of grid column indices in the
/// order the ciphertext was emitted.
fn read_order(key: &str) -> Vec<usize> {
    let mut cols: Vec<char> = Vec::new();
    for ch in key.chars().map(|c| c.to_ascii_uppercase()) {
        if !cols.contains(&ch) {
            cols.push(ch);
        }
    }
    let mut order: Vec<usize> = (0..cols.len()).collect();
    order.sort_by_key(|&i| (cols[i], i));
    order
}

/// Height of grid column `col` when `len` characters fill `k` columns
/// row-wise.
#[inline]
fn column_height(len: usize, k: usize, col: usize) -> usize {
    len / k + usize::from(col < len % k)
}

/// Decrypts a columnar-transposition ciphertext.
pub fn decrypt(text: &str, key: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let order = read_order(key);
    let k = order.len();
    if k <= 1 || chars.len() <= 1 {
        return text.to_owned();
    }

    // Hand each column its slice of the ciphertext, in read order.
    let mut columns: Vec<&[char]> = vec![&[]; k];
    let mut pos = 0;
    for &col in &order {
        let height = column_height(chars.len(), k, col);
        columns[col] = &chars[pos..pos + height];
        pos += height;
    }

    // Read the grid back row by row.
    let rows = chars.len().div_ceil(k);
    let mut out = String::with_capacity(chars.len());
    for row in 0..rows {
        for column in &columns {
            if let Some(&ch) = column.get(row) {
                out.push(ch);
            }
        }
    }
    out
}

/// Encrypts by filling the grid row-wise and reading columns in key order.
pub fn encrypt(text: &str, key: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let order = read_order(key);
    let k = order.len();
    if k <= 1 || chars.len() <= 1 {
        return text.to_owned();
    }

    let mut columns: Vec<Vec<char>> = vec![Vec::new(); k];
    for (i, &ch) in chars.iter().enumerate() {
        columns[i % k].push(ch);
    }

    let mut out = String::with_capacity(chars.len());
    for &col in &order {
        out.extend(&columns[col]);
    }
    out
}
