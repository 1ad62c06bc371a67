//! Candidate-key dictionary.
//!
//! Loaded once per run: one key per line, whitespace trimmed, blank lines
//! skipped, duplicates dropped (first occurrence wins). The resulting order
//! is deterministic, so axis index `i` names the same key for the whole run.

use std::path::Path;

use anyhow::{Context, Result};
use hashbrown::HashSet;

/// An ordered snapshot of distinct candidate keys.
#[derive(Clone, Debug, Default)]
pub struct Dictionary {
    keys: Vec<String>,
}

impl Dictionary {
    /// An empty dictionary, for pipelines without keyed stages.
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a dictionary from raw candidate lines.
    ///
    /// `key_limit` truncates to the first N distinct keys; 0 means
    /// unlimited.
    pub fn from_lines<I, S>(lines: I, key_limit: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut keys = Vec::new();
        for line in lines {
            let key = line.as_ref().trim();
            if key.is_empty() || !seen.insert(key.to_owned()) {
                continue;
            }
            keys.push(key.to_owned());
            if key_limit != 0 && keys.len() == key_limit {
                break;
            }
        }
        Self { keys }
    }

    /// Loads a dictionary file.
    ///
    /// # Arguments
    ///
    /// * `path` - The candidate-keys file, one key per line.
    /// * `key_limit` - Keep only the first N distinct keys; 0 = unlimited.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not UTF-8. An
    /// existing file with no usable lines is not an error here; whether an
    /// empty dictionary is acceptable depends on the pipeline and is decided
    /// by its axis validation.
    pub fn load(path: &Path, key_limit: usize) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read dictionary {}", path.display()))?;
        Ok(Self::from_lines(content.lines(), key_limit))
    }

    /// Number of keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// True when no keys were loaded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The key at axis value `i`.
    #[inline]
    pub fn get(&self, i: usize) -> &str {
        &self.keys[i]
    }

    /// All keys in load order.
    #[inline]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }
}
