//! Common type definitions for chainbreak.
//!
//! Provides the core values that flow through the search:
//!
//! - [`Payload`]: the tagged text-or-bytes value threaded through a pipeline
//! - [`Metadata`] / [`MetaValue`]: the per-tuple parameter record
//! - [`Hit`]: a scored combination above the threshold
//! - [`Task`] / [`ChunkResult`]: the unit of work and its outcome

use std::fmt::{Display, Formatter, Result};

/// Payload kind a stage consumes or produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    /// Valid UTF-8 text.
    Text,

    /// Raw bytes.
    Bytes,
}

/// A value flowing through a cipher pipeline.
///
/// The tag changes only when a stage declares it so (`b64` and `xor` produce
/// [`Payload::Bytes`]); stages never mutate their input in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Payload {
    /// Textual payload, the starting state of every run.
    Text(String),

    /// Binary payload.
    Bytes(Vec<u8>),
}

impl Payload {
    /// Returns the kind tag of this payload.
    #[inline]
    pub fn kind(&self) -> Kind {
        match self {
            Self::Text(_) => Kind::Text,
            Self::Bytes(_) => Kind::Bytes,
        }
    }

    /// Views the payload as bytes (UTF-8 for text).
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(s) => s.as_bytes(),
            Self::Bytes(b) => b,
        }
    }

    /// Consumes the payload into its byte content.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Text(s) => s.into_bytes(),
            Self::Bytes(b) => b,
        }
    }
}

/// A single recorded stage parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MetaValue {
    /// Numeric parameter (shift amount, rail count).
    Int(i64),

    /// A dictionary key.
    Str(String),

    /// An ordered pair of dictionary keys.
    Pair(String, String),
}

impl Display for MetaValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::Pair(a, b) => write!(f, "({a:?}, {b:?})"),
        }
    }
}

/// Append-only record of the parameters one tuple consumed.
///
/// Each axis-bearing stage pushes exactly one entry under its canonical
/// label; the record is reported verbatim with every hit so the user can
/// reproduce the decryption.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Metadata {
    entries: Vec<(&'static str, MetaValue)>,
}

impl Metadata {
    /// Creates an empty record.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one labeled parameter.
    #[inline]
    pub fn push(&mut self, label: &'static str, value: MetaValue) {
        self.entries.push((label, value));
    }

    /// Looks up a label (first match in insertion order).
    pub fn get(&self, label: &str) -> Option<&MetaValue> {
        self.entries.iter().find(|(l, _)| *l == label).map(|(_, v)| v)
    }

    /// All entries in insertion order.
    #[inline]
    pub fn entries(&self) -> &[(&'static str, MetaValue)] {
        &self.entries
    }
}

impl Display for Metadata {
    /// Renders `{label: value, …}` with string values quoted.
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str("{")?;
        for (i, (label, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{label}: {value}")?;
        }
        f.write_str("}")
    }
}

/// A parameter combination whose output crossed the threshold.
#[derive(Clone, Debug)]
pub struct Hit {
    /// English-likeness score of the final payload, in [0.0, 2.0].
    pub score: f64,

    /// Global enumeration index of the tuple.
    ///
    /// The deterministic tiebreaker for equal scores: ascending index is
    /// exactly ascending `(chunk_lo, in_chunk_index)`.
    pub index: u64,

    /// The parameters that produced this output.
    pub metadata: Metadata,
}

/// A contiguous sub-range `[lo, hi)` of the parameter index space.
#[derive(Clone, Copy, Debug)]
pub struct Task {
    /// First index of the chunk (inclusive).
    pub lo: u64,

    /// End of the chunk (exclusive).
    pub hi: u64,

    /// Dispatch sequence number, for diagnostics only.
    pub seq: usize,
}

/// Outcome of processing one [`Task`].
#[derive(Debug)]
pub struct ChunkResult {
    /// Dispatch sequence number of the originating task.
    pub seq: usize,

    /// Hits found in this chunk, in ascending index order.
    pub hits: Vec<Hit>,

    /// Indices attempted (`hi - lo`, also counted for failed chunks).
    pub attempts: u64,

    /// Whether the chunk worker panicked and yielded no hits.
    pub failed: bool,
}

impl ChunkResult {
    /// Creates a successful chunk outcome.
    #[inline]
    pub fn ok(seq: usize, hits: Vec<Hit>, attempts: u64) -> Self {
        Self { seq, hits, attempts, failed: false }
    }

    /// Creates a failed chunk outcome (zero hits, attempts still counted).
    #[inline]
    pub fn failed(seq: usize, attempts: u64) -> Self {
        Self { seq, hits: Vec::new(), attempts, failed: true }
    }
}
