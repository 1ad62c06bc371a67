//! Usage-error taxonomy.
//!
//! These are the configuration failures that abort a run before any work is
//! dispatched. Per-tuple stage failures are not errors at all; they are
//! silent `None` returns inside the hot loop.

use thiserror::Error;

/// A configuration problem reported to the user with a nonzero exit.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    /// The pipeline string could not be parsed (empty, or an empty segment).
    #[error("invalid pipeline `{0}`: expected non-empty stage names separated by `>`")]
    InvalidPipeline(String),

    /// A stage name is not in the catalog.
    #[error("unknown stage `{0}`")]
    UnknownStage(String),

    /// A keyed stage is present but the dictionary holds no keys.
    #[error("pipeline requires candidate keys but the dictionary is empty")]
    EmptyDictionary,

    /// The cartesian parameter space does not fit the index width.
    #[error("parameter space exceeds {} tuples", u64::MAX)]
    SpaceTooLarge,

    /// A flag value outside its documented domain.
    #[error("invalid value for {flag}: {reason}")]
    InvalidFlag {
        flag: &'static str,
        reason: String,
    },
}
