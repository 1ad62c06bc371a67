//! The cipher stage catalog.
//!
//! One module per cipher; each exposes pure transform functions that never
//! mutate their input. [`Stage`] is the catalog itself: the set of valid
//! stage names, the payload kind each stage consumes and produces, and the
//! size of the parameter axis each stage contributes to a run.

pub mod b64;
pub mod bifid;
pub mod caesar;
pub mod columnar;
pub mod railfence;
pub mod reverse;
pub mod xor;

use strum::{Display, EnumIter, EnumString};

use crate::config::{CAESAR_SHIFTS, RAIL_MAX, RAIL_MIN};
use crate::types::Kind;

/// A named cipher stage.
///
/// The string forms (`caesar`, `double_columnar`, `b64`, …) are the exact
/// names accepted in a pipeline chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    Caesar,
    Bifid,
    Columnar,
    DoubleColumnar,
    B64,
    Xor,
    Railfence,
    Reverse,
}

impl Stage {
    /// Whether this stage can consume a payload of the given kind.
    ///
    /// `xor` and `reverse` accept both kinds; `xor` reads text as its UTF-8
    /// bytes, `reverse` preserves the kind it was given.
    pub fn accepts(self, kind: Kind) -> bool {
        match self {
            Self::Caesar | Self::Bifid | Self::Columnar | Self::DoubleColumnar | Self::B64 | Self::Railfence => kind == Kind::Text,
            Self::Xor | Self::Reverse => true,
        }
    }

    /// Whether this stage consumes a dictionary key.
    pub fn requires_keys(self) -> bool {
        matches!(self, Self::Bifid | Self::Columnar | Self::DoubleColumnar | Self::Xor)
    }

    /// Number of distinct parameter values for this stage, or `None` for
    /// stages that take no parameter and contribute no axis.
    pub fn cardinality(self, n_keys: usize) -> Option<u64> {
        let n = n_keys as u64;
        match self {
            Self::Caesar => Some(CAESAR_SHIFTS),
            Self::Railfence => Some((RAIL_MAX - RAIL_MIN + 1) as u64),
            Self::Bifid | Self::Columnar | Self::Xor => Some(n),
            Self::DoubleColumnar => Some(n.saturating_mul(n)),
            Self::B64 | Self::Reverse => None,
        }
    }
}
