//! Stage executor: runs one parameter tuple through the chain.
//!
//! The executor is built once per run and shared read-only by every worker.
//! `run` threads a payload through the stages, consuming one digit of the
//! parameter tuple per axis-bearing stage and recording each consumed
//! parameter under its canonical metadata label.
//!
//! A tuple either produces exactly one output payload or nothing: any kind
//! mismatch or stage-internal failure returns `None` with no logging, which
//! keeps the exhaustive search monotone and the hot loop quiet.

use std::sync::Arc;

use crate::dictionary::Dictionary;
use crate::stage::bifid::Alphabet;
use crate::stage::{Stage, b64, bifid, caesar, columnar, railfence, reverse, xor};
use crate::types::{MetaValue, Metadata, Payload};

use super::Pipeline;
use crate::config::RAIL_MIN;

/// Immutable per-run execution state.
pub struct Executor {
    pipeline: Pipeline,
    dictionary: Arc<Dictionary>,
    bifid_alphabet: Alphabet,
}

impl Executor {
    pub fn new(pipeline: Pipeline, dictionary: Arc<Dictionary>, bifid_alphabet: Alphabet) -> Self {
        Self { pipeline, dictionary, bifid_alphabet }
    }

    /// Runs the chain on `start` with the given parameter tuple.
    ///
    /// Returns the final payload and the metadata that reproduces it, or
    /// `None` when the tuple aborts (kind mismatch or stage failure).
    pub fn run(&self, start: &Payload, digits: &[u64]) -> Option<(Payload, Metadata)> {
        let mut payload = start.clone();
        let mut meta = Metadata::new();
        let mut cursor = 0usize;

        for &stage in self.pipeline.stages() {
            if !stage.accepts(payload.kind()) {
                return None;
            }
            let digit = if stage.cardinality(self.dictionary.len()).is_some() {
                let d = digits[cursor];
                cursor += 1;
                Some(d)
            } else {
                None
            };
            payload = self.apply(stage, payload, digit, &mut meta)?;
        }

        Some((payload, meta))
    }

    fn apply(&self, stage: Stage, payload: Payload, digit: Option<u64>, meta: &mut Metadata) -> Option<Payload> {
        match stage {
            Stage::Caesar => {
                let Payload::Text(text) = &payload else { return None };
                let shift = digit? as u8;
                meta.push("caesar_shift", MetaValue::Int(i64::from(shift)));
                Some(Payload::Text(caesar::decrypt(text, shift)))
            }
            Stage::Railfence => {
                let Payload::Text(text) = &payload else { return None };
                let rails = RAIL_MIN + digit? as usize;
                meta.push("railfence_rails", MetaValue::Int(rails as i64));
                Some(Payload::Text(railfence::decrypt(text, rails)))
            }
            Stage::Bifid => {
                let Payload::Text(text) = &payload else { return None };
                let key = self.dictionary.get(digit? as usize);
                meta.push("bifid_key", MetaValue::Str(key.to_owned()));
                Some(Payload::Text(bifid::decrypt(text, key, self.bifid_alphabet)))
            }
            Stage::Columnar => {
                let Payload::Text(text) = &payload else { return None };
                let key = self.dictionary.get(digit? as usize);
                meta.push("columnar_key", MetaValue::Str(key.to_owned()));
                Some(Payload::Text(columnar::decrypt(text, key)))
            }
            Stage::DoubleColumnar => {
                let Payload::Text(text) = &payload else { return None };
                // One axis index factors into an ordered key pair.
                let n = self.dictionary.len() as u64;
                let idx = digit?;
                let key1 = self.dictionary.get((idx / n) as usize);
                let key2 = self.dictionary.get((idx % n) as usize);
                meta.push("double_columnar_keys", MetaValue::Pair(key1.to_owned(), key2.to_owned()));
                let inner = columnar::decrypt(text, key2);
                Some(Payload::Text(columnar::decrypt(&inner, key1)))
            }
            Stage::B64 => {
                let Payload::Text(text) = &payload else { return None };
                b64::decode(text).map(Payload::Bytes)
            }
            Stage::Xor => {
                let key = self.dictionary.get(digit? as usize);
                meta.push("xor_key", MetaValue::Str(key.to_owned()));
                xor::apply(payload.as_bytes(), key).map(Payload::Bytes)
            }
            Stage::Reverse => Some(match payload {
                Payload::Text(text) => Payload::Text(reverse::text(&text)),
                Payload::Bytes(bytes) => Payload::Bytes(reverse::bytes(&bytes)),
            }),
        }
    }
}
