//! Run defaults and tuning constants.
//!
//! Single source of truth for every default the CLI exposes and every
//! constant the scoring and cipher code depends on. Changing a value here
//! changes it everywhere.

/// Built-in sample ciphertext used when `--ciphertext` is omitted.
///
/// The caesar-3 encryption of `HELLO WORLD`; a `caesar` pipeline run with
/// defaults recovers it immediately, which makes the zero-argument
/// invocation a self-demonstrating smoke test.
pub const SAMPLE_CIPHERTEXT: &str = "KHOOR ZRUOG";

/// Default candidate-key file, one key per line.
pub const DEFAULT_DICTIONARY: &str = "dictionary.txt";

/// Default minimum score for a combination to be recorded as a hit.
///
/// 0.80 sits below the printable boundary (fully printable output scores
/// at least 1.0), so a default run records everything that decodes to
/// clean-looking text plus near-misses with a few stray bytes. Users
/// hunting a known-English plaintext raise it to 1.5-1.85 to cut the
/// noise down to genuinely readable candidates.
pub const DEFAULT_THRESHOLD: f64 = 0.80;

/// Default cap on reported hits.
///
/// A permissive threshold over a large space can record thousands of
/// marginal hits; 50 keeps the final report one screenful while leaving
/// room for the real plaintext plus its near-shift decoys. Ranking is
/// still global — the cap truncates after the sort, never during it.
pub const DEFAULT_MAX_HITS: usize = 50;

/// Default number of parameter indices per work chunk.
///
/// 10 000 indices amortize the channel send/receive per task down to
/// noise while keeping tasks small enough that a pool of workers stays
/// load-balanced near the end of a run. Chunk size also bounds each
/// worker's peak hit-buffer allocation.
pub const DEFAULT_CHUNK_SIZE: u64 = 10_000;

/// Default number of completed chunks between progress lines.
///
/// One line per 50 chunks (half a million tuples at the default chunk
/// size) keeps long runs visibly alive without flooding the terminal or
/// perturbing throughput with per-chunk writes.
pub const DEFAULT_PROGRESS_EVERY: usize = 50;

/// Number of distinct caesar shifts (the full alphabet).
pub const CAESAR_SHIFTS: u64 = 26;

/// Smallest rail count tried by the railfence stage.
///
/// One rail is the identity transform, so the search starts at 2.
pub const RAIL_MIN: usize = 2;

/// Largest rail count tried by the railfence stage (inclusive).
///
/// Past 30 rails the zigzag rarely folds at all on typical ciphertext
/// lengths and every extra count decrypts to the same near-identity
/// permutation, so wider searches only add duplicate outputs.
pub const RAIL_MAX: usize = 30;

/// χ² distance at which the letter-frequency sub-score bottoms out at zero.
///
/// Calibrated against the embedded frequency table: short genuine English
/// stays well under it (`HELLO WORLD` ≈ 2.84, `THE MAN WAS HERE` ≈ 0.94)
/// while short random letter soups overshoot it through sampling noise.
pub const CHI2_NORMALIZATION: f64 = 12.0;

/// Weight of the letter-frequency sub-score in the English score.
///
/// Frequency carries the larger share because it degrades gracefully:
/// it rewards partially-correct decryptions (and spaceless plaintexts)
/// that the all-or-nothing word lookup scores at zero. The 0.7/0.3 split
/// leaves a perfect word match worth 0.3 — enough to separate real
/// sentences from letter soup with an English-like histogram, but not
/// enough for two lucky token matches to outrank a clean frequency fit.
pub const FREQ_WEIGHT: f64 = 0.7;

/// Weight of the common-word-match sub-score in the English score.
///
/// Counterpart to [`FREQ_WEIGHT`]; the two always sum to 1.0 so the
/// weighted core lands in [0, 1] before the spacing bonus is added.
pub const WORD_WEIGHT: f64 = 0.3;

/// Maximum word-spacing bonus.
///
/// Capped at 0.2 so well-spaced text gets a nudge past spaceless
/// competitors without letting spacing alone rescue an output whose
/// letters and words both look wrong.
pub const SPACE_BONUS_MAX: f64 = 0.2;

/// Space ratio below which no spacing bonus is granted.
///
/// English prose runs one space per 5-7 characters; below one in twenty
/// the spaces are likelier transposition debris than word boundaries, so
/// they earn nothing.
pub const SPACE_RATIO_MIN: f64 = 0.05;

/// Space ratio where the spacing bonus reaches its plateau.
///
/// One space in roughly seven characters is the low edge of natural
/// word-length spacing (average word around 5 letters plus its
/// separator).
pub const SPACE_RATIO_PEAK_LO: f64 = 0.15;

/// Space ratio where the spacing-bonus plateau ends.
///
/// Up to one space in five characters still reads as short-word English
/// (`THE MAN WAS HERE` sits at 0.1875); past it the bonus decays.
pub const SPACE_RATIO_PEAK_HI: f64 = 0.20;

/// Space ratio above which no spacing bonus is granted.
///
/// More than a third spaces means runs of them — padding or shredded
/// transposition output, not prose — so the bonus tapers to zero here.
pub const SPACE_RATIO_MAX: f64 = 0.35;
