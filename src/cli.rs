//! CLI surface: flag parsing, validation, and run orchestration.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::{
    DEFAULT_CHUNK_SIZE, DEFAULT_DICTIONARY, DEFAULT_MAX_HITS, DEFAULT_PROGRESS_EVERY,
    DEFAULT_THRESHOLD, SAMPLE_CIPHERTEXT,
};
use crate::dictionary::Dictionary;
use crate::error::SearchError;
use crate::pipeline::{Pipeline, space_size};
use crate::search::Search;
use crate::stage::bifid::Alphabet;

/// chainbreak - brute-force solver for multi-stage classical-cipher pipelines.
#[derive(Parser)]
#[command(name = "chainbreak", version = "1.0")]
#[command(about = "Brute-force a chain of classical cipher stages against a ciphertext, \
scoring every parameter combination for English-likeness.")]
pub struct Cli {
    /// Chain of stage names separated by `>`, e.g. `caesar>bifid>b64>xor`.
    #[arg(long)]
    pub pipeline: String,

    /// Ciphertext to decrypt.
    #[arg(long, default_value = SAMPLE_CIPHERTEXT)]
    pub ciphertext: String,

    /// Candidate-keys file, one key per line.
    #[arg(long, default_value = DEFAULT_DICTIONARY)]
    pub dictionary: PathBuf,

    /// Truncate the dictionary to its first N distinct keys (0 = unlimited).
    #[arg(long = "key_limit", default_value_t = 0)]
    pub key_limit: usize,

    /// Minimum score for a combination to be recorded.
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: f64,

    /// Cap on reported hits.
    #[arg(long = "max_hits", default_value_t = DEFAULT_MAX_HITS)]
    pub max_hits: usize,

    /// Worker count; 1 runs sequentially in-process.
    #[arg(long, default_value_t = 1)]
    pub workers: usize,

    /// Parameter indices per task.
    #[arg(long = "chunk_size", default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: u64,

    /// Completed tasks between progress lines.
    #[arg(long = "progress_every", default_value_t = DEFAULT_PROGRESS_EVERY)]
    pub progress_every: usize,

    /// Alphabet for the bifid Polybius square.
    #[arg(long = "bifid_alphabet", value_enum, default_value_t = Alphabet::Standard)]
    pub bifid_alphabet: Alphabet,

    /// Print parameter-space sizing and exit.
    #[arg(long = "dry_run")]
    pub dry_run: bool,
}

impl Cli {
    /// Installs the tracing subscriber and parses the command line.
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber has already been installed
    /// for this process.
    pub fn init() -> Result<Self> {
        let subscriber = tracing_subscriber::fmt().with_writer(std::io::stderr).finish();
        tracing::subscriber::set_global_default(subscriber)?;
        Ok(Self::parse())
    }

    /// Runs the search described by the flags.
    ///
    /// # Errors
    ///
    /// Returns the usage errors of the run: a flag value outside its
    /// domain, an unparseable pipeline, a missing or unreadable dictionary
    /// when a keyed stage needs one, or a parameter space that overflows
    /// the index width. A completed run with zero hits (or with failed
    /// chunks) is not an error.
    pub fn execute(self) -> Result<()> {
        self.validate()?;

        let pipeline = Pipeline::parse(&self.pipeline)?;
        let dictionary = if pipeline.requires_keys() {
            Dictionary::load(&self.dictionary, self.key_limit).context("loading dictionary")?
        } else {
            // Keyless pipelines never touch the dictionary file.
            Dictionary::empty()
        };

        let axes = pipeline.axes(dictionary.len())?;
        let radix: Vec<u64> = axes.iter().map(|a| a.cardinality).collect();
        let total = space_size(&radix)?;

        println!("[pipeline] {pipeline}");
        println!("[keys] {}", dictionary.len());
        let axes_line: Vec<String> = axes.iter().map(|a| format!("{}={}", a.stage, a.cardinality)).collect();
        println!("[axes] {}", axes_line.join(" "));
        println!("[estimate] param_tuples={total}");

        if self.dry_run {
            return Ok(());
        }

        let search = Search {
            pipeline,
            ciphertext: self.ciphertext,
            dictionary: Arc::new(dictionary),
            bifid_alphabet: self.bifid_alphabet,
            threshold: self.threshold,
            max_hits: self.max_hits,
            workers: self.workers,
            chunk_size: self.chunk_size,
            progress_every: self.progress_every,
        };
        let report = search.run()?;

        for hit in &report.hits {
            println!("{:.3} meta={}", hit.score, hit.metadata);
        }
        println!(
            "[done] attempts={} hits={} time={:.2}s",
            report.attempts,
            report.hits_found,
            report.elapsed.as_secs_f64()
        );

        if report.failed_chunks > 0 {
            tracing::warn!(failed_chunks = report.failed_chunks, "run completed with failed chunks");
            eprintln!("warning: {} chunk(s) failed and contributed no hits", report.failed_chunks);
        }

        Ok(())
    }

    /// Rejects flag values outside their documented domains.
    fn validate(&self) -> Result<(), SearchError> {
        if !self.threshold.is_finite() {
            return Err(SearchError::InvalidFlag { flag: "--threshold", reason: "must be a finite number".to_owned() });
        }
        if self.workers == 0 {
            return Err(SearchError::InvalidFlag { flag: "--workers", reason: "must be at least 1".to_owned() });
        }
        if self.chunk_size == 0 {
            return Err(SearchError::InvalidFlag { flag: "--chunk_size", reason: "must be at least 1".to_owned() });
        }
        if self.progress_every == 0 {
            return Err(SearchError::InvalidFlag { flag: "--progress_every", reason: "must be at least 1".to_owned() });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["chainbreak", "--pipeline", "caesar"]).unwrap();
        assert_eq!(cli.pipeline, "caesar");
        assert_eq!(cli.ciphertext, SAMPLE_CIPHERTEXT);
        assert_eq!(cli.threshold, DEFAULT_THRESHOLD);
        assert_eq!(cli.max_hits, DEFAULT_MAX_HITS);
        assert_eq!(cli.workers, 1);
        assert_eq!(cli.chunk_size, DEFAULT_CHUNK_SIZE);
        assert_eq!(cli.bifid_alphabet, Alphabet::Standard);
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_underscore_flag_names() {
        let cli = Cli::try_parse_from([
            "chainbreak",
            "--pipeline", "caesar>xor",
            "--key_limit", "10",
            "--max_hits", "5",
            "--chunk_size", "100",
            "--progress_every", "2",
            "--bifid_alphabet", "base64",
            "--dry_run",
        ])
        .unwrap();
        assert_eq!(cli.key_limit, 10);
        assert_eq!(cli.max_hits, 5);
        assert_eq!(cli.chunk_size, 100);
        assert_eq!(cli.progress_every, 2);
        assert_eq!(cli.bifid_alphabet, Alphabet::Base64);
        assert!(cli.dry_run);
    }

    #[test]
    fn test_pipeline_is_required() {
        assert!(Cli::try_parse_from(["chainbreak"]).is_err());
    }

    #[test]
    fn test_validate_rejects_zero_workers() {
        let mut cli = Cli::try_parse_from(["chainbreak", "--pipeline", "caesar"]).unwrap();
        cli.workers = 0;
        assert!(matches!(cli.validate(), Err(SearchError::InvalidFlag { flag: "--workers", .. })));
    }

    #[test]
    fn test_validate_rejects_nan_threshold() {
        let mut cli = Cli::try_parse_from(["chainbreak", "--pipeline", "caesar"]).unwrap();
        cli.threshold = f64::NAN;
        assert!(cli.validate().is_err());
    }
}
