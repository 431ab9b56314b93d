//! Crate-level error types.
//!
//! Configuration/startup failures are modeled here and propagated with `?`
//! through `anyhow::Result` at the binary boundary (see `main.rs`), the same
//! split the teacher's own `tools/dtln/validate.rs` uses: typed errors close
//! to the failure, `anyhow::Context` for the human-facing message at the top.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SelcalError {
    #[error("failed to read tone table file '{path}': {source}")]
    ToneTableIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse tone table JSON: {source}")]
    ToneTableParse {
        #[source]
        source: serde_json::Error,
    },

    #[error("tone table must have exactly {expected} entries, found {found}")]
    ToneTableShape { expected: usize, found: usize },

    #[error("tone table key '{key}' is not a single uppercase letter")]
    ToneTableBadLetter { key: String },

    #[error("tone table frequency for '{letter}' ({freq} Hz) is outside (0, sample_rate/2)")]
    ToneTableBadFrequency { letter: char, freq: f64 },

    #[error("tone table contains a duplicate letter")]
    ToneTableDuplicateLetter,

    #[error("tone table contains a duplicate frequency ({freq} Hz)")]
    ToneTableDuplicateFrequency { freq: f64 },

    #[error("failed to read dictionary file '{path}': {source}")]
    DictionaryIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no audio input device available at index {index}")]
    AudioDeviceNotFound { index: usize },

    #[error("failed to build audio input stream: {source}")]
    AudioStreamBuild {
        #[source]
        source: cpal::BuildStreamError,
    },

    #[error("failed to start audio input stream: {source}")]
    AudioStreamPlay {
        #[source]
        source: cpal::PlayStreamError,
    },

    #[error("failed to query audio input configuration: {source}")]
    AudioConfig {
        #[source]
        source: cpal::DefaultStreamConfigError,
    },
}
