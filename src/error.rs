//! Error taxonomy shared across the crate.
//!
//! Every error here is terminal for the run that produces it: the tooling
//! reports the condition and exits instead of retrying or skipping.

use thiserror::Error;

use crate::analyze::Method;

/// Errors raised while validating a run configuration, before any file is
/// opened.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An acceptance probability outside of `[0, 1]`.
    #[error("probability {0} is outside [0, 1]")]
    InvalidProbability(f64),

    /// A paired run with nothing to generate.
    #[error("pair count must be non-zero")]
    ZeroPairs,

    /// A write factor of zero would make the PUT probability undefined.
    #[error("write factor must be non-zero")]
    ZeroWriteFactor,

    /// A rotation interval of zero can never open an output file.
    #[error("rotation interval must be non-zero")]
    ZeroRotation,

    /// A GET interval of zero makes the read cadence undefined.
    #[error("get interval must be non-zero")]
    ZeroGetInterval,
}

/// Errors raised while loading an address corpus.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// The corpus has no usable addresses; generation cannot proceed.
    #[error("corpus contains no usable addresses")]
    Empty,

    /// The corpus file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while parsing or summarizing an execution log.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// The log is not a valid JSON array of well-shaped records.
    #[error("execution log is not a valid JSON array of records: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Statistics were requested for a method with zero matching records.
    #[error("no {0} records in the execution log")]
    EmptyGroup(Method),

    /// The log file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
