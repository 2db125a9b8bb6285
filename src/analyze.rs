//! Parsing and summarizing execution logs emitted by the store's bench
//! harness.

use std::fmt;
use std::io::Read;

use serde::Deserialize;

use crate::error::AnalyzeError;

/// Nanoseconds at or above which a GET counts as slow.
pub const SLOW_GET_THRESHOLD_NS: u64 = 5_000_000;

const NANOS_PER_SEC: f64 = 1e9;

/// The request method of a benchmark record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Method {
    /// A route insertion.
    #[serde(rename = "PUT")]
    Put,
    /// A longest-prefix lookup.
    #[serde(rename = "GET")]
    Get,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Put => f.write_str("PUT"),
            Method::Get => f.write_str("GET"),
        }
    }
}

/// One parsed entry from an execution log; never mutated after parse.
///
/// The harness emits further fields (`url`, `in`, `err`) which are
/// irrelevant to latency analysis and ignored here.
#[derive(Debug, Clone, Deserialize)]
pub struct BenchmarkRecord {
    /// The request method.
    pub method: Method,
    /// Request duration in nanoseconds.
    pub dur: u64,
    /// Response size or status reported by the harness, when present.
    #[serde(default)]
    pub out: Option<i64>,
}

/// Deserializes an execution log: a JSON array of records.
///
/// Any other top-level shape, or any element lacking a well-typed
/// `method`/`dur` field, fails the whole run; records are never silently
/// skipped.
pub fn parse_records(input: impl Read) -> Result<Vec<BenchmarkRecord>, AnalyzeError> {
    Ok(serde_json::from_reader(input)?)
}

/// The durations of all records with the given method, in insertion
/// order.
pub fn durations(records: &[BenchmarkRecord], method: Method) -> Vec<u64> {
    records
        .iter()
        .filter(|record| record.method == method)
        .map(|record| record.dur)
        .collect()
}

/// Aggregate latency statistics for one execution log.
#[derive(Debug, Clone, PartialEq)]
pub struct LatencySummary {
    /// Mean PUT latency in seconds.
    pub mean_put_secs: f64,
    /// Mean GET latency in seconds.
    pub mean_get_secs: f64,
    /// GETs faster than [`SLOW_GET_THRESHOLD_NS`].
    pub fast_gets: u64,
    /// GETs at or above [`SLOW_GET_THRESHOLD_NS`].
    pub slow_gets: u64,
}

/// Partitions records by method and reduces each group to its mean
/// latency, plus the fast/slow GET split.
///
/// A method with zero matching records has no mean; that is reported as
/// [`AnalyzeError::EmptyGroup`] so callers can detect "no data of this
/// kind" instead of reading a silent zero.
pub fn summarize(records: &[BenchmarkRecord]) -> Result<LatencySummary, AnalyzeError> {
    let puts = durations(records, Method::Put);
    let gets = durations(records, Method::Get);

    let mean_put_secs = mean_secs(&puts).ok_or(AnalyzeError::EmptyGroup(Method::Put))?;
    let mean_get_secs = mean_secs(&gets).ok_or(AnalyzeError::EmptyGroup(Method::Get))?;

    let slow_gets = gets
        .iter()
        .filter(|&&dur| dur >= SLOW_GET_THRESHOLD_NS)
        .count() as u64;
    let fast_gets = gets.len() as u64 - slow_gets;

    Ok(LatencySummary {
        mean_put_secs,
        mean_get_secs,
        fast_gets,
        slow_gets,
    })
}

fn mean_secs(durations: &[u64]) -> Option<f64> {
    if durations.is_empty() {
        return None;
    }
    let total: u64 = durations.iter().sum();
    Some(total as f64 / durations.len() as f64 / NANOS_PER_SEC)
}
