//! Workload generation and latency analysis for benchmarking a
//! longest-prefix-match key/value store.
//!
//! The store under test is an external collaborator: this crate only
//! produces the newline-delimited PUT/GET instruction streams it consumes,
//! and digests the JSON timing logs its bench harness emits.
//!
//! Generation draws addresses from an [`AddressCorpus`] and accepts each
//! draw with a configurable probability, interleaving PUTs and GETs
//! according to a [`Policy`]. Analysis reduces timing records to mean
//! latencies and a fast/slow GET split, with an optional scatter rendering
//! of the latency distribution.
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod analyze;
pub mod config;
pub mod corpus;
pub mod error;
pub mod instruction;
pub mod render;
pub mod sink;
pub mod workload;

pub use crate::analyze::{LatencySummary, parse_records, summarize};
pub use crate::corpus::AddressCorpus;
pub use crate::instruction::Instruction;
pub use crate::workload::{Generator, Policy};
