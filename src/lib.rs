//! # Per-locus base counting and coverage aggregation
//!
//! This library implements the counting core of a depth-of-coverage tool:
//! pileup elements observed at one genomic position are filtered by mapping
//! and base quality, counted into nucleotide vectors, grouped by read group
//! and rolled up into coarser partitions (sample, library, platform, ...).
//! Independently, per-sample depth histograms are summarised into quantile
//! bins and folded into a cumulative target-coverage table.
//!
//! ## Pipeline
//!
//! 1. **Base counting**: quality filters turn a pileup into a [`CountVector`]
//! 2. **Read-group aggregation**: one vector per unique read group
//! 3. **Partition aggregation**: read-group vectors re-summed per [`PartitionType`]
//! 4. **Histogram summaries**: median bins feed the [`TargetCoverageTable`]
//!
//! ## Usage Example
//!
//! ```ignore
//! use depthwise::{CountingConfig, PartitionType, ReadGroupDictionary};
//! use depthwise::genomics::base_counts_by_partition;
//!
//! let config = CountingConfig::default()
//!     .with_mapping_quality(20, 255)
//!     .with_partitions(vec![PartitionType::Sample, PartitionType::Library]);
//! let groups = ReadGroupDictionary::from_header_text(&header_text);
//! let counts = base_counts_by_partition(&pileup, &config, &groups)?;
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

pub mod config;     // Counting thresholds and requested partitions
pub mod genomics;   // Counting, grouping and histogram summaries

pub use config::{CountPileupType, CountingConfig};
pub use genomics::{
    BaseCategory, CountVector, PartitionType, PileupBase, PileupElement, ReadGroupDictionary,
    ReadGroupIdentity, ReadGroupLookup, TargetCoverageTable,
};

use thiserror::Error;

/// Errors that can occur while counting or summarising coverage.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoverageError {
    /// Unknown partition type, unsupported counting mode or inconsistent thresholds
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A counted read has no read-group association
    #[error("read {read} lacks read group information; please associate all reads with read groups")]
    MissingMetadata {
        /// Name of the offending read
        read: String,
    },

    /// A base that passed the filters is not one of A, C, G, T or N
    #[error("expected a simple base, but received {:?}", symbol(.base))]
    InvalidBase {
        /// Raw base symbol
        base: u8,
    },

    /// Percentage requested over a histogram with no observations
    #[error("percentage above bin {bin} is undefined for an empty histogram")]
    UndefinedRatio {
        /// Bin the percentage was requested for
        bin: usize,
    },
}

fn symbol(base: &u8) -> char {
    char::from(*base)
}

impl CoverageError {
    /// Helper for constructing configuration errors.
    pub fn configuration(msg: impl Into<String>) -> Self {
        CoverageError::Configuration(msg.into())
    }
}
