//! Counting configuration
//!
//! Collects the thresholds and grouping choices that drive one per-locus
//! counting call:
//! - Mapping-quality and base-quality windows (inclusive)
//! - How overlapping reads of one fragment are counted
//! - Which partitions the read-group counts are rolled up into

use std::fmt;

use crate::genomics::PartitionType;
use crate::CoverageError;

/// How reads belonging to the same fragment are counted at a locus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CountPileupType {
    /// Count all reads independently, even if from the same fragment.
    #[default]
    CountReads,
    /// Count each fragment once, even if its reads disagree at the base.
    CountFragments,
    /// Count each fragment once, but only if its reads agree at the base.
    CountFragmentsRequireSameBase,
}

impl CountPileupType {
    /// Fail fast for counting modes that are not implemented.
    ///
    /// Overlapping-mate deduplication is not performed, so the fragment modes
    /// are rejected before any element is inspected.
    pub fn ensure_supported(self) -> Result<(), CoverageError> {
        match self {
            CountPileupType::CountReads => Ok(()),
            CountPileupType::CountFragments | CountPileupType::CountFragmentsRequireSameBase => {
                Err(CoverageError::configuration(format!(
                    "counting mode {self} is unsupported"
                )))
            }
        }
    }
}

impl fmt::Display for CountPileupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CountPileupType::CountReads => "COUNT_READS",
            CountPileupType::CountFragments => "COUNT_FRAGMENTS",
            CountPileupType::CountFragmentsRequireSameBase => "COUNT_FRAGMENTS_REQUIRE_SAME_BASE",
        };
        f.write_str(name)
    }
}

/// Configuration parameters for per-locus counting.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CountingConfig {
    /// Lowest mapping quality counted (inclusive)
    pub min_mapping_quality: u8,

    /// Highest mapping quality counted (inclusive)
    pub max_mapping_quality: u8,

    /// Lowest base quality counted (inclusive); deletions bypass this check
    pub min_base_quality: u8,

    /// Highest base quality counted (inclusive); deletions bypass this check
    pub max_base_quality: u8,

    /// Fragment counting mode
    pub count_type: CountPileupType,

    /// Partitions produced by the per-locus pipeline, in output order
    pub partitions: Vec<PartitionType>,
}

impl Default for CountingConfig {
    fn default() -> Self {
        Self {
            min_mapping_quality: 0,
            max_mapping_quality: u8::MAX,
            min_base_quality: 0,
            max_base_quality: u8::MAX,
            count_type: CountPileupType::CountReads,
            partitions: vec![PartitionType::Sample],
        }
    }
}

impl CountingConfig {
    /// Restrict the inclusive mapping-quality window.
    pub fn with_mapping_quality(mut self, min: u8, max: u8) -> Self {
        self.min_mapping_quality = min;
        self.max_mapping_quality = max;
        self
    }

    /// Restrict the inclusive base-quality window.
    pub fn with_base_quality(mut self, min: u8, max: u8) -> Self {
        self.min_base_quality = min;
        self.max_base_quality = max;
        self
    }

    /// Select the fragment counting mode.
    pub fn with_count_type(mut self, count_type: CountPileupType) -> Self {
        self.count_type = count_type;
        self
    }

    /// Replace the requested partitions.
    pub fn with_partitions(mut self, partitions: Vec<PartitionType>) -> Self {
        self.partitions = partitions;
        self
    }

    /// Check the configuration before any counting happens.
    pub fn validate(&self) -> Result<(), CoverageError> {
        if self.min_mapping_quality > self.max_mapping_quality {
            return Err(CoverageError::configuration(format!(
                "mapping quality window [{}, {}] is empty",
                self.min_mapping_quality, self.max_mapping_quality
            )));
        }
        if self.min_base_quality > self.max_base_quality {
            return Err(CoverageError::configuration(format!(
                "base quality window [{}, {}] is empty",
                self.min_base_quality, self.max_base_quality
            )));
        }
        if self.partitions.is_empty() {
            return Err(CoverageError::configuration(
                "at least one partition type must be requested",
            ));
        }
        self.count_type.ensure_supported()
    }
}
