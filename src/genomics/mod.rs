//! Genomics primitives for per-locus counting and coverage summaries.
//!
//! Leaves first: base counting, partition keys, read-group aggregation,
//! partition aggregation and depth-histogram summaries.

mod base_counts;
mod coverage;
mod io;
mod partition;
mod partition_counts;
mod read_group;
mod types;

pub use base_counts::{count_bases, count_bases_ranged, BaseCategory, CountVector, NUM_CATEGORIES};
pub use coverage::{
    pct_above, quantile_bin, update_target_table, DepthBins, SampleCoverageSummary,
    TargetCoverageTable,
};
pub use partition::{resolve, resolve_named, PartitionType};
pub use partition_counts::{aggregate_by_partition, base_counts_by_partition, PartitionCountMap};
pub use read_group::{
    aggregate_by_readgroup, base_counts_by_read_group, ReadGroupCountMap, ReadGroupCounts,
};
pub use types::{PileupBase, PileupElement, ReadGroupDictionary, ReadGroupIdentity, ReadGroupLookup};
