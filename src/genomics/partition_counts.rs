use indexmap::map::Entry;
use indexmap::IndexMap;
use tracing::debug;

use crate::config::CountingConfig;
use crate::genomics::{
    base_counts_by_read_group, resolve, CountVector, PartitionType, PileupElement,
    ReadGroupCountMap, ReadGroupLookup,
};
use crate::CoverageError;

/// Counts per partition key, grouped by partition type, in first-seen order.
pub type PartitionCountMap = IndexMap<PartitionType, IndexMap<String, CountVector>>;

/// Re-sum per-read-group counts into each requested partition type.
///
/// Each type appears once in the result even if requested repeatedly, so
/// every partition type sums to the same total as the read groups.
pub fn aggregate_by_partition(
    read_groups: &ReadGroupCountMap,
    types: &[PartitionType],
) -> PartitionCountMap {
    let mut by_type = PartitionCountMap::new();

    for &kind in types {
        let partitions = match by_type.entry(kind) {
            Entry::Occupied(_) => continue,
            Entry::Vacant(slot) => slot.insert(IndexMap::new()),
        };

        for rg in read_groups.values() {
            match partitions.entry(resolve(&rg.identity, kind)) {
                Entry::Occupied(mut existing) => existing.get_mut().add(&rg.counts),
                Entry::Vacant(slot) => {
                    slot.insert(rg.counts);
                }
            }
        }
    }

    by_type
}

/// Full per-locus pipeline: filter, count per read group, roll up per partition.
pub fn base_counts_by_partition<E, L>(
    pileup: &[E],
    config: &CountingConfig,
    lookup: &L,
) -> Result<PartitionCountMap, CoverageError>
where
    E: PileupElement,
    L: ReadGroupLookup + ?Sized,
{
    config.validate()?;

    let read_groups = base_counts_by_read_group(pileup, config, lookup)?;
    let by_type = aggregate_by_partition(&read_groups, &config.partitions);

    debug!(
        read_groups = read_groups.len(),
        partition_types = by_type.len(),
        "aggregated read groups into partitions"
    );
    Ok(by_type)
}
