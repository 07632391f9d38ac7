use indexmap::IndexMap;
use tracing::debug;

use crate::config::CountingConfig;
use crate::genomics::{
    count_bases_ranged, CountVector, PileupElement, ReadGroupIdentity, ReadGroupLookup,
};
use crate::CoverageError;

/// Counts attributed to one read group at a locus.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReadGroupCounts {
    /// Header metadata of the read group.
    pub identity: ReadGroupIdentity,
    /// Bases counted for the read group.
    pub counts: CountVector,
}

/// Per-read-group counts keyed by [`ReadGroupIdentity::unique_id`], in first-seen order.
pub type ReadGroupCountMap = IndexMap<String, ReadGroupCounts>;

/// Group already-filtered elements by the read group owning each read.
///
/// Every element must resolve to a read group; a single unresolved read
/// fails the whole call without returning partial counts.
pub fn aggregate_by_readgroup<'a, E, I, L>(
    elements: I,
    lookup: &L,
) -> Result<ReadGroupCountMap, CoverageError>
where
    E: PileupElement + 'a,
    I: IntoIterator<Item = &'a E>,
    L: ReadGroupLookup + ?Sized,
{
    let mut by_group = ReadGroupCountMap::new();

    for element in elements {
        let identity = element
            .read_group()
            .and_then(|id| lookup.identity(id))
            .ok_or_else(|| CoverageError::MissingMetadata {
                read: element.read_name().to_string(),
            })?;

        by_group
            .entry(identity.unique_id())
            .or_insert_with(|| ReadGroupCounts {
                identity: identity.clone(),
                counts: CountVector::new(),
            })
            .counts
            .observe(element)?;
    }

    Ok(by_group)
}

/// Filter a pileup with the configured quality windows and count it per read group.
pub fn base_counts_by_read_group<E, L>(
    pileup: &[E],
    config: &CountingConfig,
    lookup: &L,
) -> Result<ReadGroupCountMap, CoverageError>
where
    E: PileupElement,
    L: ReadGroupLookup + ?Sized,
{
    config.count_type.ensure_supported()?;

    let kept = count_bases_ranged(
        pileup,
        config.min_mapping_quality,
        config.max_mapping_quality,
        config.min_base_quality,
        config.max_base_quality,
    );
    let by_group = aggregate_by_readgroup(kept, lookup)?;

    debug!(
        depth = pileup.len(),
        read_groups = by_group.len(),
        counted = by_group.values().map(|rg| rg.counts.total()).sum::<u64>(),
        "counted pileup by read group"
    );
    Ok(by_group)
}
