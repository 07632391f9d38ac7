mod common;

use depthwise::genomics::{
    aggregate_by_partition, base_counts_by_partition, base_counts_by_read_group, count_bases,
    CountVector, PartitionType, PileupBase, PileupElement,
};
use depthwise::CountingConfig;
use proptest::prelude::*;

fn element() -> impl Strategy<Value = PileupBase> {
    (
        0usize..common::READ_GROUP_IDS.len(),
        prop_oneof![Just(b'A'), Just(b'C'), Just(b'G'), Just(b'T'), Just(b'N'), Just(b'-')],
        0u8..=60,
        0u8..=60,
    )
        .prop_map(|(rg, symbol, baseq, mapq)| {
            let read_group = common::READ_GROUP_IDS[rg];
            if symbol == b'-' {
                PileupBase::deletion("read", Some(read_group), mapq)
            } else {
                PileupBase::new("read", Some(read_group), symbol, baseq, mapq)
            }
        })
}

fn passes(element: &PileupBase, min_mapq: u8, min_baseq: u8) -> bool {
    element.mapping_quality() >= min_mapq
        && (element.base_quality() >= min_baseq || element.is_deletion())
}

proptest! {
    #[test]
    fn total_equals_number_of_passing_elements(
        pileup in proptest::collection::vec(element(), 0..64),
        min_mapq in 0u8..=60,
        min_baseq in 0u8..=60,
    ) {
        let counts = count_bases(&pileup, min_mapq, min_baseq).expect("only simple bases");
        let passing = pileup.iter().filter(|e| passes(e, min_mapq, min_baseq)).count();
        prop_assert_eq!(counts.total(), passing as u64);
    }

    #[test]
    fn tightening_thresholds_never_increases_counts(
        pileup in proptest::collection::vec(element(), 0..64),
        min_mapq in 0u8..=50,
        min_baseq in 0u8..=50,
        extra_mapq in 0u8..=10,
        extra_baseq in 0u8..=10,
    ) {
        let loose = count_bases(&pileup, min_mapq, min_baseq).expect("only simple bases");
        let strict = count_bases(&pileup, min_mapq + extra_mapq, min_baseq + extra_baseq)
            .expect("only simple bases");
        for (s, l) in strict.counts().iter().zip(loose.counts()) {
            prop_assert!(s <= l);
        }
    }

    #[test]
    fn every_partition_type_conserves_read_group_totals(
        pileup in proptest::collection::vec(element(), 0..64),
        min_mapq in 0u8..=30,
    ) {
        let config = CountingConfig::default()
            .with_mapping_quality(min_mapq, 255)
            .with_partitions(PartitionType::ALL.to_vec());
        let lookup = common::read_groups();

        let read_groups = base_counts_by_read_group(&pileup, &config, &lookup).expect("all grouped");
        let group_sum: CountVector = read_groups.values().map(|rg| &rg.counts).sum();

        let by_type = base_counts_by_partition(&pileup, &config, &lookup).expect("all grouped");
        prop_assert_eq!(by_type.len(), PartitionType::ALL.len());
        for (kind, partitions) in &by_type {
            let partition_sum: CountVector = partitions.values().sum();
            prop_assert_eq!(partition_sum, group_sum, "partition {} lost counts", kind);
        }
    }

    #[test]
    fn partition_counts_do_not_depend_on_read_group_order(
        pileup in proptest::collection::vec(element(), 1..48),
    ) {
        let config = CountingConfig::default();
        let lookup = common::read_groups();
        let forward = base_counts_by_read_group(&pileup, &config, &lookup).expect("all grouped");

        let mut reversed = forward.clone();
        reversed.reverse();

        let a = aggregate_by_partition(&forward, &PartitionType::ALL);
        let b = aggregate_by_partition(&reversed, &PartitionType::ALL);
        for kind in PartitionType::ALL {
            let left = &a[&kind];
            let right = &b[&kind];
            prop_assert_eq!(left.len(), right.len());
            for (key, counts) in left {
                prop_assert_eq!(Some(counts), right.get(key));
            }
        }
    }
}
