#![allow(dead_code)]

use depthwise::genomics::{PileupBase, ReadGroupDictionary, ReadGroupIdentity};

/// Two samples, three libraries, two platforms, two centers.
pub fn read_groups() -> ReadGroupDictionary {
    [
        ReadGroupIdentity::new("NA12878", "rg1")
            .with_library("lib1")
            .with_platform("ILLUMINA")
            .with_center("BI")
            .with_platform_unit("H0164.1"),
        ReadGroupIdentity::new("NA12878", "rg2")
            .with_library("lib1")
            .with_platform("ILLUMINA")
            .with_center("BI")
            .with_platform_unit("H0164.2"),
        ReadGroupIdentity::new("NA12878", "rg3")
            .with_library("lib2")
            .with_platform("PACBIO")
            .with_center("WUGSC"),
        ReadGroupIdentity::new("NA12891", "rg4")
            .with_library("lib3")
            .with_platform("ILLUMINA")
            .with_center("WUGSC"),
    ]
    .into_iter()
    .collect()
}

pub const READ_GROUP_IDS: [&str; 4] = ["rg1", "rg2", "rg3", "rg4"];

pub fn base(name: &str, read_group: &str, base: u8, baseq: u8, mapq: u8) -> PileupBase {
    PileupBase::new(name, Some(read_group), base, baseq, mapq)
}

/// Small mixed-quality pileup spanning every read group.
pub fn pileup() -> Vec<PileupBase> {
    vec![
        base("r1", "rg1", b'A', 30, 60),
        base("r2", "rg1", b'A', 12, 60),
        base("r3", "rg2", b'C', 35, 20),
        base("r4", "rg2", b'A', 40, 60),
        PileupBase::deletion("r5", Some("rg3"), 50),
        base("r6", "rg3", b'N', 25, 55),
        base("r7", "rg4", b'G', 33, 60),
        base("r8", "rg4", b'T', 8, 3),
    ]
}
