use std::fmt;
use std::str::FromStr;

use crate::genomics::ReadGroupIdentity;
use crate::CoverageError;

/// Granularity at which read-group counts are re-summed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PartitionType {
    /// One partition per sample.
    Sample,
    /// One partition per read group.
    Readgroup,
    /// One partition per library.
    Library,
    /// One partition per sequencing center.
    Center,
    /// One partition per sequencing platform.
    Platform,
    /// Sample crossed with sequencing center.
    SampleByCenter,
    /// Sample crossed with sequencing platform.
    SampleByPlatform,
    /// Sample crossed with platform and center.
    SampleByPlatformByCenter,
}

impl PartitionType {
    /// Every partition type, in declaration order.
    pub const ALL: [PartitionType; 8] = [
        PartitionType::Sample,
        PartitionType::Readgroup,
        PartitionType::Library,
        PartitionType::Center,
        PartitionType::Platform,
        PartitionType::SampleByCenter,
        PartitionType::SampleByPlatform,
        PartitionType::SampleByPlatformByCenter,
    ];

    /// Lowercase name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            PartitionType::Sample => "sample",
            PartitionType::Readgroup => "readgroup",
            PartitionType::Library => "library",
            PartitionType::Center => "center",
            PartitionType::Platform => "platform",
            PartitionType::SampleByCenter => "sample_by_center",
            PartitionType::SampleByPlatform => "sample_by_platform",
            PartitionType::SampleByPlatformByCenter => "sample_by_platform_by_center",
        }
    }
}

impl fmt::Display for PartitionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PartitionType {
    type Err = CoverageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PartitionType::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| CoverageError::configuration(format!("invalid aggregation type {s}")))
    }
}

/// Partition key of a read group for the given partition type.
pub fn resolve(identity: &ReadGroupIdentity, kind: PartitionType) -> String {
    let ReadGroupIdentity {
        sample,
        read_group_id,
        library,
        platform,
        center,
        ..
    } = identity;

    match kind {
        PartitionType::Sample => sample.clone(),
        PartitionType::Readgroup => format!("{sample}_rg_{read_group_id}"),
        PartitionType::Library => library.clone(),
        PartitionType::Center => center.clone(),
        PartitionType::Platform => platform.clone(),
        PartitionType::SampleByCenter => format!("{sample}_cn_{center}"),
        PartitionType::SampleByPlatform => format!("{sample}_pl_{platform}"),
        PartitionType::SampleByPlatformByCenter => format!("{sample}_pl_{platform}_cn_{center}"),
    }
}

/// Partition key for a partition type given by name.
pub fn resolve_named(identity: &ReadGroupIdentity, kind: &str) -> Result<String, CoverageError> {
    Ok(resolve(identity, kind.parse()?))
}
