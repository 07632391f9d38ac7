use std::collections::HashMap;
use std::sync::Arc;

/// One read base observed at a locus, as seen by the counting core.
pub trait PileupElement {
    /// Base symbol (uppercase or lowercase ASCII).
    fn base(&self) -> u8;

    /// Phred-scaled base quality.
    fn base_quality(&self) -> u8;

    /// Phred-scaled mapping quality of the owning read.
    fn mapping_quality(&self) -> u8;

    /// Whether the owning read has a deletion at this locus.
    fn is_deletion(&self) -> bool;

    /// Name of the owning read, used in diagnostics.
    fn read_name(&self) -> &str;

    /// Read-group id carried by the owning read (the `RG` tag), if any.
    fn read_group(&self) -> Option<&str>;
}

/// Owned pileup element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PileupBase {
    /// Name of the owning read.
    pub read_name: Arc<str>,
    /// Read-group id of the owning read.
    pub read_group: Option<Arc<str>>,
    /// Base symbol as ASCII.
    pub base: u8,
    /// Base quality in Phred space.
    pub base_quality: u8,
    /// Mapping quality in Phred space.
    pub mapping_quality: u8,
    /// Deletion at this locus.
    pub is_deletion: bool,
}

impl PileupBase {
    /// Construct an aligned (non-deleted) base.
    pub fn new(
        read_name: impl Into<Arc<str>>,
        read_group: Option<&str>,
        base: u8,
        base_quality: u8,
        mapping_quality: u8,
    ) -> Self {
        Self {
            read_name: read_name.into(),
            read_group: read_group.map(Arc::from),
            base,
            base_quality,
            mapping_quality,
            is_deletion: false,
        }
    }

    /// Construct a deletion element; it carries no base or base quality.
    pub fn deletion(
        read_name: impl Into<Arc<str>>,
        read_group: Option<&str>,
        mapping_quality: u8,
    ) -> Self {
        Self {
            read_name: read_name.into(),
            read_group: read_group.map(Arc::from),
            base: b'-',
            base_quality: 0,
            mapping_quality,
            is_deletion: true,
        }
    }
}

impl PileupElement for PileupBase {
    fn base(&self) -> u8 {
        self.base
    }

    fn base_quality(&self) -> u8 {
        self.base_quality
    }

    fn mapping_quality(&self) -> u8 {
        self.mapping_quality
    }

    fn is_deletion(&self) -> bool {
        self.is_deletion
    }

    fn read_name(&self) -> &str {
        &self.read_name
    }

    fn read_group(&self) -> Option<&str> {
        self.read_group.as_deref()
    }
}

impl<E: PileupElement + ?Sized> PileupElement for &E {
    fn base(&self) -> u8 {
        (**self).base()
    }

    fn base_quality(&self) -> u8 {
        (**self).base_quality()
    }

    fn mapping_quality(&self) -> u8 {
        (**self).mapping_quality()
    }

    fn is_deletion(&self) -> bool {
        (**self).is_deletion()
    }

    fn read_name(&self) -> &str {
        (**self).read_name()
    }

    fn read_group(&self) -> Option<&str> {
        (**self).read_group()
    }
}

/// Read-group metadata from an alignment header.
///
/// Tags absent from the header record are stored as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReadGroupIdentity {
    /// Sample name (`SM`).
    pub sample: String,
    /// Read-group id (`ID`).
    pub read_group_id: String,
    /// Library (`LB`).
    pub library: String,
    /// Sequencing platform (`PL`).
    pub platform: String,
    /// Sequencing center (`CN`).
    pub center: String,
    /// Platform unit (`PU`).
    pub platform_unit: String,
}

impl ReadGroupIdentity {
    /// Construct an identity from its sample and id; other tags start empty.
    pub fn new(sample: impl Into<String>, read_group_id: impl Into<String>) -> Self {
        Self {
            sample: sample.into(),
            read_group_id: read_group_id.into(),
            ..Self::default()
        }
    }

    /// Set the library.
    pub fn with_library(mut self, library: impl Into<String>) -> Self {
        self.library = library.into();
        self
    }

    /// Set the platform.
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    /// Set the sequencing center.
    pub fn with_center(mut self, center: impl Into<String>) -> Self {
        self.center = center.into();
        self
    }

    /// Set the platform unit.
    pub fn with_platform_unit(mut self, platform_unit: impl Into<String>) -> Self {
        self.platform_unit = platform_unit.into();
        self
    }

    /// Key distinguishing read groups that share one field but differ in another.
    pub fn unique_id(&self) -> String {
        format!(
            "{}_{}_{}_{}",
            self.sample, self.read_group_id, self.library, self.platform_unit
        )
    }
}

/// Resolves the read-group id carried by a read to its header metadata.
pub trait ReadGroupLookup {
    /// Metadata for the given read-group id, or `None` when the header lacks it.
    fn identity(&self, read_group_id: &str) -> Option<&ReadGroupIdentity>;
}

/// Read-group metadata keyed by read-group id.
#[derive(Debug, Clone, Default)]
pub struct ReadGroupDictionary {
    groups: HashMap<String, ReadGroupIdentity>,
}

impl ReadGroupDictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the dictionary from the `@RG` lines of SAM header text.
    ///
    /// Lines without an `ID` tag are skipped.
    pub fn from_header_text(text: &str) -> Self {
        let mut dictionary = Self::new();
        for line in text.lines().filter(|line| line.starts_with("@RG")) {
            if let Some(identity) = parse_read_group_line(line) {
                dictionary.insert(identity);
            }
        }
        dictionary
    }

    /// Register a read group, replacing any previous entry with the same id.
    pub fn insert(&mut self, identity: ReadGroupIdentity) {
        self.groups.insert(identity.read_group_id.clone(), identity);
    }

    /// Number of registered read groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no read group is registered.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl ReadGroupLookup for ReadGroupDictionary {
    fn identity(&self, read_group_id: &str) -> Option<&ReadGroupIdentity> {
        self.groups.get(read_group_id)
    }
}

impl FromIterator<ReadGroupIdentity> for ReadGroupDictionary {
    fn from_iter<I: IntoIterator<Item = ReadGroupIdentity>>(iter: I) -> Self {
        let mut dictionary = Self::new();
        for identity in iter {
            dictionary.insert(identity);
        }
        dictionary
    }
}

fn parse_read_group_line(line: &str) -> Option<ReadGroupIdentity> {
    let mut identity = ReadGroupIdentity::default();
    let mut has_id = false;
    for field in line.split('\t').skip(1) {
        let Some((tag, value)) = field.split_once(':') else {
            continue;
        };
        match tag {
            "ID" => {
                identity.read_group_id = value.to_string();
                has_id = true;
            }
            "SM" => identity.sample = value.to_string(),
            "LB" => identity.library = value.to_string(),
            "PL" => identity.platform = value.to_string(),
            "CN" => identity.center = value.to_string(),
            "PU" => identity.platform_unit = value.to_string(),
            _ => (),
        }
    }
    has_id.then_some(identity)
}
