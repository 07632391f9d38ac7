use std::sync::Arc;

use rust_htslib::bam::pileup::Alignment;
use rust_htslib::bam::record::Aux;
use rust_htslib::bam::HeaderView;

use crate::genomics::{PileupBase, ReadGroupDictionary};

impl PileupBase {
    /// Capture one htslib pileup alignment as an owned element.
    ///
    /// Reference skips carry no base at the locus and yield `None`.
    pub fn from_alignment(alignment: &Alignment<'_>) -> Option<Self> {
        if alignment.is_refskip() {
            return None;
        }

        let record = alignment.record();
        let read_name: Arc<str> = Arc::from(String::from_utf8_lossy(record.qname()).as_ref());
        let read_group = match record.aux(b"RG") {
            Ok(Aux::String(id)) => Some(id),
            _ => None,
        };

        let element = match alignment.qpos() {
            Some(qpos) if !alignment.is_del() => PileupBase::new(
                read_name,
                read_group,
                record.seq()[qpos],
                record.qual()[qpos],
                record.mapq(),
            ),
            _ => PileupBase::deletion(read_name, read_group, record.mapq()),
        };
        Some(element)
    }
}

impl ReadGroupDictionary {
    /// Build the dictionary from the `@RG` records of a BAM header.
    pub fn from_header_view(header: &HeaderView) -> Self {
        Self::from_header_text(&String::from_utf8_lossy(header.as_bytes()))
    }
}
