use std::ops::{AddAssign, Index};

use tracing::trace;

use crate::genomics::PileupElement;
use crate::CoverageError;

/// Number of count categories: A, C, G, T, N and deletions.
pub const NUM_CATEGORIES: usize = 6;

/// Category a counted pileup element falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BaseCategory {
    /// Adenine.
    A,
    /// Cytosine.
    C,
    /// Guanine.
    G,
    /// Thymine.
    T,
    /// Ambiguous base.
    N,
    /// Deletion at the locus.
    Deletion,
}

impl BaseCategory {
    /// All categories in count-vector order.
    pub const ALL: [BaseCategory; NUM_CATEGORIES] = [
        BaseCategory::A,
        BaseCategory::C,
        BaseCategory::G,
        BaseCategory::T,
        BaseCategory::N,
        BaseCategory::Deletion,
    ];

    /// Category of a base symbol; `None` for anything but A, C, G, T or N.
    pub fn from_base(base: u8) -> Option<Self> {
        match base {
            b'A' | b'a' => Some(BaseCategory::A),
            b'C' | b'c' => Some(BaseCategory::C),
            b'G' | b'g' => Some(BaseCategory::G),
            b'T' | b't' => Some(BaseCategory::T),
            b'N' | b'n' => Some(BaseCategory::N),
            _ => None,
        }
    }

    /// Slot of this category in a [`CountVector`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Single-character label used in reports.
    pub fn symbol(self) -> char {
        match self {
            BaseCategory::A => 'A',
            BaseCategory::C => 'C',
            BaseCategory::G => 'G',
            BaseCategory::T => 'T',
            BaseCategory::N => 'N',
            BaseCategory::Deletion => 'D',
        }
    }
}

/// Per-category observation counts [A, C, G, T, N, D].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CountVector {
    counts: [u64; NUM_CATEGORIES],
}

impl CountVector {
    /// Empty vector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Vector with the given counts in [A, C, G, T, N, D] order.
    pub fn from_counts(counts: [u64; NUM_CATEGORIES]) -> Self {
        Self { counts }
    }

    /// Record one observation.
    pub fn increment(&mut self, category: BaseCategory) {
        self.counts[category.index()] += 1;
    }

    /// Add another vector element-wise.
    pub fn add(&mut self, other: &CountVector) {
        for (slot, &value) in self.counts.iter_mut().zip(other.counts.iter()) {
            *slot += value;
        }
    }

    /// Count for one category.
    pub fn get(&self, category: BaseCategory) -> u64 {
        self.counts[category.index()]
    }

    /// Raw counts in [A, C, G, T, N, D] order.
    pub fn counts(&self) -> &[u64; NUM_CATEGORIES] {
        &self.counts
    }

    /// Total number of counted elements.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Count an element that already passed the quality filters.
    pub fn observe<E: PileupElement + ?Sized>(&mut self, element: &E) -> Result<(), CoverageError> {
        let category = if element.is_deletion() {
            BaseCategory::Deletion
        } else {
            BaseCategory::from_base(element.base()).ok_or(CoverageError::InvalidBase {
                base: element.base(),
            })?
        };
        self.increment(category);
        Ok(())
    }
}

impl AddAssign<&CountVector> for CountVector {
    fn add_assign(&mut self, rhs: &CountVector) {
        self.add(rhs);
    }
}

impl Index<BaseCategory> for CountVector {
    type Output = u64;

    fn index(&self, category: BaseCategory) -> &u64 {
        &self.counts[category.index()]
    }
}

impl<'a> std::iter::Sum<&'a CountVector> for CountVector {
    fn sum<I: Iterator<Item = &'a CountVector>>(iter: I) -> Self {
        let mut total = CountVector::new();
        for vector in iter {
            total.add(vector);
        }
        total
    }
}

/// Count the bases of a pileup with mapping quality ≥ `min_mapq` and base
/// quality ≥ `min_baseq`; deletions bypass the base-quality check.
pub fn count_bases<E: PileupElement>(
    pileup: &[E],
    min_mapq: u8,
    min_baseq: u8,
) -> Result<CountVector, CoverageError> {
    let mut counts = CountVector::new();
    for element in pileup {
        if element.mapping_quality() >= min_mapq
            && (element.base_quality() >= min_baseq || element.is_deletion())
        {
            counts.observe(element)?;
        }
    }
    Ok(counts)
}

/// Keep the elements whose qualities fall inside the inclusive windows.
///
/// Deletions only need to satisfy the mapping-quality window.
pub fn count_bases_ranged<E: PileupElement>(
    pileup: &[E],
    min_mapq: u8,
    max_mapq: u8,
    min_baseq: u8,
    max_baseq: u8,
) -> Vec<&E> {
    pileup
        .iter()
        .filter(|element| {
            let mapq = element.mapping_quality();
            let baseq = element.base_quality();
            let keep = (min_mapq..=max_mapq).contains(&mapq)
                && ((min_baseq..=max_baseq).contains(&baseq) || element.is_deletion());
            if !keep {
                trace!(read = element.read_name(), mapq, baseq, "element filtered");
            }
            keep
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genomics::PileupBase;

    fn base(name: &str, base: u8, baseq: u8, mapq: u8) -> PileupBase {
        PileupBase::new(name, Some("rg1"), base, baseq, mapq)
    }

    #[test]
    fn counts_each_category() {
        let pileup = vec![
            base("r1", b'A', 30, 60),
            base("r2", b'c', 30, 60),
            base("r3", b'G', 30, 60),
            base("r4", b'T', 30, 60),
            base("r5", b'N', 30, 60),
            PileupBase::deletion("r6", Some("rg1"), 60),
        ];

        let counts = count_bases(&pileup, 0, 0).unwrap();
        assert_eq!(counts.counts(), &[1, 1, 1, 1, 1, 1]);
        assert_eq!(counts.total(), 6);
    }

    #[test]
    fn quality_thresholds_are_inclusive() {
        let pileup = vec![
            base("r1", b'A', 20, 30),
            base("r2", b'A', 19, 30),
            base("r3", b'A', 20, 29),
        ];

        let counts = count_bases(&pileup, 30, 20).unwrap();
        assert_eq!(counts[BaseCategory::A], 1);
    }

    #[test]
    fn deletions_bypass_base_quality() {
        let pileup = vec![PileupBase::deletion("r1", None, 40)];
        let counts = count_bases(&pileup, 20, 60).unwrap();
        assert_eq!(counts[BaseCategory::Deletion], 1);

        let counts = count_bases(&pileup, 41, 0).unwrap();
        assert_eq!(counts.total(), 0);
    }

    #[test]
    fn invalid_base_after_filtering_is_fatal() {
        let pileup = vec![base("r1", b'A', 30, 60), base("r2", b'X', 30, 60)];
        assert_eq!(
            count_bases(&pileup, 0, 0),
            Err(CoverageError::InvalidBase { base: b'X' })
        );
    }

    #[test]
    fn invalid_base_that_fails_filters_is_ignored() {
        let pileup = vec![base("r1", b'A', 30, 60), base("r2", b'X', 5, 60)];
        let counts = count_bases(&pileup, 0, 10).unwrap();
        assert_eq!(counts.total(), 1);
    }

    #[test]
    fn ranged_filter_applies_upper_bounds() {
        let pileup = vec![
            base("r1", b'A', 30, 60),
            base("r2", b'A', 45, 60),
            base("r3", b'A', 30, 70),
            PileupBase::deletion("r4", None, 60),
        ];

        let kept = count_bases_ranged(&pileup, 10, 60, 10, 40);
        let names: Vec<&str> = kept.iter().map(|e| e.read_name()).collect();
        assert_eq!(names, vec!["r1", "r4"]);
    }

    #[test]
    fn vectors_sum_element_wise() {
        let mut left = CountVector::from_counts([1, 0, 2, 0, 0, 1]);
        left += &CountVector::from_counts([0, 3, 1, 0, 1, 0]);
        assert_eq!(left.counts(), &[1, 3, 3, 0, 1, 1]);

        let total: CountVector = [left, CountVector::from_counts([1; NUM_CATEGORIES])]
            .iter()
            .sum();
        assert_eq!(total.total(), 15);
    }

    #[test]
    fn deep_partitions_do_not_overflow_32_bits() {
        let deep = CountVector::from_counts([u32::MAX as u64, 0, 0, 0, 0, 1]);
        let mut sum = deep;
        sum += &deep;
        sum.increment(BaseCategory::A);
        assert_eq!(sum[BaseCategory::A], 2 * u32::MAX as u64 + 1);
        assert_eq!(sum.total(), 2 * u32::MAX as u64 + 3);
    }
}
