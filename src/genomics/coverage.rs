//! Depth-histogram summaries.
//!
//! Histograms are per-bin frequencies over increasing depth. The helpers
//! here turn them into quantile bins and threshold percentages, and fold the
//! per-sample median bins of each target into a [`TargetCoverageTable`].

use tracing::warn;

use crate::CoverageError;

/// Smallest bin whose cumulative count reaches `proportion` of the total.
///
/// Returns bin 0 for an empty or all-zero histogram. A threshold landing
/// exactly on a cumulative sum resolves to the bin that reaches it. A
/// proportion above 1 is never reached and yields the last bin.
pub fn quantile_bin(histogram: &[u64], proportion: f64) -> usize {
    let total: u64 = histogram.iter().sum();
    let threshold = proportion * total as f64;
    if threshold <= 0.0 || threshold.is_nan() {
        return 0;
    }

    let mut cumulative = 0u64;
    for (bin, &count) in histogram.iter().enumerate() {
        cumulative += count;
        if cumulative as f64 >= threshold {
            return bin;
        }
    }
    histogram.len().saturating_sub(1)
}

/// Percentage of observations in bins at or above `bin`.
///
/// Fails with [`CoverageError::UndefinedRatio`] when the histogram holds no
/// observations.
pub fn pct_above(histogram: &[u64], bin: usize) -> Result<f64, CoverageError> {
    let split = bin.min(histogram.len());
    let below: u64 = histogram[..split].iter().sum();
    let above: u64 = histogram[split..].iter().sum();

    match above + below {
        0 => Err(CoverageError::UndefinedRatio { bin }),
        total => Ok(100.0 * above as f64 / total as f64),
    }
}

/// Cumulative count of targets by covered-sample count and depth bin.
///
/// `get(rank, bin)` is the number of targets seen so far with at least
/// `rank + 1` samples whose median depth bin is ≥ `bin`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetCoverageTable {
    cells: Vec<Vec<u64>>,
    num_bins: usize,
}

impl TargetCoverageTable {
    /// Zeroed table for up to `max_samples` samples over `num_bins` bins.
    pub fn new(max_samples: usize, num_bins: usize) -> Self {
        Self {
            cells: vec![vec![0; num_bins]; max_samples],
            num_bins,
        }
    }

    /// Number of sample-count rows.
    pub fn max_samples(&self) -> usize {
        self.cells.len()
    }

    /// Number of depth-bin columns.
    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    /// Cell value; zero outside the table.
    pub fn get(&self, rank: usize, bin: usize) -> u64 {
        self.cells
            .get(rank)
            .and_then(|row| row.get(bin))
            .copied()
            .unwrap_or(0)
    }

    /// Rows in rank order.
    pub fn rows(&self) -> &[Vec<u64>] {
        &self.cells
    }

    /// Record one target given the depth histogram of every sample.
    ///
    /// Medians past the last column count toward the last column. Ranks
    /// beyond the last row are not representable and are dropped.
    pub fn update<H: AsRef<[u64]>>(&mut self, histograms: &[H]) {
        if self.num_bins == 0 {
            return;
        }

        let mut medians_at_or_above = vec![0usize; self.num_bins];
        for histogram in histograms {
            let median = quantile_bin(histogram.as_ref(), 0.5);
            let column = if median >= self.num_bins {
                warn!(
                    median,
                    num_bins = self.num_bins,
                    "median bin past table width; clamping"
                );
                self.num_bins - 1
            } else {
                median
            };
            for count in &mut medians_at_or_above[..=column] {
                *count += 1;
            }
        }

        if histograms.len() > self.cells.len() {
            warn!(
                samples = histograms.len(),
                max_samples = self.cells.len(),
                "more samples than table rows; extra ranks dropped"
            );
        }

        for (bin, &covered) in medians_at_or_above.iter().enumerate() {
            for rank in (1..=covered.min(self.cells.len())).rev() {
                self.cells[rank - 1][bin] += 1;
            }
        }
    }
}

/// Fold one target's per-sample histograms into `table`.
pub fn update_target_table<H: AsRef<[u64]>>(table: &mut TargetCoverageTable, histograms: &[H]) {
    table.update(histograms);
}

/// Maps raw depths onto histogram bins defined by ascending left endpoints.
///
/// Bin 0 holds depths below the first endpoint; bin `i` holds depths in
/// `[endpoints[i-1], endpoints[i])`; the last bin is open-ended.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DepthBins {
    endpoints: Vec<u32>,
}

impl DepthBins {
    /// Bins from strictly ascending left endpoints.
    pub fn new(endpoints: Vec<u32>) -> Result<Self, CoverageError> {
        if endpoints.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(CoverageError::configuration(
                "depth bin endpoints must be strictly ascending",
            ));
        }
        Ok(Self { endpoints })
    }

    /// Evenly spaced endpoints `start, start + step, ...` up to and including `stop`.
    pub fn uniform(start: u32, stop: u32, step: u32) -> Result<Self, CoverageError> {
        if step == 0 || start > stop {
            return Err(CoverageError::configuration(format!(
                "cannot build depth bins from {start} to {stop} by {step}"
            )));
        }
        Self::new((start..=stop).step_by(step as usize).collect())
    }

    /// Left endpoints of bins 1 and up.
    pub fn endpoints(&self) -> &[u32] {
        &self.endpoints
    }

    /// Number of bins, including the catch-all bin 0.
    pub fn num_bins(&self) -> usize {
        self.endpoints.len() + 1
    }

    /// Bin holding `depth`.
    pub fn bin_of(&self, depth: u32) -> usize {
        self.endpoints.partition_point(|&left| left <= depth)
    }

    /// Histogram of a sequence of per-position depths.
    pub fn histogram<I: IntoIterator<Item = u32>>(&self, depths: I) -> Vec<u64> {
        let mut histogram = vec![0u64; self.num_bins()];
        for depth in depths {
            histogram[self.bin_of(depth)] += 1;
        }
        histogram
    }
}

/// Quantile and threshold summary of one sample's depth histogram.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleCoverageSummary {
    /// Sample name.
    pub sample: String,
    /// Total number of observations.
    pub total: u64,
    /// Bin of the first quartile.
    pub lower_quartile_bin: usize,
    /// Median bin.
    pub median_bin: usize,
    /// Bin of the third quartile.
    pub upper_quartile_bin: usize,
    /// `(bin, percentage at or above)` per requested bin; `None` when undefined.
    pub pct_above: Vec<(usize, Option<f64>)>,
}

impl SampleCoverageSummary {
    /// Summarise a histogram, reporting the percentage above each of `bins`.
    pub fn from_histogram(sample: impl Into<String>, histogram: &[u64], bins: &[usize]) -> Self {
        Self {
            sample: sample.into(),
            total: histogram.iter().sum(),
            lower_quartile_bin: quantile_bin(histogram, 0.25),
            median_bin: quantile_bin(histogram, 0.5),
            upper_quartile_bin: quantile_bin(histogram, 0.75),
            pct_above: bins
                .iter()
                .map(|&bin| (bin, pct_above(histogram, bin).ok()))
                .collect(),
        }
    }
}
