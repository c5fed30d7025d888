//! Fixed-memory streaming histogram
//!
//! Approximate histogram in constant space after Ben-Haim & Tom-Tov, "A
//! Streaming Parallel Decision Tree Algorithm". Bins are kept in two
//! contiguous arrays sorted by centroid. A new observation becomes a bin of
//! its own, and once the histogram is full the two adjacent bins with the
//! closest centroids are merged.
//!
//! # Insertion Gap
//!
//! The arrays hold `max_bins + 1` slots. One of them is always the *gap*: an
//! empty slot that roams to wherever the next observation belongs. Inserting
//! shifts bins one at a time past the gap instead of moving the whole tail,
//! and after a merge the gap stays where the merged pair used to be. For
//! smooth input (a normal distribution, say) the gap is usually already close
//! to the next insertion point, so an update touches far fewer than `max_bins`
//! slots. Adversarial input (a descending sequence) still costs `O(max_bins)`.
//!
//! # Thread Safety
//!
//! `Histogram` is plain data and therefore `Send + Sync`. Queries take
//! `&self`; concurrent updates need external locking.

use crate::math;
use crate::traits::{HistogramError, QuantileSketch, Sketch};
use core::fmt;

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

/// A single histogram bin
///
/// The centroid is the mean of every observation folded into the bin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bin {
    /// Representative value of the bin
    pub centroid: f64,
    /// Number of observations in the bin
    pub count: u64,
}

impl Bin {
    /// Create a new bin
    pub fn new(centroid: f64, count: u64) -> Self {
        Self { centroid, count }
    }
}

/// Streaming histogram with a fixed maximum number of bins
///
/// # Example
///
/// ```
/// use streamhist::histogram::Histogram;
///
/// let mut histogram = Histogram::new(10);
/// for i in 1..=1000 {
///     histogram.update(i as f64).unwrap();
/// }
///
/// let result = histogram.query(&[0.0, 0.5, 1.0]).unwrap();
/// assert_eq!(result[0], 1.0);
/// assert!((result[1] - 500.0).abs() < 50.0);
/// assert_eq!(result[2], 1000.0);
/// ```
#[derive(Clone, Debug)]
pub struct Histogram {
    max_bins: usize,
    /// Bin centroids, `max_bins + 1` slots
    centroids: Vec<f64>,
    /// Bin counts, parallel to `centroids`
    counts: Vec<u64>,
    /// Active bins; slots `0..=bins` are in use, one of them being the gap
    bins: usize,
    /// Empty staging slot, always in `0..=bins`
    gap: usize,
    count: u64,
    min: f64,
    max: f64,
}

impl Histogram {
    /// Create an empty histogram holding at most `max_bins` bins
    ///
    /// # Panics
    ///
    /// Panics if `max_bins` is zero. Use [`Histogram::try_new`] to get an
    /// error instead.
    pub fn new(max_bins: usize) -> Self {
        assert!(max_bins > 0, "max_bins must be at least 1, got {}", max_bins);
        Self::with_capacity(max_bins)
    }

    /// Create an empty histogram, rejecting a zero capacity
    pub fn try_new(max_bins: usize) -> Result<Self, HistogramError> {
        if max_bins == 0 {
            return Err(HistogramError::ZeroCapacity);
        }
        Ok(Self::with_capacity(max_bins))
    }

    fn with_capacity(max_bins: usize) -> Self {
        log::debug!("creating histogram with max_bins={}", max_bins);
        Self {
            max_bins,
            centroids: vec![0.0; max_bins + 1],
            counts: vec![0; max_bins + 1],
            bins: 0,
            gap: 0,
            count: 0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    /// Build a histogram from a sequence of observations
    pub fn from_observations<I>(max_bins: usize, observations: I) -> Result<Self, HistogramError>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut histogram = Self::try_new(max_bins)?;
        for observation in observations {
            histogram.update(observation)?;
        }
        Ok(histogram)
    }

    /// Maximum number of bins
    pub fn max_bins(&self) -> usize {
        self.max_bins
    }

    /// Number of bins currently in use
    pub fn num_bins(&self) -> usize {
        self.bins
    }

    /// Total number of observations recorded
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Check if no observation has been recorded
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Smallest observation seen
    pub fn min(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.min)
        }
    }

    /// Largest observation seen
    pub fn max(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.max)
        }
    }

    /// Active bins in ascending centroid order
    pub fn bins(&self) -> impl Iterator<Item = Bin> + '_ {
        (0..=self.bins)
            .filter(move |&slot| slot != self.gap)
            .map(move |slot| Bin::new(self.centroids[slot], self.counts[slot]))
    }

    /// Record a new observation
    ///
    /// Returns an error, leaving the histogram untouched, if the observation
    /// is NaN or infinite.
    pub fn update(&mut self, observation: f64) -> Result<(), HistogramError> {
        if !observation.is_finite() {
            return Err(HistogramError::NonFiniteObservation(observation));
        }
        self.record(observation);
        Ok(())
    }

    fn record(&mut self, observation: f64) {
        self.count += 1;
        if observation < self.min {
            self.min = observation;
        }
        if observation > self.max {
            self.max = observation;
        }

        if self.absorb_or_position_gap(observation) {
            return;
        }

        self.centroids[self.gap] = observation;
        self.counts[self.gap] = 1;

        if self.bins < self.max_bins {
            self.bins += 1;
            self.gap = self.bins;
            return;
        }

        self.merge_closest();
    }

    /// Move the gap to the insertion point for `observation`.
    ///
    /// Returns `true` if a bin with exactly this centroid took the
    /// observation instead, in which case nothing is left to insert.
    fn absorb_or_position_gap(&mut self, observation: f64) -> bool {
        loop {
            if self.gap > 0 {
                let left = self.gap - 1;
                if self.centroids[left] > observation {
                    self.centroids[self.gap] = self.centroids[left];
                    self.counts[self.gap] = self.counts[left];
                    self.gap = left;
                    continue;
                } else if self.centroids[left] == observation {
                    self.counts[left] += 1;
                    return true;
                }
            }

            if self.gap < self.bins {
                let right = self.gap + 1;
                if self.centroids[right] < observation {
                    self.centroids[self.gap] = self.centroids[right];
                    self.counts[self.gap] = self.counts[right];
                    self.gap = right;
                    continue;
                } else if self.centroids[right] == observation {
                    self.counts[right] += 1;
                    return true;
                }
            }

            return false;
        }
    }

    /// Merge the adjacent pair with the smallest centroid difference.
    ///
    /// Called with all `bins + 1` slots occupied. The leftmost pair wins ties,
    /// the merged bin lands in the right slot and the left slot becomes the
    /// gap.
    fn merge_closest(&mut self) {
        let mut left = 0;
        let mut min_delta = self.centroids[1] - self.centroids[0];
        for slot in 1..self.bins {
            let delta = self.centroids[slot + 1] - self.centroids[slot];
            if delta < min_delta {
                left = slot;
                min_delta = delta;
            }
        }

        let right = left + 1;
        let merged = self.counts[left] + self.counts[right];
        self.centroids[right] = (self.centroids[left] * self.counts[left] as f64
            + self.centroids[right] * self.counts[right] as f64)
            / merged as f64;
        self.counts[right] = merged;
        self.gap = left;

        log::trace!(
            "merged slots {} and {} (delta={}) into centroid {} with count {}",
            left,
            right,
            min_delta,
            self.centroids[right],
            merged
        );
    }

    /// Bin boundaries walked by queries: a virtual `(min, 0)` boundary, every
    /// active bin, then a virtual `(max, 0)` boundary.
    fn boundaries(&self) -> impl Iterator<Item = Bin> + '_ {
        core::iter::once(Bin::new(self.min, 0))
            .chain(self.bins())
            .chain(core::iter::once(Bin::new(self.max, 0)))
    }

    /// Approximate values at the given quantiles
    ///
    /// Quantiles must be listed in ascending order; they are answered in a
    /// single forward sweep over the bins. Values `<= 0` return the minimum
    /// and values `>= 1` return the maximum.
    ///
    /// ```
    /// use streamhist::histogram::Histogram;
    ///
    /// let histogram = Histogram::from_observations(20, (0..100).map(f64::from)).unwrap();
    /// let result = histogram.query(&[0.00, 0.25, 0.50, 0.75, 1.00]).unwrap();
    /// assert_eq!(result.len(), 5);
    /// ```
    ///
    /// # Errors
    ///
    /// Fails without reading the bins if a quantile is NaN, if the quantiles
    /// are out of order, or if the histogram is empty and at least one
    /// quantile was requested.
    pub fn query(&self, quantiles: &[f64]) -> Result<Vec<f64>, HistogramError> {
        validate_quantiles(quantiles)?;
        if quantiles.is_empty() {
            return Ok(Vec::new());
        }
        if self.count == 0 {
            return Err(HistogramError::Empty);
        }

        let mut result = Vec::with_capacity(quantiles.len());
        let mut boundaries = self.boundaries();
        let mut lhs = Bin::new(self.min, 0);
        let mut rhs = boundaries.next().unwrap_or(lhs);
        let mut lhs_total = 0u64;
        let mut rhs_total = 0u64;

        for &quantile in quantiles {
            if quantile <= 0.0 {
                result.push(self.min);
                continue;
            }
            if quantile >= 1.0 {
                result.push(self.max);
                continue;
            }
            let needle = self.count as f64 * quantile;

            // each bin's count is split between the segments on either side
            // of it: floor to the right segment, ceil to the left one, so the
            // segment totals add up to exactly `count`.
            while (rhs_total as f64) < needle {
                let Some(next) = boundaries.next() else {
                    break;
                };
                lhs = rhs;
                rhs = next;
                lhs_total = rhs_total;
                rhs_total += lhs.count / 2 + rhs.count.div_ceil(2);
            }

            result.push(interpolate(lhs, rhs, lhs_total, rhs_total, needle));
        }

        Ok(result)
    }

    /// Approximate value at a single quantile, `None` if empty or NaN
    pub fn quantile(&self, quantile: f64) -> Option<f64> {
        self.query(&[quantile]).ok().and_then(|values| values.first().copied())
    }

    /// Estimated number of observations less than or equal to `value`
    ///
    /// Uses the same density model as [`Histogram::query`], so for smooth
    /// data `count_le(query(q))` is close to `q * count`.
    pub fn count_le(&self, value: f64) -> f64 {
        if value.is_nan() {
            return f64::NAN;
        }
        if self.count == 0 || value < self.min {
            return 0.0;
        }
        if value >= self.max {
            return self.count as f64;
        }

        let mut boundaries = self.boundaries();
        let Some(mut lhs) = boundaries.next() else {
            return 0.0;
        };
        let mut lhs_total = 0u64;

        for rhs in boundaries {
            let span = lhs.count / 2 + rhs.count.div_ceil(2);
            if value < rhs.centroid {
                let width = rhs.centroid - lhs.centroid;
                let z = if width > 0.0 {
                    (value - lhs.centroid) / width
                } else {
                    0.0
                };
                let a = rhs.count as f64 - lhs.count as f64;
                let within = if a == 0.0 {
                    z * span as f64
                } else {
                    lhs.count as f64 * z + a * z * z / 2.0
                };
                return lhs_total as f64 + within.clamp(0.0, span as f64);
            }
            lhs_total += span;
            lhs = rhs;
        }

        self.count as f64
    }

    /// Estimated fraction of observations less than or equal to `value`
    pub fn rank(&self, value: f64) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.count_le(value) / self.count as f64
    }

    /// Memory usage in bytes
    pub fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>()
            + self.centroids.capacity() * core::mem::size_of::<f64>()
            + self.counts.capacity() * core::mem::size_of::<u64>()
    }
}

fn validate_quantiles(quantiles: &[f64]) -> Result<(), HistogramError> {
    for (index, quantile) in quantiles.iter().enumerate() {
        if quantile.is_nan() {
            return Err(HistogramError::NanQuantile { index });
        }
        if index > 0 && *quantile < quantiles[index - 1] {
            return Err(HistogramError::UnsortedQuantiles { index });
        }
    }
    Ok(())
}

/// Value at cumulative weight `needle` inside the segment `lhs..rhs`.
///
/// The density is assumed to vary linearly from `lhs.count` to `rhs.count`
/// across the segment, which turns the inverse into a quadratic in `z`.
///
/// The integer segment total can exceed the model's area by half an
/// observation, pushing `z` past 1 (or the discriminant below 0). `z` is
/// clamped to the segment so results never overtake the next centroid.
fn interpolate(lhs: Bin, rhs: Bin, lhs_total: u64, rhs_total: u64, needle: f64) -> f64 {
    let a = rhs.count as f64 - lhs.count as f64;
    let z = if a == 0.0 {
        let span = (rhs_total - lhs_total) as f64;
        if span == 0.0 {
            0.0
        } else {
            (needle - lhs_total as f64) / span
        }
    } else {
        let b = 2.0 * lhs.count as f64;
        let c = 2.0 * (lhs_total as f64 - needle);
        let discriminant = (b * b - 4.0 * a * c).max(0.0);
        (-b + math::sqrt(discriminant)) / (2.0 * a)
    };
    let value = lhs.centroid + (rhs.centroid - lhs.centroid) * z.clamp(0.0, 1.0);
    value.min(rhs.centroid)
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new(100)
    }
}

impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Histogram {{")?;
        for bin in self.bins() {
            writeln!(f, "  {}: {}", bin.centroid, bin.count)?;
        }
        write!(f, "}}")
    }
}

impl Extend<f64> for Histogram {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, observations: I) {
        for observation in observations {
            QuantileSketch::add(self, observation);
        }
    }
}

impl Sketch for Histogram {
    type Item = f64;

    fn update(&mut self, item: &f64) {
        QuantileSketch::add(self, *item);
    }

    fn size_bytes(&self) -> usize {
        Histogram::size_bytes(self)
    }

    fn count(&self) -> u64 {
        self.count
    }
}

impl QuantileSketch for Histogram {
    type Value = f64;

    /// Non-finite values are skipped with a warning.
    fn add(&mut self, value: f64) {
        if let Err(err) = Histogram::update(self, value) {
            log::warn!("skipping observation: {}", err);
        }
    }

    fn quantile(&self, rank: f64) -> Option<f64> {
        Histogram::quantile(self, rank)
    }

    fn rank(&self, value: &f64) -> f64 {
        Histogram::rank(self, *value)
    }

    fn min(&self) -> Option<f64> {
        Histogram::min(self)
    }

    fn max(&self) -> Option<f64> {
        Histogram::max(self)
    }

    fn quantiles(&self, ranks: &[f64]) -> Vec<Option<f64>> {
        match self.query(ranks) {
            Ok(values) => values.into_iter().map(Some).collect(),
            Err(_) => ranks.iter().map(|&r| Histogram::quantile(self, r)).collect(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
