//! Core traits for streaming sketches
//!
//! Sketches implement the base [`Sketch`] trait; quantile estimators add
//! [`QuantileSketch`] on top of it.

use core::fmt::Debug;

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Error returned when a histogram operation is called with invalid input
///
/// Every fallible operation validates its input before touching any state,
/// so an error always leaves the histogram exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HistogramError {
    /// A histogram was requested with room for zero bins
    ZeroCapacity,
    /// An observation was NaN or infinite
    NonFiniteObservation(f64),
    /// A queried quantile was NaN
    NanQuantile {
        index: usize,
    },
    /// A queried quantile was smaller than the one before it
    UnsortedQuantiles {
        index: usize,
    },
    /// Quantiles were requested from a histogram with no observations
    Empty,
}

impl core::fmt::Display for HistogramError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HistogramError::ZeroCapacity => write!(f, "max_bins must be at least 1"),
            HistogramError::NonFiniteObservation(v) => {
                write!(f, "observation must be finite, got {}", v)
            }
            HistogramError::NanQuantile { index } => {
                write!(f, "quantile at index {} is NaN", index)
            }
            HistogramError::UnsortedQuantiles { index } => {
                write!(
                    f,
                    "quantiles must be in ascending order: index {} is below its predecessor",
                    index
                )
            }
            HistogramError::Empty => write!(f, "histogram has no observations"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HistogramError {}

/// Core trait for all streaming sketches
pub trait Sketch: Clone + Debug {
    /// The type of item this sketch processes
    type Item: ?Sized;

    /// Add an item to the sketch
    fn update(&mut self, item: &Self::Item);

    /// Memory usage in bytes
    fn size_bytes(&self) -> usize;

    /// Number of items processed
    fn count(&self) -> u64;

    /// Check if sketch is empty
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// Quantile estimation sketches
pub trait QuantileSketch: Sketch {
    /// The value type being tracked
    type Value: PartialOrd + Clone;

    /// Add a value to the sketch
    fn add(&mut self, value: Self::Value);

    /// Get quantile value at given rank (0.0 to 1.0)
    ///
    /// rank=0.5 returns the median
    fn quantile(&self, rank: f64) -> Option<Self::Value>;

    /// Get rank of a value (0.0 to 1.0)
    fn rank(&self, value: &Self::Value) -> f64;

    /// Get CDF value at given point
    fn cdf(&self, value: &Self::Value) -> f64 {
        self.rank(value)
    }

    /// Get minimum value seen
    fn min(&self) -> Option<Self::Value>;

    /// Get maximum value seen
    fn max(&self) -> Option<Self::Value>;

    /// Get median (50th percentile)
    fn median(&self) -> Option<Self::Value> {
        self.quantile(0.5)
    }

    /// Get multiple quantiles at once
    fn quantiles(&self, ranks: &[f64]) -> Vec<Option<Self::Value>> {
        ranks.iter().map(|&r| self.quantile(r)).collect()
    }
}
