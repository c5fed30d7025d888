//! # Streamhist
//!
//! Approximate histograms over unbounded streams, in fixed memory.
//!
//! Streamhist summarizes a stream of real-valued observations with a bounded
//! number of bins and answers quantile queries (median, percentiles, min/max)
//! online, without storing or sorting the data.
//!
//! ## Features
//!
//! - **Fixed memory**: capacity is chosen once, at construction
//! - **Cache friendly**: bins live in contiguous arrays, insertion shifts only
//!   as far as the roaming gap has to travel
//! - **Batch queries**: ascending quantiles are answered in one sweep
//! - **`no_std`**: only `alloc` is required
//!
//! ## Quick Start
//!
//! ```rust
//! use streamhist::prelude::*;
//!
//! let mut histogram = Histogram::new(100);
//! for latency_ms in [12.0, 15.0, 11.0, 240.0, 14.0, 13.0] {
//!     histogram.update(latency_ms).unwrap();
//! }
//!
//! let result = histogram.query(&[0.0, 0.5, 0.99, 1.0]).unwrap();
//! assert_eq!(result[0], 11.0);
//! assert_eq!(result[3], 240.0);
//! println!("p50 ~ {}, p99 ~ {}", result[1], result[2]);
//! ```
//!
//! ## Generic Use
//!
//! [`Histogram`] implements [`QuantileSketch`](traits::QuantileSketch), so it
//! can sit behind code written against the sketch traits:
//!
//! ```rust
//! use streamhist::histogram::Histogram;
//! use streamhist::traits::QuantileSketch;
//!
//! fn p90<S: QuantileSketch<Value = f64>>(sketch: &S) -> Option<f64> {
//!     sketch.quantile(0.9)
//! }
//!
//! let mut histogram = Histogram::new(10);
//! histogram.add(3.0);
//! assert_eq!(p90(&histogram), Some(3.0));
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Standard library support. Without it, math falls back
//!   to `libm`.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod traits;

pub mod histogram;

mod math;

pub mod prelude {
    pub use crate::traits::*;

    pub use crate::histogram::{Bin, Histogram};
}

pub use histogram::Histogram;
pub use traits::HistogramError;
