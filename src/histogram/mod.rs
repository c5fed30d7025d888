//! Streaming histograms
//!
//! This module provides a fixed-memory histogram that summarizes an unbounded
//! stream of real-valued observations and answers quantile queries against it.
//!
//! # Algorithms
//!
//! - [`Histogram`]: Ben-Haim/Tom-Tov style histogram with a roaming insertion gap
//!
//! # Example
//!
//! ```
//! use streamhist::histogram::Histogram;
//!
//! let mut histogram = Histogram::new(50);
//!
//! for value in [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0] {
//!     histogram.update(value).unwrap();
//! }
//!
//! let quartiles = histogram.query(&[0.25, 0.5, 0.75]).unwrap();
//! println!("Quartiles: {:?}", quartiles);
//! ```

mod streaming;

pub use streaming::{Bin, Histogram};
