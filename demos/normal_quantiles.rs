//! Feeds a million standard-normal draws through a 1000-bin histogram and
//! prints its quantile estimates next to the exact sample quantiles.
//!
//! Run with: cargo run --release --example normal_quantiles

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::{fmt, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt};

use streamhist::histogram::Histogram;

const SAMPLES: usize = 1_000_000;
const QUANTILES: [f64; 9] = [0.0, 0.002, 0.023, 0.159, 0.500, 0.841, 0.977, 0.998, 1.0];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry().with(fmt::layer()).init();

    let mut rng = StdRng::from_entropy();
    let mut histogram = Histogram::try_new(1000)?;
    let mut actual = Vec::with_capacity(SAMPLES);

    for _ in 0..SAMPLES {
        let u1: f64 = 1.0 - rng.gen::<f64>();
        let u2: f64 = rng.gen();
        let observation = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        histogram.update(observation)?;
        actual.push(observation);
    }
    actual.sort_by(|a, b| a.total_cmp(b));
    info!(
        "recorded {} observations in {} bins ({} bytes)",
        histogram.count(),
        histogram.num_bins(),
        histogram.size_bytes()
    );

    let estimated = histogram.query(&QUANTILES)?;
    let exact: Vec<f64> = QUANTILES
        .iter()
        .map(|q| actual[((q * SAMPLES as f64) as usize).min(SAMPLES - 1)])
        .collect();

    println!("{:?}", estimated);
    println!("{:?}", exact);
    Ok(())
}
