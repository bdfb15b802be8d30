//! Bins normal and uniform samples, then compares the three ASH algorithms
//!
//! Run with `RUST_LOG=debug` to see the histogram operations as they happen.

use ash_histogram::{
    AshStrategy, BinCounter, CountHistogram, Error, HistogramConfig, ScaledHistogram,
    TallyHistogram,
};
use rand::prelude::*;
use rand_distr::{Normal, Uniform};
use tracing_subscriber::EnvFilter;

fn main() -> ash_histogram::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut rng = StdRng::seed_from_u64(2024);
    let normal = Normal::new(0.0, 1.0).map_err(|e| Error::InvalidParameter(e.to_string()))?;
    let normal_data: Vec<f64> = (0..5_000).map(|_| normal.sample(&mut rng)).collect();
    let uniform = Uniform::new(0.0, 1.0);
    let uniform_data: Vec<f64> = (0..2_000).map(|_| uniform.sample(&mut rng)).collect();

    // Example 1: Overflow counters and running statistics
    println!("=== Normal Sample over [-10, 10] ===");
    let mut hist = TallyHistogram::new(-10.0, 10.0, 200)?.with_name("standard normal");
    hist.fill(&normal_data)?;
    println!("{}", hist.report()?);
    println!("Below: {}, above: {}", hist.below(), hist.above());

    // Example 2: Trim the empty tails, then coarsen
    println!("\n=== Trim and Aggregate ===");
    let trimmed = hist.trim();
    println!(
        "Trimmed to [{:.2}, {:.2}] with {} bins",
        trimmed.a(),
        trimmed.b(),
        trimmed.num_bins()
    );
    let coarse = trimmed.aggregate(4)?;
    println!("{coarse}");

    // Example 3: Smooth a uniform sample with every algorithm
    println!("=== ASH on Uniform(0, 1) ===");
    let mut counts = CountHistogram::new(0.0, 1.0, 100)?;
    counts.fill(&uniform_data)?;
    let density = ScaledHistogram::from_counter(&counts, 1.0)?;
    println!(
        "raw histogram: ISE = {:.6}, polygonal ISE = {:.6}",
        density.ise_vs_uniform()?,
        density.ise_vs_uniform_polygonal()?
    );

    for radius in [2, 5, 10] {
        for strategy in AshStrategy::ALL {
            let smoothed = density.average_shifted(radius, strategy)?;
            println!(
                "r = {radius:>2} {:<10} ISE = {:.6}, polygonal ISE = {:.6}, area = {:.4}",
                strategy.name(),
                smoothed.ise_vs_uniform()?,
                smoothed.ise_vs_uniform_polygonal()?,
                smoothed.integral()
            );
        }
    }

    // Example 4: The same pipeline driven by a JSON configuration
    println!("\n=== Configured Pipeline ===");
    let config = HistogramConfig::from_json(
        r#"{ "lower": -4.0, "upper": 4.0, "num_bins": 40, "ash_strategy": "spreading" }"#,
    )?;
    let mut configured = config.build()?;
    configured.extend(&normal_data)?;
    let smoothed = config.smooth(&config.scale(&configured, 1.0)?, 3)?;
    println!("{smoothed}");

    Ok(())
}
