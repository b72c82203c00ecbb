//! Cart size distribution over the train order lines

use crate::analysis::constants::{CART_SIZE_BINS, MEAN_LINE, MEDIAN_LINE, PURPLE};
use crate::common::data_structures::OrderLine;
use crate::common::plots::{create_histogram, PlotError, ReferenceLine};
use crate::common::stats::{mean, median, sample_std_dev};
use std::collections::BTreeMap;
use std::path::Path;

/// Items-per-order distribution
#[derive(Debug, Clone)]
pub struct CartSizeAnalysis {
    /// One entry per distinct order, in ascending order-id order
    pub sizes: Vec<f64>,
    pub mean: f64,
    pub median: f64,
    pub min: usize,
    pub max: usize,
    /// Sample standard deviation (n - 1 denominator)
    pub std_dev: f64,
}

/// Counts line items per order and summarizes the distribution
pub fn generate_cart_size_analysis(lines: &[OrderLine]) -> CartSizeAnalysis {
    let mut per_order: BTreeMap<u32, usize> = BTreeMap::new();
    for line in lines {
        *per_order.entry(line.order_id).or_insert(0) += 1;
    }

    let sizes: Vec<f64> = per_order.values().map(|&count| count as f64).collect();
    let min = per_order.values().copied().min().unwrap_or(0);
    let max = per_order.values().copied().max().unwrap_or(0);

    CartSizeAnalysis {
        mean: mean(&sizes),
        median: median(&sizes),
        min,
        max,
        std_dev: sample_std_dev(&sizes),
        sizes,
    }
}

/// Prints the cart size statistics section
pub fn print_cart_size_report(analysis: &CartSizeAnalysis) {
    println!("Cart Size Statistics:");
    println!("   Mean items per order: {:.1}", analysis.mean);
    println!("   Median items per order: {:.1}", analysis.median);
    println!("   Min items: {}", analysis.min);
    println!("   Max items: {}", analysis.max);
    println!("   Std deviation: {:.1}", analysis.std_dev);
}

/// Renders the cart size histogram with mean and median markers
pub fn generate_cart_size_plots(
    analysis: &CartSizeAnalysis,
    output_dir: &Path,
) -> Result<(), PlotError> {
    let reference_lines = [
        ReferenceLine::new(format!("Mean: {:.1}", analysis.mean), analysis.mean, MEAN_LINE),
        ReferenceLine::new(
            format!("Median: {:.1}", analysis.median),
            analysis.median,
            MEDIAN_LINE,
        ),
    ];
    create_histogram(
        &analysis.sizes,
        CART_SIZE_BINS,
        "Distribution of Cart Sizes",
        "Number of Items in Cart",
        "Frequency",
        PURPLE,
        &reference_lines,
        &output_dir.join("cart_size_distribution.png"),
    )?;
    println!("   Saved: cart_size_distribution.png");
    Ok(())
}
