//! Customer behavior: order cadence and orders-per-user distribution

use crate::analysis::constants::{DODGER_BLUE, MEAN_LINE, ORDER_GAP_BINS};
use crate::common::data_structures::Order;
use crate::common::plots::{create_histogram, PlotError, ReferenceLine};
use crate::common::stats::{mean, median, mode};
use std::collections::BTreeMap;
use std::path::Path;

/// Order cadence and per-user order volume
#[derive(Debug, Clone)]
pub struct CustomerBehavior {
    /// Days since the prior order, first orders dropped, in file order
    pub gap_days: Vec<f64>,
    pub gap_mean: f64,
    pub gap_median: f64,
    /// Most common gap; ties resolve to the smallest value
    pub gap_mode: f64,
    pub orders_per_user_mean: f64,
    pub orders_per_user_median: f64,
    pub orders_per_user_max: usize,
}

/// Computes cadence and per-user statistics over the loaded orders table
pub fn generate_customer_behavior(orders: &[Order]) -> CustomerBehavior {
    let gap_days: Vec<f64> = orders
        .iter()
        .filter_map(|order| order.days_since_prior_order)
        .collect();

    let mut per_user: BTreeMap<u32, usize> = BTreeMap::new();
    for order in orders {
        *per_user.entry(order.user_id).or_insert(0) += 1;
    }
    let order_counts: Vec<f64> = per_user.values().map(|&count| count as f64).collect();

    CustomerBehavior {
        gap_mean: mean(&gap_days),
        gap_median: median(&gap_days),
        gap_mode: mode(&gap_days),
        orders_per_user_mean: mean(&order_counts),
        orders_per_user_median: median(&order_counts),
        orders_per_user_max: per_user.values().copied().max().unwrap_or(0),
        gap_days,
    }
}

/// Prints the customer behavior section
pub fn print_customer_report(behavior: &CustomerBehavior) {
    println!("Days Between Orders:");
    println!("   Mean: {:.1} days", behavior.gap_mean);
    println!("   Median: {:.1} days", behavior.gap_median);
    println!("   Most common: {:.0} days", behavior.gap_mode);
    println!();
    println!("Orders per User:");
    println!("   Mean: {:.1} orders", behavior.orders_per_user_mean);
    println!("   Median: {:.1} orders", behavior.orders_per_user_median);
    println!("   Max: {} orders", behavior.orders_per_user_max);
}

/// Renders the days-between-orders histogram with a mean marker
pub fn generate_customer_plots(
    behavior: &CustomerBehavior,
    output_dir: &Path,
) -> Result<(), PlotError> {
    let reference_lines = [ReferenceLine::new(
        format!("Mean: {:.1} days", behavior.gap_mean),
        behavior.gap_mean,
        MEAN_LINE,
    )];
    create_histogram(
        &behavior.gap_days,
        ORDER_GAP_BINS,
        "Distribution of Days Between Orders",
        "Days Since Prior Order",
        "Frequency",
        DODGER_BLUE,
        &reference_lines,
        &output_dir.join("days_since_prior_order.png"),
    )?;
    println!("   Saved: days_since_prior_order.png");
    Ok(())
}
