//! One-shot descriptive analysis of a market basket dataset
//!
//! Loads the six CSV tables from `data/`, prints a sectioned text report to
//! standard output and writes seven PNG figures to `figures/`. The run is a
//! single linear pipeline; any failure aborts with a nonzero exit code.

mod analysis;
mod common;
mod parsing;

use crate::analysis::carts::CartSizeAnalysis;
use crate::analysis::customers::CustomerBehavior;
use crate::analysis::orders::OrderActivity;
use crate::analysis::products::ProductInsights;
use crate::common::plots::PlotError;
use crate::parsing::ParsingError;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Directory the six input CSV files are read from
const DATA_DIR: &str = "data";

/// Directory the PNG figures are written to (created if absent)
const FIGURES_DIR: &str = "figures";

const BANNER_WIDTH: usize = 60;

/// Errors that abort the analysis run
#[derive(Error, Debug)]
enum RunError {
    #[error(transparent)]
    Parsing(#[from] ParsingError),

    #[error(transparent)]
    Plot(#[from] PlotError),

    #[error("Failed to create figures directory: {0}")]
    FiguresDir(std::io::Error),
}

fn print_rule() {
    println!("{}", "=".repeat(BANNER_WIDTH));
}

fn print_section(number: usize, title: &str) {
    println!();
    print_rule();
    println!("{}. {}", number, title);
    print_rule();
    println!();
}

fn print_summary(
    activity: &OrderActivity,
    insights: &ProductInsights,
    carts: &CartSizeAnalysis,
    behavior: &CustomerBehavior,
) {
    let (busiest_day, busiest_count) = activity.busiest_day();
    println!("KEY FINDINGS:");
    println!(
        "   Busiest day: {} ({:.1}% of orders)",
        busiest_day,
        crate::common::stats::percent(busiest_count, activity.total_rows)
    );
    if let Some(&(hour, _)) = activity.peak_hours(1).first() {
        println!("   Peak hour: {:02}:00", hour);
    }
    if let Some(top) = insights.top_products.first() {
        println!("   Top product: {}", top.name);
    }
    if let Some(top) = insights.departments.first() {
        println!(
            "   Leading department: {} ({:.1}% of order lines)",
            top.name,
            crate::common::stats::percent(top.count, insights.enriched_line_count)
        );
    }
    println!("   Average cart size: {:.1} items", carts.mean);
    println!(
        "   Reorder rate (train): {:.1}%",
        insights.train_reorder_rate * 100.0
    );
    println!(
        "   Median days between orders: {:.1}",
        behavior.gap_median
    );
    println!();
    println!("Figures saved to: {}", FIGURES_DIR);
}

fn main() -> Result<(), RunError> {
    print_rule();
    println!("MARKET BASKET ANALYSIS");
    print_rule();
    println!();
    println!("Loading datasets...");

    let dataset = parsing::load_dataset(Path::new(DATA_DIR))?;
    println!(
        "Note: orders.csv and order_products__prior.csv are row-capped; \
         their statistics describe the loaded file prefix, not the full dataset."
    );

    let profiles = analysis::profile_dataset(&dataset);
    print_section(1, "DATA OVERVIEW");
    analysis::print_overview_report(&profiles);

    print_section(2, "DATA QUALITY CHECK");
    analysis::print_quality_report(&profiles);

    let activity = analysis::generate_order_activity(&dataset.orders);
    let insights = analysis::generate_product_insights(&dataset);
    print_section(3, "DESCRIPTIVE STATISTICS");
    analysis::print_order_activity_report(&activity);
    println!();
    analysis::print_catalog_report(&insights);

    print_section(4, "TOP PRODUCTS ANALYSIS");
    analysis::print_ranking_report(&insights);

    let carts = analysis::generate_cart_size_analysis(&dataset.train_lines);
    print_section(5, "CART SIZE ANALYSIS");
    analysis::print_cart_size_report(&carts);

    let behavior = analysis::generate_customer_behavior(&dataset.orders);
    print_section(6, "CUSTOMER BEHAVIOR ANALYSIS");
    analysis::print_customer_report(&behavior);

    print_section(7, "GENERATING VISUALIZATIONS");
    let figures_dir = Path::new(FIGURES_DIR);
    fs::create_dir_all(figures_dir).map_err(RunError::FiguresDir)?;
    analysis::generate_order_activity_plots(&activity, figures_dir)?;
    analysis::generate_product_plots(&insights, figures_dir)?;
    analysis::generate_cart_size_plots(&carts, figures_dir)?;
    analysis::generate_customer_plots(&behavior, figures_dir)?;

    print_section(8, "ANALYSIS SUMMARY");
    print_summary(&activity, &insights, &carts, &behavior);

    println!();
    print_rule();
    println!("ANALYSIS COMPLETE");
    print_rule();
    Ok(())
}
