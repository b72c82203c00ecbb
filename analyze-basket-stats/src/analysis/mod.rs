//! Domain-specific analysis modules
//!
//! This module contains domain-specific analysis logic for:
//! - Table profiling (shape, memory, data quality)
//! - Order activity (weekday and hourly rhythm)
//! - Product, aisle and department rankings plus reorder rates
//! - Cart size distribution
//! - Customer behavior (order cadence, orders per user)

pub mod carts;
pub mod constants;
pub mod customers;
pub mod orders;
pub mod overview;
pub mod products;

// Re-export analysis functions for convenience
pub use carts::{generate_cart_size_analysis, generate_cart_size_plots, print_cart_size_report};
pub use customers::{generate_customer_behavior, generate_customer_plots, print_customer_report};
pub use orders::{
    generate_order_activity, generate_order_activity_plots, print_order_activity_report,
};
pub use overview::{print_overview_report, print_quality_report, profile_dataset};
pub use products::{
    generate_product_insights, generate_product_plots, print_catalog_report, print_ranking_report,
};
