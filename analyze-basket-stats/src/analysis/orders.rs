//! Order-level activity: volumes, weekday rhythm and hourly rhythm

use crate::analysis::constants::{
    CORAL, DAY_NAMES, HOURS_PER_DAY, PEAK_HOURS_REPORTED, STEEL_BLUE,
};
use crate::common::buckets::{format_table, group_digits};
use crate::common::data_structures::Order;
use crate::common::plots::{create_bar_chart, create_hour_area_chart, PlotError};
use crate::common::stats::percent;
use std::collections::HashSet;
use std::path::Path;
use tabled::Tabled;

/// Aggregated order activity over the loaded (row-capped) orders table
#[derive(Debug, Clone)]
pub struct OrderActivity {
    pub distinct_orders: usize,
    pub distinct_users: usize,
    pub order_number_min: u32,
    pub order_number_max: u32,
    /// Order counts indexed by `order_dow` (0 = Sunday)
    pub dow_counts: [usize; 7],
    /// Order counts indexed by `order_hour_of_day`
    pub hour_counts: [usize; HOURS_PER_DAY],
    /// Loaded row count, the denominator for day-of-week shares
    pub total_rows: usize,
}

impl OrderActivity {
    /// Share of all loaded orders placed on `dow`, in percent
    pub fn dow_share(&self, dow: usize) -> f64 {
        percent(self.dow_counts.get(dow).copied().unwrap_or(0), self.total_rows)
    }

    /// The `count` busiest hours, ordered by count descending then hour
    /// ascending
    pub fn peak_hours(&self, count: usize) -> Vec<(usize, usize)> {
        let mut hours: Vec<(usize, usize)> = self.hour_counts.iter().copied().enumerate().collect();
        hours.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        hours.truncate(count);
        hours
    }

    /// Name and count of the busiest day; the earliest day wins ties
    pub fn busiest_day(&self) -> (&'static str, usize) {
        let (dow, &count) = self
            .dow_counts
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(&a.0)))
            .unwrap_or((0, &0));
        (DAY_NAMES[dow], count)
    }
}

/// Computes order activity over the loaded orders table
pub fn generate_order_activity(orders: &[Order]) -> OrderActivity {
    let mut order_ids = HashSet::with_capacity(orders.len());
    let mut user_ids = HashSet::new();
    let mut dow_counts = [0usize; 7];
    let mut hour_counts = [0usize; HOURS_PER_DAY];
    let mut order_number_min = u32::MAX;
    let mut order_number_max = 0u32;

    for order in orders {
        order_ids.insert(order.order_id);
        user_ids.insert(order.user_id);
        if let Some(slot) = dow_counts.get_mut(order.order_dow as usize) {
            *slot += 1;
        }
        if let Some(slot) = hour_counts.get_mut(order.order_hour_of_day as usize) {
            *slot += 1;
        }
        order_number_min = order_number_min.min(order.order_number);
        order_number_max = order_number_max.max(order.order_number);
    }

    if orders.is_empty() {
        order_number_min = 0;
    }

    OrderActivity {
        distinct_orders: order_ids.len(),
        distinct_users: user_ids.len(),
        order_number_min,
        order_number_max,
        dow_counts,
        hour_counts,
        total_rows: orders.len(),
    }
}

#[derive(Tabled)]
struct DayRow {
    #[tabled(rename = "Day")]
    day: &'static str,
    #[tabled(rename = "Orders")]
    orders: String,
    #[tabled(rename = "Share")]
    share: String,
}

#[derive(Tabled)]
struct HourRow {
    #[tabled(rename = "Hour")]
    hour: String,
    #[tabled(rename = "Orders")]
    orders: String,
}

/// Prints the order statistics part of the descriptive statistics section
pub fn print_order_activity_report(activity: &OrderActivity) {
    println!("ORDERS STATISTICS:");
    println!(
        "   Total orders (sample): {}",
        group_digits(activity.distinct_orders as u64)
    );
    println!(
        "   Total users (sample): {}",
        group_digits(activity.distinct_users as u64)
    );
    println!(
        "   Order number range: {} - {}",
        activity.order_number_min, activity.order_number_max
    );

    let day_rows: Vec<DayRow> = DAY_NAMES
        .iter()
        .enumerate()
        .map(|(dow, &day)| DayRow {
            day,
            orders: group_digits(activity.dow_counts[dow] as u64),
            share: format!("{:.1}%", activity.dow_share(dow)),
        })
        .collect();
    println!();
    println!("{}", format_table(&day_rows, Some("Orders by Day of Week")));

    let hour_rows: Vec<HourRow> = activity
        .peak_hours(PEAK_HOURS_REPORTED)
        .into_iter()
        .map(|(hour, count)| HourRow {
            hour: format!("{:02}:00", hour),
            orders: group_digits(count as u64),
        })
        .collect();
    println!();
    println!("{}", format_table(&hour_rows, Some("Peak Shopping Hours")));
}

/// Renders the day-of-week bar chart and the hour-of-day area chart
pub fn generate_order_activity_plots(
    activity: &OrderActivity,
    output_dir: &Path,
) -> Result<(), PlotError> {
    create_bar_chart(
        &DAY_NAMES,
        &activity.dow_counts,
        "Orders Distribution by Day of Week",
        "Day of Week",
        "Number of Orders",
        STEEL_BLUE,
        &output_dir.join("orders_by_day.png"),
    )?;
    println!("   Saved: orders_by_day.png");

    create_hour_area_chart(
        &activity.hour_counts,
        "Orders Distribution by Hour of Day",
        "Hour of Day",
        "Number of Orders",
        CORAL,
        &output_dir.join("orders_by_hour.png"),
    )?;
    println!("   Saved: orders_by_hour.png");

    Ok(())
}
