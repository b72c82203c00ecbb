//! Catalog cardinalities, reorder rates and the dimension join behind the
//! product, aisle and department rankings

use crate::analysis::constants::{
    PIE_PALETTE, SEA_GREEN, TEAL, TOP_AISLES_REPORTED, TOP_DEPARTMENTS_PLOTTED,
    TOP_PRODUCTS_PLOTTED, TOP_PRODUCTS_REPORTED,
};
use crate::common::buckets::{format_table, group_digits};
use crate::common::data_structures::{Aisle, Dataset, Department, EnrichedOrderLine, OrderLine, Product};
use crate::common::plots::{create_horizontal_bar_chart, create_pie_chart, PlotError};
use crate::common::stats::percent;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tabled::Tabled;

/// A name with its order-line frequency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedCount {
    pub name: String,
    pub count: usize,
}

/// Mean reordered flag for one department
#[derive(Debug, Clone)]
pub struct DepartmentReorder {
    pub department: String,
    /// Fraction of lines with the reordered flag set, in [0, 1]
    pub rate: f64,
}

/// Catalog- and product-level aggregates
#[derive(Debug, Clone)]
pub struct ProductInsights {
    pub distinct_products: usize,
    pub distinct_aisles: usize,
    pub distinct_departments: usize,
    /// Mean reordered flag over the train lines, in [0, 1]
    pub train_reorder_rate: f64,
    /// Mean reordered flag over the (row-capped) prior lines, in [0, 1]
    pub prior_reorder_rate: f64,
    /// Rows surviving the three-way dimension join
    pub enriched_line_count: usize,
    /// Most frequent products, enough entries for both report and chart
    pub top_products: Vec<RankedCount>,
    pub top_aisles: Vec<RankedCount>,
    /// Every department, ranked by line frequency
    pub departments: Vec<RankedCount>,
    /// Departments ranked by reorder rate, descending
    pub department_reorder: Vec<DepartmentReorder>,
}

/// Fraction of lines with the reordered flag set, or `0.0` for no lines
pub fn reorder_rate(lines: &[OrderLine]) -> f64 {
    if lines.is_empty() {
        return 0.0;
    }
    let reordered: u64 = lines.iter().map(|line| u64::from(line.reordered)).sum();
    reordered as f64 / lines.len() as f64
}

/// Inner-joins order lines against the three dimension tables
///
/// Lines whose product, aisle or department id does not resolve are dropped;
/// with fully resolving foreign keys the output has one row per input line.
pub fn enrich_order_lines(
    lines: &[OrderLine],
    products: &[Product],
    aisles: &[Aisle],
    departments: &[Department],
) -> Vec<EnrichedOrderLine> {
    let product_index: HashMap<u32, &Product> = products
        .iter()
        .map(|product| (product.product_id, product))
        .collect();
    let aisle_names: HashMap<u32, &str> = aisles
        .iter()
        .map(|aisle| (aisle.aisle_id, aisle.aisle.as_str()))
        .collect();
    let department_names: HashMap<u32, &str> = departments
        .iter()
        .map(|department| (department.department_id, department.department.as_str()))
        .collect();

    lines
        .iter()
        .filter_map(|line| {
            let product = product_index.get(&line.product_id)?;
            let aisle = aisle_names.get(&product.aisle_id)?;
            let department = department_names.get(&product.department_id)?;
            Some(EnrichedOrderLine {
                order_id: line.order_id,
                product_id: line.product_id,
                reordered: line.reordered,
                product_name: product.product_name.clone(),
                aisle: (*aisle).to_string(),
                department: (*department).to_string(),
            })
        })
        .collect()
}

/// Counts name occurrences and ranks them by count descending, name
/// ascending on ties
fn ranked_counts<'a>(names: impl Iterator<Item = &'a str>) -> Vec<RankedCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for name in names {
        *counts.entry(name).or_insert(0) += 1;
    }

    let mut ranked: Vec<RankedCount> = counts
        .into_iter()
        .map(|(name, count)| RankedCount {
            name: name.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    ranked
}

/// Mean reordered flag per department, descending; ties break on name
fn department_reorder_rates(lines: &[EnrichedOrderLine]) -> Vec<DepartmentReorder> {
    let mut totals: HashMap<&str, (u64, u64)> = HashMap::new();
    for line in lines {
        let entry = totals.entry(line.department.as_str()).or_insert((0, 0));
        entry.0 += u64::from(line.reordered);
        entry.1 += 1;
    }

    let mut rates: Vec<DepartmentReorder> = totals
        .into_iter()
        .map(|(department, (reordered, total))| DepartmentReorder {
            department: department.to_string(),
            rate: reordered as f64 / total as f64,
        })
        .collect();
    rates.sort_by(|a, b| {
        b.rate
            .total_cmp(&a.rate)
            .then_with(|| a.department.cmp(&b.department))
    });
    rates
}

/// Computes catalog cardinalities, reorder rates and the join-backed
/// rankings
pub fn generate_product_insights(data: &Dataset) -> ProductInsights {
    let distinct_products: HashSet<u32> =
        data.products.iter().map(|p| p.product_id).collect();
    let distinct_aisles: HashSet<u32> = data.aisles.iter().map(|a| a.aisle_id).collect();
    let distinct_departments: HashSet<u32> =
        data.departments.iter().map(|d| d.department_id).collect();

    let enriched = enrich_order_lines(
        &data.train_lines,
        &data.products,
        &data.aisles,
        &data.departments,
    );

    let mut top_products = ranked_counts(enriched.iter().map(|line| line.product_name.as_str()));
    top_products.truncate(TOP_PRODUCTS_PLOTTED);
    let mut top_aisles = ranked_counts(enriched.iter().map(|line| line.aisle.as_str()));
    top_aisles.truncate(TOP_AISLES_REPORTED);
    let departments = ranked_counts(enriched.iter().map(|line| line.department.as_str()));

    ProductInsights {
        distinct_products: distinct_products.len(),
        distinct_aisles: distinct_aisles.len(),
        distinct_departments: distinct_departments.len(),
        train_reorder_rate: reorder_rate(&data.train_lines),
        prior_reorder_rate: reorder_rate(&data.prior_lines),
        enriched_line_count: enriched.len(),
        top_products,
        top_aisles,
        departments,
        department_reorder: department_reorder_rates(&enriched),
    }
}

/// Prints catalog cardinalities and reorder rates for the descriptive
/// statistics section
pub fn print_catalog_report(insights: &ProductInsights) {
    println!("PRODUCTS STATISTICS:");
    println!(
        "   Total products: {}",
        group_digits(insights.distinct_products as u64)
    );
    println!(
        "   Total aisles: {}",
        group_digits(insights.distinct_aisles as u64)
    );
    println!(
        "   Total departments: {}",
        group_digits(insights.distinct_departments as u64)
    );
    println!();
    println!("REORDER STATISTICS:");
    println!(
        "   Reorder rate (train): {:.1}%",
        insights.train_reorder_rate * 100.0
    );
    println!(
        "   Reorder rate (prior): {:.1}%",
        insights.prior_reorder_rate * 100.0
    );
}

#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "Rank")]
    rank: usize,
    #[tabled(rename = "Product")]
    product: String,
    #[tabled(rename = "Lines")]
    lines: String,
}

#[derive(Tabled)]
struct AisleRow {
    #[tabled(rename = "Rank")]
    rank: usize,
    #[tabled(rename = "Aisle")]
    aisle: String,
    #[tabled(rename = "Lines")]
    lines: String,
}

#[derive(Tabled)]
struct DepartmentRow {
    #[tabled(rename = "Rank")]
    rank: usize,
    #[tabled(rename = "Department")]
    department: String,
    #[tabled(rename = "Lines")]
    lines: String,
    #[tabled(rename = "Share")]
    share: String,
}

/// Prints the top products, top aisles and department ranking tables
pub fn print_ranking_report(insights: &ProductInsights) {
    let product_rows: Vec<ProductRow> = insights
        .top_products
        .iter()
        .take(TOP_PRODUCTS_REPORTED)
        .enumerate()
        .map(|(index, entry)| ProductRow {
            rank: index + 1,
            product: entry.name.clone(),
            lines: group_digits(entry.count as u64),
        })
        .collect();
    println!(
        "{}",
        format_table(&product_rows, Some("Top 10 Most Ordered Products"))
    );

    let aisle_rows: Vec<AisleRow> = insights
        .top_aisles
        .iter()
        .enumerate()
        .map(|(index, entry)| AisleRow {
            rank: index + 1,
            aisle: entry.name.clone(),
            lines: group_digits(entry.count as u64),
        })
        .collect();
    println!();
    println!(
        "{}",
        format_table(&aisle_rows, Some("Top 10 Most Popular Aisles"))
    );

    let department_rows: Vec<DepartmentRow> = insights
        .departments
        .iter()
        .enumerate()
        .map(|(index, entry)| DepartmentRow {
            rank: index + 1,
            department: entry.name.clone(),
            lines: group_digits(entry.count as u64),
            share: format!(
                "{:.1}%",
                percent(entry.count, insights.enriched_line_count)
            ),
        })
        .collect();
    println!();
    println!(
        "{}",
        format_table(&department_rows, Some("Departments by Order Lines"))
    );
}

/// Renders the top-products bar chart, the department pie chart and the
/// department reorder-rate chart
pub fn generate_product_plots(
    insights: &ProductInsights,
    output_dir: &Path,
) -> Result<(), PlotError> {
    let product_labels: Vec<&str> = insights
        .top_products
        .iter()
        .map(|entry| entry.name.as_str())
        .collect();
    let product_values: Vec<f64> = insights
        .top_products
        .iter()
        .map(|entry| entry.count as f64)
        .collect();
    create_horizontal_bar_chart(
        &product_labels,
        &product_values,
        "Top 15 Most Ordered Products",
        "Number of Orders",
        SEA_GREEN,
        &output_dir.join("top_products.png"),
    )?;
    println!("   Saved: top_products.png");

    let pie_slice = &insights.departments
        [..insights.departments.len().min(TOP_DEPARTMENTS_PLOTTED)];
    let department_labels: Vec<&str> =
        pie_slice.iter().map(|entry| entry.name.as_str()).collect();
    let department_values: Vec<f64> =
        pie_slice.iter().map(|entry| entry.count as f64).collect();
    create_pie_chart(
        &department_labels,
        &department_values,
        &PIE_PALETTE,
        "Orders Distribution by Department (Top 10)",
        &output_dir.join("departments_distribution.png"),
    )?;
    println!("   Saved: departments_distribution.png");

    let reorder_labels: Vec<&str> = insights
        .department_reorder
        .iter()
        .map(|entry| entry.department.as_str())
        .collect();
    let reorder_values: Vec<f64> = insights
        .department_reorder
        .iter()
        .map(|entry| entry.rate * 100.0)
        .collect();
    create_horizontal_bar_chart(
        &reorder_labels,
        &reorder_values,
        "Reorder Rate by Department",
        "Reorder Rate (%)",
        TEAL,
        &output_dir.join("reorder_rate_by_department.png"),
    )?;
    println!("   Saved: reorder_rate_by_department.png");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(order_id: u32, product_id: u32, reordered: u8) -> OrderLine {
        OrderLine {
            order_id,
            product_id,
            add_to_cart_order: 1,
            reordered,
        }
    }

    fn dimensions() -> (Vec<Product>, Vec<Aisle>, Vec<Department>) {
        let products = vec![
            Product {
                product_id: 10,
                product_name: "Banana".to_string(),
                aisle_id: 1,
                department_id: 1,
            },
            Product {
                product_id: 11,
                product_name: "Cheddar".to_string(),
                aisle_id: 2,
                department_id: 2,
            },
        ];
        let aisles = vec![
            Aisle {
                aisle_id: 1,
                aisle: "fresh fruits".to_string(),
            },
            Aisle {
                aisle_id: 2,
                aisle: "packaged cheese".to_string(),
            },
        ];
        let departments = vec![
            Department {
                department_id: 1,
                department: "produce".to_string(),
            },
            Department {
                department_id: 2,
                department: "dairy eggs".to_string(),
            },
        ];
        (products, aisles, departments)
    }

    #[test]
    fn test_join_preserves_rows_when_keys_resolve() {
        let (products, aisles, departments) = dimensions();
        let lines = vec![line(1, 10, 1), line(1, 11, 0), line(2, 10, 1)];

        let enriched = enrich_order_lines(&lines, &products, &aisles, &departments);
        assert_eq!(enriched.len(), lines.len());
        assert_eq!(enriched[0].product_name, "Banana");
        assert_eq!(enriched[0].aisle, "fresh fruits");
        assert_eq!(enriched[1].department, "dairy eggs");
    }

    #[test]
    fn test_join_drops_unresolvable_lines() {
        let (products, aisles, departments) = dimensions();
        let lines = vec![line(1, 10, 1), line(1, 999, 0)];

        let enriched = enrich_order_lines(&lines, &products, &aisles, &departments);
        assert_eq!(enriched.len(), 1);
    }

    #[test]
    fn test_reorder_rate_bounds() {
        assert_eq!(reorder_rate(&[]), 0.0);

        let all_reordered = vec![line(1, 10, 1), line(1, 11, 1), line(2, 10, 1)];
        assert_eq!(reorder_rate(&all_reordered), 1.0);

        let half = vec![line(1, 10, 1), line(1, 11, 0)];
        let rate = reorder_rate(&half);
        assert!((0.0..=1.0).contains(&rate));
        assert_eq!(rate, 0.5);
    }

    #[test]
    fn test_ranked_counts_orders_by_count_then_name() {
        let names = ["banana", "apple", "banana", "cherry", "apple"];
        let ranked = ranked_counts(names.iter().copied());

        assert_eq!(
            ranked,
            vec![
                RankedCount {
                    name: "apple".to_string(),
                    count: 2
                },
                RankedCount {
                    name: "banana".to_string(),
                    count: 2
                },
                RankedCount {
                    name: "cherry".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_department_reorder_rates_sorted_descending() {
        let (products, aisles, departments) = dimensions();
        // produce: 2 of 2 reordered; dairy eggs: 0 of 1.
        let lines = vec![line(1, 10, 1), line(2, 10, 1), line(1, 11, 0)];
        let enriched = enrich_order_lines(&lines, &products, &aisles, &departments);

        let rates = department_reorder_rates(&enriched);
        assert_eq!(rates.len(), 2);
        assert_eq!(rates[0].department, "produce");
        assert_eq!(rates[0].rate, 1.0);
        assert_eq!(rates[1].department, "dairy eggs");
        assert_eq!(rates[1].rate, 0.0);
    }

    #[test]
    fn test_generate_product_insights_end_to_end() {
        let (products, aisles, departments) = dimensions();
        let train = vec![line(1, 10, 1), line(1, 11, 1), line(2, 10, 1)];
        let prior = vec![line(3, 10, 0), line(3, 11, 0)];
        let data = Dataset {
            aisles,
            departments,
            products,
            orders: Vec::new(),
            train_lines: train,
            prior_lines: prior,
        };

        let insights = generate_product_insights(&data);
        assert_eq!(insights.distinct_products, 2);
        assert_eq!(insights.distinct_aisles, 2);
        assert_eq!(insights.distinct_departments, 2);
        assert_eq!(insights.train_reorder_rate, 1.0);
        assert_eq!(insights.prior_reorder_rate, 0.0);
        assert_eq!(insights.enriched_line_count, 3);
        assert_eq!(insights.top_products[0].name, "Banana");
        assert_eq!(insights.top_products[0].count, 2);
        assert_eq!(insights.departments[0].name, "produce");
    }
}
