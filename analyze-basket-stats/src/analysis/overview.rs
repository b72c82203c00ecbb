//! Table profiling: shape, memory footprint and data quality per input table
//!
//! A read-only pass over each loaded table that backs the DATA OVERVIEW and
//! DATA QUALITY report sections. Nothing here mutates the dataset.

use crate::common::buckets::{format_table, group_digits};
use crate::common::data_structures::{Aisle, Dataset, Department, Order, OrderLine, Product};
use bytesize::ByteSize;
use std::collections::HashSet;
use std::mem;
use tabled::Tabled;

/// Per-row facts the profiler needs from a record type
pub trait TableFacts {
    /// Column names in file order
    const COLUMNS: &'static [&'static str];

    /// Bytes this row owns on the heap
    fn heap_bytes(&self) -> usize;

    /// Number of missing values in this row
    fn missing_values(&self) -> usize {
        0
    }

    /// Canonical representation used to detect fully duplicated rows
    fn row_key(&self) -> String;
}

impl TableFacts for Aisle {
    const COLUMNS: &'static [&'static str] = &["aisle_id", "aisle"];

    fn heap_bytes(&self) -> usize {
        self.aisle.len()
    }

    fn row_key(&self) -> String {
        format!("{}\x1f{}", self.aisle_id, self.aisle)
    }
}

impl TableFacts for Department {
    const COLUMNS: &'static [&'static str] = &["department_id", "department"];

    fn heap_bytes(&self) -> usize {
        self.department.len()
    }

    fn row_key(&self) -> String {
        format!("{}\x1f{}", self.department_id, self.department)
    }
}

impl TableFacts for Product {
    const COLUMNS: &'static [&'static str] =
        &["product_id", "product_name", "aisle_id", "department_id"];

    fn heap_bytes(&self) -> usize {
        self.product_name.len()
    }

    fn row_key(&self) -> String {
        format!(
            "{}\x1f{}\x1f{}\x1f{}",
            self.product_id, self.product_name, self.aisle_id, self.department_id
        )
    }
}

impl TableFacts for Order {
    const COLUMNS: &'static [&'static str] = &[
        "order_id",
        "user_id",
        "order_number",
        "order_dow",
        "order_hour_of_day",
        "days_since_prior_order",
    ];

    fn heap_bytes(&self) -> usize {
        0
    }

    fn missing_values(&self) -> usize {
        usize::from(self.days_since_prior_order.is_none())
    }

    fn row_key(&self) -> String {
        format!(
            "{}\x1f{}\x1f{}\x1f{}\x1f{}\x1f{:?}",
            self.order_id,
            self.user_id,
            self.order_number,
            self.order_dow,
            self.order_hour_of_day,
            self.days_since_prior_order
        )
    }
}

impl TableFacts for OrderLine {
    const COLUMNS: &'static [&'static str] =
        &["order_id", "product_id", "add_to_cart_order", "reordered"];

    fn heap_bytes(&self) -> usize {
        0
    }

    fn row_key(&self) -> String {
        format!(
            "{}\x1f{}\x1f{}\x1f{}",
            self.order_id, self.product_id, self.add_to_cart_order, self.reordered
        )
    }
}

/// Shape, memory and quality facts for one loaded table
#[derive(Debug, Clone)]
pub struct TableProfile {
    pub name: String,
    pub rows: usize,
    pub columns: usize,
    /// Column names joined with `", "`
    pub column_names: String,
    /// Vector stack bytes plus owned heap bytes
    pub memory_bytes: u64,
    /// Missing values summed across all columns
    pub missing_values: usize,
    /// Rows identical to an earlier row; first occurrences are not counted
    pub duplicate_rows: usize,
}

/// Profiles a single table
pub fn profile_table<T: TableFacts>(name: &str, rows: &[T]) -> TableProfile {
    let mut seen = HashSet::with_capacity(rows.len());
    let mut heap_bytes = 0usize;
    let mut missing_values = 0usize;
    let mut duplicate_rows = 0usize;

    for row in rows {
        heap_bytes += row.heap_bytes();
        missing_values += row.missing_values();
        if !seen.insert(row.row_key()) {
            duplicate_rows += 1;
        }
    }

    TableProfile {
        name: name.to_string(),
        rows: rows.len(),
        columns: T::COLUMNS.len(),
        column_names: T::COLUMNS.join(", "),
        memory_bytes: (mem::size_of::<T>() * rows.len() + heap_bytes) as u64,
        missing_values,
        duplicate_rows,
    }
}

/// Profiles all six tables in load order
pub fn profile_dataset(data: &Dataset) -> Vec<TableProfile> {
    vec![
        profile_table("aisles", &data.aisles),
        profile_table("departments", &data.departments),
        profile_table("products", &data.products),
        profile_table("orders", &data.orders),
        profile_table("order_products_train", &data.train_lines),
        profile_table("order_products_prior", &data.prior_lines),
    ]
}

#[derive(Tabled)]
struct OverviewRow {
    #[tabled(rename = "Table")]
    name: String,
    #[tabled(rename = "Rows")]
    rows: String,
    #[tabled(rename = "Cols")]
    columns: usize,
    #[tabled(rename = "Columns")]
    column_names: String,
    #[tabled(rename = "Memory")]
    memory: String,
}

#[derive(Tabled)]
struct QualityRow {
    #[tabled(rename = "Table")]
    name: String,
    #[tabled(rename = "Missing Values")]
    missing: String,
    #[tabled(rename = "Duplicate Rows")]
    duplicates: String,
}

/// Prints the DATA OVERVIEW table
pub fn print_overview_report(profiles: &[TableProfile]) {
    let rows: Vec<OverviewRow> = profiles
        .iter()
        .map(|profile| OverviewRow {
            name: profile.name.clone(),
            rows: group_digits(profile.rows as u64),
            columns: profile.columns,
            column_names: profile.column_names.clone(),
            memory: ByteSize::b(profile.memory_bytes).to_string(),
        })
        .collect();
    println!("{}", format_table(&rows, None));
}

/// Prints the DATA QUALITY table
pub fn print_quality_report(profiles: &[TableProfile]) {
    let rows: Vec<QualityRow> = profiles
        .iter()
        .map(|profile| QualityRow {
            name: profile.name.clone(),
            missing: group_digits(profile.missing_values as u64),
            duplicates: group_digits(profile.duplicate_rows as u64),
        })
        .collect();
    println!("{}", format_table(&rows, None));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aisle(id: u32, name: &str) -> Aisle {
        Aisle {
            aisle_id: id,
            aisle: name.to_string(),
        }
    }

    #[test]
    fn test_profile_matches_fixture_shape() {
        let aisles = vec![aisle(1, "fresh fruits"), aisle(2, "fresh vegetables"), aisle(3, "packaged cheese")];
        let profile = profile_table("aisles", &aisles);

        assert_eq!(profile.rows, 3);
        assert_eq!(profile.columns, 2);
        assert_eq!(profile.column_names, "aisle_id, aisle");
        assert_eq!(profile.missing_values, 0);
        assert_eq!(profile.duplicate_rows, 0);
    }

    #[test]
    fn test_duplicate_rows_exclude_first_occurrence() {
        let aisles = vec![aisle(1, "spices"), aisle(1, "spices"), aisle(1, "spices"), aisle(2, "tea")];
        let profile = profile_table("aisles", &aisles);
        assert_eq!(profile.duplicate_rows, 2);
    }

    #[test]
    fn test_missing_values_count_absent_gaps() {
        let orders = vec![
            Order {
                order_id: 1,
                user_id: 1,
                order_number: 1,
                order_dow: 0,
                order_hour_of_day: 10,
                days_since_prior_order: None,
            },
            Order {
                order_id: 2,
                user_id: 1,
                order_number: 2,
                order_dow: 1,
                order_hour_of_day: 11,
                days_since_prior_order: Some(7.0),
            },
        ];
        let profile = profile_table("orders", &orders);
        assert_eq!(profile.missing_values, 1);
        assert_eq!(profile.columns, 6);
    }

    #[test]
    fn test_memory_includes_string_heap() {
        let aisles = vec![aisle(1, "a"), aisle(2, "bb")];
        let profile = profile_table("aisles", &aisles);
        let expected = (mem::size_of::<Aisle>() * 2 + 3) as u64;
        assert_eq!(profile.memory_bytes, expected);
    }

    #[test]
    fn test_profile_dataset_covers_all_six_tables() {
        let data = Dataset {
            aisles: vec![aisle(1, "spices")],
            departments: Vec::new(),
            products: Vec::new(),
            orders: Vec::new(),
            train_lines: Vec::new(),
            prior_lines: Vec::new(),
        };
        let profiles = profile_dataset(&data);
        assert_eq!(profiles.len(), 6);
        assert_eq!(profiles[0].name, "aisles");
        assert_eq!(profiles[5].name, "order_products_prior");
        assert_eq!(profiles[0].rows, 1);
        assert_eq!(profiles[3].rows, 0);
    }
}
