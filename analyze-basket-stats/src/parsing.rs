//! CSV ingestion for the market basket dataset
//!
//! This module loads the six input tables from the data directory into typed
//! in-memory vectors. The two largest fact files are read with a fixed row
//! cap: the cap keeps memory bounded but is a plain prefix truncation, not a
//! random sample, so downstream statistics on those tables describe the
//! loaded prefix of the file only.
//!
//! Any missing file or malformed row aborts the run; there is no retry or
//! partial-load path.

use crate::common::data_structures::Dataset;
use indicatif::ProgressBar;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::common::buckets::group_digits;

/// Maximum number of rows read from `orders.csv`
pub const ORDERS_ROW_CAP: usize = 500_000;

/// Maximum number of rows read from `order_products__prior.csv`
pub const PRIOR_LINES_ROW_CAP: usize = 1_000_000;

/// Errors that can occur while loading the input tables
#[derive(Error, Debug)]
pub enum ParsingError {
    #[error("Failed to read input file {path}: {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse CSV data in {path}: {source}")]
    Csv { path: String, source: csv::Error },
}

type Result<T> = core::result::Result<T, ParsingError>;

/// Loads all six tables from `data_dir`
///
/// Emits one progress spinner per file and finishes each with the loaded row
/// count. Row caps apply to `orders.csv` and `order_products__prior.csv`;
/// the other four files are read in full.
pub fn load_dataset(data_dir: &Path) -> Result<Dataset> {
    let aisles = load_file(data_dir, "aisles.csv", None)?;
    let departments = load_file(data_dir, "departments.csv", None)?;
    let products = load_file(data_dir, "products.csv", None)?;
    let orders = load_file(data_dir, "orders.csv", Some(ORDERS_ROW_CAP))?;
    let train_lines = load_file(data_dir, "order_products__train.csv", None)?;
    let prior_lines = load_file(
        data_dir,
        "order_products__prior.csv",
        Some(PRIOR_LINES_ROW_CAP),
    )?;

    Ok(Dataset {
        aisles,
        departments,
        products,
        orders,
        train_lines,
        prior_lines,
    })
}

/// Loads a single table with a spinner for user feedback
fn load_file<T: DeserializeOwned>(
    data_dir: &Path,
    file_name: &str,
    row_cap: Option<usize>,
) -> Result<Vec<T>> {
    let spinner = ProgressBar::new_spinner();
    spinner.enable_steady_tick(Duration::from_millis(100));
    match row_cap {
        Some(cap) => spinner.set_message(format!(
            "Loading {} (first {} rows)",
            file_name,
            group_digits(cap as u64)
        )),
        None => spinner.set_message(format!("Loading {}", file_name)),
    }

    let rows = load_table(&data_dir.join(file_name), row_cap);

    match &rows {
        Ok(rows) => spinner.finish_with_message(format!(
            "Loaded {}: {} rows",
            file_name,
            group_digits(rows.len() as u64)
        )),
        Err(_) => spinner.finish_with_message(format!("Failed to load {}", file_name)),
    }
    rows
}

/// Reads up to `row_cap` typed rows from a headered CSV file
///
/// Deserialization is header-driven, so column order does not matter and
/// extra columns are ignored. Empty cells map to `None` for `Option` fields.
fn load_table<T: DeserializeOwned>(path: &Path, row_cap: Option<usize>) -> Result<Vec<T>> {
    let display_path = path.display().to_string();
    let file = File::open(path).map_err(|source| ParsingError::FileRead {
        path: display_path.clone(),
        source,
    })?;

    let mut reader = csv::Reader::from_reader(file);
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let row: T = record.map_err(|source| ParsingError::Csv {
            path: display_path.clone(),
            source,
        })?;
        rows.push(row);
        if row_cap.is_some_and(|cap| rows.len() >= cap) {
            break;
        }
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::data_structures::Aisle;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_fixture(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn write_full_fixture_set(dir: &Path) {
        write_fixture(dir, "aisles.csv", "aisle_id,aisle\n1,fresh fruits\n2,fresh vegetables\n3,packaged cheese\n");
        write_fixture(dir, "departments.csv", "department_id,department\n1,produce\n2,dairy eggs\n");
        write_fixture(
            dir,
            "products.csv",
            "product_id,product_name,aisle_id,department_id\n10,Banana,1,1\n11,Organic Spinach,2,1\n12,Cheddar,3,2\n",
        );
        write_fixture(
            dir,
            "orders.csv",
            "order_id,user_id,order_number,order_dow,order_hour_of_day,days_since_prior_order\n\
             100,7,1,0,10,\n100,7,2,6,14,7.0\n101,8,1,3,9,\n",
        );
        write_fixture(
            dir,
            "order_products__train.csv",
            "order_id,product_id,add_to_cart_order,reordered\n100,10,1,1\n100,11,2,0\n101,12,1,1\n",
        );
        write_fixture(
            dir,
            "order_products__prior.csv",
            "order_id,product_id,add_to_cart_order,reordered\n90,10,1,0\n91,11,1,1\n",
        );
    }

    #[test]
    fn test_load_dataset_from_fixture() {
        let temp = TempDir::new().unwrap();
        write_full_fixture_set(temp.path());

        let dataset = load_dataset(temp.path()).unwrap();
        assert_eq!(dataset.aisles.len(), 3);
        assert_eq!(dataset.departments.len(), 2);
        assert_eq!(dataset.products.len(), 3);
        assert_eq!(dataset.orders.len(), 3);
        assert_eq!(dataset.train_lines.len(), 3);
        assert_eq!(dataset.prior_lines.len(), 2);

        assert_eq!(dataset.aisles[0].aisle, "fresh fruits");
        assert_eq!(dataset.products[1].product_name, "Organic Spinach");
    }

    #[test]
    fn test_empty_gap_cell_maps_to_none() {
        let temp = TempDir::new().unwrap();
        write_full_fixture_set(temp.path());

        let dataset = load_dataset(temp.path()).unwrap();
        assert_eq!(dataset.orders[0].days_since_prior_order, None);
        assert_eq!(dataset.orders[1].days_since_prior_order, Some(7.0));
    }

    #[test]
    fn test_row_cap_truncates_to_prefix() {
        let temp = TempDir::new().unwrap();
        let path = write_fixture(
            temp.path(),
            "aisles.csv",
            "aisle_id,aisle\n1,a\n2,b\n3,c\n4,d\n",
        );

        let rows: Vec<Aisle> = load_table(&path, Some(2)).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].aisle_id, 1);
        assert_eq!(rows[1].aisle_id, 2);

        let uncapped: Vec<Aisle> = load_table(&path, None).unwrap();
        assert_eq!(uncapped.len(), 4);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let temp = TempDir::new().unwrap();
        let result: Result<Vec<Aisle>> = load_table(&temp.path().join("absent.csv"), None);
        assert!(matches!(result, Err(ParsingError::FileRead { .. })));
    }

    #[test]
    fn test_malformed_row_is_fatal() {
        let temp = TempDir::new().unwrap();
        let path = write_fixture(
            temp.path(),
            "aisles.csv",
            "aisle_id,aisle\nnot_a_number,fresh fruits\n",
        );
        let result: Result<Vec<Aisle>> = load_table(&path, None);
        assert!(matches!(result, Err(ParsingError::Csv { .. })));
    }
}
