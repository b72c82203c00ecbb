//! ASCII table formatting and value bucketing shared across analysis modules
//!
//! This module provides shared functionality for the console report and the
//! histogram charts:
//! - [`format_table`] renders any [`Tabled`] rows with an optional
//!   underlined title
//! - [`group_digits`] formats counts with thousands separators
//! - [`HistogramBins`] buckets raw values into a fixed number of bins so bin
//!   placement can be tested without rasterizing a chart

use tabled::{Table, Tabled};

/// Formats rows as an ASCII table using the [`tabled`] crate
///
/// # Arguments
/// * `rows` - The rows to format
/// * `title` - Optional title printed above the table with an `=` underline
///
/// # Returns
/// A formatted ASCII table as a [`String`]
pub fn format_table<T: Tabled>(rows: &[T], title: Option<&str>) -> String {
    if rows.is_empty() {
        return "No data available".to_string();
    }

    let table = Table::new(rows).to_string();

    if let Some(title) = title {
        format!("{}\n{}\n{}", title, "=".repeat(title.len()), table)
    } else {
        table
    }
}

/// Formats an integer with `,` thousands separators (e.g. `1234567` ->
/// `"1,234,567"`)
pub fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Raw values bucketed into a fixed number of equal-width bins
///
/// Bin placement is deterministic for a given input: the range is
/// `[min, max]` of the values, values on a bin boundary fall into the
/// higher bin, and the maximum value lands in the last bin.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBins {
    /// Lower edge of the first bin (the minimum value)
    pub min: f64,
    /// Width of every bin; `1.0` when all values are equal
    pub bin_width: f64,
    /// Number of values per bin
    pub counts: Vec<usize>,
}

impl HistogramBins {
    /// Buckets `values` into `bin_count` equal-width bins
    ///
    /// Returns [`None`] when `values` is empty or `bin_count` is zero.
    pub fn build(values: &[f64], bin_count: usize) -> Option<Self> {
        if values.is_empty() || bin_count == 0 {
            return None;
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let bin_width = if max > min {
            (max - min) / bin_count as f64
        } else {
            1.0
        };

        let mut counts = vec![0usize; bin_count];
        for &value in values {
            let mut index = ((value - min) / bin_width) as usize;
            if index >= bin_count {
                index = bin_count - 1;
            }
            counts[index] += 1;
        }

        Some(Self {
            min,
            bin_width,
            counts,
        })
    }

    /// Lower edge of bin `index`
    pub fn bin_start(&self, index: usize) -> f64 {
        self.min + self.bin_width * index as f64
    }

    /// Upper edge of the last bin
    pub fn range_end(&self) -> f64 {
        self.bin_start(self.counts.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits(0), "0");
        assert_eq!(group_digits(100), "100");
        assert_eq!(group_digits(1_000), "1,000");
        assert_eq!(group_digits(1_234_567), "1,234,567");
        assert_eq!(group_digits(500_000), "500,000");
    }

    #[test]
    fn test_format_table_with_title() {
        #[derive(Tabled)]
        struct Row {
            #[tabled(rename = "Name")]
            name: &'static str,
            #[tabled(rename = "Count")]
            count: usize,
        }

        let rows = vec![
            Row {
                name: "produce",
                count: 10,
            },
            Row {
                name: "dairy",
                count: 5,
            },
        ];

        let table = format_table(&rows, Some("Test Table"));
        assert!(table.contains("Test Table"));
        assert!(table.contains("Name"));
        assert!(table.contains("produce"));
        assert!(table.contains("10"));

        let empty: Vec<Row> = Vec::new();
        assert_eq!(format_table(&empty, None), "No data available");
    }

    #[test]
    fn test_histogram_bins_counts_sum_to_input_len() {
        let values: Vec<f64> = (1..=100).map(|v| v as f64).collect();
        let bins = HistogramBins::build(&values, 10).unwrap();

        assert_eq!(bins.counts.len(), 10);
        assert_eq!(bins.counts.iter().sum::<usize>(), values.len());
        assert_eq!(bins.min, 1.0);
        assert!((bins.range_end() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_histogram_bins_max_value_in_last_bin() {
        let values = [1.0, 2.0, 3.0, 4.0];
        let bins = HistogramBins::build(&values, 3).unwrap();
        assert_eq!(*bins.counts.last().unwrap(), 1);
        assert_eq!(bins.counts.iter().sum::<usize>(), 4);
    }

    #[test]
    fn test_histogram_bins_zero_width_range() {
        let values = [7.0, 7.0, 7.0];
        let bins = HistogramBins::build(&values, 5).unwrap();
        assert_eq!(bins.bin_width, 1.0);
        assert_eq!(bins.counts[0], 3);
        assert_eq!(bins.counts.iter().sum::<usize>(), 3);
    }

    #[test]
    fn test_histogram_bins_deterministic() {
        let values = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
        let first = HistogramBins::build(&values, 4).unwrap();
        let second = HistogramBins::build(&values, 4).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_histogram_bins_degenerate_inputs() {
        assert!(HistogramBins::build(&[], 10).is_none());
        assert!(HistogramBins::build(&[1.0], 0).is_none());
    }
}
