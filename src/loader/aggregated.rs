//! Aggregated layout: `group,success,total`
//!
//! ```csv
//! group,success,total
//! A,123,5000
//! B,155,5000
//! ```
//!
//! The first row for each group wins; later duplicates are ignored with a
//! warning.

use super::table::{CsvRow, CsvTable};
use super::AGGREGATED_COLUMNS;
use crate::counts::{check_success, Experiment, Variant};
use crate::error::{DataFormatError, Result};
use std::path::Path;

/// Load `(success, total)` for both variants from an aggregated CSV file
pub fn load_aggregated<P: AsRef<Path>>(path: P) -> Result<Experiment> {
    let table = CsvTable::from_path(path.as_ref())?;
    from_aggregated_table(&table)
}

/// Parse aggregated CSV content held in memory
pub fn parse_aggregated(content: &str) -> Result<Experiment> {
    let table = CsvTable::parse(content)?;
    from_aggregated_table(&table)
}

/// Extract and validate counts from an already parsed table
pub fn from_aggregated_table(table: &CsvTable) -> Result<Experiment> {
    let columns = table.require_columns(&AGGREGATED_COLUMNS)?;
    let (group_col, success_col, total_col) = (columns[0], columns[1], columns[2]);

    let row_a = first_row(table, group_col, Variant::A)?;
    let row_b = first_row(table, group_col, Variant::B)?;

    let success_a = parse_count(row_a, success_col, "success")?;
    let total_a = parse_count(row_a, total_col, "total")?;
    let success_b = parse_count(row_b, success_col, "success")?;
    let total_b = parse_count(row_b, total_col, "total")?;

    // Files report negative successes ahead of bad totals
    check_success(Variant::A, success_a)?;
    check_success(Variant::B, success_b)?;
    Ok(Experiment::new(success_a, total_a, success_b, total_b)?)
}

/// First row whose group matches the variant label exactly
fn first_row(table: &CsvTable, group_col: usize, variant: Variant) -> Result<&CsvRow> {
    let mut matching = table
        .rows()
        .iter()
        .filter(|row| row.get(group_col) == variant.label());

    let first = matching
        .next()
        .ok_or(DataFormatError::MissingVariant(variant))?;

    let duplicates = matching.count();
    if duplicates > 0 {
        tracing::warn!(
            "Ignoring {} duplicate row(s) for variant {} after line {}",
            duplicates,
            variant,
            first.line
        );
    }

    Ok(first)
}

/// Parse an integer count, accepting integral decimals such as `5000.0`
fn parse_count(row: &CsvRow, index: usize, column: &str) -> Result<i64> {
    let raw = row.get(index);
    let invalid = || DataFormatError::InvalidCount {
        line: row.line,
        column: column.to_string(),
        value: raw.to_string(),
    };

    if let Ok(value) = raw.parse::<i64>() {
        return Ok(value);
    }

    let value: f64 = raw.parse().map_err(|_| invalid())?;
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Ok(value as i64)
    } else {
        Err(invalid().into())
    }
}
