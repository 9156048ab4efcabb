//! Row-level layout: `user_id,group,converted`
//!
//! ```csv
//! user_id,group,converted
//! u1,A,0
//! u2,B,1
//! ```
//!
//! Each row is one observation. Per group, `total` is the row count and
//! `success` the sum of `converted`. The outcome of every row (whatever its
//! group) must be binary; it is checked before the row contributes to any
//! sum, so the first bad value aborts the load with its line number.

use super::table::CsvTable;
use super::ROW_LEVEL_COLUMNS;
use crate::counts::{Experiment, Variant};
use crate::error::{DataFormatError, Result};
use std::path::Path;

/// Load and aggregate a row-level CSV file
pub fn load_row_level<P: AsRef<Path>>(path: P) -> Result<Experiment> {
    let table = CsvTable::from_path(path.as_ref())?;
    from_row_level_table(&table)
}

/// Parse row-level CSV content held in memory
pub fn parse_row_level(content: &str) -> Result<Experiment> {
    let table = CsvTable::parse(content)?;
    from_row_level_table(&table)
}

/// Aggregate an already parsed table
pub fn from_row_level_table(table: &CsvTable) -> Result<Experiment> {
    let columns = table.require_columns(&ROW_LEVEL_COLUMNS)?;
    let (group_col, converted_col) = (columns[1], columns[2]);

    let mut tally = Tally::default();
    for row in table.rows() {
        let raw = row.get(converted_col);
        let converted = parse_outcome(raw).ok_or_else(|| DataFormatError::InvalidOutcome {
            line: row.line,
            value: raw.to_string(),
        })?;

        match row.get(group_col) {
            g if g == Variant::A.label() => tally.record(Variant::A, converted),
            g if g == Variant::B.label() => tally.record(Variant::B, converted),
            _ => tally.other += 1,
        }
    }

    tracing::debug!(
        total_a = tally.total_a,
        total_b = tally.total_b,
        ignored = tally.other,
        "aggregated row-level data"
    );

    if tally.total_a == 0 {
        return Err(DataFormatError::MissingVariant(Variant::A).into());
    }
    if tally.total_b == 0 {
        return Err(DataFormatError::MissingVariant(Variant::B).into());
    }

    Ok(Experiment::new(
        tally.success_a,
        tally.total_a,
        tally.success_b,
        tally.total_b,
    )?)
}

#[derive(Debug, Default)]
struct Tally {
    success_a: i64,
    total_a: i64,
    success_b: i64,
    total_b: i64,
    other: usize,
}

impl Tally {
    fn record(&mut self, variant: Variant, converted: bool) {
        let (success, total) = match variant {
            Variant::A => (&mut self.success_a, &mut self.total_a),
            Variant::B => (&mut self.success_b, &mut self.total_b),
        };
        *total += 1;
        if converted {
            *success += 1;
        }
    }
}

/// Binary outcome in integer, decimal or boolean spelling
fn parse_outcome(raw: &str) -> Option<bool> {
    match raw {
        "0" => return Some(false),
        "1" => return Some(true),
        _ => {}
    }
    if raw.eq_ignore_ascii_case("true") {
        return Some(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return Some(false);
    }
    match raw.parse::<f64>() {
        Ok(v) if v == 0.0 => Some(false),
        Ok(v) if v == 1.0 => Some(true),
        _ => None,
    }
}
