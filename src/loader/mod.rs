//! Loaders that turn experiment files into validated counts
//!
//! Two CSV layouts are supported:
//!
//! - **Aggregated**: `group,success,total`, one pre-summarized row per variant
//! - **Row-level**: `user_id,group,converted`, one row per observation with a
//!   binary outcome
//!
//! Group labels are the case-sensitive strings `A` and `B`. Every loader
//! re-validates the extracted counts with the same rules the comparator
//! applies, so a loaded [`Experiment`] can be passed straight to
//! [`crate::comparison::compare_experiment`].
//!
//! # Example
//!
//! ```no_run
//! use abtest::loader::load_aggregated;
//!
//! # fn main() -> abtest::error::Result<()> {
//! let experiment = load_aggregated("results.csv")?;
//! let (success_a, total_a, success_b, total_b) = experiment.as_tuple();
//! # Ok(())
//! # }
//! ```

mod aggregated;
mod row_level;
mod table;

pub use aggregated::{from_aggregated_table, load_aggregated, parse_aggregated};
pub use row_level::{from_row_level_table, load_row_level, parse_row_level};
pub use table::{CsvRow, CsvTable};

use crate::counts::Experiment;
use crate::error::{DataFormatError, Result};
use std::path::Path;

/// Columns of the aggregated layout
pub const AGGREGATED_COLUMNS: [&str; 3] = ["group", "success", "total"];

/// Columns of the row-level layout
pub const ROW_LEVEL_COLUMNS: [&str; 3] = ["user_id", "group", "converted"];

/// Recognized file layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Aggregated,
    RowLevel,
}

impl DataFormat {
    /// Detect the layout from a table's header
    ///
    /// Aggregated wins when a header carries both column sets.
    pub fn detect(table: &CsvTable) -> Option<Self> {
        if table.has_columns(&AGGREGATED_COLUMNS) {
            Some(DataFormat::Aggregated)
        } else if table.has_columns(&ROW_LEVEL_COLUMNS) {
            Some(DataFormat::RowLevel)
        } else {
            None
        }
    }
}

/// Load a file in either layout, chosen by its header
pub fn load_auto<P: AsRef<Path>>(path: P) -> Result<(DataFormat, Experiment)> {
    let table = CsvTable::from_path(path.as_ref())?;
    let format = DataFormat::detect(&table).ok_or_else(|| DataFormatError::UnknownFormat {
        columns: table.headers().to_vec(),
    })?;

    tracing::debug!(?format, path = %path.as_ref().display(), "detected file layout");

    let experiment = match format {
        DataFormat::Aggregated => from_aggregated_table(&table)?,
        DataFormat::RowLevel => from_row_level_table(&table)?,
    };
    Ok((format, experiment))
}
