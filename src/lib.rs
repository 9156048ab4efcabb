//! abtest - Statistical analysis for two-variant conversion experiments
//!
//! This library compares the conversion rates of a control (A) and a
//! treatment (B) with a pooled two-proportion z-test, reports an unpooled
//! confidence interval for the lift, and estimates the power to detect a
//! chosen difference. Counts can be typed in or loaded from aggregated or
//! row-level CSV files.
//!
//! ```
//! use abtest::comparison::compare;
//!
//! let result = compare(123, 5000, 155, 5000, 0.05).unwrap();
//! assert!((result.lift - 0.0064).abs() < 1e-12);
//! assert!(!result.is_significant(0.05));
//! ```

pub mod cli;
pub mod comparison;
pub mod config;
pub mod counts;
pub mod csv_output;
pub mod error;
pub mod json_output;
pub mod loader;
pub mod normal;
pub mod power;
pub mod session;

pub use comparison::{compare, ConfidenceInterval, TestResult, Verdict};
pub use counts::{Experiment, Variant};
pub use error::{DataFormatError, Error, Result, ValidationError};
pub use loader::{load_aggregated, load_auto, load_row_level, DataFormat};
pub use power::power;
