//! Error taxonomy for the statistical core
//!
//! Two families of failure exist, both raised synchronously at the point of
//! detection and never retried:
//!
//! - [`ValidationError`]: bad numeric input (negative counts, non-positive
//!   totals, success exceeding total, alpha or proportions out of range)
//! - [`DataFormatError`]: bad input files (not found, missing columns,
//!   missing variant rows, invalid outcome values)
//!
//! [`Error`] wraps both so loaders, which can fail either way, return a
//! single type.

use crate::counts::Variant;
use std::path::PathBuf;
use thiserror::Error;

/// Invalid numeric input to the comparator or power calculator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Total count for variant {variant} must be positive, got {total}")]
    NonPositiveTotal { variant: Variant, total: i64 },

    #[error("Success count for variant {variant} cannot be negative, got {success}")]
    NegativeSuccess { variant: Variant, success: i64 },

    #[error("Success count for variant {variant} ({success}) exceeds total ({total})")]
    SuccessExceedsTotal {
        variant: Variant,
        success: i64,
        total: i64,
    },

    #[error("Alpha must be strictly between 0 and 1, got {0}")]
    AlphaOutOfRange(f64),

    #[error("Sample size for variant {variant} must be positive, got {size}")]
    NonPositiveSampleSize { variant: Variant, size: i64 },

    #[error("Control proportion must be in [0, 1], got {0}")]
    ControlProportionOutOfRange(f64),

    #[error("Alternative proportion {control} + {diff} falls outside [0, 1]")]
    AlternativeProportionOutOfRange { control: f64, diff: f64 },

    #[error("Invalid analysis configuration: {0}")]
    InvalidConfig(String),
}

/// Malformed or unusable input file
#[derive(Error, Debug)]
pub enum DataFormatError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing required columns: {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    #[error("Variant {0} data not found in file")]
    MissingVariant(Variant),

    #[error("Invalid outcome value at line {line}: '{value}' (expected 0 or 1)")]
    InvalidOutcome { line: usize, value: String },

    #[error("Invalid {column} count at line {line}: '{value}'")]
    InvalidCount {
        line: usize,
        column: String,
        value: String,
    },

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Unrecognized file layout, found columns: {}", .columns.join(", "))]
    UnknownFormat { columns: Vec<String> },
}

/// Any failure raised by the core
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    DataFormat(#[from] DataFormatError),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, Error>;
