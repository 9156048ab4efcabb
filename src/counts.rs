//! Validated success/total counts for the two experiment arms
//!
//! Counts arrive either typed in directly or aggregated by a loader. Both
//! paths go through [`Experiment::new`], which applies the same rules in the
//! same order so a given bad input always produces the same error kind.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Experiment arm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    /// Control
    A,
    /// Treatment
    B,
}

impl Variant {
    /// Group label used in input files
    pub fn label(&self) -> &'static str {
        match self {
            Variant::A => "A",
            Variant::B => "B",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Successes out of total observations for one arm
///
/// Invariant: `total > 0` and `success <= total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VariantCounts {
    success: u64,
    total: u64,
}

impl VariantCounts {
    /// Validate a single arm's counts
    pub fn new(variant: Variant, success: i64, total: i64) -> Result<Self, ValidationError> {
        check_total(variant, total)?;
        check_success(variant, success)?;
        check_bound(variant, success, total)?;
        Ok(Self {
            success: success as u64,
            total: total as u64,
        })
    }

    pub fn success(&self) -> u64 {
        self.success
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Sample proportion `success / total`
    pub fn proportion(&self) -> f64 {
        self.success as f64 / self.total as f64
    }
}

/// Control (A) and treatment (B) counts for one comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Experiment {
    pub a: VariantCounts,
    pub b: VariantCounts,
}

impl Experiment {
    /// Validate both arms
    ///
    /// Rules are applied one at a time across both arms (A before B):
    /// non-positive totals, then negative successes, then success > total.
    pub fn new(
        success_a: i64,
        total_a: i64,
        success_b: i64,
        total_b: i64,
    ) -> Result<Self, ValidationError> {
        check_total(Variant::A, total_a)?;
        check_total(Variant::B, total_b)?;
        check_success(Variant::A, success_a)?;
        check_success(Variant::B, success_b)?;
        check_bound(Variant::A, success_a, total_a)?;
        check_bound(Variant::B, success_b, total_b)?;

        Ok(Self {
            a: VariantCounts {
                success: success_a as u64,
                total: total_a as u64,
            },
            b: VariantCounts {
                success: success_b as u64,
                total: total_b as u64,
            },
        })
    }

    /// Counts for one arm
    pub fn get(&self, variant: Variant) -> &VariantCounts {
        match variant {
            Variant::A => &self.a,
            Variant::B => &self.b,
        }
    }

    /// `(success_a, total_a, success_b, total_b)`
    pub fn as_tuple(&self) -> (u64, u64, u64, u64) {
        (self.a.success, self.a.total, self.b.success, self.b.total)
    }

    /// Swap control and treatment
    pub fn swapped(&self) -> Self {
        Self {
            a: self.b,
            b: self.a,
        }
    }
}

/// Reject alpha outside the open interval (0, 1), NaN included
pub fn check_alpha(alpha: f64) -> Result<(), ValidationError> {
    if alpha > 0.0 && alpha < 1.0 {
        Ok(())
    } else {
        Err(ValidationError::AlphaOutOfRange(alpha))
    }
}

fn check_total(variant: Variant, total: i64) -> Result<(), ValidationError> {
    if total <= 0 {
        return Err(ValidationError::NonPositiveTotal { variant, total });
    }
    Ok(())
}

pub(crate) fn check_success(variant: Variant, success: i64) -> Result<(), ValidationError> {
    if success < 0 {
        return Err(ValidationError::NegativeSuccess { variant, success });
    }
    Ok(())
}

fn check_bound(variant: Variant, success: i64, total: i64) -> Result<(), ValidationError> {
    if success > total {
        return Err(ValidationError::SuccessExceedsTotal {
            variant,
            success,
            total,
        });
    }
    Ok(())
}
