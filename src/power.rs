//! Statistical power of the two-proportion z-test
//!
//! Normal-approximation power for a two-sided test of two independent
//! proportions, with unequal group sizes expressed as `ratio = nB / nA`.
//! The first group carries the alternative proportion
//! `pControl + minDetectableDiff` and the second the control proportion:
//!
//! ```text
//! p1 = pControl + diff,  p2 = pControl
//! p̄  = (p1 + p2·ratio) / (1 + ratio)
//! σ0 = sqrt(p̄(1-p̄) + p̄(1-p̄)/ratio)          (null)
//! σ1 = sqrt(p1(1-p1) + p2(1-p2)/ratio)        (alternative)
//! δ  = diff·sqrt(nA)
//! power = 1 - Φ((z·σ0 - δ)/σ1) + Φ((-z·σ0 - δ)/σ1),  z = Φ⁻¹(1 - α/2)
//! ```

use crate::counts::{check_alpha, Variant};
use crate::error::ValidationError;
use crate::normal;
use serde::Serialize;

/// Default minimum detectable difference (2 percentage points)
pub const DEFAULT_MIN_DETECTABLE_DIFF: f64 = 0.02;

/// Conventional power target
pub const DEFAULT_POWER_TARGET: f64 = 0.80;

/// Power to detect `min_detectable_diff` at significance `alpha`
///
/// Returns a probability in [0, 1]. The alternative proportion
/// `p_control + min_detectable_diff` must itself lie in [0, 1].
///
/// # Example
/// ```
/// use abtest::power::power;
///
/// let small = power(1000, 1000, 0.05, 0.01, 0.05).unwrap();
/// let large = power(1000, 1000, 0.05, 0.05, 0.05).unwrap();
/// assert!(large > small);
/// ```
pub fn power(
    n_a: i64,
    n_b: i64,
    p_control: f64,
    min_detectable_diff: f64,
    alpha: f64,
) -> Result<f64, ValidationError> {
    if n_a <= 0 {
        return Err(ValidationError::NonPositiveSampleSize {
            variant: Variant::A,
            size: n_a,
        });
    }
    if n_b <= 0 {
        return Err(ValidationError::NonPositiveSampleSize {
            variant: Variant::B,
            size: n_b,
        });
    }
    if !(0.0..=1.0).contains(&p_control) {
        return Err(ValidationError::ControlProportionOutOfRange(p_control));
    }
    check_alpha(alpha)?;

    let diff = min_detectable_diff;
    let p1 = p_control + diff;
    let p2 = p_control;
    if !(0.0..=1.0).contains(&p1) {
        return Err(ValidationError::AlternativeProportionOutOfRange {
            control: p_control,
            diff,
        });
    }

    let ratio = n_b as f64 / n_a as f64;
    let pooled = (p1 + p2 * ratio) / (1.0 + ratio);
    let std_null = diff_std(pooled, pooled, ratio);
    let std_alt = diff_std(p1, p2, ratio);

    let crit = normal::two_sided_critical(alpha);
    let shift = diff * (n_a as f64).sqrt();

    let value = if std_alt > 0.0 {
        let upper = normal::sf((crit * std_null - shift) / std_alt);
        let lower = normal::cdf((-crit * std_null - shift) / std_alt);
        (upper + lower).clamp(0.0, 1.0)
    } else if shift.abs() > crit * std_null {
        // Point-mass alternative beyond the rejection bound
        1.0
    } else {
        0.0
    };

    tracing::debug!(n_a, n_b, p_control, diff, alpha, power = value, "power");
    Ok(value)
}

/// Standard deviation of the difference in proportions per unit of `nA`
fn diff_std(p1: f64, p2: f64, ratio: f64) -> f64 {
    (p1 * (1.0 - p1) + p2 * (1.0 - p2) / ratio).sqrt()
}

/// Power value with its adequacy judgement
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PowerAssessment {
    /// Probability of detecting the difference
    pub power: f64,

    /// Difference the power was computed for
    pub min_detectable_diff: f64,

    /// Threshold considered adequate
    pub target: f64,

    /// `power >= target`
    pub is_sufficient: bool,
}

impl PowerAssessment {
    pub fn new(power: f64, min_detectable_diff: f64, target: f64) -> Self {
        let is_sufficient = power >= target;
        if !is_sufficient {
            tracing::warn!(
                "Power {:.3} is below the {:.0}% target for a {:.2} pp difference",
                power,
                target * 100.0,
                min_detectable_diff * 100.0
            );
        }
        Self {
            power,
            min_detectable_diff,
            target,
            is_sufficient,
        }
    }

    /// Human-readable recommendation
    pub fn recommendation(&self) -> String {
        if self.is_sufficient {
            format!(
                "Power is sufficient (≥{:.0}%) for detecting a {:.1}pp difference.",
                self.target * 100.0,
                self.min_detectable_diff * 100.0
            )
        } else {
            format!(
                "Power is below the recommended {:.0}% threshold. Consider increasing sample sizes.",
                self.target * 100.0
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_values() {
        let p = power(5000, 5000, 0.0246, 0.02, 0.05).unwrap();
        assert!((p - 0.999_781_6).abs() < 1e-6);

        let p = power(1000, 1000, 0.05, 0.01, 0.05).unwrap();
        assert!((p - 0.165_328_6).abs() < 1e-6);

        let p = power(1000, 1000, 0.05, 0.05, 0.05).unwrap();
        assert!((p - 0.989_138_1).abs() < 1e-6);
    }

    #[test]
    fn test_zero_difference_gives_alpha() {
        let p = power(1000, 1000, 0.05, 0.0, 0.05).unwrap();
        assert!((p - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_larger_mde_more_power() {
        let small = power(1000, 1000, 0.05, 0.01, 0.05).unwrap();
        let large = power(1000, 1000, 0.05, 0.05, 0.05).unwrap();
        assert!(large > small);
    }

    #[test]
    fn test_larger_samples_more_power() {
        let small = power(500, 500, 0.1, 0.02, 0.05).unwrap();
        let large = power(5000, 5000, 0.1, 0.02, 0.05).unwrap();
        assert!(large > small);
    }

    #[test]
    fn test_negative_difference() {
        let p = power(2000, 2000, 0.2, -0.03, 0.05).unwrap();
        assert!(p > 0.05 && p <= 1.0);
    }

    #[test]
    fn test_invalid_sample_sizes() {
        assert_eq!(
            power(0, 1000, 0.05, 0.02, 0.05),
            Err(ValidationError::NonPositiveSampleSize {
                variant: Variant::A,
                size: 0
            })
        );
        assert!(matches!(
            power(1000, -3, 0.05, 0.02, 0.05),
            Err(ValidationError::NonPositiveSampleSize {
                variant: Variant::B,
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_control_proportion() {
        assert_eq!(
            power(1000, 1000, 1.5, 0.02, 0.05),
            Err(ValidationError::ControlProportionOutOfRange(1.5))
        );
        assert!(power(1000, 1000, f64::NAN, 0.02, 0.05).is_err());
    }

    #[test]
    fn test_invalid_alpha() {
        assert!(matches!(
            power(1000, 1000, 0.05, 0.02, 0.0),
            Err(ValidationError::AlphaOutOfRange(_))
        ));
    }

    #[test]
    fn test_alternative_out_of_range() {
        assert!(matches!(
            power(1000, 1000, 0.99, 0.02, 0.05),
            Err(ValidationError::AlternativeProportionOutOfRange { .. })
        ));
        assert!(matches!(
            power(1000, 1000, 0.01, -0.02, 0.05),
            Err(ValidationError::AlternativeProportionOutOfRange { .. })
        ));
    }

    #[test]
    fn test_degenerate_point_mass() {
        // Control never converts, alternative always does
        assert_eq!(power(100, 100, 0.0, 1.0, 0.05).unwrap(), 1.0);
        // No variance and no difference
        assert_eq!(power(100, 100, 0.0, 0.0, 0.05).unwrap(), 0.0);
    }

    #[test]
    fn test_power_assessment() {
        let ok = PowerAssessment::new(0.92, 0.02, DEFAULT_POWER_TARGET);
        assert!(ok.is_sufficient);
        assert!(ok.recommendation().contains("2.0pp"));

        let low = PowerAssessment::new(0.41, 0.02, DEFAULT_POWER_TARGET);
        assert!(!low.is_sufficient);
        assert!(low.recommendation().contains("below the recommended 80%"));
    }
}
