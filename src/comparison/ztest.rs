// Pooled two-proportion z-test with an unpooled confidence interval
//
// Statistic:  z = (pB - pA) / sqrt(p̄(1-p̄)(1/nA + 1/nB)),  p̄ = (sA+sB)/(nA+nB)
// p-value:    2·(1 - Φ(|z|))
// Interval:   (pB - pA) ± Φ⁻¹(1 - α/2)·sqrt(pA(1-pA)/nA + pB(1-pB)/nB)

use crate::counts::{check_alpha, Experiment};
use crate::error::ValidationError;
use crate::normal;
use serde::Serialize;

/// Default significance level
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Confidence interval for the lift (B - A)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

impl ConfidenceInterval {
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    /// True when zero lies strictly outside the interval
    pub fn excludes_zero(&self) -> bool {
        self.lower > 0.0 || self.upper < 0.0
    }
}

/// Outcome of a two-proportion comparison
///
/// All values are exact; rounding for display is left to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TestResult {
    /// z-statistic from the pooled standard error
    pub z: f64,

    /// Two-sided p-value in [0, 1]
    pub p: f64,

    /// Signed difference pB - pA; positive means B outperforms A
    pub lift: f64,

    /// Interval for the lift from the unpooled standard error
    pub ci: ConfidenceInterval,
}

impl TestResult {
    /// p-value below the significance level
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p < alpha
    }
}

/// Compare two conversion rates
///
/// Validates the counts and alpha before computing anything; an invalid
/// input returns the matching [`ValidationError`] and never NaN output.
///
/// # Example
/// ```
/// use abtest::comparison::compare;
///
/// let result = compare(123, 5000, 155, 5000, 0.05).unwrap();
/// assert!((result.lift - 0.0064).abs() < 1e-12);
/// assert!(result.p > 0.05); // not significant
/// assert!(result.ci.contains(0.0));
/// ```
pub fn compare(
    success_a: i64,
    total_a: i64,
    success_b: i64,
    total_b: i64,
    alpha: f64,
) -> Result<TestResult, ValidationError> {
    let experiment = Experiment::new(success_a, total_a, success_b, total_b)?;
    compare_experiment(&experiment, alpha)
}

/// Compare the arms of an already validated experiment
pub fn compare_experiment(
    experiment: &Experiment,
    alpha: f64,
) -> Result<TestResult, ValidationError> {
    check_alpha(alpha)?;

    let (success_a, total_a, success_b, total_b) = experiment.as_tuple();
    let (n_a, n_b) = (total_a as f64, total_b as f64);
    let p_a = experiment.a.proportion();
    let p_b = experiment.b.proportion();
    let lift = p_b - p_a;

    let pooled = (success_a + success_b) as f64 / (total_a + total_b) as f64;
    let se_pooled = (pooled * (1.0 - pooled) * (1.0 / n_a + 1.0 / n_b)).sqrt();

    // Both arms all-zero or all-one: no variance and no difference to test
    let (z, p) = if se_pooled > 0.0 {
        let z = lift / se_pooled;
        (z, normal::two_sided_p_value(z))
    } else {
        (0.0, 1.0)
    };

    let se_unpooled = (p_a * (1.0 - p_a) / n_a + p_b * (1.0 - p_b) / n_b).sqrt();
    let margin = normal::two_sided_critical(alpha) * se_unpooled;
    let ci = ConfidenceInterval {
        lower: lift - margin,
        upper: lift + margin,
    };

    tracing::debug!(
        z,
        p,
        lift,
        ci_lower = ci.lower,
        ci_upper = ci.upper,
        alpha,
        "two-proportion z-test"
    );

    Ok(TestResult { z, p, lift, ci })
}
