//! Standard normal distribution helpers
//!
//! Thin wrappers over statrs' error functions. Tail probabilities go
//! through `erfc` directly so small p-values keep their precision instead of
//! cancelling in `1 - cdf(x)`.

use statrs::function::erf::{erfc, erfc_inv};
use std::f64::consts::SQRT_2;

/// Standard normal CDF, Φ(x)
pub fn cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Standard normal survival function, 1 - Φ(x)
pub fn sf(x: f64) -> f64 {
    0.5 * erfc(x / SQRT_2)
}

/// Standard normal quantile, Φ⁻¹(p) for p in (0, 1)
pub fn quantile(p: f64) -> f64 {
    -SQRT_2 * erfc_inv(2.0 * p)
}

/// Critical value Φ⁻¹(1 - alpha/2) of a two-sided test
pub fn two_sided_critical(alpha: f64) -> f64 {
    quantile(1.0 - alpha / 2.0)
}

/// Two-sided p-value 2·(1 - Φ(|z|))
pub fn two_sided_p_value(z: f64) -> f64 {
    erfc(z.abs() / SQRT_2).clamp(0.0, 1.0)
}
