// Two-proportion hypothesis testing for A/B experiments
//
// This module compares a control (A) and treatment (B) conversion rate:
// - Pooled-variance z-test for the hypothesis test statistic
// - Unpooled (Wald) confidence interval for the lift
// - Decision verdict combining p-value and interval position
//
// The z-statistic and the interval deliberately use different standard
// errors: pooled under the null for testing, unpooled under the alternative
// for estimation.
//
// Large-sample normal approximation only. No exact (Fisher/Barnard) tests,
// no sequential or multi-arm designs.

mod verdict;
mod ztest;

pub use verdict::{assess, Assessment, Verdict};
pub use ztest::{compare, compare_experiment, ConfidenceInterval, TestResult, DEFAULT_ALPHA};
