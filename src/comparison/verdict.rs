// Decision verdict for a two-proportion comparison
//
// Combines the p-value with the position of the lift interval relative to
// zero. Evaluated in order:
// 1. p < α and CI lower bound > 0      → B wins
// 2. CI lower bound > 0 and p ≥ α      → positive but inconclusive
// 3. CI upper bound < 0                → A better or equivalent
// 4. otherwise (CI includes zero)      → inconclusive

use crate::comparison::ztest::{compare_experiment, TestResult};
use crate::counts::Experiment;
use crate::error::ValidationError;
use serde::Serialize;

/// Decision label for an experiment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Statistically significant improvement of B over A
    BWins,

    /// Interval above zero but p-value not below alpha
    InconclusivePositive,

    /// Interval entirely below zero
    ABetterOrEquivalent,

    /// Interval includes zero
    Inconclusive,
}

impl Verdict {
    /// Classify a test result at the given significance level
    pub fn from_result(result: &TestResult, alpha: f64) -> Self {
        if result.p < alpha && result.ci.lower > 0.0 {
            Verdict::BWins
        } else if result.ci.lower > 0.0 {
            Verdict::InconclusivePositive
        } else if result.ci.upper < 0.0 {
            Verdict::ABetterOrEquivalent
        } else {
            Verdict::Inconclusive
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            Verdict::BWins => "VARIANT B WINS",
            Verdict::InconclusivePositive | Verdict::Inconclusive => "INCONCLUSIVE",
            Verdict::ABetterOrEquivalent => "VARIANT A BETTER OR EQUIVALENT",
        }
    }

    pub fn explanation(&self) -> &'static str {
        match self {
            Verdict::BWins => "Statistically significant improvement detected.",
            Verdict::InconclusivePositive => {
                "Positive lift but not statistically significant. Consider extending sample size."
            }
            Verdict::ABetterOrEquivalent => {
                "Confidence interval suggests no improvement or decrease."
            }
            Verdict::Inconclusive => {
                "Confidence interval includes zero. Consider extending sample size."
            }
        }
    }

    fn marker(&self) -> &'static str {
        match self {
            Verdict::BWins => "✅",
            Verdict::InconclusivePositive | Verdict::Inconclusive => "⚠️ ",
            Verdict::ABetterOrEquivalent => "ℹ️ ",
        }
    }
}

/// Comparison result together with its inputs and verdict
#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    pub experiment: Experiment,
    pub result: TestResult,
    pub verdict: Verdict,
    pub alpha: f64,
}

impl Assessment {
    /// Generate human-readable report
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();
        let p_a = self.experiment.a.proportion();
        let p_b = self.experiment.b.proportion();

        report.push_str(&format!(
            "{} {}\n{}\n\n",
            self.verdict.marker(),
            self.verdict.headline(),
            self.verdict.explanation()
        ));

        report.push_str("📊 Conversion Rates:\n");
        report.push_str(&format!(
            "  Variant A: {:.4} ({:.2}%)  [{}/{}]\n",
            p_a,
            p_a * 100.0,
            self.experiment.a.success(),
            self.experiment.a.total()
        ));
        report.push_str(&format!(
            "  Variant B: {:.4} ({:.2}%)  [{}/{}]\n",
            p_b,
            p_b * 100.0,
            self.experiment.b.success(),
            self.experiment.b.total()
        ));

        report.push_str("\n📈 Statistical Test:\n");
        report.push_str(&format!("  Z-statistic: {:.4}\n", self.result.z));
        report.push_str(&format!(
            "  P-value: {:.6} ({})\n",
            self.result.p,
            if self.result.is_significant(self.alpha) {
                "significant"
            } else {
                "not significant"
            }
        ));
        report.push_str(&format!("  Lift: {:+.3} pp\n", self.result.lift * 100.0));
        report.push_str(&format!(
            "  {:.0}% CI: {:.6} to {:.6} ({:+.3} pp to {:+.3} pp)\n",
            (1.0 - self.alpha) * 100.0,
            self.result.ci.lower,
            self.result.ci.upper,
            self.result.ci.lower * 100.0,
            self.result.ci.upper * 100.0
        ));

        report
    }
}

/// Run the comparison and classify it
///
/// # Example
/// ```
/// use abtest::comparison::{assess, Verdict};
/// use abtest::counts::Experiment;
///
/// let experiment = Experiment::new(100, 1000, 200, 1000).unwrap();
/// let assessment = assess(&experiment, 0.05).unwrap();
/// assert_eq!(assessment.verdict, Verdict::BWins);
/// ```
pub fn assess(experiment: &Experiment, alpha: f64) -> Result<Assessment, ValidationError> {
    let result = compare_experiment(experiment, alpha)?;
    let verdict = Verdict::from_result(&result, alpha);

    Ok(Assessment {
        experiment: *experiment,
        result,
        verdict,
        alpha,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::ztest::ConfidenceInterval;

    fn result(p: f64, lower: f64, upper: f64) -> TestResult {
        TestResult {
            z: 0.0,
            p,
            lift: (lower + upper) / 2.0,
            ci: ConfidenceInterval { lower, upper },
        }
    }

    #[test]
    fn test_verdict_b_wins() {
        assert_eq!(
            Verdict::from_result(&result(0.01, 0.002, 0.02), 0.05),
            Verdict::BWins
        );
    }

    #[test]
    fn test_verdict_inconclusive_positive() {
        // Interval above zero but p not below alpha (e.g. alpha mismatch)
        assert_eq!(
            Verdict::from_result(&result(0.06, 0.001, 0.02), 0.05),
            Verdict::InconclusivePositive
        );
    }

    #[test]
    fn test_verdict_a_better() {
        assert_eq!(
            Verdict::from_result(&result(0.001, -0.03, -0.01), 0.05),
            Verdict::ABetterOrEquivalent
        );
    }

    #[test]
    fn test_verdict_inconclusive() {
        assert_eq!(
            Verdict::from_result(&result(0.4, -0.01, 0.02), 0.05),
            Verdict::Inconclusive
        );
    }

    #[test]
    fn test_verdict_headlines() {
        assert_eq!(Verdict::BWins.headline(), "VARIANT B WINS");
        assert_eq!(Verdict::Inconclusive.headline(), "INCONCLUSIVE");
        assert_eq!(Verdict::InconclusivePositive.headline(), "INCONCLUSIVE");
        assert!(Verdict::InconclusivePositive
            .explanation()
            .contains("Positive lift"));
    }

    #[test]
    fn test_verdict_serializes_snake_case() {
        let json = serde_json::to_string(&Verdict::ABetterOrEquivalent).unwrap();
        assert_eq!(json, "\"a_better_or_equivalent\"");
    }

    #[test]
    fn test_report_string_reference_example() {
        let experiment = Experiment::new(123, 5000, 155, 5000).unwrap();
        let assessment = assess(&experiment, 0.05).unwrap();

        let report = assessment.to_report_string();
        assert!(report.contains("INCONCLUSIVE"));
        assert!(report.contains("Variant A: 0.0246 (2.46%)"));
        assert!(report.contains("Variant B: 0.0310 (3.10%)"));
        assert!(report.contains("Lift: +0.640 pp"));
        assert!(report.contains("95% CI"));
        assert!(report.contains("not significant"));
    }

    #[test]
    fn test_assess_rejects_bad_alpha() {
        let experiment = Experiment::new(1, 10, 2, 10).unwrap();
        assert!(assess(&experiment, 1.5).is_err());
    }
}
