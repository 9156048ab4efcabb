//! Caller-owned analysis state for front ends
//!
//! A presentation layer keeps the current inputs (typed counts or counts
//! loaded from a file) and the analysis parameters in an
//! [`AnalysisSession`]. The statistical functions never see this state:
//! [`AnalysisSession::analyze`] passes every value explicitly.

use crate::comparison::{assess, TestResult, Verdict};
use crate::config::AnalysisConfig;
use crate::counts::Experiment;
use crate::error::{Result, ValidationError};
use crate::loader::{self, DataFormat};
use crate::power::{power, PowerAssessment};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Starting inputs shown before any data is entered
pub const DEFAULT_COUNTS: (i64, i64, i64, i64) = (123, 5000, 155, 5000);

/// Inputs and parameters for one front-end session
#[derive(Debug, Clone)]
pub struct AnalysisSession {
    experiment: Experiment,
    config: AnalysisConfig,
    loaded_file: Option<PathBuf>,
}

impl AnalysisSession {
    pub fn new(experiment: Experiment, config: AnalysisConfig) -> Self {
        Self {
            experiment,
            config,
            loaded_file: None,
        }
    }

    /// Session seeded with [`DEFAULT_COUNTS`]
    pub fn with_config(config: AnalysisConfig) -> Result<Self> {
        let (sa, ta, sb, tb) = DEFAULT_COUNTS;
        Ok(Self::new(Experiment::new(sa, ta, sb, tb)?, config))
    }

    pub fn experiment(&self) -> &Experiment {
        &self.experiment
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut AnalysisConfig {
        &mut self.config
    }

    pub fn loaded_file(&self) -> Option<&Path> {
        self.loaded_file.as_deref()
    }

    /// Replace the counts with typed-in values
    pub fn set_counts(
        &mut self,
        success_a: i64,
        total_a: i64,
        success_b: i64,
        total_b: i64,
    ) -> std::result::Result<(), ValidationError> {
        self.experiment = Experiment::new(success_a, total_a, success_b, total_b)?;
        Ok(())
    }

    /// Load counts from a file in either layout
    ///
    /// Returns the detected layout when the counts were replaced, or `None`
    /// when the same file was already loaded (so manual edits made after a
    /// load are kept).
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<Option<DataFormat>> {
        let path = path.as_ref();
        if self.loaded_file.as_deref() == Some(path) {
            tracing::debug!(path = %path.display(), "file already loaded, keeping counts");
            return Ok(None);
        }

        let (format, experiment) = loader::load_auto(path)?;
        self.experiment = experiment;
        self.loaded_file = Some(path.to_path_buf());
        Ok(Some(format))
    }

    /// Run the comparison and power analysis on the current inputs
    ///
    /// Power uses variant A's observed rate as the control proportion and
    /// the two arm totals as sample sizes. A power step that cannot run
    /// (the alternative rate leaves [0, 1]) is reported in
    /// [`Analysis::power`] and does not fail the comparison.
    pub fn analyze(&self) -> std::result::Result<Analysis, ValidationError> {
        self.config.validate()?;

        let assessment = assess(&self.experiment, self.config.alpha)?;
        let rate_a = self.experiment.a.proportion();
        let rate_b = self.experiment.b.proportion();

        let power = match power(
            self.experiment.a.total() as i64,
            self.experiment.b.total() as i64,
            rate_a,
            self.config.min_detectable_diff,
            self.config.alpha,
        ) {
            Ok(value) => PowerOutcome::Assessed(PowerAssessment::new(
                value,
                self.config.min_detectable_diff,
                self.config.power_target,
            )),
            Err(e) => {
                tracing::warn!("Power analysis skipped: {}", e);
                PowerOutcome::Unavailable {
                    min_detectable_diff: self.config.min_detectable_diff,
                    reason: e.to_string(),
                }
            }
        };

        Ok(Analysis {
            experiment: self.experiment,
            rate_a,
            rate_b,
            alpha: self.config.alpha,
            result: assessment.result,
            verdict: assessment.verdict,
            power,
        })
    }
}

/// Result of the optional power step
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PowerOutcome {
    /// Power was computed
    Assessed(PowerAssessment),

    /// Power could not be computed for these inputs
    Unavailable {
        min_detectable_diff: f64,
        reason: String,
    },
}

impl PowerOutcome {
    pub fn assessment(&self) -> Option<&PowerAssessment> {
        match self {
            PowerOutcome::Assessed(assessment) => Some(assessment),
            PowerOutcome::Unavailable { .. } => None,
        }
    }
}

/// Everything a front end renders for one set of inputs
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub experiment: Experiment,
    pub rate_a: f64,
    pub rate_b: f64,
    pub alpha: f64,
    pub result: TestResult,
    pub verdict: Verdict,
    pub power: PowerOutcome,
}

impl Analysis {
    /// Generate human-readable report
    pub fn to_report_string(&self) -> String {
        let assessment = crate::comparison::Assessment {
            experiment: self.experiment,
            result: self.result,
            verdict: self.verdict,
            alpha: self.alpha,
        };

        let mut report = assessment.to_report_string();
        report.push_str("\n⚡ Power Analysis:\n");
        match &self.power {
            PowerOutcome::Assessed(power) => {
                report.push_str(&format!(
                    "  Power to detect {:.1}pp difference: {:.1}%\n",
                    power.min_detectable_diff * 100.0,
                    power.power * 100.0
                ));
                report.push_str(&format!(
                    "  {} {}\n",
                    if power.is_sufficient { "✅" } else { "⚠️ " },
                    power.recommendation()
                ));
            }
            PowerOutcome::Unavailable {
                min_detectable_diff,
                reason,
            } => {
                report.push_str(&format!(
                    "  ❌ Power for a {:.1}pp difference unavailable: {}\n",
                    min_detectable_diff * 100.0,
                    reason
                ));
            }
        }
        report
    }
}
