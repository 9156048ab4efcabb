// Analysis configuration: significance level, power target, MDE
//
// Loaded from an optional abtest.toml, then overridden by command-line
// flags. Missing keys fall back to the defaults.
//
// # Example abtest.toml
//
// ```toml
// alpha = 0.01
// min_detectable_diff = 0.005   # 0.5 percentage points
// power_target = 0.9
// ```

use crate::comparison::DEFAULT_ALPHA;
use crate::error::ValidationError;
use crate::power::{DEFAULT_MIN_DETECTABLE_DIFF, DEFAULT_POWER_TARGET};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Parameters shared by the comparison and power analysis
///
/// # Example
/// ```
/// use abtest::config::AnalysisConfig;
///
/// let config = AnalysisConfig::default();
/// assert_eq!(config.alpha, 0.05); // 95% confidence
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Significance level (alpha) for the two-sided test
    ///
    /// - 0.05 (default): 95% confidence interval
    /// - 0.01: stricter, wider intervals
    /// - 0.10: looser, narrower intervals
    pub alpha: f64,

    /// Difference in proportions the power analysis targets
    ///
    /// Expressed as a fraction: 0.02 is two percentage points.
    pub min_detectable_diff: f64,

    /// Power considered adequate (default 0.80)
    pub power_target: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            min_detectable_diff: DEFAULT_MIN_DETECTABLE_DIFF,
            power_target: DEFAULT_POWER_TARGET,
        }
    }
}

impl AnalysisConfig {
    /// 99% confidence
    pub fn strict() -> Self {
        Self {
            alpha: 0.01,
            ..Self::default()
        }
    }

    /// 90% confidence
    pub fn permissive() -> Self {
        Self {
            alpha: 0.10,
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// Load configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        crate::counts::check_alpha(self.alpha)?;

        if !self.min_detectable_diff.is_finite() {
            return Err(ValidationError::InvalidConfig(format!(
                "min_detectable_diff must be finite, got {}",
                self.min_detectable_diff
            )));
        }

        if !(self.power_target > 0.0 && self.power_target < 1.0) {
            return Err(ValidationError::InvalidConfig(format!(
                "power_target must be in (0, 1), got {}",
                self.power_target
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.alpha, 0.05);
        assert_eq!(config.min_detectable_diff, 0.02);
        assert_eq!(config.power_target, 0.80);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_strict_config() {
        let config = AnalysisConfig::strict();
        assert_eq!(config.alpha, 0.01);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_permissive_config() {
        let config = AnalysisConfig::permissive();
        assert_eq!(config.alpha, 0.10);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_invalid_alpha() {
        let mut config = AnalysisConfig::default();
        config.alpha = 1.5;
        assert_eq!(
            config.validate(),
            Err(ValidationError::AlphaOutOfRange(1.5))
        );
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_invalid_power_target() {
        let mut config = AnalysisConfig::default();
        config.power_target = 1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_invalid_mde() {
        let mut config = AnalysisConfig::default();
        config.min_detectable_diff = f64::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = AnalysisConfig::from_toml_str("alpha = 0.01\n").unwrap();
        assert_eq!(config.alpha, 0.01);
        assert_eq!(config.min_detectable_diff, 0.02);
        assert_eq!(config.power_target, 0.80);
    }

    #[test]
    fn test_from_toml_full() {
        let toml = r#"
            alpha = 0.1
            min_detectable_diff = 0.005
            power_target = 0.9
        "#;
        let config = AnalysisConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.alpha, 0.1);
        assert_eq!(config.min_detectable_diff, 0.005);
        assert_eq!(config.power_target, 0.9);
    }

    #[test]
    fn test_from_toml_rejects_invalid_values() {
        assert!(AnalysisConfig::from_toml_str("alpha = 0.0\n").is_err());
        assert!(AnalysisConfig::from_toml_str("alpah = 0.05\n").is_err());
        assert!(AnalysisConfig::from_toml_str("alpha = \"high\"\n").is_err());
    }

    #[test]
    fn test_from_file_missing() {
        let err = AnalysisConfig::from_file("no_such_abtest.toml").unwrap_err();
        assert!(err.to_string().contains("no_such_abtest.toml"));
    }
}
