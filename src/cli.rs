//! CLI argument parsing for abtest

use crate::config::AnalysisConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for analysis results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

/// Named significance presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// 95% confidence
    Default,
    /// 99% confidence
    Strict,
    /// 90% confidence
    Permissive,
}

impl From<Preset> for AnalysisConfig {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Default => AnalysisConfig::default(),
            Preset::Strict => AnalysisConfig::strict(),
            Preset::Permissive => AnalysisConfig::permissive(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "abtest")]
#[command(version)]
#[command(
    about = "Two-proportion z-test, confidence interval and power for A/B experiments",
    long_about = None
)]
pub struct Cli {
    /// Conversions in variant A
    #[arg(long = "success-a", value_name = "N", allow_negative_numbers = true)]
    pub success_a: Option<i64>,

    /// Observations in variant A
    #[arg(long = "total-a", value_name = "N", allow_negative_numbers = true)]
    pub total_a: Option<i64>,

    /// Conversions in variant B
    #[arg(long = "success-b", value_name = "N", allow_negative_numbers = true)]
    pub success_b: Option<i64>,

    /// Observations in variant B
    #[arg(long = "total-b", value_name = "N", allow_negative_numbers = true)]
    pub total_b: Option<i64>,

    /// CSV file in aggregated (group,success,total) or row-level
    /// (user_id,group,converted) layout
    #[arg(
        short = 'f',
        long = "file",
        value_name = "PATH",
        conflicts_with_all = ["success_a", "total_a", "success_b", "total_b"]
    )]
    pub file: Option<PathBuf>,

    /// Significance level, overrides preset and config file
    #[arg(short = 'a', long = "alpha", value_name = "ALPHA")]
    pub alpha: Option<f64>,

    /// Minimum detectable difference in percentage points (2.0 = 0.02),
    /// negative for a drop
    #[arg(long = "mde", value_name = "PP", allow_negative_numbers = true)]
    pub mde: Option<f64>,

    /// Significance preset
    #[arg(long = "preset", value_enum, default_value = "default")]
    pub preset: Preset,

    /// TOML configuration file (takes precedence over --preset)
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug tracing to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// All four counts when given together, `None` when none were given
    ///
    /// A partial set is reported as the names of the missing flags.
    pub fn counts(&self) -> Result<Option<(i64, i64, i64, i64)>, Vec<&'static str>> {
        match (self.success_a, self.total_a, self.success_b, self.total_b) {
            (Some(sa), Some(ta), Some(sb), Some(tb)) => Ok(Some((sa, ta, sb, tb))),
            (None, None, None, None) => Ok(None),
            (sa, ta, sb, tb) => {
                let missing = [
                    (sa.is_none(), "--success-a"),
                    (ta.is_none(), "--total-a"),
                    (sb.is_none(), "--success-b"),
                    (tb.is_none(), "--total-b"),
                ]
                .into_iter()
                .filter_map(|(absent, name)| absent.then_some(name))
                .collect();
                Err(missing)
            }
        }
    }
}
