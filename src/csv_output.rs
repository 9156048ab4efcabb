//! CSV output format for analysis results
//!
//! One `metric,value` row per reported quantity, for spreadsheet import.

use crate::session::{Analysis, PowerOutcome};

/// CSV output formatter
#[derive(Debug)]
pub struct CsvOutput {
    rows: Vec<(String, String)>,
}

impl CsvOutput {
    /// Build the metric rows for an analysis
    pub fn new(analysis: &Analysis) -> Self {
        let (success_a, total_a, success_b, total_b) = analysis.experiment.as_tuple();
        // Power columns stay present with empty values when power is unavailable
        let (min_detectable_diff, power, power_sufficient, power_error) = match &analysis.power {
            PowerOutcome::Assessed(power) => (
                power.min_detectable_diff,
                power.power.to_string(),
                power.is_sufficient.to_string(),
                String::new(),
            ),
            PowerOutcome::Unavailable {
                min_detectable_diff,
                reason,
            } => (*min_detectable_diff, String::new(), String::new(), reason.clone()),
        };
        let rows = vec![
            ("success_a", success_a.to_string()),
            ("total_a", total_a.to_string()),
            ("success_b", success_b.to_string()),
            ("total_b", total_b.to_string()),
            ("rate_a", analysis.rate_a.to_string()),
            ("rate_b", analysis.rate_b.to_string()),
            ("alpha", analysis.alpha.to_string()),
            ("z", analysis.result.z.to_string()),
            ("p", analysis.result.p.to_string()),
            ("lift", analysis.result.lift.to_string()),
            ("ci_lower", analysis.result.ci.lower.to_string()),
            ("ci_upper", analysis.result.ci.upper.to_string()),
            ("verdict", analysis.verdict.headline().to_string()),
            ("min_detectable_diff", min_detectable_diff.to_string()),
            ("power", power),
            ("power_sufficient", power_sufficient),
            ("power_error", power_error),
        ];

        Self {
            rows: rows
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        }
    }

    /// Escape CSV field (handle commas, quotes, newlines)
    fn escape_field(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut output = String::from("metric,value\n");
        for (name, value) in &self.rows {
            output.push_str(&Self::escape_field(name));
            output.push(',');
            output.push_str(&Self::escape_field(value));
            output.push('\n');
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::session::AnalysisSession;

    #[test]
    fn test_escape_field() {
        assert_eq!(CsvOutput::escape_field("plain"), "plain");
        assert_eq!(CsvOutput::escape_field("a,b"), "\"a,b\"");
        assert_eq!(CsvOutput::escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_csv_output_rows() {
        let session = AnalysisSession::with_config(AnalysisConfig::default()).unwrap();
        let analysis = session.analyze().unwrap();
        let csv = CsvOutput::new(&analysis).to_csv();

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "metric,value");
        assert_eq!(lines[1], "success_a,123");
        assert_eq!(lines[4], "total_b,5000");
        assert!(csv.contains("verdict,INCONCLUSIVE\n"));
        assert!(csv.contains("power_sufficient,true\n"));
        assert!(csv.ends_with("power_error,\n"));
        assert_eq!(lines.len(), 18);
    }

    #[test]
    fn test_csv_output_without_power() {
        let mut session = AnalysisSession::with_config(AnalysisConfig::default()).unwrap();
        session.set_counts(990, 1000, 995, 1000).unwrap();
        let analysis = session.analyze().unwrap();
        let csv = CsvOutput::new(&analysis).to_csv();

        assert!(csv.contains("verdict,INCONCLUSIVE\n"));
        assert!(csv.contains("min_detectable_diff,0.02\n"));
        assert!(csv.contains("power,\n"));
        assert!(csv.contains("power_sufficient,\n"));
        // Reason contains a comma, so it is quoted
        assert!(csv.contains("power_error,\"Alternative proportion 0.99 + 0.02 falls outside [0, 1]\"\n"));
    }
}
