//! JSON output format for analysis results

use crate::session::Analysis;
use serde::Serialize;

/// Top-level JSON document
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput<'a> {
    /// Format version
    pub version: &'static str,
    /// Tool name
    pub format: &'static str,
    /// Full analysis
    pub analysis: &'a Analysis,
}

impl<'a> JsonOutput<'a> {
    pub fn new(analysis: &'a Analysis) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            format: "abtest-json-v1",
            analysis,
        }
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
