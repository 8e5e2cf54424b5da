//! JSON reporter for machine-readable output.
//!
//! The serialized field names and nesting are the stable wire schema that
//! dashboards and downloads depend on.

use crate::analyzer::AggregateStats;
use crate::forecast::ForecastReport;
use crate::AuditResult;
use serde::Serialize;

/// Reporter for JSON output
pub struct JsonReporter {
    /// Whether to pretty-print JSON
    pretty: bool,
}

impl JsonReporter {
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Enable pretty-printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    fn serialize<T: Serialize>(&self, value: &T) -> String {
        if self.pretty {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
        } else {
            serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
        }
    }

    /// Report a single audit result as JSON
    pub fn report(&self, result: &AuditResult) -> String {
        self.serialize(result)
    }

    /// Report multiple results as a JSON array
    pub fn report_many(&self, results: &[AuditResult]) -> String {
        self.serialize(&results)
    }

    /// Report with summary envelope
    pub fn report_with_summary(&self, results: &[AuditResult], stats: &AggregateStats) -> String {
        let output = JsonOutput {
            results,
            summary: JsonSummary {
                pages_audited: stats.pages_audited,
                average_score: stats.average_score,
                average_grade: stats.average_grade.to_string(),
                total_issues: stats.total_issues,
                total_recommendations: stats.total_recommendations,
            },
        };
        self.serialize(&output)
    }

    /// Report a forecast as JSON
    pub fn report_forecast(&self, forecast: &ForecastReport) -> String {
        self.serialize(forecast)
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonOutput<'a> {
    results: &'a [AuditResult],
    summary: JsonSummary,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonSummary {
    pages_audited: usize,
    average_score: f64,
    average_grade: String,
    total_issues: usize,
    total_recommendations: usize,
}
