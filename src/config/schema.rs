//! Configuration schema for .citegeistrc.json

use crate::analyzer::scoring::CategoryWeights;
use crate::GradeCutoffs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration loaded from .citegeistrc.json.
/// Scoring constants are deliberately overridable: the published weights are
/// tuning values, not proven ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Minimum overall score; the CLI exits 1 below it
    pub threshold: Option<f64>,
    /// Per-category weight overrides (keys are Category::key values);
    /// the full table must still sum to 100
    pub weights: Option<BTreeMap<String, f64>>,
    /// Grade cut points
    pub grade_cutoffs: Option<GradeCutoffs>,
    /// Glob patterns excluded in directory mode
    pub ignore: Vec<String>,
    /// Expected primary keyword, echoed in the report when it is missing
    pub primary_keyword: Option<String>,
}

impl Config {
    /// CLI flags override config file values
    pub fn merge_with_cli(mut self, threshold: Option<f64>) -> Self {
        if threshold.is_some() {
            self.threshold = threshold;
        }
        self
    }

    /// Resolve the weight table, applying any overrides
    pub fn effective_weights(&self) -> Result<CategoryWeights, String> {
        match &self.weights {
            Some(overrides) => CategoryWeights::default().with_overrides(overrides),
            None => Ok(CategoryWeights::default()),
        }
    }

    pub fn effective_cutoffs(&self) -> GradeCutoffs {
        self.grade_cutoffs.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_default_tables() {
        let config = Config::default();
        assert!(config.effective_weights().is_ok());
        assert_eq!(config.effective_cutoffs().a_plus, 90.0);
        assert!(config.threshold.is_none());
    }

    #[test]
    fn parses_camel_case_fields() {
        let config: Config = serde_json::from_str(
            r#"{
                "threshold": 70,
                "primaryKeyword": "connection pooling",
                "gradeCutoffs": {"aPlus": 92, "a": 82, "b": 72, "c": 62, "d": 52},
                "ignore": ["**/drafts/**"]
            }"#,
        )
        .unwrap();
        assert_eq!(config.threshold, Some(70.0));
        assert_eq!(config.primary_keyword.as_deref(), Some("connection pooling"));
        assert_eq!(config.effective_cutoffs().a_plus, 92.0);
        assert_eq!(config.ignore, vec!["**/drafts/**".to_string()]);
    }

    #[test]
    fn weight_overrides_are_validated() {
        let config: Config = serde_json::from_str(
            r#"{"weights": {"schema-markup": 99}}"#,
        )
        .unwrap();
        assert!(config.effective_weights().is_err());

        let config: Config = serde_json::from_str(
            r#"{"weights": {"schema-markup": 20, "performance": 1}}"#,
        )
        .unwrap();
        let weights = config.effective_weights().unwrap();
        assert_eq!(weights.schema_markup, 20.0);
    }

    #[test]
    fn cli_threshold_overrides_file() {
        let config = Config {
            threshold: Some(60.0),
            ..Config::default()
        };
        let merged = config.merge_with_cli(Some(80.0));
        assert_eq!(merged.threshold, Some(80.0));

        let config = Config {
            threshold: Some(60.0),
            ..Config::default()
        };
        let merged = config.merge_with_cli(None);
        assert_eq!(merged.threshold, Some(60.0));
    }
}
