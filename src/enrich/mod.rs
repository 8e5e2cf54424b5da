//! Recommendation enrichment collaborator.
//!
//! An optional language-model step that may replace or augment the
//! rule-based recommendation list. Its output is validated against the
//! recommendation schema and merged with per-category precedence; it can
//! never change score values, and any failure falls back to the rule-based
//! list.

pub mod claude;
pub mod prompt;

pub use claude::{is_ai_available, EnrichmentClient, EnrichmentError};
pub use prompt::EnrichmentPromptBuilder;

use crate::Recommendation;
use serde::{Deserialize, Serialize};

/// Validated response schema for the enrichment collaborator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnrichmentResponse {
    pub recommendations: Vec<Recommendation>,
    pub insights: Vec<String>,
}

/// Extract the first JSON object from model output that may wrap it in
/// markdown fences or prose
pub fn extract_json_object(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (offset, c) in content[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&content[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Parse and validate a raw model reply into the response schema.
/// Malformed output is a distinct failure, not an empty result.
pub fn parse_response(content: &str) -> Result<EnrichmentResponse, EnrichmentError> {
    let json = extract_json_object(content)
        .ok_or_else(|| EnrichmentError::InvalidResponse("no JSON object in reply".to_string()))?;
    serde_json::from_str(json).map_err(|e| EnrichmentError::InvalidResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_fenced_json() {
        let content = "Here you go:\n```json\n{\"recommendations\": [], \"insights\": [\"a\"]}\n```";
        let json = extract_json_object(content).unwrap();
        assert!(json.starts_with('{') && json.ends_with('}'));
    }

    #[test]
    fn extracts_nested_objects() {
        let content = r#"{"a": {"b": {"c": 1}}, "d": 2} trailing"#;
        assert_eq!(
            extract_json_object(content).unwrap(),
            r#"{"a": {"b": {"c": 1}}, "d": 2}"#
        );
    }

    #[test]
    fn braces_inside_strings_are_ignored() {
        let content = r#"{"text": "shape: {weird}"}"#;
        assert_eq!(extract_json_object(content).unwrap(), content);
    }

    #[test]
    fn no_json_is_a_distinct_failure() {
        let err = parse_response("I could not produce recommendations.").unwrap_err();
        assert!(matches!(err, EnrichmentError::InvalidResponse(_)));
    }

    #[test]
    fn valid_response_parses_into_schema() {
        let content = r#"{
            "recommendations": [{
                "category": "meta-tags",
                "priority": "high",
                "effort": "quick-win",
                "title": "Rewrite the title",
                "description": "model-written",
                "impact": "clearer intent match",
                "implementation": "lead with the question",
                "estimatedTime": "1 hour"
            }],
            "insights": ["The page reads as commercial"]
        }"#;
        let response = parse_response(content).unwrap();
        assert_eq!(response.recommendations.len(), 1);
        assert_eq!(response.recommendations[0].category, crate::Category::MetaTags);
        assert_eq!(response.insights.len(), 1);
    }

    #[test]
    fn schema_violation_is_rejected() {
        // priority must be one of the known values
        let content = r#"{"recommendations": [{
            "category": "meta-tags", "priority": "urgent", "effort": "quick-win",
            "title": "x", "description": "y", "impact": "z",
            "implementation": "w", "estimatedTime": "1 hour"
        }], "insights": []}"#;
        assert!(parse_response(content).is_err());
    }

    #[test]
    fn empty_recommendation_list_is_valid_not_an_error() {
        let response = parse_response(r#"{"recommendations": [], "insights": []}"#).unwrap();
        assert!(response.recommendations.is_empty());
    }
}
