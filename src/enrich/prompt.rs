//! Prompt construction for the enrichment collaborator.

use crate::{AuditResult, FindingSeverity};

/// Builds the enrichment prompt from an audit result.
///
/// The collaborator receives the url, overall score, category scores, and
/// the top issues and strengths; it returns recommendations and insights in
/// the validated response schema.
pub struct EnrichmentPromptBuilder {
    /// Maximum issues/strengths included in the prompt
    max_findings: usize,
}

impl EnrichmentPromptBuilder {
    pub fn new() -> Self {
        Self { max_findings: 10 }
    }

    pub fn max_findings(mut self, max: usize) -> Self {
        self.max_findings = max;
        self
    }

    /// Generate the prompt for one audit result
    pub fn build(&self, result: &AuditResult) -> String {
        let category_lines: String = result
            .category_scores
            .iter()
            .map(|c| format!("- {}: {:.0}/100\n", c.category.label(), c.score))
            .collect();

        let top_issues = self.format_findings(result, FindingSeverity::Issue);
        let top_strengths = self.format_findings(result, FindingSeverity::Strength);

        format!(
            r#"You are an expert in generative-engine optimization. A page audit produced the data below. Propose the highest-leverage improvements.

## Audit
**URL:** {}
**Overall score:** {:.1}/100 (grade {})

## Category scores
{}
## Top issues
{}
## Top strengths
{}
## Output format
Reply with ONLY a JSON object, no prose, matching:
{{
  "recommendations": [{{
    "category": "<category key, e.g. meta-tags>",
    "priority": "critical|high|medium|low",
    "effort": "quick-win|strategic|long-term",
    "title": "...",
    "description": "...",
    "impact": "...",
    "implementation": "...",
    "estimatedTime": "..."
  }}],
  "insights": ["..."]
}}
"#,
            result.url,
            result.overall_score,
            result.grade,
            category_lines,
            top_issues,
            top_strengths,
        )
    }

    fn format_findings(&self, result: &AuditResult, severity: FindingSeverity) -> String {
        let lines: String = result
            .category_scores
            .iter()
            .flat_map(|c| c.findings.iter())
            .filter(|f| f.severity == severity)
            .take(self.max_findings)
            .map(|f| format!("- [{}] {}\n", f.category.label(), f.message))
            .collect();
        if lines.is_empty() {
            "- none\n".to_string()
        } else {
            lines
        }
    }
}

impl Default for EnrichmentPromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}
