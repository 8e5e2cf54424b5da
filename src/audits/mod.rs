//! Advisory audits with the same evidence contract as the category scorers.
//!
//! These do not feed the weighted overall score; their findings still feed
//! recommendations, and estimated values stay flagged as estimates.

pub mod accessibility;
pub mod core_web_vitals;
pub mod international;
pub mod mobile;
pub mod security;

pub use accessibility::AccessibilityAudit;
pub use core_web_vitals::CoreWebVitalsAudit;
pub use international::InternationalSeoAudit;
pub use mobile::MobileAudit;
pub use security::SecurityAudit;

use crate::analyzer::scorers::CategoryScorer;

/// The fixed registry of advisory audits
pub fn advisory_audits() -> Vec<Box<dyn CategoryScorer>> {
    vec![
        Box::new(CoreWebVitalsAudit),
        Box::new(SecurityAudit),
        Box::new(MobileAudit),
        Box::new(AccessibilityAudit),
        Box::new(InternationalSeoAudit),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentModel;

    #[test]
    fn audits_cover_five_distinct_categories() {
        let audits = advisory_audits();
        assert_eq!(audits.len(), 5);
        let mut categories: Vec<_> = audits.iter().map(|a| a.category()).collect();
        categories.sort();
        categories.dedup();
        assert_eq!(categories.len(), 5);
    }

    #[test]
    fn audits_handle_an_empty_page() {
        let doc = DocumentModel::parse("https://example.com/", "<html></html>", None);
        for audit in advisory_audits() {
            let score = audit.score(&doc);
            assert!((0.0..=100.0).contains(&score.score));
            assert!(!score.findings.is_empty());
        }
    }
}
