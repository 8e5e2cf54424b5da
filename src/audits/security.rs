//! Security audit: transport security and unsafe markup patterns.

use crate::analyzer::scorers::{CategoryScorer, Checklist};
use crate::document::DocumentModel;
use crate::{Category, CategoryScore, SignalCode};
use regex::Regex;
use std::sync::OnceLock;

// Point allocation (sums to 100)
const PTS_HTTPS: f64 = 40.0;
const PTS_MIXED_CONTENT: f64 = 30.0;
const PTS_INLINE_HANDLERS: f64 = 15.0;
const PTS_FORMS: f64 = 15.0;

fn inline_handler_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"\son(click|load|error|mouseover|submit|focus|blur)\s*="#).unwrap()
    })
}

fn mixed_content_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(?:src|href)=["']http://"#).unwrap())
}

pub struct SecurityAudit;

impl CategoryScorer for SecurityAudit {
    fn category(&self) -> Category {
        Category::Security
    }

    fn score(&self, doc: &DocumentModel) -> CategoryScore {
        let mut checklist = Checklist::new(Category::Security);

        if doc.is_https() {
            checklist.pass(
                SignalCode::HttpsEverywhere,
                PTS_HTTPS,
                "Page is served over HTTPS",
            );
        } else {
            checklist.fail(
                SignalCode::HttpsEverywhere,
                PTS_HTTPS,
                "Page is served over plain HTTP; browsers and crawlers flag it as insecure",
            );
        }

        let mixed = mixed_content_re().find_iter(&doc.raw_html).count();
        if mixed == 0 {
            checklist.pass(
                SignalCode::NoMixedContent,
                PTS_MIXED_CONTENT,
                "No http:// subresources referenced",
            );
        } else {
            checklist.fail(
                SignalCode::NoMixedContent,
                PTS_MIXED_CONTENT,
                format!("{} subresource reference(s) load over plain HTTP", mixed),
            );
        }

        let handlers = inline_handler_re().find_iter(&doc.raw_html).count();
        if handlers == 0 {
            checklist.pass(
                SignalCode::NoInlineHandlers,
                PTS_INLINE_HANDLERS,
                "No inline event handlers",
            );
        } else {
            checklist.fail(
                SignalCode::NoInlineHandlers,
                PTS_INLINE_HANDLERS,
                format!(
                    "{} inline event handler(s) block a strict Content-Security-Policy",
                    handlers
                ),
            );
        }

        let insecure_forms = doc
            .form_actions
            .iter()
            .filter(|action| {
                action
                    .as_deref()
                    .is_some_and(|a| a.starts_with("http://"))
            })
            .count();
        if doc.form_actions.is_empty() {
            checklist.pass(
                SignalCode::FormSecurity,
                PTS_FORMS,
                "No forms on the page",
            );
        } else if insecure_forms == 0 {
            checklist.pass(
                SignalCode::FormSecurity,
                PTS_FORMS,
                "All forms submit to secure or same-origin endpoints",
            );
        } else {
            checklist.fail(
                SignalCode::FormSecurity,
                PTS_FORMS,
                format!("{} form(s) submit over plain HTTP", insecure_forms),
            );
        }

        checklist.into_score()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_https_page_scores_full() {
        let doc = DocumentModel::parse(
            "https://example.com/",
            "<html><body><p>safe</p></body></html>",
            None,
        );
        assert_eq!(SecurityAudit.score(&doc).score, 100.0);
    }

    #[test]
    fn http_page_fails_transport_signal() {
        let doc = DocumentModel::parse("http://example.com/", "<html></html>", None);
        let score = SecurityAudit.score(&doc);
        assert_eq!(score.score, 60.0);
    }

    #[test]
    fn mixed_content_detected() {
        let html = r#"<html><body><img src="http://cdn.example.com/x.png"></body></html>"#;
        let doc = DocumentModel::parse("https://example.com/", html, None);
        let score = SecurityAudit.score(&doc);
        assert!(score
            .findings
            .iter()
            .any(|f| f.code == SignalCode::NoMixedContent
                && f.severity == crate::FindingSeverity::Issue));
    }

    #[test]
    fn inline_handlers_flagged() {
        let html = r#"<html><body><button onclick="buy()">Buy</button></body></html>"#;
        let doc = DocumentModel::parse("https://example.com/", html, None);
        let score = SecurityAudit.score(&doc);
        assert!(score
            .findings
            .iter()
            .any(|f| f.code == SignalCode::NoInlineHandlers
                && f.severity == crate::FindingSeverity::Issue));
    }

    #[test]
    fn insecure_form_action_flagged() {
        let html = r#"<html><body><form action="http://example.com/login"></form></body></html>"#;
        let doc = DocumentModel::parse("https://example.com/", html, None);
        let score = SecurityAudit.score(&doc);
        // mixed-content regex does not match action=, but the form check does
        assert!(score
            .findings
            .iter()
            .any(|f| f.code == SignalCode::FormSecurity
                && f.severity == crate::FindingSeverity::Issue));
    }
}
